// Copyright 2026 the recoup authors
// Licensed under the Apache License, Version 2.0

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use recoup_app::DocumentUploadInput;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::APP_NAME;

/// Default per-document size cap, in bytes.
pub const MAX_DOCUMENT_SIZE: i64 = 10 * 1024 * 1024;

/// Where accepted uploads go. Implementations must be safe to call from a
/// worker thread.
pub trait DocumentSink: Send {
    fn store(&self, input: &DocumentUploadInput) -> Result<StoredDocument>;
}

/// Metadata sidecar written next to every stored payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub file_name: String,
    pub document_name: String,
    pub document_type: String,
    pub remarks: String,
    pub size_bytes: i64,
    pub sha256: String,
    pub received_at: String,
}

/// Stores uploads as flat files in a spool directory: the payload under
/// `<sha256>-<file_name>` and the sidecar under `<sha256>.json`. Re-storing
/// the same bytes under the same name overwrites in place.
#[derive(Debug, Clone)]
pub struct SpoolSink {
    dir: PathBuf,
    max_document_size: i64,
}

impl SpoolSink {
    pub fn new(dir: impl Into<PathBuf>, max_document_size: i64) -> Self {
        Self {
            dir: dir.into(),
            max_document_size,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentSink for SpoolSink {
    fn store(&self, input: &DocumentUploadInput) -> Result<StoredDocument> {
        input.validate()?;
        let Some(file) = &input.file else {
            bail!("nothing to store -- attach a file and retry");
        };
        let document_name = input
            .document_name
            .ok_or_else(|| anyhow!("document name missing after validation"))?;
        let document_type = input
            .document_type
            .ok_or_else(|| anyhow!("document type missing after validation"))?;

        if file.file_name.contains(['/', '\\']) || file.file_name.contains("..") {
            bail!(
                "file name {:?} contains path separators -- rename the file and retry",
                file.file_name
            );
        }
        let size = i64::try_from(file.data.len()).context("document size overflow")?;
        if size > self.max_document_size {
            bail!(
                "document is {} bytes but max allowed is {}; shrink the file and retry",
                size,
                self.max_document_size
            );
        }

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create spool directory {}", self.dir.display()))?;

        let checksum = checksum_sha256(&file.data);
        let received_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .context("format received-at timestamp")?;
        let stored = StoredDocument {
            file_name: file.file_name.clone(),
            document_name: document_name.as_str().to_owned(),
            document_type: document_type.as_str().to_owned(),
            remarks: input.remarks.clone(),
            size_bytes: size,
            sha256: checksum.clone(),
            received_at,
        };

        let payload_path = self.dir.join(format!("{checksum}-{}", file.file_name));
        fs::write(&payload_path, &file.data)
            .with_context(|| format!("write document payload {}", payload_path.display()))?;

        let sidecar_path = self.dir.join(format!("{checksum}.json"));
        let sidecar = serde_json::to_string_pretty(&stored).context("serialize sidecar")?;
        fs::write(&sidecar_path, sidecar)
            .with_context(|| format!("write document sidecar {}", sidecar_path.display()))?;

        Ok(stored)
    }
}

/// Resolves the spool directory: `RECOUP_SPOOL_DIR` override first, then the
/// platform data directory.
pub fn default_spool_dir() -> Result<PathBuf> {
    if let Some(override_dir) = std::env::var_os("RECOUP_SPOOL_DIR") {
        return Ok(PathBuf::from(override_dir));
    }

    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set RECOUP_SPOOL_DIR to a writable directory")
    })?;
    Ok(data_root.join(APP_NAME).join("spool"))
}

pub fn checksum_sha256(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let mut output = String::with_capacity(64);
    for byte in digest {
        use std::fmt::Write as _;
        let _ = write!(&mut output, "{byte:02x}");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::checksum_sha256;

    #[test]
    fn checksum_is_lowercase_hex() {
        let checksum = checksum_sha256(b"demand notice");
        assert_eq!(checksum.len(), 64);
        assert!(checksum.chars().all(|ch| ch.is_ascii_hexdigit()));
        assert_eq!(checksum, checksum.to_lowercase());
    }

    #[test]
    fn checksum_differs_per_payload() {
        assert_ne!(checksum_sha256(b"a"), checksum_sha256(b"b"));
    }
}
