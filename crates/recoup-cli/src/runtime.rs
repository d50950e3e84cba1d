// Copyright 2026 the recoup authors
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use recoup_app::{DocumentUploadInput, FileAttachment, LoanRecord, Notification};
use recoup_data::{DocumentSink, SpoolSink};
use recoup_tui::{InternalEvent, PortfolioRuntime};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

/// Production runtime: records loaded once at startup, uploads spooled to
/// disk on a worker thread.
pub struct SourceRuntime {
    loans: Vec<LoanRecord>,
    notifications: Vec<Notification>,
    sink: Arc<SpoolSink>,
    max_attachment_size: i64,
}

impl SourceRuntime {
    pub fn new(
        loans: Vec<LoanRecord>,
        notifications: Vec<Notification>,
        sink: SpoolSink,
        max_attachment_size: i64,
    ) -> Self {
        Self {
            loans,
            notifications,
            sink: Arc::new(sink),
            max_attachment_size,
        }
    }
}

impl PortfolioRuntime for SourceRuntime {
    fn load_loans(&mut self) -> Result<Vec<LoanRecord>> {
        Ok(self.loans.clone())
    }

    fn load_notifications(&mut self) -> Result<Vec<Notification>> {
        Ok(self.notifications.clone())
    }

    fn store_document(&mut self, input: &DocumentUploadInput) -> Result<()> {
        self.sink.store(input)?;
        Ok(())
    }

    fn read_attachment(&mut self, path: &Path) -> Result<FileAttachment> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("stat attachment {}", path.display()))?;
        if !metadata.is_file() {
            bail!("{} is not a regular file", path.display());
        }
        let size = i64::try_from(metadata.len()).context("attachment size overflow")?;
        if size > self.max_attachment_size {
            bail!(
                "attachment is {} bytes but max allowed is {}; shrink the file and retry",
                size,
                self.max_attachment_size
            );
        }

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("cannot derive a file name from {}", path.display()))?
            .to_owned();
        let data =
            fs::read(path).with_context(|| format!("read attachment {}", path.display()))?;
        Ok(FileAttachment { file_name, data })
    }

    fn spawn_document_upload(
        &mut self,
        request_id: u64,
        input: &DocumentUploadInput,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let sink = Arc::clone(&self.sink);
        let input = input.clone();
        thread::spawn(move || {
            let result = match sink.store(&input) {
                Ok(_) => Ok(()),
                Err(error) => Err(format!("{error:#}")),
            };
            let _ = tx.send(InternalEvent::UploadFinished { request_id, result });
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SourceRuntime;
    use anyhow::Result;
    use recoup_data::{MAX_DOCUMENT_SIZE, SpoolSink, seed_notifications};
    use recoup_testkit::{sample_loans, sample_upload_input};
    use recoup_tui::{InternalEvent, PortfolioRuntime};
    use std::sync::mpsc;
    use std::time::Duration;

    fn runtime(spool: &std::path::Path) -> SourceRuntime {
        SourceRuntime::new(
            sample_loans(4),
            seed_notifications(),
            SpoolSink::new(spool, MAX_DOCUMENT_SIZE),
            MAX_DOCUMENT_SIZE,
        )
    }

    #[test]
    fn loads_the_configured_records() -> Result<()> {
        let spool = tempfile::tempdir()?;
        let mut runtime = runtime(spool.path());
        assert_eq!(runtime.load_loans()?.len(), 4);
        assert_eq!(runtime.load_notifications()?.len(), 11);
        Ok(())
    }

    #[test]
    fn read_attachment_returns_name_and_bytes() -> Result<()> {
        let spool = tempfile::tempdir()?;
        let files = tempfile::tempdir()?;
        let path = files.path().join("notice.pdf");
        std::fs::write(&path, b"%PDF-1.4")?;

        let mut runtime = runtime(spool.path());
        let attachment = runtime.read_attachment(&path)?;
        assert_eq!(attachment.file_name, "notice.pdf");
        assert_eq!(attachment.data, b"%PDF-1.4");
        Ok(())
    }

    #[test]
    fn read_attachment_enforces_size_limit() -> Result<()> {
        let spool = tempfile::tempdir()?;
        let files = tempfile::tempdir()?;
        let path = files.path().join("big.bin");
        std::fs::write(&path, vec![0u8; 32])?;

        let mut runtime = SourceRuntime::new(
            sample_loans(1),
            Vec::new(),
            SpoolSink::new(spool.path(), MAX_DOCUMENT_SIZE),
            16,
        );
        let error = runtime.read_attachment(&path).unwrap_err();
        assert!(error.to_string().contains("max allowed is 16"));
        Ok(())
    }

    #[test]
    fn read_attachment_reports_missing_file() -> Result<()> {
        let spool = tempfile::tempdir()?;
        let mut runtime = runtime(spool.path());
        let error = runtime
            .read_attachment(std::path::Path::new("/definitely/not/here.pdf"))
            .unwrap_err();
        assert!(format!("{error:#}").contains("stat attachment"));
        Ok(())
    }

    #[test]
    fn spawned_upload_reports_over_channel() -> Result<()> {
        let spool = tempfile::tempdir()?;
        let mut runtime = runtime(spool.path());
        let (tx, rx) = mpsc::channel();

        runtime.spawn_document_upload(42, &sample_upload_input(), tx)?;
        let event = rx.recv_timeout(Duration::from_secs(5))?;
        assert_eq!(
            event,
            InternalEvent::UploadFinished {
                request_id: 42,
                result: Ok(()),
            }
        );
        assert!(std::fs::read_dir(spool.path())?.count() > 0);
        Ok(())
    }
}
