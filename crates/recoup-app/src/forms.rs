// Copyright 2026 the recoup authors
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};

/// Document name choices offered by the upload form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentName {
    Notice,
    Agreement,
    Statement,
    IdProof,
}

impl DocumentName {
    pub const ALL: [Self; 4] = [Self::Notice, Self::Agreement, Self::Statement, Self::IdProof];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Notice => "Notice",
            Self::Agreement => "Agreement",
            Self::Statement => "Statement",
            Self::IdProof => "ID Proof",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.as_str() == value)
    }
}

/// Document type choices offered by the upload form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    LoanAgreement,
    MortgageDeed,
    BankStatement,
    LegalNotice,
}

impl DocumentType {
    pub const ALL: [Self; 4] = [
        Self::LoanAgreement,
        Self::MortgageDeed,
        Self::BankStatement,
        Self::LegalNotice,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoanAgreement => "Loan Agreement",
            Self::MortgageDeed => "Mortgage Deed",
            Self::BankStatement => "Bank Statement",
            Self::LegalNotice => "Legal Notice",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

/// A file picked into the form, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Everything the upload form captures. Built up field by field in the UI and
/// validated once on submit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentUploadInput {
    pub document_name: Option<DocumentName>,
    pub document_type: Option<DocumentType>,
    pub remarks: String,
    pub file: Option<FileAttachment>,
}

impl DocumentUploadInput {
    pub fn blank() -> Self {
        Self::default()
    }

    /// Checks required fields before the input is handed to a sink.
    pub fn validate(&self) -> Result<()> {
        if self.document_name.is_none() {
            bail!("document name is required -- pick one and retry");
        }
        if self.document_type.is_none() {
            bail!("document type is required -- pick one and retry");
        }
        if let Some(file) = &self.file {
            if file.file_name.trim().is_empty() {
                bail!("attached file has no name -- pick the file again");
            }
            if file.data.is_empty() {
                bail!("attached file {:?} is empty -- pick a non-empty file", file.file_name);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DocumentName, DocumentType, DocumentUploadInput, FileAttachment};

    fn filled_input() -> DocumentUploadInput {
        DocumentUploadInput {
            document_name: Some(DocumentName::Notice),
            document_type: Some(DocumentType::LegalNotice),
            remarks: "demand notice for L28U3247".to_owned(),
            file: Some(FileAttachment {
                file_name: "notice.pdf".to_owned(),
                data: b"%PDF-1.4".to_vec(),
            }),
        }
    }

    #[test]
    fn blank_input_is_empty() {
        let input = DocumentUploadInput::blank();
        assert!(input.document_name.is_none());
        assert!(input.document_type.is_none());
        assert!(input.remarks.is_empty());
        assert!(input.file.is_none());
    }

    #[test]
    fn filled_input_validates() {
        assert!(filled_input().validate().is_ok());
    }

    #[test]
    fn missing_document_name_rejected() {
        let mut input = filled_input();
        input.document_name = None;
        let error = input.validate().unwrap_err();
        assert!(error.to_string().contains("document name"));
    }

    #[test]
    fn missing_document_type_rejected() {
        let mut input = filled_input();
        input.document_type = None;
        let error = input.validate().unwrap_err();
        assert!(error.to_string().contains("document type"));
    }

    #[test]
    fn file_is_optional() {
        let mut input = filled_input();
        input.file = None;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn empty_attachment_rejected() {
        let mut input = filled_input();
        input.file = Some(FileAttachment {
            file_name: "notice.pdf".to_owned(),
            data: Vec::new(),
        });
        assert!(input.validate().is_err());
    }

    #[test]
    fn labels_round_trip() {
        for name in DocumentName::ALL {
            assert_eq!(DocumentName::parse(name.as_str()), Some(name));
        }
        for kind in DocumentType::ALL {
            assert_eq!(DocumentType::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(DocumentName::parse("ID Proof"), Some(DocumentName::IdProof));
        assert_eq!(DocumentName::parse("id proof"), None);
    }
}
