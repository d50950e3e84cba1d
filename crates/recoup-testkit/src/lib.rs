// Copyright 2026 the recoup authors
// Licensed under the Apache License, Version 2.0

//! Sample builders shared by tests across the workspace.

use recoup_app::{
    DocumentName, DocumentType, DocumentUploadInput, FileAttachment, LoanRecord, LoanStatus,
    LoanType,
};

const REGIONS: [&str; 4] = ["North", "South", "East", "West"];
const BORROWERS: [&str; 6] = [
    "Vedika Sarkar",
    "Hrithika Agrawal",
    "Priyansh Soman",
    "Rajat Malhotra",
    "Anika Patel",
    "Karan Singh",
];

/// A loan record with plausible values; `index` varies the fields so callers
/// get distinct records without repeating themselves.
pub fn sample_loan(index: usize) -> LoanRecord {
    let types = [
        LoanType::Home,
        LoanType::Car,
        LoanType::Personal,
        LoanType::Business,
        LoanType::Education,
    ];
    LoanRecord {
        loan_no: format!("L{:02}T{:04}", 28 + index % 7, 3200 + index),
        loan_type: types[index % types.len()],
        borrower: BORROWERS[index % BORROWERS.len()].to_owned(),
        borrower_address: format!("{} Test Marg, Pune-4110{:02}", 10 + index, index % 100),
        co_borrower_name: String::new(),
        co_borrower_address: String::new(),
        current_dpd_days: (30 + index * 7) as u32,
        sanctioned_amount: 500_000 + (index as i64) * 125_000,
        region: REGIONS[index % REGIONS.len()].to_owned(),
        status: LoanStatus::Active,
    }
}

pub fn sample_loan_with_status(index: usize, status: LoanStatus) -> LoanRecord {
    LoanRecord {
        status,
        ..sample_loan(index)
    }
}

pub fn sample_loans(count: usize) -> Vec<LoanRecord> {
    (0..count).map(sample_loan).collect()
}

/// A complete upload input that passes validation.
pub fn sample_upload_input() -> DocumentUploadInput {
    DocumentUploadInput {
        document_name: Some(DocumentName::Notice),
        document_type: Some(DocumentType::LegalNotice),
        remarks: "demand notice, first issue".to_owned(),
        file: Some(FileAttachment {
            file_name: "notice.pdf".to_owned(),
            data: b"%PDF-1.4 sample".to_vec(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{sample_loan, sample_loans, sample_upload_input};
    use std::collections::BTreeSet;

    #[test]
    fn sample_loans_have_unique_numbers() {
        let loans = sample_loans(12);
        let numbers: BTreeSet<&str> = loans.iter().map(|loan| loan.loan_no.as_str()).collect();
        assert_eq!(numbers.len(), loans.len());
    }

    #[test]
    fn sample_loan_is_deterministic() {
        assert_eq!(sample_loan(3), sample_loan(3));
    }

    #[test]
    fn sample_upload_input_validates() {
        assert!(sample_upload_input().validate().is_ok());
    }
}
