// Copyright 2026 the recoup authors
// Licensed under the Apache License, Version 2.0

pub mod sink;

pub use sink::*;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use recoup_app::{LoanRecord, LoanStatus, LoanType, Notification, NotificationKind};

pub const APP_NAME: &str = "recoup";

/// Where loan records come from. The store is read once at startup and stays
/// immutable for the session.
pub trait RecordSource {
    fn list_loans(&self) -> Result<Vec<LoanRecord>>;
}

/// Rejects stores the rest of the app cannot represent: duplicate loan
/// numbers or negative sanctioned amounts.
pub fn validate_records(records: &[LoanRecord]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for record in records {
        if !seen.insert(record.loan_no.as_str()) {
            bail!(
                "duplicate loan number {:?} -- loan numbers must be unique across the store",
                record.loan_no
            );
        }
        if record.sanctioned_amount < 0 {
            bail!(
                "loan {:?} has a negative sanctioned amount ({})",
                record.loan_no,
                record.sanctioned_amount
            );
        }
    }
    Ok(())
}

/// The built-in portfolio used when no records file is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedSource;

impl RecordSource for SeedSource {
    fn list_loans(&self) -> Result<Vec<LoanRecord>> {
        let records = seed_loans();
        validate_records(&records)?;
        Ok(records)
    }
}

fn loan(
    loan_no: &str,
    loan_type: LoanType,
    borrower: &str,
    borrower_address: &str,
    co_borrower_name: &str,
    co_borrower_address: &str,
    current_dpd_days: u32,
    sanctioned_amount: i64,
    region: &str,
    status: LoanStatus,
) -> LoanRecord {
    LoanRecord {
        loan_no: loan_no.to_owned(),
        loan_type,
        borrower: borrower.to_owned(),
        borrower_address: borrower_address.to_owned(),
        co_borrower_name: co_borrower_name.to_owned(),
        co_borrower_address: co_borrower_address.to_owned(),
        current_dpd_days,
        sanctioned_amount,
        region: region.to_owned(),
        status,
    }
}

pub fn seed_loans() -> Vec<LoanRecord> {
    vec![
        loan(
            "L28U3247",
            LoanType::Home,
            "Vedika Sarkar",
            "83 Yogi Ganj, Kadapa-068720",
            "Divit Vora",
            "24/543, Acharya Path Dingde-052360",
            91,
            1_934_068,
            "West",
            LoanStatus::Active,
        ),
        loan(
            "L28U3243",
            LoanType::Car,
            "Hrithika Agrawal",
            "88/522, Dev Path, Berhampore 841186",
            "Malika Tak",
            "58 Tela Road, Sultan Pur Majra 919878",
            100,
            1_842_143,
            "North",
            LoanStatus::Active,
        ),
        loan(
            "L28U3250",
            LoanType::Car,
            "Priyansh Soman",
            "H.No. 152 Andra Street Amritsar-431752",
            "Zaina Dara",
            "H-No. 42, Srivastava Marg, Junagadh-191124",
            100,
            4_537_889,
            "East",
            LoanStatus::Active,
        ),
        loan(
            "L29P4521",
            LoanType::Business,
            "Rajat Malhotra",
            "45 Gandhi Road, Mumbai-400001",
            "Anjali Malhotra",
            "45 Gandhi Road, Mumbai-400001",
            75,
            3_250_000,
            "West",
            LoanStatus::Npa,
        ),
        loan(
            "L31K6789",
            LoanType::Home,
            "Suresh Kumar",
            "23/A Lake View, Chennai-600028",
            "Priya Kumar",
            "23/A Lake View, Chennai-600028",
            120,
            4_200_000,
            "South",
            LoanStatus::PhysicalPossession,
        ),
        loan(
            "L30R5678",
            LoanType::Education,
            "Anika Patel",
            "67 University Road, Ahmedabad-380015",
            "Nikhil Patel",
            "67 University Road, Ahmedabad-380015",
            45,
            850_000,
            "West",
            LoanStatus::Active,
        ),
        loan(
            "L32M9012",
            LoanType::Car,
            "Karan Singh",
            "12 Model Town, Delhi-110009",
            "Simran Kaur",
            "12 Model Town, Delhi-110009",
            60,
            1_200_000,
            "North",
            LoanStatus::SymbolicPossession,
        ),
        loan(
            "L33N4567",
            LoanType::Personal,
            "Vikram Mehta",
            "34 MG Road, Bangalore-560001",
            "",
            "",
            30,
            500_000,
            "South",
            LoanStatus::PreSarfaesi,
        ),
    ]
}

/// Reads a JSON array of loan records from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for FileSource {
    fn list_loans(&self) -> Result<Vec<LoanRecord>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("read records file {}", self.path.display()))?;
        let records: Vec<LoanRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("parse records file {}", self.path.display()))?;
        validate_records(&records)
            .with_context(|| format!("validate records file {}", self.path.display()))?;
        Ok(records)
    }
}

fn notification(title: &str, detail: &str, age: &str, kind: NotificationKind) -> Notification {
    Notification {
        title: title.to_owned(),
        detail: detail.to_owned(),
        age: age.to_owned(),
        kind,
    }
}

/// The fixed notification feed shown on the notifications screen.
pub fn seed_notifications() -> Vec<Notification> {
    vec![
        notification(
            "Loan Approval",
            "Loan L28U3247 has been approved and disbursed",
            "2 hours ago",
            NotificationKind::Success,
        ),
        notification(
            "Document Required",
            "KYC documents pending for loan L28U3243",
            "5 hours ago",
            NotificationKind::Urgent,
        ),
        notification(
            "Payment Due Reminder",
            "EMI payment due in 3 days for loan L28U3250",
            "1 day ago",
            NotificationKind::Warning,
        ),
        notification(
            "System Update",
            "Portfolio dashboard updated with new filters",
            "2 days ago",
            NotificationKind::Info,
        ),
        notification(
            "New Notice Generated",
            "Demand notice generated for loan L29P4521",
            "3 days ago",
            NotificationKind::Notice,
        ),
        notification(
            "Account Status Update",
            "Loan L31K6789 moved to physical possession",
            "4 days ago",
            NotificationKind::Success,
        ),
        notification(
            "Missing Information",
            "Co-borrower address missing for loan L33N4567",
            "1 week ago",
            NotificationKind::Urgent,
        ),
        notification(
            "Auction Scheduled",
            "Property auction scheduled for loan L31K6789",
            "1 week ago",
            NotificationKind::Warning,
        ),
        notification(
            "Policy Update",
            "Recovery policy guidelines have been revised",
            "2 weeks ago",
            NotificationKind::Info,
        ),
        notification(
            "Loan Status Change",
            "Loan L32M9012 moved to symbolic possession",
            "1 month ago",
            NotificationKind::Notice,
        ),
        notification(
            "Recovery Update",
            "Partial recovery recorded for loan L29P4521",
            "2 months ago",
            NotificationKind::Success,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{RecordSource, SeedSource, seed_loans, seed_notifications, validate_records};
    use recoup_app::{LoanStatus, StatusTab};
    use recoup_testkit::sample_loans;

    #[test]
    fn seed_loans_pass_validation() {
        let loans = SeedSource.list_loans().expect("seed loans load");
        assert_eq!(loans.len(), 8);
    }

    #[test]
    fn seed_contains_the_active_reference_loan() {
        let loans = seed_loans();
        let reference = loans
            .iter()
            .find(|loan| loan.loan_no == "L28U3247")
            .expect("reference loan present");
        assert_eq!(reference.status, LoanStatus::Active);
        assert!(StatusTab::All.admits(reference.status));
        assert!(!StatusTab::Npa.admits(reference.status));
    }

    #[test]
    fn seed_covers_multiple_recovery_stages() {
        let loans = seed_loans();
        assert!(loans.iter().any(|loan| loan.status == LoanStatus::Npa));
        assert!(
            loans
                .iter()
                .any(|loan| loan.status == LoanStatus::PreSarfaesi)
        );
        assert!(
            loans
                .iter()
                .any(|loan| loan.status == LoanStatus::PhysicalPossession)
        );
    }

    #[test]
    fn duplicate_loan_numbers_rejected() {
        let mut loans = sample_loans(2);
        loans[1].loan_no = loans[0].loan_no.clone();
        assert!(validate_records(&loans).is_err());
    }

    #[test]
    fn negative_amount_rejected() {
        let mut loans = sample_loans(1);
        loans[0].sanctioned_amount = -1;
        let error = validate_records(&loans).unwrap_err();
        assert!(error.to_string().contains("negative"));
    }

    #[test]
    fn notification_feed_is_fixed() {
        let feed = seed_notifications();
        assert_eq!(feed.len(), 11);
        assert_eq!(feed[0].title, "Loan Approval");
    }
}
