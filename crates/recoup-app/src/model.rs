// Copyright 2026 the recoup authors
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanType {
    #[serde(rename = "Home Loan")]
    Home,
    #[serde(rename = "Car Loan")]
    Car,
    #[serde(rename = "Personal Loan")]
    Personal,
    #[serde(rename = "Business Loan")]
    Business,
    #[serde(rename = "Education Loan")]
    Education,
}

impl LoanType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "Home Loan",
            Self::Car => "Car Loan",
            Self::Personal => "Personal Loan",
            Self::Business => "Business Loan",
            Self::Education => "Education Loan",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Home Loan" => Some(Self::Home),
            "Car Loan" => Some(Self::Car),
            "Personal Loan" => Some(Self::Personal),
            "Business Loan" => Some(Self::Business),
            "Education Loan" => Some(Self::Education),
            _ => None,
        }
    }
}

/// Recovery lifecycle tag on a loan. `Active` loans have not entered the
/// recovery pipeline and are only reachable through the All tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    #[serde(rename = "Active")]
    Active,
    #[serde(rename = "Pre Sarfaesi")]
    PreSarfaesi,
    #[serde(rename = "NPA")]
    Npa,
    #[serde(rename = "Responses")]
    Responses,
    #[serde(rename = "Symbolic Possession")]
    SymbolicPossession,
    #[serde(rename = "DM Order")]
    DmOrder,
    #[serde(rename = "Physical Possession")]
    PhysicalPossession,
    #[serde(rename = "Auctions")]
    Auctions,
}

impl LoanStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::PreSarfaesi => "Pre Sarfaesi",
            Self::Npa => "NPA",
            Self::Responses => "Responses",
            Self::SymbolicPossession => "Symbolic Possession",
            Self::DmOrder => "DM Order",
            Self::PhysicalPossession => "Physical Possession",
            Self::Auctions => "Auctions",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Active" => Some(Self::Active),
            "Pre Sarfaesi" => Some(Self::PreSarfaesi),
            "NPA" => Some(Self::Npa),
            "Responses" => Some(Self::Responses),
            "Symbolic Possession" => Some(Self::SymbolicPossession),
            "DM Order" => Some(Self::DmOrder),
            "Physical Possession" => Some(Self::PhysicalPossession),
            "Auctions" => Some(Self::Auctions),
            _ => None,
        }
    }
}

/// Status tabs shown above the portfolio table. Every tab except `All`
/// corresponds to exactly one recovery-stage [`LoanStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusTab {
    All,
    PreSarfaesi,
    Npa,
    Responses,
    SymbolicPossession,
    DmOrder,
    PhysicalPossession,
    Auctions,
}

impl StatusTab {
    pub const ALL: [Self; 8] = [
        Self::All,
        Self::PreSarfaesi,
        Self::Npa,
        Self::Responses,
        Self::SymbolicPossession,
        Self::DmOrder,
        Self::PhysicalPossession,
        Self::Auctions,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::PreSarfaesi => "Pre Sarfaesi",
            Self::Npa => "NPA",
            Self::Responses => "Responses",
            Self::SymbolicPossession => "Symbolic Possession",
            Self::DmOrder => "DM Order",
            Self::PhysicalPossession => "Physical Possession",
            Self::Auctions => "Auctions",
        }
    }

    pub const fn status(self) -> Option<LoanStatus> {
        match self {
            Self::All => None,
            Self::PreSarfaesi => Some(LoanStatus::PreSarfaesi),
            Self::Npa => Some(LoanStatus::Npa),
            Self::Responses => Some(LoanStatus::Responses),
            Self::SymbolicPossession => Some(LoanStatus::SymbolicPossession),
            Self::DmOrder => Some(LoanStatus::DmOrder),
            Self::PhysicalPossession => Some(LoanStatus::PhysicalPossession),
            Self::Auctions => Some(LoanStatus::Auctions),
        }
    }

    /// Whether a record passes this tab. `All` passes everything; any other
    /// tab requires exact status equality.
    pub fn admits(self, status: LoanStatus) -> bool {
        match self.status() {
            None => true,
            Some(tab_status) => tab_status == status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub loan_no: String,
    pub loan_type: LoanType,
    pub borrower: String,
    pub borrower_address: String,
    pub co_borrower_name: String,
    pub co_borrower_address: String,
    pub current_dpd_days: u32,
    pub sanctioned_amount: i64,
    pub region: String,
    pub status: LoanStatus,
}

impl LoanRecord {
    /// Display value for one table column.
    pub fn field(&self, key: ColumnKey) -> String {
        match key {
            ColumnKey::LoanNo => self.loan_no.clone(),
            ColumnKey::LoanType => self.loan_type.as_str().to_owned(),
            ColumnKey::Borrower => self.borrower.clone(),
            ColumnKey::BorrowerAddress => self.borrower_address.clone(),
            ColumnKey::CoBorrowerName => self.co_borrower_name.clone(),
            ColumnKey::CoBorrowerAddress => self.co_borrower_address.clone(),
            ColumnKey::CurrentDpd => self.current_dpd_days.to_string(),
            ColumnKey::SanctionAmount => format_rupees(self.sanctioned_amount),
            ColumnKey::Region => self.region.clone(),
            ColumnKey::Status => self.status.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKey {
    LoanNo,
    LoanType,
    Borrower,
    BorrowerAddress,
    CoBorrowerName,
    CoBorrowerAddress,
    CurrentDpd,
    SanctionAmount,
    Region,
    Status,
}

impl ColumnKey {
    /// Display order of the portfolio table.
    pub const ALL: [Self; 10] = [
        Self::LoanNo,
        Self::LoanType,
        Self::Borrower,
        Self::BorrowerAddress,
        Self::CoBorrowerName,
        Self::CoBorrowerAddress,
        Self::CurrentDpd,
        Self::SanctionAmount,
        Self::Region,
        Self::Status,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::LoanNo => "Loan No.",
            Self::LoanType => "Loan Type",
            Self::Borrower => "Borrower",
            Self::BorrowerAddress => "Borrower Address",
            Self::CoBorrowerName => "Co Borrower Name",
            Self::CoBorrowerAddress => "Co Borrower Address",
            Self::CurrentDpd => "Current DPD",
            Self::SanctionAmount => "Sanction Amount",
            Self::Region => "Region",
            Self::Status => "Status",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoanNo => "loan_no",
            Self::LoanType => "loan_type",
            Self::Borrower => "borrower",
            Self::BorrowerAddress => "borrower_address",
            Self::CoBorrowerName => "co_borrower_name",
            Self::CoBorrowerAddress => "co_borrower_address",
            Self::CurrentDpd => "current_dpd",
            Self::SanctionAmount => "sanction_amount",
            Self::Region => "region",
            Self::Status => "status",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == value)
    }
}

/// Sidebar sections of the original dashboard. Portfolio is the working
/// screen; several sections are intentionally placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    Dashboard,
    Portfolio,
    Notifications,
    Notices,
    Auction,
    DataUpload,
    ControlPanel,
    UserManagement,
    Permissions,
}

impl Section {
    pub const ALL: [Self; 9] = [
        Self::Dashboard,
        Self::Portfolio,
        Self::Notifications,
        Self::Notices,
        Self::Auction,
        Self::DataUpload,
        Self::ControlPanel,
        Self::UserManagement,
        Self::Permissions,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Portfolio => "portfolio",
            Self::Notifications => "notifications",
            Self::Notices => "notices",
            Self::Auction => "auction",
            Self::DataUpload => "data upload",
            Self::ControlPanel => "control panel",
            Self::UserManagement => "user management",
            Self::Permissions => "permissions",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.label() == value)
    }

    /// Placeholder sections render a stub page and have no behavior.
    pub const fn is_placeholder(self) -> bool {
        matches!(
            self,
            Self::Auction | Self::ControlPanel | Self::UserManagement | Self::Permissions
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Success,
    Urgent,
    Warning,
    Info,
    Notice,
}

impl NotificationKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Urgent => "urgent",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Notice => "notice",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub detail: String,
    pub age: String,
    pub kind: NotificationKind,
}

/// Portfolio overview numbers derived from the full record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PortfolioOverview {
    pub total_loans: usize,
    pub npa_loans: usize,
    pub sanctioned_total: i64,
    pub highest_dpd_days: u32,
}

impl PortfolioOverview {
    pub fn from_records(records: &[LoanRecord]) -> Self {
        Self {
            total_loans: records.len(),
            npa_loans: records
                .iter()
                .filter(|record| record.status == LoanStatus::Npa)
                .count(),
            sanctioned_total: records.iter().map(|record| record.sanctioned_amount).sum(),
            highest_dpd_days: records
                .iter()
                .map(|record| record.current_dpd_days)
                .max()
                .unwrap_or(0),
        }
    }
}

/// Formats a sanctioned amount with the rupee prefix and thousands
/// separators, e.g. `₹ 1,934,068`.
pub fn format_rupees(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("₹ -{grouped}")
    } else {
        format!("₹ {grouped}")
    }
}
