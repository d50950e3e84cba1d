// Copyright 2026 the recoup authors
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

use anyhow::{Result, bail};

use crate::{ColumnKey, LoanRecord, Section, StatusTab};

/// Tri-state of a "select all" style header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
    Checked,
    Indeterminate,
    Unchecked,
}

/// Free-text search plus active status tab. Pure data; [`FilterState::matches`]
/// is the whole filter predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub active_tab: StatusTab,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            active_tab: StatusTab::All,
        }
    }
}

impl FilterState {
    /// True iff the record should be displayed: case-folded substring match of
    /// the search text against the loan number, AND the tab admits the status.
    pub fn matches(&self, record: &LoanRecord) -> bool {
        let text_match = self.search_text.is_empty()
            || record
                .loan_no
                .to_lowercase()
                .contains(&self.search_text.to_lowercase());
        text_match && self.active_tab.admits(record.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub key: ColumnKey,
    pub visible: bool,
}

/// Ordered column descriptors; order is display order. Keys are unique by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnModel {
    columns: Vec<ColumnDescriptor>,
}

impl Default for ColumnModel {
    fn default() -> Self {
        Self {
            columns: ColumnKey::ALL
                .into_iter()
                .map(|key| ColumnDescriptor { key, visible: true })
                .collect(),
        }
    }
}

impl ColumnModel {
    pub fn with_keys(keys: &[ColumnKey]) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for key in keys {
            if !seen.insert(key.as_str()) {
                bail!("duplicate column key {:?}", key.as_str());
            }
        }
        Ok(Self {
            columns: keys
                .iter()
                .map(|key| ColumnDescriptor {
                    key: *key,
                    visible: true,
                })
                .collect(),
        })
    }

    pub fn descriptors(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Flips visibility of the matching column; no-op if the key is absent.
    pub fn toggle(&mut self, key: ColumnKey) {
        if let Some(column) = self.columns.iter_mut().find(|column| column.key == key) {
            column.visible = !column.visible;
        }
    }

    pub fn set_all(&mut self, visible: bool) {
        for column in &mut self.columns {
            column.visible = visible;
        }
    }

    /// Ordered sub-sequence of visible column keys.
    pub fn visible_columns(&self) -> Vec<ColumnKey> {
        self.columns
            .iter()
            .filter(|column| column.visible)
            .map(|column| column.key)
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.columns.iter().filter(|column| column.visible).count()
    }

    /// Header checkbox state for the column picker.
    pub fn summary(&self) -> TriState {
        let visible = self.visible_count();
        if visible == 0 {
            TriState::Unchecked
        } else if visible == self.columns.len() {
            TriState::Checked
        } else {
            TriState::Indeterminate
        }
    }
}

/// Checked loan numbers. Membership is always a subset of the currently
/// filtered rows; [`PortfolioState`] prunes it whenever the filter changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSet {
    selected: BTreeSet<String>,
}

impl SelectionSet {
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, loan_no: &str) -> bool {
        self.selected.contains(loan_no)
    }

    pub fn loan_numbers(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    /// Adds if absent, removes if present.
    pub fn toggle(&mut self, loan_no: &str) {
        if !self.selected.remove(loan_no) {
            self.selected.insert(loan_no.to_owned());
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Sets the selection to exactly the given loan numbers.
    pub fn select_exactly<'a, I>(&mut self, loan_numbers: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.selected = loan_numbers.into_iter().map(str::to_owned).collect();
    }

    /// Drops members that are no longer in the visible set; returns how many
    /// were removed.
    pub fn retain_visible(&mut self, visible: &BTreeSet<&str>) -> usize {
        let before = self.selected.len();
        self.selected.retain(|loan_no| visible.contains(loan_no.as_str()));
        before - self.selected.len()
    }

    /// Header checkbox state against the filtered row count.
    pub fn summary(&self, filtered_len: usize) -> TriState {
        if self.selected.is_empty() {
            TriState::Unchecked
        } else if self.selected.len() == filtered_len {
            TriState::Checked
        } else {
            TriState::Indeterminate
        }
    }
}

/// Per-tab row counts computed from the FULL store. Counts are sensitive to
/// status only, never to the active search text.
pub fn tab_counts(records: &[LoanRecord]) -> Vec<(StatusTab, usize)> {
    StatusTab::ALL
        .into_iter()
        .map(|tab| {
            let count = records
                .iter()
                .filter(|record| tab.admits(record.status))
                .count();
            (tab, count)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortfolioCommand {
    SetSearchText(String),
    SelectTab(StatusTab),
    NextTab,
    PrevTab,
    ToggleColumn(ColumnKey),
    SetAllColumns(bool),
    ToggleLoan(String),
    ToggleSelectAll,
    ClearSelection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortfolioEvent {
    SearchChanged(String),
    TabChanged(StatusTab),
    ColumnsChanged,
    SelectionChanged(usize),
    SelectionPruned(usize),
}

/// All portfolio-screen state for one view session. Records are immutable for
/// the lifetime of the session; everything else transitions through
/// [`PortfolioState::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioState {
    records: Vec<LoanRecord>,
    pub filter: FilterState,
    pub columns: ColumnModel,
    pub selection: SelectionSet,
}

impl PortfolioState {
    pub fn new(records: Vec<LoanRecord>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for record in &records {
            if !seen.insert(record.loan_no.as_str()) {
                bail!("duplicate loan number {:?} in record store", record.loan_no);
            }
        }
        Ok(Self {
            records,
            filter: FilterState::default(),
            columns: ColumnModel::default(),
            selection: SelectionSet::default(),
        })
    }

    pub fn records(&self) -> &[LoanRecord] {
        &self.records
    }

    /// Ordered sub-sequence of the store passing the current filter.
    pub fn filtered_records(&self) -> Vec<&LoanRecord> {
        self.records
            .iter()
            .filter(|record| self.filter.matches(record))
            .collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.records
            .iter()
            .filter(|record| self.filter.matches(record))
            .count()
    }

    pub fn tab_counts(&self) -> Vec<(StatusTab, usize)> {
        tab_counts(&self.records)
    }

    /// Notice generation / NPA declaration are available only with a
    /// non-empty selection.
    pub fn can_act(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn dispatch(&mut self, command: PortfolioCommand) -> Vec<PortfolioEvent> {
        match command {
            PortfolioCommand::SetSearchText(text) => {
                self.filter.search_text = text;
                let mut events = vec![PortfolioEvent::SearchChanged(
                    self.filter.search_text.clone(),
                )];
                events.extend(self.prune_selection());
                events
            }
            PortfolioCommand::SelectTab(tab) => {
                self.filter.active_tab = tab;
                let mut events = vec![PortfolioEvent::TabChanged(tab)];
                events.extend(self.prune_selection());
                events
            }
            PortfolioCommand::NextTab => self.rotate_tab(1),
            PortfolioCommand::PrevTab => self.rotate_tab(-1),
            PortfolioCommand::ToggleColumn(key) => {
                self.columns.toggle(key);
                vec![PortfolioEvent::ColumnsChanged]
            }
            PortfolioCommand::SetAllColumns(visible) => {
                self.columns.set_all(visible);
                vec![PortfolioEvent::ColumnsChanged]
            }
            PortfolioCommand::ToggleLoan(loan_no) => {
                self.selection.toggle(&loan_no);
                vec![PortfolioEvent::SelectionChanged(self.selection.len())]
            }
            PortfolioCommand::ToggleSelectAll => {
                let filtered: Vec<String> = self
                    .filtered_records()
                    .iter()
                    .map(|record| record.loan_no.clone())
                    .collect();
                if self.selection.len() == filtered.len() {
                    self.selection.clear();
                } else {
                    self.selection
                        .select_exactly(filtered.iter().map(String::as_str));
                }
                vec![PortfolioEvent::SelectionChanged(self.selection.len())]
            }
            PortfolioCommand::ClearSelection => {
                self.selection.clear();
                vec![PortfolioEvent::SelectionChanged(0)]
            }
        }
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<PortfolioEvent> {
        let tabs = StatusTab::ALL;
        let current = tabs
            .iter()
            .position(|tab| *tab == self.filter.active_tab)
            .unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.filter.active_tab = tabs[next];
        let mut events = vec![PortfolioEvent::TabChanged(self.filter.active_tab)];
        events.extend(self.prune_selection());
        events
    }

    fn prune_selection(&mut self) -> Option<PortfolioEvent> {
        let visible: BTreeSet<&str> = self
            .records
            .iter()
            .filter(|record| self.filter.matches(record))
            .map(|record| record.loan_no.as_str())
            .collect();
        let removed = self.selection.retain_visible(&visible);
        (removed > 0).then_some(PortfolioEvent::SelectionPruned(removed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Nav,
    Search,
    ColumnPicker,
    UploadForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub active_section: Section,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Nav,
            active_section: Section::Portfolio,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextSection,
    PrevSection,
    SelectSection(Section),
    EnterSearch,
    OpenColumnPicker,
    OpenUploadForm,
    ExitToNav,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    SectionChanged(Section),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextSection => self.rotate_section(1),
            AppCommand::PrevSection => self.rotate_section(-1),
            AppCommand::SelectSection(section) => {
                self.active_section = section;
                vec![AppEvent::SectionChanged(section)]
            }
            AppCommand::EnterSearch => {
                self.mode = AppMode::Search;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::OpenColumnPicker => {
                self.mode = AppMode::ColumnPicker;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::OpenUploadForm => {
                self.mode = AppMode::UploadForm;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitToNav => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::SetStatus(message) => {
                self.status_line = Some(message.clone());
                vec![AppEvent::StatusUpdated(message)]
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_section(&mut self, delta: isize) -> Vec<AppEvent> {
        let sections = Section::ALL;
        let current = sections
            .iter()
            .position(|section| *section == self.active_section)
            .unwrap_or(0) as isize;
        let len = sections.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_section = sections[next];
        vec![AppEvent::SectionChanged(self.active_section)]
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AppCommand, AppMode, AppState, ColumnModel, FilterState, PortfolioCommand, PortfolioEvent,
        PortfolioState, SelectionSet, TriState, tab_counts,
    };
    use crate::{ColumnKey, LoanRecord, LoanStatus, LoanType, Section, StatusTab};

    fn loan(loan_no: &str, status: LoanStatus) -> LoanRecord {
        LoanRecord {
            loan_no: loan_no.to_owned(),
            loan_type: LoanType::Home,
            borrower: "Vedika Sarkar".to_owned(),
            borrower_address: "83 Yogi Ganj, Kadapa-068720".to_owned(),
            co_borrower_name: String::new(),
            co_borrower_address: String::new(),
            current_dpd_days: 91,
            sanctioned_amount: 1_934_068,
            region: "West".to_owned(),
            status,
        }
    }

    fn sample_state() -> PortfolioState {
        PortfolioState::new(vec![
            loan("L28U3247", LoanStatus::Active),
            loan("L29P4521", LoanStatus::Npa),
            loan("L31K6789", LoanStatus::PhysicalPossession),
            loan("L28U3243", LoanStatus::Active),
        ])
        .expect("unique loan numbers")
    }

    #[test]
    fn empty_filter_returns_full_store_in_order() {
        let state = sample_state();
        let filtered = state.filtered_records();
        assert_eq!(filtered.len(), state.records().len());
        let order: Vec<&str> = filtered.iter().map(|r| r.loan_no.as_str()).collect();
        assert_eq!(order, ["L28U3247", "L29P4521", "L31K6789", "L28U3243"]);
    }

    #[test]
    fn search_matches_loan_number_case_insensitively() {
        let mut state = sample_state();
        state.dispatch(PortfolioCommand::SetSearchText("l28u".to_owned()));
        let filtered = state.filtered_records();
        assert_eq!(filtered.len(), 2);
        for record in &filtered {
            assert!(record.loan_no.to_lowercase().contains("l28u"));
        }
        for record in state.records() {
            if !filtered.iter().any(|f| f.loan_no == record.loan_no) {
                assert!(!record.loan_no.to_lowercase().contains("l28u"));
            }
        }
    }

    #[test]
    fn tab_filter_excludes_other_statuses() {
        let mut state = sample_state();
        state.dispatch(PortfolioCommand::SelectTab(StatusTab::Npa));
        let filtered = state.filtered_records();
        assert!(!filtered.iter().any(|r| r.loan_no == "L28U3247"));
        assert_eq!(filtered.len(), 1);

        state.dispatch(PortfolioCommand::SelectTab(StatusTab::All));
        assert!(
            state
                .filtered_records()
                .iter()
                .any(|r| r.loan_no == "L28U3247")
        );
    }

    #[test]
    fn tab_counts_ignore_search_text() {
        let mut state = sample_state();
        let before = state.tab_counts();
        state.dispatch(PortfolioCommand::SetSearchText("zzz-no-match".to_owned()));
        assert_eq!(state.filtered_len(), 0);
        assert_eq!(state.tab_counts(), before);
        assert_eq!(before[0], (StatusTab::All, 4));
        assert_eq!(before[2], (StatusTab::Npa, 1));
    }

    #[test]
    fn filter_predicate_is_pure() {
        let filter = FilterState {
            search_text: "3247".to_owned(),
            active_tab: StatusTab::All,
        };
        let record = loan("L28U3247", LoanStatus::Active);
        assert!(filter.matches(&record));
        assert!(filter.matches(&record));
    }

    #[test]
    fn duplicate_loan_numbers_rejected() {
        let result = PortfolioState::new(vec![
            loan("L28U3247", LoanStatus::Active),
            loan("L28U3247", LoanStatus::Npa),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn column_set_all_round_trips() {
        let mut columns = ColumnModel::default();
        columns.set_all(true);
        assert_eq!(columns.visible_columns(), ColumnKey::ALL.to_vec());
        assert_eq!(columns.summary(), TriState::Checked);

        columns.set_all(false);
        assert!(columns.visible_columns().is_empty());
        assert_eq!(columns.summary(), TriState::Unchecked);
    }

    #[test]
    fn column_toggle_twice_restores_original() {
        let mut columns = ColumnModel::default();
        let original = columns.clone();
        columns.toggle(ColumnKey::Region);
        assert_eq!(columns.summary(), TriState::Indeterminate);
        assert!(!columns.visible_columns().contains(&ColumnKey::Region));
        columns.toggle(ColumnKey::Region);
        assert_eq!(columns, original);
    }

    #[test]
    fn duplicate_column_keys_rejected() {
        let result = ColumnModel::with_keys(&[ColumnKey::Region, ColumnKey::Region]);
        assert!(result.is_err());
    }

    #[test]
    fn select_all_toggle_is_exact_and_clears_on_repeat() {
        let mut state = sample_state();
        state.dispatch(PortfolioCommand::SetSearchText("L28U".to_owned()));
        assert_eq!(state.filtered_len(), 2);

        state.dispatch(PortfolioCommand::ToggleSelectAll);
        assert_eq!(
            state.selection.loan_numbers(),
            vec!["L28U3243".to_owned(), "L28U3247".to_owned()]
        );
        assert_eq!(state.selection.summary(state.filtered_len()), TriState::Checked);

        state.dispatch(PortfolioCommand::ToggleSelectAll);
        assert!(state.selection.is_empty());
        assert_eq!(
            state.selection.summary(state.filtered_len()),
            TriState::Unchecked
        );
    }

    #[test]
    fn partial_selection_is_indeterminate() {
        let mut state = sample_state();
        state.dispatch(PortfolioCommand::ToggleLoan("L29P4521".to_owned()));
        assert_eq!(
            state.selection.summary(state.filtered_len()),
            TriState::Indeterminate
        );
        assert!(state.can_act());
    }

    #[test]
    fn selection_pruned_when_filter_hides_rows() {
        let mut state = sample_state();
        state.dispatch(PortfolioCommand::ToggleLoan("L28U3247".to_owned()));
        state.dispatch(PortfolioCommand::ToggleLoan("L29P4521".to_owned()));

        let events = state.dispatch(PortfolioCommand::SelectTab(StatusTab::Npa));
        assert!(events.contains(&PortfolioEvent::SelectionPruned(1)));
        assert_eq!(state.selection.loan_numbers(), vec!["L29P4521".to_owned()]);
    }

    #[test]
    fn toggle_loan_adds_then_removes() {
        let mut selection = SelectionSet::default();
        selection.toggle("L28U3247");
        assert!(selection.contains("L28U3247"));
        selection.toggle("L28U3247");
        assert!(selection.is_empty());
    }

    #[test]
    fn tab_counts_cover_every_tab() {
        let state = sample_state();
        let counts = tab_counts(state.records());
        assert_eq!(counts.len(), StatusTab::ALL.len());
        assert_eq!(counts[0].1, 4);
    }

    #[test]
    fn section_rotation_wraps() {
        let mut state = AppState {
            active_section: Section::Permissions,
            ..AppState::default()
        };
        state.dispatch(AppCommand::NextSection);
        assert_eq!(state.active_section, Section::Dashboard);
    }

    #[test]
    fn mode_transitions() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::EnterSearch);
        assert_eq!(state.mode, AppMode::Search);
        state.dispatch(AppCommand::OpenUploadForm);
        assert_eq!(state.mode, AppMode::UploadForm);
        state.dispatch(AppCommand::ExitToNav);
        assert_eq!(state.mode, AppMode::Nav);
    }
}
