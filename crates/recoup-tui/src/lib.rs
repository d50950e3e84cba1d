// Copyright 2026 the recoup authors
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use recoup_app::{
    AppCommand, AppMode, AppState, ColumnKey, DocumentName, DocumentType, DocumentUploadInput,
    FileAttachment, LoanRecord, Notification, PortfolioCommand, PortfolioOverview, PortfolioState,
    Section, StatusTab, TriState, format_rupees,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use std::io;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

/// Everything the view needs from the outside world. The default
/// `spawn_document_upload` runs the sink inline and reports over the channel;
/// production runtimes override it with a worker thread.
pub trait PortfolioRuntime {
    fn load_loans(&mut self) -> Result<Vec<LoanRecord>>;
    fn load_notifications(&mut self) -> Result<Vec<Notification>>;
    fn store_document(&mut self, input: &DocumentUploadInput) -> Result<()>;
    fn read_attachment(&mut self, path: &Path) -> Result<FileAttachment>;

    fn spawn_document_upload(
        &mut self,
        request_id: u64,
        input: &DocumentUploadInput,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let result = match self.store_document(input) {
            Ok(()) => Ok(()),
            Err(error) => Err(format!("{error:#}")),
        };
        tx.send(InternalEvent::UploadFinished { request_id, result })
            .map_err(|_| anyhow::anyhow!("upload event channel closed"))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    UploadFinished { request_id: u64, result: Result<(), String> },
}

/// Upload form fields in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadField {
    DocumentName,
    DocumentType,
    Remarks,
    FilePath,
}

impl UploadField {
    const ALL: [Self; 4] = [
        Self::DocumentName,
        Self::DocumentType,
        Self::Remarks,
        Self::FilePath,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::DocumentName => "document name",
            Self::DocumentType => "document type",
            Self::Remarks => "remarks",
            Self::FilePath => "file",
        }
    }
}

/// Upload form state. Inputs survive failures and form close/reopen; only a
/// successful upload resets them.
#[derive(Debug, Clone, PartialEq)]
struct UploadUiState {
    input: DocumentUploadInput,
    file_path: String,
    field: UploadField,
    in_flight: Option<u64>,
    next_request_id: u64,
}

impl Default for UploadUiState {
    fn default() -> Self {
        Self {
            input: DocumentUploadInput::blank(),
            file_path: String::new(),
            field: UploadField::DocumentName,
            in_flight: None,
            next_request_id: 1,
        }
    }
}

impl UploadUiState {
    fn reset(&mut self) {
        self.input = DocumentUploadInput::blank();
        self.file_path.clear();
        self.field = UploadField::DocumentName;
    }

    fn move_field(&mut self, delta: isize) {
        let fields = UploadField::ALL;
        let current = fields
            .iter()
            .position(|field| *field == self.field)
            .unwrap_or(0) as isize;
        let len = fields.len() as isize;
        self.field = fields[((current + delta).rem_euclid(len)) as usize];
    }

    fn cycle_choice(&mut self, delta: isize) {
        match self.field {
            UploadField::DocumentName => {
                self.input.document_name =
                    Some(cycle_option(self.input.document_name, &DocumentName::ALL, delta));
            }
            UploadField::DocumentType => {
                self.input.document_type =
                    Some(cycle_option(self.input.document_type, &DocumentType::ALL, delta));
            }
            UploadField::Remarks | UploadField::FilePath => {}
        }
    }
}

fn cycle_option<T: Copy + PartialEq>(current: Option<T>, options: &[T], delta: isize) -> T {
    let len = options.len() as isize;
    match current {
        None => {
            if delta >= 0 {
                options[0]
            } else {
                options[options.len() - 1]
            }
        }
        Some(value) => {
            let index = options.iter().position(|opt| *opt == value).unwrap_or(0) as isize;
            options[((index + delta).rem_euclid(len)) as usize]
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ViewData {
    portfolio: PortfolioState,
    notifications: Vec<Notification>,
    cursor_row: usize,
    column_cursor: usize,
    upload: UploadUiState,
    help_visible: bool,
    status_token: u64,
}

impl ViewData {
    fn load<R: PortfolioRuntime>(runtime: &mut R) -> Result<Self> {
        let loans = runtime.load_loans().context("load loan records")?;
        let portfolio = PortfolioState::new(loans).context("build portfolio state")?;
        let notifications = runtime
            .load_notifications()
            .context("load notifications")?;
        Ok(Self {
            portfolio,
            notifications,
            cursor_row: 0,
            column_cursor: 0,
            upload: UploadUiState::default(),
            help_visible: false,
            status_token: 0,
        })
    }

    fn clamp_cursor(&mut self) {
        let len = self.portfolio.filtered_len();
        if len == 0 {
            self.cursor_row = 0;
        } else if self.cursor_row >= len {
            self.cursor_row = len - 1;
        }
    }

    fn cursor_loan_no(&self) -> Option<String> {
        self.portfolio
            .filtered_records()
            .get(self.cursor_row)
            .map(|record| record.loan_no.clone())
    }
}

pub fn run_app<R: PortfolioRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    let mut view_data = ViewData::load(runtime)?;

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let (internal_tx, internal_rx) = mpsc::channel();

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_tx, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::UploadFinished { request_id, result } => {
                handle_upload_finished(state, view_data, tx, request_id, result);
            }
        }
    }
}

fn handle_upload_finished(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    request_id: u64,
    result: Result<(), String>,
) {
    if view_data.upload.in_flight != Some(request_id) {
        return;
    }
    view_data.upload.in_flight = None;

    match result {
        Ok(()) => {
            view_data.upload.reset();
            if state.mode == AppMode::UploadForm {
                state.dispatch(AppCommand::ExitToNav);
            }
            emit_status(state, view_data, tx, "document stored");
        }
        Err(error) => {
            // Inputs are kept so the user can correct and resubmit.
            emit_status(state, view_data, tx, format!("upload failed: {error}"));
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: PortfolioRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        view_data.help_visible = false;
        return false;
    }

    match state.mode {
        AppMode::Nav => handle_nav_key(state, view_data, internal_tx, key),
        AppMode::Search => handle_search_key(state, view_data, key),
        AppMode::ColumnPicker => handle_column_picker_key(state, view_data, key),
        AppMode::UploadForm => handle_upload_form_key(state, runtime, view_data, internal_tx, key),
    }
    false
}

fn handle_nav_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('?') => view_data.help_visible = true,
        KeyCode::Tab => {
            state.dispatch(AppCommand::NextSection);
        }
        KeyCode::BackTab => {
            state.dispatch(AppCommand::PrevSection);
        }
        KeyCode::Char('u') if upload_reachable(state.active_section) => {
            state.dispatch(AppCommand::OpenUploadForm);
        }
        _ if state.active_section == Section::Portfolio => {
            handle_portfolio_key(state, view_data, internal_tx, key);
        }
        _ => {}
    }
}

const fn upload_reachable(section: Section) -> bool {
    matches!(section, Section::Portfolio | Section::DataUpload)
}

fn handle_portfolio_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('l') | KeyCode::Right => {
            view_data.portfolio.dispatch(PortfolioCommand::NextTab);
            view_data.clamp_cursor();
        }
        KeyCode::Char('h') | KeyCode::Left => {
            view_data.portfolio.dispatch(PortfolioCommand::PrevTab);
            view_data.clamp_cursor();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let len = view_data.portfolio.filtered_len();
            if len > 0 && view_data.cursor_row + 1 < len {
                view_data.cursor_row += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.cursor_row = view_data.cursor_row.saturating_sub(1);
        }
        KeyCode::Char(' ') => {
            if let Some(loan_no) = view_data.cursor_loan_no() {
                view_data
                    .portfolio
                    .dispatch(PortfolioCommand::ToggleLoan(loan_no));
            }
        }
        KeyCode::Char('a') => {
            view_data.portfolio.dispatch(PortfolioCommand::ToggleSelectAll);
            let selected = view_data.portfolio.selection.len();
            let message = if selected == 0 {
                "selection cleared".to_owned()
            } else {
                format!("{selected} loans selected")
            };
            emit_status(state, view_data, internal_tx, message);
        }
        KeyCode::Char('x') => {
            view_data.portfolio.dispatch(PortfolioCommand::ClearSelection);
            emit_status(state, view_data, internal_tx, "selection cleared");
        }
        KeyCode::Char('/') => {
            state.dispatch(AppCommand::EnterSearch);
        }
        KeyCode::Char('c') => {
            view_data.column_cursor = 0;
            state.dispatch(AppCommand::OpenColumnPicker);
        }
        KeyCode::Char('n') => {
            request_bulk_action(state, view_data, internal_tx, "notice generation");
        }
        KeyCode::Char('N') => {
            request_bulk_action(state, view_data, internal_tx, "npa declaration");
        }
        _ => {}
    }
}

/// Notice generation and NPA declaration are forwarded to an external
/// actuator; here they only need the non-empty-selection gate and a receipt.
fn request_bulk_action(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    action: &str,
) {
    if !view_data.portfolio.can_act() {
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("{action} needs a selection -- select at least one loan"),
        );
        return;
    }
    let count = view_data.portfolio.selection.len();
    emit_status(
        state,
        view_data,
        internal_tx,
        format!("{action} queued for {count} loans"),
    );
}

fn handle_search_key(state: &mut AppState, view_data: &mut ViewData, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            state.dispatch(AppCommand::ExitToNav);
        }
        KeyCode::Backspace => {
            let mut text = view_data.portfolio.filter.search_text.clone();
            text.pop();
            view_data
                .portfolio
                .dispatch(PortfolioCommand::SetSearchText(text));
            view_data.clamp_cursor();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            view_data
                .portfolio
                .dispatch(PortfolioCommand::SetSearchText(String::new()));
            view_data.clamp_cursor();
        }
        KeyCode::Char(ch) => {
            let mut text = view_data.portfolio.filter.search_text.clone();
            text.push(ch);
            view_data
                .portfolio
                .dispatch(PortfolioCommand::SetSearchText(text));
            view_data.clamp_cursor();
        }
        _ => {}
    }
}

fn handle_column_picker_key(state: &mut AppState, view_data: &mut ViewData, key: KeyEvent) {
    let columns = view_data.portfolio.columns.len();
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            state.dispatch(AppCommand::ExitToNav);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if columns > 0 && view_data.column_cursor + 1 < columns {
                view_data.column_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.column_cursor = view_data.column_cursor.saturating_sub(1);
        }
        KeyCode::Char(' ') => {
            if let Some(descriptor) = view_data
                .portfolio
                .columns
                .descriptors()
                .get(view_data.column_cursor)
            {
                let key = descriptor.key;
                view_data
                    .portfolio
                    .dispatch(PortfolioCommand::ToggleColumn(key));
            }
        }
        KeyCode::Char('a') => {
            let show_all = view_data.portfolio.columns.summary() != TriState::Checked;
            view_data
                .portfolio
                .dispatch(PortfolioCommand::SetAllColumns(show_all));
        }
        _ => {}
    }
}

fn handle_upload_form_key<R: PortfolioRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    if view_data.upload.in_flight.is_some() {
        // The form is frozen while an upload is in flight; only closing the
        // overlay is allowed.
        if key.code == KeyCode::Esc {
            state.dispatch(AppCommand::ExitToNav);
        }
        return;
    }

    match key.code {
        KeyCode::Esc => {
            state.dispatch(AppCommand::ExitToNav);
        }
        KeyCode::Tab | KeyCode::Down => view_data.upload.move_field(1),
        KeyCode::BackTab | KeyCode::Up => view_data.upload.move_field(-1),
        KeyCode::Left => view_data.upload.cycle_choice(-1),
        KeyCode::Right => view_data.upload.cycle_choice(1),
        KeyCode::Enter => submit_upload(state, runtime, view_data, internal_tx),
        KeyCode::Backspace => match view_data.upload.field {
            UploadField::Remarks => {
                view_data.upload.input.remarks.pop();
            }
            UploadField::FilePath => {
                view_data.upload.file_path.pop();
            }
            UploadField::DocumentName | UploadField::DocumentType => {}
        },
        KeyCode::Char(ch) => match view_data.upload.field {
            UploadField::Remarks => view_data.upload.input.remarks.push(ch),
            UploadField::FilePath => view_data.upload.file_path.push(ch),
            UploadField::DocumentName | UploadField::DocumentType => {}
        },
        _ => {}
    }
}

fn submit_upload<R: PortfolioRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    if view_data.upload.file_path.trim().is_empty() {
        view_data.upload.input.file = None;
    } else {
        let path = view_data.upload.file_path.trim().to_owned();
        match runtime.read_attachment(Path::new(&path)) {
            Ok(attachment) => view_data.upload.input.file = Some(attachment),
            Err(error) => {
                emit_status(state, view_data, internal_tx, format!("upload failed: {error:#}"));
                return;
            }
        }
    }

    if let Err(error) = view_data.upload.input.validate() {
        emit_status(state, view_data, internal_tx, format!("upload failed: {error}"));
        return;
    }

    let request_id = view_data.upload.next_request_id;
    view_data.upload.next_request_id += 1;
    view_data.upload.in_flight = Some(request_id);

    let input = view_data.upload.input.clone();
    if let Err(error) = runtime.spawn_document_upload(request_id, &input, internal_tx.clone()) {
        view_data.upload.in_flight = None;
        emit_status(state, view_data, internal_tx, format!("upload failed: {error:#}"));
        return;
    }
    emit_status(state, view_data, internal_tx, "uploading document");
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let selected = Section::ALL
        .iter()
        .position(|section| *section == state.active_section)
        .unwrap_or(0);
    let section_titles = Section::ALL
        .iter()
        .map(|section| section.label().to_owned())
        .collect::<Vec<String>>();
    let sections = Tabs::new(section_titles)
        .block(Block::default().title("recoup").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(sections, layout[0]);

    match state.active_section {
        Section::Portfolio => render_portfolio(frame, layout[1], state, view_data),
        Section::Dashboard => {
            let body = Paragraph::new(render_dashboard_text(view_data))
                .block(Block::default().borders(Borders::ALL).title("dashboard"));
            frame.render_widget(body, layout[1]);
        }
        Section::Notifications => {
            let body = Paragraph::new(render_notifications_text(&view_data.notifications))
                .block(Block::default().borders(Borders::ALL).title("notifications"));
            frame.render_widget(body, layout[1]);
        }
        Section::Notices => {
            let body = Paragraph::new(render_notices_text())
                .block(Block::default().borders(Borders::ALL).title("notices"));
            frame.render_widget(body, layout[1]);
        }
        Section::DataUpload => {
            let body = Paragraph::new(render_data_upload_text())
                .block(Block::default().borders(Borders::ALL).title("data upload"));
            frame.render_widget(body, layout[1]);
        }
        section => {
            let body = Paragraph::new(render_blank_text(section))
                .block(Block::default().borders(Borders::ALL).title(section.label()));
            frame.render_widget(body, layout[1]);
        }
    }

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if state.mode == AppMode::ColumnPicker {
        let area = centered_rect(50, 62, frame.area());
        frame.render_widget(Clear, area);
        let picker = Paragraph::new(render_column_picker_text(view_data))
            .block(Block::default().title("columns").borders(Borders::ALL));
        frame.render_widget(picker, area);
    }

    if state.mode == AppMode::UploadForm {
        let area = centered_rect(62, 52, frame.area());
        frame.render_widget(Clear, area);
        let form = Paragraph::new(render_upload_form_text(&view_data.upload)).block(
            Block::default()
                .title("upload document")
                .borders(Borders::ALL),
        );
        frame.render_widget(form, area);
    }

    if view_data.help_visible {
        let area = centered_rect(80, 72, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_portfolio(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let counts = view_data.portfolio.tab_counts();
    let selected = StatusTab::ALL
        .iter()
        .position(|tab| *tab == view_data.portfolio.filter.active_tab)
        .unwrap_or(0);
    let tab_titles = counts
        .iter()
        .map(|(tab, count)| tab_title(*tab, *count))
        .collect::<Vec<String>>();
    let tabs = Tabs::new(tab_titles)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    render_loan_table(frame, layout[1], state, view_data);
}

fn render_loan_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let visible = view_data.portfolio.columns.visible_columns();
    let filtered = view_data.portfolio.filtered_records();

    let mut header_cells = vec![Cell::from(
        tri_state_mark(view_data.portfolio.selection.summary(filtered.len())).to_owned(),
    )];
    header_cells.extend(
        visible
            .iter()
            .map(|key| Cell::from(key.label().to_owned())),
    );
    let header = Row::new(header_cells).style(Style::default().add_modifier(Modifier::BOLD));

    let rows = filtered.iter().enumerate().map(|(index, record)| {
        let mark = if view_data.portfolio.selection.contains(&record.loan_no) {
            "[x]"
        } else {
            "[ ]"
        };
        let mut cells = vec![Cell::from(mark.to_owned())];
        cells.extend(visible.iter().map(|key| Cell::from(record.field(*key))));
        let row = Row::new(cells);
        if index == view_data.cursor_row {
            row.style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            row
        }
    });

    let mut widths = vec![Constraint::Length(3)];
    widths.extend(visible.iter().map(|key| column_width(*key)));

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(table_title(state, view_data)),
    );
    frame.render_widget(table, area);
}

const fn column_width(key: ColumnKey) -> Constraint {
    match key {
        ColumnKey::LoanNo => Constraint::Length(10),
        ColumnKey::LoanType => Constraint::Length(14),
        ColumnKey::Borrower | ColumnKey::CoBorrowerName => Constraint::Length(18),
        ColumnKey::BorrowerAddress | ColumnKey::CoBorrowerAddress => Constraint::Min(24),
        ColumnKey::CurrentDpd => Constraint::Length(11),
        ColumnKey::SanctionAmount => Constraint::Length(15),
        ColumnKey::Region => Constraint::Length(8),
        ColumnKey::Status => Constraint::Length(19),
    }
}

fn tab_title(tab: StatusTab, count: usize) -> String {
    format!("{} ({count})", tab.label())
}

fn table_title(state: &AppState, view_data: &ViewData) -> String {
    let filtered = view_data.portfolio.filtered_len();
    let total = view_data.portfolio.records().len();
    let selected = view_data.portfolio.selection.len();
    let search = &view_data.portfolio.filter.search_text;

    let mut title = format!("loans {filtered}/{total}");
    if selected > 0 {
        title.push_str(&format!(" ({selected} selected)"));
    }
    if state.mode == AppMode::Search {
        title.push_str(&format!(" search: {search}_"));
    } else if !search.is_empty() {
        title.push_str(&format!(" search: {search}"));
    }
    title
}

const fn tri_state_mark(tri: TriState) -> &'static str {
    match tri {
        TriState::Checked => "[x]",
        TriState::Indeterminate => "[~]",
        TriState::Unchecked => "[ ]",
    }
}

fn render_column_picker_text(view_data: &ViewData) -> String {
    let mut lines = vec![
        format!(
            "{} all columns",
            tri_state_mark(view_data.portfolio.columns.summary())
        ),
        String::new(),
    ];
    for (index, descriptor) in view_data.portfolio.columns.descriptors().iter().enumerate() {
        let cursor = if index == view_data.column_cursor {
            '>'
        } else {
            ' '
        };
        let mark = if descriptor.visible { "[x]" } else { "[ ]" };
        lines.push(format!("{cursor} {mark} {}", descriptor.key.label()));
    }
    lines.push(String::new());
    lines.push("space toggle, a all/none, esc close".to_owned());
    lines.join("\n")
}

fn render_upload_form_text(upload: &UploadUiState) -> String {
    let mut lines = Vec::new();
    for field in UploadField::ALL {
        let cursor = if field == upload.field { '>' } else { ' ' };
        let value = match field {
            UploadField::DocumentName => upload
                .input
                .document_name
                .map(|name| name.as_str().to_owned())
                .unwrap_or_else(|| "(left/right to pick)".to_owned()),
            UploadField::DocumentType => upload
                .input
                .document_type
                .map(|kind| kind.as_str().to_owned())
                .unwrap_or_else(|| "(left/right to pick)".to_owned()),
            UploadField::Remarks => upload.input.remarks.clone(),
            UploadField::FilePath => upload.file_path.clone(),
        };
        lines.push(format!("{cursor} {}: {value}", field.label()));
    }
    lines.push(String::new());
    if upload.in_flight.is_some() {
        lines.push("uploading...".to_owned());
    } else {
        lines.push("enter submit, esc close".to_owned());
    }
    lines.join("\n")
}

fn render_dashboard_text(view_data: &ViewData) -> String {
    let overview = PortfolioOverview::from_records(view_data.portfolio.records());
    [
        format!("total loans: {}", overview.total_loans),
        format!("npa loans: {}", overview.npa_loans),
        format!(
            "sanctioned total: {}",
            format_rupees(overview.sanctioned_total)
        ),
        format!("highest dpd: {} days", overview.highest_dpd_days),
    ]
    .join("\n")
}

fn render_notifications_text(notifications: &[Notification]) -> String {
    if notifications.is_empty() {
        return "no notifications".to_owned();
    }
    notifications
        .iter()
        .map(|notification| {
            format!(
                "[{}] {} ({})\n    {}",
                notification.kind.label(),
                notification.title,
                notification.age,
                notification.detail
            )
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn render_notices_text() -> String {
    [
        "Generated notices are dispatched by the recovery back office.",
        "Select loans on the portfolio screen and press n to queue",
        "demand notices for them.",
    ]
    .join("\n")
}

fn render_data_upload_text() -> String {
    "press u to upload a document".to_owned()
}

fn render_blank_text(section: Section) -> String {
    format!("{} is not available yet", section.label())
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if let Some(status) = &state.status_line {
        return status.clone();
    }
    match state.mode {
        AppMode::Search => "search: type to filter, enter/esc done".to_owned(),
        AppMode::ColumnPicker => "columns: j/k move, space toggle".to_owned(),
        AppMode::UploadForm => {
            if view_data.upload.in_flight.is_some() {
                "uploading...".to_owned()
            } else {
                "upload: tab fields, enter submit".to_owned()
            }
        }
        AppMode::Nav => "tab section, / search, c columns, u upload, ? help, ctrl-q quit".to_owned(),
    }
}

fn help_overlay_text() -> String {
    [
        "navigation",
        "  tab / shift-tab   switch section",
        "  h l / arrows      switch status tab",
        "  j k / arrows      move row cursor",
        "",
        "portfolio",
        "  space             select/deselect loan",
        "  a                 select all filtered / clear",
        "  x                 clear selection",
        "  /                 search loan numbers",
        "  c                 column picker",
        "  n                 queue notice generation",
        "  N                 queue npa declaration",
        "  u                 upload document",
        "",
        "global",
        "  ?                 this help",
        "  ctrl-q            quit",
    ]
    .join("\n")
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
