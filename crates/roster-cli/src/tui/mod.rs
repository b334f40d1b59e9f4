//! Interactive table browser for Roster.
//!
//! A presentation-only consumer of the core session: it renders whatever
//! page the query engine produces and turns keystrokes into intents. It
//! holds no business logic of its own.
//!
//! ## Keys
//!
//! - `Tab` switch dataset, `↑`/`↓` move the row cursor
//! - `←`/`→` move the column cursor, `s` sort by that column (again to flip)
//! - `Space` select row, `a` select/clear all visible, `d` delete selected
//! - `x` delete the row under the cursor, `Enter` show record details
//! - `n`/`p` next/previous page, `+`/`-` cycle page size
//! - `/` add a `field=value` filter, `u` remove the last filter, `r` reset
//! - `Esc` quit

use crate::app::App;
use crate::commands::parse_filter;
use crate::Dataset;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use roster_core::{Config, Intent, Record, RecordId, Session, SortDirection};
use std::io;
use std::time::Duration;

/// Columns shown per dataset: display label plus the field key used for
/// sorting and filtering.
const EMPLOYEE_COLUMNS: &[(&str, &str)] = &[
    ("Employee ID", "employee_id"),
    ("Name", "name"),
    ("Core Team", "core_team"),
    ("Manager", "manager"),
    ("Contact", "contact_number"),
    ("Status", "status"),
    ("Role Type", "role_type"),
];

const HIRING_COLUMNS: &[(&str, &str)] = &[
    ("Candidate", "candidate_name"),
    ("Team", "team"),
    ("Experience", "experience_level"),
    ("Status", "status"),
    ("Vendor", "vendor"),
    ("Hiring Manager", "hiring_manager"),
];

/// Input interpretation state.
enum Mode {
    /// Normal navigation
    Browse,
    /// Typing a `field=value` filter
    Filter,
    /// Waiting for y/N on a delete
    Confirm(PendingDelete),
}

enum PendingDelete {
    Row(RecordId),
    Selected(usize),
}

/// One page of one dataset, projected to strings for drawing.
struct TableSnapshot {
    headers: Vec<String>,
    select_mark: &'static str,
    rows: Vec<RowSnapshot>,
    page: usize,
    total_pages: usize,
    total_count: usize,
    selected_count: usize,
    filters: Vec<String>,
}

struct RowSnapshot {
    id: RecordId,
    marked: bool,
    cells: Vec<String>,
}

/// TUI application state.
struct TuiApp {
    /// The main application
    app: App,

    /// Dataset currently shown
    tab: Dataset,

    /// Input mode
    mode: Mode,

    /// Filter input buffer (Filter mode)
    filter_input: String,

    /// Row cursor within the visible page
    cursor: usize,

    /// Column cursor for sorting
    col: usize,

    /// Status message
    status_message: Option<String>,

    /// Whether we should quit
    should_quit: bool,
}

impl TuiApp {
    fn new(app: App) -> Self {
        TuiApp {
            app,
            tab: Dataset::Employee,
            mode: Mode::Browse,
            filter_input: String::new(),
            cursor: 0,
            col: 0,
            status_message: None,
            should_quit: false,
        }
    }

    fn columns(&self) -> &'static [(&'static str, &'static str)] {
        match self.tab {
            Dataset::Employee => EMPLOYEE_COLUMNS,
            Dataset::Hiring => HIRING_COLUMNS,
        }
    }

    /// Project the current page of the current dataset.
    fn snapshot(&self) -> TableSnapshot {
        match self.tab {
            Dataset::Employee => snapshot(&self.app.employees, EMPLOYEE_COLUMNS),
            Dataset::Hiring => snapshot(&self.app.hiring, HIRING_COLUMNS),
        }
    }

    /// Route an intent to the visible dataset's session. Recoverable
    /// errors (e.g. a stale id) become status messages, never faults.
    fn apply(&mut self, intent: Intent) {
        let result = match self.tab {
            Dataset::Employee => self.app.employees.apply(intent),
            Dataset::Hiring => self.app.hiring.apply(intent),
        };
        if let Err(err) = result {
            self.status_message = Some(err.to_string());
        }
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let len = self.snapshot().rows.len();
        self.cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
    }

    fn row_under_cursor(&self) -> Option<RecordId> {
        self.snapshot().rows.get(self.cursor).map(|r| r.id)
    }

    fn switch_tab(&mut self) {
        self.tab = match self.tab {
            Dataset::Employee => Dataset::Hiring,
            Dataset::Hiring => Dataset::Employee,
        };
        self.cursor = 0;
        self.col = 0;
        self.status_message = None;
    }

    fn sort_by_column(&mut self) {
        let field = self.columns()[self.col].1.to_string();
        self.apply(Intent::SortBy(field));
    }

    fn toggle_row(&mut self) {
        if let Some(id) = self.row_under_cursor() {
            self.apply(Intent::ToggleRow(id));
        }
    }

    fn toggle_all_visible(&mut self) {
        let all_selected = self.snapshot().select_mark == "[x]";
        self.apply(Intent::ToggleAll(!all_selected));
    }

    fn request_delete_selected(&mut self) {
        let count = self.snapshot().selected_count;
        if count == 0 {
            self.status_message = Some("Nothing selected".to_string());
        } else {
            self.mode = Mode::Confirm(PendingDelete::Selected(count));
        }
    }

    fn request_delete_row(&mut self) {
        if let Some(id) = self.row_under_cursor() {
            self.mode = Mode::Confirm(PendingDelete::Row(id));
        }
    }

    fn confirm_delete(&mut self, confirmed: bool) {
        let pending = std::mem::replace(&mut self.mode, Mode::Browse);
        if !confirmed {
            self.status_message = Some("Cancelled".to_string());
            return;
        }
        match pending {
            Mode::Confirm(PendingDelete::Row(id)) => {
                self.apply(Intent::DeleteRow(id));
                self.status_message.get_or_insert("Record deleted".to_string());
            }
            Mode::Confirm(PendingDelete::Selected(count)) => {
                self.apply(Intent::DeleteSelected);
                self.status_message
                    .get_or_insert(format!("Deleted {} records", count));
            }
            _ => {}
        }
    }

    fn cycle_page_size(&mut self, up: bool) {
        let options = self.app.config.ui.page_size_options.clone();
        if options.is_empty() {
            return;
        }
        let current = match self.tab {
            Dataset::Employee => self.app.employees.query().page_size,
            Dataset::Hiring => self.app.hiring.query().page_size,
        };
        let next = match (options.iter().position(|&n| n == current), up) {
            (Some(i), true) => options[(i + 1) % options.len()],
            (Some(i), false) => options[(i + options.len() - 1) % options.len()],
            (None, _) => options[0],
        };
        self.apply(Intent::SetPageSize(next));
        self.status_message = Some(format!("Page size {}", next));
    }

    fn apply_filter_input(&mut self) {
        let input = std::mem::take(&mut self.filter_input);
        self.mode = Mode::Browse;

        let parsed = match self.tab {
            Dataset::Employee => parse_filter::<roster_core::Employee>(&input),
            Dataset::Hiring => parse_filter::<roster_core::HiringRequisition>(&input),
        };
        match parsed {
            Ok((field, value)) => {
                self.apply(Intent::AddFilter { field, value });
                self.cursor = 0;
            }
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }

    fn remove_last_filter(&mut self) {
        let last = match self.tab {
            Dataset::Employee => self.app.employees.query().filters.last().cloned(),
            Dataset::Hiring => self.app.hiring.query().filters.last().cloned(),
        };
        if let Some(filter) = last {
            self.apply(Intent::RemoveFilter(filter.field));
        }
    }

    /// Details of the record under the cursor, for the status line.
    fn detail_under_cursor(&self) -> Option<String> {
        let id = self.row_under_cursor()?;
        match self.tab {
            Dataset::Employee => self.app.employees.store().get(id).map(|s| {
                format!(
                    "{} {} — updated {} by {}",
                    s.record.employee_id,
                    s.record.name,
                    s.audit.updated_at.format("%Y-%m-%d %H:%M"),
                    s.audit.updated_by
                )
            }),
            Dataset::Hiring => self.app.hiring.store().get(id).map(|s| {
                format!(
                    "{} / {} — updated {} by {}",
                    s.record.candidate_name,
                    s.record.team,
                    s.audit.updated_at.format("%Y-%m-%d %H:%M"),
                    s.audit.updated_by
                )
            }),
        }
    }

    fn on_key_browse(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.switch_tab(),
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => {
                self.cursor += 1;
                self.clamp_cursor();
            }
            KeyCode::Left => self.col = self.col.saturating_sub(1),
            KeyCode::Right => self.col = (self.col + 1).min(self.columns().len() - 1),
            KeyCode::Char('s') => self.sort_by_column(),
            KeyCode::Char(' ') => self.toggle_row(),
            KeyCode::Char('a') => self.toggle_all_visible(),
            KeyCode::Char('d') => self.request_delete_selected(),
            KeyCode::Char('x') => self.request_delete_row(),
            KeyCode::Char('n') | KeyCode::PageDown => self.apply(Intent::NextPage),
            KeyCode::Char('p') | KeyCode::PageUp => self.apply(Intent::PrevPage),
            KeyCode::Char('+') => self.cycle_page_size(true),
            KeyCode::Char('-') => self.cycle_page_size(false),
            KeyCode::Char('/') => {
                self.mode = Mode::Filter;
                self.status_message = None;
            }
            KeyCode::Char('u') => self.remove_last_filter(),
            KeyCode::Char('r') => {
                self.apply(Intent::Reset);
                self.status_message = Some("Filters and sort cleared".to_string());
            }
            KeyCode::Enter => self.status_message = self.detail_under_cursor(),
            _ => {}
        }
    }

    fn on_key_filter(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.filter_input.clear();
                self.mode = Mode::Browse;
            }
            KeyCode::Enter => self.apply_filter_input(),
            KeyCode::Backspace => {
                self.filter_input.pop();
            }
            KeyCode::Char(c) => self.filter_input.push(c),
            _ => {}
        }
    }

    fn on_key(&mut self, code: KeyCode) {
        match self.mode {
            Mode::Browse => self.on_key_browse(code),
            Mode::Filter => self.on_key_filter(code),
            Mode::Confirm(_) => {
                self.confirm_delete(matches!(code, KeyCode::Char('y') | KeyCode::Char('Y')))
            }
        }
    }
}

/// Project one session's current page for drawing.
fn snapshot<R: Record + Clone>(
    session: &Session<R>,
    columns: &[(&str, &str)],
) -> TableSnapshot {
    let page = session.page();
    let selection = session.selection();
    let visible: Vec<RecordId> = page.records.iter().map(|s| s.id()).collect();

    let select_mark = if selection.is_all_selected(&visible) {
        "[x]"
    } else if selection.is_partially_selected(&visible) {
        "[-]"
    } else {
        "[ ]"
    };

    let sort = session.query().sort.clone();
    let headers = columns
        .iter()
        .map(|(label, key)| match &sort {
            Some(s) if s.field == *key => {
                let arrow = match s.direction {
                    SortDirection::Ascending => "▲",
                    SortDirection::Descending => "▼",
                };
                format!("{} {}", label, arrow)
            }
            _ => label.to_string(),
        })
        .collect();

    let rows = page
        .records
        .iter()
        .map(|stored| RowSnapshot {
            id: stored.id(),
            marked: selection.is_selected(stored.id()),
            cells: columns
                .iter()
                .map(|(_, key)| cell_text(&stored.record, key))
                .collect(),
        })
        .collect();

    let filters = session
        .query()
        .filters
        .iter()
        .map(|f| format!("{} - {}", f.field, f.value))
        .collect();

    TableSnapshot {
        headers,
        select_mark,
        rows,
        page: page.page,
        total_pages: page.total_pages,
        total_count: page.total_count,
        selected_count: selection.len(),
        filters,
    }
}

fn cell_text<R: Record>(record: &R, key: &str) -> String {
    let text = record
        .field(key)
        .map(|v| v.as_text().into_owned())
        .unwrap_or_default();
    if key == "contact_number" {
        format_phone(&text)
    } else {
        text
    }
}

/// Display a 10-digit contact number as `(xxx) xxx-xxxx`; anything else
/// passes through untouched.
fn format_phone(number: &str) -> String {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..10])
    } else {
        number.to_string()
    }
}

/// Run the TUI application.
pub fn run(config: Config) -> anyhow::Result<()> {
    let app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut tui_app = TuiApp::new(app);

    // Main loop
    let result = run_loop(&mut terminal, &mut tui_app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Main event loop.
fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut TuiApp) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        app.should_quit = true;
                    } else {
                        app.on_key(key.code);
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

mod ui {
    use super::*;

    /// Draw the UI.
    pub fn draw(f: &mut Frame, app: &mut TuiApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Tabs / filter input
                Constraint::Min(5),    // Table
                Constraint::Length(2), // Status bar
            ])
            .split(f.area());

        let snap = app.snapshot();

        match app.mode {
            Mode::Filter => draw_filter_input(f, app, chunks[0]),
            _ => draw_header(f, app, &snap, chunks[0]),
        }
        draw_table(f, app, &snap, chunks[1]);
        draw_status_bar(f, app, &snap, chunks[2]);
    }

    /// Draw the dataset tabs and active filters.
    fn draw_header(f: &mut Frame, app: &TuiApp, snap: &TableSnapshot, area: Rect) {
        let tabs = match app.tab {
            Dataset::Employee => "[Employees] Hiring",
            Dataset::Hiring => "Employees [Hiring]",
        };
        let filters = if snap.filters.is_empty() {
            "no filters".to_string()
        } else {
            snap.filters.join("  ")
        };

        let header = Paragraph::new(format!("{}   {}", tabs, filters))
            .block(Block::default().borders(Borders::ALL).title(" Roster "));
        f.render_widget(header, area);
    }

    /// Draw the filter input box.
    fn draw_filter_input(f: &mut Frame, app: &TuiApp, area: Rect) {
        let input = Paragraph::new(app.filter_input.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Filter (field=value, Enter to apply, Esc to cancel) "),
            );
        f.render_widget(input, area);

        f.set_cursor_position(Position::new(
            area.x + app.filter_input.len() as u16 + 1,
            area.y + 1,
        ));
    }

    /// Draw the record table.
    fn draw_table(f: &mut Frame, app: &TuiApp, snap: &TableSnapshot, area: Rect) {
        let mut header_cells = vec![Cell::from(snap.select_mark)];
        for (i, label) in snap.headers.iter().enumerate() {
            let style = if i == app.col {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            header_cells.push(Cell::from(label.clone()).style(style));
        }
        let header = Row::new(header_cells).height(1);

        let rows: Vec<Row> = snap
            .rows
            .iter()
            .map(|row| {
                let mark = if row.marked { "[x]" } else { "[ ]" };
                let mut cells = vec![Cell::from(mark)];
                cells.extend(row.cells.iter().map(|c| Cell::from(c.clone())));
                Row::new(cells).height(1)
            })
            .collect();

        let mut widths = vec![Constraint::Length(3)];
        widths.extend(std::iter::repeat(Constraint::Fill(1)).take(snap.headers.len()));

        let title = format!(
            " {} — Page {} of {} ({} records) ",
            match app.tab {
                Dataset::Employee => "Employees",
                Dataset::Hiring => "Hiring",
            },
            snap.page,
            snap.total_pages,
            snap.total_count
        );

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );

        let mut state = TableState::default();
        state.select((!snap.rows.is_empty()).then_some(app.cursor));
        f.render_stateful_widget(table, area, &mut state);
    }

    /// Draw the status bar.
    fn draw_status_bar(f: &mut Frame, app: &TuiApp, snap: &TableSnapshot, area: Rect) {
        let status = match &app.mode {
            Mode::Confirm(PendingDelete::Row(_)) => "Delete this record? [y/N]".to_string(),
            Mode::Confirm(PendingDelete::Selected(count)) => {
                format!("Delete {} selected records? [y/N]", count)
            }
            _ => {
                if let Some(ref msg) = app.status_message {
                    msg.clone()
                } else {
                    format!(
                        "{} selected | Space:Select a:All d:Delete s:Sort /:Filter u:Unfilter n/p:Page +/-:Size Tab:Dataset Esc:Quit",
                        snap.selected_count
                    )
                }
            }
        };

        let status_bar = Paragraph::new(status).style(Style::default().fg(Color::Gray));
        f.render_widget(status_bar, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("4155550134"), "(415) 555-0134");
        assert_eq!(format_phone("415-555-0134"), "(415) 555-0134");
        // Not 10 digits: passes through untouched
        assert_eq!(format_phone("555-0134"), "555-0134");
        assert_eq!(format_phone(""), "");
    }
}
