// src/printer/gridview.rs

//! Implement [`show_grid`], the interactive rendering of the merged
//! [`Record`] stream: a full-screen table in the alternate screen, rows
//! scrolled with Up/Down/PageUp/PageDown/Home/End, quit with `q` or Esc.
//!
//! Multi-line bodies display their first line; the text and CSV renderings
//! carry the full body.
//!
//! [`show_grid`]: self::show_grid
//! [`Record`]: crate::data::record::Record

use std::io::{
    self,
    Stdout,
};

use ::crossterm::cursor::Show;
use ::crossterm::event::{
    self,
    Event,
    KeyCode,
    KeyEventKind,
};
use ::crossterm::terminal::{
    disable_raw_mode,
    enable_raw_mode,
    EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ::ratatui::backend::CrosstermBackend;
use ::ratatui::layout::{
    Constraint,
    Rect,
};
use ::ratatui::style::{
    Modifier,
    Style,
};
use ::ratatui::widgets::{
    Block,
    Borders,
    Row,
    Table,
};
use ::ratatui::{
    Frame,
    Terminal,
};
#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

use crate::data::record::Record;
use crate::e_wrn;

/// Column headers of the grid, matching the text rendering's fields.
const GRID_HEADERS: [&str; 6] = [
    "Time created",
    "Log name",
    "Event Id",
    "Source",
    "Level",
    "Description",
];

/// The first line of a possibly multi-line body.
fn first_line(body: &str) -> &str {
    match body.split_once('\n') {
        Some((first, _rest)) => first.trim_end_matches('\r'),
        None => body,
    }
}

/// Render one frame of the grid: the records from `offset` down, one row
/// each, as many as fit. Returns the row capacity of the table area so key
/// handling can page by whole screens.
fn draw_grid(
    frame: &mut Frame<'_>,
    records: &[Record],
    offset: usize,
) -> usize {
    let area: Rect = frame.area();
    // the block borders take two rows, the header row one more
    let page: usize = area
        .height
        .saturating_sub(3) as usize;
    let last: usize = (offset + page).min(records.len());
    let title: String = format!(
        " Events {}..{} of {} (q or Esc quits) ",
        offset + 1,
        last,
        records.len(),
    );
    let header: Row = Row::new(GRID_HEADERS).style(Style::default().add_modifier(Modifier::BOLD));
    let rows = records
        .iter()
        .skip(offset)
        .take(page)
        .map(|record| {
            Row::new([
                record.dt_display(),
                record.source().to_owned(),
                record.id().to_string(),
                record.origin().to_owned(),
                record.severity().to_owned(),
                first_line(record.body()).to_owned(),
            ])
        });
    let widths: [Constraint; 6] = [
        Constraint::Length(19),
        Constraint::Length(24),
        Constraint::Length(8),
        Constraint::Length(32),
        Constraint::Length(12),
        Constraint::Min(24),
    ];
    let table: Table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);

    page
}

/// Draw and scroll until the user quits.
fn run_grid(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    records: &[Record],
) -> anyhow::Result<()> {
    let mut offset: usize = 0;
    loop {
        let mut page: usize = 0;
        terminal.draw(|frame| {
            page = draw_grid(frame, records, offset);
        })?;
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Up => offset = offset.saturating_sub(1),
                KeyCode::Down => offset = offset.saturating_add(1),
                KeyCode::PageUp => offset = offset.saturating_sub(page),
                KeyCode::PageDown => offset = offset.saturating_add(page),
                KeyCode::Home => offset = 0,
                KeyCode::End => offset = usize::MAX,
                _ => {}
            },
            // a resize redraws on the next pass of the loop
            _ => {}
        }
        offset = offset.min(
            records
                .len()
                .saturating_sub(page),
        );
    }

    Ok(())
}

/// Display the records in a full-screen table and block until the user
/// quits.
///
/// Raw mode and the alternate screen are entered here and left again on
/// the way out, also when drawing failed; a restore failure is only
/// warned about since the display is already torn down.
pub fn show_grid(records: &[Record]) -> anyhow::Result<()> {
    defn!("({} records)", records.len());
    enable_raw_mode()?;
    let mut stdout: Stdout = io::stdout();
    ::crossterm::execute!(stdout, EnterAlternateScreen)?;
    let backend: CrosstermBackend<Stdout> = CrosstermBackend::new(stdout);
    let mut terminal: Terminal<CrosstermBackend<Stdout>> = Terminal::new(backend)?;

    let result: anyhow::Result<()> = run_grid(&mut terminal, records);

    if let Err(err) = disable_raw_mode() {
        e_wrn!("disable_raw_mode: {}", err);
    }
    if let Err(err) = ::crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen, Show) {
        e_wrn!("LeaveAlternateScreen: {}", err);
    }
    if let Err(err) = terminal.show_cursor() {
        e_wrn!("show_cursor: {}", err);
    }
    defx!();

    result
}
