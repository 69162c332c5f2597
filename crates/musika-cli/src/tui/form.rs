use musika_core::feedback::Severity;
use musika_core::model::{Field, GRID_COLUMNS};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use super::App;

/// Render the record form: inputs, results grid, status, and key help.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title bar
            Constraint::Length(12), // Input fields, four rows of two
            Constraint::Min(5),     // Record grid
            Constraint::Length(3),  // Status line
            Constraint::Length(3),  // Help bar
        ])
        .split(area);

    render_title(frame, chunks[0]);
    render_fields(frame, app, chunks[1]);
    render_grid(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);
    render_help(frame, chunks[4]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("Musika    Transcription Catalog")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_fields(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3); 4])
        .split(area);

    for (pair, row_area) in Field::ALL.chunks(2).zip(rows.iter()) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50); 2])
            .split(*row_area);

        for (field, cell_area) in pair.iter().zip(cells.iter()) {
            render_field(frame, app, *field, *cell_area);
        }
    }
}

fn render_field(frame: &mut Frame, app: &App, field: Field, area: Rect) {
    let focused = app.focus == field;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let value = app.input.get(field);
    let input = Paragraph::new(value).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(field.label()),
    );
    frame.render_widget(input, area);

    if focused {
        let width = u16::try_from(value.chars().count()).unwrap_or(u16::MAX);
        let max_x = area.x + area.width.saturating_sub(2);
        let x = (area.x + 1).saturating_add(width).min(max_x);
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn render_grid(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(
        GRID_COLUMNS
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))),
    )
    .height(1);

    // area.height - 2 for borders - 1 for header
    let viewport_height = usize::from(area.height.saturating_sub(3));
    let rows: Vec<Row> = app
        .rows
        .iter()
        .skip(app.grid_offset)
        .take(viewport_height)
        .map(|record| Row::new(record.grid_cells()))
        .collect();

    let title = if app.rows.len() > viewport_height {
        format!(
            "Records [{}-{} of {}]",
            app.grid_offset + 1,
            (app.grid_offset + viewport_height).min(app.rows.len()),
            app.rows.len()
        )
    } else {
        "Records".to_string()
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Percentage(14),
            Constraint::Percentage(18),
            Constraint::Percentage(10),
            Constraint::Percentage(12),
            Constraint::Percentage(12),
            Constraint::Percentage(10),
            Constraint::Percentage(10),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match &app.status {
        Some(message) => {
            let color = match message.severity {
                Severity::Info => Color::White,
                Severity::Success => Color::Green,
                Severity::Warning => Color::Yellow,
                Severity::Critical => Color::Red,
            };
            (message.text.as_str(), Style::default().fg(color))
        }
        None => ("", Style::default()),
    };
    let status = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(
        "  Tab/Shift-Tab Field  F2 Add  F3 Search  F4 Update  F5 Delete  F6 Chart  PgUp/PgDn Scroll  Esc Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}
