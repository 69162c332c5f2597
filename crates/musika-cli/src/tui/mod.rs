use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use musika_core::chart::{PieChart, TOP_COMPOSERS_TITLE};
use musika_core::feedback::{self, Message};
use musika_core::model::{Field, RecordInput, TranscriptionRecord};
use musika_core::{Outcome, RecordStore};
use ratatui::prelude::*;

pub mod chart;
pub mod form;

/// Application state for the record form.
///
/// The form owns every piece of widget state; the store is only called, one
/// synchronous operation per key press.
#[derive(Debug)]
pub struct App {
    store: RecordStore,
    pub input: RecordInput,
    pub focus: Field,
    /// Rows currently shown in the grid.
    pub rows: Vec<TranscriptionRecord>,
    pub grid_offset: usize,
    pub status: Option<Message>,
    /// Open chart dialog, if any.
    pub chart: Option<PieChart>,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            input: RecordInput::default(),
            focus: Field::Composer,
            rows: Vec::new(),
            grid_offset: 0,
            status: None,
            chart: None,
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.chart.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.chart = None;
            }
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::F(10) => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::F(2) => self.add_record(),
            KeyCode::F(3) => self.search_records(),
            KeyCode::F(4) => self.update_records(),
            KeyCode::F(5) => self.delete_records(),
            KeyCode::F(6) => self.show_chart(),
            KeyCode::PageDown => {
                if self.grid_offset + 1 < self.rows.len() {
                    self.grid_offset += 1;
                }
            }
            KeyCode::PageUp => self.grid_offset = self.grid_offset.saturating_sub(1),
            KeyCode::Backspace => {
                self.input.get_mut(self.focus).pop();
            }
            KeyCode::Char('u') if ctrl => self.input.get_mut(self.focus).clear(),
            KeyCode::Char(c) if !ctrl => self.input.get_mut(self.focus).push(c),
            _ => {}
        }
    }

    /// Inputs and grid are left as they are after a successful add.
    fn add_record(&mut self) {
        self.status = Some(match self.store.create(&self.input) {
            Ok(id) => feedback::created(id),
            Err(err) => feedback::for_error(&err),
        });
    }

    fn search_records(&mut self) {
        let message = match self.store.search(&self.input.composer) {
            Ok(outcome) => {
                let message = feedback::searched(&outcome);
                self.rows = outcome.into_option().unwrap_or_default();
                self.grid_offset = 0;
                message
            }
            Err(err) => feedback::for_error(&err),
        };
        self.status = Some(message);
    }

    fn update_records(&mut self) {
        self.status = Some(match self.store.update(&self.input.composer, &self.input) {
            Ok(outcome) => feedback::updated(&outcome),
            Err(err) => feedback::for_error(&err),
        });
    }

    fn delete_records(&mut self) {
        self.status = Some(match self.store.delete(&self.input.composer) {
            Ok(outcome) => feedback::deleted(&outcome),
            Err(err) => feedback::for_error(&err),
        });
    }

    fn show_chart(&mut self) {
        match self.store.top_composers() {
            Ok(Outcome::Matched(counts)) => {
                self.chart = Some(PieChart::from_counts(TOP_COMPOSERS_TITLE, &counts));
            }
            Ok(Outcome::NotFound) => self.status = Some(feedback::empty_catalog()),
            Err(err) => self.status = Some(feedback::for_error(&err)),
        }
    }
}

/// Run the record form.
///
/// Sets up the terminal, runs the main event loop, and restores the terminal
/// on exit (including on error).
pub fn run_tui(db_path: PathBuf) -> Result<()> {
    let store = RecordStore::open(&db_path).context("Failed to open database")?;
    let app = App::new(store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the event loop, capturing any error so we can restore the terminal
    let result = run_event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            form::render(frame, &app);
            if let Some(pie) = &app.chart {
                chart::render(frame, pie);
            }
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
