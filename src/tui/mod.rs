//! TUI module - Terminal dashboard with ratatui

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};
use std::io::{stdout, Stdout};

use crate::analysis::{Recommendation, recommend_group, sessions_for_group};
use crate::catalog::{Catalog, Group};
use crate::db::Database;
use crate::workout::Session;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Sessions listed under the recommendations
const RECENT_SESSIONS: usize = 5;

/// App state for TUI
pub struct App {
    db: Database,
    catalog: Catalog,
    history: Vec<Session>,
    selected: usize,
    should_quit: bool,
}

impl App {
    pub fn new(db: Database) -> Result<Self> {
        let catalog = db.load_catalog()?;
        let history = db.get_history()?;
        Ok(Self {
            db,
            catalog,
            history,
            selected: 0,
            should_quit: false,
        })
    }

    /// Run the TUI application; the terminal is restored even if the loop fails
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;
        let result = self.event_loop(&mut terminal);
        let restored = restore_terminal();
        result.and(restored)
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn selected_group(&self) -> Option<&Group> {
        self.catalog.groups.get(self.selected)
    }

    fn recommendations(&self) -> Vec<Recommendation> {
        match self.selected_group() {
            Some(group) => recommend_group(&self.history, &group.key, &group.exercise_names()),
            None => Vec::new(),
        }
    }

    fn refresh(&mut self) -> Result<()> {
        self.catalog = self.db.load_catalog()?;
        self.history = self.db.get_history()?;
        if self.selected >= self.catalog.groups.len() {
            self.selected = self.catalog.groups.len().saturating_sub(1);
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let header = Paragraph::new("bandwork - Resistance Band Workout Tracker")
            .style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(40)])
            .split(chunks[1]);

        self.render_groups(frame, body[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(body[1]);

        self.render_recommendations(frame, right[0]);
        self.render_history(frame, right[1]);

        // Footer
        let footer = Paragraph::new("q: quit | ↑/↓: select group | r: refresh")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);
    }

    fn render_groups(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .catalog
            .groups
            .iter()
            .map(|g| ListItem::new(format!("{} ({})", g.name, g.exercises.len())))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Groups"))
            .highlight_style(Style::default().fg(Color::Yellow).bold())
            .highlight_symbol("> ");

        let mut state = ListState::default();
        if !self.catalog.groups.is_empty() {
            state.select(Some(self.selected));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_recommendations(&self, frame: &mut Frame, area: Rect) {
        let title = match self.selected_group() {
            Some(group) => format!("{} - next session", group.name),
            None => "No groups".to_string(),
        };

        let rows: Vec<Row> = self
            .recommendations()
            .into_iter()
            .map(|rec| {
                let band = rec
                    .recommended_band
                    .map(|b| b.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let breakdown = match &rec.band_data {
                    Some(data) => data
                        .iter()
                        .map(|d| format!("{} {:.2}", d.band, d.avg_difficulty))
                        .collect::<Vec<_>>()
                        .join(", "),
                    None => "no data".to_string(),
                };
                Row::new(vec![
                    Cell::from(rec.exercise),
                    Cell::from(band),
                    Cell::from(breakdown),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(18),
                Constraint::Length(10),
                Constraint::Min(20),
            ],
        )
        .header(Row::new(vec!["Exercise", "Band", "Avg difficulty"])
            .style(Style::default().bold()))
        .block(Block::default().borders(Borders::ALL).title(title));

        frame.render_widget(table, area);
    }

    fn render_history(&self, frame: &mut Frame, area: Rect) {
        let group = self.selected_group().map(|g| g.key.as_str());
        let lines: Vec<Line> = sessions_for_group(&self.history, group)
            .into_iter()
            .take(RECENT_SESSIONS)
            .map(|s| {
                let exercises = s
                    .exercises
                    .iter()
                    .map(|log| format!("{} x{}", log.exercise, log.sets.len()))
                    .collect::<Vec<_>>()
                    .join(", ");
                Line::from(format!("{} | {}", s.date.format("%Y-%m-%d %H:%M"), exercises))
            })
            .collect();

        let history = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Recent workouts"));
        frame.render_widget(history, area);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(key.code)?;
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('r') => self.refresh()?,
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.catalog.groups.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            _ => {}
        }
        Ok(())
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let entered = stdout()
        .execute(EnterAlternateScreen)
        .map_err(anyhow::Error::from)
        .and_then(|_| Ok(Terminal::new(CrosstermBackend::new(stdout()))?));
    if entered.is_err() {
        let _ = restore_terminal();
    }
    entered
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
