//! Ratatui-based terminal UI.
//!
//! Shows the composite score and state, a radar chart of the dimension means,
//! the signal lists, and the full indicator table. Refreshing reuses the
//! cached dashboard while it is fresh; a forced refresh always refetches.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Row, Table, TableState},
};

use crate::app::pipeline::DashboardService;
use crate::domain::{Dashboard, DashboardConfig, MarketState};
use crate::error::AppError;
use crate::plot::{axis_angle, radar_vertices};

mod plotters_chart;

use plotters_chart::RadarPlottersChart;

/// Radius at which axis labels sit in the chart.
const LABEL_RADIUS: f64 = 1.15;

/// Start the TUI.
pub fn run(config: &DashboardConfig) -> Result<(), AppError> {
    // Load configuration before touching the terminal so errors print normally.
    let service = DashboardService::from_config(config)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(service);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    service: DashboardService,
    dashboard: Dashboard,
    selected: usize,
    status: String,
}

impl App {
    fn new(mut service: DashboardService) -> Self {
        let dashboard = service.current().clone();
        let status = format!("Loaded {} indicators from {}.", dashboard.observations.len(), service.source_name());
        Self {
            service,
            dashboard,
            selected: 0,
            status,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                self.describe_selected();
            }
            KeyCode::Down => {
                if self.selected + 1 < self.dashboard.observations.len() {
                    self.selected += 1;
                }
                self.describe_selected();
            }
            KeyCode::Char('r') => {
                let cached = self.service.cache_is_fresh();
                self.dashboard = self.service.current().clone();
                self.status = if cached {
                    "Served from cache (press R to force).".to_string()
                } else {
                    "Refetched all indicators.".to_string()
                };
            }
            KeyCode::Char('R') => {
                self.dashboard = self.service.refresh().clone();
                self.status = "Refetched all indicators.".to_string();
            }
            _ => {}
        }
        false
    }

    fn describe_selected(&mut self) {
        if let Some(o) = self.dashboard.observations.get(self.selected) {
            self.status = format!("{}: {}", o.name, o.interpretation);
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(12),
                Constraint::Length(self.dashboard.observations.len() as u16 + 3),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_table(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let dash = &self.dashboard;
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let title = Line::from(vec![
            Span::styled("pulse", Style::default().fg(Color::Cyan)),
            Span::raw(" - market health"),
            Span::styled(
                format!(
                    " | generated {} | estimated {}/{}",
                    dash.generated_at.format("%Y-%m-%d %H:%M:%S"),
                    dash.estimated_count(),
                    dash.observations.len()
                ),
                Style::default().fg(Color::Gray),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), rows[0]);

        let state_line = Line::from(vec![
            Span::raw(format!("composite {} / 100 ({:+}) ", dash.composite, dash.composite as i64 - 50)),
            Span::styled(
                dash.state.label(),
                Style::default().fg(state_color(dash.state)).add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(state_line), rows[1]);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(state_color(dash.state)))
            .percent(dash.composite.min(100) as u16);
        frame.render_widget(gauge, rows[2]);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        self.draw_radar(frame, chunks[0]);
        self.draw_signals(frame, chunks[1]);
    }

    fn draw_radar(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Dimensions").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let dims = &self.dashboard.dimensions;
        let n = dims.len();
        let polygon = radar_vertices(dims);
        let axes: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let a = axis_angle(i, n);
                (a.cos(), a.sin())
            })
            .collect();
        let labels: Vec<(String, (f64, f64))> = dims
            .iter()
            .zip(&axes)
            .map(|(d, &(x, y))| {
                (
                    format!("{} {:.0}", d.dimension.display_name(), d.mean_score),
                    (x * LABEL_RADIUS, y * LABEL_RADIUS),
                )
            })
            .collect();

        let widget = RadarPlottersChart {
            polygon: &polygon,
            axes: &axes,
            labels: &labels,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_signals(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let supportive: Vec<ListItem> = self
            .dashboard
            .supportive
            .iter()
            .map(|o| ListItem::new(format!("{} ({:.0})", o.name, o.score)).style(Style::default().fg(Color::Green)))
            .collect();
        let list = List::new(supportive).block(Block::default().title("Supportive").borders(Borders::ALL));
        frame.render_widget(list, chunks[0]);

        let mut risks: Vec<ListItem> = self
            .dashboard
            .risks
            .iter()
            .map(|o| {
                ListItem::new(format!("{} ({:.0}): {}", o.name, o.score, o.negative_band))
                    .style(Style::default().fg(Color::Red))
            })
            .collect();
        if risks.is_empty() {
            risks.push(ListItem::new("No significant negative signals."));
        }
        let list = List::new(risks).block(Block::default().title("Risks").borders(Borders::ALL));
        frame.render_widget(list, chunks[1]);
    }

    fn draw_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let header = Row::new(["Dimension", "Indicator", "Value", "As of", "Status", "Score"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .dashboard
            .observations
            .iter()
            .map(|o| {
                let status_style = if o.is_real {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Yellow)
                };
                Row::new(vec![
                    Text::raw(o.dimension.display_name()),
                    Text::raw(o.name.clone()),
                    Text::raw(format!("{:.2}", o.value)),
                    Text::raw(o.as_of.clone()),
                    Text::styled(o.status_label(), status_style),
                    Text::raw(format!("{:.1}", o.score)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Min(24),
                Constraint::Length(12),
                Constraint::Length(12),
                Constraint::Length(10),
                Constraint::Length(6),
            ],
        )
        .header(header)
        .block(Block::default().title("Indicators").borders(Borders::ALL))
        .row_highlight_style(Style::default().fg(Color::Black).bg(Color::White))
        .highlight_symbol("» ");

        let mut state = TableState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  r refresh  R force refresh  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn state_color(state: MarketState) -> Color {
    match state {
        MarketState::Expansion => Color::Green,
        MarketState::Consolidation => Color::Yellow,
        MarketState::Contraction => Color::Red,
    }
}
