//! Ratatui-based terminal display of the computed series.
//!
//! Two views of the same four series: an overlay on shared axes and a
//! four-row stacked panel. `Tab` switches between them.

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
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::pipeline::AnalysisOutput;
use crate::domain::DerivedKind;
use crate::error::AppError;
use crate::plot::{ChartTheme, PlotData};

mod plotters_chart;

pub use plotters_chart::{ChartView, InflationChart};

/// Show both charts until the user quits.
pub fn run(output: &AnalysisOutput) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::Terminal(format!("failed to initialize terminal: {e}")))?;

    let mut app = App::new(output);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::Terminal(format!("failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::Terminal(format!("failed to enter alternate screen: {e}")));
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

struct App<'a> {
    output: &'a AnalysisOutput,
    data: PlotData,
    view: ChartView,
}

impl<'a> App<'a> {
    fn new(output: &'a AnalysisOutput) -> Self {
        Self {
            output,
            data: PlotData::from_output(output),
            view: ChartView::Overlay,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::Terminal(format!("draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::Terminal(format!("event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::Terminal(format!("event read error: {e}")))? {
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

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::BackTab => self.view = self.view.toggle(),
            KeyCode::Char('o') => self.view = ChartView::Overlay,
            KeyCode::Char('s') => self.view = ChartView::Stacked,
            _ => {}
        }
        false
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let window = self.output.config.window;
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("phillips", Style::default().fg(Color::Cyan)),
            Span::raw(format!(
                " | window {} ..= {} | natural rate {:.3}% | n={}",
                window.start,
                window.end,
                self.output.natural_rate,
                self.output.effective.len()
            )),
        ]));

        let mut legend = Vec::new();
        for kind in DerivedKind::ALL {
            legend.push(Span::styled("── ", Style::default().fg(terminal_color(kind))));
            legend.push(Span::raw(format!("{}   ", kind.display_name())));
        }
        lines.push(Line::from(legend));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title(self.view.title()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        frame.render_widget(
            InflationChart {
                data: &self.data,
                view: self.view,
            },
            inner,
        );
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "Tab switch view  o overlay  s stacked  q quit";
        let line = Line::from(Span::styled(help, Style::default().fg(Color::Gray)));
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn terminal_color(kind: DerivedKind) -> Color {
    let c = ChartTheme::TERMINAL.color(kind);
    Color::Rgb(c.0, c.1, c.2)
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::app::pipeline::fixtures::mock_output;

    #[test]
    fn keys_switch_views_and_quit() {
        let output = mock_output();
        let mut app = App::new(&output);

        assert!(!app.handle_key(KeyCode::Tab));
        assert_eq!(app.view, ChartView::Stacked);
        assert!(!app.handle_key(KeyCode::Char('o')));
        assert_eq!(app.view, ChartView::Overlay);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn header_shows_window_and_legend() {
        let output = mock_output();
        let app = App::new(&output);
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let header: String = (0..4u16)
            .flat_map(|y| (0..120u16).map(move |x| (x, y)))
            .map(|pos| buffer[pos].symbol().to_string())
            .collect();
        assert!(header.contains("2021-01-01"));
        assert!(header.contains("Hybrid Phillips curve"));
    }
}
