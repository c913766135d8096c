use super::display::DisplayContext;
use super::{PlotFrame, StatusBoard};
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

/// Puts the terminal back even if drawing fails
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

fn axis_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    vec![
        format!("{:.0}", bounds[0]),
        format!("{:.0}", mid),
        format!("{:.0}", bounds[1]),
    ]
}

fn draw(f: &mut Frame, plot: &PlotFrame, heading: &str, status: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(f.area());

    let points = plot.series.points();
    let x = plot.x_bounds.map(|b| b.as_f64()).unwrap_or([0.0, 1.0]);
    let y = plot.y_bounds.map(|b| b.as_f64()).unwrap_or([0.0, 1.0]);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .title(heading.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .title("time")
                .style(Style::default().fg(Color::Gray))
                .bounds(x)
                .labels(axis_labels(x)),
        )
        .y_axis(
            Axis::default()
                .title("value")
                .style(Style::default().fg(Color::Gray))
                .bounds(y)
                .labels(axis_labels(y)),
        );
    f.render_widget(chart, chunks[0]);

    let footer = Paragraph::new(format!("{}  (c clears, q quits)", status))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::White).add_modifier(Modifier::DIM));
    f.render_widget(footer, chunks[1]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    None,
    Quit,
    Clear,
}

fn action_for(key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('c') => KeyAction::Clear,
        _ => KeyAction::None,
    }
}

/// Drain pending key presses
fn poll_keys() -> Result<KeyAction> {
    let mut action = KeyAction::None;
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            match action_for(key) {
                KeyAction::Quit => return Ok(KeyAction::Quit),
                KeyAction::Clear => action = KeyAction::Clear,
                KeyAction::None => {}
            }
        }
    }
    Ok(action)
}

/// Scrolling chart in the terminal, redrawn once per tick until the user
/// quits. The last plot stays on screen if the reader stops first.
pub async fn run_terminal(mut ctx: DisplayContext) -> Result<()> {
    let guard = TerminalGuard::enter()?;
    let mut terminal: Terminal<CrosstermBackend<Stdout>> =
        Terminal::new(CrosstermBackend::new(io::stdout())).context("Failed to create terminal")?;

    let mut ticker = interval(ctx.tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut board = StatusBoard::new();

    let result = loop {
        ticker.tick().await;

        let frame = ctx.refresh(&mut board);
        let status = ctx.status_line(&board, &frame);
        let heading = board.heading();

        if let Err(e) = terminal.draw(|f| draw(f, &frame, &heading, &status)) {
            break Err(anyhow::Error::new(e).context("Failed to draw"));
        }

        match poll_keys() {
            Ok(KeyAction::Quit) => break Ok(()),
            Ok(KeyAction::Clear) => ctx.feed.telemetry().clear(),
            Ok(KeyAction::None) => {}
            Err(e) => break Err(e),
        }
    };

    ctx.run_flag.request_stop();
    drop(guard);
    log::info!("{}", ctx.monitor.generate_report());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Sample, Telemetry};
    use crate::engine::ReaderEvent;
    use crate::visualization::{PlotFeed, PlotWindow};
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn render(plot: &PlotFrame, heading: &str, status: &str) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| draw(f, plot, heading, status)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draw_shows_heading_axes_and_status() {
        let telemetry = Arc::new(Telemetry::new());
        telemetry.push_sample(Sample::new(60, 0));
        telemetry.push_sample(Sample::new(100, 40));
        let plot = PlotFeed::new(telemetry, PlotWindow::default()).tick();

        let mut board = StatusBoard::new();
        board.apply(ReaderEvent::TitlePublished("MyPlotX\n".to_string()));

        let screen = render(&plot, &board.heading(), "two samples");
        assert!(screen.contains("MyPlotX"));
        assert!(!screen.contains("MyPlotX\n"));
        assert!(screen.contains("two samples  (c clears, q quits)"));
        // x axis runs from last - 50 to last + 1
        assert!(screen.contains("101"));
        assert!(screen.contains("50"));
    }

    #[test]
    fn test_draw_empty_series() {
        let plot = PlotFeed::new(Arc::new(Telemetry::new()), PlotWindow::default()).tick();
        let screen = render(&plot, &StatusBoard::new().heading(), "no samples");
        assert!(screen.contains("waiting for stream..."));
        assert!(screen.contains("no samples"));
    }

    #[test]
    fn test_key_bindings() {
        let press = |code, modifiers| action_for(KeyEvent::new(code, modifiers));

        assert_eq!(press(KeyCode::Char('q'), KeyModifiers::NONE), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc, KeyModifiers::NONE), KeyAction::Quit);
        assert_eq!(press(KeyCode::Char('c'), KeyModifiers::CONTROL), KeyAction::Quit);
        assert_eq!(press(KeyCode::Char('c'), KeyModifiers::NONE), KeyAction::Clear);
        assert_eq!(press(KeyCode::Char('x'), KeyModifiers::NONE), KeyAction::None);
        assert_eq!(press(KeyCode::Enter, KeyModifiers::NONE), KeyAction::None);
    }

    #[test]
    fn test_key_release_ignored() {
        let release = KeyEvent::new_with_kind(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(action_for(release), KeyAction::None);
    }
}
