//! TUI event loop for the command builder.

use super::app::App;
use super::external::TerminalGuard;
use super::EVENT_POLL_MS;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::CrosstermBackend;
use std::io;
use std::time::Duration;

/// Drive the form until the user quits. Returns the command line to execute
/// when the session ends with exit-and-execute.
pub(super) fn run_tui(mut app: App<'_>) -> Result<Option<String>> {
    let guard = TerminalGuard::enter()?;
    let mut terminal = {
        let stdout = io::stdout();
        let backend = CrosstermBackend::new(stdout);
        ratatui::Terminal::new(backend).context("init terminal")?
    };

    let mut execute = None;
    loop {
        terminal
            .draw(|frame| app.draw(frame))
            .context("draw builder ui")?;

        if !event::poll(Duration::from_millis(EVENT_POLL_MS)).context("poll event")? {
            continue;
        }
        let Event::Key(key) = event::read().context("read event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(action) = action_from_key(key) else {
            continue;
        };
        match action {
            Action::Quit => {
                if app.is_preview_open() {
                    app.close_preview();
                } else {
                    break;
                }
            }
            Action::Up => {
                if app.is_preview_open() {
                    app.scroll_preview(-3);
                } else {
                    app.move_focus(-1);
                }
            }
            Action::Down => {
                if app.is_preview_open() {
                    app.scroll_preview(3);
                } else {
                    app.move_focus(1);
                }
            }
            Action::Left => {
                app.cycle(-1).context("select option")?;
            }
            Action::Right => {
                app.cycle(1).context("select option")?;
            }
            Action::Activate => app.activate(),
            Action::Type(c) => app.type_char(c),
            Action::Backspace => app.backspace(),
            Action::Copy => {
                if let Err(err) = app.copy() {
                    app.set_message(format!("copy failed: {err}"));
                }
            }
            Action::Preview => {
                if let Err(err) = app.run_preview() {
                    app.set_message(format!("preview failed: {err}"));
                }
                terminal.clear().ok();
            }
            Action::ClosePreview => app.close_preview(),
            Action::Execute => match app.execute_line() {
                Some(line) => {
                    execute = Some(line);
                    break;
                }
                None => app.set_message("select a command first".to_string()),
            },
        }
    }

    drop(guard);
    terminal.show_cursor().ok();
    Ok(execute)
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Activate,
    Type(char),
    Backspace,
    Copy,
    Preview,
    ClosePreview,
    Execute,
}

fn action_from_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('q') => Some(Action::Copy),
            KeyCode::Char('r') => Some(Action::Preview),
            KeyCode::Char('w') => Some(Action::ClosePreview),
            KeyCode::Char('x') => Some(Action::Execute),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Up | KeyCode::BackTab => Some(Action::Up),
        KeyCode::Down | KeyCode::Tab => Some(Action::Down),
        KeyCode::Left => Some(Action::Left),
        KeyCode::Right => Some(Action::Right),
        KeyCode::Enter => Some(Action::Activate),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(c) => Some(Action::Type(c)),
        _ => None,
    }
}
