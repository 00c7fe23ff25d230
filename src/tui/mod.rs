//! Terminal front end: the focus-mode view

pub mod app;
pub mod notify;
pub mod theme;
pub mod ui;

use std::{io, time::Duration};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

pub use app::App;

const FRAME_RATE: Duration = Duration::from_millis(100);

/// Take over the terminal, run the app until the user quits, then shut the
/// session down and restore the terminal.
pub fn run(app: &mut App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = event_loop(&mut terminal, app);
    finish(app, res, || restore_terminal(&mut terminal))
}

/// Shut the session down, then hand the terminal back. The session is
/// persisted even when restoring the terminal fails.
fn finish(
    app: &mut App,
    res: io::Result<()>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    app.shutdown();
    let restored = restore();
    res.and(restored)
}

fn restore_terminal<B: Backend + io::Write>(terminal: &mut Terminal<B>) -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let cursor = terminal.show_cursor();
    raw.and(screen).and(cursor)
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        let timeout = app
            .until_next_tick()
            .map_or(FRAME_RATE, |next| next.min(FRAME_RATE));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) {
                    return Ok(());
                }
            }
        }

        app.update();
    }
}
