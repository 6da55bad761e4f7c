//! Terminal user interface hosting both demo widgets.

mod app;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use payload_codec::ScheduledUpdate;

use crate::config::Config;
use app::{App, AppEvent};

/// Run the TUI until the user quits.
pub async fn run(cfg: Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, cfg).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, cfg: Config) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(100);
    let mut app = App::new(cfg.pacing.to_pacing())?;

    // The inspector's synthetic boot row arrives after a short delay, as if
    // the engine were coming online.
    let boot_tx = tx.clone();
    let boot_delay = Duration::from_millis(cfg.boot_delay_ms);
    tokio::spawn(async move {
        tokio::time::sleep(boot_delay).await;
        let _ = boot_tx.send(AppEvent::BootRow).await;
    });

    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        tokio::select! {
            // Handle keyboard events (non-blocking).
            _ = tick_interval.tick() => {
                if event::poll(Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind == KeyEventKind::Press {
                            if let Some(steps) = app.handle_event(AppEvent::Key(key)) {
                                spawn_playback(steps, tx.clone());
                            }
                        }
                    }
                }
                if app.should_quit {
                    return Ok(());
                }
            }

            // Timer-scheduled updates: staged transform steps and the
            // inspector boot row.
            Some(ev) = rx.recv() => {
                if let Some(steps) = app.handle_event(ev) {
                    spawn_playback(steps, tx.clone());
                }
            }
        }
    }
}

/// Play a staged queue on its own timer task, feeding each step back through
/// the event channel as it becomes due.
fn spawn_playback(steps: Vec<ScheduledUpdate>, tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        for step in steps {
            if !step.after.is_zero() {
                tokio::time::sleep(step.after).await;
            }
            if tx.send(AppEvent::Step(step)).await.is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::PlaybackDone).await;
    });
}
