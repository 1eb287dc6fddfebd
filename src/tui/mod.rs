// Terminal front-end: the UI loop draws and reads keys, a single actor task
// owns the tracker and applies actions one at a time.
pub mod action;
pub mod state;
pub mod view;

use crate::config::{Config, StorageBackend};
use crate::logging::{init_logging, level_or_default};
use crate::render::Command;
use crate::storage::{LocalStorage, LoggingStorage, Persistence, default_data_dir};
use crate::tracker::Tracker;
use crate::tui::action::{Action, AppEvent};
use crate::tui::state::AppState;
use crate::tui::view::draw;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, time::Duration};
use tokio::sync::mpsc;

pub async fn run() -> Result<()> {
    let (config, config_error) = match Config::load() {
        Ok(cfg) => (cfg, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let data_dir = default_data_dir(config.data_dir.as_deref());
    let (log_level, level_error) = level_or_default(&config.log_level);
    if let Some(dir) = &data_dir {
        init_logging(log_level, &dir.join("logs"))?;
    }
    if let Some(e) = config_error {
        warn!("event=config_load status=error fallback=defaults error={:#}", e);
    }
    if let Some(e) = level_error {
        warn!("event=log_level status=invalid fallback={} error={:#}", log_level, e);
    }

    let tracker = Tracker::open(persistence_for(&config))
        .with_default_kind(config.default_kind)
        .with_sort_on_add(config.sort_by_time);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(config.default_kind);
    let (action_tx, action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);

    let actor = tokio::spawn(run_actor(tracker, action_rx, event_tx));

    // UI Loop
    let ui_result = async {
        loop {
            terminal.draw(|f| draw(f, &mut app_state))?;

            while let Ok(event) = event_rx.try_recv() {
                match event {
                    AppEvent::Rendered(rendered) => app_state.set_rendered(rendered),
                    AppEvent::Submitted => app_state.on_submitted(),
                    AppEvent::Error(msg) => app_state.on_error(&msg),
                    AppEvent::Status(msg) => app_state.message = msg,
                }
            }

            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && let Some(action) = app_state.on_key(key)
            {
                let quit = matches!(action, Action::Quit);
                let _ = action_tx.send(action).await;
                if quit {
                    break;
                }
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    drop(action_tx);
    let _ = actor.await;
    info!("event=app_exit status=ok");
    ui_result
}

fn persistence_for(config: &Config) -> Box<dyn Persistence> {
    match config.storage {
        StorageBackend::Memory => Box::new(LoggingStorage),
        StorageBackend::Json => match LocalStorage::in_dir(config.data_dir.as_deref()) {
            Some(storage) => {
                info!("event=storage_open backend=json path={}", storage.path().display());
                Box::new(storage)
            }
            None => {
                warn!("event=storage_open status=error reason=no_data_dir fallback=memory");
                Box::new(LoggingStorage)
            }
        },
    }
}

/// Owns the tracker. Each action runs to completion (mutate, save, render)
/// before the next one is received.
pub async fn run_actor(
    mut tracker: Tracker,
    mut action_rx: mpsc::Receiver<Action>,
    event_tx: mpsc::Sender<AppEvent>,
) {
    let _ = event_tx
        .send(AppEvent::Rendered(tracker.rendered().clone()))
        .await;

    while let Some(action) = action_rx.recv().await {
        match action {
            Action::Quit => break,
            Action::Submit(form) => {
                *tracker.form_mut() = form;
                match tracker.dispatch(Command::Submit) {
                    Ok(rendered) => {
                        let rendered = rendered.clone();
                        let _ = event_tx.send(AppEvent::Rendered(rendered)).await;
                        let _ = event_tx.send(AppEvent::Submitted).await;
                    }
                    Err(e) => {
                        let _ = event_tx.send(AppEvent::Error(e.to_string())).await;
                    }
                }
            }
            Action::Run(command) => {
                let status = match &command {
                    Command::SortByTime => Some("Sorted by time."),
                    Command::Delete(_) => Some("Deleted."),
                    _ => None,
                };
                match tracker.dispatch(command) {
                    Ok(rendered) => {
                        let rendered = rendered.clone();
                        let _ = event_tx.send(AppEvent::Rendered(rendered)).await;
                        if let Some(msg) = status {
                            let _ = event_tx.send(AppEvent::Status(msg.to_string())).await;
                        }
                    }
                    Err(e) => {
                        let _ = event_tx.send(AppEvent::Error(e.to_string())).await;
                    }
                }
            }
        }
    }
}
