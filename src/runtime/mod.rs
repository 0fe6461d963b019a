use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::RodioEngine;
use crate::config::PlayModeSetting;
use crate::mpris::ControlCmd;
use crate::player::{Controller, PlayMode};
use crate::ui::TuiView;

mod event_loop;
mod mpris_sync;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let mode = match settings.playback.mode {
        PlayModeSetting::Sequential => PlayMode::Sequential,
        PlayModeSetting::Shuffle => PlayMode::Shuffle,
        PlayModeSetting::RepeatAll => PlayMode::RepeatAll,
    };

    let (engine, engine_events) = RodioEngine::new();
    let mut controller = Controller::new(engine, TuiView::new(), mode, settings.library.clone());

    // Optional startup import: a folder or a single file on the command line.
    if let Some(arg) = env::args().nth(1) {
        let path = PathBuf::from(arg);
        if path.is_dir() {
            controller.add_from_folder(&path);
        } else {
            controller.add_paths(&[path]);
        }
    }

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut controller,
        &engine_events,
        &mpris,
        &control_tx,
        &control_rx,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    controller.engine().quit();

    run_result
}
