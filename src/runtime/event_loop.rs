use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::EngineEvent;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle, PlaybackStatus};
use crate::player::{Controller, PlaybackEngine};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui::{self, TuiView};

/// State tracked by the runtime event loop across iterations.
struct EventLoopState {
    /// Cursor row in the playlist; independent of the playing track.
    selected: usize,
    /// Text of the "add path" popup while it is open.
    prompt: Option<String>,
    /// Transport state mirrored to MPRIS. The controller does not track
    /// playing/paused itself, so the loop keeps the mirror.
    transport: PlaybackStatus,
}

/// Main terminal event loop: handles input, UI drawing, sync with the audio
/// thread and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run<E: PlaybackEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut Controller<E, TuiView>,
    engine_events: &mpsc::Receiver<EngineEvent>,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState {
        selected: 0,
        prompt: None,
        transport: PlaybackStatus::Stopped,
    };

    loop {
        while let Ok(ev) = engine_events.try_recv() {
            handle_engine_event(ev, controller, &mut state);
        }

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, controller, &mut state) {
                return Ok(());
            }
        }

        // Keep the cursor inside the list after removals.
        state.selected = state
            .selected
            .min(controller.playlist().len().saturating_sub(1));

        update_mpris(mpris, controller, state.transport);

        terminal.draw(|f| {
            ui::draw(
                f,
                controller.view(),
                state.selected,
                controller.mode(),
                state.prompt.as_deref(),
                &settings.ui,
                &settings.controls,
            )
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, controller, control_tx, &mut state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn handle_engine_event<E: PlaybackEngine>(
    ev: EngineEvent,
    controller: &mut Controller<E, TuiView>,
    state: &mut EventLoopState,
) {
    match ev {
        EngineEvent::PositionChanged(pos) => controller.on_position_changed(pos),
        EngineEvent::DurationChanged(total) => controller.on_duration_changed(total),
        EngineEvent::EndOfMedia => {
            controller.on_track_ended();
            state.transport = if controller.current_index().is_some() {
                PlaybackStatus::Playing
            } else {
                PlaybackStatus::Stopped
            };
        }
        EngineEvent::Error(msg) => {
            controller.on_engine_error(&msg);
            state.transport = PlaybackStatus::Stopped;
        }
    }
}

/// Returns `true` when shutdown is requested.
fn handle_control_cmd<E: PlaybackEngine>(
    cmd: ControlCmd,
    controller: &mut Controller<E, TuiView>,
    state: &mut EventLoopState,
) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => match state.transport {
            PlaybackStatus::Paused => {
                if controller.play(None).is_ok() {
                    state.transport = PlaybackStatus::Playing;
                }
            }
            PlaybackStatus::Stopped => {
                if controller.play(Some(state.selected)).is_ok() {
                    state.transport = PlaybackStatus::Playing;
                }
            }
            PlaybackStatus::Playing => {}
        },
        ControlCmd::Pause => {
            if state.transport == PlaybackStatus::Playing {
                controller.pause();
                state.transport = PlaybackStatus::Paused;
            }
        }
        ControlCmd::PlayPause => match state.transport {
            PlaybackStatus::Stopped => {
                if controller.play(Some(state.selected)).is_ok() {
                    state.transport = PlaybackStatus::Playing;
                }
            }
            PlaybackStatus::Playing => {
                controller.pause();
                state.transport = PlaybackStatus::Paused;
            }
            PlaybackStatus::Paused => {
                if controller.play(None).is_ok() {
                    state.transport = PlaybackStatus::Playing;
                }
            }
        },
        ControlCmd::Stop => {
            controller.stop();
            state.transport = PlaybackStatus::Stopped;
        }
        ControlCmd::Next => {
            controller.advance();
            state.transport = if controller.current_index().is_some() {
                PlaybackStatus::Playing
            } else {
                PlaybackStatus::Stopped
            };
        }
    }

    false
}

/// Returns `true` when shutdown is requested.
fn handle_key_event<E: PlaybackEngine>(
    key: KeyEvent,
    settings: &config::Settings,
    controller: &mut Controller<E, TuiView>,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> bool {
    if let Some(input) = state.prompt.as_mut() {
        match key.code {
            KeyCode::Esc => {
                state.prompt = None;
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Enter => {
                let entered = input.trim().to_string();
                state.prompt = None;
                if !entered.is_empty() {
                    let path = PathBuf::from(entered);
                    if path.is_dir() {
                        controller.add_from_folder(&path);
                    } else {
                        controller.add_paths(&[path]);
                    }
                }
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    input.push(c);
                }
            }
            _ => {}
        }

        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => {
            let len = controller.playlist().len();
            if state.selected + 1 < len {
                state.selected += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.selected = state.selected.saturating_sub(1);
        }
        KeyCode::Enter => {
            if controller.play(Some(state.selected)).is_ok() {
                state.transport = PlaybackStatus::Playing;
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('s') => {
            controller.stop();
            state.transport = PlaybackStatus::Stopped;
        }
        KeyCode::Char('a') => {
            state.prompt = Some(String::new());
        }
        KeyCode::Char('d') => {
            if controller.remove(state.selected).is_ok()
                && controller.current_index().is_none()
            {
                state.transport = PlaybackStatus::Stopped;
            }
        }
        KeyCode::Char('m') => {
            controller.cycle_mode();
        }
        KeyCode::Char('H') => {
            let step = Duration::from_secs(settings.controls.seek_seconds);
            let pos = controller.view().progress_value.saturating_sub(step);
            controller.seek(pos);
        }
        KeyCode::Char('L') => {
            let step = Duration::from_secs(settings.controls.seek_seconds);
            let total = controller.view().progress_total;
            let pos = (controller.view().progress_value + step).min(total);
            controller.seek(pos);
        }
        _ => {}
    }

    false
}
