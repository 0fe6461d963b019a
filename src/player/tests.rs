use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use super::*;
use crate::config::LibrarySettings;

#[derive(Debug, Clone, PartialEq, Eq)]
enum EngineCall {
    Load(PathBuf),
    Play,
    Pause,
    Stop,
    SetPosition(Duration),
}

struct FakeEngine {
    calls: Rc<RefCell<Vec<EngineCall>>>,
}

impl FakeEngine {
    fn new() -> (Self, Rc<RefCell<Vec<EngineCall>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl PlaybackEngine for FakeEngine {
    fn load(&mut self, path: &Path) {
        self.calls
            .borrow_mut()
            .push(EngineCall::Load(path.to_path_buf()));
    }
    fn play(&mut self) {
        self.calls.borrow_mut().push(EngineCall::Play);
    }
    fn pause(&mut self) {
        self.calls.borrow_mut().push(EngineCall::Pause);
    }
    fn stop(&mut self) {
        self.calls.borrow_mut().push(EngineCall::Stop);
    }
    fn set_position(&mut self, position: Duration) {
        self.calls
            .borrow_mut()
            .push(EngineCall::SetPosition(position));
    }
}

#[derive(Default)]
struct FakeView {
    rows: Vec<String>,
    highlighted: Option<usize>,
    status: String,
    progress_total: Duration,
    progress_value: Duration,
}

impl View for FakeView {
    fn render_playlist(&mut self, names: &[String]) {
        self.rows = names.to_vec();
    }
    fn set_highlighted(&mut self, index: Option<usize>) {
        self.highlighted = index;
    }
    fn set_status(&mut self, text: &str) {
        self.status = text.to_string();
    }
    fn set_progress_range(&mut self, total: Duration) {
        self.progress_total = total;
    }
    fn set_progress_value(&mut self, position: Duration) {
        self.progress_value = position;
    }
}

type TestController = Controller<FakeEngine, FakeView>;

fn controller(mode: PlayMode) -> (TestController, Rc<RefCell<Vec<EngineCall>>>) {
    let (engine, calls) = FakeEngine::new();
    let c = Controller::new(engine, FakeView::default(), mode, LibrarySettings::default());
    (c, calls)
}

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|n| PathBuf::from(format!("/music/{n}"))).collect()
}

fn drain(calls: &Rc<RefCell<Vec<EngineCall>>>) -> Vec<EngineCall> {
    calls.borrow_mut().drain(..).collect()
}

#[test]
fn adding_duplicate_path_is_a_noop() {
    let (mut c, _) = controller(PlayMode::Sequential);
    assert_eq!(c.add_paths(&paths(&["a.mp3", "b.mp3"])), 2);
    assert_eq!(c.add_paths(&paths(&["a.mp3"])), 0);
    assert_eq!(c.playlist().len(), 2);
    assert_eq!(c.view().status, "Added 0 track(s)");
}

#[test]
fn adding_nothing_is_fine() {
    let (mut c, calls) = controller(PlayMode::Sequential);
    assert_eq!(c.add_paths(&[]), 0);
    assert!(drain(&calls).is_empty());
}

#[test]
fn added_tracks_render_in_insertion_order() {
    let (mut c, _) = controller(PlayMode::Sequential);
    c.add_paths(&paths(&["c.mp3", "a.mp3", "b.mp3"]));
    assert_eq!(c.view().rows, vec!["c", "a", "b"]);
    assert_eq!(c.view().highlighted, None);
}

#[test]
fn play_by_index_loads_and_plays() {
    let (mut c, calls) = controller(PlayMode::Sequential);
    c.add_paths(&paths(&["a.mp3", "b.mp3"]));
    drain(&calls);

    c.play(Some(1)).unwrap();
    assert_eq!(
        drain(&calls),
        vec![
            EngineCall::Load(PathBuf::from("/music/b.mp3")),
            EngineCall::Play
        ]
    );
    assert_eq!(c.current_index(), Some(1));
    assert_eq!(c.view().highlighted, Some(1));
    assert_eq!(c.view().status, "Playing: b");
}

#[test]
fn play_same_index_resumes_without_reload() {
    let (mut c, calls) = controller(PlayMode::Sequential);
    c.add_paths(&paths(&["a.mp3"]));
    c.play(Some(0)).unwrap();
    drain(&calls);

    c.play(Some(0)).unwrap();
    assert_eq!(drain(&calls), vec![EngineCall::Play]);
}

#[test]
fn play_without_index_resumes_current() {
    let (mut c, calls) = controller(PlayMode::Sequential);
    c.add_paths(&paths(&["a.mp3"]));
    c.play(Some(0)).unwrap();
    c.pause();
    drain(&calls);

    c.play(None).unwrap();
    assert_eq!(drain(&calls), vec![EngineCall::Play]);
    assert_eq!(c.view().status, "Playing: a");
}

#[test]
fn play_without_selection_reports_no_selection() {
    let (mut c, calls) = controller(PlayMode::Sequential);
    assert_eq!(c.play(None), Err(PlayerError::NoSelection));
    assert_eq!(c.view().status, "No track selected");
    assert!(drain(&calls).is_empty());
}

#[test]
fn play_by_index_on_empty_playlist_reports_empty() {
    let (mut c, calls) = controller(PlayMode::Sequential);
    assert_eq!(c.play(Some(0)), Err(PlayerError::EmptyPlaylist));
    assert!(drain(&calls).is_empty());
}

#[test]
fn play_out_of_range_reports_out_of_range() {
    let (mut c, _) = controller(PlayMode::Sequential);
    c.add_paths(&paths(&["a.mp3"]));
    assert_eq!(c.play(Some(5)), Err(PlayerError::OutOfRange));
    assert_eq!(c.view().status, "No such track");
}

#[test]
fn removing_current_track_stops_and_clears_it() {
    let (mut c, calls) = controller(PlayMode::Sequential);
    c.add_paths(&paths(&["a.mp3", "b.mp3"]));
    c.play(Some(0)).unwrap();
    drain(&calls);

    c.remove(0).unwrap();
    assert!(drain(&calls).contains(&EngineCall::Stop));
    assert_eq!(c.current_index(), None);
    assert_eq!(c.view().highlighted, None);
    assert_eq!(c.playlist().len(), 1);
    assert_eq!(c.view().status, "Removed a");
}

#[test]
fn removing_before_current_shifts_the_highlight_down() {
    let (mut c, calls) = controller(PlayMode::Sequential);
    c.add_paths(&paths(&["a.mp3", "b.mp3", "c.mp3"]));
    c.play(Some(2)).unwrap();
    drain(&calls);

    c.remove(0).unwrap();
    assert_eq!(c.current_index(), Some(1));
    assert_eq!(c.view().highlighted, Some(1));
    assert!(!drain(&calls).contains(&EngineCall::Stop));
}

#[test]
fn removing_after_current_leaves_the_highlight_alone() {
    let (mut c, _) = controller(PlayMode::Sequential);
    c.add_paths(&paths(&["a.mp3", "b.mp3", "c.mp3"]));
    c.play(Some(0)).unwrap();

    c.remove(2).unwrap();
    assert_eq!(c.current_index(), Some(0));
    assert_eq!(c.view().highlighted, Some(0));
}

#[test]
fn remove_out_of_range_reports_out_of_range() {
    let (mut c, _) = controller(PlayMode::Sequential);
    c.add_paths(&paths(&["a.mp3"]));
    assert_eq!(c.remove(5), Err(PlayerError::OutOfRange));
    assert_eq!(c.view().status, "No such track");
    assert_eq!(c.playlist().len(), 1);
}

#[test]
fn stop_clears_highlight_and_progress() {
    let (mut c, calls) = controller(PlayMode::Sequential);
    c.add_paths(&paths(&["a.mp3"]));
    c.play(Some(0)).unwrap();
    c.on_position_changed(Duration::from_secs(30));
    drain(&calls);

    c.stop();
    assert_eq!(drain(&calls), vec![EngineCall::Stop]);
    assert_eq!(c.current_index(), None);
    assert_eq!(c.view().highlighted, None);
    assert_eq!(c.view().progress_value, Duration::ZERO);
    assert_eq!(c.view().status, "Stopped");
}

#[test]
fn sequential_advance_plays_the_next_track() {
    let (mut c, calls) = controller(PlayMode::Sequential);
    c.add_paths(&paths(&["a.mp3", "b.mp3", "c.mp3"]));
    c.play(Some(0)).unwrap();
    drain(&calls);

    c.on_track_ended();
    assert_eq!(
        drain(&calls),
        vec![
            EngineCall::Load(PathBuf::from("/music/b.mp3")),
            EngineCall::Play
        ]
    );
    assert_eq!(c.current_index(), Some(1));
}

#[test]
fn sequential_advance_stops_at_the_last_track() {
    let (mut c, calls) = controller(PlayMode::Sequential);
    c.add_paths(&paths(&["a.mp3", "b.mp3"]));
    c.play(Some(1)).unwrap();
    drain(&calls);

    c.on_track_ended();
    assert_eq!(drain(&calls), vec![EngineCall::Stop]);
    assert_eq!(c.current_index(), None);
    assert_eq!(c.view().status, "Stopped");
}

#[test]
fn advance_without_current_stops() {
    let (mut c, calls) = controller(PlayMode::Sequential);
    c.add_paths(&paths(&["a.mp3", "b.mp3"]));
    drain(&calls);

    c.advance();
    assert_eq!(drain(&calls), vec![EngineCall::Stop]);
}

#[test]
fn advance_on_empty_playlist_does_nothing() {
    let (mut c, calls) = controller(PlayMode::RepeatAll);
    c.advance();
    assert!(drain(&calls).is_empty());
}

#[test]
fn repeat_all_wraps_to_the_first_track() {
    let (mut c, calls) = controller(PlayMode::RepeatAll);
    c.add_paths(&paths(&["a.mp3", "b.mp3"]));
    c.play(Some(1)).unwrap();
    drain(&calls);

    c.on_track_ended();
    assert_eq!(
        drain(&calls),
        vec![
            EngineCall::Load(PathBuf::from("/music/a.mp3")),
            EngineCall::Play
        ]
    );
    assert_eq!(c.current_index(), Some(0));
}

#[test]
fn repeat_all_reloads_a_single_track() {
    let (mut c, calls) = controller(PlayMode::RepeatAll);
    c.add_paths(&paths(&["a.mp3"]));
    c.play(Some(0)).unwrap();
    drain(&calls);

    c.on_track_ended();
    assert_eq!(
        drain(&calls),
        vec![
            EngineCall::Load(PathBuf::from("/music/a.mp3")),
            EngineCall::Play
        ]
    );
    assert_eq!(c.current_index(), Some(0));
}

#[test]
fn shuffle_covers_every_index_over_many_trials() {
    let (mut c, calls) = controller(PlayMode::Shuffle);
    c.add_paths(&paths(&["a.mp3", "b.mp3", "c.mp3", "d.mp3"]));
    c.play(Some(0)).unwrap();
    drain(&calls);

    let mut seen: HashSet<PathBuf> = HashSet::new();
    for _ in 0..200 {
        c.on_track_ended();
        for call in drain(&calls) {
            if let EngineCall::Load(p) = call {
                seen.insert(p);
            }
        }
        assert!(c.current_index().is_some());
    }
    assert_eq!(seen.len(), 4);
}

#[test]
fn seek_delegates_to_the_engine() {
    let (mut c, calls) = controller(PlayMode::Sequential);
    c.seek(Duration::from_secs(42));
    assert_eq!(
        drain(&calls),
        vec![EngineCall::SetPosition(Duration::from_secs(42))]
    );
}

#[test]
fn pause_delegates_and_reports() {
    let (mut c, calls) = controller(PlayMode::Sequential);
    c.pause();
    assert_eq!(drain(&calls), vec![EngineCall::Pause]);
    assert_eq!(c.view().status, "Paused");
}

#[test]
fn position_and_duration_callbacks_update_progress() {
    let (mut c, _) = controller(PlayMode::Sequential);
    c.on_duration_changed(Duration::from_secs(180));
    c.on_position_changed(Duration::from_secs(30));
    assert_eq!(c.view().progress_total, Duration::from_secs(180));
    assert_eq!(c.view().progress_value, Duration::from_secs(30));
}

#[test]
fn engine_errors_become_a_status_line() {
    let (mut c, _) = controller(PlayMode::Sequential);
    c.on_engine_error("failed to decode /music/a.mp3");
    assert_eq!(
        c.view().status,
        "Playback error: failed to decode /music/a.mp3"
    );
}

#[test]
fn cycle_mode_walks_the_three_modes() {
    let (mut c, _) = controller(PlayMode::Sequential);
    c.cycle_mode();
    assert_eq!(c.mode(), PlayMode::Shuffle);
    c.cycle_mode();
    assert_eq!(c.mode(), PlayMode::RepeatAll);
    c.cycle_mode();
    assert_eq!(c.mode(), PlayMode::Sequential);
    assert_eq!(c.view().status, "Mode: Sequential");
}

#[test]
fn add_from_folder_adds_matching_files_once() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("b.flac"), b"not real").unwrap();
    fs::write(dir.path().join("notes.txt"), b"ignore").unwrap();

    let (mut c, _) = controller(PlayMode::Sequential);
    assert_eq!(c.add_from_folder(dir.path()), 2);
    assert_eq!(c.playlist().len(), 2);
    assert_eq!(c.view().status, "Added 2 track(s)");

    assert_eq!(c.add_from_folder(dir.path()), 0);
    assert_eq!(c.view().status, "No new tracks added");
}
