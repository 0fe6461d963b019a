//! UI rendering helpers for the terminal user interface.
//!
//! This module contains the [`TuiView`] playlist view and the functions
//! that render it using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::config::{ControlsSettings, UiSettings};
use crate::player::{PlayMode, View};

/// Terminal-backed view state.
///
/// The controller pushes playlist rows, the highlighted entry, the status
/// line and playback progress into this struct; [`draw`] renders a snapshot
/// of it every frame.
#[derive(Debug, Default)]
pub struct TuiView {
    pub rows: Vec<String>,
    pub highlighted: Option<usize>,
    pub status: String,
    pub progress_total: Duration,
    pub progress_value: Duration,
}

impl TuiView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl View for TuiView {
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

    fn set_progress_value(&mut self, value: Duration) {
        self.progress_value = value;
    }
}

/// Render the controls help text, incorporating the configured seek step.
fn controls_text(seek_seconds: u64) -> String {
    let entries = [
        ("j/k", "up/down".to_string()),
        ("enter", "play selected".to_string()),
        ("space/p", "play/pause".to_string()),
        ("s", "stop".to_string()),
        ("H/L", format!("seek -/+{}s", seek_seconds)),
        ("a", "add folder/file".to_string()),
        ("d", "remove selected".to_string()),
        ("m", "mode".to_string()),
        ("q", "quit".to_string()),
    ];
    entries
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Pick the visible window of a list so the cursor stays centered once the
/// list outgrows the viewport. Returns `(start, end, cursor_pos_in_window)`.
fn visible_window(total: usize, list_height: usize, cursor: usize) -> (usize, usize, usize) {
    if total <= list_height || list_height == 0 {
        return (0, total, cursor);
    }
    let half = list_height / 2;
    let mut start = if cursor > half { cursor - half } else { 0 };
    if start + list_height > total {
        start = total - list_height;
    }
    (start, start + list_height, cursor - start)
}

/// Render the entire UI into the provided `frame`.
///
/// `selected` is the cursor row; the playing track is marked independently
/// via `view.highlighted`. When `prompt` is `Some`, an input popup is drawn
/// over the track list.
pub fn draw(
    frame: &mut Frame,
    view: &TuiView,
    selected: usize,
    mode: PlayMode,
    prompt: Option<&str>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" rondo ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = format!("Mode: {} • {}", mode.label(), view.status);
    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Track list
    {
        let total = view.rows.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let cursor = selected.min(total.saturating_sub(1));
        let (start, end, cursor_in_window) = visible_window(total, list_height, cursor);

        let visible_items: Vec<ListItem> = view.rows[start..end]
            .iter()
            .enumerate()
            .map(|(offset, name)| {
                let row = start + offset;
                if view.highlighted == Some(row) {
                    ListItem::new(format!("▶ {}", name))
                        .style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    ListItem::new(format!("  {}", name))
                }
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" playlist "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(cursor_in_window));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    // Input popup for folder/file imports
    if let Some(input) = prompt {
        let popup_area = centered_rect_sized(60, 3, chunks[2]);
        frame.render_widget(Clear, popup_area);
        let prompt_par = Paragraph::new(input).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" add path (enter confirms, esc cancels) "),
        );
        frame.render_widget(prompt_par, popup_area);
    }

    // Progress gauge
    {
        let total = view.progress_total;
        let value = view.progress_value.min(total);
        let ratio = if total.is_zero() {
            0.0
        } else {
            (value.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
        };
        let label = format!("{} / {}", format_mmss(value), format_mmss(total));
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" position "))
            .ratio(ratio)
            .label(label);
        frame.render_widget(gauge, chunks[3]);
    }

    // Controls footer
    let footer = Paragraph::new(controls_text(controls_settings.seek_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mmss_pads_minutes_and_seconds() {
        assert_eq!(format_mmss(Duration::from_secs(0)), "00:00");
        assert_eq!(format_mmss(Duration::from_secs(65)), "01:05");
        assert_eq!(format_mmss(Duration::from_secs(600)), "10:00");
    }

    #[test]
    fn visible_window_keeps_short_lists_whole() {
        assert_eq!(visible_window(3, 10, 2), (0, 3, 2));
        assert_eq!(visible_window(0, 10, 0), (0, 0, 0));
    }

    #[test]
    fn visible_window_centers_the_cursor() {
        let (start, end, pos) = visible_window(100, 10, 50);
        assert_eq!(end - start, 10);
        assert_eq!(start + pos, 50);
        assert_eq!(pos, 5);
    }

    #[test]
    fn visible_window_clamps_at_the_end() {
        let (start, end, pos) = visible_window(100, 10, 99);
        assert_eq!((start, end), (90, 100));
        assert_eq!(pos, 9);
    }

    #[test]
    fn view_updates_track_state() {
        let mut v = TuiView::new();
        v.render_playlist(&["a".to_string(), "b".to_string()]);
        v.set_highlighted(Some(1));
        v.set_status("Playing: b");
        v.set_progress_range(Duration::from_secs(120));
        v.set_progress_value(Duration::from_secs(30));

        assert_eq!(v.rows.len(), 2);
        assert_eq!(v.highlighted, Some(1));
        assert_eq!(v.status, "Playing: b");
        assert_eq!(v.progress_total, Duration::from_secs(120));
        assert_eq!(v.progress_value, Duration::from_secs(30));
    }
}
