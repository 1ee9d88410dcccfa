/*!
 * Active line lookup for a playback position.
 *
 * Called on every playback-position update, so lookups are binary searches
 * over time-sorted lines and never mutate anything.
 */

use crate::model::Timed;

/// Index of the line active at `time`.
///
/// That is the greatest index whose time is `<= time`, or `None` when
/// `time` precedes the first line or there are no lines. `lines` must be
/// sorted by time.
pub fn active_index<T: Timed>(lines: &[T], time: f64) -> Option<usize> {
    lines
        .partition_point(|line| line.time() <= time)
        .checked_sub(1)
}

/// A line shown around the active one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleLine {
    /// Index into the timeline
    pub index: usize,
    /// Whether this is the active line
    pub is_current: bool,
}

/// The active line with surrounding context
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LyricsContext {
    /// Active line index, if any
    pub current_index: Option<usize>,
    /// Lines to display, in order
    pub visible: Vec<VisibleLine>,
}

/// Active line plus up to `context_lines` neighbours on each side.
///
/// Before the first line the window is anchored at the start with no
/// current line.
pub fn context_window<T: Timed>(lines: &[T], time: f64, context_lines: usize) -> LyricsContext {
    if lines.is_empty() {
        return LyricsContext::default();
    }

    let current_index = active_index(lines, time);
    let anchor = current_index.unwrap_or(0);
    let start = anchor.saturating_sub(context_lines);
    let end = anchor.saturating_add(context_lines).min(lines.len() - 1);

    let visible = (start..=end)
        .map(|index| VisibleLine {
            index,
            is_current: Some(index) == current_index,
        })
        .collect();

    LyricsContext {
        current_index,
        visible,
    }
}
