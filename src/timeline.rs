/*!
 * Editable lyric timeline.
 *
 * The timeline owns its lines and is the only way to add, remove or move
 * them, so the ordering invariants cannot be bypassed:
 * - lines are sorted by time after every mutation
 * - `retime` keeps at least [`MIN_GAP`] between a line and its neighbours
 *
 * `insert` may leave two lines on the same time for a moment; the editor is
 * expected to re-time the new line right after. Mutations are not atomic
 * with respect to each other, so a multi-threaded host should wrap the
 * whole timeline in one lock (see [`SharedTimeline`]).
 */

use std::sync::Arc;

use log::{debug, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::errors::TimelineError;
use crate::export::{self, ExportFormat, ExportOptions};
use crate::locator;
use crate::lyrics_parser;
use crate::model::{EditableLine, LineId, LyricLine, Timed};
use crate::tag_tokenizer;
use crate::time_format;

/// Minimum separation enforced between neighbouring lines, in seconds
pub const MIN_GAP: f64 = time_format::CENTISECOND;

/// Timeline guarded by a single exclusive lock
pub type SharedTimeline = Arc<Mutex<Timeline>>;

/// Step size class for keyboard nudges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// ±0.01s
    Fine,
    /// ±0.1s
    Normal,
    /// ±1s
    Coarse,
}

impl Precision {
    // @returns: Step in seconds
    pub fn step(&self) -> f64 {
        match self {
            Self::Fine => 0.01,
            Self::Normal => 0.1,
            Self::Coarse => 1.0,
        }
    }
}

/// Nudge direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustDirection {
    /// Towards the start of the track
    Earlier,
    /// Towards the end of the track
    Later,
}

impl AdjustDirection {
    fn sign(&self) -> f64 {
        match self {
            Self::Earlier => -1.0,
            Self::Later => 1.0,
        }
    }
}

/// What `retime` did with the requested time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetimeOutcome {
    /// Placed exactly at the requested time (centisecond-rounded)
    Moved(f64),
    /// Placed at the closest time the neighbours allow
    Clamped(f64),
    /// Neighbours leave no room; the previous time was kept
    Unchanged(f64),
}

impl RetimeOutcome {
    /// Time the line ended up at
    pub fn time(&self) -> f64 {
        match self {
            Self::Moved(t) | Self::Clamped(t) | Self::Unchanged(t) => *t,
        }
    }
}

/// Time-ordered collection of editable lyric lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<EditableLine>", into = "Vec<EditableLine>")]
pub struct Timeline {
    lines: Vec<EditableLine>,
}

impl Timeline {
    /// Empty timeline (a track with no lyrics)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from parsed lines, spreading out equal timestamps
    pub fn from_lines(lines: Vec<LyricLine>) -> Self {
        Self::from(lines.into_iter().map(EditableLine::from_line).collect::<Vec<_>>())
    }

    /// Parse a tagged LRC document into a timeline
    pub fn parse(document: &str) -> Self {
        Self::from_lines(lyrics_parser::parse(document))
    }

    /// Wrap in a lock for embedding in a multi-threaded host
    pub fn into_shared(self) -> SharedTimeline {
        Arc::new(Mutex::new(self))
    }

    /// Lines in time order
    pub fn lines(&self) -> &[EditableLine] {
        &self.lines
    }

    /// Plain lyric lines in time order
    pub fn lyric_lines(&self) -> impl Iterator<Item = &LyricLine> {
        self.lines.iter().map(|l| &l.line)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a line by id
    pub fn get(&self, id: &LineId) -> Option<&EditableLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Index of a line by id
    pub fn position(&self, id: &LineId) -> Option<usize> {
        self.lines.iter().position(|l| &l.id == id)
    }

    fn require(&self, id: &LineId) -> Result<usize, TimelineError> {
        self.position(id)
            .ok_or_else(|| TimelineError::LineNotFound(id.to_string()))
    }

    /// Insert a line at its sorted position and make it the only selection.
    ///
    /// The time is snapped to the centisecond grid. A line landing on an
    /// existing time is accepted here; `retime` resolves it.
    pub fn insert(&mut self, mut line: EditableLine) -> LineId {
        let time = time_format::round_to_centis(line.line.time);
        if time != line.line.time {
            line.line.set_time(time);
        }

        let index = self.lines.partition_point(|l| l.time() <= time);
        if index > 0 && time_format::to_centis(self.lines[index - 1].time()) == time_format::to_centis(time) {
            debug!("Inserted line collides with an existing line at {}", time_format::format(time));
        }

        for existing in &mut self.lines {
            existing.selected = false;
        }
        line.selected = true;

        let id = line.id.clone();
        self.lines.insert(index, line);
        id
    }

    /// Insert a new draft line at the playback position
    pub fn insert_at(&mut self, time: f64, raw_text: &str) -> LineId {
        self.insert(EditableLine::draft(time, raw_text))
    }

    /// Move a line to `requested_time`, kept strictly between its neighbours.
    ///
    /// The allowed range is `[prev + 0.01, next - 0.01]` (from 0 when there is
    /// no previous line, unbounded when there is no next line). When that
    /// range is empty the line keeps its time.
    pub fn retime(&mut self, id: &LineId, requested_time: f64) -> Result<RetimeOutcome, TimelineError> {
        let index = self.require(id)?;
        let current = self.lines[index].time();

        if !requested_time.is_finite() {
            warn!("Ignoring non-finite time for line {}", id);
            return Ok(RetimeOutcome::Unchanged(current));
        }

        let lower = index
            .checked_sub(1)
            .map_or(0, |prev| time_format::to_centis(self.lines[prev].time()).saturating_add(1));
        let upper = match self.lines.get(index + 1) {
            Some(next) => match time_format::to_centis(next.time()).checked_sub(1) {
                Some(bound) => bound,
                None => {
                    debug!("No room before next line for {}", id);
                    return Ok(RetimeOutcome::Unchanged(current));
                }
            },
            None => u64::MAX,
        };

        if lower > upper {
            debug!(
                "Cannot place line {} between neighbours, keeping {}",
                id,
                time_format::format(current)
            );
            return Ok(RetimeOutcome::Unchanged(current));
        }

        let requested = time_format::to_centis(requested_time);
        let target = requested.clamp(lower, upper);
        let time = target as f64 / 100.0;

        self.lines[index].line.set_time(time);
        self.sort();

        if target != requested || requested_time < 0.0 {
            Ok(RetimeOutcome::Clamped(time))
        } else {
            Ok(RetimeOutcome::Moved(time))
        }
    }

    /// Re-time from user-typed text such as `01:07.40`.
    ///
    /// Unparseable input keeps the previous time and returns the error.
    pub fn retime_from_text(&mut self, id: &LineId, text: &str) -> Result<RetimeOutcome, TimelineError> {
        self.require(id)?;
        let time = time_format::parse(text).map_err(|e| {
            warn!("Keeping previous time for line {}: {}", id, e);
            TimelineError::InvalidTime(e)
        })?;
        self.retime(id, time)
    }

    /// Nudge one line by a precision step
    pub fn relative_adjust(
        &mut self,
        id: &LineId,
        direction: AdjustDirection,
        precision: Precision,
    ) -> Result<RetimeOutcome, TimelineError> {
        let index = self.require(id)?;
        let requested = self.lines[index].time() + direction.sign() * precision.step();
        self.retime(id, requested)
    }

    /// Nudge the selected line; `None` when nothing is selected
    pub fn adjust_selected(&mut self, direction: AdjustDirection, precision: Precision) -> Option<RetimeOutcome> {
        let id = self.selected()?.id.clone();
        self.relative_adjust(&id, direction, precision).ok()
    }

    /// Shift every selected line by `delta` seconds, each through `retime`.
    ///
    /// Lines are processed from the leading edge of the move (latest first
    /// when moving later) so a selected block shifts together. Returns how
    /// many lines actually moved.
    pub fn batch_adjust(&mut self, delta: f64) -> usize {
        let mut targets: Vec<(LineId, f64)> = self
            .lines
            .iter()
            .filter(|l| l.selected)
            .map(|l| (l.id.clone(), l.time()))
            .collect();

        if delta > 0.0 {
            targets.reverse();
        }

        let mut moved = 0;
        for (id, original) in targets {
            if let Ok(outcome) = self.retime(&id, original + delta) {
                if time_format::to_centis(outcome.time()) != time_format::to_centis(original) {
                    moved += 1;
                }
            }
        }

        debug!("Batch adjust by {:+.2}s moved {} line(s)", delta, moved);
        moved
    }

    /// Remove a line; the others keep their times
    pub fn delete(&mut self, id: &LineId) -> Result<EditableLine, TimelineError> {
        let index = self.require(id)?;
        Ok(self.lines.remove(index))
    }

    /// Remove the selected line, if any
    pub fn delete_selected(&mut self) -> Option<EditableLine> {
        let index = self.lines.iter().position(|l| l.selected)?;
        Some(self.lines.remove(index))
    }

    /// Replace a line's text from raw tagged input and confirm the draft
    pub fn set_text(&mut self, id: &LineId, raw_text: &str) -> Result<(), TimelineError> {
        let index = self.require(id)?;
        let line = &mut self.lines[index];
        line.line.set_segments(tag_tokenizer::tokenize(raw_text));
        line.draft = false;
        Ok(())
    }

    /// Select exactly one line
    pub fn select(&mut self, id: &LineId) -> Result<(), TimelineError> {
        let index = self.require(id)?;
        self.select_index(index);
        Ok(())
    }

    /// Mark or unmark a line without touching the others (batch pre-marking)
    pub fn set_selected(&mut self, id: &LineId, selected: bool) -> Result<(), TimelineError> {
        let index = self.require(id)?;
        self.lines[index].selected = selected;
        Ok(())
    }

    pub fn select_all(&mut self) {
        for line in &mut self.lines {
            line.selected = true;
        }
    }

    pub fn clear_selection(&mut self) {
        for line in &mut self.lines {
            line.selected = false;
        }
    }

    /// Move the cursor one line later; no-op at the end or without a selection
    pub fn select_next(&mut self) -> bool {
        match self.lines.iter().position(|l| l.selected) {
            Some(index) if index + 1 < self.lines.len() => {
                self.select_index(index + 1);
                true
            }
            _ => false,
        }
    }

    /// Move the cursor one line earlier; no-op at the start or without a selection
    pub fn select_previous(&mut self) -> bool {
        match self.lines.iter().position(|l| l.selected) {
            Some(index) if index > 0 => {
                self.select_index(index - 1);
                true
            }
            _ => false,
        }
    }

    fn select_index(&mut self, index: usize) {
        for (i, line) in self.lines.iter_mut().enumerate() {
            line.selected = i == index;
        }
    }

    /// First selected line
    pub fn selected(&self) -> Option<&EditableLine> {
        self.lines.iter().find(|l| l.selected)
    }

    /// Ids of all selected lines in time order
    pub fn selected_ids(&self) -> Vec<LineId> {
        self.lines
            .iter()
            .filter(|l| l.selected)
            .map(|l| l.id.clone())
            .collect()
    }

    /// Adjacent pairs sharing the same time
    pub fn collisions(&self) -> Vec<(LineId, LineId)> {
        self.lines
            .windows(2)
            .filter(|pair| time_format::to_centis(pair[0].time()) == time_format::to_centis(pair[1].time()))
            .map(|pair| (pair[0].id.clone(), pair[1].id.clone()))
            .collect()
    }

    /// Whether times are strictly increasing
    pub fn is_strictly_increasing(&self) -> bool {
        self.lines.windows(2).all(|pair| pair[0].time() < pair[1].time())
    }

    /// Index of the line active at a playback position
    pub fn active_index(&self, time: f64) -> Option<usize> {
        locator::active_index(&self.lines, time)
    }

    /// Line active at a playback position
    pub fn active_line(&self, time: f64) -> Option<&EditableLine> {
        self.active_index(time).map(|index| &self.lines[index])
    }

    /// Render a snapshot of the timeline
    pub fn export(&self, format: ExportFormat, options: &ExportOptions) -> String {
        export::export(self.lyric_lines(), format, options)
    }

    fn sort(&mut self) {
        self.lines.sort_by(|a, b| a.time().total_cmp(&b.time()));
    }
}

impl From<Vec<EditableLine>> for Timeline {
    /// Sorts the lines and pushes later duplicates forward so times are unique
    fn from(mut lines: Vec<EditableLine>) -> Self {
        lines.sort_by(|a, b| a.time().total_cmp(&b.time()));

        let mut previous: Option<u64> = None;
        for line in &mut lines {
            let mut centis = time_format::to_centis(line.time());
            if let Some(prev) = previous {
                if centis <= prev {
                    centis = prev.saturating_add(1);
                    warn!(
                        "Duplicate timestamp {} moved to {}",
                        line.line.original_time,
                        time_format::format_tag(centis as f64 / 100.0)
                    );
                    line.line.set_time(centis as f64 / 100.0);
                }
            }
            if line.time() != centis as f64 / 100.0 {
                line.line.set_time(centis as f64 / 100.0);
            }
            previous = Some(centis);
        }

        Self { lines }
    }
}

impl From<Timeline> for Vec<EditableLine> {
    fn from(timeline: Timeline) -> Self {
        timeline.lines
    }
}
