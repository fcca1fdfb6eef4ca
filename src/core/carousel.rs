//! Carousel: infinite-loop sliding state machine
//!
//! The working buffer is the real slides with `visible_count` clones on each
//! side. Clones are never materialised: buffer position `p` shows real slide
//! `(p + n - v) mod n`, so only the logical index moves.
//!
//! Move cycle:
//! - move: index ± 1, transition on, `animating` set
//! - transition end on a clone: silent jump to the mirrored real position,
//!   transition off, still `animating`
//! - next tick: transition back on, `animating` cleared
//!
//! Static mode (`n <= visible_count`): no clones, offset 0, moves refused.

use tracing::{debug, warn};

use crate::types::{
    CarouselMarkup, CarouselState, Direction, ElementId, InitError, Millis, ReasonCode, Slide,
    TrackStyle, ViewHost,
};

/// Width → visible slide count
pub type VisibleCountFn = Box<dyn Fn(u32) -> usize>;

pub struct CarouselController {
    /// Real slides in order
    slides: Vec<ElementId>,
    track: ElementId,
    visible_fn: VisibleCountFn,
    state: CarouselState,
    slide_width: f64,
    transition_enabled: bool,
    /// Re-enable transitions (and clear `animating`) on the next tick
    restore_pending: bool,
    resize_deadline: Option<Millis>,
    debounce_ms: u64,
}

impl std::fmt::Debug for CarouselController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselController")
            .field("slides", &self.slides.len())
            .field("track", &self.track)
            .field("state", &self.state)
            .field("slide_width", &self.slide_width)
            .field("transition_enabled", &self.transition_enabled)
            .field("restore_pending", &self.restore_pending)
            .field("resize_deadline", &self.resize_deadline)
            .finish()
    }
}

impl CarouselController {
    /// Mount on the given markup
    ///
    /// Returns `Ok(None)` when the track, either control, or every slide is
    /// missing.
    ///
    /// The track starts parked past the leading clones with transitions off,
    /// the same state a silent jump or rebuild leaves. The first paint must
    /// not animate in from offset 0; the first `tick` turns transitions on
    /// and reports `C106`.
    pub fn initialize(
        markup: &CarouselMarkup,
        visible_fn: VisibleCountFn,
        debounce_ms: u64,
        host: &impl ViewHost,
    ) -> Result<Option<Self>, InitError> {
        let (Some(track), Some(_), Some(_)) = (markup.track, markup.next, markup.prev) else {
            debug!("carousel markup incomplete, skipping");
            return Ok(None);
        };
        if markup.slides.is_empty() {
            debug!("carousel has no slides, skipping");
            return Ok(None);
        }

        let width = host.viewport_width();
        let visible_count = visible_fn(width);
        if visible_count == 0 {
            return Err(InitError::ZeroVisibleCount { width });
        }

        let mut carousel = Self {
            slides: markup.slides.clone(),
            track,
            visible_fn,
            state: CarouselState {
                logical_index: 0,
                visible_count,
                animating: false,
            },
            slide_width: host.slide_width(),
            transition_enabled: false,
            restore_pending: true,
            resize_deadline: None,
            debounce_ms,
        };
        carousel.state.logical_index = carousel.clones();
        debug!(
            slides = carousel.slides.len(),
            visible_count, "carousel initialised"
        );
        Ok(Some(carousel))
    }

    pub fn move_next(&mut self) -> ReasonCode {
        self.start_move(Direction::Next)
    }

    pub fn move_previous(&mut self) -> ReasonCode {
        self.start_move(Direction::Previous)
    }

    fn start_move(&mut self, direction: Direction) -> ReasonCode {
        if self.is_static() {
            return ReasonCode::C103_STATIC_NO_WRAP;
        }
        if self.state.animating {
            return ReasonCode::C102_MOVE_REJECTED_ANIMATING;
        }
        match direction {
            Direction::Next => self.state.logical_index += 1,
            Direction::Previous => self.state.logical_index -= 1,
        }
        self.state.animating = true;
        self.transition_enabled = true;
        self.restore_pending = false;
        ReasonCode::C101_MOVE_STARTED
    }

    /// Track transition finished
    ///
    /// `None` when no move is waiting on it (stale or duplicate event).
    pub fn on_transition_end(&mut self) -> Option<ReasonCode> {
        if !self.state.animating || self.restore_pending {
            return None;
        }
        let n = self.slides.len();
        let v = self.clones();
        let index = self.state.logical_index;

        if index >= n + v {
            self.state.logical_index = index - n;
        } else if index < v {
            self.state.logical_index = index + n;
        } else {
            self.state.animating = false;
            return Some(ReasonCode::C104_TRANSITION_SETTLED);
        }

        // Reapply at the mirrored position with transitions off; they come
        // back on the next tick.
        self.transition_enabled = false;
        self.restore_pending = true;
        Some(ReasonCode::C105_SILENT_JUMP)
    }

    /// Viewport resized; rebuild after the debounce window
    pub fn on_resize(&mut self, now: Millis) -> ReasonCode {
        self.resize_deadline = Some(now + self.debounce_ms);
        ReasonCode::C107_RESIZE_DEBOUNCED
    }

    /// Advance timers: restore transitions, then fire a due resize
    pub fn tick(&mut self, now: Millis, host: &impl ViewHost) -> Vec<ReasonCode> {
        let mut reasons = Vec::new();

        if self.restore_pending {
            self.restore_pending = false;
            self.transition_enabled = true;
            self.state.animating = false;
            reasons.push(ReasonCode::C106_TRANSITIONS_RESTORED);
        }

        if self.resize_deadline.is_some_and(|deadline| now >= deadline) {
            self.rebuild(host);
            reasons.push(ReasonCode::C108_BUFFER_REBUILT);
        }

        reasons
    }

    /// Recompute visible count and the clone buffer, keeping the first
    /// visible real slide in place
    fn rebuild(&mut self, host: &impl ViewHost) {
        self.resize_deadline = None;
        let first_visible = self.real_at(self.state.logical_index);

        let width = host.viewport_width();
        let visible_count = (self.visible_fn)(width);
        if visible_count == 0 {
            warn!(width, "visible-count function returned 0, keeping previous");
        } else {
            self.state.visible_count = visible_count;
        }
        self.slide_width = host.slide_width();

        self.state.logical_index = if self.is_static() {
            0
        } else {
            first_visible + self.clones()
        };
        self.state.animating = false;
        self.transition_enabled = false;
        self.restore_pending = true;
        debug!(
            visible_count = self.state.visible_count,
            logical_index = self.state.logical_index,
            "carousel rebuilt"
        );
    }

    /// Fewer (or as many) slides than visible positions
    pub fn is_static(&self) -> bool {
        self.slides.len() <= self.state.visible_count
    }

    /// Clones on each side of the real slides
    fn clones(&self) -> usize {
        if self.is_static() {
            0
        } else {
            self.state.visible_count
        }
    }

    /// Real slide shown at a buffer position
    fn real_at(&self, position: usize) -> usize {
        let n = self.slides.len();
        (position + n - self.clones()) % n
    }

    /// Working buffer as real slide indices, clones included
    pub fn buffer(&self) -> Vec<usize> {
        let len = self.slides.len() + 2 * self.clones();
        (0..len).map(|p| self.real_at(p)).collect()
    }

    /// Real indices of the current slides, left to right
    pub fn visible_slides(&self) -> Vec<usize> {
        let count = self.state.visible_count.min(self.slides.len());
        (0..count)
            .map(|k| self.real_at(self.state.logical_index + k))
            .collect()
    }

    /// Real slides with their derived `visible` flag
    pub fn slides(&self) -> Vec<Slide> {
        let visible = self.visible_slides();
        self.slides
            .iter()
            .enumerate()
            .map(|(index, &element)| Slide {
                index,
                element,
                visible: visible.contains(&index),
            })
            .collect()
    }

    pub fn track_style(&self) -> TrackStyle {
        TrackStyle {
            offset_px: -(self.state.logical_index as f64) * self.slide_width,
            transition_enabled: self.transition_enabled,
        }
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn track(&self) -> ElementId {
        self.track
    }

    pub fn resize_pending(&self) -> bool {
        self.resize_deadline.is_some()
    }
}

// =============================================================================
// TESTS
// =============================================================================
