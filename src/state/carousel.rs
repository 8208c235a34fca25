/// Cover carousel controller
///
/// Keeps one slide centered in the viewport and supports discrete
/// navigation (buttons, dots, clicks) and continuous drag gestures.
/// Unlike the lightbox, the carousel never wraps: the first and last
/// slides are hard boundaries.
use std::time::Duration;

use super::schedule::{Scheduler, TaskKind, Ticket, DRAG_CLEANUP_DELAY, RESIZE_DEBOUNCE};

/// Pointer movement (px) below which a press is still a click
pub const DRAG_JITTER_THRESHOLD: f32 = 5.0;

/// Fraction of a slide width a drag must cover to change slides
pub const DRAG_ADVANCE_FRACTION: f32 = 0.25;

/// Length of the animated slide transition
pub const TRANSITION_DURATION: Duration = Duration::from_millis(500);

/// Outcome of clicking a slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideClick {
    /// The centered slide was clicked; open it in the lightbox
    Open(usize),
    /// Another slide was clicked and is now centered
    Centered(usize),
    /// The click closed a drag gesture and is ignored
    Suppressed,
}

/// An in-flight animated move of the strip
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    from: f32,
    to: f32,
    elapsed: Duration,
}

impl Transition {
    fn value(&self) -> f32 {
        let t = (self.elapsed.as_secs_f32() / TRANSITION_DURATION.as_secs_f32()).clamp(0.0, 1.0);
        // Ease-out: fast start, gentle landing
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        self.from + (self.to - self.from) * eased
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= TRANSITION_DURATION
    }
}

#[derive(Debug, Default)]
pub struct CarouselController {
    slide_count: usize,
    slide_width: f32,
    viewport_width: f32,
    laid_out: bool,

    center_index: usize,
    /// Strip translation currently in effect (px)
    translate: f32,
    transition: Option<Transition>,

    is_dragging: bool,
    has_dragged: bool,
    drag_origin_x: f32,
    drag_origin_translate: f32,

    scheduler: Scheduler,
}

impl CarouselController {
    pub fn new(slide_count: usize) -> Self {
        let mut carousel = Self::default();
        carousel.slide_count = slide_count;
        carousel
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn center_index(&self) -> usize {
        self.center_index
    }

    pub fn slide_width(&self) -> f32 {
        self.slide_width
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    #[cfg(test)]
    pub fn has_dragged(&self) -> bool {
        self.has_dragged
    }

    /// Pointer travel of the drag in progress
    #[cfg(test)]
    pub fn drag_offset(&self) -> f32 {
        if self.is_dragging {
            self.translate - self.drag_origin_translate
        } else {
            0.0
        }
    }

    /// True for exactly one slide: the centered one
    pub fn is_active(&self, index: usize) -> bool {
        self.slide_count > 0 && index == self.center_index
    }

    pub fn has_next(&self) -> bool {
        self.center_index + 1 < self.slide_count
    }

    pub fn has_previous(&self) -> bool {
        self.center_index > 0
    }

    /// Translation that puts the midpoint of `index` on the viewport midpoint
    pub fn translate_for(&self, index: usize) -> f32 {
        let slide_center = index as f32 * self.slide_width + self.slide_width / 2.0;
        self.viewport_width / 2.0 - slide_center
    }

    /// Translation to draw right now, including any running animation
    pub fn displayed_translate(&self) -> f32 {
        match &self.transition {
            Some(transition) if !self.is_dragging => transition.value(),
            _ => self.translate,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Advance a running animation; returns whether it is still running
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if let Some(transition) = &mut self.transition {
            transition.elapsed += elapsed;
            if transition.is_finished() {
                self.transition = None;
            }
        }
        self.transition.is_some()
    }

    /// Center `index`, clamped into range
    pub fn go_to_slide(&mut self, index: isize, animate: bool) {
        let last = self.slide_count.saturating_sub(1) as isize;
        let index = index.clamp(0, last) as usize;
        let from = self.displayed_translate();

        self.center_index = index;
        self.translate = self.translate_for(index);
        self.transition = if animate && (from - self.translate).abs() > f32::EPSILON {
            Some(Transition {
                from,
                to: self.translate,
                elapsed: Duration::ZERO,
            })
        } else {
            None
        };
    }

    pub fn go_next(&mut self) {
        self.go_to_slide(self.center_index as isize + 1, true);
    }

    pub fn go_previous(&mut self) {
        self.go_to_slide(self.center_index as isize - 1, true);
    }

    /// Record new viewport and slide sizes
    ///
    /// The first layout positions slide 0 immediately. Later resizes are
    /// debounced: the returned ticket must be fed back through `on_timer`.
    pub fn resize(&mut self, viewport_width: f32, slide_width: f32) -> Option<Ticket> {
        let changed = (self.viewport_width - viewport_width).abs() > f32::EPSILON
            || (self.slide_width - slide_width).abs() > f32::EPSILON;

        self.viewport_width = viewport_width;
        self.slide_width = slide_width;

        if !self.laid_out {
            self.laid_out = true;
            self.go_to_slide(0, false);
            return None;
        }

        changed.then(|| self.scheduler.schedule(TaskKind::ResizeSettle, RESIZE_DEBOUNCE))
    }

    pub fn drag_start(&mut self, pointer_x: f32) {
        self.drag_origin_translate = self.displayed_translate();
        self.translate = self.drag_origin_translate;
        self.transition = None;
        self.is_dragging = true;
        self.has_dragged = false;
        self.drag_origin_x = pointer_x;
    }

    pub fn drag_move(&mut self, pointer_x: f32) {
        if !self.is_dragging {
            return;
        }

        let delta = pointer_x - self.drag_origin_x;
        self.translate = self.drag_origin_translate + delta;

        if delta.abs() > DRAG_JITTER_THRESHOLD {
            self.has_dragged = true;
        }
    }

    /// Finish a drag; returns the ticket that later lifts click suppression
    pub fn drag_end(&mut self, pointer_x: f32) -> Option<Ticket> {
        if !self.is_dragging {
            return None;
        }
        self.is_dragging = false;

        let delta = pointer_x - self.drag_origin_x;
        if delta.abs() > DRAG_JITTER_THRESHOLD {
            self.has_dragged = true;
        }

        let threshold = self.slide_width * DRAG_ADVANCE_FRACTION;
        if delta < -threshold && self.has_next() {
            self.go_to_slide(self.center_index as isize + 1, true);
        } else if delta > threshold && self.has_previous() {
            self.go_to_slide(self.center_index as isize - 1, true);
        } else {
            self.go_to_slide(self.center_index as isize, true);
        }

        Some(self.scheduler.schedule(TaskKind::DragCleanup, DRAG_CLEANUP_DELAY))
    }

    /// Pointer left the viewport mid-drag: snap back without navigating
    pub fn drag_cancel(&mut self) {
        if !self.is_dragging {
            return;
        }

        self.is_dragging = false;
        self.has_dragged = false;
        self.scheduler.cancel(TaskKind::DragCleanup);
        self.go_to_slide(self.center_index as isize, true);
    }

    /// Centering takes priority over opening; a finished drag eats the click
    pub fn click_slide(&mut self, index: usize) -> SlideClick {
        if self.has_dragged {
            return SlideClick::Suppressed;
        }

        if index == self.center_index {
            SlideClick::Open(index)
        } else {
            self.go_to_slide(index as isize, true);
            SlideClick::Centered(self.center_index)
        }
    }

    /// A scheduled ticket completed its delay
    pub fn on_timer(&mut self, ticket: Ticket) {
        if !self.scheduler.fire(ticket) {
            return;
        }

        match ticket.kind {
            TaskKind::ResizeSettle => self.go_to_slide(self.center_index as isize, false),
            TaskKind::DragCleanup => self.has_dragged = false,
        }
    }

    /// Drop pending scheduled work
    pub fn teardown(&mut self) {
        self.scheduler.cancel_all();
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        self.teardown();
    }
}
