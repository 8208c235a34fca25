/// Lightbox navigation engine
///
/// Two states: `Closed` and `Open { gallery, index }`. Every input binding
/// (keys, swipes, buttons, backdrop clicks) goes through `open`, `close`,
/// `next` and `previous`; nothing else mutates the state.
use std::sync::Arc;

use super::data::{Gallery, GalleryId, GalleryItem};
use super::gallery::GalleryIndex;

/// Minimum horizontal swipe distance (px) that counts as navigation
pub const SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Default)]
pub enum LightboxState {
    #[default]
    Closed,
    Open { gallery: Arc<Gallery>, index: usize },
}

/// Keys the lightbox reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Escape,
    ArrowRight,
    ArrowLeft,
}

/// Raw input routed to the lightbox
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightboxInput {
    Key(LightboxKey),
    TouchStart(f32),
    TouchEnd(f32),
    CloseClicked,
    BackdropClicked,
    /// Click on the overlay background outside the content area
    BackgroundClicked,
    NextClicked,
    PreviousClicked,
}

/// What the overlay shows after the last render
#[derive(Debug, Clone, PartialEq)]
pub struct LightboxFrame {
    pub gallery: GalleryId,
    pub item: GalleryItem,
    pub index: usize,
    pub count: usize,
    /// Next/previous controls are hidden for galleries of one item or less
    pub nav_visible: bool,
}

impl LightboxFrame {
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.index + 1, self.count)
    }
}

#[derive(Debug, Default)]
pub struct LightboxController {
    state: LightboxState,
    frame: Option<LightboxFrame>,
    page_scroll_locked: bool,
    scroll_reset_pending: bool,
    touch_start_x: Option<f32>,
}

impl LightboxController {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> &LightboxState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, LightboxState::Open { .. })
    }

    #[cfg(test)]
    pub fn current_index(&self) -> Option<usize> {
        match &self.state {
            LightboxState::Open { index, .. } => Some(*index),
            LightboxState::Closed => None,
        }
    }

    pub fn current_item(&self) -> Option<&GalleryItem> {
        match &self.state {
            LightboxState::Open { gallery, index } => gallery.get(*index),
            LightboxState::Closed => None,
        }
    }

    /// Render model for the overlay, `None` while closed
    pub fn frame(&self) -> Option<&LightboxFrame> {
        self.frame.as_ref()
    }

    /// True while the overlay is up and the page underneath must not scroll
    pub fn page_scroll_locked(&self) -> bool {
        self.page_scroll_locked
    }

    /// Consume the request to scroll the overlay back to its top
    pub fn take_scroll_reset(&mut self) -> bool {
        std::mem::take(&mut self.scroll_reset_pending)
    }

    /// Open `id` at `index`. Unknown galleries and out-of-range indices are ignored.
    pub fn open(&mut self, galleries: &GalleryIndex, id: GalleryId, index: usize) -> bool {
        self.open_gallery(galleries.get(id), index)
    }

    /// Open a specific gallery snapshot
    pub fn open_gallery(&mut self, gallery: Arc<Gallery>, index: usize) -> bool {
        if index >= gallery.len() {
            tracing::debug!(
                "Ignoring lightbox open for '{}' at {} ({} items)",
                gallery.id,
                index,
                gallery.len()
            );
            return false;
        }

        tracing::debug!("🔍 Lightbox open: '{}' #{}", gallery.id, index);
        self.state = LightboxState::Open { gallery, index };
        self.page_scroll_locked = true;
        self.scroll_reset_pending = true;
        self.render();
        true
    }

    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }

        tracing::debug!("Lightbox closed");
        self.state = LightboxState::Closed;
        self.frame = None;
        self.page_scroll_locked = false;
        self.scroll_reset_pending = false;
        self.touch_start_x = None;
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn previous(&mut self) {
        self.step(-1);
    }

    /// Move by `delta` with wraparound at both ends
    fn step(&mut self, delta: isize) {
        let LightboxState::Open { gallery, index } = &mut self.state else {
            return;
        };

        let len = gallery.len();
        if len <= 1 {
            return;
        }

        *index = (*index as isize + delta).rem_euclid(len as isize) as usize;
        self.render();
    }

    fn render(&mut self) {
        self.frame = match &self.state {
            LightboxState::Open { gallery, index } => {
                gallery.get(*index).map(|item| LightboxFrame {
                    gallery: gallery.id,
                    item: item.clone(),
                    index: *index,
                    count: gallery.len(),
                    nav_visible: gallery.len() > 1,
                })
            }
            LightboxState::Closed => None,
        };
    }

    /// Translate raw input into lightbox operations
    pub fn handle_input(&mut self, input: LightboxInput) {
        if !self.is_open() {
            return;
        }

        match input {
            LightboxInput::Key(LightboxKey::Escape) => self.close(),
            LightboxInput::Key(LightboxKey::ArrowRight) => self.next(),
            LightboxInput::Key(LightboxKey::ArrowLeft) => self.previous(),
            LightboxInput::TouchStart(x) => self.touch_start_x = Some(x),
            LightboxInput::TouchEnd(x) => {
                if let Some(start) = self.touch_start_x.take() {
                    let diff = start - x;
                    if diff.abs() > SWIPE_THRESHOLD {
                        if diff > 0.0 {
                            self.next();
                        } else {
                            self.previous();
                        }
                    }
                }
            }
            LightboxInput::CloseClicked
            | LightboxInput::BackdropClicked
            | LightboxInput::BackgroundClicked => self.close(),
            LightboxInput::NextClicked => self.next(),
            LightboxInput::PreviousClicked => self.previous(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::captions::CaptionTables;
    use crate::state::data::MediaRef;
    use crate::state::gallery::build_gallery;
    use std::path::PathBuf;

    fn index_with(id: GalleryId, count: usize) -> GalleryIndex {
        let media = (0..count)
            .map(|i| MediaRef::Path(PathBuf::from(format!("{}-{}.jpg", id, i))))
            .collect();
        let tables = CaptionTables::default();
        let mut index = GalleryIndex::new();
        index.insert(build_gallery(id, media, tables.for_gallery(id)));
        index
    }

    #[test]
    fn test_next_wraps_back_to_start() {
        let galleries = index_with(GalleryId::Projects, 5);
        let mut lightbox = LightboxController::new();

        assert!(lightbox.open(&galleries, GalleryId::Projects, 2));
        for _ in 0..5 {
            lightbox.next();
        }
        assert_eq!(lightbox.current_index(), Some(2));
    }

    #[test]
    fn test_previous_from_first_wraps_to_last() {
        let galleries = index_with(GalleryId::Projects, 4);
        let mut lightbox = LightboxController::new();

        lightbox.open(&galleries, GalleryId::Projects, 0);
        lightbox.previous();
        assert_eq!(lightbox.current_index(), Some(3));
    }

    #[test]
    fn test_singleton_and_empty_never_move() {
        let galleries = index_with(GalleryId::Pages, 1);
        let mut lightbox = LightboxController::new();

        lightbox.open(&galleries, GalleryId::Pages, 0);
        lightbox.next();
        lightbox.previous();
        assert_eq!(lightbox.current_index(), Some(0));
        assert!(!lightbox.frame().unwrap().nav_visible);

        // Empty gallery: open is refused and navigation stays a no-op
        let mut lightbox = LightboxController::new();
        assert!(!lightbox.open(&galleries, GalleryId::Covers, 0));
        lightbox.next();
        lightbox.previous();
        assert!(!lightbox.is_open());
    }

    #[test]
    fn test_out_of_range_open_is_ignored() {
        let galleries = index_with(GalleryId::Covers, 3);
        let mut lightbox = LightboxController::new();

        assert!(!lightbox.open(&galleries, GalleryId::Covers, 3));
        assert!(!lightbox.is_open());
        assert!(!lightbox.page_scroll_locked());
    }

    #[test]
    fn test_close_is_idempotent_and_reopen_uses_new_index() {
        let galleries = index_with(GalleryId::Covers, 7);
        let mut lightbox = LightboxController::new();

        lightbox.open(&galleries, GalleryId::Covers, 5);
        lightbox.close();
        assert!(matches!(lightbox.state(), LightboxState::Closed));
        lightbox.close();
        assert!(matches!(lightbox.state(), LightboxState::Closed));
        assert!(!lightbox.page_scroll_locked());

        lightbox.open(&galleries, GalleryId::Covers, 1);
        assert_eq!(lightbox.current_index(), Some(1));
        assert_eq!(lightbox.frame().unwrap().index, 1);
    }

    #[test]
    fn test_covers_previous_from_first_shows_last_issue() {
        let galleries = index_with(GalleryId::Covers, 7);
        let mut lightbox = LightboxController::new();

        lightbox.open(&galleries, GalleryId::Covers, 0);
        lightbox.previous();

        let frame = lightbox.frame().unwrap();
        assert_eq!(frame.index, 6);
        assert_eq!(frame.item.caption.title, "Envoy Magazine — Issue 07 Cover");
        assert_eq!(frame.position_label(), "7 / 7");
        assert!(frame.nav_visible);
    }

    #[test]
    fn test_open_locks_scroll_and_requests_reset() {
        let galleries = index_with(GalleryId::Projects, 2);
        let mut lightbox = LightboxController::new();

        lightbox.open(&galleries, GalleryId::Projects, 0);
        assert!(lightbox.page_scroll_locked());
        assert!(lightbox.take_scroll_reset());
        assert!(!lightbox.take_scroll_reset());
    }

    #[test]
    fn test_keys_only_act_while_open() {
        let galleries = index_with(GalleryId::Projects, 3);
        let mut lightbox = LightboxController::new();

        lightbox.handle_input(LightboxInput::Key(LightboxKey::ArrowRight));
        assert!(!lightbox.is_open());

        lightbox.open(&galleries, GalleryId::Projects, 0);
        lightbox.handle_input(LightboxInput::Key(LightboxKey::ArrowRight));
        assert_eq!(lightbox.current_index(), Some(1));
        lightbox.handle_input(LightboxInput::Key(LightboxKey::ArrowLeft));
        lightbox.handle_input(LightboxInput::Key(LightboxKey::ArrowLeft));
        assert_eq!(lightbox.current_index(), Some(2));
        lightbox.handle_input(LightboxInput::Key(LightboxKey::Escape));
        assert!(!lightbox.is_open());
    }

    #[test]
    fn test_swipe_threshold() {
        let galleries = index_with(GalleryId::Projects, 3);
        let mut lightbox = LightboxController::new();
        lightbox.open(&galleries, GalleryId::Projects, 1);

        // Short movement is a tap, not a swipe
        lightbox.handle_input(LightboxInput::TouchStart(200.0));
        lightbox.handle_input(LightboxInput::TouchEnd(160.0));
        assert_eq!(lightbox.current_index(), Some(1));

        // Leftward swipe goes forward
        lightbox.handle_input(LightboxInput::TouchStart(200.0));
        lightbox.handle_input(LightboxInput::TouchEnd(120.0));
        assert_eq!(lightbox.current_index(), Some(2));

        // Rightward swipe goes back
        lightbox.handle_input(LightboxInput::TouchStart(100.0));
        lightbox.handle_input(LightboxInput::TouchEnd(180.0));
        assert_eq!(lightbox.current_index(), Some(1));
    }

    #[test]
    fn test_background_and_backdrop_clicks_close() {
        let galleries = index_with(GalleryId::Pages, 2);

        for input in [
            LightboxInput::CloseClicked,
            LightboxInput::BackdropClicked,
            LightboxInput::BackgroundClicked,
        ] {
            let mut lightbox = LightboxController::new();
            lightbox.open(&galleries, GalleryId::Pages, 0);
            lightbox.handle_input(input);
            assert!(!lightbox.is_open());
        }
    }

    #[test]
    fn test_open_keeps_snapshot_across_rebuild() {
        let mut galleries = index_with(GalleryId::Projects, 3);
        let mut lightbox = LightboxController::new();
        lightbox.open(&galleries, GalleryId::Projects, 2);

        galleries.rebuild_projects_gallery(&[]);
        lightbox.next();

        assert_eq!(lightbox.current_index(), Some(0));
        assert_eq!(lightbox.frame().unwrap().count, 3);
    }
}
