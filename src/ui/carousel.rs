use iced::mouse::{self, Cursor};
use iced::touch;
use iced::widget::canvas::{self, Path, Program, Stroke};
use iced::widget::{button, canvas as canvas_widget, column, row, text, Row};
use iced::{Alignment, Color, Element, Length, Point, Rectangle, Renderer, Size, Theme};
use iced::widget::image::Handle;
use std::collections::HashMap;

use crate::state::carousel::CarouselController;
use crate::state::data::{Gallery, MediaRef};
use crate::Message;

/// Horizontal gap between two covers (px)
const SLIDE_GAP: f32 = 18.0;

/// Covers are portrait magazine pages
const COVER_ASPECT: f32 = 1.33;

/// Scale applied to slides that are not centered
const SIDE_SCALE: f32 = 0.86;

/// Events from the cover strip and its controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselMessage {
    Press(f32),
    Move(f32),
    /// Pointer released; `slide` is the slide under the pointer, if any
    Release { x: f32, slide: Option<usize> },
    /// Pointer left the strip mid-drag
    Leave,
    /// The strip was laid out at a new width
    Viewport(f32),
    Next,
    Previous,
    Dot(usize),
}

/// Slide width for a given viewport width
pub fn slide_width_for(viewport_width: f32) -> f32 {
    (viewport_width * 0.28).clamp(180.0, 320.0)
}

fn strip_height(slide_width: f32) -> f32 {
    (slide_width - SLIDE_GAP) * COVER_ASPECT + 24.0
}

/// Canvas program drawing the cover strip at its current translation
pub struct CoverStrip<'a> {
    pub carousel: &'a CarouselController,
    pub gallery: &'a Gallery,
    pub thumbnails: &'a HashMap<MediaRef, Handle>,
}

impl<'a> CoverStrip<'a> {
    /// Slide under a strip-local x coordinate
    fn slide_at(&self, x: f32) -> Option<usize> {
        let width = self.carousel.slide_width();
        let offset = x - self.carousel.displayed_translate();
        if width <= 0.0 || offset < 0.0 {
            return None;
        }

        let index = (offset / width) as usize;
        (index < self.carousel.slide_count()).then_some(index)
    }
}

impl<'a> Program<Message> for CoverStrip<'a> {
    type State = DragState;

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let width = self.carousel.slide_width();
        let translate = self.carousel.displayed_translate();
        let palette = theme.extended_palette();

        for (index, item) in self.gallery.items.iter().enumerate() {
            let left = translate + index as f32 * width;

            // Skip slides entirely outside the viewport
            if left + width < 0.0 || left > bounds.width {
                continue;
            }

            let scale = if self.carousel.is_active(index) { 1.0 } else { SIDE_SCALE };
            let slide_w = (width - SLIDE_GAP) * scale;
            let slide_h = slide_w * COVER_ASPECT;
            let top_left = Point::new(
                left + (width - slide_w) / 2.0,
                (bounds.height - slide_h) / 2.0,
            );
            let rect = Rectangle::new(top_left, Size::new(slide_w, slide_h));

            match self.thumbnails.get(&item.media) {
                Some(handle) => frame.draw_image(rect, canvas::Image::new(handle.clone())),
                None => frame.fill_rectangle(
                    top_left,
                    rect.size(),
                    palette.background.strong.color,
                ),
            }

            if self.carousel.is_active(index) {
                frame.stroke(
                    &Path::rectangle(top_left, rect.size()),
                    Stroke::default()
                        .with_color(palette.primary.base.color)
                        .with_width(3.0),
                );
            } else {
                frame.fill_rectangle(top_left, rect.size(), Color::from_rgba(0.0, 0.0, 0.0, 0.35));
            }
        }

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        let message = match event {
            // Mouse button press - start dragging
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                cursor.position_in(bounds).map(|pos| {
                    state.pressed = true;
                    CarouselMessage::Press(pos.x)
                })
            }
            canvas::Event::Touch(touch::Event::FingerPressed { position, .. })
                if bounds.contains(position) =>
            {
                state.pressed = true;
                Some(CarouselMessage::Press(position.x - bounds.x))
            }

            // Pointer move - track the drag, or cancel it when leaving the strip
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) if state.pressed => {
                match cursor.position_in(bounds) {
                    Some(pos) => Some(CarouselMessage::Move(pos.x)),
                    None => {
                        state.pressed = false;
                        Some(CarouselMessage::Leave)
                    }
                }
            }
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. })
                if cursor.is_over(bounds)
                    && (bounds.width - self.carousel.viewport_width()).abs() > 0.5 =>
            {
                return (
                    canvas::event::Status::Ignored,
                    Some(Message::Carousel(CarouselMessage::Viewport(bounds.width))),
                );
            }
            canvas::Event::Touch(touch::Event::FingerMoved { position, .. }) if state.pressed => {
                Some(CarouselMessage::Move(position.x - bounds.x))
            }

            // Release - finish the drag and report the slide under the pointer
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) if state.pressed => {
                state.pressed = false;
                match cursor.position_in(bounds) {
                    Some(pos) => Some(CarouselMessage::Release {
                        x: pos.x,
                        slide: self.slide_at(pos.x),
                    }),
                    None => Some(CarouselMessage::Leave),
                }
            }
            canvas::Event::Touch(touch::Event::FingerLifted { position, .. }) if state.pressed => {
                state.pressed = false;
                let x = position.x - bounds.x;
                Some(CarouselMessage::Release {
                    x,
                    slide: self.slide_at(x),
                })
            }
            canvas::Event::Touch(touch::Event::FingerLost { .. }) if state.pressed => {
                state.pressed = false;
                Some(CarouselMessage::Leave)
            }

            _ => None,
        };

        match message {
            Some(message) => (canvas::event::Status::Captured, Some(Message::Carousel(message))),
            None => (canvas::event::Status::Ignored, None),
        }
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if state.pressed || self.carousel.is_dragging() {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

/// State for drag interactions
#[derive(Debug, Clone, Default)]
pub struct DragState {
    pub pressed: bool,
}

/// Cover strip with its caption, arrows and indicator dots
pub fn view<'a>(
    carousel: &'a CarouselController,
    gallery: &'a Gallery,
    thumbnails: &'a HashMap<MediaRef, Handle>,
) -> Element<'a, Message> {
    if gallery.is_empty() {
        return text("No magazine covers found.").size(16).into();
    }

    let strip = canvas_widget(CoverStrip {
        carousel,
        gallery,
        thumbnails,
    })
    .width(Length::Fill)
    .height(Length::Fixed(strip_height(carousel.slide_width())));

    let caption = gallery
        .get(carousel.center_index())
        .map(|item| item.caption.title.as_str())
        .unwrap_or_default();

    let dots: Vec<Element<'a, Message>> = (0..carousel.slide_count())
        .map(|index| {
            let marker = if carousel.is_active(index) { "●" } else { "○" };
            button(text(marker).size(14))
                .on_press(Message::Carousel(CarouselMessage::Dot(index)))
                .style(button::text)
                .padding(2)
                .into()
        })
        .collect();

    let controls = row![
        button(text("‹").size(24))
            .on_press_maybe(carousel.has_previous().then_some(Message::Carousel(CarouselMessage::Previous)))
            .style(button::text),
        Row::with_children(dots).spacing(4).align_y(Alignment::Center),
        button(text("›").size(24))
            .on_press_maybe(carousel.has_next().then_some(Message::Carousel(CarouselMessage::Next)))
            .style(button::text),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    column![strip, text(caption).size(18), controls]
        .spacing(12)
        .align_x(Alignment::Center)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::GalleryId;

    #[test]
    fn test_slide_width_bounds() {
        assert_eq!(slide_width_for(300.0), 180.0);
        assert_eq!(slide_width_for(1000.0), 280.0);
        assert_eq!(slide_width_for(4000.0), 320.0);
    }

    #[test]
    fn test_slide_hit_testing() {
        let mut carousel = CarouselController::new(3);
        carousel.resize(1000.0, 200.0);
        let gallery = Gallery::empty(GalleryId::Covers);
        let thumbnails = HashMap::new();
        let strip = CoverStrip {
            carousel: &carousel,
            gallery: &gallery,
            thumbnails: &thumbnails,
        };

        // Slide 0 is centered: it spans 400..600
        assert_eq!(strip.slide_at(500.0), Some(0));
        assert_eq!(strip.slide_at(650.0), Some(1));
        assert_eq!(strip.slide_at(350.0), None);
        assert_eq!(strip.slide_at(1000.0), None);
    }

    fn bounds(width: f32) -> Rectangle {
        Rectangle::new(Point::ORIGIN, Size::new(width, 400.0))
    }

    #[test]
    fn test_release_outside_strip_cancels_drag() {
        let mut carousel = CarouselController::new(3);
        carousel.resize(1000.0, 200.0);
        let gallery = Gallery::empty(GalleryId::Covers);
        let thumbnails = HashMap::new();
        let strip = CoverStrip {
            carousel: &carousel,
            gallery: &gallery,
            thumbnails: &thumbnails,
        };
        let mut state = DragState { pressed: true };

        let (_, message) = strip.update(
            &mut state,
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)),
            bounds(1000.0),
            Cursor::Unavailable,
        );

        assert!(!state.pressed);
        assert!(matches!(message, Some(Message::Carousel(CarouselMessage::Leave))));
    }

    #[test]
    fn test_strip_reports_its_own_width() {
        let mut carousel = CarouselController::new(3);
        carousel.resize(1200.0, 200.0);
        let gallery = Gallery::empty(GalleryId::Covers);
        let thumbnails = HashMap::new();
        let strip = CoverStrip {
            carousel: &carousel,
            gallery: &gallery,
            thumbnails: &thumbnails,
        };
        let position = Point::new(100.0, 100.0);
        let moved = canvas::Event::Mouse(mouse::Event::CursorMoved { position });

        let (_, message) = strip.update(
            &mut DragState::default(),
            moved.clone(),
            bounds(900.0),
            Cursor::Available(position),
        );
        assert!(matches!(
            message,
            Some(Message::Carousel(CarouselMessage::Viewport(width))) if width == 900.0
        ));

        // Already in sync: hovering is not an event
        let (_, message) = strip.update(
            &mut DragState::default(),
            moved,
            bounds(1200.0),
            Cursor::Available(position),
        );
        assert!(message.is_none());
    }
}
