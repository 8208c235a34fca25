/// UI module
///
/// - `carousel.rs` - the draggable cover strip (canvas) and its controls
/// - `lightbox.rs` - the full-window overlay
/// - `projects.rs` - project grid, tag filter and add-project form
use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, text};
use iced::{ContentFit, Element, Length};
use iced_aw::Wrap;
use std::collections::HashMap;

use crate::state::data::{Gallery, GalleryId, MediaRef};
use crate::Message;

pub mod carousel;
pub mod lightbox;
pub mod projects;

const TILE_WIDTH: f32 = 220.0;
const TILE_HEIGHT: f32 = 160.0;

/// Wrapping grid of clickable thumbnails for the given gallery positions
///
/// Each tile's message carries its own position, so clicking opens the
/// lightbox on the full gallery even when the grid shows a subset.
pub fn thumbnail_grid<'a>(
    gallery: &'a Gallery,
    positions: &[usize],
    id: GalleryId,
    thumbnails: &'a HashMap<MediaRef, Handle>,
) -> Element<'a, Message> {
    let tiles: Vec<Element<'a, Message>> = positions
        .iter()
        .filter_map(|&position| gallery.get(position).map(|item| (position, item)))
        .map(|(position, item)| {
            let preview: Element<'a, Message> = match thumbnails.get(&item.media) {
                Some(handle) => image(handle.clone())
                    .content_fit(ContentFit::Cover)
                    .width(Length::Fixed(TILE_WIDTH))
                    .height(Length::Fixed(TILE_HEIGHT))
                    .into(),
                None => container(text("…"))
                    .center_x(Length::Fixed(TILE_WIDTH))
                    .center_y(Length::Fixed(TILE_HEIGHT))
                    .style(container::rounded_box)
                    .into(),
            };

            button(
                column![preview, text(&item.caption.title).size(14)]
                    .spacing(6)
                    .width(Length::Fixed(TILE_WIDTH)),
            )
            .on_press(Message::ThumbnailClicked(id, position))
            .style(button::text)
            .padding(0)
            .into()
        })
        .collect();

    Wrap::with_elements(tiles)
        .spacing(16.0)
        .line_spacing(16.0)
        .into()
}

/// Every position of a gallery
pub fn all_positions(gallery: &Gallery) -> Vec<usize> {
    (0..gallery.len()).collect()
}
