use iced::widget::image::Handle;
use iced::widget::{
    button, column, container, horizontal_space, image, mouse_area, opaque, row, scrollable, stack,
    text, Space,
};
use iced::{Alignment, Background, Color, ContentFit, Element, Length};

use crate::state::lightbox::{LightboxFrame, LightboxInput};
use crate::Message;

/// Scrollable inside the overlay, reset to the top on every open
pub fn overlay_scroll_id() -> scrollable::Id {
    scrollable::Id::new("lightbox-overlay")
}

fn input(input: LightboxInput) -> Message {
    Message::Lightbox(input)
}

/// Full-window overlay showing the current lightbox frame
///
/// `image` is the best handle available for the item (full size, else the
/// thumbnail). Navigation never waits for it.
pub fn view<'a>(frame: &'a LightboxFrame, image_handle: Option<Handle>) -> Element<'a, Message> {
    let backdrop = mouse_area(
        container(Space::new(Length::Fill, Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.88))),
                ..Default::default()
            }),
    )
    .on_press(input(LightboxInput::BackdropClicked));

    let media: Element<'a, Message> = match image_handle {
        Some(handle) => image(handle)
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fixed(620.0))
            .into(),
        None => container(text("Loading…").size(18))
            .center(Length::Fixed(620.0))
            .width(Length::Fill)
            .into(),
    };

    let caption = column![
        text(&frame.item.caption.title).size(26),
        text(&frame.item.caption.description).size(16),
        text(format!("{} · {}", frame.gallery, frame.position_label())).size(13),
    ]
    .spacing(8);

    let body = scrollable(column![media, caption].spacing(20).padding(24))
        .id(overlay_scroll_id())
        .height(Length::Fill);

    let close = button(text("✕").size(22))
        .on_press(input(LightboxInput::CloseClicked))
        .style(button::text);

    let nav_button = |label: &'a str, message: LightboxInput| -> Element<'a, Message> {
        if frame.nav_visible {
            button(text(label).size(36))
                .on_press(input(message))
                .style(button::text)
                .into()
        } else {
            Space::with_width(Length::Fixed(40.0)).into()
        }
    };

    let content = opaque(
        container(
            column![
                row![horizontal_space(), close],
                row![
                    nav_button("‹", LightboxInput::PreviousClicked),
                    body,
                    nav_button("›", LightboxInput::NextClicked),
                ]
                .spacing(8)
                .align_y(Alignment::Center),
            ]
            .spacing(4),
        )
        .max_width(1100.0)
        .padding(12)
        .style(container::rounded_box),
    );

    // The margin around the content is overlay background: clicking it closes
    let surface = mouse_area(container(content).center(Length::Fill).padding(32))
        .on_press(input(LightboxInput::BackgroundClicked));

    opaque(stack![backdrop, surface])
}
