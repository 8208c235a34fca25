use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, text, text_input, Row};
use iced::{Alignment, Element, Length};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::state::data::{Gallery, GalleryId, MediaRef, ProjectRecord};
use crate::state::library::ProjectDraft;
use crate::ui::thumbnail_grid;
use crate::Message;

/// Which projects the grid shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    pub fn matches(&self, record: &ProjectRecord) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => record.has_tag(tag),
        }
    }
}

/// Positions (in the full projects gallery) of the records that pass `filter`
pub fn filtered_positions(records: &[ProjectRecord], filter: &TagFilter) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.matches(record))
        .map(|(position, _)| position)
        .collect()
}

/// Distinct tags in first-seen order (case-insensitive)
pub fn distinct_tags(records: &[ProjectRecord]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in records.iter().flat_map(|record| record.tags.iter()) {
        if !tags.iter().any(|seen| seen.eq_ignore_ascii_case(tag)) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Messages from the add-project form
#[derive(Debug, Clone)]
pub enum FormMessage {
    TitleChanged(String),
    DescriptionChanged(String),
    TagsChanged(String),
    PickImage,
    Submit,
}

/// Add-project form state
#[derive(Debug, Clone, Default)]
pub struct ProjectForm {
    pub draft: ProjectDraft,
    pub error: Option<String>,
}

impl ProjectForm {
    /// Apply a field edit; returns false for messages the app must handle
    pub fn update(&mut self, message: &FormMessage) -> bool {
        match message {
            FormMessage::TitleChanged(title) => self.draft.title = title.clone(),
            FormMessage::DescriptionChanged(description) => {
                self.draft.description = description.clone()
            }
            FormMessage::TagsChanged(tags) => self.draft.tags = tags.clone(),
            FormMessage::PickImage | FormMessage::Submit => return false,
        }
        self.error = None;
        true
    }

    pub fn set_image(&mut self, path: PathBuf) {
        self.draft.image = path.to_string_lossy().to_string();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn form_view(form: &ProjectForm) -> Element<'_, Message> {
    let on_form = |message: FormMessage| Message::Form(message);

    let image_label = if form.draft.image.is_empty() {
        "No file chosen".to_string()
    } else {
        form.draft.image.clone()
    };

    let mut content = column![
        text("Add a project").size(20),
        text_input("Title", &form.draft.title)
            .on_input(move |value| on_form(FormMessage::TitleChanged(value))),
        text_input("Description", &form.draft.description)
            .on_input(move |value| on_form(FormMessage::DescriptionChanged(value))),
        text_input("Tags (comma separated)", &form.draft.tags)
            .on_input(move |value| on_form(FormMessage::TagsChanged(value))),
        row![
            button("Choose image").on_press(on_form(FormMessage::PickImage)),
            text(image_label).size(14),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
        button("Add project")
            .on_press(on_form(FormMessage::Submit))
            .padding(10),
    ]
    .spacing(10)
    .max_width(520);

    if let Some(error) = &form.error {
        content = content.push(text(error).size(14).style(text::danger));
    }

    container(content).padding(16).style(container::rounded_box).into()
}

/// Tag filter bar, project grid (or the empty state) and the add form
pub fn view<'a>(
    records: &'a [ProjectRecord],
    gallery: &'a Gallery,
    filter: &'a TagFilter,
    thumbnails: &'a HashMap<MediaRef, Handle>,
    form: &'a ProjectForm,
) -> Element<'a, Message> {
    let grid: Element<'a, Message> = if records.is_empty() {
        container(text("No projects available yet.").size(18))
            .padding(40)
            .center_x(Length::Fill)
            .into()
    } else {
        let filter_button = |label: String, target: TagFilter| -> Element<'a, Message> {
            let style = if *filter == target {
                button::primary
            } else {
                button::secondary
            };
            button(text(label))
                .on_press(Message::FilterChanged(target))
                .style(style)
                .into()
        };

        let mut filters = vec![filter_button("All".to_string(), TagFilter::All)];
        filters.extend(
            distinct_tags(records)
                .into_iter()
                .map(|tag| filter_button(tag.clone(), TagFilter::Tag(tag))),
        );

        let positions = filtered_positions(records, filter);
        column![
            Row::with_children(filters).spacing(8),
            thumbnail_grid(gallery, &positions, GalleryId::Projects, thumbnails),
        ]
        .spacing(16)
        .into()
    };

    column![grid, form_view(form)].spacing(24).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, tags: &[&str]) -> ProjectRecord {
        ProjectRecord {
            title: title.to_string(),
            description: String::new(),
            image: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            id: 0,
        }
    }

    #[test]
    fn test_filter_keeps_gallery_positions() {
        let records = vec![
            record("Billboard", &["print"]),
            record("Web Design", &["web"]),
            record("Brochure", &["Print", "branding"]),
        ];

        assert_eq!(filtered_positions(&records, &TagFilter::All), vec![0, 1, 2]);
        assert_eq!(
            filtered_positions(&records, &TagFilter::Tag("print".to_string())),
            vec![0, 2]
        );
        assert!(filtered_positions(&records, &TagFilter::Tag("logo".to_string())).is_empty());
    }

    #[test]
    fn test_distinct_tags_first_seen_order() {
        let records = vec![
            record("Billboard", &["print", "outdoor"]),
            record("Brochure", &["Print", "branding"]),
        ];

        assert_eq!(distinct_tags(&records), vec!["print", "outdoor", "branding"]);
    }

    #[test]
    fn test_form_edits_clear_error() {
        let mut form = ProjectForm {
            error: Some("a title is required".to_string()),
            ..Default::default()
        };

        assert!(form.update(&FormMessage::TitleChanged("Drawing".to_string())));
        assert_eq!(form.draft.title, "Drawing");
        assert!(form.error.is_none());
        assert!(!form.update(&FormMessage::Submit));
    }
}
