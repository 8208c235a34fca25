use iced::widget::image::Handle;
use iced::widget::scrollable::RelativeOffset;
use iced::widget::{button, column, horizontal_space, row, scrollable, stack, text, Column};
use iced::{event, keyboard, touch, window};
use iced::{Alignment, Element, Event, Size, Subscription, Task, Theme};
use rfd::FileDialog;
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod media;
mod state;
mod ui;

use config::Config;
use media::loader::{MAX_EDGE, THUMBNAIL_EDGE};
use media::{load_media, DecodedImage};
use media::scan::IMAGE_EXTENSIONS;
use state::captions::CaptionTables;
use state::carousel::{CarouselController, SlideClick};
use state::data::{GalleryId, MediaRef, ProjectRecord};
use state::gallery::{build_gallery, GalleryIndex};
use state::library::ProjectStore;
use state::lightbox::{LightboxController, LightboxInput, LightboxKey};
use state::schedule::Ticket;
use ui::carousel::{slide_width_for, CarouselMessage};
use ui::projects::{FormMessage, ProjectForm, TagFilter};

const WINDOW_SIZE: Size = Size::new(1280.0, 860.0);
const PAGE_PADDING: f32 = 40.0;

/// Main application state
///
/// Every controller is built once in `new` and owned here; message
/// handlers reach them only through this struct.
struct Folio {
    galleries: GalleryIndex,
    lightbox: LightboxController,
    carousel: CarouselController,
    store: ProjectStore,
    /// Snapshot the projects gallery was last rebuilt from
    records: Vec<ProjectRecord>,
    filter: TagFilter,
    form: ProjectForm,
    thumbnails: HashMap<MediaRef, Handle>,
    full_images: HashMap<MediaRef, Handle>,
    /// Media whose load has been started, to avoid duplicate work
    requested_thumbnails: HashSet<MediaRef>,
    requested_full: HashSet<MediaRef>,
    last_frame: Option<Instant>,
    dark_mode: bool,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    ThumbnailLoaded((MediaRef, DecodedImage)),
    FullImageLoaded((MediaRef, DecodedImage)),
    /// A grid tile was clicked; carries the tile's gallery position
    ThumbnailClicked(GalleryId, usize),
    Lightbox(LightboxInput),
    Carousel(CarouselMessage),
    /// A scheduled ticket finished its delay
    TimerFired(Ticket),
    AnimationFrame(Instant),
    WindowResized(Size),
    FilterChanged(TagFilter),
    Form(FormMessage),
    ToggleTheme,
}

fn to_handle(image: DecodedImage) -> Handle {
    Handle::from_rgba(image.width, image.height, image.pixels)
}

/// Run a ticket's delay on the async runtime and report back
fn schedule(ticket: Ticket) -> Task<Message> {
    Task::perform(tokio::time::sleep(ticket.delay), move |_| {
        Message::TimerFired(ticket)
    })
}

/// Open the configured store, or a session-only one if that fails
fn open_store(config: &Config) -> ProjectStore {
    match ProjectStore::open(&config.database_path) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(
                "❌ Could not open store at {}: {}. Changes will not be saved.",
                config.database_path.display(),
                e
            );
            // If this fails, we panic because the app cannot function without a store
            ProjectStore::open_in_memory().expect("Failed to create in-memory store")
        }
    }
}

impl Folio {
    /// Create a new instance of the application
    fn new(config: Config) -> (Self, Task<Message>) {
        let store = open_store(&config);

        let captions = CaptionTables::load(&config.media_root).unwrap_or_else(|e| {
            tracing::warn!("⚠️  Ignoring caption overrides: {}", e);
            CaptionTables::default()
        });

        let mut galleries = GalleryIndex::new();
        for (id, dir) in [
            (GalleryId::Covers, config.covers_dir()),
            (GalleryId::Pages, config.pages_dir()),
        ] {
            let media = media::scan_gallery_dir(&dir);
            galleries.insert(build_gallery(id, media, captions.for_gallery(id)));
        }

        // First run: a projects folder becomes the initial project records
        let seed = build_gallery(
            GalleryId::Projects,
            media::scan_gallery_dir(&config.projects_dir()),
            captions.for_gallery(GalleryId::Projects),
        );
        if let Err(e) = store.seed_projects(&seed) {
            tracing::warn!("⚠️  Could not seed projects: {}", e);
        }

        let records = store.load_projects().unwrap_or_else(|e| {
            tracing::warn!("⚠️  Could not read projects: {}", e);
            Vec::new()
        });
        galleries.rebuild_projects_gallery(&records);

        let mut carousel = CarouselController::new(galleries.gallery(GalleryId::Covers).len());
        let viewport = WINDOW_SIZE.width - 2.0 * PAGE_PADDING;
        carousel.resize(viewport, slide_width_for(viewport));

        let dark_mode = store.load_dark_mode().ok().flatten().unwrap_or(true);

        tracing::info!(
            "🎨 Folio initialized with {} projects, {} covers, {} pages",
            records.len(),
            galleries.gallery(GalleryId::Covers).len(),
            galleries.gallery(GalleryId::Pages).len(),
        );

        let status = match store.path() {
            Some(path) => format!("Projects are saved to {}", path.display()),
            None => "Projects are kept for this session only.".to_string(),
        };

        let mut app = Folio {
            galleries,
            lightbox: LightboxController::new(),
            carousel,
            store,
            records,
            filter: TagFilter::default(),
            form: ProjectForm::default(),
            thumbnails: HashMap::new(),
            full_images: HashMap::new(),
            requested_thumbnails: HashSet::new(),
            requested_full: HashSet::new(),
            last_frame: None,
            dark_mode,
            status,
        };

        let task = app.load_missing_thumbnails();
        (app, task)
    }

    /// Start thumbnail loads for every media handle not yet requested
    fn load_missing_thumbnails(&mut self) -> Task<Message> {
        let tasks: Vec<Task<Message>> = self
            .galleries
            .all_media()
            .into_iter()
            .filter(|media| self.requested_thumbnails.insert(media.clone()))
            .map(|media| Task::perform(load_media(media, THUMBNAIL_EDGE), Message::ThumbnailLoaded))
            .collect();

        Task::batch(tasks)
    }

    /// Follow-up work after any lightbox operation
    fn after_lightbox_change(&mut self) -> Task<Message> {
        let mut tasks = Vec::new();

        if self.lightbox.take_scroll_reset() {
            tasks.push(scrollable::snap_to(
                ui::lightbox::overlay_scroll_id(),
                RelativeOffset::START,
            ));
        }

        // Fire-and-forget: navigation does not wait for the full image
        if let Some(item) = self.lightbox.current_item() {
            if self.requested_full.insert(item.media.clone()) {
                tasks.push(Task::perform(
                    load_media(item.media.clone(), MAX_EDGE),
                    Message::FullImageLoaded,
                ));
            }
        }

        Task::batch(tasks)
    }

    /// Re-read the store and rebuild the projects gallery from it
    fn reload_projects(&mut self) -> Task<Message> {
        match self.store.load_projects() {
            Ok(records) => self.records = records,
            Err(e) => tracing::warn!("⚠️  Could not read projects: {}", e),
        }
        self.galleries.rebuild_projects_gallery(&self.records);
        self.load_missing_thumbnails()
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        let task = self.dispatch(message);

        // Frame deltas restart from zero with the next animation
        if !self.carousel.is_animating() {
            self.last_frame = None;
        }

        task
    }

    fn dispatch(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ThumbnailLoaded((media, image)) => {
                self.thumbnails.insert(media, to_handle(image));
                Task::none()
            }
            Message::FullImageLoaded((media, image)) => {
                self.full_images.insert(media, to_handle(image));
                Task::none()
            }
            Message::ThumbnailClicked(id, index) => {
                self.lightbox.open(&self.galleries, id, index);
                self.after_lightbox_change()
            }
            Message::Lightbox(input) => {
                self.lightbox.handle_input(input);
                self.after_lightbox_change()
            }
            Message::Carousel(message) => self.update_carousel(message),
            Message::TimerFired(ticket) => {
                self.carousel.on_timer(ticket);
                Task::none()
            }
            Message::AnimationFrame(now) => {
                let elapsed = self
                    .last_frame
                    .map(|last| now.duration_since(last))
                    .unwrap_or_default();
                self.last_frame = self.carousel.advance(elapsed).then_some(now);
                Task::none()
            }
            Message::WindowResized(size) => {
                self.resize_carousel((size.width - 2.0 * PAGE_PADDING).max(0.0))
            }
            Message::FilterChanged(filter) => {
                self.filter = filter;
                Task::none()
            }
            Message::Form(message) => self.update_form(message),
            Message::ToggleTheme => {
                self.dark_mode = !self.dark_mode;
                if let Err(e) = self.store.save_dark_mode(self.dark_mode) {
                    tracing::warn!("⚠️  Could not save theme: {}", e);
                }
                Task::none()
            }
        }
    }

    /// Lay the cover strip out for a new viewport width
    fn resize_carousel(&mut self, viewport: f32) -> Task<Message> {
        match self.carousel.resize(viewport, slide_width_for(viewport)) {
            Some(ticket) => schedule(ticket),
            None => Task::none(),
        }
    }

    fn update_carousel(&mut self, message: CarouselMessage) -> Task<Message> {
        match message {
            CarouselMessage::Press(x) => self.carousel.drag_start(x),
            CarouselMessage::Move(x) => self.carousel.drag_move(x),
            CarouselMessage::Release { x, slide } => {
                let cleanup = self.carousel.drag_end(x).map(schedule);

                let open = match slide.map(|index| self.carousel.click_slide(index)) {
                    Some(SlideClick::Open(index)) => {
                        self.lightbox.open(&self.galleries, GalleryId::Covers, index);
                        Some(self.after_lightbox_change())
                    }
                    _ => None,
                };

                return Task::batch(cleanup.into_iter().chain(open));
            }
            CarouselMessage::Leave => self.carousel.drag_cancel(),
            CarouselMessage::Viewport(width) => return self.resize_carousel(width),
            CarouselMessage::Next => self.carousel.go_next(),
            CarouselMessage::Previous => self.carousel.go_previous(),
            CarouselMessage::Dot(index) => self.carousel.go_to_slide(index as isize, true),
        }

        Task::none()
    }

    fn update_form(&mut self, message: FormMessage) -> Task<Message> {
        if self.form.update(&message) {
            return Task::none();
        }

        match message {
            FormMessage::PickImage => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Select Project Image")
                    .add_filter("Images", &IMAGE_EXTENSIONS)
                    .pick_file();

                if let Some(path) = file {
                    self.form.set_image(path);
                }
                Task::none()
            }
            FormMessage::Submit => match self.store.add_project(&self.form.draft) {
                Ok(record) => {
                    self.status = format!("✅ Project '{}' added successfully!", record.title);
                    self.form.reset();
                    self.reload_projects()
                }
                Err(e) => {
                    self.form.error = Some(e.to_string());
                    Task::none()
                }
            },
            _ => Task::none(),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let keys = keyboard::on_key_press(|key, _modifiers| {
            let key = match key.as_ref() {
                keyboard::Key::Named(keyboard::key::Named::Escape) => LightboxKey::Escape,
                keyboard::Key::Named(keyboard::key::Named::ArrowRight) => LightboxKey::ArrowRight,
                keyboard::Key::Named(keyboard::key::Named::ArrowLeft) => LightboxKey::ArrowLeft,
                _ => return None,
            };
            Some(Message::Lightbox(LightboxInput::Key(key)))
        });

        let events = event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
            Event::Touch(touch::Event::FingerPressed { position, .. }) => {
                Some(Message::Lightbox(LightboxInput::TouchStart(position.x)))
            }
            Event::Touch(touch::Event::FingerLifted { position, .. }) => {
                Some(Message::Lightbox(LightboxInput::TouchEnd(position.x)))
            }
            _ => None,
        });

        let mut subscriptions = vec![keys, events];
        if self.carousel.is_animating() {
            subscriptions.push(window::frames().map(Message::AnimationFrame));
        }

        Subscription::batch(subscriptions)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let theme_label = if self.dark_mode { "Light mode" } else { "Dark mode" };
        let header = row![
            text("Folio").size(44),
            horizontal_space(),
            button(theme_label).on_press(Message::ToggleTheme).padding(10),
        ]
        .align_y(Alignment::Center);

        let covers = self.galleries.gallery(GalleryId::Covers);
        let pages = self.galleries.gallery(GalleryId::Pages);

        let content: Column<Message> = column![
            header,
            section(
                "Projects",
                ui::projects::view(
                    &self.records,
                    self.galleries.gallery(GalleryId::Projects),
                    &self.filter,
                    &self.thumbnails,
                    &self.form,
                ),
            ),
            section(
                "Envoy Magazine",
                ui::carousel::view(&self.carousel, covers, &self.thumbnails),
            ),
            section(
                "Inside the magazine",
                ui::thumbnail_grid(pages, &ui::all_positions(pages), GalleryId::Pages, &self.thumbnails),
            ),
            text(&self.status).size(14),
        ]
        .spacing(48)
        .padding(PAGE_PADDING);

        let page = scrollable(content);

        match self.lightbox.frame() {
            // The overlay is opaque: while it is up the page can't scroll
            Some(frame) if self.lightbox.page_scroll_locked() => {
                let handle = self
                    .full_images
                    .get(&frame.item.media)
                    .or_else(|| self.thumbnails.get(&frame.item.media))
                    .cloned();
                stack![page, ui::lightbox::view(frame, handle)].into()
            }
            _ => page.into(),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

fn section<'a>(title: &'a str, body: Element<'a, Message>) -> Element<'a, Message> {
    column![text(title).size(30), body].spacing(16).into()
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=info")),
        )
        .init();

    let config = Config::load();
    tracing::info!("📂 Media root: {}", config.media_root.display());

    iced::application("Folio", Folio::update, Folio::view)
        .subscription(Folio::subscription)
        .theme(Folio::theme)
        .window_size(WINDOW_SIZE)
        .centered()
        .run_with(move || Folio::new(config))
}
