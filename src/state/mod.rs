/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - Caption tables (captions.rs)
/// - The gallery registry (gallery.rs)
/// - Lightbox navigation (lightbox.rs)
/// - The cover carousel (carousel.rs)
/// - Cancellable scheduled tasks (schedule.rs)
/// - The key-value project store (library.rs)

pub mod captions;
pub mod carousel;
pub mod data;
pub mod gallery;
pub mod library;
pub mod lightbox;
pub mod schedule;
