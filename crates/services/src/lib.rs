#![forbid(unsafe_code)]

pub mod catalog_service;
pub mod error;
pub mod navigator;
pub mod notify;
pub mod remote;

pub use course_core::Clock;

pub use error::{CatalogServiceError, NavigatorError, PlayerError, RemoteCatalogError};

pub use catalog_service::{CatalogService, LessonUpdate};
pub use navigator::{PlayerConfig, PlayerService, SeriesQueries};
pub use notify::{NoopNotifier, Notifier, TracingNotifier};
pub use remote::{RemoteCatalog, RemoteCatalogConfig};
