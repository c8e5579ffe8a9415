pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::HttpApi;
pub use core::carousel::{Carousel, ContentSource, LoadOutcome, MutationOutcome};
pub use domain::model::{CarouselItem, ItemKey, ItemKind, ItemStats, LikeState};
pub use utils::error::{CarouselError, Result};
