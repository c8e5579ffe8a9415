pub mod carousel;
pub mod fallback;
pub mod fetcher;
pub mod like_store;
pub mod mutator;
pub mod navigation;
pub mod normalizer;
pub mod reconciler;
pub mod shuffler;

pub use crate::domain::model::{CarouselItem, ItemKey, ItemKind, LikeState};
pub use crate::domain::ports::{AggregationSource, ConfigProvider, LikeService};
pub use crate::utils::error::Result;
