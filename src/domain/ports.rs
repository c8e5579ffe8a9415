use crate::domain::model::{AggregationResponse, ItemKind, LikeStatus};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// The single read endpoint returning all three collections.
#[async_trait]
pub trait AggregationSource: Send + Sync {
    async fn fetch_aggregate(&self) -> Result<AggregationResponse>;
}

/// Remote like counter, one endpoint family per kind.
#[async_trait]
pub trait LikeService: Send + Sync {
    async fn like(&self, kind: ItemKind, id: &str) -> Result<()>;
    async fn unlike(&self, kind: ItemKind, id: &str) -> Result<()>;
    async fn check_like(&self, kind: ItemKind, id: &str) -> Result<LikeStatus>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn aggregation_path(&self) -> &str;
    fn auth_token(&self) -> Option<&str>;
    fn request_timeout(&self) -> Option<Duration>;
    fn reconcile_concurrency(&self) -> usize;
    fn shuffle_seed(&self) -> Option<u64>;
}
