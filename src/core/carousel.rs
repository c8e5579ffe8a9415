use crate::core::fallback::fallback_items;
use crate::core::fetcher::{FetchOutcome, Fetcher};
use crate::core::like_store::{Generation, LikeStateStore};
use crate::core::mutator::LikeMutator;
use crate::core::normalizer::normalize;
use crate::core::reconciler::{LikeReconciler, ReconcileReport};
use crate::core::shuffler::Shuffler;
use crate::domain::model::{CarouselItem, ItemKey, LikeState};
use crate::domain::ports::{AggregationSource, ConfigProvider, LikeService};
use crate::utils::error::{CarouselError, Result};
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Live,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub source: ContentSource,
    pub generation: Generation,
    pub items: Vec<CarouselItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Committed(LikeState),
    Failed { reason: String },
}

/// Fetch → normalize → shuffle → store, then reconcile and toggle likes.
pub struct Carousel<A: AggregationSource, L: LikeService> {
    fetcher: Fetcher<A>,
    shuffler: Shuffler,
    store: LikeStateStore,
    reconciler: LikeReconciler<L>,
    mutator: LikeMutator<L>,
}

impl<A: AggregationSource, L: LikeService + 'static> Carousel<A, L> {
    pub fn new(source: A, likes: L, shuffler: Shuffler, reconcile_concurrency: usize) -> Self {
        let likes = Arc::new(likes);
        Self {
            fetcher: Fetcher::new(source),
            shuffler,
            store: LikeStateStore::new(),
            reconciler: LikeReconciler::new(Arc::clone(&likes), reconcile_concurrency),
            mutator: LikeMutator::new(likes),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(source: A, likes: L, config: &C) -> Self {
        Self::new(
            source,
            likes,
            Shuffler::new(config.shuffle_seed()),
            config.reconcile_concurrency(),
        )
    }

    pub fn store(&self) -> &LikeStateStore {
        &self.store
    }

    /// Runs one fetch cycle. An unavailable source yields the fallback set in
    /// its fixed order; the only error is `StaleGeneration`, when the carousel
    /// was disposed while the fetch was in flight.
    pub async fn load(&mut self) -> Result<LoadOutcome> {
        tracing::info!("📥 Loading carousel content");
        let expected = self.store.generation().await;

        let (source, items) = match self.fetcher.fetch().await {
            FetchOutcome::Live(response) => {
                let items = self.shuffler.shuffle(normalize(&response));
                (ContentSource::Live, items)
            }
            FetchOutcome::Unavailable { reason } => {
                tracing::info!("📦 Using fallback content ({})", reason);
                (ContentSource::Fallback, fallback_items())
            }
        };

        let generation = match self.store.install(expected, items.clone()).await {
            Ok(generation) => generation,
            Err(e) => {
                tracing::debug!("🗑️ Discarding {:?} content: {}", source, e);
                return Err(e);
            }
        };
        tracing::info!("📥 Carousel ready with {} items ({:?})", items.len(), source);

        Ok(LoadOutcome {
            source,
            generation,
            items,
        })
    }

    pub async fn items(&self) -> Vec<CarouselItem> {
        self.store.items().await
    }

    /// Reconciles in the background so the caller can render right away.
    pub fn spawn_reconcile(&self) -> JoinHandle<ReconcileReport> {
        let reconciler = self.reconciler.clone();
        let store = self.store.clone();
        tokio::spawn(async move { reconciler.reconcile(&store).await })
    }

    pub async fn reconcile(&self) -> ReconcileReport {
        self.reconciler.reconcile(&self.store).await
    }

    pub async fn toggle_like(&self, key: &ItemKey) -> MutationOutcome {
        match self.mutator.toggle(&self.store, key).await {
            Ok(state) => MutationOutcome::Committed(state),
            Err(e) => {
                tracing::warn!("⚠️ Like toggle for {} failed: {}", key, e);
                MutationOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Toggles the item at a display position.
    pub async fn toggle_like_at(&self, position: usize) -> MutationOutcome {
        match self.key_at(position).await {
            Ok(key) => self.toggle_like(&key).await,
            Err(e) => {
                tracing::warn!("⚠️ Cannot toggle position {}: {}", position, e);
                MutationOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub async fn dispose(&self) {
        tracing::debug!("🧹 Disposing carousel");
        self.store.dispose().await;
    }

    async fn key_at(&self, position: usize) -> Result<ItemKey> {
        let item = self
            .store
            .item_at(position)
            .await
            .ok_or_else(|| CarouselError::UnknownItem {
                key: format!("position {}", position),
            })?;

        item.key().ok_or_else(|| CarouselError::MissingIdentity {
            kind: item.kind.to_string(),
        })
    }
}
