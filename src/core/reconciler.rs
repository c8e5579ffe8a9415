use crate::core::like_store::LikeStateStore;
use crate::domain::model::ItemKey;
use crate::domain::ports::LikeService;
use crate::utils::error::CarouselError;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub checked: usize,
    pub patched: usize,
    pub failed: usize,
    pub skipped: usize,
    pub discarded: usize,
}

enum ItemResult {
    Patched,
    Failed,
    Discarded,
}

/// Pulls the remote like state for every item after the list is shown.
/// A failing item is logged and left alone; the others still get patched.
pub struct LikeReconciler<L: LikeService> {
    likes: Arc<L>,
    concurrency: usize,
}

impl<L: LikeService> Clone for LikeReconciler<L> {
    fn clone(&self) -> Self {
        Self {
            likes: Arc::clone(&self.likes),
            concurrency: self.concurrency,
        }
    }
}

impl<L: LikeService> LikeReconciler<L> {
    /// `concurrency` of 1 keeps queries strictly sequential.
    pub fn new(likes: Arc<L>, concurrency: usize) -> Self {
        Self {
            likes,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn reconcile(&self, store: &LikeStateStore) -> ReconcileReport {
        let (generation, items) = store.snapshot().await;
        let keys: Vec<ItemKey> = items.iter().filter_map(|item| item.key()).collect();

        let mut report = ReconcileReport {
            skipped: items.len() - keys.len(),
            ..Default::default()
        };

        tracing::info!(
            "🔄 Reconciling like state for {} items (concurrency {})",
            keys.len(),
            self.concurrency
        );

        let results: Vec<ItemResult> = stream::iter(keys)
            .map(|key| async move {
                let status = match self.likes.check_like(key.kind, &key.id).await {
                    Ok(status) => status,
                    Err(e) => {
                        tracing::warn!("⚠️ check-like failed for {}: {}", key, e);
                        return ItemResult::Failed;
                    }
                };

                match store.apply_status(generation, &key, status).await {
                    Ok(state) => {
                        tracing::debug!(
                            "🔄 {} liked={} count={}",
                            key,
                            state.liked,
                            state.like_count
                        );
                        ItemResult::Patched
                    }
                    Err(CarouselError::StaleGeneration { .. }) => {
                        tracing::debug!("🗑️ Discarding check-like response for {}", key);
                        ItemResult::Discarded
                    }
                    Err(e) => {
                        tracing::warn!("⚠️ Could not patch {}: {}", key, e);
                        ItemResult::Failed
                    }
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        for result in results {
            report.checked += 1;
            match result {
                ItemResult::Patched => report.patched += 1,
                ItemResult::Failed => report.failed += 1,
                ItemResult::Discarded => report.discarded += 1,
            }
        }

        tracing::info!(
            "🔄 Reconciliation complete: {} patched, {} failed, {} skipped, {} discarded",
            report.patched,
            report.failed,
            report.skipped,
            report.discarded
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fallback::fallback_items;
    use crate::core::normalizer::normalize_advertisement;
    use crate::domain::model::{
        CarouselItem, ItemKind, LikeState, LikeStatus, RawAdvertisement, RawCommon,
    };
    use crate::utils::error::Result;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{Mutex, Notify};

    #[derive(Default)]
    struct MockLikes {
        statuses: HashMap<String, LikeStatus>,
        failing: HashSet<String>,
        calls: Mutex<Vec<String>>,
        active: AtomicUsize,
        peak: AtomicUsize,
    }

    impl MockLikes {
        fn with_status(mut self, id: &str, liked: bool, count: Option<u64>) -> Self {
            self.statuses.insert(
                id.to_string(),
                LikeStatus {
                    liked,
                    likes_count: count,
                },
            );
            self
        }

        fn failing_on(mut self, id: &str) -> Self {
            self.failing.insert(id.to_string());
            self
        }
    }

    #[async_trait]
    impl LikeService for MockLikes {
        async fn like(&self, _kind: ItemKind, _id: &str) -> Result<()> {
            Ok(())
        }

        async fn unlike(&self, _kind: ItemKind, _id: &str) -> Result<()> {
            Ok(())
        }

        async fn check_like(&self, _kind: ItemKind, id: &str) -> Result<LikeStatus> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.calls.lock().await.push(id.to_string());
            self.active.fetch_sub(1, Ordering::SeqCst);

            if self.failing.contains(id) {
                return Err(CarouselError::UnexpectedStatus {
                    endpoint: format!("/advertisements/{}/check-like", id),
                    status: 500,
                });
            }
            Ok(self.statuses.get(id).copied().unwrap_or(LikeStatus {
                liked: false,
                likes_count: Some(0),
            }))
        }
    }

    fn ad(id: &str) -> CarouselItem {
        normalize_advertisement(&RawAdvertisement {
            common: RawCommon {
                id: Some(id.to_string()),
                ..Default::default()
            },
            views: None,
        })
    }

    fn key(id: &str) -> ItemKey {
        ItemKey::new(ItemKind::Advertisement, id)
    }

    #[tokio::test]
    async fn test_failure_of_one_item_does_not_stop_the_rest() {
        let likes = MockLikes::default()
            .with_status("1", true, Some(4))
            .with_status("3", true, Some(7))
            .with_status("4", false, Some(2))
            .with_status("5", true, None)
            .failing_on("2");
        let likes = Arc::new(likes);

        let store = LikeStateStore::new();
        store
            .replace(vec![ad("1"), ad("2"), ad("3"), ad("4"), ad("5")])
            .await;

        let report = LikeReconciler::new(Arc::clone(&likes), 1)
            .reconcile(&store)
            .await;

        assert_eq!(report.checked, 5);
        assert_eq!(report.patched, 4);
        assert_eq!(report.failed, 1);

        assert_eq!(store.get(&key("1")).await, Some(LikeState { liked: true, like_count: 4 }));
        assert_eq!(store.get(&key("2")).await, Some(LikeState::default()));
        assert_eq!(store.get(&key("3")).await, Some(LikeState { liked: true, like_count: 7 }));
        assert_eq!(store.get(&key("4")).await, Some(LikeState { liked: false, like_count: 2 }));
        assert_eq!(store.get(&key("5")).await, Some(LikeState { liked: true, like_count: 0 }));
    }

    #[tokio::test]
    async fn test_sequential_queries_follow_display_order() {
        let likes = Arc::new(MockLikes::default());
        let store = LikeStateStore::new();
        store.replace(vec![ad("c"), ad("a"), ad("b")]).await;

        LikeReconciler::new(Arc::clone(&likes), 1)
            .reconcile(&store)
            .await;

        assert_eq!(*likes.calls.lock().await, vec!["c", "a", "b"]);
        assert_eq!(likes.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bounded_concurrency_keeps_isolation() {
        let likes = Arc::new(
            MockLikes::default()
                .with_status("1", true, Some(1))
                .with_status("3", true, Some(3))
                .failing_on("2"),
        );
        let store = LikeStateStore::new();
        store
            .replace((1..=6).map(|i| ad(&i.to_string())).collect())
            .await;

        let report = LikeReconciler::new(Arc::clone(&likes), 3)
            .reconcile(&store)
            .await;

        assert_eq!(report.patched, 5);
        assert_eq!(report.failed, 1);
        assert!(likes.peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(store.get(&key("3")).await, Some(LikeState { liked: true, like_count: 3 }));
    }

    #[tokio::test]
    async fn test_reconcile_twice_is_idempotent() {
        let likes = Arc::new(MockLikes::default().with_status("1", true, Some(12)));
        let store = LikeStateStore::new();
        store.replace(vec![ad("1")]).await;
        let reconciler = LikeReconciler::new(likes, 1);

        reconciler.reconcile(&store).await;
        let first = store.get(&key("1")).await;
        reconciler.reconcile(&store).await;
        let second = store.get(&key("1")).await;

        assert_eq!(first, second);
        assert_eq!(first, Some(LikeState { liked: true, like_count: 12 }));
    }

    #[tokio::test]
    async fn test_items_without_id_are_skipped() {
        let likes = Arc::new(MockLikes::default());
        let store = LikeStateStore::new();
        store.replace(fallback_items()).await;

        let report = LikeReconciler::new(Arc::clone(&likes), 1)
            .reconcile(&store)
            .await;

        assert_eq!(report.skipped, 3);
        assert_eq!(report.checked, 0);
        assert!(likes.calls.lock().await.is_empty());
    }

    /// Suspends every check-like until the test releases it.
    #[derive(Default)]
    struct GatedLikes {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl LikeService for GatedLikes {
        async fn like(&self, _kind: ItemKind, _id: &str) -> Result<()> {
            Ok(())
        }

        async fn unlike(&self, _kind: ItemKind, _id: &str) -> Result<()> {
            Ok(())
        }

        async fn check_like(&self, _kind: ItemKind, _id: &str) -> Result<LikeStatus> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(LikeStatus {
                liked: true,
                likes_count: Some(5),
            })
        }
    }

    #[tokio::test]
    async fn test_response_after_dispose_is_discarded() {
        let likes = Arc::new(GatedLikes::default());
        let store = LikeStateStore::new();
        store.replace(vec![ad("1")]).await;

        let reconciler = LikeReconciler::new(Arc::clone(&likes), 1);
        let handle = {
            let store = store.clone();
            tokio::spawn(async move { reconciler.reconcile(&store).await })
        };
        likes.entered.notified().await;
        store.dispose().await;
        likes.release.notify_one();
        let report = handle.await.unwrap();

        assert_eq!(report.checked, 1);
        assert_eq!(report.discarded, 1);
        assert_eq!(report.patched, 0);
        assert!(store.is_disposed().await);
        assert!(store.items().await.is_empty());
    }

    #[tokio::test]
    async fn test_response_after_reload_is_discarded() {
        let likes = Arc::new(GatedLikes::default());
        let store = LikeStateStore::new();
        store.replace(vec![ad("1")]).await;

        let reconciler = LikeReconciler::new(Arc::clone(&likes), 1);
        let handle = {
            let store = store.clone();
            tokio::spawn(async move { reconciler.reconcile(&store).await })
        };
        likes.entered.notified().await;
        store.replace(vec![ad("1")]).await;
        likes.release.notify_one();
        let report = handle.await.unwrap();

        assert_eq!(report.discarded, 1);
        assert_eq!(store.get(&key("1")).await, Some(LikeState::default()));
    }
}
