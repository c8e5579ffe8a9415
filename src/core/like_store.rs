use crate::domain::model::{CarouselItem, ItemKey, LikeState, LikeStatus};
use crate::utils::error::{CarouselError, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Bumped on every new fetch cycle and on teardown.
pub type Generation = u64;

/// Ordered carousel items plus their like state, shared between the view,
/// the reconciler and the mutator.
#[derive(Clone, Default)]
pub struct LikeStateStore {
    inner: Arc<RwLock<StoreState>>,
}

#[derive(Default)]
struct StoreState {
    generation: Generation,
    disposed: bool,
    items: Vec<CarouselItem>,
    index: HashMap<ItemKey, Vec<usize>>,
    in_flight: HashSet<ItemKey>,
}

impl StoreState {
    fn check_generation(&self, generation: Generation, key: &ItemKey) -> Result<()> {
        if self.disposed || self.generation != generation {
            return Err(CarouselError::StaleGeneration {
                key: key.to_string(),
                expected: generation,
            });
        }
        Ok(())
    }

    fn positions(&self, key: &ItemKey) -> Result<Vec<usize>> {
        self.index
            .get(key)
            .cloned()
            .ok_or_else(|| CarouselError::UnknownItem {
                key: key.to_string(),
            })
    }

    fn install(
        &mut self,
        items: Vec<CarouselItem>,
        index: HashMap<ItemKey, Vec<usize>>,
    ) -> Generation {
        self.generation += 1;
        self.items = items;
        self.index = index;
        self.in_flight.clear();
        self.generation
    }

    fn state_of(&self, key: &ItemKey) -> Option<LikeState> {
        self.index
            .get(key)
            .and_then(|positions| positions.first())
            .map(|&position| self.items[position].like_state())
    }
}

fn index_items(items: &[CarouselItem]) -> HashMap<ItemKey, Vec<usize>> {
    let mut index: HashMap<ItemKey, Vec<usize>> = HashMap::new();
    for (position, item) in items.iter().enumerate() {
        if let Some(key) = item.key() {
            index.entry(key).or_default().push(position);
        }
    }
    index
}

impl LikeStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a new item list wholesale and starts a new generation,
    /// reopening a disposed store.
    pub async fn replace(&self, items: Vec<CarouselItem>) -> Generation {
        let index = index_items(&items);
        let mut state = self.inner.write().await;
        state.disposed = false;
        state.install(items, index)
    }

    /// Installs a fetched list only if nothing happened to the store since
    /// `expected` was read. A disposed store stays disposed.
    pub async fn install(
        &self,
        expected: Generation,
        items: Vec<CarouselItem>,
    ) -> Result<Generation> {
        let index = index_items(&items);
        let mut state = self.inner.write().await;
        if state.disposed || state.generation != expected {
            return Err(CarouselError::StaleGeneration {
                key: "aggregation".to_string(),
                expected,
            });
        }
        Ok(state.install(items, index))
    }

    /// Drops the item list. Responses still in flight are discarded on arrival.
    pub async fn dispose(&self) {
        let mut state = self.inner.write().await;
        state.generation += 1;
        state.disposed = true;
        state.items.clear();
        state.index.clear();
        state.in_flight.clear();
    }

    pub async fn is_disposed(&self) -> bool {
        self.inner.read().await.disposed
    }

    pub async fn generation(&self) -> Generation {
        self.inner.read().await.generation
    }

    pub async fn snapshot(&self) -> (Generation, Vec<CarouselItem>) {
        let state = self.inner.read().await;
        (state.generation, state.items.clone())
    }

    pub async fn items(&self) -> Vec<CarouselItem> {
        self.inner.read().await.items.clone()
    }

    pub async fn item_at(&self, position: usize) -> Option<CarouselItem> {
        self.inner.read().await.items.get(position).cloned()
    }

    pub async fn get(&self, key: &ItemKey) -> Option<LikeState> {
        self.inner.read().await.state_of(key)
    }

    /// Patches the remote truth from a check-like read.
    pub async fn apply_status(
        &self,
        generation: Generation,
        key: &ItemKey,
        status: LikeStatus,
    ) -> Result<LikeState> {
        let mut state = self.inner.write().await;
        state.check_generation(generation, key)?;

        let positions = state.positions(key)?;
        for position in positions {
            let item = &mut state.items[position];
            item.liked = status.liked;
            if let Some(count) = status.likes_count {
                item.like_count = count;
            }
        }

        state
            .state_of(key)
            .ok_or_else(|| CarouselError::UnknownItem {
                key: key.to_string(),
            })
    }

    /// Marks a toggle as in flight and returns the state it starts from.
    pub async fn begin_mutation(&self, key: &ItemKey) -> Result<(Generation, LikeState)> {
        let mut state = self.inner.write().await;
        let current = state.state_of(key).ok_or_else(|| CarouselError::UnknownItem {
            key: key.to_string(),
        })?;

        if !state.in_flight.insert(key.clone()) {
            return Err(CarouselError::MutationInFlight {
                key: key.to_string(),
            });
        }

        Ok((state.generation, current))
    }

    /// Commits an acknowledged toggle and releases the in-flight mark.
    pub async fn commit_toggle(
        &self,
        generation: Generation,
        key: &ItemKey,
        liked: bool,
    ) -> Result<LikeState> {
        let mut state = self.inner.write().await;
        state.check_generation(generation, key)?;
        state.in_flight.remove(key);

        let positions = state.positions(key)?;
        for position in positions {
            let item = &mut state.items[position];
            if item.liked != liked {
                item.liked = liked;
                item.like_count = if liked {
                    item.like_count + 1
                } else {
                    item.like_count.saturating_sub(1)
                };
            }
        }

        state
            .state_of(key)
            .ok_or_else(|| CarouselError::UnknownItem {
                key: key.to_string(),
            })
    }

    /// Releases the in-flight mark without touching like state.
    pub async fn abort_mutation(&self, generation: Generation, key: &ItemKey) {
        let mut state = self.inner.write().await;
        if !state.disposed && state.generation == generation {
            state.in_flight.remove(key);
        }
    }
}
