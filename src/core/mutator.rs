use crate::core::like_store::LikeStateStore;
use crate::domain::model::{ItemKey, ItemKind, LikeState};
use crate::domain::ports::LikeService;
use crate::utils::error::{CarouselError, Result};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

impl LikeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LikeAction::Like => "like",
            LikeAction::Unlike => "unlike",
        }
    }
}

/// Which action a toggle maps to for a kind, given the current state.
/// Only advertisements can be unliked.
pub fn action_for(kind: ItemKind, currently_liked: bool) -> Result<LikeAction> {
    match (kind, currently_liked) {
        (_, false) => Ok(LikeAction::Like),
        (ItemKind::Advertisement, true) => Ok(LikeAction::Unlike),
        (ItemKind::JobOffer | ItemKind::BusinessOpportunity, true) => {
            Err(CarouselError::UnsupportedAction {
                kind: kind.to_string(),
                action: LikeAction::Unlike.as_str().to_string(),
            })
        }
    }
}

/// Remote-first toggling: the store changes only after the service acknowledges.
pub struct LikeMutator<L: LikeService> {
    likes: Arc<L>,
}

impl<L: LikeService> LikeMutator<L> {
    pub fn new(likes: Arc<L>) -> Self {
        Self { likes }
    }

    pub async fn toggle(&self, store: &LikeStateStore, key: &ItemKey) -> Result<LikeState> {
        let (generation, current) = store.begin_mutation(key).await?;

        let action = match action_for(key.kind, current.liked) {
            Ok(action) => action,
            Err(e) => {
                store.abort_mutation(generation, key).await;
                return Err(e);
            }
        };

        tracing::debug!("❤️ Sending {} for {}", action.as_str(), key);
        let remote = match action {
            LikeAction::Like => self.likes.like(key.kind, &key.id).await,
            LikeAction::Unlike => self.likes.unlike(key.kind, &key.id).await,
        };

        if let Err(e) = remote {
            store.abort_mutation(generation, key).await;
            return Err(e);
        }

        let state = store
            .commit_toggle(generation, key, action == LikeAction::Like)
            .await?;
        tracing::info!(
            "❤️ {} {}: liked={} count={}",
            action.as_str(),
            key,
            state.liked,
            state.like_count
        );
        Ok(state)
    }
}
