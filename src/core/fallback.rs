use crate::core::normalizer::badge_for;
use crate::domain::model::{CarouselItem, ItemKind, ItemStats};

/// Static cards shown when the aggregation source is unavailable.
/// They carry no id, so they are never reconciled or liked remotely.
pub fn fallback_items() -> Vec<CarouselItem> {
    vec![
        fallback_item(
            ItemKind::Advertisement,
            "Promote your business here",
            "Reach thousands of professionals every day with a featured spot in this carousel.",
            ItemStats::Views(1250),
        ),
        fallback_item(
            ItemKind::JobOffer,
            "Find your next role",
            "New positions are published every week. Check back soon for openings near you.",
            ItemStats::Applications(48),
        ),
        fallback_item(
            ItemKind::BusinessOpportunity,
            "Discover new opportunities",
            "Partnerships, investments and projects looking for people like you.",
            ItemStats::InterestScore(87.0),
        ),
    ]
}

fn fallback_item(kind: ItemKind, title: &str, description: &str, stats: ItemStats) -> CarouselItem {
    let badge = badge_for(kind);
    CarouselItem {
        id: None,
        kind,
        title: title.to_string(),
        description: description.to_string(),
        owner: None,
        created_at: None,
        badge_label: badge.label.to_string(),
        badge_color: badge.color.to_string(),
        stats,
        tags: Vec::new(),
        liked: false,
        like_count: 0,
    }
}
