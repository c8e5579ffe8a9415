use crate::domain::model::{
    AggregationResponse, CarouselItem, ItemKind, ItemStats, Owner, RawAdvertisement,
    RawBusinessOpportunity, RawCommon, RawJobOffer,
};
use chrono::{DateTime, Utc};

pub const DESCRIPTION_LIMIT: usize = 120;
pub const ELLIPSIS: &str = "...";
pub const DESCRIPTION_PLACEHOLDER: &str = "No description available";
pub const TITLE_PLACEHOLDER: &str = "Untitled";

pub struct Badge {
    pub label: &'static str,
    pub color: &'static str,
}

pub fn badge_for(kind: ItemKind) -> Badge {
    match kind {
        ItemKind::Advertisement => Badge {
            label: "Advertisement",
            color: "blue",
        },
        ItemKind::JobOffer => Badge {
            label: "Job offer",
            color: "green",
        },
        ItemKind::BusinessOpportunity => Badge {
            label: "Opportunity",
            color: "purple",
        },
    }
}

/// Maps one aggregation response into carousel items: advertisements first,
/// then job offers, then business opportunities, each in source order.
pub fn normalize(response: &AggregationResponse) -> Vec<CarouselItem> {
    let mut items = Vec::with_capacity(response.total_records());
    items.extend(response.advertisements.iter().map(normalize_advertisement));
    items.extend(response.job_offers.iter().map(normalize_job_offer));
    items.extend(
        response
            .business_opportunities
            .iter()
            .map(normalize_business_opportunity),
    );
    items
}

pub fn normalize_advertisement(raw: &RawAdvertisement) -> CarouselItem {
    base_item(
        ItemKind::Advertisement,
        &raw.common,
        ItemStats::Views(raw.views.unwrap_or(0)),
        Vec::new(),
    )
}

pub fn normalize_job_offer(raw: &RawJobOffer) -> CarouselItem {
    let tags = [&raw.location, &raw.contract_type]
        .into_iter()
        .filter_map(|tag| non_blank(tag.as_deref()))
        .collect();

    base_item(
        ItemKind::JobOffer,
        &raw.common,
        ItemStats::Applications(raw.applications.unwrap_or(0)),
        tags,
    )
}

pub fn normalize_business_opportunity(raw: &RawBusinessOpportunity) -> CarouselItem {
    let tags = non_blank(raw.sector.as_deref()).into_iter().collect();

    base_item(
        ItemKind::BusinessOpportunity,
        &raw.common,
        ItemStats::InterestScore(raw.interest_score.unwrap_or(0.0)),
        tags,
    )
}

/// Cuts at 120 characters and appends "..." so the card never exceeds 123.
pub fn truncate_description(description: Option<&str>) -> String {
    match description {
        None => DESCRIPTION_PLACEHOLDER.to_string(),
        Some(text) if text.trim().is_empty() => DESCRIPTION_PLACEHOLDER.to_string(),
        Some(text) if text.chars().count() > DESCRIPTION_LIMIT => {
            let mut cut: String = text.chars().take(DESCRIPTION_LIMIT).collect();
            cut.push_str(ELLIPSIS);
            cut
        }
        Some(text) => text.to_string(),
    }
}

fn base_item(
    kind: ItemKind,
    common: &RawCommon,
    stats: ItemStats,
    tags: Vec<String>,
) -> CarouselItem {
    let badge = badge_for(kind);

    CarouselItem {
        id: common.id.clone(),
        kind,
        title: non_blank(common.title.as_deref()).unwrap_or_else(|| TITLE_PLACEHOLDER.to_string()),
        description: truncate_description(common.description.as_deref()),
        owner: resolve_owner(common),
        created_at: parse_timestamp(common.created_at.as_deref()),
        badge_label: badge.label.to_string(),
        badge_color: badge.color.to_string(),
        stats,
        tags,
        liked: false,
        like_count: 0,
    }
}

// Page ownership wins when a record carries both references.
fn resolve_owner(common: &RawCommon) -> Option<Owner> {
    match (&common.page_id, &common.user_id) {
        (Some(page), _) => Some(Owner::Page(page.clone())),
        (None, Some(user)) => Some(Owner::User(user.clone())),
        (None, None) => None,
    }
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
