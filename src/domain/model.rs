use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Advertisement,
    JobOffer,
    BusinessOpportunity,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [
        ItemKind::Advertisement,
        ItemKind::JobOffer,
        ItemKind::BusinessOpportunity,
    ];
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemKind::Advertisement => "advertisement",
            ItemKind::JobOffer => "job offer",
            ItemKind::BusinessOpportunity => "business opportunity",
        };
        f.write_str(name)
    }
}

/// Kind-specific headline number shown on the card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemStats {
    Views(u64),
    Applications(u64),
    InterestScore(f64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "id")]
pub enum Owner {
    Page(String),
    User(String),
}

/// Identity used for remote like calls and store lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub kind: ItemKind,
    pub id: String,
}

impl ItemKey {
    pub fn new(kind: ItemKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.kind, self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeState {
    pub liked: bool,
    pub like_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselItem {
    pub id: Option<String>,
    pub kind: ItemKind,
    pub title: String,
    pub description: String,
    pub owner: Option<Owner>,
    pub created_at: Option<DateTime<Utc>>,
    pub badge_label: String,
    pub badge_color: String,
    pub stats: ItemStats,
    pub tags: Vec<String>,
    pub liked: bool,
    pub like_count: u64,
}

impl CarouselItem {
    pub fn key(&self) -> Option<ItemKey> {
        self.id.as_ref().map(|id| ItemKey::new(self.kind, id.clone()))
    }

    pub fn like_state(&self) -> LikeState {
        LikeState {
            liked: self.liked,
            like_count: self.like_count,
        }
    }

    pub fn owner_page_id(&self) -> Option<&str> {
        match &self.owner {
            Some(Owner::Page(id)) => Some(id),
            _ => None,
        }
    }

    pub fn owner_user_id(&self) -> Option<&str> {
        match &self.owner {
            Some(Owner::User(id)) => Some(id),
            _ => None,
        }
    }
}

/// Payload of the check-like read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LikeStatus {
    pub liked: bool,
    #[serde(rename = "likesCount", default)]
    pub likes_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub advertisements: Vec<RawAdvertisement>,
    #[serde(default)]
    pub job_offers: Vec<RawJobOffer>,
    #[serde(default)]
    pub business_opportunities: Vec<RawBusinessOpportunity>,
}

impl AggregationResponse {
    pub fn total_records(&self) -> usize {
        self.advertisements.len() + self.job_offers.len() + self.business_opportunities.len()
    }
}

/// Fields every source collection shares.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCommon {
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "opaque_id")]
    pub page_id: Option<String>,
    #[serde(default, deserialize_with = "opaque_id")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAdvertisement {
    #[serde(flatten)]
    pub common: RawCommon,
    pub views: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJobOffer {
    #[serde(flatten)]
    pub common: RawCommon,
    pub location: Option<String>,
    pub contract_type: Option<String>,
    pub applications: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBusinessOpportunity {
    #[serde(flatten)]
    pub common: RawCommon,
    pub sector: Option<String>,
    pub interest_score: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(serde_json::Number),
}

// Ids arrive as strings or numbers depending on the backing table.
fn opaque_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<WireId>::deserialize(deserializer)?;
    Ok(id
        .map(|id| match id {
            WireId::Text(text) => text,
            WireId::Number(number) => number.to_string(),
        })
        .filter(|id| !id.trim().is_empty()))
}
