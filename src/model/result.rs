use serde::{Deserialize, Serialize};

use super::RecordId;

/// A single contest result row as stored in the results sheet.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultRecord {
    pub id: RecordId,
    pub event_title: String,
    pub category: String,
    pub winner_name: String,
    pub winner_email: String,
    pub institute: String,
    pub position: String,
    pub notes: String,
    /// Publication state; an empty value counts as published.
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A result row placed within its category, with the rank it was sorted by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedWinner {
    pub rank: u8,
    #[serde(flatten)]
    pub record: ResultRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub name: String,
    pub winners: Vec<RankedWinner>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventGroup {
    pub event_title: String,
    pub categories: Vec<CategoryGroup>,
}
