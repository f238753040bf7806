use std::cmp::Ordering;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::error::{Result, ShowcaseError};
use crate::model::{CategoryGroup, EventGroup, RankedWinner, ResultRecord};

/// Status value marking a result row as visible to the public.
pub const PUBLISHED: &str = "PUBLISHED";

/// Rank given to positions that match none of the known placements.
pub const UNRANKED: u8 = 99;

/// Substring to rank mapping, checked in order against the lowercased
/// position text.
const POSITION_RANKS: &[(&str, u8)] = &[
    ("1st", 1),
    ("2nd", 2),
    ("3rd", 3),
    ("hon", 4),
    ("sel", 5),
];

/// Classify a free-text position such as `"1st Place"` or
/// `"Honorable Mention"`.
pub fn position_rank(position: &str) -> u8 {
    let position = position.to_lowercase();
    POSITION_RANKS
        .iter()
        .find(|(needle, _)| position.contains(*needle))
        .map(|(_, rank)| *rank)
        .unwrap_or(UNRANKED)
}

/// Display order for titles and category names: letters compare without
/// regard to case, and when two names differ only in case the lowercase one
/// comes first.
pub fn title_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a))
}

impl ResultRecord {
    /// Trimmed `(event title, category)` pair the row is grouped under.
    pub(crate) fn grouping_key(&self) -> Result<(String, String)> {
        let event_title = self.event_title.trim();
        if event_title.is_empty() {
            return Err(ShowcaseError::IncompleteRecord {
                field: "eventTitle",
            });
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(ShowcaseError::IncompleteRecord { field: "category" });
        }
        Ok((event_title.to_string(), category.to_string()))
    }

    pub fn is_published(&self) -> bool {
        let status = self.status.trim();
        status.is_empty() || status == PUBLISHED
    }

    /// Case-insensitive substring search over the displayed fields.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [
            &self.event_title,
            &self.category,
            &self.winner_name,
            &self.institute,
            &self.winner_email,
            &self.position,
            &self.notes,
        ]
        .iter()
        .join(" ")
        .to_lowercase()
        .contains(&query)
    }
}

/// Group flat result rows into events, categories and ranked winners.
///
/// Rows without an event title or category are skipped. Winners are
/// ordered by [`position_rank`] (ties keep input order), categories by
/// name, and events by title in descending order.
#[instrument(skip_all, fields(rows = rows.len()))]
pub fn group_results(rows: &[ResultRecord]) -> Vec<EventGroup> {
    let mut events: Vec<(String, Vec<(String, Vec<&ResultRecord>)>)> = Vec::new();

    for row in rows {
        let (event_title, category) = match row.grouping_key() {
            Ok(key) => key,
            Err(err) => {
                debug!(id = %row.id, %err, "skipping result row");
                continue;
            }
        };

        let idx = match events.iter().position(|(title, _)| *title == event_title) {
            Some(idx) => idx,
            None => {
                events.push((event_title, Vec::new()));
                events.len() - 1
            }
        };
        let categories = &mut events[idx].1;
        match categories.iter_mut().find(|(name, _)| *name == category) {
            Some((_, winners)) => winners.push(row),
            None => categories.push((category, vec![row])),
        }
    }

    let grouped = events
        .into_iter()
        .map(|(event_title, categories)| EventGroup {
            event_title,
            categories: categories
                .into_iter()
                .map(|(name, winners)| CategoryGroup {
                    name,
                    winners: rank_winners(winners),
                })
                .sorted_by(|a, b| title_order(&a.name, &b.name))
                .collect(),
        })
        .sorted_by(|a, b| title_order(&b.event_title, &a.event_title))
        .collect_vec();

    debug!(events = grouped.len(), "grouped results");
    grouped
}

/// Published rows matching `query`, grouped for the public results page.
#[instrument(skip(rows), fields(rows = rows.len()))]
pub fn public_results(rows: &[ResultRecord], query: &str) -> Vec<EventGroup> {
    let visible = rows
        .iter()
        .filter(|r| r.is_published() && r.matches_query(query))
        .cloned()
        .collect_vec();
    group_results(&visible)
}

fn rank_winners(winners: Vec<&ResultRecord>) -> Vec<RankedWinner> {
    winners
        .into_iter()
        .map(|record| RankedWinner {
            rank: position_rank(&record.position),
            record: record.clone(),
        })
        .sorted_by_key(|w| w.rank)
        .collect()
}
