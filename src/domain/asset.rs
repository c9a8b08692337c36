use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::data::FetchError;

/// Point-in-time market metrics for one asset, as returned by `/coins/markets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub current_price: f64,
    pub price_change_percentage_24h: f64,
    pub market_cap: f64,
}

/// Keeps the first snapshot per id, preserving response order.
pub fn normalize_snapshots(snapshots: Vec<AssetSnapshot>) -> Vec<AssetSnapshot> {
    let mut seen = HashSet::new();
    snapshots
        .into_iter()
        .filter(|s| seen.insert(s.id.clone()))
        .collect()
}

/// The three cards shown by the dashboard, in display order.
#[derive(Debug, Clone, Copy)]
pub struct TrackedAssets<'a> {
    pub cards: [&'a AssetSnapshot; 3],
}

impl<'a> TrackedAssets<'a> {
    /// Locates every expected id in a snapshot list.
    ///
    /// A missing id is an `IncompleteData` error rather than a fetch failure:
    /// the request succeeded but the response did not cover the tracked set.
    pub fn locate(
        snapshots: &'a [AssetSnapshot],
        expected_ids: &[&str; 3],
    ) -> Result<Self, FetchError> {
        let find = |id: &str| snapshots.iter().find(|s| s.id == id);

        let missing: Vec<String> = expected_ids
            .iter()
            .filter(|&&id| find(id).is_none())
            .map(|id| id.to_string())
            .collect();

        match (find(expected_ids[0]), find(expected_ids[1]), find(expected_ids[2])) {
            (Some(a), Some(b), Some(c)) => Ok(Self { cards: [a, b, c] }),
            _ => Err(FetchError::IncompleteData { missing }),
        }
    }
}
