// roster-service/src/engine.rs
//
// The roster view pipeline: filter -> search -> sort, applied in that fixed
// order, plus the badge counts shown next to the filter buttons. Pure
// functions of their inputs.
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;

use crate::models::Teammate;

// Mutually exclusive roster filter modes. An unrecognized selector falls
// back to `All`, the same way an unknown filter selector falls through in
// the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    Unvalidated,
    Products,
    Groups,
    #[default]
    All,
}

impl FilterMode {
    pub fn from_selector(selector: &str) -> FilterMode {
        match selector {
            "unvalidated" => FilterMode::Unvalidated,
            "products" => FilterMode::Products,
            "groups" => FilterMode::Groups,
            _ => FilterMode::All,
        }
    }
}

impl<'de> Deserialize<'de> for FilterMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let selector = String::deserialize(deserializer)?;
        Ok(FilterMode::from_selector(&selector))
    }
}

// Badge counts computed over the full roster, never the filtered view
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeCounts {
    pub unvalidated: usize,
    pub products: usize,
    pub groups: usize,
}

// Derive the display list for the roster view.
//
// Filter keeps teammates whose selected progress flag is still unset, search
// keeps teammates where any searchable string field contains the lowercased
// term, and the final sort puts the most recently updated teammates first.
// Teammates without a usable `updatedAt` sort after every stamped one; the
// sort is stable, so ties keep their incoming order.
pub fn roster_view(teammates: &[Teammate], filter: FilterMode, search_term: &str) -> Vec<Teammate> {
    let needle = search_term.to_lowercase();

    let mut view: Vec<Teammate> = teammates
        .iter()
        .filter(|tm| match filter {
            FilterMode::Unvalidated => !tm.validated,
            FilterMode::Products => !tm.product_collected,
            FilterMode::Groups => !tm.added_to_groups,
            FilterMode::All => true,
        })
        .filter(|tm| {
            tm.searchable_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();

    view.sort_by(|a, b| match (a.updated_at, b.updated_at) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    view
}

// Summary counts for the filter badges, taken over the unfiltered,
// unsearched roster.
pub fn badge_counts(teammates: &[Teammate]) -> BadgeCounts {
    BadgeCounts {
        unvalidated: teammates.iter().filter(|tm| !tm.validated).count(),
        products: teammates.iter().filter(|tm| !tm.product_collected).count(),
        groups: teammates.iter().filter(|tm| !tm.added_to_groups).count(),
    }
}
