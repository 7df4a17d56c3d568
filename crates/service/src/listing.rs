//! Pure filter/sort over the service collection. No storage access, no
//! mutation of the input; the HTTP layer feeds it whatever the catalog
//! returned.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use models::service::{Service, ServiceCategory, ServiceStatus};

/// Field the listing is ordered by. Unknown wire values fall back to
/// `Updated`, which orders by last modification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Newest,
    Popularity,
    Name,
    Rating,
    Updated,
}

impl<'de> serde::Deserialize<'de> for SortKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::Newest
    }
}

impl SortKey {
    /// Total parse: anything unrecognized orders by `updated_at`.
    pub fn parse(s: &str) -> Self {
        match s {
            "newest" => Self::Newest,
            "popularity" => Self::Popularity,
            "name" => Self::Name,
            "rating" => Self::Rating,
            _ => Self::Updated,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::Desc
    }
}

impl SortOrder {
    pub fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn parse(s: &str) -> Self {
        if s == "asc" {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

/// Listing parameters. `None` on `status`/`category` is the "All"
/// sentinel: no constraint on that field.
#[derive(Clone, Debug, Default)]
pub struct ListQuery {
    pub search: String,
    pub status: Option<ServiceStatus>,
    pub category: Option<ServiceCategory>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

/// Apply filter then sort, returning a fresh ordered collection.
///
/// The base comparator of every sort key encodes its descending
/// orientation (for `name`, reverse lexicographic); the result is negated
/// exactly when ascending order is requested. Ties keep their prior
/// relative order.
pub fn filter_and_sort(services: &[Service], query: &ListQuery) -> Vec<Service> {
    let needle = query.search.to_lowercase();
    let mut rows: Vec<Service> = services
        .iter()
        .filter(|s| matches(s, query, &needle))
        .cloned()
        .collect();

    rows.sort_by(|a, b| {
        let comparison = base_comparison(a, b, query.sort_by);
        match query.sort_order {
            SortOrder::Asc => comparison.reverse(),
            SortOrder::Desc => comparison,
        }
    });
    rows
}

/// Selecting the field already sorted on flips the order; selecting a new
/// field resets to descending.
pub fn toggle_sort(sort_by: SortKey, sort_order: SortOrder, selected: SortKey) -> (SortKey, SortOrder) {
    if sort_by == selected {
        (sort_by, sort_order.flip())
    } else {
        (selected, SortOrder::Desc)
    }
}

fn matches(service: &Service, query: &ListQuery, needle: &str) -> bool {
    let matches_search = needle.is_empty()
        || service.name.to_lowercase().contains(needle)
        || service.description.to_lowercase().contains(needle)
        || service.category.as_str().to_lowercase().contains(needle);
    let matches_status = query.status.map_or(true, |s| service.status == s);
    let matches_category = query.category.map_or(true, |c| service.category == c);
    matches_search && matches_status && matches_category
}

fn base_comparison(a: &Service, b: &Service, key: SortKey) -> Ordering {
    match key {
        SortKey::Newest => b.created_at.cmp(&a.created_at),
        SortKey::Popularity => b.popularity.cmp(&a.popularity),
        SortKey::Name => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
        SortKey::Rating => b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal),
        SortKey::Updated => b.updated_at.cmp(&a.updated_at),
    }
}
