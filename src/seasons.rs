use std::cmp::Reverse;

use crate::data_loader::SeasonEntry;

// Leading year of a season label like "2023-24". Labels that do not start
// with a number yield None.
pub fn starting_year(label: &str) -> Option<i32> {
    label.split('-').next().and_then(|head| head.trim().parse().ok())
}

// Most recent season first; entries whose label does not parse sink to the
// bottom of the list.
pub fn sort_seasons(seasons: &mut [SeasonEntry]) {
    seasons.sort_by_key(|s| Reverse(starting_year(&s.year).unwrap_or(i32::MIN)));
}

// The season in progress is the newest one with no champion on record.
// Expects a list already ordered by sort_seasons.
pub fn current_season(seasons: &[SeasonEntry]) -> Option<&SeasonEntry> {
    seasons.first().filter(|s| !s.is_concluded())
}
