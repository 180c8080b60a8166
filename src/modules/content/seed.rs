//! Built-in catalogue used when the store holds nothing readable.

use serde::Deserialize;
use tracing::error;

use super::model::{Movie, Series};

const SEED_CATALOG: &str = include_str!("seed_catalog.json");

#[derive(Deserialize)]
struct SeedCatalog {
    movies: Vec<Movie>,
    series: Vec<Series>,
}

fn catalog() -> SeedCatalog {
    serde_json::from_str(SEED_CATALOG).unwrap_or_else(|e| {
        error!(error = %e, "Built-in catalog is unreadable, starting empty");
        SeedCatalog {
            movies: Vec::new(),
            series: Vec::new(),
        }
    })
}

pub fn movies() -> Vec<Movie> {
    catalog().movies
}

pub fn series() -> Vec<Series> {
    catalog().series
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_parses() {
        let seed: SeedCatalog = serde_json::from_str(SEED_CATALOG).unwrap();
        assert_eq!(seed.movies.len(), 8);
        assert_eq!(seed.series.len(), 2);
    }

    #[test]
    fn seeded_series_keep_their_invariants() {
        for series in series() {
            let numbers: Vec<u32> = series.seasons.iter().map(|s| s.season_number).collect();
            let mut sorted = numbers.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(numbers, sorted, "{}", series.id);

            let mut ids = HashSet::new();
            for season in &series.seasons {
                for episode in &season.episodes {
                    assert!(ids.insert(episode.id.clone()), "{}", episode.id);
                }
            }
        }
    }
}
