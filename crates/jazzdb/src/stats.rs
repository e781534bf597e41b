//! Aggregate statistics over the catalog.
//!
//! Counters are tallied once while the catalog is built ([`Tally`]); [`stats`] only sorts
//! and slices them, so repeated reports over the same catalog are identical.

use crate::catalog::Catalog;
use crate::model::Song;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

/// How many songs carry each optional piece of information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub composer: usize,
    pub key: usize,
    pub style: usize,
    pub time_signature: usize,
    pub year: usize,
    pub performers: usize,
    pub sections: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Tally {
    pub total: usize,
    pub coverage: Coverage,
    pub by_key: BTreeMap<String, usize>,
    pub by_style: BTreeMap<String, usize>,
    pub by_era: BTreeMap<String, usize>,
    pub by_composer: BTreeMap<String, usize>,
    pub by_performer: BTreeMap<String, usize>,
    pub by_time_signature: BTreeMap<String, usize>,
}

fn bump(map: &mut BTreeMap<String, usize>, label: &str) {
    *map.entry(label.to_string()).or_default() += 1;
}

impl Tally {
    pub fn from_songs(songs: &[Song]) -> Self {
        let mut tally = Tally {
            total: songs.len(),
            ..Default::default()
        };
        for song in songs {
            tally.add(song);
        }
        tally
    }

    fn add(&mut self, song: &Song) {
        let coverage = &mut self.coverage;
        if !song.composers.is_empty() {
            coverage.composer += 1;
        }
        if let Some(key) = &song.key {
            coverage.key += 1;
            bump(&mut self.by_key, &key.to_string());
        }
        if !song.styles.is_empty() {
            coverage.style += 1;
        }
        if let Some(time) = &song.time_signature {
            coverage.time_signature += 1;
            bump(&mut self.by_time_signature, time);
        }
        if let Some(era) = song.era() {
            coverage.year += 1;
            bump(&mut self.by_era, &era);
        }
        if !song.performers.is_empty() {
            coverage.performers += 1;
        }
        if !song.progression.is_empty() {
            coverage.sections += 1;
        }

        for style in &song.styles {
            bump(&mut self.by_style, style);
        }
        for composer in &song.composers {
            bump(&mut self.by_composer, composer);
        }
        for performer in &song.performers {
            bump(&mut self.by_performer, performer);
        }
    }
}

/// Count descending, then label ascending.
pub fn ranked(map: &BTreeMap<String, usize>) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = map
        .iter()
        .map(|(label, count)| Bucket {
            label: label.clone(),
            count: *count,
        })
        .collect();
    // BTreeMap iteration is already label-ordered; a stable sort keeps it within a count
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}

/// Label order. Era labels are four-digit decades, so this is chronological.
pub fn chronological(map: &BTreeMap<String, usize>) -> Vec<Bucket> {
    map.iter()
        .map(|(label, count)| Bucket {
            label: label.clone(),
            count: *count,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub total: usize,
    pub coverage: Coverage,
    pub keys: Vec<Bucket>,
    pub styles: Vec<Bucket>,
    pub eras: Vec<Bucket>,
    pub time_signatures: Vec<Bucket>,
    pub composers: Vec<Bucket>,
    pub performers: Vec<Bucket>,
    pub distinct_composers: usize,
    pub distinct_performers: usize,
}

/// Builds the report. `top` bounds the composer and performer lists.
pub fn stats(catalog: &Catalog, top: usize) -> StatsReport {
    let tally = catalog.tally();
    let mut composers = ranked(&tally.by_composer);
    composers.truncate(top);
    let mut performers = ranked(&tally.by_performer);
    performers.truncate(top);

    StatsReport {
        total: tally.total,
        coverage: tally.coverage.clone(),
        keys: ranked(&tally.by_key),
        styles: ranked(&tally.by_style),
        eras: chronological(&tally.by_era),
        time_signatures: ranked(&tally.by_time_signature),
        composers,
        performers,
        distinct_composers: tally.by_composer.len(),
        distinct_performers: tally.by_performer.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixture_catalog;

    #[test]
    fn test_totals_and_coverage() {
        let catalog = fixture_catalog();
        let report = stats(&catalog, 10);
        assert_eq!(report.total, catalog.len());
        assert_eq!(report.coverage.composer, catalog.len());
        assert!(report.coverage.key <= report.total);
        let keyed: usize = report.keys.iter().map(|b| b.count).sum();
        assert_eq!(keyed, report.coverage.key);
    }

    #[test]
    fn test_ranked_ordering() {
        let map = BTreeMap::from([
            ("Bb".to_string(), 2),
            ("F".to_string(), 3),
            ("C".to_string(), 2),
            ("Eb".to_string(), 1),
        ]);
        let labels: Vec<String> = ranked(&map).into_iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["F", "Bb", "C", "Eb"]);
    }

    #[test]
    fn test_eras_are_chronological() {
        let catalog = fixture_catalog();
        let report = stats(&catalog, 10);
        let eras: Vec<&str> = report.eras.iter().map(|b| b.label.as_str()).collect();
        let mut sorted = eras.clone();
        sorted.sort();
        assert_eq!(eras, sorted);
    }

    #[test]
    fn test_top_bounds_composers() {
        let catalog = fixture_catalog();
        let report = stats(&catalog, 2);
        assert_eq!(report.composers.len(), 2);
        assert_eq!(report.composers[0].label, "Miles Davis");
        assert!(report.distinct_composers > 2);
    }

    #[test]
    fn test_report_is_deterministic() {
        let catalog = fixture_catalog();
        assert_eq!(stats(&catalog, 5), stats(&catalog, 5));
    }
}
