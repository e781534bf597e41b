//! # Catalog
//!
//! The catalog is built once per process and never mutated. Loading is all or nothing:
//!
//! 1. The JSON array is deserialized into [`SongRecord`]s.
//! 2. Records are validated and turned into [`Song`]s in parallel (rayon). Results are
//!    collected in dataset order, so the first failing record is reported no matter how
//!    the work was scheduled.
//! 3. Ids are checked for uniqueness, then the fragment index, the lookups and the
//!    statistics tally are assembled sequentially.
//!
//! The bundled dataset is compiled into the binary with `include_str!`.

use crate::error::LoadError;
use crate::index::FragmentIndex;
use crate::model::{Song, SongId, SongRecord};
use crate::stats::Tally;
use rayon::prelude::*;
use std::collections::HashMap;

const BUNDLED_DATASET: &str = include_str!("../data/jazz_standards.json");

#[derive(Debug)]
pub struct Catalog {
    songs: Vec<Song>,
    by_id: HashMap<SongId, usize>,
    by_title: HashMap<String, usize>,
    index: FragmentIndex,
    tally: Tally,
}

impl Catalog {
    /// Loads the dataset shipped with the crate.
    pub fn bundled() -> Result<Self, LoadError> {
        Self::load(BUNDLED_DATASET)
    }

    /// Loads a catalog from the JSON text of a dataset.
    pub fn load(source: &str) -> Result<Self, LoadError> {
        let records: Vec<SongRecord> = serde_json::from_str(source)?;
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<SongRecord>) -> Result<Self, LoadError> {
        if records.is_empty() {
            return Err(LoadError::Empty);
        }

        let parsed: Vec<Result<Song, LoadError>> = records
            .into_par_iter()
            .enumerate()
            .map(|(index, record)| {
                let title = record
                    .title
                    .clone()
                    .unwrap_or_else(|| "<untitled>".to_string());
                Song::from_record(record).map_err(|reason| LoadError::Record {
                    index,
                    title,
                    reason,
                })
            })
            .collect();

        let songs = parsed.into_iter().collect::<Result<Vec<_>, _>>()?;
        Self::assemble(songs)
    }

    fn assemble(songs: Vec<Song>) -> Result<Self, LoadError> {
        let mut by_id = HashMap::with_capacity(songs.len());
        let mut by_title = HashMap::with_capacity(songs.len());
        for (ix, song) in songs.iter().enumerate() {
            if by_id.insert(song.id.clone(), ix).is_some() {
                return Err(LoadError::DuplicateId {
                    index: ix,
                    id: song.id.to_string(),
                });
            }
            by_title.entry(song.title.to_lowercase()).or_insert(ix);
        }

        let index = FragmentIndex::build(&songs);
        let tally = Tally::from_songs(&songs);
        let catalog = Catalog {
            songs,
            by_id,
            by_title,
            index,
            tally,
        };

        if !catalog.is_alphabetical() {
            tracing::warn!("dataset titles are not in alphabetical order");
        }
        tracing::info!(
            songs = catalog.len(),
            vocabulary = catalog.index.vocabulary_size(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn by_id(&self, id: &SongId) -> Option<&Song> {
        self.by_id.get(id).map(|ix| &self.songs[*ix])
    }

    /// Case-insensitive exact title lookup. The id slug is tried as a fallback, so
    /// `autumn-leaves` finds "Autumn Leaves".
    pub fn find_title(&self, title: &str) -> Option<&Song> {
        let wanted = title.trim();
        self.by_title
            .get(&wanted.to_lowercase())
            .map(|ix| &self.songs[*ix])
            .or_else(|| self.by_id(&SongId::new(wanted)))
            .or_else(|| self.by_id(&SongId::slug(wanted)))
    }

    pub fn index(&self) -> &FragmentIndex {
        &self.index
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Titles in case-insensitive alphabetical order, as the dataset tooling keeps them.
    pub fn is_alphabetical(&self) -> bool {
        self.songs
            .windows(2)
            .all(|pair| pair[0].title.to_lowercase() <= pair[1].title.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;

    const TWO_SONGS: &str = r#"[
        {"Title": "Blue Monk", "Composer": "Thelonious Monk", "Key": "Bb",
         "Sections": [{"MainSegment": {"Chords": "Bb7|Eb7|Bb7|Bb7"}}]},
        {"Title": "Oleo", "Composer": "Sonny Rollins", "Key": "Bb", "Year": 1954,
         "Sections": [{"Label": "A", "MainSegment": {"Chords": "Bb^7,G-7|C-7,F7"}}],
         "Unused": true}
    ]"#;

    #[test]
    fn test_load_small_dataset() {
        let catalog = Catalog::load(TWO_SONGS).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.is_alphabetical());
        assert_eq!(catalog.find_title("OLEO").unwrap().year, Some(1954));
        assert_eq!(catalog.find_title("blue-monk").unwrap().title, "Blue Monk");
        assert!(catalog.find_title("Giant Steps").is_none());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Catalog::load("{not json"),
            Err(LoadError::Malformed(_))
        ));
        assert!(matches!(Catalog::load("[]"), Err(LoadError::Empty)));
    }

    #[test]
    fn test_first_bad_record_in_dataset_order_is_reported() {
        let source = r#"[
            {"Title": "Fine", "Composer": "A"},
            {"Title": "Bad Chords", "Composer": "B",
             "Sections": [{"Label": "A", "MainSegment": {"Chords": "Cmaj7"}}]},
            {"Title": "No Composer"}
        ]"#;
        match Catalog::load(source) {
            Err(LoadError::Record {
                index,
                title,
                reason,
            }) => {
                assert_eq!(index, 1);
                assert_eq!(title, "Bad Chords");
                assert!(matches!(reason, RecordError::Chord { .. }));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_record_without_usable_id_is_rejected() {
        let source = r#"[
            {"Title": "Solar", "Composer": "Miles Davis"},
            {"Title": "???", "Composer": "Nobody"}
        ]"#;
        match Catalog::load(source) {
            Err(LoadError::Record { index, reason, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(reason, RecordError::EmptyId);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let source = r#"[
            {"Title": "Solar", "Composer": "Miles Davis"},
            {"Title": "SOLAR", "Composer": "Chuck Wayne"}
        ]"#;
        match Catalog::load(source) {
            Err(LoadError::DuplicateId { index, id }) => {
                assert_eq!(index, 1);
                assert_eq!(id, "solar");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_unordered_titles_still_load() {
        let source = r#"[
            {"Title": "Oleo", "Composer": "Sonny Rollins"},
            {"Title": "Airegin", "Composer": "Sonny Rollins"}
        ]"#;
        let catalog = Catalog::load(source).unwrap();
        assert!(!catalog.is_alphabetical());
    }

    #[test]
    fn test_bundled_dataset_loads() {
        let catalog = Catalog::bundled().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.is_alphabetical());
    }
}
