//! # Domain Model: Songs and Dataset Records
//!
//! The bundled dataset is a JSON array of records in the JazzStandards layout:
//!
//! ```json
//! {
//!   "Title": "Autumn Leaves",
//!   "Composer": "Joseph Kosma, Johnny Mercer",
//!   "Year": 1945,
//!   "Key": "G-",
//!   "Rhythm": "Medium Swing",
//!   "TimeSignature": "4/4",
//!   "Performers": ["Cannonball Adderley", "Miles Davis"],
//!   "Sections": [
//!     { "Label": "A", "Repeats": 2, "MainSegment": { "Chords": "C-7|F7|Bb^7|Eb^7" } }
//!   ]
//! }
//! ```
//!
//! [`SongRecord`] mirrors that layout loosely (everything optional), and [`Song::from_record`]
//! turns it into a validated [`Song`]:
//!
//! - **Title and composer** are required and trimmed.
//! - **Composers** are split from the credit on `,`, `/`, `&` and the word `and`.
//! - **Style tags** come from `Rhythm`, split on `/` and `,`.
//! - **Key** is parsed into tonic and mode.
//! - **Sections** have every chord parsed. A record that declares sections must contain at
//!   least one chord.
//! - **Id** defaults to a slug of the title (`"Well, You Needn't"` → `well-you-neednt`).

use crate::error::RecordError;
use crate::progression::chord::Key;
use crate::progression::similarity::{normalize, NormalizedProgression};
use crate::progression::{Progression, Section, Segment};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Stable identifier of a song within the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Lowercase slug: alphanumeric runs joined with `-`, apostrophes dropped. Letters
    /// outside ASCII are kept (`Águas de Março` → `águas-de-março`).
    pub fn slug(title: &str) -> Self {
        let mut slug = String::with_capacity(title.len());
        let mut pending_dash = false;
        for c in title.chars().filter(|c| !matches!(c, '\'' | '’')) {
            if c.is_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.extend(c.to_lowercase());
            } else {
                pending_dash = true;
            }
        }
        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SegmentRecord {
    pub chords: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SectionRecord {
    pub label: Option<String>,
    pub repeats: Option<u32>,
    pub main_segment: Option<SegmentRecord>,
    pub endings: Option<Vec<SegmentRecord>>,
}

/// One raw entry of the dataset, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SongRecord {
    pub id: Option<String>,
    pub title: Option<String>,
    pub composer: Option<String>,
    pub year: Option<u32>,
    pub key: Option<String>,
    pub rhythm: Option<String>,
    pub time_signature: Option<String>,
    #[serde(default)]
    pub performers: Vec<String>,
    pub sections: Option<Vec<SectionRecord>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub composers: Vec<String>,
    pub performers: BTreeSet<String>,
    pub key: Option<Key>,
    pub styles: Vec<String>,
    pub time_signature: Option<String>,
    pub year: Option<u32>,
    pub progression: Progression,
    #[serde(skip)]
    normalized: NormalizedProgression,
}

impl Song {
    pub fn from_record(record: SongRecord) -> Result<Self, RecordError> {
        let title = non_empty(record.title).ok_or(RecordError::MissingTitle)?;

        let composers = record
            .composer
            .as_deref()
            .map(split_credits)
            .unwrap_or_default();
        if composers.is_empty() {
            return Err(RecordError::MissingComposer);
        }

        let key = match non_empty(record.key) {
            Some(raw) => Some(
                raw.parse::<Key>()
                    .map_err(|_| RecordError::InvalidKey(raw.clone()))?,
            ),
            None => None,
        };

        let styles = record
            .rhythm
            .as_deref()
            .map(split_styles)
            .unwrap_or_default();

        let performers: BTreeSet<String> = record
            .performers
            .into_iter()
            .filter_map(|p| non_empty(Some(p)))
            .collect();

        let progression = match record.sections {
            Some(sections) => parse_sections(sections)?,
            None => Progression::default(),
        };
        let normalized = normalize(&progression, key.as_ref());

        let id = match non_empty(record.id) {
            Some(id) => SongId::new(id),
            None => SongId::slug(&title),
        };
        if id.as_str().is_empty() {
            return Err(RecordError::EmptyId);
        }

        Ok(Song {
            id,
            title,
            composers,
            performers,
            key,
            styles,
            time_signature: non_empty(record.time_signature),
            year: record.year,
            progression,
            normalized,
        })
    }

    /// The progression rewritten relative to the song's key, computed at load.
    pub fn normalized(&self) -> &NormalizedProgression {
        &self.normalized
    }

    /// The decade the song was written in, e.g. `1950s`.
    pub fn era(&self) -> Option<String> {
        self.year.map(era_of)
    }

    pub fn composer_credit(&self) -> String {
        self.composers.join(", ")
    }
}

pub fn era_of(year: u32) -> String {
    format!("{}s", year / 10 * 10)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Splits a composer credit such as `"Duke Ellington, Billy Strayhorn & Johnny Mercer"`.
fn split_credits(credit: &str) -> Vec<String> {
    credit
        .split([',', '/', '&'])
        .flat_map(|part| part.split(" and "))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_styles(rhythm: &str) -> Vec<String> {
    rhythm
        .split(['/', ','])
        .map(str::trim)
        .filter(|style| !style.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_segment(record: SegmentRecord, section: &str) -> Result<Option<Segment>, RecordError> {
    match non_empty(record.chords) {
        Some(chords) => chords
            .parse::<Segment>()
            .map(Some)
            .map_err(|source| RecordError::Chord {
                section: section.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

fn parse_sections(records: Vec<SectionRecord>) -> Result<Progression, RecordError> {
    let mut sections = Vec::with_capacity(records.len());
    for (i, record) in records.into_iter().enumerate() {
        let name = record
            .label
            .clone()
            .unwrap_or_else(|| format!("#{}", i + 1));

        let main = match record.main_segment {
            Some(segment) => parse_segment(segment, &name)?,
            None => None,
        };
        let mut endings = Vec::new();
        for ending in record.endings.unwrap_or_default() {
            if let Some(segment) = parse_segment(ending, &name)? {
                endings.push(segment);
            }
        }

        if main.is_none() && endings.is_empty() {
            return Err(RecordError::EmptySection(name));
        }

        sections.push(Section {
            label: non_empty(record.label),
            repeats: record.repeats,
            main,
            endings,
        });
    }

    let progression = Progression::new(sections);
    if progression.is_empty() {
        return Err(RecordError::EmptyProgression);
    }
    Ok(progression)
}
