//! # Fragment Index
//!
//! Search never scans song text at query time. When the catalog is built every searchable
//! field value is tokenized and recorded here:
//!
//! - **Token map**: `token → postings`, where a [`Posting`] names the song, the field and the
//!   position of the value inside that field (a song can have several composers).
//! - **Suffix map**: `suffix → tokens` for every suffix of every token. A fragment `f` occurs
//!   inside token `t` exactly when `f` is a prefix of one of `t`'s suffixes, so substring
//!   lookups become a range scan over sorted keys.
//!
//! ## Token Resolution
//!
//! [`FragmentIndex::lookup`] resolves one query token in stages:
//!
//! 1. **Exact**: the token is in the vocabulary.
//! 2. **Fragment**: the token occurs inside longer vocabulary tokens (`bird` in `birdland`).
//!    Needs at least two characters.
//! 3. **Fuzzy**: only when stages 1 and 2 found nothing. Vocabulary tokens within Levenshtein
//!    distance 1 (query tokens up to four characters) or 2 (longer tokens). Needs at least
//!    three characters.
//!
//! Each posting keeps the best [`TokenMatch`] it was reached by.

use crate::model::Song;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::ops::Bound;

const MIN_FRAGMENT_LEN: usize = 2;
const MIN_FUZZY_LEN: usize = 3;

/// The searchable fields of a song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Performer,
    Composer,
    Style,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Title, Field::Performer, Field::Composer, Field::Style];

    /// The values of this field on `song`, in a stable order.
    pub fn values(self, song: &Song) -> Vec<&str> {
        match self {
            Field::Title => vec![song.title.as_str()],
            Field::Composer => song.composers.iter().map(String::as_str).collect(),
            Field::Performer => song.performers.iter().map(String::as_str).collect(),
            Field::Style => song.styles.iter().map(String::as_str).collect(),
        }
    }

    /// Score for a value matching the whole query.
    pub fn exact_score(self) -> f64 {
        match self {
            Field::Title => 100.0,
            Field::Performer => 90.0,
            Field::Composer => 85.0,
            Field::Style => 60.0,
        }
    }

    pub fn weight(self) -> f64 {
        match self {
            Field::Title => 1.0,
            Field::Performer => 0.9,
            Field::Composer => 0.85,
            Field::Style => 0.6,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Performer => "performer",
            Field::Composer => "composer",
            Field::Style => "style",
        };
        f.write_str(name)
    }
}

/// One field value of one song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Posting {
    pub song: usize,
    pub field: Field,
    pub slot: usize,
}

/// How a query token reached a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMatch {
    Exact,
    Fragment,
    Fuzzy(usize),
}

impl TokenMatch {
    pub fn weight(self) -> f64 {
        match self {
            TokenMatch::Exact => 1.0,
            TokenMatch::Fragment => 0.7,
            TokenMatch::Fuzzy(1) => 0.5,
            TokenMatch::Fuzzy(_) => 0.35,
        }
    }
}

/// Lowercases `text` and splits it into alphanumeric tokens. Apostrophes are dropped so
/// `Needn't` and `neednt` are the same token.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '\'' | '’'))
        .flat_map(char::to_lowercase)
        .collect();
    cleaned
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn fuzzy_limit(token: &str) -> usize {
    if token.chars().count() <= 4 {
        1
    } else {
        2
    }
}

fn record(found: &mut HashMap<Posting, TokenMatch>, postings: &[Posting], how: TokenMatch) {
    for posting in postings {
        let entry = found.entry(*posting).or_insert(how);
        if how.weight() > entry.weight() {
            *entry = how;
        }
    }
}

#[derive(Debug, Default)]
pub struct FragmentIndex {
    tokens: BTreeMap<String, Vec<Posting>>,
    suffixes: BTreeMap<String, BTreeSet<String>>,
}

impl FragmentIndex {
    pub fn build(songs: &[Song]) -> Self {
        let mut tokens: BTreeMap<String, Vec<Posting>> = BTreeMap::new();
        for (song_ix, song) in songs.iter().enumerate() {
            for field in Field::ALL {
                for (slot, value) in field.values(song).into_iter().enumerate() {
                    let posting = Posting {
                        song: song_ix,
                        field,
                        slot,
                    };
                    for token in tokenize(value) {
                        let postings = tokens.entry(token).or_default();
                        if postings.last() != Some(&posting) {
                            postings.push(posting);
                        }
                    }
                }
            }
        }

        let mut suffixes: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for token in tokens.keys() {
            for (start, _) in token.char_indices() {
                suffixes
                    .entry(token[start..].to_string())
                    .or_default()
                    .insert(token.clone());
            }
        }

        Self { tokens, suffixes }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.tokens.len()
    }

    /// Vocabulary tokens containing `fragment`, the fragment itself excluded.
    fn containing(&self, fragment: &str) -> BTreeSet<&str> {
        self.suffixes
            .range::<str, _>((Bound::Included(fragment), Bound::Unbounded))
            .take_while(|(suffix, _)| suffix.starts_with(fragment))
            .flat_map(|(_, tokens)| tokens.iter().map(String::as_str))
            .filter(|token| *token != fragment)
            .collect()
    }

    fn near(&self, token: &str) -> Vec<(&str, usize)> {
        let limit = fuzzy_limit(token);
        let len = token.chars().count();
        self.tokens
            .keys()
            .filter(|candidate| candidate.chars().count().abs_diff(len) <= limit)
            .filter_map(|candidate| {
                let distance = strsim::levenshtein(token, candidate);
                (distance <= limit).then_some((candidate.as_str(), distance))
            })
            .collect()
    }

    /// Resolves one lowercase query token to the postings it reaches.
    pub fn lookup(&self, token: &str) -> HashMap<Posting, TokenMatch> {
        let mut found: HashMap<Posting, TokenMatch> = HashMap::new();

        if let Some(postings) = self.tokens.get(token) {
            record(&mut found, postings, TokenMatch::Exact);
        }

        if token.chars().count() >= MIN_FRAGMENT_LEN {
            for longer in self.containing(token) {
                if let Some(postings) = self.tokens.get(longer) {
                    record(&mut found, postings, TokenMatch::Fragment);
                }
            }
        }

        if found.is_empty() && token.chars().count() >= MIN_FUZZY_LEN {
            for (candidate, distance) in self.near(token) {
                if let Some(postings) = self.tokens.get(candidate) {
                    record(&mut found, postings, TokenMatch::Fuzzy(distance));
                }
            }
        }

        tracing::debug!(token, postings = found.len(), "resolved query token");
        found
    }
}
