//! # Search
//!
//! [`search`] ranks the songs of a catalog against a [`Query`].
//!
//! ## Matching
//!
//! A query is a set of tokens. A field value (one title, one composer, one performer or one
//! style tag) matches when **every** token resolves to it through the fragment index, so
//! `miles davis` matches the composer "Miles Davis" but not a song whose title contains
//! "Miles" and whose performer is "Eddie Lockjaw Davis".
//!
//! ## Scoring
//!
//! | value matches                      | score                                       |
//! |------------------------------------|---------------------------------------------|
//! | the whole query (case-insensitive) | title 100, performer 90, composer 85, style 60 |
//! | token by token                     | 50 × field weight × mean token weight       |
//!
//! Field weights are title 1.0, performer 0.9, composer 0.85 and style 0.6. Token weights
//! are listed on [`TokenMatch::weight`]. Per song the best value of each field is kept and
//! the four field scores are summed.
//!
//! Songs with a value equal to the whole query rank first, so the title "Monk" beats "Blue
//! Monk" by Thelonious Monk however many fields the latter matches. Within each group
//! results are ordered by score (descending), then title (case-insensitive), then id.
//!
//! ## Filters
//!
//! Filters drop songs before scoring. A query made of filters only returns every passing
//! song with score 0, ordered by title.

use crate::catalog::Catalog;
use crate::index::{tokenize, Field, Posting, TokenMatch};
use crate::model::{Song, SongId};
use crate::query::Query;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

const TOKEN_SCORE: f64 = 50.0;

/// Why a song was returned: the best matching value of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
    pub field: Field,
    pub value: String,
    pub exact: bool,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'c> {
    pub song: &'c Song,
    pub score: f64,
    pub matched: Vec<FieldMatch>,
}

impl SearchHit<'_> {
    /// Whether some field value equals the whole query.
    pub fn is_exact(&self) -> bool {
        self.matched.iter().any(|m| m.exact)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult<'c> {
    pub query: String,
    pub hits: Vec<SearchHit<'c>>,
    pub count: usize,
}

impl<'c> SearchResult<'c> {
    fn new(query: &Query, hits: Vec<SearchHit<'c>>) -> Self {
        Self {
            query: query.to_string(),
            count: hits.len(),
            hits,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn top(&self) -> Option<&SearchHit<'c>> {
        self.hits.first()
    }

    /// Keeps the first `limit` hits. `count` still reports every match.
    pub fn truncate(&mut self, limit: usize) {
        self.hits.truncate(limit);
    }
}

pub fn search<'c>(catalog: &'c Catalog, query: &Query) -> SearchResult<'c> {
    if query.is_empty() {
        return SearchResult::new(query, Vec::new());
    }

    let songs = catalog.songs();
    let mut hits: Vec<SearchHit<'c>> = if query.tokens().is_empty() {
        songs
            .iter()
            .filter(|song| query.accepts(song))
            .map(|song| SearchHit {
                song,
                score: 0.0,
                matched: Vec::new(),
            })
            .collect()
    } else {
        score_tokens(catalog, query)
    };

    hits.sort_by(|a, b| {
        b.is_exact()
            .cmp(&a.is_exact())
            .then_with(|| b.score.total_cmp(&a.score))
            .then_with(|| compare_titles(a.song, b.song))
    });

    tracing::debug!(query = %query, hits = hits.len(), "search finished");
    SearchResult::new(query, hits)
}

fn compare_titles(a: &Song, b: &Song) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.id.cmp(&b.id))
}

/// Postings reached by every query token, with the summed token weight.
fn resolve_values(catalog: &Catalog, tokens: &[String]) -> HashMap<Posting, f64> {
    let index = catalog.index();
    let mut values: Option<HashMap<Posting, f64>> = None;

    for token in tokens {
        let found = index.lookup(token);
        values = Some(match values {
            None => found
                .into_iter()
                .map(|(posting, how)| (posting, how.weight()))
                .collect(),
            Some(mut so_far) => {
                so_far.retain(|posting, _| found.contains_key(posting));
                for (posting, weight) in so_far.iter_mut() {
                    *weight += found.get(posting).map_or(0.0, |m: &TokenMatch| m.weight());
                }
                so_far
            }
        });
        if values.as_ref().is_some_and(|v| v.is_empty()) {
            break;
        }
    }

    values.unwrap_or_default()
}

fn score_tokens<'c>(catalog: &'c Catalog, query: &Query) -> Vec<SearchHit<'c>> {
    let songs = catalog.songs();
    let tokens = query.tokens();
    let token_count = tokens.len() as f64;

    // song index -> field -> best match
    let mut best: BTreeMap<usize, BTreeMap<Field, FieldMatch>> = BTreeMap::new();

    for (posting, weight_sum) in resolve_values(catalog, tokens) {
        let song = &songs[posting.song];
        if !query.accepts(song) {
            continue;
        }
        let Some(value) = posting.field.values(song).get(posting.slot).copied() else {
            continue;
        };

        let exact = tokenize(value) == tokens;
        let score = if exact {
            posting.field.exact_score()
        } else {
            TOKEN_SCORE * posting.field.weight() * (weight_sum / token_count)
        };

        let candidate = FieldMatch {
            field: posting.field,
            value: value.to_string(),
            exact,
            score,
        };
        let per_field = best.entry(posting.song).or_default();
        match per_field.get(&posting.field) {
            Some(current) if !is_better(&candidate, current) => {}
            _ => {
                per_field.insert(posting.field, candidate);
            }
        }
    }

    best.into_iter()
        .map(|(song_ix, fields)| {
            let matched: Vec<FieldMatch> = fields.into_values().collect();
            SearchHit {
                song: &songs[song_ix],
                score: matched.iter().map(|m| m.score).sum(),
                matched,
            }
        })
        .collect()
}

// Higher score wins; equal scores keep the alphabetically first value so results are stable.
fn is_better(candidate: &FieldMatch, current: &FieldMatch) -> bool {
    match candidate.score.total_cmp(&current.score) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => candidate.value < current.value,
    }
}

/// Ids of the hits, in rank order.
pub fn hit_ids<'a>(result: &'a SearchResult<'_>) -> impl Iterator<Item = &'a SongId> {
    result.hits.iter().map(|hit| &hit.song.id)
}
