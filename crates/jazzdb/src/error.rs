//! Error types.
//!
//! Errors are split by the phase that detects them:
//!
//! - [`LoadError`] (with [`RecordError`] and [`ChordError`] as detail) is raised while the
//!   catalog is built. It is fatal: a catalog is either fully loaded or not at all.
//! - [`QueryError`] is raised while turning user input into a [`crate::query::Query`].
//!
//! Once a catalog exists, running a query cannot fail on data shape. A search that matches
//! nothing is an empty result, never an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JazzError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),
}

pub type Result<T> = std::result::Result<T, JazzError>;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("dataset is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("record {index} ({title}): {reason}")]
    Record {
        index: usize,
        title: String,
        #[source]
        reason: RecordError,
    },

    #[error("record {index}: duplicate song id '{id}'")]
    DuplicateId { index: usize, id: String },

    #[error("dataset contains no songs")]
    Empty,
}

/// Why a single dataset record was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing title")]
    MissingTitle,

    #[error("missing composer")]
    MissingComposer,

    #[error("title yields an empty id")]
    EmptyId,

    #[error("invalid key '{0}'")]
    InvalidKey(String),

    #[error("section {section}: {source}")]
    Chord {
        section: String,
        #[source]
        source: ChordError,
    },

    #[error("section {0} has no chords")]
    EmptySection(String),

    #[error("sections are declared but contain no chords")]
    EmptyProgression,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChordError {
    #[error("empty chord notation")]
    Empty,

    #[error("empty bar in '{0}'")]
    EmptyBar(String),

    #[error("invalid note '{0}'")]
    InvalidNote(String),

    #[error("unknown chord quality '{descriptor}' in '{token}'")]
    UnknownQuality { token: String, descriptor: String },

    #[error("missing bass note in '{0}'")]
    MissingBass(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("unbalanced quote starting at position {0}")]
    UnbalancedQuote(usize),

    #[error("unknown search field '{0}' (expected title, composer, performer, style, key, time, year or era)")]
    UnknownField(String),

    #[error("empty value for '{0}:'")]
    EmptyFilter(String),

    #[error("invalid key '{0}' (expected e.g. C, Bb, F#-, G minor)")]
    InvalidKey(String),

    #[error("invalid year '{0}'")]
    InvalidYear(String),

    #[error("invalid era '{0}' (expected a decade such as 1950s)")]
    InvalidEra(String),

    #[error("invalid chord changes: {0}")]
    InvalidChanges(#[from] ChordError),
}
