//! # Command Layer
//!
//! One submodule per CLI verb. Commands work on a loaded [`Catalog`] and return a
//! [`CmdResult`]: structured data plus leveled messages. They never print, never read
//! arguments and never pick exit codes; the CLI renders whatever comes back.
//!
//! Because the catalog is immutable, results borrow songs from it instead of cloning them.
//!
//! - [`search`]: ranked free-text search with filters
//! - [`filter`]: filter-only listing
//! - [`stats`]: aggregate statistics
//! - [`show`]: one song in detail, with suggestions when the title is unknown
//! - [`list`]: distinct values of a field with counts
//! - [`similar`]: songs with the most similar key-normalized changes

use crate::model::Song;
use crate::search::SearchResult;
use crate::stats::{Bucket, StatsReport};
use serde::Serialize;

pub mod filter;
pub mod list;
pub mod search;
pub mod show;
pub mod similar;
pub mod stats;

pub use list::ListField;
pub use similar::SimilarSong;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult<'c> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchResult<'c>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub songs: Vec<&'c Song>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Bucket>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub similar: Vec<SimilarSong<'c>>,
    /// The song `similar` compared against, when looked up by title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<&'c Song>,
    pub messages: Vec<CmdMessage>,
}

impl<'c> CmdResult<'c> {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_search(mut self, result: SearchResult<'c>) -> Self {
        self.search = Some(result);
        self
    }

    pub fn with_songs(mut self, songs: Vec<&'c Song>) -> Self {
        self.songs = songs;
        self
    }

    pub fn with_stats(mut self, report: StatsReport) -> Self {
        self.stats = Some(report);
        self
    }

    pub fn with_values(mut self, values: Vec<Bucket>) -> Self {
        self.values = values;
        self
    }

    pub fn with_similar(mut self, similar: Vec<SimilarSong<'c>>) -> Self {
        self.similar = similar;
        self
    }

    pub fn with_reference(mut self, song: &'c Song) -> Self {
        self.reference = Some(song);
        self
    }
}
