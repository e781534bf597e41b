//! Query parsing.
//!
//! A query line is free text plus optional `field:value` filters:
//!
//! ```text
//! blue composer:"Miles Davis" key:F era:1950s
//! ```
//!
//! - Double quotes group words, in free text as well as in filter values.
//! - A word is a filter when an unquoted `:` follows a non-empty prefix. The prefix must name
//!   a known field.
//! - Free-text words are joined with single spaces and tokenized for the fragment index.
//!
//! Filter fields: `title`, `composer`, `performer` (alias `artist`), `style` (alias `rhythm`),
//! `key`, `time`, `year` and `era`.

use crate::error::QueryError;
use crate::index::tokenize;
use crate::model::{era_of, Song};
use crate::progression::chord::Key;
use std::fmt;

/// A restriction on the candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Title(String),
    Composer(String),
    Performer(String),
    Style(String),
    Key(Key),
    Time(String),
    Year(u32),
    /// First year of the decade.
    Era(u32),
}

impl Filter {
    /// Builds a filter from a field name and its raw value.
    pub fn parse(field: &str, value: &str) -> Result<Self, QueryError> {
        let value = value.trim();
        let field_lc = field.trim().to_lowercase();
        if !FIELDS.contains(&field_lc.as_str()) {
            return Err(QueryError::UnknownField(field.to_string()));
        }
        if value.is_empty() {
            return Err(QueryError::EmptyFilter(field_lc));
        }

        let filter = match field_lc.as_str() {
            "title" => Filter::Title(value.to_lowercase()),
            "composer" => Filter::Composer(value.to_lowercase()),
            "performer" | "artist" => Filter::Performer(value.to_lowercase()),
            "style" | "rhythm" => Filter::Style(value.to_lowercase()),
            "key" => Filter::Key(
                value
                    .parse()
                    .map_err(|_| QueryError::InvalidKey(value.to_string()))?,
            ),
            "time" => Filter::Time(value.to_string()),
            "year" => Filter::Year(
                value
                    .parse()
                    .map_err(|_| QueryError::InvalidYear(value.to_string()))?,
            ),
            _ => Filter::Era(parse_era(value)?),
        };
        Ok(filter)
    }

    pub fn matches(&self, song: &Song) -> bool {
        match self {
            Filter::Title(needle) => song.title.to_lowercase().contains(needle.as_str()),
            Filter::Composer(needle) => any_contains(song.composers.iter(), needle),
            Filter::Performer(needle) => any_contains(song.performers.iter(), needle),
            Filter::Style(needle) => any_contains(song.styles.iter(), needle),
            Filter::Key(key) => song.key.as_ref().is_some_and(|k| k.same_key(key)),
            Filter::Time(time) => song.time_signature.as_deref() == Some(time.as_str()),
            Filter::Year(year) => song.year == Some(*year),
            Filter::Era(decade) => song.year.is_some_and(|y| y / 10 * 10 == *decade),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Title(v) => write!(f, "title:{}", v),
            Filter::Composer(v) => write!(f, "composer:{}", v),
            Filter::Performer(v) => write!(f, "performer:{}", v),
            Filter::Style(v) => write!(f, "style:{}", v),
            Filter::Key(k) => write!(f, "key:{}", k),
            Filter::Time(v) => write!(f, "time:{}", v),
            Filter::Year(y) => write!(f, "year:{}", y),
            Filter::Era(d) => write!(f, "era:{}", era_of(*d)),
        }
    }
}

fn any_contains<'a>(mut values: impl Iterator<Item = &'a String>, needle: &str) -> bool {
    values.any(|v| v.to_lowercase().contains(needle))
}

const FIELDS: &[&str] = &[
    "title",
    "composer",
    "performer",
    "artist",
    "style",
    "rhythm",
    "key",
    "time",
    "year",
    "era",
];

/// Accepts `1950s` or `1950`.
fn parse_era(value: &str) -> Result<u32, QueryError> {
    let invalid = || QueryError::InvalidEra(value.to_string());
    let digits = value.strip_suffix('s').unwrap_or(value);
    let decade: u32 = digits.parse().map_err(|_| invalid())?;
    if digits.len() != 4 || decade % 10 != 0 {
        return Err(invalid());
    }
    Ok(decade)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    text: String,
    tokens: Vec<String>,
    filters: Vec<Filter>,
}

impl Query {
    /// A free-text query without filters.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into().trim().to_string();
        let tokens = tokenize(&text);
        Self {
            text,
            tokens,
            filters: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_filters(mut self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.filters.extend(filters);
        self
    }

    /// Parses a query line, see the module docs for the syntax.
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        let mut text = Vec::new();
        let mut filters = Vec::new();
        for word in split_words(input)? {
            match word.field {
                Some(field) => filters.push(Filter::parse(&field, &word.text)?),
                None => text.push(word.text),
            }
        }
        Ok(Query::new(text.join(" ")).with_filters(filters))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Nothing to search for and nothing to filter by.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.filters.is_empty()
    }

    pub fn accepts(&self, song: &Song) -> bool {
        self.filters.iter().all(|f| f.matches(song))
    }
}

impl fmt::Display for Query {
    /// The query echo shown in result headers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if !self.text.is_empty() {
            parts.push(self.text.clone());
        }
        parts.extend(self.filters.iter().map(Filter::to_string));
        write!(f, "{}", parts.join(" "))
    }
}

#[derive(Debug, Default)]
struct Word {
    field: Option<String>,
    text: String,
    quoted: bool,
}

fn split_words(input: &str) -> Result<Vec<Word>, QueryError> {
    let mut words = Vec::new();
    let mut current = Word::default();
    let mut in_word = false;
    let mut chars = input.char_indices();

    while let Some((pos, c)) = chars.next() {
        match c {
            '"' => {
                in_word = true;
                current.quoted = true;
                let mut closed = false;
                for (_, q) in chars.by_ref() {
                    if q == '"' {
                        closed = true;
                        break;
                    }
                    current.text.push(q);
                }
                if !closed {
                    return Err(QueryError::UnbalancedQuote(pos));
                }
            }
            ':' if current.field.is_none() && !current.quoted && !current.text.is_empty() => {
                current.field = Some(std::mem::take(&mut current.text));
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                current.text.push(c);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
