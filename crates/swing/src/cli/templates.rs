//! # CLI Templates Module
//!
//! Terminal output is rendered from minijinja templates kept as stand-alone files under
//! `templates/`, so layout can be edited and diffed without touching Rust code. They are
//! embedded here as string constants and registered by name in the renderer.
//!
//! A few conventions:
//!
//!     1. Whitespace: the environment runs with `trim_blocks` and `lstrip_blocks`, so a
//!     line holding only a block tag produces no output. Every printed line is a line
//!     with an expression on it. A blank line in the template is a blank line in the
//!     output.
//!
//!     2. Composition: shared fragments (`hits`, `buckets`) are separate templates pulled
//!     in with `{% include %}`. They read their rows from the including context.
//!
//!     3. Layout math stays in Rust: widths, padding and truncation are computed by the
//!     renderer and passed in as strings. Templates choose styles by semantic name.

pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.jinja");
pub const HITS_TEMPLATE: &str = include_str!("templates/hits.jinja");
pub const SEARCH_TEMPLATE: &str = include_str!("templates/search.jinja");
pub const SONG_TEMPLATE: &str = include_str!("templates/song.jinja");
pub const BUCKETS_TEMPLATE: &str = include_str!("templates/buckets.jinja");
pub const STATS_TEMPLATE: &str = include_str!("templates/stats.jinja");
pub const LIST_TEMPLATE: &str = include_str!("templates/list.jinja");
pub const SIMILAR_TEMPLATE: &str = include_str!("templates/similar.jinja");

/// Every template with the name it is registered under.
pub const TEMPLATES: &[(&str, &str)] = &[
    ("messages", MESSAGES_TEMPLATE),
    ("hits", HITS_TEMPLATE),
    ("search", SEARCH_TEMPLATE),
    ("song", SONG_TEMPLATE),
    ("buckets", BUCKETS_TEMPLATE),
    ("stats", STATS_TEMPLATE),
    ("list", LIST_TEMPLATE),
    ("similar", SIMILAR_TEMPLATE),
];
