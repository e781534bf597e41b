//! # CLI Behavior
//!
//! This is **one possible UI client** for jazzdb, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ## Titles and Queries
//!
//! Free-text arguments are joined with spaces, so quoting is optional:
//! `swing show autumn leaves` and `swing show "Autumn Leaves"` are the same lookup.
//! `show` and `similar` match titles case-insensitively and also accept song ids
//! (`autumn-leaves`). An unknown title is not an error: `show` prints the closest
//! search matches instead.
//!
//! Search queries may carry inline filters (`blue key:F era:1950s`); the `--composer`,
//! `--style` and friends flags add the same filters from the command line.
//!
//! ## Module Structure
//!
//! - `commands`: dispatch, configuration and catalog setup, per-command handlers
//! - `render`: turns `CmdResult`s into styled text or JSON
//! - `setup`: argument parsing via clap, help text
//! - `styles`: terminal styling and the light/dark themes
//! - `templates`: output templates

mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
