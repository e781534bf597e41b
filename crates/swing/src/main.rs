//! # swing
//!
//! `swing` is a command-line browser for a bundled catalog of jazz standards: who wrote
//! them, who recorded them, what key and style they are in, and the chord changes of each
//! tune.
//!
//! ```text
//! swing search miles davis            # ranked fuzzy search
//! swing search blue --style ballad    # search narrowed by a filter
//! swing filter --key G- --era 1950s   # filters only, no ranking
//! swing show "Autumn Leaves"          # one song with its changes
//! swing similar "So What"             # songs with similar changes
//! swing similar --changes "D-7|G7|C^7|C^7"
//! swing list composers                # distinct values with counts
//! swing stats --detailed              # catalog statistics
//! ```
//!
//! ## Architecture
//!
//! All catalog logic lives in the `jazzdb` library crate. This binary is a thin client:
//!
//! 1. `cli::setup` parses arguments with clap.
//! 2. `cli::commands` loads configuration and the catalog, then calls `jazzdb::SwingApi`.
//! 3. `cli::render` turns the returned `CmdResult` into terminal text (minijinja templates
//!    under `src/cli/templates/`) or JSON.
//!
//! The catalog is compiled into the binary and loaded once per invocation. Loading parses
//! every chord of every song, so a corrupt dataset fails before any command runs.
//!
//! ## Output
//!
//! `--output term` (the default) styles output for the terminal, falling back to plain
//! text when stdout is not a terminal. `--output text` never styles. `--output json`
//! prints the command result as JSON for scripting.
//!
//! ## Exit Codes
//!
//! - `0`: the command ran, including searches that match nothing.
//! - `1`: the query was malformed or the catalog failed to load (`Error: ...` on stderr).
//! - `2`: clap rejected the arguments (unknown command, bad flag).

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
