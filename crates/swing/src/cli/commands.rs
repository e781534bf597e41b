//! # CLI Layer
//!
//! This module is **one possible UI client** for jazzdb. It is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the tracing subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Load configuration, then the catalog, into an `AppContext`
//! 3. **API Dispatch**: Call the appropriate `SwingApi` method
//! 4. **Output Formatting**: Render the `CmdResult` through `render`
//! 5. **Error Handling**: Attach context to errors; `main` prints them and exits 1
//!
//! ## Precedence
//!
//! Flags win over configuration (`SWING_*` environment, then `swing.toml`), which wins
//! over compiled defaults. Configuration never changes what the catalog contains.

use super::render::{render_output, View};
use super::setup::{CatalogCommands, Cli, Commands, OutputMode, QueryCommands};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use jazzdb::commands::{CmdResult, ListField};
use jazzdb::config::SwingConfig;
use jazzdb::{Filter, SwingApi};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `SWING_LOG=jazzdb=debug`).
pub const LOG_ENV: &str = "SWING_LOG";

struct AppContext {
    api: SwingApi,
    config: SwingConfig,
    output: OutputMode,
}

impl AppContext {
    fn print(&self, result: &CmdResult<'_>, view: View<'_>) -> Result<()> {
        let output = render_output(result, view, self.output).context("failed to render output")?;
        print!("{}", output);
        Ok(())
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::Query(cmd) => match cmd {
            QueryCommands::Search {
                query,
                composer,
                performer,
                style,
                key,
                detailed,
                limit,
            } => {
                let filters = flag_filters(&[
                    ("composer", composer),
                    ("performer", performer),
                    ("style", style),
                    ("key", key),
                ])?;
                handle_search(&ctx, query.join(" "), filters, detailed, limit)
            }
            QueryCommands::Filter {
                key,
                rhythm,
                time,
                composer,
                performer,
                era,
                detailed,
            } => {
                let filters = flag_filters(&[
                    ("key", key),
                    ("rhythm", rhythm),
                    ("time", time),
                    ("composer", composer),
                    ("performer", performer),
                    ("era", era),
                ])?;
                handle_filter(&ctx, filters, detailed)
            }
            QueryCommands::Similar {
                title,
                changes,
                key,
                limit,
            } => handle_similar(&ctx, title.join(" "), changes, key, limit),
        },
        Commands::Catalog(cmd) => match cmd {
            CatalogCommands::Show { title } => handle_show(&ctx, title.join(" ")),
            CatalogCommands::List { field } => handle_list(&ctx, field.into()),
            CatalogCommands::Stats { detailed, top } => handle_stats(&ctx, detailed, top),
        },
    }
}

/// Logs go to stderr so they never mix with rendered output. `--verbose` forces debug;
/// otherwise `SWING_LOG` is honored, defaulting to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // a subscriber may already be installed when run from tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config = SwingConfig::load().context("failed to load configuration")?;
    let output = match cli.output {
        Some(mode) => mode,
        None => OutputMode::from_str(&config.output, true)
            .map_err(|_| anyhow!("invalid output mode '{}' in configuration", config.output))?,
    };
    tracing::debug!(?output, limit = config.limit, top = config.top, "configuration loaded");

    let api = SwingApi::bundled().context("failed to load the bundled catalog")?;
    Ok(AppContext {
        api,
        config,
        output,
    })
}

/// Builds filters from the flags that were given, in flag order.
fn flag_filters(flags: &[(&str, Option<String>)]) -> Result<Vec<Filter>> {
    flags
        .iter()
        .filter_map(|(field, value)| value.as_deref().map(|value| (*field, value)))
        .map(|(field, value)| {
            Filter::parse(field, value).with_context(|| format!("invalid --{} value", field))
        })
        .collect()
}

fn handle_search(
    ctx: &AppContext,
    query: String,
    filters: Vec<Filter>,
    detailed: bool,
    limit: Option<usize>,
) -> Result<()> {
    let limit = limit.unwrap_or(ctx.config.limit);
    let result = ctx
        .api
        .search(&query, filters, limit)
        .with_context(|| format!("invalid query '{}'", query))?;
    ctx.print(&result, View::Search { detailed })
}

fn handle_filter(ctx: &AppContext, filters: Vec<Filter>, detailed: bool) -> Result<()> {
    let result = ctx.api.filter(filters)?;
    ctx.print(&result, View::Filter { detailed })
}

fn handle_show(ctx: &AppContext, title: String) -> Result<()> {
    let result = ctx.api.show(&title)?;
    ctx.print(&result, View::Song)
}

fn handle_list(ctx: &AppContext, field: ListField) -> Result<()> {
    let result = ctx.api.list(field)?;
    ctx.print(&result, View::List(field))
}

fn handle_stats(ctx: &AppContext, detailed: bool, top: Option<usize>) -> Result<()> {
    let top = top.unwrap_or(ctx.config.top);
    let result = ctx.api.stats(top)?;
    ctx.print(&result, View::Stats { detailed })
}

fn handle_similar(
    ctx: &AppContext,
    title: String,
    changes: Option<String>,
    key: Option<String>,
    limit: Option<usize>,
) -> Result<()> {
    let limit = limit.unwrap_or(ctx.config.limit);
    match changes {
        Some(notation) => {
            let result = ctx
                .api
                .similar_changes(&notation, key.as_deref(), limit)
                .with_context(|| format!("invalid changes '{}'", notation))?;
            ctx.print(
                &result,
                View::Similar {
                    changes: Some(&notation),
                },
            )
        }
        None => {
            let result = ctx.api.similar_to(&title, limit)?;
            ctx.print(&result, View::Similar { changes: None })
        }
    }
}
