use clap::{Parser, Subcommand, ValueEnum};
use jazzdb::commands::ListField;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v1.0.0"
/// Format for dev builds: "v1.0.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

pub const ABOUT: &str = "CLI tool for searching and analyzing jazz standards with chord progressions";

#[derive(Parser, Debug)]
#[command(
    name = "swing",
    bin_name = "swing",
    version = get_version(),
    disable_help_subcommand = true,
    arg_required_else_help = true,
    after_help = "Examples:\n  swing search miles davis\n  swing search blue key:F era:1950s\n  swing show \"Autumn Leaves\"\n  swing similar --changes \"D-7|G7|C^7|C^7\""
)]
#[command(about = ABOUT, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (defaults to the configured output, then "term")
    #[arg(short, long, global = true, value_enum, help_heading = "Options")]
    pub output: Option<OutputMode>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Styled for the terminal, plain when piped
    Term,
    /// Plain text
    Text,
    /// JSON for scripting
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Query(QueryCommands),

    #[command(flatten)]
    Catalog(CatalogCommands),
}

#[derive(Subcommand, Debug)]
pub enum QueryCommands {
    /// Search songs by title, composer, performer or style
    #[command(alias = "s", display_order = 1)]
    Search {
        /// Query words, optionally with field:value filters (e.g. blue key:F)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Only songs by this composer
        #[arg(long)]
        composer: Option<String>,

        /// Only songs recorded by this performer
        #[arg(long)]
        performer: Option<String>,

        /// Only songs in this style (e.g. ballad, bossa)
        #[arg(long)]
        style: Option<String>,

        /// Only songs in this key (e.g. F, Eb, G-)
        #[arg(long)]
        key: Option<String>,

        /// Show every field and the matched values
        #[arg(short, long)]
        detailed: bool,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List the songs matching every given filter
    #[command(alias = "f", display_order = 2)]
    Filter {
        /// Key (e.g. F, Eb, G-)
        #[arg(short, long)]
        key: Option<String>,

        /// Rhythm or style (e.g. ballad, bossa)
        #[arg(short, long)]
        rhythm: Option<String>,

        /// Time signature (e.g. 3/4)
        #[arg(short, long)]
        time: Option<String>,

        /// Composer name or part of it
        #[arg(short, long)]
        composer: Option<String>,

        /// Performer name or part of it
        #[arg(long)]
        performer: Option<String>,

        /// Decade (e.g. 1950s)
        #[arg(long)]
        era: Option<String>,

        /// Show every field of each song
        #[arg(short, long)]
        detailed: bool,
    },

    /// Find songs with similar chord changes
    #[command(alias = "sim", display_order = 3)]
    Similar {
        /// Title of the reference song
        #[arg(num_args = 1.., required_unless_present = "changes", conflicts_with = "changes")]
        title: Vec<String>,

        /// Compare against these changes instead (e.g. "D-7|G7|C^7|C^7")
        #[arg(long, value_name = "NOTATION")]
        changes: Option<String>,

        /// Key the changes are written in (defaults to the first chord's root)
        #[arg(long, requires = "changes", conflicts_with = "title")]
        key: Option<String>,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// Show one song with its chord changes
    #[command(alias = "v", display_order = 10)]
    Show {
        /// Song title or id (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// List the distinct values of a field with song counts
    #[command(alias = "ls", display_order = 11)]
    List {
        #[arg(value_enum)]
        field: ListArg,
    },

    /// Show catalog statistics
    #[command(display_order = 12)]
    Stats {
        /// Add key, style, era and people distributions
        #[arg(short, long)]
        detailed: bool,

        /// Entries in the composer and performer rankings
        #[arg(short, long)]
        top: Option<usize>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ListArg {
    #[value(alias = "key")]
    Keys,
    #[value(alias = "rhythm")]
    Rhythms,
    #[value(alias = "composer")]
    Composers,
    #[value(alias = "performer")]
    Performers,
    #[value(aliases = ["time", "time-signature"])]
    TimeSignatures,
    #[value(alias = "era")]
    Eras,
}

impl From<ListArg> for ListField {
    fn from(arg: ListArg) -> Self {
        match arg {
            ListArg::Keys => ListField::Keys,
            ListArg::Rhythms => ListField::Rhythms,
            ListArg::Composers => ListField::Composers,
            ListArg::Performers => ListField::Performers,
            ListArg::TimeSignatures => ListField::TimeSignatures,
            ListArg::Eras => ListField::Eras,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("swing").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_words_and_flags() {
        let cli = parse(&["search", "miles", "davis", "--style", "modal", "-l", "3"]).unwrap();
        match cli.command {
            Commands::Query(QueryCommands::Search {
                query,
                style,
                limit,
                ..
            }) => {
                assert_eq!(query, vec!["miles", "davis"]);
                assert_eq!(style.as_deref(), Some("modal"));
                assert_eq!(limit, Some(3));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_output_after_subcommand() {
        let cli = parse(&["stats", "--output", "json"]).unwrap();
        assert_eq!(cli.output, Some(OutputMode::Json));
    }

    #[test]
    fn test_similar_needs_title_or_changes() {
        assert!(parse(&["similar"]).is_err());
        assert!(parse(&["similar", "So", "What"]).is_ok());
        assert!(parse(&["similar", "--changes", "D-7|G7"]).is_ok());
        assert!(parse(&["similar", "So What", "--changes", "D-7|G7"]).is_err());
        assert!(parse(&["similar", "So What", "--key", "D-"]).is_err());
        assert!(parse(&["similar", "--changes", "D-7|G7", "--key", "D-"]).is_ok());
    }

    #[test]
    fn test_list_field_names() {
        let cli = parse(&["list", "time-signatures"]).unwrap();
        match cli.command {
            Commands::Catalog(CatalogCommands::List { field }) => {
                assert_eq!(ListField::from(field), ListField::TimeSignatures);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(parse(&["list", "moods"]).is_err());
    }

    fn list_field(args: &[&str]) -> ListField {
        match parse(args).unwrap().command {
            Commands::Catalog(CatalogCommands::List { field }) => field.into(),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_list_field_singular_aliases() {
        assert_eq!(list_field(&["list", "time"]), ListField::TimeSignatures);
        assert_eq!(list_field(&["list", "key"]), ListField::Keys);
        assert_eq!(list_field(&["list", "rhythm"]), ListField::Rhythms);
        assert_eq!(list_field(&["list", "composer"]), ListField::Composers);
        assert_eq!(list_field(&["ls", "eras"]), ListField::Eras);
    }

    #[test]
    fn test_filter_short_flags() {
        let cli = parse(&["filter", "-k", "F", "-r", "ballad", "-t", "3/4", "-c", "monk"]).unwrap();
        match cli.command {
            Commands::Query(QueryCommands::Filter {
                key,
                rhythm,
                time,
                composer,
                ..
            }) => {
                assert_eq!(key.as_deref(), Some("F"));
                assert_eq!(rhythm.as_deref(), Some("ballad"));
                assert_eq!(time.as_deref(), Some("3/4"));
                assert_eq!(composer.as_deref(), Some("monk"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(parse(&["play"]).is_err());
    }
}
