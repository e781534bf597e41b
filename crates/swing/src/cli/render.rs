//! # Rendering Module
//!
//! Turns a [`CmdResult`] into the text printed on stdout.
//!
//! - `--output json` serializes the result as is.
//! - Otherwise the result is reshaped into small view structs and rendered through the
//!   templates in [`super::templates`], styling through the `style` filter only when
//!   stdout is a color terminal and the mode is `term`.
//!
//! Layout calculations (width, truncation, padding) stay in Rust because they require
//! Unicode-aware processing: titles like "Águas de Março" or "'Round Midnight" must line
//! up with ASCII ones.

use super::setup::OutputMode;
use super::styles::{names, resolved_theme};
use super::templates::TEMPLATES;
use console::Term;
use jazzdb::commands::{CmdMessage, CmdResult, ListField, MessageLevel};
use jazzdb::progression::Segment;
use jazzdb::search::SearchHit;
use jazzdb::stats::{Bucket, StatsReport};
use jazzdb::Song;
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Longest title shown in a listing before truncation.
pub const TITLE_WIDTH: usize = 36;
/// Bars per printed line of a lead sheet.
pub const BARS_PER_LINE: usize = 4;
const SEARCH_MARK: &str = "🔍";
const FILTER_MARK: &str = "🎯";
const SIMILAR_MARK: &str = "🎼";

/// What a result is being rendered as.
#[derive(Debug, Clone, Copy)]
pub enum View<'a> {
    Search { detailed: bool },
    Filter { detailed: bool },
    Song,
    List(ListField),
    Stats { detailed: bool },
    /// `changes` is the typed progression when there is no reference song.
    Similar { changes: Option<&'a str> },
}

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(use_color: bool) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        let theme = use_color.then(resolved_theme);
        env.add_filter("style", move |value: Value, name: String| -> String {
            let text = value.to_string();
            match theme {
                Some(theme) => theme.apply(&name, &text),
                None => text,
            }
        });

        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    fn render<S: Serialize>(&self, name: &str, data: &S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(data)
    }

    /// Renders `result` as `view`, followed (or, for a missing song, preceded) by its
    /// messages.
    pub fn render_view(
        &self,
        result: &CmdResult<'_>,
        view: View<'_>,
    ) -> Result<String, minijinja::Error> {
        let messages = self.render_messages(&result.messages)?;
        let body = match view {
            View::Search { detailed } => self.render_search(result, detailed)?,
            View::Filter { detailed } => self.render_filter(result, detailed)?,
            View::Song => match result.songs.first() {
                Some(song) => self.render_song(song)?,
                // unknown title: the hint comes first, then the suggestions
                None => {
                    let suggestions = match &result.search {
                        Some(search) => self.render_hits(&search.hits, false)?,
                        None => String::new(),
                    };
                    return Ok(messages + &suggestions);
                }
            },
            View::List(field) => self.render_list(field, &result.values)?,
            View::Stats { detailed } => match &result.stats {
                Some(report) => self.render_stats(report, detailed)?,
                None => String::new(),
            },
            View::Similar { changes } => self.render_similar(result, changes)?,
        };
        Ok(body + &messages)
    }

    fn render_search(
        &self,
        result: &CmdResult<'_>,
        detailed: bool,
    ) -> Result<String, minijinja::Error> {
        let Some(search) = &result.search else {
            return Ok(String::new());
        };
        let header = format!(
            "{} Found {} matching '{}'",
            SEARCH_MARK,
            songs_noun(search.count),
            search.query
        );
        self.render(
            "search",
            &ListingData {
                header,
                hits: hit_rows(&search.hits, detailed),
                detailed,
            },
        )
    }

    fn render_filter(
        &self,
        result: &CmdResult<'_>,
        detailed: bool,
    ) -> Result<String, minijinja::Error> {
        let header = match &result.search {
            Some(search) => format!(
                "{} Found {} matching '{}'",
                FILTER_MARK,
                songs_noun(search.count),
                search.query
            ),
            None => format!("{} All {}", FILTER_MARK, songs_noun(result.songs.len())),
        };
        let width = title_column(result.songs.iter().copied());
        let hits = result
            .songs
            .iter()
            .enumerate()
            .map(|(i, song)| song_row(i, width, song, detailed.then(|| song_details(song))))
            .collect();
        self.render(
            "search",
            &ListingData {
                header,
                hits,
                detailed,
            },
        )
    }

    fn render_hits(
        &self,
        hits: &[SearchHit<'_>],
        detailed: bool,
    ) -> Result<String, minijinja::Error> {
        self.render(
            "hits",
            &ListingData {
                header: String::new(),
                hits: hit_rows(hits, detailed),
                detailed,
            },
        )
    }

    fn render_song(&self, song: &Song) -> Result<String, minijinja::Error> {
        self.render("song", &SongData { song: song_view(song) })
    }

    fn render_list(&self, field: ListField, values: &[Bucket]) -> Result<String, minijinja::Error> {
        let header = format!("Distinct {}: {}", field, values.len());
        self.render(
            "list",
            &BucketsData {
                header,
                rows: bucket_rows(values),
            },
        )
    }

    fn render_stats(&self, report: &StatsReport, detailed: bool) -> Result<String, minijinja::Error> {
        self.render("stats", &stats_view(report, detailed))
    }

    fn render_similar(
        &self,
        result: &CmdResult<'_>,
        changes: Option<&str>,
    ) -> Result<String, minijinja::Error> {
        let against = match (result.reference, changes) {
            (_, Some(notation)) => notation.to_string(),
            (Some(song), None) if !result.similar.is_empty() => song.title.clone(),
            _ => return Ok(String::new()),
        };
        let header = format!("{} Songs with changes similar to '{}'", SIMILAR_MARK, against);

        let width = title_column(result.similar.iter().map(|s| s.song));
        let rows = result
            .similar
            .iter()
            .enumerate()
            .map(|(i, similar)| {
                let title = truncate_to_width(&similar.song.title, width);
                SimilarRow {
                    rank: rank(i),
                    padding: padding(&title, width),
                    title,
                    score: format!("{:>5.1}%", similar.similarity * 100.0),
                    summary: song_summary(similar.song),
                }
            })
            .collect();
        self.render("similar", &SimilarData { header, rows })
    }

    pub fn render_messages(&self, messages: &[CmdMessage]) -> Result<String, minijinja::Error> {
        if messages.is_empty() {
            return Ok(String::new());
        }
        let messages: Vec<MessageData> = messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: message_style(msg.level).to_string(),
            })
            .collect();
        self.render("messages", &MessagesData { messages })
    }
}

/// Renders `result` for `mode`. Term output is styled only when stdout is a color terminal.
pub fn render_output(
    result: &CmdResult<'_>,
    view: View<'_>,
    mode: OutputMode,
) -> anyhow::Result<String> {
    if mode == OutputMode::Json {
        let json = serde_json::to_string_pretty(result)?;
        return Ok(format!("{}\n", json));
    }
    let renderer = Renderer::new(use_color(mode))?;
    Ok(renderer.render_view(result, view)?)
}

fn use_color(mode: OutputMode) -> bool {
    let term = Term::stdout();
    mode == OutputMode::Term && term.is_term() && term.features().colors_supported()
}

fn message_style(level: MessageLevel) -> &'static str {
    match level {
        MessageLevel::Info => names::INFO,
        MessageLevel::Success => names::SUCCESS,
        MessageLevel::Warning => names::WARNING,
        MessageLevel::Error => names::ERROR,
    }
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: String,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct ListingData {
    header: String,
    hits: Vec<SongRow>,
    detailed: bool,
}

/// One song in a listing: pre-padded title plus the detail lines shown with `--detailed`.
#[derive(Serialize)]
struct SongRow {
    rank: String,
    title: String,
    padding: String,
    summary: String,
    details: Vec<DetailLine>,
}

#[derive(Serialize)]
struct DetailLine {
    label: String,
    padding: String,
    value: String,
}

#[derive(Serialize)]
struct SongData {
    song: SongView,
}

#[derive(Serialize)]
struct SongView {
    title: String,
    fields: Vec<DetailLine>,
    summary: String,
    sections: Vec<SectionView>,
}

#[derive(Serialize)]
struct SectionView {
    heading: String,
    lines: Vec<SheetLine>,
}

/// A printed line of a lead sheet: an optional ending marker then up to
/// [`BARS_PER_LINE`] bars.
#[derive(Serialize)]
struct SheetLine {
    prefix: String,
    bars: Vec<BarCell>,
}

#[derive(Serialize)]
struct BarCell {
    chords: String,
    padding: String,
}

#[derive(Serialize)]
struct BucketsData {
    header: String,
    rows: Vec<BucketRow>,
}

#[derive(Serialize)]
struct BucketRow {
    label: String,
    padding: String,
    count: usize,
}

#[derive(Serialize)]
struct StatsData {
    rule: String,
    total: usize,
    distinct_composers: usize,
    distinct_performers: usize,
    coverage: Vec<DetailLine>,
    detailed: bool,
    groups: Vec<BucketGroup>,
}

#[derive(Serialize)]
struct BucketGroup {
    title: String,
    rows: Vec<BucketRow>,
}

#[derive(Serialize)]
struct SimilarData {
    header: String,
    rows: Vec<SimilarRow>,
}

#[derive(Serialize)]
struct SimilarRow {
    rank: String,
    title: String,
    padding: String,
    score: String,
    summary: String,
}

fn songs_noun(count: usize) -> String {
    if count == 1 {
        "1 song".to_string()
    } else {
        format!("{} songs", count)
    }
}

fn rank(i: usize) -> String {
    format!("{:>3}.", i + 1)
}

fn padding(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(text.width()))
}

/// Width of the title column: the widest title, capped at [`TITLE_WIDTH`].
fn title_column<'a>(songs: impl Iterator<Item = &'a Song>) -> usize {
    songs
        .map(|song| song.title.width())
        .max()
        .unwrap_or(0)
        .min(TITLE_WIDTH)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// "Miles Davis · 1959 · D-"
fn song_summary(song: &Song) -> String {
    let mut parts = vec![song.composer_credit()];
    if let Some(year) = song.year {
        parts.push(year.to_string());
    }
    if let Some(key) = &song.key {
        parts.push(key.to_string());
    }
    parts.join(" · ")
}

fn song_row(i: usize, width: usize, song: &Song, details: Option<Vec<DetailLine>>) -> SongRow {
    let title = truncate_to_width(&song.title, width);
    SongRow {
        rank: rank(i),
        padding: padding(&title, width),
        title,
        summary: song_summary(song),
        details: details.unwrap_or_default(),
    }
}

fn hit_rows(hits: &[SearchHit<'_>], detailed: bool) -> Vec<SongRow> {
    let width = title_column(hits.iter().map(|hit| hit.song));
    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            let details = detailed.then(|| {
                let mut lines = song_details(hit.song);
                if !hit.matched.is_empty() {
                    let matched: Vec<String> = hit
                        .matched
                        .iter()
                        .map(|m| {
                            let how = if m.exact { ", exact" } else { "" };
                            format!("{} \"{}\" ({:.1}{})", m.field, m.value, m.score, how)
                        })
                        .collect();
                    lines.push(detail("Matched:", matched.join("; ")));
                    lines.push(detail("Score:", format!("{:.1}", hit.score)));
                }
                lines
            });
            song_row(i, width, hit.song, details)
        })
        .collect()
}

fn detail(label: &str, value: String) -> DetailLine {
    DetailLine {
        label: label.to_string(),
        padding: String::new(),
        value,
    }
}

fn or_unknown(value: Option<String>) -> String {
    value.unwrap_or_else(|| "unknown".to_string())
}

fn song_details(song: &Song) -> Vec<DetailLine> {
    let mut lines = vec![
        detail("Key:", or_unknown(song.key.map(|k| k.to_string()))),
        detail("Style:", or_unknown(non_empty(song.styles.join(", ")))),
        detail("Time:", or_unknown(song.time_signature.clone())),
        detail(
            "Year:",
            or_unknown(song.year.map(|year| match song.era() {
                Some(era) => format!("{} ({})", year, era),
                None => year.to_string(),
            })),
        ),
    ];
    if !song.performers.is_empty() {
        let performers: Vec<&str> = song.performers.iter().map(String::as_str).collect();
        lines.push(detail("Performers:", performers.join(", ")));
    }
    lines
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

/// Pads labels to a common width so values line up.
fn align(mut lines: Vec<DetailLine>) -> Vec<DetailLine> {
    let width = lines.iter().map(|l| l.label.width()).max().unwrap_or(0);
    for line in &mut lines {
        line.padding = padding(&line.label, width);
    }
    lines
}

fn song_view(song: &Song) -> SongView {
    let mut fields = vec![detail("Composer:", song.composer_credit())];
    fields.extend(song_details(song));

    let sections: Vec<SectionView> = song
        .progression
        .sections()
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let label = section
                .label
                .clone()
                .unwrap_or_else(|| format!("#{}", i + 1));
            let heading = match section.repeats {
                Some(times) if times > 1 => format!("[{}] x{}", label, times),
                _ => format!("[{}]", label),
            };

            let has_endings = !section.endings.is_empty();
            let mut lines = Vec::new();
            if let Some(main) = &section.main {
                let prefix = if has_endings { "   " } else { "" };
                lines.extend(sheet_lines(main, prefix));
            }
            for (n, ending) in section.endings.iter().enumerate() {
                lines.extend(sheet_lines(ending, &format!("{}. ", n + 1)));
            }
            SectionView { heading, lines }
        })
        .collect();

    let bars = song.progression.bar_count();
    let summary = format!(
        "({} {}, {} {})",
        sections.len(),
        if sections.len() == 1 { "section" } else { "sections" },
        bars,
        if bars == 1 { "bar" } else { "bars" }
    );

    SongView {
        title: song.title.clone(),
        fields: align(fields),
        summary,
        sections,
    }
}

/// Breaks a segment into lines of [`BARS_PER_LINE`] bars, every bar padded to the widest
/// bar of the segment. Only the first line carries `prefix`; the rest are indented to match.
fn sheet_lines(segment: &Segment, prefix: &str) -> Vec<SheetLine> {
    let cells: Vec<String> = segment
        .bars
        .iter()
        .map(|bar| {
            let chords: Vec<String> = bar.chords.iter().map(|c| c.to_string()).collect();
            chords.join(" ")
        })
        .collect();
    let width = cells.iter().map(|c| c.width()).max().unwrap_or(0);
    let indent = " ".repeat(prefix.width());

    cells
        .chunks(BARS_PER_LINE)
        .enumerate()
        .map(|(i, chunk)| SheetLine {
            prefix: if i == 0 { prefix.to_string() } else { indent.clone() },
            bars: chunk
                .iter()
                .map(|chords| BarCell {
                    padding: padding(chords, width),
                    chords: chords.clone(),
                })
                .collect(),
        })
        .collect()
}

fn bucket_rows(buckets: &[Bucket]) -> Vec<BucketRow> {
    let width = buckets.iter().map(|b| b.label.width()).max().unwrap_or(0);
    buckets
        .iter()
        .map(|bucket| BucketRow {
            label: bucket.label.clone(),
            padding: padding(&bucket.label, width),
            count: bucket.count,
        })
        .collect()
}

fn coverage_line(label: &str, count: usize, total: usize) -> DetailLine {
    let percent = if total == 0 { 0 } else { count * 100 / total };
    detail(label, format!("{}/{} ({}%)", count, total, percent))
}

fn stats_view(report: &StatsReport, detailed: bool) -> StatsData {
    let total = report.total;
    let c = &report.coverage;
    let coverage = align(vec![
        coverage_line("Composer", c.composer, total),
        coverage_line("Year", c.year, total),
        coverage_line("Key", c.key, total),
        coverage_line("Style", c.style, total),
        coverage_line("Time signature", c.time_signature, total),
        coverage_line("Performers", c.performers, total),
        coverage_line("Chord changes", c.sections, total),
    ]);

    let group = |title: &str, buckets: &[Bucket]| BucketGroup {
        title: title.to_string(),
        rows: bucket_rows(buckets),
    };
    let groups = if detailed {
        vec![
            group("Keys", &report.keys),
            group("Styles", &report.styles),
            group("Eras", &report.eras),
            group("Time signatures", &report.time_signatures),
            group("Top composers", &report.composers),
            group("Top performers", &report.performers),
        ]
    } else {
        Vec::new()
    };

    StatsData {
        rule: "=".repeat(38),
        total,
        distinct_composers: report.distinct_composers,
        distinct_performers: report.distinct_performers,
        coverage,
        detailed,
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jazzdb::commands::ListField;
    use jazzdb::test_utils::fixture_catalog;
    use jazzdb::SwingApi;

    fn renderer() -> Renderer {
        Renderer::new(false).unwrap()
    }

    fn api() -> SwingApi {
        SwingApi::new(fixture_catalog())
    }

    #[test]
    fn test_search_header_and_rows() {
        let api = api();
        let result = api.search("so what", vec![], 10).unwrap();
        let output = renderer()
            .render_view(&result, View::Search { detailed: false })
            .unwrap();
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("🔍 Found 1 song matching 'so what'"));
        assert_eq!(lines.next(), Some(""));
        let row = lines.next().unwrap();
        assert!(row.starts_with("  1. So What"));
        assert!(row.contains("Miles Davis · 1959 · D-"));
    }

    #[test]
    fn test_search_without_matches() {
        let api = api();
        let result = api.search("qqqqqqqq", vec![], 10).unwrap();
        let output = renderer()
            .render_view(&result, View::Search { detailed: false })
            .unwrap();
        assert_eq!(output, "🔍 Found 0 songs matching 'qqqqqqqq'\n");
    }

    #[test]
    fn test_detailed_search_shows_matches() {
        let api = api();
        let result = api.search("ipanema", vec![], 10).unwrap();
        let output = renderer()
            .render_view(&result, View::Search { detailed: true })
            .unwrap();
        assert!(output.contains("Style: Bossa Nova"));
        assert!(output.contains("Performers: João Gilberto, Stan Getz"));
        assert!(output.contains("Matched: title"));
    }

    #[test]
    fn test_titles_are_aligned() {
        let api = api();
        let result = api.filter(vec![]).unwrap();
        let output = renderer()
            .render_view(&result, View::Filter { detailed: false })
            .unwrap();
        let columns: Vec<usize> = output
            .lines()
            .filter(|line| line.contains(" · "))
            .map(|line| {
                // "  1. " then the padded title, two spaces, the summary
                let rest = &line[5..];
                let gap = rest.find("  ").unwrap();
                let start = gap + rest[gap..].find(|c: char| c != ' ').unwrap();
                line[..5 + start].width()
            })
            .collect();
        assert!(!columns.is_empty());
        assert!(columns.windows(2).all(|w| w[0] == w[1]), "{output}");
    }

    #[test]
    fn test_song_sheet() {
        let api = api();
        let result = api.show("Anthropology").unwrap();
        let output = renderer().render_view(&result, View::Song).unwrap();
        assert!(output.starts_with("Anthropology\n"));
        assert!(output.contains("Composer:"));
        assert!(output.contains("Charlie Parker, Dizzy Gillespie"));
        assert!(output.contains("Changes (2 sections, 16 bars)"));
        assert!(output.contains("[A] x2"));
        assert!(output.contains("| Bb^7 G-7 | C-7 F7"));
    }

    #[test]
    fn test_unlabeled_section_is_numbered() {
        let api = api();
        let result = api.show("Blue in Green").unwrap();
        let output = renderer().render_view(&result, View::Song).unwrap();
        assert!(output.contains("[#1]"), "{output}");
        assert!(!output.contains("[]"));
    }

    #[test]
    fn test_song_without_changes() {
        let api = api();
        let result = api.show("Well, You Needn't").unwrap();
        let output = renderer().render_view(&result, View::Song).unwrap();
        assert!(output.contains("No chord changes in the catalog for this song."));
    }

    #[test]
    fn test_unknown_song_lists_suggestions_after_hint() {
        let api = api();
        let result = api.show("Autumn").unwrap();
        let output = renderer().render_view(&result, View::Song).unwrap();
        let hint = output.find("Song 'Autumn' not found.").unwrap();
        let suggestion = output.find("Autumn Leaves").unwrap();
        assert!(hint < suggestion);
    }

    #[test]
    fn test_stats_summary() {
        let api = api();
        let result = api.stats(5).unwrap();
        let output = renderer()
            .render_view(&result, View::Stats { detailed: false })
            .unwrap();
        assert!(output.starts_with("📊 Jazz Standards Database Statistics\n"));
        assert!(output.contains("Total songs: 11\n"));
        assert!(!output.contains("Top composers"));
    }

    #[test]
    fn test_detailed_stats_add_distributions() {
        let api = api();
        let result = api.stats(5).unwrap();
        let output = renderer()
            .render_view(&result, View::Stats { detailed: true })
            .unwrap();
        assert!(output.contains("\nKeys\n"));
        assert!(output.contains("\nTop composers\n  Miles Davis"));
    }

    #[test]
    fn test_list_values() {
        let api = api();
        let result = api.list(ListField::TimeSignatures).unwrap();
        let output = renderer()
            .render_view(&result, View::List(ListField::TimeSignatures))
            .unwrap();
        assert!(output.starts_with("Distinct time signatures: 3\n"));
        assert!(output.contains("  4/4 8\n"));
    }

    #[test]
    fn test_similar_ranking() {
        let api = api();
        let result = api.similar_to("So What", 3).unwrap();
        let output = renderer()
            .render_view(&result, View::Similar { changes: None })
            .unwrap();
        assert!(output.starts_with("🎼 Songs with changes similar to 'So What'\n"));
        assert!(output.contains("Impressions"));
        assert!(output.contains("100.0%"));
    }

    #[test]
    fn test_messages_follow_body() {
        let api = api();
        let result = api.search("miles", vec![], 1).unwrap();
        let output = renderer()
            .render_view(&result, View::Search { detailed: false })
            .unwrap();
        assert!(output.trim_end().ends_with("results"));
        assert!(output.contains("Showing the top 1 of"));
    }

    #[test]
    fn test_json_output() {
        let api = api();
        let result = api.search("so what", vec![], 10).unwrap();
        let output = render_output(&result, View::Search { detailed: false }, OutputMode::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["search"]["count"], 1);
        assert_eq!(value["search"]["hits"][0]["song"]["title"], "So What");
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Oleo", 10), "Oleo");
        assert_eq!(truncate_to_width("Autumn Leaves", 7), "Autumn…");
        assert!(truncate_to_width("Águas de Março e mais", 8).width() <= 8);
    }
}
