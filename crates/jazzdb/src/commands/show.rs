use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::query::Query;
use crate::search::search;

const SUGGESTIONS: usize = 3;

/// Looks a song up by exact title (or id). An unknown title is not an error: the result
/// carries a hint and the closest search matches instead.
pub fn run<'c>(catalog: &'c Catalog, title: &str) -> CmdResult<'c> {
    if let Some(song) = catalog.find_title(title) {
        return CmdResult::default().with_songs(vec![song]);
    }

    let mut cmd = CmdResult::default();
    cmd.add_message(CmdMessage::warning(format!(
        "Song '{}' not found.",
        title.trim()
    )));

    let mut suggestions = search(catalog, &Query::new(title));
    suggestions.truncate(SUGGESTIONS);
    if suggestions.hits.is_empty() {
        cmd.add_message(CmdMessage::info(
            "Use 'swing search <query>' to find songs.",
        ));
        return cmd;
    }
    cmd.add_message(CmdMessage::info("Did you mean:"));
    cmd.with_search(suggestions)
}
