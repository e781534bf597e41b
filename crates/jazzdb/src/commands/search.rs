use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::query::{Filter, Query};
use crate::search::search;

/// Parses `input`, adds the flag `filters` and runs the search. At most `limit` hits are
/// kept; the result's count still reports every match.
pub fn run<'c>(
    catalog: &'c Catalog,
    input: &str,
    filters: Vec<Filter>,
    limit: usize,
) -> Result<CmdResult<'c>> {
    let query = Query::parse(input)?.with_filters(filters);
    let mut result = search(catalog, &query);

    let mut cmd = CmdResult::default();
    if query.is_empty() {
        cmd.add_message(CmdMessage::warning("Empty query: nothing to search for"));
    } else if result.count > limit {
        cmd.add_message(CmdMessage::info(format!(
            "Showing the top {} of {} results",
            limit, result.count
        )));
    }
    result.truncate(limit);
    Ok(cmd.with_search(result))
}
