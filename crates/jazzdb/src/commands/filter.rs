use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::query::{Filter, Query};
use crate::search::search;

/// Every song passing all `filters`, in title order. Without filters that is the whole
/// catalog.
pub fn run(catalog: &Catalog, filters: Vec<Filter>) -> CmdResult<'_> {
    let mut cmd = CmdResult::default();
    if filters.is_empty() {
        cmd.add_message(CmdMessage::info("No filters given, listing every song"));
        let mut songs: Vec<_> = catalog.songs().iter().collect();
        songs.sort_by_key(|song| (song.title.to_lowercase(), song.id.clone()));
        return cmd.with_songs(songs);
    }

    let query = Query::default().with_filters(filters);
    let result = search(catalog, &query);
    let songs = result.hits.iter().map(|hit| hit.song).collect();
    cmd.with_search(result).with_songs(songs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixture_catalog;

    #[test]
    fn test_filter_by_key_and_composer() {
        let catalog = fixture_catalog();
        let cmd = run(
            &catalog,
            vec![
                Filter::parse("composer", "davis").unwrap(),
                Filter::parse("key", "D minor").unwrap(),
            ],
        );
        let titles: Vec<&str> = cmd.songs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Blue in Green", "So What"]);
        assert_eq!(cmd.search.unwrap().count, 2);
    }

    #[test]
    fn test_filter_by_time_signature() {
        let catalog = fixture_catalog();
        let cmd = run(&catalog, vec![Filter::parse("time", "6/8").unwrap()]);
        assert!(cmd
            .songs
            .iter()
            .all(|s| s.time_signature.as_deref() == Some("6/8")));
        assert!(!cmd.songs.is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = fixture_catalog();
        let cmd = run(&catalog, vec![Filter::parse("era", "1890s").unwrap()]);
        assert!(cmd.songs.is_empty());
        assert_eq!(cmd.search.unwrap().count, 0);
    }

    #[test]
    fn test_no_filters_lists_everything() {
        let catalog = fixture_catalog();
        let cmd = run(&catalog, vec![]);
        assert_eq!(cmd.songs.len(), catalog.len());
        assert_eq!(cmd.messages.len(), 1);
    }
}
