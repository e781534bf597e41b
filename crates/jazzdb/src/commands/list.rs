use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::stats::{chronological, ranked};
use serde::Serialize;
use std::fmt;

/// A field whose distinct values can be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListField {
    Keys,
    Rhythms,
    Composers,
    Performers,
    TimeSignatures,
    Eras,
}

impl fmt::Display for ListField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ListField::Keys => "keys",
            ListField::Rhythms => "rhythms",
            ListField::Composers => "composers",
            ListField::Performers => "performers",
            ListField::TimeSignatures => "time signatures",
            ListField::Eras => "eras",
        };
        f.write_str(name)
    }
}

/// Distinct values with song counts, most common first. Eras are listed chronologically.
pub fn run(catalog: &Catalog, field: ListField) -> CmdResult<'_> {
    let tally = catalog.tally();
    let values = match field {
        ListField::Keys => ranked(&tally.by_key),
        ListField::Rhythms => ranked(&tally.by_style),
        ListField::Composers => ranked(&tally.by_composer),
        ListField::Performers => ranked(&tally.by_performer),
        ListField::TimeSignatures => ranked(&tally.by_time_signature),
        ListField::Eras => chronological(&tally.by_era),
    };

    let mut cmd = CmdResult::default();
    if values.is_empty() {
        cmd.add_message(CmdMessage::info(format!("No {} in the catalog", field)));
    }
    cmd.with_values(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixture_catalog;

    #[test]
    fn test_list_composers() {
        let catalog = fixture_catalog();
        let cmd = run(&catalog, ListField::Composers);
        assert_eq!(cmd.values[0].label, "Miles Davis");
        assert!(cmd.values.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_list_eras() {
        let catalog = fixture_catalog();
        let cmd = run(&catalog, ListField::Eras);
        let labels: Vec<&str> = cmd.values.iter().map(|b| b.label.as_str()).collect();
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted);
        assert!(labels.iter().all(|l| l.ends_with('s')));
    }

    #[test]
    fn test_list_counts_cover_keyed_songs() {
        let catalog = fixture_catalog();
        let cmd = run(&catalog, ListField::Keys);
        let total: usize = cmd.values.iter().map(|b| b.count).sum();
        assert_eq!(total, catalog.tally().coverage.key);
    }
}
