use crate::catalog::Catalog;
use crate::commands::CmdResult;
use crate::stats::stats;

pub fn run(catalog: &Catalog, top: usize) -> CmdResult<'_> {
    CmdResult::default().with_stats(stats(catalog, top))
}
