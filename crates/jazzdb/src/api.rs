//! # API Facade
//!
//! [`SwingApi`] is the single entry point UIs use. It owns the loaded [`Catalog`] and
//! dispatches to the command layer; it holds no business logic and does no I/O.
//!
//! Results borrow songs from the catalog, so they live as long as the API value.

use crate::catalog::Catalog;
use crate::commands::{self, CmdResult, ListField};
use crate::error::Result;
use crate::query::Filter;

pub struct SwingApi {
    catalog: Catalog,
}

impl SwingApi {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Loads the bundled dataset.
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(Catalog::bundled()?))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn search(&self, query: &str, filters: Vec<Filter>, limit: usize) -> Result<CmdResult<'_>> {
        commands::search::run(&self.catalog, query, filters, limit)
    }

    pub fn filter(&self, filters: Vec<Filter>) -> Result<CmdResult<'_>> {
        Ok(commands::filter::run(&self.catalog, filters))
    }

    pub fn stats(&self, top: usize) -> Result<CmdResult<'_>> {
        Ok(commands::stats::run(&self.catalog, top))
    }

    pub fn show(&self, title: &str) -> Result<CmdResult<'_>> {
        Ok(commands::show::run(&self.catalog, title))
    }

    pub fn list(&self, field: ListField) -> Result<CmdResult<'_>> {
        Ok(commands::list::run(&self.catalog, field))
    }

    pub fn similar_to(&self, title: &str, limit: usize) -> Result<CmdResult<'_>> {
        Ok(commands::similar::by_title(&self.catalog, title, limit))
    }

    pub fn similar_changes(
        &self,
        notation: &str,
        key: Option<&str>,
        limit: usize,
    ) -> Result<CmdResult<'_>> {
        commands::similar::by_changes(&self.catalog, notation, key, limit)
    }
}
