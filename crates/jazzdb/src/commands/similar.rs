//! Songs with similar chord changes.
//!
//! The reference is either a catalog song (looked up by title) or a progression typed on
//! the command line. Every other song with changes is scored with
//! [`crate::progression::similarity::similarity`] over key-normalized progressions. The scan
//! runs in parallel over the shared catalog; ranking is similarity descending, then title,
//! then id.

use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{QueryError, Result};
use crate::model::Song;
use crate::progression::chord::Key;
use crate::progression::similarity::{normalize, similarity, NormalizedProgression};
use crate::progression::Progression;
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SimilarSong<'c> {
    pub song: &'c Song,
    pub similarity: f64,
}

fn rank<'c>(
    catalog: &'c Catalog,
    reference: &NormalizedProgression,
    exclude: Option<&Song>,
    limit: usize,
) -> Vec<SimilarSong<'c>> {
    let mut ranked: Vec<SimilarSong<'c>> = catalog
        .songs()
        .par_iter()
        .filter(|song| !song.normalized().is_empty())
        .filter(|song| exclude.map_or(true, |ex| ex.id != song.id))
        .map(|song| SimilarSong {
            song,
            similarity: similarity(reference, song.normalized()),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| a.song.title.to_lowercase().cmp(&b.song.title.to_lowercase()))
            .then_with(|| a.song.id.cmp(&b.song.id))
    });
    ranked.truncate(limit);
    ranked
}

/// Songs whose changes resemble those of the song titled `title`.
pub fn by_title<'c>(catalog: &'c Catalog, title: &str, limit: usize) -> CmdResult<'c> {
    let mut cmd = CmdResult::default();
    let Some(song) = catalog.find_title(title) else {
        cmd.add_message(CmdMessage::warning(format!(
            "Song '{}' not found.",
            title.trim()
        )));
        cmd.add_message(CmdMessage::info(
            "Use 'swing search <query>' to find the exact title.",
        ));
        return cmd;
    };

    if song.normalized().is_empty() {
        cmd.add_message(CmdMessage::warning(format!(
            "'{}' has no chord changes to compare.",
            song.title
        )));
        return cmd.with_reference(song);
    }

    let ranked = rank(catalog, song.normalized(), Some(song), limit);
    cmd.with_reference(song).with_similar(ranked)
}

/// Songs whose changes resemble `notation` (e.g. `D-7|G7|C^7`), read in `key`. Without a
/// key the first chord's root is the tonic.
pub fn by_changes<'c>(
    catalog: &'c Catalog,
    notation: &str,
    key: Option<&str>,
    limit: usize,
) -> Result<CmdResult<'c>> {
    let progression: Progression = notation.parse().map_err(QueryError::InvalidChanges)?;
    let key = key
        .map(|k| {
            k.parse::<Key>()
                .map_err(|_| QueryError::InvalidKey(k.to_string()))
        })
        .transpose()?;

    let reference = normalize(&progression, key.as_ref());
    let ranked = rank(catalog, &reference, None, limit);
    Ok(CmdResult::default().with_similar(ranked))
}
