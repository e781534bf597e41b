//! # Chord Progressions
//!
//! A song's harmony is stored the way lead sheets write it:
//!
//! ```text
//! Progression
//! └── Section (label "A", repeats 2)
//!     ├── main Segment:  C-7|F7|Bb^7|Eb^7
//!     └── endings:       [Ah7|D7b9, G-6|G-6]
//! ```
//!
//! A [`Segment`] is a run of bars separated by `|`; chords sharing a bar are separated by `,`.
//! Every chord token is parsed when the song is loaded (see [`chord`]), so a progression in the
//! catalog is always well formed.
//!
//! For comparisons the nested structure is flattened into one ordered chord sequence (main
//! segment, then endings, section by section) and key-normalized, see [`similarity`].
//!
//! ## Notation Round Trip
//!
//! `Display` writes the canonical notation. For a whole progression the segments are joined
//! with ` || `, and [`Progression::from_str`] reads that back as a single unlabeled section,
//! which yields the same flat chord sequence.

pub mod chord;
pub mod similarity;

use crate::error::ChordError;
use chord::Chord;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const BAR_SEPARATOR: char = '|';
const CHORD_SEPARATOR: char = ',';
const SEGMENT_SEPARATOR: &str = "||";

/// The chords written in one bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub chords: Vec<Chord>,
}

impl fmt::Display for Bar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chord) in self.chords.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", CHORD_SEPARATOR)?;
            }
            write!(f, "{}", chord)?;
        }
        Ok(())
    }
}

/// A run of bars, e.g. `C-7|F7|Bb^7,G7`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub bars: Vec<Bar>,
}

impl Segment {
    pub fn chords(&self) -> impl Iterator<Item = &Chord> {
        self.bars.iter().flat_map(|bar| bar.chords.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

impl FromStr for Segment {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let notation = s.trim();
        if notation.is_empty() {
            return Err(ChordError::Empty);
        }

        let bars = notation
            .split(BAR_SEPARATOR)
            .map(|bar| {
                if bar.trim().is_empty() {
                    return Err(ChordError::EmptyBar(notation.to_string()));
                }
                let chords = bar
                    .split(CHORD_SEPARATOR)
                    .map(str::parse::<Chord>)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Bar { chords })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Segment { bars })
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, bar) in self.bars.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", BAR_SEPARATOR)?;
            }
            write!(f, "{}", bar)?;
        }
        Ok(())
    }
}

impl Serialize for Segment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub label: Option<String>,
    pub repeats: Option<u32>,
    pub main: Option<Segment>,
    pub endings: Vec<Segment>,
}

impl Section {
    pub fn chords(&self) -> impl Iterator<Item = &Chord> {
        self.main
            .iter()
            .chain(self.endings.iter())
            .flat_map(|segment| segment.chords())
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.main.iter().chain(self.endings.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Progression {
    sections: Vec<Section>,
}

impl Progression {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// The flat chord sequence: main segment then endings, section by section.
    pub fn chords(&self) -> impl Iterator<Item = &Chord> {
        self.sections.iter().flat_map(|section| section.chords())
    }

    pub fn chord_count(&self) -> usize {
        self.chords().count()
    }

    pub fn is_empty(&self) -> bool {
        self.chords().next().is_none()
    }

    pub fn bar_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|section| section.segments())
            .map(|segment| segment.bars.len())
            .sum()
    }
}

impl FromStr for Progression {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s
            .split(SEGMENT_SEPARATOR)
            .map(str::parse::<Segment>)
            .collect::<Result<Vec<_>, _>>()?
            .into_iter();

        let main = segments.next();
        Ok(Progression::new(vec![Section {
            label: None,
            repeats: None,
            main,
            endings: segments.collect(),
        }]))
    }
}

impl fmt::Display for Progression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments = self.sections.iter().flat_map(|section| section.segments());
        for (i, segment) in segments.enumerate() {
            if i > 0 {
                write!(f, " {} ", SEGMENT_SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
