//! Chord tokens: notes, keys and chord qualities.
//!
//! The notation follows the lead-sheet shorthand used by the dataset:
//!
//! ```text
//! Bb^7      B flat major seventh
//! C-7/Bb    C minor seventh over B flat
//! Ah7       A half-diminished
//! D7b9#11   D dominant seventh, flat nine, sharp eleven
//! ```
//!
//! A `b` directly after the root letter is always read as an accidental, so `Bb` is B flat
//! and never "B with a flat-something alteration".

use crate::error::ChordError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the twelve pitch classes, `0` being C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PitchClass(u8);

impl PitchClass {
    pub fn new(semitones: i32) -> Self {
        Self(semitones.rem_euclid(12) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Semitones from `tonic` up to `self`, in `0..12`.
    pub fn degree_above(self, tonic: PitchClass) -> u8 {
        (self.0 + 12 - tonic.0) % 12
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    fn semitones(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    Natural,
    Flat,
    Sharp,
}

/// A spelled note name such as `Bb` or `F#`.
///
/// Spelling is kept so chords print the way they were written; comparisons that should
/// ignore spelling go through [`Note::pitch_class`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pub letter: Letter,
    pub accidental: Accidental,
}

impl Note {
    pub fn pitch_class(self) -> PitchClass {
        let offset = match self.accidental {
            Accidental::Natural => 0,
            Accidental::Flat => -1,
            Accidental::Sharp => 1,
        };
        PitchClass::new(self.letter.semitones() + offset)
    }

    /// Parses a note at the start of `s`, returning it with the number of bytes consumed.
    fn parse_prefix(s: &str) -> Option<(Note, usize)> {
        let mut chars = s.chars();
        let letter = Letter::from_char(chars.next()?)?;
        let (accidental, len) = match chars.next() {
            Some('b') => (Accidental::Flat, 2),
            Some('#') => (Accidental::Sharp, 2),
            _ => (Accidental::Natural, 1),
        };
        Some((Note { letter, accidental }, len))
    }
}

impl FromStr for Note {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Note::parse_prefix(s) {
            Some((note, len)) if len == s.len() => Ok(note),
            _ => Err(ChordError::InvalidNote(s.to_string())),
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter.as_char())?;
        match self.accidental {
            Accidental::Natural => Ok(()),
            Accidental::Flat => write!(f, "b"),
            Accidental::Sharp => write!(f, "#"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Major,
    Minor,
}

/// A song's key. Written `C`, `Bb` for major and `G-`, `Eb-` for minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub tonic: Note,
    pub mode: Mode,
}

impl Key {
    /// Human-readable name, e.g. "Eb minor".
    pub fn name(&self) -> String {
        match self.mode {
            Mode::Major => format!("{} major", self.tonic),
            Mode::Minor => format!("{} minor", self.tonic),
        }
    }

    /// Two keys are the same key when tonic pitch class and mode agree (`A#` is `Bb`).
    pub fn same_key(&self, other: &Key) -> bool {
        self.mode == other.mode && self.tonic.pitch_class() == other.tonic.pitch_class()
    }
}

impl FromStr for Key {
    type Err = ChordError;

    /// Accepts the dataset notation (`G-`) as well as `Gm`, `Gmin`, `G minor` and `G major`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ChordError::InvalidNote(s.to_string());
        let (tonic, len) = Note::parse_prefix(trimmed).ok_or_else(invalid)?;
        let mode = match trimmed[len..].trim().to_ascii_lowercase().as_str() {
            "" | "maj" | "major" => Mode::Major,
            "-" | "m" | "min" | "minor" => Mode::Minor,
            _ => return Err(invalid()),
        };
        Ok(Key { tonic, mode })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            Mode::Major => write!(f, "{}", self.tonic),
            Mode::Minor => write!(f, "{}-", self.tonic),
        }
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The chord's basic sonority, written before the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    Major,
    Minor,
    MinorMajor,
    MajorSeventh,
    HalfDiminished,
    Diminished,
    Augmented,
}

impl Base {
    fn symbol(self) -> &'static str {
        match self {
            Base::Major => "",
            Base::Minor => "-",
            Base::MinorMajor => "-^",
            Base::MajorSeventh => "^",
            Base::HalfDiminished => "h",
            Base::Diminished => "o",
            Base::Augmented => "+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    Sixth,
    SixNine,
    Seventh,
    Ninth,
    Eleventh,
    Thirteenth,
}

impl Extension {
    fn symbol(self) -> &'static str {
        match self {
            Extension::Sixth => "6",
            Extension::SixNine => "69",
            Extension::Seventh => "7",
            Extension::Ninth => "9",
            Extension::Eleventh => "11",
            Extension::Thirteenth => "13",
        }
    }

    /// True for extensions that imply a seventh in the voicing.
    pub fn has_seventh(self) -> bool {
        matches!(
            self,
            Extension::Seventh | Extension::Ninth | Extension::Eleventh | Extension::Thirteenth
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alteration {
    Altered,
    Sus4,
    Sus2,
    Sus,
    Add9,
    Add2,
    Flat5,
    Sharp5,
    Flat9,
    Sharp9,
    Sharp11,
    Flat13,
}

impl Alteration {
    fn symbol(self) -> &'static str {
        match self {
            Alteration::Altered => "alt",
            Alteration::Sus4 => "sus4",
            Alteration::Sus2 => "sus2",
            Alteration::Sus => "sus",
            Alteration::Add9 => "add9",
            Alteration::Add2 => "add2",
            Alteration::Flat5 => "b5",
            Alteration::Sharp5 => "#5",
            Alteration::Flat9 => "b9",
            Alteration::Sharp9 => "#9",
            Alteration::Sharp11 => "#11",
            Alteration::Flat13 => "b13",
        }
    }

    pub fn is_suspension(self) -> bool {
        matches!(self, Alteration::Sus | Alteration::Sus2 | Alteration::Sus4)
    }
}

// Longest symbols first so `-^` wins over `-` and `69` over `6`.
const BASES: &[Base] = &[
    Base::MinorMajor,
    Base::MajorSeventh,
    Base::Minor,
    Base::HalfDiminished,
    Base::Diminished,
    Base::Augmented,
];

const EXTENSIONS: &[Extension] = &[
    Extension::SixNine,
    Extension::Thirteenth,
    Extension::Eleventh,
    Extension::Ninth,
    Extension::Seventh,
    Extension::Sixth,
];

const ALTERATIONS: &[Alteration] = &[
    Alteration::Altered,
    Alteration::Sus4,
    Alteration::Sus2,
    Alteration::Sus,
    Alteration::Add9,
    Alteration::Add2,
    Alteration::Flat13,
    Alteration::Flat5,
    Alteration::Sharp5,
    Alteration::Flat9,
    Alteration::Sharp9,
    Alteration::Sharp11,
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quality {
    pub base: Base,
    pub extension: Option<Extension>,
    pub alterations: Vec<Alteration>,
}

impl Quality {
    pub fn major() -> Self {
        Self {
            base: Base::Major,
            extension: None,
            alterations: Vec::new(),
        }
    }

    /// Parses the whole descriptor. Returns `None` when any part is left unrecognized.
    fn parse(descriptor: &str) -> Option<Self> {
        let mut rest = descriptor;

        let base = BASES
            .iter()
            .copied()
            .find(|b| rest.starts_with(b.symbol()))
            .unwrap_or(Base::Major);
        rest = &rest[base.symbol().len()..];

        let extension = EXTENSIONS
            .iter()
            .copied()
            .find(|e| rest.starts_with(e.symbol()));
        if let Some(ext) = extension {
            rest = &rest[ext.symbol().len()..];
        }

        let mut alterations = Vec::new();
        while !rest.is_empty() {
            let alt = ALTERATIONS
                .iter()
                .copied()
                .find(|a| rest.starts_with(a.symbol()))?;
            rest = &rest[alt.symbol().len()..];
            alterations.push(alt);
        }

        Some(Self {
            base,
            extension,
            alterations,
        })
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base.symbol())?;
        if let Some(ext) = self.extension {
            write!(f, "{}", ext.symbol())?;
        }
        for alt in &self.alterations {
            write!(f, "{}", alt.symbol())?;
        }
        Ok(())
    }
}

/// A single chord token: root, quality and optional bass note.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord {
    pub root: Note,
    pub quality: Quality,
    pub bass: Option<Note>,
}

impl FromStr for Chord {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err(ChordError::Empty);
        }

        let (root, root_len) =
            Note::parse_prefix(token).ok_or_else(|| ChordError::InvalidNote(token.to_string()))?;
        let rest = &token[root_len..];

        let (descriptor, bass) = match rest.split_once('/') {
            Some((_, "")) => return Err(ChordError::MissingBass(token.to_string())),
            Some((descriptor, bass)) => (descriptor, Some(bass.parse::<Note>()?)),
            None => (rest, None),
        };

        let quality = Quality::parse(descriptor).ok_or_else(|| ChordError::UnknownQuality {
            token: token.to_string(),
            descriptor: descriptor.to_string(),
        })?;

        Ok(Chord {
            root,
            quality,
            bass,
        })
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.quality)?;
        if let Some(bass) = self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

impl Serialize for Chord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(s: &str) -> Chord {
        s.parse().unwrap()
    }

    #[test]
    fn test_pitch_classes() {
        assert_eq!("C".parse::<Note>().unwrap().pitch_class().value(), 0);
        assert_eq!("Bb".parse::<Note>().unwrap().pitch_class().value(), 10);
        assert_eq!("F#".parse::<Note>().unwrap().pitch_class().value(), 6);
        // Cb wraps around to B
        assert_eq!("Cb".parse::<Note>().unwrap().pitch_class().value(), 11);
        assert!("H".parse::<Note>().is_err());
        assert!("Cbb".parse::<Note>().is_err());
    }

    #[test]
    fn test_degree_above() {
        let g = "G".parse::<Note>().unwrap().pitch_class();
        let d = "D".parse::<Note>().unwrap().pitch_class();
        let f = "F".parse::<Note>().unwrap().pitch_class();
        assert_eq!(d.degree_above(g), 7);
        assert_eq!(f.degree_above(g), 10);
        assert_eq!(g.degree_above(g), 0);
    }

    #[test]
    fn test_parse_common_qualities() {
        let c = chord("Bb^7");
        assert_eq!(c.root.to_string(), "Bb");
        assert_eq!(c.quality.base, Base::MajorSeventh);
        assert_eq!(c.quality.extension, Some(Extension::Seventh));

        let c = chord("C-7");
        assert_eq!(c.quality.base, Base::Minor);

        let c = chord("Ah7");
        assert_eq!(c.quality.base, Base::HalfDiminished);

        let c = chord("G-^7");
        assert_eq!(c.quality.base, Base::MinorMajor);

        let c = chord("F");
        assert_eq!(c.quality, Quality::major());

        let c = chord("D7b9#11");
        assert_eq!(c.quality.extension, Some(Extension::Seventh));
        assert_eq!(
            c.quality.alterations,
            vec![Alteration::Flat9, Alteration::Sharp11]
        );

        let c = chord("C69");
        assert_eq!(c.quality.extension, Some(Extension::SixNine));

        let c = chord("E7sus");
        assert_eq!(c.quality.alterations, vec![Alteration::Sus]);
    }

    #[test]
    fn test_parse_slash_chord() {
        let c = chord("C-7/Bb");
        assert_eq!(c.bass.unwrap().to_string(), "Bb");
        assert!("C-7/".parse::<Chord>().is_err());
        assert!("C-7/X".parse::<Chord>().is_err());
    }

    #[test]
    fn test_unknown_quality_is_rejected() {
        let err = "Cmaj7".parse::<Chord>().unwrap_err();
        assert_eq!(
            err,
            ChordError::UnknownQuality {
                token: "Cmaj7".to_string(),
                descriptor: "maj7".to_string(),
            }
        );
        assert!("C7q".parse::<Chord>().is_err());
        assert!("x".parse::<Chord>().is_err());
        assert_eq!("".parse::<Chord>(), Err(ChordError::Empty));
    }

    #[test]
    fn test_chord_display_round_trip() {
        for token in [
            "Bb^7", "C-7/Bb", "Ah7", "D7b9#11", "Eb-^7", "F#o7", "G+7", "C69", "E7sus4",
            "Ab7alt", "Db^7#11", "B-7b5", "C",
        ] {
            let parsed = chord(token);
            assert_eq!(parsed.to_string(), token);
            assert_eq!(parsed.to_string().parse::<Chord>().unwrap(), parsed);
        }
    }

    #[test]
    fn test_key_parse_and_display() {
        let key: Key = "G-".parse().unwrap();
        assert_eq!(key.mode, Mode::Minor);
        assert_eq!(key.to_string(), "G-");
        assert_eq!(key.name(), "G minor");

        let key: Key = "Bb".parse().unwrap();
        assert_eq!(key.mode, Mode::Major);
        assert_eq!(key.to_string(), "Bb");

        assert!("Gm".parse::<Key>().unwrap().same_key(&"G-".parse().unwrap()));
        assert!("A# minor"
            .parse::<Key>()
            .unwrap()
            .same_key(&"Bb-".parse().unwrap()));
        assert!("G dorian".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
    }
}
