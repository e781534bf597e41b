//! Key-normalized comparison of chord progressions.
//!
//! Two tunes "have the same changes" when they move through the same harmonic functions,
//! whatever key they are written in. Normalization therefore rewrites every chord as
//! `(degree, class)`: the root's distance in semitones above the song's tonic, and the
//! chord's harmonic family. `Bb^7` in F and `Eb^7` in Bb both become `(5, Major)`.
//!
//! Similarity is a weighted longest common subsequence over the normalized sequences,
//! divided by the longer length. Substitutions earn partial credit:
//!
//! | pair                                         | weight |
//! |----------------------------------------------|--------|
//! | same degree, same class                      | 1.0    |
//! | same degree, different class                 | 0.5    |
//! | two dominants a tritone apart (tritone sub)  | 0.5    |
//! | anything else                                | 0.0    |
//!
//! The weight table is symmetric, which makes [`similarity`] symmetric. Rhythmic position is
//! not weighted; each written chord counts once, so a harmony held for four bars weighs four
//! times a harmony held for one.

use super::chord::{Base, Chord, Key, PitchClass};
use super::Progression;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChordClass {
    Major,
    Minor,
    Dominant,
    HalfDiminished,
    Diminished,
    Augmented,
    Suspended,
}

impl ChordClass {
    pub fn of(chord: &Chord) -> Self {
        let quality = &chord.quality;
        let has_seventh = quality.extension.is_some_and(|e| e.has_seventh());
        let suspended = quality.alterations.iter().any(|a| a.is_suspension());
        let flat_five = quality
            .alterations
            .contains(&super::chord::Alteration::Flat5);

        match quality.base {
            Base::MajorSeventh => ChordClass::Major,
            Base::HalfDiminished => ChordClass::HalfDiminished,
            Base::Diminished => ChordClass::Diminished,
            Base::Minor | Base::MinorMajor if flat_five && has_seventh => {
                ChordClass::HalfDiminished
            }
            Base::Minor | Base::MinorMajor => ChordClass::Minor,
            Base::Augmented if has_seventh => ChordClass::Dominant,
            Base::Augmented => ChordClass::Augmented,
            Base::Major if suspended => ChordClass::Suspended,
            Base::Major if has_seventh => ChordClass::Dominant,
            Base::Major => ChordClass::Major,
        }
    }
}

/// A chord reduced to its function relative to the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedChord {
    pub degree: u8,
    pub class: ChordClass,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedProgression(Vec<NormalizedChord>);

impl NormalizedProgression {
    pub fn chords(&self) -> &[NormalizedChord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<NormalizedChord>> for NormalizedProgression {
    fn from(chords: Vec<NormalizedChord>) -> Self {
        Self(chords)
    }
}

/// Rewrites each chord relative to `key`'s tonic.
///
/// Without a key the first chord's root stands in as the tonic.
pub fn normalize(progression: &Progression, key: Option<&Key>) -> NormalizedProgression {
    let tonic: Option<PitchClass> = key
        .map(|k| k.tonic.pitch_class())
        .or_else(|| progression.chords().next().map(|c| c.root.pitch_class()));

    let Some(tonic) = tonic else {
        return NormalizedProgression::default();
    };

    progression
        .chords()
        .map(|chord| NormalizedChord {
            degree: chord.root.pitch_class().degree_above(tonic),
            class: ChordClass::of(chord),
        })
        .collect::<Vec<_>>()
        .into()
}

/// Credit for aligning `a` with `b`.
fn substitution_weight(a: &NormalizedChord, b: &NormalizedChord) -> f64 {
    if a == b {
        1.0
    } else if a.degree == b.degree {
        0.5
    } else if a.class == ChordClass::Dominant
        && b.class == ChordClass::Dominant
        && (a.degree + 12 - b.degree) % 12 == 6
    {
        0.5
    } else {
        0.0
    }
}

/// Similarity in `[0, 1]` of two normalized progressions.
///
/// Two empty progressions are identical (1.0); an empty one shares nothing with a
/// non-empty one (0.0).
pub fn similarity(a: &NormalizedProgression, b: &NormalizedProgression) -> f64 {
    let (a, b) = (a.chords(), b.chords());
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Rolling rows of the weighted-LCS table.
    let mut previous = vec![0.0f64; b.len() + 1];
    let mut current = vec![0.0f64; b.len() + 1];
    for chord_a in a {
        for (j, chord_b) in b.iter().enumerate() {
            let aligned = previous[j] + substitution_weight(chord_a, chord_b);
            current[j + 1] = aligned.max(previous[j + 1]).max(current[j]);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    (previous[b.len()] / longest as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(notation: &str, key: &str) -> NormalizedProgression {
        let progression: Progression = notation.parse().unwrap();
        let key: Key = key.parse().unwrap();
        normalize(&progression, Some(&key))
    }

    fn class(token: &str) -> ChordClass {
        ChordClass::of(&token.parse().unwrap())
    }

    #[test]
    fn test_chord_classes() {
        assert_eq!(class("C^7"), ChordClass::Major);
        assert_eq!(class("C6"), ChordClass::Major);
        assert_eq!(class("C"), ChordClass::Major);
        assert_eq!(class("C-7"), ChordClass::Minor);
        assert_eq!(class("C-^7"), ChordClass::Minor);
        assert_eq!(class("C7"), ChordClass::Dominant);
        assert_eq!(class("C13b9"), ChordClass::Dominant);
        assert_eq!(class("C7alt"), ChordClass::Dominant);
        assert_eq!(class("C+7"), ChordClass::Dominant);
        assert_eq!(class("C+"), ChordClass::Augmented);
        assert_eq!(class("Ch7"), ChordClass::HalfDiminished);
        assert_eq!(class("C-7b5"), ChordClass::HalfDiminished);
        assert_eq!(class("Co7"), ChordClass::Diminished);
        assert_eq!(class("C7sus"), ChordClass::Suspended);
    }

    #[test]
    fn test_normalization_is_transposition_invariant() {
        let in_c = normalized("D-7|G7|C^7", "C");
        let in_bb = normalized("C-7|F7|Bb^7", "Bb");
        assert_eq!(in_c, in_bb);
        assert_eq!(
            in_c.chords()[1],
            NormalizedChord {
                degree: 7,
                class: ChordClass::Dominant
            }
        );
    }

    #[test]
    fn test_normalization_without_key_uses_first_root() {
        let progression: Progression = "F-7|Bb7|Eb^7".parse().unwrap();
        let norm = normalize(&progression, None);
        assert_eq!(norm.chords()[0].degree, 0);
        assert_eq!(norm.chords()[2].degree, 10);
    }

    #[test]
    fn test_bass_notes_are_ignored() {
        assert_eq!(normalized("C^7/E|F^7", "C"), normalized("C^7|F^7", "C"));
    }

    #[test]
    fn test_identity_and_symmetry() {
        let samples = [
            normalized("D-7|G7|C^7|C^7", "C"),
            normalized("C-7|F7|Bb^7|Eb^7|Ah7|D7b9|G-6", "G-"),
            normalized("Bb7|Eb7|Bb7|F7", "Bb"),
            normalized("C^7", "C"),
        ];
        for p in &samples {
            assert_eq!(similarity(p, p), 1.0);
            for q in &samples {
                assert_eq!(similarity(p, q), similarity(q, p));
                let s = similarity(p, q);
                assert!((0.0..=1.0).contains(&s));
            }
        }
    }

    #[test]
    fn test_empty_progressions() {
        let empty = NormalizedProgression::default();
        let tune = normalized("C^7|A-7", "C");
        assert_eq!(similarity(&empty, &empty), 1.0);
        assert_eq!(similarity(&empty, &tune), 0.0);
        assert_eq!(similarity(&tune, &empty), 0.0);
    }

    #[test]
    fn test_single_chord_only_identical_to_itself() {
        let c = normalized("C^7", "C");
        let minor = normalized("C-7", "C");
        let other = normalized("F^7", "C");
        assert_eq!(similarity(&c, &c), 1.0);
        assert_eq!(similarity(&c, &minor), 0.5);
        assert_eq!(similarity(&c, &other), 0.0);
    }

    #[test]
    fn test_tritone_substitution_earns_partial_credit() {
        let plain = normalized("D-7|G7|C^7", "C");
        let tritone = normalized("D-7|Db7|C^7", "C");
        let s = similarity(&plain, &tritone);
        assert!((s - 2.5 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_changes_in_different_keys() {
        let a = normalized("D-7|D-7|Eb-7|D-7", "D-");
        let b = normalized("G-7|G-7|Ab-7|G-7", "G-");
        assert_eq!(similarity(&a, &b), 1.0);
    }

    #[test]
    fn test_extra_chords_lower_similarity() {
        let short = normalized("D-7|G7|C^7", "C");
        let long = normalized("D-7|G7|C^7|A7|D-7|G7", "C");
        let s = similarity(&short, &long);
        assert!((s - 0.5).abs() < 1e-9);
    }
}
