use crate::catalog::Catalog;
use crate::model::Song;

/// A small dataset covering the cases the unit tests exercise: shared modal changes
/// (So What / Impressions), rhythm changes (Anthropology / Oleo), a waltz in 6/8, a 5/4
/// tune, non-ASCII names and a song without a lead sheet.
pub const FIXTURE_DATASET: &str = r#"[
  {
    "Title": "All Blues",
    "Composer": "Miles Davis",
    "Year": 1959,
    "Key": "G",
    "Rhythm": "Jazz Waltz",
    "TimeSignature": "6/8",
    "Performers": ["Miles Davis"],
    "Sections": [
      {"Label": "A", "MainSegment": {"Chords": "G7|G7|G7|G7|C7|C7|G7|G7|D7#9|Eb7#9,D7#9|G7|G7"}}
    ]
  },
  {
    "Title": "Anthropology",
    "Composer": "Charlie Parker, Dizzy Gillespie",
    "Year": 1946,
    "Key": "Bb",
    "Rhythm": "Up Tempo Swing",
    "TimeSignature": "4/4",
    "Performers": ["Charlie Parker"],
    "Sections": [
      {"Label": "A", "Repeats": 2, "MainSegment": {"Chords": "Bb^7,G-7|C-7,F7|Bb^7,G-7|C-7,F7|F-7,Bb7|Eb^7,Ab7|D-7,G7|C-7,F7"}},
      {"Label": "B", "MainSegment": {"Chords": "D7|D7|G7|G7|C7|C7|F7|F7"}}
    ]
  },
  {
    "Title": "Autumn Leaves",
    "Composer": "Joseph Kosma, Johnny Mercer",
    "Year": 1945,
    "Key": "G-",
    "Rhythm": "Medium Swing",
    "TimeSignature": "4/4",
    "Performers": ["Bill Evans", "Cannonball Adderley", "Miles Davis"],
    "Sections": [
      {"Label": "A", "Repeats": 2, "MainSegment": {"Chords": "C-7|F7|Bb^7|Eb^7|Ah7|D7b9|G-6|G-6"}}
    ]
  },
  {
    "Title": "Blue in Green",
    "Composer": "Miles Davis, Bill Evans",
    "Year": 1959,
    "Key": "D-",
    "Rhythm": "Ballad",
    "TimeSignature": "4/4",
    "Performers": ["Bill Evans", "Miles Davis"],
    "Sections": [
      {"MainSegment": {"Chords": "Bb^7#11|A7#9|D-7,Db7|C-7,F7|Bb^7|A7#9|D-^7|E7#9|A7#9|D-^7"}}
    ]
  },
  {
    "Title": "Impressions",
    "Composer": "John Coltrane",
    "Year": 1963,
    "Key": "D-",
    "Rhythm": "Modal",
    "TimeSignature": "4/4",
    "Performers": ["John Coltrane"],
    "Sections": [
      {"Label": "A", "Repeats": 2, "MainSegment": {"Chords": "D-7|D-7|D-7|D-7|D-7|D-7|D-7|D-7"}},
      {"Label": "B", "MainSegment": {"Chords": "Eb-7|Eb-7|Eb-7|Eb-7|Eb-7|Eb-7|Eb-7|Eb-7"}},
      {"Label": "A", "MainSegment": {"Chords": "D-7|D-7|D-7|D-7|D-7|D-7|D-7|D-7"}}
    ]
  },
  {
    "Title": "Oleo",
    "Composer": "Sonny Rollins",
    "Year": 1954,
    "Key": "Bb",
    "Rhythm": "Up Tempo Swing",
    "TimeSignature": "4/4",
    "Performers": ["Miles Davis", "Sonny Rollins"],
    "Sections": [
      {"Label": "A", "Repeats": 2, "MainSegment": {"Chords": "Bb^7,G-7|C-7,F7|D-7,G-7|C-7,F7|F-7,Bb7|Eb7,Ab7|D-7,G7|C-7,F7"}},
      {"Label": "B", "MainSegment": {"Chords": "D7|D7|G7|G7|C7|C7|F7|F7"}}
    ]
  },
  {
    "Title": "So What",
    "Composer": "Miles Davis",
    "Year": 1959,
    "Key": "D-",
    "Rhythm": "Modal",
    "TimeSignature": "4/4",
    "Performers": ["John Coltrane", "Miles Davis"],
    "Sections": [
      {"Label": "A", "Repeats": 2, "MainSegment": {"Chords": "D-7|D-7|D-7|D-7|D-7|D-7|D-7|D-7"}},
      {"Label": "B", "MainSegment": {"Chords": "Eb-7|Eb-7|Eb-7|Eb-7|Eb-7|Eb-7|Eb-7|Eb-7"}},
      {"Label": "A", "MainSegment": {"Chords": "D-7|D-7|D-7|D-7|D-7|D-7|D-7|D-7"}}
    ]
  },
  {
    "Title": "Summertime",
    "Composer": "George Gershwin, DuBose Heyward",
    "Year": 1935,
    "Key": "A-",
    "Rhythm": "Ballad",
    "TimeSignature": "4/4",
    "Performers": ["Ella Fitzgerald", "Louis Armstrong"],
    "Sections": [
      {"Label": "A", "MainSegment": {"Chords": "A-6|E7|A-6|A-6|D-7|D-7|F7|E7"}}
    ]
  },
  {
    "Title": "Take Five",
    "Composer": "Paul Desmond",
    "Year": 1959,
    "Key": "Eb-",
    "Rhythm": "Even Eighths",
    "TimeSignature": "5/4",
    "Performers": ["Dave Brubeck"],
    "Sections": [
      {"Label": "A", "Repeats": 2, "MainSegment": {"Chords": "Eb-,Bb-7|Eb-,Bb-7|Eb-,Bb-7|Eb-,Bb-7"}},
      {"Label": "B", "MainSegment": {"Chords": "Cb^7|Ab-7|Bb-7|Eb-7|Ab-7|Db7|Gb^7|F7"}}
    ]
  },
  {
    "Title": "The Girl from Ipanema",
    "Composer": "Antonio Carlos Jobim & Vinicius de Moraes",
    "Year": 1962,
    "Key": "F",
    "Rhythm": "Bossa Nova",
    "TimeSignature": "4/4",
    "Performers": ["João Gilberto", "Stan Getz"],
    "Sections": [
      {"Label": "A", "Repeats": 2, "MainSegment": {"Chords": "F^7|F^7|G7|G7|G-7|Gb7|F^7|Gb7"}}
    ]
  },
  {
    "Title": "Well, You Needn't",
    "Composer": "Thelonious Monk",
    "Year": 1944,
    "Key": "F",
    "Rhythm": "Medium Up Swing"
  }
]"#;

/// The fixture dataset as a catalog.
pub fn fixture_catalog() -> Catalog {
    Catalog::load(FIXTURE_DATASET).expect("fixture dataset must load")
}

/// The fixture songs, in dataset order.
pub fn fixture_songs() -> Vec<Song> {
    fixture_catalog().songs().to_vec()
}
