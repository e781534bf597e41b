//! Styles for the swing CLI.
//!
//! Templates never name colors. They apply semantic style names (`song-title`, `muted`,
//! `chord`) through the `style` filter, and a [`Theme`] maps each name to a
//! `console::Style`. Light and dark terminals get different palettes for the same names;
//! [`resolved_theme`] picks one with `dark-light`.
//!
//! Style names used by templates are listed in [`names`]. A name missing from the theme
//! renders unstyled.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const MUTED: &str = "muted";
    pub const FAINT: &str = "faint";
    pub const HEADER: &str = "header";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
    // Song listings
    pub const LIST_INDEX: &str = "list-index";
    pub const SONG_TITLE: &str = "song-title";
    pub const LABEL: &str = "label";
    pub const SCORE: &str = "score";
    // Lead sheets
    pub const SECTION: &str = "section";
    pub const CHORD: &str = "chord";
    pub const BARLINE: &str = "barline";
}

#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<&'static str, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &'static str, style: Style) -> Self {
        self.styles.insert(name, style);
        self
    }

    /// Styles `text` with the named style; unknown names leave it untouched.
    pub fn apply(&self, name: &str, text: &str) -> String {
        match self.styles.get(name) {
            Some(style) => style.apply_to(text).to_string(),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
impl Theme {
    fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }
}

pub static LIGHT_THEME: Lazy<Theme> = Lazy::new(build_light_theme);
pub static DARK_THEME: Lazy<Theme> = Lazy::new(build_dark_theme);

/// Returns the theme matching the terminal's color mode.
pub fn resolved_theme() -> &'static Theme {
    match dark_light::detect() {
        dark_light::Mode::Light => &*LIGHT_THEME,
        _ => &*DARK_THEME,
    }
}

/// Maps an RGB color to the closest entry of the xterm 256-color palette.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

fn build_light_theme() -> Theme {
    let regular = Style::new().black();
    let muted = Style::new().color256(rgb_to_ansi256((115, 115, 115)));
    let faint = Style::new().color256(rgb_to_ansi256((173, 173, 173)));
    let accent = Style::new().color256(rgb_to_ansi256((196, 140, 0)));
    let brass = Style::new().color256(rgb_to_ansi256((0, 95, 175)));

    Theme::new()
        .add(names::MUTED, muted.clone())
        .add(names::FAINT, faint.clone())
        .add(names::HEADER, regular.clone().bold())
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted.clone())
        .add(names::LIST_INDEX, accent.clone())
        .add(names::SONG_TITLE, regular.bold())
        .add(names::LABEL, muted.clone())
        .add(names::SCORE, muted.italic())
        .add(names::SECTION, accent.bold())
        .add(names::CHORD, brass)
        .add(names::BARLINE, faint)
}

fn build_dark_theme() -> Theme {
    let regular = Style::new().white();
    let muted = Style::new().color256(rgb_to_ansi256((180, 180, 180)));
    let faint = Style::new().color256(rgb_to_ansi256((110, 110, 110)));
    let accent = Style::new().color256(rgb_to_ansi256((255, 214, 10)));
    let brass = Style::new().color256(rgb_to_ansi256((135, 206, 250)));

    Theme::new()
        .add(names::MUTED, muted.clone())
        .add(names::FAINT, faint.clone())
        .add(names::HEADER, regular.clone().bold())
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted.clone())
        .add(names::LIST_INDEX, accent.clone())
        .add(names::SONG_TITLE, regular.bold())
        .add(names::LABEL, muted.clone())
        .add(names::SCORE, muted.italic())
        .add(names::SECTION, accent.bold())
        .add(names::CHORD, brass)
        .add(names::BARLINE, faint)
}
