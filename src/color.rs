//! State → colour resolution and the highlight visual

use crate::cell::CellState;
use crate::error::RenderError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 24-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque RGBA bytes in buffer order
    #[inline]
    pub const fn rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Colour returned for any state without a palette entry
pub const FALLBACK: Rgb = Rgb::BLACK;

/// Alpha blend a single channel
/// Uses fast approximation: (x + 1 + (x >> 8)) >> 8 instead of x / 255
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

#[inline]
fn offset_channel(c: u8, delta: i16) -> u8 {
    (c as i16 + delta).clamp(0, 255) as u8
}

/// How a highlighted cell is drawn on top of its base colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum HighlightStyle {
    /// Saturating per-channel offset from the base colour
    Tint { r: i16, g: i16, b: i16 },
    /// Base colour blended toward `color` by `alpha` (0 = base, 255 = color)
    Blend { color: Rgb, alpha: u8 },
}

impl Default for HighlightStyle {
    /// Pushes red and green up and blue down, so every palette colour turns
    /// a distinct yellowish shade.
    fn default() -> Self {
        HighlightStyle::Tint {
            r: 180,
            g: 180,
            b: -180,
        }
    }
}

impl HighlightStyle {
    pub fn apply(&self, base: Rgb) -> Rgb {
        match *self {
            HighlightStyle::Tint { r, g, b } => Rgb::new(
                offset_channel(base.r, r),
                offset_channel(base.g, g),
                offset_channel(base.b, b),
            ),
            HighlightStyle::Blend { color, alpha } => {
                let a = alpha as u16;
                Rgb::new(
                    blend_channel(color.r, base.r, a),
                    blend_channel(color.g, base.g, a),
                    blend_channel(color.b, base.b, a),
                )
            }
        }
    }
}

/// Fixed state → colour table. States without an entry resolve to [`FALLBACK`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: [Option<Rgb>; CellState::COUNT],
}

impl Palette {
    /// Table with no entries; everything resolves to the fallback
    pub const fn empty() -> Self {
        Self {
            entries: [None; CellState::COUNT],
        }
    }

    pub fn set(&mut self, state: CellState, color: Rgb) {
        self.entries[state.index()] = Some(color);
    }

    pub fn get(&self, state: CellState) -> Option<Rgb> {
        self.entries[state.index()]
    }

    /// Build from a name → colour map. Unknown names are a config error.
    pub fn from_names(map: &BTreeMap<String, Rgb>) -> Result<Self, RenderError> {
        let mut palette = Self::empty();
        for (name, &color) in map {
            let state = CellState::from_name(name).ok_or_else(|| {
                RenderError::Config(format!("unknown cell state '{}' in palette", name))
            })?;
            palette.set(state, color);
        }
        Ok(palette)
    }

    pub fn to_names(&self) -> BTreeMap<String, Rgb> {
        CellState::ALL
            .iter()
            .filter_map(|&s| self.get(s).map(|c| (s.name().to_string(), c)))
            .collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        let mut p = Self::empty();
        p.set(CellState::Food, Rgb::new(46, 122, 182));
        p.set(CellState::Wall, Rgb::new(128, 128, 128));
        p.set(CellState::Mouth, Rgb::new(222, 176, 76));
        p.set(CellState::Producer, Rgb::new(20, 223, 89));
        p.set(CellState::Mover, Rgb::new(96, 212, 255));
        p.set(CellState::Killer, Rgb::new(248, 35, 128));
        p.set(CellState::Armor, Rgb::new(114, 48, 219));
        p.set(CellState::Eye, Rgb::new(182, 193, 234));
        p
    }
}

/// Pure O(1) colour lookup. Never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorResolver {
    palette: Palette,
    highlight: HighlightStyle,
}

impl ColorResolver {
    pub fn new(palette: Palette, highlight: HighlightStyle) -> Self {
        Self { palette, highlight }
    }

    #[inline]
    pub fn resolve(&self, state: CellState) -> Rgb {
        self.palette.get(state).unwrap_or(FALLBACK)
    }

    /// Resolve by state name as sent by the simulation
    pub fn resolve_name(&self, name: &str) -> Rgb {
        CellState::from_name(name).map_or(FALLBACK, |s| self.resolve(s))
    }

    /// Highlighted variant of a state's base colour
    #[inline]
    pub fn highlight(&self, state: CellState) -> Rgb {
        self.highlight.apply(self.resolve(state))
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn highlight_style(&self) -> HighlightStyle {
        self.highlight
    }
}
