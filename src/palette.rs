// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Palettes are triangle-wave ramps: the brightness climbs for 510
//! entries and falls for the next 510, and each of the four palette
//! ids tints that brightness differently.  The last few entries of
//! every palette are forced to opaque black, which is where pixels
//! that never escape end up.

use errors::FractalError;
use std::fmt;

/// Number of entries in a standard palette.
pub const PALETTE_SIZE: usize = 1021;

/// Length of one full rise-and-fall of the brightness ramp.
const RAMP_PERIOD: usize = 1020;

/// Number of opaque black entries at the end of every palette.
pub const TERMINATOR_BAND: usize = 10;

/// One color, eight bits per channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    /// Opaque black, the color of the terminator band.
    pub const BLACK: Rgba = Rgba(0, 0, 0, 255);

    /// Packs the channels so that the little-endian bytes of the
    /// result read red, green, blue, alpha.
    pub fn pack(self) -> u32 {
        u32::from(self.0)
            | u32::from(self.1) << 8
            | u32::from(self.2) << 16
            | u32::from(self.3) << 24
    }

    /// Inverse of `pack`.
    pub fn unpack(packed: u32) -> Rgba {
        Rgba(
            packed as u8,
            (packed >> 8) as u8,
            (packed >> 16) as u8,
            (packed >> 24) as u8,
        )
    }
}

/// Selects one of the four fixed color ramps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PaletteId {
    /// Id 0: white fading to a deep blue.
    Frost,
    /// Id 1: pale yellow fading to red.
    Sunset,
    /// Id 2: blue brightening to cyan.
    Ocean,
    /// Id 3: black brightening to orange.
    Ember,
}

impl PaletteId {
    /// Every palette, in id order.
    pub const ALL: [PaletteId; 4] = [
        PaletteId::Frost,
        PaletteId::Sunset,
        PaletteId::Ocean,
        PaletteId::Ember,
    ];

    /// Looks up a palette by its numeric id.  There is no fallback for
    /// unknown ids.
    pub fn from_index(index: usize) -> Result<PaletteId, FractalError> {
        PaletteId::ALL
            .get(index)
            .cloned()
            .ok_or(FractalError::InvalidPaletteId(index))
    }

    /// The numeric id.
    pub fn index(self) -> usize {
        match self {
            PaletteId::Frost => 0,
            PaletteId::Sunset => 1,
            PaletteId::Ocean => 2,
            PaletteId::Ember => 3,
        }
    }

    fn tint(self, color: u8) -> Rgba {
        match self {
            PaletteId::Frost => Rgba(255 - color, 255 - color, 255 - color / 3, 255),
            PaletteId::Sunset => Rgba(255 - color / 3, 255 - color, 128 - color / 2, 255),
            PaletteId::Ocean => Rgba(color / 2, color, 127 + color / 2, 255),
            PaletteId::Ember => Rgba(color, color / 2, 0, 255),
        }
    }
}

impl Default for PaletteId {
    fn default() -> PaletteId {
        PaletteId::Frost
    }
}

impl fmt::Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// The brightness of entry `x`: a triangle wave from 0 up to 255 and
/// back down over `RAMP_PERIOD` entries.
fn ramp(x: usize) -> u8 {
    let value = (x % RAMP_PERIOD) / 2;
    let color = if value <= 255 { value } else { 510 - value };
    color as u8
}

/// An ordered, immutable list of packed colors.  Built once per
/// palette change and shared by every pass that uses it.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    id: PaletteId,
    colors: Vec<u32>,
}

impl Palette {
    /// A standard-sized palette.
    pub fn new(id: PaletteId) -> Palette {
        Palette::generate(id, PALETTE_SIZE)
    }

    /// Builds a palette of `size` entries.  The last `TERMINATOR_BAND`
    /// entries are black; a palette smaller than the band is entirely
    /// black.
    pub fn generate(id: PaletteId, size: usize) -> Palette {
        let colors = (0..size)
            .map(|x| {
                if x + TERMINATOR_BAND >= size {
                    Rgba::BLACK
                } else {
                    id.tint(ramp(x))
                }
            })
            .map(Rgba::pack)
            .collect();
        Palette { id, colors }
    }

    /// Which ramp this is.
    pub fn id(&self) -> PaletteId {
        self.id
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True for a zero-sized palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The packed color at `index`.  Panics when out of range; the
    /// evaluators only ever hand in indices below `len()`.
    pub fn color(&self, index: usize) -> u32 {
        self.colors[index]
    }

    /// The unpacked color at `index`.
    pub fn rgba(&self, index: usize) -> Rgba {
        Rgba::unpack(self.colors[index])
    }

    /// The packed colors, in order.
    pub fn colors(&self) -> &[u32] {
        &self.colors
    }

    /// Red, green, blue, alpha bytes for every entry, suitable for
    /// uploading as a `len() x 1` RGBA texture.
    pub fn texture_bytes(&self) -> Vec<u8> {
        self.colors
            .iter()
            .flat_map(|packed| {
                let c = Rgba::unpack(*packed);
                vec![c.0, c.1, c.2, c.3]
            })
            .collect()
    }
}
