use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::WalkError;

/// Opaque RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    pub const WHITE: Rgb = Rgb([255, 255, 255]);
    pub const RED: Rgb = Rgb([255, 0, 0]);
    // matplotlib's "green" is #008000, not pure green
    pub const GREEN: Rgb = Rgb([0, 128, 0]);
    pub const BLUE: Rgb = Rgb([0, 0, 255]);
    pub const GRAY: Rgb = Rgb([128, 128, 128]);
    pub const ORANGE: Rgb = Rgb([255, 165, 0]);
    pub const PURPLE: Rgb = Rgb([128, 0, 128]);

    pub const fn hex(v: u32) -> Rgb {
        Rgb([(v >> 16) as u8, (v >> 8) as u8, v as u8])
    }

    pub fn rgba(self) -> [u8; 4] {
        [self.0[0], self.0[1], self.0[2], 255]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

impl FromStr for Rgb {
    type Err = WalkError;

    /// Named colour or `#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() == 6 {
                if let Ok(v) = u32::from_str_radix(hex, 16) {
                    return Ok(Rgb::hex(v));
                }
            }
            return Err(WalkError::invalid(format!("bad hex colour '{}'", s)));
        }
        match s.to_ascii_lowercase().as_str() {
            "black" | "k" => Ok(Rgb::BLACK),
            "white" | "w" => Ok(Rgb::WHITE),
            "red" | "r" => Ok(Rgb::RED),
            "green" | "g" => Ok(Rgb::GREEN),
            "blue" | "b" => Ok(Rgb::BLUE),
            "gray" | "grey" => Ok(Rgb::GRAY),
            "orange" => Ok(Rgb::ORANGE),
            "purple" => Ok(Rgb::PURPLE),
            _ => Err(WalkError::invalid(format!("unknown colour '{}'", s))),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = WalkError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// Palette stops sampled from the matplotlib colormaps of the same name.
const RDPU: [Rgb; 9] = [
    Rgb::hex(0xfff7f3),
    Rgb::hex(0xfde0dd),
    Rgb::hex(0xfcc5c0),
    Rgb::hex(0xfa9fb5),
    Rgb::hex(0xf768a1),
    Rgb::hex(0xdd3497),
    Rgb::hex(0xae017e),
    Rgb::hex(0x7a0177),
    Rgb::hex(0x49006a),
];
const VIRIDIS: [Rgb; 10] = [
    Rgb::hex(0x440154),
    Rgb::hex(0x482878),
    Rgb::hex(0x3e4a89),
    Rgb::hex(0x31688e),
    Rgb::hex(0x26828e),
    Rgb::hex(0x1f9e89),
    Rgb::hex(0x35b779),
    Rgb::hex(0x6ece58),
    Rgb::hex(0xb5de2b),
    Rgb::hex(0xfde725),
];
const PLASMA: [Rgb; 10] = [
    Rgb::hex(0x0d0887),
    Rgb::hex(0x46039f),
    Rgb::hex(0x7201a8),
    Rgb::hex(0x9c179e),
    Rgb::hex(0xbd3786),
    Rgb::hex(0xd8576b),
    Rgb::hex(0xed7953),
    Rgb::hex(0xfb9f3a),
    Rgb::hex(0xfdca26),
    Rgb::hex(0xf0f921),
];
const BLUES: [Rgb; 9] = [
    Rgb::hex(0xf7fbff),
    Rgb::hex(0xdeebf7),
    Rgb::hex(0xc6dbef),
    Rgb::hex(0x9ecae1),
    Rgb::hex(0x6baed6),
    Rgb::hex(0x4292c6),
    Rgb::hex(0x2171b5),
    Rgb::hex(0x08519c),
    Rgb::hex(0x08306b),
];
const GREYS: [Rgb; 9] = [
    Rgb::hex(0xffffff),
    Rgb::hex(0xf0f0f0),
    Rgb::hex(0xd9d9d9),
    Rgb::hex(0xbdbdbd),
    Rgb::hex(0x969696),
    Rgb::hex(0x737373),
    Rgb::hex(0x525252),
    Rgb::hex(0x252525),
    Rgb::hex(0x000000),
];

/// Named palette mapping `t` in `[0, 1]` to a colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Colormap {
    #[default]
    RdPu,
    Viridis,
    Plasma,
    Blues,
    Greys,
}

impl Colormap {
    pub const ALL: [Colormap; 5] = [
        Colormap::RdPu,
        Colormap::Viridis,
        Colormap::Plasma,
        Colormap::Blues,
        Colormap::Greys,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Colormap::RdPu => "RdPu",
            Colormap::Viridis => "viridis",
            Colormap::Plasma => "plasma",
            Colormap::Blues => "Blues",
            Colormap::Greys => "Greys",
        }
    }

    fn stops(self) -> &'static [Rgb] {
        match self {
            Colormap::RdPu => &RDPU,
            Colormap::Viridis => &VIRIDIS,
            Colormap::Plasma => &PLASMA,
            Colormap::Blues => &BLUES,
            Colormap::Greys => &GREYS,
        }
    }

    /// Piecewise-linear lookup. `t` is clamped to `[0, 1]`.
    pub fn sample(self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (stops.len() - 1) as f64;
        let i = (pos.floor() as usize).min(stops.len() - 2);
        lerp_color(stops[i], stops[i + 1], pos - i as f64)
    }

    /// Colour for point `index` out of `count`, first point at the palette start.
    pub fn for_index(self, index: usize, count: usize) -> Rgb {
        if count <= 1 {
            return self.sample(0.0);
        }
        self.sample(index as f64 / (count - 1) as f64)
    }
}

impl FromStr for Colormap {
    type Err = WalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Colormap::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| WalkError::invalid(format!("unknown colormap '{}'", s)))
    }
}

impl TryFrom<String> for Colormap {
    type Error = WalkError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[inline]
pub fn lerp_color(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let ch = |i: usize| (a.0[i] as f64 + (b.0[i] as f64 - a.0[i] as f64) * t).round() as u8;
    Rgb([ch(0), ch(1), ch(2)])
}

/// Source-over blend of `src` with opacity `alpha` onto an opaque `dst`.
#[inline]
pub fn blend(dst: [u8; 4], src: Rgb, alpha: f64) -> [u8; 4] {
    let a = alpha.clamp(0.0, 1.0);
    let ch = |i: usize| (src.0[i] as f64 * a + dst[i] as f64 * (1.0 - a)).round() as u8;
    [ch(0), ch(1), ch(2), 255]
}
