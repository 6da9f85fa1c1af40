/// 24-bit RGB colours used as layer materials
use serde::Deserialize;

/// A packed `0xRRGGBB` colour.
///
/// Deserializes from a plain integer, so TOML hex literals such as
/// `color = 0x606060` work directly. Values above `0xffffff` are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u32")]
pub struct Rgb(u32);

impl TryFrom<u32> for Rgb {
    type Error = String;

    fn try_from(hex: u32) -> Result<Self, Self::Error> {
        if hex > 0x00ff_ffff {
            return Err(format!("colour {hex:#x} does not fit in 24-bit RGB"));
        }
        Ok(Self(hex))
    }
}

impl Rgb {
    pub const fn new(hex: u32) -> Self {
        Self(hex & 0x00ff_ffff)
    }

    pub fn hex(self) -> u32 {
        self.0
    }

    pub fn r(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    pub fn g(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub fn b(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Scale each channel by `factor`, saturating at full intensity.
    pub fn shade(self, factor: f32) -> (u8, u8, u8) {
        let factor = factor.max(0.0);
        let scale = |c: u8| (c as f32 * factor).round().min(255.0) as u8;
        (scale(self.r()), scale(self.g()), scale(self.b()))
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.hex())
    }
}
