//=========================================================================
// Color
//=========================================================================
//
// RGBA color with channels stored as 0-1 floats.
//
//=========================================================================

//=== Color ===============================================================

/// RGBA color, each channel in the 0-1 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    //--- Construction -----------------------------------------------------

    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self { red, green, blue, alpha }
    }

    /// Opaque color (alpha 1).
    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    /// Builds a color from 0-255 channel values.
    pub fn from_bytes(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self::new(
            f32::from(red) / 255.0,
            f32::from(green) / 255.0,
            f32::from(blue) / 255.0,
            f32::from(alpha) / 255.0,
        )
    }

    //--- Operations -------------------------------------------------------

    /// Linear interpolation from `from` (factor 0) to `to` (factor 1).
    ///
    /// The factor is not clamped.
    pub fn interpolate(from: Color, to: Color, factor: f32) -> Self {
        let lerp = |a: f32, b: f32| (b - a) * factor + a;

        Self::new(
            lerp(from.red, to.red),
            lerp(from.green, to.green),
            lerp(from.blue, to.blue),
            lerp(from.alpha, to.alpha),
        )
    }

    /// Overwrites all four channels.
    pub fn set(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        *self = Self::new(red, green, blue, alpha);
    }

    /// Returns `(red, green, blue, alpha)`.
    pub fn parts(&self) -> (f32, f32, f32, f32) {
        (self.red, self.green, self.blue, self.alpha)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<(f32, f32, f32, f32)> for Color {
    fn from((red, green, blue, alpha): (f32, f32, f32, f32)) -> Self {
        Self::new(red, green, blue, alpha)
    }
}

//=========================================================================
// Tests
//=========================================================================
