//! Reference constants for token parsing, factor measurement and searching
//!
//! Compile-time values shared by the normalizer, the factor registry and the
//! collection engine. Tables here are the single source for default ranges.

/// WCAG 2.x relative luminance and contrast
pub mod wcag {
    /// Linear sRGB channel weights for relative luminance
    pub const RED_WEIGHT: f64 = 0.2126;
    pub const GREEN_WEIGHT: f64 = 0.7152;
    pub const BLUE_WEIGHT: f64 = 0.0722;

    /// Flare term added to both luminances in the contrast ratio
    pub const CONTRAST_OFFSET: f64 = 0.05;

    /// Contrast ratio between pure black and pure white
    pub const MAX_CONTRAST: f64 = 21.0;
}

/// Bisection parameters for luminance targeting
pub mod luminance_search {
    /// Distance from the target luminance accepted as converged
    pub const EPSILON: f64 = 1e-7;

    /// Iteration budget before a best-effort result is returned
    pub const MAX_ITERATIONS: u32 = 20;
}

/// Token shapes
pub mod token {
    /// Largest value accepted as a packed 24-bit RGB number
    pub const MAX_PACKED_RGB: f64 = 16_777_215.0;

    /// Legacy 8-bit channel scale detected on RGB inputs
    pub const RGB_LEGACY_SCALE: f64 = 255.0;
}

/// Defaults used when an option is not supplied
pub mod defaults {
    /// Reference color for relative factors
    pub const AGAINST: &str = "cyan";

    /// Chroma at or below which a color has no perceptible hue (LCh units)
    pub const ACHROMATIC_CHROMA: f64 = 1e-4;

    /// Default filter ranges for factors not bound to colorspace limits
    pub const HUE_RANGE: (f64, f64) = (0.0, 359.0);
    pub const CONTRAST_RANGE: (f64, f64) = (0.0, super::wcag::MAX_CONTRAST);
    pub const LUMINANCE_RANGE: (f64, f64) = (0.0, 1.0);
    pub const DISTANCE_RANGE: (f64, f64) = (0.0, f64::INFINITY);
}

/// Hue families on the CIE LCh (D50) hue circle
pub mod hue {
    /// Family name and half-open `[start, end)` span in degrees.
    ///
    /// `red-purple` wraps through 0° and is listed with both spans.
    pub const FAMILIES: [(&str, f64, f64); 11] = [
        ("red-purple", 345.0, 360.0),
        ("red-purple", 0.0, 15.0),
        ("red", 15.0, 50.0),
        ("yellow-red", 50.0, 85.0),
        ("yellow", 85.0, 105.0),
        ("yellow-green", 105.0, 125.0),
        ("green", 125.0, 170.0),
        ("blue-green", 170.0, 230.0),
        ("blue", 230.0, 305.0),
        ("blue-purple", 305.0, 320.0),
        ("purple", 320.0, 345.0),
    ];

    /// Hue span `[start, end)` considered cool; everything else is warm
    pub const COOL_SPAN: (f64, f64) = (125.0, 320.0);

    /// Hue offsets for the classic harmony schemes
    pub const ANALOGOUS: [f64; 3] = [0.0, 30.0, 60.0];
    pub const TRIADIC: [f64; 3] = [0.0, 120.0, 240.0];
    pub const TETRADIC: [f64; 4] = [0.0, 90.0, 180.0, 270.0];
    pub const COMPLEMENTARY: [f64; 2] = [0.0, 180.0];
    pub const SPLIT_COMPLEMENTARY: [f64; 3] = [0.0, 150.0, 210.0];
}
