//! Semantic color tokens for the application.
//!
//! Mirrors MD3's tonal surface hierarchy plus the rating band colors used
//! on movie cards.

use iced::Color;

pub use movieland_core::appearance::ThemePreference;

/// Complete set of color tokens for one appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    // Surfaces (MD3 tonal hierarchy)
    pub surface_container_lowest: Color,
    pub surface: Color,
    pub surface_container_low: Color,
    pub surface_container: Color,
    pub surface_container_high: Color,
    pub surface_container_highest: Color,
    pub surface_bright: Color,

    // Text and outlines
    pub on_surface: Color,
    pub on_surface_variant: Color,
    pub outline: Color,
    pub outline_variant: Color,

    // Primary
    pub primary: Color,
    pub primary_hover: Color,
    pub primary_dim: Color,
    pub on_primary: Color,
    pub primary_container: Color,
    pub on_primary_container: Color,

    // Secondary
    pub secondary_container: Color,
    pub on_secondary_container: Color,

    // Error
    pub error: Color,
    pub error_hover: Color,
    pub error_pressed: Color,
    pub on_error: Color,

    // Rating bands
    pub rating_high: Color,
    pub rating_mid: Color,
    pub rating_low: Color,
    pub on_rating: Color,

    /// Darkening layer drawn behind the hover overlay.
    pub scrim: Color,
}

impl ColorScheme {
    pub fn dark() -> Self {
        Self {
            surface_container_lowest: Color::from_rgb8(0x0B, 0x0D, 0x12),
            surface: Color::from_rgb8(0x11, 0x13, 0x18),
            surface_container_low: Color::from_rgb8(0x19, 0x1C, 0x22),
            surface_container: Color::from_rgb8(0x1D, 0x20, 0x26),
            surface_container_high: Color::from_rgb8(0x28, 0x2A, 0x31),
            surface_container_highest: Color::from_rgb8(0x33, 0x35, 0x3C),
            surface_bright: Color::from_rgb8(0x37, 0x39, 0x3F),

            on_surface: Color::from_rgb8(0xE2, 0xE2, 0xE9),
            on_surface_variant: Color::from_rgb8(0xC4, 0xC6, 0xD0),
            outline: Color::from_rgb8(0x8E, 0x90, 0x99),
            outline_variant: Color::from_rgb8(0x44, 0x47, 0x4F),

            primary: Color::from_rgb8(0xE5, 0x09, 0x14),
            primary_hover: Color::from_rgb8(0xF4, 0x2A, 0x33),
            primary_dim: Color::from_rgb8(0xB2, 0x07, 0x10),
            on_primary: Color::WHITE,
            primary_container: Color::from_rgb8(0x5C, 0x10, 0x14),
            on_primary_container: Color::from_rgb8(0xFF, 0xDA, 0xD6),

            secondary_container: Color::from_rgb8(0x3E, 0x47, 0x59),
            on_secondary_container: Color::from_rgb8(0xDA, 0xE2, 0xF9),

            error: Color::from_rgb8(0xCF, 0x3F, 0x3F),
            error_hover: Color::from_rgb8(0xDE, 0x55, 0x55),
            error_pressed: Color::from_rgb8(0xA8, 0x30, 0x30),
            on_error: Color::WHITE,

            rating_high: Color::from_rgb8(0x2E, 0x9E, 0x5B),
            rating_mid: Color::from_rgb8(0xE0, 0xA1, 0x1B),
            rating_low: Color::from_rgb8(0xC6, 0x3B, 0x3B),
            on_rating: Color::WHITE,

            scrim: Color::from_rgba8(0x00, 0x00, 0x00, 0.82),
        }
    }

    pub fn light() -> Self {
        Self {
            surface_container_lowest: Color::WHITE,
            surface: Color::from_rgb8(0xF8, 0xF9, 0xFC),
            surface_container_low: Color::from_rgb8(0xF2, 0xF3, 0xF7),
            surface_container: Color::from_rgb8(0xEC, 0xED, 0xF1),
            surface_container_high: Color::from_rgb8(0xE6, 0xE8, 0xEB),
            surface_container_highest: Color::from_rgb8(0xE1, 0xE2, 0xE6),
            surface_bright: Color::from_rgb8(0xDD, 0xDF, 0xE4),

            on_surface: Color::from_rgb8(0x19, 0x1C, 0x20),
            on_surface_variant: Color::from_rgb8(0x44, 0x47, 0x4E),
            outline: Color::from_rgb8(0x74, 0x77, 0x7F),
            outline_variant: Color::from_rgb8(0xC4, 0xC6, 0xCF),

            primary: Color::from_rgb8(0xC1, 0x11, 0x19),
            primary_hover: Color::from_rgb8(0xD4, 0x23, 0x2B),
            primary_dim: Color::from_rgb8(0x9A, 0x0C, 0x12),
            on_primary: Color::WHITE,
            primary_container: Color::from_rgb8(0xFF, 0xDA, 0xD6),
            on_primary_container: Color::from_rgb8(0x41, 0x00, 0x03),

            secondary_container: Color::from_rgb8(0xDA, 0xE2, 0xF9),
            on_secondary_container: Color::from_rgb8(0x13, 0x1C, 0x2B),

            error: Color::from_rgb8(0xBA, 0x1A, 0x1A),
            error_hover: Color::from_rgb8(0xCC, 0x2C, 0x2C),
            error_pressed: Color::from_rgb8(0x93, 0x14, 0x14),
            on_error: Color::WHITE,

            rating_high: Color::from_rgb8(0x1E, 0x8A, 0x4A),
            rating_mid: Color::from_rgb8(0xC7, 0x86, 0x00),
            rating_low: Color::from_rgb8(0xB3, 0x26, 0x1E),
            on_rating: Color::WHITE,

            scrim: Color::from_rgba8(0x10, 0x12, 0x16, 0.78),
        }
    }

    pub fn for_preference(preference: ThemePreference) -> Self {
        if preference.is_dark() {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Badge color for a 0–10 rating: high from 8, medium from 6.
    pub fn rating_color(&self, rating: f64) -> Color {
        if rating >= 8.0 {
            self.rating_high
        } else if rating >= 6.0 {
            self.rating_mid
        } else {
            self.rating_low
        }
    }
}
