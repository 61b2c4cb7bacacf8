//! Dark and light appearances with a cinema-red accent over tonal surfaces.

mod catalog;
mod colors;

pub use catalog::*;
pub use colors::*;

use iced::Theme;

/// Whether the desktop currently asks for a dark appearance.
///
/// Only consulted when no theme has been persisted yet.
pub fn os_prefers_dark() -> bool {
    match dark_light::detect() {
        Ok(dark_light::Mode::Dark) => true,
        Ok(_) => false,
        Err(e) => {
            tracing::debug!(error = %e, "could not detect system appearance");
            false
        }
    }
}

/// Build the iced Theme from a ColorScheme.
pub fn build_theme(cs: &ColorScheme) -> Theme {
    use iced::theme::Palette;

    Theme::custom(
        "MovieLand",
        Palette {
            background: cs.surface,
            text: cs.on_surface,
            primary: cs.primary,
            success: cs.rating_high,
            warning: cs.rating_mid,
            danger: cs.error,
        },
    )
}
