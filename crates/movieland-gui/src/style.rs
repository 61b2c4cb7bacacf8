//! Design tokens: spacing, typography, and layout constants.
//!
//! All spacing is based on a 4px grid. Typography uses a limited scale
//! so every view draws from the same visual hierarchy.

// ── Spacing (4px base grid) ──────────────────────────────────────

pub const SPACE_XXS: f32 = 2.0;
pub const SPACE_XS: f32 = 4.0;
pub const SPACE_SM: f32 = 8.0;
pub const SPACE_MD: f32 = 12.0;
pub const SPACE_LG: f32 = 16.0;
pub const SPACE_XL: f32 = 24.0;
pub const SPACE_2XL: f32 = 32.0;

// ── Typography ───────────────────────────────────────────────────

pub const TEXT_XS: f32 = 11.0;
pub const TEXT_SM: f32 = 12.0;
pub const TEXT_BASE: f32 = 15.0;
pub const TEXT_XL: f32 = 22.0;
pub const TEXT_2XL: f32 = 28.0;

// Line heights (multipliers for `LineHeight::Relative`)
pub const LINE_HEIGHT_TIGHT: f32 = 1.2; // headings, display text
pub const LINE_HEIGHT_NORMAL: f32 = 1.45; // body text, labels
pub const LINE_HEIGHT_LOOSE: f32 = 1.6; // small/caption text

pub const FONT_HEADING: iced::Font = iced::Font {
    weight: iced::font::Weight::Semibold,
    ..iced::Font::DEFAULT
};

// ── Layout ───────────────────────────────────────────────────────

pub const HEADER_HEIGHT: f32 = 56.0;
pub const TAB_BAR_HEIGHT: f32 = 52.0;
pub const CONTENT_PADDING: f32 = SPACE_XL;
pub const POSTER_WIDTH: f32 = 180.0;
pub const POSTER_HEIGHT: f32 = 270.0;
pub const CARD_SPACING: f32 = SPACE_LG;

// ── Inputs ───────────────────────────────────────────────────────

pub const INPUT_PADDING: [f32; 2] = [SPACE_SM, SPACE_MD];
pub const SEARCH_INPUT_WIDTH: f32 = 320.0;
pub const GENRE_PICKER_WIDTH: f32 = 180.0;
pub const ICON_SIZE: f32 = 18.0;

// ── Badges ───────────────────────────────────────────────────────

pub const BADGE_PADDING: [f32; 2] = [SPACE_XXS, SPACE_SM];

// ── Border radii ─────────────────────────────────────────────────

pub const RADIUS_MD: f32 = 8.0;
pub const RADIUS_LG: f32 = 12.0;
pub const RADIUS_FULL: f32 = 9999.0;
