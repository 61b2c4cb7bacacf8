//! Style functions parameterized by ColorScheme.
//!
//! Each function returns a closure suitable for Iced's `.style()` method,
//! capturing the needed color tokens from a `ColorScheme`.

use iced::overlay::menu;
use iced::widget::{button, container, pick_list, scrollable, text_input};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

use crate::style;

use super::ColorScheme;

/// Top bar holding the brand, the search form, and the header actions.
pub fn header_bar(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_low;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: 0.0.into(),
        },
        ..Default::default()
    }
}

/// View tab: pill indicator when active, subtle hover otherwise.
pub fn tab_button(active: bool, cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let primary_container = cs.primary_container;
    let on_primary_container = cs.on_primary_container;
    let surface_bright = cs.surface_bright;
    let on_surface = cs.on_surface;
    let on_surface_variant = cs.on_surface_variant;

    move |_theme, status| {
        let (bg, text_color) = if active {
            (Some(Background::Color(primary_container)), on_primary_container)
        } else {
            match status {
                button::Status::Hovered => (Some(Background::Color(surface_bright)), on_surface),
                _ => (None, on_surface_variant),
            }
        };
        button::Style {
            background: bg,
            text_color,
            border: Border {
                radius: style::RADIUS_FULL.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Primary action button (Search, Add to Watchlist).
pub fn primary_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let primary = cs.primary;
    let primary_hover = cs.primary_hover;
    let primary_dim = cs.primary_dim;
    let on_primary = cs.on_primary;

    move |_theme, status| {
        let bg = match status {
            button::Status::Hovered => primary_hover,
            button::Status::Pressed => primary_dim,
            _ => primary,
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color: on_primary,
            border: Border {
                radius: style::RADIUS_MD.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Destructive action button (Clear Watchlist, Remove from Watchlist).
pub fn danger_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let error = cs.error;
    let error_hover = cs.error_hover;
    let error_pressed = cs.error_pressed;
    let on_error = cs.on_error;

    move |_theme, status| {
        let bg = match status {
            button::Status::Hovered => error_hover,
            button::Status::Pressed => error_pressed,
            _ => error,
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color: on_error,
            border: Border {
                radius: style::RADIUS_MD.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Round icon button; dimmed when disabled.
pub fn icon_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_bright = cs.surface_bright;
    let surface_container_high = cs.surface_container_high;
    let on_surface = cs.on_surface;

    move |_theme, status| {
        let (bg, alpha) = match status {
            button::Status::Hovered => (surface_bright, 1.0),
            button::Status::Disabled => (surface_container_high, 0.38),
            _ => (surface_container_high, 1.0),
        };
        button::Style {
            background: Some(Background::Color(Color { a: alpha, ..bg })),
            text_color: Color {
                a: alpha,
                ..on_surface
            },
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: style::RADIUS_FULL.into(),
            },
            ..Default::default()
        }
    }
}

/// Brand wordmark: no chrome at all.
pub fn brand_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let primary = cs.primary;
    let primary_hover = cs.primary_hover;
    move |_theme, status| button::Style {
        background: None,
        text_color: match status {
            button::Status::Hovered => primary_hover,
            _ => primary,
        },
        ..Default::default()
    }
}

pub fn text_input_style(
    cs: &ColorScheme,
) -> impl Fn(&Theme, text_input::Status) -> text_input::Style {
    let primary = cs.primary;
    let outline = cs.outline;
    let outline_variant = cs.outline_variant;
    let surface_container = cs.surface_container;
    let on_surface_variant = cs.on_surface_variant;
    let on_surface = cs.on_surface;

    move |_theme, status| {
        let border_color = match status {
            text_input::Status::Focused { .. } => primary,
            text_input::Status::Hovered => outline,
            _ => outline_variant,
        };
        text_input::Style {
            background: Background::Color(surface_container),
            border: Border {
                color: border_color,
                width: 1.0,
                radius: style::RADIUS_MD.into(),
            },
            icon: on_surface_variant,
            placeholder: outline,
            value: on_surface,
            selection: Color { a: 0.4, ..primary },
        }
    }
}

/// Pick list trigger: themed surface background with outline border.
pub fn pick_list_style(cs: &ColorScheme) -> impl Fn(&Theme, pick_list::Status) -> pick_list::Style {
    let primary = cs.primary;
    let outline = cs.outline;
    let outline_variant = cs.outline_variant;
    let surface_container = cs.surface_container;
    let on_surface = cs.on_surface;
    let on_surface_variant = cs.on_surface_variant;

    move |_theme, status| {
        let (border_color, handle_color) = match status {
            pick_list::Status::Opened { .. } => (primary, primary),
            pick_list::Status::Hovered => (outline, on_surface),
            _ => (outline_variant, on_surface_variant),
        };
        pick_list::Style {
            text_color: on_surface,
            placeholder_color: on_surface_variant,
            handle_color,
            background: Background::Color(surface_container),
            border: Border {
                color: border_color,
                width: 1.0,
                radius: style::RADIUS_MD.into(),
            },
        }
    }
}

/// Pick list dropdown menu: themed background with primary selection highlight.
pub fn pick_list_menu_style(cs: &ColorScheme) -> impl Fn(&Theme) -> menu::Style {
    let surface_container = cs.surface_container;
    let outline_variant = cs.outline_variant;
    let on_surface = cs.on_surface;
    let primary = cs.primary;
    let on_primary = cs.on_primary;

    move |_theme| menu::Style {
        background: Background::Color(surface_container),
        border: Border {
            color: outline_variant,
            width: 1.0,
            radius: style::RADIUS_MD.into(),
        },
        text_color: on_surface,
        selected_text_color: on_primary,
        selected_background: Background::Color(primary),
        shadow: Shadow {
            color: Color {
                a: 0.2,
                ..Color::BLACK
            },
            offset: Vector::new(0.0, 4.0),
            blur_radius: 12.0,
        },
    }
}

/// Movie card container: card surface with a soft drop shadow.
pub fn movie_card_style(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_LG.into(),
        },
        shadow: Shadow {
            color: Color {
                a: 0.18,
                ..Color::BLACK
            },
            offset: Vector::new(0.0, 2.0),
            blur_radius: 8.0,
        },
        ..Default::default()
    }
}

/// Poster placeholder while the image is missing or still downloading.
pub fn cover_placeholder(cs: &ColorScheme, radius: f32) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_high;
    let text = cs.on_surface_variant;
    move |_theme| container::Style {
        text_color: Some(text),
        background: Some(Background::Color(bg)),
        border: Border {
            radius: radius.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

/// Detail overlay drawn over the poster while a card is hovered.
pub fn detail_overlay(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let scrim = cs.scrim;
    move |_theme| container::Style {
        text_color: Some(Color::WHITE),
        background: Some(Background::Color(scrim)),
        border: Border {
            radius: style::RADIUS_LG.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

/// Rating pill in the poster corner.
pub fn rating_badge(cs: &ColorScheme, rating: f64) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.rating_color(rating);
    let text = cs.on_rating;
    move |_theme| container::Style {
        text_color: Some(text),
        background: Some(Background::Color(bg)),
        border: Border {
            radius: style::RADIUS_FULL.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

/// Metadata badge (media type pill): tonal surface with outline border.
pub fn metadata_badge(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_high;
    let text = cs.on_surface_variant;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        text_color: Some(text),
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_FULL.into(),
        },
        ..Default::default()
    }
}

/// Fluent Design overlay scrollbar: thin transparent rail, pill scroller
/// that becomes more visible on hover/drag.
pub fn overlay_scrollbar(
    cs: &ColorScheme,
) -> impl Fn(&Theme, scrollable::Status) -> scrollable::Style {
    let on_surface = cs.on_surface;
    let primary = cs.primary;

    move |_theme, status| {
        let (scroller_color, scroller_alpha) = match status {
            scrollable::Status::Dragged { .. } => (primary, 0.7),
            scrollable::Status::Hovered {
                is_vertical_scrollbar_hovered: true,
                ..
            } => (on_surface, 0.5),
            scrollable::Status::Hovered { .. } => (on_surface, 0.25),
            _ => (on_surface, 0.15),
        };

        let rail = scrollable::Rail {
            background: None,
            border: Border::default(),
            scroller: scrollable::Scroller {
                background: Background::Color(Color {
                    a: scroller_alpha,
                    ..scroller_color
                }),
                border: Border {
                    radius: style::RADIUS_FULL.into(),
                    ..Border::default()
                },
            },
        };

        scrollable::Style {
            container: container::Style::default(),
            vertical_rail: rail,
            horizontal_rail: rail,
            gap: None,
            auto_scroll: scrollable::AutoScroll {
                background: Background::Color(Color::TRANSPARENT),
                border: Border::default(),
                shadow: Shadow::default(),
                icon: on_surface,
            },
        }
    }
}
