use iced::widget::{container, image};
use iced::{ContentFit, Element, Length};

use crate::poster_cache::PosterState;
use crate::style;
use crate::theme::{self, ColorScheme};

/// A poster image, or a placeholder frame when the file isn't available.
pub fn poster<'a, Message: 'a>(
    cs: &ColorScheme,
    state: Option<&PosterState>,
    width: f32,
    height: f32,
) -> Element<'a, Message> {
    if let Some(PosterState::Loaded(path)) = state {
        return image(image::Handle::from_path(path))
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .content_fit(ContentFit::Cover)
            .into();
    }

    let icon = match state {
        Some(PosterState::Loading) => lucide_icons::iced::icon_loader(),
        _ => lucide_icons::iced::icon_film(),
    };

    container(icon.size(style::TEXT_2XL).color(cs.outline))
        .center_x(Length::Fixed(width))
        .center_y(Length::Fixed(height))
        .style(theme::cover_placeholder(cs, style::RADIUS_LG))
        .into()
}
