use iced::alignment::Horizontal;
use iced::widget::text::IntoFragment;
use iced::widget::{center, column, text};
use iced::{Alignment, Element, Length};

use crate::style;
use crate::theme::ColorScheme;

/// A centered empty state with icon, title, and an optional subtitle.
///
/// Used across views for "nothing here yet" and error placeholders.
pub fn empty_state<'a, Message: 'a>(
    cs: &ColorScheme,
    icon: Element<'a, Message>,
    title: impl IntoFragment<'a>,
    subtitle: Option<&'a str>,
) -> Element<'a, Message> {
    let mut content = column![
        icon,
        text(title)
            .size(style::TEXT_XL)
            .font(style::FONT_HEADING)
            .color(cs.on_surface_variant)
            .line_height(style::LINE_HEIGHT_TIGHT)
            .align_x(Horizontal::Center),
    ]
    .spacing(style::SPACE_MD)
    .align_x(Alignment::Center);

    if let Some(subtitle) = subtitle {
        content = content.push(
            text(subtitle)
                .size(style::TEXT_SM)
                .color(cs.outline)
                .line_height(style::LINE_HEIGHT_LOOSE),
        );
    }

    center(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
