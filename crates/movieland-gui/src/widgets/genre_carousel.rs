use iced::widget::{button, column, container, row, text, Row, Space};
use iced::{Alignment, Element, Length};

use movieland_core::browser::HomeRow;
use movieland_core::carousel::Direction;

use crate::style;
use crate::theme;
use crate::widgets::movie_card::{movie_card, CardContext, CardEvent};

const ARROW_SIZE: f32 = 32.0;

/// One home carousel: genre heading, paging arrows, and the visible window
/// of cards.
pub fn genre_carousel<'a, Message: Clone + 'a + 'static>(
    ctx: &CardContext<'a>,
    home_row: &'a HomeRow,
    on_scroll: impl Fn(Direction) -> Message,
    on_event: fn(CardEvent) -> Message,
) -> Element<'a, Message> {
    let cs = ctx.cs;

    let arrow = |icon: iced::widget::Text<'static>, direction: Direction| {
        button(
            container(icon.size(style::ICON_SIZE))
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        )
        .padding(0)
        .width(Length::Fixed(ARROW_SIZE))
        .height(Length::Fixed(ARROW_SIZE))
        .on_press_maybe(
            home_row
                .window
                .can_scroll(direction)
                .then(|| on_scroll(direction)),
        )
        .style(theme::icon_button(cs))
    };

    let header = row![
        text(home_row.genre.name.as_str())
            .size(style::TEXT_XL)
            .font(style::FONT_HEADING)
            .color(cs.on_surface)
            .line_height(style::LINE_HEIGHT_TIGHT),
        Space::new().width(Length::Fill),
        arrow(lucide_icons::iced::icon_chevron_left(), Direction::Left),
        arrow(lucide_icons::iced::icon_chevron_right(), Direction::Right),
    ]
    .spacing(style::SPACE_SM)
    .align_y(Alignment::Center);

    let body: Element<'a, Message> = if home_row.movies.is_empty() {
        text("No movies found for this genre")
            .size(style::TEXT_BASE)
            .color(cs.on_surface_variant)
            .into()
    } else {
        let visible = &home_row.movies[home_row.window.range()];
        Row::with_children(visible.iter().map(|m| movie_card(ctx, m, on_event)))
            .spacing(style::CARD_SPACING)
            .into()
    };

    column![header, body].spacing(style::SPACE_MD).into()
}
