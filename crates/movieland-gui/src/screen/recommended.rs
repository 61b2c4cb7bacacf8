use iced::widget::container;
use iced::{Element, Length};

use crate::screen::Action;
use crate::style;
use crate::widgets::{self, CardContext, CardEvent};

#[derive(Debug, Clone)]
pub enum Message {
    Card(CardEvent),
}

pub fn update(msg: Message) -> Action {
    match msg {
        Message::Card(event) => Action::Card(event),
    }
}

/// Recommendations for the most recently changed watchlist entry.
pub fn view<'a>(ctx: &CardContext<'a>) -> Element<'a, Message> {
    let cs = ctx.cs;
    let movies = ctx.browser.recommendations();

    if movies.is_empty() {
        return widgets::empty_state(
            cs,
            lucide_icons::iced::icon_sparkles()
                .size(style::TEXT_2XL)
                .color(cs.outline)
                .into(),
            "Add movies to your watchlist to get recommendations",
            None,
        );
    }

    let grid = container(widgets::card_grid(ctx, movies, Message::Card))
        .padding(style::CONTENT_PADDING)
        .width(Length::Fill);

    widgets::styled_scrollable(grid, cs)
        .height(Length::Fill)
        .into()
}
