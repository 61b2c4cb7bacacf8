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

/// Saved movies, oldest first.
pub fn view<'a>(ctx: &CardContext<'a>) -> Element<'a, Message> {
    let cs = ctx.cs;
    let movies = ctx.browser.watchlist().movies();

    if movies.is_empty() {
        return widgets::empty_state(
            cs,
            lucide_icons::iced::icon_bookmark()
                .size(style::TEXT_2XL)
                .color(cs.outline)
                .into(),
            "Your watchlist is empty",
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
