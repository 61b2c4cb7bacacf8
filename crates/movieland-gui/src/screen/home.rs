use iced::widget::{column, container, text};
use iced::{Element, Length};

use movieland_core::browser::Browser;
use movieland_core::carousel::Direction;

use crate::screen::Action;
use crate::style;
use crate::widgets::{self, CardContext, CardEvent};

#[derive(Debug, Clone)]
pub enum Message {
    /// Page a carousel, by row index.
    Scroll(usize, Direction),
    Card(CardEvent),
}

pub fn update(browser: &mut Browser, msg: Message) -> Action {
    match msg {
        Message::Scroll(row, direction) => {
            browser.scroll_carousel(row, direction);
            Action::None
        }
        Message::Card(event) => Action::Card(event),
    }
}

/// One carousel per configured genre, in configured order.
pub fn view<'a>(ctx: &CardContext<'a>) -> Element<'a, Message> {
    let browser = ctx.browser;

    if browser.home_loading() {
        return container(
            text("Loading genre movies...")
                .size(style::TEXT_BASE)
                .color(ctx.cs.on_surface_variant),
        )
        .padding(style::CONTENT_PADDING)
        .into();
    }

    let rows = browser
        .home_rows()
        .iter()
        .enumerate()
        .map(|(index, home_row)| {
            widgets::genre_carousel(
                ctx,
                home_row,
                move |direction| Message::Scroll(index, direction),
                Message::Card,
            )
        });

    let content = column(rows)
        .spacing(style::SPACE_2XL)
        .padding(style::CONTENT_PADDING)
        .width(Length::Fill);

    widgets::styled_scrollable(content, ctx.cs)
        .height(Length::Fill)
        .into()
}
