use iced::widget::{column, container, scrollable, text};
use iced::{Element, Length, Size};

use movieland_core::browser::Browser;
use movieland_core::pagination::PageState;
use movieland_core::visibility::ScrollMetrics;

use crate::screen::Action;
use crate::style;
use crate::widgets::{self, CardContext, CardEvent};

#[derive(Debug, Clone)]
pub enum Message {
    Scrolled(ScrollMetrics),
    Card(CardEvent),
}

pub fn update(browser: &mut Browser, msg: Message) -> Action {
    match msg {
        Message::Scrolled(metrics) => browser.search_scrolled(metrics).into(),
        Message::Card(event) => Action::Card(event),
    }
}

pub fn metrics(viewport: scrollable::Viewport) -> ScrollMetrics {
    ScrollMetrics {
        offset: viewport.absolute_offset().y,
        viewport_height: viewport.bounds().height,
        content_height: viewport.content_bounds().height,
    }
}

/// Viewport and content heights of the result list for `count` cards in a
/// window of `window` size.
pub fn estimated_layout(window: Size, count: usize) -> (f32, f32) {
    let viewport = (window.height - style::HEADER_HEIGHT - style::TAB_BAR_HEIGHT).max(0.0);
    let rows = count.div_ceil(widgets::cards_per_row(window.width)) as f32;
    let grid = if rows > 0.0 {
        rows * widgets::CARD_HEIGHT + (rows - 1.0) * style::CARD_SPACING
    } else {
        0.0
    };
    (viewport, grid + 2.0 * style::CONTENT_PADDING)
}

pub fn view<'a>(ctx: &CardContext<'a>) -> Element<'a, Message> {
    let cs = ctx.cs;
    let session = ctx.browser.search();
    let results = session.results();

    if results.is_empty() {
        let label = if session.page_state() == PageState::LoadingFirst {
            "Searching movies..."
        } else {
            "No movies found. Try adjusting your search terms or genre selection."
        };
        return widgets::empty_state(
            cs,
            lucide_icons::iced::icon_search()
                .size(style::TEXT_2XL)
                .color(cs.outline)
                .into(),
            label,
            None,
        );
    }

    let mut content = column![widgets::card_grid(ctx, results, Message::Card)]
        .spacing(style::SPACE_XL)
        .padding(style::CONTENT_PADDING)
        .width(Length::Fill);

    if session.page_state() == PageState::LoadingNext {
        content = content.push(
            container(
                text("Loading more movies...")
                    .size(style::TEXT_BASE)
                    .color(cs.on_surface_variant),
            )
            .center_x(Length::Fill),
        );
    }

    widgets::styled_scrollable(content, cs)
        .height(Length::Fill)
        .on_scroll(|viewport| Message::Scrolled(metrics(viewport)))
        .into()
}
