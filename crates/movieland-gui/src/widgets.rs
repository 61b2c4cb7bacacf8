pub mod empty_state;
pub mod genre_carousel;
pub mod movie_card;
pub mod poster;

pub use empty_state::empty_state;
pub use genre_carousel::genre_carousel;
pub use movie_card::{card_grid, cards_per_row, movie_card, CardContext, CardEvent, CARD_HEIGHT};
pub use poster::poster;

use iced::widget::scrollable;
use iced::Element;

use crate::theme::{self, ColorScheme};

/// A scrollable with consistent direction and style across the application.
pub fn styled_scrollable<'a, Message: 'a>(
    content: impl Into<Element<'a, Message>>,
    cs: &ColorScheme,
) -> scrollable::Scrollable<'a, Message> {
    scrollable(content)
        .direction(scrollable::Direction::Vertical(
            scrollable::Scrollbar::new()
                .width(6)
                .scroller_width(4)
                .margin(2),
        ))
        .style(theme::overlay_scrollbar(cs))
}
