use iced::alignment::Horizontal;
use iced::widget::text::Wrapping;
use iced::widget::{button, column, container, mouse_area, row, stack, text, Column, Row, Space};
use iced::{Alignment, Element, Length};

use movieland_core::browser::Browser;
use movieland_core::details::{DetailLabels, DetailState};
use movieland_core::models::{Movie, MovieId};

use crate::poster_cache::PosterCache;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets;

/// Card width: the poster spans the full card.
pub const CARD_WIDTH: f32 = style::POSTER_WIDTH;

/// Rendered card height: poster plus title, metadata, genre and button.
/// Close enough for layout estimates; the real height follows the font.
pub const CARD_HEIGHT: f32 = style::POSTER_HEIGHT + 135.0;

/// Pointer and button events raised by a movie card.
#[derive(Debug, Clone)]
pub enum CardEvent {
    Entered(MovieId),
    Exited(MovieId),
    ToggleWatchlist(Movie),
}

/// Everything a card reads besides the movie itself.
#[derive(Clone, Copy)]
pub struct CardContext<'a> {
    pub cs: &'a ColorScheme,
    pub browser: &'a Browser,
    pub posters: &'a PosterCache,
    pub hovered: Option<&'a MovieId>,
}

/// A movie card: poster with rating badge, title, year, type, genre, and
/// the watchlist toggle. While hovered the poster is covered by the
/// detail overlay.
pub fn movie_card<'a, Message: Clone + 'a>(
    ctx: &CardContext<'a>,
    movie: &'a Movie,
    on_event: fn(CardEvent) -> Message,
) -> Element<'a, Message> {
    let cs = ctx.cs;

    let badge = container(
        text(movie.rating_label())
            .size(style::TEXT_XS)
            .font(style::FONT_HEADING),
    )
    .padding(style::BADGE_PADDING)
    .style(theme::rating_badge(cs, movie.rating));

    let mut cover = stack![
        widgets::poster(
            cs,
            ctx.posters.get(&movie.id),
            style::POSTER_WIDTH,
            style::POSTER_HEIGHT,
        ),
        container(badge)
            .width(Length::Fill)
            .align_x(Horizontal::Right)
            .padding(style::SPACE_SM),
    ]
    .width(Length::Fixed(style::POSTER_WIDTH))
    .height(Length::Fixed(style::POSTER_HEIGHT));

    if ctx.hovered == Some(&movie.id) {
        cover = cover.push(detail_overlay(cs, movie, ctx.browser.detail(&movie.id)));
    }

    // Title (clipped to 2 lines via container height)
    let title_el = container(
        text(movie.title.as_str())
            .size(style::TEXT_BASE)
            .font(style::FONT_HEADING)
            .color(cs.on_surface)
            .line_height(style::LINE_HEIGHT_NORMAL)
            .wrapping(Wrapping::WordOrGlyph),
    )
    .height(Length::Fixed(
        style::TEXT_BASE * style::LINE_HEIGHT_NORMAL * 2.0 + 2.0,
    ))
    .clip(true);

    let meta = row![
        text(movie.year.as_str())
            .size(style::TEXT_SM)
            .color(cs.on_surface_variant),
        Space::new().width(Length::Fill),
        container(text(movie.media_type.as_str()).size(style::TEXT_XS))
            .padding(style::BADGE_PADDING)
            .style(theme::metadata_badge(cs)),
    ]
    .align_y(Alignment::Center);

    let mut info = column![title_el, meta].spacing(style::SPACE_XS);

    if movie.has_genre() {
        info = info.push(
            text(movie.genre.as_str())
                .size(style::TEXT_XS)
                .color(cs.outline)
                .line_height(style::LINE_HEIGHT_LOOSE),
        );
    }

    let toggle = if ctx.browser.in_watchlist(&movie.id) {
        button(text("Remove from Watchlist").size(style::TEXT_SM))
            .style(theme::danger_button(cs))
    } else {
        button(text("Add to Watchlist").size(style::TEXT_SM)).style(theme::primary_button(cs))
    };
    info = info.push(
        toggle
            .width(Length::Fill)
            .padding([style::SPACE_XS, style::SPACE_SM])
            .on_press(on_event(CardEvent::ToggleWatchlist(movie.clone()))),
    );

    let card = container(column![cover, info.padding(style::SPACE_SM)])
        .width(Length::Fixed(CARD_WIDTH))
        .style(theme::movie_card_style(cs))
        .clip(true);

    mouse_area(card)
        .on_enter(on_event(CardEvent::Entered(movie.id.clone())))
        .on_exit(on_event(CardEvent::Exited(movie.id.clone())))
        .into()
}

/// Cards that fit side by side in a content area `width` wide.
pub fn cards_per_row(width: f32) -> usize {
    let usable = width - 2.0 * style::CONTENT_PADDING + style::CARD_SPACING;
    let per_card = CARD_WIDTH + style::CARD_SPACING;
    ((usable / per_card).floor() as usize).max(1)
}

/// Cards laid out left to right, wrapping onto new lines.
pub fn card_grid<'a, Message: Clone + 'a>(
    ctx: &CardContext<'a>,
    movies: &'a [Movie],
    on_event: fn(CardEvent) -> Message,
) -> Element<'a, Message> {
    Row::with_children(movies.iter().map(|m| movie_card(ctx, m, on_event)))
        .spacing(style::CARD_SPACING)
        .wrap()
        .into()
}

fn detail_overlay<'a, Message: 'a>(
    cs: &ColorScheme,
    movie: &'a Movie,
    state: Option<&DetailState>,
) -> Element<'a, Message> {
    let labels = DetailLabels::from_state(state);

    let mut lines = Column::new()
        .spacing(style::SPACE_XS)
        .push(detail_line("Year", movie.year.clone()))
        .push(detail_line("Duration", labels.duration))
        .push(detail_line("Rating", labels.certification))
        .push(detail_line("Language", labels.language))
        .push(detail_line("Genre", movie.genre.clone()));

    if let Some(cast) = labels.cast {
        lines = lines.push(detail_line("Starring", cast));
    }

    container(lines)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(style::SPACE_MD)
        .style(theme::detail_overlay(cs))
        .into()
}

fn detail_line<'a, Message: 'a>(label: &'static str, value: String) -> Element<'a, Message> {
    column![
        text(label)
            .size(style::TEXT_XS)
            .font(style::FONT_HEADING)
            .line_height(style::LINE_HEIGHT_TIGHT),
        text(value)
            .size(style::TEXT_SM)
            .line_height(style::LINE_HEIGHT_NORMAL)
            .wrapping(Wrapping::WordOrGlyph),
    ]
    .into()
}
