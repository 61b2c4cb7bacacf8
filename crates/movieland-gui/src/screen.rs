pub mod home;
pub mod recommended;
pub mod search;
pub mod watchlist;

use movieland_core::browser::Effect;

use crate::widgets::CardEvent;

/// Actions that a screen can request from the app router.
///
/// Screens return these from `update()` instead of running fetches or
/// touching hover state themselves; the app interprets them in one place.
#[derive(Debug)]
pub enum Action {
    /// No side-effect.
    None,
    /// Run the fetches a state transition asked for.
    Run(Vec<Effect>),
    /// A card was hovered, left, or had its watchlist button pressed.
    Card(CardEvent),
}

impl From<Vec<Effect>> for Action {
    fn from(effects: Vec<Effect>) -> Self {
        if effects.is_empty() {
            Self::None
        } else {
            Self::Run(effects)
        }
    }
}
