//! Keyboard mapping for the timed hit-window game

use crate::sim::GameStatus;

/// Player intents, from buttons or keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Bowl,
    Hit,
    PlayAgain,
    Tap,
    Withdraw,
}

/// Map a `KeyboardEvent.key` value to an action.
///
/// Space and Enter are context sensitive: they swing while the ball is in
/// flight, restart after game over, and bowl otherwise.
pub fn action_for_key(key: &str, status: GameStatus) -> Option<Action> {
    match key {
        " " | "Enter" => Some(match status {
            GameStatus::Bowling => Action::Hit,
            GameStatus::GameOver => Action::PlayAgain,
            _ => Action::Bowl,
        }),
        "b" | "B" => Some(Action::Bowl),
        "h" | "H" => Some(Action::Hit),
        "r" | "R" => Some(Action::PlayAgain),
        "t" | "T" => Some(Action::Tap),
        _ => None,
    }
}
