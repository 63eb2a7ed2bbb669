//! Line commands understood by the terminal front end

use crate::types::PagerAction;
use std::str::FromStr;
use thiserror::Error;

/// A parsed input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Swipe to the next card
    Next,
    /// Swipe to the previous card
    Previous,
    /// Jump to a random card
    Random,
    /// Print the current card
    Show,
    /// Leave the pager
    Quit,
}

/// An input line that is not a command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown command `{0}` (try next, prev, random, show, quit)")]
pub struct UnknownCommand(pub String);

impl Command {
    /// The action this command sends to the store, if any
    #[must_use]
    pub const fn action(self) -> Option<PagerAction> {
        match self {
            Self::Next => Some(PagerAction::Increment),
            Self::Previous => Some(PagerAction::Decrement),
            Self::Random => Some(PagerAction::JumpRandom),
            Self::Show | Self::Quit => None,
        }
    }
}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        match line.trim().to_ascii_lowercase().as_str() {
            "n" | "next" => Ok(Self::Next),
            "p" | "prev" | "previous" => Ok(Self::Previous),
            "r" | "random" => Ok(Self::Random),
            "s" | "show" => Ok(Self::Show),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            _ => Err(UnknownCommand(line.trim().to_string())),
        }
    }
}
