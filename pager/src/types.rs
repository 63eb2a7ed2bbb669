//! Domain types for the creature pager: index, state, and actions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label shown in place of a creature name when a load fails
pub const NOT_FOUND_LABEL: &str = "Not Found";

/// Position of a creature card, always within `[1, 1025]`
///
/// # Example
///
/// ```
/// use dexpager::CreatureIndex;
///
/// let last = CreatureIndex::MAX;
/// assert_eq!(last.next(), last);
/// assert_eq!(CreatureIndex::MIN.previous(), CreatureIndex::MIN);
/// assert_eq!(CreatureIndex::new(0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CreatureIndex(u32);

impl CreatureIndex {
    /// First creature
    pub const MIN: Self = Self(1);

    /// Last creature
    pub const MAX: Self = Self(1025);

    /// Index shown when the application starts
    pub const INITIAL: Self = Self(25);

    /// Create an index, or `None` if `value` is out of range
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create an index, clamping `value` into range
    #[must_use]
    pub const fn clamped(value: u32) -> Self {
        if value < Self::MIN.0 {
            Self::MIN
        } else if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// The raw index
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The following index; stays at [`CreatureIndex::MAX`]
    #[must_use]
    pub const fn next(self) -> Self {
        Self::clamped(self.0.saturating_add(1))
    }

    /// The preceding index; stays at [`CreatureIndex::MIN`]
    #[must_use]
    pub const fn previous(self) -> Self {
        Self::clamped(self.0.saturating_sub(1))
    }
}

impl Default for CreatureIndex {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for CreatureIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for CreatureIndex {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!(
                "creature index {value} outside {}..={}",
                Self::MIN.0,
                Self::MAX.0
            )
        })
    }
}

impl From<CreatureIndex> for u32 {
    fn from(index: CreatureIndex) -> Self {
        index.0
    }
}

/// A creature as shown on a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    /// Display name, already capitalized
    pub name: String,
    /// Front sprite, if the creature has one
    pub image_url: Option<String>,
}

/// Why a creature load failed
///
/// The card shows [`NOT_FOUND_LABEL`] for every kind; the kind is kept for
/// logs, metrics, and presentation layers that want to differentiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchErrorKind {
    /// The API has no creature with this index (HTTP 404)
    NotFound,
    /// Any other non-success HTTP status
    Http(u16),
    /// Connection, DNS, timeout, or body read failure
    Transport,
    /// The body was not the expected creature record
    Decode,
}

impl FetchErrorKind {
    /// Stable lowercase name, used as a metrics label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Http(_) => "http",
            Self::Transport => "transport",
            Self::Decode => "decode",
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(status) => write!(f, "http {status}"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Pager state
///
/// `display_name` and `image_url` are `None` while a load is in flight, so a
/// card never shows data for an index other than `current_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerState {
    /// Index of the card being shown
    pub current_index: CreatureIndex,
    /// Capitalized name, or [`NOT_FOUND_LABEL`] after a failed load
    pub display_name: Option<String>,
    /// Sprite of the loaded creature
    pub image_url: Option<String>,
    /// Cause of the most recent failed load
    pub last_error: Option<FetchErrorKind>,
}

impl PagerState {
    /// Empty state positioned at `index`
    #[must_use]
    pub const fn at(index: CreatureIndex) -> Self {
        Self {
            current_index: index,
            display_name: None,
            image_url: None,
            last_error: None,
        }
    }

    /// Whether the current card is waiting for its data
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.display_name.is_none()
    }

    /// Whether `Decrement` would move the pager
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.current_index > CreatureIndex::MIN
    }

    /// Whether `Increment` would move the pager
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.current_index < CreatureIndex::MAX
    }

    /// Text for the skeleton card shown while loading, zero-padded to four
    /// digits (`#0025`)
    #[must_use]
    pub fn placeholder_label(&self) -> String {
        format!("#{:04}", self.current_index.get())
    }

    pub(crate) fn begin_loading(&mut self) {
        self.display_name = None;
        self.image_url = None;
        self.last_error = None;
    }

    pub(crate) fn apply(&mut self, outcome: Result<Creature, FetchErrorKind>) {
        match outcome {
            Ok(creature) => {
                self.display_name = Some(creature.name);
                self.image_url = creature.image_url;
                self.last_error = None;
            },
            Err(kind) => {
                self.display_name = Some(NOT_FOUND_LABEL.to_string());
                self.image_url = None;
                self.last_error = Some(kind);
            },
        }
    }
}

impl Default for PagerState {
    fn default() -> Self {
        Self::at(CreatureIndex::INITIAL)
    }
}

impl fmt::Display for PagerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.placeholder_label();
        match (&self.display_name, &self.image_url) {
            (None, _) => write!(f, "{label} (loading)"),
            (Some(name), Some(image)) => write!(f, "{label} {name} [{image}]"),
            (Some(name), None) => write!(f, "{label} {name}"),
        }
    }
}

/// Pager actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PagerAction {
    /// Move to the next card
    Increment,
    /// Move to the previous card
    Decrement,
    /// Move to a uniformly random card
    JumpRandom,
    /// The presentation layer appeared
    AppStarted,
    /// Load the current card (sent by the reducer itself)
    LoadRequested,
    /// A load for `index` finished
    LoadCompleted {
        /// Index captured when the load was requested
        index: CreatureIndex,
        /// Loaded creature, or why it could not be loaded
        outcome: Result<Creature, FetchErrorKind>,
    },
}
