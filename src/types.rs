//! Core types for static-menu.
//!
//! These types define the foundation every node builds on: the packed
//! [`Input`] value delivered by a frontend, the flat [`Error`] taxonomy,
//! bounded display [`Text`], and the item capability flags.

use core::fmt;

// =============================================================================
// Error
// =============================================================================

/// Flat error taxonomy shared by every node.
///
/// Success is `Ok(())`. [`Error::EditFinished`] is a control signal rather than
/// a failure: an item returns it to ask its page to leave edit mode, and the
/// page absorbs it before it reaches the menu.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    #[error("edit finished")]
    EditFinished,

    #[error("invalid input")]
    InvalidInput,

    #[error("invalid value")]
    InvalidValue,

    #[error("invalid page index")]
    InvalidPageIndex,

    #[error("page not found")]
    PageNotFound,

    #[error("item is not editable")]
    NotEditable,

    // ========== malformed construction ==========
    #[error("null element")]
    NullElement,

    #[error("null page")]
    NullPage,

    #[error("null format")]
    NullFormat,

    // ========== formatting collaborator ==========
    #[error("format error")]
    FormatError,

    #[error("invalid format")]
    InvalidFormat,

    #[error("buffer too small")]
    BufferTooSmall,
}

/// Result of every fallible menu operation.
pub type MenuResult = Result<(), Error>;

// =============================================================================
// Input
// =============================================================================

/// Navigation directions plus Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Navigation {
    Up = 1,
    Down = 2,
    Left = 3,
    Right = 4,
    Enter = 5,
}

impl Navigation {
    const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::Up),
            2 => Some(Self::Down),
            3 => Some(Self::Left),
            4 => Some(Self::Right),
            5 => Some(Self::Enter),
            _ => None,
        }
    }
}

/// A single discrete user action packed into one word.
///
/// Layout:
/// - `0` is "no input"
/// - `1..=5` are the [`Navigation`] values
/// - bit 31 ([`Input::CHARACTER_TAG`]) marks a character code held in the
///   low 31 bits
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Input(u32);

impl Input {
    /// Reserved bit distinguishing character codes from navigation values.
    pub const CHARACTER_TAG: u32 = 1 << 31;

    const CODE_MASK: u32 = !Self::CHARACTER_TAG;

    pub const NONE: Self = Self(0);
    pub const UP: Self = Self::navigation_input(Navigation::Up);
    pub const DOWN: Self = Self::navigation_input(Navigation::Down);
    pub const LEFT: Self = Self::navigation_input(Navigation::Left);
    pub const RIGHT: Self = Self::navigation_input(Navigation::Right);
    pub const ENTER: Self = Self::navigation_input(Navigation::Enter);

    /// Build an input from a navigation direction.
    pub const fn navigation_input(nav: Navigation) -> Self {
        Self(nav as u32)
    }

    /// Build a character input from an 8, 16 or 32-bit code.
    ///
    /// Codes wider than 31 bits lose their top bit to the tag.
    pub fn character(code: impl Into<u32>) -> Self {
        Self((code.into() & Self::CODE_MASK) | Self::CHARACTER_TAG)
    }

    /// Raw packed representation.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Rebuild an input from its packed representation.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_character(self) -> bool {
        self.0 & Self::CHARACTER_TAG != 0
    }

    /// The navigation value, if this is not a character input.
    pub const fn navigation(self) -> Option<Navigation> {
        if self.is_character() {
            None
        } else {
            Navigation::from_raw(self.0)
        }
    }

    /// The character code, if this is a character input.
    pub const fn code(self) -> Option<u32> {
        if self.is_character() {
            Some(self.0 & Self::CODE_MASK)
        } else {
            None
        }
    }

    /// The character, if this is a character input holding a valid scalar.
    pub fn as_char(self) -> Option<char> {
        self.code().and_then(char::from_u32)
    }
}

/// Convert a character into an input.
pub fn to_input(c: char) -> Input {
    Input::from(c)
}

impl From<char> for Input {
    fn from(c: char) -> Self {
        Self::character(c as u32)
    }
}

impl From<Navigation> for Input {
    fn from(nav: Navigation) -> Self {
        Self::navigation_input(nav)
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("Input::None")
        } else if let Some(nav) = self.navigation() {
            write!(f, "Input::{nav:?}")
        } else if let Some(c) = self.as_char() {
            write!(f, "Input::Character({c:?})")
        } else {
            write!(f, "Input::Raw({:#x})", self.0)
        }
    }
}

// =============================================================================
// Text
// =============================================================================

/// Display width of one character-LCD row.
pub const TEXT_CAPACITY: usize = 20;

/// Text stored by items and page titles.
pub type ItemText = Text<TEXT_CAPACITY>;

/// Mutable display string with a fixed byte capacity.
///
/// Writes that do not fit are truncated on a character boundary. The buffer
/// is inline and never reallocates.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Text<const CAP: usize>(heapless::String<CAP>);

impl<const CAP: usize> Text<CAP> {
    pub const fn new() -> Self {
        Self(heapless::String::new())
    }

    /// Replace the contents, truncating on overflow.
    ///
    /// Returns `true` when the whole string fit.
    pub fn set(&mut self, s: &str) -> bool {
        self.0.clear();
        self.push_str(s)
    }

    /// Append as much of `s` as fits.
    ///
    /// Returns `true` when the whole string fit.
    pub fn push_str(&mut self, s: &str) -> bool {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                return false;
            }
        }
        true
    }

    /// Append one character. Returns `false` (and leaves the text as is) when
    /// it does not fit.
    pub fn push(&mut self, c: char) -> bool {
        self.0.push(c).is_ok()
    }

    pub fn pop(&mut self) -> Option<char> {
        self.0.pop()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        CAP
    }
}

impl<const CAP: usize> From<&str> for Text<CAP> {
    fn from(s: &str) -> Self {
        let mut text = Self::new();
        text.set(s);
        text
    }
}

impl<const CAP: usize> fmt::Display for Text<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const CAP: usize> fmt::Debug for Text<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const CAP: usize> PartialEq<str> for Text<CAP> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<const CAP: usize> PartialEq<&str> for Text<CAP> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

// =============================================================================
// Item tags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// What an item can do, for frontends that adapt their rendering.
    ///
    /// Combine with bitwise OR: `Capabilities::CLICKABLE | Capabilities::LINK`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Capabilities: u8 {
        const NONE = 0;
        /// Reacts to any input with a single click action.
        const CLICKABLE = 1 << 0;
        /// Holds a value that changes while the page is in edit mode.
        const EDITABLE = 1 << 1;
        /// Switches the active page of its menu.
        const LINK = 1 << 2;
    }
}

/// Declared kind of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Button,
    Boolean,
    Enum,
    PageLink,
    Numeric,
}

impl ItemKind {
    /// Capabilities implied by this kind.
    pub const fn capabilities(self) -> Capabilities {
        match self {
            Self::Button => Capabilities::CLICKABLE,
            Self::Boolean => Capabilities::CLICKABLE.union(Capabilities::EDITABLE),
            Self::Enum | Self::Numeric => Capabilities::EDITABLE,
            Self::PageLink => Capabilities::CLICKABLE.union(Capabilities::LINK),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
