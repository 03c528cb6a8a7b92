//! Enumeration payload.

use crate::types::{Error, Input, ItemText, MenuResult, Navigation};

/// One `(value, text)` pair of an enumeration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumEntry {
    pub value: i32,
    pub text: &'static str,
}

impl EnumEntry {
    pub const fn new(value: i32, text: &'static str) -> Self {
        Self { value, text }
    }
}

/// Cursor into a static table of entries.
///
/// The index is always `< entries.len()` for a non-empty table.
#[derive(Debug, Clone, Copy)]
pub struct Enumeration {
    entries: &'static [EnumEntry],
    index: usize,
}

impl Enumeration {
    pub fn new(entries: &'static [EnumEntry], index: usize) -> Self {
        let index = if entries.is_empty() { 0 } else { index % entries.len() };
        Self { entries, index }
    }

    #[inline]
    pub fn entries(&self) -> &'static [EnumEntry] {
        self.entries
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&'static EnumEntry> {
        self.entries.get(self.index)
    }

    pub fn value(&self) -> Option<i32> {
        self.current().map(|entry| entry.value)
    }

    /// Position of the first entry holding `value`.
    pub fn position(&self, value: i32) -> Option<usize> {
        self.entries.iter().position(|entry| entry.value == value)
    }

    pub(crate) fn select(&mut self, index: usize) -> MenuResult {
        if self.entries.is_empty() {
            return Err(Error::NullElement);
        }
        self.index = index % self.entries.len();
        Ok(())
    }

    pub(crate) fn render(&self, text: &mut ItemText) {
        if let Some(entry) = self.current() {
            text.set(entry.text);
        }
    }

    /// Right/Up select the next entry, Left/Down the previous one, both
    /// wrapping. Anything else is ignored. Never asks to finish editing.
    pub(crate) fn handle_input(&mut self, input: Input, text: &mut ItemText) -> MenuResult {
        let count = self.entries.len();
        if count == 0 {
            return Err(Error::NullElement);
        }

        match input.navigation() {
            Some(Navigation::Right | Navigation::Up) => {
                self.index = (self.index + 1) % count;
            }
            Some(Navigation::Left | Navigation::Down) => {
                self.index = if self.index == 0 { count - 1 } else { self.index - 1 };
            }
            _ => return Ok(()),
        }

        self.render(text);
        Ok(())
    }
}
