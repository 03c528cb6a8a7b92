//! Boolean payload.

use super::{Click, Item};
use crate::types::{Error, MenuResult};

/// Default label of a set boolean item.
pub const TRUE_TEXT: &str = "TRUE";
/// Default label of a cleared boolean item.
pub const FALSE_TEXT: &str = "FALSE";

/// Clickable flag whose text follows its value.
#[derive(Debug, Clone, Copy)]
pub struct Boolean {
    pub(crate) value: bool,
    pub(crate) true_text: &'static str,
    pub(crate) false_text: &'static str,
    pub(crate) click: Click,
}

impl Boolean {
    pub fn new(value: bool) -> Self {
        Self {
            value,
            true_text: TRUE_TEXT,
            false_text: FALSE_TEXT,
            click: Click::from_fn(toggle),
        }
    }

    #[inline]
    pub fn value(&self) -> bool {
        self.value
    }

    /// Text matching the current value.
    pub fn label(&self) -> &'static str {
        if self.value {
            self.true_text
        } else {
            self.false_text
        }
    }

    pub fn true_text(&self) -> &'static str {
        self.true_text
    }

    pub fn false_text(&self) -> &'static str {
        self.false_text
    }
}

/// Default click of a boolean item: flip the value and relabel.
pub fn toggle(item: &mut Item, _: ()) -> MenuResult {
    let value = item.as_boolean().ok_or(Error::NotEditable)?.value;
    item.set_checked(!value)
}
