//! Button payload.

use super::Click;

/// Clickable item that reacts to any input by running its click action.
#[derive(Debug, Clone, Copy)]
pub struct Button {
    pub(crate) click: Click,
}

impl Button {
    pub fn new() -> Self {
        Self {
            click: Click::from_fn(|_, ()| Ok(())),
        }
    }

    #[inline]
    pub fn click_action(&self) -> Click {
        self.click
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}
