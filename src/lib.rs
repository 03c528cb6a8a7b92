//! # static-menu
//!
//! Allocation-free menu core for character LCDs.
//!
//! Every menu is laid out at compile time: a [`Menu`] owns a fixed array of
//! [`Page`]s, each page owns at most `N` [`Item`]s, and item text lives in
//! fixed-capacity buffers. Behavior is attached through [`Callable`], a
//! copyable two-word handle that binds a free function, a method on a
//! `'static` object, or a small closure, without boxing.
//!
//! ## Architecture
//!
//! ```text
//! Input -> Menu handler -> active Page handler -> current Item handler
//!                                  |
//!                   link request <-+ (page switch: exit, then enter)
//! ```
//!
//! The core is `no_std` and never allocates. Features:
//!
//! - `tracing` - structured events on page switches, edit-mode changes and
//!   wiring problems (`tracing` needs `alloc`)
//! - `std` - links `std` and turns on `tracing`
//! - `terminal` - crossterm frontend simulating a 20x4 display on a desktop
//!   terminal
//!
//! ## Modules
//!
//! - [`types`] - Errors, inputs, item text, capabilities
//! - [`callable`] - Type-erased, allocation-free callbacks
//! - [`format`] - Number formatting collaborator for numeric items
//! - [`item`] - Button, boolean, enumeration, page link, numeric items
//! - [`page`] - Cursor and edit-mode state machine
//! - [`menu`] - Active page, page switching, link wiring
//! - `terminal` - Crossterm frontend (feature `terminal`)

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod callable;
pub mod format;
pub mod item;
pub mod menu;
pub mod page;
#[cfg(feature = "terminal")]
pub mod terminal;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use callable::{Action, Callable, Handler};
pub use format::{FormatKind, Formatter};
pub use item::{Boolean, Button, Click, EnumEntry, Enumeration, Item, ItemVariant, Numeric, PageLink};
pub use menu::{Menu, PageDirectory, PageRef};
pub use page::Page;
