//! Items - The smallest unit of menu state
//!
//! An [`Item`] is one row on a page: an immutable name, a bounded display
//! text, an input handler, and a per-kind payload ([`ItemVariant`]):
//!
//! - [`Button`] - runs its click action on any input
//! - [`Boolean`] - click toggles a flag and relabels the item
//! - [`Enumeration`] - steps through a fixed table of `(value, text)` pairs
//! - [`PageLink`] - click switches the owning menu to another page
//! - [`Numeric`] - steps or types a number through a [`Formatter`](crate::format::Formatter)
//!
//! The kind set is closed, so items of every kind live side by side in one
//! homogeneous sequence per page.
//!
//! # Example
//!
//! ```ignore
//! use static_menu::{Item, EnumEntry, Input};
//!
//! static UNITS: [EnumEntry; 2] = [EnumEntry::new(0, "mm"), EnumEntry::new(1, "inch")];
//!
//! let mut backlight = Item::boolean("backlight", false);
//! let mut units = Item::enumeration("units", &UNITS, 0);
//!
//! // Clickable items report EditFinished so their page leaves edit mode
//! assert!(backlight.handle_input(Input::ENTER).is_err());
//! assert_eq!(backlight.text(), "TRUE");
//!
//! units.handle_input(Input::UP).unwrap();
//! assert_eq!(units.text(), "inch");
//! ```

mod boolean;
mod button;
mod enumeration;
mod link;
mod numeric;

pub use boolean::*;
pub use button::*;
pub use enumeration::*;
pub use link::*;
pub use numeric::*;

use crate::callable::{Action, Handler};
use crate::menu::PageDirectory;
use crate::types::{Capabilities, Error, Input, ItemKind, ItemText, MenuResult};

/// Click action of a clickable item.
pub type Click = Action<Item>;

// =============================================================================
// ITEM
// =============================================================================

/// Per-kind state carried by an item.
#[derive(Debug, Clone)]
pub enum ItemVariant {
    Button(Button),
    Boolean(Boolean),
    Enum(Enumeration),
    PageLink(PageLink),
    Numeric(Numeric),
}

/// One selectable row of a page.
#[derive(Debug, Clone)]
pub struct Item {
    name: &'static str,
    text: ItemText,
    handler: Handler<Item>,
    variant: ItemVariant,
}

impl Item {
    fn new(name: &'static str, text: &str, variant: ItemVariant, handler: Handler<Item>) -> Self {
        Self {
            name,
            text: ItemText::from(text),
            handler,
            variant,
        }
    }

    /// A button whose click does nothing until one is bound with [`Item::on_click`].
    pub fn button(name: &'static str, text: &str) -> Self {
        Self::new(
            name,
            text,
            ItemVariant::Button(Button::new()),
            Handler::from_fn(click_input),
        )
    }

    /// A button named after its label.
    pub fn labelled(text: &'static str) -> Self {
        Self::button(text, text)
    }

    /// A boolean item labelled `TRUE`/`FALSE` until [`Item::with_labels`] is used.
    pub fn boolean(name: &'static str, initial: bool) -> Self {
        let state = Boolean::new(initial);
        let label = state.label();
        Self::new(
            name,
            label,
            ItemVariant::Boolean(state),
            Handler::from_fn(click_input),
        )
    }

    /// An item stepping through `entries`, starting at `index` (taken modulo
    /// the table length).
    pub fn enumeration(name: &'static str, entries: &'static [EnumEntry], index: usize) -> Self {
        let state = Enumeration::new(entries, index);
        let label = state.current().map_or("", |entry| entry.text);
        Self::new(
            name,
            label,
            ItemVariant::Enum(state),
            Handler::from_fn(enum_input),
        )
    }

    /// A link to the page named `target`. It stays inert until its menu wires
    /// it during construction.
    pub fn page_link(name: &'static str, text: &str, target: &'static str) -> Self {
        Self::new(
            name,
            text,
            ItemVariant::PageLink(PageLink::new(target)),
            Handler::from_fn(click_input),
        )
    }

    /// A numeric item whose text is rendered by the number's formatter.
    ///
    /// Fails when the initial value cannot be rendered, for instance when it
    /// does not fit one display row or no formatter is set.
    pub fn try_numeric(name: &'static str, number: Numeric) -> Result<Self, Error> {
        let text = number.render(number.value())?;
        Ok(Self::numeric_with_text(name, number, text.as_str()))
    }

    /// Like [`Item::try_numeric`], but an unrenderable initial value leaves the
    /// text empty until the first successful change.
    pub fn numeric(name: &'static str, number: Numeric) -> Self {
        match number.render(number.value()) {
            Ok(text) => Self::numeric_with_text(name, number, text.as_str()),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(item = name, error = %_err, "numeric item rendered no text");
                Self::numeric_with_text(name, number, "")
            }
        }
    }

    fn numeric_with_text(name: &'static str, number: Numeric, text: &str) -> Self {
        Self::new(
            name,
            text,
            ItemVariant::Numeric(number),
            Handler::from_fn(numeric_input),
        )
    }

    // -------------------------------------------------------------------------
    // Builders
    // -------------------------------------------------------------------------

    pub fn with_text(mut self, text: &str) -> Self {
        self.text.set(text);
        self
    }

    /// Replace the input handler.
    pub fn with_handler(mut self, handler: Handler<Item>) -> Self {
        self.handler = handler;
        self
    }

    /// Replace the click action. Ignored by items that are not clickable.
    pub fn on_click(mut self, click: Click) -> Self {
        if self.set_click(click).is_err() {
            #[cfg(feature = "tracing")]
            tracing::debug!(item = self.name, "click bound to a non-clickable item");
        }
        self
    }

    /// Relabel a boolean item. Ignored by other kinds.
    pub fn with_labels(mut self, true_text: &'static str, false_text: &'static str) -> Self {
        if let ItemVariant::Boolean(state) = &mut self.variant {
            state.true_text = true_text;
            state.false_text = false_text;
            let label = state.label();
            self.text.set(label);
        }
        self
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn kind(&self) -> ItemKind {
        match self.variant {
            ItemVariant::Button(_) => ItemKind::Button,
            ItemVariant::Boolean(_) => ItemKind::Boolean,
            ItemVariant::Enum(_) => ItemKind::Enum,
            ItemVariant::PageLink(_) => ItemKind::PageLink,
            ItemVariant::Numeric(_) => ItemKind::Numeric,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.kind().capabilities()
    }

    #[inline]
    pub fn variant(&self) -> &ItemVariant {
        &self.variant
    }

    pub fn as_boolean(&self) -> Option<&Boolean> {
        match &self.variant {
            ItemVariant::Boolean(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&Enumeration> {
        match &self.variant {
            ItemVariant::Enum(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&PageLink> {
        match &self.variant {
            ItemVariant::PageLink(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_numeric(&self) -> Option<&Numeric> {
        match &self.variant {
            ItemVariant::Numeric(state) => Some(state),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Replace the display text, truncating on overflow.
    pub fn set_text(&mut self, text: &str) {
        self.text.set(text);
    }

    pub fn set_handler(&mut self, handler: Handler<Item>) {
        self.handler = handler;
    }

    /// Replace the click action of a clickable item.
    pub fn set_click(&mut self, click: Click) -> MenuResult {
        match &mut self.variant {
            ItemVariant::Button(state) => state.click = click,
            ItemVariant::Boolean(state) => state.click = click,
            ItemVariant::PageLink(state) => state.click = click,
            _ => return Err(Error::NotEditable),
        }
        Ok(())
    }

    /// Set a boolean item and relabel it.
    pub fn set_checked(&mut self, value: bool) -> MenuResult {
        let ItemVariant::Boolean(state) = &mut self.variant else {
            return Err(Error::NotEditable);
        };
        state.value = value;
        let label = state.label();
        self.text.set(label);
        Ok(())
    }

    /// Select an enumeration entry by position (taken modulo the table length).
    pub fn set_index(&mut self, index: usize) -> MenuResult {
        let (variant, text) = self.parts_mut();
        let ItemVariant::Enum(state) = variant else {
            return Err(Error::NotEditable);
        };
        state.select(index)?;
        state.render(text);
        Ok(())
    }

    /// Select the enumeration entry holding `value`.
    pub fn set_value(&mut self, value: i32) -> MenuResult {
        let (variant, text) = self.parts_mut();
        let ItemVariant::Enum(state) = variant else {
            return Err(Error::NotEditable);
        };
        let index = state.position(value).ok_or(Error::InvalidValue)?;
        state.select(index)?;
        state.render(text);
        Ok(())
    }

    /// Set a numeric item. Values outside its range are rejected.
    pub fn set_number(&mut self, value: f64) -> MenuResult {
        let (variant, text) = self.parts_mut();
        let ItemVariant::Numeric(state) = variant else {
            return Err(Error::NotEditable);
        };
        state.set_value(value, text)
    }

    fn parts_mut(&mut self) -> (&mut ItemVariant, &mut ItemText) {
        (&mut self.variant, &mut self.text)
    }

    // -------------------------------------------------------------------------
    // Behavior
    // -------------------------------------------------------------------------

    /// Deliver an input to the bound handler.
    pub fn handle_input(&mut self, input: Input) -> MenuResult {
        let handler = self.handler;
        handler.call(self, input)
    }

    /// Run the click action of a clickable item.
    pub fn click(&mut self) -> MenuResult {
        let click = match &self.variant {
            ItemVariant::Button(state) => state.click,
            ItemVariant::Boolean(state) => state.click,
            ItemVariant::PageLink(state) => state.click,
            _ => return Err(Error::NotEditable),
        };
        click.call(self, ())
    }

    /// Wiring hook run once by the owning menu. Only page links react.
    pub fn set_menu<D: PageDirectory + ?Sized>(&mut self, directory: &D) {
        if let ItemVariant::PageLink(link) = &mut self.variant {
            link.wire(self.name, directory);
        }
    }

    /// Record that this link asks its menu to show page `index`.
    pub(crate) fn request_page(&mut self, index: usize) -> MenuResult {
        let ItemVariant::PageLink(link) = &mut self.variant else {
            return Err(Error::NotEditable);
        };
        link.pending = Some(index);
        Ok(())
    }

    /// Take a page switch requested by a link click, if any.
    pub fn take_link_request(&mut self) -> Option<usize> {
        match &mut self.variant {
            ItemVariant::PageLink(link) => link.pending.take(),
            _ => None,
        }
    }
}

// =============================================================================
// DEFAULT HANDLERS
// =============================================================================

/// Default handler of clickable items: click on any input, then ask the page
/// to leave edit mode. Click errors pass through unchanged.
pub fn click_input(item: &mut Item, _input: Input) -> MenuResult {
    item.click()?;
    Err(Error::EditFinished)
}

/// Default handler of enumeration items.
pub fn enum_input(item: &mut Item, input: Input) -> MenuResult {
    let (variant, text) = item.parts_mut();
    let ItemVariant::Enum(state) = variant else {
        return Err(Error::NotEditable);
    };
    state.handle_input(input, text)
}

/// Default handler of numeric items.
pub fn numeric_input(item: &mut Item, input: Input) -> MenuResult {
    let (variant, text) = item.parts_mut();
    let ItemVariant::Numeric(state) = variant else {
        return Err(Error::NotEditable);
    };
    state.handle_input(input, text)
}

// =============================================================================
// TESTS
// =============================================================================
