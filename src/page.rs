//! Page - Item cursor and edit-mode state machine
//!
//! A page owns a fixed sequence of items, a cursor selecting one of them, and
//! an edit-mode flag:
//!
//! - **Navigation** (initial): directions move the cursor, wrapping at both
//!   ends; character inputs and Enter leave it alone
//! - **Editing**: every input is delivered to the item under the cursor
//!
//! The start and stop keys (both Enter by default, making Enter a toggle) are
//! checked first, and the *same* input then falls through to whichever mode
//! the page is now in. Pressing Enter on a boolean therefore opens edit mode
//! and toggles it in one call, and the boolean's `EditFinished` closes edit
//! mode again.
//!
//! # Example
//!
//! ```ignore
//! use static_menu::{Page, Item, Input};
//!
//! let mut page: Page<4> = Page::new("main", "Main", [
//!     Item::boolean("light", false),
//!     Item::labelled("Reset"),
//! ]);
//!
//! page.handle_input(Input::UP).unwrap();       // wraps to the last item
//! assert_eq!(page.cursor(), 1);
//! ```

use crate::callable::{Action, Handler};
use crate::item::Item;
use crate::types::{Error, Input, ItemText, MenuResult, Navigation};

// =============================================================================
// PAGE
// =============================================================================

/// Fixed list of at most `N` items with a cursor and edit mode.
#[derive(Debug, Clone)]
pub struct Page<const N: usize> {
    name: &'static str,
    title: ItemText,
    items: heapless::Vec<Item, N>,
    cursor: usize,
    edit_mode: bool,
    start_edit: Input,
    stop_edit: Input,
    on_enter: Action<Self>,
    on_exit: Action<Self>,
    handler: Handler<Self>,
}

fn no_action<const N: usize>(_: &mut Page<N>, _: ()) -> MenuResult {
    Ok(())
}

impl<const N: usize> Page<N> {
    /// Build a page from its items. More than `N` items fails the build.
    pub fn new<const M: usize>(name: &'static str, title: &str, items: [Item; M]) -> Self {
        const {
            assert!(M <= N, "page holds more items than its capacity");
        }

        let mut stored = heapless::Vec::new();
        // capacity checked above
        stored.extend(items);

        Self {
            name,
            title: ItemText::from(title),
            items: stored,
            cursor: 0,
            edit_mode: false,
            start_edit: Input::ENTER,
            stop_edit: Input::ENTER,
            on_enter: Action::from_fn(no_action::<N>),
            on_exit: Action::from_fn(no_action::<N>),
            handler: Handler::from_fn(Self::default_input),
        }
    }

    // -------------------------------------------------------------------------
    // Builders
    // -------------------------------------------------------------------------

    /// Keys opening and closing edit mode.
    pub fn with_edit_keys(mut self, start: Input, stop: Input) -> Self {
        self.start_edit = start;
        self.stop_edit = stop;
        self
    }

    /// Action run by the menu after switching to this page.
    pub fn with_enter_action(mut self, action: Action<Self>) -> Self {
        self.on_enter = action;
        self
    }

    /// Action run by the menu before switching away. An error aborts the switch.
    pub fn with_exit_action(mut self, action: Action<Self>) -> Self {
        self.on_exit = action;
        self
    }

    pub fn with_handler(mut self, handler: Handler<Self>) -> Self {
        self.handler = handler;
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
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Mutable access to the items. The slice keeps the item count fixed.
    pub fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }

    /// Item under the cursor, `None` only for a page without items.
    pub fn current_item(&self) -> Option<&Item> {
        self.items.get(self.cursor)
    }

    pub fn current_item_mut(&mut self) -> Option<&mut Item> {
        self.items.get_mut(self.cursor)
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn is_editing(&self) -> bool {
        self.edit_mode
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn start_edit(&self) -> Input {
        self.start_edit
    }

    pub fn stop_edit(&self) -> Input {
        self.stop_edit
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    pub fn set_title(&mut self, title: &str) {
        self.title.set(title);
    }

    pub fn set_handler(&mut self, handler: Handler<Self>) {
        self.handler = handler;
    }

    /// Move the cursor directly, taking `index` modulo the item count.
    pub fn set_item_cursor(&mut self, index: usize) {
        self.cursor = if self.items.is_empty() {
            0
        } else {
            index % self.items.len()
        };
    }

    /// Force the edit-mode flag, for handlers that replace the default.
    pub fn set_editing(&mut self, editing: bool) {
        self.edit_mode = editing;
    }

    // -------------------------------------------------------------------------
    // Behavior
    // -------------------------------------------------------------------------

    /// Deliver an input to the bound handler.
    pub fn handle_input(&mut self, input: Input) -> MenuResult {
        let handler = self.handler;
        handler.call(self, input)
    }

    /// Run the enter action.
    pub fn on_enter(&mut self) -> MenuResult {
        let action = self.on_enter;
        action.call(self, ())
    }

    /// Run the exit action.
    pub fn on_exit(&mut self) -> MenuResult {
        let action = self.on_exit;
        action.call(self, ())
    }

    /// The standard page state machine, bound as the default handler.
    pub fn default_input(&mut self, input: Input) -> MenuResult {
        if !self.edit_mode && input == self.start_edit {
            self.edit_mode = true;
            #[cfg(feature = "tracing")]
            tracing::trace!(page = self.name, item = self.cursor, "edit mode entered");
        } else if self.edit_mode && input == self.stop_edit {
            self.edit_mode = false;
            #[cfg(feature = "tracing")]
            tracing::trace!(page = self.name, item = self.cursor, "edit mode left");
        }

        if self.edit_mode {
            let Some(item) = self.items.get_mut(self.cursor) else {
                self.edit_mode = false;
                return Err(Error::NullElement);
            };
            return match item.handle_input(input) {
                Err(Error::EditFinished) => {
                    self.edit_mode = false;
                    #[cfg(feature = "tracing")]
                    tracing::trace!(page = self.name, item = self.cursor, "edit finished by item");
                    Ok(())
                }
                other => other,
            };
        }

        if !input.is_character() {
            self.move_cursor(input);
        }
        Ok(())
    }

    fn move_cursor(&mut self, input: Input) {
        let count = self.items.len();
        if count == 0 {
            return;
        }

        match input.navigation() {
            Some(Navigation::Down | Navigation::Right) => {
                self.cursor = (self.cursor + 1) % count;
            }
            Some(Navigation::Up | Navigation::Left) => {
                self.cursor = if self.cursor == 0 { count - 1 } else { self.cursor - 1 };
            }
            _ => {}
        }
    }

    /// Take a page switch requested by one of this page's links.
    pub fn take_link_request(&mut self) -> Option<usize> {
        self.items.iter_mut().find_map(Item::take_link_request)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{EnumEntry, Enumeration};
    use proptest::prelude::*;

    static THREE: [EnumEntry; 3] = [
        EnumEntry::new(1, "one"),
        EnumEntry::new(2, "two"),
        EnumEntry::new(3, "three"),
    ];

    fn buttons<const N: usize>(count: usize) -> Page<N> {
        const LABELS: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let mut page = Page::new("p", "P", []);
        for label in LABELS.iter().take(count) {
            let _ = page.items.push(Item::labelled(*label));
        }
        page
    }

    #[test]
    fn test_initial_state() {
        let page: Page<4> = buttons(3);
        assert_eq!(page.cursor(), 0);
        assert!(!page.is_editing());
        assert_eq!(page.len(), 3);
    }

    #[test]
    fn test_up_wraps_to_last() {
        let mut page: Page<8> = buttons(5);
        page.handle_input(Input::UP).unwrap();
        assert_eq!(page.cursor(), 4);
        page.handle_input(Input::LEFT).unwrap();
        assert_eq!(page.cursor(), 3);
    }

    #[test]
    fn test_n_downs_return_to_start() {
        let mut page: Page<8> = buttons(5);
        for _ in 0..5 {
            page.handle_input(Input::DOWN).unwrap();
        }
        assert_eq!(page.cursor(), 0);
        page.handle_input(Input::RIGHT).unwrap();
        assert_eq!(page.cursor(), 1);
    }

    #[test]
    fn test_characters_do_not_move_cursor() {
        let mut page: Page<4> = buttons(3);
        page.handle_input(Input::from('j')).unwrap();
        page.handle_input(Input::NONE).unwrap();
        assert_eq!(page.cursor(), 0);
        assert!(!page.is_editing());
    }

    #[test]
    fn test_enum_edit_round_trip() {
        let mut page: Page<4> = Page::new("p", "P", [
            Item::enumeration("e", &THREE, 0),
            Item::labelled("other"),
        ]);

        page.handle_input(Input::ENTER).unwrap();
        assert!(page.is_editing());

        for _ in 0..3 {
            page.handle_input(Input::UP).unwrap();
        }
        assert_eq!(page.cursor(), 0);

        page.handle_input(Input::ENTER).unwrap();
        assert!(!page.is_editing());

        let item = page.current_item().unwrap();
        assert_eq!(item.as_enum().map(Enumeration::index), Some(0));
        assert_eq!(item.text(), THREE[0].text);
    }

    #[test]
    fn test_enter_toggles_boolean_in_one_call() {
        let mut page: Page<2> = Page::new("p", "P", [Item::boolean("b", false)]);

        assert_eq!(page.handle_input(Input::ENTER), Ok(()));
        // opened edit mode, delivered Enter, absorbed EditFinished
        assert!(!page.is_editing());
        assert_eq!(page.current_item().map(Item::text), Some("TRUE"));

        page.handle_input(Input::ENTER).unwrap();
        assert_eq!(page.current_item().map(Item::text), Some("FALSE"));
    }

    #[test]
    fn test_stop_key_falls_through_to_navigation() {
        // With Left as the stop key, leaving edit mode also moves the cursor.
        let mut page: Page<4> = Page::new("p", "P", [
            Item::enumeration("e", &THREE, 0),
            Item::labelled("x"),
            Item::labelled("y"),
        ])
        .with_edit_keys(Input::ENTER, Input::LEFT);

        page.handle_input(Input::ENTER).unwrap();
        assert!(page.is_editing());
        page.handle_input(Input::LEFT).unwrap();
        assert!(!page.is_editing());
        assert_eq!(page.cursor(), 2);
        // the enum never saw Left
        assert_eq!(page.item(0).map(Item::text), Some("one"));
    }

    #[test]
    fn test_start_key_is_delivered_to_item() {
        // Up both opens edit mode and steps the enum.
        let mut page: Page<2> = Page::new("p", "P", [Item::enumeration("e", &THREE, 0)])
            .with_edit_keys(Input::UP, Input::ENTER);

        page.handle_input(Input::UP).unwrap();
        assert!(page.is_editing());
        assert_eq!(page.current_item().map(Item::text), Some("two"));
    }

    #[test]
    fn test_item_errors_propagate() {
        let mut page: Page<2> = Page::new("p", "P", [
            Item::labelled("bad").on_click(Action::from_fn(|_, ()| Err(Error::InvalidValue))),
        ]);

        assert_eq!(page.handle_input(Input::ENTER), Err(Error::InvalidValue));
        // not EditFinished, so edit mode stays open
        assert!(page.is_editing());
    }

    #[test]
    fn test_empty_page() {
        let mut page: Page<2> = Page::new("info", "Info", []);
        assert_eq!(page.handle_input(Input::DOWN), Ok(()));
        assert_eq!(page.cursor(), 0);
        assert_eq!(page.handle_input(Input::ENTER), Err(Error::NullElement));
        assert!(!page.is_editing());
    }

    #[test]
    fn test_set_item_cursor_wraps() {
        let mut page: Page<8> = buttons(3);
        page.set_item_cursor(7);
        assert_eq!(page.cursor(), 1);
    }

    #[test]
    fn test_default_actions_succeed() {
        let mut page: Page<2> = buttons(1);
        assert_eq!(page.on_enter(), Ok(()));
        assert_eq!(page.on_exit(), Ok(()));
    }

    #[test]
    fn test_custom_handler_wraps_default() {
        fn ignore_characters(page: &mut Page<4>, input: Input) -> MenuResult {
            if input.is_character() {
                return Err(Error::InvalidInput);
            }
            page.default_input(input)
        }

        let mut page: Page<4> = buttons::<4>(2).with_handler(Handler::from_fn(ignore_characters));
        assert_eq!(page.handle_input(Input::from('a')), Err(Error::InvalidInput));
        page.handle_input(Input::DOWN).unwrap();
        assert_eq!(page.cursor(), 1);
    }

    fn any_input() -> impl Strategy<Value = Input> {
        prop_oneof![
            Just(Input::NONE),
            Just(Input::UP),
            Just(Input::DOWN),
            Just(Input::LEFT),
            Just(Input::RIGHT),
            Just(Input::ENTER),
            any::<char>().prop_map(Input::from),
        ]
    }

    proptest! {
        #[test]
        fn test_cursor_stays_in_range(
            count in 1usize..=8,
            inputs in proptest::collection::vec(any_input(), 0..64),
        ) {
            let mut page: Page<8> = buttons(count);
            for input in inputs {
                let _ = page.handle_input(input);
                prop_assert!(page.cursor() < count);
            }
        }
    }
}
