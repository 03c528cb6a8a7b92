//! Menu - Active page, page switching, link wiring
//!
//! A menu owns a fixed array of pages and the index of the active one. Input
//! goes to the active page; page switches run the leaving page's exit action
//! (which may veto the switch) and then the arriving page's enter action.
//!
//! # Wiring
//!
//! Page links need to reach the menu that owns them, but a link is built
//! before its menu exists. Construction is therefore two-phase:
//!
//! 1. items and pages are built with links unwired
//! 2. [`Menu::new`] collects the page names into a [`PageDirectory`] and hands
//!    it to every item once; links resolve their target to an index
//!
//! A clicked link records a request on itself. After the active page handles
//! an input, the menu takes that request and switches pages. Nothing holds a
//! reference back into the menu.
//!
//! # Example
//!
//! ```ignore
//! use static_menu::{Menu, Page, Item, Input};
//!
//! let mut menu: Menu<2, 4> = Menu::new([
//!     Page::new("main", "Main", [Item::page_link("more", "More...", "setup")]),
//!     Page::new("setup", "Setup", [Item::page_link("back", "Back", "main")]),
//! ]);
//!
//! menu.handle_input(Input::ENTER).unwrap();
//! assert_eq!(menu.active_page_index(), 1);
//! ```

use crate::callable::Handler;
use crate::page::Page;
use crate::types::{Error, Input, MenuResult};

// =============================================================================
// PAGE LOOKUP
// =============================================================================

/// Resolves page names to indices during wiring.
pub trait PageDirectory {
    fn page_index(&self, name: &str) -> Option<usize>;
}

impl PageDirectory for [&str] {
    fn page_index(&self, name: &str) -> Option<usize> {
        self.iter().position(|candidate| *candidate == name)
    }
}

/// A page addressed by position or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRef<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for PageRef<'_> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl<'a> From<&'a str> for PageRef<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

// =============================================================================
// MENU
// =============================================================================

/// `P` pages of at most `N` items each.
#[derive(Debug, Clone)]
pub struct Menu<const P: usize, const N: usize> {
    pages: [Page<N>; P],
    active: usize,
    handler: Handler<Self>,
}

impl<const P: usize, const N: usize> Menu<P, N> {
    /// Take ownership of the pages and wire every link. Page 0 starts active;
    /// its enter action is not run.
    pub fn new(pages: [Page<N>; P]) -> Self {
        const {
            assert!(P > 0, "a menu needs at least one page");
        }

        let mut menu = Self {
            pages,
            active: 0,
            handler: Handler::from_fn(Self::route_input),
        };
        menu.wire();
        menu
    }

    fn wire(&mut self) {
        let names: [&'static str; P] = core::array::from_fn(|index| self.pages[index].name());
        for page in &mut self.pages {
            for item in page.items_mut() {
                item.set_menu(&names[..]);
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(pages = P, "menu wired");
    }

    pub fn with_handler(mut self, handler: Handler<Self>) -> Self {
        self.handler = handler;
        self
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    #[inline]
    pub fn active_page_index(&self) -> usize {
        self.active
    }

    /// Cursor of the active page.
    pub fn active_item_index(&self) -> usize {
        self.active_page().cursor()
    }

    pub fn active_page(&self) -> &Page<N> {
        &self.pages[self.active]
    }

    pub fn page(&self, index: usize) -> Option<&Page<N>> {
        self.pages.get(index)
    }

    #[inline]
    pub fn pages(&self) -> &[Page<N>] {
        &self.pages
    }

    #[inline]
    pub const fn len(&self) -> usize {
        P
    }

    /// Index of the first page called `name`.
    pub fn find_page(&self, name: &str) -> Option<usize> {
        self.pages.iter().position(|page| page.name() == name)
    }

    // -------------------------------------------------------------------------
    // Behavior
    // -------------------------------------------------------------------------

    /// Deliver an input to the bound handler.
    pub fn handle_input(&mut self, input: Input) -> MenuResult {
        let handler = self.handler;
        handler.call(self, input)
    }

    /// The default handler: forward to the active page, then follow any link
    /// it activated.
    ///
    /// A link click that fails to switch pages leaves its page in edit mode,
    /// like any other failed click.
    pub fn route_input(&mut self, input: Input) -> MenuResult {
        let from = self.active;
        let page = &mut self.pages[from];
        let result = page.handle_input(input);

        let Some(index) = page.take_link_request() else {
            return result;
        };
        result?;

        let switched = self.set_active_page(index);
        if switched.is_err() {
            self.pages[from].set_editing(true);
        }
        switched
    }

    /// Switch to a page by index or name.
    ///
    /// The current page's exit action runs first; an error from it aborts the
    /// switch and is returned. Otherwise the page becomes active and the result
    /// of its enter action is returned.
    pub fn set_active_page<'a>(&mut self, page: impl Into<PageRef<'a>>) -> MenuResult {
        let index = match page.into() {
            PageRef::Index(index) => index,
            PageRef::Name(name) => self.find_page(name).ok_or(Error::PageNotFound)?,
        };

        if index >= P {
            return Err(Error::InvalidPageIndex);
        }

        let from = self.active;
        if let Err(err) = self.pages[from].on_exit() {
            #[cfg(feature = "tracing")]
            tracing::debug!(from, to = index, error = %err, "page switch aborted by exit action");
            return Err(err);
        }

        self.active = index;
        #[cfg(feature = "tracing")]
        tracing::debug!(from, to = index, page = self.pages[index].name(), "active page changed");
        self.pages[index].on_enter()
    }

    /// Move the active page's cursor directly (modulo its item count).
    pub fn set_current_item(&mut self, index: usize) {
        self.pages[self.active].set_item_cursor(index);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callable::Action;
    use crate::item::Item;
    use std::cell::RefCell;

    thread_local! {
        static EVENTS: RefCell<Vec<(&'static str, &'static str)>> = RefCell::new(Vec::new());
    }

    fn setup() {
        EVENTS.with(|events| events.borrow_mut().clear());
    }

    fn events() -> Vec<(&'static str, &'static str)> {
        EVENTS.with(|events| events.borrow().clone())
    }

    fn record_enter(page: &mut Page<4>, _: ()) -> MenuResult {
        EVENTS.with(|events| events.borrow_mut().push(("enter", page.name())));
        Ok(())
    }

    fn record_exit(page: &mut Page<4>, _: ()) -> MenuResult {
        EVENTS.with(|events| events.borrow_mut().push(("exit", page.name())));
        Ok(())
    }

    fn refuse_exit(_: &mut Page<4>, _: ()) -> MenuResult {
        Err(Error::InvalidValue)
    }

    fn tracked(name: &'static str, items: [Item; 1]) -> Page<4> {
        Page::new(name, name, items)
            .with_enter_action(Action::from_fn(record_enter))
            .with_exit_action(Action::from_fn(record_exit))
    }

    fn two_pages() -> Menu<2, 4> {
        Menu::new([
            tracked("page1", [Item::page_link("to2", "Next", "page2")]),
            tracked("page2", [Item::page_link("to1", "Back", "page1")]),
        ])
    }

    #[test]
    fn test_initial_state() {
        setup();
        let menu = two_pages();
        assert_eq!(menu.active_page_index(), 0);
        assert_eq!(menu.active_item_index(), 0);
        assert_eq!(menu.len(), 2);
        assert!(events().is_empty());
    }

    #[test]
    fn test_links_are_wired_at_construction() {
        setup();
        let menu = two_pages();
        let link = menu.page(0).and_then(|page| page.item(0)).and_then(Item::as_link);
        assert_eq!(link.map(|l| l.is_wired()), Some(true));
        assert_eq!(link.and_then(|l| l.target_index()), Some(1));
    }

    #[test]
    fn test_page_link_navigation() {
        setup();
        let mut menu = two_pages();

        assert_eq!(menu.handle_input(Input::ENTER), Ok(()));
        assert_eq!(menu.active_page_index(), 1);
        assert_eq!(events(), vec![("exit", "page1"), ("enter", "page2")]);
        assert!(!menu.page(0).unwrap().is_editing());

        menu.handle_input(Input::ENTER).unwrap();
        assert_eq!(menu.active_page_index(), 0);
    }

    #[test]
    fn test_set_active_page_by_name() {
        setup();
        let mut menu = two_pages();
        assert_eq!(menu.set_active_page("page2"), Ok(()));
        assert_eq!(menu.active_page_index(), 1);
    }

    #[test]
    fn test_missing_page_name() {
        setup();
        let mut menu = two_pages();
        assert_eq!(menu.set_active_page("missing"), Err(Error::PageNotFound));
        assert_eq!(menu.active_page_index(), 0);
        assert!(events().is_empty());
    }

    #[test]
    fn test_invalid_page_index() {
        setup();
        let mut menu = two_pages();
        assert_eq!(menu.set_active_page(2), Err(Error::InvalidPageIndex));
        assert_eq!(menu.active_page_index(), 0);
    }

    #[test]
    fn test_exit_action_aborts_switch() {
        setup();
        let mut menu: Menu<2, 4> = Menu::new([
            Page::new("locked", "Locked", [Item::page_link("go", "Go", "free")])
                .with_exit_action(Action::from_fn(refuse_exit)),
            tracked("free", [Item::labelled("x")]),
        ]);

        assert_eq!(menu.set_active_page(1), Err(Error::InvalidValue));
        assert_eq!(menu.active_page_index(), 0);

        // the same veto applies to links, and the link keeps its page editing
        assert_eq!(menu.handle_input(Input::ENTER), Err(Error::InvalidValue));
        assert_eq!(menu.active_page_index(), 0);
        assert!(menu.page(0).unwrap().is_editing());
        assert!(events().is_empty());

        // Enter now acts as the stop key
        assert_eq!(menu.handle_input(Input::ENTER), Ok(()));
        assert!(!menu.page(0).unwrap().is_editing());
        assert_eq!(menu.active_page_index(), 0);
    }

    #[test]
    fn test_enter_action_error_is_returned() {
        setup();
        let mut menu: Menu<2, 4> = Menu::new([
            Page::new("a", "A", [Item::labelled("x")]),
            Page::new("b", "B", [Item::labelled("y")])
                .with_enter_action(Action::from_fn(|_, ()| Err(Error::NotEditable))),
        ]);

        assert_eq!(menu.set_active_page("b"), Err(Error::NotEditable));
        // the switch itself already happened
        assert_eq!(menu.active_page_index(), 1);
    }

    #[test]
    fn test_failed_link_switch_keeps_edit_mode() {
        setup();
        let mut menu: Menu<2, 4> = Menu::new([
            Page::new("a", "A", [Item::page_link("go", "Go", "b")]),
            Page::new("b", "B", [Item::labelled("y")])
                .with_enter_action(Action::from_fn(|_, ()| Err(Error::NotEditable))),
        ]);

        assert_eq!(menu.handle_input(Input::ENTER), Err(Error::NotEditable));
        assert_eq!(menu.active_page_index(), 1);
        assert!(menu.page(0).unwrap().is_editing());
        assert!(!menu.page(1).unwrap().is_editing());
    }

    #[test]
    fn test_first_matching_name_wins() {
        setup();
        let menu: Menu<3, 4> = Menu::new([
            Page::new("dup", "First", []),
            Page::new("dup", "Second", []),
            Page::new("other", "Other", []),
        ]);
        assert_eq!(menu.find_page("dup"), Some(0));
    }

    #[test]
    fn test_unresolved_link_reports_page_not_found() {
        setup();
        let mut menu: Menu<1, 4> = Menu::new([Page::new("only", "Only", [
            Item::page_link("lost", "Lost", "elsewhere"),
        ])]);

        assert_eq!(menu.handle_input(Input::ENTER), Err(Error::PageNotFound));
        assert_eq!(menu.active_page_index(), 0);
    }

    #[test]
    fn test_navigation_reaches_active_page() {
        setup();
        let mut menu: Menu<1, 4> = Menu::new([Page::new("p", "P", [
            Item::labelled("a"),
            Item::labelled("b"),
            Item::labelled("c"),
        ])]);

        menu.handle_input(Input::UP).unwrap();
        assert_eq!(menu.active_item_index(), 2);

        menu.set_current_item(4);
        assert_eq!(menu.active_item_index(), 1);
    }

    #[test]
    fn test_custom_menu_handler() {
        setup();
        fn jump_on_hash(menu: &mut Menu<2, 4>, input: Input) -> MenuResult {
            if input.as_char() == Some('#') {
                return menu.set_active_page(1);
            }
            menu.route_input(input)
        }

        let mut menu = two_pages().with_handler(Handler::from_fn(jump_on_hash));
        menu.handle_input(Input::from('#')).unwrap();
        assert_eq!(menu.active_page_index(), 1);
        assert_eq!(events(), vec![("exit", "page1"), ("enter", "page2")]);
    }
}
