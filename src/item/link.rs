//! Page link payload and its wiring.

use super::{Click, Item};
use crate::menu::PageDirectory;
use crate::types::{Error, MenuResult};

/// Clickable item that switches its menu to the page named `target`.
///
/// A link starts unwired: clicking it reports [`Error::NullPage`]. The menu
/// wires every link exactly once while it is constructed, resolving `target`
/// to a page index and rebinding the click to request that page.
#[derive(Debug, Clone, Copy)]
pub struct PageLink {
    target: &'static str,
    target_index: Option<usize>,
    wired: bool,
    pub(crate) pending: Option<usize>,
    pub(crate) click: Click,
}

impl PageLink {
    pub fn new(target: &'static str) -> Self {
        Self {
            target,
            target_index: None,
            wired: false,
            pending: None,
            click: Click::from_fn(unwired),
        }
    }

    /// Name of the page this link leads to.
    #[inline]
    pub fn target(&self) -> &'static str {
        self.target
    }

    /// Index of the target page, once wired and resolved.
    #[inline]
    pub fn target_index(&self) -> Option<usize> {
        self.target_index
    }

    #[inline]
    pub fn is_wired(&self) -> bool {
        self.wired
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub(crate) fn wire<D: PageDirectory + ?Sized>(&mut self, item_name: &'static str, directory: &D) {
        self.wired = true;
        self.target_index = directory.page_index(self.target);

        match self.target_index {
            Some(index) => {
                self.click = request_click(index);
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!(item = item_name, target = self.target, "page link target not found");
                self.click = Click::from_fn(missing_target);
            }
        }
    }
}

fn request_click(index: usize) -> Click {
    Click::from_functor(move |item: &mut Item, ()| item.request_page(index))
}

fn unwired(_: &mut Item, _: ()) -> MenuResult {
    Err(Error::NullPage)
}

fn missing_target(_: &mut Item, _: ()) -> MenuResult {
    Err(Error::PageNotFound)
}
