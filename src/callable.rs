//! Callable - Inline, allocation-free, type-erased handler slot
//!
//! Every node carries its reaction to input as a [`Callable`]. A callable holds
//! one of:
//! - a plain function pointer
//! - a `'static` object paired with a method taking `&O`
//! - a small `Copy` closure
//!
//! behind one call signature `call(&self, target: &mut T, arg: A) -> R`. The
//! first parameter is always the node the handler belongs to, so a handler can
//! read and mutate its own node without the node borrowing itself.
//!
//! Storage is two machine words plus one dispatch function pointer. Anything
//! that does not fit, or is not `Copy`, is rejected at build time.
//!
//! # Example
//!
//! ```ignore
//! use static_menu::Callable;
//!
//! fn double(_: &mut (), x: i32) -> i32 { x * 2 }
//!
//! let f: Callable<(), i32, i32> = Callable::from_fn(double);
//! assert_eq!(f.call(&mut (), 21), 42);
//!
//! let offset = 3;
//! let g: Callable<(), i32, i32> = Callable::from_functor(move |_, x| x + offset);
//! assert_eq!(g.call(&mut (), 1), 4);
//!
//! // Unbound callables return the default value of their return type
//! assert_eq!(Callable::<(), i32, i32>::default().call(&mut (), 7), 0);
//! ```

use core::fmt;
use core::marker::PhantomData;
use core::mem::{align_of, size_of, MaybeUninit};

use crate::types::{Input, MenuResult};

// =============================================================================
// STORAGE
// =============================================================================

/// Number of machine words available to a stored functor.
pub const CALLABLE_WORDS: usize = 2;

/// Byte capacity of the inline buffer.
pub const CALLABLE_CAPACITY: usize = CALLABLE_WORDS * size_of::<usize>();

#[derive(Clone, Copy)]
#[repr(C)]
struct Storage {
    words: [MaybeUninit<usize>; CALLABLE_WORDS],
}

impl Storage {
    const EMPTY: Self = Self {
        words: [MaybeUninit::uninit(); CALLABLE_WORDS],
    };
}

type Dispatch<T, A, R> = unsafe fn(&Storage, &mut T, A) -> R;

// =============================================================================
// CALLABLE
// =============================================================================

/// Type-erased invocable stored inline.
///
/// `Callable` is `Copy`: copying duplicates the buffer and the dispatch tag.
/// It is neither `Send` nor `Sync`; a menu has exactly one caller.
pub struct Callable<T: ?Sized, A, R> {
    storage: Storage,
    dispatch: Dispatch<T, A, R>,
    _single_caller: PhantomData<*const ()>,
}

/// Input handler bound to a node of type `T`.
pub type Handler<T> = Callable<T, Input, MenuResult>;

/// Argument-less action bound to a node of type `T` (click, enter, exit).
pub type Action<T> = Callable<T, (), MenuResult>;

impl<T: ?Sized, A, R> Callable<T, A, R> {
    /// Store a free function.
    pub fn from_fn(f: fn(&mut T, A) -> R) -> Self
    where
        T: 'static,
        A: 'static,
        R: 'static,
    {
        Self::from_functor(f)
    }

    /// Store a `'static` object together with a method to call on it.
    ///
    /// The object is only ever borrowed shared, so a method that changes it
    /// must go through interior mutability:
    ///
    /// ```ignore
    /// struct Counter { hits: Cell<u32> }
    ///
    /// impl Counter {
    ///     fn count(&self, _: &mut Item, _: ()) -> MenuResult {
    ///         self.hits.set(self.hits.get() + 1);
    ///         Ok(())
    ///     }
    /// }
    ///
    /// let counter: &'static Counter = Box::leak(Box::new(Counter { hits: Cell::new(0) }));
    /// let click = Click::from_method(counter, Counter::count);
    /// ```
    pub fn from_method<O>(object: &'static O, method: fn(&O, &mut T, A) -> R) -> Self
    where
        O: 'static,
        T: 'static,
        A: 'static,
        R: 'static,
    {
        Self::from_functor(move |target: &mut T, arg: A| method(object, target, arg))
    }

    /// Store a small closure by copy.
    ///
    /// `F` must fit in [`CALLABLE_CAPACITY`] bytes with at most word alignment.
    /// Violations fail the build.
    pub fn from_functor<F>(f: F) -> Self
    where
        F: Fn(&mut T, A) -> R + Copy + 'static,
    {
        const {
            assert!(
                size_of::<F>() <= CALLABLE_CAPACITY,
                "functor does not fit in the inline callable buffer"
            );
            assert!(
                align_of::<F>() <= align_of::<usize>(),
                "functor alignment exceeds the inline callable buffer"
            );
        }

        let mut storage = Storage::EMPTY;
        // SAFETY: the const block above guarantees `F` fits in the buffer
        // with compatible alignment, and `F: Copy` means it owns nothing that
        // needs dropping.
        unsafe {
            storage.words.as_mut_ptr().cast::<F>().write(f);
        }

        Self {
            storage,
            dispatch: call_functor::<F, T, A, R>,
            _single_caller: PhantomData,
        }
    }

    /// Replace the stored callee with a free function.
    pub fn bind_fn(&mut self, f: fn(&mut T, A) -> R)
    where
        T: 'static,
        A: 'static,
        R: 'static,
    {
        *self = Self::from_fn(f);
    }

    /// Replace the stored callee with an object and method.
    pub fn bind_method<O>(&mut self, object: &'static O, method: fn(&O, &mut T, A) -> R)
    where
        O: 'static,
        T: 'static,
        A: 'static,
        R: 'static,
    {
        *self = Self::from_method(object, method);
    }

    /// Replace the stored callee with a closure.
    pub fn bind<F>(&mut self, f: F)
    where
        F: Fn(&mut T, A) -> R + Copy + 'static,
    {
        *self = Self::from_functor(f);
    }

    /// Invoke the stored callee.
    #[inline]
    pub fn call(&self, target: &mut T, arg: A) -> R {
        // SAFETY: `dispatch` was chosen together with the contents of
        // `storage` by the constructor that built this value.
        unsafe { (self.dispatch)(&self.storage, target, arg) }
    }
}

impl<T: ?Sized, A, R: Default> Callable<T, A, R> {
    /// A callable with nothing bound. Calling it returns `R::default()`.
    pub const fn unbound() -> Self {
        Self {
            storage: Storage::EMPTY,
            dispatch: call_unbound::<T, A, R>,
            _single_caller: PhantomData,
        }
    }
}

impl<T: ?Sized, A, R: Default> Default for Callable<T, A, R> {
    fn default() -> Self {
        Self::unbound()
    }
}

impl<T: ?Sized, A, R> Clone for Callable<T, A, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized, A, R> Copy for Callable<T, A, R> {}

impl<T: ?Sized, A, R> fmt::Debug for Callable<T, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable").finish_non_exhaustive()
    }
}

// =============================================================================
// DISPATCH FUNCTIONS
// =============================================================================

unsafe fn call_functor<F, T, A, R>(storage: &Storage, target: &mut T, arg: A) -> R
where
    T: ?Sized,
    F: Fn(&mut T, A) -> R + Copy,
{
    // SAFETY: only reachable through a `Callable` whose storage was written
    // with an `F` by `from_functor`.
    let f = unsafe { &*storage.words.as_ptr().cast::<F>() };
    f(target, arg)
}

unsafe fn call_unbound<T: ?Sized, A, R: Default>(_: &Storage, _: &mut T, _: A) -> R {
    R::default()
}

// =============================================================================
// TESTS
// =============================================================================
