#![forbid(unsafe_code)]

//! Shared surface state.
//!
//! The host owns the editable surface; the engine holds a non-owning
//! handle to it. [`Surface`] is the owning side (host-created on mount,
//! dropped on unmount) and [`SurfaceHandle`] the weak side: once the
//! host drops the surface, handle upgrades fail and engine calls report
//! a released surface instead of touching freed state.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use crate::document::Document;
use crate::selection::SelectionController;

/// Document plus selection, the unit the engine operates on.
#[derive(Debug, Default)]
pub struct SurfaceState {
    /// The editable tree.
    pub document: Document,
    /// The live selection over it.
    pub selection: SelectionController,
}

/// Owning handle to a mounted editable surface.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    inner: Rc<RefCell<SurfaceState>>,
}

impl Surface {
    /// Create a surface with an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface around existing state.
    #[must_use]
    pub fn from_state(state: SurfaceState) -> Self {
        Self {
            inner: Rc::new(RefCell::new(state)),
        }
    }

    /// Get a weak, non-owning handle for the engine.
    #[must_use]
    pub fn handle(&self) -> SurfaceHandle {
        SurfaceHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Borrow the state immutably.
    ///
    /// # Panics
    /// Panics if the state is already mutably borrowed; all access is
    /// single-threaded and short-lived by design.
    #[must_use]
    pub fn read(&self) -> Ref<'_, SurfaceState> {
        self.inner.borrow()
    }

    /// Borrow the state mutably.
    ///
    /// # Panics
    /// Panics if the state is already borrowed.
    #[must_use]
    pub fn write(&self) -> RefMut<'_, SurfaceState> {
        self.inner.borrow_mut()
    }
}

/// Weak handle to a surface; upgrade fails after the host unmounts.
#[derive(Debug, Clone)]
pub struct SurfaceHandle {
    inner: Weak<RefCell<SurfaceState>>,
}

impl SurfaceHandle {
    /// Re-acquire the surface, if still mounted.
    #[must_use]
    pub fn upgrade(&self) -> Option<Surface> {
        self.inner.upgrade().map(|inner| Surface { inner })
    }
}
