// Copyright 2025 the Cropbind Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ref broker: shares the host surface handle inward and mirrors it outward.
//!
//! The broker owns a single internal slot holding the current surface handle
//! (or absence thereof). The host render output attaches the real handle to
//! that slot; the controller reads it back when deciding whether it can
//! construct the widget. An embedding application that wants to observe the
//! handle independently supplies an [`ExternalRef`], which the broker keeps
//! up to date whenever the slot or the external reference itself changes.
//!
//! Mirroring is strictly one-directional. The external reference is never
//! consulted when the adapter needs the handle; writing into an
//! [`ExternalRef::Cell`] from the outside has no effect on the broker.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

/// An externally supplied observer of the surface handle.
///
/// The two live shapes correspond to the host-framework conventions for
/// refs: a callback invoked with the current value, or a shared mutable cell
/// the value is copied into.
pub enum ExternalRef<T> {
    /// No external observer; propagation is a no-op.
    None,
    /// Invoked with the current slot value on every change.
    Callback(Box<dyn FnMut(Option<&T>)>),
    /// Receives a copy of the current slot value on every change.
    Cell(Rc<RefCell<Option<T>>>),
}

impl<T> Default for ExternalRef<T> {
    fn default() -> Self {
        Self::None
    }
}

impl<T> fmt::Debug for ExternalRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Callback(_) => "Callback",
            Self::Cell(_) => "Cell",
        };
        write!(f, "ExternalRef::{name}")
    }
}

/// Owns the internal surface slot and propagates its value outward.
pub struct RefBroker<T> {
    slot: Rc<RefCell<Option<T>>>,
    external: ExternalRef<T>,
}

impl<T: Clone> RefBroker<T> {
    /// Allocates the internal slot (initialized to absent) and performs the
    /// initial outward propagation.
    pub fn new(external: ExternalRef<T>) -> Self {
        let mut broker = Self {
            slot: Rc::new(RefCell::new(None)),
            external,
        };
        broker.propagate();
        broker
    }

    /// Returns the shared slot the host render output must attach the
    /// surface handle to.
    ///
    /// Writes made directly through this handle are picked up the next time
    /// the adapter synchronizes; [`set`](Self::set) and
    /// [`clear`](Self::clear) additionally propagate to the external
    /// reference immediately.
    #[must_use]
    pub fn slot(&self) -> Rc<RefCell<Option<T>>> {
        Rc::clone(&self.slot)
    }

    /// Returns a copy of the current slot value.
    #[must_use]
    pub fn value(&self) -> Option<T> {
        self.slot.borrow().clone()
    }

    /// Stores a surface handle in the slot and propagates it outward.
    pub fn set(&mut self, value: T) {
        *self.slot.borrow_mut() = Some(value);
        self.propagate();
    }

    /// Empties the slot and propagates the absence outward.
    pub fn clear(&mut self) {
        *self.slot.borrow_mut() = None;
        self.propagate();
    }

    /// Replaces the external reference and propagates the current value to
    /// the new observer.
    pub fn set_external(&mut self, external: ExternalRef<T>) {
        self.external = external;
        self.propagate();
    }

    fn propagate(&mut self) {
        // Copy out first so a callback observing the value cannot hit a live
        // borrow of the slot.
        let current = self.slot.borrow().clone();
        match &mut self.external {
            ExternalRef::None => {}
            ExternalRef::Callback(callback) => callback(current.as_ref()),
            ExternalRef::Cell(cell) => *cell.borrow_mut() = current,
        }
    }
}

impl<T> fmt::Debug for RefBroker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefBroker")
            .field("occupied", &self.slot.borrow().is_some())
            .field("external", &self.external)
            .finish()
    }
}
