// Copyright 2025 the Cropbind Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=cropbind_host --heading-base-level=0

//! Cropbind Host: the lifecycle and synchronization engine between a
//! declarative host and an imperative cropping widget.
//!
//! ## Overview
//!
//! A declarative host re-renders from configuration; a cropping widget owns
//! live, mutable interaction state and is driven by method calls. This crate
//! keeps the two consistent without tearing the widget down on every render:
//!
//! - [`RefBroker`] owns the slot the host attaches its surface handle to and
//!   mirrors that handle into an optional [`ExternalRef`] supplied by the
//!   embedding application.
//! - [`HostController`] owns the widget's lifetime: it constructs the widget
//!   once the surface exists, reconciles every subsequent
//!   [`ConfigSnapshot`] onto the live instance, bridges widget events back
//!   to caller callbacks, and destroys the widget exactly once on unmount.
//!
//! The widget itself is opaque: everything goes through the
//! [`CropWidget`](cropbind_widget::CropWidget) contract, and this crate
//! never looks behind it.
//!
//! ## Lifecycle
//!
//! A controller moves through [`LifecyclePhase`] exactly once:
//! `Unbound` → `Constructed` → `Disposed`. Construction happens at the
//! first [`sync`](HostController::sync) (or [`render`](HostController::render))
//! after the surface handle is attached, reports the new widget through the
//! mandatory `on_initialized` callback, and never happens again for that
//! controller. Ready interception guarantees the caller's `on_ready`
//! observes a widget already synchronized to current configuration.
//!
//! ## Example
//!
//! Drive the reference widget through a mount → ready → re-render cycle:
//!
//! ```rust
//! use cropbind_host::{ConfigSnapshot, HostController};
//! use cropbind_widget_ref::{RefSurface, RefWidget};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let handle_out = Rc::new(RefCell::new(None));
//! let sink = Rc::clone(&handle_out);
//!
//! let mut snapshot = ConfigSnapshot::new(move |handle| {
//!     *sink.borrow_mut() = Some(Rc::clone(handle));
//! });
//! snapshot.aspect_ratio = Some(1.0);
//!
//! let mut controller = HostController::<RefWidget>::new(snapshot);
//! controller.attach_surface(RefSurface::default());
//! controller.sync().unwrap();
//!
//! // Construction reported the handle; the widget is live.
//! let widget = handle_out.borrow().clone().unwrap();
//! assert!(controller.is_constructed());
//!
//! // The widget finished initializing: deliver its ready event, which
//! // first synchronizes the widget to the current snapshot.
//! let ready = widget.borrow_mut().fire_ready().unwrap();
//! controller.deliver(ready).unwrap();
//! assert_eq!(widget.borrow().state().aspect_ratio, Some(1.0));
//!
//! controller.unmount();
//! assert!(widget.borrow().is_destroyed());
//! ```
//!
//! ## Errors
//!
//! The controller validates nothing beyond the zoom positivity guard:
//! widget-side rejections propagate unmodified inside [`HostError`], and a
//! failing reconciliation step aborts the rest of its pass with no
//! rollback. Declarative misconfiguration is a caller bug, not a runtime
//! condition to mask.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod controller;
pub mod refs;
pub mod snapshot;

pub use controller::{
    HostController, HostError, LifecyclePhase, apply_enable_state, apply_snapshot,
};
pub use refs::{ExternalRef, RefBroker};
pub use snapshot::{Callbacks, ConfigSnapshot, WidgetHandle};
