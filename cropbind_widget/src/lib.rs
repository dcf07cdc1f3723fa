// Copyright 2025 the Cropbind Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=cropbind_widget --heading-base-level=0

//! Cropbind Widget: the method/event contract for imperative cropping widgets.
//!
//! This crate defines the surface through which a declarative host drives an
//! external, stateful cropping control. It contains no cropping math, no
//! rendering, and no input handling; those belong to widget implementations.
//! What lives here is the shared vocabulary:
//!
//! - [`CropWidget`]: the trait a widget implements — construction against a
//!   host surface, the imperative reconfiguration methods, and teardown.
//! - [`WidgetOptions`]: the option bag passed once at construction.
//! - [`WidgetEvent`] and its payloads: what a widget reports back as the user
//!   interacts with it.
//! - Partial geometry overrides ([`CropData`], [`CropBoxGeometry`],
//!   [`CanvasGeometry`]) built on [`kurbo`] primitives, where an absent field
//!   means "leave the widget's current value untouched".
//!
//! Widget implementations are expected to:
//! - Treat [`CropWidget::destroy`] as terminal: afterwards every method is a
//!   no-op and no further events are emitted.
//! - Reject out-of-range values through their [`CropWidget::Error`] type
//!   rather than clamping silently; the host layer propagates such rejections
//!   unmodified.
//!
//! The adapter that reconciles declarative configuration onto a live widget
//! lives in `cropbind_host`; a stateful recording implementation for tests
//! lives in `cropbind_widget_ref`.
//!
//! This crate is `no_std` compatible.

#![no_std]

pub mod event;
pub mod geometry;
pub mod options;
pub mod widget;

pub use event::{CropAction, CropPhase, CropReport, WidgetEvent, ZoomDelta};
pub use geometry::{CanvasGeometry, CropBoxGeometry, CropData};
pub use options::{DragMode, SurfaceKind, ViewMode, WidgetOptions};
pub use widget::CropWidget;
