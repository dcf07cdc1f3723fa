// Copyright 2025 the Cropbind Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The declarative configuration snapshot.
//!
//! A [`ConfigSnapshot`] is the full input set for one host render pass. It
//! is immutable once handed to the controller and superseded wholesale by
//! the next pass's snapshot; there is no identity beyond current vs
//! previous. Imperative fields are `Option`s where absence means "leave the
//! widget's current state untouched" — never "reset to a default".

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use cropbind_widget::{
    CanvasGeometry, CropBoxGeometry, CropData, CropPhase, CropReport, DragMode, SurfaceKind,
    WidgetOptions, ZoomDelta,
};

/// Shared handle to the live widget instance.
///
/// The controller owns the widget's lifecycle; callers receive a clone of
/// this handle through [`Callbacks::on_initialized`] and may keep it for
/// direct imperative access. Sharing is single-threaded by design.
pub type WidgetHandle<W> = Rc<RefCell<W>>;

/// Event-callback references carried by a snapshot.
///
/// `on_initialized` is the one mandatory callback: it receives the widget
/// handle exactly once, synchronously after construction — which is before
/// the widget has necessarily finished its own internal initialization. All
/// other callbacks are optional; a missing callback simply drops the
/// corresponding event.
pub struct Callbacks<W> {
    /// Mandatory; receives the widget handle once, right after construction.
    pub on_initialized: Box<dyn FnMut(&WidgetHandle<W>)>,
    /// The widget finished internal initialization. Runs strictly after the
    /// controller has synchronized the widget to the current snapshot.
    pub on_ready: Option<Box<dyn FnMut()>>,
    /// The crop result changed.
    pub on_crop: Option<Box<dyn FnMut(&CropReport)>>,
    /// A crop interaction started.
    pub on_crop_start: Option<Box<dyn FnMut(&CropPhase)>>,
    /// A crop interaction moved.
    pub on_crop_move: Option<Box<dyn FnMut(&CropPhase)>>,
    /// A crop interaction ended.
    pub on_crop_end: Option<Box<dyn FnMut(&CropPhase)>>,
    /// The canvas zoom level changed.
    pub on_zoom: Option<Box<dyn FnMut(&ZoomDelta)>>,
}

impl<W> Callbacks<W> {
    /// Creates a callback set with the mandatory `on_initialized` and no
    /// optional callbacks.
    pub fn new(on_initialized: impl FnMut(&WidgetHandle<W>) + 'static) -> Self {
        Self {
            on_initialized: Box::new(on_initialized),
            on_ready: None,
            on_crop: None,
            on_crop_start: None,
            on_crop_move: None,
            on_crop_end: None,
            on_zoom: None,
        }
    }
}

impl<W> fmt::Debug for Callbacks<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_initialized", &"..")
            .field("on_ready", &self.on_ready.is_some())
            .field("on_crop", &self.on_crop.is_some())
            .field("on_crop_start", &self.on_crop_start.is_some())
            .field("on_crop_move", &self.on_crop_move.is_some())
            .field("on_crop_end", &self.on_crop_end.is_some())
            .field("on_zoom", &self.on_zoom.is_some())
            .finish()
    }
}

/// The full declarative input set for one render pass.
pub struct ConfigSnapshot<W> {
    /// Which element kind the host should render and bind.
    pub surface: SurfaceKind,
    /// Whether the widget accepts interaction. Always definite; applied on
    /// every reconciliation pass.
    pub enabled: bool,
    /// Construction-time options consumed once when the widget is built.
    /// Snapshot-level `aspect_ratio`, `drag_mode`, and `data` are layered on
    /// top of these at construction when present.
    pub construct: WidgetOptions,
    /// Crop box proportion constraint.
    pub aspect_ratio: Option<f64>,
    /// Backdrop drag interpretation.
    pub drag_mode: Option<DragMode>,
    /// Explicit crop placement override.
    pub data: Option<CropData>,
    /// Explicit crop box placement override.
    pub crop_box: Option<CropBoxGeometry>,
    /// Explicit canvas placement override.
    pub canvas: Option<CanvasGeometry>,
    /// Horizontal scale factor.
    pub scale_x: Option<f64>,
    /// Vertical scale factor.
    pub scale_y: Option<f64>,
    /// Absolute rotation target in degrees.
    pub rotate_to: Option<f64>,
    /// Absolute zoom target. Only strictly positive values issue a zoom
    /// call; zero or negative means "no zoom action requested".
    pub zoom_to: Option<f64>,
    /// Event-callback references.
    pub callbacks: Callbacks<W>,
}

impl<W> ConfigSnapshot<W> {
    /// Creates a snapshot with default construction options, interaction
    /// enabled, and every imperative field absent.
    pub fn new(on_initialized: impl FnMut(&WidgetHandle<W>) + 'static) -> Self {
        Self {
            surface: SurfaceKind::default(),
            enabled: true,
            construct: WidgetOptions::default(),
            aspect_ratio: None,
            drag_mode: None,
            data: None,
            crop_box: None,
            canvas: None,
            scale_x: None,
            scale_y: None,
            rotate_to: None,
            zoom_to: None,
            callbacks: Callbacks::new(on_initialized),
        }
    }

    /// Assembles the option bag for widget construction: the snapshot's
    /// construction options with any present snapshot-level aspect ratio,
    /// drag mode, and initial data layered on top.
    #[must_use]
    pub fn widget_options(&self) -> WidgetOptions {
        let mut options = self.construct.clone();
        if self.aspect_ratio.is_some() {
            options.aspect_ratio = self.aspect_ratio;
        }
        if let Some(mode) = self.drag_mode {
            options.drag_mode = mode;
        }
        if self.data.is_some() {
            options.data = self.data;
        }
        options
    }
}

impl<W> fmt::Debug for ConfigSnapshot<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigSnapshot")
            .field("surface", &self.surface)
            .field("enabled", &self.enabled)
            .field("construct", &self.construct)
            .field("aspect_ratio", &self.aspect_ratio)
            .field("drag_mode", &self.drag_mode)
            .field("data", &self.data)
            .field("crop_box", &self.crop_box)
            .field("canvas", &self.canvas)
            .field("scale_x", &self.scale_x)
            .field("scale_y", &self.scale_y)
            .field("rotate_to", &self.rotate_to)
            .field("zoom_to", &self.zoom_to)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}
