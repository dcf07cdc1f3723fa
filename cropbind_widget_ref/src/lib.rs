// Copyright 2025 the Cropbind Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=cropbind_widget_ref --heading-base-level=0

//! Cropbind Reference Widget.
//!
//! This crate provides a small, stateful implementation of
//! [`CropWidget`] for **call recording and state tracing**.
//!
//! It is intentionally *not* a real cropper:
//! - It does **not** render pixels or hit-test pointer input.
//! - It does **not** constrain geometry the way a production widget would.
//! - It is intended primarily for tests and debugging that want to assert on
//!   the calls a host issued and on the widget state at the time each call
//!   was applied.
//!
//! Every successfully applied contract method is journaled as an
//! [`AppliedCall`]; rejected calls (and calls after [`CropWidget::destroy`])
//! leave both the journal and the state untouched. [`WidgetState`] is
//! `PartialEq`, so tests can snapshot it before a reconciliation pass and
//! assert it came out unchanged.
//!
//! ```rust
//! use cropbind_widget::{CropWidget, WidgetOptions};
//! use cropbind_widget_ref::{AppliedCall, RefSurface, RefWidget};
//!
//! let surface = RefSurface::default();
//! let mut widget = RefWidget::bind(&surface, &WidgetOptions::default()).unwrap();
//!
//! widget.rotate_to(90.0).unwrap();
//! assert_eq!(widget.calls(), &[AppliedCall::RotateTo(90.0)]);
//! assert_eq!(widget.state().rotation, 90.0);
//! ```

#![no_std]

use core::fmt;
use core::mem;

use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;

use cropbind_widget::{
    CanvasGeometry, CropBoxGeometry, CropData, CropWidget, DragMode, SurfaceKind, WidgetEvent,
    WidgetOptions,
};

/// The host surface the reference widget binds to.
///
/// A stand-in for a real renderable element: it carries just enough for the
/// widget to derive an initial canvas placement.
#[derive(Clone, Debug, PartialEq)]
pub struct RefSurface {
    /// Which element kind the host rendered.
    pub kind: SurfaceKind,
    /// Natural size of the underlying image content.
    pub natural_size: Size,
}

impl RefSurface {
    /// Creates a surface of the given kind and natural content size.
    #[must_use]
    pub fn new(kind: SurfaceKind, natural_size: Size) -> Self {
        Self { kind, natural_size }
    }
}

impl Default for RefSurface {
    fn default() -> Self {
        Self::new(SurfaceKind::Canvas, Size::new(640.0, 480.0))
    }
}

/// Rejection reasons mirroring what a production widget refuses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RefWidgetError {
    /// Aspect ratio must be finite and strictly positive.
    InvalidAspectRatio(f64),
    /// Scale factors must be finite.
    InvalidScale(f64),
    /// Rotation angles must be finite.
    InvalidRotation(f64),
    /// Zoom ratios must be finite and strictly positive.
    InvalidZoom(f64),
}

impl fmt::Display for RefWidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAspectRatio(value) => write!(f, "invalid aspect ratio: {value}"),
            Self::InvalidScale(value) => write!(f, "invalid scale factor: {value}"),
            Self::InvalidRotation(value) => write!(f, "invalid rotation angle: {value}"),
            Self::InvalidZoom(value) => write!(f, "invalid zoom ratio: {value}"),
        }
    }
}

/// Snapshot of the reference widget's state.
///
/// Tests typically `clone` this before driving the host and compare with
/// `==` afterwards; an untouched field must compare equal.
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetState {
    /// Whether the widget currently accepts interaction.
    pub enabled: bool,
    /// Fixed crop box proportion constraint, if any.
    pub aspect_ratio: Option<f64>,
    /// Current backdrop drag interpretation.
    pub drag_mode: DragMode,
    /// Cropped region in image coordinates.
    pub crop_rect: Rect,
    /// Crop box placement in container coordinates.
    pub crop_box_rect: Rect,
    /// Canvas placement in container coordinates.
    pub canvas_rect: Rect,
    /// Canvas rotation in degrees.
    pub rotation: f64,
    /// Per-axis canvas scale factors.
    pub scale: Vec2,
    /// Canvas zoom ratio relative to natural size.
    pub zoom: f64,
}

/// One successfully applied contract method, with its argument.
///
/// Calls made during [`CropWidget::bind`] are not journaled; the journal
/// starts empty so tests can count exactly what a host issued after
/// construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AppliedCall {
    /// [`CropWidget::enable`].
    Enable,
    /// [`CropWidget::disable`].
    Disable,
    /// [`CropWidget::set_aspect_ratio`].
    SetAspectRatio(f64),
    /// [`CropWidget::set_drag_mode`].
    SetDragMode(DragMode),
    /// [`CropWidget::set_data`].
    SetData(CropData),
    /// [`CropWidget::set_crop_box`].
    SetCropBox(CropBoxGeometry),
    /// [`CropWidget::set_canvas`].
    SetCanvas(CanvasGeometry),
    /// [`CropWidget::scale_x`].
    ScaleX(f64),
    /// [`CropWidget::scale_y`].
    ScaleY(f64),
    /// [`CropWidget::rotate_to`].
    RotateTo(f64),
    /// [`CropWidget::zoom_to`].
    ZoomTo(f64),
    /// [`CropWidget::destroy`].
    Destroy,
}

/// Journal of applied calls. Inline capacity covers a full reconciliation
/// pass plus teardown without spilling.
pub type CallJournal = SmallVec<[AppliedCall; 12]>;

/// A stateful, recording [`CropWidget`] implementation.
#[derive(Debug)]
pub struct RefWidget {
    state: WidgetState,
    calls: CallJournal,
    destroyed: bool,
    ready_emitted: bool,
}

impl RefWidget {
    /// Returns the current widget state.
    #[must_use]
    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Returns the journal of calls applied since construction (or since the
    /// last [`take_calls`](Self::take_calls)).
    #[must_use]
    pub fn calls(&self) -> &[AppliedCall] {
        &self.calls
    }

    /// Drains and returns the journal, leaving it empty.
    ///
    /// Useful between host passes: drain after mount, then assert on exactly
    /// the calls the next pass issued.
    pub fn take_calls(&mut self) -> CallJournal {
        mem::take(&mut self.calls)
    }

    /// Returns `true` once [`CropWidget::destroy`] has run.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Produces the ready event a host loop would deliver once the widget
    /// finishes internal initialization.
    ///
    /// Returns the event on first call only; repeated calls and calls after
    /// destruction return `None`, matching the at-most-once contract of
    /// [`WidgetEvent::Ready`].
    pub fn fire_ready(&mut self) -> Option<WidgetEvent> {
        if self.destroyed || self.ready_emitted {
            return None;
        }
        self.ready_emitted = true;
        Some(WidgetEvent::Ready)
    }

    fn apply_data(state: &mut WidgetState, data: &CropData) -> Result<(), RefWidgetError> {
        if let Some(rotation) = data.rotation {
            check_rotation(rotation)?;
        }
        if let Some(scale) = data.scale {
            check_scale(scale.x)?;
            check_scale(scale.y)?;
        }
        state.crop_rect = merge_rect(state.crop_rect, data.origin, data.size);
        if let Some(rotation) = data.rotation {
            state.rotation = rotation;
        }
        if let Some(scale) = data.scale {
            state.scale = scale;
        }
        Ok(())
    }
}

impl CropWidget for RefWidget {
    type Surface = RefSurface;
    type Error = RefWidgetError;

    fn bind(surface: &Self::Surface, options: &WidgetOptions) -> Result<Self, Self::Error> {
        if let Some(ratio) = options.aspect_ratio {
            check_aspect_ratio(ratio)?;
        }
        let canvas_rect = Rect::from_origin_size(Point::ZERO, surface.natural_size);
        let auto_rect = if options.auto_crop {
            canvas_rect
        } else {
            Rect::ZERO
        };
        let mut state = WidgetState {
            enabled: true,
            aspect_ratio: options.aspect_ratio,
            drag_mode: options.drag_mode,
            crop_rect: auto_rect,
            crop_box_rect: auto_rect,
            canvas_rect,
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            zoom: 1.0,
        };
        if let Some(data) = &options.data {
            Self::apply_data(&mut state, data)?;
        }
        Ok(Self {
            state,
            calls: CallJournal::new(),
            destroyed: false,
            ready_emitted: false,
        })
    }

    fn enable(&mut self) {
        if self.destroyed {
            return;
        }
        self.state.enabled = true;
        self.calls.push(AppliedCall::Enable);
    }

    fn disable(&mut self) {
        if self.destroyed {
            return;
        }
        self.state.enabled = false;
        self.calls.push(AppliedCall::Disable);
    }

    fn set_aspect_ratio(&mut self, ratio: f64) -> Result<(), Self::Error> {
        if self.destroyed {
            return Ok(());
        }
        check_aspect_ratio(ratio)?;
        self.state.aspect_ratio = Some(ratio);
        self.calls.push(AppliedCall::SetAspectRatio(ratio));
        Ok(())
    }

    fn set_drag_mode(&mut self, mode: DragMode) -> Result<(), Self::Error> {
        if self.destroyed {
            return Ok(());
        }
        self.state.drag_mode = mode;
        self.calls.push(AppliedCall::SetDragMode(mode));
        Ok(())
    }

    fn set_data(&mut self, data: &CropData) -> Result<(), Self::Error> {
        if self.destroyed {
            return Ok(());
        }
        Self::apply_data(&mut self.state, data)?;
        self.calls.push(AppliedCall::SetData(*data));
        Ok(())
    }

    fn set_crop_box(&mut self, geometry: &CropBoxGeometry) -> Result<(), Self::Error> {
        if self.destroyed {
            return Ok(());
        }
        self.state.crop_box_rect =
            merge_rect(self.state.crop_box_rect, geometry.origin, geometry.size);
        self.calls.push(AppliedCall::SetCropBox(*geometry));
        Ok(())
    }

    fn set_canvas(&mut self, geometry: &CanvasGeometry) -> Result<(), Self::Error> {
        if self.destroyed {
            return Ok(());
        }
        self.state.canvas_rect = merge_rect(self.state.canvas_rect, geometry.origin, geometry.size);
        self.calls.push(AppliedCall::SetCanvas(*geometry));
        Ok(())
    }

    fn scale_x(&mut self, factor: f64) -> Result<(), Self::Error> {
        if self.destroyed {
            return Ok(());
        }
        check_scale(factor)?;
        self.state.scale.x = factor;
        self.calls.push(AppliedCall::ScaleX(factor));
        Ok(())
    }

    fn scale_y(&mut self, factor: f64) -> Result<(), Self::Error> {
        if self.destroyed {
            return Ok(());
        }
        check_scale(factor)?;
        self.state.scale.y = factor;
        self.calls.push(AppliedCall::ScaleY(factor));
        Ok(())
    }

    fn rotate_to(&mut self, degrees: f64) -> Result<(), Self::Error> {
        if self.destroyed {
            return Ok(());
        }
        check_rotation(degrees)?;
        self.state.rotation = degrees;
        self.calls.push(AppliedCall::RotateTo(degrees));
        Ok(())
    }

    fn zoom_to(&mut self, ratio: f64) -> Result<(), Self::Error> {
        if self.destroyed {
            return Ok(());
        }
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(RefWidgetError::InvalidZoom(ratio));
        }
        self.state.zoom = ratio;
        self.calls.push(AppliedCall::ZoomTo(ratio));
        Ok(())
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.state.enabled = false;
        self.calls.push(AppliedCall::Destroy);
    }
}

/// Builds a rect from an existing one plus optional origin/size overrides.
fn merge_rect(current: Rect, origin: Option<Point>, size: Option<Size>) -> Rect {
    let origin = origin.unwrap_or_else(|| current.origin());
    let size = size.unwrap_or_else(|| current.size());
    Rect::from_origin_size(origin, size)
}

fn check_aspect_ratio(ratio: f64) -> Result<(), RefWidgetError> {
    if ratio.is_finite() && ratio > 0.0 {
        Ok(())
    } else {
        Err(RefWidgetError::InvalidAspectRatio(ratio))
    }
}

fn check_scale(factor: f64) -> Result<(), RefWidgetError> {
    if factor.is_finite() {
        Ok(())
    } else {
        Err(RefWidgetError::InvalidScale(factor))
    }
}

fn check_rotation(degrees: f64) -> Result<(), RefWidgetError> {
    if degrees.is_finite() {
        Ok(())
    } else {
        Err(RefWidgetError::InvalidRotation(degrees))
    }
}
