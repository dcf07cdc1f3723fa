// Copyright 2025 the Cropbind Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget contract.

use crate::geometry::{CanvasGeometry, CropBoxGeometry, CropData};
use crate::options::{DragMode, WidgetOptions};

/// The method surface of an imperative cropping widget.
///
/// A widget is constructed once against a host surface via [`bind`], driven
/// through the imperative methods for the rest of its life, and torn down
/// exactly once via [`destroy`]. The adapter in `cropbind_host` upholds that
/// lifecycle; implementations uphold the per-method contracts below.
///
/// # Errors
///
/// Every fallible method reports rejection of out-of-range or malformed
/// values through [`Self::Error`]. Implementations must not clamp or ignore
/// bad input silently — the host layer deliberately propagates rejections to
/// the caller, treating misconfiguration as a caller bug rather than a
/// condition to mask.
///
/// # After destruction
///
/// Once [`destroy`] has run, every method must be a no-op (fallible methods
/// return `Ok(())`) and the widget must emit no further events. The host
/// relies on this when teardown races with late event delivery.
///
/// [`bind`]: Self::bind
/// [`destroy`]: Self::destroy
pub trait CropWidget: Sized {
    /// The host surface handle this widget binds to. The surface is owned by
    /// the host tree; the widget's lifetime must be a strict subset of it.
    type Surface;

    /// Widget-side rejection type, propagated unmodified through the host
    /// layer.
    type Error;

    /// Constructs a widget bound to `surface`, configured by `options`.
    ///
    /// Construction returning `Ok` does not imply the widget has finished
    /// internal initialization; readiness is reported separately through
    /// [`WidgetEvent::Ready`](crate::WidgetEvent::Ready).
    fn bind(surface: &Self::Surface, options: &WidgetOptions) -> Result<Self, Self::Error>;

    /// Makes the widget interactive.
    fn enable(&mut self);

    /// Makes the widget inert; state is kept but interaction is ignored.
    fn disable(&mut self);

    /// Constrains the crop box to a fixed width/height proportion.
    fn set_aspect_ratio(&mut self, ratio: f64) -> Result<(), Self::Error>;

    /// Changes how backdrop drags are interpreted.
    fn set_drag_mode(&mut self, mode: DragMode) -> Result<(), Self::Error>;

    /// Forces the crop placement (position, rotation, scale); absent fields
    /// keep their current values.
    fn set_data(&mut self, data: &CropData) -> Result<(), Self::Error>;

    /// Forces the crop box placement; absent fields keep their current
    /// values.
    fn set_crop_box(&mut self, geometry: &CropBoxGeometry) -> Result<(), Self::Error>;

    /// Forces the canvas placement; absent fields keep their current values.
    fn set_canvas(&mut self, geometry: &CanvasGeometry) -> Result<(), Self::Error>;

    /// Sets the horizontal scale factor; negative values mirror.
    fn scale_x(&mut self, factor: f64) -> Result<(), Self::Error>;

    /// Sets the vertical scale factor; negative values mirror.
    fn scale_y(&mut self, factor: f64) -> Result<(), Self::Error>;

    /// Rotates the canvas to an absolute angle in degrees.
    fn rotate_to(&mut self, degrees: f64) -> Result<(), Self::Error>;

    /// Zooms the canvas to an absolute ratio relative to its natural size.
    fn zoom_to(&mut self, ratio: f64) -> Result<(), Self::Error>;

    /// Tears the widget down, releasing everything it attached to the
    /// surface. Infallible by contract; a widget that cannot clean up fully
    /// must still end up inert.
    fn destroy(&mut self);
}
