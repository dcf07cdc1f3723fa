// Copyright 2025 the Cropbind Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partial geometry overrides.
//!
//! Each type here is a bag of optional fields. A present field forces the
//! corresponding piece of widget state; an absent field leaves the widget's
//! current value untouched. There is deliberately no "reset to default"
//! encoding — hosts that want a reset must pass the default value explicitly.

use kurbo::{Point, Size, Vec2};

/// A partial override of the full crop placement: position, size, rotation,
/// and scale, all in image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CropData {
    /// Top-left corner of the cropped region.
    pub origin: Option<Point>,
    /// Size of the cropped region.
    pub size: Option<Size>,
    /// Absolute rotation in degrees.
    pub rotation: Option<f64>,
    /// Per-axis scale factors; negative values mirror.
    pub scale: Option<Vec2>,
}

impl CropData {
    /// Returns `true` when no field is present, i.e. applying this override
    /// would not change any widget state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.origin.is_none()
            && self.size.is_none()
            && self.rotation.is_none()
            && self.scale.is_none()
    }
}

/// A partial override of the crop box placement, in container coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CropBoxGeometry {
    /// Top-left corner of the crop box.
    pub origin: Option<Point>,
    /// Size of the crop box.
    pub size: Option<Size>,
}

/// A partial override of the canvas placement, in container coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasGeometry {
    /// Top-left corner of the canvas.
    pub origin: Option<Point>,
    /// Size of the canvas.
    pub size: Option<Size>,
}
