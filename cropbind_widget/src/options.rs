// Copyright 2025 the Cropbind Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction options and interaction-mode enums.

use crate::geometry::CropData;

/// Which kind of host surface the widget binds to.
///
/// The host renders one element of this kind and attaches the adapter's
/// surface slot to it; the widget then takes the element over as its
/// rendering target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SurfaceKind {
    /// A raster drawing surface.
    #[default]
    Canvas,
    /// A plain image element.
    Image,
}

/// How pointer drags on the widget's backdrop are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DragMode {
    /// Dragging creates a new crop box.
    #[default]
    Crop,
    /// Dragging moves the canvas.
    Move,
    /// Dragging does nothing.
    None,
}

/// How the crop box and canvas are constrained against the container.
///
/// The modes mirror the external widget's view modes 0–3, from least to most
/// restrictive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// No restrictions; the crop box may extend outside the canvas.
    #[default]
    Free,
    /// Restrict the crop box to not exceed the size of the canvas.
    FitCropBox,
    /// Additionally restrict the canvas to fit within the container.
    FitCanvas,
    /// Additionally require the canvas to fill the container.
    FillCanvas,
}

/// The full option bag consumed once at widget construction.
///
/// Hosts assemble this from the current configuration snapshot; widgets read
/// it in [`CropWidget::bind`](crate::CropWidget::bind) and never see it
/// again. Later changes flow through the individual imperative methods
/// instead.
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetOptions {
    /// Fixed crop box proportion constraint; `None` leaves it free.
    pub aspect_ratio: Option<f64>,
    /// Initial drag interaction mode.
    pub drag_mode: DragMode,
    /// Constraint mode for crop box and canvas.
    pub view_mode: ViewMode,
    /// Whether a crop box is shown immediately on ready.
    pub auto_crop: bool,
    /// Whether to show dashed guide lines inside the crop box.
    pub guides: bool,
    /// Whether to show the checkered background behind the canvas.
    pub background: bool,
    /// Whether the canvas may be moved.
    pub movable: bool,
    /// Whether the canvas may be rotated.
    pub rotatable: bool,
    /// Whether the canvas may be scaled (flipped/stretched).
    pub scalable: bool,
    /// Whether the canvas may be zoomed.
    pub zoomable: bool,
    /// Initial crop placement applied once the widget becomes ready.
    pub data: Option<CropData>,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            aspect_ratio: None,
            drag_mode: DragMode::default(),
            view_mode: ViewMode::default(),
            auto_crop: true,
            guides: true,
            background: true,
            movable: true,
            rotatable: true,
            scalable: true,
            zoomable: true,
            data: None,
        }
    }
}
