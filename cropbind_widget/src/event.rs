// Copyright 2025 the Cropbind Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event payloads a widget reports back to its host.
//!
//! Widgets emit these as interaction happens; the host event loop delivers
//! them one at a time, synchronously, to the adapter, which forwards them
//! verbatim to caller callbacks. Nothing here is buffered or replayed.

use kurbo::{Rect, Vec2};

/// The interaction a crop-phase event was triggered by.
///
/// Edge and corner variants name the crop box handle being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CropAction {
    /// The whole crop box and canvas move together.
    All,
    /// A new crop box is being drawn.
    Crop,
    /// The canvas is being moved.
    Move,
    /// The canvas is being zoomed.
    Zoom,
    /// North edge resize.
    North,
    /// East edge resize.
    East,
    /// South edge resize.
    South,
    /// West edge resize.
    West,
    /// North-east corner resize.
    NorthEast,
    /// North-west corner resize.
    NorthWest,
    /// South-east corner resize.
    SouthEast,
    /// South-west corner resize.
    SouthWest,
}

/// Payload for crop-start, crop-move, and crop-end events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropPhase {
    /// Which interaction the phase belongs to.
    pub action: CropAction,
}

/// The live crop result, reported on every crop change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropReport {
    /// The cropped region in image coordinates.
    pub rect: Rect,
    /// Canvas rotation in degrees.
    pub rotation: f64,
    /// Per-axis canvas scale factors.
    pub scale: Vec2,
}

/// Payload for zoom events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomDelta {
    /// The zoom ratio after the change.
    pub ratio: f64,
    /// The zoom ratio before the change.
    pub old_ratio: f64,
}

/// An event emitted by a live widget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WidgetEvent {
    /// The widget finished internal initialization and is fully operational.
    ///
    /// Emitted at most once per widget instance, strictly after construction
    /// returned.
    Ready,
    /// A crop interaction started.
    CropStart(CropPhase),
    /// A crop interaction moved.
    CropMove(CropPhase),
    /// A crop interaction ended.
    CropEnd(CropPhase),
    /// The crop result changed.
    Crop(CropReport),
    /// The canvas zoom level changed.
    Zoom(ZoomDelta),
}
