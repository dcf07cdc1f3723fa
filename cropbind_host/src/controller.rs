// Copyright 2025 the Cropbind Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle/sync controller: owns the widget's lifetime and reconciles
//! declarative snapshots onto it.
//!
//! The controller is an explicit state machine over the adapter's mounted
//! lifetime:
//!
//! ```text
//! Unbound ──(surface present at sync)──► Constructed ──(unmount)──► Disposed
//! ```
//!
//! `Disposed` is terminal. The widget is constructed at most once per
//! controller and from then on only reconfigured; renders that arrive while
//! `Constructed` run the reconciliation algorithm, renders after disposal
//! are silently ignored.
//!
//! Event delivery is an explicit call ([`HostController::deliver`]) rather
//! than a callback registered with the widget: the host event loop hands
//! each widget emission to the controller, which intercepts readiness
//! (synchronize first, then forward) and passes everything else through
//! verbatim. Delivery order is exactly the emission order; nothing is
//! buffered or replayed.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;
use core::mem;

use cropbind_widget::{CropWidget, WidgetEvent};

use crate::refs::{ExternalRef, RefBroker};
use crate::snapshot::{ConfigSnapshot, WidgetHandle};

/// The controller's position in the mounted lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// The surface handle is not yet available; no widget exists.
    Unbound,
    /// The widget is live and bound to the surface.
    Constructed,
    /// Terminal: the widget has been destroyed.
    Disposed,
}

/// Internal state; `Constructed` carries the live widget handle so the
/// single-construction invariant is enforced by the type rather than by
/// call ordering.
enum Phase<W> {
    Unbound,
    Constructed(WidgetHandle<W>),
    Disposed,
}

/// Failure surfaced from the widget, tagged with the lifecycle step it
/// interrupted. The inner error passes through unmodified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostError<E> {
    /// The widget rejected construction.
    Construct(E),
    /// A reconciliation step was rejected; later steps in that pass were
    /// not attempted. No rollback is performed.
    Reconcile(E),
}

impl<E: fmt::Display> fmt::Display for HostError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Construct(error) => write!(f, "widget construction failed: {error}"),
            Self::Reconcile(error) => write!(f, "widget reconciliation failed: {error}"),
        }
    }
}

/// Owns one widget's lifetime and keeps it synchronized with the latest
/// configuration snapshot.
///
/// One controller binds one surface; no two controllers may share a
/// surface. All methods are synchronous and single-threaded.
pub struct HostController<W: CropWidget> {
    state: Phase<W>,
    snapshot: ConfigSnapshot<W>,
    broker: RefBroker<W::Surface>,
}

impl<W> HostController<W>
where
    W: CropWidget,
    W::Surface: Clone,
{
    /// Creates a controller in `Unbound` with no external surface observer.
    pub fn new(snapshot: ConfigSnapshot<W>) -> Self {
        Self::with_external_ref(snapshot, ExternalRef::None)
    }

    /// Creates a controller in `Unbound`, mirroring the surface handle into
    /// `external` whenever it changes.
    pub fn with_external_ref(
        snapshot: ConfigSnapshot<W>,
        external: ExternalRef<W::Surface>,
    ) -> Self {
        Self {
            state: Phase::Unbound,
            snapshot,
            broker: RefBroker::new(external),
        }
    }

    /// The shared slot the host render output attaches the surface to.
    #[must_use]
    pub fn surface_slot(&self) -> Rc<RefCell<Option<W::Surface>>> {
        self.broker.slot()
    }

    /// Records that the host committed a surface element, propagating the
    /// handle to any external observer. Does not construct the widget;
    /// construction happens on the next [`sync`](Self::sync).
    pub fn attach_surface(&mut self, surface: W::Surface) {
        self.broker.set(surface);
    }

    /// Records that the host removed the surface element.
    pub fn detach_surface(&mut self) {
        self.broker.clear();
    }

    /// Replaces the external surface observer.
    pub fn set_external_ref(&mut self, external: ExternalRef<W::Surface>) {
        self.broker.set_external(external);
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> LifecyclePhase {
        match self.state {
            Phase::Unbound => LifecyclePhase::Unbound,
            Phase::Constructed(_) => LifecyclePhase::Constructed,
            Phase::Disposed => LifecyclePhase::Disposed,
        }
    }

    /// Returns `true` while a live widget exists.
    #[must_use]
    pub fn is_constructed(&self) -> bool {
        matches!(self.state, Phase::Constructed(_))
    }

    /// Returns a clone of the live widget handle, if any.
    #[must_use]
    pub fn widget(&self) -> Option<WidgetHandle<W>> {
        match &self.state {
            Phase::Constructed(handle) => Some(Rc::clone(handle)),
            _ => None,
        }
    }

    /// Returns the snapshot currently driving the widget.
    #[must_use]
    pub fn snapshot(&self) -> &ConfigSnapshot<W> {
        &self.snapshot
    }

    /// Accepts a new render's snapshot, superseding the previous one
    /// wholesale, then synchronizes.
    pub fn render(&mut self, snapshot: ConfigSnapshot<W>) -> Result<(), HostError<W::Error>> {
        self.snapshot = snapshot;
        self.sync()
    }

    /// Brings the widget in line with the current snapshot.
    ///
    /// - `Unbound` with no surface yet: no-op.
    /// - `Unbound` with a surface: construct the widget and report it via
    ///   `on_initialized`. The pass that triggered construction does not
    ///   also reconcile; the first reconciliation runs at readiness or on
    ///   the next render, whichever comes first.
    /// - `Constructed`: run one reconciliation pass.
    /// - `Disposed`: no-op; the adapter instance is gone.
    ///
    /// # Errors
    ///
    /// Widget rejections propagate as [`HostError`]; nothing is retried or
    /// masked.
    pub fn sync(&mut self) -> Result<(), HostError<W::Error>> {
        match &self.state {
            Phase::Disposed => Ok(()),
            Phase::Unbound => self.construct(),
            Phase::Constructed(_) => self.reconcile(),
        }
    }

    /// Delivers one widget event.
    ///
    /// Readiness is intercepted: the controller first applies the current
    /// snapshot to the now fully initialized widget, then forwards to
    /// `on_ready` — so the caller always observes a widget already
    /// synchronized to current props. Every other event is forwarded to the
    /// matching callback verbatim and synchronously. Events arriving while
    /// no widget is live (including after disposal) are dropped.
    ///
    /// # Errors
    ///
    /// A reconciliation failure during ready interception propagates and
    /// suppresses the `on_ready` forward for that delivery.
    pub fn deliver(&mut self, event: WidgetEvent) -> Result<(), HostError<W::Error>> {
        if !self.is_constructed() {
            return Ok(());
        }
        match event {
            WidgetEvent::Ready => {
                self.reconcile()?;
                if let Some(on_ready) = &mut self.snapshot.callbacks.on_ready {
                    on_ready();
                }
            }
            WidgetEvent::CropStart(phase) => {
                forward(&mut self.snapshot.callbacks.on_crop_start, &phase);
            }
            WidgetEvent::CropMove(phase) => {
                forward(&mut self.snapshot.callbacks.on_crop_move, &phase);
            }
            WidgetEvent::CropEnd(phase) => {
                forward(&mut self.snapshot.callbacks.on_crop_end, &phase);
            }
            WidgetEvent::Crop(report) => {
                forward(&mut self.snapshot.callbacks.on_crop, &report);
            }
            WidgetEvent::Zoom(delta) => {
                forward(&mut self.snapshot.callbacks.on_zoom, &delta);
            }
        }
        Ok(())
    }

    /// Tears the widget down and enters the terminal `Disposed` phase.
    ///
    /// Idempotent: the widget's `destroy` runs at most once, and repeated
    /// unmounts are no-ops. Never fails; a widget that cannot clean up is
    /// still considered unmounted.
    pub fn unmount(&mut self) {
        if let Phase::Constructed(handle) = mem::replace(&mut self.state, Phase::Disposed) {
            handle.borrow_mut().destroy();
        }
    }

    fn construct(&mut self) -> Result<(), HostError<W::Error>> {
        let Some(surface) = self.broker.value() else {
            return Ok(());
        };
        let options = self.snapshot.widget_options();
        let widget = W::bind(&surface, &options).map_err(HostError::Construct)?;
        let handle = Rc::new(RefCell::new(widget));
        self.state = Phase::Constructed(Rc::clone(&handle));
        (self.snapshot.callbacks.on_initialized)(&handle);
        Ok(())
    }

    fn reconcile(&mut self) -> Result<(), HostError<W::Error>> {
        let handle = match &self.state {
            Phase::Constructed(handle) => Rc::clone(handle),
            _ => return Ok(()),
        };
        let mut widget = handle.borrow_mut();
        apply_snapshot(&mut *widget, &self.snapshot).map_err(HostError::Reconcile)
    }
}

impl<W: CropWidget> fmt::Debug for HostController<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self.state {
            Phase::Unbound => LifecyclePhase::Unbound,
            Phase::Constructed(_) => LifecyclePhase::Constructed,
            Phase::Disposed => LifecyclePhase::Disposed,
        };
        f.debug_struct("HostController")
            .field("phase", &phase)
            .field("broker", &self.broker)
            .field("snapshot", &self.snapshot)
            .finish()
    }
}

/// Selects between the widget's two interactivity operations from the
/// snapshot's definite enable flag.
pub fn apply_enable_state<W: CropWidget>(widget: &mut W, enabled: bool) {
    if enabled {
        widget.enable();
    } else {
        widget.disable();
    }
}

/// One reconciliation pass: applies the snapshot's imperative fields onto a
/// live widget.
///
/// The steps are order-sensitive — later steps may depend on geometry
/// established by earlier ones — and each optional step is skipped when its
/// field is absent. The enable state is always applied. A zoom target is
/// issued only when strictly positive; zero or negative targets are "no
/// zoom action requested" rather than an invalid request.
///
/// # Errors
///
/// The first rejected step aborts the pass; already-applied steps are not
/// rolled back.
pub fn apply_snapshot<W: CropWidget>(
    widget: &mut W,
    snapshot: &ConfigSnapshot<W>,
) -> Result<(), W::Error> {
    apply_enable_state(widget, snapshot.enabled);
    if let Some(ratio) = snapshot.aspect_ratio {
        widget.set_aspect_ratio(ratio)?;
    }
    if let Some(mode) = snapshot.drag_mode {
        widget.set_drag_mode(mode)?;
    }
    if let Some(data) = &snapshot.data {
        widget.set_data(data)?;
    }
    if let Some(geometry) = &snapshot.crop_box {
        widget.set_crop_box(geometry)?;
    }
    if let Some(geometry) = &snapshot.canvas {
        widget.set_canvas(geometry)?;
    }
    if let Some(factor) = snapshot.scale_x {
        widget.scale_x(factor)?;
    }
    if let Some(factor) = snapshot.scale_y {
        widget.scale_y(factor)?;
    }
    if let Some(degrees) = snapshot.rotate_to {
        widget.rotate_to(degrees)?;
    }
    if let Some(ratio) = snapshot.zoom_to {
        if ratio > 0.0 {
            widget.zoom_to(ratio)?;
        }
    }
    Ok(())
}

fn forward<P>(callback: &mut Option<Box<dyn FnMut(&P)>>, payload: &P) {
    if let Some(callback) = callback {
        callback(payload);
    }
}
