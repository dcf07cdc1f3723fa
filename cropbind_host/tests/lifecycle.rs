// Copyright 2025 the Cropbind Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `cropbind_host` crate.
//!
//! These drive a [`HostController`] end to end against the recording
//! reference widget, with a focus on the lifecycle invariants: one
//! construction per mount, ready interception ordering, absent-field
//! reconciliation semantics, and teardown idempotence.

use std::cell::RefCell;
use std::rc::Rc;

use cropbind_host::{
    ConfigSnapshot, ExternalRef, HostController, HostError, LifecyclePhase, WidgetHandle,
};
use cropbind_widget::{
    CropAction, CropPhase, CropReport, DragMode, SurfaceKind, WidgetEvent, ZoomDelta,
};
use cropbind_widget_ref::{AppliedCall, RefSurface, RefWidget, RefWidgetError};
use kurbo::{Rect, Size, Vec2};

/// Shared observers threaded into a snapshot's callbacks.
struct Probe {
    log: Rc<RefCell<Vec<&'static str>>>,
    handle: Rc<RefCell<Option<WidgetHandle<RefWidget>>>>,
    initialized: Rc<RefCell<usize>>,
}

impl Probe {
    fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            handle: Rc::new(RefCell::new(None)),
            initialized: Rc::new(RefCell::new(0)),
        }
    }

    /// A snapshot whose `on_initialized` and `on_ready` report into this
    /// probe.
    fn snapshot(&self) -> ConfigSnapshot<RefWidget> {
        let log = Rc::clone(&self.log);
        let handle = Rc::clone(&self.handle);
        let initialized = Rc::clone(&self.initialized);
        let mut snapshot = ConfigSnapshot::new(move |widget| {
            *initialized.borrow_mut() += 1;
            *handle.borrow_mut() = Some(Rc::clone(widget));
            log.borrow_mut().push("initialized");
        });
        let log = Rc::clone(&self.log);
        snapshot.callbacks.on_ready = Some(Box::new(move || log.borrow_mut().push("ready")));
        snapshot
    }

    fn widget(&self) -> WidgetHandle<RefWidget> {
        self.handle.borrow().clone().expect("widget not initialized")
    }

    fn log(&self) -> Vec<&'static str> {
        self.log.borrow().clone()
    }

    fn initialized(&self) -> usize {
        *self.initialized.borrow()
    }
}

/// Mounts a controller on a default surface after letting the test adjust
/// the first snapshot.
fn mount(
    probe: &Probe,
    configure: impl FnOnce(&mut ConfigSnapshot<RefWidget>),
) -> HostController<RefWidget> {
    let mut snapshot = probe.snapshot();
    configure(&mut snapshot);
    let mut controller = HostController::new(snapshot);
    controller.attach_surface(RefSurface::default());
    controller.sync().expect("mount must succeed");
    controller
}

fn deliver_ready(controller: &mut HostController<RefWidget>, probe: &Probe) {
    let event = probe
        .widget()
        .borrow_mut()
        .fire_ready()
        .expect("ready already emitted");
    controller.deliver(event).expect("ready delivery must succeed");
}

fn drain_calls(probe: &Probe) {
    probe.widget().borrow_mut().take_calls();
}

#[test]
fn mount_constructs_the_widget_and_reports_the_handle() {
    let probe = Probe::new();
    let controller = mount(&probe, |snapshot| {
        snapshot.aspect_ratio = Some(1.0);
    });

    assert_eq!(controller.phase(), LifecyclePhase::Constructed);
    assert_eq!(probe.initialized(), 1);
    assert_eq!(probe.log(), vec!["initialized"]);

    let widget = probe.widget();
    let state = widget.borrow().state().clone();
    assert!(state.enabled);
    assert_eq!(state.aspect_ratio, Some(1.0));
    // The construction pass itself issues no imperative calls.
    assert!(widget.borrow().calls().is_empty());
}

#[test]
fn sync_without_a_surface_stays_unbound() {
    let probe = Probe::new();
    let mut controller = HostController::<RefWidget>::new(probe.snapshot());

    controller.sync().unwrap();
    controller.sync().unwrap();

    assert_eq!(controller.phase(), LifecyclePhase::Unbound);
    assert_eq!(probe.initialized(), 0);
}

#[test]
fn repeated_renders_never_reconstruct() {
    let probe = Probe::new();
    let mut controller = mount(&probe, |_| {});
    let first = probe.widget();

    for degrees in [10.0, 20.0, 30.0] {
        let mut snapshot = probe.snapshot();
        snapshot.rotate_to = Some(degrees);
        controller.render(snapshot).unwrap();
    }

    assert_eq!(probe.initialized(), 1, "construction must happen once");
    let current = controller.widget().expect("widget must stay live");
    assert!(
        Rc::ptr_eq(&first, &current),
        "renders must reconfigure the original instance"
    );
}

#[test]
fn initialized_fires_exactly_once_and_before_first_ready() {
    let probe = Probe::new();
    let mut controller = mount(&probe, |_| {});

    deliver_ready(&mut controller, &probe);
    let mut snapshot = probe.snapshot();
    snapshot.rotate_to = Some(5.0);
    controller.render(snapshot).unwrap();

    assert_eq!(probe.log(), vec!["initialized", "ready"]);
    assert_eq!(probe.initialized(), 1);
}

#[test]
fn ready_interception_synchronizes_before_forwarding() {
    let probe = Probe::new();
    let synced_at_ready = Rc::new(RefCell::new(None));

    let mut snapshot = probe.snapshot();
    snapshot.aspect_ratio = Some(2.0);
    let handle = Rc::clone(&probe.handle);
    let observed = Rc::clone(&synced_at_ready);
    snapshot.callbacks.on_ready = Some(Box::new(move || {
        let widget = handle.borrow().clone().expect("initialized before ready");
        let applied = widget
            .borrow()
            .calls()
            .contains(&AppliedCall::SetAspectRatio(2.0));
        *observed.borrow_mut() = Some(applied);
    }));

    let mut controller = HostController::new(snapshot);
    controller.attach_surface(RefSurface::default());
    controller.sync().unwrap();
    deliver_ready(&mut controller, &probe);

    assert_eq!(
        *synced_at_ready.borrow(),
        Some(true),
        "on_ready must observe a widget already synchronized to current props"
    );
}

#[test]
fn absent_fields_leave_widget_state_untouched() {
    let probe = Probe::new();
    let mut controller = mount(&probe, |_| {});
    deliver_ready(&mut controller, &probe);

    // Establish distinctive state through explicit overrides.
    let mut snapshot = probe.snapshot();
    snapshot.drag_mode = Some(DragMode::Move);
    snapshot.rotate_to = Some(30.0);
    snapshot.zoom_to = Some(2.0);
    controller.render(snapshot).unwrap();

    let widget = probe.widget();
    let before = widget.borrow().state().clone();
    drain_calls(&probe);

    // A pass with every optional field absent must not reset anything.
    controller.render(probe.snapshot()).unwrap();

    assert_eq!(widget.borrow().state(), &before);
    assert_eq!(widget.borrow().calls(), &[AppliedCall::Enable]);
}

#[test]
fn rotate_only_pass_issues_exactly_one_rotate_call() {
    let probe = Probe::new();
    let mut controller = mount(&probe, |_| {});
    deliver_ready(&mut controller, &probe);
    drain_calls(&probe);

    let mut snapshot = probe.snapshot();
    snapshot.rotate_to = Some(90.0);
    controller.render(snapshot).unwrap();

    let widget = probe.widget();
    assert_eq!(
        widget.borrow().calls(),
        &[AppliedCall::Enable, AppliedCall::RotateTo(90.0)],
        "no aspect-ratio or drag-mode calls may appear on this pass"
    );
}

#[test]
fn zoom_guard_distinguishes_absent_from_non_positive() {
    let probe = Probe::new();
    let mut controller = mount(&probe, |snapshot| {
        snapshot.zoom_to = Some(0.0);
    });
    deliver_ready(&mut controller, &probe);

    let widget = probe.widget();
    let zoom_calls = |widget: &WidgetHandle<RefWidget>| {
        widget
            .borrow()
            .calls()
            .iter()
            .filter(|call| matches!(call, AppliedCall::ZoomTo(_)))
            .count()
    };
    assert_eq!(zoom_calls(&widget), 0, "zoom_to of 0 must issue no call");

    drain_calls(&probe);
    let mut snapshot = probe.snapshot();
    snapshot.zoom_to = Some(1.5);
    controller.render(snapshot).unwrap();

    assert_eq!(zoom_calls(&widget), 1);
    assert!(widget.borrow().calls().contains(&AppliedCall::ZoomTo(1.5)));
    assert_eq!(widget.borrow().state().zoom, 1.5);
}

#[test]
fn unmount_destroys_exactly_once() {
    let probe = Probe::new();
    let mut controller = mount(&probe, |_| {});
    let widget = probe.widget();

    controller.unmount();
    controller.unmount();

    assert_eq!(controller.phase(), LifecyclePhase::Disposed);
    let destroys = widget
        .borrow()
        .calls()
        .iter()
        .filter(|call| matches!(call, AppliedCall::Destroy))
        .count();
    assert_eq!(destroys, 1, "double unmount must destroy once");
}

#[test]
fn late_ready_after_unmount_is_inert() {
    let probe = Probe::new();
    let mut controller = mount(&probe, |snapshot| {
        snapshot.aspect_ratio = Some(1.0);
    });
    let widget = probe.widget();

    // Unmount before the widget ever became ready.
    controller.unmount();
    drain_calls(&probe);

    controller.deliver(WidgetEvent::Ready).unwrap();

    assert!(widget.borrow().calls().is_empty(), "no reconciliation may run");
    assert_eq!(probe.log(), vec!["initialized"], "on_ready must not fire");
}

#[test]
fn renders_after_disposal_are_silently_ignored() {
    let probe = Probe::new();
    let mut controller = mount(&probe, |_| {});
    let widget = probe.widget();
    controller.unmount();
    drain_calls(&probe);

    let mut snapshot = probe.snapshot();
    snapshot.rotate_to = Some(45.0);
    controller.render(snapshot).unwrap();

    assert_eq!(controller.phase(), LifecyclePhase::Disposed);
    assert!(widget.borrow().calls().is_empty());
}

#[test]
fn construction_failure_propagates_and_leaves_the_controller_unbound() {
    let probe = Probe::new();
    let mut snapshot = probe.snapshot();
    snapshot.aspect_ratio = Some(-1.0);

    let mut controller = HostController::new(snapshot);
    controller.attach_surface(RefSurface::default());

    let result = controller.sync();
    assert_eq!(
        result,
        Err(HostError::Construct(RefWidgetError::InvalidAspectRatio(
            -1.0
        )))
    );
    assert_eq!(controller.phase(), LifecyclePhase::Unbound);
    assert_eq!(probe.initialized(), 0);
}

#[test]
fn reconciliation_failure_aborts_the_pass_and_propagates() {
    let probe = Probe::new();
    let mut controller = mount(&probe, |_| {});
    deliver_ready(&mut controller, &probe);
    drain_calls(&probe);

    let mut snapshot = probe.snapshot();
    snapshot.aspect_ratio = Some(-2.0);
    snapshot.rotate_to = Some(45.0);

    let result = controller.render(snapshot);
    assert_eq!(
        result,
        Err(HostError::Reconcile(RefWidgetError::InvalidAspectRatio(
            -2.0
        )))
    );

    let widget = probe.widget();
    assert_eq!(widget.borrow().calls(), &[AppliedCall::Enable]);
    assert_eq!(widget.borrow().state().rotation, 0.0, "later steps must not run");
}

#[test]
fn disable_and_reenable_follow_the_definite_flag() {
    let probe = Probe::new();
    let mut controller = mount(&probe, |_| {});
    deliver_ready(&mut controller, &probe);
    let widget = probe.widget();

    let mut snapshot = probe.snapshot();
    snapshot.enabled = false;
    controller.render(snapshot).unwrap();
    assert!(!widget.borrow().state().enabled);

    controller.render(probe.snapshot()).unwrap();
    assert!(widget.borrow().state().enabled);
}

#[test]
fn events_are_forwarded_verbatim_to_matching_callbacks() {
    let probe = Probe::new();
    let crops: Rc<RefCell<Vec<CropReport>>> = Rc::new(RefCell::new(Vec::new()));
    let zooms: Rc<RefCell<Vec<ZoomDelta>>> = Rc::new(RefCell::new(Vec::new()));
    let phases: Rc<RefCell<Vec<CropAction>>> = Rc::new(RefCell::new(Vec::new()));

    let mut snapshot = probe.snapshot();
    let sink = Rc::clone(&crops);
    snapshot.callbacks.on_crop = Some(Box::new(move |report| sink.borrow_mut().push(*report)));
    let sink = Rc::clone(&zooms);
    snapshot.callbacks.on_zoom = Some(Box::new(move |delta| sink.borrow_mut().push(*delta)));
    let sink = Rc::clone(&phases);
    snapshot.callbacks.on_crop_start =
        Some(Box::new(move |phase| sink.borrow_mut().push(phase.action)));

    let mut controller = HostController::new(snapshot);
    controller.attach_surface(RefSurface::default());
    controller.sync().unwrap();

    let report = CropReport {
        rect: Rect::new(0.0, 0.0, 10.0, 10.0),
        rotation: 90.0,
        scale: Vec2::new(1.0, -1.0),
    };
    let delta = ZoomDelta {
        ratio: 1.2,
        old_ratio: 1.0,
    };
    controller.deliver(WidgetEvent::Crop(report)).unwrap();
    controller.deliver(WidgetEvent::Zoom(delta)).unwrap();
    controller
        .deliver(WidgetEvent::CropStart(CropPhase {
            action: CropAction::SouthEast,
        }))
        .unwrap();
    // No callback registered for crop-end: dropped without error.
    controller
        .deliver(WidgetEvent::CropEnd(CropPhase {
            action: CropAction::Crop,
        }))
        .unwrap();

    assert_eq!(crops.borrow().as_slice(), &[report]);
    assert_eq!(zooms.borrow().as_slice(), &[delta]);
    assert_eq!(phases.borrow().as_slice(), &[CropAction::SouthEast]);
}

#[test]
fn events_before_construction_are_dropped() {
    let probe = Probe::new();
    let mut controller = HostController::<RefWidget>::new(probe.snapshot());

    controller
        .deliver(WidgetEvent::Zoom(ZoomDelta {
            ratio: 2.0,
            old_ratio: 1.0,
        }))
        .unwrap();
    controller.deliver(WidgetEvent::Ready).unwrap();

    assert_eq!(probe.log(), Vec::<&str>::new());
}

#[test]
fn external_cell_ref_mirrors_attach_and_detach() {
    let probe = Probe::new();
    let cell: Rc<RefCell<Option<RefSurface>>> = Rc::new(RefCell::new(None));
    let mut controller = HostController::<RefWidget>::with_external_ref(
        probe.snapshot(),
        ExternalRef::Cell(Rc::clone(&cell)),
    );

    let surface = RefSurface::new(SurfaceKind::Image, Size::new(800.0, 600.0));
    controller.attach_surface(surface.clone());
    assert_eq!(*cell.borrow(), Some(surface));

    controller.detach_surface();
    assert_eq!(*cell.borrow(), None);
}

#[test]
fn external_callback_ref_observes_every_change() {
    let probe = Probe::new();
    let seen: Rc<RefCell<Vec<bool>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut controller = HostController::<RefWidget>::with_external_ref(
        probe.snapshot(),
        ExternalRef::Callback(Box::new(move |surface| {
            sink.borrow_mut().push(surface.is_some());
        })),
    );

    controller.attach_surface(RefSurface::default());
    controller.detach_surface();

    // Initial propagation of absence, then attach, then detach.
    assert_eq!(seen.borrow().as_slice(), &[false, true, false]);
}

#[test]
fn image_surfaces_size_the_canvas_from_natural_size() {
    let probe = Probe::new();
    let mut snapshot = probe.snapshot();
    snapshot.surface = SurfaceKind::Image;

    let mut controller = HostController::new(snapshot);
    controller.attach_surface(RefSurface::new(SurfaceKind::Image, Size::new(320.0, 240.0)));
    controller.sync().unwrap();

    let widget = probe.widget();
    assert_eq!(
        widget.borrow().state().canvas_rect,
        Rect::new(0.0, 0.0, 320.0, 240.0)
    );
}
