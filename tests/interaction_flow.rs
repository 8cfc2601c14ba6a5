use glam::Vec3;
use glyphdrift_engine::core::random::seeded;
use glyphdrift_engine::{
    BodyTransform, PointerKind, PointerPhase, PointerSample, Ray, Release, SimConfig, SimulationCore,
    ViewportGeometry,
};

fn picker(index: usize) -> impl FnMut(&Ray, &[BodyTransform]) -> Option<usize> {
    move |_: &Ray, _: &[BodyTransform]| Some(index)
}

/// Pixel position whose ray lands on `p` in the drag plane
fn pixel_of(viewport: &ViewportGeometry, p: Vec3) -> (f32, f32) {
    let ext = viewport.visible_extent();
    let nx = p.x / (ext.width / 2.0);
    let ny = p.y / (ext.height / 2.0);
    ((nx + 1.0) / 2.0 * viewport.width_px, (1.0 - ny) / 2.0 * viewport.height_px)
}

#[test]
fn grab_drag_throw_then_drift() {
    let viewport = ViewportGeometry::default();
    let mut sim = SimulationCore::new(3, SimConfig::default(), seeded(77));
    sim.set_viewport(viewport);

    let start = Vec3::new(2.0, -1.0, 0.0);
    let end = start + Vec3::new(0.1, -0.05, 0.0);
    let (sx, sy) = pixel_of(&viewport, start);
    let (ex, ey) = pixel_of(&viewport, end);

    let down = PointerSample::new(PointerKind::Down, sx, sy, 0.0).touch();
    assert!(sim.pointer(&down, &mut picker(1)).captured);
    assert!(matches!(sim.interaction().phase(), PointerPhase::Down { body: 1, .. }));

    let moved = PointerSample::new(PointerKind::Move, ex, ey, 16.0).touch();
    sim.pointer(&moved, &mut picker(0));
    let body = sim.bodies().get(1).unwrap();
    assert!((body.velocity - Vec3::new(6.0, -3.0, 0.0)).length() < 1e-2);
    assert!((body.position - end).length() < 1e-3);
    let held = body.position;
    assert!(sim.interaction().phase().is_dragging());

    let up = PointerSample::new(PointerKind::Up, ex, ey, 40.0).touch();
    assert!(!sim.pointer(&up, &mut picker(0)).captured);
    assert_eq!(sim.interaction().last_release(), Some(Release::Throw));
    let thrown = sim.bodies().get(1).unwrap().velocity;
    assert!((thrown - Vec3::new(6.0, -3.0, 0.0)).length() < 1e-2);

    // Visible from here on. The first tick honours the drag pin, the
    // second moves the thrown glyph while the others settle.
    sim.tick(1.0 / 60.0, 0.95, viewport, &[], &mut picker(0));
    assert_eq!(sim.bodies().get(1).unwrap().position, held);
    sim.tick(1.0 / 60.0, 0.95, viewport, &[], &mut picker(0));
    let stats = sim.stats();
    assert_eq!(stats.free(), 1);
    assert_eq!(stats.settle(), 2);
    assert!(sim.bodies().get(1).unwrap().position.x > end.x);
}

#[test]
fn tap_release_replaces_velocity_with_bounded_nudge() {
    let viewport = ViewportGeometry::default();
    let config = SimConfig { nudge_force: 3.0, ..SimConfig::default() };
    let mut sim = SimulationCore::new(2, config, seeded(5));
    sim.set_viewport(viewport);

    // Give body 0 some speed first
    for _ in 0..30 {
        sim.tick(1.0 / 60.0, 0.0, viewport, &[], &mut picker(0));
    }
    assert!(sim.bodies().get(0).unwrap().velocity.length() > 0.0);

    sim.pointer(&PointerSample::new(PointerKind::Down, 640.0, 360.0, 1_000.0), &mut picker(0));
    sim.pointer(&PointerSample::new(PointerKind::Up, 640.0, 360.0, 1_150.0), &mut picker(0));

    assert_eq!(sim.interaction().last_release(), Some(Release::Tap));
    let v = sim.bodies().get(0).unwrap().velocity;
    assert!(v.x.abs() <= 3.0 && v.y.abs() <= 3.0);
    assert_eq!(v.z, 0.0);
}

#[test]
fn hit_test_miss_keeps_idle() {
    let mut sim = SimulationCore::new(2, SimConfig::default(), seeded(1));
    let mut nothing = |_: &Ray, _: &[BodyTransform]| -> Option<usize> { None };
    let res = sim.pointer(&PointerSample::new(PointerKind::Down, 10.0, 10.0, 0.0), &mut nothing);
    assert!(!res.captured);
    assert_eq!(sim.interaction().phase(), PointerPhase::Idle);
    assert!(sim.bodies().iter().all(|b| !b.is_free));
}
