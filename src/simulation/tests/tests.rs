use glam::{Quat, Vec3};

use super::*;
use crate::core::random::seeded;
use crate::domain::{BodyTransform, PointerKind, Ray, TRANSFORM_STRIDE};
use crate::systems::{Release, SphereHitTest};

const DT: f32 = 1.0 / 60.0;

fn sim(n: usize) -> SimulationCore {
    SimulationCore::new(n, SimConfig::default(), seeded(2024))
}

fn miss() -> impl FnMut(&Ray, &[BodyTransform]) -> Option<usize> {
    |_: &Ray, _: &[BodyTransform]| None
}

fn hit(index: usize) -> impl FnMut(&Ray, &[BodyTransform]) -> Option<usize> {
    move |_: &Ray, _: &[BodyTransform]| Some(index)
}

fn run(sim: &mut SimulationCore, ticks: usize, scroll: f32) {
    let viewport = *sim.viewport();
    for _ in 0..ticks {
        sim.tick(DT, scroll, viewport, &[], &mut miss());
    }
}

#[test]
fn velocity_limits_hold_every_tick() {
    let mut sim = sim(12);
    let viewport = ViewportGeometry::default();
    let max_v = sim.config().max_velocity + 1e-4;
    let max_w = sim.config().max_angular_velocity + 1e-4;

    // Hidden, then visible, with a drag and a tap in between
    for frame in 0..600 {
        let scroll = if frame < 200 { 0.1 } else { 0.95 };
        let events = match frame {
            300 => vec![PointerSample::new(PointerKind::Down, 0.0, 0.0, 5000.0)],
            301 => vec![PointerSample::new(PointerKind::Move, 1280.0, 720.0, 5016.0)],
            302 => vec![PointerSample::new(PointerKind::Up, 1280.0, 720.0, 5032.0)],
            400 => vec![
                PointerSample::new(PointerKind::Down, 640.0, 360.0, 8000.0),
                PointerSample::new(PointerKind::Up, 640.0, 360.0, 8050.0),
            ],
            _ => Vec::new(),
        };
        sim.tick(DT, scroll, viewport, &events, &mut hit(frame % 12));
        for body in sim.bodies().iter() {
            assert!(body.velocity.length() <= max_v, "frame {frame}: {:?}", body.velocity);
            assert!(body.angular_velocity.length() <= max_w);
        }
    }
}

#[test]
fn zero_dt_tick_leaves_bodies_untouched() {
    let mut sim = sim(5);
    run(&mut sim, 30, 0.9);
    let before: Vec<(Vec3, Vec3, Quat)> = sim.bodies().iter().map(|b| (b.position, b.velocity, b.orientation)).collect();

    let viewport = *sim.viewport();
    sim.tick(0.0, 0.9, viewport, &[], &mut miss());

    let after: Vec<(Vec3, Vec3, Quat)> = sim.bodies().iter().map(|b| (b.position, b.velocity, b.orientation)).collect();
    assert_eq!(before, after);
}

#[test]
fn dt_is_clamped_after_a_stall() {
    let mut sim = sim(1);
    let viewport = *sim.viewport();
    sim.tick(3.0, 0.0, viewport, &[], &mut miss());
    assert_eq!(sim.stats().dt(), MAX_DT);
    sim.tick(f32::NAN, 0.0, viewport, &[], &mut miss());
    assert_eq!(sim.stats().dt(), 0.0);
    sim.tick(-1.0, 0.0, viewport, &[], &mut miss());
    assert_eq!(sim.stats().dt(), 0.0);
}

#[test]
fn hidden_bodies_sink_to_the_hide_line() {
    let mut sim = sim(6);
    let viewport = ViewportGeometry::default();
    let target = viewport.visible_extent().bottom() - sim.config().hidden_drop;

    // Peak error per 4s window must shrink window over window
    let window = 240;
    let mut last_peak = f32::INFINITY;
    for _ in 0..10 {
        let mut peak = 0.0f32;
        for _ in 0..window {
            sim.tick(DT, 0.0, viewport, &[], &mut miss());
            for body in sim.bodies().iter() {
                peak = peak.max((body.position.y - target).abs());
            }
        }
        assert!(peak <= last_peak, "peak {peak} > {last_peak}");
        last_peak = peak;
    }

    for _ in 0..1800 {
        sim.tick(DT, 0.0, viewport, &[], &mut miss());
    }
    for body in sim.bodies().iter() {
        assert!((body.position.y - target).abs() < 1e-2, "y={} target={target}", body.position.y);
    }
}

#[test]
fn visible_bodies_settle_into_a_row() {
    let mut sim = sim(5);
    let viewport = ViewportGeometry::default();
    let extent = viewport.visible_extent();
    let row_y = extent.bottom() + sim.config().glyph_size * 0.7;

    for _ in 0..9000 {
        sim.tick(DT, 1.0, viewport, &[], &mut miss());
    }

    let xs: Vec<f32> = sim.bodies().iter().map(|b| b.position.x).collect();
    for w in xs.windows(2) {
        assert!(w[0] < w[1], "row not ordered: {xs:?}");
    }
    for (i, body) in sim.bodies().iter().enumerate() {
        let expected = crate::systems::spread_target_x(i, 5, extent.width);
        assert!((body.position.x - expected).abs() < 0.5, "x[{i}]={} want {expected}", body.position.x);
        assert!((body.position.y - row_y).abs() < 0.5);
    }
}

#[test]
fn regime_flips_with_no_memory() {
    let mut sim = sim(4);
    let viewport = ViewportGeometry::default();
    for i in 0..40 {
        let scroll = if i % 2 == 0 { 0.86 } else { 0.84 };
        sim.tick(DT, scroll, viewport, &[], &mut miss());
        let stats = sim.stats();
        if i % 2 == 0 {
            assert!(sim.visible());
            assert_eq!(stats.settle(), 4);
            assert_eq!(stats.hidden(), 0);
        } else {
            assert!(!sim.visible());
            assert_eq!(stats.hidden(), 4);
        }
        assert!(sim.bodies().iter().all(|b| b.position.is_finite()));
    }
}

#[test]
fn is_free_survives_hiding() {
    let mut sim = sim(3);
    let viewport = ViewportGeometry::default();
    let events = [
        PointerSample::new(PointerKind::Down, 640.0, 360.0, 0.0),
        PointerSample::new(PointerKind::Up, 640.0, 360.0, 400.0),
    ];
    sim.tick(DT, 0.95, viewport, &events, &mut hit(1));
    assert!(sim.bodies().get(1).unwrap().is_free);

    run(&mut sim, 60, 0.0);
    assert!(sim.bodies().get(1).unwrap().is_free);

    sim.tick(DT, 0.95, viewport, &[], &mut miss());
    let stats = sim.stats();
    assert_eq!(stats.free(), 1);
    assert_eq!(stats.settle(), 2);
}

#[test]
fn drag_moves_the_body_exactly_and_skips_mode_forces() {
    let mut sim = sim(3);
    let viewport = ViewportGeometry::default();
    sim.set_viewport(viewport);

    assert!(sim.pointer(&PointerSample::new(PointerKind::Down, 640.0, 360.0, 0.0), &mut hit(0)).captured);
    assert!(sim.pointer(&PointerSample::new(PointerKind::Move, 700.0, 300.0, 16.0), &mut miss()).captured);
    let held = sim.bodies().get(0).unwrap().position;

    sim.tick(DT, 0.0, viewport, &[], &mut miss());

    assert_eq!(sim.bodies().get(0).unwrap().position, held);
    assert_eq!(sim.stats().captured(), 1);
    assert_eq!(sim.stats().hidden(), 2);
}

#[test]
fn tap_nudge_is_reproducible_with_a_seed() {
    let run_tap = || {
        let mut sim = sim(2);
        sim.set_viewport(ViewportGeometry::default());
        sim.pointer(&PointerSample::new(PointerKind::Down, 640.0, 360.0, 100.0), &mut hit(0));
        sim.pointer(&PointerSample::new(PointerKind::Up, 640.0, 360.0, 250.0), &mut miss());
        assert_eq!(sim.interaction().last_release(), Some(Release::Tap));
        sim.bodies().get(0).unwrap().velocity
    };
    let a = run_tap();
    let b = run_tap();
    assert_eq!(a, b);
    let bound = SimConfig::default().nudge_force;
    assert!(a.x.abs() <= bound && a.y.abs() <= bound && a.z == 0.0);
}

#[test]
fn release_capture_returns_to_idle() {
    let mut sim = sim(2);
    sim.pointer(&PointerSample::new(PointerKind::Down, 640.0, 360.0, 0.0), &mut hit(1));
    assert_eq!(sim.captured(), Some(1));
    sim.release_capture();
    assert_eq!(sim.captured(), None);
}

#[test]
fn transform_buffer_tracks_bodies() {
    let mut sim = sim(4);
    run(&mut sim, 10, 0.9);
    let buf = sim.transforms_buffer();
    assert_eq!(buf.len(), 4 * TRANSFORM_STRIDE);
    for (i, body) in sim.bodies().iter().enumerate() {
        let chunk = &buf[i * TRANSFORM_STRIDE..(i + 1) * TRANSFORM_STRIDE];
        assert_eq!(chunk[0], body.position.x);
        assert_eq!(chunk[1], body.position.y);
        assert_eq!(chunk[2], body.position.z);
        assert_eq!(chunk[6], body.orientation.w);
    }
}

#[test]
fn sphere_picking_grabs_the_glyph_under_the_pointer() {
    let mut sim = sim(5);
    let viewport = ViewportGeometry::default();
    for _ in 0..9000 {
        sim.tick(DT, 1.0, viewport, &[], &mut miss());
    }
    // Aim straight at body 2 (the middle of the row)
    let target = sim.bodies().get(2).unwrap().position;
    let extent = viewport.visible_extent();
    let px = (target.x / (extent.width / 2.0) + 1.0) / 2.0 * viewport.width_px;
    let py = (1.0 - target.y / (extent.height / 2.0)) / 2.0 * viewport.height_px;

    let mut picker = SphereHitTest { radius: sim.config().pick_radius };
    sim.pointer(&PointerSample::new(PointerKind::Down, px, py, 0.0), &mut picker);
    assert_eq!(sim.captured(), Some(2));
}

#[test]
fn empty_simulation_ticks() {
    let mut sim = sim(0);
    let viewport = ViewportGeometry::default();
    let events = [PointerSample::new(PointerKind::Down, 10.0, 10.0, 0.0)];
    sim.tick(DT, 0.9, viewport, &events, &mut SphereHitTest { radius: 2.0 });
    assert_eq!(sim.body_count(), 0);
    assert!(sim.transforms_buffer().is_empty());
    assert_eq!(sim.captured(), None);
}

#[test]
fn snapshot_lists_every_body() {
    let sim = sim(3);
    let json: serde_json::Value = serde_json::from_str(&sim.snapshot_json()).unwrap();
    assert_eq!(json["bodies"].as_array().unwrap().len(), 3);
    assert_eq!(json["captured"], serde_json::Value::Null);
}
