//! Simulation behaviour tests
//!
//! These run the world headless with seeded RNGs so results are reproducible.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

use wrongway_sim::simulation::render::{draw_scene, palette};
use wrongway_sim::simulation::{
    detections_to_json, export_detections, is_valid_plate, AsciiCanvas, BoundedLog, Canvas,
    Direction, DrawCommand, DrawList, LaneGroup, SimConfig, SimId, SimVehicle, SimWorld, TickOutcome,
    VehicleId, VehicleUpdateResult, ALERT_ACTION, CANVAS_HEIGHT, CANVAS_WIDTH, EXPORT_FILE_NAME,
    LANES,
};

/// A world that never spawns on its own, so tests control every vehicle
fn quiet_world(seed: u64) -> SimWorld {
    let config = SimConfig {
        spawn_probability: 0.0,
        ..SimConfig::default()
    };
    SimWorld::with_config(config, Some(seed)).expect("valid config")
}

fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "wrongway_sim_{}_{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_generated_plates_follow_layout() {
    let mut world = SimWorld::new_with_seed(1);
    for i in 0..200 {
        world.spawn_in_lane(i % LANES.len(), i % 7 == 0);
    }

    for vehicle in &world.vehicles {
        assert_eq!(vehicle.license_plate.len(), 7);
        assert!(
            is_valid_plate(&vehicle.license_plate),
            "bad plate {}",
            vehicle.license_plate
        );
    }
    assert!(!is_valid_plate("AB12CD"));
    assert!(!is_valid_plate("ab12cd3"));
    assert!(!is_valid_plate("AB1XCD3"));
}

#[test]
fn test_vehicle_ids_are_unique_and_increasing() {
    let mut world = SimWorld::new_with_seed(2);
    let ids: Vec<VehicleId> = (0..20).map(|i| world.spawn_in_lane(i % 4, false)).collect();

    for pair in ids.windows(2) {
        assert!(pair[0] < pair[1]);
    }

    // Ids keep counting across resets
    let mut ctx = world.new_context(Instant::now());
    world.reset(&mut ctx);
    let after_reset = world.spawn_in_lane(0, false);
    assert!(after_reset > *ids.last().unwrap());
}

#[test]
fn test_spawned_attributes_within_ranges() {
    let mut world = SimWorld::new_with_seed(3);
    for i in 0..100 {
        world.spawn_in_lane(i % 4, i % 2 == 0);
    }

    for v in &world.vehicles {
        assert!((0.85..0.99).contains(&v.detection_confidence));
        assert!((0.75..0.99).contains(&v.plate_confidence));
        if v.is_wrong_way {
            assert!((2.0..4.0).contains(&v.speed));
        } else {
            assert!((2.0..5.0).contains(&v.speed));
        }
        assert_eq!(v.width, 40.0);
        assert_eq!(v.height, 60.0);
    }
}

#[test]
fn test_trajectory_keeps_last_ten_positions() {
    let config = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(99);
    let mut vehicle = SimVehicle::spawn(
        VehicleId(SimId(0)),
        LANES[0],
        false,
        &config,
        &mut rng,
    );

    let mut history = Vec::new();
    for _ in 0..15 {
        history.push(vehicle.position);
        vehicle.update(&config);
        assert!(vehicle.trajectory.len() <= 10);
    }

    let trail: Vec<_> = vehicle.trajectory.iter().copied().collect();
    assert_eq!(trail, history[history.len() - 10..].to_vec());
}

#[test]
fn test_vehicle_moves_along_its_direction() {
    let config = SimConfig::default();
    let mut world = quiet_world(4);
    let down = world.spawn_in_lane(0, false);
    let up = world.spawn_in_lane(2, false);

    let down_before = world.vehicle(down).unwrap().position;
    let up_before = world.vehicle(up).unwrap().position;

    for v in world.vehicles.iter_mut() {
        v.update(&config);
    }

    let d = world.vehicle(down).unwrap();
    let u = world.vehicle(up).unwrap();
    assert_eq!(d.direction, Direction::Down);
    assert_eq!(u.direction, Direction::Up);
    assert!((d.position.y - (down_before.y + d.speed)).abs() < 1e-4);
    assert!((u.position.y - (up_before.y - u.speed)).abs() < 1e-4);
    assert_eq!(d.position.x, down_before.x);
}

#[test]
fn test_wrong_way_spawn_flips_direction_and_alerts_once() {
    let mut world = quiet_world(5);
    let id = world.spawn_in_lane(0, true);

    let vehicle = world.vehicle(id).unwrap();
    assert_eq!(LANES[0].canonical, Direction::Down);
    assert_eq!(vehicle.direction, Direction::Up);
    assert_eq!(vehicle.position.y, CANVAS_HEIGHT + 60.0);
    assert!(vehicle.alert_generated);

    assert_eq!(world.alerts.len(), 1);
    let alert = world.alerts.newest().unwrap();
    assert_eq!(alert.id, id);
    assert_eq!(alert.lane, LaneGroup::Southbound);
    assert_eq!(alert.lane.label(), "Lane 1-2");
    assert_eq!(alert.action, ALERT_ACTION);
    if vehicle.plate_recognized {
        assert_eq!(alert.plate, vehicle.license_plate);
    } else {
        assert_eq!(alert.plate, "Unrecognized");
    }

    // Ticking never raises a second alert
    let mut ctx = world.new_context(Instant::now());
    ctx.start(Instant::now());
    for _ in 0..400 {
        world.tick(&mut ctx, Instant::now());
    }
    assert_eq!(world.alerts.len(), 1);
    assert_eq!(world.stats.wrong_way_vehicles, 1);
}

#[test]
fn test_normal_spawn_starts_above_canvas_without_alert() {
    let mut world = quiet_world(6);
    let id = world.spawn_in_lane(1, false);
    let vehicle = world.vehicle(id).unwrap();

    assert_eq!(vehicle.direction, Direction::Down);
    assert_eq!(vehicle.position.y, -60.0);
    assert_eq!(vehicle.position.x, 220.0);
    assert!(world.alerts.is_empty());

    let up_id = world.spawn_in_lane(3, true);
    let up = world.vehicle(up_id).unwrap();
    assert_eq!(up.direction, Direction::Down);
    assert_eq!(up.position.y, -60.0);
    assert_eq!(world.alerts.newest().unwrap().lane, LaneGroup::Northbound);
}

#[test]
fn test_vehicle_logged_once_inside_band() {
    let mut world = quiet_world(7);
    let id = world.spawn_in_lane(0, false);
    let mut ctx = world.new_context(Instant::now());
    ctx.start(Instant::now());

    let mut logged_at = None;
    for tick in 0..400 {
        let before = world.recent_detections.len();
        world.tick(&mut ctx, Instant::now());
        if world.recent_detections.len() > before {
            assert!(logged_at.is_none(), "vehicle logged twice");
            let y = world.vehicle(id).unwrap().position.y;
            assert!(y > 200.0 && y < 300.0, "logged outside band at y={y}");
            logged_at = Some(tick);
        }
        if world.vehicle(id).is_none() {
            break;
        }
    }

    assert!(logged_at.is_some());
    assert_eq!(world.recent_detections.len(), 1);
    let record = world.recent_detections.newest().unwrap();
    assert_eq!(record.id, id);
    assert_eq!(record.status, "Normal");
    assert!(world.vehicle(id).is_none(), "vehicle should have left the feed");
}

#[test]
fn test_offscreen_vehicles_are_removed() {
    let config = SimConfig::default();
    let mut world = quiet_world(8);
    let id = world.spawn_in_lane(2, false);

    {
        let v = world.vehicles.iter_mut().find(|v| v.id == id).unwrap();
        v.position.y = -99.0;
        v.speed = 0.5;
        assert_eq!(v.update(&config), VehicleUpdateResult::Continue);
        v.speed = 1.0;
        assert_eq!(v.update(&config), VehicleUpdateResult::Despawn);
    }

    let mut ctx = world.new_context(Instant::now());
    ctx.start(Instant::now());
    world.tick(&mut ctx, Instant::now());
    assert!(world.vehicle(id).is_none());
    assert!(world.current_detections.is_empty());
}

#[test]
fn test_current_detections_mirror_live_vehicles() {
    let mut world = quiet_world(9);
    world.spawn_in_lane(0, false);
    world.spawn_in_lane(3, true);
    let mut ctx = world.new_context(Instant::now());
    ctx.start(Instant::now());
    world.tick(&mut ctx, Instant::now());

    assert_eq!(world.current_detections.len(), world.vehicles.len());
    let wrong_way: Vec<_> = world
        .current_detections
        .iter()
        .filter(|d| d.is_wrong_way)
        .collect();
    assert_eq!(wrong_way.len(), 1);
    assert_eq!(wrong_way[0].kind_label(), "Wrong-Way");
    let normal = world
        .current_detections
        .iter()
        .find(|d| !d.is_wrong_way)
        .unwrap();
    assert_eq!(normal.kind_label(), "Normal");
    assert_eq!(wrong_way[0].lane, LaneGroup::Northbound);
}

#[test]
fn test_logs_are_bounded() {
    let mut world = quiet_world(10);
    for i in 0..8 {
        world.spawn_in_lane(i % 4, true);
    }
    assert_eq!(world.alerts.len(), 5);
    let newest = world.alerts.newest().unwrap().id;
    assert_eq!(newest, world.vehicles.last().unwrap().id);

    for i in 0..12 {
        world.spawn_in_lane(i % 2, false);
    }
    let mut ctx = world.new_context(Instant::now());
    ctx.start(Instant::now());
    for _ in 0..300 {
        world.tick(&mut ctx, Instant::now());
        assert!(world.recent_detections.len() <= 10);
        assert!(world.alerts.len() <= 5);
    }
    assert_eq!(world.recent_detections.len(), 10);
}

#[test]
fn test_bounded_log_is_newest_first() {
    let mut log = BoundedLog::new(10);
    for i in 1..=12 {
        log.push(i);
    }
    let entries: Vec<i32> = log.iter().copied().collect();
    assert_eq!(entries, (3..=12).rev().collect::<Vec<_>>());
    assert_eq!(log.capacity(), 10);
}

#[test]
fn test_spawn_respects_vehicle_cap() {
    let config = SimConfig {
        spawn_probability: 1.0,
        max_vehicles: 3,
        ..SimConfig::default()
    };
    let mut world = SimWorld::with_config(config, Some(11)).expect("valid config");
    let mut ctx = world.new_context(Instant::now());
    ctx.start(Instant::now());

    for _ in 0..50 {
        world.tick(&mut ctx, Instant::now());
        assert!(world.vehicles.len() <= 3);
    }
    assert_eq!(world.vehicles.len(), 3);
    assert_eq!(world.stats.total_vehicles, 3);
}

#[test]
fn test_stopped_loop_does_nothing() {
    let mut world = SimWorld::new_with_seed(12);
    world.spawn_in_lane(0, false);
    let before = world.vehicles[0].position;

    let mut ctx = world.new_context(Instant::now());
    assert!(!ctx.is_running());
    assert_eq!(world.tick(&mut ctx, Instant::now()), TickOutcome::Stopped);
    assert_eq!(world.vehicles[0].position, before);

    assert!(ctx.toggle(Instant::now()));
    assert_eq!(world.tick(&mut ctx, Instant::now()), TickOutcome::Continue);
    assert_ne!(world.vehicles[0].position, before);

    assert!(!ctx.toggle(Instant::now()));
    let paused_at = world.vehicles[0].position;
    assert_eq!(world.tick(&mut ctx, Instant::now()), TickOutcome::Stopped);
    assert_eq!(world.vehicles[0].position, paused_at);
}

#[test]
fn test_fps_published_after_full_window() {
    let mut world = quiet_world(13);
    let start = Instant::now();
    let mut ctx = world.new_context(start);
    ctx.start(start);

    for ms in [10, 20, 30] {
        world.tick(&mut ctx, start + Duration::from_millis(ms));
        assert_eq!(world.stats.fps, 0);
    }
    world.tick(&mut ctx, start + Duration::from_millis(1000));
    assert_eq!(world.stats.fps, 4);

    // Counting restarts from the publishing tick
    world.tick(&mut ctx, start + Duration::from_millis(1500));
    world.tick(&mut ctx, start + Duration::from_millis(2000));
    assert_eq!(world.stats.fps, 2);
    assert_eq!(ctx.total_ticks(), 6);
}

#[test]
fn test_reset_clears_everything() {
    let config = SimConfig {
        spawn_probability: 1.0,
        ..SimConfig::default()
    };
    let mut world = SimWorld::with_config(config, Some(14)).expect("valid config");
    world.spawn_in_lane(0, true);
    let mut ctx = world.new_context(Instant::now());
    ctx.start(Instant::now());
    for _ in 0..200 {
        world.tick(&mut ctx, Instant::now());
    }
    assert!(world.stats.total_vehicles > 0);

    world.reset(&mut ctx);

    assert!(!ctx.is_running());
    assert_eq!(ctx.total_ticks(), 0);
    assert!(world.vehicles.is_empty());
    assert!(world.alerts.is_empty());
    assert!(world.recent_detections.is_empty());
    assert!(world.current_detections.is_empty());
    assert_eq!(world.stats.total_vehicles, 0);
    assert_eq!(world.stats.wrong_way_vehicles, 0);
    assert_eq!(world.stats.plates_recognized, 0);
    assert_eq!(world.stats.fps, 0);
    assert_eq!(world.stats.accuracy, 98.5);
    assert_eq!(world.tick(&mut ctx, Instant::now()), TickOutcome::Stopped);
}

#[test]
fn test_counters_track_spawns() {
    let mut world = quiet_world(15);
    for i in 0..30 {
        world.spawn_in_lane(i % 4, i % 3 == 0);
    }
    let plates = world.vehicles.iter().filter(|v| v.plate_recognized).count();
    assert_eq!(world.stats.total_vehicles, 30);
    assert_eq!(world.stats.wrong_way_vehicles, 10);
    assert_eq!(world.stats.plates_recognized, plates);
}

#[test]
fn test_export_empty_log_is_empty_array() {
    assert_eq!(detections_to_json(&[]).unwrap(), "[]");

    let world = SimWorld::new();
    let dir = scratch_dir("empty_export");
    let path = export_detections(&world, &dir).expect("export should succeed");
    assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_export_uses_camel_case_fields() {
    let mut world = quiet_world(16);
    world.spawn_in_lane(0, true);
    world.spawn_in_lane(1, false);
    let mut ctx = world.new_context(Instant::now());
    ctx.start(Instant::now());
    while world.recent_detections.len() < 2 {
        world.tick(&mut ctx, Instant::now());
        assert!(ctx.total_ticks() < 1000, "vehicles never reached the band");
    }

    let json = detections_to_json(&world.recent_detections.to_vec()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 2);

    for entry in entries {
        let obj = entry.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(
            keys,
            ["confidence", "id", "licensePlate", "status", "time", "vehicleType"]
        );
    }
    let statuses: Vec<&str> = entries
        .iter()
        .map(|e| e["status"].as_str().unwrap())
        .collect();
    assert!(statuses.contains(&"Wrong Direction"));
    assert!(statuses.contains(&"Normal"));
    assert!(json.contains('\n'), "export should be pretty-printed");
}

#[test]
fn test_scene_draws_background_and_labels() {
    let mut world = quiet_world(17);
    let id = world.spawn_in_lane(0, true);
    let mut canvas = DrawList::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    draw_scene(&world, &mut canvas);

    assert!(matches!(canvas.commands[0], DrawCommand::Clear(_)));
    let dashed = canvas.count_where(|c| matches!(c, DrawCommand::Line { dash: Some(_), .. }));
    assert_eq!(dashed, 2);
    let road_arrows = canvas.count_where(|c| {
        matches!(c, DrawCommand::FillTriangle { color, .. } if *color == palette::ROAD_ARROW)
    });
    assert_eq!(road_arrows, 8);

    let vehicle = world.vehicle(id).unwrap();
    let texts = canvas.texts();
    assert!(texts.iter().any(|t| t.starts_with("WRONG WAY ")));
    assert!(texts.contains(&vehicle.identity_label().as_str()));
    assert_eq!(
        texts.contains(&vehicle.license_plate.as_str()),
        vehicle.plate_recognized
    );

    // The heading arrow sits inside the body and must be painted over it
    let body_index = canvas
        .commands
        .iter()
        .position(|c| {
            matches!(c, DrawCommand::FillRect { color, .. } if *color == palette::WRONG_WAY_BODY)
        })
        .expect("body fill drawn");
    let arrow_index = canvas
        .commands
        .iter()
        .position(|c| {
            matches!(c, DrawCommand::FillTriangle { color, .. } if *color == palette::WRONG_WAY_ARROW)
        })
        .expect("heading arrow drawn");
    assert!(
        arrow_index > body_index,
        "arrow at {arrow_index} drawn before body at {body_index}"
    );

    let boxes = canvas.count_where(|c| {
        matches!(c, DrawCommand::StrokeRect { color, .. } if *color == palette::WRONG_WAY_BODY)
    });
    assert_eq!(boxes, 1);

    // Redrawing starts from a clean frame
    draw_scene(&world, &mut canvas);
    assert_eq!(
        canvas.count_where(|c| matches!(c, DrawCommand::Clear(_))),
        1
    );
}

#[test]
fn test_ascii_canvas_shows_vehicles() {
    let mut world = quiet_world(18);
    let wrong = world.spawn_in_lane(0, true);
    let normal = world.spawn_in_lane(2, false);
    for v in world.vehicles.iter_mut() {
        v.position.y = 200.0;
    }

    let mut canvas = AsciiCanvas::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    world.render(&mut canvas);
    let (rows, cols) = canvas.dimensions();
    assert_eq!((rows, cols), (25, 70));

    let map = canvas.render_to_string();
    assert!(map.contains('W'), "wrong-way vehicle missing:\n{map}");
    assert!(map.contains('o'), "normal vehicle missing:\n{map}");
    assert!(map.contains('|'));
    assert!(map.contains(':'));
    assert!(world.vehicle(wrong).is_some() && world.vehicle(normal).is_some());

    // Centre line runs down column 35; cells outside the grid are None
    assert_eq!(canvas.cell(0, 35), Some('|'));
    assert_eq!(canvas.cell(rows - 1, 35), Some('|'));
    assert_eq!(canvas.cell(rows, 0), None);
    assert_eq!(canvas.cell(0, cols), None);

    // Canvas trait reports the logical size
    assert_eq!(canvas.size(), (CANVAS_WIDTH, CANVAS_HEIGHT));
}

#[test]
fn test_config_loads_partial_json() {
    let dir = scratch_dir("config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("sim.json");
    std::fs::write(&path, r#"{ "max_vehicles": 3, "wrong_way_probability": 0.5 }"#).unwrap();

    let config = SimConfig::from_json_file(&path).expect("config should load");
    assert_eq!(config.max_vehicles, 3);
    assert_eq!(config.wrong_way_probability, 0.5);
    assert_eq!(config.spawn_probability, 0.03);
    assert_eq!(config.max_recent_detections, 10);

    std::fs::write(&path, r#"{ "spawn_probability": 1.5 }"#).unwrap();
    assert!(SimConfig::from_json_file(&path).is_err());

    assert!(SimConfig::from_json_file(&dir.join("missing.json")).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_world_rejects_invalid_config() {
    let config = SimConfig {
        wrong_way_probability: 1.5,
        ..SimConfig::default()
    };
    assert!(SimWorld::with_config(config, Some(19)).is_err());

    let config = SimConfig {
        log_band_top: 300.0,
        log_band_bottom: 200.0,
        ..SimConfig::default()
    };
    assert!(SimWorld::with_config(config, None).is_err());

    assert!(SimWorld::with_config(SimConfig::default(), None).is_ok());
}

#[test]
fn test_wrong_way_rate_is_percentage_of_spawns() {
    let mut world = quiet_world(20);
    assert_eq!(world.stats.wrong_way_rate(), 0.0);

    for i in 0..8 {
        world.spawn_in_lane(i % 4, i % 4 == 0);
    }
    assert_eq!(world.stats.wrong_way_vehicles, 2);
    assert!((world.stats.wrong_way_rate() - 25.0).abs() < 1e-4);
}
