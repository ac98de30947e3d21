use glam::{DQuat, DVec3};

use super::*;
use crate::domain::component::ComponentData;
use crate::domain::parts::PartKind;
use crate::domain::save::{ContraptionData, SeatLink};
use crate::systems::control::ControlInput;
use crate::systems::gravity::GravitySource;

const EARTH: DVec3 = DVec3::new(0.0, -9.82, 0.0);

fn two_blocks() -> ContraptionData {
    ContraptionData::new(vec![
        ComponentData::new(PartKind::Block, [0.0, 0.0, 0.0], 0),
        ComponentData::new(PartKind::Block, [1.0, 0.0, 0.0], 0),
    ])
}

/// Seat with a single thruster pushing along +Y
fn lander() -> ContraptionData {
    let mut data = ContraptionData::new(vec![
        ComponentData::new(PartKind::Seat, [0.0, 0.0, 0.0], 0),
        ComponentData::new(PartKind::Thruster, [0.0, -1.0, 0.0], 0),
    ]);
    data.network_data.insert(
        "seat_0".to_string(),
        SeatLink {
            thrusters: vec!["thruster_0".to_string()],
            gyroscopes: Vec::new(),
        },
    );
    data
}

/// Seat with opposing thrusters on X
fn shuttle() -> ContraptionData {
    let mut data = ContraptionData::new(vec![
        ComponentData::new(PartKind::Seat, [0.0, 0.0, 0.0], 0),
        ComponentData::new(PartKind::Thruster, [1.0, 0.0, 0.0], 8),
        ComponentData::new(PartKind::Thruster, [-1.0, 0.0, 0.0], 12),
    ]);
    data.network_data.insert(
        "seat_0".to_string(),
        SeatLink {
            thrusters: vec!["thruster_0".to_string(), "thruster_1".to_string()],
            gyroscopes: Vec::new(),
        },
    );
    data
}

fn spawn(sim: &mut SimulationCore, data: &ContraptionData) -> u32 {
    sim.spawn_contraption(data, DVec3::ZERO, DQuat::IDENTITY)
        .unwrap()
        .id
}

#[test]
fn unpiloted_craft_falls_freely() {
    let mut sim = SimulationCore::new();
    sim.add_gravity(GravitySource::uniform(EARTH));
    let id = spawn(&mut sim, &two_blocks());

    sim.step();

    assert_eq!(sim.frame(), 1);
    let body = &sim.contraptions().get(id).unwrap().body;
    assert!((body.velocity.y - (-9.82 / 60.0)).abs() < 1e-12);
    assert_eq!(body.total_gravity, DVec3::ZERO);
}

#[test]
fn bound_lander_hovers_under_gravity() {
    let mut sim = SimulationCore::new();
    sim.add_gravity(GravitySource::uniform(EARTH));
    let id = spawn(&mut sim, &lander());
    sim.bind_seat(id, "seat_0").unwrap();
    let start = sim.contraptions().get(id).unwrap().body.position;

    for _ in 0..120 {
        sim.step();
    }

    let body = &sim.contraptions().get(id).unwrap().body;
    assert_eq!(body.velocity, DVec3::ZERO);
    assert_eq!(body.position, start);
}

#[test]
fn detached_lander_falls() {
    let mut sim = SimulationCore::new();
    sim.add_gravity(GravitySource::uniform(EARTH));
    let id = spawn(&mut sim, &lander());
    sim.bind_seat(id, "seat_0").unwrap();
    sim.step();
    assert_eq!(sim.detach_seat(id).unwrap(), Some("seat_0".to_string()));

    sim.step();

    let body = &sim.contraptions().get(id).unwrap().body;
    assert!(body.velocity.y < 0.0);
}

#[test]
fn input_accelerates_and_dampeners_stop() {
    let mut sim = SimulationCore::new();
    let id = spawn(&mut sim, &shuttle());
    sim.bind_seat(id, "seat_0").unwrap();

    // 2000 N on 160 kg for one tick
    sim.set_input(id, ControlInput::linear(DVec3::X));
    sim.step();
    let vx = sim.contraptions().get(id).unwrap().body.velocity.x;
    assert!((vx - 2000.0 / 160.0 / 60.0).abs() < 1e-9);

    sim.set_input(id, ControlInput::default());
    for _ in 0..3 {
        sim.step();
    }
    let body = &sim.contraptions().get(id).unwrap().body;
    assert!(body.velocity.length() < 1e-9);
}

#[test]
fn drift_continues_with_dampeners_off() {
    let mut sim = SimulationCore::new();
    let id = spawn(&mut sim, &shuttle());
    sim.bind_seat(id, "seat_0").unwrap();
    assert!(sim.set_dampeners(id, false));

    sim.set_input(id, ControlInput::linear(DVec3::X));
    sim.step();
    sim.set_input(id, ControlInput::default());
    let before = sim.contraptions().get(id).unwrap().body.velocity;
    sim.step();
    let after = sim.contraptions().get(id).unwrap().body.velocity;

    assert!(before.x > 0.0);
    assert_eq!(before, after);
}

#[test]
fn spawn_applies_default_controls() {
    let settings = SimSettings {
        default_sensitivity: 0.5,
        default_dampeners: false,
        ..SimSettings::default()
    };
    let mut sim = SimulationCore::with_settings(settings);
    let id = spawn(&mut sim, &shuttle());
    sim.bind_seat(id, "seat_0").unwrap();

    let contraption = &sim.contraptions().get(id).unwrap().contraption;
    assert_eq!(contraption.thrust().sensitivity(), 0.5);
    assert!(!contraption.thrust().dampeners());
    assert!(!contraption.gyro().dampeners());
    assert!(contraption.thrust().is_active());
}

#[test]
fn crafts_do_not_affect_each_other() {
    let mut sim = SimulationCore::new();
    let piloted = spawn(&mut sim, &shuttle());
    let parked = sim
        .spawn_contraption(&two_blocks(), DVec3::new(50.0, 0.0, 0.0), DQuat::IDENTITY)
        .unwrap()
        .id;
    sim.bind_seat(piloted, "seat_0").unwrap();
    sim.set_input(piloted, ControlInput::linear(DVec3::X));

    for _ in 0..10 {
        sim.step();
    }

    assert!(sim.contraptions().get(piloted).unwrap().body.velocity.x > 0.0);
    assert_eq!(sim.contraptions().get(parked).unwrap().body.velocity, DVec3::ZERO);
}

#[test]
fn unknown_contraption_commands_are_refused() {
    let mut sim = SimulationCore::new();
    assert!(!sim.set_input(4, ControlInput::default()));
    assert!(!sim.set_dampeners(4, true));
    assert!(!sim.set_sensitivity(4, 1.0));
    assert!(!sim.remove_contraption(4));
    assert!(sim.bind_seat(4, "seat_0").is_err());
    assert!(sim.serialize_contraption(4).is_none());
}

#[test]
fn clear_resets_world() {
    let mut sim = SimulationCore::new();
    sim.add_gravity(GravitySource::uniform(EARTH));
    spawn(&mut sim, &two_blocks());
    sim.step();

    sim.clear();

    assert_eq!(sim.frame(), 0);
    assert!(sim.contraptions().is_empty());
    assert!(sim.gravity().is_empty());
    assert_eq!(spawn(&mut sim, &two_blocks()), 1);
}

#[test]
fn perf_stats_snapshot_counts() {
    let mut sim = SimulationCore::new();
    spawn(&mut sim, &two_blocks());
    let id = spawn(&mut sim, &shuttle());
    sim.bind_seat(id, "seat_0").unwrap();

    sim.step();
    assert_eq!(sim.get_perf_stats().crafts(), 0);

    sim.enable_perf_metrics(true);
    sim.step();
    let stats = sim.get_perf_stats();
    assert_eq!(stats.crafts(), 2);
    assert_eq!(stats.components(), 5);
    assert_eq!(stats.active_seats(), 1);
    assert!(stats.step_ms() >= stats.control_ms());
}

#[test]
fn saved_craft_respawns_identically() {
    let mut sim = SimulationCore::new();
    let id = spawn(&mut sim, &shuttle());
    let saved = sim.serialize_contraption(id).unwrap();
    // component ids are world-unique, so the original has to go first
    assert!(sim.remove_contraption(id));

    let copy = spawn(&mut sim, &saved);
    let again = sim.serialize_contraption(copy).unwrap();

    let identity = |data: &ContraptionData| {
        data.components
            .iter()
            .map(|c| (c.id, c.hostname.clone(), c.rotation))
            .collect::<Vec<_>>()
    };
    assert_eq!(identity(&saved), identity(&again));
    assert_eq!(saved.network_data, again.network_data);
    assert_eq!(saved.network, again.network);
}
