use contraption_engine::{ContraptionData, Simulation};

const LANDER: &str = r#"{
    "components": [
        { "type": "seat", "position": [0, 0, 0], "rotation": 0 },
        { "type": "thruster", "position": [0, -1, 0], "rotation": 0 },
        { "type": "gyroscope", "position": [0, 1, 0], "rotation": 0 }
    ],
    "networkData": {
        "seat_0": { "thrusters": ["thruster_0"], "gyroscopes": ["gyroscope_0"] }
    }
}"#;

fn spawn(sim: &mut Simulation) -> u32 {
    sim.spawn_contraption(LANDER.to_string(), 0.0, 100.0, 0.0, 0.0, 0.0, 0.0, 1.0)
        .ok()
        .unwrap()
}

#[test]
fn piloted_lander_hovers_and_reports_state() {
    let mut sim = Simulation::new();
    sim.add_uniform_gravity(0.0, -9.82, 0.0);
    let id = spawn(&mut sim);
    sim.bind_seat(id, "seat_0".to_string()).ok().unwrap();
    let start = sim.position(id).unwrap();

    for _ in 0..60 {
        sim.step();
    }

    assert_eq!(sim.frame(), 60);
    assert_eq!(sim.position(id).unwrap(), start);
    assert_eq!(sim.velocity(id).unwrap(), vec![0.0, 0.0, 0.0]);
    // hovering uses part of the +Y capacity
    let levels = sim.thrust_levels(id).unwrap();
    assert!(levels[2] > 0.0 && levels[2] < 1.0);
    assert_eq!(levels[3], 0.0);
}

#[test]
fn save_json_round_trips_through_the_facade() {
    let mut sim = Simulation::new();
    let id = spawn(&mut sim);
    let saved = sim.serialize_contraption(id).unwrap();
    let data = ContraptionData::from_json(&saved).unwrap();

    let hostnames: Vec<_> = data
        .components
        .iter()
        .map(|c| c.hostname.as_deref().unwrap_or(""))
        .collect();
    assert_eq!(hostnames, vec!["seat_0", "thruster_0", "gyroscope_0"]);
    assert_eq!(data.network_data["seat_0"].thrusters, vec!["thruster_0"]);
    assert_eq!(data.network.hostname_indexes["thruster"], 1);

    assert!(sim.remove_contraption(id));
    assert_eq!(sim.contraption_count(), 0);
    let again = sim
        .spawn_contraption(saved.clone(), 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0)
        .ok()
        .unwrap();
    assert_eq!(sim.serialize_contraption(again).unwrap(), saved);
}

#[test]
fn build_action_adds_networked_part() {
    let mut sim = Simulation::new();
    let id = spawn(&mut sim);
    let added = sim
        .add_component(id, r#"{ "type": "thruster", "position": [2, 0, 0], "rotation": 8 }"#.to_string())
        .ok()
        .unwrap();
    assert_eq!(sim.component_count(), 4);

    let saved = ContraptionData::from_json(&sim.serialize_contraption(id).unwrap()).unwrap();
    let part = saved.components.iter().find(|c| c.id == Some(added)).unwrap();
    assert_eq!(part.hostname.as_deref(), Some("thruster_1"));
}
