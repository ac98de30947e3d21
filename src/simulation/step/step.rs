#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{PerfTimer, SimulationCore};

pub(super) fn step(sim: &mut SimulationCore) {
    let perf_on = sim.perf_enabled;
    if perf_on {
        sim.perf_stats.reset();
        // Snapshot pre-step counts
        sim.perf_stats.crafts = sim.systems.len() as u32;
        sim.perf_stats.components = sim.systems.component_count() as u32;
        sim.perf_stats.active_seats = sim
            .systems
            .crafts()
            .iter()
            .filter(|craft| craft.contraption.pilot_seat().is_some())
            .count() as u32;
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };
    let tick = sim.settings.tick();

    // === GRAVITY ===
    // Fills every body's accumulator; thrusters may consume part of it below.
    if perf_on {
        let ((), ms) = PerfTimer::time(|| accumulate_gravity(sim));
        sim.perf_stats.gravity_ms = ms;
    } else {
        accumulate_gravity(sim);
    }

    // === CONTROL ===
    if perf_on {
        let ((), ms) = PerfTimer::time(|| update_controls(sim, tick));
        sim.perf_stats.control_ms = ms;
    } else {
        update_controls(sim, tick);
    }

    // === INTEGRATION ===
    if perf_on {
        let ((), ms) = PerfTimer::time(|| integrate(sim, tick));
        sim.perf_stats.integrate_ms = ms;
    } else {
        integrate(sim, tick);
    }

    sim.frame += 1;

    if let Some(t0) = step_start {
        sim.perf_stats.step_ms = t0.elapsed_ms();
    }
}

fn accumulate_gravity(sim: &mut SimulationCore) {
    let gravity = &sim.gravity;
    if gravity.is_empty() {
        return;
    }
    let crafts = sim.systems.crafts_mut();
    #[cfg(feature = "parallel")]
    {
        crafts
            .par_iter_mut()
            .for_each(|craft| gravity.accumulate(&mut craft.body));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for craft in crafts.iter_mut() {
            gravity.accumulate(&mut craft.body);
        }
    }
}

fn update_controls(sim: &mut SimulationCore, tick: f64) {
    let crafts = sim.systems.crafts_mut();
    #[cfg(feature = "parallel")]
    {
        crafts.par_iter_mut().for_each(|craft| {
            craft.update_controls(tick);
        });
    }
    #[cfg(not(feature = "parallel"))]
    {
        for craft in crafts.iter_mut() {
            craft.update_controls(tick);
        }
    }
}

fn integrate(sim: &mut SimulationCore, tick: f64) {
    let crafts = sim.systems.crafts_mut();
    #[cfg(feature = "parallel")]
    {
        crafts
            .par_iter_mut()
            .for_each(|craft| craft.body.integrate(tick));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for craft in crafts.iter_mut() {
            craft.body.integrate(tick);
        }
    }
}
