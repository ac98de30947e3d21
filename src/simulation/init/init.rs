use crate::systems::contraption_system::ContraptionSystem;
use crate::systems::gravity::GravityField;

use super::perf_stats::PerfStats;
use super::settings::SimSettings;
use super::SimulationCore;

pub(super) fn create_simulation_core(settings: SimSettings) -> SimulationCore {
    SimulationCore {
        systems: ContraptionSystem::new(),
        gravity: GravityField::new(),
        settings,
        frame: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
