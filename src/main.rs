use bevy::log::LogPlugin;
use bevy::prelude::*;
use voltaics::voxel::{
    BlockEdits, BlockEntity, ConduitNode, Direction, EnergyConfig, EnergyWorld, HeatMachine,
    Lever, VoltaicPile, VoltaicsPlugin, TICK_RATE_HZ,
};

fn main() {
    // Parse tick count and step cap from command line or environment variables
    let config = parse_config();

    let mut app = App::new();
    app.insert_resource(config)
        .add_plugins((LogPlugin::default(), VoltaicsPlugin))
        .add_systems(Startup, (print_controls, spawn_demo_network));

    // First update runs Startup; the fixed ticks are driven manually below
    app.update();
    for _ in 0..config.ticks {
        app.world_mut().run_schedule(FixedUpdate);
    }

    report_network(app.world().resource::<EnergyWorld>(), config.ticks);
}

fn print_controls() {
    println!("=== Voltaics (headless) ===");
    println!("  --ticks, -t <n>    - Number of fixed ticks to simulate (VOLTAICS_TICKS)");
    println!("  --step-cap <n>     - Per-neighbor conduction cap (VOLTAICS_STEP_CAP)");
    println!();
}

/// Voltaic pile -> conduit line (with a lever on top) -> heat machine
fn spawn_demo_network(mut edits: ResMut<BlockEdits>) {
    edits.place(
        IVec3::ZERO,
        BlockEntity::VoltaicPile(VoltaicPile::new(Direction::East)),
    );
    for x in 1..=6 {
        edits.place(IVec3::new(x, 0, 0), BlockEntity::Conduit(ConduitNode::new()));
    }
    edits.place(IVec3::new(3, 1, 0), BlockEntity::Lever(Lever::default()));
    edits.place(
        IVec3::new(7, 0, 0),
        BlockEntity::HeatMachine(HeatMachine::default()),
    );
}

fn report_network(world: &EnergyWorld, ticks: u64) {
    info!(
        "Simulated {} ticks ({:.1}s at {} Hz), network holds {}J",
        ticks,
        ticks as f64 / TICK_RATE_HZ,
        TICK_RATE_HZ,
        world.total_stored()
    );

    for pos in world.conduit_positions() {
        let Some(node) = world.conduit(pos) else {
            continue;
        };
        let links: Vec<String> = Direction::ALL
            .iter()
            .map(|&dir| format!("{}={:?}", dir.key(), node.connection(dir)))
            .collect();
        info!(
            "Conduit {:?}: {}/{}J [{}]",
            pos,
            node.container.stored(),
            node.container.capacity(),
            links.join(" ")
        );
    }
}

fn parse_config() -> EnergyConfig {
    let args: Vec<String> = std::env::args().collect();
    let config = EnergyConfig::from_sources(&args, |key| std::env::var(key).ok());
    info!(
        "Using {} ticks, step cap {}J",
        config.ticks, config.step_cap
    );
    config
}
