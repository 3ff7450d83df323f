//! Headless driver: runs the simulation at a fixed 60 Hz under a scripted autopilot.
//!
//! Usage: `abyss [FRAMES]` (default 600), or `abyss --dump-config` to print
//! the active configuration as RON.

use anyhow::{Context, Result};
use engine_core::Time;
use game::{MissionState, OceanWorld, WorldConfig};
use input::ControlState;

const DEFAULT_FRAMES: u64 = 600;

/// Autopilot legs as (duration in seconds, controls). The script loops.
fn autopilot_legs() -> [(f32, ControlState); 5] {
    let idle = ControlState::idle();
    [
        (10.0, ControlState { descend: true, ..idle }),
        (8.0, ControlState { forward: true, ..idle }),
        (6.0, ControlState { forward: true, turn_left: true, ..idle }),
        (4.0, ControlState { light_on: false, ..idle }),
        (6.0, ControlState { forward: true, ascend: true, ..idle }),
    ]
}

fn autopilot(clock: f32) -> ControlState {
    let legs = autopilot_legs();
    let period: f32 = legs.iter().map(|(duration, _)| duration).sum();
    let mut t = clock % period;
    for (duration, controls) in legs {
        if t < duration {
            return controls;
        }
        t -= duration;
    }
    ControlState::idle()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let arg = std::env::args().nth(1);
    let config = WorldConfig::load();

    if arg.as_deref() == Some("--dump-config") {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    let frames = match arg {
        Some(a) => a
            .parse::<u64>()
            .with_context(|| format!("frame count must be an integer, got {:?}", a))?,
        None => DEFAULT_FRAMES,
    };

    let mut world = OceanWorld::new(config).context("failed to build world")?;
    let mut mission = MissionState::default();
    let mut clock = Time::new();

    log::info!(
        "Starting Abyss headless run: {} frames at {:.4}s per step",
        frames,
        clock.fixed_timestep_seconds()
    );

    for _ in 0..frames {
        clock.step_fixed();
        let controls = autopilot(clock.elapsed_seconds());
        world.tick(
            &controls,
            clock.delta_seconds(),
            clock.elapsed_seconds(),
            &mut mission,
        );
    }

    let vehicle = world.vehicle();
    log::info!(
        "{} frames, {:.1}s simulated: vehicle at ({:.2}, {:.2}, {:.2}) yaw {:.2}, {} sample(s) collected, {} remaining, leviathan {:?}",
        clock.frame_count(),
        clock.elapsed_seconds(),
        vehicle.position.x,
        vehicle.position.y,
        vehicle.position.z,
        vehicle.yaw,
        mission.samples_collected,
        world.samples_remaining(),
        world.leviathan().phase()
    );

    Ok(())
}
