//! The simulated ocean: owns every component and steps them in a fixed order.
//!
//! Per tick: controls are sampled, the vehicle moves, the camera follows the
//! new vehicle pose, clock-driven actors advance, and finally samples near the
//! vehicle are collected and reported to the mission.

use engine_core::{Time, Transform, Visibility};
use input::ControlState;
use procgen::{
    derive_seed, generate_rock_field, scatter_creatures, scatter_samples, BasaltRockMesh,
    RockFieldConfig, RockPlacement, SeaSnowField, SeabedConfig, SeabedData, SeedStream,
    VentPlacement,
};

use crate::camera::{CameraRig, CameraState};
use crate::collector::{CollectibleField, ProximityCollector};
use crate::config::{ConfigError, WorldConfig};
use crate::creatures::{CombJelly, Creatures};
use crate::effects::{SeaSnow, VentPlumes};
use crate::flock::Swarm;
use crate::leviathan::{Leviathan, LeviathanPhase};
use crate::mission::MissionSink;
use crate::vehicle::{VehicleController, VehicleState};

/// Static seabed geometry, generated once.
#[derive(Debug, Clone)]
pub struct Seabed {
    pub terrain: SeabedData,
    pub rocks: Vec<RockPlacement>,
    /// Shared mesh instanced by every rock.
    pub rock_mesh: BasaltRockMesh,
    pub vents: Vec<VentPlacement>,
}

impl Seabed {
    pub fn generate(config: &WorldConfig) -> Self {
        let terrain = SeabedData::generate(SeabedConfig {
            seed: derive_seed(config.seed, SeedStream::Terrain),
            ..Default::default()
        });
        let ground = terrain.config.ground_height;
        let rocks = generate_rock_field(&RockFieldConfig {
            count: config.rock_count,
            ground_height: ground,
            seed: derive_seed(config.seed, SeedStream::Rocks),
            ..Default::default()
        });
        Self {
            terrain,
            rocks,
            rock_mesh: BasaltRockMesh::generate(derive_seed(config.seed, SeedStream::RockMesh)),
            vents: VentPlacement::default_layout(ground),
        }
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Samples picked up this tick.
    pub collected: u32,
    /// Set when the leviathan changed phase this tick.
    pub leviathan_transition: Option<LeviathanPhase>,
}

/// Read-only snapshot of everything the renderer draws.
pub struct FrameView<'a> {
    pub vehicle: Transform,
    pub propeller: Transform,
    pub spotlight: Visibility,
    pub camera: CameraState,
    pub swarms: &'a [Swarm],
    pub leviathan: Transform,
    pub leviathan_visibility: Visibility,
    pub samples: &'a CollectibleField,
    pub creatures: &'a [CombJelly],
    pub sea_snow: &'a SeaSnow,
    pub plumes: &'a VentPlumes,
    pub seabed: &'a Seabed,
}

/// The whole simulation.
pub struct OceanWorld {
    config: WorldConfig,
    time: Time,
    seabed: Seabed,
    vehicle_controller: VehicleController,
    vehicle: VehicleState,
    camera_rig: CameraRig,
    camera: CameraState,
    controls: ControlState,
    swarms: Vec<Swarm>,
    leviathan: Leviathan,
    creatures: Creatures,
    sea_snow: SeaSnow,
    plumes: VentPlumes,
    samples: CollectibleField,
    collector: ProximityCollector,
}

impl OceanWorld {
    /// Validate `config` and generate the world from its seed.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed;

        let seabed = Seabed::generate(&config);
        let vehicle_controller = VehicleController::new(config.vehicle.clone());
        let vehicle = vehicle_controller.spawn();
        let camera_rig = CameraRig::new(&config.camera);
        let camera = camera_rig.behind(&vehicle);

        let swarms: Vec<Swarm> = config.swarms.iter().cloned().map(Swarm::new).collect();
        let creatures = Creatures::new(&scatter_creatures(
            derive_seed(seed, SeedStream::Creatures),
            config.creature_count,
        ));
        let sea_snow = SeaSnow::new(SeaSnowField::generate(
            derive_seed(seed, SeedStream::SeaSnow),
            config.sea_snow_count,
        ));
        let plumes = VentPlumes::new(seabed.vents.clone());
        let samples = CollectibleField::from_positions(&scatter_samples(
            derive_seed(seed, SeedStream::Samples),
            config.collectible_count,
            config.collectible_extent,
        ));

        log::info!(
            "world seed {:#x}: {} rocks, {} swarms, {} creatures, {} samples",
            seed,
            seabed.rocks.len(),
            swarms.len(),
            creatures.jellies().len(),
            samples.len()
        );

        Ok(Self {
            time: Time::new(),
            vehicle_controller,
            vehicle,
            camera_rig,
            camera,
            controls: ControlState::default(),
            swarms,
            leviathan: Leviathan::new(&config.leviathan),
            creatures,
            sea_snow,
            plumes,
            samples,
            collector: ProximityCollector::new(config.pickup_radius),
            seabed,
            config,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn leviathan(&self) -> &Leviathan {
        &self.leviathan
    }

    pub fn samples_remaining(&self) -> usize {
        self.samples.len()
    }

    /// Advance one frame. `dt` is the frame length and `elapsed` the cumulative
    /// clock, both in seconds and both supplied by the caller.
    pub fn tick(
        &mut self,
        controls: &ControlState,
        dt: f32,
        elapsed: f32,
        mission: &mut impl MissionSink,
    ) -> TickReport {
        self.time.begin_frame(dt, elapsed);
        let dt = self.time.delta_seconds();
        let clock = self.time.elapsed_seconds();

        self.controls = *controls;

        self.vehicle = self
            .vehicle_controller
            .update(&self.vehicle, &self.controls, dt);
        self.camera = self
            .camera_rig
            .update(&self.camera, Some(&self.vehicle), dt);

        for swarm in &mut self.swarms {
            swarm.update(dt, clock);
        }
        let leviathan_transition = self.leviathan.update(dt, clock);
        if let Some(phase) = leviathan_transition {
            log::info!("leviathan {:?} at t = {:.1}s", phase, clock);
        }
        self.creatures.update(dt, clock);
        self.sea_snow.update(dt, clock);
        self.plumes.update(clock);
        self.samples.spin(dt);

        let collected = self
            .collector
            .collect(Some(self.vehicle.position), &mut self.samples);
        if collected > 0 {
            log::info!(
                "collected {} sample(s), {} remaining",
                collected,
                self.samples.len()
            );
            mission.samples_collected(collected);
        }

        TickReport {
            collected,
            leviathan_transition,
        }
    }

    /// Borrow the current frame for rendering.
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            vehicle: self.vehicle.transform(),
            propeller: self.vehicle.propeller_transform(),
            spotlight: Visibility::from_flag(self.controls.light_on),
            camera: self.camera,
            swarms: &self.swarms,
            leviathan: self.leviathan.transform(),
            leviathan_visibility: self.leviathan.visibility(),
            samples: &self.samples,
            creatures: self.creatures.jellies(),
            sea_snow: &self.sea_snow,
            plumes: &self.plumes,
            seabed: &self.seabed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::MissionState;
    use engine_core::Vec3;

    /// Records every delta it receives.
    #[derive(Default)]
    struct RecordingSink {
        deltas: Vec<u32>,
    }

    impl MissionSink for RecordingSink {
        fn samples_collected(&mut self, delta: u32) {
            self.deltas.push(delta);
        }
    }

    fn small_config() -> WorldConfig {
        WorldConfig {
            rock_count: 8,
            creature_count: 4,
            sea_snow_count: 50,
            ..Default::default()
        }
    }

    fn run(world: &mut OceanWorld, controls: &ControlState, frames: u32, sink: &mut impl MissionSink) {
        let dt = 1.0 / 60.0;
        for _ in 0..frames {
            let elapsed = world.time().elapsed_seconds() + dt;
            world.tick(controls, dt, elapsed, sink);
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = small_config();
        config.pickup_radius = -1.0;
        assert!(matches!(OceanWorld::new(config), Err(ConfigError::Invalid(_))));

        let mut config = small_config();
        config.swarms[0].speed = -15.0;
        assert!(matches!(OceanWorld::new(config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn same_seed_same_inputs_same_frame() {
        let controls = ControlState {
            forward: true,
            turn_left: true,
            ..ControlState::idle()
        };
        let mut a = OceanWorld::new(small_config()).unwrap();
        let mut b = OceanWorld::new(small_config()).unwrap();
        run(&mut a, &controls, 90, &mut MissionState::default());
        run(&mut b, &controls, 90, &mut MissionState::default());

        let (va, vb) = (a.view(), b.view());
        assert_eq!(va.vehicle, vb.vehicle);
        assert_eq!(va.camera, vb.camera);
        assert_eq!(va.swarms[3].members(), vb.swarms[3].members());
        assert_eq!(va.samples.transforms(), vb.samples.transforms());
        assert_eq!(va.seabed.rocks, vb.seabed.rocks);
    }

    #[test]
    fn camera_targets_vehicle_after_every_tick() {
        let mut world = OceanWorld::new(small_config()).unwrap();
        let controls = ControlState {
            forward: true,
            ascend: true,
            ..ControlState::idle()
        };
        let mut sink = MissionState::default();
        for frame in 1..=30 {
            world.tick(&controls, 1.0 / 60.0, frame as f32 / 60.0, &mut sink);
            assert_eq!(world.camera().target, world.vehicle().position);
        }
        assert!(world.vehicle().position.z > 0.0);
    }

    #[test]
    fn descending_onto_samples_reports_each_once() {
        let mut world = OceanWorld::new(WorldConfig {
            collectible_count: 5,
            collectible_extent: 0.5,
            ..small_config()
        })
        .unwrap();
        let descend = ControlState {
            descend: true,
            ..ControlState::idle()
        };
        let mut sink = RecordingSink::default();

        // 0 to -18 at 1.8 units per second takes ten seconds.
        run(&mut world, &descend, 660, &mut sink);

        assert_eq!(world.vehicle().position.y, -18.0);
        assert_eq!(world.samples_remaining(), 0);
        assert!(sink.deltas.iter().all(|&d| d > 0));
        assert_eq!(sink.deltas.iter().sum::<u32>(), 5);
    }

    #[test]
    fn idle_vehicle_at_spawn_collects_nothing() {
        let mut world = OceanWorld::new(small_config()).unwrap();
        let mut sink = RecordingSink::default();
        run(&mut world, &ControlState::idle(), 120, &mut sink);
        assert!(sink.deltas.is_empty());
        assert_eq!(world.samples_remaining(), 12);
        assert_eq!(world.vehicle().position, Vec3::ZERO);
    }

    #[test]
    fn spotlight_follows_control_flag() {
        let mut world = OceanWorld::new(small_config()).unwrap();
        let mut sink = MissionState::default();
        world.tick(&ControlState::default(), 1.0 / 60.0, 1.0 / 60.0, &mut sink);
        assert!(world.view().spotlight.is_visible());

        let dark = ControlState {
            light_on: false,
            ..ControlState::default()
        };
        world.tick(&dark, 1.0 / 60.0, 2.0 / 60.0, &mut sink);
        assert!(!world.view().spotlight.is_visible());
    }

    #[test]
    fn leviathan_wakes_once_clock_passes_threshold() {
        let mut world = OceanWorld::new(small_config()).unwrap();
        let mut sink = MissionState::default();
        // sin(t * 0.08) first exceeds 0.7 near t = 9.7s.
        let mut woke_at = None;
        for frame in 1..=900 {
            let report = world.tick(&ControlState::idle(), 1.0 / 60.0, frame as f32 / 60.0, &mut sink);
            if report.leviathan_transition == Some(LeviathanPhase::Active) {
                woke_at = Some(frame);
                break;
            }
            assert!(!world.view().leviathan_visibility.is_visible());
        }
        let frame = woke_at.expect("leviathan never woke");
        let t = frame as f32 / 60.0;
        assert!((t * 0.08).sin() > 0.7);
        assert!(((t - 1.0 / 60.0) * 0.08).sin() <= 0.7);
    }

    #[test]
    fn bad_frame_times_freeze_motion() {
        let mut world = OceanWorld::new(small_config()).unwrap();
        let forward = ControlState {
            forward: true,
            ..ControlState::idle()
        };
        let mut sink = MissionState::default();
        world.tick(&forward, f32::NAN, f32::NAN, &mut sink);
        world.tick(&forward, -1.0, 0.0, &mut sink);
        assert_eq!(world.vehicle().position, Vec3::ZERO);
        assert_eq!(world.time().frame_count(), 2);
    }

    #[test]
    fn view_exposes_generated_layout() {
        let world = OceanWorld::new(small_config()).unwrap();
        let view = world.view();
        assert_eq!(view.swarms.len(), 5);
        assert_eq!(view.creatures.len(), 4);
        assert_eq!(view.sea_snow.field().len(), 50);
        assert_eq!(view.plumes.vents().len(), 4);
        assert_eq!(view.seabed.rocks.len(), 8);
        assert_eq!(view.samples.len(), 12);
        assert_eq!(view.camera.target, Vec3::ZERO);
    }
}
