//! Mineral samples and proximity pickup.
//!
//! Samples live in their own entity store; pickup despawns the entity, so a
//! sample can be counted at most once no matter how often the check runs.

use engine_core::{Collectible, Entity, Spin, Transform, TransformRaw, Vec3, World};

/// Live mineral samples.
pub struct CollectibleField {
    world: World,
}

impl CollectibleField {
    pub fn from_positions(positions: &[Vec3]) -> Self {
        let mut world = World::new();
        for &position in positions {
            world.spawn((Transform::from_position(position), Collectible, Spin::default()));
        }
        Self { world }
    }

    /// Number of samples still in the world.
    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    /// Cosmetic spin on every remaining sample.
    pub fn spin(&mut self, dt: f32) {
        for (_, (transform, spin)) in self.world.query_mut::<(&mut Transform, &Spin)>() {
            spin.apply(transform, dt);
        }
    }

    /// Transforms of the remaining samples.
    pub fn transforms(&self) -> Vec<Transform> {
        let mut query = self.world.query::<(&Transform, &Collectible)>();
        let transforms: Vec<Transform> = query.iter().map(|(_, (transform, _))| *transform).collect();
        transforms
    }

    /// Write GPU instance matrices into `out`, reusing its allocation.
    pub fn write_instances(&self, out: &mut Vec<TransformRaw>) {
        out.clear();
        let mut query = self.world.query::<(&Transform, &Collectible)>();
        out.extend(query.iter().map(|(_, (transform, _))| TransformRaw::from(transform)));
    }
}

/// Picks up samples within `radius` of the vehicle.
pub struct ProximityCollector {
    radius: f32,
    /// Reused between ticks.
    hits: Vec<Entity>,
}

impl ProximityCollector {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            hits: Vec::new(),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Remove every sample strictly closer than `radius` and return how many were removed.
    /// Without a vehicle position this tick is skipped.
    pub fn collect(&mut self, vehicle: Option<Vec3>, field: &mut CollectibleField) -> u32 {
        let Some(vehicle) = vehicle else {
            return 0;
        };

        self.hits.clear();
        {
            let mut query = field.world.query::<(&Transform, &Collectible)>();
            for (entity, (transform, _)) in query.iter() {
                if transform.position.distance(vehicle) < self.radius {
                    self.hits.push(entity);
                }
            }
        }

        let mut collected = 0;
        for entity in self.hits.drain(..) {
            if field.world.despawn(entity).is_ok() {
                log::debug!("sample {:?} collected", entity);
                collected += 1;
            }
        }
        collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLANE: f32 = -18.5;

    #[test]
    fn sample_within_radius_is_collected_once() {
        let mut field = CollectibleField::from_positions(&[Vec3::new(1.0, PLANE, 0.0)]);
        let mut collector = ProximityCollector::new(2.0);
        let vehicle = Some(Vec3::new(0.0, PLANE, 0.0));

        assert_eq!(collector.collect(vehicle, &mut field), 1);
        assert!(field.is_empty());
        assert_eq!(collector.collect(vehicle, &mut field), 0);
    }

    #[test]
    fn sample_outside_radius_is_untouched() {
        let far = Vec3::new(3.0, PLANE, 0.0);
        let mut field = CollectibleField::from_positions(&[far]);
        let mut collector = ProximityCollector::new(2.0);
        assert_eq!(collector.collect(Some(Vec3::new(0.0, PLANE, 0.0)), &mut field), 0);
        assert_eq!(field.len(), 1);
        assert_eq!(field.transforms()[0].position, far);
    }

    #[test]
    fn boundary_distance_is_not_a_pickup() {
        let mut field = CollectibleField::from_positions(&[Vec3::new(2.0, PLANE, 0.0)]);
        let mut collector = ProximityCollector::new(2.0);
        assert_eq!(collector.collect(Some(Vec3::new(0.0, PLANE, 0.0)), &mut field), 0);
    }

    #[test]
    fn simultaneous_pickups_are_aggregated() {
        let mut field = CollectibleField::from_positions(&[
            Vec3::new(0.5, PLANE, 0.0),
            Vec3::new(-0.5, PLANE, 0.5),
            Vec3::new(0.0, -18.0, 0.0),
            Vec3::new(10.0, PLANE, 10.0),
        ]);
        let mut collector = ProximityCollector::new(2.0);
        assert_eq!(collector.collect(Some(Vec3::new(0.0, -18.0, 0.0)), &mut field), 3);
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn missing_vehicle_skips_tick() {
        let mut field = CollectibleField::from_positions(&[Vec3::new(0.0, PLANE, 0.0)]);
        let mut collector = ProximityCollector::new(2.0);
        assert_eq!(collector.collect(None, &mut field), 0);
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn spin_keeps_samples_in_place() {
        let p = Vec3::new(4.0, PLANE, -2.0);
        let mut field = CollectibleField::from_positions(&[p]);
        field.spin(0.5);
        let t = field.transforms()[0];
        assert_eq!(t.position, p);
        assert_ne!(t.rotation, engine_core::Quat::IDENTITY);

        let mut raw = Vec::new();
        field.write_instances(&mut raw);
        assert_eq!(raw.len(), 1);
    }
}
