//! Simulated object registry
//!
//! Owns the bounded collection of simulated bodies plus the side set
//! of emitter bodies used for proximity effects. The registry is the
//! sole owner of object state; the external renderer holds only weak,
//! id-based references. Ids are unique for the registry lifetime.
//!
//! The non-emitter population is capped; inserting past the cap evicts
//! the oldest objects first. Emitters are exempt from eviction and
//! from grabbing, and their lifecycle ends only with an explicit
//! `remove` or `clear_all`.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::geometry::{Color, Vec3};

/// Maximum live non-emitter objects before eviction kicks in.
pub const OBJECT_CAPACITY: usize = 100;

/// Fixed display color for liquid objects.
pub const LIQUID_COLOR: Color = Color { r: 0.2, g: 0.8, b: 1.0 };
/// Fixed display color for emitters.
pub const EMITTER_COLOR: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

pub type ObjectId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Solid,
    Liquid,
    Emitter,
}

/// One simulated body. Position/velocity are mirrored from the
/// external physics integrator via `update`; tint and emissive are
/// written by the proximity engine.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SimObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub position: Vec3,
    pub velocity: Vec3,
    pub base_color: Color,
    pub tint: Color,
    pub emissive: f32,
    pub grabbed: bool,
}

/// Partial state merged by `ObjectRegistry::update`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectUpdate {
    pub position: Option<Vec3>,
    pub velocity: Option<Vec3>,
}

impl ObjectUpdate {
    pub fn position(position: Vec3) -> Self {
        Self { position: Some(position), velocity: None }
    }
}

pub struct ObjectRegistry {
    /// Insertion-ordered; eviction pops from the front.
    objects: Vec<SimObject>,
    emitters: HashSet<ObjectId>,
    next_id: ObjectId,
    capacity: usize,
    rng: StdRng,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        let mut seed_rng = rand::thread_rng();
        let seed: u64 = seed_rng.gen();
        Self::new_with_seed(seed)
    }

    /// Deterministic construction for bit-for-bit repeatable runs; the
    /// seed only affects solid hue assignment.
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            objects: Vec::new(),
            emitters: HashSet::new(),
            next_id: 1,
            capacity: OBJECT_CAPACITY,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a new object. Evicts oldest non-emitter objects first if
    /// the non-emitter population would exceed capacity.
    pub fn spawn(&mut self, kind: ObjectKind, position: Vec3, velocity: Option<Vec3>) -> ObjectId {
        if kind != ObjectKind::Emitter {
            while self.non_emitter_count() >= self.capacity {
                self.evict_oldest();
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        let base_color = match kind {
            ObjectKind::Liquid => LIQUID_COLOR,
            ObjectKind::Emitter => EMITTER_COLOR,
            ObjectKind::Solid => Color::from_hsv(self.rng.gen::<f32>(), 0.7, 0.9),
        };
        self.objects.push(SimObject {
            id,
            kind,
            position,
            velocity: velocity.unwrap_or_else(Vec3::zero),
            base_color,
            tint: base_color,
            emissive: 0.0,
            grabbed: false,
        });
        if kind == ObjectKind::Emitter {
            self.emitters.insert(id);
        }
        id
    }

    /// Merge partial state into an object. Unknown ids are a silent
    /// no-op, surfaced only as a debug signal.
    pub fn update(&mut self, id: ObjectId, update: ObjectUpdate) {
        match self.objects.iter_mut().find(|o| o.id == id) {
            Some(object) => {
                if let Some(position) = update.position {
                    object.position = position;
                }
                if let Some(velocity) = update.velocity {
                    object.velocity = velocity;
                }
            }
            None => log::debug!("update for unknown object id {id}"),
        }
    }

    /// Remove an object. If it is a registered emitter the emitter
    /// entry goes in the same operation, so no dangling reference can
    /// survive. Unknown ids are a silent no-op.
    pub fn remove(&mut self, id: ObjectId) {
        match self.objects.iter().position(|o| o.id == id) {
            Some(index) => {
                self.objects.remove(index);
                self.emitters.remove(&id);
            }
            None => log::debug!("remove for unknown object id {id}"),
        }
    }

    /// Atomically drop every object and every emitter registration.
    pub fn clear_all(&mut self) {
        self.objects.clear();
        self.emitters.clear();
    }

    pub fn get(&self, id: ObjectId) -> Option<&SimObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SimObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Full ordered list, oldest first, for the renderer contract.
    pub fn objects(&self) -> &[SimObject] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [SimObject] {
        &mut self.objects
    }

    pub fn is_emitter(&self, id: ObjectId) -> bool {
        self.emitters.contains(&id)
    }

    /// Live emitter positions, resolved by id lookup.
    pub fn emitter_positions(&self) -> Vec<Vec3> {
        self.objects
            .iter()
            .filter(|o| self.emitters.contains(&o.id))
            .map(|o| o.position)
            .collect()
    }

    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    pub fn non_emitter_count(&self) -> usize {
        self.objects.len() - self.emitters.len()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Drop the oldest non-emitter object. Emitters are never evicted
    /// implicitly.
    fn evict_oldest(&mut self) {
        if let Some(index) = self
            .objects
            .iter()
            .position(|o| !self.emitters.contains(&o.id))
        {
            self.objects.remove(index);
        }
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_hue_is_seed_deterministic() {
        let mut a = ObjectRegistry::new_with_seed(7);
        let mut b = ObjectRegistry::new_with_seed(7);
        let ia = a.spawn(ObjectKind::Solid, Vec3::zero(), None);
        let ib = b.spawn(ObjectKind::Solid, Vec3::zero(), None);
        assert_eq!(a.get(ia).unwrap().base_color, b.get(ib).unwrap().base_color);
    }

    #[test]
    fn eviction_skips_emitters() {
        let mut reg = ObjectRegistry::new_with_seed(1);
        let emitter = reg.spawn(ObjectKind::Emitter, Vec3::zero(), None);
        for _ in 0..OBJECT_CAPACITY + 10 {
            reg.spawn(ObjectKind::Solid, Vec3::zero(), None);
        }
        assert!(reg.get(emitter).is_some());
        assert_eq!(reg.non_emitter_count(), OBJECT_CAPACITY);
    }

    #[test]
    fn unknown_id_update_is_noop() {
        let mut reg = ObjectRegistry::new_with_seed(1);
        reg.update(42, ObjectUpdate::position(Vec3::new(1.0, 2.0, 3.0)));
        reg.remove(42);
        assert!(reg.is_empty());
    }
}
