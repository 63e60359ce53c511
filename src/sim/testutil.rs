//! Test double for the engine boundary.

use std::collections::HashMap;

use glam::Vec2;

use crate::physics::{BodyId, BodySpec, PhysicsWorld};

/// Records every engine request so tests can assert on side effects.
#[derive(Default)]
pub(crate) struct RecordingWorld {
    next_id: u32,
    pub bodies: HashMap<BodyId, BodySpec>,
    pub removed: Vec<BodyId>,
    pub positions: Vec<(BodyId, Vec2)>,
    pub velocities: Vec<(BodyId, Vec2)>,
    pub velocity_scales: Vec<(BodyId, f32)>,
    pub resizes: Vec<(BodyId, Vec2)>,
    pub gravity: Option<Vec2>,
    pub damping: Vec<(BodyId, f32)>,
}

impl PhysicsWorld for RecordingWorld {
    fn add_body(&mut self, spec: BodySpec) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.insert(id, spec);
        id
    }

    fn remove_body(&mut self, id: BodyId) {
        self.bodies.remove(&id);
        self.removed.push(id);
    }

    fn set_position(&mut self, id: BodyId, pos: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.pos = pos;
        }
        self.positions.push((id, pos));
    }

    fn set_velocity(&mut self, id: BodyId, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.velocity = velocity;
        }
        self.velocities.push((id, velocity));
    }

    fn scale_velocity(&mut self, id: BodyId, factor: f32) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.velocity *= factor;
        }
        self.velocity_scales.push((id, factor));
    }

    fn resize(&mut self, id: BodyId, size: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.size = size;
        }
        self.resizes.push((id, size));
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = Some(gravity);
    }

    fn set_linear_damping(&mut self, id: BodyId, damping: f32) {
        self.damping.push((id, damping));
    }
}
