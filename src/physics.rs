//! Boundary with the hosting 2D physics/rendering engine.
//!
//! The engine owns gravity, velocity integration and broad-phase collision
//! detection; the core owns the rules. Bodies are registered with a category
//! bitmask and contact/collision masks at setup time and referenced by
//! opaque ids afterwards. The engine reports each detected collision back as
//! a pair of `(BodyId, Category)` through [`crate::sim::GameSession::on_contact`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Role tag for a physics body.
///
/// Declaration order matches ascending bitmask value, so sorting a contact
/// pair by category is stable regardless of which body the engine reports
/// first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    Ball,
    Bottom,
    Block,
    Paddle,
    PowerUp,
    Border,
}

impl Category {
    /// Engine bitmask value for this category.
    pub const fn bits(self) -> u32 {
        match self {
            Category::Ball => 1 << 0,
            Category::Bottom => 1 << 1,
            Category::Block => 1 << 2,
            Category::Paddle => 1 << 3,
            Category::PowerUp => 1 << 4,
            Category::Border => 1 << 5,
        }
    }
}

/// Everything the ball physically bounces off.
pub const BALL_COLLISION_MASK: u32 = Category::Bottom.bits()
    | Category::Block.bits()
    | Category::Paddle.bits()
    | Category::Border.bits();

/// The ball only raises contact events for losses and block hits.
pub const BALL_CONTACT_MASK: u32 = Category::Bottom.bits() | Category::Block.bits();

/// The paddle raises contact events for falling power-ups.
pub const PADDLE_CONTACT_MASK: u32 = Category::PowerUp.bits();

/// Falling power-ups pass through everything except the paddle.
pub const POWER_UP_COLLISION_MASK: u32 = Category::Paddle.bits();

/// Opaque engine handle for a registered body.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BodyId(pub u32);

/// Everything the engine needs to register a body.
#[derive(Debug, Clone)]
pub struct BodySpec {
    pub category: Category,
    /// Body center
    pub pos: Vec2,
    /// Full extents (width, height); circles use their bounding square
    pub size: Vec2,
    pub velocity: Vec2,
    /// Static sentinels (border, bottom, blocks, paddle) are not integrated
    pub dynamic: bool,
    /// Categories this body raises contact events for
    pub contact_mask: u32,
    /// Categories this body physically collides with
    pub collision_mask: u32,
}

impl BodySpec {
    /// A static body that neither moves nor raises contacts on its own.
    pub fn fixed(category: Category, pos: Vec2, size: Vec2) -> Self {
        Self {
            category,
            pos,
            size,
            velocity: Vec2::ZERO,
            dynamic: false,
            contact_mask: 0,
            collision_mask: 0,
        }
    }
}

/// The hosting physics/rendering engine, dependency-injected into the core.
///
/// One implementation per host: the real engine adapter in production, a
/// recording double in tests, a naive axis-aligned stepper in the headless
/// binary. Calls are synchronous; the core never defers a mutation.
pub trait PhysicsWorld {
    fn add_body(&mut self, spec: BodySpec) -> BodyId;
    fn remove_body(&mut self, id: BodyId);
    fn set_position(&mut self, id: BodyId, pos: Vec2);
    fn set_velocity(&mut self, id: BodyId, velocity: Vec2);
    /// Multiply the body's current velocity on both axes.
    fn scale_velocity(&mut self, id: BodyId, factor: f32);
    fn resize(&mut self, id: BodyId, size: Vec2);
    fn set_gravity(&mut self, gravity: Vec2);
    fn set_linear_damping(&mut self, id: BodyId, damping: f32);
}
