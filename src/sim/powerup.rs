//! Power-up spawning and effects.
//!
//! A destroyed block has a 10% chance (config) to drop a falling pickup;
//! the kind is drawn from a weighted partition of [1,100]. Catching one
//! with the paddle applies its effect, subject to the width clamps, and
//! consumes it either way.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::RuleViolation;
use super::state::{GameEvent, GameSession, PowerUp};
use crate::consts;
use crate::physics::{self, BodySpec, Category, PhysicsWorld};

/// The five pickup effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    PaddleGrow,
    PaddleShrink,
    BallSpeedUp,
    BallSpeedDown,
    ExtraLife,
}

impl PowerUpKind {
    /// Weighted partition of a [1,100] roll:
    /// [1,22] grow, [23,45] shrink, [46,66] speed up, [67,90] speed down,
    /// [91,100] extra life.
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            1..=22 => PowerUpKind::PaddleGrow,
            23..=45 => PowerUpKind::PaddleShrink,
            46..=66 => PowerUpKind::BallSpeedUp,
            67..=90 => PowerUpKind::BallSpeedDown,
            _ => PowerUpKind::ExtraLife,
        }
    }
}

/// Drop a falling pickup at a destroyed block's last position.
pub(crate) fn spawn(session: &mut GameSession, world: &mut dyn PhysicsWorld, pos: Vec2) {
    let kind = PowerUpKind::from_roll(session.rng.random_range(1..=100));
    let id = world.add_body(BodySpec {
        category: Category::PowerUp,
        pos,
        size: Vec2::splat(consts::POWER_UP_SIZE),
        velocity: Vec2::new(0.0, -session.config.power_up_fall_speed),
        dynamic: true,
        contact_mask: 0,
        collision_mask: physics::POWER_UP_COLLISION_MASK,
    });
    session.power_ups.push(PowerUp { id, kind, pos });
    session.push_event(GameEvent::PowerUpSpawned { id, kind, pos });
    log::debug!("power-up {kind:?} dropped at {pos}");
}

/// Apply a collected effect. Returns false when a clamp skipped it.
pub(crate) fn apply(
    session: &mut GameSession,
    world: &mut dyn PhysicsWorld,
    kind: PowerUpKind,
) -> bool {
    match kind {
        PowerUpKind::PaddleGrow => {
            let grown = session.paddle_width * session.config.paddle_grow_factor;
            let limit = session.config.arena_width * session.config.paddle_max_width_frac;
            // The resulting width must stay under the arena fraction.
            if grown >= limit {
                log::debug!(
                    "{}",
                    RuleViolation::InvalidClampRequest {
                        kind,
                        width: session.paddle_width,
                    }
                );
                return false;
            }
            session.paddle_width = grown;
            world.resize(
                session.paddle,
                Vec2::new(grown, session.config.paddle_height),
            );
            true
        }
        PowerUpKind::PaddleShrink => {
            // Shrinking stops once the current width is at the floor.
            if session.paddle_width <= session.config.paddle_min_width {
                log::debug!(
                    "{}",
                    RuleViolation::InvalidClampRequest {
                        kind,
                        width: session.paddle_width,
                    }
                );
                return false;
            }
            session.paddle_width *= session.config.paddle_shrink_factor;
            world.resize(
                session.paddle,
                Vec2::new(session.paddle_width, session.config.paddle_height),
            );
            true
        }
        PowerUpKind::BallSpeedUp => {
            world.scale_velocity(session.ball, session.config.ball_speed_up_factor);
            true
        }
        PowerUpKind::BallSpeedDown => {
            world.scale_velocity(session.ball, session.config.ball_speed_down_factor);
            true
        }
        PowerUpKind::ExtraLife => {
            session.lives += 1;
            let lives = session.lives;
            session.push_event(GameEvent::LivesChanged(lives));
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use crate::sim::testutil::RecordingWorld;

    fn session_pair() -> (GameSession, RecordingWorld) {
        let mut world = RecordingWorld::default();
        let config = GameConfig {
            min_rows: 1,
            max_rows: 1,
            min_blocks_per_row: 1,
            max_blocks_per_row: 1,
            ..GameConfig::default()
        };
        let session = GameSession::new(config, 9, &mut world);
        (session, world)
    }

    #[test]
    fn test_kind_partition_boundaries() {
        assert_eq!(PowerUpKind::from_roll(1), PowerUpKind::PaddleGrow);
        assert_eq!(PowerUpKind::from_roll(22), PowerUpKind::PaddleGrow);
        assert_eq!(PowerUpKind::from_roll(23), PowerUpKind::PaddleShrink);
        assert_eq!(PowerUpKind::from_roll(45), PowerUpKind::PaddleShrink);
        assert_eq!(PowerUpKind::from_roll(46), PowerUpKind::BallSpeedUp);
        assert_eq!(PowerUpKind::from_roll(66), PowerUpKind::BallSpeedUp);
        assert_eq!(PowerUpKind::from_roll(67), PowerUpKind::BallSpeedDown);
        assert_eq!(PowerUpKind::from_roll(90), PowerUpKind::BallSpeedDown);
        assert_eq!(PowerUpKind::from_roll(91), PowerUpKind::ExtraLife);
        assert_eq!(PowerUpKind::from_roll(100), PowerUpKind::ExtraLife);
    }

    #[test]
    fn test_kind_partition_weights() {
        let mut counts = [0u32; 5];
        for roll in 1..=100 {
            let idx = match PowerUpKind::from_roll(roll) {
                PowerUpKind::PaddleGrow => 0,
                PowerUpKind::PaddleShrink => 1,
                PowerUpKind::BallSpeedUp => 2,
                PowerUpKind::BallSpeedDown => 3,
                PowerUpKind::ExtraLife => 4,
            };
            counts[idx] += 1;
        }
        assert_eq!(counts, [22, 23, 21, 24, 10]);
    }

    #[test]
    fn test_spawn_registers_falling_body() {
        let (mut session, mut world) = session_pair();
        let pos = glam::Vec2::new(120.0, 500.0);
        spawn(&mut session, &mut world, pos);

        let pickup = &session.power_ups()[0];
        assert_eq!(pickup.pos, pos);
        let body = &world.bodies[&pickup.id];
        assert_eq!(body.category, Category::PowerUp);
        assert!(body.dynamic);
        assert_eq!(
            body.velocity,
            glam::Vec2::new(0.0, -crate::consts::POWER_UP_FALL_SPEED)
        );
        assert_eq!(body.collision_mask, physics::POWER_UP_COLLISION_MASK);
        assert!(matches!(
            session.drain_events().last(),
            Some(GameEvent::PowerUpSpawned { .. })
        ));
    }

    #[test]
    fn test_grow_clamp_boundary_case() {
        // paddle 100, arena 300: resulting 125 >= 120 so the grow is skipped.
        let (mut session, mut world) = session_pair();
        session.config.arena_width = 300.0;
        session.paddle_width = 100.0;

        assert!(!apply(&mut session, &mut world, PowerUpKind::PaddleGrow));
        assert_eq!(session.paddle_width(), 100.0);
        assert!(world.resizes.is_empty());
    }

    #[test]
    fn test_grow_applies_under_limit() {
        // paddle 80, arena 480: resulting 100 < 192 so the grow lands.
        let (mut session, mut world) = session_pair();
        assert!(apply(&mut session, &mut world, PowerUpKind::PaddleGrow));
        assert_eq!(session.paddle_width(), 100.0);
        let (id, size) = world.resizes.last().copied().expect("resize");
        assert_eq!(id, session.paddle);
        assert_eq!(size.x, 100.0);
    }

    #[test]
    fn test_shrink_respects_floor() {
        let (mut session, mut world) = session_pair();
        session.paddle_width = 40.0;
        assert!(!apply(&mut session, &mut world, PowerUpKind::PaddleShrink));
        assert_eq!(session.paddle_width(), 40.0);

        // Just above the floor the shrink applies, and may land below it.
        session.paddle_width = 41.0;
        assert!(apply(&mut session, &mut world, PowerUpKind::PaddleShrink));
        assert!((session.paddle_width() - 30.75).abs() < 1e-4);
    }

    #[test]
    fn test_speed_effects_scale_ball_velocity() {
        let (mut session, mut world) = session_pair();
        assert!(apply(&mut session, &mut world, PowerUpKind::BallSpeedUp));
        assert!(apply(&mut session, &mut world, PowerUpKind::BallSpeedDown));
        assert_eq!(
            world.velocity_scales,
            vec![(session.ball, 1.25), (session.ball, 0.75)]
        );
    }

    #[test]
    fn test_extra_life_increments_lives() {
        let (mut session, mut world) = session_pair();
        let before = session.lives();
        assert!(apply(&mut session, &mut world, PowerUpKind::ExtraLife));
        assert_eq!(session.lives(), before + 1);
        assert!(
            session
                .drain_events()
                .contains(&GameEvent::LivesChanged(before + 1))
        );
    }
}
