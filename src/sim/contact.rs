//! Contact classification and resolution.
//!
//! The engine reports an unordered pair of bodies per detected collision per
//! step. The pair is canonicalized by ascending category value so matching
//! is symmetric regardless of report order, then dispatched:
//!
//! 1. (Ball, Bottom) - life loss, suppressed while the grace window runs
//! 2. (Ball, Block)  - destruction, scoring, drop roll, win check
//! 3. (Paddle, PowerUp) - effect application and consumption
//!
//! Anything else has no rule and is dropped. Contacts arriving outside the
//! Playing phase are dropped as well.

use rand::Rng;

use super::RuleViolation;
use super::powerup;
use super::state::{GameEvent, GamePhase, GameSession};
use crate::config::Ruleset;
use crate::physics::{BodyId, Category, PhysicsWorld};

impl GameSession {
    /// Engine contact callback: one call per detected collision per step.
    ///
    /// Duplicate deliveries of the same logical collision resolve at most
    /// once: block and power-up lookups are id-keyed, and a life loss
    /// activates the grace window before the next delivery can land.
    pub fn on_contact(
        &mut self,
        world: &mut dyn PhysicsWorld,
        a: (BodyId, Category),
        b: (BodyId, Category),
    ) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let (first, second) = if a.1 <= b.1 { (a, b) } else { (b, a) };
        match (first.1, second.1) {
            (Category::Ball, Category::Bottom) => self.resolve_ball_loss(world),
            (Category::Ball, Category::Block) => self.resolve_block_hit(world, second.0),
            (Category::Paddle, Category::PowerUp) => self.resolve_power_up_catch(world, second.0),
            (lo, hi) => {
                log::trace!("{}", RuleViolation::UnknownContactPair(lo.bits(), hi.bits()));
            }
        }
    }

    /// Rule 1: the ball reached the bottom sentinel.
    fn resolve_ball_loss(&mut self, world: &mut dyn PhysicsWorld) {
        if self.grace.is_active() {
            return;
        }
        // Basic rules have no lives to spend; Arcade ends only at zero.
        if self.config.ruleset == Ruleset::Basic || self.lives == 0 {
            self.end_session(world, false);
            return;
        }
        self.lives -= 1;
        self.grace.trigger();
        let lives = self.lives;
        self.push_event(GameEvent::LivesChanged(lives));
        log::debug!("ball lost, {lives} lives left");
    }

    /// Rule 2: the ball struck a block.
    fn resolve_block_hit(&mut self, world: &mut dyn PhysicsWorld, id: BodyId) {
        // An id with no tracked block is a duplicate delivery.
        let Some(idx) = self.blocks.iter().position(|block| block.id == id) else {
            return;
        };
        let block = self.blocks.swap_remove(idx);
        world.remove_body(block.id);

        self.score += self.config.score_per_block;
        let score = self.score;
        self.push_event(GameEvent::ScoreChanged(score));
        self.push_event(GameEvent::BlockDestroyed {
            id: block.id,
            pos: block.pos,
        });

        if self.config.ruleset == Ruleset::Arcade && self.roll_drop_chance() {
            powerup::spawn(self, world, block.pos);
        }

        if self.blocks.is_empty() {
            self.end_session(world, true);
        }
    }

    fn roll_drop_chance(&mut self) -> bool {
        self.rng.random_range(0..100) < self.config.drop_chance_percent
    }

    /// Rule 3: the paddle caught a falling power-up. The pickup is consumed
    /// whether or not its effect survives the clamps.
    fn resolve_power_up_catch(&mut self, world: &mut dyn PhysicsWorld, id: BodyId) {
        let Some(idx) = self.power_ups.iter().position(|p| p.id == id) else {
            return;
        };
        let power_up = self.power_ups.swap_remove(idx);
        let applied = powerup::apply(self, world, power_up.kind);
        world.remove_body(power_up.id);
        self.push_event(GameEvent::PowerUpCollected {
            kind: power_up.kind,
            applied,
        });
    }
}
