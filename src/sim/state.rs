//! Session state and the game state machine.
//!
//! A [`GameSession`] owns the counters, the tracked entities and the phase
//! machine for one run. The hosting engine drives it through three entry
//! points: [`GameSession::on_contact`] (in `contact.rs`),
//! [`GameSession::on_frame`] and [`GameSession::on_tap`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::RuleViolation;
use super::level;
use super::powerup::PowerUpKind;
use super::timer::GraceTimer;
use crate::config::{GameConfig, Ruleset};
use crate::consts;
use crate::physics::{self, BodyId, BodySpec, Category, PhysicsWorld};

/// Current phase of a session. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No gameplay simulation; a tap starts play.
    WaitingForTap,
    /// Contact resolution and gameplay rules active.
    Playing,
    /// Terminal for the session. A tap requests a brand-new session.
    GameOver,
}

impl GamePhase {
    /// Transition legality table.
    pub fn allows(self, next: GamePhase) -> bool {
        matches!(
            (self, next),
            (GamePhase::WaitingForTap, GamePhase::Playing)
                | (GamePhase::Playing, GamePhase::GameOver)
                | (GamePhase::GameOver, GamePhase::WaitingForTap)
        )
    }
}

/// Block color variants. Cosmetic: a row shares one variant and gameplay
/// never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockColor {
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
}

impl BlockColor {
    /// Uniform mapping of a [1,100] roll onto the five variants.
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            1..=20 => BlockColor::Blue,
            21..=40 => BlockColor::Red,
            41..=60 => BlockColor::Green,
            61..=80 => BlockColor::Yellow,
            _ => BlockColor::Purple,
        }
    }
}

/// A destructible block tracked by the session.
#[derive(Debug, Clone)]
pub struct Block {
    pub id: BodyId,
    pub pos: Vec2,
    pub color: BlockColor,
}

/// A falling power-up awaiting collection (or falling out of the arena).
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: BodyId,
    pub kind: PowerUpKind,
    pub pos: Vec2,
}

/// Change notifications for the presentation layer.
///
/// The core never draws; it mutates plain counters and emits these into a
/// queue the host drains once per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    ScoreChanged(u32),
    LivesChanged(u32),
    BlockDestroyed { id: BodyId, pos: Vec2 },
    PowerUpSpawned { id: BodyId, kind: PowerUpKind, pos: Vec2 },
    /// `applied` is false when a width clamp skipped the effect.
    PowerUpCollected { kind: PowerUpKind, applied: bool },
    SessionEnded { won: bool },
    /// Tap received in GameOver: the host should construct a new session.
    RestartRequested,
}

/// One breakout session: counters, tracked entities and the state machine.
///
/// Owned exclusively by the host; every entry point completes synchronously
/// before returning, so no contact resolution is ever deferred.
pub struct GameSession {
    pub(crate) config: GameConfig,
    seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) phase: GamePhase,
    pub(crate) score: u32,
    pub(crate) lives: u32,
    /// Set on entry to GameOver.
    won: Option<bool>,
    pub(crate) grace: GraceTimer,
    pub(crate) blocks: Vec<Block>,
    pub(crate) power_ups: Vec<PowerUp>,
    pub(crate) ball: BodyId,
    pub(crate) paddle: BodyId,
    paddle_pos: Vec2,
    pub(crate) paddle_width: f32,
    pub(crate) bottom: BodyId,
    pub(crate) border: BodyId,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Build a fresh session: register the static sentinels, ball, paddle
    /// and a newly generated level with the engine, and enter WaitingForTap.
    pub fn new(config: GameConfig, seed: u64, world: &mut dyn PhysicsWorld) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        // Play happens without gravity; GameOver engages it for the drop.
        world.set_gravity(Vec2::ZERO);

        let arena_center = Vec2::new(config.arena_width / 2.0, config.arena_height / 2.0);
        let border = world.add_body(BodySpec::fixed(
            Category::Border,
            arena_center,
            Vec2::new(config.arena_width, config.arena_height),
        ));

        // Thin sensor strip along the arena floor; ball contact = loss.
        let bottom = world.add_body(BodySpec::fixed(
            Category::Bottom,
            Vec2::new(config.arena_width / 2.0, 0.5),
            Vec2::new(config.arena_width, 1.0),
        ));

        let paddle_pos = Vec2::new(config.arena_width / 2.0, consts::PADDLE_Y);
        let paddle = world.add_body(BodySpec {
            contact_mask: physics::PADDLE_CONTACT_MASK,
            ..BodySpec::fixed(
                Category::Paddle,
                paddle_pos,
                Vec2::new(config.paddle_width, config.paddle_height),
            )
        });

        let ball_pos =
            paddle_pos + Vec2::new(0.0, config.paddle_height / 2.0 + config.ball_radius + 2.0);
        let ball = world.add_body(BodySpec {
            category: Category::Ball,
            pos: ball_pos,
            size: Vec2::splat(config.ball_radius * 2.0),
            velocity: Vec2::ZERO,
            dynamic: true,
            contact_mask: physics::BALL_CONTACT_MASK,
            collision_mask: physics::BALL_COLLISION_MASK,
        });

        let blocks = level::generate_layout(&mut rng, &config)
            .into_iter()
            .map(|spec| {
                let id = world.add_body(BodySpec::fixed(
                    Category::Block,
                    spec.pos,
                    Vec2::new(config.block_width, config.block_height),
                ));
                Block {
                    id,
                    pos: spec.pos,
                    color: spec.color,
                }
            })
            .collect::<Vec<_>>();

        let lives = match config.ruleset {
            Ruleset::Arcade => config.starting_lives,
            Ruleset::Basic => 0,
        };
        let grace = GraceTimer::new(config.invulnerability_secs);
        let paddle_width = config.paddle_width;

        let mut session = Self {
            config,
            seed,
            rng,
            phase: GamePhase::WaitingForTap,
            score: 0,
            lives,
            won: None,
            grace,
            blocks,
            power_ups: Vec::new(),
            ball,
            paddle,
            paddle_pos,
            paddle_width,
            bottom,
            border,
            events: Vec::new(),
        };

        // Sync the HUD with the starting counters.
        session.push_event(GameEvent::ScoreChanged(0));
        session.push_event(GameEvent::LivesChanged(session.lives));
        log::info!(
            "session ready: seed={seed} blocks={} ruleset={:?}",
            session.blocks.len(),
            session.config.ruleset
        );
        session
    }

    // --- accessors ---

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// `None` until the session ends, then the outcome.
    pub fn won(&self) -> Option<bool> {
        self.won
    }

    pub fn is_invulnerable(&self) -> bool {
        self.grace.is_active()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    pub fn paddle_width(&self) -> f32 {
        self.paddle_width
    }

    /// Engine ids of the session-owned bodies, for hosts that route
    /// contacts by id.
    pub fn ball_body(&self) -> BodyId {
        self.ball
    }

    pub fn paddle_body(&self) -> BodyId {
        self.paddle
    }

    pub fn bottom_body(&self) -> BodyId {
        self.bottom
    }

    pub fn border_body(&self) -> BodyId {
        self.border
    }

    pub fn paddle_position(&self) -> Vec2 {
        self.paddle_pos
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Take all pending change notifications.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    // --- state machine ---

    /// Drive the phase machine. Illegal requests are rejected, never fatal.
    pub(crate) fn enter_phase(
        &mut self,
        world: &mut dyn PhysicsWorld,
        next: GamePhase,
    ) -> Result<(), RuleViolation> {
        if !self.phase.allows(next) {
            return Err(RuleViolation::IllegalTransition {
                from: self.phase,
                to: next,
            });
        }
        let from = self.phase;
        match next {
            GamePhase::Playing => {
                // Serve: kick the ball up-field at the configured speed.
                let dir = Vec2::new(0.6, 0.8);
                world.set_velocity(self.ball, dir * self.config.ball_launch_speed);
            }
            GamePhase::GameOver if from == GamePhase::Playing => {
                // Cosmetic drop: the ball falls and damps to a near-stop.
                // Guarded on the previous phase so a no-op transition can
                // never re-engage it.
                world.set_gravity(Vec2::new(0.0, consts::GAME_OVER_GRAVITY_Y));
                world.set_linear_damping(self.ball, consts::GAME_OVER_BALL_DAMPING);
            }
            _ => {}
        }
        self.phase = next;
        self.push_event(GameEvent::PhaseChanged { from, to: next });
        Ok(())
    }

    /// Terminate the session with an outcome. Only meaningful while Playing.
    pub(crate) fn end_session(&mut self, world: &mut dyn PhysicsWorld, won: bool) {
        match self.enter_phase(world, GamePhase::GameOver) {
            Ok(()) => {
                self.won = Some(won);
                self.push_event(GameEvent::SessionEnded { won });
                log::info!("game over: won={won} score={}", self.score);
            }
            Err(violation) => log::debug!("{violation}"),
        }
    }

    // --- input ---

    /// User input. WaitingForTap starts play; GameOver requests a restart
    /// (the host builds a new session); taps during play do nothing.
    pub fn on_tap(&mut self, world: &mut dyn PhysicsWorld) {
        match self.phase {
            GamePhase::WaitingForTap => {
                if let Err(violation) = self.enter_phase(world, GamePhase::Playing) {
                    log::debug!("{violation}");
                }
            }
            GamePhase::Playing => {}
            GamePhase::GameOver => self.push_event(GameEvent::RestartRequested),
        }
    }

    /// Per-frame callback from the engine; `dt` is the step delta in seconds.
    pub fn on_frame(&mut self, dt: f32) {
        self.grace.advance(dt);
    }

    /// Horizontal paddle drag, clamped to the arena edges.
    pub fn move_paddle(&mut self, world: &mut dyn PhysicsWorld, dx: f32) {
        let half = self.paddle_width / 2.0;
        self.paddle_pos.x = (self.paddle_pos.x + dx).clamp(half, self.config.arena_width - half);
        world.set_position(self.paddle, self.paddle_pos);
    }
}
