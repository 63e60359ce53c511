//! Brickfall entry point: a headless soak run.
//!
//! There is no renderer here. A naive axis-aligned stepper stands in for
//! the physics engine and an auto-paddle plays the session, which exercises
//! the full rule set (state machine, contact resolution, power-ups) end to
//! end. Doubles as a reference host for the `PhysicsWorld` boundary.
//!
//! Usage: `brickfall [SEED] [CONFIG.json]` (RUST_LOG=debug for event logs)

use std::collections::BTreeMap;

use glam::Vec2;

use brickfall::GameConfig;
use brickfall::physics::{BodyId, BodySpec, Category, PhysicsWorld};
use brickfall::sim::{GamePhase, GameSession};

/// Fixed step matching a 120 Hz engine callback.
const STEP_DT: f32 = 1.0 / 120.0;
/// Cap so a degenerate session cannot spin forever (10 min of sim time).
const MAX_STEPS: u32 = 120 * 600;
/// Auto-paddle tracking speed (points/s).
const PADDLE_SPEED: f32 = 420.0;
/// Points-per-meter scale for the game-over gravity drop.
const GRAVITY_SCALE: f32 = 150.0;

struct HostBody {
    spec: BodySpec,
    damping: f32,
}

/// Minimal stand-in for a real 2D engine: integrates dynamic bodies,
/// bounces the ball off whatever its collision mask names, and reports the
/// contact pairs the contact masks ask for.
#[derive(Default)]
struct HeadlessWorld {
    next_id: u32,
    bodies: BTreeMap<BodyId, HostBody>,
    gravity: Vec2,
}

impl PhysicsWorld for HeadlessWorld {
    fn add_body(&mut self, spec: BodySpec) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.insert(id, HostBody { spec, damping: 0.0 });
        id
    }

    fn remove_body(&mut self, id: BodyId) {
        self.bodies.remove(&id);
    }

    fn set_position(&mut self, id: BodyId, pos: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.spec.pos = pos;
        }
    }

    fn set_velocity(&mut self, id: BodyId, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.spec.velocity = velocity;
        }
    }

    fn scale_velocity(&mut self, id: BodyId, factor: f32) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.spec.velocity *= factor;
        }
    }

    fn resize(&mut self, id: BodyId, size: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.spec.size = size;
        }
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn set_linear_damping(&mut self, id: BodyId, damping: f32) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.damping = damping;
        }
    }
}

impl HeadlessWorld {
    fn position_of(&self, category: Category) -> Option<Vec2> {
        self.bodies
            .values()
            .find(|b| b.spec.category == category)
            .map(|b| b.spec.pos)
    }

    fn overlap(a: &BodySpec, b: &BodySpec) -> bool {
        let d = (a.pos - b.pos).abs();
        d.x <= (a.size.x + b.size.x) / 2.0 && d.y <= (a.size.y + b.size.y) / 2.0
    }

    /// Integrate one step, bounce the ball, and report contact pairs.
    fn step(&mut self, dt: f32, arena: Vec2) -> Vec<((BodyId, Category), (BodyId, Category))> {
        for body in self.bodies.values_mut() {
            if !body.spec.dynamic {
                continue;
            }
            body.spec.velocity += self.gravity * GRAVITY_SCALE * dt;
            if body.damping > 0.0 {
                body.spec.velocity *= (1.0 - body.damping * dt).max(0.0);
            }
            body.spec.pos += body.spec.velocity * dt;
        }

        self.bounce_ball(arena);

        let ids: Vec<BodyId> = self.bodies.keys().copied().collect();
        let mut contacts = Vec::new();
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                let (spec_a, spec_b) = (&self.bodies[&a].spec, &self.bodies[&b].spec);
                let reported = spec_a.contact_mask & spec_b.category.bits() != 0
                    || spec_b.contact_mask & spec_a.category.bits() != 0;
                if reported && Self::overlap(spec_a, spec_b) {
                    contacts.push(((a, spec_a.category), (b, spec_b.category)));
                }
            }
        }
        contacts
    }

    /// Crude collision response for the ball: axis-aligned reflection off
    /// everything in its collision mask, walls included.
    fn bounce_ball(&mut self, arena: Vec2) {
        let Some((&ball_id, ball)) = self
            .bodies
            .iter()
            .find(|(_, b)| b.spec.category == Category::Ball)
        else {
            return;
        };
        let mask = ball.spec.collision_mask;
        let mut pos = ball.spec.pos;
        let mut vel = ball.spec.velocity;
        let half = ball.spec.size / 2.0;

        // Arena walls stand in for the Border edge loop.
        if mask & Category::Border.bits() != 0 {
            if (pos.x - half.x < 0.0 && vel.x < 0.0)
                || (pos.x + half.x > arena.x && vel.x > 0.0)
            {
                vel.x = -vel.x;
            }
            if pos.y + half.y > arena.y && vel.y > 0.0 {
                vel.y = -vel.y;
            }
            pos.x = pos.x.clamp(half.x, arena.x - half.x);
            pos.y = pos.y.min(arena.y - half.y);
        }

        for body in self.bodies.values() {
            let spec = &body.spec;
            if spec.category == Category::Ball || mask & spec.category.bits() == 0 {
                continue;
            }
            if !Self::overlap(&BodySpec { pos, ..ball.spec.clone() }, spec) {
                continue;
            }
            match spec.category {
                Category::Paddle => {
                    if vel.y < 0.0 {
                        // Reflect up with english from the hit offset.
                        let offset = (pos.x - spec.pos.x) / (spec.size.x / 2.0);
                        let speed = vel.length();
                        vel.y = -vel.y;
                        vel.x += offset * speed * 0.4;
                        vel = vel.normalize_or_zero() * speed;
                        pos.y = spec.pos.y + (spec.size.y + ball.spec.size.y) / 2.0;
                    }
                }
                Category::Block => {
                    vel.y = -vel.y;
                    let push = (spec.size.y + ball.spec.size.y) / 2.0;
                    pos.y = if vel.y > 0.0 {
                        spec.pos.y + push
                    } else {
                        spec.pos.y - push
                    };
                }
                Category::Bottom => {
                    if vel.y < 0.0 {
                        vel.y = -vel.y;
                    }
                }
                _ => {}
            }
        }

        if let Some(body) = self.bodies.get_mut(&ball_id) {
            body.spec.pos = pos;
            body.spec.velocity = vel;
        }
    }
}

fn run_session(config: GameConfig, seed: u64) -> (u32, bool) {
    let mut world = HeadlessWorld::default();
    let mut session = GameSession::new(config, seed, &mut world);
    let arena = Vec2::new(session.config().arena_width, session.config().arena_height);
    session.on_tap(&mut world);

    let mut steps = 0;
    while session.phase() != GamePhase::GameOver && steps < MAX_STEPS {
        // Auto-paddle: chase the ball's x at a bounded speed.
        if let Some(ball_pos) = world.position_of(Category::Ball) {
            let dx = ball_pos.x - session.paddle_position().x;
            let max = PADDLE_SPEED * STEP_DT;
            session.move_paddle(&mut world, dx.clamp(-max, max));
        }

        for (a, b) in world.step(STEP_DT, arena) {
            session.on_contact(&mut world, a, b);
        }
        session.on_frame(STEP_DT);

        for event in session.drain_events() {
            log::debug!("{event:?}");
        }
        steps += 1;
    }

    if steps >= MAX_STEPS {
        log::warn!("session hit the step cap without ending");
    }
    (session.score(), session.won().unwrap_or(false))
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2020);
    let config = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match GameConfig::from_json(&json) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("invalid config {path}: {err}");
                    std::process::exit(2);
                }
            },
            Err(err) => {
                eprintln!("cannot read {path}: {err}");
                std::process::exit(2);
            }
        },
        None => GameConfig::default(),
    };

    let (score, won) = run_session(config, seed);
    println!(
        "seed {seed}: score {score}, {}",
        if won { "won" } else { "lost" }
    );
}
