use crate::config::{ArenaConfig, ConfigError};
use arena_common::{Aabb, Axis, Transform};
use arena_input::InputState;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The controllable cube.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    position: Vec3,
    velocity: Vec3,
    half_extents: Vec3,
    bounds: Aabb,
}

impl Actor {
    fn new(position: Vec3, size: f32) -> Self {
        let half_extents = Vec3::splat(size / 2.0);
        Self {
            position,
            velocity: Vec3::ZERO,
            half_extents,
            bounds: Aabb::from_center_half_extents(position, half_extents),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Bounding box at the current position.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn transform(&self) -> Transform {
        Transform {
            scale: self.half_extents * 2.0,
            ..Transform::from_position(self.position)
        }
    }

    fn move_to(&mut self, position: Vec3) {
        self.position = position;
        self.bounds = Aabb::from_center_half_extents(position, self.half_extents);
    }
}

/// A static boundary wall. Its bounds are fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    transform: Transform,
    dimensions: Vec3,
    bounds: Aabb,
}

impl Wall {
    pub fn new(transform: Transform, dimensions: Vec3) -> Self {
        Self {
            transform,
            dimensions,
            bounds: Aabb::from_oriented_box(&transform, dimensions),
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn dimensions(&self) -> Vec3 {
        self.dimensions
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }
}

/// Per-axis input suppression after a bounce, in seconds.
///
/// Kept in `f64` so the countdown lands on zero on the same frame as a
/// double-precision clock would.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    pub x: f64,
    pub z: f64,
}

impl Cooldown {
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Z => self.z,
        }
    }

    pub fn is_active(&self, axis: Axis) -> bool {
        self.get(axis) > 0.0
    }

    fn set(&mut self, axis: Axis, secs: f64) {
        match axis {
            Axis::X => self.x = secs,
            Axis::Z => self.z = secs,
        }
    }

    fn tick(&mut self, dt: f64) {
        self.x = (self.x - dt).max(0.0);
        self.z = (self.z - dt).max(0.0);
    }
}

/// Velocity change on one axis caused by hitting a wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounce {
    pub axis: Axis,
    pub before: f32,
    pub after: f32,
}

/// What a single step did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The displacement was committed.
    Moved { displacement: Vec3 },
    /// The displacement would have overlapped `wall` and was discarded.
    /// `bounces` lists the axes whose velocity was reflected; it can be
    /// empty when no axis was heading toward the wall center.
    Blocked { wall: usize, bounces: Vec<Bounce> },
}

impl StepOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, StepOutcome::Moved { .. })
    }
}

/// An event record produced by every step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArenaEvent {
    /// The arena advanced to `tick` reading `input`.
    Stepped { tick: u64, input: InputState },
    /// The actor moved between two positions.
    Moved { tick: u64, from: Vec3, to: Vec3 },
    /// The actor's move was rejected by a wall.
    Blocked {
        tick: u64,
        wall: usize,
        bounces: Vec<Bounce>,
    },
}

/// The authoritative arena state: one actor, fixed walls, cooldowns.
///
/// All mutations go through [`Arena::step`]. The arena knows nothing about
/// rendering; renderers read [`Arena::actor`] and [`Arena::walls`].
#[derive(Debug, Clone)]
pub struct Arena {
    config: ArenaConfig,
    actor: Actor,
    walls: Vec<Wall>,
    cooldown: Cooldown,
    tick: u64,
    last_outcome: Option<StepOutcome>,
    /// Append-only log of step events.
    events: Vec<ArenaEvent>,
}

impl Default for Arena {
    fn default() -> Self {
        Self::build(ArenaConfig::default())
    }
}

impl Arena {
    /// Build the arena from a validated configuration.
    pub fn new(config: ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ArenaConfig) -> Self {
        let walls = config
            .layout
            .walls()
            .into_iter()
            .map(|(transform, dims)| Wall::new(transform, dims))
            .collect();
        Self {
            actor: Actor::new(config.layout.actor_start(), config.layout.actor_size),
            config,
            walls,
            cooldown: Cooldown::default(),
            tick: 0,
            last_outcome: None,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn cooldown(&self) -> Cooldown {
        self.cooldown
    }

    /// Number of steps taken.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn last_outcome(&self) -> Option<&StepOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn events(&self) -> &[ArenaEvent] {
        &self.events
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<ArenaEvent> {
        std::mem::take(&mut self.events)
    }

    /// Teleport the actor. Used to stage scenarios.
    pub fn place_actor(&mut self, position: Vec3) {
        self.actor.move_to(position);
    }

    /// Overwrite the actor velocity. Used to stage scenarios.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.actor.velocity = velocity;
    }

    /// Advance the arena by one fixed timestep.
    pub fn step(&mut self, input: &InputState) -> StepOutcome {
        let _span = tracing::trace_span!("arena_step", tick = self.tick + 1).entered();
        self.tick += 1;
        self.events.push(ArenaEvent::Stepped {
            tick: self.tick,
            input: *input,
        });

        self.cooldown.tick(self.config.motion.timestep_secs);
        self.steer(input);

        let displacement = self.actor.velocity * self.config.motion.speed;
        let outcome = match self.collide(displacement) {
            Some((wall, bounces)) => {
                self.events.push(ArenaEvent::Blocked {
                    tick: self.tick,
                    wall,
                    bounces: bounces.clone(),
                });
                StepOutcome::Blocked { wall, bounces }
            }
            None => {
                let from = self.actor.position;
                self.actor.move_to(from + displacement);
                self.events.push(ArenaEvent::Moved {
                    tick: self.tick,
                    from,
                    to: self.actor.position,
                });
                StepOutcome::Moved { displacement }
            }
        };
        self.last_outcome = Some(outcome.clone());
        outcome
    }

    /// Set or decay the velocity on each axis from the held keys.
    ///
    /// Up beats Down and Left beats Right. An axis in cooldown ignores
    /// input and keeps decaying.
    fn steer(&mut self, input: &InputState) {
        let m = self.config.motion;
        for axis in Axis::ALL {
            let (negative, positive) = match axis {
                Axis::X => (input.left, input.right),
                Axis::Z => (input.up, input.down),
            };
            let ready = !self.cooldown.is_active(axis);
            let v = axis.of_mut(&mut self.actor.velocity);
            if negative && ready {
                *v = -m.acceleration;
            } else if positive && ready {
                *v = m.acceleration;
            } else {
                *v *= m.decay;
            }
        }
    }

    /// Test `displacement` against the walls in order.
    ///
    /// On the first overlap, every axis whose velocity points from the
    /// actor's current position toward the wall center is reflected and
    /// attenuated and its cooldown restarted. This happens even though the
    /// caller then discards the displacement. Returns the wall index and
    /// the bounces, or `None` if the path is clear.
    pub fn collide(&mut self, displacement: Vec3) -> Option<(usize, Vec<Bounce>)> {
        let candidate = self.actor.bounds.translated(displacement);
        let wall = self
            .walls
            .iter()
            .position(|w| candidate.intersects(w.bounds()))?;

        let center = self.walls[wall].bounds.center();
        let m = self.config.motion;
        let mut bounces = Vec::new();
        for axis in Axis::ALL {
            let pos = axis.of(self.actor.position);
            let c = axis.of(center);
            let v = axis.of_mut(&mut self.actor.velocity);
            let toward = (*v > 0.0 && pos < c) || (*v < 0.0 && pos > c);
            if toward {
                let before = *v;
                *v = -before * m.bounce_factor;
                self.cooldown.set(axis, m.cooldown_secs);
                tracing::debug!(%axis, wall, before, after = *v, "actor bounced");
                bounces.push(Bounce {
                    axis,
                    before,
                    after: *v,
                });
            }
        }
        Some((wall, bounces))
    }

    /// Re-run a per-frame input sequence from a fresh arena.
    pub fn replay(config: ArenaConfig, inputs: &[InputState]) -> Result<Self, ConfigError> {
        let mut arena = Self::new(config)?;
        for input in inputs {
            arena.step(input);
        }
        Ok(arena)
    }

    /// Deterministic FNV-1a hash of the simulation state.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.tick.to_le_bytes());
        let p = self.actor.position;
        let v = self.actor.velocity;
        for f in [p.x, p.y, p.z, v.x, v.y, v.z] {
            mix(&mut h, &f.to_le_bytes());
        }
        for f in [self.cooldown.x, self.cooldown.z] {
            mix(&mut h, &f.to_le_bytes());
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_input::Key;

    const EPS: f32 = 1e-5;

    fn near(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn arena_starts_at_rest() {
        let arena = Arena::default();
        assert_eq!(arena.tick(), 0);
        assert_eq!(arena.actor().position(), Vec3::new(0.0, 1.5, 0.0));
        assert_eq!(arena.actor().velocity(), Vec3::ZERO);
        assert_eq!(arena.walls().len(), 4);
        assert_eq!(arena.cooldown(), Cooldown::default());
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = ArenaConfig::default();
        config.motion.bounce_factor = 1.5;
        assert!(Arena::new(config).is_err());
    }

    #[test]
    fn actor_bounds_follow_position() {
        let mut arena = Arena::default();
        arena.place_actor(Vec3::new(2.0, 1.5, -3.0));
        let b = arena.actor().bounds();
        assert_eq!(b.center(), Vec3::new(2.0, 1.5, -3.0));
        assert_eq!(b.size(), Vec3::ONE);
    }

    #[test]
    fn held_key_sets_full_velocity() {
        let mut arena = Arena::default();
        let outcome = arena.step(&InputState::holding(&[Key::Up, Key::Right]));
        assert_eq!(arena.actor().velocity(), Vec3::new(3.0, 0.0, -3.0));
        assert!(outcome.moved());
        assert!(near(arena.actor().position().z, -0.3));
        assert!(near(arena.actor().position().x, 0.3));
    }

    #[test]
    fn up_beats_down_and_left_beats_right() {
        let mut arena = Arena::default();
        arena.step(&InputState::holding(&Key::ALL));
        assert_eq!(arena.actor().velocity(), Vec3::new(-3.0, 0.0, -3.0));
    }

    #[test]
    fn released_keys_decay_velocity() {
        let mut arena = Arena::default();
        arena.step(&InputState::holding(&[Key::Down]));
        arena.step(&InputState::new());
        assert!(near(arena.actor().velocity().z, 3.0 * 0.91));
        arena.step(&InputState::new());
        assert!(near(arena.actor().velocity().z, 3.0 * 0.91 * 0.91));
    }

    #[test]
    fn collide_reflects_velocity_toward_wall() {
        let mut arena = Arena::default();
        arena.place_actor(Vec3::new(0.0, 1.5, -13.7));
        arena.set_velocity(Vec3::new(0.0, 0.0, -5.0));

        let (wall, bounces) = arena.collide(Vec3::new(0.0, 0.0, -0.5)).unwrap();
        assert_eq!(wall, 1);
        assert_eq!(bounces.len(), 1);
        assert_eq!(bounces[0].axis, Axis::Z);
        assert!(near(arena.actor().velocity().z, 4.0));
        assert!((arena.cooldown().z - 0.5).abs() < 1e-9);
        assert_eq!(arena.cooldown().x, 0.0);
        assert_eq!(arena.actor().position(), Vec3::new(0.0, 1.5, -13.7));
    }

    #[test]
    fn collide_clear_path_changes_nothing() {
        let mut arena = Arena::default();
        arena.set_velocity(Vec3::new(0.0, 0.0, -5.0));
        assert!(arena.collide(Vec3::new(0.0, 0.0, -0.5)).is_none());
        assert_eq!(arena.actor().velocity().z, -5.0);
        assert_eq!(arena.cooldown(), Cooldown::default());
    }

    #[test]
    fn collide_moving_away_records_no_bounce() {
        let mut arena = Arena::default();
        arena.place_actor(Vec3::new(0.0, 1.5, -13.9));
        arena.set_velocity(Vec3::new(0.0, 0.0, 1.0));
        // Overlap forced by a displacement that disagrees with velocity.
        let (_, bounces) = arena.collide(Vec3::new(0.0, 0.0, -1.0)).unwrap();
        assert!(bounces.is_empty());
        assert_eq!(arena.actor().velocity().z, 1.0);
        assert_eq!(arena.cooldown().z, 0.0);
    }

    #[test]
    fn blocked_step_keeps_position_and_bounces() {
        let mut arena = Arena::default();
        arena.place_actor(Vec3::new(0.0, 1.5, -13.7));
        arena.set_velocity(Vec3::new(0.0, 0.0, -5.0));

        let outcome = arena.step(&InputState::new());
        assert!(matches!(outcome, StepOutcome::Blocked { wall: 1, .. }));
        assert_eq!(arena.actor().position(), Vec3::new(0.0, 1.5, -13.7));
        // Decayed first, then reflected.
        assert!(near(arena.actor().velocity().z, 5.0 * 0.91 * 0.8));
        assert!((arena.cooldown().z - 0.5).abs() < 1e-9);
    }

    #[test]
    fn cooldown_suppresses_input_on_that_axis_only() {
        let mut arena = Arena::default();
        arena.place_actor(Vec3::new(0.0, 1.5, -13.7));
        arena.set_velocity(Vec3::new(0.0, 0.0, -5.0));
        arena.step(&InputState::new());
        let after_bounce = arena.actor().velocity().z;

        arena.step(&InputState::holding(&[Key::Up, Key::Left]));
        assert!(near(arena.actor().velocity().z, after_bounce * 0.91));
        assert_eq!(arena.actor().velocity().x, -3.0);
    }

    #[test]
    fn cooldown_holds_through_frame_thirty_and_releases_on_thirty_one() {
        let mut arena = Arena::default();
        arena.place_actor(Vec3::new(0.0, 1.5, -13.7));
        arena.set_velocity(Vec3::new(0.0, 0.0, -5.0));
        arena.step(&InputState::new());

        for _ in 0..29 {
            arena.step(&InputState::new());
        }
        // 0.5 - 30/60 leaves a positive remainder in double precision.
        let drifting = arena.actor().velocity().z;
        arena.step(&InputState::holding(&[Key::Down]));
        assert!(arena.cooldown().z > 0.0);
        assert!(near(arena.actor().velocity().z, drifting * 0.91));

        arena.step(&InputState::holding(&[Key::Down]));
        assert_eq!(arena.cooldown().z, 0.0);
        assert_eq!(arena.actor().velocity().z, 3.0);
    }

    #[test]
    fn step_logs_events() {
        let mut arena = Arena::default();
        arena.step(&InputState::holding(&[Key::Up]));
        let events = arena.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ArenaEvent::Stepped { tick: 1, .. }));
        assert!(matches!(events[1], ArenaEvent::Moved { tick: 1, .. }));
        assert!(arena.events().is_empty());
    }

    #[test]
    fn last_outcome_tracks_step() {
        let mut arena = Arena::default();
        assert!(arena.last_outcome().is_none());
        arena.step(&InputState::new());
        assert!(arena.last_outcome().is_some_and(StepOutcome::moved));
    }

    #[test]
    fn state_hash_changes_with_motion() {
        let mut a = Arena::default();
        let b = Arena::default();
        assert_eq!(a.state_hash(), b.state_hash());
        a.step(&InputState::holding(&[Key::Left]));
        assert_ne!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn replay_matches_live_run() {
        let inputs = vec![InputState::holding(&[Key::Up]); 20];
        let mut live = Arena::default();
        for input in &inputs {
            live.step(input);
        }
        let replayed = Arena::replay(ArenaConfig::default(), &inputs).unwrap();
        assert_eq!(live.state_hash(), replayed.state_hash());
        assert_eq!(live.tick(), replayed.tick());
    }
}
