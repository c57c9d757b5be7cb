//! Behavior state machine shared by every pet species.
//!
//! A pet is always in one of three [`PetState`]s. It idles until its walk
//! timer fires, then walks to a random target on the x axis and idles again
//! on arrival. A click plays the click animation once and falls back to idle
//! when that animation finishes.
//!
//! Each state plays its own [`AnimationEngine`]. Entering a state through
//! [`BehaviorStateMachine::set_state`] rewinds that state's animation; the
//! animation of the state being left keeps its cursor.

use std::fmt;

use log::{debug, error};
use rustc_hash::FxHashMap;

use crate::components::animation::{AnimationEngine, DrawIntent};
use crate::components::timer::Timer;
use crate::resources::textures::TextureProvider;

/// Shortest walk interval ever scheduled, in seconds.
const MIN_WALK_INTERVAL: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PetState {
    #[default]
    Idle,
    Walk,
    Click,
}

impl PetState {
    pub const ALL: [PetState; 3] = [PetState::Idle, PetState::Walk, PetState::Click];

    /// Case-insensitive lookup of a manifest animation name.
    pub fn from_name(name: &str) -> Option<PetState> {
        PetState::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        match self {
            PetState::Idle => "idle",
            PetState::Walk => "walk",
            PetState::Click => "click",
        }
    }
}

impl fmt::Display for PetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the pet is and which way it faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PetPose {
    pub x: i32,
    pub y: i32,
    /// Facing left.
    pub flip_x: bool,
    /// Destination of the current walk.
    pub target_x: i32,
}

/// Tunables of the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorConfig {
    /// Horizontal speed in pixels per second.
    pub move_speed_x: f32,
    pub walk_interval_min: f32,
    pub walk_interval_max: f32,
    pub walk_target_min: i32,
    pub walk_target_max: i32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            move_speed_x: 60.0,
            walk_interval_min: 3.0,
            walk_interval_max: 8.0,
            walk_target_min: 300,
            walk_target_max: 800,
        }
    }
}

pub struct BehaviorStateMachine {
    state: PetState,
    pose: PetPose,
    walk_timer: Timer,
    animations: FxHashMap<PetState, AnimationEngine>,
    movement: FxHashMap<PetState, bool>,
    config: BehaviorConfig,
    rng: fastrand::Rng,
}

impl BehaviorStateMachine {
    pub fn new(config: BehaviorConfig) -> Self {
        Self::with_rng(config, fastrand::Rng::new())
    }

    /// Deterministic walk schedule and targets.
    pub fn with_seed(config: BehaviorConfig, seed: u64) -> Self {
        Self::with_rng(config, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(config: BehaviorConfig, rng: fastrand::Rng) -> Self {
        Self {
            state: PetState::Idle,
            pose: PetPose::default(),
            walk_timer: Timer::new(),
            animations: FxHashMap::default(),
            movement: FxHashMap::default(),
            config,
            rng,
        }
    }

    /// Register the animation played in `state`. Returns the one it replaces.
    pub fn insert_animation(
        &mut self,
        state: PetState,
        animation: AnimationEngine,
        is_movement: bool,
    ) -> Option<AnimationEngine> {
        self.movement.insert(state, is_movement);
        self.animations.insert(state, animation)
    }

    /// Arm the walk timer with a random interval.
    pub fn start(&mut self) {
        let interval = self.random_walk_interval();
        self.walk_timer.set_interval(interval, true);
        debug!("Walk timer armed: {:.2}s", interval);
    }

    /// Advance the pet by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.walk_timer.update(dt) && self.state != PetState::Walk {
            self.schedule_walk();
        }

        let state = self.state;
        if self.animations.contains_key(&state) {
            if self.moves(state) {
                self.walk_toward(dt);
            }
            let done = self.animations.get_mut(&state).is_some_and(|anim| {
                anim.advance(dt);
                !anim.is_looping() && anim.is_finished()
            });
            if done {
                self.set_state(PetState::Idle);
            }
        } else {
            error!("No animation for state '{}', playing idle", state);
            if let Some(idle) = self.animations.get_mut(&PetState::Idle) {
                idle.advance(dt);
            }
        }
    }

    fn schedule_walk(&mut self) {
        if !self.has_animation(PetState::Walk) {
            debug!("Walk timer fired but there is no walk animation");
            return;
        }
        let interval = self.random_walk_interval();
        self.walk_timer.set_interval(interval, true);
        let target = self.random_walk_target();
        debug!("Walking to x={} (next walk in {:.2}s)", target, interval);
        self.begin_walk(target);
    }

    /// Switch to `state`, rewinding its animation.
    pub fn set_state(&mut self, state: PetState) {
        self.state = state;
        if let Some(anim) = self.animations.get_mut(&state) {
            anim.reset();
        }
    }

    /// React to a click. Ignored when there is no click animation.
    pub fn click(&mut self) -> bool {
        if !self.has_animation(PetState::Click) {
            debug!("Click ignored: no click animation");
            return false;
        }
        self.set_state(PetState::Click);
        true
    }

    pub fn begin_walk(&mut self, target_x: i32) {
        self.pose.target_x = target_x;
        self.set_state(PetState::Walk);
    }

    /// Step toward the walk target.
    ///
    /// The step is `move_speed_x * dt` truncated, but never less than one
    /// pixel. Reaching or passing the target snaps onto it and switches to
    /// idle.
    pub fn walk_toward(&mut self, dt: f32) {
        let dx = self.pose.target_x - self.pose.x;
        if dx == 0 {
            self.set_state(PetState::Idle);
            return;
        }
        let dir = dx.signum();
        self.pose.flip_x = dir < 0;

        let mut step = (self.config.move_speed_x * dt).abs().trunc() as i32;
        if step == 0 {
            step = 1;
        }
        let next = self.pose.x + dir * step;
        let arrived = if dir > 0 {
            next >= self.pose.target_x
        } else {
            next <= self.pose.target_x
        };
        if arrived {
            self.pose.x = self.pose.target_x;
            self.set_state(PetState::Idle);
        } else {
            self.pose.x = next;
        }
    }

    /// Draw request for the current state at the pet's position, falling back
    /// to the idle animation.
    pub fn draw_intent(&self, width: f32, height: f32) -> Option<DrawIntent<'_>> {
        let anim = self
            .animations
            .get(&self.state)
            .or_else(|| self.animations.get(&PetState::Idle))?;
        anim.draw_intent(
            self.pose.x as f32,
            self.pose.y as f32,
            width,
            height,
            self.pose.flip_x,
        )
    }

    /// Hand every texture back to `provider`.
    pub fn release_animations(&mut self, provider: &mut dyn TextureProvider) {
        for anim in self.animations.values_mut() {
            anim.release(provider);
        }
    }

    /// Whether `state` translates the pet. Walk always does.
    pub fn moves(&self, state: PetState) -> bool {
        state == PetState::Walk || self.movement.get(&state).copied().unwrap_or(false)
    }

    fn random_walk_interval(&mut self) -> f32 {
        let (lo, hi) = ordered(self.config.walk_interval_min, self.config.walk_interval_max);
        (lo + self.rng.f32() * (hi - lo)).max(MIN_WALK_INTERVAL)
    }

    fn random_walk_target(&mut self) -> i32 {
        let (lo, hi) = ordered(self.config.walk_target_min, self.config.walk_target_max);
        self.rng.i32(lo..=hi)
    }

    pub fn state(&self) -> PetState {
        self.state
    }
    pub fn pose(&self) -> PetPose {
        self.pose
    }
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.pose.x = x;
        self.pose.y = y;
    }
    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }
    pub fn walk_timer(&self) -> &Timer {
        &self.walk_timer
    }
    pub fn has_animation(&self, state: PetState) -> bool {
        self.animations.contains_key(&state)
    }
    pub fn animation(&self, state: PetState) -> Option<&AnimationEngine> {
        self.animations.get(&state)
    }
    pub fn current_animation(&self) -> Option<&AnimationEngine> {
        self.animations.get(&self.state)
    }
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}
