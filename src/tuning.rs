//! Data-driven game balance
//!
//! Every number that shapes difficulty or scoring lives here so a run can be
//! replayed or rebalanced from a JSON file without touching the simulation.

use serde::{Deserialize, Serialize};

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Downward acceleration applied to the runner each tick
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative = up)
    pub jump_impulse: f32,

    // === Speed ===
    /// Speed at session start
    pub start_speed: f32,
    /// Floor enforced by the wrong-answer penalty
    pub min_speed: f32,
    /// Ceiling for the difficulty ramp
    pub max_speed: f32,
    /// Ticks between speed increases
    pub ramp_interval: u64,

    // === Spawning ===
    /// Spawn interval at speed 0 (ticks)
    pub spawn_base_interval: u64,
    /// Interval reduction per unit of speed
    pub spawn_interval_per_speed: f32,
    /// Shortest allowed spawn interval
    pub spawn_min_interval: u64,

    // === Scoring ===
    /// Passive score per tick, multiplied by speed
    pub accrual_rate: f32,
    /// Score awarded for a correct answer
    pub correct_reward: f32,
    /// Score removed for a wrong answer
    pub wrong_penalty: f32,
    /// Speed removed for a wrong answer
    pub speed_penalty: f32,

    // === Lives ===
    pub start_lives: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.75,
            jump_impulse: -14.0,

            start_speed: 6.0,
            min_speed: 5.0,
            max_speed: 14.0,
            ramp_interval: 300,

            spawn_base_interval: 140,
            spawn_interval_per_speed: 6.0,
            spawn_min_interval: 60,

            accrual_rate: 0.02,
            correct_reward: 20.0,
            wrong_penalty: 20.0,
            speed_penalty: 1.0,

            start_lives: 3,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their defaults.
    /// The result is sanitized before it is returned.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Clamp values into a self-consistent range
    pub fn sanitized(mut self) -> Self {
        self.min_speed = self.min_speed.max(0.0);
        self.max_speed = self.max_speed.max(self.min_speed);
        self.start_speed = self.start_speed.clamp(self.min_speed, self.max_speed);
        self.ramp_interval = self.ramp_interval.max(1);
        self.spawn_min_interval = self.spawn_min_interval.max(1);
        self.spawn_interval_per_speed = self.spawn_interval_per_speed.max(0.0);
        self.accrual_rate = self.accrual_rate.max(0.0);
        self.correct_reward = self.correct_reward.max(0.0);
        self.wrong_penalty = self.wrong_penalty.max(0.0);
        self.speed_penalty = self.speed_penalty.max(0.0);
        self.start_lives = self.start_lives.max(1);
        if self.jump_impulse > 0.0 {
            self.jump_impulse = -self.jump_impulse;
        }
        self
    }

    /// Ticks between spawns at the given speed
    pub fn spawn_interval(&self, speed: f32) -> u64 {
        let shrunk = self.spawn_base_interval as f32 - speed * self.spawn_interval_per_speed;
        (shrunk.max(0.0) as u64).max(self.spawn_min_interval)
    }

    /// Clamp a speed into [min_speed, max_speed]
    pub fn clamp_speed(&self, speed: f32) -> f32 {
        speed.clamp(self.min_speed, self.max_speed)
    }
}
