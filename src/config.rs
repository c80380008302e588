//! Tuning parameters for every engine.
//!
//! The defaults are the values the games are balanced around. A JSON file
//! named by `MINIARCADE_CONFIG` may override any subset of them; missing
//! fields fall back to the defaults.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

pub const CONFIG_ENV: &str = "MINIARCADE_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub flappy: FlappyConfig,
    pub runner: RunnerConfig,
    pub stack: StackConfig,
    pub snake: SnakeConfig,
    pub tetris: TetrisConfig,
    pub tic_tac_toe: TicTacToeConfig,
    pub durak: DurakConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlappyConfig {
    pub tick_ms: u64,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub bird_x: f32,
    pub bird_start_y: f32,
    pub bird_size: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub pipe_speed: f32,
    pub pipe_spawn_ticks: u32,
    /// Minimum height of the top pipe and of the bottom pipe.
    pub pipe_margin: f32,
}

impl Default for FlappyConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            canvas_width: 400.0,
            canvas_height: 500.0,
            bird_x: 50.0,
            bird_start_y: 250.0,
            bird_size: 20.0,
            gravity: 0.25,
            jump_velocity: -5.0,
            pipe_width: 50.0,
            pipe_gap: 150.0,
            pipe_speed: 2.0,
            pipe_spawn_ticks: 90,
            pipe_margin: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub tick_ms: u64,
    /// Distance at which obstacles appear; the runner sits at distance 0.
    pub track_length: f32,
    pub hit_band_near: f32,
    pub hit_band_far: f32,
    pub initial_speed: f32,
    pub speed_ramp: f32,
    pub max_speed: f32,
    pub spawn_chance: f64,
    pub max_obstacles: usize,
    pub min_lane_spacing: f32,
    pub coin_chance: f64,
    pub coin_value: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_ms: 20,
            track_length: 100.0,
            hit_band_near: 0.0,
            hit_band_far: 8.0,
            initial_speed: 0.8,
            speed_ramp: 0.0005,
            max_speed: 2.5,
            spawn_chance: 0.04,
            max_obstacles: 6,
            min_lane_spacing: 30.0,
            coin_chance: 0.35,
            coin_value: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    pub tick_ms: u64,
    pub playfield_width: f32,
    pub base_width: f32,
    pub step: f32,
    /// Offsets smaller than this snap onto the block below.
    pub perfect_tolerance: f32,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            tick_ms: 20,
            playfield_width: 100.0,
            base_width: 40.0,
            step: 1.0,
            perfect_tolerance: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    pub tick_ms: u64,
    pub grid_size: usize,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            grid_size: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetrisConfig {
    pub tick_ms: u64,
    pub rows: usize,
    pub cols: usize,
    pub points_per_line: u32,
}

impl Default for TetrisConfig {
    fn default() -> Self {
        Self {
            tick_ms: 800,
            rows: 20,
            cols: 10,
            points_per_line: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicTacToeConfig {
    pub tick_ms: u64,
    pub bot_delay_ticks: u32,
}

impl Default for TicTacToeConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            bot_delay_ticks: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurakConfig {
    pub tick_ms: u64,
    pub hand_size: usize,
    pub max_table_slots: usize,
    pub bot_delay_ticks: u32,
}

impl Default for DurakConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            hand_size: 6,
            max_table_slots: 6,
            bot_delay_ticks: 6,
        }
    }
}

impl Config {
    /// Load from the file named by `MINIARCADE_CONFIG`, or fall back to defaults.
    pub fn load() -> Result<Self> {
        match env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let f = &self.flappy;
        ensure(f.tick_ms > 0, "flappy.tick_ms must be positive")?;
        ensure(f.gravity > 0.0, "flappy.gravity must be positive")?;
        ensure(f.jump_velocity < 0.0, "flappy.jump_velocity must be negative")?;
        ensure(f.pipe_spawn_ticks > 0, "flappy.pipe_spawn_ticks must be positive")?;
        ensure(
            f.pipe_gap + 2.0 * f.pipe_margin <= f.canvas_height,
            "flappy.pipe_gap plus margins exceeds canvas_height",
        )?;
        ensure(
            f.bird_start_y >= 0.0 && f.bird_start_y + f.bird_size <= f.canvas_height,
            "flappy.bird_start_y is off the canvas",
        )?;

        let r = &self.runner;
        ensure(r.tick_ms > 0, "runner.tick_ms must be positive")?;
        ensure(r.initial_speed > 0.0, "runner.initial_speed must be positive")?;
        ensure(r.max_speed >= r.initial_speed, "runner.max_speed below initial_speed")?;
        ensure(r.hit_band_far > r.hit_band_near, "runner hit band is empty")?;
        ensure((0.0..=1.0).contains(&r.spawn_chance), "runner.spawn_chance outside [0, 1]")?;
        ensure((0.0..=1.0).contains(&r.coin_chance), "runner.coin_chance outside [0, 1]")?;

        let s = &self.stack;
        ensure(s.tick_ms > 0, "stack.tick_ms must be positive")?;
        ensure(s.step > 0.0, "stack.step must be positive")?;
        ensure(
            s.base_width > 0.0 && s.base_width <= s.playfield_width,
            "stack.base_width must fit the playfield",
        )?;

        ensure(self.snake.tick_ms > 0, "snake.tick_ms must be positive")?;
        ensure(self.snake.grid_size >= 3, "snake.grid_size must be at least 3")?;

        let t = &self.tetris;
        ensure(t.tick_ms > 0, "tetris.tick_ms must be positive")?;
        ensure(t.rows >= 4 && t.cols >= 4, "tetris grid must be at least 4x4")?;

        ensure(self.tic_tac_toe.tick_ms > 0, "tic_tac_toe.tick_ms must be positive")?;

        let d = &self.durak;
        ensure(d.tick_ms > 0, "durak.tick_ms must be positive")?;
        ensure(
            d.hand_size > 0 && d.hand_size * 2 < 36,
            "durak.hand_size must leave cards in the deck",
        )?;
        ensure(d.max_table_slots > 0, "durak.max_table_slots must be positive")?;
        Ok(())
    }
}

fn ensure(cond: bool, msg: &str) -> Result<()> {
    if cond {
        Ok(())
    } else {
        Err(ConfigError::Invalid(msg.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = Config::from_json_str(r#"{ "snake": { "grid_size": 20 } }"#).unwrap();
        assert_eq!(cfg.snake.grid_size, 20);
        assert_eq!(cfg.snake.tick_ms, 200);
        assert_eq!(cfg.tetris, TetrisConfig::default());
    }

    #[test]
    fn rejects_gap_taller_than_canvas() {
        let err = Config::from_json_str(r#"{ "flappy": { "pipe_gap": 900.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
