//! Hex Pop - a hex-grid bubble shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (hex grid, collisions, cluster search, game state)
//! - `platform`: Pointer/touch input boundary
//! - `persistence`: Key-value storage for achievements, daily record and settings
//! - `achievements` / `daily`: Cross-session progress bookkeeping
//! - `audio`: Sound cue sinks
//! - `host`: Session wiring shared by the browser binding and the native demo

pub mod achievements;
pub mod audio;
pub mod daily;
pub mod host;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use achievements::{AchievementBook, AchievementId};
pub use daily::DailyRecord;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Bubble geometry
    pub const BUBBLE_RADIUS: f32 = 24.0;
    /// Vertical distance between row centers (`R * sqrt(3)`)
    pub const ROW_HEIGHT: f32 = BUBBLE_RADIUS * 1.732_050_8;
    /// Bubbles per even row
    pub const GRID_COLS: i32 = 9;

    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = GRID_COLS as f32 * (BUBBLE_RADIUS * 2.0) + BUBBLE_RADIUS;
    pub const GAME_HEIGHT: f32 = 800.0;
    pub const LAUNCHER_X: f32 = GAME_WIDTH / 2.0;
    pub const LAUNCHER_Y: f32 = GAME_HEIGHT - 60.0;
    /// A bubble whose bottom edge crosses this line ends the attempt
    pub const DANGER_LINE_Y: f32 = LAUNCHER_Y - 50.0;

    /// Projectile speed (pixels per tick)
    pub const PROJECTILE_SPEED: f32 = 15.0;
    /// Overlap allowed before a projectile counts as touching a bubble
    pub const COLLISION_BUFFER: f32 = 4.0;
    /// Aim must rise at least this far above the launcher to fire
    pub const MIN_AIM_RISE: f32 = 50.0;

    /// Scoring
    pub const POINTS_PER_POP: u64 = 10;
    pub const POINTS_PER_DROP: u64 = 20;
    pub const MIN_CLUSTER: usize = 3;
    pub const COMBO_THRESHOLD: usize = 10;

    /// Scale lost per tick by a popping bubble
    pub const POP_SHRINK_PER_TICK: f32 = 0.1;

    /// Progression
    pub const INITIAL_LEVEL: u32 = 1;
    pub const EXPLORER_LEVEL: u32 = 5;

    /// Swap hit areas
    pub const NEXT_INDICATOR_OFFSET_X: f32 = 80.0;
    pub const NEXT_INDICATOR_OFFSET_Y: f32 = 10.0;
    pub const LAUNCHER_SWAP_RADIUS: f32 = BUBBLE_RADIUS * 2.5;
    pub const NEXT_SWAP_RADIUS: f32 = BUBBLE_RADIUS * 2.0;

    /// Length of the aim guide drawn from the launcher
    pub const AIM_GUIDE_LENGTH: f32 = 150.0;
}

/// Launcher position in canvas space
#[inline]
pub fn launcher_pos() -> Vec2 {
    Vec2::new(consts::LAUNCHER_X, consts::LAUNCHER_Y)
}

/// Next-shot indicator position in canvas space
#[inline]
pub fn next_indicator_pos() -> Vec2 {
    launcher_pos() + Vec2::new(consts::NEXT_INDICATOR_OFFSET_X, consts::NEXT_INDICATOR_OFFSET_Y)
}
