//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (board draws and cosmetic draws on separate streams)
//! - No rendering, audio or storage dependencies

pub mod cluster;
pub mod collision;
pub mod hex;
pub mod level;
pub mod rng;
pub mod state;
pub mod tick;

pub use cluster::{find_cluster, find_floating};
pub use collision::{CollisionResult, StepOutcome, reflect_velocity, resolve_snap_cell};
pub use hex::{HexCell, grid_to_pixel, neighbors, pixel_to_grid};
pub use level::{GeneratedLevel, LevelConfig, generate_level};
pub use rng::{DailyRng, LevelRng, seed_hash};
pub use state::{
    ALL_COLORS, Bubble, BubbleColor, BubbleState, FrameView, GameEvent, GameMode, GamePhase,
    GameState, LevelStats, MAX_PARTICLES, PaletteEntry, Particle, Projectile, palette,
};
pub use tick::{TickInput, fire, quit_to_menu, restart, start_game, swap, tick};
