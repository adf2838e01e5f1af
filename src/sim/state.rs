//! Game state and core simulation types
//!
//! Everything one level attempt needs lives on [`GameState`]; the host owns it
//! and hands it to [`super::tick`] by mutable reference.

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hex::{HexCell, grid_to_pixel};
use super::rng::LevelRng;
use crate::achievements::AchievementId;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on the title screen
    Menu,
    /// Active gameplay
    Playing,
    /// Ticks suspended, state preserved
    Paused,
    /// A bubble crossed the danger line
    GameOver,
    /// Board cleared
    Victory,
}

/// Which board generator a session uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Classic,
    /// Board derived from the calendar date
    Daily,
}

/// Bubble palette (ordered; levels use a prefix of it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BubbleColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Cyan,
    Orange,
}

/// All colors in palette order
pub const ALL_COLORS: [BubbleColor; 7] = [
    BubbleColor::Red,
    BubbleColor::Blue,
    BubbleColor::Green,
    BubbleColor::Yellow,
    BubbleColor::Purple,
    BubbleColor::Cyan,
    BubbleColor::Orange,
];

impl BubbleColor {
    pub fn as_hex(&self) -> &'static str {
        match self {
            BubbleColor::Red => "#ef4444",
            BubbleColor::Blue => "#3b82f6",
            BubbleColor::Green => "#22c55e",
            BubbleColor::Yellow => "#eab308",
            BubbleColor::Purple => "#a855f7",
            BubbleColor::Cyan => "#06b6d4",
            BubbleColor::Orange => "#f97316",
        }
    }
}

/// A palette color with its CSS value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    pub color: BubbleColor,
    pub hex: &'static str,
}

/// Every color with its CSS value, for renderers that draw a [`FrameView`]
pub fn palette() -> Vec<PaletteEntry> {
    ALL_COLORS
        .iter()
        .map(|&color| PaletteEntry {
            color,
            hex: color.as_hex(),
        })
        .collect()
}

/// Bubble lifecycle. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BubbleState {
    /// On the board, collidable, part of cluster searches
    Active,
    /// Shrinking away; no longer collidable
    Popping,
    /// Fully gone, purged at the end of the tick
    Removed,
}

/// A bubble placed on the hex grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: u32,
    pub cell: HexCell,
    /// Cached pixel center of `cell`
    pub pos: Vec2,
    pub color: BubbleColor,
    pub state: BubbleState,
    /// Render scale: 1.0 full size, shrinks while popping
    pub scale: f32,
}

impl Bubble {
    pub fn new(id: u32, cell: HexCell, color: BubbleColor) -> Self {
        Self {
            id,
            cell,
            pos: grid_to_pixel(cell.col, cell.row),
            color,
            state: BubbleState::Active,
            scale: 1.0,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == BubbleState::Active
    }

    /// Active or still animating out
    #[inline]
    pub fn is_present(&self) -> bool {
        self.state != BubbleState::Removed
    }

    /// Begin the pop animation (no-op unless active)
    pub fn start_pop(&mut self) {
        if self.state == BubbleState::Active {
            self.state = BubbleState::Popping;
        }
    }

    /// Shrink a popping bubble; it is removed once its scale reaches zero
    pub fn shrink(&mut self, step: f32) {
        if self.state == BubbleState::Popping {
            self.scale -= step;
            if self.scale <= 0.0 {
                self.scale = 0.0;
                self.state = BubbleState::Removed;
            }
        }
    }
}

/// The single in-flight shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: BubbleColor,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: BubbleColor,
    pub life: f32, // 0-1, decreases over time
    pub size: f32,
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 256;

/// Per-attempt counters used for achievements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStats {
    pub shots_fired: u32,
    pub shots_missed: u32,
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Shot,
    Swapped,
    WallBounce,
    Snapped { cell: HexCell },
    Popped { count: usize },
    Dropped { count: usize },
    /// Request to unlock an achievement; the consumer ignores repeats
    Achievement(AchievementId),
    DailyComplete,
    Victory,
    GameOver,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for classic boards
    pub seed: u64,
    pub phase: GamePhase,
    pub mode: GameMode,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    /// Bubbles on the board (unordered)
    pub bubbles: Vec<Bubble>,
    pub projectile: Option<Projectile>,
    pub current_color: BubbleColor,
    pub next_color: BubbleColor,
    /// Last known aim point in canvas pixels
    pub aim: Vec2,
    pub stats: LevelStats,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Particle budget; 0 disables effects
    pub max_particles: usize,
    /// Whether snapshots include the aim guide
    pub show_aim_guide: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Date string used to seed daily boards
    pub daily_date: String,
    /// Pending events for the host
    pub events: Vec<GameEvent>,
    /// Draws seeds for successive classic attempts
    seeder: Pcg32,
    /// RNG for the current attempt (board and next-shot colors)
    pub(crate) level_rng: LevelRng,
    /// Cosmetic RNG, kept apart so effects never shift board draws
    pub(crate) fx_rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a session on the menu screen
    pub fn new(seed: u64) -> Self {
        let mut seeder = Pcg32::seed_from_u64(seed);
        let level_rng = LevelRng::Classic(Pcg32::seed_from_u64(seeder.next_u64()));
        let fx_rng = Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);
        Self {
            seed,
            phase: GamePhase::Menu,
            mode: GameMode::Classic,
            level: INITIAL_LEVEL,
            score: 0,
            bubbles: Vec::new(),
            projectile: None,
            current_color: ALL_COLORS[1],
            next_color: ALL_COLORS[0],
            aim: Vec2::new(GAME_WIDTH / 2.0, GAME_HEIGHT / 2.0),
            stats: LevelStats::default(),
            particles: Vec::new(),
            max_particles: MAX_PARTICLES,
            show_aim_guide: true,
            time_ticks: 0,
            daily_date: String::new(),
            events: Vec::new(),
            seeder,
            level_rng,
            fx_rng,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Restart ID allocation after a fresh board was generated
    pub(crate) fn reset_ids(&mut self, next_id: u32) {
        self.next_id = next_id;
    }

    /// Seed for the next classic attempt
    pub(crate) fn next_classic_seed(&mut self) -> u64 {
        self.seeder.next_u64()
    }

    /// The active bubble in `cell`, if any
    pub fn bubble_at(&self, cell: HexCell) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| b.cell == cell && b.is_active())
    }

    pub fn is_occupied(&self, cell: HexCell) -> bool {
        self.bubble_at(cell).is_some()
    }

    /// Bubbles that are active or still popping
    pub fn present_count(&self) -> usize {
        self.bubbles.iter().filter(|b| b.is_present()).count()
    }

    pub fn active_count(&self) -> usize {
        self.bubbles.iter().filter(|b| b.is_active()).count()
    }

    /// Distinct colors of active bubbles, in first-seen order
    pub fn colors_on_board(&self) -> Vec<BubbleColor> {
        let mut colors = Vec::new();
        for b in self.bubbles.iter().filter(|b| b.is_active()) {
            if !colors.contains(&b.color) {
                colors.push(b.color);
            }
        }
        colors
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Borrowed view for renderers
    pub fn view(&self) -> FrameView<'_> {
        let aim_guide = if self.show_aim_guide
            && self.phase == GamePhase::Playing
            && self.projectile.is_none()
        {
            let delta = self.aim - crate::launcher_pos();
            // Guide only shows for clearly upward aims
            (delta.y < -20.0)
                .then(|| crate::launcher_pos() + delta.normalize_or_zero() * AIM_GUIDE_LENGTH)
        } else {
            None
        };
        FrameView {
            phase: self.phase,
            mode: self.mode,
            level: self.level,
            score: self.score,
            bubbles: &self.bubbles,
            projectile: self.projectile.as_ref(),
            current_color: self.current_color,
            next_color: self.next_color,
            aim: self.aim,
            aim_guide,
            particles: &self.particles,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Serialize)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub mode: GameMode,
    pub level: u32,
    pub score: u64,
    pub bubbles: &'a [Bubble],
    pub projectile: Option<&'a Projectile>,
    pub current_color: BubbleColor,
    pub next_color: BubbleColor,
    pub aim: Vec2,
    /// End point of the aim guide line from the launcher
    pub aim_guide: Option<Vec2>,
    pub particles: &'a [Particle],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bubble_lifecycle_is_monotonic() {
        let mut b = Bubble::new(1, HexCell::new(0, 0), BubbleColor::Red);
        assert!(b.is_active());

        // Shrinking an active bubble does nothing
        b.shrink(POP_SHRINK_PER_TICK);
        assert_eq!(b.scale, 1.0);

        b.start_pop();
        assert_eq!(b.state, BubbleState::Popping);
        assert!(b.is_present());

        for _ in 0..11 {
            b.shrink(POP_SHRINK_PER_TICK);
        }
        assert_eq!(b.state, BubbleState::Removed);

        // Cannot come back
        b.start_pop();
        assert_eq!(b.state, BubbleState::Removed);
        assert!(!b.is_present());
    }

    #[test]
    fn test_colors_on_board_ignores_popping() {
        let mut state = GameState::new(1);
        state.bubbles.push(Bubble::new(1, HexCell::new(0, 0), BubbleColor::Green));
        state.bubbles.push(Bubble::new(2, HexCell::new(1, 0), BubbleColor::Red));
        state.bubbles.push(Bubble::new(3, HexCell::new(2, 0), BubbleColor::Green));
        let mut popping = Bubble::new(4, HexCell::new(3, 0), BubbleColor::Cyan);
        popping.start_pop();
        state.bubbles.push(popping);

        assert_eq!(state.colors_on_board(), vec![BubbleColor::Green, BubbleColor::Red]);
        assert_eq!(state.present_count(), 4);
        assert_eq!(state.active_count(), 3);
        assert!(state.is_occupied(HexCell::new(1, 0)));
        assert!(!state.is_occupied(HexCell::new(3, 0)));
    }

    #[test]
    fn test_view_serializes() {
        let mut state = GameState::new(3);
        state.phase = GamePhase::Playing;
        state.aim = crate::launcher_pos() + Vec2::new(0.0, -200.0);
        state.bubbles.push(Bubble::new(1, HexCell::new(2, 0), BubbleColor::Blue));

        let view = state.view();
        let guide = view.aim_guide.expect("upward aim shows a guide");
        assert!((guide.y - (LAUNCHER_Y - AIM_GUIDE_LENGTH)).abs() < 0.001);

        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"Playing\""));
        assert!(json.contains("\"Blue\""));
    }

    #[test]
    fn test_aim_guide_can_be_hidden() {
        let mut state = GameState::new(3);
        state.phase = GamePhase::Playing;
        state.aim = crate::launcher_pos() + Vec2::new(0.0, -200.0);
        state.show_aim_guide = false;
        assert_eq!(state.view().aim_guide, None);

        // Downward aims never show one
        state.show_aim_guide = true;
        state.aim = crate::launcher_pos() + Vec2::new(0.0, 10.0);
        assert_eq!(state.view().aim_guide, None);
    }

    #[test]
    fn test_palette() {
        let entries = palette();
        assert_eq!(entries.len(), ALL_COLORS.len());
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.hex.len(), 7);
            assert!(entry.hex.starts_with('#'));
            assert!(entry.hex[1..].chars().all(|c| c.is_ascii_hexdigit()));
            assert!(entries[i + 1..].iter().all(|e| e.hex != entry.hex));
        }
        let json = serde_json::to_string(&entries[0]).unwrap();
        assert_eq!(json, r##"{"color":"Red","hex":"#ef4444"}"##);
    }
}
