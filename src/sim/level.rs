//! Procedural level boards
//!
//! Classic boards grow rows and colors with the level number. Daily boards are
//! fixed-size and driven entirely by the date-seeded generator, so the draw
//! order below is part of the daily contract.

use super::hex::HexCell;
use super::rng::LevelRng;
use super::state::{ALL_COLORS, Bubble, BubbleColor, GameMode};
use crate::consts::GRID_COLS;

/// Cells below the ceiling row are left empty when their draw exceeds this
/// (a 10% chance)
const SKIP_ABOVE: f64 = 0.9;

/// Board shape for one level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelConfig {
    pub level: u32,
    pub mode: GameMode,
    pub rows: i32,
    pub colors: Vec<BubbleColor>,
}

impl LevelConfig {
    pub fn new(level: u32, mode: GameMode) -> Self {
        let (color_count, rows) = match mode {
            GameMode::Daily => (5, 8),
            GameMode::Classic => (
                ALL_COLORS.len().min(3 + (level / 2) as usize),
                4 + (level / 3).min(8) as i32,
            ),
        };
        Self {
            level,
            mode,
            rows,
            colors: ALL_COLORS[..color_count].to_vec(),
        }
    }
}

/// A freshly generated board plus the opening shot colors
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedLevel {
    pub bubbles: Vec<Bubble>,
    pub current_color: BubbleColor,
    pub next_color: BubbleColor,
}

/// Fill the board row by row. Bubble ids start at `first_id`.
pub fn generate_level(config: &LevelConfig, rng: &mut LevelRng, first_id: u32) -> GeneratedLevel {
    let mut bubbles = Vec::new();
    let mut id = first_id;
    // Palette prefix is never empty, but keep a fallback rather than panic
    let fallback = ALL_COLORS[0];

    for row in 0..config.rows {
        for col in 0..GRID_COLS {
            if row > 0 && rng.next_unit() > SKIP_ABOVE {
                continue;
            }
            let cell = HexCell::new(col, row);
            // Odd rows are shifted right, so their last slot hangs off the board
            if cell.is_odd_row() && col == GRID_COLS - 1 {
                continue;
            }
            // Each placed cell consumes one draw ahead of its color; daily
            // boards depend on this ordering.
            let _tag = rng.next_unit();
            let color = rng.pick(&config.colors).unwrap_or(fallback);
            bubbles.push(Bubble::new(id, cell, color));
            id += 1;
        }
    }

    let current_color = rng.pick(&config.colors).unwrap_or(fallback);
    let next_color = rng.pick(&config.colors).unwrap_or(fallback);

    log::info!(
        "Level {} ({:?}): {} rows, {} colors, {} bubbles",
        config.level,
        config.mode,
        config.rows,
        config.colors.len(),
        bubbles.len()
    );

    GeneratedLevel {
        bubbles,
        current_color,
        next_color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::DailyRng;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn daily(date: &str) -> GeneratedLevel {
        let config = LevelConfig::new(1, GameMode::Daily);
        let mut rng = LevelRng::Daily(DailyRng::from_date(date));
        generate_level(&config, &mut rng, 1)
    }

    #[test]
    fn test_classic_sizing() {
        let l1 = LevelConfig::new(1, GameMode::Classic);
        assert_eq!(l1.rows, 4);
        assert_eq!(l1.colors.len(), 3);

        let l6 = LevelConfig::new(6, GameMode::Classic);
        assert_eq!(l6.rows, 6);
        assert_eq!(l6.colors.len(), 6);

        let l40 = LevelConfig::new(40, GameMode::Classic);
        assert_eq!(l40.rows, 12);
        assert_eq!(l40.colors.len(), ALL_COLORS.len());
    }

    #[test]
    fn test_daily_sizing_ignores_level() {
        let config = LevelConfig::new(17, GameMode::Daily);
        assert_eq!(config.rows, 8);
        assert_eq!(config.colors, ALL_COLORS[..5].to_vec());
    }

    #[test]
    fn test_daily_is_reproducible() {
        let a = daily("2024-1-15");
        let b = daily("2024-1-15");
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a.bubbles).unwrap(),
            serde_json::to_string(&b.bubbles).unwrap()
        );

        let other = daily("2024-1-16");
        assert_ne!(a.bubbles, other.bubbles);
    }

    #[test]
    fn test_daily_first_cells() {
        // First three draws for this date: 0.648 (tag), 0.978 (color), 0.150 (tag)
        let level = daily("2024-1-15");
        let first = &level.bubbles[0];
        assert_eq!(first.cell, HexCell::new(0, 0));
        assert_eq!(first.color, BubbleColor::Purple);
    }

    #[test]
    fn test_board_shape() {
        let config = LevelConfig::new(9, GameMode::Classic);
        let mut rng = LevelRng::Classic(Pcg32::seed_from_u64(42));
        let level = generate_level(&config, &mut rng, 10);

        // Ceiling row is always full
        let ceiling = level.bubbles.iter().filter(|b| b.cell.row == 0).count();
        assert_eq!(ceiling, GRID_COLS as usize);

        for b in &level.bubbles {
            assert!(b.cell.is_in_bounds());
            assert!(b.cell.row < config.rows);
            assert!(!(b.cell.is_odd_row() && b.cell.col == GRID_COLS - 1));
            assert!(config.colors.contains(&b.color));
            assert!(b.is_active());
            assert_eq!(b.scale, 1.0);
        }

        // Ids are sequential and unique
        for (i, b) in level.bubbles.iter().enumerate() {
            assert_eq!(b.id, 10 + i as u32);
        }
        assert!(config.colors.contains(&level.current_color));
        assert!(config.colors.contains(&level.next_color));
    }
}
