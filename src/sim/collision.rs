//! Projectile motion, collision detection and grid snapping
//!
//! Only two shapes exist: the projectile circle against the side walls and
//! against placed bubbles. A shot never bounces off a bubble; touching one (or
//! the ceiling) snaps it into the nearest free hex cell.

use std::collections::HashSet;

use glam::Vec2;

use super::hex::{HexCell, pixel_to_grid};
use super::state::{Bubble, Projectile};
use crate::consts::*;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at collision (pointing back into the playfield)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// What a single projectile step produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Still flying; `bounced` if it came off a side wall this step
    Flying { bounced: bool },
    /// Touched the ceiling or a bubble and must be placed on the grid
    Snap { bounced: bool },
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Check a circle against the left and right playfield walls
pub fn side_wall_collision(pos: Vec2, radius: f32, width: f32) -> CollisionResult {
    if pos.x <= radius {
        return CollisionResult {
            hit: true,
            normal: Vec2::X,
            penetration: radius - pos.x,
        };
    }
    if pos.x >= width - radius {
        return CollisionResult {
            hit: true,
            normal: Vec2::NEG_X,
            penetration: pos.x - (width - radius),
        };
    }
    CollisionResult::miss()
}

/// True once the projectile reaches the ceiling row
#[inline]
pub fn hits_ceiling(pos: Vec2) -> bool {
    pos.y <= BUBBLE_RADIUS
}

/// True if the projectile is close enough to an active bubble to stick
pub fn touches_bubble(pos: Vec2, bubbles: &[Bubble]) -> bool {
    let reach = BUBBLE_RADIUS * 2.0 - COLLISION_BUFFER;
    bubbles
        .iter()
        .filter(|b| b.is_active())
        .any(|b| pos.distance(b.pos) < reach)
}

/// Advance the projectile one fixed step
pub fn step_projectile(proj: &mut Projectile, bubbles: &[Bubble]) -> StepOutcome {
    proj.pos += proj.vel;

    let wall = side_wall_collision(proj.pos, BUBBLE_RADIUS, GAME_WIDTH);
    if wall.hit {
        proj.vel = reflect_velocity(proj.vel, wall.normal);
        // Push back inside the walls
        proj.pos += wall.normal * wall.penetration;
    }
    let bounced = wall.hit;

    if hits_ceiling(proj.pos) || touches_bubble(proj.pos, bubbles) {
        StepOutcome::Snap { bounced }
    } else {
        StepOutcome::Flying { bounced }
    }
}

fn is_occupied(bubbles: &[Bubble], cell: HexCell) -> bool {
    bubbles.iter().any(|b| b.cell == cell && b.is_active())
}

/// Free in-bounds cell closest to `pos` among `candidates`
fn nearest_free(
    candidates: impl IntoIterator<Item = HexCell>,
    pos: Vec2,
    bubbles: &[Bubble],
) -> Option<HexCell> {
    candidates
        .into_iter()
        .filter(|c| c.is_in_bounds() && !is_occupied(bubbles, *c))
        .min_by(|a, b| {
            let da = a.to_pixel().distance_squared(pos);
            let db = b.to_pixel().distance_squared(pos);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Pick the grid cell a projectile at `pos` settles into.
///
/// The nearest cell is clamped onto the board. If it is taken, the closest
/// free neighbor wins. When the whole neighborhood is full the search widens
/// ring by ring, so the result is always an empty cell.
pub fn resolve_snap_cell(pos: Vec2, bubbles: &[Bubble]) -> HexCell {
    let raw = pixel_to_grid(pos);
    let target = HexCell::new(raw.col.clamp(0, GRID_COLS - 1), raw.row.max(0));

    if !is_occupied(bubbles, target) {
        return target;
    }
    if let Some(cell) = nearest_free(target.neighbors(), pos, bubbles) {
        return cell;
    }

    // Breadth-first over occupied cells; the first ring with a free cell wins
    let mut seen = HashSet::from([target]);
    let mut ring: Vec<HexCell> = vec![target];
    loop {
        let mut next_ring = Vec::new();
        for cell in &ring {
            for n in cell.neighbors() {
                if n.is_in_bounds() && seen.insert(n) {
                    next_ring.push(n);
                }
            }
        }
        if next_ring.is_empty() {
            // Unreachable on a real board (rows are unbounded below)
            log::warn!("Snap search exhausted around {:?}", target);
            return target;
        }
        if let Some(cell) = nearest_free(next_ring.iter().copied(), pos, bubbles) {
            log::debug!("Snap neighborhood full at {:?}, widened to {:?}", target, cell);
            return cell;
        }
        ring = next_ring;
    }
}
