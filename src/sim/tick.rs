//! Fixed-step session controller
//!
//! One call to [`tick`] consumes the input gathered since the previous frame,
//! moves the projectile, resolves snaps and pops, animates, and decides
//! victory or defeat. All mutation of the session happens here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::cluster::{find_cluster, find_floating};
use super::collision::{StepOutcome, resolve_snap_cell, step_projectile};
use super::hex::HexCell;
use super::level::{LevelConfig, generate_level};
use super::rng::{DailyRng, LevelRng};
use super::state::{
    ALL_COLORS, Bubble, BubbleColor, GameEvent, GameMode, GamePhase, GameState, LevelStats,
    Particle, Projectile,
};
use crate::achievements::AchievementId;
use crate::consts::*;
use crate::{launcher_pos, next_indicator_pos};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer position (canvas pixels)
    pub aim: Option<Vec2>,
    /// Pointer released here: swap if on the launcher, otherwise fire
    pub release: Option<Vec2>,
    /// Swap button
    pub swap: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - the game aims and fires by itself
    pub idle_mode: bool,
}

/// Advance the session by one fixed step
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    if let Some(aim) = input.aim {
        state.aim = aim;
    }
    if let Some(pos) = input.release {
        state.aim = pos;
        handle_release(state, pos);
    }
    if input.swap {
        swap(state);
    }
    if input.idle_mode && state.projectile.is_none() {
        state.aim = autopilot_aim(state);
        fire(state);
    }

    update_projectile(state);
    update_particles(state);
    update_popping(state);
    check_outcome(state);
}

/// Begin a new session from the menu
pub fn start_game(state: &mut GameState, mode: GameMode, date: &str) {
    state.mode = mode;
    state.daily_date = date.to_string();
    state.level = INITIAL_LEVEL;
    state.score = 0;
    begin_attempt(state);
}

/// Continue after the attempt ended.
///
/// After a victory the next level starts and the score carries over; any
/// other restart replays the same level from zero.
pub fn restart(state: &mut GameState) {
    if state.phase == GamePhase::Victory {
        state.level += 1;
    } else {
        state.score = 0;
    }
    begin_attempt(state);
}

/// Leave the current attempt for the title screen
pub fn quit_to_menu(state: &mut GameState) {
    state.phase = GamePhase::Menu;
    state.projectile = None;
}

/// Generate a fresh board for the current level and mode
fn begin_attempt(state: &mut GameState) {
    state.level_rng = match state.mode {
        GameMode::Daily => LevelRng::Daily(DailyRng::from_date(&state.daily_date)),
        GameMode::Classic => {
            LevelRng::Classic(Pcg32::seed_from_u64(state.next_classic_seed()))
        }
    };

    let config = LevelConfig::new(state.level, state.mode);
    let generated = generate_level(&config, &mut state.level_rng, 1);

    state.reset_ids(generated.bubbles.len() as u32 + 1);
    state.bubbles = generated.bubbles;
    state.current_color = generated.current_color;
    state.next_color = generated.next_color;
    state.projectile = None;
    state.particles.clear();
    state.stats = LevelStats::default();
    state.phase = GamePhase::Playing;

    log::info!(
        "Attempt started: level {} ({:?}), score {}, session seed {}",
        state.level,
        state.mode,
        state.score,
        state.seed
    );
}

/// Fire the current color toward the aim point.
///
/// Ignored unless playing, with nothing in flight, and aimed clearly upward.
pub fn fire(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing || state.projectile.is_some() {
        return false;
    }
    let delta = state.aim - launcher_pos();
    if delta.y > -MIN_AIM_RISE {
        return false;
    }

    state.projectile = Some(Projectile {
        pos: launcher_pos(),
        vel: delta.normalize() * PROJECTILE_SPEED,
        color: state.current_color,
    });
    state.stats.shots_fired += 1;

    // Only offer colors still on the board
    state.current_color = state.next_color;
    let colors = state.colors_on_board();
    state.next_color = state.level_rng.pick(&colors).unwrap_or(ALL_COLORS[0]);

    state.events.push(GameEvent::Shot);
    log::debug!("Shot {} fired toward {:?}", state.stats.shots_fired, state.aim);
    true
}

/// Exchange current and next shot colors (not while a shot is in flight)
pub fn swap(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing || state.projectile.is_some() {
        return false;
    }
    std::mem::swap(&mut state.current_color, &mut state.next_color);
    state.events.push(GameEvent::Swapped);
    true
}

/// A release on the launcher or next-shot indicator swaps, anywhere else fires
fn handle_release(state: &mut GameState, pos: Vec2) {
    let on_launcher = pos.distance(launcher_pos()) < LAUNCHER_SWAP_RADIUS;
    let on_next = pos.distance(next_indicator_pos()) < NEXT_SWAP_RADIUS;
    if (on_launcher || on_next) && state.projectile.is_none() {
        swap(state);
    } else {
        fire(state);
    }
}

fn update_projectile(state: &mut GameState) {
    let Some(mut proj) = state.projectile.take() else {
        return;
    };

    match step_projectile(&mut proj, &state.bubbles) {
        StepOutcome::Flying { bounced } => {
            if bounced {
                state.events.push(GameEvent::WallBounce);
            }
            state.projectile = Some(proj);
        }
        StepOutcome::Snap { bounced } => {
            if bounced {
                state.events.push(GameEvent::WallBounce);
            }
            let cell = resolve_snap_cell(proj.pos, &state.bubbles);
            settle_bubble(state, cell, proj.color);
        }
    }
}

/// Place a bubble on the grid and resolve matches and drops around it
pub(crate) fn settle_bubble(state: &mut GameState, cell: HexCell, color: BubbleColor) {
    let id = state.next_entity_id();
    state.bubbles.push(Bubble::new(id, cell, color));
    state.events.push(GameEvent::Snapped { cell });
    log::debug!("Snapped {:?} into {:?}", color, cell);

    let placed = state.bubbles.len() - 1;
    let cluster = find_cluster(&state.bubbles, placed, true);
    if cluster.len() < MIN_CLUSTER {
        state.stats.shots_missed += 1;
        return;
    }

    for &i in &cluster {
        state.bubbles[i].start_pop();
        let (pos, color) = (state.bubbles[i].pos, state.bubbles[i].color);
        spawn_particles(state, pos, color, false);
    }
    state.score += cluster.len() as u64 * POINTS_PER_POP;
    state.events.push(GameEvent::Popped {
        count: cluster.len(),
    });
    if cluster.len() >= COMBO_THRESHOLD {
        state.events.push(GameEvent::Achievement(AchievementId::ComboMaster));
    }

    let floating = find_floating(&state.bubbles);
    for &i in &floating {
        state.bubbles[i].start_pop();
        let (pos, color) = (state.bubbles[i].pos, state.bubbles[i].color);
        spawn_particles(state, pos, color, true);
    }
    if !floating.is_empty() {
        state.score += floating.len() as u64 * POINTS_PER_DROP;
        state.events.push(GameEvent::Dropped {
            count: floating.len(),
        });
    }

    log::debug!(
        "Popped {}, dropped {}, score {}",
        cluster.len(),
        floating.len(),
        state.score
    );
}

/// Burst of particles at a bubble (heavier for dropped bubbles)
fn spawn_particles(state: &mut GameState, pos: Vec2, color: BubbleColor, heavy: bool) {
    let count = if heavy { 8 } else { 5 };
    for _ in 0..count {
        if state.particles.len() >= state.max_particles {
            return;
        }
        let rng = &mut state.fx_rng;
        let vel = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 10.0;
        let size = rng.random::<f32>() * 4.0 + 2.0;
        state.particles.push(Particle {
            pos,
            vel,
            color,
            life: 1.0,
            size,
        });
    }
}

fn update_particles(state: &mut GameState) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.y += 0.5; // Gravity
        particle.life -= 0.05;
    }
    state.particles.retain(|p| p.life > 0.0);
}

fn update_popping(state: &mut GameState) {
    for bubble in state.bubbles.iter_mut() {
        bubble.shrink(POP_SHRINK_PER_TICK);
    }
    state.bubbles.retain(|b| b.is_present());
}

/// Victory when the board is empty, defeat when a bubble reaches the danger line
fn check_outcome(state: &mut GameState) {
    if state.projectile.is_some() {
        return;
    }

    if state.present_count() == 0 {
        state.phase = GamePhase::Victory;
        state.events.push(GameEvent::Victory);
        state.events.push(GameEvent::Achievement(AchievementId::FirstBlood));
        if state.stats.shots_missed == 0 {
            state.events.push(GameEvent::Achievement(AchievementId::Sharpshooter));
        }
        if state.mode == GameMode::Daily {
            state.events.push(GameEvent::DailyComplete);
            state.events.push(GameEvent::Achievement(AchievementId::DailyHero));
        }
        if state.level >= EXPLORER_LEVEL {
            state.events.push(GameEvent::Achievement(AchievementId::Explorer));
        }
        log::info!(
            "Level {} cleared: score {}, {} shots, {} missed",
            state.level,
            state.score,
            state.stats.shots_fired,
            state.stats.shots_missed
        );
        return;
    }

    let breached = state
        .bubbles
        .iter()
        .any(|b| b.is_active() && b.pos.y + BUBBLE_RADIUS > DANGER_LINE_Y);
    if breached {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!("Game over on level {} with score {}", state.level, state.score);
    }
}

/// Aim for the demo autopilot: the lowest reachable bubble of the loaded
/// color, otherwise a slow sweep across the board
fn autopilot_aim(state: &GameState) -> Vec2 {
    let target = state
        .bubbles
        .iter()
        .filter(|b| b.is_active() && b.color == state.current_color)
        .filter(|b| {
            b.cell
                .neighbors()
                .iter()
                .any(|n| n.row >= b.cell.row && n.is_in_bounds() && !state.is_occupied(*n))
        })
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|b| b.pos);

    match target {
        Some(pos) if pos.y < LAUNCHER_Y - MIN_AIM_RISE => pos,
        _ => {
            let sweep = (state.time_ticks as f32 * 0.05).sin();
            Vec2::new(LAUNCHER_X + sweep * GAME_WIDTH * 0.4, LAUNCHER_Y - 300.0)
        }
    }
}
