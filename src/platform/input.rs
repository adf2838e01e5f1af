//! Pointer and keyboard input collection
//!
//! Hosts report raw events as they arrive; the game loop calls
//! [`InputQueue::take`] once per tick. One-shot actions (release, swap,
//! pause) are consumed by that call, the aim point and idle mode persist.

use glam::Vec2;

use crate::sim::TickInput;

/// Maps client (CSS pixel) coordinates onto the fixed-size canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMapping {
    /// Canvas bounding rect origin in client space
    pub origin: Vec2,
    /// Displayed size of the canvas in client space
    pub display_size: Vec2,
    /// Backing canvas size in game pixels
    pub canvas_size: Vec2,
}

impl CanvasMapping {
    pub fn new(origin: Vec2, display_size: Vec2, canvas_size: Vec2) -> Self {
        Self {
            origin,
            display_size,
            canvas_size,
        }
    }

    /// Client coordinates to canvas pixels. A collapsed canvas maps 1:1.
    pub fn to_canvas(&self, client: Vec2) -> Vec2 {
        let scale = if self.display_size.x > 0.0 && self.display_size.y > 0.0 {
            self.canvas_size / self.display_size
        } else {
            Vec2::ONE
        };
        (client - self.origin) * scale
    }
}

/// Input gathered between ticks
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: TickInput,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer moved or pressed (canvas pixels)
    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pending.aim = Some(pos);
    }

    /// Pointer or touch released (canvas pixels)
    pub fn pointer_released(&mut self, pos: Vec2) {
        self.pending.aim = Some(pos);
        self.pending.release = Some(pos);
    }

    pub fn swap_pressed(&mut self) {
        self.pending.swap = true;
    }

    pub fn pause_pressed(&mut self) {
        self.pending.pause = true;
    }

    /// Toggle the demo autopilot
    pub fn toggle_idle_mode(&mut self) {
        self.pending.idle_mode = !self.pending.idle_mode;
        log::info!("Idle mode: {}", self.pending.idle_mode);
    }

    pub fn set_idle_mode(&mut self, on: bool) {
        self.pending.idle_mode = on;
    }

    /// Keyboard shortcuts. Returns true if the key was used.
    pub fn key_pressed(&mut self, key: &str) -> bool {
        match key {
            "Escape" | "p" | "P" => self.pause_pressed(),
            " " | "Tab" | "s" | "S" => self.swap_pressed(),
            "i" | "I" => self.toggle_idle_mode(),
            _ => return false,
        }
        true
    }

    /// Input for the next tick; clears one-shot actions
    pub fn take(&mut self) -> TickInput {
        let input = self.pending.clone();
        self.pending.release = None;
        self.pending.swap = false;
        self.pending.pause = false;
        input
    }
}
