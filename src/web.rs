//! Browser binding
//!
//! JavaScript owns the canvas and the animation loop. It forwards pointer and
//! key events here, calls `frame()` once per animation frame and draws the
//! returned JSON snapshot.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::audio::WebAudio;
use crate::consts::{GAME_HEIGHT, GAME_WIDTH};
use crate::daily::today_string;
use crate::host::Session;
use crate::persistence::{KeyValueStore, LocalStore, MemoryStore, StorageError};
use crate::platform::CanvasMapping;
use crate::settings::Settings;
use crate::sim::{GameMode, palette};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Hex Pop starting...");
}

/// LocalStorage when the browser allows it, otherwise progress lives only for
/// this page load
enum BrowserStore {
    Local(LocalStore),
    Memory(MemoryStore),
}

impl BrowserStore {
    fn open() -> Self {
        match LocalStore::open() {
            Ok(store) => BrowserStore::Local(store),
            Err(e) => {
                log::warn!("{} - progress will not be saved", e);
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            BrowserStore::Local(s) => s.get(key),
            BrowserStore::Memory(s) => s.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            BrowserStore::Local(s) => s.set(key, value),
            BrowserStore::Memory(s) => s.set(key, value),
        }
    }
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session<BrowserStore, WebAudio>,
    mapping: CanvasMapping,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64) -> WebGame {
        let store = BrowserStore::open();
        let audio = WebAudio::new(&Settings::load(&store));
        let canvas = Vec2::new(GAME_WIDTH, GAME_HEIGHT);
        WebGame {
            session: Session::new(seed as u64, store, audio, &today_string()),
            mapping: CanvasMapping::new(Vec2::ZERO, canvas, canvas),
        }
    }

    /// Canvas bounding rect in client coordinates
    pub fn set_canvas_rect(&mut self, left: f32, top: f32, width: f32, height: f32) {
        self.mapping = CanvasMapping::new(
            Vec2::new(left, top),
            Vec2::new(width, height),
            Vec2::new(GAME_WIDTH, GAME_HEIGHT),
        );
    }

    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) {
        let pos = self.mapping.to_canvas(Vec2::new(client_x, client_y));
        self.session.input.pointer_moved(pos);
    }

    pub fn pointer_up(&mut self, client_x: f32, client_y: f32) {
        self.session.resume_audio();
        let pos = self.mapping.to_canvas(Vec2::new(client_x, client_y));
        self.session.input.pointer_released(pos);
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        self.session.resume_audio();
        self.session.input.key_pressed(key)
    }

    pub fn swap(&mut self) {
        self.session.input.swap_pressed();
    }

    pub fn pause(&mut self) {
        self.session.input.pause_pressed();
    }

    pub fn start_classic(&mut self) {
        self.session.start(GameMode::Classic);
    }

    /// Refreshes the date first so a page left open overnight gets the new board
    pub fn start_daily(&mut self) {
        let today = today_string();
        if today != self.session.today {
            self.session.daily = std::mem::take(&mut self.session.daily).for_today(&today);
            self.session.today = today;
        }
        self.session.start(GameMode::Daily);
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    pub fn quit_to_menu(&mut self) {
        self.session.quit_to_menu();
    }

    pub fn daily_completed(&self) -> bool {
        self.session.daily.is_completed(&self.session.today)
    }

    pub fn achievements_json(&self) -> String {
        serde_json::to_string(&self.session.achievements.entries).unwrap_or_else(|e| {
            log::warn!("Failed to encode achievements: {}", e);
            "[]".to_string()
        })
    }

    /// Color names used in frames, with their CSS values
    pub fn palette_json(&self) -> String {
        serde_json::to_string(&palette()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn settings_json(&self) -> String {
        serde_json::to_string(&self.session.settings).unwrap_or_else(|_| "{}".to_string())
    }

    /// Apply settings from JSON. Returns false if they could not be parsed.
    pub fn set_settings_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => {
                self.session.update_settings(settings);
                true
            }
            Err(e) => {
                log::warn!("Ignoring invalid settings: {}", e);
                false
            }
        }
    }

    /// Advance one tick and return the frame snapshot as JSON
    pub fn frame(&mut self) -> String {
        self.session.frame();
        serde_json::to_string(&self.session.state.view()).unwrap_or_else(|e| {
            log::warn!("Failed to encode frame: {}", e);
            "null".to_string()
        })
    }
}
