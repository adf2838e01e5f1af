//! Host-side session wiring
//!
//! Owns the simulation plus everything that outlives a single attempt:
//! achievements, the daily record, settings, storage and audio. Each frame
//! takes the queued input, ticks once and routes the resulting events.

use crate::achievements::AchievementBook;
use crate::audio::{AudioSink, cue_for_event};
use crate::daily::DailyRecord;
use crate::persistence::KeyValueStore;
use crate::platform::InputQueue;
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameMode, GameState};

pub struct Session<S: KeyValueStore, A: AudioSink> {
    pub state: GameState,
    pub input: InputQueue,
    pub achievements: AchievementBook,
    pub daily: DailyRecord,
    pub settings: Settings,
    /// Date key for daily boards
    pub today: String,
    store: S,
    audio: A,
}

impl<S: KeyValueStore, A: AudioSink> Session<S, A> {
    /// Load saved progress from `store` and sit on the menu
    pub fn new(seed: u64, store: S, mut audio: A, today: &str) -> Self {
        let settings = Settings::load(&store);
        let achievements = AchievementBook::load(&store);
        let daily = DailyRecord::load(&store).for_today(today);

        let mut state = GameState::new(seed);
        state.max_particles = settings.max_particles();
        state.show_aim_guide = settings.show_aim_guide;
        audio.apply_settings(&settings);

        Self {
            state,
            input: InputQueue::new(),
            achievements,
            daily,
            settings,
            today: today.to_string(),
            store,
            audio,
        }
    }

    pub fn start(&mut self, mode: GameMode) {
        log::info!("Starting {:?} game", mode);
        sim::start_game(&mut self.state, mode, &self.today);
    }

    pub fn restart(&mut self) {
        sim::restart(&mut self.state);
    }

    pub fn quit_to_menu(&mut self) {
        sim::quit_to_menu(&mut self.state);
    }

    /// Replace settings, apply them and persist
    pub fn update_settings(&mut self, settings: Settings) {
        self.state.max_particles = settings.max_particles();
        self.state.show_aim_guide = settings.show_aim_guide;
        self.audio.apply_settings(&settings);
        if let Err(e) = settings.save(&mut self.store) {
            log::warn!("Failed to save settings: {}", e);
        }
        self.settings = settings;
    }

    /// Forward a user gesture to the audio sink
    pub fn resume_audio(&mut self) {
        self.audio.resume();
    }

    /// Advance one tick and handle its events. Returns the events.
    pub fn frame(&mut self) -> Vec<GameEvent> {
        let input = self.input.take();
        sim::tick(&mut self.state, &input);

        let events = self.state.drain_events();
        for event in &events {
            self.route(event);
        }
        events
    }

    fn route(&mut self, event: &GameEvent) {
        if let Some(cue) = cue_for_event(event) {
            self.audio.play(cue);
        }
        match event {
            GameEvent::Achievement(id) => {
                if self.achievements.unlock(*id) {
                    if let Err(e) = self.achievements.save(&mut self.store) {
                        log::warn!("Failed to save achievements: {}", e);
                    }
                }
            }
            GameEvent::DailyComplete => {
                if self.daily.mark_completed(&self.today) {
                    if let Err(e) = self.daily.save(&mut self.store) {
                        log::warn!("Failed to save daily record: {}", e);
                    }
                }
            }
            _ => {}
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementId;
    use crate::audio::SoundEffect;
    use crate::persistence::{DAILY_KEY, MemoryStore};
    use crate::sim::{Bubble, BubbleColor, GamePhase, HexCell};
    use glam::Vec2;

    /// Collects played cues
    #[derive(Default)]
    struct Recorder {
        played: Vec<SoundEffect>,
        volume: f32,
        resumed: u32,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect) {
            self.played.push(effect);
        }

        fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        fn resume(&mut self) {
            self.resumed += 1;
        }
    }

    const TODAY: &str = "2024-1-15";

    fn session() -> Session<MemoryStore, Recorder> {
        Session::new(42, MemoryStore::new(), Recorder::default(), TODAY)
    }

    /// Leave a single popping bubble so the next ticks clear the board
    fn nearly_clear(session: &mut Session<MemoryStore, Recorder>) {
        let mut last = Bubble::new(1, HexCell::new(0, 0), BubbleColor::Red);
        last.start_pop();
        session.state.bubbles = vec![last];
    }

    #[test]
    fn test_new_session_on_menu() {
        let s = session();
        assert_eq!(s.state.phase, GamePhase::Menu);
        assert_eq!(s.daily.last_played_date.as_deref(), Some(TODAY));
        assert!((s.audio.volume - Settings::default().effective_volume()).abs() < 0.001);
    }

    #[test]
    fn test_shot_plays_cue() {
        let mut s = session();
        s.start(GameMode::Classic);
        s.input.pointer_released(Vec2::new(200.0, 300.0));
        let events = s.frame();
        assert!(events.contains(&GameEvent::Shot));
        assert_eq!(s.audio.played.first(), Some(&SoundEffect::Shoot));
    }

    #[test]
    fn test_victory_unlocks_and_persists() {
        let mut s = session();
        s.start(GameMode::Classic);
        nearly_clear(&mut s);
        for _ in 0..20 {
            s.frame();
        }
        assert_eq!(s.state.phase, GamePhase::Victory);
        assert!(s.achievements.is_unlocked(AchievementId::FirstBlood));
        assert!(s.achievements.is_unlocked(AchievementId::Sharpshooter));
        assert!(s.audio.played.contains(&SoundEffect::Win));

        let reloaded = AchievementBook::load(s.store());
        assert_eq!(reloaded, s.achievements);
    }

    #[test]
    fn test_daily_clear_is_recorded() {
        let mut s = session();
        s.start(GameMode::Daily);
        nearly_clear(&mut s);
        for _ in 0..20 {
            s.frame();
        }
        assert!(s.daily.is_completed(TODAY));
        assert!(s.achievements.is_unlocked(AchievementId::DailyHero));
        assert!(s.store().get(DAILY_KEY).unwrap().is_some());

        // A new session on the same day remembers it
        let store = s.store().clone();
        let again = Session::new(7, store, Recorder::default(), TODAY);
        assert!(again.daily.is_completed(TODAY));
        assert!(again.achievements.is_unlocked(AchievementId::DailyHero));
    }

    #[test]
    fn test_settings_apply() {
        let mut s = session();
        s.update_settings(Settings {
            muted: true,
            particles: false,
            ..Default::default()
        });
        assert_eq!(s.state.max_particles, 0);
        assert_eq!(s.audio.volume, 0.0);
        assert!(Settings::load(s.store()).muted);
    }

    #[test]
    fn test_aim_guide_setting_reaches_view() {
        let mut s = session();
        s.start(GameMode::Classic);
        s.input.pointer_moved(Vec2::new(200.0, 300.0));
        s.frame();
        assert!(s.state.view().aim_guide.is_some());

        s.update_settings(Settings {
            show_aim_guide: false,
            ..Default::default()
        });
        assert_eq!(s.state.view().aim_guide, None);

        // Restored from storage by the next session
        let store = s.store().clone();
        let again = Session::new(9, store, Recorder::default(), TODAY);
        assert!(!again.state.show_aim_guide);
    }

    #[test]
    fn test_resume_audio_reaches_sink() {
        let mut s = session();
        s.resume_audio();
        s.resume_audio();
        assert_eq!(s.audio.resumed, 2);
    }
}
