//! Sound effect cues
//!
//! The simulation never plays audio itself. Hosts map drained [`GameEvent`]s
//! to cues with [`cue_for_event`] and hand them to an [`AudioSink`]. In the
//! browser that sink is [`WebAudio`], which synthesizes every effect with
//! oscillators so no audio files are needed.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bubble fired (also used for swaps)
    Shoot,
    /// Wall bounce or bubble settling into the grid
    Bounce,
    /// Cluster popped
    Pop,
    /// Board cleared
    Win,
    /// Danger line crossed
    GameOver,
}

/// Cue for a game event, if it makes a sound
pub fn cue_for_event(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::Shot | GameEvent::Swapped => Some(SoundEffect::Shoot),
        GameEvent::WallBounce | GameEvent::Snapped { .. } => Some(SoundEffect::Bounce),
        GameEvent::Popped { .. } => Some(SoundEffect::Pop),
        GameEvent::Victory => Some(SoundEffect::Win),
        GameEvent::GameOver => Some(SoundEffect::GameOver),
        GameEvent::Dropped { .. } | GameEvent::Achievement(_) | GameEvent::DailyComplete => None,
    }
}

/// Something that can play sound effects
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    /// Pick up volume and mute changes
    fn apply_settings(&mut self, _settings: &Settings) {}

    /// Unlock output; hosts call this from inside a user gesture
    fn resume(&mut self) {}
}

/// Sink that discards everything (native builds, tests, no audio device)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};
    use crate::settings::Settings;

    /// Web Audio synthesizer
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl WebAudio {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Shoot - quick rising chirp
        fn play_shoot(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 400.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(800.0, t + 0.1)
                .ok();
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Bounce - short low tick
        fn play_bounce(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 200.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.1, t).ok();
            gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.05).ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.05).ok();
        }

        /// Pop - falling blip
        fn play_pop(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 300.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.15)
                .ok();
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Win - major arpeggio
        fn play_win(ctx: &AudioContext, vol: f32) {
            for (i, freq) in [523.25, 659.25, 783.99, 1046.5].iter().enumerate() {
                let delay = i as f64 * 0.1;
                if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Square) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.1, t).ok();
                    gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.3).ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }

        /// Game over - sawtooth slide down
        fn play_game_over(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 150.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(150.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(40.0, t + 0.5)
                .ok();
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.5).ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Shoot => Self::play_shoot(ctx, vol),
                SoundEffect::Bounce => Self::play_bounce(ctx, vol),
                SoundEffect::Pop => Self::play_pop(ctx, vol),
                SoundEffect::Win => Self::play_win(ctx, vol),
                SoundEffect::GameOver => Self::play_game_over(ctx, vol),
            }
        }

        fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Browsers keep the context suspended until a user gesture
        fn resume(&mut self) {
            if let Some(ctx) = &self.ctx {
                if ctx.state() == web_sys::AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementId;
    use crate::sim::HexCell;

    #[test]
    fn test_event_cues() {
        assert_eq!(cue_for_event(&GameEvent::Shot), Some(SoundEffect::Shoot));
        assert_eq!(cue_for_event(&GameEvent::Swapped), Some(SoundEffect::Shoot));
        assert_eq!(cue_for_event(&GameEvent::WallBounce), Some(SoundEffect::Bounce));
        assert_eq!(
            cue_for_event(&GameEvent::Snapped {
                cell: HexCell::new(1, 2)
            }),
            Some(SoundEffect::Bounce)
        );
        assert_eq!(
            cue_for_event(&GameEvent::Popped { count: 3 }),
            Some(SoundEffect::Pop)
        );
        assert_eq!(cue_for_event(&GameEvent::Victory), Some(SoundEffect::Win));
        assert_eq!(cue_for_event(&GameEvent::GameOver), Some(SoundEffect::GameOver));
    }

    #[test]
    fn test_silent_events() {
        assert_eq!(cue_for_event(&GameEvent::Dropped { count: 2 }), None);
        assert_eq!(cue_for_event(&GameEvent::DailyComplete), None);
        assert_eq!(
            cue_for_event(&GameEvent::Achievement(AchievementId::Explorer)),
            None
        );
    }
}
