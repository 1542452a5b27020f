//! Audio system using Web Audio API
//!
//! Procedurally generated tones, no sound files. The tone tables are plain
//! data so they can be checked natively; only [`AudioManager`] touches the
//! browser.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    Jump,
    /// Landed on a block
    Collect,
    GameOver,
    /// Four-note fanfare
    Win,
    LifeLoss,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// A single envelope-shaped tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub waveform: Waveform,
    /// Seconds
    pub duration: f64,
}

/// A tone and its start offset from the moment the effect fires
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledTone {
    pub delay: f64,
    pub tone: Tone,
}

/// Starting gain of every tone; it ramps exponentially to `END_GAIN`
pub const START_GAIN: f32 = 0.1;
pub const END_GAIN: f32 = 0.01;

/// C5 E5 G5 C6
const WIN_MELODY: [f32; 4] = [523.0, 659.0, 784.0, 1047.0];
const WIN_NOTE_LENGTH: f64 = 0.3;

impl SoundEffect {
    pub fn name(self) -> &'static str {
        match self {
            Self::Jump => "jump",
            Self::Collect => "collect",
            Self::GameOver => "gameOver",
            Self::Win => "win",
            Self::LifeLoss => "lifeLoss",
        }
    }

    /// Tones that make up this effect, in start order
    pub fn sequence(self) -> Vec<ScheduledTone> {
        let single = |freq, waveform, duration| {
            vec![ScheduledTone {
                delay: 0.0,
                tone: Tone {
                    freq,
                    waveform,
                    duration,
                },
            }]
        };
        match self {
            Self::Jump => single(440.0, Waveform::Sine, 0.1),
            Self::Collect => single(660.0, Waveform::Square, 0.2),
            Self::GameOver => single(220.0, Waveform::Sawtooth, 0.5),
            Self::LifeLoss => single(150.0, Waveform::Sawtooth, 0.15),
            Self::Win => WIN_MELODY
                .iter()
                .enumerate()
                .map(|(i, &freq)| ScheduledTone {
                    delay: i as f64 * WIN_NOTE_LENGTH,
                    tone: Tone {
                        freq,
                        waveform: Waveform::Triangle,
                        duration: WIN_NOTE_LENGTH,
                    },
                })
                .collect(),
        }
    }
}

/// Lifecycle of the output context, mirroring the Web Audio states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextPhase {
    Suspended,
    Running,
    Closed,
}

/// Whether an effect should be scheduled. A suspended context still queues
/// tones, which start once a pending resume completes.
pub fn should_schedule(enabled: bool, phase: ContextPhase) -> bool {
    enabled && phase != ContextPhase::Closed
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{ContextPhase, END_GAIN, START_GAIN, SoundEffect, Tone, Waveform, should_schedule};
    use crate::platform::AudioSink;

    impl From<Waveform> for OscillatorType {
        fn from(w: Waveform) -> Self {
            match w {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            }
        }
    }

    /// Audio manager for the game
    ///
    /// The context is created lazily on the first enable, since browsers
    /// only allow audio after a user gesture.
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        enabled: bool,
    }

    impl AudioManager {
        pub fn new(enabled: bool) -> Self {
            let mut manager = Self { ctx: None, enabled: false };
            if enabled {
                manager.set_enabled(true);
            }
            manager
        }

        fn context(&mut self) -> Option<&AudioContext> {
            if self.ctx.is_none() {
                self.ctx = AudioContext::new().ok();
                if self.ctx.is_none() {
                    log::warn!("Failed to create AudioContext - audio disabled");
                }
            }
            self.ctx.as_ref()
        }

        /// Create an oscillator routed through a gain node
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

        fn play_tone(ctx: &AudioContext, tone: &Tone, delay: f64) {
            let Some((osc, gain)) = Self::create_osc(ctx, tone.freq, tone.waveform.into()) else {
                return;
            };
            let t = ctx.current_time() + delay;

            gain.gain().set_value_at_time(START_GAIN, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(END_GAIN, t + tone.duration)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + tone.duration).ok();
        }
    }

    fn phase(state: AudioContextState) -> ContextPhase {
        match state {
            AudioContextState::Running => ContextPhase::Running,
            AudioContextState::Closed => ContextPhase::Closed,
            _ => ContextPhase::Suspended,
        }
    }

    impl AudioSink for AudioManager {
        fn play_effect(&mut self, effect: SoundEffect) {
            let Some(ctx) = &self.ctx else { return };
            if !should_schedule(self.enabled, phase(ctx.state())) {
                return;
            }
            for scheduled in effect.sequence() {
                Self::play_tone(ctx, &scheduled.tone, scheduled.delay);
            }
        }

        fn set_enabled(&mut self, enabled: bool) -> bool {
            if enabled {
                match self.context() {
                    Some(ctx) => {
                        let _ = ctx.resume();
                    }
                    None => {
                        self.enabled = false;
                        return false;
                    }
                }
            } else if let Some(ctx) = &self.ctx {
                let _ = ctx.suspend();
            }
            self.enabled = enabled;
            log::info!("Sound {}", if enabled { "enabled" } else { "disabled" });
            enabled
        }
    }
}
