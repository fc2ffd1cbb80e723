//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::hud::Cue;
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Sphere landed in the bucket
    Catch,
    /// Sphere hit the floor
    Miss,
    /// Difficulty went up
    LevelUp,
    /// Last life lost
    GameOver,
    /// Finished session made the leaderboard
    HighScore,
}

impl From<Cue> for SoundEffect {
    fn from(cue: Cue) -> Self {
        match cue {
            Cue::Catch => SoundEffect::Catch,
            Cue::Miss => SoundEffect::Miss,
            Cue::LevelUp => SoundEffect::LevelUp,
            Cue::GameOver => SoundEffect::GameOver,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_sfx_volume(),
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_sfx_volume();
    }

    /// Temporary mute (window blur)
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Play a sound effect; never blocks, failures are ignored
    pub fn play(&self, effect: SoundEffect) {
        let vol = if self.muted { 0.0 } else { self.volume };
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Catch => self.play_catch(ctx, vol),
            SoundEffect::Miss => self.play_miss(ctx, vol),
            SoundEffect::LevelUp => {
                self.arpeggio(ctx, vol, &[400.0, 500.0, 600.0, 800.0], 0.1, OscillatorType::Triangle)
            }
            SoundEffect::GameOver => {
                self.arpeggio(ctx, vol, &[400.0, 350.0, 300.0, 200.0], 0.2, OscillatorType::Sine)
            }
            SoundEffect::HighScore => self.arpeggio(
                ctx,
                vol,
                &[500.0, 600.0, 700.0, 800.0, 1000.0],
                0.08,
                OscillatorType::Triangle,
            ),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
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

    /// Catch - bright two-note ding
    fn play_catch(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [800.0, 1200.0].iter().enumerate() {
            let delay = i as f64 * 0.06;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Miss - dull thud sliding down
    fn play_miss(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(150.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(40.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
    }

    /// Notes played one after another, `step` seconds apart
    fn arpeggio(
        &self,
        ctx: &AudioContext,
        vol: f32,
        notes: &[f32],
        step: f64,
        osc_type: OscillatorType,
    ) {
        for (i, freq) in notes.iter().enumerate() {
            let delay = i as f64 * step;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + step * 2.5)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + step * 3.0).ok();
            }
        }
    }
}
