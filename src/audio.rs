//! Synthesized sound effects. Clips are rendered once from `fundsp` graphs
//! and played fire-and-forget on `rodio` sinks. Without an output device the
//! game plays silently.

use fundsp::prelude::{AudioUnit, lfo, noise, saw, sine, square};
use log::{info, warn};
use rodio::{OutputStream, OutputStreamBuilder, Sink, buffer::SamplesBuffer};

use crate::error::Result;
use crate::game::Events;

const SAMPLE_RATE: u32 = 44_100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sfx {
    ButtonClick,
    BackButton,
    Flap,
    Collision,
}

impl Sfx {
    pub const ALL: [Sfx; 4] = [Sfx::ButtonClick, Sfx::BackButton, Sfx::Flap, Sfx::Collision];

    fn index(self) -> usize {
        match self {
            Self::ButtonClick => 0,
            Self::BackButton => 1,
            Self::Flap => 2,
            Self::Collision => 3,
        }
    }
}

/// Linear ramp from `from` to `to` over `secs`, then held.
fn ramp(from: f32, to: f32, secs: f32, t: f32) -> f32 {
    from + (to - from) * (t / secs).min(1.0)
}

fn render(mut unit: impl AudioUnit, secs: f32) -> Vec<f32> {
    unit.set_sample_rate(SAMPLE_RATE as f64);
    let n = (SAMPLE_RATE as f32 * secs) as usize;
    (0..n).map(|_| unit.get_mono().clamp(-1.0, 1.0)).collect()
}

fn click_clip() -> Vec<f32> {
    let tone = lfo(|_t: f32| 880.0) >> square();
    let gain = lfo(|t: f32| ramp(0.12, 0.0, 0.05, t));
    render(tone * gain, 0.06)
}

fn back_clip() -> Vec<f32> {
    let tone = lfo(|t: f32| ramp(660.0, 440.0, 0.06, t)) >> square();
    let gain = lfo(|t: f32| ramp(0.12, 0.0, 0.07, t));
    render(tone * gain, 0.08)
}

fn flap_clip() -> Vec<f32> {
    let tone = lfo(|t: f32| ramp(300.0, 720.0, 0.08, t)) >> sine::<f32>();
    let gain = lfo(|t: f32| ramp(0.2, 0.0, 0.1, t));
    render(tone * gain, 0.1)
}

/// Falling saw with a burst of noise on top, like rubble.
fn collision_clip() -> Vec<f32> {
    let tone = lfo(|t: f32| ramp(400.0, 80.0, 0.4, t)) >> saw();
    let tone_gain = lfo(|t: f32| ramp(0.15, 0.0, 0.5, t));
    let rubble_gain = lfo(|t: f32| ramp(0.2, 0.0, 0.3, t));
    render(tone * tone_gain + noise() * rubble_gain, 0.5)
}

fn open_output() -> Result<OutputStream> {
    let mut stream = OutputStreamBuilder::open_default_stream()?;
    stream.log_on_drop(false);
    Ok(stream)
}

pub struct AudioManager {
    output: Option<OutputStream>,
    clips: Vec<Vec<f32>>,
    enabled: bool,
}

impl AudioManager {
    /// Opens the default output device, falling back to silence.
    pub fn open(enabled: bool) -> Self {
        let output = match open_output() {
            Ok(stream) => {
                info!("audio output opened");
                Some(stream)
            }
            Err(e) => {
                warn!("{e}, continuing without sound");
                None
            }
        };
        Self::with_output(output, enabled)
    }

    /// A manager that renders clips but never plays them.
    pub fn silent(enabled: bool) -> Self {
        Self::with_output(None, enabled)
    }

    fn with_output(output: Option<OutputStream>, enabled: bool) -> Self {
        let clips = Sfx::ALL
            .iter()
            .map(|sfx| match sfx {
                Sfx::ButtonClick => click_clip(),
                Sfx::BackButton => back_clip(),
                Sfx::Flap => flap_clip(),
                Sfx::Collision => collision_clip(),
            })
            .collect();
        Self {
            output,
            clips,
            enabled,
        }
    }

    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn clip(&self, sfx: Sfx) -> &[f32] {
        &self.clips[sfx.index()]
    }

    /// Starts `sfx` in the background. Does nothing when muted or when no
    /// device is open.
    pub fn play(&self, sfx: Sfx) {
        if !self.enabled {
            return;
        }
        let Some(stream) = &self.output else { return };
        let sink = Sink::connect_new(stream.mixer());
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, self.clip(sfx).to_vec()));
        sink.detach();
    }

    /// Plays the sounds for one frame's events.
    pub fn play_events(&self, events: &Events) {
        for sfx in sounds_for(events) {
            self.play(sfx);
        }
    }
}

/// Sound effects triggered by `events`, in play order.
pub fn sounds_for(events: &Events) -> Vec<Sfx> {
    let mut sounds = Vec::new();
    if events.button_clicked {
        sounds.push(Sfx::ButtonClick);
    }
    if events.back_pressed {
        sounds.push(Sfx::BackButton);
    }
    if events.flapped {
        sounds.push(Sfx::Flap);
    }
    if events.collided {
        sounds.push(Sfx::Collision);
    }
    sounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clips_are_rendered() {
        let audio = AudioManager::silent(true);
        assert!(!audio.has_output());
        for sfx in Sfx::ALL {
            let clip = audio.clip(sfx);
            assert!(!clip.is_empty(), "{sfx:?} is empty");
            assert!(clip.iter().all(|s| s.abs() <= 1.0));
            assert!(clip.iter().any(|s| s.abs() > 0.001), "{sfx:?} is silent");
        }
        assert_eq!(audio.clip(Sfx::Collision).len(), SAMPLE_RATE as usize / 2);
    }

    #[test]
    fn test_play_without_output_is_silent_noop() {
        let mut audio = AudioManager::silent(true);
        audio.play(Sfx::Flap);
        audio.set_enabled(false);
        assert!(!audio.enabled());
        audio.play(Sfx::Collision);
    }

    #[test]
    fn test_sounds_for_events() {
        assert!(sounds_for(&Events::default()).is_empty());
        let events = Events {
            flapped: true,
            collided: true,
            ..Events::default()
        };
        assert_eq!(sounds_for(&events), vec![Sfx::Flap, Sfx::Collision]);
        let events = Events {
            back_pressed: true,
            ..Events::default()
        };
        assert_eq!(sounds_for(&events), vec![Sfx::BackButton]);
    }

    #[test]
    fn test_flap_clip_fades_out() {
        let clip = flap_clip();
        assert_eq!(clip.len(), SAMPLE_RATE as usize / 10);
        let head = clip[..400].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        let tail = clip[clip.len() - 400..].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(head > 0.05, "flap starts too quiet: {head}");
        assert!(tail < head);
    }

    #[test]
    fn test_ramp() {
        assert_eq!(ramp(1.0, 0.0, 0.5, 0.0), 1.0);
        assert_eq!(ramp(1.0, 0.0, 0.5, 0.25), 0.5);
        assert_eq!(ramp(1.0, 0.0, 0.5, 9.0), 0.0);
    }
}
