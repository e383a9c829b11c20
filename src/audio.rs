use anyhow::Context;
use macroquad::audio::{PlaySoundParams, Sound, load_sound_from_bytes, play_sound};

const SAMPLE_RATE: u32 = 44_100;

/// Short sound effects raised by the game.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Cue {
    Eat,
    Bump,
}

#[derive(Copy, Clone, Debug)]
struct Tone {
    frequency_hz: f32,
    duration_ms: u32,
    volume: f32,
}

impl Cue {
    fn tone(self) -> Tone {
        match self {
            Cue::Eat => Tone { frequency_hz: 660.0, duration_ms: 120, volume: 0.35 },
            Cue::Bump => Tone { frequency_hz: 110.0, duration_ms: 280, volume: 0.45 },
        }
    }
}

/// PCM16 mono WAV containing a sine tone.
pub fn generate_wav_sine(frequency_hz: f32, duration_ms: u32, volume: f32) -> Vec<u8> {
    let num_samples: u32 = (SAMPLE_RATE as u64 * duration_ms as u64 / 1000) as u32;
    let mut data: Vec<u8> = Vec::with_capacity(num_samples as usize * 2 + 44);

    let block_align: u16 = 2;
    let byte_rate: u32 = SAMPLE_RATE * block_align as u32;
    let data_size: u32 = num_samples * 2;

    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&(36 + data_size).to_le_bytes());
    data.extend_from_slice(b"WAVE");
    data.extend_from_slice(b"fmt ");
    data.extend_from_slice(&16u32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes()); // PCM
    data.extend_from_slice(&1u16.to_le_bytes()); // mono
    data.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    data.extend_from_slice(&byte_rate.to_le_bytes());
    data.extend_from_slice(&block_align.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes());
    data.extend_from_slice(b"data");
    data.extend_from_slice(&data_size.to_le_bytes());

    let amplitude = volume.clamp(0.0, 1.0) * i16::MAX as f32;
    for n in 0..num_samples {
        let t = n as f32 / SAMPLE_RATE as f32;
        let sample = (amplitude * (std::f32::consts::TAU * frequency_hz * t).sin()) as i16;
        data.extend_from_slice(&sample.to_le_bytes());
    }
    data
}

async fn load_cue(cue: Cue) -> anyhow::Result<Sound> {
    let tone = cue.tone();
    let bytes = generate_wav_sine(tone.frequency_hz, tone.duration_ms, tone.volume);
    load_sound_from_bytes(&bytes)
        .await
        .map_err(|err| anyhow::anyhow!("{err:?}"))
        .with_context(|| format!("loading {cue:?} tone"))
}

/// Synthesized cues. Missing sounds are skipped silently on playback.
pub struct Audio {
    eat: Option<Sound>,
    bump: Option<Sound>,
}

impl Audio {
    pub async fn load() -> Self {
        let mut audio = Self { eat: None, bump: None };
        for cue in [Cue::Eat, Cue::Bump] {
            match load_cue(cue).await {
                Ok(sound) => match cue {
                    Cue::Eat => audio.eat = Some(sound),
                    Cue::Bump => audio.bump = Some(sound),
                },
                Err(err) => log::warn!("audio unavailable: {err:#}"),
            }
        }
        audio
    }

    pub fn play(&self, cue: Cue, enabled: bool) {
        if !enabled {
            return;
        }
        let sound = match cue {
            Cue::Eat => self.eat.as_ref(),
            Cue::Bump => self.bump.as_ref(),
        };
        if let Some(sound) = sound {
            play_sound(sound, PlaySoundParams { looped: false, volume: 1.0 });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    }

    #[test]
    fn wav_header_matches_payload() {
        let wav = generate_wav_sine(660.0, 120, 0.35);
        let samples = 44_100 * 120 / 1000;
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 24), SAMPLE_RATE);
        assert_eq!(u32_at(&wav, 40), samples * 2);
        assert_eq!(u32_at(&wav, 4) as usize, wav.len() - 8);
    }

    #[test]
    fn volume_bounds_the_amplitude() {
        let wav = generate_wav_sine(110.0, 50, 0.45);
        let peak = wav[44..]
            .chunks_exact(2)
            .map(|s| i16::from_le_bytes([s[0], s[1]]).unsigned_abs())
            .max()
            .unwrap();
        assert!(peak > 0);
        assert!(peak as f32 <= 0.45 * i16::MAX as f32 + 1.0);
    }
}
