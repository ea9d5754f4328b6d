use std::sync::Arc;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use crate::assets::Clip;

/// Single-voice cue player. Starting a cue stops the one before it.
pub struct AudioOutput {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    current: Option<Sink>,
    volume: f32,
    muted: bool,
}

impl AudioOutput {
    /// Open the default output device. `None` if there isn't one; the pet
    /// then runs silent.
    pub fn new(volume: f32, muted: bool) -> Option<Self> {
        match OutputStream::try_default() {
            Ok((stream, handle)) => Some(Self {
                _stream: stream,
                handle,
                current: None,
                volume,
                muted,
            }),
            Err(e) => {
                log::warn!("No audio output ({e}), running silent");
                None
            }
        }
    }

    pub fn play(&mut self, clip: &Clip) {
        if self.muted {
            return;
        }
        if let Some(previous) = self.current.take() {
            previous.stop();
        }

        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(e) => {
                log::warn!("Failed to start sound: {e}");
                return;
            }
        };
        sink.set_volume(self.volume);
        sink.append(ClipSource::new(clip));
        self.current = Some(sink);
    }
}

/// Plays a [`Clip`] straight out of its shared sample buffer.
pub struct ClipSource {
    samples: Arc<[i16]>,
    next: usize,
    channels: u16,
    sample_rate: u32,
}

impl ClipSource {
    pub fn new(clip: &Clip) -> Self {
        Self {
            samples: Arc::clone(&clip.samples),
            next: 0,
            channels: clip.channels,
            sample_rate: clip.sample_rate,
        }
    }
}

impl Iterator for ClipSource {
    type Item = i16;

    fn next(&mut self) -> Option<i16> {
        let sample = self.samples.get(self.next).copied()?;
        self.next += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.samples.len() - self.next;
        (left, Some(left))
    }
}

impl Source for ClipSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.samples.len() - self.next)
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        let frames = self.samples.len() as u64 / self.channels.max(1) as u64;
        Some(Duration::from_secs_f64(
            frames as f64 / self.sample_rate.max(1) as f64,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo_clip() -> Clip {
        Clip {
            channels: 2,
            sample_rate: 4,
            samples: Arc::from(vec![1i16, -1, 2, -2, 3, -3, 4, -4]),
        }
    }

    #[test]
    fn source_shares_the_clip_buffer() {
        let clip = stereo_clip();
        let source = ClipSource::new(&clip);
        assert!(Arc::ptr_eq(&source.samples, &clip.samples));
        assert_eq!(Arc::strong_count(&clip.samples), 2);
        drop(source);
        assert_eq!(Arc::strong_count(&clip.samples), 1);
    }

    #[test]
    fn source_yields_every_sample_once() {
        let clip = stereo_clip();
        let mut source = ClipSource::new(&clip);
        assert_eq!((source.channels(), source.sample_rate()), (2, 4));
        assert_eq!(source.total_duration(), Some(Duration::from_secs(1)));
        assert_eq!(source.size_hint(), (8, Some(8)));
        assert_eq!(source.next(), Some(1));
        assert_eq!(source.current_frame_len(), Some(7));
        let rest: Vec<i16> = source.collect();
        assert_eq!(rest, vec![-1, 2, -2, 3, -3, 4, -4]);
    }
}
