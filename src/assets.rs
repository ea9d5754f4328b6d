use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rodio::{Decoder, Source};

use crate::error::{NekoError, Result};
use crate::pet::{self, Cue};

/// Decoded RGBA8 sprite.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decoded PCM sound, ready to hand to the mixer.
#[derive(Debug, Clone)]
pub struct Clip {
    pub channels: u16,
    pub sample_rate: u32,
    pub samples: Arc<[i16]>,
}

/// Sprites and sounds keyed by base file name (extension stripped).
/// Filled once at startup, read-only afterwards.
#[derive(Debug, Default)]
pub struct Assets {
    pub sprites: HashMap<String, Sprite>,
    pub sounds: HashMap<String, Clip>,
}

impl Assets {
    /// Load every `.png` and `.wav` in `dir` and check nothing is missing.
    pub fn load(dir: &Path) -> Result<Self> {
        let assets = Self::load_dir(dir)?;
        assets.validate()?;
        log::info!(
            "Loaded {} sprites and {} sounds from {}",
            assets.sprites.len(),
            assets.sounds.len(),
            dir.display()
        );
        Ok(assets)
    }

    fn load_dir(dir: &Path) -> Result<Self> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| NekoError::Io { path, source }
        };

        let mut assets = Self::default();
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(io_err(dir))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()
            .map_err(io_err(dir))?;
        paths.sort();

        for path in paths {
            let (Some(stem), Some(ext)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.extension().and_then(|s| s.to_str()),
            ) else {
                continue;
            };
            let name = stem.to_string();

            match ext {
                "png" => {
                    let data = std::fs::read(&path).map_err(io_err(&path))?;
                    assets.sprites.insert(name, decode_sprite(&data, &path)?);
                }
                "wav" => {
                    let data = std::fs::read(&path).map_err(io_err(&path))?;
                    assets.sounds.insert(name, decode_clip(data, &path)?);
                }
                _ => log::warn!("Skipping unrecognized asset {}", path.display()),
            }
        }

        Ok(assets)
    }

    /// Every sprite and cue the pet can ask for must be present.
    pub fn validate(&self) -> Result<()> {
        for key in pet::required_sprite_keys() {
            let name = key.to_string();
            if !self.sprites.contains_key(&name) {
                return Err(NekoError::MissingSprite(name));
            }
        }
        for cue in Cue::ALL {
            if !self.sounds.contains_key(cue.asset_name()) {
                return Err(NekoError::MissingCue(cue.asset_name().to_string()));
            }
        }
        Ok(())
    }

    pub fn clip(&self, cue: Cue) -> Option<&Clip> {
        self.sounds.get(cue.asset_name())
    }
}

fn decode_sprite(data: &[u8], path: &Path) -> Result<Sprite> {
    let image = image::load_from_memory(data)
        .map_err(|source| NekoError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    Ok(Sprite {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

fn decode_clip(data: Vec<u8>, path: &Path) -> Result<Clip> {
    let decoder = Decoder::new(Cursor::new(data)).map_err(|source| NekoError::Audio {
        path: path.to_path_buf(),
        source,
    })?;
    let channels = decoder.channels();
    let sample_rate = decoder.sample_rate();
    let samples: Vec<i16> = decoder.collect();
    Ok(Clip {
        channels,
        sample_rate,
        samples: samples.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_sprite() -> Sprite {
        Sprite {
            width: 1,
            height: 1,
            rgba: vec![0; 4],
        }
    }

    fn silent_clip() -> Clip {
        Clip {
            channels: 1,
            sample_rate: 8000,
            samples: Arc::from(vec![0i16; 4]),
        }
    }

    fn complete() -> Assets {
        let mut assets = Assets::default();
        for key in pet::required_sprite_keys() {
            assets.sprites.insert(key.to_string(), blank_sprite());
        }
        for cue in Cue::ALL {
            assets.sounds.insert(cue.asset_name().to_string(), silent_clip());
        }
        assets
    }

    /// Minimal 16-bit mono PCM WAV.
    fn wav_bytes(samples: &[i16]) -> Vec<u8> {
        let data_len = (samples.len() * 2) as u32;
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&1u16.to_le_bytes()); // mono
        out.extend_from_slice(&8000u32.to_le_bytes());
        out.extend_from_slice(&16000u32.to_le_bytes()); // byte rate
        out.extend_from_slice(&2u16.to_le_bytes()); // block align
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for s in samples {
            out.extend_from_slice(&s.to_le_bytes());
        }
        out
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("neko-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn complete_tables_validate() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn missing_sprite_is_reported() {
        let mut assets = complete();
        assets.sprites.remove("downleft2");
        match assets.validate() {
            Err(NekoError::MissingSprite(key)) => assert_eq!(key, "downleft2"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_cue_is_reported() {
        let mut assets = complete();
        assets.sounds.remove("idle3");
        match assets.validate() {
            Err(NekoError::MissingCue(name)) => assert_eq!(name, "idle3"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn loads_png_and_wav_by_stem() {
        let dir = scratch_dir("load");
        image::RgbaImage::from_pixel(2, 3, image::Rgba([255, 0, 0, 255]))
            .save(dir.join("awake.png"))
            .unwrap();
        std::fs::write(dir.join("sleep.wav"), wav_bytes(&[0, 100, -100, 0])).unwrap();
        std::fs::write(dir.join("notes.txt"), b"ignored").unwrap();

        let assets = Assets::load_dir(&dir).unwrap();
        let sprite = &assets.sprites["awake"];
        assert_eq!((sprite.width, sprite.height), (2, 3));
        assert_eq!(&sprite.rgba[..4], &[255, 0, 0, 255]);
        let clip = assets.clip(Cue::Sleep).unwrap();
        assert_eq!((clip.channels, clip.sample_rate), (1, 8000));
        assert_eq!(&clip.samples[..], &[0, 100, -100, 0]);

        // Incomplete set: load() refuses to start.
        assert!(Assets::load(&dir).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_png_is_an_error() {
        let dir = scratch_dir("corrupt");
        std::fs::write(dir.join("awake.png"), b"not a png").unwrap();
        assert!(matches!(
            Assets::load_dir(&dir),
            Err(NekoError::Image { .. })
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
