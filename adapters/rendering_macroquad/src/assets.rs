use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use glam::Vec2;
use log::{debug, info};
use macroquad::texture::{self, Texture2D};
use retro_snake_core::SoundEffect;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Resolved asset locations described by a manifest file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AssetPaths {
    pub(crate) food: PathBuf,
    pub(crate) eat_sound: Option<PathBuf>,
    pub(crate) wall_sound: Option<PathBuf>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    version: u32,
    food: String,
    #[serde(default)]
    sounds: SoundManifest,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct SoundManifest {
    eat: Option<String>,
    wall: Option<String>,
}

/// Reads and resolves the manifest stored at `path`.
pub(crate) fn read_manifest(path: &Path) -> Result<AssetPaths> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read asset manifest at {}", path.display()))?;
    let base = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    parse_manifest(&contents, &base)
}

fn parse_manifest(contents: &str, base_path: &Path) -> Result<AssetPaths> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse asset manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported asset manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    if manifest.food.trim().is_empty() {
        bail!("asset manifest must name a food image");
    }

    Ok(AssetPaths {
        food: base_path.join(manifest.food),
        eat_sound: manifest.sounds.eat.map(|relative| base_path.join(relative)),
        wall_sound: manifest.sounds.wall.map(|relative| base_path.join(relative)),
    })
}

/// Food texture owned by the adapter for as long as the window is open.
#[derive(Debug)]
pub(crate) struct FoodSprite {
    texture: Texture2D,
}

impl FoodSprite {
    fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read food image at {}", path.display()))?;
        Ok(Self {
            texture: Texture2D::from_file_with_format(&bytes, None),
        })
    }

    /// Draws the sprite at its native size with its top-left corner at `origin`.
    pub(crate) fn draw(&self, origin: Vec2) {
        texture::draw_texture(self.texture, origin.x, origin.y, macroquad::color::WHITE);
    }
}

impl Drop for FoodSprite {
    fn drop(&mut self) {
        self.texture.delete();
    }
}

/// Clip per sound effect; generic so the mapping works without an audio device.
#[cfg(feature = "audio")]
#[derive(Debug)]
struct SoundBank<C = macroquad::audio::Sound> {
    eat: Option<C>,
    wall: Option<C>,
}

#[cfg(feature = "audio")]
impl<C> Default for SoundBank<C> {
    fn default() -> Self {
        Self {
            eat: None,
            wall: None,
        }
    }
}

#[cfg(feature = "audio")]
impl SoundBank {
    async fn load(paths: &AssetPaths) -> Result<Self> {
        Ok(Self {
            eat: load_sound(paths.eat_sound.as_deref()).await?,
            wall: load_sound(paths.wall_sound.as_deref()).await?,
        })
    }
}

#[cfg(feature = "audio")]
impl<C: Copy> SoundBank<C> {
    fn get(&self, sound: SoundEffect) -> Option<C> {
        match sound {
            SoundEffect::Eat => self.eat,
            SoundEffect::Wall => self.wall,
        }
    }
}

#[cfg(feature = "audio")]
async fn load_sound(path: Option<&Path>) -> Result<Option<macroquad::audio::Sound>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let bytes =
        fs::read(path).with_context(|| format!("failed to read sound at {}", path.display()))?;
    let sound = macroquad::audio::load_sound_from_bytes(&bytes)
        .await
        .map_err(|error| anyhow::anyhow!("{error:?}"))
        .with_context(|| format!("failed to decode sound at {}", path.display()))?;
    Ok(Some(sound))
}

#[cfg(not(feature = "audio"))]
fn log_skipped_sounds(paths: &AssetPaths) {
    for skipped in [&paths.eat_sound, &paths.wall_sound].into_iter().flatten() {
        info!(
            "audio support disabled; skipping sound {}",
            skipped.display()
        );
    }
}

/// Textures and sounds loaded from a manifest.
#[derive(Debug, Default)]
pub(crate) struct GameAssets {
    food: Option<FoodSprite>,
    #[cfg(feature = "audio")]
    sounds: SoundBank,
}

impl GameAssets {
    /// Loads every asset named by the manifest at `path`.
    ///
    /// Requires an active macroquad context.
    pub(crate) async fn load(path: &Path) -> Result<Self> {
        let paths = read_manifest(path)?;
        let food = FoodSprite::load(&paths.food)?;
        info!("loaded food sprite from {}", paths.food.display());

        #[cfg(feature = "audio")]
        let sounds = SoundBank::load(&paths).await?;
        #[cfg(not(feature = "audio"))]
        log_skipped_sounds(&paths);

        Ok(Self {
            food: Some(food),
            #[cfg(feature = "audio")]
            sounds,
        })
    }

    /// Loaded food sprite, if any.
    pub(crate) fn food(&self) -> Option<&FoodSprite> {
        self.food.as_ref()
    }

    /// Plays `sound` once, or logs it when no clip is available.
    pub(crate) fn play(&self, sound: SoundEffect) {
        #[cfg(feature = "audio")]
        if let Some(clip) = self.sounds.get(sound) {
            macroquad::audio::play_sound_once(clip);
            return;
        }

        debug!("sound effect {sound:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_resolves_paths_relative_to_base_directory() {
        let manifest = r#"
            version = 1
            food = "graphics/food.png"

            [sounds]
            eat = "sounds/eat.mp3"
            wall = "sounds/wall.mp3"
        "#;

        let parsed = parse_manifest(manifest, Path::new("root")).expect("manifest should parse");
        assert_eq!(
            parsed,
            AssetPaths {
                food: PathBuf::from("root/graphics/food.png"),
                eat_sound: Some(PathBuf::from("root/sounds/eat.mp3")),
                wall_sound: Some(PathBuf::from("root/sounds/wall.mp3")),
            }
        );
    }

    #[test]
    fn sounds_are_optional() {
        let manifest = r#"
            version = 1
            food = "food.png"
        "#;

        let parsed = parse_manifest(manifest, Path::new("assets")).expect("manifest should parse");
        assert_eq!(parsed.eat_sound, None);
        assert_eq!(parsed.wall_sound, None);
    }

    #[test]
    fn manifest_rejects_unknown_versions() {
        let manifest = r#"
            version = 2
            food = "food.png"
        "#;

        let error = parse_manifest(manifest, Path::new("assets")).expect_err("version 2");
        assert!(error.to_string().contains("unsupported asset manifest version"));
    }

    #[test]
    fn manifest_rejects_unknown_keys() {
        let manifest = r#"
            version = 1
            food = "food.png"

            [sounds]
            eat = "eat.mp3"
            music = "theme.mp3"
        "#;

        assert!(parse_manifest(manifest, Path::new("assets")).is_err());
    }

    #[test]
    fn manifest_requires_food_image() {
        assert!(parse_manifest("version = 1", Path::new("assets")).is_err());
        assert!(parse_manifest("version = 1\nfood = \" \"", Path::new("assets")).is_err());
    }

    #[cfg(feature = "audio")]
    #[test]
    fn sound_bank_maps_each_effect_to_its_clip() {
        let bank = SoundBank {
            eat: Some(1_u8),
            wall: Some(2_u8),
        };

        assert_eq!(bank.get(SoundEffect::Eat), Some(1));
        assert_eq!(bank.get(SoundEffect::Wall), Some(2));
    }

    #[cfg(feature = "audio")]
    #[test]
    fn sound_bank_without_clips_falls_back_to_logging() {
        let bank = SoundBank::<u8>::default();
        assert_eq!(bank.get(SoundEffect::Eat), None);
        assert_eq!(bank.get(SoundEffect::Wall), None);

        let mut partial = SoundBank::<u8>::default();
        partial.wall = Some(7);
        assert_eq!(partial.get(SoundEffect::Eat), None);
        assert_eq!(partial.get(SoundEffect::Wall), Some(7));
    }

    #[test]
    fn missing_manifest_reports_path() {
        let error = read_manifest(Path::new("does/not/exist.toml")).expect_err("missing file");
        assert!(format!("{error:#}").contains("does/not/exist.toml"));
    }
}
