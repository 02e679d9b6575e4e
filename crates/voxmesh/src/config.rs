//! # Mesher Configuration
//!
//! Plain data, loadable from TOML:
//!
//! ```toml
//! open_end = true
//!
//! [shading]
//! ao_brightness = [0, 153, 204, 255]
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};

/// Default brightness byte for each ambient-occlusion level (0 = enclosed, 3 = open).
pub const DEFAULT_AO_BRIGHTNESS: [u8; 4] = [0, 153, 204, 255];

/// Shading parameters handed to the quad emitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    /// Brightness byte written for AO levels 0..=3.
    pub ao_brightness: [u8; 4],
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            ao_brightness: DEFAULT_AO_BRIGHTNESS,
        }
    }
}

impl ShadingConfig {
    /// Brightness byte for an AO level. Levels above 3 saturate.
    #[inline]
    #[must_use]
    pub fn brightness(&self, level: u8) -> u8 {
        self.ao_brightness[usize::from(level.min(3))]
    }
}

/// Build options shared by every surface variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MesherConfig {
    /// Suppress caps on the high side of each axis, as if the grid continued.
    pub open_end: bool,
    /// Emitter shading table.
    pub shading: ShadingConfig,
}

impl MesherConfig {
    /// Closed-mode configuration with default shading.
    #[must_use]
    pub fn closed() -> Self {
        Self::default()
    }

    /// Open-end configuration with default shading.
    #[must_use]
    pub fn open_end() -> Self {
        Self {
            open_end: true,
            ..Self::default()
        }
    }

    /// How far the un-padded lattice is shrunk from the padded high bound.
    #[inline]
    #[must_use]
    pub const fn trim(&self) -> u32 {
        if self.open_end {
            2
        } else {
            1
        }
    }

    /// How many lattice rows are dropped from the u/v extents of each slice.
    #[inline]
    #[must_use]
    pub const fn planar_offset(&self) -> u32 {
        2 - self.trim()
    }

    /// Parses a configuration from TOML text. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidConfig`] if the text is not valid TOML or
    /// has fields of the wrong type.
    pub fn from_toml_str(text: &str) -> MeshResult<Self> {
        toml::from_str(text).map_err(|e| MeshError::InvalidConfig(e.to_string()))
    }
}

/// Which surface a build produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceVariant {
    /// Flat-colored faces.
    Plain,
    /// Faces with per-corner ambient occlusion.
    #[default]
    AmbientOcclusion,
    /// Upward floors only, no colors.
    Walkable,
}

/// A variant plus its configuration, for one-shot builds.
///
/// ```toml
/// variant = "walkable"
/// open_end = false
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshOptions {
    /// Surface to produce.
    pub variant: SurfaceVariant,
    /// Shared build options.
    #[serde(flatten)]
    pub config: MesherConfig,
}

impl MeshOptions {
    /// Options for a variant with default configuration.
    #[must_use]
    pub fn new(variant: SurfaceVariant) -> Self {
        Self {
            variant,
            config: MesherConfig::default(),
        }
    }

    /// Parses options from TOML text. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidConfig`] on malformed text or an unknown
    /// variant name.
    pub fn from_toml_str(text: &str) -> MeshResult<Self> {
        toml::from_str(text).map_err(|e| MeshError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_and_offset() {
        let closed = MesherConfig::closed();
        assert_eq!(closed.trim(), 1);
        assert_eq!(closed.planar_offset(), 1);

        let open = MesherConfig::open_end();
        assert_eq!(open.trim(), 2);
        assert_eq!(open.planar_offset(), 0);
    }

    #[test]
    fn test_from_toml() {
        let config = MesherConfig::from_toml_str(
            "open_end = true\n[shading]\nao_brightness = [10, 20, 30, 40]\n",
        )
        .unwrap();

        assert!(config.open_end);
        assert_eq!(config.shading.brightness(0), 10);
        assert_eq!(config.shading.brightness(3), 40);
    }

    #[test]
    fn test_from_toml_defaults() {
        let config = MesherConfig::from_toml_str("").unwrap();
        assert_eq!(config, MesherConfig::default());
        assert_eq!(config.shading.ao_brightness, DEFAULT_AO_BRIGHTNESS);
    }

    #[test]
    fn test_from_toml_rejects_bad_types() {
        let err = MesherConfig::from_toml_str("open_end = \"yes\"").unwrap_err();
        assert!(matches!(err, MeshError::InvalidConfig(_)));
    }

    #[test]
    fn test_options_from_toml() {
        let options = MeshOptions::from_toml_str(
            "variant = \"walkable\"\nopen_end = true\n[shading]\nao_brightness = [1, 2, 3, 4]\n",
        )
        .unwrap();

        assert_eq!(options.variant, SurfaceVariant::Walkable);
        assert!(options.config.open_end);
        assert_eq!(options.config.shading.ao_brightness, [1, 2, 3, 4]);

        let defaults = MeshOptions::from_toml_str("").unwrap();
        assert_eq!(defaults.variant, SurfaceVariant::AmbientOcclusion);
        assert!(MeshOptions::from_toml_str("variant = \"wireframe\"").is_err());
    }
}
