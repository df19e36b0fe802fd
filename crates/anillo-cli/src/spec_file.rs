//! TOML spec files for sequencer builds.
//!
//! A spec file captures everything `anillo build` would otherwise take as
//! flags, so a sequencer layout can be versioned and rebuilt:
//!
//! ```toml
//! steps = 8
//! cardinality = 3
//! style = "cyclic"
//! rotation = true
//! namespaced = true
//! ```

use anillo_core::{SequencerSpec, WidgetStyle};
use serde::Deserialize;
use std::path::Path;

/// On-disk form of a [`SequencerSpec`].
#[derive(Debug, Deserialize)]
pub struct SpecFile {
    /// Number of steps on the ring.
    pub steps: usize,
    /// Per-step state cardinality.
    #[serde(default = "default_cardinality")]
    pub cardinality: u32,
    /// Widget style: `"toggle"` or `"cyclic"`.
    #[serde(default)]
    pub style: StyleName,
    /// Build the rotation subsystem.
    #[serde(default)]
    pub rotation: bool,
    /// Namespace step addresses with the instantiation-scope token.
    #[serde(default)]
    pub namespaced: bool,
    /// Build the bulk-state inlet path.
    #[serde(default)]
    pub settable: bool,
    /// Latch the outlet value.
    #[serde(default)]
    pub latched: bool,
}

fn default_cardinality() -> u32 {
    2
}

/// Widget style names accepted in spec files.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleName {
    /// Binary on/off toggles.
    #[default]
    Toggle,
    /// M-state cycling buttons.
    Cyclic,
}

impl From<StyleName> for WidgetStyle {
    fn from(name: StyleName) -> Self {
        match name {
            StyleName::Toggle => WidgetStyle::Toggle,
            StyleName::Cyclic => WidgetStyle::CyclicButton,
        }
    }
}

impl SpecFile {
    /// Loads and deserializes a spec file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read spec file '{}': {e}", path.display()))?;
        toml::from_str(&text)
            .map_err(|e| anyhow::anyhow!("failed to parse spec file '{}': {e}", path.display()))
    }

    /// Converts to the builder's spec type.
    pub fn into_spec(self) -> SequencerSpec {
        SequencerSpec {
            steps: self.steps,
            cardinality: self.cardinality,
            style: self.style.into(),
            rotation: self.rotation,
            namespaced: self.namespaced,
            settable: self.settable,
            latched: self.latched,
        }
    }
}
