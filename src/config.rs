use crate::color::{ColorResolver, HighlightStyle, Palette, Rgb};
use crate::error::RenderError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Renderer settings, stored as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Edge length of one cell in pixels (1 = one pixel per cell)
    pub cell_size: u32,
    /// Colour used by `clear` and for the freshly reset buffer
    pub background: Rgb,
    /// State name -> colour; states left out resolve to black
    pub palette: BTreeMap<String, Rgb>,
    pub highlight: HighlightStyle,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            cell_size: 1,
            background: Rgb::WHITE,
            palette: Palette::default().to_names(),
            highlight: HighlightStyle::default(),
        }
    }
}

impl RendererConfig {
    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    pub fn with_highlight(mut self, highlight: HighlightStyle) -> Self {
        self.highlight = highlight;
        self
    }

    /// Check values and build the colour resolver
    pub fn resolver(&self) -> Result<ColorResolver, RenderError> {
        if self.cell_size == 0 {
            return Err(RenderError::Config("cell_size must be at least 1".into()));
        }
        let palette = Palette::from_names(&self.palette)?;
        Ok(ColorResolver::new(palette, self.highlight))
    }

    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| RenderError::Config(e.to_string()))?;
        fs::write(path, json).map_err(|e| RenderError::Config(e.to_string()))
    }

    /// Load config from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| RenderError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self =
            serde_json::from_str(&json).map_err(|e| RenderError::Config(e.to_string()))?;
        config.resolver()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellState;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.json");

        let config = RendererConfig::default()
            .with_cell_size(4)
            .with_background(Rgb::new(10, 10, 10));
        config.save(&path).unwrap();
        assert_eq!(RendererConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.json");
        fs::write(&path, r#"{ "cell_size": 5 }"#).unwrap();

        let config = RendererConfig::load(&path).unwrap();
        assert_eq!(config.cell_size, 5);
        assert_eq!(config.background, Rgb::WHITE);
        assert_eq!(
            config.resolver().unwrap().resolve(CellState::Mover),
            Rgb::new(96, 212, 255)
        );
    }

    #[test]
    fn unknown_palette_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.json");
        fs::write(&path, r#"{ "palette": { "lava": [255, 0, 0] } }"#).unwrap();
        assert!(matches!(RendererConfig::load(&path), Err(RenderError::Config(_))));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = RendererConfig::load("/nonexistent/render.json").unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }
}
