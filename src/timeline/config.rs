//! Drawing constants for timeline diagrams.
//!
//! Everything the layout engine and the renderer need to size, pad and
//! color a diagram lives in one [`RenderConfig`], built once per run and
//! passed by reference. Units are points (1 pt = 1 SVG user unit).

use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// 8-bit RGB color, written as `[r, g, b]` in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

/// Timeline diagram configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Horizontal scale when no target width is requested
    pub default_px_per_ms: f64,
    pub bar_height: f64,
    /// Vertical padding above and below each bar
    pub stage_padding: f64,
    pub corner_radius: f64,
    /// Bars narrower than this are widened symmetrically
    pub min_bar_width: f64,
    /// The time origin sits this far before the first visible begin
    pub time_origin_shift_ms: f64,
    pub canvas_padding_right: f64,

    pub label_column_width: f64,
    pub label_padding: f64,
    /// Gap between a stage's name and its median label
    pub median_label_gap: f64,
    pub diagram_padding: f64,
    pub time_axis_band_height: f64,
    pub title_bar_height: f64,
    pub title_padding: f64,
    pub arrow_length: f64,

    pub hud_origin: (f64, f64),
    pub hud_line_spacing: f64,

    pub font_family: String,
    pub median_font_size: f64,
    pub axis_font_size: f64,
    pub title_font_size: f64,
    /// Used when the title falls back to the (usually long) session name
    pub session_title_font_size: f64,
    pub hud_font_size: f64,

    /// Highlighted frames cycle through these colors by frame index
    pub palette: Vec<Rgb>,
    pub context_color: Rgb,
    pub context_opacity: f64,
    pub grid_color: Rgb,
    pub axis_color: Rgb,
    pub label_color: Rgb,
    pub median_color: Rgb,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_px_per_ms: 40.0,
            bar_height: 28.0,
            stage_padding: 4.0,
            corner_radius: 3.0,
            min_bar_width: 2.0,
            time_origin_shift_ms: 0.1,
            canvas_padding_right: 10.0,

            label_column_width: 204.0,
            label_padding: 10.0,
            median_label_gap: 50.0,
            diagram_padding: 4.0,
            time_axis_band_height: 50.0,
            title_bar_height: 100.0,
            title_padding: 10.0,
            arrow_length: 8.0,

            hud_origin: (2.0, 20.0),
            hud_line_spacing: 18.0,

            font_family: "Helvetica".to_string(),
            median_font_size: 14.0,
            axis_font_size: 18.0,
            title_font_size: 24.0,
            session_title_font_size: 12.0,
            hud_font_size: 16.0,

            palette: vec![
                Rgb(15, 128, 140),
                Rgb(108, 140, 38),
                Rgb(242, 167, 27),
                Rgb(242, 106, 27),
                Rgb(217, 24, 24),
            ],
            context_color: Rgb(220, 220, 220),
            context_opacity: 0.5,
            grid_color: Rgb(217, 217, 217),
            axis_color: Rgb(26, 26, 26),
            label_color: Rgb(51, 51, 51),
            median_color: Rgb(153, 153, 153),
        }
    }
}

impl RenderConfig {
    /// Full height of one stage lane, bar plus padding
    pub fn lane_height(&self) -> f64 {
        self.bar_height + 2.0 * self.stage_padding
    }

    pub fn palette_color(&self, index: usize) -> Rgb {
        self.palette[index % self.palette.len()]
    }
}

/// Load a render configuration from a TOML file
///
/// Missing keys keep their defaults.
///
/// # Errors
/// * `ConfigError::Io` - File cannot be read
/// * `ConfigError::Parse` - TOML is invalid
/// * `ConfigError::Invalid` - Values that would break layout (empty palette, non-positive sizes)
///
/// # Example
/// ```ignore
/// let config = load_render_config("render.toml")?;
/// ```
pub fn load_render_config(path: impl AsRef<Path>) -> Result<RenderConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: RenderConfig = toml::from_str(&contents)?;

    if config.palette.is_empty() {
        return Err(ConfigError::Invalid("palette must not be empty".to_string()));
    }
    if config.default_px_per_ms <= 0.0 || config.bar_height <= 0.0 {
        return Err(ConfigError::Invalid(
            "default_px_per_ms and bar_height must be positive".to_string(),
        ));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_lane_height() {
        assert_eq!(RenderConfig::default().lane_height(), 36.0);
    }

    #[test]
    fn test_palette_wraps() {
        let config = RenderConfig::default();
        assert_eq!(config.palette_color(5), config.palette_color(0));
        assert_eq!(config.palette_color(7), Rgb(242, 167, 27));
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "bar_height = 20.0").unwrap();
        writeln!(file, "palette = [[0, 0, 255]]").unwrap();

        let config = load_render_config(file.path()).unwrap();

        assert_eq!(config.bar_height, 20.0);
        assert_eq!(config.palette, vec![Rgb(0, 0, 255)]);
        assert_eq!(config.label_column_width, 204.0);
    }

    #[test]
    fn test_empty_palette_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "palette = []").unwrap();

        let result = load_render_config(file.path());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rgb_display() {
        assert_eq!(Rgb(1, 2, 3).to_string(), "rgb(1, 2, 3)");
    }
}
