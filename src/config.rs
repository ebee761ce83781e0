use crate::annotations::named_point::NamedPoint;
use crate::error::{Result, TrajectoryError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// An sRGB color with a separate opacity.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub rgb: [u8; 3],
    pub alpha: f64,
}

/// Everything that controls how a trajectory figure looks.
///
/// All fields have defaults, so a config file only needs the values it changes.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Figure width in inches.
    pub width_in: f64,
    /// Figure height in inches.
    pub height_in: f64,
    /// Raster resolution of the PNG.
    pub dpi: u32,
    /// Marker radius in points (1/72 inch).
    pub marker_radius_pt: f64,
    pub trajectory_marker: MarkerStyle,
    pub reference_marker: MarkerStyle,
    /// Physical landmark drawn on every figure.
    pub reference: NamedPoint,
    pub title_prefix: String,
    pub x_label: String,
    pub y_label: String,
    pub title_font_pt: f64,
    pub label_font_pt: f64,
    pub annotation_font_pt: f64,
    pub transparent: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width_in: 6.4,
            height_in: 4.8,
            dpi: 1200,
            marker_radius_pt: 3.0,
            trajectory_marker: MarkerStyle { rgb: [255, 0, 0], alpha: 0.05 },
            reference_marker: MarkerStyle { rgb: [0, 0, 255], alpha: 0.5 },
            reference: NamedPoint::new("center".to_string(), 322.0, 210.0),
            title_prefix: "Centers of Bounding Boxes for ".to_string(),
            x_label: "South Wall".to_string(),
            y_label: "West Wall".to_string(),
            title_font_pt: 12.0,
            label_font_pt: 10.0,
            annotation_font_pt: 12.0,
            transparent: true,
        }
    }
}

impl PlotConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| TrajectoryError::io(path, e))?;
        let config: PlotConfig = serde_json::from_str(&contents).map_err(|source| TrajectoryError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width_in > 0.0 && self.height_in > 0.0) {
            return Err(TrajectoryError::Config(format!(
                "figure size must be positive, got {}x{} in",
                self.width_in, self.height_in
            )));
        }
        if self.dpi == 0 {
            return Err(TrajectoryError::Config("dpi must be positive".to_string()));
        }
        if !(self.marker_radius_pt > 0.0) {
            return Err(TrajectoryError::Config(format!(
                "marker radius must be positive, got {}",
                self.marker_radius_pt
            )));
        }
        for (name, style) in [("trajectory", self.trajectory_marker), ("reference", self.reference_marker)] {
            if !(0.0..=1.0).contains(&style.alpha) {
                return Err(TrajectoryError::Config(format!(
                    "{} marker alpha must be within [0, 1], got {}",
                    name, style.alpha
                )));
            }
        }
        Ok(())
    }

    pub fn title(&self, label: &str) -> String {
        format!("{}{}", self.title_prefix, label)
    }

    /// Figure size in PDF points.
    pub fn page_size_pt(&self) -> (f64, f64) {
        (self.width_in * 72.0, self.height_in * 72.0)
    }

    /// Figure size in PNG pixels.
    pub fn raster_size_px(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f64).round() as u32,
            (self.height_in * self.dpi as f64).round() as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::point::Point;

    #[test]
    fn defaults_match_published_figures() {
        let config = PlotConfig::default();
        assert_eq!(config.reference.name, "center");
        assert_eq!(config.reference.point(), Point { x: 322.0, y: 210.0 });
        assert_eq!(config.raster_size_px(), (7680, 5760));
        assert_eq!(config.title("3"), "Centers of Bounding Boxes for 3");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_partial_config_test() {
        let path = std::env::temp_dir().join(format!("trajectory_plotter_config_{}.json", std::process::id()));
        fs::write(&path, r#"{"dpi": 100, "x_label": "North Wall"}"#).unwrap();
        let config = PlotConfig::load(&path).unwrap();
        assert_eq!(config.dpi, 100);
        assert_eq!(config.x_label, "North Wall");
        assert_eq!(config.y_label, "West Wall");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = PlotConfig::default();
        config.trajectory_marker.alpha = 1.5;
        assert!(matches!(config.validate(), Err(TrajectoryError::Config(_))));
        let config = PlotConfig { dpi: 0, ..PlotConfig::default() };
        assert!(matches!(config.validate(), Err(TrajectoryError::Config(_))));
    }
}
