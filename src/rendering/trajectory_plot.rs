use crate::config::PlotConfig;
use crate::error::{Result, TrajectoryError};
use crate::rendering::pdf_renderer::{render_pdf, write_pdf};
use crate::rendering::plot_layout::FigureLayout;
use crate::rendering::png_renderer::{render_png, write_png};
use crate::trajectory::centers::Trajectory;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Files written for one figure.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedArtifacts {
    pub pdf: PathBuf,
    pub png: PathBuf,
}

/// Output paths for `label`: `subject<label>_trajectory.{pdf,png}` inside `destination`.
pub fn artifact_paths(label: &str, destination: &Path) -> RenderedArtifacts {
    let stem = format!("subject{label}_trajectory");
    RenderedArtifacts {
        pdf: destination.join(format!("{stem}.pdf")),
        png: destination.join(format!("{stem}.png")),
    }
}

/// Scatter-plots a trajectory with the reference landmark and writes it as PDF and PNG.
///
/// The destination directory is created when missing. Existing files are overwritten.
pub fn render(
    trajectory: &Trajectory,
    label: &str,
    destination: &Path,
    config: &PlotConfig,
) -> Result<RenderedArtifacts> {
    fs::create_dir_all(destination).map_err(|e| TrajectoryError::io(destination, e))?;
    let artifacts = artifact_paths(label, destination);

    let (width, height) = config.page_size_pt();
    let layout = FigureLayout::new(
        width,
        height,
        trajectory.to_array().view(),
        config.reference.point(),
    );
    let title = config.title(label);

    let mut doc = render_pdf(&layout, trajectory.points(), &title, config)?;
    write_pdf(&mut doc, &artifacts.pdf)?;

    let img = render_png(&layout, trajectory.points(), &title, config);
    write_png(&img, &artifacts.png)?;

    info!(
        points = trajectory.len(),
        "Plots saved to: {}",
        destination.display()
    );
    Ok(artifacts)
}
