use crate::config::PlotConfig;
use crate::error::Result;
use crate::recordings::detection_reader::read_detection_records;
use crate::recordings::recording::{Recording, scan_cohort};
use crate::rendering::trajectory_plot::{RenderedArtifacts, render};
use crate::trajectory::aggregation::Cohort;
use crate::trajectory::extraction::{TrajectoryExtraction, extract};
use std::path::Path;
use tracing::info;

/// What was drawn for one figure.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotSummary {
    pub artifacts: RenderedArtifacts,
    pub recordings: usize,
    pub points: usize,
}

/// Reads a recording's detections and extracts its trajectory.
pub fn extract_recording(recording: &Recording) -> Result<TrajectoryExtraction> {
    let records = read_detection_records(&recording.path)?;
    info!(
        condition = recording.condition.as_deref().unwrap_or("-"),
        "Extracting subject {} from {}",
        recording.subject,
        recording.path.display()
    );
    Ok(extract(&records))
}

/// Plots one recording, labelled with its subject.
pub fn plot_recording(recording: &Recording, destination: &Path, config: &PlotConfig) -> Result<PlotSummary> {
    info!("Subject is: {}", recording.subject);
    let extraction = extract_recording(recording)?;
    let artifacts = render(&extraction.trajectory, &recording.subject, destination, config)?;
    Ok(PlotSummary {
        artifacts,
        recordings: 1,
        points: extraction.trajectory.len(),
    })
}

/// Plots every recording of `condition` under `data_root` on one figure labelled with the
/// condition.
pub fn plot_condition(
    data_root: &Path,
    condition: &str,
    destination: &Path,
    config: &PlotConfig,
) -> Result<PlotSummary> {
    let recordings = scan_cohort(data_root, condition)?;
    let mut cohort = Cohort::new(condition);
    for recording in &recordings {
        cohort.add(extract_recording(recording)?.trajectory);
    }
    let combined = cohort.combined();
    info!(
        recordings = cohort.recording_count(),
        "Cohort {} has {} points",
        cohort.label,
        combined.len()
    );
    let artifacts = render(&combined, &cohort.label, destination, config)?;
    Ok(PlotSummary {
        artifacts,
        recordings: cohort.recording_count(),
        points: combined.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::Content;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("trajectory_plotter_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// `frames` frames, one box each, with every `gap`th frame left empty.
    fn recording_json(frames: usize, gap: usize) -> String {
        let rows: Vec<String> = (0..frames)
            .map(|i| {
                if gap > 0 && i % gap == 0 {
                    "[]".to_string()
                } else {
                    let c = 100.0 + i as f64;
                    format!("[[{}, {}, {}, {}, 0.9]]", c - 5.0, c - 5.0, c + 5.0, c + 5.0)
                }
            })
            .collect();
        format!("[{}]", rows.join(","))
    }

    fn marker_fills(pdf: &Path) -> usize {
        let doc = lopdf::Document::load(pdf).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        content.operations.iter().filter(|op| op.operator == "f").count()
    }

    #[test]
    fn plot_condition_draws_every_recording() {
        let root = scratch_dir("plot_condition");
        let cond = root.join("high_anxiety");
        fs::create_dir_all(&cond).unwrap();
        // 20 frames trim to 18, all detected.
        fs::write(cond.join("1_a.json"), recording_json(20, 0)).unwrap();
        // 40 frames trim to [2, 38); frames 10, 20 and 30 are empty, leaving 33.
        fs::write(cond.join("2_a.json"), recording_json(40, 10)).unwrap();
        let out = root.join("figures");
        let config = PlotConfig { dpi: 20, ..PlotConfig::default() };

        let summary = plot_condition(&root, "high_anxiety", &out, &config).unwrap();
        assert_eq!(summary.recordings, 2);
        assert_eq!(summary.points, 18 + 33);
        assert_eq!(summary.artifacts.pdf, out.join("subjecthigh_anxiety_trajectory.pdf"));
        assert!(summary.artifacts.png.is_file());
        // One disc per point plus the reference landmark.
        assert_eq!(marker_fills(&summary.artifacts.pdf), 18 + 33 + 1);
        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn plot_recording_labels_with_subject() {
        let root = scratch_dir("plot_recording");
        let path = root.join("12_session.json");
        fs::write(&path, recording_json(20, 0)).unwrap();
        let recording = Recording::from_path(&path).unwrap();
        let config = PlotConfig { dpi: 20, ..PlotConfig::default() };

        let summary = plot_recording(&recording, &root, &config).unwrap();
        assert_eq!(summary.points, 18);
        assert_eq!(summary.artifacts.png, root.join("subject12_trajectory.png"));
        assert_eq!(marker_fills(&summary.artifacts.pdf), 19);
        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn malformed_recording_fails_the_cohort() {
        let root = scratch_dir("plot_malformed");
        let cond = root.join("low_anxiety");
        fs::create_dir_all(&cond).unwrap();
        fs::write(cond.join("1_a.json"), recording_json(20, 0)).unwrap();
        fs::write(cond.join("2_a.json"), "[[[1, 2, 3]]]").unwrap();
        let result = plot_condition(&root, "low_anxiety", &root.join("out"), &PlotConfig::default());
        assert!(matches!(result, Err(crate::error::TrajectoryError::MalformedBox { .. })));
        assert!(!root.join("out").exists());
        fs::remove_dir_all(&root).unwrap();
    }
}
