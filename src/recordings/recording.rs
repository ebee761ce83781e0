use crate::error::{Result, TrajectoryError};
use crate::recordings::detection_reader::DETECTION_FILE_EXTENSION;
use itertools::Itertools;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// One subject's detection dump, optionally filed under an anxiety condition.
#[derive(Clone, Debug, PartialEq)]
pub struct Recording {
    pub subject: String,
    pub condition: Option<String>,
    pub path: PathBuf,
}

impl Recording {
    /// A recording given by explicit path. The subject is inferred from the file name.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(TrajectoryError::RecordingNotFound {
                subject: subject_from_path(path),
                directory: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            });
        }
        Ok(Recording {
            subject: subject_from_path(path),
            condition: None,
            path: path.to_path_buf(),
        })
    }
}

/// Infers the subject identifier from a recording's file name.
///
/// Recordings are named with the subject number first: the first two characters when both are
/// digits, otherwise the first character.
pub fn subject_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let two: String = name.chars().take(2).collect();
    if two.chars().count() == 2 && two.chars().all(|c| c.is_ascii_digit()) {
        two
    } else {
        name.chars().take(1).collect()
    }
}

/// Finds the recording for `subject` under `data_root/condition`.
///
/// Candidates must have the detection file extension and a file name starting with the subject
/// identifier, where the identifier is not followed by another digit (so subject `1` never
/// resolves to `10_...`). They are sorted by file name and the first one is used.
pub fn locate_subject_recording(data_root: &Path, condition: &str, subject: &str) -> Result<Recording> {
    let directory = data_root.join(condition);
    let not_found = || TrajectoryError::RecordingNotFound {
        subject: subject.to_string(),
        directory: directory.clone(),
    };
    if !directory.is_dir() || subject.is_empty() {
        return Err(not_found());
    }
    let path = detection_files(&directory)?
        .into_iter()
        .find(|path| names_subject(path, subject))
        .ok_or_else(not_found)?;
    debug!("Resolved subject {} to {}", subject, path.display());
    Ok(Recording {
        subject: subject.to_string(),
        condition: Some(condition.to_string()),
        path,
    })
}

/// True when the file name starts with `subject` and the identifier ends there.
fn names_subject(path: &Path, subject: &str) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };
    match name.strip_prefix(subject) {
        Some(rest) => !rest.starts_with(|c: char| c.is_ascii_digit()),
        None => false,
    }
}

/// Lists every recording filed directly under `data_root/condition`.
pub fn scan_cohort(data_root: &Path, condition: &str) -> Result<Vec<Recording>> {
    let directory = data_root.join(condition);
    if !directory.is_dir() {
        return Err(TrajectoryError::RecordingNotFound {
            subject: "*".to_string(),
            directory,
        });
    }
    let recordings: Vec<Recording> = detection_files(&directory)?
        .into_iter()
        .map(|path| Recording {
            subject: subject_from_path(&path),
            condition: Some(condition.to_string()),
            path,
        })
        .collect();
    if recordings.is_empty() {
        return Err(TrajectoryError::EmptyCohort { directory });
    }
    debug!(
        "Cohort {} has {} recordings: {}",
        condition,
        recordings.len(),
        recordings.iter().map(|r| r.subject.as_str()).join(", ")
    );
    Ok(recordings)
}

fn detection_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(directory).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(directory).to_path_buf();
            TrajectoryError::io(path, e.into())
        })?;
        let is_detection_file = entry
            .path()
            .extension()
            .map(|ext| ext == DETECTION_FILE_EXTENSION)
            .unwrap_or(false);
        if entry.file_type().is_file() && is_detection_file {
            files.push(entry.into_path());
        }
    }
    Ok(files
        .into_iter()
        .sorted_by(|a, b| a.file_name().cmp(&b.file_name()))
        .collect())
}
