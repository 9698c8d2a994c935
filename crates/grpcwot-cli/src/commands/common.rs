//! File helpers shared by commands.

use anyhow::{Context, Result};
use grpcwot_classifier::Classifier;
use grpcwot_core::{ClassificationRecord, ServiceModel};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Reads a service model JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid model.
pub fn load_model(path: &Path) -> Result<ServiceModel> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read service model {}", path.display()))?;
    let model = ServiceModel::from_json_str(&content)
        .with_context(|| format!("invalid service model {}", path.display()))?;
    info!(
        "Loaded service '{}' with {} messages and {} RPCs",
        model.service,
        model.messages.len(),
        model.rpcs.len()
    );
    Ok(model)
}

/// Reads a classification record if the file exists.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_record(path: &Path) -> Result<Option<ClassificationRecord>> {
    if !path.exists() {
        debug!("No classification record at {}", path.display());
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read classification record {}", path.display()))?;
    let record = ClassificationRecord::from_json_str(&content)
        .with_context(|| format!("invalid classification record {}", path.display()))?;
    info!("Replaying {} classifications from {}", record.len(), path.display());
    Ok(Some(record))
}

/// Writes every `(path, content)` pair, creating parent directories.
///
/// Contents are first written to `<file>.tmp` next to each target and only
/// renamed into place, in the given order, once all of them are staged. A
/// failed write leaves no target touched.
///
/// # Errors
///
/// Returns an error if a directory, a temporary file or a rename fails.
pub fn write_files(files: &[(&Path, &str)]) -> Result<()> {
    let mut staged = Vec::with_capacity(files.len());
    for &(path, content) in files {
        match stage(path, content) {
            Ok(temp) => staged.push((temp, path)),
            Err(err) => {
                discard(&staged);
                return Err(err);
            }
        }
    }

    for (i, (temp, path)) in staged.iter().enumerate() {
        if let Err(err) = fs::rename(temp, path) {
            discard(&staged[i..]);
            return Err(err).with_context(|| format!("failed to write {}", path.display()));
        }
        debug!("Wrote {}", path.display());
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsStr::to_os_string).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn stage(path: &Path, content: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let temp = temp_path(path);
    fs::write(&temp, content).with_context(|| format!("failed to write {}", temp.display()))?;
    debug!("Staged {} bytes in {}", content.len(), temp.display());
    Ok(temp)
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (temp, _) in staged {
        if let Err(err) = fs::remove_file(temp) {
            warn!("Failed to remove {}: {err}", temp.display());
        }
    }
}

/// Builds a classifier restricted to `only` when it is non-empty.
#[must_use]
pub fn classifier(only: Vec<String>) -> Classifier {
    if only.is_empty() {
        Classifier::new()
    } else {
        Classifier::new().with_allow_list(only)
    }
}
