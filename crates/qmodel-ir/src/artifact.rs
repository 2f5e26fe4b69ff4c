//! Model artifacts on disk.
//!
//! An artifact is the pretty-printed JSON of a [`Model`], stored as
//! `<name>.qmod`. Reading an artifact re-validates the model so that a
//! hand-edited file cannot carry out-of-range indices.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IrError, IrResult};
use crate::model::Model;

/// File extension of model artifacts.
pub const ARTIFACT_EXTENSION: &str = "qmod";

/// Serialize a model to JSON.
pub fn to_json(model: &Model) -> IrResult<String> {
    Ok(serde_json::to_string_pretty(model)?)
}

/// Parse and validate a model from JSON.
pub fn from_json(source: &str) -> IrResult<Model> {
    let model: Model = serde_json::from_str(source)?;
    model.validate()?;
    Ok(model)
}

/// Path of the artifact called `name` inside `dir`.
pub fn artifact_path(dir: impl AsRef<Path>, name: &str) -> IrResult<PathBuf> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(IrError::InvalidArtifactName(name.to_string()));
    }
    Ok(dir
        .as_ref()
        .join(format!("{name}.{ARTIFACT_EXTENSION}")))
}

/// Write `model` as `<dir>/<name>.qmod` and return the path.
pub fn write_artifact(model: &Model, dir: impl AsRef<Path>, name: &str) -> IrResult<PathBuf> {
    let path = artifact_path(dir, name)?;
    let json = to_json(model)?;
    fs::write(&path, json).map_err(|source| IrError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(path)
}

/// Read and validate a model artifact.
pub fn read_artifact(path: impl AsRef<Path>) -> IrResult<Model> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| IrError::Io {
        path: path.display().to_string(),
        source,
    })?;
    from_json(&source)
}
