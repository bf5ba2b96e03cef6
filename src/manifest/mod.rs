//! Clip list loading
//!
//! Clip lists come either from `NAME,START,END` arguments or from a manifest
//! file in JSON, TOML or YAML, picked by extension.

use serde::Deserialize;
use std::path::Path;

use crate::domain::model::Clip;
use crate::error::{CropperError, CropperResult};

/// Supported manifest formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Toml,
    Yaml,
}

impl ManifestFormat {
    /// Pick a format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// A bare list of clips or a document with a `clips` key
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClipDocument {
    Bare(Vec<Clip>),
    Wrapped { clips: Vec<Clip> },
}

impl ClipDocument {
    fn into_clips(self) -> Vec<Clip> {
        match self {
            ClipDocument::Bare(clips) => clips,
            ClipDocument::Wrapped { clips } => clips,
        }
    }
}

/// Parse manifest text in the given format
pub fn parse_manifest(content: &str, format: ManifestFormat) -> Result<Vec<Clip>, String> {
    let document: ClipDocument = match format {
        ManifestFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string())?,
        ManifestFormat::Toml => toml::from_str(content).map_err(|e| e.to_string())?,
        ManifestFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string())?,
    };
    Ok(document.into_clips())
}

/// Read clips from a manifest file
pub fn load_manifest(path: &Path) -> CropperResult<Vec<Clip>> {
    let manifest_error = |message: String| CropperError::Manifest {
        path: path.display().to_string(),
        message,
    };

    let format = ManifestFormat::from_path(path).ok_or_else(|| {
        manifest_error("unsupported extension (expected .json, .toml, .yaml or .yml)".to_string())
    })?;
    let content = std::fs::read_to_string(path).map_err(|e| manifest_error(e.to_string()))?;
    parse_manifest(&content, format).map_err(manifest_error)
}

/// Parse a `NAME,START,END` argument. The name may itself contain commas.
pub fn parse_inline_clip(spec: &str) -> Result<Clip, String> {
    let mut fields = spec.rsplitn(3, ',');
    let end = fields.next();
    let start = fields.next();
    let name = fields.next();

    match (name, start, end) {
        (Some(name), Some(start), Some(end)) => {
            Ok(Clip::new(name.trim(), start.trim(), end.trim()))
        }
        _ => Err(format!("expected NAME,START,END but got '{}'", spec)),
    }
}
