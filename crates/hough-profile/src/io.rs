//! JSON configuration and report helpers.

use crate::{AnalysisFrame, AnalysisParams, HoughError, ProfileKind};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub image_path: String,
    #[serde(default)]
    pub output_path: Option<String>,
    /// Rotation applied to the loaded image before analysis, whole degrees.
    #[serde(default)]
    pub rotation_deg: i32,
    #[serde(default)]
    pub params: AnalysisParams,
}

impl AnalysisConfig {
    pub fn new(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            output_path: None,
            rotation_deg: 0,
            params: AnalysisParams::default(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("hough_profile_report.json"))
    }
}

/// Profile plus enough context to redraw the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub image_path: String,
    #[serde(default)]
    pub config_path: Option<String>,
    pub width: usize,
    pub height: usize,
    pub rotation_deg: i32,
    pub params: AnalysisParams,
    #[serde(default)]
    pub kind: Option<ProfileKind>,
    #[serde(default)]
    pub labels_deg: Vec<f64>,
    #[serde(default)]
    pub values: Vec<f64>,
    #[serde(default)]
    pub axis_max: Option<f64>,
    #[serde(default)]
    pub dominant_theta_deg: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalysisReport {
    /// Base report for an input raster, before any pass ran.
    pub fn new(
        cfg: &AnalysisConfig,
        config_path: Option<&Path>,
        width: usize,
        height: usize,
    ) -> Self {
        Self {
            image_path: cfg.image_path.clone(),
            config_path: config_path.map(|p| p.to_string_lossy().into_owned()),
            width,
            height,
            rotation_deg: cfg.rotation_deg,
            params: cfg.params,
            kind: None,
            labels_deg: Vec::new(),
            values: Vec::new(),
            axis_max: None,
            dominant_theta_deg: None,
            error: None,
        }
    }

    /// Populate profile fields from a completed pass.
    pub fn set_frame(&mut self, frame: &AnalysisFrame) {
        self.rotation_deg = frame.rotation_deg;
        self.kind = Some(frame.profile.kind());
        self.labels_deg = frame.profile.labels_deg();
        self.values = frame.profile.values().to_vec();
        self.axis_max = Some(frame.axis_max);
        self.dominant_theta_deg = frame.profile.dominant_theta_deg();
        self.error = None;
    }

    /// Record a skipped pass.
    pub fn set_error(&mut self, err: &HoughError) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
