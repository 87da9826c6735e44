//! Workflow configuration.
//!
//! TOML-backed overrides for the SLA policy. A missing file yields the
//! default policy; a malformed file is an error (never a silent default).

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::sla::SlaPolicy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default)]
    pub sla: SlaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlaConfig {
    #[serde(default = "default_new_days")]
    pub new_days: u32,
    #[serde(default = "default_under_review_days")]
    pub under_review_days: u32,
    #[serde(default = "default_revision_days")]
    pub revision_days: u32,
    #[serde(default = "default_accepted_days")]
    pub accepted_days: u32,
    #[serde(default = "default_in_production_days")]
    pub in_production_days: u32,
    #[serde(default = "default_warning_window_days")]
    pub warning_window_days: i64,
    #[serde(default = "default_reminder_offsets")]
    pub reminder_offsets: Vec<i64>,
    #[serde(default = "default_max_reminders")]
    pub max_reminders: u32,
}

impl Default for SlaConfig {
    fn default() -> Self {
        Self {
            new_days: default_new_days(),
            under_review_days: default_under_review_days(),
            revision_days: default_revision_days(),
            accepted_days: default_accepted_days(),
            in_production_days: default_in_production_days(),
            warning_window_days: default_warning_window_days(),
            reminder_offsets: default_reminder_offsets(),
            max_reminders: default_max_reminders(),
        }
    }
}

const fn default_new_days() -> u32 {
    7
}

const fn default_under_review_days() -> u32 {
    21
}

const fn default_revision_days() -> u32 {
    14
}

const fn default_accepted_days() -> u32 {
    7
}

const fn default_in_production_days() -> u32 {
    14
}

const fn default_warning_window_days() -> i64 {
    3
}

fn default_reminder_offsets() -> Vec<i64> {
    vec![7, 3, 1]
}

const fn default_max_reminders() -> u32 {
    3
}

/// Load the workflow config from `path`, or defaults when the file is
/// absent.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read or parsed.
pub fn load_workflow_config(path: &Path) -> Result<WorkflowConfig> {
    if !path.exists() {
        return Ok(WorkflowConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<WorkflowConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

impl SlaConfig {
    /// Build the runtime policy, validating the reminder cadence.
    ///
    /// # Errors
    ///
    /// Returns an error when offsets are non-positive or not strictly
    /// decreasing: reminders are consumed in order, so a later offset at or
    /// above an earlier one could never fire.
    pub fn to_policy(&self) -> Result<SlaPolicy> {
        ensure!(
            !self.reminder_offsets.is_empty(),
            "reminder_offsets must not be empty"
        );
        ensure!(
            self.reminder_offsets.iter().all(|&offset| offset > 0),
            "reminder_offsets must be positive day counts"
        );
        ensure!(
            self.reminder_offsets.windows(2).all(|w| w[0] > w[1]),
            "reminder_offsets must be strictly decreasing"
        );

        Ok(SlaPolicy {
            new_days: self.new_days,
            under_review_days: self.under_review_days,
            revision_days: self.revision_days,
            accepted_days: self.accepted_days,
            in_production_days: self.in_production_days,
            warning_window_days: self.warning_window_days,
            reminder_offsets: self.reminder_offsets.clone(),
            max_reminders: self.max_reminders,
        })
    }
}
