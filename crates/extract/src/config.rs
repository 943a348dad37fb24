use crate::error::{ExtractError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Forms whose actions feed the action matrix (the main window, both platform variants)
pub const DEFAULT_ACTION_FORMS: &[&str] = &["TfrmLeat", "TfrmLeat_Macintosh"];

/// Option, export, stitching, palette, preview and repository dialogs exported to the schema
pub const DEFAULT_SCHEMA_FORMS: &[&str] = &[
    "TfrmOptions",
    "TfrmOptions_Macintosh",
    "TfrmSVGExportOptions",
    "TfrmSVGExportOptions_Macintosh",
    "TfrmStitchingHoleSettings",
    "TfrmChangeStitchingHoleType",
    "TfrmEditPallet",
    "TfrmEditPallet_Macintosh",
    "TfrmPreview",
    "TfrmPreview_Macintosh",
    "TfrmRepository",
    "TfrmRepository_Macintosh",
];

/// Input/output locations and form scope for one extraction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    /// Form-details text dump
    pub form_details: PathBuf,

    /// Action-to-ticket mapping CSV
    pub action_ticket_map: PathBuf,

    /// Action matrix CSV to write
    pub matrix_out: PathBuf,

    /// Form schema JSON to write
    pub schema_out: PathBuf,

    /// Forms whose actions are collected into the matrix
    pub action_forms: BTreeSet<String>,

    /// Forms exported into the schema document
    pub schema_forms: BTreeSet<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            form_details: PathBuf::from("extracted-rsrc/rsrc_form_details.txt"),
            action_ticket_map: PathBuf::from("source_app_action_ticket_map.csv"),
            matrix_out: PathBuf::from("mainform_action_matrix.csv"),
            schema_out: PathBuf::from("form_schema_options_export_stitching.json"),
            action_forms: to_set(DEFAULT_ACTION_FORMS),
            schema_forms: to_set(DEFAULT_SCHEMA_FORMS),
        }
    }
}

fn to_set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

impl ExtractorConfig {
    /// Read a JSON or TOML config file; keys it leaves out keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|err| ExtractError::io(path, err))?;
        let config = Self::from_bytes(&bytes).map_err(|err| {
            ExtractError::invalid_config(format!("{}: {err}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// JSON is tried first, then TOML
    pub fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, String> {
        match serde_json::from_slice(bytes) {
            Ok(config) => Ok(config),
            Err(json_err) => {
                let utf8 = std::str::from_utf8(bytes).map_err(|err| format!("{json_err}; {err}"))?;
                toml::from_str(utf8).map_err(|toml_err| {
                    format!("not valid JSON ({json_err}) or TOML ({toml_err})")
                })
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.action_forms.is_empty() {
            return Err(ExtractError::invalid_config("action_forms must not be empty"));
        }
        if self.schema_forms.is_empty() {
            return Err(ExtractError::invalid_config("schema_forms must not be empty"));
        }
        if self.matrix_out == self.schema_out {
            return Err(ExtractError::invalid_config(format!(
                "matrix_out and schema_out both point to {}",
                self.matrix_out.display()
            )));
        }
        Ok(())
    }
}
