use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::matrix::{build_action_matrix, mapped_count, write_action_matrix_file};
use crate::parser::parse_form_file;
use crate::schema::{build_form_schema, write_form_schema_file};
use crate::tickets::TicketMap;
use crate::types::SourceFiles;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// What one run wrote, for the summary lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub matrix_path: PathBuf,
    pub action_count: usize,
    pub mapped_count: usize,
    pub schema_path: PathBuf,
    pub form_count: usize,
}

impl RunReport {
    #[must_use]
    pub fn matrix_summary(&self) -> String {
        format!(
            "Wrote {} ({} actions, {} mapped)",
            self.matrix_path.display(),
            self.action_count,
            self.mapped_count
        )
    }

    #[must_use]
    pub fn schema_summary(&self) -> String {
        format!(
            "Wrote {} ({} forms)",
            self.schema_path.display(),
            self.form_count
        )
    }
}

/// Run the full extraction, stamping the schema with the current UTC time
pub fn run(config: &ExtractorConfig) -> Result<RunReport> {
    run_with_clock(config, Utc::now())
}

/// Run the full extraction with a caller-supplied timestamp.
///
/// Both inputs are read completely before either output is written.
pub fn run_with_clock(config: &ExtractorConfig, generated_at: DateTime<Utc>) -> Result<RunReport> {
    config.validate()?;

    let forms = parse_form_file(&config.form_details)?;
    let tickets = TicketMap::from_path(&config.action_ticket_map)?;
    log::info!(
        "loaded {} form sections and {} ticket keys",
        forms.len(),
        tickets.len()
    );

    let rows = build_action_matrix(&forms, &tickets, &config.action_forms);
    write_action_matrix_file(&rows, &config.matrix_out)?;

    let source_files = SourceFiles {
        form_details: config.form_details.display().to_string(),
        action_ticket_map: config.action_ticket_map.display().to_string(),
    };
    let schema = build_form_schema(&forms, &config.schema_forms, source_files, generated_at);
    write_form_schema_file(&schema, &config.schema_out)?;

    Ok(RunReport {
        matrix_path: config.matrix_out.clone(),
        action_count: rows.len(),
        mapped_count: mapped_count(&rows),
        schema_path: config.schema_out.clone(),
        form_count: schema.forms.len(),
    })
}
