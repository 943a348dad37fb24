use crate::error::{ExtractError, Result};
use crate::rules::{infer_control_domain, infer_control_kind};
use crate::types::{ControlRecord, FormSchema, FormSchemaEntry, FormSection, SourceFiles};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::Path;

/// Classify the controls of one form and tally them per kind and per domain
#[must_use]
pub fn schema_entry(form: &FormSection) -> FormSchemaEntry {
    let mut kind_counts = BTreeMap::new();
    let mut domain_counts = BTreeMap::new();

    let controls: Vec<ControlRecord> = form
        .controls
        .iter()
        .map(|id| {
            let kind = infer_control_kind(id);
            let domain = infer_control_domain(id);
            *kind_counts.entry(kind.as_str().to_string()).or_insert(0) += 1;
            *domain_counts.entry(domain.as_str().to_string()).or_insert(0) += 1;
            ControlRecord {
                id: id.clone(),
                kind,
                domain,
            }
        })
        .collect();

    FormSchemaEntry {
        form_name: form.form_name.clone(),
        resource_file: form.resource_file.clone(),
        action_count: form.actions.len(),
        control_count: form.controls.len(),
        kind_counts,
        domain_counts,
        controls,
    }
}

/// Build the schema document for the allowed forms, sorted by form name.
///
/// Sorting is stable, so repeated form names keep their file order.
#[must_use]
pub fn build_form_schema(
    forms: &[FormSection],
    schema_forms: &BTreeSet<String>,
    source_files: SourceFiles,
    generated_at: DateTime<Utc>,
) -> FormSchema {
    let mut selected: Vec<&FormSection> = forms
        .iter()
        .filter(|form| schema_forms.contains(&form.form_name))
        .collect();
    selected.sort_by(|a, b| a.form_name.cmp(&b.form_name));

    FormSchema {
        generated_at_utc: generated_at.to_rfc3339_opts(SecondsFormat::Secs, false),
        source_files,
        forms: selected.into_iter().map(schema_entry).collect(),
    }
}

/// Pretty-printed JSON with a trailing newline
pub fn write_form_schema<W: Write>(schema: &FormSchema, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, schema)?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(serde_json::Error::io)?;
    Ok(())
}

/// Write the schema to `path`, creating parent directories as needed
pub fn write_form_schema_file(schema: &FormSchema, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| ExtractError::io(parent, err))?;
    }
    let file = std::fs::File::create(path).map_err(|err| ExtractError::io(path, err))?;
    write_form_schema(schema, std::io::BufWriter::new(file))?;
    log::info!("form schema: {} forms -> {}", schema.forms.len(), path.display());
    Ok(())
}
