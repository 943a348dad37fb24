use crate::canonical::{canonicalize_action, is_action_identifier};
use crate::error::{ExtractError, Result};
use crate::rules::classify_cluster;
use crate::tickets::TicketMap;
use crate::types::{ActionMatrixRow, FormSection, MappingStatus};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::Path;

const LIST_SEPARATOR: &str = ";";

#[derive(Default)]
struct ActionSightings {
    aliases: BTreeSet<String>,
    forms: BTreeSet<String>,
}

/// Collect every canonical action declared by the allowed forms and attach ticket metadata.
///
/// Rows come back sorted by canonical action name, one per name.
#[must_use]
pub fn build_action_matrix(
    forms: &[FormSection],
    tickets: &TicketMap,
    action_forms: &BTreeSet<String>,
) -> Vec<ActionMatrixRow> {
    let mut by_action: BTreeMap<String, ActionSightings> = BTreeMap::new();

    for form in forms.iter().filter(|form| action_forms.contains(&form.form_name)) {
        for raw in &form.actions {
            let canonical = canonicalize_action(raw);
            if !is_action_identifier(&canonical) {
                log::debug!("{}: skipping non-action entry {raw:?}", form.form_name);
                continue;
            }
            let sightings = by_action.entry(canonical).or_default();
            sightings.aliases.insert(raw.clone());
            sightings.forms.insert(form.form_name.clone());
        }
    }

    by_action
        .into_iter()
        .map(|(action, sightings)| {
            let matched =
                tickets.resolve(&action, sightings.aliases.iter().map(String::as_str));
            let (mapped_ticket, feature_group, phase, status) = match matched {
                Some(ticket) => (
                    ticket.ticket_id.clone(),
                    ticket.feature_group.clone(),
                    ticket.phase.clone(),
                    MappingStatus::Mapped,
                ),
                None => (
                    String::new(),
                    String::new(),
                    String::new(),
                    MappingStatus::Unmapped,
                ),
            };
            ActionMatrixRow {
                cluster: classify_cluster(&action),
                action,
                aliases: sightings.aliases,
                source_forms: sightings.forms,
                mapped_ticket,
                feature_group,
                phase,
                status,
            }
        })
        .collect()
}

/// Number of rows that found a ticket
#[must_use]
pub fn mapped_count(rows: &[ActionMatrixRow]) -> usize {
    rows.iter().filter(|row| row.is_mapped()).count()
}

/// Flat CSV shape of a matrix row; field order is the column order
#[derive(Serialize)]
struct MatrixCsvRow<'a> {
    action: &'a str,
    aliases: String,
    source_forms: String,
    cluster: &'static str,
    mapped_ticket: &'a str,
    feature_group: &'a str,
    phase: &'a str,
    status: &'static str,
}

impl<'a> From<&'a ActionMatrixRow> for MatrixCsvRow<'a> {
    fn from(row: &'a ActionMatrixRow) -> Self {
        Self {
            action: &row.action,
            aliases: join_sorted(&row.aliases),
            source_forms: join_sorted(&row.source_forms),
            cluster: row.cluster.as_str(),
            mapped_ticket: &row.mapped_ticket,
            feature_group: &row.feature_group,
            phase: &row.phase,
            status: row.status.as_str(),
        }
    }
}

fn join_sorted(values: &BTreeSet<String>) -> String {
    values
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Write the matrix as CSV with a header row, CRLF-terminated records
pub fn write_action_matrix<W: Write>(rows: &[ActionMatrixRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    // `serialize` only emits the header once a row exists; an empty matrix still gets one.
    if rows.is_empty() {
        csv_writer.write_record([
            "action",
            "aliases",
            "source_forms",
            "cluster",
            "mapped_ticket",
            "feature_group",
            "phase",
            "status",
        ])?;
    }
    for row in rows {
        csv_writer.serialize(MatrixCsvRow::from(row))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the matrix to `path`, creating parent directories as needed
pub fn write_action_matrix_file(rows: &[ActionMatrixRow], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| ExtractError::io(parent, err))?;
    }
    let file = std::fs::File::create(path).map_err(|err| ExtractError::io(path, err))?;
    write_action_matrix(rows, std::io::BufWriter::new(file))?;
    log::info!("action matrix: {} rows -> {}", rows.len(), path.display());
    Ok(())
}
