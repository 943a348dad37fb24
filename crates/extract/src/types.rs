use crate::rules::{ActionCluster, ControlDomain, ControlKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One form block from the resource dump
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormSection {
    /// Resource container the form was extracted from
    pub resource_file: String,

    /// Form class name (e.g. `TfrmOptions`)
    pub form_name: String,

    /// Raw action names in file order, duplicates kept
    pub actions: Vec<String>,

    /// Raw control ids in file order, duplicates kept
    pub controls: Vec<String>,
}

impl FormSection {
    /// Create an empty section for a freshly seen header
    pub fn new(resource_file: impl Into<String>, form_name: impl Into<String>) -> Self {
        Self {
            resource_file: resource_file.into(),
            form_name: form_name.into(),
            actions: Vec::new(),
            controls: Vec::new(),
        }
    }
}

/// Ticket metadata for one action key of the mapping table
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketRecord {
    pub ticket_id: String,
    pub feature_group: String,
    pub phase: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingStatus {
    Mapped,
    Unmapped,
}

impl MappingStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mapped => "mapped",
            Self::Unmapped => "unmapped",
        }
    }
}

/// One canonical action of the primary form, with everything known about it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionMatrixRow {
    pub action: String,
    pub aliases: BTreeSet<String>,
    pub source_forms: BTreeSet<String>,
    pub cluster: ActionCluster,
    pub mapped_ticket: String,
    pub feature_group: String,
    pub phase: String,
    pub status: MappingStatus,
}

impl ActionMatrixRow {
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        self.status == MappingStatus::Mapped
    }
}

/// A classified control, in the order it appeared in the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlRecord {
    pub id: String,
    pub kind: ControlKind,
    pub domain: ControlDomain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchemaEntry {
    pub form_name: String,
    pub resource_file: String,
    pub action_count: usize,
    pub control_count: usize,
    /// Keyed by the kind's rendered name, so iteration is alphabetical
    pub kind_counts: BTreeMap<String, usize>,
    pub domain_counts: BTreeMap<String, usize>,
    pub controls: Vec<ControlRecord>,
}

/// Input locations echoed into the schema document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFiles {
    pub form_details: String,
    pub action_ticket_map: String,
}

/// The schema document written for UI reconstruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    /// RFC 3339, whole seconds, `+00:00` offset
    pub generated_at_utc: String,
    pub source_files: SourceFiles,
    pub forms: Vec<FormSchemaEntry>,
}
