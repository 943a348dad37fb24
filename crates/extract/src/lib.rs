//! # rsrc-extract
//!
//! Turns the form-details dump of the legacy application's resources into two artifacts:
//! an action matrix (legacy action → project ticket traceability) and a form/control schema
//! (for rebuilding option and utility dialogs).
//!
//! ## Architecture
//!
//! ```text
//! rsrc_form_details.txt            action_ticket_map.csv
//!     │                                │
//!     ├──> Section Parser              └──> Ticket Map (last row wins)
//!     │      └─ FormSection[]                    │
//!     │                                          │
//!     ├──> Action Matrix ────────────────────────┘
//!     │      ├─ canonicalize (trim, -Execute, typo fix)
//!     │      ├─ drop non-`act` entries
//!     │      ├─ cluster by prefix rules
//!     │      └─ reconcile: canonical, then sorted aliases
//!     │
//!     └──> Form Schema
//!            ├─ control kind (prefix rules)
//!            ├─ control domain (keyword rules)
//!            └─ per-form counts + ordered control list
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rsrc_extract::{build_action_matrix, parse_form_sections, ExtractorConfig, TicketMap};
//!
//! let dump = "=== Leather.exe | TfrmLeat | 2\nActions (2)\nactAlignLeftExecute\nactAlignLeft\n";
//! let forms = parse_form_sections(dump);
//! let tickets = TicketMap::from_reader(
//!     "action,ticket_id,feature_group,phase\nactAlignLeft,T-1,Transforms,1\n".as_bytes(),
//! )
//! .unwrap();
//!
//! let rows = build_action_matrix(&forms, &tickets, &ExtractorConfig::default().action_forms);
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].mapped_ticket, "T-1");
//! ```

mod canonical;
mod config;
mod error;
mod matrix;
mod parser;
mod pipeline;
mod rules;
mod schema;
mod tickets;
mod types;

pub use canonical::{canonicalize_action, is_action_identifier, ACTION_PREFIX, EXECUTE_SUFFIX};
pub use config::{ExtractorConfig, DEFAULT_ACTION_FORMS, DEFAULT_SCHEMA_FORMS};
pub use error::{ExtractError, Result};
pub use matrix::{build_action_matrix, mapped_count, write_action_matrix, write_action_matrix_file};
pub use parser::{parse_form_file, parse_form_sections, SectionParser};
pub use pipeline::{run, run_with_clock, RunReport};
pub use rules::{
    classify_cluster, infer_control_domain, infer_control_kind, ActionCluster, ControlDomain,
    ControlKind,
};
pub use schema::{build_form_schema, schema_entry, write_form_schema, write_form_schema_file};
pub use tickets::TicketMap;
pub use types::{
    ActionMatrixRow, ControlRecord, FormSchema, FormSchemaEntry, FormSection, MappingStatus,
    SourceFiles, TicketRecord,
};
