use crate::error::{ExtractError, Result};
use crate::types::TicketRecord;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

const ACTION_COLUMN: &str = "action";
const TICKET_COLUMN: &str = "ticket_id";
const FEATURE_GROUP_COLUMN: &str = "feature_group";
const PHASE_COLUMN: &str = "phase";

/// Action-to-ticket lookup table loaded from the mapping CSV.
///
/// Keys are trimmed action names (canonical or alias spellings, whatever the table holds).
/// Lookups are exact; callers decide which spellings to try.
#[derive(Debug, Clone, Default)]
pub struct TicketMap {
    entries: HashMap<String, TicketRecord>,
}

/// Column positions resolved from the header row
struct Columns {
    action: Option<usize>,
    ticket_id: Option<usize>,
    feature_group: Option<usize>,
    phase: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        // A repeated header name resolves to its last occurrence.
        let find = |name: &str| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, header)| *header == name)
                .map(|(idx, _)| idx)
                .last()
        };
        Self {
            action: find(ACTION_COLUMN),
            ticket_id: find(TICKET_COLUMN),
            feature_group: find(FEATURE_GROUP_COLUMN),
            phase: find(PHASE_COLUMN),
        }
    }
}

fn field(record: &csv::StringRecord, column: Option<usize>) -> &str {
    column.and_then(|idx| record.get(idx)).unwrap_or("")
}

impl TicketMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from any CSV source with a header row.
    ///
    /// Rows with a blank action are skipped; a repeated action key keeps the last row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);
        let columns = Columns::from_headers(csv_reader.headers()?);
        if columns.action.is_none() {
            log::warn!("ticket map has no `{ACTION_COLUMN}` column; every action will be unmapped");
        }

        let mut map = Self::new();
        let mut overwritten = 0usize;
        for record in csv_reader.records() {
            let record = record?;
            let action = field(&record, columns.action).trim();
            if action.is_empty() {
                continue;
            }
            let ticket = TicketRecord {
                ticket_id: field(&record, columns.ticket_id).to_string(),
                feature_group: field(&record, columns.feature_group).to_string(),
                phase: field(&record, columns.phase).to_string(),
            };
            if map.insert(action, ticket).is_some() {
                overwritten += 1;
            }
        }

        if overwritten > 0 {
            log::warn!("ticket map: {overwritten} duplicate action key(s), last row kept");
        }
        Ok(map)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|err| ExtractError::io(path, err))?;
        let map = Self::from_reader(file)?;
        log::debug!("loaded {} ticket keys from {}", map.len(), path.display());
        Ok(map)
    }

    /// Insert or overwrite; returns the replaced record
    pub fn insert(&mut self, action: impl Into<String>, ticket: TicketRecord) -> Option<TicketRecord> {
        self.entries.insert(action.into(), ticket)
    }

    #[must_use]
    pub fn get(&self, action: &str) -> Option<&TicketRecord> {
        self.entries.get(action)
    }

    /// Reconciliation order: the canonical name first, then each alias in the order given
    pub fn resolve<'a, I>(&self, canonical: &str, aliases: I) -> Option<&TicketRecord>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.get(canonical)
            .or_else(|| aliases.into_iter().find_map(|alias| self.get(alias)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ticket(id: &str, group: &str, phase: &str) -> TicketRecord {
        TicketRecord {
            ticket_id: id.to_string(),
            feature_group: group.to_string(),
            phase: phase.to_string(),
        }
    }

    #[test]
    fn loads_rows_keyed_by_trimmed_action() {
        let csv = "action,ticket_id,feature_group,phase\n  actAlignLeft ,T-1,Transforms,1\n";
        let map = TicketMap::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get("actAlignLeft"),
            Some(&ticket("T-1", "Transforms", "1"))
        );
    }

    #[test]
    fn blank_actions_are_skipped() {
        let csv = "action,ticket_id,feature_group,phase\n   ,T-1,x,1\n,T-2,y,2\nactSave,T-3,z,3\n";
        let map = TicketMap::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.get("actSave").is_some());
    }

    #[test]
    fn last_duplicate_row_wins() {
        let csv = "action,ticket_id,feature_group,phase\nactSave,T-1,a,1\nactSave,T-9,b,2\n";
        let map = TicketMap::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(map.get("actSave"), Some(&ticket("T-9", "b", "2")));
    }

    #[test]
    fn missing_columns_and_short_rows_read_as_empty() {
        let csv = "phase,action,notes\n2,actSave\nactOnly\n";
        let map = TicketMap::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(map.get("actSave"), Some(&ticket("", "", "2")));
        // A single-field row has no `action` value (column 1), so it is skipped.
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn quoted_fields_are_unescaped() {
        let csv = "action,ticket_id,feature_group,phase\nactSave,\"T-1, T-2\",\"Project \"\"IO\"\"\",1\n";
        let map = TicketMap::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(
            map.get("actSave"),
            Some(&ticket("T-1, T-2", "Project \"IO\"", "1"))
        );
    }

    #[test]
    fn repeated_header_uses_last_column() {
        let csv = "action,ticket_id,action\nactIgnored,T-1,actSave\n";
        let map = TicketMap::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.get("actIgnored").is_none());
        assert_eq!(map.get("actSave"), Some(&ticket("T-1", "", "")));
    }

    #[test]
    fn no_action_column_maps_nothing() {
        let csv = "name,ticket_id\nactSave,T-1\n";
        let map = TicketMap::from_reader(csv.as_bytes()).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn resolve_prefers_canonical_then_aliases_in_order() {
        let mut map = TicketMap::new();
        map.insert("actB", ticket("T-B", "", ""));
        map.insert("actC", ticket("T-C", "", ""));

        assert_eq!(
            map.resolve("actB", ["actC"]).map(|t| t.ticket_id.as_str()),
            Some("T-B")
        );
        assert_eq!(
            map.resolve("actA", ["actC", "actB"]).map(|t| t.ticket_id.as_str()),
            Some("T-C")
        );
        assert!(map.resolve("actA", ["actZ"]).is_none());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = TicketMap::from_path(Path::new("/nonexistent/tickets.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tickets.csv"));
    }
}
