use crate::error::{ExtractError, Result};
use crate::types::FormSection;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// `=== <resource_file> | <form_name> | ...`
static HEADER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^===\s+(.+?)\s+\|\s+(.+?)\s+\|").expect("header pattern is valid")
});

const ACTIONS_MARKER: &str = "Actions (";
const CONTROLS_MARKER: &str = "Controls (";

/// Which list of the current section item lines are appended to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ListMode {
    #[default]
    None,
    Actions,
    Controls,
}

/// Line-driven state machine over the form-details dump.
///
/// Never fails: unrecognized lines are dropped, and a form without list markers comes out with
/// empty lists.
#[derive(Debug, Default)]
pub struct SectionParser {
    finished: Vec<FormSection>,
    current: Option<FormSection>,
    mode: ListMode,
}

impl SectionParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line (without its terminator)
    pub fn push_line(&mut self, line: &str) {
        if let Some(header) = HEADER_PATTERN.captures(line) {
            let resource_file = header[1].trim();
            let form_name = header[2].trim();
            log::debug!("form header: {resource_file} | {form_name}");
            self.finish_current();
            self.current = Some(FormSection::new(resource_file, form_name));
            self.mode = ListMode::None;
            return;
        }

        let Some(section) = self.current.as_mut() else {
            return;
        };

        if line.starts_with(ACTIONS_MARKER) {
            self.mode = ListMode::Actions;
            return;
        }
        if line.starts_with(CONTROLS_MARKER) {
            self.mode = ListMode::Controls;
            return;
        }

        let item = line.trim();
        if item.is_empty() {
            return;
        }
        match self.mode {
            ListMode::Actions => section.actions.push(item.to_string()),
            ListMode::Controls => section.controls.push(item.to_string()),
            ListMode::None => {}
        }
    }

    /// Close the in-progress section and return every section in file order
    #[must_use]
    pub fn finish(mut self) -> Vec<FormSection> {
        self.finish_current();
        self.finished
    }

    fn finish_current(&mut self) {
        if let Some(section) = self.current.take() {
            self.finished.push(section);
        }
    }
}

/// Split the full text of a form-details dump into sections.
///
/// `\n`, `\r\n` and a lone `\r` all end a line; the empty pieces a CRLF pair leaves behind are
/// blank lines and get dropped.
#[must_use]
pub fn parse_form_sections(text: &str) -> Vec<FormSection> {
    let mut parser = SectionParser::new();
    for line in text.split(['\r', '\n']) {
        parser.push_line(line);
    }
    parser.finish()
}

/// Read and parse a form-details file
pub fn parse_form_file(path: &Path) -> Result<Vec<FormSection>> {
    let text = std::fs::read_to_string(path).map_err(|err| ExtractError::io(path, err))?;
    let forms = parse_form_sections(&text);
    log::debug!("parsed {} form sections from {}", forms.len(), path.display());
    Ok(forms)
}
