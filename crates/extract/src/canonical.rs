/// Every canonical action identifier starts with this.
pub const ACTION_PREFIX: &str = "act";

/// Event-handler variant suffix, e.g. `actAlignLeftExecute` for `actAlignLeft`.
pub const EXECUTE_SUFFIX: &str = "Execute";

/// Historical misspelling in the legacy action names and its correction.
const PALETTE_TYPO: (&str, &str) = ("LinePallet", "LinePalette");

/// Normalize a raw action name: trim, drop one trailing `Execute`, fix the palette typo.
#[must_use]
pub fn canonicalize_action(raw: &str) -> String {
    let value = raw.trim();
    let value = value.strip_suffix(EXECUTE_SUFFIX).unwrap_or(value);
    let (typo, fixed) = PALETTE_TYPO;
    value.replace(typo, fixed)
}

/// Whether a canonical name looks like an action identifier rather than stray text
#[must_use]
pub fn is_action_identifier(canonical: &str) -> bool {
    canonical.starts_with(ACTION_PREFIX)
}
