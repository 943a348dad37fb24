//! Ordered, first-match-wins rule tables for actions and controls.
//!
//! Each table is a list of `(category, needles)` pairs evaluated top to bottom. The first pair
//! whose predicate accepts any of its needles decides the category; nothing matching falls back
//! to the table's default. Reordering a table changes results for identifiers that satisfy more
//! than one row.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse functional grouping of a canonical action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionCluster {
    Transforms,
    LineTypePalette,
    GeometryEdit,
    SelectionOrdering,
    ProjectLifecycle,
    ViewportDisplay,
    HelpLinks,
    SecretBonus,
    LayerAdvanced,
    Other,
}

impl ActionCluster {
    pub const ALL: [Self; 10] = [
        Self::Transforms,
        Self::LineTypePalette,
        Self::GeometryEdit,
        Self::SelectionOrdering,
        Self::ProjectLifecycle,
        Self::ViewportDisplay,
        Self::HelpLinks,
        Self::SecretBonus,
        Self::LayerAdvanced,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transforms => "Transforms",
            Self::LineTypePalette => "LineTypePalette",
            Self::GeometryEdit => "GeometryEdit",
            Self::SelectionOrdering => "SelectionOrdering",
            Self::ProjectLifecycle => "ProjectLifecycle",
            Self::ViewportDisplay => "ViewportDisplay",
            Self::HelpLinks => "HelpLinks",
            Self::SecretBonus => "SecretBonus",
            Self::LayerAdvanced => "LayerAdvanced",
            Self::Other => "Other",
        }
    }
}

/// Widget category inferred from a control id's naming prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Checkbox,
    Select,
    Radio,
    Number,
    Text,
    Button,
    Label,
    Group,
    Tab,
    Tree,
    Switch,
    Other,
}

impl ControlKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Number => "number",
            Self::Text => "text",
            Self::Button => "button",
            Self::Label => "label",
            Self::Group => "group",
            Self::Tab => "tab",
            Self::Tree => "tree",
            Self::Switch => "switch",
            Self::Other => "other",
        }
    }
}

/// Functional area inferred from keywords inside a control id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlDomain {
    Stitching,
    Export,
    Print,
    LineTypes,
    Options,
    Repository,
    General,
}

impl ControlDomain {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stitching => "stitching",
            Self::Export => "export",
            Self::Print => "print",
            Self::LineTypes => "line-types",
            Self::Options => "options",
            Self::Repository => "repository",
            Self::General => "general",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(ActionCluster, ControlKind, ControlDomain);

type RuleTable<C> = [(C, &'static [&'static str])];

const CLUSTER_RULES: &RuleTable<ActionCluster> = &[
    (
        ActionCluster::Transforms,
        &[
            "actAlign",
            "actRotate",
            "actScale",
            "actSpecify",
            "actSetAs",
            "actMoveOrCopy",
        ],
    ),
    (
        ActionCluster::LineTypePalette,
        &["actLinePalette", "actLinePallet"],
    ),
    (
        ActionCluster::GeometryEdit,
        &[
            "actCenterLine",
            "actConvert",
            "actReversePath",
            "actSplitIntoN",
            "actDrawBoundary",
            "actDrawGoldenSpiral",
            "actDeleteDuplicates",
            "actEditShapeSize",
            "actEditLineAngle",
            "actLineSymmetry",
            "actDesignHelper_",
        ],
    ),
    (
        ActionCluster::SelectionOrdering,
        &[
            "actSelect",
            "actDeselect",
            "actDeleteSelected",
            "actCreateGroup",
            "actUngroup",
            "actOrder",
        ],
    ),
    (
        ActionCluster::ProjectLifecycle,
        &[
            "actNewProject",
            "actLoadProject",
            "actSaveProject",
            "actClose",
            "actOpenDemoProject",
            "actOpenOptions",
            "actClearAll",
        ],
    ),
    (
        ActionCluster::ViewportDisplay,
        &[
            "actShowHideGrid",
            "actShowHideScale",
            "actShowHideDimensionLines",
            "actShowHidePrintAreas",
            "actSetGridBackground",
            "actResetView",
        ],
    ),
    (ActionCluster::HelpLinks, &["actShow", "actView", "actVisit"]),
    (ActionCluster::SecretBonus, &["actSecret"]),
    (ActionCluster::LayerAdvanced, &["actLayer", "actIgnoreLayer"]),
];

// Case-sensitive prefixes.
const KIND_RULES: &RuleTable<ControlKind> = &[
    (ControlKind::Checkbox, &["chk"]),
    (ControlKind::Select, &["cmb"]),
    (ControlKind::Radio, &["rb"]),
    (ControlKind::Number, &["nb"]),
    (ControlKind::Text, &["ed"]),
    (ControlKind::Button, &["btn"]),
    (ControlKind::Label, &["lbl"]),
    (ControlKind::Group, &["gb"]),
    (ControlKind::Tab, &["tab"]),
    (ControlKind::Tree, &["tv"]),
    (ControlKind::Switch, &["sw", "switch"]),
];

// Lower-case substrings, matched against the lower-cased id.
const DOMAIN_RULES: &RuleTable<ControlDomain> = &[
    (ControlDomain::Stitching, &["stitch", "prick", "thread"]),
    (ControlDomain::Export, &["svg", "dxf"]),
    (ControlDomain::Print, &["print", "tile", "dpi"]),
    (ControlDomain::LineTypes, &["palette", "line", "color"]),
    (
        ControlDomain::Options,
        &["auto", "pitch", "zoom", "save", "option"],
    ),
    (ControlDomain::Repository, &["repo", "catalog", "template"]),
];

fn first_match<C: Copy>(
    rules: &RuleTable<C>,
    default: C,
    matches: impl Fn(&str) -> bool,
) -> C {
    rules
        .iter()
        .find(|(_, needles)| needles.iter().any(|needle| matches(needle)))
        .map_or(default, |(category, _)| *category)
}

/// Cluster for a canonical action name; `Other` when no prefix rule applies
#[must_use]
pub fn classify_cluster(action: &str) -> ActionCluster {
    first_match(CLUSTER_RULES, ActionCluster::Other, |prefix| {
        action.starts_with(prefix)
    })
}

/// Widget kind from the control id's prefix; `Other` when none applies
#[must_use]
pub fn infer_control_kind(control_id: &str) -> ControlKind {
    first_match(KIND_RULES, ControlKind::Other, |prefix| {
        control_id.starts_with(prefix)
    })
}

/// Functional domain from keywords anywhere in the id, case-insensitively
#[must_use]
pub fn infer_control_domain(control_id: &str) -> ControlDomain {
    let lower = control_id.to_lowercase();
    first_match(DOMAIN_RULES, ControlDomain::General, |keyword| {
        lower.contains(keyword)
    })
}
