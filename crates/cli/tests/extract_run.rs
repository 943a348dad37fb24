use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

const DUMP: &str = "\
=== Leather.exe | TfrmLeat | 4 actions
Actions (4)
actAlignLeftExecute
actAlignLeft
actShowHideGridExecute
ImageList1
Controls (1)
pnlMain
=== Leather.exe | TfrmOptions | 3 controls
Actions (0)
Controls (3)
chkStitchAutoSave
cmbLineColor
btnOk
=== Leather.exe | TfrmAbout | 1 control
Controls (1)
lblVersion
";

const TICKETS: &str = "\
action,ticket_id,feature_group,phase
actAlignLeft,T-1,Transforms,1
";

fn setup() -> tempfile::TempDir {
    let temp = tempdir().unwrap();
    fs::create_dir_all(temp.path().join("extracted-rsrc")).unwrap();
    fs::write(temp.path().join("extracted-rsrc/rsrc_form_details.txt"), DUMP).unwrap();
    fs::write(temp.path().join("source_app_action_ticket_map.csv"), TICKETS).unwrap();
    temp
}

#[allow(deprecated)]
fn rsrc_forms(workdir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("rsrc-forms").expect("binary");
    cmd.current_dir(workdir)
        .env_remove("RSRC_FORM_DETAILS")
        .env_remove("RSRC_TICKET_MAP")
        .env_remove("RSRC_MATRIX_OUT")
        .env_remove("RSRC_SCHEMA_OUT");
    cmd
}

#[test]
fn default_paths_write_both_artifacts() {
    let temp = setup();
    let root = temp.path();

    rsrc_forms(root)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Wrote mainform_action_matrix.csv (2 actions, 1 mapped)",
        ))
        .stdout(predicate::str::contains(
            "Wrote form_schema_options_export_stitching.json (1 forms)",
        ));

    let matrix = fs::read_to_string(root.join("mainform_action_matrix.csv")).unwrap();
    let lines: Vec<&str> = matrix.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[1],
        "actAlignLeft,actAlignLeft;actAlignLeftExecute,TfrmLeat,Transforms,T-1,Transforms,1,mapped"
    );
    assert_eq!(
        lines[2],
        "actShowHideGrid,actShowHideGridExecute,TfrmLeat,ViewportDisplay,,,,unmapped"
    );

    let schema: Value = serde_json::from_str(
        &fs::read_to_string(root.join("form_schema_options_export_stitching.json")).unwrap(),
    )
    .unwrap();
    let forms = schema["forms"].as_array().unwrap();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0]["form_name"], "TfrmOptions");
    assert_eq!(forms[0]["domain_counts"]["line-types"], 1);
    assert_eq!(forms[0]["domain_counts"]["stitching"], 1);
    assert_eq!(forms[0]["domain_counts"]["general"], 1);
}

#[test]
fn flags_redirect_outputs_into_new_directories() {
    let temp = setup();
    let root = temp.path();

    rsrc_forms(root)
        .args(["--matrix-out", "reports/a/matrix.csv"])
        .args(["--schema-out", "reports/b/schema.json"])
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote reports/a/matrix.csv"));

    assert!(root.join("reports/a/matrix.csv").is_file());
    assert!(root.join("reports/b/schema.json").is_file());
}

#[test]
fn env_vars_and_config_file_are_honored() {
    let temp = setup();
    let root = temp.path();
    fs::write(
        root.join("rsrc.toml"),
        "schema_out = \"from-config.json\"\nschema_forms = [\"TfrmAbout\"]\n",
    )
    .unwrap();

    rsrc_forms(root)
        .args(["--config", "rsrc.toml"])
        .env("RSRC_MATRIX_OUT", "from-env.csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote from-env.csv"))
        .stdout(predicate::str::contains("Wrote from-config.json (1 forms)"));

    let schema: Value =
        serde_json::from_str(&fs::read_to_string(root.join("from-config.json")).unwrap()).unwrap();
    assert_eq!(schema["forms"][0]["form_name"], "TfrmAbout");
    assert_eq!(schema["forms"][0]["controls"][0]["kind"], "label");
}

#[test]
fn missing_input_fails_with_nonzero_status() {
    let temp = tempdir().unwrap();

    rsrc_forms(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("rsrc_form_details.txt"));
}
