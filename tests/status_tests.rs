use predicates::prelude::*;
use test_env::TestHome;

fn test_home(logged_in: bool) -> TestHome {
    let home = TestHome::new();
    if logged_in {
        home.write_session();
    }
    home
}

const PASSED_THEN_PENDING: &str = r#"[
    [1, "Seleksi Administrasi", "<p>Pemeriksaan berkas</p>", 1, true, "Selamat", "<p>Anda lolos seleksi administrasi</p>"],
    [2, "Tes Tertulis", null, 2, null, null, null],
    [3, "Wawancara", null, 3, null, null, null]
]"#;

const FAILED_SECOND: &str = r#"[
    [1, "Seleksi Administrasi", null, 1, true, "Selamat", "Lanjut ke tes tertulis"],
    [2, "Tes Tertulis", null, 2, false, "Hasil", "Teks ini tidak ditampilkan"],
    [3, "Wawancara", null, 3, null, null, null],
    [4, "Medical Check Up", null, 4, null, null, null]
]"#;

#[test]
fn test_status_falls_back_to_not_found_when_portal_unreachable() {
    let home = test_home(true);

    home.cmd()
        .args(["status", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data tidak ditemukan."))
        .stderr(predicate::str::contains("Could not load stages for application 42"));
}

#[test]
fn test_status_without_session_shows_not_found() {
    let home = test_home(false);

    home.cmd()
        .args(["status", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data tidak ditemukan."));
}

#[test]
fn test_bare_number_is_status_shorthand() {
    let home = test_home(true);

    home.cmd()
        .arg("42")
        .assert()
        .success()
        .stdout(predicate::str::contains("Data tidak ditemukan."));
}

#[test]
fn test_status_json_fallback_is_empty_view() {
    let home = test_home(true);

    let output = home.cmd()
        .args(["status", "42", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["applicant"], serde_json::Value::Null);
    assert_eq!(value["view"]["visible_stages"], serde_json::json!([]));
    assert_eq!(value["view"]["announcement"], serde_json::Value::Null);
}

#[test]
fn test_status_rejects_invalid_id() {
    let home = test_home(true);

    home.cmd()
        .args(["status", "42/../1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid application ID"));
}

#[test]
fn test_preview_hides_stages_beyond_next() {
    let home = test_home(false);
    let file = home.write_file("stages.json", PASSED_THEN_PENDING);

    home.cmd()
        .arg("preview")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1. Seleksi Administrasi  [Lolos]"))
        .stdout(predicate::str::contains("Pemeriksaan berkas"))
        .stdout(predicate::str::contains(" 2. Tes Tertulis"))
        .stdout(predicate::str::contains("Wawancara").not())
        .stdout(predicate::str::contains("Selamat"))
        .stdout(predicate::str::contains("Anda lolos seleksi administrasi"));
}

#[test]
fn test_preview_failed_stage_shows_rejection() {
    let home = test_home(false);
    let file = home.write_file("stages.json", FAILED_SECOND);

    home.cmd()
        .arg("preview")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("[Tidak Lolos]"))
        .stdout(predicate::str::contains("Mohon maaf"))
        .stdout(predicate::str::contains("Teks ini tidak ditampilkan").not())
        .stdout(predicate::str::contains(" 3. Wawancara"))
        .stdout(predicate::str::contains("Medical Check Up").not());
}

#[test]
fn test_preview_json() {
    let home = test_home(false);
    let file = home.write_file("stages.json", FAILED_SECOND);

    let output = home.cmd()
        .arg("preview")
        .arg(&file)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let stages = value["view"]["visible_stages"].as_array().unwrap();
    assert_eq!(stages.len(), 3);
    assert_eq!(stages[0]["visual_state"], "success");
    assert_eq!(stages[1]["visual_state"], "failure");
    assert_eq!(stages[1]["badge_label"], "Tidak Lolos");
    assert_eq!(stages[2]["visual_state"], "neutral");
    assert_eq!(stages[2]["badge_label"], serde_json::Value::Null);
    assert_eq!(value["view"]["announcement"]["kind"], "rejected");
    assert_eq!(value["view"]["announcement"]["stage_id"], "2");
}

#[test]
fn test_preview_empty_stage_list() {
    let home = test_home(false);
    let file = home.write_file("stages.json", "[]");

    home.cmd()
        .arg("preview")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Data tidak ditemukan."));
}

#[test]
fn test_preview_invalid_payload() {
    let home = test_home(false);
    let file = home.write_file("stages.json", r#"[{"id": 1}]"#);

    home.cmd()
        .arg("preview")
        .arg(&file)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid stage data"));
}

#[test]
fn test_card_requires_session() {
    let home = test_home(false);

    home.cmd()
        .args(["card", "42"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_card_with_unreachable_portal_writes_nothing() {
    let home = test_home(true);
    let out = home.dir.path().join("kartu.pdf");

    home.cmd()
        .args(["card", "42", "--out"])
        .arg(&out)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cannot reach the portal"));
    assert!(!out.exists());
}
