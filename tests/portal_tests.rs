use predicates::prelude::*;
use fake_portal::FakePortal;
use test_env::TestHome;

const RECORD: &str = r#"{
    "participant_number": "2026-0042",
    "job_id": 17,
    "position": "Analis Data",
    "id_number": "3201010101010001",
    "name": "Nama Dari Berkas"
}"#;

const STAGES: &str = r#"[
    [2, "Tes Tertulis", null, 2, null, null, null],
    [1, "Seleksi Administrasi", "<p>Pemeriksaan berkas</p>", 1, true, "Selamat", "<p>Silakan ikuti tes tertulis</p>"],
    [3, "Wawancara", null, 3, null, null, null]
]"#;

fn reply(status: u16, body: &str) -> (u16, String) {
    (status, body.to_string())
}

/// Portal that knows application 42 and nothing else
fn application_portal() -> FakePortal {
    FakePortal::start(|method, path| match (method, path) {
        ("GET", "/aplikasi/42") => reply(200, RECORD),
        ("GET", "/aplikasi/42/tahapan") => reply(200, STAGES),
        _ => reply(404, r#"{"message":"Data tidak ditemukan"}"#),
    })
}

/// Logged-in HOME pointed at `portal`
fn home_for(portal: &FakePortal) -> TestHome {
    let home = TestHome::new();
    home.write_rc(&format!("api.url={}\napi.timeout=5\n", portal.api_url()));
    home.write_session();
    home
}

#[test]
fn test_status_joins_context_and_projects_stages() {
    let portal = application_portal();
    let home = home_for(&portal);

    home.cmd()
        .args(["status", "42"])
        .assert()
        .success()
        // session name wins over the record name
        .stdout(predicate::str::contains("Sari Wulandari"))
        .stdout(predicate::str::contains("Nama Dari Berkas").not())
        .stdout(predicate::str::contains("Position:    Analis Data"))
        .stdout(predicate::str::contains("Participant: 2026-0042"))
        .stdout(predicate::str::contains(" 1. Seleksi Administrasi  [Lolos]"))
        .stdout(predicate::str::contains(" 2. Tes Tertulis"))
        .stdout(predicate::str::contains("Wawancara").not())
        .stdout(predicate::str::contains("Selamat"))
        .stdout(predicate::str::contains("Silakan ikuti tes tertulis"));

    let requests = portal.requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(request.header("authorization"), Some("Bearer test-token"));
    }
}

#[test]
fn test_status_json_with_applicant() {
    let portal = application_portal();
    let home = home_for(&portal);

    let output = home.cmd().args(["status", "42", "--json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["applicant"]["display_name"], "Sari Wulandari");
    assert_eq!(value["applicant"]["job_id"], "17");
    assert_eq!(value["view"]["visible_stages"].as_array().unwrap().len(), 2);
    assert_eq!(value["view"]["announcement"]["kind"], "stage");
    assert_eq!(value["view"]["announcement"]["stage_id"], "1");
}

#[test]
fn test_status_missing_record_drops_only_header() {
    let portal = FakePortal::start(|method, path| match (method, path) {
        ("GET", "/aplikasi/42/tahapan") => reply(200, STAGES),
        _ => reply(404, "{}"),
    });
    let home = home_for(&portal);

    home.cmd()
        .args(["status", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Participant:").not())
        .stdout(predicate::str::contains(" 1. Seleksi Administrasi  [Lolos]"));
}

#[test]
fn test_card_writes_pdf() {
    let portal = application_portal();
    let home = home_for(&portal);
    let out = home.dir.path().join("kartu.pdf");

    home.cmd()
        .args(["card", "42", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved participant card to"));
    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_card_default_file_name() {
    let portal = application_portal();
    let home = home_for(&portal);

    home.cmd()
        .current_dir(home.dir.path())
        .args(["card", "42"])
        .assert()
        .success();
    assert!(home.dir.path().join("kartu-peserta-42.pdf").is_file());
}

#[test]
fn test_card_unknown_application() {
    let portal = application_portal();
    let home = home_for(&portal);
    let out = home.dir.path().join("kartu.pdf");

    home.cmd()
        .args(["card", "7", "--out"])
        .arg(&out)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Application 7 not found"));
    assert!(!out.exists());
}

#[test]
fn test_server_error_is_internal() {
    let portal = FakePortal::start(|_, _| reply(500, "boom"));
    let home = home_for(&portal);

    home.cmd()
        .args(["jobs", "list"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::starts_with("Internal error:"))
        .stderr(predicate::str::contains("Server error (500): boom"));
}

#[test]
fn test_undecodable_response_is_internal() {
    let portal = FakePortal::start(|_, _| reply(200, r#"{"unexpected": true}"#));
    let home = home_for(&portal);

    home.cmd()
        .args(["jobs", "list"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Unexpected response from the portal"));
}

#[test]
fn test_unauthorized_and_forbidden() {
    for status in [401, 403] {
        let portal = FakePortal::start(move |_, _| reply(status, "{}"));
        let home = home_for(&portal);

        home.cmd()
            .args(["applications", "list"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Not logged in or session expired"));
    }
}

#[test]
fn test_rate_limited() {
    let portal = FakePortal::start(|_, _| reply(429, "{}"));
    let home = home_for(&portal);

    home.cmd()
        .args(["jobs", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Too many requests, try again later"));

    home.cmd()
        .args(["resend-otp", "sari@example.id"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Wait a minute"));
}

#[test]
fn test_rejected_request_shows_backend_message() {
    let portal = FakePortal::start(|method, path| match (method, path) {
        ("POST", "/auth/verify-otp") => reply(422, r#"{"message":"Kode OTP salah"}"#),
        _ => reply(404, "{}"),
    });
    let home = home_for(&portal);

    home.cmd()
        .args(["verify", "sari@example.id", "123456"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Request rejected: Kode OTP salah"));

    let request = portal.request_to("POST", "/auth/verify-otp").unwrap();
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["email"], "sari@example.id");
    assert_eq!(body["otp"], "123456");
}

#[test]
fn test_job_not_found() {
    let portal = FakePortal::start(|_, _| reply(404, "{}"));
    let home = home_for(&portal);

    home.cmd()
        .args(["jobs", "show", "9"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Job posting 9 not found"));
}

#[test]
fn test_jobs_list_table() {
    let portal = FakePortal::start(|method, path| match (method, path) {
        ("GET", "/lowongan") => reply(
            200,
            r#"[{"id": 7, "title": "Analis Data", "location": "Jakarta", "deadline": "2020-01-31"}]"#,
        ),
        _ => reply(404, "{}"),
    });
    let home = home_for(&portal);

    home.cmd()
        .args(["jobs", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Analis Data"))
        .stdout(predicate::str::contains("Jakarta"))
        .stdout(predicate::str::contains("(closed)"));
}

#[test]
fn test_apply_uploads_documents() {
    let portal = FakePortal::start(|method, path| match (method, path) {
        ("POST", "/lowongan/7/lamar") => reply(201, r#"{"id": 77, "message": "Lamaran diterima"}"#),
        _ => reply(404, "{}"),
    });
    let home = home_for(&portal);
    let cv = home.write_file("cv.pdf", "isi cv");
    let diploma = home.write_file("ijazah.pdf", "isi ijazah");

    home.cmd()
        .args(["apply", "7", "-d"])
        .arg(&cv)
        .arg("--document")
        .arg(&diploma)
        .assert()
        .success()
        .stdout(predicate::str::contains("Submitted application 77 for job 7"))
        .stdout(predicate::str::contains("Lamaran diterima"));

    let request = portal.request_to("POST", "/lowongan/7/lamar").unwrap();
    assert_eq!(request.header("authorization"), Some("Bearer test-token"));
    assert!(request.header("content-type").unwrap().starts_with("multipart/form-data"));
    assert_eq!(request.body.matches(r#"name="dokumen""#).count(), 2);
    assert!(request.body.contains(r#"filename="cv.pdf""#));
    assert!(request.body.contains(r#"filename="ijazah.pdf""#));
    assert!(request.body.contains("isi cv"));
    assert!(request.body.contains("isi ijazah"));
}

#[test]
fn test_login_saves_session() {
    let portal = FakePortal::start(|method, path| match (method, path) {
        ("POST", "/auth/login") => reply(200, r#"{"token": "fresh-token", "name": "Sari"}"#),
        _ => reply(404, "{}"),
    });
    let home = TestHome::new();
    home.write_rc(&format!("api.url={}\n", portal.api_url()));

    home.cmd()
        .args(["login", "sari@example.id", "--password", "rahasia123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as Sari"));

    let session = std::fs::read_to_string(home.session_path()).unwrap();
    assert!(session.contains("fresh-token"));

    let request = portal.request_to("POST", "/auth/login").unwrap();
    assert_eq!(request.header("authorization"), None);
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["email"], "sari@example.id");
    assert_eq!(body["password"], "rahasia123");
}
