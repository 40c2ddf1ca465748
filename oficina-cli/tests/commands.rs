mod common;

use std::fs;

use predicates::prelude::*;
use predicates::str::contains;
use serde_json::json;
use tempfile::TempDir;
use wiremock::ResponseTemplate;

use common::{oficina_against, oficina_cmd, participant, Service, CERTIFICATES};

// ---------------------------------------------------------------------------
// workshops
// ---------------------------------------------------------------------------

#[test]
fn workshops_list_json_matches_service() {
    let home = TempDir::new().expect("home");
    let service = Service::seeded();

    let output = oficina_against(home.path(), &service)
        .args(["workshops", "list", "--json"])
        .output()
        .expect("run oficina");
    assert!(output.status.success());

    let workshops: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let workshops = workshops.as_array().expect("array");
    assert_eq!(workshops.len(), 2);
    assert_eq!(workshops[0]["titulo"], "Rust");
    assert_eq!(workshops[0]["numeroMaxParticipantes"], 2);
    assert_eq!(workshops[1]["participantes"][0]["ra"], "RA001");
}

#[test]
fn workshops_list_table_shows_enrollment() {
    let home = TempDir::new().expect("home");
    let service = Service::seeded();

    oficina_against(home.path(), &service)
        .args(["workshops", "list"])
        .assert()
        .success()
        .stdout(contains("Rust"))
        .stdout(contains("1/2"))
        .stdout(contains("PRESENCIAL"));
}

#[test]
fn workshops_create_validates_before_sending() {
    let home = TempDir::new().expect("home");
    let service = Service::seeded();
    service.respond(
        "POST",
        "/workshops",
        ResponseTemplate::new(201).set_body_json(json!({
            "id": 3,
            "titulo": "Docker",
            "data": "2026-06-01",
            "duracao": 1,
            "numeroMaxParticipantes": 20,
            "tipoEvento": "ONLINE",
            "participantes": []
        })),
    );

    oficina_against(home.path(), &service)
        .args(["workshops", "create", "--title", "Docker", "--date", "2026-06-01"])
        .args(["--max", "0"])
        .assert()
        .failure()
        .stderr(contains("max_participants"));
    assert!(service.mutations().is_empty());

    oficina_against(home.path(), &service)
        .args(["workshops", "create", "--title", "Docker", "--date", "2026-06-01"])
        .args(["--max", "20", "--type", "online"])
        .assert()
        .success()
        .stdout(contains("Created workshop #3 'Docker'"));

    let sent = service.bodies("POST", "/workshops");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["duracao"], 1);
    assert_eq!(sent[0]["tipoEvento"], "ONLINE");
    assert_eq!(sent[0]["participantes"], json!([]));
}

#[test]
fn workshops_update_keeps_unspecified_fields_and_roster() {
    let home = TempDir::new().expect("home");
    let service = Service::seeded();
    service.respond("PUT", "/workshops/1", ResponseTemplate::new(200));

    oficina_against(home.path(), &service)
        .args(["workshops", "update", "1", "--max", "5"])
        .assert()
        .success();

    let sent = service.bodies("PUT", "/workshops/1");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["numeroMaxParticipantes"], 5);
    assert_eq!(sent[0]["titulo"], "Rust");
    assert_eq!(sent[0]["duracao"], 3);
    assert_eq!(sent[0]["participantes"][0]["ra"], "RA001");
}

#[test]
fn workshops_delete_with_yes_skips_prompt() {
    let home = TempDir::new().expect("home");
    let service = Service::seeded();
    service.respond("DELETE", "/workshops/2", ResponseTemplate::new(204));

    oficina_against(home.path(), &service)
        .args(["workshops", "delete", "2", "--yes"])
        .assert()
        .success()
        .stdout(contains("Deleted workshop #2 'Git'"));
    assert_eq!(service.mutations(), vec!["DELETE /workshops/2"]);
}

#[test]
fn workshops_delete_declined_sends_nothing() {
    let home = TempDir::new().expect("home");
    let service = Service::seeded();

    oficina_against(home.path(), &service)
        .args(["workshops", "delete", "2"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Aborted."));
    assert!(service.mutations().is_empty());
}

#[test]
fn missing_workshop_reports_not_found() {
    let home = TempDir::new().expect("home");
    let service = Service::seeded();

    oficina_against(home.path(), &service)
        .args(["workshops", "show", "42"])
        .assert()
        .failure()
        .stderr(contains("failed to load workshop #42"))
        .stderr(contains("404"));
}

// ---------------------------------------------------------------------------
// participants
// ---------------------------------------------------------------------------

#[test]
fn participants_register_rejects_duplicate_ra() {
    let home = TempDir::new().expect("home");
    let service = Service::seeded();
    service.respond(
        "POST",
        "/participantes",
        ResponseTemplate::new(201).set_body_json(participant("RA004", "Davi Reis")),
    );

    oficina_against(home.path(), &service)
        .args(["participants", "register", "--ra", "RA002", "--name", "Outro"])
        .assert()
        .failure()
        .stderr(contains("RA already registered"));
    assert!(service.mutations().is_empty());

    oficina_against(home.path(), &service)
        .args(["participants", "register", "--ra", "RA004", "--name", "Davi Reis"])
        .assert()
        .success()
        .stdout(contains("Registered Davi Reis (RA004)"));
    assert_eq!(
        service.bodies("POST", "/participantes"),
        vec![json!({ "ra": "RA004", "name": "Davi Reis" })]
    );
}

#[test]
fn participants_update_and_delete() {
    let home = TempDir::new().expect("home");
    let service = Service::seeded();
    service.respond("PUT", "/participantes/RA003", ResponseTemplate::new(200));
    service.respond("DELETE", "/participantes/RA003", ResponseTemplate::new(204));

    oficina_against(home.path(), &service)
        .args(["participants", "update", "RA003", "--name", "Carla Dias Neto"])
        .assert()
        .success();
    assert_eq!(
        service.bodies("PUT", "/participantes/RA003"),
        vec![json!({ "ra": "RA003", "name": "Carla Dias Neto" })]
    );

    oficina_against(home.path(), &service)
        .args(["participants", "delete", "RA404", "--yes"])
        .assert()
        .failure()
        .stderr(contains("no participant with RA 'RA404'"));

    oficina_against(home.path(), &service)
        .args(["participants", "delete", "RA003", "--yes"])
        .assert()
        .success();
    assert_eq!(
        service.mutations(),
        vec!["PUT /participantes/RA003", "DELETE /participantes/RA003"]
    );
}

#[test]
fn participants_delete_addresses_ra_with_reserved_characters() {
    let home = TempDir::new().expect("home");
    let service = Service::start();
    service.serve_catalog(&[participant("RA", "Curto"), participant("RA#1", "Cerquilha")]);
    service.respond("DELETE", "/participantes/RA%231", ResponseTemplate::new(204));

    oficina_against(home.path(), &service)
        .args(["participants", "delete", "RA#1", "--yes"])
        .assert()
        .success()
        .stdout(contains("Deleted Cerquilha (RA#1)"));
    assert_eq!(service.mutations(), vec!["DELETE /participantes/RA%231"]);
}

// ---------------------------------------------------------------------------
// certificates
// ---------------------------------------------------------------------------

#[test]
fn certificates_download_writes_then_reports_unchanged() {
    let home = TempDir::new().expect("home");
    let out = TempDir::new().expect("out");
    let service = Service::seeded();
    let out_dir = out.path().to_str().expect("utf-8 path");

    oficina_against(home.path(), &service)
        .args(["certificates", "download", "1", "--out", out_dir, "--dry-run"])
        .assert()
        .success()
        .stdout(contains("would write"));
    assert!(!out.path().join("certificados_Rust.zip").exists());

    oficina_against(home.path(), &service)
        .args(["certificates", "download", "1", "--out", out_dir])
        .assert()
        .success()
        .stdout(contains("certificados_Rust.zip"));
    assert_eq!(
        fs::read(out.path().join("certificados_Rust.zip")).expect("archive"),
        CERTIFICATES
    );

    oficina_against(home.path(), &service)
        .args(["certificates", "download", "1", "--out", out_dir])
        .assert()
        .success()
        .stdout(contains("unchanged"));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_set_url_persists_normalized_url() {
    let home = TempDir::new().expect("home");

    oficina_cmd(home.path())
        .args(["config", "set-url", "https://oficinas.example.org/api/"])
        .assert()
        .success()
        .stdout(contains("https://oficinas.example.org/api"));

    let yaml = fs::read_to_string(home.path().join(".oficina/config.yaml")).expect("config");
    assert!(yaml.contains("https://oficinas.example.org/api"));
    assert!(!yaml.contains("/api/"));

    oficina_cmd(home.path())
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .stdout(contains(r#""api_url": "https://oficinas.example.org/api""#))
        .stdout(contains(r#""timeout_secs": 10"#));
}

#[test]
fn config_set_url_rejects_non_http_url() {
    let home = TempDir::new().expect("home");

    oficina_cmd(home.path())
        .args(["config", "set-url", "ftp://example.org"])
        .assert()
        .failure()
        .stderr(contains("invalid API URL"));
    assert!(!home.path().join(".oficina/config.yaml").exists());
}

#[test]
fn api_url_env_var_overrides_config_file() {
    let home = TempDir::new().expect("home");
    let service = Service::seeded();

    oficina_cmd(home.path())
        .args(["config", "set-url", "http://127.0.0.1:1"])
        .assert()
        .success();

    oficina_cmd(home.path())
        .env("OFICINA_API_URL", service.url())
        .args(["participants", "list"])
        .assert()
        .success()
        .stdout(contains("Bruno Lima"));
}

// ---------------------------------------------------------------------------
// account
// ---------------------------------------------------------------------------

#[test]
fn account_check_reports_every_failing_field() {
    let home = TempDir::new().expect("home");

    oficina_cmd(home.path())
        .args(["account", "check", "--email", "prof@utfpr.edu.br"])
        .args(["--password", "Segura@2026", "--confirm", "Segura@2026"])
        .assert()
        .success();

    oficina_cmd(home.path())
        .args(["account", "check", "--email", "prof@gmail.com"])
        .args(["--password", "fraca", "--confirm", "outra"])
        .assert()
        .failure()
        .stderr(contains("email:"))
        .stderr(contains("password:"))
        .stderr(contains("confirm_password:"))
        .stdout(predicate::str::is_empty());
}
