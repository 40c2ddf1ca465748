//! Fixtures shared by the CLI integration tests.

#![allow(dead_code)]

use std::path::Path;
use assert_cmd::Command;

use chrono::NaiveDate;
use oficina_core::types::{EventType, Participant, Workshop, WorkshopId};
use serde_json::Value;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub fn oficina_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("oficina"));
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env_remove("OFICINA_API_URL")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// `oficina_cmd` pointed at `service` through `--api-url`.
pub fn oficina_against(home: &Path, service: &Service) -> Command {
    let mut cmd = oficina_cmd(home);
    cmd.args(["--api-url", &service.url()]);
    cmd
}

pub fn participant(ra: &str, name: &str) -> Participant {
    Participant::new(ra, name)
}

pub fn workshop(id: i64, title: &str, max: u32, roster: &[Participant]) -> Workshop {
    Workshop {
        id: WorkshopId(id),
        title: title.to_string(),
        description: Some(format!("{title} hands-on")),
        date: NaiveDate::from_ymd_opt(2026, 5, 14).expect("date"),
        duration_hours: 3,
        max_participants: max,
        event_type: EventType::InPerson,
        participants: roster.to_vec(),
    }
}

pub fn catalog() -> Vec<Participant> {
    vec![
        participant("RA001", "Ana Souza"),
        participant("RA002", "Bruno Lima"),
        participant("RA003", "Carla Dias"),
    ]
}

/// Workshop #1 (max 2) and #2 (max 1), both starting with Ana.
pub fn workshops() -> Vec<Workshop> {
    let ana = [participant("RA001", "Ana Souza")];
    vec![workshop(1, "Rust", 2, &ana), workshop(2, "Git", 1, &ana)]
}

pub const CERTIFICATES: &[u8] = b"PK\x03\x04certificates";

/// Mock workshop service. The binary is run synchronously, so the server
/// gets its own multi-threaded runtime.
pub struct Service {
    server: MockServer,
    runtime: Runtime,
}

impl Service {
    /// A service with no routes; everything answers 404.
    pub fn start() -> Self {
        let runtime = Runtime::new().expect("tokio runtime");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    /// Serves [`catalog`], [`workshops`] and the certificate archive of
    /// workshop #1. Mutating routes are mounted per test.
    pub fn seeded() -> Self {
        let service = Self::start();
        service.serve_catalog(&catalog());
        let all = workshops();
        service.respond("GET", "/workshops", ResponseTemplate::new(200).set_body_json(&all));
        for w in &all {
            service.respond(
                "GET",
                &format!("/workshops/{}", w.id),
                ResponseTemplate::new(200).set_body_json(w),
            );
        }
        service.respond(
            "GET",
            "/certificados/workshops/1/zip",
            ResponseTemplate::new(200).set_body_bytes(CERTIFICATES.to_vec()),
        );
        service
    }

    pub fn url(&self) -> String {
        self.server.uri()
    }

    pub fn serve_catalog(&self, participants: &[Participant]) {
        self.respond(
            "GET",
            "/participantes",
            ResponseTemplate::new(200).set_body_json(participants),
        );
    }

    pub fn respond(&self, verb: &str, route: &str, response: ResponseTemplate) {
        self.mount(
            Mock::given(method(verb))
                .and(path(route))
                .respond_with(response),
        );
    }

    /// Like [`Service::respond`], but only for the first matching request.
    pub fn respond_once(&self, verb: &str, route: &str, response: ResponseTemplate) {
        self.mount(
            Mock::given(method(verb))
                .and(path(route))
                .respond_with(response)
                .up_to_n_times(1),
        );
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    /// `METHOD path` of every request other than GET, in arrival order.
    pub fn mutations(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter(|r| r.method.to_string() != "GET")
            .map(|r| format!("{} {}", r.method, r.url.path()))
            .collect()
    }

    /// JSON bodies of the requests matching `verb` and `route`.
    pub fn bodies(&self, verb: &str, route: &str) -> Vec<Value> {
        self.requests()
            .iter()
            .filter(|r| r.method.to_string() == verb && r.url.path() == route)
            .map(|r| serde_json::from_slice(&r.body).expect("JSON request body"))
            .collect()
    }
}
