//! End-to-end tests: service file -> factory -> pool against a mock server.

mod common;

use std::sync::Arc;
use svck::config::{load_service_files, RunConfig};
use svck::factory::{build_checks, FactoryError};
use svck::pool::{NoProgress, WorkerPool};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_fake_address_probes_real_virtual_host() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("host", "www.example.com"))
        .and(header("x-forwarded-proto", "https"))
        .and(header("user-agent", "svck-test"))
        .and(header("accept-language", "en"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Cache-Control", "max-age=60")
                .set_body_string("<title>Example</title>"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let file = common::write_service_file(
        r#"
web:
  addresses: [www.example.com]
  tests:
    home:
      ssl: true
      status: 200
      req_headers:
        Accept-Language: en
      expected_headers:
        Cache-Control: ["max-age=[0-9]+"]
      resources:
        index:
          url: /
          contains: ["<title>Example</title>"]
"#,
    );

    let run = RunConfig {
        user_agent: "svck-test".to_string(),
        progress: false,
        ..Default::default()
    }
    .with_fake_address(Some(mock_server.address().to_string()))
    .with_fake_proto(Some("http".to_string()));

    let services = load_service_files(&[file.path().to_path_buf()]).unwrap();
    let checks = build_checks(&services, &run).unwrap();
    let checks = WorkerPool::new(run.workers).run(checks, Arc::new(NoProgress)).await;

    assert_eq!(checks.len(), 1);
    let check = &checks[0];
    assert_eq!(check.name(), "web@www.example.com/home/index");
    assert!(check.success(), "reasons: {:?}", check.reason());
    assert!(check.as_curl().contains("-H \"Host: www.example.com\""));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cross_product_against_two_addresses() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;
    for server in [&first, &second] {
        Mock::given(method("GET"))
            .and(path("/a"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/b"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(server)
            .await;
    }

    let first_addr = first.address().to_string();
    let second_addr = second.address().to_string();
    let services = common::services(
        "svc",
        common::make_service(&[first_addr.as_str(), second_addr.as_str()], &["/a", "/b"]),
    );

    let checks = build_checks(&services, &RunConfig::default()).unwrap();
    assert_eq!(checks.len(), 4);

    let checks = WorkerPool::new(2).run(checks, Arc::new(NoProgress)).await;
    let failed: Vec<_> = checks
        .iter()
        .filter(|c| !c.success())
        .map(|c| c.id.resource.clone())
        .collect();
    assert_eq!(failed, vec!["b", "b"]);
    for check in checks.iter().filter(|c| !c.success()) {
        assert_eq!(check.reason(), ["Expected 200, received 404"]);
    }
}

#[test]
fn test_bad_address_aborts_before_any_request() {
    let services = common::services(
        "svc",
        common::make_service(&["good.example.com", "bad host"], &["/"]),
    );
    let result = build_checks(&services, &RunConfig::default());
    assert!(matches!(result, Err(FactoryError::InvalidUrl { .. })));
}
