mod common;

use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::*;
use stockroom_console::models::{AuditStatus, MaterialFilter, SupplierFilter};
use stockroom_console::notifications::Severity;

#[tokio::test]
async fn load_all_joins_after_the_slowest_response() {
    let app = TestConsole::new().await;

    // Stagger completion so the barrier, not luck, is what's being tested.
    let delays = [
        ("materials", sample_materials(), 40u64),
        ("suppliers", sample_suppliers(), 120),
        ("warehouses", sample_warehouses(), 10),
        ("inbounds", sample_inbounds(), 200),
        ("outbounds", sample_outbounds(), 80),
    ];
    for (collection, body, delay) in delays {
        Mock::given(method("GET"))
            .and(path(format!("/api/{collection}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(body)
                    .set_delay(Duration::from_millis(delay)),
            )
            .mount(&app.server)
            .await;
    }

    let started = Instant::now();
    let bootstrap = app.console.initialize().await;
    let elapsed = started.elapsed();

    // Resolved only after the 200 ms straggler settled, but the requests ran
    // concurrently rather than one after another.
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_millis(450));

    assert_eq!(bootstrap.lists.materials.len(), 2);
    assert_eq!(bootstrap.lists.suppliers.len(), 2);
    assert_eq!(bootstrap.lists.warehouses.len(), 1);
    assert_eq!(bootstrap.lists.inbounds.len(), 1);
    assert_eq!(bootstrap.lists.outbounds.len(), 1);
    assert_eq!(bootstrap.lists.inbounds[0].audit_status, AuditStatus::Approved);

    // The ready signal projected options from the fresh cache.
    assert_eq!(bootstrap.options.suppliers.len(), 3);
    assert_eq!(bootstrap.options.outbound_materials[1].label, "Bolt (stock: 40 box)");
}

#[tokio::test]
async fn one_failing_list_does_not_stall_the_barrier() {
    let app = TestConsole::new().await;

    Mock::given(method("GET"))
        .and(path("/api/materials"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;
    for (collection, body) in [
        ("suppliers", sample_suppliers()),
        ("warehouses", sample_warehouses()),
        ("inbounds", sample_inbounds()),
        ("outbounds", sample_outbounds()),
    ] {
        app.mock_list(collection, body).await;
    }

    let bootstrap = app.console.initialize().await;

    // The failed slice stays at its prior value (empty on first run) while
    // everything else arrives and the interface becomes interactive.
    assert!(bootstrap.lists.materials.is_empty());
    assert_eq!(bootstrap.lists.suppliers.len(), 2);
    assert_eq!(bootstrap.lists.warehouses.len(), 1);

    let toasts = app.console.notifier.active();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].severity, Severity::Danger);
    assert!(toasts[0].message.contains("materials"));
}

#[tokio::test]
async fn failed_refresh_keeps_the_prior_snapshot() {
    let app = TestConsole::new().await;

    Mock::given(method("GET"))
        .and(path("/api/materials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_materials()))
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/materials"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;

    let first = app.console.loader.load_materials(&MaterialFilter::default()).await;
    assert_eq!(first.len(), 2);

    let second = app.console.loader.load_materials(&MaterialFilter::default()).await;
    assert_eq!(second.len(), 2, "cache slice must keep its prior value");
    assert_eq!(app.console.cache.materials().len(), 2);
    assert!(!app.console.notifier.active().is_empty());
}

#[tokio::test]
async fn search_sends_filter_parameters() {
    let app = TestConsole::new().await;

    // This mock only matches when the filter actually reaches the wire.
    Mock::given(method("GET"))
        .and(path("/api/suppliers"))
        .and(query_param("name", "Acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "supplier_id": 1, "name": "Acme Industrial", "contact": null, "phone": null, "is_valid": true }
        ])))
        .expect(1)
        .mount(&app.server)
        .await;

    let suppliers = app
        .console
        .search_suppliers(&SupplierFilter::by_name("Acme"))
        .await;
    assert_eq!(suppliers.len(), 1);
    assert_eq!(suppliers[0].name, "Acme Industrial");
}
