use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stockroom_console::config::ConsoleConfig;
use stockroom_console::Console;

/// Console wired against a wiremock server standing in for the remote API.
pub struct TestConsole {
    pub server: MockServer,
    pub console: Console,
}

impl TestConsole {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let config = ConsoleConfig {
            api_base_url: format!("{}/api", server.uri()),
            // Long enough that tests can still read raised toasts.
            toast_ttl_secs: 60,
            ..ConsoleConfig::default()
        };
        let console = Console::new(config).expect("console wiring");
        Self { server, console }
    }

    /// Mounts a 200 list response for one collection.
    pub async fn mock_list(&self, collection: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/{collection}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

}

pub fn sample_materials() -> Value {
    json!([
        { "material_id": 1, "name": "Bolt", "category": "Fasteners", "unit": "box", "stock": 40 },
        { "material_id": 2, "name": "Nut", "category": null, "unit": "bag", "stock": 7 }
    ])
}

#[allow(dead_code)]
pub fn sample_suppliers() -> Value {
    json!([
        { "supplier_id": 1, "name": "Acme Industrial", "contact": "Li Wei", "phone": "13800000000", "is_valid": true },
        { "supplier_id": 2, "name": "Globex", "contact": null, "phone": null, "is_valid": false }
    ])
}

#[allow(dead_code)]
pub fn sample_warehouses() -> Value {
    json!([
        { "warehouse_id": 1, "name": "Main", "location": "Building A" }
    ])
}

pub fn sample_inbounds() -> Value {
    json!([
        {
            "inbound_id": "IN20260101001",
            "supplier_id": 1,
            "warehouse_id": 1,
            "date": "2026-01-01",
            "audit_status": "approved",
            "remark": null
        }
    ])
}

#[allow(dead_code)]
pub fn sample_outbounds() -> Value {
    json!([
        {
            "outbound_id": "OUT20260102001",
            "dept_name": "Maintenance",
            "warehouse_id": 1,
            "date": "2026-01-02",
            "audit_status": "pending",
            "remark": "weekly issue"
        }
    ])
}
