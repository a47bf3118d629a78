//! Typed HTTP client for the remote inventory API.
//!
//! The remote system is authoritative for stock and audit-status values;
//! this client only forwards bodies shaped like the models and reads lists
//! back. Create vs update is decided by whether the caller has an id.

use std::time::Duration;

use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ConsoleConfig;
use crate::errors::ApiError;
use crate::models::{
    InboundDocument, InboundFilter, InboundPayload, Material, MaterialFilter, MaterialPayload,
    OutboundDocument, OutboundFilter, OutboundPayload, Supplier, SupplierFilter, SupplierPayload,
    Warehouse, WarehousePayload,
};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ConsoleConfig) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(&config.api_base_url)?;
        // Url::join replaces the last segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { http, base_url })
    }

    // -- materials ---------------------------------------------------------

    #[instrument(skip(self, filter))]
    pub async fn list_materials(&self, filter: &MaterialFilter) -> Result<Vec<Material>, ApiError> {
        self.get_list("materials", filter).await
    }

    pub async fn save_material(
        &self,
        id: Option<i64>,
        payload: &MaterialPayload,
    ) -> Result<(), ApiError> {
        match id {
            Some(id) => self.send("materials", Some(&id.to_string()), Method::PUT, payload).await,
            None => self.send("materials", None, Method::POST, payload).await,
        }
    }

    pub async fn delete_material(&self, id: i64) -> Result<(), ApiError> {
        self.delete("materials", &id.to_string()).await
    }

    // -- suppliers ---------------------------------------------------------

    #[instrument(skip(self, filter))]
    pub async fn list_suppliers(&self, filter: &SupplierFilter) -> Result<Vec<Supplier>, ApiError> {
        self.get_list("suppliers", filter).await
    }

    pub async fn save_supplier(
        &self,
        id: Option<i64>,
        payload: &SupplierPayload,
    ) -> Result<(), ApiError> {
        match id {
            Some(id) => self.send("suppliers", Some(&id.to_string()), Method::PUT, payload).await,
            None => self.send("suppliers", None, Method::POST, payload).await,
        }
    }

    pub async fn delete_supplier(&self, id: i64) -> Result<(), ApiError> {
        self.delete("suppliers", &id.to_string()).await
    }

    // -- warehouses --------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn list_warehouses(&self) -> Result<Vec<Warehouse>, ApiError> {
        let no_filter: Vec<(&str, &str)> = Vec::new();
        self.get_list("warehouses", &no_filter).await
    }

    pub async fn save_warehouse(
        &self,
        id: Option<i64>,
        payload: &WarehousePayload,
    ) -> Result<(), ApiError> {
        match id {
            Some(id) => self.send("warehouses", Some(&id.to_string()), Method::PUT, payload).await,
            None => self.send("warehouses", None, Method::POST, payload).await,
        }
    }

    pub async fn delete_warehouse(&self, id: i64) -> Result<(), ApiError> {
        self.delete("warehouses", &id.to_string()).await
    }

    // -- documents ---------------------------------------------------------

    #[instrument(skip(self, filter))]
    pub async fn list_inbounds(
        &self,
        filter: &InboundFilter,
    ) -> Result<Vec<InboundDocument>, ApiError> {
        self.get_list("inbounds", filter).await
    }

    pub async fn save_inbound(
        &self,
        id: Option<&str>,
        payload: &InboundPayload,
    ) -> Result<(), ApiError> {
        match id {
            Some(id) => self.send("inbounds", Some(id), Method::PUT, payload).await,
            None => self.send("inbounds", None, Method::POST, payload).await,
        }
    }

    pub async fn delete_inbound(&self, id: &str) -> Result<(), ApiError> {
        self.delete("inbounds", id).await
    }

    #[instrument(skip(self, filter))]
    pub async fn list_outbounds(
        &self,
        filter: &OutboundFilter,
    ) -> Result<Vec<OutboundDocument>, ApiError> {
        self.get_list("outbounds", filter).await
    }

    pub async fn save_outbound(
        &self,
        id: Option<&str>,
        payload: &OutboundPayload,
    ) -> Result<(), ApiError> {
        match id {
            Some(id) => self.send("outbounds", Some(id), Method::PUT, payload).await,
            None => self.send("outbounds", None, Method::POST, payload).await,
        }
    }

    pub async fn delete_outbound(&self, id: &str) -> Result<(), ApiError> {
        self.delete("outbounds", id).await
    }

    // -- plumbing ----------------------------------------------------------

    fn endpoint(&self, collection: &str, id: Option<&str>) -> Result<Url, ApiError> {
        let path = match id {
            Some(id) => format!("{}/{}", collection, id),
            None => collection.to_string(),
        };
        Ok(self.base_url.join(&path)?)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &impl Serialize,
    ) -> Result<Vec<T>, ApiError> {
        let url = self.endpoint(collection, None)?;
        let response = self.http.get(url).query(query).send().await?;
        let response = Self::ensure_ok(response)?;
        Ok(response.json().await?)
    }

    async fn send(
        &self,
        collection: &str,
        id: Option<&str>,
        method: Method,
        payload: &impl Serialize,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(collection, id)?;
        debug!(%url, %method, "submitting");
        let response = self.http.request(method, url).json(payload).send().await?;
        Self::ensure_ok(response)?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(collection, Some(id))?;
        let response = self.http.delete(url).send().await?;
        Self::ensure_ok(response)?;
        Ok(())
    }

    fn ensure_ok(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let config = ConsoleConfig {
            api_base_url: "http://localhost:5000/api".to_string(),
            ..ConsoleConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        let url = client.endpoint("materials", None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/materials");

        let url = client.endpoint("inbounds", Some("IN20251114001")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/inbounds/IN20251114001");
    }

    #[test]
    fn rejects_bad_base_url() {
        let config = ConsoleConfig {
            api_base_url: "not a url".to_string(),
            ..ConsoleConfig::default()
        };
        assert!(ApiClient::new(&config).is_err());
    }
}
