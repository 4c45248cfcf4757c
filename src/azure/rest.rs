//! Management REST API access.
//!
//! A thin bearer-token client over the Azure Resource Manager endpoint.
//! List responses arrive as `value` arrays chained by `nextLink`; the
//! pagination is followed transparently inside [`MgmtClient::get_all`].

use crate::config;
use colored::Colorize;
use serde::Deserialize;
use serde_json::Value;
use std::error::Error;

/// One page of a management list response.
#[derive(Deserialize, Debug, Default)]
struct ListPage {
    /// Objects on this page.
    #[serde(default)]
    value: Vec<Value>,
    /// Continuation URL when more pages follow.
    #[serde(rename = "nextLink")]
    next_link: Option<String>,
}

/// Authenticated client for the management API.
pub struct MgmtClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl MgmtClient {
    /// Client against the public management endpoint.
    pub fn new(http: reqwest::Client, token: String) -> Self {
        Self::with_endpoint(http, config::MANAGEMENT_ENDPOINT.to_string(), token)
    }

    /// Client against a specific endpoint base; tests point this at a mock
    /// server.
    pub fn with_endpoint(http: reqwest::Client, endpoint: String, token: String) -> Self {
        Self {
            http,
            endpoint,
            token,
        }
    }

    /// List every subscription visible to the credential.
    pub async fn list_subscriptions(&self) -> Result<Vec<Value>, Box<dyn Error>> {
        self.get_all(format!(
            "{}/subscriptions?api-version={}",
            self.endpoint,
            config::SUBSCRIPTIONS_API_VERSION
        ))
        .await
    }

    /// List the resource groups of one subscription.
    pub async fn list_resource_groups(
        &self,
        subscription_id: &str,
    ) -> Result<Vec<Value>, Box<dyn Error>> {
        self.get_all(format!(
            "{}/subscriptions/{}/resourcegroups?api-version={}",
            self.endpoint,
            subscription_id,
            config::RESOURCES_API_VERSION
        ))
        .await
    }

    /// List the resources inside one resource group.
    pub async fn list_resources(
        &self,
        subscription_id: &str,
        group_name: &str,
    ) -> Result<Vec<Value>, Box<dyn Error>> {
        self.get_all(format!(
            "{}/subscriptions/{}/resourcegroups/{}/resources?api-version={}",
            self.endpoint,
            subscription_id,
            group_name,
            config::RESOURCES_API_VERSION
        ))
        .await
    }

    /// GET a list URL and every `nextLink` continuation after it,
    /// concatenating the `value` arrays in arrival order.
    async fn get_all(&self, url: String) -> Result<Vec<Value>, Box<dyn Error>> {
        let mut objects = Vec::new();
        let mut next = Some(url);
        let mut page_count = 0;

        while let Some(url) = next {
            let body = self.get(&url).await?;

            let mut deserializer = serde_json::Deserializer::from_str(&body);
            let page: ListPage =
                serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
                    log::error!("OUTPUT START:\n\n{body}\n\nOUTPUT END\n");
                    format!(
                        "Error parsing list page {page_count}: path={} error={}",
                        e.path(),
                        e
                    )
                })?;

            log::debug!(
                "got page#{page_count:2} object_count=+{count:3} more={more}",
                count = page.value.len(),
                more = page.next_link.is_some()
            );

            if page.next_link.as_deref() == Some(url.as_str()) {
                return Err("nextLink not unique - possible infinite loop".into());
            }

            objects.extend(page.value);
            next = page.next_link;
            page_count += 1;
        }

        Ok(objects)
    }

    /// One authenticated GET, returning the raw body on success.
    async fn get(&self, url: &str) -> Result<String, Box<dyn Error>> {
        log::debug!("GET {url}");

        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::warn!("{failed} GET {url}", failed = "failed".on_red());
            return Err(format!("API request failed: {status}: {body}").into());
        }

        Ok(body)
    }
}
