//! `reqwest` client for the Azure DevOps REST API (version 5.1).
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/{project}/_apis/policy/configurations` | Create policy configuration |
//! | GET    | `/{project}/_apis/policy/configurations/{id}` | Get policy configuration |
//! | PUT    | `/{project}/_apis/policy/configurations/{id}` | Update policy configuration |
//! | DELETE | `/{project}/_apis/policy/configurations/{id}` | Delete policy configuration |
//! | POST   | `/_apis/distributedtask/pools` | Add agent pool |
//! | GET    | `/_apis/distributedtask/pools/{id}` | Get agent pool |
//! | PATCH  | `/_apis/distributedtask/pools/{id}` | Update agent pool |
//! | DELETE | `/_apis/distributedtask/pools/{id}` | Delete agent pool |
//!
//! HTTP 404 maps to [`ClientError::NotFound`]; any other non-2xx status maps
//! to [`ClientError::Api`]. Requests are not retried.

use super::models::*;
use super::{AgentPoolClient, ClientError, PolicyClient};
use crate::config::ProviderConfig;
use log::{debug, trace};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

const API_VERSION: &str = "5.1";

/// HTTP client bound to one Azure DevOps organization.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RestClient {
    /// Build a client from provider configuration.
    pub fn new(config: &ProviderConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        let mut authorization = HeaderValue::from_str(&config.credential().authorization_header())
            .map_err(|_| ClientError::Configuration {
                message: "personal access token contains invalid header characters".to_string(),
            })?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Configuration {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        let base_url = Url::parse(config.base_url())
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ClientError::Configuration {
                message: format!("invalid organization URL '{}'", config.base_url()),
            })?;

        Ok(Self { http, base_url })
    }

    /// Organization URL extended by `segments`, each percent-encoded.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.query_pairs_mut().append_pair("api-version", API_VERSION);
        url
    }

    fn policy_url(&self, project: &str, id: Option<i32>) -> Url {
        match id {
            Some(id) => self.url(&[project, "_apis", "policy", "configurations", &id.to_string()]),
            None => self.url(&[project, "_apis", "policy", "configurations"]),
        }
    }

    fn pool_url(&self, id: Option<i32>) -> Url {
        match id {
            Some(id) => self.url(&["_apis", "distributedtask", "pools", &id.to_string()]),
            None => self.url(&["_apis", "distributedtask", "pools"]),
        }
    }

    /// Send a request and map the status to a client error.
    ///
    /// `target` names the entity for the not-found case.
    async fn send(
        &self,
        request: RequestBuilder,
        endpoint: &str,
        target: (&str, String),
    ) -> Result<Response, ClientError> {
        debug!("Calling Azure DevOps {}", endpoint);

        let resp = request.send().await.map_err(|e| ClientError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::not_found(target.0, target.1));
        }
        if !status.is_success() {
            let body = resp.text().await.map_err(|e| ClientError::Http {
                endpoint: endpoint.to_string(),
                source: e,
            })?;
            return Err(ClientError::api(endpoint, status.as_u16(), body));
        }

        trace!("Azure DevOps {} returned {}", endpoint, status);
        Ok(resp)
    }

    async fn decode<T: DeserializeOwned>(resp: Response, endpoint: &str) -> Result<T, ClientError> {
        resp.json().await.map_err(|e| ClientError::Deserialization {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }
}

impl PolicyClient for RestClient {
    async fn create_policy_configuration(
        &self,
        args: CreatePolicyConfigurationArgs,
    ) -> Result<PolicyConfiguration, ClientError> {
        let endpoint = format!("POST /{}/_apis/policy/configurations", args.project);
        let request = self
            .http
            .post(self.policy_url(&args.project, None))
            .json(&args.configuration);

        let resp = self
            .send(request, &endpoint, ("policy configuration", String::new()))
            .await?;
        Self::decode(resp, &endpoint).await
    }

    async fn get_policy_configuration(
        &self,
        args: GetPolicyConfigurationArgs,
    ) -> Result<PolicyConfiguration, ClientError> {
        let id = args.configuration_id;
        let endpoint = format!("GET /{}/_apis/policy/configurations/{}", args.project, id);
        let request = self.http.get(self.policy_url(&args.project, Some(id)));

        let resp = self
            .send(request, &endpoint, ("policy configuration", id.to_string()))
            .await?;
        Self::decode(resp, &endpoint).await
    }

    async fn update_policy_configuration(
        &self,
        args: UpdatePolicyConfigurationArgs,
    ) -> Result<PolicyConfiguration, ClientError> {
        let id = args.configuration_id;
        let endpoint = format!("PUT /{}/_apis/policy/configurations/{}", args.project, id);
        let request = self
            .http
            .put(self.policy_url(&args.project, Some(id)))
            .json(&args.configuration);

        let resp = self
            .send(request, &endpoint, ("policy configuration", id.to_string()))
            .await?;
        Self::decode(resp, &endpoint).await
    }

    async fn delete_policy_configuration(
        &self,
        args: DeletePolicyConfigurationArgs,
    ) -> Result<(), ClientError> {
        let id = args.configuration_id;
        let endpoint = format!("DELETE /{}/_apis/policy/configurations/{}", args.project, id);
        let request = self.http.delete(self.policy_url(&args.project, Some(id)));

        self.send(request, &endpoint, ("policy configuration", id.to_string()))
            .await?;
        Ok(())
    }
}

impl AgentPoolClient for RestClient {
    async fn add_agent_pool(&self, args: AddAgentPoolArgs) -> Result<TaskAgentPool, ClientError> {
        let endpoint = "POST /_apis/distributedtask/pools";
        let request = self.http.post(self.pool_url(None)).json(&args.pool);

        let resp = self
            .send(request, endpoint, ("agent pool", String::new()))
            .await?;
        Self::decode(resp, endpoint).await
    }

    async fn get_agent_pool(&self, args: GetAgentPoolArgs) -> Result<TaskAgentPool, ClientError> {
        let endpoint = format!("GET /_apis/distributedtask/pools/{}", args.pool_id);
        let request = self.http.get(self.pool_url(Some(args.pool_id)));

        let resp = self
            .send(request, &endpoint, ("agent pool", args.pool_id.to_string()))
            .await?;
        Self::decode(resp, &endpoint).await
    }

    async fn update_agent_pool(
        &self,
        args: UpdateAgentPoolArgs,
    ) -> Result<TaskAgentPool, ClientError> {
        let endpoint = format!("PATCH /_apis/distributedtask/pools/{}", args.pool_id);
        let request = self
            .http
            .patch(self.pool_url(Some(args.pool_id)))
            .json(&args.pool);

        let resp = self
            .send(request, &endpoint, ("agent pool", args.pool_id.to_string()))
            .await?;
        Self::decode(resp, &endpoint).await
    }

    async fn delete_agent_pool(&self, args: DeleteAgentPoolArgs) -> Result<(), ClientError> {
        let endpoint = format!("DELETE /_apis/distributedtask/pools/{}", args.pool_id);
        let request = self.http.delete(self.pool_url(Some(args.pool_id)));

        self.send(request, &endpoint, ("agent pool", args.pool_id.to_string()))
            .await?;
        Ok(())
    }
}
