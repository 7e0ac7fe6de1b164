//! Outbound HTTP adapters: log mirror webhook, IP lookup and the analysis
//! service. All share one `reqwest::Client` with the configured timeout.

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::domain::repository::{AnalysisPort, IpLookupPort, LogMirrorPort};
use crate::domain::types::Analysis;
use crate::error::PulseServiceError;

pub fn build_client(timeout: std::time::Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("build http client")
}

// ── Webhook mirror ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HttpLogMirror {
    pub client: reqwest::Client,
}

impl LogMirrorPort for HttpLogMirror {
    async fn mirror(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<(), PulseServiceError> {
        // The response is ignored; only transport failures count.
        self.client
            .post(url)
            .json(payload)
            .send()
            .await
            .context("mirror daily log")?;
        Ok(())
    }
}

// ── IP lookup ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HttpIpLookup {
    pub client: reqwest::Client,
    pub url: String,
}

#[derive(Deserialize)]
struct IpResponse {
    ip: String,
}

impl IpLookupPort for HttpIpLookup {
    async fn lookup_ip(&self) -> Result<String, PulseServiceError> {
        let body: IpResponse = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("ip lookup request")?
            .error_for_status()
            .context("ip lookup status")?
            .json()
            .await
            .context("decode ip lookup")?;
        Ok(body.ip)
    }
}

// ── Analysis service ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HttpAnalysisService {
    pub client: reqwest::Client,
    pub url: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisRequest<'a> {
    employee_name: &'a str,
    weekly_report: &'a str,
}

impl AnalysisPort for HttpAnalysisService {
    async fn analyze(
        &self,
        employee_name: &str,
        weekly_report: &str,
    ) -> Result<Analysis, PulseServiceError> {
        let Some(url) = self.url.as_deref() else {
            return Err(PulseServiceError::AnalysisUnavailable);
        };
        let result: anyhow::Result<Analysis> = async {
            let analysis = self
                .client
                .post(url)
                .json(&AnalysisRequest {
                    employee_name,
                    weekly_report,
                })
                .send()
                .await
                .context("analysis request")?
                .error_for_status()
                .context("analysis status")?
                .json()
                .await
                .context("decode analysis")?;
            Ok(analysis)
        }
        .await;
        result.map_err(|e| {
            tracing::warn!(error = format!("{e:#}"), "analysis service failed");
            PulseServiceError::AnalysisUnavailable
        })
    }
}
