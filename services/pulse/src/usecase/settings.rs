use reqwest::Url;

use leadtrack_pulse_schema::app_config::SHEET_WEBHOOK_URL;

use crate::domain::repository::ConfigRepository;
use crate::error::PulseServiceError;

/// Absolute `http`/`https` URL with a host.
pub fn parse_webhook_url(raw: &str) -> Result<Url, PulseServiceError> {
    let url = Url::parse(raw.trim()).map_err(|_| PulseServiceError::InvalidWebhookUrl)?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(PulseServiceError::InvalidWebhookUrl);
    }
    Ok(url)
}

pub struct GetWebhookUseCase<C: ConfigRepository> {
    pub config: C,
}

impl<C: ConfigRepository> GetWebhookUseCase<C> {
    pub async fn execute(&self) -> Result<Option<String>, PulseServiceError> {
        self.config.get(SHEET_WEBHOOK_URL).await
    }
}

pub struct SetWebhookUseCase<C: ConfigRepository> {
    pub config: C,
}

impl<C: ConfigRepository> SetWebhookUseCase<C> {
    pub async fn execute(&self, raw: &str) -> Result<String, PulseServiceError> {
        let url = parse_webhook_url(raw)?.to_string();
        self.config.set(SHEET_WEBHOOK_URL, &url).await?;
        tracing::info!("sheet webhook url updated");
        Ok(url)
    }
}
