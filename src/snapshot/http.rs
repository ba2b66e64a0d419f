use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::fields::{extract_match_list, extract_match_payload, parse_match_snapshot};
use super::models::MatchSnapshot;
use super::source::MatchDataSource;
use crate::config::Config;
use crate::roster::PlayerId;
use crate::shared::AppError;

/// HTTP adapter for the AoE2Insights-style API.
///
/// The base URL and the two endpoint path templates come from configuration,
/// so an alternative provider can be wired in without a code change as long
/// as it speaks JSON. Path templates contain `{id}` where the numeric
/// profile id is substituted.
pub struct InsightsApiClient {
    client: reqwest::Client,
    base: String,
    lastmatch_path: String,
    matches_path: String,
}

impl InsightsApiClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AppError::DataSource(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base: config.api_base.trim_end_matches('/').to_string(),
            lastmatch_path: config.lastmatch_path.clone(),
            matches_path: config.matches_path.clone(),
        })
    }

    fn build_url(&self, path_template: &str, player: PlayerId) -> String {
        let path = path_template.replace("{id}", &player.to_string());
        if path.starts_with('/') {
            format!("{}{}", self.base, path)
        } else {
            format!("{}/{}", self.base, path)
        }
    }

    /// GET a URL and decode the body as JSON. All failure modes are logged
    /// and collapsed into `None`; callers treat that as "no data right now".
    async fn fetch_json(&self, url: &str, query: &[(&str, String)]) -> Option<Value> {
        let response = match self.client.get(url).query(query).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url, error = %e, "Request to stats API failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url, %status, "Stats API returned non-success status");
            return None;
        }

        match response.json::<Value>().await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(url, error = %e, "Failed to decode stats API response as JSON");
                None
            }
        }
    }
}

#[async_trait]
impl MatchDataSource for InsightsApiClient {
    async fn fetch_last_match(&self, player: PlayerId) -> Option<MatchSnapshot> {
        let url = self.build_url(&self.lastmatch_path, player);
        let data = self.fetch_json(&url, &[]).await?;

        match extract_match_payload(&data) {
            Some(payload) => Some(parse_match_snapshot(payload)),
            None => {
                debug!(%player, "Last-match response carried no recognisable match object");
                None
            }
        }
    }

    async fn fetch_recent_matches(&self, player: PlayerId, limit: usize) -> Vec<MatchSnapshot> {
        let url = self.build_url(&self.matches_path, player);
        let query = [
            ("count", limit.to_string()),
            ("game", "aoe2de".to_string()),
        ];
        let Some(data) = self.fetch_json(&url, &query).await else {
            return Vec::new();
        };

        match extract_match_list(&data) {
            Some(list) => list.iter().take(limit).map(parse_match_snapshot).collect(),
            None => {
                debug!(%player, "Recent-matches response carried no recognisable match list");
                Vec::new()
            }
        }
    }
}
