use tracing::debug;
use ureq::Agent;
use urlencoding::encode;

use crate::catalog::AugmentSource;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{RawTrack, SearchResponse};

/// The search endpoint refuses larger pages
const MAX_SEARCH_LIMIT: usize = 50;

/// A small blocking client for the music platform's track search
pub struct CatalogClient {
    agent: Agent,
    base_url: String,
    access_token: String,
}

impl CatalogClient {
    pub fn new(config: Config) -> Self {
        let agent = Agent::new();

        CatalogClient {
            agent,
            base_url: config.api_base_url,
            access_token: config.access_token,
        }
    }

    pub fn search_url(&self, query: &str, limit: usize) -> String {
        format!(
            "{}/v1/search?q={}&type=track&limit={}",
            self.base_url.trim_end_matches('/'),
            encode(query),
            limit.clamp(1, MAX_SEARCH_LIMIT)
        )
    }

    /// Search tracks and return them in the streaming shape
    pub fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<RawTrack>> {
        let url = self.search_url(query, limit);
        debug!("Searching tracks: {url}");

        let response = self
            .agent
            .get(&url)
            .set("Authorization", &format!("Bearer {}", self.access_token))
            .call()
            .map_err(|e| Error::Http(format!("Search request failed: {e}")))?;

        let response_text = response.into_string()?;
        parse_search_response(&response_text)
    }
}

fn parse_search_response(body: &str) -> Result<Vec<RawTrack>> {
    let parsed: SearchResponse = serde_json::from_str(body)
        .map_err(|e| Error::Http(format!("Failed to parse search response: {e}")))?;

    Ok(parsed
        .tracks
        .map(|page| page.items.into_iter().map(RawTrack::Streaming).collect())
        .unwrap_or_default())
}

impl AugmentSource for CatalogClient {
    fn fetch_more_by_tempo_target(&self, target_bpm: f32, limit: usize) -> Result<Vec<RawTrack>> {
        let query = format!("running {} bpm", target_bpm.round() as u32);
        self.search_tracks(&query, limit)
    }
}
