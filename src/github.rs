//! Read-only GitHub REST client.
//!
//! Fetches user profiles and repository listings and normalizes the
//! nullable upstream fields. Failures map to [`ToolError::Upstream`] with
//! the upstream message attached; there are no retries.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::config::GithubConfig;
use crate::error::ToolError;
use crate::models::{DeveloperProfile, RepoSummary};

/// Raw `/users/{username}` row, nullable fields intact.
#[derive(Debug, Deserialize)]
struct RawProfile {
    login: String,
    name: Option<String>,
    bio: Option<String>,
    public_repos: u64,
    followers: u64,
    following: u64,
    created_at: String,
    location: Option<String>,
    company: Option<String>,
}

/// Raw `/users/{username}/repos` row.
#[derive(Debug, Deserialize)]
struct RawRepo {
    name: String,
    description: Option<String>,
    language: Option<String>,
    stargazers_count: u64,
    forks_count: u64,
    created_at: String,
    updated_at: String,
    size: u64,
    #[serde(default)]
    topics: Vec<String>,
}

impl From<RawProfile> for DeveloperProfile {
    fn from(raw: RawProfile) -> Self {
        DeveloperProfile {
            username: raw.login,
            name: raw.name.unwrap_or_else(|| "N/A".to_string()),
            bio: raw.bio.unwrap_or_else(|| "N/A".to_string()),
            public_repos: raw.public_repos,
            followers: raw.followers,
            following: raw.following,
            created_at: raw.created_at,
            location: raw.location.unwrap_or_else(|| "N/A".to_string()),
            company: raw.company.unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

impl From<RawRepo> for RepoSummary {
    fn from(raw: RawRepo) -> Self {
        RepoSummary {
            name: raw.name,
            description: raw
                .description
                .unwrap_or_else(|| "No description".to_string()),
            language: raw.language.unwrap_or_else(|| "Unknown".to_string()),
            stars: raw.stargazers_count,
            forks: raw.forks_count,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            size: raw.size,
            topics: raw.topics,
        }
    }
}

/// GitHub API client. Built once from config and shared by reference.
pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
    timeout_seconds: u64,
}

impl GithubClient {
    /// Build the client with the configured timeout and a fixed user-agent.
    pub fn new(config: &GithubConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("teamlens/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Fetch one user profile.
    pub async fn fetch_profile(&self, username: &str) -> Result<DeveloperProfile, ToolError> {
        let url = format!("{}/users/{}", self.api_url, username);
        let raw: RawProfile = self.get(&url).await?;
        Ok(raw.into())
    }

    /// Fetch up to `limit` repositories, most recently updated first.
    pub async fn fetch_repos(
        &self,
        username: &str,
        limit: u64,
    ) -> Result<Vec<RepoSummary>, ToolError> {
        let url = format!(
            "{}/users/{}/repos?per_page={}&sort=updated",
            self.api_url, username, limit
        );
        let raw: Vec<RawRepo> = self.get(&url).await?;
        Ok(raw.into_iter().map(RepoSummary::from).collect())
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ToolError> {
        debug!("GET {}", url);

        let mut request = self.http.get(url);
        if let Some(ref token) = self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ToolError::Upstream(format!(
                    "request to {} timed out after {}s",
                    url, self.timeout_seconds
                ))
            } else if e.is_connect() {
                ToolError::Upstream(format!("cannot connect to {}", self.api_url))
            } else {
                ToolError::Upstream(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::Upstream(format!(
                "GitHub API error {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ToolError::Upstream(format!("failed to parse GitHub response: {}", e)))
    }
}
