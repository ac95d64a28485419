//! Advent of Code HTTP client

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use reqwest::header::COOKIE;

use super::{AnswerSubmitter, PuzzleData, PuzzleSource, SubmitOutcome};
use crate::domain::PuzzleCoordinate;
use crate::error::{Result, SolvrError};

/// Default site root
pub const AOC_BASE_URL: &str = "https://adventofcode.com";

/// Environment variable holding the session cookie value
pub const SESSION_ENV: &str = "AOC_SESSION";

const USER_AGENT: &str = concat!("solvr/", env!("CARGO_PKG_VERSION"));

/// Puzzle source and answer submitter backed by the Advent of Code site
pub struct AocClient {
    client: Client,
    base_url: String,
    session: Option<String>,
}

impl AocClient {
    /// Create a client; the session is read from `AOC_SESSION` when present
    pub fn from_env(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let session = std::env::var(SESSION_ENV)
            .ok()
            .map(|s| s.trim().trim_matches('"').to_string())
            .filter(|s| !s.is_empty());
        Self::new(base_url, session, timeout)
    }

    pub fn new(base_url: impl Into<String>, session: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SolvrError::Collaborator(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    fn day_url(&self, coordinate: &PuzzleCoordinate) -> String {
        format!("{}/{}/day/{}", self.base_url, coordinate.year(), coordinate.day())
    }

    fn cookie(&self) -> Result<String> {
        self.session
            .as_ref()
            .map(|session| format!("session={}", session))
            .ok_or_else(|| SolvrError::Collaborator(format!("{} not set", SESSION_ENV)))
    }

    async fn get(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(COOKIE, self.cookie()?)
            .send()
            .await
            .map_err(|e| SolvrError::Collaborator(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SolvrError::Collaborator(format!("GET {} returned {}", url, status)));
        }

        response
            .text()
            .await
            .map_err(|e| SolvrError::Collaborator(format!("Failed to read {}: {}", url, e)))
    }
}

#[async_trait]
impl PuzzleSource for AocClient {
    async fn fetch(&self, coordinate: &PuzzleCoordinate) -> Result<PuzzleData> {
        let day_url = self.day_url(coordinate);
        let raw_input = self.get(&format!("{}/input", day_url)).await?;
        let page = self.get(&day_url).await?;

        let articles = extract_articles(&page);
        if articles.is_empty() {
            return Err(SolvrError::Collaborator(format!(
                "No puzzle description found at {}",
                day_url
            )));
        }
        info!("Fetched {} ({} input bytes)", coordinate, raw_input.len());

        Ok(PuzzleData {
            description: articles.join("\n"),
            raw_input,
        })
    }
}

#[async_trait]
impl AnswerSubmitter for AocClient {
    async fn submit(&self, coordinate: &PuzzleCoordinate, answer: &str) -> Result<SubmitOutcome> {
        let url = format!("{}/answer", self.day_url(coordinate));
        let level = coordinate.part().to_string();
        info!("Submitting answer for {} to {}", coordinate, url);

        let response = self
            .client
            .post(&url)
            .header(COOKIE, self.cookie()?)
            .form(&[("level", level.as_str()), ("answer", answer)])
            .send()
            .await
            .map_err(|e| SolvrError::Collaborator(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SolvrError::Collaborator(format!("POST {} returned {}", url, status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SolvrError::Collaborator(format!("Failed to read {}: {}", url, e)))?;

        Ok(classify_submission(&body))
    }
}

/// Classify the site's reply to an answer submission
pub fn classify_submission(body: &str) -> SubmitOutcome {
    if body.contains("That's the right answer") {
        SubmitOutcome::Correct
    } else if body.contains("That's not the right answer") {
        SubmitOutcome::Incorrect
    } else if body.contains("You gave an answer too recently") {
        SubmitOutcome::RateLimited
    } else {
        let text = extract_articles(body).join("\n");
        SubmitOutcome::Unexpected(if text.is_empty() { body.trim().to_string() } else { text })
    }
}

/// Every `<article ...>...</article>` element of a page, markup included
pub fn extract_articles(html: &str) -> Vec<String> {
    let mut articles = Vec::new();
    let mut rest = html;

    while let Some(start) = rest.find("<article") {
        let tail = &rest[start..];
        let Some(end) = tail.find("</article>") else {
            break;
        };
        let end = end + "</article>".len();
        articles.push(tail[..end].to_string());
        rest = &tail[end..];
    }

    articles
}
