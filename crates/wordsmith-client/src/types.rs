//! Request and response types for the Wordsmith API.
//!
//! Field names follow the service's snake_case wire format. Optional wire
//! fields decode to `None` when absent so that a missing value stays
//! distinguishable from an empty string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Article status vocabulary
// ─────────────────────────────────────────────────────────────────────────────

/// Status strings reported by the service for an article.
///
/// The service does not publish its vocabulary; these are the values it has
/// been observed to send. Comparisons ignore ASCII case. A status outside this
/// set makes every [`Article`] predicate return `false`.
pub mod status {
    /// Generation is queued.
    pub const PENDING: &str = "pending";
    /// Generation is running.
    pub const PROCESSING: &str = "processing";
    /// Generation finished and content is available.
    pub const COMPLETED: &str = "completed";
    /// Generation failed.
    pub const FAILED: &str = "failed";

    /// Statuses that count as completed.
    pub const COMPLETED_STATUSES: &[&str] = &[COMPLETED];
    /// Statuses that count as active work.
    pub const IN_PROGRESS_STATUSES: &[&str] = &[PENDING, PROCESSING];
    /// Statuses that count as failed.
    pub const FAILED_STATUSES: &[&str] = &[FAILED];

    pub(crate) fn matches(status: &str, set: &[&str]) -> bool {
        let status = status.trim();
        set.iter().any(|s| s.eq_ignore_ascii_case(status))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Articles
// ─────────────────────────────────────────────────────────────────────────────

/// An article generation job and, once finished, its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Article ID.
    pub id: String,
    /// Generated title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Generated body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Raw status string from the service.
    pub status: String,
    /// Progress percentage (0-100).
    pub progress: u8,
    /// Keyword the article targets.
    pub target_keyword: String,
    /// Project the article belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Whether generation finished successfully.
    pub fn is_completed(&self) -> bool {
        status::matches(&self.status, status::COMPLETED_STATUSES)
    }

    /// Whether the service is still working on the article.
    pub fn is_in_progress(&self) -> bool {
        status::matches(&self.status, status::IN_PROGRESS_STATUSES)
    }

    /// Whether generation failed.
    pub fn has_failed(&self) -> bool {
        status::matches(&self.status, status::FAILED_STATUSES)
    }
}

/// Request body for starting article generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateArticleRequest {
    /// Keyword to write about.
    pub target_keyword: String,
    /// Project to file the article under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

/// Response from starting article generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateArticleResponse {
    /// Whether the service accepted the request.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
    /// IDs of the created articles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_ids: Option<Vec<String>>,
    /// ID of the created article, for single-article responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_id: Option<String>,
    /// Machine-readable error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl GenerateArticleResponse {
    /// Whether the response lists at least one article ID.
    pub fn has_article_ids(&self) -> bool {
        self.article_ids.as_ref().is_some_and(|ids| !ids.is_empty())
    }

    /// The first created article ID, falling back to `article_id`.
    pub fn first_article_id(&self) -> Option<&str> {
        self.article_ids
            .as_ref()
            .and_then(|ids| ids.first())
            .or(self.article_id.as_ref())
            .map(String::as_str)
    }

    /// All listed article IDs, or an empty slice.
    pub fn all_article_ids(&self) -> &[String] {
        self.article_ids.as_deref().unwrap_or(&[])
    }
}

/// Response from looking up an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetArticleResponse {
    /// The article, absent when not found.
    #[serde(default)]
    pub article: Option<Article>,
}
