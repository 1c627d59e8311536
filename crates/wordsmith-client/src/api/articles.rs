//! Articles API.

use crate::client::WordsmithClient;
use crate::error::{Error, Result};
use crate::types::{GenerateArticleRequest, GenerateArticleResponse, GetArticleResponse};

/// Articles API client.
pub struct ArticlesApi {
    client: WordsmithClient,
}

impl ArticlesApi {
    pub(crate) fn new(client: WordsmithClient) -> Self {
        Self { client }
    }

    /// Start generating an article.
    ///
    /// Generation runs asynchronously on the service; poll [`ArticlesApi::get`]
    /// with the returned ID to observe progress.
    pub async fn generate(
        &self,
        target_keyword: &str,
        project_name: Option<&str>,
    ) -> Result<GenerateArticleResponse> {
        let target_keyword = target_keyword.trim();
        if target_keyword.is_empty() {
            return Err(Error::validation("Target keyword cannot be empty"));
        }

        let request = GenerateArticleRequest {
            target_keyword: target_keyword.to_string(),
            project_name: project_name.map(str::to_string),
        };
        self.client.post("articles", &request).await
    }

    /// Get an article by ID.
    ///
    /// The ID is sent as a single path segment under `articles/`.
    pub async fn get(&self, id: &str) -> Result<GetArticleResponse> {
        if id.trim().is_empty() {
            return Err(Error::validation("Article ID cannot be empty"));
        }
        // `.` and `..` would be dropped as path navigation.
        if id == "." || id == ".." {
            return Err(Error::validation(format!("Invalid article ID '{}'", id)));
        }
        let url = self.client.url_with_segment("articles", id)?;
        self.client.get(url).await
    }
}
