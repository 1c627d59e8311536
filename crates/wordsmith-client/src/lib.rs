//! HTTP client SDK for the Wordsmith content-generation API.
//!
//! This crate provides a typed client for starting article generation and
//! checking on the result.
//!
//! # Example
//!
//! ```no_run
//! use wordsmith_client::{WordsmithClient, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = WordsmithClient::builder()
//!     .api_key("secret")
//!     .build()?;
//!
//! // Start generation
//! let response = client
//!     .generate_article("artificial intelligence", Some("blog"))
//!     .await?;
//! println!("{}", response.message);
//!
//! // Check on it later
//! if let Some(id) = response.first_article_id() {
//!     if let Some(article) = client.get_article(id).await?.article {
//!         println!("{}: {}% ({})", article.id, article.progress, article.status);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Every failure is an [`Error`] variant: `Validation`, `Authentication`,
//! `RateLimit`, `Api` or `Network`. The client never retries; inspect
//! [`Error::retry_after`] and [`Error::is_retryable`] to decide what to do.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use api::ArticlesApi;
pub use client::{ClientBuilder, WordsmithClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{Error, ErrorKind, Result};
pub use types::*;
