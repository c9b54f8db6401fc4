//! Obsidian Local REST API note store adapter

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use tracing::{debug, warn};

use crate::application::ports::{append_content, NoteStore, NoteStoreError};
use crate::domain::config::ClientConfig;
use crate::domain::note::{NoteRecord, NoteTitle, NOTE_JSON_MEDIA_TYPE};

/// Media type of note bodies sent to the vault endpoint
const MARKDOWN_MEDIA_TYPE: &str = "text/markdown";

/// Folder used by the vault-scoped create endpoint when none is configured
pub const LEGACY_FOLDER: &str = "YouTube Notes";

/// Request body of the vault-scoped create endpoint
#[derive(Debug, Serialize)]
struct LegacyCreateRequest<'a> {
    path: String,
    content: &'a str,
}

/// Client for the Obsidian Local REST API plugin.
///
/// Holds nothing but its configuration: every call is a fresh request,
/// with no retries and no caching.
pub struct ObsidianClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl ObsidianClient {
    /// Create a client for the given connection settings
    pub fn new(config: ClientConfig) -> Result<Self, NoteStoreError> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| NoteStoreError::Unreachable(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Parse the configured base address
    fn base_url(&self) -> Result<Url, NoteStoreError> {
        Url::parse(&self.config.base_address)
            .map_err(|e| NoteStoreError::InvalidUrl(format!("{} ({})", e, self.config.base_address)))
    }

    /// Build a URL below the base address from raw path segments.
    /// Segments are percent-encoded.
    fn endpoint<I>(&self, segments: I) -> Result<Url, NoteStoreError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url()?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                NoteStoreError::InvalidUrl(format!(
                    "{} cannot be used as a base address",
                    self.config.base_address
                ))
            })?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    /// URL of a note: `{base}/vault/{folder/}{title}.md`
    pub fn note_url(&self, title: &NoteTitle) -> Result<Url, NoteStoreError> {
        let mut segments = vec!["vault".to_string()];
        segments.extend(title.path_segments(self.config.folder.as_deref()));
        self.endpoint(segments)
    }

    /// URL of the vault-scoped create endpoint: `{base}/vault/{vault}/create`
    pub fn legacy_create_url(&self) -> Result<Url, NoteStoreError> {
        self.endpoint(["vault", self.config.vault_name.as_str(), "create"])
    }

    /// Start a request, attaching the bearer credential when configured
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "sending request");
        let builder = self.client.request(method, url);
        match self.config.credential.as_deref() {
            Some(credential) => builder.bearer_auth(credential),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response, NoteStoreError> {
        builder
            .send()
            .await
            .map_err(|e| NoteStoreError::Unreachable(e.to_string()))
    }

    /// Map a non-success status to an error
    async fn check_status(response: Response, title: &NoteTitle) -> Result<Response, NoteStoreError> {
        let status = response.status();
        debug!(status = status.as_u16(), "received response");

        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::NOT_FOUND => Err(NoteStoreError::NotFound(title.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(NoteStoreError::Unauthorized),
            _ => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(NoteStoreError::Status {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    /// Check whether a note exists, distinguishing a missing note from a
    /// failed check.
    pub async fn check_exists(&self, title: &NoteTitle) -> Result<bool, NoteStoreError> {
        let url = self.note_url(title)?;
        let response = Self::send(self.request(Method::HEAD, url)).await?;

        match Self::check_status(response, title).await {
            Ok(_) => Ok(true),
            Err(NoteStoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Check whether a note exists.
    ///
    /// Any failure, including an unreachable service, is reported as
    /// `false`. Use [`check_exists`](Self::check_exists) to tell the two apart.
    pub async fn exists_by_title(&self, title: &NoteTitle) -> bool {
        match self.check_exists(title).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(title = %title, error = %e, "existence check failed, treating note as missing");
                false
            }
        }
    }

    /// Fetch a note's content and metadata
    pub async fn fetch_by_title(&self, title: &NoteTitle) -> Result<NoteRecord, NoteStoreError> {
        let url = self.note_url(title)?;
        let request = self
            .request(Method::GET, url)
            .header(ACCEPT, NOTE_JSON_MEDIA_TYPE);

        let response = Self::check_status(Self::send(request).await?, title).await?;

        response
            .json::<NoteRecord>()
            .await
            .map_err(|e| NoteStoreError::InvalidResponse(e.to_string()))
    }

    /// Create a note or replace its content entirely
    pub async fn create_or_replace(
        &self,
        title: &NoteTitle,
        content: &str,
    ) -> Result<(), NoteStoreError> {
        let url = self.note_url(title)?;
        let request = self
            .request(Method::PUT, url)
            .header(CONTENT_TYPE, MARKDOWN_MEDIA_TYPE)
            .body(content.to_string());

        Self::check_status(Self::send(request).await?, title).await?;
        Ok(())
    }

    /// Append content after the stored content, separated by a blank line
    pub async fn append_to_title(&self, title: &NoteTitle, content: &str) -> Result<(), NoteStoreError> {
        let existing = self.fetch_by_title(title).await?;
        let combined = append_content(&existing.content, content);
        self.create_or_replace(title, &combined).await
    }

    /// Create a note through the vault-scoped create endpoint of older
    /// plugin versions. The note lands in the configured folder, or
    /// [`LEGACY_FOLDER`] when none is set.
    pub async fn create_legacy(&self, title: &NoteTitle, content: &str) -> Result<(), NoteStoreError> {
        let url = self.legacy_create_url()?;
        let folder = self.config.folder.as_deref().unwrap_or(LEGACY_FOLDER);
        let body = LegacyCreateRequest {
            path: title.vault_path(Some(folder)),
            content,
        };

        let request = self.request(Method::POST, url).json(&body);

        Self::check_status(Self::send(request).await?, title).await?;
        Ok(())
    }
}

#[async_trait]
impl NoteStore for ObsidianClient {
    async fn exists(&self, title: &NoteTitle) -> Result<bool, NoteStoreError> {
        self.check_exists(title).await
    }

    async fn fetch(&self, title: &NoteTitle) -> Result<NoteRecord, NoteStoreError> {
        self.fetch_by_title(title).await
    }

    async fn put(&self, title: &NoteTitle, content: &str) -> Result<(), NoteStoreError> {
        self.create_or_replace(title, content).await
    }

    async fn append(&self, title: &NoteTitle, content: &str) -> Result<(), NoteStoreError> {
        self.append_to_title(title, content).await
    }
}
