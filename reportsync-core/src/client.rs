use reqwest::{Client, Method, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::kind::ResourceKind;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("api returned {status}: {body}")]
    Api { status: StatusCode, body: String },
}

/// Outcome of a folder-creation call. The service reports duplication with
/// 409 Conflict; callers branch on the variant instead of matching error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderCreation {
    Created,
    AlreadyExisted,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub login: String,
    pub password: String,
    pub domain: Option<String>,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            domain: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        let domain = domain.into();
        self.domain = (!domain.is_empty()).then_some(domain);
        self
    }

    fn effective_login(&self) -> String {
        match &self.domain {
            Some(domain) => format!("{domain}\\{}", self.login),
            None => self.login.clone(),
        }
    }
}

#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
    credentials: Credentials,
}

impl CatalogClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self, CatalogError> {
        Ok(Self {
            http: Client::new(),
            base_url: Url::parse(base_url)?,
            credentials,
        })
    }

    pub async fn list_children(
        &self,
        path: &str,
        recursive: bool,
    ) -> Result<Vec<CatalogEntry>, CatalogError> {
        let mut url = self.endpoint("/api/v1/catalog/items")?;
        url.query_pairs_mut()
            .append_pair("path", path)
            .append_pair("recursive", if recursive { "true" } else { "false" });
        let response = self.request(Method::GET, url).send().await?;
        let payload: ItemListResponse = Self::handle_response(response).await?;
        Ok(payload.items)
    }

    /// Fetches the raw content of an item. Report definitions and opaque
    /// resources both come back through this call; interpretation is up to
    /// the caller.
    pub async fn get_item_content(&self, path: &str) -> Result<Vec<u8>, CatalogError> {
        let mut url = self.endpoint("/api/v1/catalog/content")?;
        url.query_pairs_mut().append_pair("path", path);
        let response = self.request(Method::GET, url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn create_folder(
        &self,
        name: &str,
        parent: &str,
    ) -> Result<FolderCreation, CatalogError> {
        let mut url = self.endpoint("/api/v1/catalog/folders")?;
        url.query_pairs_mut()
            .append_pair("name", name)
            .append_pair("parent", parent);
        let response = self.request(Method::POST, url).send().await?;
        if response.status() == StatusCode::CONFLICT {
            return Ok(FolderCreation::AlreadyExisted);
        }
        Self::check_status(response).await?;
        Ok(FolderCreation::Created)
    }

    pub async fn create_item(
        &self,
        type_name: &str,
        name: &str,
        parent: &str,
        overwrite: bool,
        data: Vec<u8>,
        mime_type: Option<&str>,
    ) -> Result<(), CatalogError> {
        let mut url = self.endpoint("/api/v1/catalog/items")?;
        url.query_pairs_mut()
            .append_pair("type", type_name)
            .append_pair("name", name)
            .append_pair("parent", parent)
            .append_pair("overwrite", if overwrite { "true" } else { "false" });
        let mut request = self.request(Method::POST, url).body(data);
        if let Some(mime_type) = mime_type {
            request = request.header("Content-Type", mime_type);
        }
        let response = request.send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        Ok(self.base_url.join(path)?)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        self.http.request(method, url).basic_auth(
            self.credentials.effective_login(),
            Some(&self.credentials.password),
        )
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CatalogError> {
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CatalogError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(CatalogError::Api { status, body })
        }
    }
}

/// One remote catalog node, as reported by a listing. Constructed from a
/// single response and never mutated; a refresh re-fetches the listing
/// wholesale.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub modified: Option<String>,
}

impl CatalogEntry {
    pub fn kind(&self) -> ResourceKind {
        ResourceKind::from_type_name(&self.type_name)
    }

    pub fn is_folder(&self) -> bool {
        self.kind() == ResourceKind::Folder
    }

    pub fn is_downloadable(&self) -> bool {
        self.kind().is_downloadable()
    }

    /// Final path segment; empty for the root folder "/".
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct ItemListResponse {
    items: Vec<CatalogEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_derives_kind_from_type_name() {
        let entry = CatalogEntry {
            path: "/Sales/Q1".into(),
            type_name: "Report".into(),
            modified: None,
        };
        assert_eq!(entry.kind(), ResourceKind::Report);
        assert!(entry.is_downloadable());
        assert!(!entry.is_folder());
        assert_eq!(entry.name(), "Q1");
    }

    #[test]
    fn unknown_type_name_is_not_downloadable() {
        let entry = CatalogEntry {
            path: "/Sales".into(),
            type_name: "SiteSettings".into(),
            modified: None,
        };
        assert_eq!(entry.kind(), ResourceKind::Unknown);
        assert!(!entry.is_downloadable());
    }

    #[test]
    fn domain_prefixes_effective_login() {
        let plain = Credentials::new("alice", "pw");
        assert_eq!(plain.effective_login(), "alice");

        let qualified = Credentials::new("alice", "pw").with_domain("CORP");
        assert_eq!(qualified.effective_login(), "CORP\\alice");

        let blank = Credentials::new("alice", "pw").with_domain("");
        assert_eq!(blank.effective_login(), "alice");
    }
}
