//! REST-backed collaborators: an object store with public URLs and a
//! `resources` table, both behind one base URL and API key.

use reqwest::blocking::{Client, Response};
use serde::Deserialize;

use lessonpack::{Error, NewResource, ObjectStorage, ResourceStore, Result, StoredResource};

/// Storage bucket packs are uploaded into.
pub const DEFAULT_BUCKET: &str = "packs";

/// Table resource records are inserted into.
pub const DEFAULT_TABLE: &str = "resources";

/// Connection settings shared by [`RestStorage`] and [`RestResourceStore`].
#[derive(Debug, Clone)]
pub struct RestConfig {
    base_url: String,
    api_key: String,
    bucket: String,
    table: String,
}

impl RestConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            bucket: DEFAULT_BUCKET.to_string(),
            table: DEFAULT_TABLE.to_string(),
        }
    }

    /// Set the storage bucket.
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            path.trim_start_matches('/')
        )
    }

    fn public_object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            path.trim_start_matches('/')
        )
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorize(&self, request: reqwest::blocking::RequestBuilder) -> reqwest::blocking::RequestBuilder {
        request
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
    }
}

fn check(response: Response) -> std::result::Result<Response, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(format!("HTTP {}: {}", status, body.trim()))
}

/// Object storage over HTTP, uploads overwrite existing objects.
#[derive(Debug, Clone)]
pub struct RestStorage {
    config: RestConfig,
    client: Client,
}

impl RestStorage {
    pub fn new(config: RestConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

impl ObjectStorage for RestStorage {
    fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String> {
        log::debug!("uploading {} ({} bytes)", path, bytes.len());
        let request = self
            .client
            .post(self.config.object_url(path))
            .header("content-type", content_type)
            .header("x-upsert", "true")
            .body(bytes.to_vec());

        self.config
            .authorize(request)
            .send()
            .map_err(|e| Error::upload(path, e))
            .and_then(|r| check(r).map_err(|e| Error::upload(path, e)))?;

        Ok(self.public_url(path))
    }

    fn public_url(&self, path: &str) -> String {
        self.config.public_object_url(path)
    }
}

/// Row shape returned by the records endpoint; ids may be numeric.
#[derive(Debug, Deserialize)]
struct ResourceRow {
    id: serde_json::Value,
    uploaded_at: chrono::DateTime<chrono::Utc>,
    #[serde(flatten)]
    resource: NewResource,
}

impl From<ResourceRow> for StoredResource {
    fn from(row: ResourceRow) -> Self {
        let id = match row.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        StoredResource {
            id,
            uploaded_at: row.uploaded_at,
            resource: row.resource,
        }
    }
}

/// Resource records in a REST table.
#[derive(Debug, Clone)]
pub struct RestResourceStore {
    config: RestConfig,
    client: Client,
}

impl RestResourceStore {
    pub fn new(config: RestConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn rows(&self, request: reqwest::blocking::RequestBuilder) -> Result<Vec<StoredResource>> {
        let response = self
            .config
            .authorize(request)
            .send()
            .map_err(|e| Error::Record(e.to_string()))?;
        let rows: Vec<ResourceRow> = check(response)
            .map_err(Error::Record)?
            .json()
            .map_err(|e| Error::Record(e.to_string()))?;
        Ok(rows.into_iter().map(StoredResource::from).collect())
    }
}

impl ResourceStore for RestResourceStore {
    fn insert(&self, resource: NewResource) -> Result<StoredResource> {
        let request = self
            .client
            .post(self.config.table_url())
            .header("Prefer", "return=representation")
            .json(&[&resource]);

        self.rows(request)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Record("insert returned no row".into()))
    }

    fn list(&self) -> Result<Vec<StoredResource>> {
        let request = self
            .client
            .get(self.config.table_url())
            .query(&[("select", "*"), ("order", "uploaded_at.desc")]);
        self.rows(request)
    }

    fn get(&self, id: &str) -> Result<Option<StoredResource>> {
        let filter = format!("eq.{}", id);
        let request = self
            .client
            .get(self.config.table_url())
            .query(&[("select", "*"), ("id", filter.as_str())]);
        Ok(self.rows(request)?.into_iter().next())
    }
}
