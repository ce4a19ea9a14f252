use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Url;
use tokio::sync::Mutex;

use folio_types::ChatError;

use crate::base::KnowledgeBase;

/// Where the knowledge base document comes from
#[derive(Debug, Clone)]
pub enum KnowledgeSource {
    /// Fetched over HTTP(S)
    Remote(Url),
    /// Read from the local filesystem
    File(PathBuf),
    /// Already in memory
    Static(Arc<KnowledgeBase>),
}

impl KnowledgeSource {
    /// Resolve a configured location
    ///
    /// `http(s)://` locations are fetched, `file://` URLs and everything else
    /// are treated as filesystem paths.
    pub fn resolve(location: &str) -> Result<Self, ChatError> {
        match Url::parse(location) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(Self::Remote(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Self::File)
                .map_err(|_| ChatError::Config(format!("invalid file URL: {}", location))),
            _ if location.trim().is_empty() => {
                Err(ChatError::Config("knowledge base location is empty".to_string()))
            }
            _ => Ok(Self::File(PathBuf::from(location))),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Remote(url) => url.to_string(),
            Self::File(path) => path.display().to_string(),
            Self::Static(_) => "<in-memory>".to_string(),
        }
    }
}

/// Loads the knowledge base once and caches it for the process lifetime
///
/// Any failure substitutes [`KnowledgeBase::fallback`]; callers never see an
/// error from [`KnowledgeLoader::load`].
#[derive(Debug)]
pub struct KnowledgeLoader {
    source: KnowledgeSource,
    client: reqwest::Client,
    cache: Mutex<Option<Arc<KnowledgeBase>>>,
}

impl KnowledgeLoader {
    pub fn new(source: KnowledgeSource) -> Self {
        Self::with_client(source, reqwest::Client::new())
    }

    pub fn with_client(source: KnowledgeSource, client: reqwest::Client) -> Self {
        Self {
            source,
            client,
            cache: Mutex::new(None),
        }
    }

    /// Loader serving an in-memory base
    pub fn from_base(base: KnowledgeBase) -> Self {
        Self::new(KnowledgeSource::Static(Arc::new(base)))
    }

    pub fn source(&self) -> &KnowledgeSource {
        &self.source
    }

    /// Return the cached base, fetching it on first use
    pub async fn load(&self) -> Arc<KnowledgeBase> {
        // Held across the fetch so concurrent first loads fetch once
        let mut cache = self.cache.lock().await;
        if let Some(base) = cache.as_ref() {
            return Arc::clone(base);
        }

        let base = match self.fetch().await {
            Ok(base) => {
                log::info!(
                    "Loaded knowledge base from {} ({} categories)",
                    self.source.describe(),
                    base.categories().len()
                );
                Arc::new(base)
            }
            Err(e) => {
                log::error!("{}; using fallback knowledge base", e);
                Arc::new(KnowledgeBase::fallback())
            }
        };
        *cache = Some(Arc::clone(&base));
        base
    }

    /// Discard the cache and fetch again
    pub async fn reload(&self) -> Arc<KnowledgeBase> {
        self.cache.lock().await.take();
        self.load().await
    }

    pub async fn is_cached(&self) -> bool {
        self.cache.lock().await.is_some()
    }

    /// Fetch and parse the document without touching the cache
    pub async fn fetch(&self) -> Result<KnowledgeBase, ChatError> {
        let text = match &self.source {
            KnowledgeSource::Remote(url) => self.fetch_remote(url).await?,
            KnowledgeSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| self.load_failure(e))?,
            KnowledgeSource::Static(base) => return Ok(base.as_ref().clone()),
        };
        KnowledgeBase::from_json(&text).map_err(|e| self.load_failure(e))
    }

    async fn fetch_remote(&self, url: &Url) -> Result<String, ChatError> {
        log::debug!("Fetching knowledge base from {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.load_failure(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.load_failure(format!("HTTP {}", status.as_u16())));
        }
        response.text().await.map_err(|e| self.load_failure(e))
    }

    fn load_failure(&self, reason: impl ToString) -> ChatError {
        ChatError::LoadFailure {
            location: self.source.describe(),
            reason: reason.to_string(),
        }
    }
}
