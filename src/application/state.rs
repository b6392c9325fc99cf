use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::cache::{ReportCache, ShareStore};

/// Everything that varies between production and test environments: the
/// AniList endpoint and the report cache lifetime.
pub struct AppStateConfig {
    pub anilist_url: String,
    pub cache_ttl: Duration,
}

#[derive(Clone)]
pub struct AppState {
    pub http_client: reqwest::Client,
    pub anilist_url: String,
    pub report_cache: Arc<ReportCache>,
    pub share_store: Arc<ShareStore>,
}

impl AppState {
    pub fn new(config: AppStateConfig) -> Self {
        Self {
            #[allow(clippy::expect_used)]
            http_client: reqwest::ClientBuilder::new()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("failed to build HTTP client"),
            anilist_url: config.anilist_url,
            report_cache: Arc::new(ReportCache::new(config.cache_ttl)),
            share_store: Arc::new(ShareStore::default()),
        }
    }
}
