use std::sync::Arc;

use catalog::{Catalog, get_catalog};
use tracing::{info, warn};

use super::{
    config::Config,
    database::{HitCounter, MemoryCounter, RedisCounter, init_redis},
    error::AppError,
    search::{ItemSearch, init_search},
};

pub struct AppState {
    pub config: Config,
    pub catalog: Arc<Catalog>,
    pub search: Arc<dyn ItemSearch>,
    pub limiter: Arc<dyn HitCounter>,
}

impl AppState {
    pub async fn new() -> Result<Arc<Self>, AppError> {
        let config = Config::load()?;

        let catalog = get_catalog(&config.catalog_path)
            .map_err(|e| AppError::Config(format!("{}: {e}", config.catalog_path)))?;

        let search = init_search(
            config.elastic_url.as_deref(),
            config.elastic_api_key.clone(),
            config.search_timeout,
            config.search_retry,
            catalog.items(),
        )?;

        let limiter: Arc<dyn HitCounter> = match &config.redis_url {
            Some(url) => {
                info!("Rate limiting through redis");
                Arc::new(RedisCounter::new(init_redis(url).await?))
            }
            None => {
                warn!("REDIS_URL empty, rate limiting per process");
                Arc::new(MemoryCounter::new())
            }
        };

        Ok(Self::from_parts(config, catalog, search, limiter))
    }

    pub fn from_parts(
        config: Config,
        catalog: Catalog,
        search: Arc<dyn ItemSearch>,
        limiter: Arc<dyn HitCounter>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            catalog: Arc::new(catalog),
            search,
            limiter,
        })
    }
}
