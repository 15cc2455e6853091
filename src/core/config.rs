use std::env;

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub search: SearchConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of hits returned for a full search submission
    pub default_limit: usize,
    /// Maximum number of suggestions returned while typing
    pub autocomplete_limit: usize,
}

/// Configuration for the version-keyed search result cache
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub max_entries: usize,
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            // Only error if it's not "file not found" - that's acceptable
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(CatalogConfig {
            search: SearchConfig::from_env()?,
            cache: CacheConfig::from_env()?,
        })
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl SearchConfig {
    const DEFAULT_SEARCH_LIMIT: usize = 20;
    const DEFAULT_AUTOCOMPLETE_LIMIT: usize = 8;

    pub fn from_env() -> Result<Self, String> {
        let default_limit = env::var("SEARCH_DEFAULT_LIMIT")
            .unwrap_or_else(|_| Self::DEFAULT_SEARCH_LIMIT.to_string())
            .parse::<usize>()
            .map_err(|_| "SEARCH_DEFAULT_LIMIT must be a valid number".to_string())?;

        let autocomplete_limit = env::var("SEARCH_AUTOCOMPLETE_LIMIT")
            .unwrap_or_else(|_| Self::DEFAULT_AUTOCOMPLETE_LIMIT.to_string())
            .parse::<usize>()
            .map_err(|_| "SEARCH_AUTOCOMPLETE_LIMIT must be a valid number".to_string())?;

        Ok(Self {
            default_limit,
            autocomplete_limit,
        })
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: Self::DEFAULT_SEARCH_LIMIT,
            autocomplete_limit: Self::DEFAULT_AUTOCOMPLETE_LIMIT,
        }
    }
}

impl CacheConfig {
    const DEFAULT_MAX_ENTRIES: usize = 1000;

    pub fn from_env() -> Result<Self, String> {
        let max_entries = env::var("SEARCH_CACHE_MAX_ENTRIES")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_ENTRIES.to_string())
            .parse::<usize>()
            .map_err(|_| "SEARCH_CACHE_MAX_ENTRIES must be a valid number".to_string())?;

        Ok(Self { max_entries })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }
}
