//! In-memory caching using moka
//!
//! Location lists change rarely and are needed on every search page, so they
//! get a long TTL. Vehicle records and accessory lists carry prices and are
//! kept only briefly.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::models::{Accessory, Location, LocationKind, Vehicle};

/// Application cache holding API lookups
#[derive(Clone)]
pub struct AppCache {
    /// Location lists (kind -> locations)
    pub locations: Cache<LocationKind, Arc<Vec<Location>>>,
    /// Vehicle details (route key -> Vehicle)
    pub vehicles: Cache<String, Arc<Vehicle>>,
    /// Accessory lists (vehicle route key -> accessories)
    pub accessories: Cache<String, Arc<Vec<Accessory>>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Locations: 2 entries, 30 min TTL
            locations: Cache::builder()
                .max_capacity(2)
                .time_to_live(Duration::from_secs(30 * 60))
                .build(),

            // Vehicles: 500 entries, 5 min TTL (prices can change)
            vehicles: Cache::builder()
                .max_capacity(500)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),

            // Accessories: 500 entries, 5 min TTL
            accessories: Cache::builder()
                .max_capacity(500)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            location_lists: self.locations.entry_count(),
            vehicles: self.vehicles.entry_count(),
            accessory_lists: self.accessories.entry_count(),
        }
    }

    /// Invalidate everything cached for one vehicle
    pub async fn invalidate_vehicle(&self, key: &str) {
        self.vehicles.invalidate(key).await;
        self.accessories.invalidate(key).await;
        info!("Cache invalidated for vehicle: {}", key);
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub location_lists: u64,
    pub vehicles: u64,
    pub accessory_lists: u64,
}

/// Start background cache warmer
///
/// Warms the location lists on startup and refreshes every 10 minutes.
pub async fn start_cache_warmer(cache: AppCache, api: ApiClient) {
    let mut interval = interval(Duration::from_secs(10 * 60));
    loop {
        // First tick completes immediately
        interval.tick().await;
        warm_cache(&cache, &api).await;
    }
}

/// Warm the cache with both location lists
async fn warm_cache(cache: &AppCache, api: &ApiClient) {
    info!("Starting cache warm-up...");

    for kind in [LocationKind::Pickup, LocationKind::Return] {
        match api.locations(kind).await {
            Ok(locations) => {
                cache.locations.insert(kind, Arc::new(locations)).await;
            }
            Err(e) => warn!("Failed to warm {} locations: {}", kind, e),
        }
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}
