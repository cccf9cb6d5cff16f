// Weather service - Current conditions for the header, when configured
use crate::application::weather_repository::WeatherRepository;
use crate::domain::weather::WeatherReading;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct WeatherService {
    repository: Option<Arc<dyn WeatherRepository>>,
    timeout: Duration,
    ttl: Duration,
    cache: Arc<Mutex<Option<CachedReading>>>,
}

#[derive(Clone)]
struct CachedReading {
    fetched_at: Instant,
    reading: WeatherReading,
}

impl WeatherService {
    pub fn new(repository: Arc<dyn WeatherRepository>, timeout: Duration, ttl: Duration) -> Self {
        Self {
            repository: Some(repository),
            timeout,
            ttl,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    pub fn disabled() -> Self {
        Self {
            repository: None,
            timeout: Duration::ZERO,
            ttl: Duration::ZERO,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.repository.is_some()
    }

    /// Current reading, or None when disabled, timed out or the lookup failed.
    /// Readings younger than the TTL are served without a lookup.
    pub async fn current(&self) -> Option<WeatherReading> {
        let repository = self.repository.as_ref()?;
        if let Some(reading) = self.cached() {
            return Some(reading);
        }

        match tokio::time::timeout(self.timeout, repository.current_weather()).await {
            Ok(Ok(reading)) => {
                self.store(&reading);
                Some(reading)
            }
            Ok(Err(e)) => {
                tracing::warn!("Weather lookup failed: {:#}", e);
                None
            }
            Err(_) => {
                tracing::warn!("Weather lookup timed out after {:?}", self.timeout);
                None
            }
        }
    }

    fn cached(&self) -> Option<WeatherReading> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| cached.reading.clone())
    }

    fn store(&self, reading: &WeatherReading) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        *cache = Some(CachedReading {
            fetched_at: Instant::now(),
            reading: reading.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingWeather {
        reading: Option<WeatherReading>,
        calls: AtomicUsize,
    }

    impl CountingWeather {
        fn new(reading: Option<WeatherReading>) -> Arc<Self> {
            Arc::new(Self {
                reading,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl WeatherRepository for CountingWeather {
        async fn current_weather(&self) -> anyhow::Result<WeatherReading> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reading
                .clone()
                .ok_or_else(|| anyhow::anyhow!("service unavailable"))
        }
    }

    struct StalledWeather;

    #[async_trait]
    impl WeatherRepository for StalledWeather {
        async fn current_weather(&self) -> anyhow::Result<WeatherReading> {
            futures::future::pending().await
        }
    }

    fn reading() -> WeatherReading {
        WeatherReading {
            temperature_c: 18.0,
            wind_speed_kmh: 4.0,
            code: 0,
            is_day: false,
        }
    }

    const TIMEOUT: Duration = Duration::from_millis(50);

    #[tokio::test]
    async fn test_disabled() {
        let service = WeatherService::disabled();
        assert!(!service.is_enabled());
        assert!(service.current().await.is_none());
    }

    #[tokio::test]
    async fn test_failure_hides_reading() {
        let service = WeatherService::new(CountingWeather::new(None), TIMEOUT, Duration::ZERO);
        assert!(service.is_enabled());
        assert!(service.current().await.is_none());
    }

    #[tokio::test]
    async fn test_stalled_lookup_times_out() {
        let service = WeatherService::new(Arc::new(StalledWeather), TIMEOUT, Duration::ZERO);
        let started = Instant::now();
        assert!(service.current().await.is_none());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_reading_is_cached_within_ttl() {
        let repository = CountingWeather::new(Some(reading()));
        let service = WeatherService::new(repository.clone(), TIMEOUT, Duration::from_secs(60));

        assert_eq!(service.current().await, Some(reading()));
        assert_eq!(service.current().await, Some(reading()));
        assert_eq!(repository.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_always_refetches() {
        let repository = CountingWeather::new(Some(reading()));
        let service = WeatherService::new(repository.clone(), TIMEOUT, Duration::ZERO);

        service.current().await;
        service.current().await;
        assert_eq!(repository.calls.load(Ordering::SeqCst), 2);
    }
}
