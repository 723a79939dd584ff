//! # Collector de Métricas
//! src/metrics/collector.rs
//!
//! Recolecta y agrega métricas del servidor en tiempo real.

use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Máximo de latencias guardadas para calcular percentiles
const MAX_LATENCY_SAMPLES: usize = 10_000;

/// Collector de métricas thread-safe
#[derive(Debug, Clone)]
pub struct MetricsCollector {
    inner: Arc<Mutex<MetricsData>>,
    start_time: Instant,
}

#[derive(Debug, Default)]
struct MetricsData {
    total_requests: u64,

    /// Requests por código de estado
    status_codes: BTreeMap<u16, u64>,

    /// Últimas latencias registradas (microsegundos)
    latencies: VecDeque<u64>,

    /// Requests por patrón de ruta
    requests_per_route: BTreeMap<String, u64>,

    active_threads: u64,
}

/// Snapshot serializable de las métricas
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub total_requests: u64,
    pub active_threads: u64,
    pub status_codes: BTreeMap<u16, u64>,
    pub requests_per_route: BTreeMap<String, u64>,
    pub latency_us: LatencySummary,
}

/// Resumen de latencias en microsegundos
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LatencySummary {
    pub p50: u64,
    pub p95: u64,
    pub p99: u64,
    pub avg: u64,
    pub samples: usize,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MetricsData::default())),
            start_time: Instant::now(),
        }
    }

    fn data(&self) -> MutexGuard<'_, MetricsData> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registra un request atendido
    pub fn record_request(&self, route: &str, status_code: u16, latency: Duration) {
        let mut data = self.data();

        data.total_requests += 1;
        *data.status_codes.entry(status_code).or_insert(0) += 1;
        *data.requests_per_route.entry(route.to_string()).or_insert(0) += 1;

        if data.latencies.len() >= MAX_LATENCY_SAMPLES {
            data.latencies.pop_front();
        }
        data.latencies.push_back(latency.as_micros() as u64);
    }

    pub fn increment_active_threads(&self) {
        self.data().active_threads += 1;
    }

    pub fn decrement_active_threads(&self) {
        let mut data = self.data();
        data.active_threads = data.active_threads.saturating_sub(1);
    }

    pub fn active_threads(&self) -> u64 {
        self.data().active_threads
    }

    /// Obtiene un snapshot de las métricas
    pub fn snapshot(&self) -> MetricsSnapshot {
        let data = self.data();

        MetricsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            total_requests: data.total_requests,
            active_threads: data.active_threads,
            status_codes: data.status_codes.clone(),
            requests_per_route: data.requests_per_route.clone(),
            latency_us: summarize(&data.latencies),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn summarize(latencies: &VecDeque<u64>) -> LatencySummary {
    if latencies.is_empty() {
        return LatencySummary::default();
    }

    let mut sorted: Vec<u64> = latencies.iter().copied().collect();
    sorted.sort_unstable();

    let len = sorted.len();
    let sum: u64 = sorted.iter().sum();

    LatencySummary {
        p50: sorted[len * 50 / 100],
        p95: sorted[len * 95 / 100],
        p99: sorted[len * 99 / 100],
        avg: sum / len as u64,
        samples: len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collector() {
        let collector = MetricsCollector::new();

        collector.record_request("/api/datajobs", 200, Duration::from_millis(10));
        collector.record_request("/api/datajobs", 200, Duration::from_millis(20));
        collector.record_request("/api/datajobs/{id}", 404, Duration::from_millis(5));

        let snapshot = collector.snapshot();
        assert_eq!(snapshot.total_requests, 3);
        assert_eq!(snapshot.status_codes.get(&200), Some(&2));
        assert_eq!(snapshot.status_codes.get(&404), Some(&1));
        assert_eq!(snapshot.requests_per_route.get("/api/datajobs"), Some(&2));
    }

    #[test]
    fn test_percentiles() {
        let collector = MetricsCollector::new();

        for i in 1..=100 {
            collector.record_request("/test", 200, Duration::from_micros(i));
        }

        let latency = collector.snapshot().latency_us;
        assert!(latency.p50 > 0);
        assert!(latency.p95 > latency.p50);
        assert!(latency.p99 > latency.p95);
        assert_eq!(latency.samples, 100);
    }

    #[test]
    fn test_empty_latencies() {
        let collector = MetricsCollector::new();
        assert_eq!(collector.snapshot().latency_us, LatencySummary::default());
    }

    #[test]
    fn test_active_threads_tracking() {
        let collector = MetricsCollector::new();

        collector.increment_active_threads();
        collector.increment_active_threads();
        assert_eq!(collector.active_threads(), 2);

        collector.decrement_active_threads();
        collector.decrement_active_threads();
        collector.decrement_active_threads();
        assert_eq!(collector.active_threads(), 0);
    }

    #[test]
    fn test_latency_window_management() {
        let collector = MetricsCollector::new();

        for i in 0..(MAX_LATENCY_SAMPLES as u64 + 500) {
            collector.record_request("/test", 200, Duration::from_micros(i));
        }

        let snapshot = collector.snapshot();
        assert_eq!(snapshot.total_requests, MAX_LATENCY_SAMPLES as u64 + 500);
        assert_eq!(snapshot.latency_us.samples, MAX_LATENCY_SAMPLES);
    }

    #[test]
    fn test_snapshot_serializes() {
        let collector = MetricsCollector::new();
        collector.record_request("/metrics", 200, Duration::from_millis(1));

        let value = serde_json::to_value(collector.snapshot()).unwrap();
        assert_eq!(value["total_requests"], 1);
        assert_eq!(value["status_codes"]["200"], 1);
        assert!(value["latency_us"]["p99"].is_u64());
    }

    #[test]
    fn test_clone_shares_state() {
        let collector = MetricsCollector::new();
        let clone = collector.clone();

        clone.record_request("/x", 200, Duration::from_millis(1));
        assert_eq!(collector.snapshot().total_requests, 1);
    }
}
