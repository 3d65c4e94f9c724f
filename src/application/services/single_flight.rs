//! Coalesces concurrent work for the same key into one execution.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt, Shared, WeakShared};
use parking_lot::Mutex;
use tracing::trace;

type Flight<V> = Shared<BoxFuture<'static, V>>;
type FlightMap<K, V> = Arc<Mutex<HashMap<K, WeakShared<BoxFuture<'static, V>>>>>;

/// Runs at most one future per key at a time and shares its output.
///
/// The registry only holds weak handles. When every caller awaiting a flight
/// is dropped, the flight is dropped with them and the next caller for that
/// key starts a fresh one. A flight unregisters itself once it completes, so
/// the next call after completion runs the work again.
pub struct SingleFlight<K, V> {
    flights: FlightMap<K, V>,
}

impl<K, V> SingleFlight<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates an empty coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flights: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Awaits the flight for `key`, starting it with `work` if none is running.
    ///
    /// `work` is dropped unpolled when an existing flight is joined.
    pub async fn run<F>(&self, key: K, work: F) -> V
    where
        F: Future<Output = V> + Send + 'static,
    {
        let flight = self.join_or_start(key, work);
        flight.await
    }

    fn join_or_start<F>(&self, key: K, work: F) -> Flight<V>
    where
        F: Future<Output = V> + Send + 'static,
    {
        let mut flights = self.flights.lock();

        if let Some(existing) = flights.get(&key).and_then(WeakShared::upgrade) {
            trace!(key = ?key, "Joining in-flight resolution");
            return existing;
        }

        let registry = Arc::clone(&self.flights);
        let owned_key = key.clone();
        let flight = async move {
            let value = work.await;
            registry.lock().remove(&owned_key);
            value
        }
        .boxed()
        .shared();

        flights.retain(|_, weak| weak.upgrade().is_some());
        if let Some(weak) = flight.downgrade() {
            flights.insert(key, weak);
        }
        trace!(in_flight = flights.len(), "Started resolution flight");

        flight
    }

    /// Returns the number of flights currently running.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.flights
            .lock()
            .values()
            .filter(|weak| weak.upgrade().is_some())
            .count()
    }

    /// Returns true if a flight for `key` is running.
    #[must_use]
    pub fn is_running(&self, key: &K) -> bool {
        self.flights
            .lock()
            .get(key)
            .and_then(WeakShared::upgrade)
            .is_some()
    }
}

impl<K, V> Default for SingleFlight<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Debug for SingleFlight<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleFlight")
            .field("registered", &self.flights.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counted_work(counter: Arc<AtomicUsize>, value: u32) -> impl Future<Output = u32> {
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            value
        }
    }

    #[tokio::test]
    async fn test_concurrent_calls_share_one_execution() {
        let flights = SingleFlight::<String, u32>::new();
        let runs = Arc::new(AtomicUsize::new(0));

        let calls = (0..8).map(|i| flights.run("key".to_string(), counted_work(runs.clone(), i)));
        let results = futures_util::future::join_all(calls).await;

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|&v| v == 0));
        assert_eq!(flights.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_distinct_keys_run_independently() {
        let flights = SingleFlight::<String, u32>::new();
        let runs = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            flights.run("a".to_string(), counted_work(runs.clone(), 1)),
            flights.run("b".to_string(), counted_work(runs.clone(), 2)),
        );

        assert_eq!((a, b), (1, 2));
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_completed_flight_is_forgotten() {
        let flights = SingleFlight::<String, u32>::new();
        let runs = Arc::new(AtomicUsize::new(0));

        assert_eq!(flights.run("k".to_string(), counted_work(runs.clone(), 1)).await, 1);
        assert!(!flights.is_running(&"k".to_string()));
        assert_eq!(flights.run("k".to_string(), counted_work(runs.clone(), 2)).await, 2);

        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_abandoned_flight_is_restarted() {
        let flights = SingleFlight::<String, u32>::new();
        let runs = Arc::new(AtomicUsize::new(0));

        let abandoned = tokio::time::timeout(
            Duration::from_millis(1),
            flights.run("k".to_string(), counted_work(runs.clone(), 1)),
        )
        .await;
        assert!(abandoned.is_err());
        assert_eq!(flights.in_flight(), 0);

        assert_eq!(flights.run("k".to_string(), counted_work(runs.clone(), 2)).await, 2);
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_spawned_callers_share_one_execution() {
        let flights = SingleFlight::<String, u32>::new();
        let runs = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let flight = flights.join_or_start("key".to_string(), counted_work(runs.clone(), i));
                tokio::spawn(flight)
            })
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }

        assert!(results.iter().all(|&v| v == 0));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }
}
