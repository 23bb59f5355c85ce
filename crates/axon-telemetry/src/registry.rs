// Copyright 2026 the Axon authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! An order-preserving registry of named meters.

use crate::meter::Meter;
use axon_core::telemetry::CountMap;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Name-to-meter storage plus the authoritative registration order.
#[derive(Debug, Default)]
struct Inner {
    meters: HashMap<String, Arc<Meter>>,
    order: Vec<String>,
}

/// A thread-safe, order-preserving registry of [`Meter`]s.
///
/// Meters are created lazily on first use; registering a name twice returns
/// the existing meter. Snapshots enumerate meters in the order their names
/// were first registered.
///
/// The hot increment path takes only a shared read lock to resolve the
/// meter; the increment itself is a single atomic add, so concurrent
/// command executions never serialize on the registry. The write lock is
/// taken only on the rare first-registration path and by the bulk
/// administrative operations.
#[derive(Debug, Default)]
pub struct MeterRegistry {
    inner: RwLock<Inner>,
}

impl MeterRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the meter registered under `name`, creating it (with value
    /// 0) if absent. The returned handle can be cached by collaborators to
    /// skip the registry lookup on subsequent increments.
    pub fn meter(&self, name: &str) -> Arc<Meter> {
        if let Some(meter) = self.inner.read().unwrap().meters.get(name) {
            return Arc::clone(meter);
        }

        let mut inner = self.inner.write().unwrap();
        // Re-check: another thread may have registered the name between the
        // read lock being released and the write lock being acquired.
        if let Some(meter) = inner.meters.get(name) {
            return Arc::clone(meter);
        }

        log::debug!("Registered meter: {}", name);
        let meter = Arc::new(Meter::new(name));
        inner.meters.insert(name.to_string(), Arc::clone(&meter));
        inner.order.push(name.to_string());
        meter
    }

    /// Atomically adds 1 to the meter registered under `name`, creating it
    /// first if absent. Never fails; an unknown name is a new meter, not an
    /// error.
    pub fn increment(&self, name: &str) {
        self.meter(name).mark();
    }

    /// Atomically adds `delta` to the meter registered under `name`,
    /// creating it first if absent.
    pub fn add(&self, name: &str, delta: u64) {
        self.meter(name).add(delta);
    }

    /// Atomically reads and resets the meter registered under `name`,
    /// returning the pre-reset value. Returns 0 for an unregistered name
    /// without creating a meter.
    pub fn get_and_clear(&self, name: &str) -> u64 {
        match self.inner.read().unwrap().meters.get(name) {
            Some(meter) => meter.get_and_clear(),
            None => 0,
        }
    }

    /// Returns all registered meters and their current values, in
    /// first-registration order, without mutating them.
    pub fn snapshot(&self) -> CountMap {
        let inner = self.inner.read().unwrap();
        let mut counts = CountMap::with_capacity(inner.order.len());
        for name in &inner.order {
            counts.insert(name.clone(), inner.meters[name].value());
        }
        counts
    }

    /// Atomically reads and resets every registered meter, returning the
    /// pre-reset values in first-registration order. Meters stay registered,
    /// so the order carries over to subsequent snapshots.
    pub fn drain(&self) -> CountMap {
        let inner = self.inner.read().unwrap();
        let mut counts = CountMap::with_capacity(inner.order.len());
        for name in &inner.order {
            counts.insert(name.clone(), inner.meters[name].get_and_clear());
        }
        counts
    }

    /// Removes all meters. Administrative/test reset, not part of normal
    /// operation.
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.meters.clear();
        inner.order.clear();
    }

    /// Returns the number of registered meters.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().order.len()
    }

    /// Returns whether the registry has no meters.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_increment_creates_meter_lazily() {
        let registry = MeterRegistry::new();
        assert!(registry.is_empty());

        registry.increment("rootProcessInstanceStart");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.snapshot().get("rootProcessInstanceStart"), Some(1));
    }

    #[test]
    fn test_registering_twice_returns_same_meter() {
        let registry = MeterRegistry::new();
        let first = registry.meter("cmd");
        let second = registry.meter("cmd");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_snapshot_preserves_registration_order() {
        let registry = MeterRegistry::new();
        for _ in 0..3 {
            registry.increment("rootProcessInstanceStart");
        }
        for _ in 0..110 {
            registry.increment("activityInstanceStart");
        }

        let snapshot = registry.snapshot();
        let entries: Vec<_> = snapshot.iter().collect();
        assert_eq!(
            entries,
            vec![("rootProcessInstanceStart", 3), ("activityInstanceStart", 110)]
        );
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let registry = MeterRegistry::new();
        registry.add("metric", 7);

        assert_eq!(registry.snapshot().get("metric"), Some(7));
        assert_eq!(registry.snapshot().get("metric"), Some(7));
    }

    #[test]
    fn test_get_and_clear_resets_single_meter() {
        let registry = MeterRegistry::new();
        registry.add("metric", 9);

        assert_eq!(registry.get_and_clear("metric"), 9);
        assert_eq!(registry.snapshot().get("metric"), Some(0));
        assert_eq!(registry.get_and_clear("unknown"), 0);
        // An unregistered name is not created by the destructive read.
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_drain_returns_pre_reset_values_and_keeps_order() {
        let registry = MeterRegistry::new();
        registry.add("first", 3);
        registry.add("second", 110);

        let drained = registry.drain();
        let entries: Vec<_> = drained.iter().collect();
        assert_eq!(entries, vec![("first", 3), ("second", 110)]);

        let after = registry.snapshot();
        let entries: Vec<_> = after.iter().collect();
        assert_eq!(entries, vec![("first", 0), ("second", 0)]);
    }

    #[test]
    fn test_clear_removes_all_meters() {
        let registry = MeterRegistry::new();
        registry.increment("a");
        registry.increment("b");

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn test_concurrent_increments_to_one_name_are_exact() {
        const THREADS: usize = 8;
        const INCREMENTS: usize = 5_000;

        let registry = MeterRegistry::new();
        thread::scope(|scope| {
            for _ in 0..THREADS {
                scope.spawn(|| {
                    for _ in 0..INCREMENTS {
                        registry.increment("contended");
                    }
                });
            }
        });

        assert_eq!(
            registry.snapshot().get("contended"),
            Some((THREADS * INCREMENTS) as u64)
        );
    }

    #[test]
    fn test_racing_registration_converges_to_one_meter() {
        const THREADS: usize = 8;

        let registry = MeterRegistry::new();
        thread::scope(|scope| {
            for _ in 0..THREADS {
                scope.spawn(|| {
                    registry.meter("raced");
                });
            }
        });

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.snapshot().get("raced"), Some(0));
    }

    #[test]
    fn test_concurrent_names_do_not_interfere() {
        const INCREMENTS: usize = 2_000;

        let registry = MeterRegistry::new();
        thread::scope(|scope| {
            for name in ["a", "b", "c", "d"] {
                let registry = &registry;
                scope.spawn(move || {
                    for _ in 0..INCREMENTS {
                        registry.increment(name);
                    }
                });
            }
        });

        let snapshot = registry.snapshot();
        for name in ["a", "b", "c", "d"] {
            assert_eq!(snapshot.get(name), Some(INCREMENTS as u64));
        }
    }
}
