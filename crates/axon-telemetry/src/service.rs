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

//! The usage-telemetry facade for the Axon engine.

use crate::assembler::{SnapshotAssembler, StaticAttributes};
use crate::registry::MeterRegistry;
use crate::state::DynamicStateRegistry;
use crate::tracker::CommandInvocationTracker;
use axon_core::telemetry::{CountMap, TelemetryData, TelemetryResult};
use std::sync::Arc;

/// Facade for usage telemetry.
///
/// Owns the command tracker, the business-metric registry, and the dynamic
/// state registry, and exposes the narrow API through which the rest of the
/// engine records and reads usage data. One instance lives for the lifetime
/// of its owning engine instance; it is explicitly constructed and passed
/// by reference to every collaborator that records or reads metrics —
/// there is no ambient global.
///
/// The recording methods are safe to call from any number of worker threads
/// concurrently at atomic-increment cost. Interceptors on very hot paths
/// can additionally cache a meter handle via
/// [`TelemetryService::metrics_registry`] and skip the name lookup.
#[derive(Debug)]
pub struct TelemetryService {
    commands: Arc<CommandInvocationTracker>,
    metrics: Arc<MeterRegistry>,
    state: Arc<DynamicStateRegistry>,
    assembler: SnapshotAssembler,
}

impl TelemetryService {
    /// Creates a new service with empty registries and the given static
    /// attributes and initial telemetry-enabled state.
    pub fn new(attributes: StaticAttributes, telemetry_enabled: bool) -> Self {
        let commands = Arc::new(CommandInvocationTracker::new());
        let metrics = Arc::new(MeterRegistry::new());
        let state = Arc::new(DynamicStateRegistry::new(telemetry_enabled));
        let assembler = SnapshotAssembler::new(
            attributes,
            Arc::clone(&commands),
            Arc::clone(&metrics),
            Arc::clone(&state),
        );
        Self {
            commands,
            metrics,
            state,
            assembler,
        }
    }

    /// Records one completed execution of the named engine command. Called
    /// synchronously by the command interceptor on every execution.
    pub fn record_command_executed(&self, command_name: &str) {
        self.commands.record(command_name);
    }

    /// Records `delta` occurrences of the named business metric.
    pub fn record_metric(&self, metric_name: &str, delta: u64) {
        self.metrics.add(metric_name, delta);
    }

    /// Sets the telemetry-enabled flag. Idempotent; admin/startup surface,
    /// not a hot-path call.
    pub fn set_telemetry_enabled(&self, enabled: bool) {
        self.state.set_telemetry_enabled(enabled);
    }

    /// Returns the current telemetry-enabled flag state.
    pub fn is_telemetry_enabled(&self) -> bool {
        self.state.is_telemetry_enabled()
    }

    /// Registers a deployed web application. Startup surface.
    pub fn register_webapp(&self, name: impl Into<String>) {
        self.state.register_webapp(name);
    }

    /// Builds an immutable snapshot of the current telemetry state.
    ///
    /// Read-only and idempotent with respect to all counters; never invokes
    /// a destructive read.
    pub fn get_data(&self) -> TelemetryResult<TelemetryData> {
        self.assembler.assemble()
    }

    /// Atomically reads and resets all business metrics, returning the
    /// pre-reset counts in first-registration order. Destructive; used by
    /// the periodic external reporter so that no event is reported twice.
    pub fn get_and_clear_metrics(&self) -> CountMap {
        self.metrics.drain()
    }

    /// Returns the business-metric registry, shared with recording
    /// collaborators.
    pub fn metrics_registry(&self) -> Arc<MeterRegistry> {
        Arc::clone(&self.metrics)
    }

    /// Returns the command invocation tracker, shared with the command
    /// interceptor.
    pub fn command_tracker(&self) -> Arc<CommandInvocationTracker> {
        Arc::clone(&self.commands)
    }

    /// Returns the dynamic state registry, shared with the admin and
    /// discovery collaborators.
    pub fn state_registry(&self) -> Arc<DynamicStateRegistry> {
        Arc::clone(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_core::telemetry::{Database, Jdk, Product};

    fn service() -> TelemetryService {
        let attributes = StaticAttributes {
            installation_id: "cb07ce31-c8e3-4f5f-94c2-1b28175c2022".to_string(),
            product: Product::new("Runtime", "7.14.0", "community"),
            database: Database::new("PostgreSQL", "14.2"),
            application_server: None,
            jdk: Jdk::new("Eclipse Adoptium", "17.0.2"),
            license_key: None,
        };
        TelemetryService::new(attributes, false)
    }

    #[test]
    fn test_recorded_metrics_appear_in_first_increment_order() {
        let service = service();
        service.record_metric("rootProcessInstanceStart", 3);
        service.record_metric("activityInstanceStart", 110);

        let data = service.get_data().unwrap();
        let entries: Vec<_> = data.internals.metrics.iter().collect();
        assert_eq!(
            entries,
            vec![("rootProcessInstanceStart", 3), ("activityInstanceStart", 110)]
        );
    }

    #[test]
    fn test_get_data_is_idempotent() {
        let service = service();
        service.record_command_executed("StartProcessInstanceCmd");
        service.record_metric("activityInstanceStart", 4);

        let first = service.get_data().unwrap();
        let second = service.get_data().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_snapshot_reflects_current_flag_state() {
        let service = service();
        service.record_metric("activityInstanceStart", 1);

        service.set_telemetry_enabled(true);
        assert!(service.get_data().unwrap().internals.telemetry_enabled);
        assert!(service.is_telemetry_enabled());

        service.set_telemetry_enabled(false);
        let data = service.get_data().unwrap();
        assert!(!data.internals.telemetry_enabled);
        // Counter state is independent of the flag.
        assert_eq!(data.internals.metrics.get("activityInstanceStart"), Some(1));
    }

    #[test]
    fn test_get_and_clear_metrics_drains_without_losing_events() {
        let service = service();
        service.record_metric("rootProcessInstanceStart", 3);
        service.record_metric("activityInstanceStart", 110);

        let drained = service.get_and_clear_metrics();
        assert_eq!(drained.get("rootProcessInstanceStart"), Some(3));
        assert_eq!(drained.get("activityInstanceStart"), Some(110));

        let data = service.get_data().unwrap();
        assert_eq!(data.internals.metrics.get("rootProcessInstanceStart"), Some(0));
        assert_eq!(data.internals.metrics.get("activityInstanceStart"), Some(0));

        // Events recorded after the drain land in the next report.
        service.record_metric("activityInstanceStart", 2);
        assert_eq!(
            service.get_and_clear_metrics().get("activityInstanceStart"),
            Some(2)
        );
    }

    #[test]
    fn test_shared_registry_handles_feed_the_same_snapshot() {
        let service = service();
        let metrics = service.metrics_registry();
        let cached = metrics.meter("cachedMetric");
        cached.mark();
        cached.mark();

        service.command_tracker().record("CachedCmd");
        service.state_registry().register_webapp("cockpit");

        let data = service.get_data().unwrap();
        assert_eq!(data.internals.metrics.get("cachedMetric"), Some(2));
        assert_eq!(data.internals.commands.get("CachedCmd"), Some(1));
        assert!(data.internals.webapps.contains("cockpit"));
    }
}
