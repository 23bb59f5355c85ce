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

//! Assembly of immutable telemetry snapshots from live registry state.

use crate::registry::MeterRegistry;
use crate::state::DynamicStateRegistry;
use crate::tracker::CommandInvocationTracker;
use axon_core::telemetry::{
    ApplicationServer, Database, Internals, Jdk, LicenseKeyData, Product, TelemetryData,
    TelemetryError, TelemetryResult,
};
use std::sync::Arc;

/// Static identity and environment data, set once at engine startup and
/// embedded verbatim into every snapshot.
///
/// All fields are supplied by external collaborators via constructor
/// injection: the installation id is generated once and persisted outside
/// this subsystem, and the environment descriptors come from the driver,
/// container, and license collaborators. The subsystem never derives or
/// parses any of them.
#[derive(Debug, Clone)]
pub struct StaticAttributes {
    /// Stable installation identifier (a UUID generated once and persisted
    /// externally).
    pub installation_id: String,
    /// The product this installation runs as.
    pub product: Product,
    /// The database the engine runs against.
    pub database: Database,
    /// The hosting application server, when known.
    pub application_server: Option<ApplicationServer>,
    /// The JDK the engine runs on.
    pub jdk: Jdk,
    /// License key details, when installed.
    pub license_key: Option<LicenseKeyData>,
}

/// Composes immutable [`TelemetryData`] snapshots.
///
/// Reads the command tracker, the business-metric registry, and the dynamic
/// state registry without mutating them, and combines their state with the
/// static attributes. The assembler never invokes a destructive read, so
/// repeated assembly with no intervening increments yields equal,
/// identically-ordered counter maps.
#[derive(Debug)]
pub struct SnapshotAssembler {
    attributes: StaticAttributes,
    commands: Arc<CommandInvocationTracker>,
    metrics: Arc<MeterRegistry>,
    state: Arc<DynamicStateRegistry>,
}

impl SnapshotAssembler {
    /// Creates an assembler over the given attributes and registries.
    pub fn new(
        attributes: StaticAttributes,
        commands: Arc<CommandInvocationTracker>,
        metrics: Arc<MeterRegistry>,
        state: Arc<DynamicStateRegistry>,
    ) -> Self {
        Self {
            attributes,
            commands,
            metrics,
            state,
        }
    }

    /// Builds a new snapshot from the current registry state.
    ///
    /// Fails with [`TelemetryError::MissingConfiguration`] if the
    /// installation id or the product name is blank; a partially-populated
    /// snapshot is never produced.
    pub fn assemble(&self) -> TelemetryResult<TelemetryData> {
        if self.attributes.installation_id.trim().is_empty() {
            return Err(TelemetryError::MissingConfiguration {
                field: "installationId",
            });
        }
        if self.attributes.product.name.trim().is_empty() {
            return Err(TelemetryError::MissingConfiguration {
                field: "product.name",
            });
        }

        log::trace!("Assembling telemetry snapshot");
        let dynamic = self.state.snapshot();

        Ok(TelemetryData {
            installation_id: self.attributes.installation_id.clone(),
            product: self.attributes.product.clone(),
            internals: Internals {
                database: self.attributes.database.clone(),
                application_server: self.attributes.application_server.clone(),
                jdk: self.attributes.jdk.clone(),
                license_key: self.attributes.license_key.clone(),
                commands: self.commands.snapshot(),
                metrics: self.metrics.snapshot(),
                webapps: dynamic.webapps,
                telemetry_enabled: dynamic.telemetry_enabled,
            },
        })
    }
}
