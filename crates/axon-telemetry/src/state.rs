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

//! Transient runtime facts that are not modeled as counters.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// A point-in-time, defensive copy of the dynamic state.
///
/// Mutating the copy has no effect on the registry it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicState {
    /// The web applications registered at snapshot time.
    pub webapps: BTreeSet<String>,
    /// Whether usage-data reporting was enabled at snapshot time.
    pub telemetry_enabled: bool,
}

/// Tracks runtime facts mutated by configuration and toggle operations:
/// the set of deployed web applications and the telemetry-enabled flag.
///
/// The webapp set is populated once at startup by an external discovery
/// collaborator and is read-only during normal operation. The flag is a
/// long-lived configuration switch with no automatic transitions: it only
/// changes via [`DynamicStateRegistry::set_telemetry_enabled`].
#[derive(Debug)]
pub struct DynamicStateRegistry {
    webapps: RwLock<BTreeSet<String>>,
    telemetry_enabled: AtomicBool,
}

impl DynamicStateRegistry {
    /// Creates a new registry with no webapps and the given initial flag
    /// state.
    pub fn new(telemetry_enabled: bool) -> Self {
        Self {
            webapps: RwLock::new(BTreeSet::new()),
            telemetry_enabled: AtomicBool::new(telemetry_enabled),
        }
    }

    /// Sets the telemetry-enabled flag. Idempotent.
    pub fn set_telemetry_enabled(&self, enabled: bool) {
        let previous = self.telemetry_enabled.swap(enabled, Ordering::AcqRel);
        if previous != enabled {
            log::info!(
                "Telemetry reporting {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }
    }

    /// Returns the current flag state.
    pub fn is_telemetry_enabled(&self) -> bool {
        self.telemetry_enabled.load(Ordering::Acquire)
    }

    /// Registers a deployed web application. Called at startup by the
    /// discovery collaborator; registering the same name twice is a no-op.
    pub fn register_webapp(&self, name: impl Into<String>) {
        let name = name.into();
        if self.webapps.write().unwrap().insert(name.clone()) {
            log::info!("Registered webapp: {}", name);
        }
    }

    /// Returns a defensive copy of the current set and flag.
    pub fn snapshot(&self) -> DynamicState {
        DynamicState {
            webapps: self.webapps.read().unwrap().clone(),
            telemetry_enabled: self.is_telemetry_enabled(),
        }
    }
}

impl Default for DynamicStateRegistry {
    fn default() -> Self {
        Self::new(false)
    }
}
