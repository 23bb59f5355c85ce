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

//! # Axon Telemetry
//!
//! Usage telemetry for the Axon engine: concurrent counter aggregation and
//! immutable snapshot assembly.
//!
//! Engine worker threads record command executions and business-metric
//! events through [`TelemetryService`] (or through cached [`Meter`] handles)
//! at atomic-increment cost. On demand, the service freezes all registries
//! plus the statically injected identity/environment descriptors into an
//! immutable [`axon_core::telemetry::TelemetryData`] snapshot.

#![warn(missing_docs)]

pub mod assembler;
pub mod meter;
pub mod registry;
pub mod service;
pub mod state;
pub mod tracker;

pub use self::assembler::{SnapshotAssembler, StaticAttributes};
pub use self::meter::Meter;
pub use self::registry::MeterRegistry;
pub use self::service::TelemetryService;
pub use self::state::{DynamicState, DynamicStateRegistry};
pub use self::tracker::CommandInvocationTracker;
