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

//! Provides the foundational data structures for engine usage telemetry.
//!
//! This module defines the "common language" for usage reporting within
//! Axon: the immutable [`TelemetryData`] snapshot and its descriptor types,
//! the insertion-ordered [`CountMap`] that counter snapshots are rendered
//! into, and the telemetry error taxonomy. The `axon-telemetry` crate
//! provides the live registries and the service that assembles snapshots
//! from them.

pub mod counts;
pub mod data;
pub mod error;

pub use self::counts::CountMap;
pub use self::data::{
    ApplicationServer, Database, Internals, Jdk, LicenseKeyData, Product, TelemetryData,
};
pub use self::error::{TelemetryError, TelemetryResult};
