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

//! Error taxonomy for the telemetry subsystem.

use std::fmt::Display;

/// A specialized `Result` type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// An error that can occur while assembling telemetry data.
///
/// The subsystem performs no I/O, so there are no transient or retryable
/// errors; any failure is a configuration defect and is surfaced to the
/// caller immediately. Recording an unknown counter or command name is not
/// an error — it creates a new entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// A required static identity field was missing or blank at snapshot
    /// assembly time.
    MissingConfiguration {
        /// The name of the missing field (e.g., "installationId").
        field: &'static str,
    },
}

impl Display for TelemetryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelemetryError::MissingConfiguration { field } => {
                write!(f, "Missing required telemetry configuration: {field}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configuration_display() {
        let err = TelemetryError::MissingConfiguration {
            field: "installationId",
        };
        assert_eq!(
            err.to_string(),
            "Missing required telemetry configuration: installationId"
        );
    }
}
