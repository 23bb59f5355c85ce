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

//! The immutable usage-telemetry snapshot and its descriptor types.
//!
//! [`TelemetryData`] is a value object frozen at assembly time: it holds no
//! live reference back into the registries, so counter increments after
//! assembly never mutate an already-returned snapshot.

use crate::telemetry::counts::CountMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Identity of the product this engine instance runs as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// The product name (e.g., "Axon Runtime").
    pub name: String,
    /// The product version (e.g., "7.14.0").
    pub version: String,
    /// The product edition (e.g., "community", "enterprise").
    pub edition: String,
}

impl Product {
    /// Creates a new product descriptor.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        edition: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            edition: edition.into(),
        }
    }
}

/// The database the engine persists to, as reported by its driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    /// The database vendor (e.g., "PostgreSQL").
    pub vendor: String,
    /// The database version string.
    pub version: String,
}

impl Database {
    /// Creates a new database descriptor.
    pub fn new(vendor: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            version: version.into(),
        }
    }
}

/// The application server hosting the engine, when one is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationServer {
    /// The server vendor (e.g., "Apache Tomcat").
    pub vendor: String,
    /// The full server version string (e.g., "Apache Tomcat/10.0.1").
    pub version: String,
}

impl ApplicationServer {
    /// Creates a new application server descriptor.
    pub fn new(vendor: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            version: version.into(),
        }
    }

    /// Derives the descriptor from a full version string of the form
    /// `"Vendor Name/1.2.3"`. The vendor is everything before the first
    /// slash; a string without a slash is used as the vendor verbatim.
    pub fn from_version_string(version: impl Into<String>) -> Self {
        let version = version.into();
        let vendor = version
            .split('/')
            .next()
            .unwrap_or(version.as_str())
            .trim()
            .to_string();
        Self { vendor, version }
    }
}

/// The Java Development Kit the engine runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jdk {
    /// The JDK vendor (e.g., "Eclipse Adoptium").
    pub vendor: String,
    /// The JDK version string.
    pub version: String,
}

impl Jdk {
    /// Creates a new JDK descriptor.
    pub fn new(vendor: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            version: version.into(),
        }
    }
}

/// License key details supplied by an external license collaborator.
///
/// The telemetry subsystem embeds these fields verbatim; it never parses or
/// validates license material itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseKeyData {
    /// The licensed customer name.
    pub customer: String,
    /// The license type (e.g., "UNIFIED").
    #[serde(rename = "type")]
    pub license_type: String,
    /// The expiry date, as supplied.
    pub valid_until: String,
    /// Whether the license is unlimited.
    pub unlimited: bool,
    /// Feature toggles carried by the license.
    pub features: HashMap<String, String>,
    /// The raw license text.
    pub raw: String,
}

impl LicenseKeyData {
    /// Creates a new license descriptor.
    pub fn new(
        customer: impl Into<String>,
        license_type: impl Into<String>,
        valid_until: impl Into<String>,
        unlimited: bool,
        features: HashMap<String, String>,
        raw: impl Into<String>,
    ) -> Self {
        Self {
            customer: customer.into(),
            license_type: license_type.into(),
            valid_until: valid_until.into(),
            unlimited,
            features,
            raw: raw.into(),
        }
    }
}

/// Internal engine state captured in a snapshot: environment descriptors,
/// accumulated counters, and dynamic configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Internals {
    /// The database the engine runs against.
    pub database: Database,
    /// The hosting application server, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_server: Option<ApplicationServer>,
    /// The JDK the engine runs on.
    pub jdk: Jdk,
    /// License key details, when installed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_key: Option<LicenseKeyData>,
    /// Per-command invocation counts, in first-registration order.
    pub commands: CountMap,
    /// Business-metric counts, in first-registration order.
    pub metrics: CountMap,
    /// The web applications deployed alongside the engine.
    pub webapps: BTreeSet<String>,
    /// Whether usage-data reporting is currently enabled.
    pub telemetry_enabled: bool,
}

/// The full usage-telemetry snapshot for one engine installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryData {
    /// Stable installation identifier, generated once and persisted
    /// externally.
    pub installation_id: String,
    /// The product this installation runs as.
    pub product: Product,
    /// Environment descriptors, counters, and dynamic state.
    pub internals: Internals,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_internals() -> Internals {
        Internals {
            database: Database::new("PostgreSQL", "14.2"),
            application_server: None,
            jdk: Jdk::new("Eclipse Adoptium", "17.0.2"),
            license_key: None,
            commands: CountMap::new(),
            metrics: CountMap::new(),
            webapps: BTreeSet::new(),
            telemetry_enabled: false,
        }
    }

    #[test]
    fn test_application_server_vendor_from_version_string() {
        let server = ApplicationServer::from_version_string("Apache Tomcat/10.0.1");
        assert_eq!(server.vendor, "Apache Tomcat");
        assert_eq!(server.version, "Apache Tomcat/10.0.1");

        let bare = ApplicationServer::from_version_string("WildFly");
        assert_eq!(bare.vendor, "WildFly");
        assert_eq!(bare.version, "WildFly");
    }

    #[test]
    fn test_snapshot_serializes_with_camel_case_keys() {
        let data = TelemetryData {
            installation_id: "cb07ce31-c8e3-4f5f-94c2-1b28175c2022".to_string(),
            product: Product::new("Runtime", "7.14.0", "community"),
            internals: sample_internals(),
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(
            json["installationId"],
            "cb07ce31-c8e3-4f5f-94c2-1b28175c2022"
        );
        assert_eq!(json["product"]["name"], "Runtime");
        assert_eq!(json["internals"]["telemetryEnabled"], false);
        assert_eq!(json["internals"]["database"]["vendor"], "PostgreSQL");
    }

    #[test]
    fn test_absent_optional_descriptors_are_omitted() {
        let data = TelemetryData {
            installation_id: "id".to_string(),
            product: Product::new("Runtime", "1.0.0", "community"),
            internals: sample_internals(),
        };

        let json = serde_json::to_value(&data).unwrap();
        let internals = json["internals"].as_object().unwrap();
        assert!(!internals.contains_key("applicationServer"));
        assert!(!internals.contains_key("licenseKey"));
    }

    #[test]
    fn test_license_key_round_trips() {
        let mut features = HashMap::new();
        features.insert("axonBPM".to_string(), "true".to_string());
        let license = LicenseKeyData::new(
            "customer a",
            "UNIFIED",
            "2029-09-01",
            false,
            features,
            "raw license",
        );

        let json = serde_json::to_string(&license).unwrap();
        assert!(json.contains(r#""type":"UNIFIED""#));
        assert!(json.contains(r#""validUntil":"2029-09-01""#));

        let back: LicenseKeyData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, license);
    }
}
