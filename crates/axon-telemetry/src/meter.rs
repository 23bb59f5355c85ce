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

//! A single named accumulator.

use std::sync::atomic::{AtomicU64, Ordering};

/// A named, atomically incrementable accumulator.
///
/// One owned cell serves both the live inspection view ([`Meter::value`])
/// and the destructive reporting read ([`Meter::get_and_clear`]), so the
/// two views can never drift apart. The value is monotonically
/// non-decreasing except across an explicit reset.
#[derive(Debug)]
pub struct Meter {
    name: String,
    value: AtomicU64,
}

impl Meter {
    /// Creates a new meter with an initial value of 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: AtomicU64::new(0),
        }
    }

    /// Returns the meter's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Atomically adds 1.
    pub fn mark(&self) {
        self.add(1);
    }

    /// Atomically adds `delta`, saturating at `u64::MAX` so sustained load
    /// can never be observed as a wrapped value.
    pub fn add(&self, delta: u64) {
        self.value
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_add(delta))
            })
            .ok();
    }

    /// Returns the current value without mutating it.
    pub fn value(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }

    /// Atomically reads the current value and resets it to 0, returning the
    /// pre-reset value. Used by the periodic report-and-clear path only;
    /// inspection snapshots go through [`Meter::value`].
    pub fn get_and_clear(&self) -> u64 {
        self.value.swap(0, Ordering::AcqRel)
    }
}
