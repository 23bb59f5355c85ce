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

//! Invocation tracking for internal engine commands.

use crate::registry::MeterRegistry;
use axon_core::telemetry::CountMap;

/// Counts invocations of internal engine commands.
///
/// This is a [`MeterRegistry`] scoped to command names, kept in a namespace
/// disjoint from business metrics. The command interceptor calls
/// [`CommandInvocationTracker::record`] once per completed command
/// execution; the tracker does not decide which commands are tracked — it
/// accepts whatever name the interceptor supplies, and a previously-unseen
/// command name simply becomes a new counter.
#[derive(Debug, Default)]
pub struct CommandInvocationTracker {
    commands: MeterRegistry,
}

impl CommandInvocationTracker {
    /// Creates a new tracker with no recorded commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed execution of the named command.
    pub fn record(&self, command_name: &str) {
        self.commands.increment(command_name);
    }

    /// Returns all tracked commands and their invocation counts, in
    /// first-invocation order.
    pub fn snapshot(&self) -> CountMap {
        self.commands.snapshot()
    }

    /// Atomically reads and resets every command counter, returning the
    /// pre-reset counts in first-invocation order.
    pub fn drain(&self) -> CountMap {
        self.commands.drain()
    }

    /// Removes all command counters. Administrative/test reset.
    pub fn clear(&self) {
        self.commands.clear();
    }
}
