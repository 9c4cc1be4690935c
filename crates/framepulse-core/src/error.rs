// Copyright 2025 eraflo
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

//! Error types for profiler operations.

use std::fmt::Display;

/// A specialized `Result` type for profiler operations.
pub type ProfilerResult<T> = Result<T, ProfilerError>;

/// An error that can occur within the profiler.
///
/// Aggregation and rule evaluation are deterministic pure computations and
/// never fail; errors arise only at the edges (report serialization, invalid
/// host calls).
#[derive(Debug, Clone)]
pub enum ProfilerError {
    /// Serializing an export report failed.
    Export(String),
    /// An operation was invoked in a state or strategy that does not
    /// support it.
    InvalidOperation(String),
}

impl Display for ProfilerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfilerError::Export(msg) => write!(f, "Export failed: {msg}"),
            ProfilerError::InvalidOperation(msg) => write!(f, "Invalid operation: {msg}"),
        }
    }
}

impl std::error::Error for ProfilerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let err = ProfilerError::Export("buffer full".to_string());
        assert_eq!(err.to_string(), "Export failed: buffer full");
    }
}
