// Copyright 2025 Chris Custine
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

//! Write-once overlay layers.
//!
//! An overlay starts out pending and is populated exactly once by the task
//! that fetched its data, either with items or with the fetch error. It is
//! never cleared or refreshed. Readers never block: until the writer has
//! finished they simply see an empty layer.

use std::sync::{Arc, OnceLock};

use thiserror::Error;

use crate::feed::FeedError;

/// Returned when a layer that already holds a value is populated again.
#[derive(Debug, Error)]
#[error("overlay '{0}' is already populated")]
pub struct AlreadyPopulated(pub &'static str);

/// Borrowed view of an overlay's lifecycle.
#[derive(Debug)]
pub enum OverlayState<'a, T> {
    /// Fetch still in flight (or never resolved).
    Pending,
    Ready(&'a [T]),
    Failed(&'a FeedError),
}

/// A named, shareable, write-once collection of rendered features.
///
/// Clones share the same storage, so one clone can be handed to the fetching
/// task while the UI keeps another.
#[derive(Debug)]
pub struct OverlayLayer<T> {
    name: &'static str,
    cell: Arc<OnceLock<Result<Vec<T>, FeedError>>>,
}

impl<T> Clone for OverlayLayer<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T> OverlayLayer<T> {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: Arc::new(OnceLock::new()),
        }
    }

    /// Display name, e.g. `"Earthquake Data"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Store the outcome of the fetch. Only the first call succeeds.
    pub fn populate(&self, result: Result<Vec<T>, FeedError>) -> Result<(), AlreadyPopulated> {
        if self.cell.set(result).is_err() {
            return Err(AlreadyPopulated(self.name));
        }
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> OverlayState<'_, T> {
        match self.cell.get() {
            None => OverlayState::Pending,
            Some(Ok(items)) => OverlayState::Ready(items),
            Some(Err(e)) => OverlayState::Failed(e),
        }
    }

    /// Rendered features; empty while pending or after a failure.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self.cell.get() {
            Some(Ok(items)) => items,
            _ => &[],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Whether the fetch has resolved, successfully or not.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.cell.get().is_some()
    }

    #[must_use]
    pub fn error(&self) -> Option<&FeedError> {
        match self.cell.get() {
            Some(Err(e)) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> FeedError {
        FeedError::Decode {
            url: "http://localhost/feed".to_string(),
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        }
    }

    #[test]
    fn test_empty_before_population() {
        let layer: OverlayLayer<u32> = OverlayLayer::new("Earthquake Data");

        assert!(matches!(layer.state(), OverlayState::Pending));
        assert!(layer.is_empty());
        assert!(!layer.is_settled());
        assert!(layer.error().is_none());
    }

    #[test]
    fn test_populate_is_visible_through_clones() {
        let layer = OverlayLayer::new("Tectonic Plates");
        let writer = layer.clone();

        writer.populate(Ok(vec![1, 2, 3])).unwrap();

        assert_eq!(layer.len(), 3);
        assert!(matches!(layer.state(), OverlayState::Ready(items) if items == [1, 2, 3]));
    }

    #[test]
    fn test_second_populate_is_rejected() {
        let layer = OverlayLayer::new("Earthquake Data");
        layer.populate(Ok(vec!["first"])).unwrap();

        let err = layer.populate(Ok(vec!["second", "third"])).unwrap_err();
        assert_eq!(err.to_string(), "overlay 'Earthquake Data' is already populated");
        assert_eq!(layer.items(), ["first"]);
    }

    #[test]
    fn test_failed_layer_stays_empty() {
        let layer: OverlayLayer<u8> = OverlayLayer::new("Tectonic Plates");
        layer.populate(Err(decode_error())).unwrap();

        assert!(layer.is_settled());
        assert!(layer.is_empty());
        assert!(matches!(layer.error(), Some(FeedError::Decode { .. })));
        assert!(layer.populate(Ok(vec![1])).is_err());
        assert!(layer.is_empty());
    }
}
