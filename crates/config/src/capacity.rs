// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use serde::Serialize;
use std::ops::Deref;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("capacity of {capacity} entries exceeded")]
pub struct CapacityError {
    pub capacity: usize,
}

/// Ordered storage that never holds more than `N` entries.
///
/// Mirrors the fixed arrays of the controller: a push past `N` is rejected,
/// nothing is dropped silently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Bounded<T, const N: usize> {
    items: Vec<T>,
}

impl<T, const N: usize> Bounded<T, N> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn try_push(&mut self, item: T) -> Result<(), CapacityError> {
        if self.items.len() >= N {
            return Err(CapacityError { capacity: N });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= N
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T, const N: usize> Default for Bounded<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Deref for Bounded<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a Bounded<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_past_capacity_is_rejected() {
        let mut slots: Bounded<u8, 2> = Bounded::new();
        slots.try_push(1).unwrap();
        slots.try_push(2).unwrap();
        assert!(slots.is_full());
        assert_eq!(slots.try_push(3), Err(CapacityError { capacity: 2 }));
        assert_eq!(slots.as_slice(), &[1, 2]);
    }
}
