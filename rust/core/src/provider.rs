// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element providers - the pull-based source of building elements
//!
//! A provider wraps whatever produces elements (a file iterator, a network
//! stream, a staged buffer) behind a finite, non-restartable sequence. The
//! import driver consumes it synchronously, one element per step.

use crate::element::Element;
use crate::error::Result;

/// Pull-based element source.
///
/// Implementations must yield elements in a stable, deterministic order
/// across a single run. The sequence is not restartable; a new run takes a
/// new provider.
pub trait ElementProvider {
    /// Prepare the underlying source. An error here is fatal to the whole
    /// run; no elements may be pulled afterwards.
    fn initialize(&mut self) -> Result<()>;

    /// Pull the next element, or `None` when the sequence is exhausted
    fn next_element(&mut self) -> Option<Element>;

    /// Fraction of the sequence consumed so far, in `[0, 1]`
    fn progress(&self) -> f32;
}

/// Provider over a pre-staged buffer of elements.
///
/// Used by tests and by hosts that materialize the element list up front
/// before handing it to the import driver.
#[derive(Debug)]
pub struct BufferedProvider {
    elements: std::vec::IntoIter<Element>,
    total: usize,
    consumed: usize,
}

impl BufferedProvider {
    /// Create a provider over the given elements, yielded in order
    pub fn new(elements: Vec<Element>) -> Self {
        let total = elements.len();
        Self {
            elements: elements.into_iter(),
            total,
            consumed: 0,
        }
    }

    /// Number of elements staged in total
    #[inline]
    pub fn len(&self) -> usize {
        self.total
    }

    /// Check if the provider was staged empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl ElementProvider for BufferedProvider {
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    fn next_element(&mut self) -> Option<Element> {
        let element = self.elements.next();
        if element.is_some() {
            self.consumed += 1;
        }
        element
    }

    fn progress(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.consumed as f32 / self.total as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::TriangulatedGeometry;
    use nalgebra::Matrix4;

    fn element(id: u64) -> Element {
        Element {
            id,
            guid: format!("guid-{id}"),
            element_type: "IfcWall".to_string(),
            name: format!("Wall {id}"),
            transform: Matrix4::identity(),
            geometry: TriangulatedGeometry::default(),
        }
    }

    #[test]
    fn test_yields_in_order_until_exhausted() {
        let mut provider = BufferedProvider::new(vec![element(1), element(2), element(3)]);
        provider.initialize().unwrap();

        let ids: Vec<u64> = std::iter::from_fn(|| provider.next_element())
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);

        // exhausted for good, not restartable
        assert!(provider.next_element().is_none());
        assert!(provider.next_element().is_none());
    }

    #[test]
    fn test_progress_fraction() {
        let mut provider = BufferedProvider::new(vec![element(1), element(2)]);
        provider.initialize().unwrap();
        assert_eq!(provider.progress(), 0.0);

        provider.next_element();
        assert_eq!(provider.progress(), 0.5);

        provider.next_element();
        assert_eq!(provider.progress(), 1.0);
    }

    #[test]
    fn test_empty_provider_reports_complete() {
        let mut provider = BufferedProvider::new(Vec::new());
        provider.initialize().unwrap();
        assert!(provider.is_empty());
        assert_eq!(provider.progress(), 1.0);
        assert!(provider.next_element().is_none());
    }
}
