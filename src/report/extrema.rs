//! Extrema aggregation over the resource registry
//!
//! A single pass partitions resources by kind and tracks the minimum and
//! maximum by stored size. Image resources are excluded: the service tracks
//! two categories, text and binary. Strict comparisons mean the first
//! resource encountered wins ties, preserving registry order.

use crate::crawler::Resource;
use crate::menu::ResourceKind;

/// Smallest/largest text and binary resources of one crawl run
#[derive(Debug, Clone, Default)]
pub struct ExtremaTable {
    pub smallest_text: Option<Resource>,
    pub largest_text: Option<Resource>,
    pub smallest_binary: Option<Resource>,
    pub largest_binary: Option<Resource>,
}

impl ExtremaTable {
    /// Iterates the table as (label, entry) pairs in report order
    pub fn entries(&self) -> [(&'static str, Option<&Resource>); 4] {
        [
            ("Smallest text file", self.smallest_text.as_ref()),
            ("Largest text file", self.largest_text.as_ref()),
            ("Smallest binary file", self.smallest_binary.as_ref()),
            ("Largest binary file", self.largest_binary.as_ref()),
        ]
    }
}

/// Computes the extrema table from the final resource registry
///
/// Resources without a known size are skipped entirely.
pub fn compute_extrema(resources: &[Resource]) -> ExtremaTable {
    let mut table = ExtremaTable::default();

    for resource in resources {
        let size = match resource.size {
            Some(size) => size,
            None => continue,
        };

        let (smallest, largest) = match resource.kind {
            ResourceKind::Text => (&mut table.smallest_text, &mut table.largest_text),
            ResourceKind::Binary => (&mut table.smallest_binary, &mut table.largest_binary),
            ResourceKind::Image => continue,
        };

        if smallest.as_ref().and_then(|r| r.size).map_or(true, |s| size < s) {
            *smallest = Some(resource.clone());
        }
        if largest.as_ref().and_then(|r| r.size).map_or(true, |s| size > s) {
            *largest = Some(resource.clone());
        }
    }

    table
}
