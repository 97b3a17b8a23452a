//! Persistence Modules Presented by a Boundary Map
//!
//! For a boundary map D the homology module is Z / B with
//! Z = ker D (the cycles) and B = im D (the boundaries). Both come out of a
//! single `decompose`; expressing every boundary in the cycle basis gives the
//! structure map, whose pivots pair each dying cycle with the boundary that
//! kills it.

use tracing::debug;

use super::barcode::{Barcode, Interval};
use super::structures::{Map, Space};
use crate::algebra::{Field, FiltrationTime};
use crate::error::Result;

/// Homology of a filtered chain complex as a presented persistence module
#[derive(Debug, Clone)]
pub struct PersistenceModule<F: Field, T: FiltrationTime> {
    generators: Space<F, T>,
    relations: Space<F, T>,
    structure_map: Map<F, T>,
}

impl<F: Field, T: FiltrationTime> PersistenceModule<F, T> {
    /// Present the homology of `boundary`
    ///
    /// Fails with `NotInImageSpace` when a boundary is not a cycle, i.e. the
    /// map does not square to zero.
    pub fn new(boundary: &Map<F, T>) -> Result<Self> {
        let (generators, relations) = boundary.decompose()?;
        let structure_map = Map::solve(&generators, &relations)?;

        debug!(
            cells = boundary.domain_dim(),
            cycles = generators.vector_count(),
            boundaries = relations.vector_count(),
            "built persistence module"
        );

        Ok(Self {
            generators,
            relations,
            structure_map,
        })
    }

    /// Cycle basis, one vector per generator
    pub fn generators(&self) -> &Space<F, T> {
        &self.generators
    }

    /// Boundary basis
    pub fn relations(&self) -> &Space<F, T> {
        &self.relations
    }

    /// Relations written in the generator basis
    pub fn structure_map(&self) -> &Map<F, T> {
        &self.structure_map
    }

    /// One interval per generator
    ///
    /// A generator is born at its grading and dies at the time of the
    /// relation whose pivot it is. Each interval records the cell that
    /// created the cycle (the pivot of the generator).
    pub fn barcode(&self) -> Barcode<T> {
        let intervals = self
            .structure_map
            .interval_endpoints()
            .into_iter()
            .filter_map(|(g, birth, death)| {
                self.generators
                    .basis_vector(g)
                    .pivot_dim()
                    .map(|cell| Interval::new(birth, death, cell))
            })
            .collect();
        Barcode::new(intervals)
    }
}
