//! Population structure: which cells count as neighbours, and where
//! offspring are placed.

use gatelife_data::CellId;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How cells relate to each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PopStructure {
    /// Toroidal 2-D grid with a Moore neighbourhood (8 cells, self excluded).
    #[default]
    Grid,
    /// Every other cell is a neighbour.
    WellMixed,
}

/// Where a newborn goes relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BirthPlacement {
    /// Random neighbour, overwriting whatever lives there.
    #[default]
    ReplaceNeighbor,
    /// Random empty neighbour; the offspring is dropped when none is free.
    EmptyNeighbor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub width: usize,
    pub height: usize,
    pub structure: PopStructure,
}

impl Topology {
    #[must_use]
    pub fn new(width: usize, height: usize, structure: PopStructure) -> Self {
        Self {
            width,
            height,
            structure,
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    #[must_use]
    pub fn coords(&self, cell: CellId) -> (usize, usize) {
        (cell.index() % self.width, cell.index() / self.width)
    }

    #[must_use]
    pub fn cell_at(&self, x: usize, y: usize) -> CellId {
        CellId(y * self.width + x)
    }

    /// Distinct neighbours of `cell`, never including `cell` itself.
    #[must_use]
    pub fn neighbors(&self, cell: CellId) -> Vec<CellId> {
        let size = self.size();
        if cell.index() >= size {
            return Vec::new();
        }
        match self.structure {
            PopStructure::WellMixed => (0..size).filter(|&i| i != cell.index()).map(CellId).collect(),
            PopStructure::Grid => {
                let (x, y) = self.coords(cell);
                let (w, h) = (self.width as isize, self.height as isize);
                let mut out = Vec::with_capacity(8);
                for dy in -1isize..=1 {
                    for dx in -1isize..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = (x as isize + dx).rem_euclid(w) as usize;
                        let ny = (y as isize + dy).rem_euclid(h) as usize;
                        let n = self.cell_at(nx, ny);
                        // Grids narrower than 3 wrap onto the same cells.
                        if n != cell && !out.contains(&n) {
                            out.push(n);
                        }
                    }
                }
                out
            }
        }
    }

    pub fn random_neighbor<R: Rng + ?Sized>(&self, cell: CellId, rng: &mut R) -> Option<CellId> {
        self.neighbors(cell).choose(rng).copied()
    }
}

impl BirthPlacement {
    /// Picks the destination for an offspring of the organism at `parent`.
    ///
    /// `occupied` reports whether a cell currently holds an organism.
    pub fn find_cell<R, F>(
        self,
        topology: &Topology,
        parent: CellId,
        occupied: F,
        rng: &mut R,
    ) -> Option<CellId>
    where
        R: Rng + ?Sized,
        F: Fn(CellId) -> bool,
    {
        match self {
            Self::ReplaceNeighbor => topology.random_neighbor(parent, rng),
            Self::EmptyNeighbor => {
                let free: Vec<CellId> = topology
                    .neighbors(parent)
                    .into_iter()
                    .filter(|&c| !occupied(c))
                    .collect();
                free.choose(rng).copied()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_grid_neighbors_wrap() {
        let topo = Topology::new(10, 10, PopStructure::Grid);
        let n = topo.neighbors(CellId(0));
        assert_eq!(n.len(), 8);
        assert!(n.contains(&CellId(99)));
        assert!(n.contains(&CellId(9)));
        assert!(n.contains(&CellId(90)));
        assert!(n.contains(&CellId(11)));
        assert!(!n.contains(&CellId(0)));
    }

    #[test]
    fn test_small_grid_dedups() {
        let topo = Topology::new(2, 1, PopStructure::Grid);
        assert_eq!(topo.neighbors(CellId(0)), vec![CellId(1)]);
        let single = Topology::new(1, 1, PopStructure::Grid);
        assert!(single.neighbors(CellId(0)).is_empty());
    }

    #[test]
    fn test_well_mixed_is_everyone_else() {
        let topo = Topology::new(3, 2, PopStructure::WellMixed);
        assert_eq!(topo.neighbors(CellId(4)).len(), 5);
    }

    #[test]
    fn test_empty_neighbor_drops_when_full() {
        let topo = Topology::new(3, 3, PopStructure::Grid);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let found = BirthPlacement::EmptyNeighbor.find_cell(&topo, CellId(4), |_| true, &mut rng);
        assert!(found.is_none());
        let found = BirthPlacement::EmptyNeighbor.find_cell(
            &topo,
            CellId(4),
            |c| c != CellId(7),
            &mut rng,
        );
        assert_eq!(found, Some(CellId(7)));
    }

    #[test]
    fn test_out_of_range_cell_has_no_neighbors() {
        let topo = Topology::new(3, 3, PopStructure::Grid);
        assert!(topo.neighbors(CellId(42)).is_empty());
    }

    proptest::proptest! {
        #[test]
        fn neighbors_are_distinct_and_exclude_self(
            width in 1usize..8,
            height in 1usize..8,
            cell in 0usize..64,
        ) {
            let topo = Topology::new(width, height, PopStructure::Grid);
            let cell = CellId(cell % topo.size());
            let n = topo.neighbors(cell);
            proptest::prop_assert!(n.len() <= 8);
            proptest::prop_assert!(!n.contains(&cell));
            proptest::prop_assert!(n.iter().all(|c| c.index() < topo.size()));
            let mut dedup = n.clone();
            dedup.sort();
            dedup.dedup();
            proptest::prop_assert_eq!(dedup.len(), n.len());
        }
    }
}
