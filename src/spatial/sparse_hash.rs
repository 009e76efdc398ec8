//! Sparse hash grid for spacing checks on the ground plane

use ahash::AHashMap;
use glam::Vec2;

/// Sparse hash grid over XZ positions
///
/// Stores point indices per cell. With `cell_size` equal to the spacing being
/// tested, every neighbour closer than the spacing lives in the 3x3 block
/// around the query cell.
#[derive(Debug, Clone)]
pub struct SparseHashGrid {
    cell_size: f32,
    cells: AHashMap<(i32, i32), Vec<usize>>,
    points: Vec<Vec2>,
}

impl SparseHashGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size.max(f32::EPSILON),
            cells: AHashMap::new(),
            points: Vec::new(),
        }
    }

    #[inline]
    fn cell_coord(&self, pos: Vec2) -> (i32, i32) {
        (
            (pos.x / self.cell_size).floor() as i32,
            (pos.y / self.cell_size).floor() as i32,
        )
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Insert a point, returning its index
    pub fn insert(&mut self, pos: Vec2) -> usize {
        let index = self.points.len();
        let coord = self.cell_coord(pos);
        self.cells.entry(coord).or_default().push(index);
        self.points.push(pos);
        index
    }

    /// Indices stored in the 3x3 cell neighbourhood of `pos`
    pub fn query_neighbors(&self, pos: Vec2) -> impl Iterator<Item = usize> + '_ {
        let (cx, cy) = self.cell_coord(pos);

        (-1..=1).flat_map(move |dx| {
            (-1..=1).flat_map(move |dy| {
                self.cells
                    .get(&(cx + dx, cy + dy))
                    .into_iter()
                    .flatten()
                    .copied()
            })
        })
    }

    /// True when any stored point lies strictly closer than `radius`
    ///
    /// Only exact for `radius <= cell_size`.
    pub fn any_within(&self, pos: Vec2, radius: f32) -> bool {
        let radius_sq = radius * radius;
        self.query_neighbors(pos)
            .any(|i| self.points[i].distance_squared(pos) < radius_sq)
    }
}
