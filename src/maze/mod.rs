pub mod cell;
pub mod edge;
mod kruskal;
mod union_find;

pub use cell::{Cell, CellId, Direction, EdgeId};
pub use edge::Edge;

pub(crate) use kruskal::get_rng;

/// A perfect maze over a rectangular lattice of cells.
///
/// Cells live in a flat arena and reference each other by [`CellId`], so the
/// mutual left/right/top/bottom links carry no ownership. Once generated the
/// maze is immutable except for the per-cell `visited` trail flag and the
/// `prev` back-pointer owned by the most recent search.
pub struct Maze {
    cells: Vec<Cell>,
    /// The spanning tree. An edge here means the wall between its endpoints
    /// is removed; exactly `width * height - 1` edges once generated.
    tree: Vec<Edge>,
    width: u8,
    height: u8,
}

impl Maze {
    /// Builds the lattice and carves a spanning tree through it with
    /// randomized Kruskal. Pass a seed to reproduce a maze exactly.
    ///
    /// A width or height of 0 yields an empty maze with no cells and no
    /// edges; every operation on it is a no-op.
    pub fn generate(width: u8, height: u8, seed: Option<u64>) -> Self {
        let mut maze = Maze {
            cells: Maze::build_grid(width, height),
            tree: Vec::new(),
            width,
            height,
        };
        if maze.cells.is_empty() {
            return maze;
        }

        let mut rng = get_rng(seed);
        let tree = kruskal::spanning_tree(&maze.cells, &mut rng);
        maze.apply_tree(tree);
        maze
    }

    /// Rectangular lattice with symmetric neighbor links and all walls up.
    /// Deterministic; border cells get `None` in the outward directions.
    fn build_grid(width: u8, height: u8) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            for col in 0..width {
                let index = row as u16 * width as u16 + col as u16;
                let mut cell = Cell::new(col, row);
                cell.left = (col > 0).then(|| CellId(index - 1));
                cell.right = (col + 1 < width).then(|| CellId(index + 1));
                cell.top = (row > 0).then(|| CellId(index - width as u16));
                cell.bottom = (row + 1 < height).then(|| CellId(index + width as u16));
                cells.push(cell);
            }
        }
        cells
    }

    /// Derives wall visibility from tree membership and attaches each tree
    /// edge to both endpoint cells' passage lists. Runs once per maze.
    fn apply_tree(&mut self, tree: Vec<Edge>) {
        self.tree = tree;
        for index in 0..self.tree.len() {
            let Edge { a, b, .. } = self.tree[index];
            let edge_id = EdgeId(index as u16);

            if self.cells[a.index()].right == Some(b) {
                self.cells[a.index()].wall_right = false;
            } else if self.cells[a.index()].bottom == Some(b) {
                self.cells[a.index()].wall_bottom = false;
            } else if self.cells[b.index()].right == Some(a) {
                self.cells[b.index()].wall_right = false;
            } else if self.cells[b.index()].bottom == Some(a) {
                self.cells[b.index()].wall_bottom = false;
            }

            self.cells[a.index()].passages.push(edge_id);
            self.cells[b.index()].passages.push(edge_id);
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Checks if the maze has no cells (zero width or height).
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn tree(&self) -> &[Edge] {
        &self.tree
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.tree[id.index()]
    }

    pub fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.index()]
    }

    /// Id of the cell at `(col, row)`, or `None` when out of bounds.
    pub fn id_at(&self, col: u8, row: u8) -> Option<CellId> {
        (col < self.width && row < self.height)
            .then(|| CellId(row as u16 * self.width as u16 + col as u16))
    }

    /// Top-left cell, where the player starts.
    pub fn entry(&self) -> Option<CellId> {
        self.id_at(0, 0)
    }

    /// Bottom-right cell, the goal.
    pub fn goal(&self) -> Option<CellId> {
        if self.is_empty() {
            None
        } else {
            self.id_at(self.width - 1, self.height - 1)
        }
    }

    pub fn neighbor(&self, id: CellId, direction: Direction) -> Option<CellId> {
        let cell = &self.cells[id.index()];
        match direction {
            Direction::Left => cell.left,
            Direction::Right => cell.right,
            Direction::Up => cell.top,
            Direction::Down => cell.bottom,
        }
    }

    /// Whether a passage (neighbor present, wall absent) opens from `id` in
    /// the given direction.
    ///
    /// Wall ownership sits on the left/top cell of each pair: moving right
    /// or down consults this cell's own flag, moving left or up consults the
    /// destination cell's matching flag.
    pub fn passage_toward(&self, id: CellId, direction: Direction) -> bool {
        let cell = &self.cells[id.index()];
        match direction {
            Direction::Right => cell.right.is_some() && !cell.wall_right,
            Direction::Down => cell.bottom.is_some() && !cell.wall_bottom,
            Direction::Left => cell
                .left
                .is_some_and(|left| !self.cells[left.index()].wall_right),
            Direction::Up => cell
                .top
                .is_some_and(|top| !self.cells[top.index()].wall_bottom),
        }
    }

    /// Cells reachable from `id` through one passage.
    pub fn passage_neighbors(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        self.cells[id.index()]
            .passages
            .iter()
            .map(move |&edge_id| self.tree[edge_id.index()].other(id))
    }

    /// Clears every cell's search back-pointer. Called at the start of each
    /// search so stale pointers from an earlier run never leak into a walk.
    pub(crate) fn clear_back_pointers(&mut self) {
        for cell in &mut self.cells {
            cell.prev = None;
        }
    }

    #[cfg(test)]
    /// A lattice with every wall still up (no tree), for exercising search
    /// and movement against hand-carved passages.
    pub(crate) fn walled(width: u8, height: u8) -> Self {
        Maze {
            cells: Maze::build_grid(width, height),
            tree: Vec::new(),
            width,
            height,
        }
    }

    #[cfg(test)]
    /// Hand-carves a passage between two adjacent cells, updating both the
    /// wall flag and the passage adjacency, like `apply_tree` would.
    pub(crate) fn carve(&mut self, a: CellId, b: CellId) {
        self.tree.push(Edge::new(a, b, 0));
        let edge_id = EdgeId((self.tree.len() - 1) as u16);
        if self.cells[a.index()].right == Some(b) {
            self.cells[a.index()].wall_right = false;
        } else if self.cells[a.index()].bottom == Some(b) {
            self.cells[a.index()].wall_bottom = false;
        } else if self.cells[b.index()].right == Some(a) {
            self.cells[b.index()].wall_right = false;
        } else if self.cells[b.index()].bottom == Some(a) {
            self.cells[b.index()].wall_bottom = false;
        }
        self.cells[a.index()].passages.push(edge_id);
        self.cells[b.index()].passages.push(edge_id);
    }
}

impl std::ops::Index<CellId> for Maze {
    type Output = Cell;

    fn index(&self, id: CellId) -> &Self::Output {
        &self.cells[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Cells reachable from the entry through passages, optionally ignoring
    /// one tree edge.
    fn reachable(maze: &Maze, skip_edge: Option<usize>) -> usize {
        let Some(entry) = maze.entry() else { return 0 };
        let mut seen = vec![false; maze.cell_count()];
        let mut pending = VecDeque::from([entry]);
        seen[entry.index()] = true;
        let mut count = 0;
        while let Some(id) = pending.pop_front() {
            count += 1;
            for &edge_id in &maze[id].passages {
                if skip_edge == Some(edge_id.index()) {
                    continue;
                }
                let other = maze.edge(edge_id).other(id);
                if !seen[other.index()] {
                    seen[other.index()] = true;
                    pending.push_back(other);
                }
            }
        }
        count
    }

    #[test]
    fn tree_has_cell_count_minus_one_edges() {
        for (width, height) in [(1, 1), (1, 5), (4, 1), (2, 2), (8, 5), (13, 7)] {
            let maze = Maze::generate(width, height, Some(42));
            let cells = width as usize * height as usize;
            assert_eq!(maze.tree().len(), cells - 1, "{width}x{height}");
        }
    }

    #[test]
    fn every_cell_is_reachable_through_passages() {
        for (width, height) in [(1, 1), (1, 5), (4, 1), (2, 2), (8, 5), (13, 7)] {
            let maze = Maze::generate(width, height, Some(7));
            let cells = width as usize * height as usize;
            assert_eq!(reachable(&maze, None), cells, "{width}x{height}");
        }
    }

    #[test]
    fn removing_any_tree_edge_disconnects_the_maze() {
        let maze = Maze::generate(4, 4, Some(3));
        for index in 0..maze.tree().len() {
            assert!(reachable(&maze, Some(index)) < maze.cell_count());
        }
    }

    #[test]
    fn wall_flags_complement_tree_membership() {
        let maze = Maze::generate(6, 5, Some(21));
        for (index, cell) in maze.cells().iter().enumerate() {
            let id = CellId(index as u16);
            if let Some(right) = cell.right {
                let in_tree = maze
                    .tree()
                    .iter()
                    .any(|e| (e.a == id && e.b == right) || (e.a == right && e.b == id));
                assert_eq!(cell.wall_right, !in_tree);
            }
            if let Some(bottom) = cell.bottom {
                let in_tree = maze
                    .tree()
                    .iter()
                    .any(|e| (e.a == id && e.b == bottom) || (e.a == bottom && e.b == id));
                assert_eq!(cell.wall_bottom, !in_tree);
            }
        }
    }

    #[test]
    fn neighbor_links_are_symmetric() {
        let maze = Maze::generate(5, 4, Some(1));
        for (index, cell) in maze.cells().iter().enumerate() {
            let id = CellId(index as u16);
            if let Some(right) = cell.right {
                assert_eq!(maze[right].left, Some(id));
            }
            if let Some(bottom) = cell.bottom {
                assert_eq!(maze[bottom].top, Some(id));
            }
            if let Some(left) = cell.left {
                assert_eq!(maze[left].right, Some(id));
            }
            if let Some(top) = cell.top {
                assert_eq!(maze[top].bottom, Some(id));
            }
        }
    }

    #[test]
    fn border_cells_have_no_outward_neighbors() {
        let maze = Maze::generate(3, 3, Some(0));
        let top_left = maze.entry().unwrap();
        assert_eq!(maze[top_left].left, None);
        assert_eq!(maze[top_left].top, None);
        let bottom_right = maze.goal().unwrap();
        assert_eq!(maze[bottom_right].right, None);
        assert_eq!(maze[bottom_right].bottom, None);
        // No outward passage anywhere on the border
        assert!(!maze.passage_toward(top_left, Direction::Left));
        assert!(!maze.passage_toward(top_left, Direction::Up));
        assert!(!maze.passage_toward(bottom_right, Direction::Right));
        assert!(!maze.passage_toward(bottom_right, Direction::Down));
    }

    #[test]
    fn zero_dimensions_yield_an_empty_maze() {
        for (width, height) in [(0, 0), (0, 5), (5, 0)] {
            let maze = Maze::generate(width, height, Some(0));
            assert!(maze.is_empty());
            assert!(maze.tree().is_empty());
            assert_eq!(maze.entry(), None);
            assert_eq!(maze.goal(), None);
        }
    }

    #[test]
    fn same_seed_reproduces_same_maze() {
        let first = Maze::generate(9, 6, Some(99));
        let second = Maze::generate(9, 6, Some(99));
        assert_eq!(first.tree(), second.tree());
    }

    #[test]
    fn wall_ownership_is_right_and_bottom_of_owner() {
        // Carve exactly one horizontal and one vertical passage and check
        // the asymmetric flag convention from every side.
        let mut maze = Maze::walled(2, 2);
        let top_left = maze.id_at(0, 0).unwrap();
        let top_right = maze.id_at(1, 0).unwrap();
        let bottom_left = maze.id_at(0, 1).unwrap();

        maze.carve(top_left, top_right);
        assert!(maze.passage_toward(top_left, Direction::Right));
        assert!(maze.passage_toward(top_right, Direction::Left));
        assert!(!maze.passage_toward(top_left, Direction::Down));
        assert!(!maze.passage_toward(top_right, Direction::Down));

        maze.carve(top_left, bottom_left);
        assert!(maze.passage_toward(top_left, Direction::Down));
        assert!(maze.passage_toward(bottom_left, Direction::Up));
        assert!(!maze.passage_toward(bottom_left, Direction::Right));

        // Outward directions at the border are never passages
        assert!(!maze.passage_toward(top_left, Direction::Left));
        assert!(!maze.passage_toward(top_left, Direction::Up));
    }
}
