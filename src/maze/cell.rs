/// Index of a cell in the maze's arena. Cells never move, so an id stays
/// valid for the lifetime of the maze that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(pub(crate) u16);

impl CellId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of an edge in the maze's spanning tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeId(pub(crate) u16);

impl EdgeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A cardinal movement direction on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// One grid position in the maze.
///
/// Neighbor ids are fixed at grid construction and symmetric (if `a.right`
/// is `b`, then `b.left` is `a`). A cell owns the wall to its right and the
/// wall below it; the flags start `true` (fully walled) and are cleared
/// exactly once, when the spanning tree is applied.
#[derive(Debug, Clone)]
pub struct Cell {
    pub col: u8,
    pub row: u8,
    pub left: Option<CellId>,
    pub right: Option<CellId>,
    pub top: Option<CellId>,
    pub bottom: Option<CellId>,
    /// Wall between this cell and its right neighbor.
    pub wall_right: bool,
    /// Wall between this cell and its bottom neighbor.
    pub wall_bottom: bool,
    /// Set when the player leaves this cell; drawn as the travel trail.
    pub visited: bool,
    /// Spanning-tree edges incident to this cell. This is the adjacency the
    /// search operates over: passages only, not all grid neighbors.
    pub passages: Vec<EdgeId>,
    /// Neighbor this cell was first reached from in the most recent search.
    pub prev: Option<CellId>,
}

impl Cell {
    pub(crate) fn new(col: u8, row: u8) -> Self {
        Cell {
            col,
            row,
            left: None,
            right: None,
            top: None,
            bottom: None,
            wall_right: true,
            wall_bottom: true,
            visited: false,
            passages: Vec::new(),
            prev: None,
        }
    }
}
