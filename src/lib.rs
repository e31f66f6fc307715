//! A terminal maze game: a perfect maze is carved with randomized Kruskal,
//! the player races a countdown to the far corner, and BFS/DFS can be asked
//! to explore the maze and highlight a solution path.

pub mod app;
pub mod game;
pub mod maze;
pub mod search;
