use std::collections::VecDeque;
use std::time::Duration;

use crate::maze::{CellId, Direction, Maze};
use crate::search::{self, SearchOutcome, Strategy};

/// Cadence of the cooperative tick loop driven by the app.
pub const TICK_DURATION: Duration = Duration::from_millis(100);
/// Ticks per second of game time; must stay in step with [`TICK_DURATION`].
const TICKS_PER_SECOND: u32 = 10;

/// Input symbols the game consumes. Anything else the terminal produces is
/// dropped before it gets here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    SolveBfs,
    SolveDfs,
    Reset,
}

/// Where the current run stands. Reaching the goal wins; the countdown
/// hitting zero first loses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

/// One play session: the maze, the player, the countdown, and the state of
/// an in-flight solve visualization.
///
/// All state is owned here; a reset builds an entirely new maze rather than
/// mutating the old one in place, so nothing stale survives across runs.
pub struct Game {
    maze: Maze,
    player: Option<CellId>,
    status: Status,
    /// Countdown in ticks, seeded to `width * height` seconds.
    time_left: u32,
    time_budget: u32,
    /// Settled cells from the last search, drained one per tick.
    reveal: VecDeque<CellId>,
    /// Per-cell marks for cells already revealed by the drain.
    explored: Vec<bool>,
    /// Per-cell marks for cells highlighted by the solution walk.
    solution: Vec<bool>,
    /// Next cell of the back-pointer walk, once the reveal has drained.
    trace: Option<CellId>,
}

impl Game {
    /// Starts a session on a freshly generated maze. Pass a seed to pin the
    /// maze down in tests; `None` plays a random one.
    ///
    /// Degenerate dimensions (zero cells) start in [`Status::Won`]: there is
    /// nothing to solve and nothing to move through.
    pub fn new(width: u8, height: u8, seed: Option<u64>) -> Self {
        let maze = Maze::generate(width, height, seed);
        Game::on_maze(maze)
    }

    fn on_maze(maze: Maze) -> Self {
        let player = maze.entry();
        let status = match player {
            Some(at) if Some(at) != maze.goal() => Status::Playing,
            _ => Status::Won,
        };
        let time_budget =
            maze.width() as u32 * maze.height() as u32 * TICKS_PER_SECOND;
        let cell_count = maze.cell_count();
        Game {
            maze,
            player,
            status,
            time_left: time_budget,
            time_budget,
            reveal: VecDeque::new(),
            explored: vec![false; cell_count],
            solution: vec![false; cell_count],
            trace: None,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> Option<CellId> {
        self.player
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Whole seconds left on the countdown.
    pub fn remaining_seconds(&self) -> u32 {
        self.time_left / TICKS_PER_SECOND
    }

    /// Seconds the countdown started from.
    pub fn total_seconds(&self) -> u32 {
        self.time_budget / TICKS_PER_SECOND
    }

    pub fn is_explored(&self, id: CellId) -> bool {
        self.explored[id.index()]
    }

    pub fn is_on_solution(&self, id: CellId) -> bool {
        self.solution[id.index()]
    }

    /// Dispatches one input symbol. Unknown or currently-illegal inputs are
    /// no-ops, never errors.
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Move(direction) => self.apply_move(direction),
            Command::SolveBfs => self.start_search(Strategy::BreadthFirst),
            Command::SolveDfs => self.start_search(Strategy::DepthFirst),
            Command::Reset => self.reset(),
        }
    }

    /// True when a neighbor exists in that direction and the wall between
    /// is absent.
    pub fn is_valid_move(&self, direction: Direction) -> bool {
        self.player
            .is_some_and(|at| self.maze.passage_toward(at, direction))
    }

    /// Moves the player if the move is legal and the run is still live,
    /// marking the vacated cell as traveled. Anything else is a no-op.
    pub fn apply_move(&mut self, direction: Direction) {
        if self.status != Status::Playing || !self.is_valid_move(direction) {
            return;
        }
        let Some(at) = self.player else { return };
        let Some(next) = self.maze.neighbor(at, direction) else {
            return;
        };

        self.maze.cell_mut(at).visited = true;
        self.player = Some(next);
        tracing::debug!("[game] player moved {:?} to {:?}", direction, next);

        if Some(next) == self.maze.goal() {
            tracing::info!("[game] goal reached with {}s left", self.remaining_seconds());
            self.status = Status::Won;
        }
    }

    /// Runs a full search from the maze entry to the goal and queues its
    /// settled list for the tick-by-tick reveal. Replaces any visualization
    /// already in flight.
    fn start_search(&mut self, strategy: Strategy) {
        let (Some(source), Some(target)) = (self.maze.entry(), self.maze.goal()) else {
            return;
        };

        let SearchOutcome { settled, found } =
            search::search(&mut self.maze, strategy, source, target);
        tracing::info!(
            "[game] {} settled {} cells (path found: {})",
            strategy,
            settled.len(),
            found
        );

        self.explored.fill(false);
        self.solution.fill(false);
        self.trace = None;

        if found {
            // The search never expands the target, so its back-pointer is
            // still unset; aim it at a settled passage neighbor before the
            // walk starts. Settled cells always chain back to the source.
            let settled_mark = {
                let mut mark = vec![false; self.maze.cell_count()];
                for id in &settled {
                    mark[id.index()] = true;
                }
                mark
            };
            let bridge = self
                .maze
                .passage_neighbors(target)
                .find(|id| settled_mark[id.index()]);
            self.maze.cell_mut(target).prev = bridge;
            self.trace = Some(target);
        }

        self.reveal = settled.into();
    }

    /// Throws the whole session away and starts over on a new maze drawn
    /// from fresh randomness.
    pub fn reset(&mut self) {
        tracing::info!("[game] reset requested, regenerating maze");
        *self = Game::on_maze(Maze::generate(self.maze.width(), self.maze.height(), None));
    }

    /// Advances one tick: the countdown while the run is live, then one
    /// step of the solve visualization: first the exploration reveal, then
    /// the back-pointer walk from the goal.
    pub fn tick(&mut self) {
        if self.status == Status::Playing {
            self.time_left = self.time_left.saturating_sub(1);
            if self.time_left == 0 {
                tracing::info!("[game] countdown expired");
                self.status = Status::Lost;
            }
        }

        if let Some(id) = self.reveal.pop_front() {
            self.explored[id.index()] = true;
        } else if let Some(id) = self.trace {
            self.solution[id.index()] = true;
            self.trace = self.maze[id].prev;
        }
    }
}
