use std::fmt;
use std::io::{Stdout, Write};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::game::{Game, Status};
use crate::maze::CellId;

/// One glyph slot of the composed frame. Cell slots and wall slots both
/// render as a fixed-width tile so the maze lines up as a block grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Tile {
    Wall,
    Blank,
    Start,
    Goal,
    Player,
    /// Cell the player has traveled through.
    Trail,
    /// Cell revealed by the exploration animation.
    Explored,
    /// Cell on the highlighted solution path.
    Solution,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;

    fn glyph(self) -> &'static str {
        match self {
            Tile::Blank => "  ",
            _ => "██",
        }
    }

    fn color(self) -> Color {
        match self {
            Tile::Wall => Color::DarkGrey,
            Tile::Blank => Color::Reset,
            Tile::Start => Color::Green,
            Tile::Goal => Color::Red,
            Tile::Player => Color::Cyan,
            Tile::Trail => Color::Blue,
            Tile::Explored => Color::Yellow,
            Tile::Solution => Color::Magenta,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = self.glyph().with(self.color());

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::CELL_WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Paints the whole scene every tick: the wall grid, the player, the solve
/// animation, and the timer/status rows below the maze.
pub struct Renderer {
    /// Frame dimensions in tiles: walls interleave cells, so an n-cell
    /// dimension needs 2n + 1 tiles.
    frame_width: u16,
    frame_height: u16,
}

/// Rows reserved under the maze for the timer and the run status.
pub const NUM_STATUS_ROWS: u16 = 2;

impl Renderer {
    pub fn new(maze_width: u8, maze_height: u8) -> Self {
        Renderer {
            frame_width: maze_width as u16 * 2 + 1,
            frame_height: maze_height as u16 * 2 + 1,
        }
    }

    /// Queues a full frame and flushes it.
    pub fn draw(&self, stdout: &mut Stdout, game: &Game) -> std::io::Result<()> {
        for frame_y in 0..self.frame_height {
            stdout.queue(cursor::MoveTo(0, frame_y))?;
            for frame_x in 0..self.frame_width {
                stdout.queue(style::Print(self.tile_at(game, frame_x, frame_y)))?;
            }
        }
        self.draw_status(stdout, game)?;
        stdout.flush()
    }

    /// Maps a frame coordinate to a tile. Odd/odd positions are cells,
    /// even/odd and odd/even positions are wall slots, even/even positions
    /// are junctions (always walls, like the outer border).
    fn tile_at(&self, game: &Game, frame_x: u16, frame_y: u16) -> Tile {
        let maze = game.maze();
        match (frame_x % 2 == 0, frame_y % 2 == 0) {
            (true, true) => Tile::Wall,
            (false, true) => {
                // Wall slot below the cell one row up
                if frame_y == 0 {
                    return Tile::Wall;
                }
                let col = (frame_x / 2) as u8;
                let row = (frame_y / 2 - 1) as u8;
                match maze.id_at(col, row) {
                    Some(id) if !maze[id].wall_bottom => Tile::Blank,
                    _ => Tile::Wall,
                }
            }
            (true, false) => {
                // Wall slot right of the cell one column left
                if frame_x == 0 {
                    return Tile::Wall;
                }
                let col = (frame_x / 2 - 1) as u8;
                let row = (frame_y / 2) as u8;
                match maze.id_at(col, row) {
                    Some(id) if !maze[id].wall_right => Tile::Blank,
                    _ => Tile::Wall,
                }
            }
            (false, false) => {
                let col = (frame_x / 2) as u8;
                let row = (frame_y / 2) as u8;
                match maze.id_at(col, row) {
                    Some(id) => self.cell_tile(game, id),
                    None => Tile::Blank,
                }
            }
        }
    }

    fn cell_tile(&self, game: &Game, id: CellId) -> Tile {
        let maze = game.maze();
        if game.player() == Some(id) {
            Tile::Player
        } else if maze.goal() == Some(id) {
            Tile::Goal
        } else if game.is_on_solution(id) {
            Tile::Solution
        } else if game.is_explored(id) {
            Tile::Explored
        } else if maze[id].visited {
            Tile::Trail
        } else if maze.entry() == Some(id) {
            Tile::Start
        } else {
            Tile::Blank
        }
    }

    /// Timer and run status on the rows below the maze. The timer color
    /// drains from green through yellow to red as the countdown runs down.
    fn draw_status(&self, stdout: &mut Stdout, game: &Game) -> std::io::Result<()> {
        let remaining = game.remaining_seconds();
        let total = game.total_seconds().max(1);

        let timer_text = format!("TIME: {remaining}");
        let timer = if remaining <= total / 4 {
            timer_text.with(Color::Red).attribute(Attribute::Bold)
        } else if remaining <= total / 2 {
            timer_text.with(Color::Yellow).attribute(Attribute::Bold)
        } else {
            timer_text.with(Color::Green).attribute(Attribute::Bold)
        };
        queue!(
            stdout,
            cursor::MoveTo(0, self.frame_height),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(timer)
        )?;

        let message = match game.status() {
            Status::Playing => None,
            Status::Won => Some("YOU WON :O  (r: new maze, Esc: quit)".with(Color::Green)),
            Status::Lost => Some("YOU LOSE :)  (r: new maze, Esc: quit)".with(Color::Red)),
        };
        queue!(
            stdout,
            cursor::MoveTo(0, self.frame_height + 1),
            terminal::Clear(ClearType::CurrentLine)
        )?;
        if let Some(message) = message {
            stdout.queue(style::PrintStyledContent(message.attribute(Attribute::Bold)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicode_width::UnicodeWidthStr;

    #[test]
    fn tiles_are_two_columns_wide() {
        for tile in [
            Tile::Wall,
            Tile::Blank,
            Tile::Start,
            Tile::Goal,
            Tile::Player,
            Tile::Trail,
            Tile::Explored,
            Tile::Solution,
        ] {
            assert_eq!(tile.glyph().width(), Tile::CELL_WIDTH as usize);
        }
    }

    #[test]
    fn frame_composition_tracks_walls_and_border() {
        let game = Game::new(2, 2, Some(5));
        let renderer = Renderer::new(2, 2);

        // The whole outer border is wall tiles
        for frame_x in 0..5 {
            assert_eq!(renderer.tile_at(&game, frame_x, 0), Tile::Wall);
            assert_eq!(renderer.tile_at(&game, frame_x, 4), Tile::Wall);
        }
        for frame_y in 0..5 {
            assert_eq!(renderer.tile_at(&game, 0, frame_y), Tile::Wall);
            assert_eq!(renderer.tile_at(&game, 4, frame_y), Tile::Wall);
        }

        // Player sits on the entry cell
        assert_eq!(renderer.tile_at(&game, 1, 1), Tile::Player);
        // Goal is bottom-right
        assert_eq!(renderer.tile_at(&game, 3, 3), Tile::Goal);

        // A 2x2 spanning tree has 3 edges, so exactly one of the four
        // interior wall slots is still a wall.
        let interior = [(2, 1), (1, 2), (3, 2), (2, 3)];
        let walls = interior
            .iter()
            .filter(|&&(x, y)| renderer.tile_at(&game, x, y) == Tile::Wall)
            .count();
        assert_eq!(walls, 1);
    }
}
