mod renderer;

use std::io::{Stdout, Write};
use std::time::Instant;

use crossterm::{
    QueueableCommand, cursor,
    event::{self, KeyCode},
    execute, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::game::{Command, Game, TICK_DURATION};
use crate::maze::Direction;
use renderer::{NUM_STATUS_ROWS, Renderer};

/// Set a panic hook to restore terminal state on panic
/// This ensures that the terminal is not left in raw mode or alternate
/// screen even if the panic occurs mid-frame
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

/// Setup terminal in raw mode and enter alternate screen
/// Also sets a panic hook to restore terminal on panic
pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    set_panic_hook();
    queue!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    stdout.flush()?;
    Ok(())
}

/// Restore terminal to original state
/// Leave alternate screen and disable raw mode
pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
    stdout.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// Entry point of the game: prompt for dimensions, show the controls, then
/// hand the session to the tick loop.
pub fn run(stdout: &mut Stdout) -> std::io::Result<()> {
    let Some((width, height)) = ask_maze_dimensions(stdout)? else {
        return Ok(());
    };

    queue!(
        stdout,
        style::PrintStyledContent(
            "Race the clock to the red corner!\r\n"
                .with(Color::Yellow)
                .attribute(Attribute::Bold)
        ),
        style::PrintStyledContent(
            "Controls:\r\n"
                .with(Color::Yellow)
                .attribute(Attribute::Bold)
        ),
        style::PrintStyledContent("  ←/→/↑/↓: Move through the maze\r\n".with(Color::Cyan)),
        style::PrintStyledContent("  b: Watch breadth-first search solve it\r\n".with(Color::Cyan)),
        style::PrintStyledContent("  d: Watch depth-first search solve it\r\n".with(Color::Cyan)),
        style::PrintStyledContent("  r: Start over on a new maze\r\n".with(Color::Cyan)),
        style::PrintStyledContent("  Esc: Exit\r\n\r\n".with(Color::Cyan)),
        style::PrintStyledContent(
            "Press Enter to start, or Esc to exit.\r\n".with(Color::Blue)
        ),
    )?;
    stdout.flush()?;
    if !wait_for_enter()? {
        return Ok(());
    }

    tracing::info!("[app] starting game with maze size {}x{}", width, height);
    execute!(stdout, terminal::Clear(ClearType::All), cursor::Hide)?;

    let mut game = Game::new(width, height, None);
    let renderer = Renderer::new(width, height);
    renderer.draw(stdout, &game)?;

    game_loop(stdout, &renderer, &mut game)?;
    tracing::info!("[app] game exited");
    Ok(())
}

/// The cooperative loop: one tick per [`TICK_DURATION`], key events handled
/// strictly between ticks. Input dispatch and the tick advance never
/// overlap; generation and search complete inside the callback that asked
/// for them.
fn game_loop(stdout: &mut Stdout, renderer: &Renderer, game: &mut Game) -> std::io::Result<()> {
    let mut next_tick = Instant::now() + TICK_DURATION;
    loop {
        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                event::Event::Key(key_event) if key_event.kind == event::KeyEventKind::Press => {
                    if key_event.code == KeyCode::Esc {
                        tracing::info!("[app] Esc pressed, leaving the game");
                        return Ok(());
                    }
                    if let Some(command) = command_for(key_event.code) {
                        game.handle(command);
                        renderer.draw(stdout, game)?;
                    }
                }
                event::Event::Resize(_, _) => {
                    // Repaint from scratch at the new size
                    execute!(stdout, terminal::Clear(ClearType::All))?;
                    renderer.draw(stdout, game)?;
                }
                _ => {} // Ignore other events
            }
        }

        if Instant::now() >= next_tick {
            game.tick();
            renderer.draw(stdout, game)?;
            next_tick += TICK_DURATION;
        }
    }
}

/// Maps a key to a game command. Unmapped keys are dropped here, before the
/// game ever sees them.
fn command_for(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Left => Some(Command::Move(Direction::Left)),
        KeyCode::Right => Some(Command::Move(Direction::Right)),
        KeyCode::Up => Some(Command::Move(Direction::Up)),
        KeyCode::Down => Some(Command::Move(Direction::Down)),
        KeyCode::Char('b') => Some(Command::SolveBfs),
        KeyCode::Char('d') => Some(Command::SolveDfs),
        KeyCode::Char('r') => Some(Command::Reset),
        _ => None,
    }
}

/// Block until Enter (true) or Esc (false) is pressed.
fn wait_for_enter() -> std::io::Result<bool> {
    loop {
        if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()?
            && kind == event::KeyEventKind::Press
        {
            match code {
                KeyCode::Enter => return Ok(true),
                KeyCode::Esc => return Ok(false),
                _ => {}
            }
        }
    }
}

/// Calculate the largest maze dimension that fits in `term_size` terminal
/// cells, given that n maze cells render as 2n + 1 tiles of `tile_size`
/// characters each. At least 1 so a degenerate terminal still gets a maze.
fn max_maze_dim(term_size: u16, tile_size: u16) -> u8 {
    let tiles = term_size / tile_size;
    (tiles.saturating_sub(1) / 2).clamp(1, u8::MAX as u16) as u8
}

/// Ask user for maze dimensions (width and height between 1 and 255)
/// Returns None if user cancels input with Esc
/// Returns Some((width, height)) if user inputs valid dimensions
fn ask_maze_dimensions(stdout: &mut Stdout) -> std::io::Result<Option<(u8, u8)>> {
    stdout.queue(style::PrintStyledContent(
        "Enter maze dimensions (width and height between 1 and 255), or press Esc to exit. \
Empty input uses the largest maze the terminal fits.\r\n"
            .with(Color::Blue),
    ))?;
    stdout.flush()?;

    let validate = |input: &str, is_width: bool| {
        let max_size = if let Ok((term_width, term_height)) = terminal::size() {
            if is_width {
                max_maze_dim(term_width, renderer::Tile::CELL_WIDTH)
            } else {
                max_maze_dim(term_height.saturating_sub(NUM_STATUS_ROWS), 1)
            }
        } else {
            // Fallback to max size if terminal size cannot be determined
            u8::MAX
        };

        if input.trim().is_empty() {
            return Ok(max_size);
        }

        let error_msg = format!("Please enter a valid number between 1 and {}.", max_size);
        input
            .parse::<u8>()
            .map_err(|_| error_msg.clone())
            .and_then(|n| match n {
                1..=255 if n <= max_size => Ok(n),
                _ => Err(error_msg),
            })
    };

    let width = match prompt_with_validation(stdout, "Width: ", |s| validate(s, true))? {
        Some(w) => w,
        None => return Ok(None),
    };
    stdout.queue(style::PrintStyledContent(
        format!("Width set to {}\r\n", width)
            .with(Color::Green)
            .attribute(Attribute::Bold),
    ))?;

    let height = match prompt_with_validation(stdout, "Height: ", |s| validate(s, false))? {
        Some(h) => h,
        None => return Ok(None),
    };
    stdout.queue(style::PrintStyledContent(
        format!("Height set to {}\r\n", height)
            .with(Color::Green)
            .attribute(Attribute::Bold),
    ))?;
    stdout.flush()?;

    Ok(Some((width, height)))
}

/// Get user input with real-time validation and feedback
/// Returns None if user cancels input with Esc
/// Returns Some(T) if user inputs a valid input and presses Enter, where T
/// is the validated type
fn prompt_with_validation<F, T>(
    stdout: &mut Stdout,
    prompt: &str,
    validate: F,
) -> std::io::Result<Option<T>>
where
    F: Fn(&str) -> Result<T, String>,
{
    // Save cursor position so we can restore / redraw
    queue!(stdout, cursor::Hide, cursor::SavePosition)?;
    stdout.flush()?;

    let mut input = String::new();

    let value_option = loop {
        // Re-render prompt line
        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown)
        )?;

        stdout.queue(style::PrintStyledContent(
            prompt.with(Color::Cyan).attribute(Attribute::Bold),
        ))?;

        // Decide color based on validity
        let validation_result = validate(input.trim());
        match validation_result {
            Ok(_) => {
                stdout.queue(style::SetForegroundColor(Color::Green))?;
            }
            Err(_) => {
                stdout.queue(style::SetForegroundColor(Color::Red))?;
            }
        }

        queue!(stdout, style::Print(&input), style::ResetColor)?;
        stdout.queue(style::Print(" \r\n"))?;

        // Error message line (if any)
        if let Err(msg) = validation_result {
            stdout.queue(style::PrintStyledContent(
                msg.with(Color::DarkGrey).attribute(Attribute::Dim),
            ))?;
        }

        stdout.flush()?;

        // Wait for key event
        if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
            match code {
                KeyCode::Enter => {
                    match validate(input.trim()) {
                        Ok(n) => break Some(n), // valid input, exit loop
                        Err(_) => continue,     // invalid, re-render
                    }
                }
                KeyCode::Char(c) if kind == event::KeyEventKind::Press => {
                    if !c.is_whitespace() && !c.is_control() {
                        input.push(c);
                    }
                }
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Esc => {
                    // User cancelled input
                    break None;
                }
                _ => {}
            }
        }
    };
    // Cleanup
    queue!(
        stdout,
        cursor::RestorePosition,
        terminal::Clear(ClearType::FromCursorDown),
        cursor::Show
    )?;
    stdout.flush()?;

    Ok(value_option)
}
