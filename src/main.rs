//! Terminal driver for the rust-2048 engine.
//!
//! Reads moves from stdin (`w/a/s/d` or `up/left/down/right`, `r` to
//! restart, `q` to quit) and draws the board after every move. The
//! slide animation is instantaneous, so each move completes as soon as
//! it starts.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --width 4 --height 4 --seed 7
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use rust_2048::core::{Direction, LevelConfig, LoseRule};
use rust_2048::grid::Board;
use rust_2048::machine::{Game, GameState, InputOutcome, Presenter};
use rust_2048::moves::MovePlan;
use rust_2048::tiles::{Tile, TileType};

#[derive(Parser)]
#[command(version, about = "Play a 2048-style sliding-merge puzzle in the terminal.")]
struct Cli {
    /// Level configuration file (TOML).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Grid width, overriding the configuration.
    #[arg(long)]
    width: Option<u32>,

    /// Grid height, overriding the configuration.
    #[arg(long)]
    height: Option<u32>,

    /// Winning tile value, overriding the configuration.
    #[arg(long)]
    win: Option<u32>,

    /// RNG seed; defaults to the current time.
    #[arg(long)]
    seed: Option<u64>,

    /// Lose rule: `last-free-cell` or `board-locked`.
    #[arg(long, value_name = "RULE")]
    lose_rule: Option<LoseRule>,
}

impl Cli {
    fn level_config(&self) -> Result<LevelConfig> {
        let mut config = match &self.config {
            Some(path) => LevelConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => LevelConfig::default(),
        };
        if self.width.is_some() || self.height.is_some() {
            let width = self.width.unwrap_or(config.width);
            let height = self.height.unwrap_or(config.height);
            config = config.with_size(width, height);
        }
        if let Some(win) = self.win {
            config = config.with_win_condition(win);
        }
        if let Some(rule) = self.lose_rule {
            config = config.with_lose_rule(rule);
        }
        config.validate().context("invalid level configuration")?;
        Ok(config)
    }
}

/// Prints move summaries and end-of-level banners.
#[derive(Default)]
struct TerminalPresenter {
    merges: usize,
    created: usize,
}

impl Presenter for TerminalPresenter {
    fn tile_created(&mut self, _tile: &Tile, _tile_type: &TileType) {
        self.created += 1;
    }

    fn animate_move(&mut self, plan: &MovePlan, _travel_time: Duration) {
        self.merges += plan.merges.len();
        if plan.is_noop() {
            println!("({} changes nothing)", plan.direction);
        }
    }

    fn state_changed(&mut self, _from: GameState, to: GameState) {
        match to {
            GameState::Win => println!("*** You win! ***"),
            GameState::Lose => println!("*** No room left. Game over. ***"),
            _ => {}
        }
    }
}

fn render(board: &Board) -> String {
    let cell_width = board
        .max_value()
        .map_or(1, |value| value.to_string().len())
        .max(4);
    let border = format!(
        "+{}",
        format!("{}+", "-".repeat(cell_width + 2)).repeat(board.width() as usize)
    );

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    for row in board.to_rows() {
        out.push('|');
        for value in row {
            let label = if value == 0 { ".".to_string() } else { value.to_string() };
            out.push_str(&format!(" {label:>cell_width$} |"));
        }
        out.push('\n');
        out.push_str(&border);
        out.push('\n');
    }
    out
}

enum Command {
    Move(Direction),
    Restart,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "q" | "quit" => Some(Command::Quit),
        "r" | "restart" => Some(Command::Restart),
        other => other.parse().ok().map(Command::Move),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = cli.level_config()?;
    let seed = match cli.seed {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock before epoch")?
            .as_secs(),
    };
    log::info!(
        "starting {}x{} level, win at {}, seed {}",
        config.width,
        config.height,
        config.win_condition,
        seed
    );

    let mut game = Game::seeded(config, seed)?;
    let mut presenter = TerminalPresenter::default();
    game.start(&mut presenter)?;
    print!("{}", render(game.board()));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("move (w/a/s/d, r, q)> ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };

        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::Restart) => {
                game.restart(&mut presenter)?;
            }
            Some(Command::Move(direction)) => {
                if let InputOutcome::Started(_) = game.handle_input(direction, &mut presenter)? {
                    game.complete_move(&mut presenter)?;
                } else {
                    println!("level is over; press r to restart or q to quit");
                    continue;
                }
            }
            None => {
                println!("unknown command '{}'", line.trim());
                continue;
            }
        }
        print!("{}", render(game.board()));
        if game.state() == GameState::WaitingInput && !game.board().has_available_move() {
            println!("no move can change the board");
        }
    }

    println!(
        "{} rounds, {} merges, {} tiles created",
        game.round(),
        presenter.merges,
        presenter.created
    );
    Ok(())
}
