// Round-robin interactive session for two or more players.
//
// This module orchestrates: building every player's board, cycling turns,
// parsing and validating commands from stdin, striking opponent boards, and
// announcing the winner when a strike defeats its target. All coordinate
// and player-name validation happens here; the core only ever sees
// in-range, well-typed input.

use std::io::{self, Write};

use anyhow::{ensure, Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use submarines_core::{Board, Level, StrikeOutcome, UnitRequest, NUM_LEVELS};

use crate::setup::build_board;
use crate::visualize::display_snapshot;

/// Everything a session needs up front.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub players: Vec<String>,
    pub arena: (usize, usize),
    pub fleet: Vec<UnitRequest>,
}

/// Run a fully interactive session. Blocks on stdin and prints progress to
/// stdout; returns once a player wins, a player quits, or input ends.
pub fn run_interactive<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<()> {
    ensure!(
        config.players.len() >= 2,
        "at least two players are required"
    );

    let mut boards: Vec<Board> = Vec::with_capacity(config.players.len());
    for player in &config.players {
        let board = build_board(player, config.arena, &config.fleet, rng)?;
        tracing::info!(player, board_id = %board.id(), "board ready");
        boards.push(board);
    }
    // Random turn order, independent of the roster order.
    boards.shuffle(rng);

    print_welcome(&config);

    let mut turn = 0usize;
    loop {
        let current = boards[turn % boards.len()].owner().to_string();
        let Some(line) = prompt(&current)? else {
            println!("\nQuitting game.");
            return Ok(());
        };
        let input = line.trim();

        if input == "quit" {
            println!("\nQuitting game.");
            return Ok(());
        }
        if input == "show" {
            display_snapshot(&current_board(&boards, &current).render_snapshot());
            continue;
        }
        if input == "dump" {
            let snapshot = current_board(&boards, &current).render_snapshot();
            let json = serde_json::to_string_pretty(&snapshot)
                .context("snapshot serialization failed")?;
            println!("{json}");
            continue;
        }

        let mut parts = input.split_whitespace();
        if parts.next() != Some("attack") {
            println!("Unknown command. Use \"attack <player> row,col,level\", \"show\", \"dump\" or \"quit\".");
            continue;
        }
        let Some(target_name) = parts.next() else {
            println!("Attack needs a target player name.");
            continue;
        };
        let Some(coords) = parts.next() else {
            println!("Coordinates must be in row,col,level format.");
            continue;
        };
        let Some(target_index) = boards.iter().position(|b| b.owner() == target_name) else {
            println!("Invalid target player name.");
            continue;
        };
        let Some((row, col, level)) = parse_coords(coords, config.arena) else {
            continue;
        };

        let report = match boards[target_index].strike(row, col, level) {
            Ok(report) => report,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        tracing::info!(
            attacker = %current,
            target = %target_name,
            row,
            col,
            %level,
            outcome = ?report.outcome,
            "strike resolved"
        );
        match report.outcome {
            StrikeOutcome::Miss => println!("Miss."),
            StrikeOutcome::Hit => println!("Hit!"),
            StrikeOutcome::Destroyed(id) => match boards[target_index].unit(id) {
                Some(unit) => println!("Destroyed {} {}!", unit.spec().name, unit.tag()),
                None => println!("Destroyed unit {id}!"),
            },
        }

        if report.defeated {
            println!("Game over. Player {current} is the winner.");
            return Ok(());
        }
        turn += 1;
    }
}

fn print_welcome(config: &GameConfig) {
    println!("Welcome to Submarines3D.");
    println!(
        " Battle arena size: {}x{}.",
        config.arena.0, config.arena.1
    );
    println!(" Battle units (name, amount):");
    for request in &config.fleet {
        println!("   {}: {}", request.spec.name, request.count);
    }
    println!(" Players: {}.", config.players.join(", "));
    println!(" Enter \"quit\" to exit game.");
    println!(" Enter \"show\" to see your board (\"dump\" for JSON).");
    println!(
        " Enter \"attack <player> row,col,level\" to strike <player> at those coordinates."
    );
}

/// Print the turn prompt and read one line. `None` means stdin closed.
fn prompt(player: &str) -> Result<Option<String>> {
    print!("Player {player}:  ");
    io::stdout().flush().ok();
    let mut line = String::new();
    let read = io::stdin()
        .read_line(&mut line)
        .context("failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn current_board<'a>(boards: &'a [Board], owner: &str) -> &'a Board {
    boards
        .iter()
        .find(|board| board.owner() == owner)
        .unwrap_or(&boards[0])
}

/// Parse and validate "row,col,level" against the arena. Prints a reason
/// and returns `None` on any malformed or out-of-range input, so the core
/// never sees an out-of-contract coordinate.
fn parse_coords(raw: &str, arena: (usize, usize)) -> Option<(usize, usize, Level)> {
    let fields: Vec<&str> = raw.split(',').collect();
    if fields.len() != 3 {
        println!("Coordinates must be in row,col,level format.");
        return None;
    }
    let parsed: Option<Vec<usize>> = fields
        .iter()
        .map(|field| field.trim().parse::<usize>().ok())
        .collect();
    let Some(values) = parsed else {
        println!("Coordinates must be three non-negative integers.");
        return None;
    };
    let (row, col, level_index) = (values[0], values[1], values[2]);
    if level_index >= NUM_LEVELS {
        println!("Invalid level. Levels are: 0, 1 or 2.");
        return None;
    }
    if row >= arena.0 || col >= arena.1 {
        println!(
            "Attack coordinates must be within the battle area {}x{}.",
            arena.0, arena.1
        );
        return None;
    }
    Level::from_index(level_index).map(|level| (row, col, level))
}
