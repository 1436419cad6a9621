use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::chess::{Bitboard, File, Game, Rank, Square};
use std::fmt::Write as _;
use std::io::{self, BufRead, Write as _};
use tracing::{info, instrument, warn};

/// An interactive match of chess on the console.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// Do not highlight the selected piece's possible moves.
    #[clap(short, long)]
    plain: bool,
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut game = Game::default();
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            println!("{}", render(&game, Bitboard::empty())?);

            let captured: Vec<_> = game.captured().map(|p| p.to_string()).collect();
            if !captured.is_empty() {
                println!("captured: {}", captured.join(" "));
            }

            if game.is_checkmate() {
                println!("checkmate, {} wins", !game.side_to_move());
                return Ok(());
            } else if game.is_check() {
                println!("check");
            }

            println!("turn {}, {} to move", game.turn(), game.side_to_move());

            let Some(whence) = prompt(&mut lines, "source")? else {
                return Ok(());
            };

            let whence: Square = match whence.parse() {
                Ok(sq) => sq,
                Err(e) => {
                    warn!("{e}");
                    continue;
                }
            };

            let moves = match game.moves(whence) {
                Ok(moves) => moves,
                Err(e) => {
                    warn!("{e}");
                    continue;
                }
            };

            if !self.plain {
                println!("{}", render(&game, moves)?);
            }

            let Some(whither) = prompt(&mut lines, "target")? else {
                return Ok(());
            };

            let whither: Square = match whither.parse() {
                Ok(sq) => sq,
                Err(e) => {
                    warn!("{e}");
                    continue;
                }
            };

            match game.play(whence, whither) {
                Ok(None) => {}
                Ok(Some(piece)) => info!(%piece, "captured"),
                Err(e) => warn!("{e}"),
            }
        }
    }
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    what: &str,
) -> Result<Option<String>, Anyhow> {
    print!("{what}: ");
    io::stdout().flush()?;
    match lines.next() {
        None => Ok(None),
        Some(line) => {
            let line = line.context("failed to read from the console")?;
            Ok(Some(line.trim().to_string()))
        }
    }
}

/// Renders the board with the eighth rank at the top, marking highlighted
/// squares in reverse video.
fn render(game: &Game, highlights: Bitboard) -> Result<String, Anyhow> {
    let mut out = String::new();
    for rank in Rank::iter().rev() {
        write!(out, "{} ", rank)?;
        for file in File::iter() {
            let sq = Square::new(file, rank);
            let cell = match game[sq] {
                Some(piece) => piece.to_string(),
                None => ".".to_string(),
            };

            if highlights.contains(sq) {
                write!(out, "\x1b[7m{}\x1b[0m ", cell)?;
            } else {
                write!(out, "{} ", cell)?;
            }
        }

        out.push('\n');
    }

    out.push_str(" ");
    for file in File::iter() {
        write!(out, " {}", file)?;
    }

    Ok(out)
}
