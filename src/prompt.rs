//! Line-oriented review loop for terminals.
//!
//! One command per line, mirroring the keyboard bindings of a graphical
//! reviewer: Enter accepts, `r` rejects, `n`/`p` step through instances,
//! `q` finishes early (exporting what was rejected so far) and `x` walks
//! away without exporting. Reaching the end of the instances finishes the
//! review on its own; so does end of input.

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::ReviewError;
use crate::review::ReviewSession;

pub const HELP: &str = "\
Commands:
  <enter>, a   accept and move on
  r            reject and move on
  n            next instance (no decision)
  p            previous instance
  q            finish now and export rejections
  x            abandon without exporting
  ?            show this help";

/// A reviewer command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Accept,
    Reject,
    Next,
    Previous,
    Finish,
    Abandon,
    Help,
}

impl FromStr for Command {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "a" | "accept" => Ok(Command::Accept),
            "r" | "reject" => Ok(Command::Reject),
            "n" | "next" | "right" | "down" => Ok(Command::Next),
            "p" | "prev" | "previous" | "left" | "up" => Ok(Command::Previous),
            "q" | "quit" | "finish" => Ok(Command::Finish),
            "x" | "abandon" => Ok(Command::Abandon),
            "?" | "h" | "help" => Ok(Command::Help),
            other => Err(ReviewError::UnknownCommand(other.to_string())),
        }
    }
}

/// How the loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopExit {
    /// Every instance was visited.
    Exhausted,
    /// The reviewer asked to finish (or input ended) before the end.
    Finished,
    /// The reviewer asked to discard the session.
    Abandoned,
}

/// Drives `session` from `input` until it is exhausted or the reviewer stops.
pub fn run_review_loop<R: BufRead, W: Write>(
    session: &mut ReviewSession,
    input: R,
    out: &mut W,
) -> Result<LoopExit, ReviewError> {
    let mut lines = input.lines();

    while !session.is_exhausted() {
        let instance = session.current_instance()?;
        writeln!(out, "{}", session.progress())?;
        writeln!(out, "  crop: {}", instance.crop_path.display())?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            return Ok(LoopExit::Finished);
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{}", err)?;
                continue;
            }
        };

        match command {
            Command::Accept => session.accept()?,
            Command::Reject => session.reject()?,
            Command::Next => session.advance()?,
            Command::Previous => session.retreat()?,
            Command::Finish => return Ok(LoopExit::Finished),
            Command::Abandon => return Ok(LoopExit::Abandoned),
            Command::Help => writeln!(out, "{}", HELP)?,
        }
    }

    Ok(LoopExit::Exhausted)
}
