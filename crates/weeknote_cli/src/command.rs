//! Line command parsing for the terminal front end.
//!
//! Note positions are 1-based, matching the numbering in the summary view.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use weeknote_core::{parse_date, WeekKeyError};

/// One user action typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Commit draft text as a note.
    Add(String),
    /// Delete the note at a 1-based position.
    Remove(usize),
    /// Drag the note at `from` and drop it at `to` (both 1-based).
    Move { from: usize, to: usize },
    PreviousWeek,
    NextWeek,
    Today,
    GoTo(NaiveDate),
    /// Switch to summary mode.
    Summary,
    /// Switch back to capture mode.
    Back,
    /// Print the summary text alone, as a clipboard sink would receive it.
    Copy,
    List,
    Help,
    Quit,
}

/// Parse failures shown back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    MissingArgument(&'static str),
    InvalidPosition(String),
    InvalidDate(WeekKeyError),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(word) => write!(f, "unknown command `{word}`; type `help`"),
            Self::MissingArgument(usage) => write!(f, "missing argument; usage: {usage}"),
            Self::InvalidPosition(raw) => {
                write!(f, "invalid position `{raw}`; expected a number from 1")
            }
            Self::InvalidDate(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDate(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WeekKeyError> for CommandError {
    fn from(value: WeekKeyError) -> Self {
        Self::InvalidDate(value)
    }
}

pub const HELP_TEXT: &str = "\
commands:
  add <text>      capture a note in the selected week
  rm <n>          delete note n
  mv <from> <to>  move note to a new position
  prev | next     select the previous/next week
  today           select the current week
  goto <date>     select the week of YYYY-MM-DD
  summary         show the weekly summary
  back            return to capture mode
  copy            print summary text only
  list            redraw the current view
  help            show this help
  quit            exit";

/// Parses one input line. Blank lines redraw the view.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed.trim_end(), ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" | "list" | "ls" => Ok(Command::List),
        // Draft text is committed verbatim; the store decides emptiness.
        "add" | "a" => Ok(Command::Add(rest.to_string())),
        "rm" | "del" => {
            let position = single_arg(rest, "rm <n>")?;
            Ok(Command::Remove(parse_position(position)?))
        }
        "mv" | "move" => {
            let mut args = rest.split_whitespace();
            let (Some(from), Some(to)) = (args.next(), args.next()) else {
                return Err(CommandError::MissingArgument("mv <from> <to>"));
            };
            Ok(Command::Move {
                from: parse_position(from)?,
                to: parse_position(to)?,
            })
        }
        "prev" | "p" => Ok(Command::PreviousWeek),
        "next" | "n" => Ok(Command::NextWeek),
        "today" => Ok(Command::Today),
        "goto" => {
            let raw = single_arg(rest, "goto <YYYY-MM-DD>")?;
            Ok(Command::GoTo(parse_date(raw)?))
        }
        "summary" | "s" => Ok(Command::Summary),
        "back" | "b" => Ok(Command::Back),
        "copy" => Ok(Command::Copy),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn single_arg<'a>(rest: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    rest.split_whitespace()
        .next()
        .ok_or(CommandError::MissingArgument(usage))
}

fn parse_position(raw: &str) -> Result<usize, CommandError> {
    match raw.parse::<usize>() {
        Ok(position) if position >= 1 => Ok(position),
        _ => Err(CommandError::InvalidPosition(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_command, Command, CommandError};
    use chrono::NaiveDate;
    use weeknote_core::WeekKeyError;

    #[test]
    fn add_keeps_text_after_first_separator() {
        assert_eq!(
            parse_command("add  Call Alice tomorrow").unwrap(),
            Command::Add(" Call Alice tomorrow".to_string())
        );
        assert_eq!(parse_command("add").unwrap(), Command::Add(String::new()));
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(parse_command("rm 2").unwrap(), Command::Remove(2));
        assert_eq!(
            parse_command("mv 3 1").unwrap(),
            Command::Move { from: 3, to: 1 }
        );
        assert_eq!(
            parse_command("rm 0").unwrap_err(),
            CommandError::InvalidPosition("0".to_string())
        );
        assert!(matches!(
            parse_command("mv 1").unwrap_err(),
            CommandError::MissingArgument(_)
        ));
    }

    #[test]
    fn goto_parses_date() {
        assert_eq!(
            parse_command("goto 2024-03-12").unwrap(),
            Command::GoTo(NaiveDate::from_ymd_opt(2024, 3, 12).unwrap())
        );
        assert!(matches!(
            parse_command("goto tomorrow").unwrap_err(),
            CommandError::InvalidDate(_)
        ));
        assert!(matches!(
            parse_command("goto +262142-12-30").unwrap_err(),
            CommandError::InvalidDate(WeekKeyError::OutOfRange(_))
        ));
    }

    #[test]
    fn blank_line_redraws_and_unknown_words_fail() {
        assert_eq!(parse_command("   ").unwrap(), Command::List);
        assert_eq!(parse_command("NEXT").unwrap(), Command::NextWeek);
        assert_eq!(
            parse_command("fly").unwrap_err(),
            CommandError::Unknown("fly".to_string())
        );
    }
}
