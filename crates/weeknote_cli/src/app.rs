//! Interactive loop driving one capture session from line input.

use crate::command::{parse_command, Command, HELP_TEXT};
use crate::render::render;
use chrono::Local;
use log::warn;
use std::io::{self, BufRead, Write};
use weeknote_core::CaptureSession;

/// What the loop should do after applying a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print a message, then redraw the view.
    Redraw(Option<String>),
    /// Print text verbatim without redrawing.
    Print(String),
    Quit,
}

/// Applies one command to the session.
pub fn apply(session: &mut CaptureSession, command: Command) -> Outcome {
    match command {
        Command::Add(text) => match session.commit_draft(text) {
            Ok(Some(_)) => Outcome::Redraw(None),
            Ok(None) => Outcome::Redraw(Some("Empty note ignored.".to_string())),
            Err(err) => {
                warn!("event=cli_add module=cli status=error error={err}");
                Outcome::Redraw(Some(format!("add failed: {err}")))
            }
        },
        Command::Remove(position) => match note_at(session, position) {
            Some(id) => {
                session.delete(id);
                Outcome::Redraw(None)
            }
            None => Outcome::Redraw(Some(format!("No note at position {position}."))),
        },
        Command::Move { from, to } => match note_at(session, from) {
            Some(id) => {
                session.begin_drag(id);
                session.drag_over(to.saturating_sub(1));
                session.drop_drag();
                Outcome::Redraw(None)
            }
            None => Outcome::Redraw(Some(format!("No note at position {from}."))),
        },
        Command::PreviousWeek => {
            session.previous_week();
            Outcome::Redraw(None)
        }
        Command::NextWeek => {
            session.next_week();
            Outcome::Redraw(None)
        }
        Command::Today => {
            session.go_to(Local::now().date_naive());
            Outcome::Redraw(None)
        }
        Command::GoTo(date) => {
            session.go_to(date);
            Outcome::Redraw(None)
        }
        Command::Summary => {
            session.open_summary();
            Outcome::Redraw(None)
        }
        Command::Back => {
            session.close_summary();
            Outcome::Redraw(None)
        }
        Command::Copy => Outcome::Print(session.clipboard_text()),
        Command::List => Outcome::Redraw(None),
        Command::Help => Outcome::Print(HELP_TEXT.to_string()),
        Command::Quit => Outcome::Quit,
    }
}

/// Reads commands until EOF or `quit`, rendering after each one.
pub fn run<I: BufRead, O: Write>(
    session: &mut CaptureSession,
    input: I,
    output: &mut O,
) -> io::Result<()> {
    writeln!(output, "{}", render(&session.snapshot()))?;
    for line in input.lines() {
        let line = line?;
        let outcome = match parse_command(&line) {
            Ok(command) => apply(session, command),
            Err(err) => Outcome::Print(err.to_string()),
        };
        match outcome {
            Outcome::Quit => break,
            Outcome::Print(text) => writeln!(output, "{text}")?,
            Outcome::Redraw(message) => {
                if let Some(message) = message {
                    writeln!(output, "{message}")?;
                }
                writeln!(output, "{}", render(&session.snapshot()))?;
            }
        }
        output.flush()?;
    }
    Ok(())
}

fn note_at(session: &CaptureSession, position: usize) -> Option<weeknote_core::NoteId> {
    session
        .notes()
        .get(position.checked_sub(1)?)
        .map(|note| note.id)
}

#[cfg(test)]
mod tests {
    use super::{apply, run, Outcome};
    use crate::command::Command;
    use chrono::NaiveDate;
    use weeknote_core::{CaptureSession, ViewMode};

    fn session() -> CaptureSession {
        CaptureSession::new(NaiveDate::from_ymd_opt(2024, 3, 12).unwrap())
    }

    fn contents(session: &CaptureSession) -> Vec<String> {
        session.notes().into_iter().map(|n| n.content).collect()
    }

    #[test]
    fn move_reorders_through_drag_gesture() {
        let mut session = session();
        for text in ["a", "b", "c"] {
            apply(&mut session, Command::Add(text.to_string()));
        }
        apply(&mut session, Command::Move { from: 1, to: 3 });
        assert_eq!(contents(&session), vec!["b", "c", "a"]);
        assert!(session.drag().is_none());
    }

    #[test]
    fn remove_out_of_range_reports_message() {
        let mut session = session();
        let outcome = apply(&mut session, Command::Remove(4));
        assert_eq!(
            outcome,
            Outcome::Redraw(Some("No note at position 4.".to_string()))
        );
    }

    #[test]
    fn copy_prints_summary_verbatim() {
        let mut session = session();
        apply(&mut session, Command::Add("Buy milk".to_string()));
        apply(&mut session, Command::Add("Call Alice".to_string()));
        apply(&mut session, Command::Remove(1));
        assert_eq!(
            apply(&mut session, Command::Copy),
            Outcome::Print("1. Call Alice".to_string())
        );
    }

    #[test]
    fn run_processes_script_until_quit() {
        let mut session = session();
        let script = "add first\nadd second\nsummary\nbogus\nquit\nadd never\n";
        let mut output = Vec::new();
        run(&mut session, script.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("== Week Summary: Mar 10 - Mar 16 =="));
        assert!(text.contains("unknown command `bogus`"));
        assert_eq!(session.mode(), ViewMode::Summary);
        assert_eq!(contents(&session), vec!["first", "second"]);
    }
}
