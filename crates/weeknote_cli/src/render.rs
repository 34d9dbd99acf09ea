//! Plain-text rendering of session snapshots.

use weeknote_core::{SessionSnapshot, ViewMode};

/// Renders the screen for the snapshot's mode.
pub fn render(snapshot: &SessionSnapshot) -> String {
    match snapshot.mode {
        ViewMode::Capture => render_capture(snapshot),
        ViewMode::Summary => render_summary(snapshot),
    }
}

fn render_capture(snapshot: &SessionSnapshot) -> String {
    let mut out = format!("== This Week: {} ==\n", snapshot.range_label);
    if snapshot.notes.is_empty() {
        out.push_str("No notes this week\n");
        out.push_str("Start typing `add <text>` to capture ideas\n");
        return out;
    }

    for (index, note) in snapshot.notes.iter().enumerate() {
        let marker = if snapshot.dragging == Some(note.id) { "*" } else { " " };
        out.push_str(&format!(
            "{marker}{:>3}. {}\n",
            index + 1,
            indent_continuation(&note.content)
        ));
        out.push_str(&format!(
            "      {} \u{2022} {}\n",
            note.display_date, note.display_time
        ));
    }
    out.push_str("(`summary` to collect the week's notes)\n");
    out
}

fn render_summary(snapshot: &SessionSnapshot) -> String {
    let mut out = format!("== Week Summary: {} ==\n", snapshot.range_label);
    if !snapshot.summary.is_empty() {
        out.push_str(&snapshot.summary);
        out.push('\n');
    }
    out.push_str(&format!("{} notes collected\n", snapshot.note_count));
    out.push_str("(`copy` to print the text, `back` to return)\n");
    out
}

fn indent_continuation(content: &str) -> String {
    content.replace('\n', "\n      ")
}

#[cfg(test)]
mod tests {
    use super::render;
    use chrono::{NaiveDate, Utc};
    use weeknote_core::CaptureSession;

    fn session() -> CaptureSession {
        CaptureSession::new(NaiveDate::from_ymd_opt(2024, 3, 12).unwrap())
    }

    #[test]
    fn empty_week_shows_placeholder() {
        let text = render(&session().snapshot_in(&Utc));
        assert!(text.starts_with("== This Week: Mar 10 - Mar 16 =="));
        assert!(text.contains("No notes this week"));
    }

    #[test]
    fn capture_lists_numbered_notes() {
        let mut session = session();
        session.commit_draft("Buy milk").unwrap();
        session.commit_draft("Call Alice").unwrap();
        let text = render(&session.snapshot_in(&Utc));
        assert!(text.contains("  1. Buy milk"));
        assert!(text.contains("  2. Call Alice"));
    }

    #[test]
    fn summary_shows_text_and_count() {
        let mut session = session();
        session.commit_draft("a").unwrap();
        session.commit_draft("b").unwrap();
        session.open_summary();
        let text = render(&session.snapshot_in(&Utc));
        assert!(text.contains("1. a\n\n2. b\n"));
        assert!(text.contains("2 notes collected"));
    }
}
