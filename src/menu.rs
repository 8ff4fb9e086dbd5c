use crate::cleaner::ScanEntry;
use crate::term::{Console, Key};
use crate::utils;
use std::io;
use std::path::Path;

/// The one string that authorizes deletion. Compared with plain equality,
/// never a pattern, so "yesno" and "Yes" do not pass.
pub const CONFIRM_TOKEN: &str = "yes";

/// How the menu ended.
pub enum MenuResult {
    /// Indices into the original entry list, in original order.
    Confirmed(Vec<usize>),
    Cancelled,
}

/// Outcome of running the confirmed deletions.
pub struct DeletionReport {
    pub deleted: usize,
    pub failed: usize,
    pub bytes_freed: u64,
    pub errors: Vec<String>,
}

/// Checkbox menu over a list of discovered files. One selection flag per
/// entry plus a cursor, both created fresh per invocation. The caller must
/// not invoke this on an empty list; "nothing found" is the caller's story
/// to tell.
pub struct Menu<'a> {
    entries: &'a [ScanEntry],
    selected: Vec<bool>,
    cursor: usize,
    notice: Option<String>,
}

impl<'a> Menu<'a> {
    pub fn new(entries: &'a [ScanEntry]) -> Self {
        debug_assert!(!entries.is_empty());
        Menu {
            entries,
            selected: vec![false; entries.len()],
            cursor: 0,
            notice: None,
        }
    }

    /// Cursor moves clamp at the list bounds. No wraparound.
    fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_down(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
    }

    fn toggle(&mut self) {
        self.selected[self.cursor] = !self.selected[self.cursor];
    }

    fn selected_indices(&self) -> Vec<usize> {
        self.selected
            .iter()
            .enumerate()
            .filter(|(_, s)| **s)
            .map(|(i, _)| i)
            .collect()
    }

    fn selected_bytes(&self) -> u64 {
        self.selected_indices()
            .iter()
            .map(|&i| self.entries[i].size_bytes)
            .sum()
    }

    fn frame(&self) -> Vec<String> {
        let mut lines = vec![
            "Select files to delete".to_string(),
            "↑/↓ move, space select, enter delete, q cancel".to_string(),
            "─".repeat(60),
        ];

        for (i, entry) in self.entries.iter().enumerate() {
            let marker = if i == self.cursor { ">" } else { " " };
            let checkbox = if self.selected[i] { "[x]" } else { "[ ]" };
            lines.push(format!(
                "{} {} {:>10}  {}",
                marker,
                checkbox,
                utils::format_size(entry.size_bytes),
                utils::display_path(&entry.path)
            ));
        }

        if let Some(notice) = &self.notice {
            lines.push(notice.clone());
        }

        lines
    }

    /// Drive the menu until the operator confirms a non-empty selection or
    /// cancels. Nothing is deleted here; the confirmed indices are handed
    /// back for the caller to execute.
    pub fn run(mut self, console: &mut dyn Console) -> io::Result<MenuResult> {
        loop {
            console.render(&self.frame())?;
            self.notice = None;

            match console.read_key()? {
                Key::Up => self.move_up(),
                Key::Down => self.move_down(),
                Key::Char(' ') => self.toggle(),
                Key::Char('q') | Key::Esc => return Ok(MenuResult::Cancelled),
                Key::Enter => {
                    let picked = self.selected_indices();
                    if picked.is_empty() {
                        self.notice = Some("Nothing selected.".to_string());
                        continue;
                    }

                    let prompt = format!(
                        "Delete {} file(s), {}? Type '{}' to proceed > ",
                        picked.len(),
                        utils::format_size(self.selected_bytes()),
                        CONFIRM_TOKEN
                    );
                    let answer = console.read_line(&prompt)?;
                    if answer == CONFIRM_TOKEN {
                        return Ok(MenuResult::Confirmed(picked));
                    }
                    return Ok(MenuResult::Cancelled);
                }
                Key::Char(_) => {}
            }
        }
    }
}

/// Run the confirmed subset through the deletion executor, in original
/// order. A failed removal is recorded and the rest of the batch still
/// runs.
pub fn delete_selected<F>(entries: &[ScanEntry], picked: &[usize], mut remove: F) -> DeletionReport
where
    F: FnMut(&Path) -> io::Result<u64>,
{
    let mut report = DeletionReport {
        deleted: 0,
        failed: 0,
        bytes_freed: 0,
        errors: Vec::new(),
    };

    for &index in picked {
        let entry = &entries[index];
        match remove(&entry.path) {
            Ok(freed) => {
                report.deleted += 1;
                report.bytes_freed += freed;
            }
            Err(e) => {
                report.failed += 1;
                report
                    .errors
                    .push(format!("Failed to remove {}: {e}", entry.path.display()));
            }
        }
    }

    report
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::term::testing::ScriptedConsole;
    use std::path::PathBuf;

    fn entries() -> Vec<ScanEntry> {
        vec![
            ScanEntry {
                path: PathBuf::from("/a"),
                size_bytes: 500,
            },
            ScanEntry {
                path: PathBuf::from("/b"),
                size_bytes: 200,
            },
        ]
    }

    #[test]
    fn test_double_toggle_is_identity() {
        let entries = entries();
        let mut menu = Menu::new(&entries);

        menu.toggle();
        menu.toggle();
        assert!(menu.selected_indices().is_empty());
    }

    #[test]
    fn test_cursor_clamps_at_both_ends() {
        let entries = entries();
        let mut menu = Menu::new(&entries);

        menu.move_up();
        assert_eq!(0, menu.cursor);

        menu.move_down();
        menu.move_down();
        menu.move_down();
        assert_eq!(1, menu.cursor);
    }

    #[test]
    fn test_quit_cancels_without_prompting() {
        let entries = entries();
        let mut console = ScriptedConsole::new(vec![Key::Char(' '), Key::Char('q')]);

        let result = Menu::new(&entries).run(&mut console).unwrap();
        assert!(matches!(result, MenuResult::Cancelled));
        assert!(console.prompts.is_empty());
    }

    #[test]
    fn test_submit_with_nothing_selected_stays_in_menu() {
        let entries = entries();
        let mut console = ScriptedConsole::new(vec![Key::Enter, Key::Esc]);

        let result = Menu::new(&entries).run(&mut console).unwrap();
        assert!(matches!(result, MenuResult::Cancelled));

        // The re-rendered frame carries the notice; the first did not.
        assert_eq!(2, console.frames.len());
        assert!(!console.frames[0].iter().any(|l| l.contains("Nothing selected")));
        assert!(console.frames[1].iter().any(|l| l.contains("Nothing selected")));
        // Submitting with no selection never reaches the confirmation prompt.
        assert!(console.prompts.is_empty());
    }

    #[test]
    fn test_non_yes_answers_cancel() {
        for answer in ["Yes", "y", "", "yesno", "no"] {
            let entries = entries();
            let mut console =
                ScriptedConsole::new(vec![Key::Char(' '), Key::Enter]).with_line(answer);

            let result = Menu::new(&entries).run(&mut console).unwrap();
            assert!(
                matches!(result, MenuResult::Cancelled),
                "answer {answer:?} should cancel"
            );
        }
    }

    #[test]
    fn test_confirmed_selection_reports_picked_indices() {
        let entries = entries();
        // Move to the second entry, select it, submit, type yes.
        let mut console =
            ScriptedConsole::new(vec![Key::Down, Key::Char(' '), Key::Enter]).with_line("yes");

        let result = Menu::new(&entries).run(&mut console).unwrap();
        match result {
            MenuResult::Confirmed(picked) => assert_eq!(vec![1], picked),
            MenuResult::Cancelled => panic!("expected confirmation"),
        }
    }

    #[test]
    fn test_frame_shows_cursor_and_checkbox_state() {
        let entries = entries();
        let mut menu = Menu::new(&entries);
        menu.toggle();
        menu.move_down();

        let frame = menu.frame();
        let first = &frame[3];
        let second = &frame[4];
        assert!(first.starts_with("  [x]"));
        assert!(second.starts_with("> [ ]"));
        assert!(first.contains("/a"));
        assert!(second.contains("/b"));
    }

    #[test]
    fn test_delete_selected_invokes_executor_per_path() {
        let entries = entries();
        let mut removed = Vec::new();

        let report = delete_selected(&entries, &[1], |path| {
            removed.push(path.to_path_buf());
            Ok(200)
        });

        assert_eq!(vec![PathBuf::from("/b")], removed);
        assert_eq!(1, report.deleted);
        assert_eq!(0, report.failed);
        assert_eq!(200, report.bytes_freed);
    }

    #[test]
    fn test_delete_selected_continues_past_failures() {
        let entries = entries();

        let report = delete_selected(&entries, &[0, 1], |path| {
            if path == Path::new("/a") {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "nope"))
            } else {
                Ok(200)
            }
        });

        assert_eq!(1, report.deleted);
        assert_eq!(1, report.failed);
        assert_eq!(200, report.bytes_freed);
        assert_eq!(1, report.errors.len());
    }

    #[test]
    fn test_cancelled_menu_never_invokes_executor() {
        let entries = entries();
        let mut console =
            ScriptedConsole::new(vec![Key::Char(' '), Key::Enter]).with_line("Yes");

        let result = Menu::new(&entries).run(&mut console).unwrap();
        let mut calls = 0;
        if let MenuResult::Confirmed(picked) = result {
            delete_selected(&entries, &picked, |_| {
                calls += 1;
                Ok(0)
            });
        }
        assert_eq!(0, calls);
    }
}
