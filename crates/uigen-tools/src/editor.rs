//! The `str_replace_editor` tool.
//!
//! Every command returns a plain `String`: file content for `view`, a short
//! confirmation for mutating commands, or text starting with `Error: `.
//! Nothing here panics or returns `Err` for bad agent input.

use crate::types::{EditorCommand, EditorParams, ViewRange};
use uigen_vfs::{FileSystemNode, VirtualFileSystem};

/// Prefix of every failure string returned by the editor.
pub const ERROR_PREFIX: &str = "Error: ";

/// Content-editing tool bound to one filesystem.
///
/// # Examples
///
/// ```
/// use uigen_tools::{EditorCommand, StrReplaceEditor};
/// use uigen_vfs::VirtualFileSystem;
///
/// let mut fs = VirtualFileSystem::new();
/// let mut editor = StrReplaceEditor::new(&mut fs);
///
/// let reply = editor.run(EditorCommand::Create {
///     path: "/App.jsx".to_string(),
///     file_text: "const greeting = 'Hello';".to_string(),
/// });
/// assert_eq!(reply, "File created: /App.jsx");
///
/// let reply = editor.run(EditorCommand::StrReplace {
///     path: "/App.jsx".to_string(),
///     old_str: "Hello".to_string(),
///     new_str: "Hi".to_string(),
/// });
/// assert!(reply.starts_with("Replaced 1 occurrence"));
/// assert_eq!(fs.read_file("/App.jsx").unwrap(), "const greeting = 'Hi';");
/// ```
#[derive(Debug)]
pub struct StrReplaceEditor<'a> {
    fs: &'a mut VirtualFileSystem,
}

impl<'a> StrReplaceEditor<'a> {
    /// Binds the editor to `fs`.
    pub const fn new(fs: &'a mut VirtualFileSystem) -> Self {
        Self { fs }
    }

    /// Decodes `params` and runs the command.
    pub fn execute(&mut self, params: EditorParams) -> String {
        self.run(EditorCommand::from(params))
    }

    /// Runs an already decoded command.
    pub fn run(&mut self, command: EditorCommand) -> String {
        match command {
            EditorCommand::View { path, range } => self.view(&path, range),
            EditorCommand::Create { path, file_text } => self.create(&path, file_text),
            EditorCommand::StrReplace {
                path,
                old_str,
                new_str,
            } => self.str_replace(&path, &old_str, &new_str),
            EditorCommand::Insert {
                path,
                insert_line,
                new_str,
            } => self.insert(&path, insert_line, &new_str),
            EditorCommand::UndoEdit { .. } => error(
                "undo_edit command is not supported in this version. Use str_replace to revert changes.",
            ),
        }
    }

    fn view(&self, path: &str, range: Option<ViewRange>) -> String {
        match self.fs.get_node(path) {
            None => format!("File not found: {path}"),
            Some(FileSystemNode::Directory(dir)) => {
                if dir.is_empty() {
                    return "(empty directory)".to_string();
                }
                dir.children()
                    .iter()
                    .map(|(name, child)| {
                        let tag = if child.is_directory() { "[DIR]" } else { "[FILE]" };
                        format!("{tag} {name}")
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Some(FileSystemNode::File(file)) => number_lines(file.content(), range),
        }
    }

    fn create(&mut self, path: &str, file_text: String) -> String {
        match self.fs.create_file(path, file_text) {
            Ok(()) => format!("File created: {path}"),
            Err(e) => error(e),
        }
    }

    fn str_replace(&mut self, path: &str, old_str: &str, new_str: &str) -> String {
        let content = match self.fs.read_file(path) {
            Ok(content) => content,
            Err(e) => return error(e),
        };

        let occurrences = if old_str.is_empty() {
            0
        } else {
            content.matches(old_str).count()
        };
        if occurrences != 1 {
            return error(format!(
                "Expected exactly 1 occurrence of old_str in {path}, found {occurrences}. \
                 Make old_str unique by including more surrounding context."
            ));
        }

        let updated = content.replacen(old_str, new_str, 1);
        match self.fs.update_file(path, updated) {
            Ok(()) => format!("Replaced 1 occurrence(s) of the string in {path}"),
            Err(e) => error(e),
        }
    }

    fn insert(&mut self, path: &str, insert_line: usize, new_str: &str) -> String {
        let content = match self.fs.read_file(path) {
            Ok(content) => content,
            Err(e) => return error(e),
        };

        let mut lines: Vec<&str> = content.split('\n').collect();
        if insert_line > lines.len() {
            return error(format!(
                "Invalid line number: {insert_line}. File has {} lines.",
                lines.len()
            ));
        }
        lines.insert(insert_line, new_str);
        let updated = lines.join("\n");

        match self.fs.update_file(path, updated) {
            Ok(()) => format!("Text inserted at line {insert_line} in {path}"),
            Err(e) => error(e),
        }
    }
}

fn error(message: impl std::fmt::Display) -> String {
    format!("{ERROR_PREFIX}{message}")
}

/// Renders `content` as `{n}\t{line}` rows, restricted to `range`.
///
/// Out-of-range bounds clamp to the file, so a start past the end shows the
/// last line. An end before the start shows nothing.
fn number_lines(content: &str, range: Option<ViewRange>) -> String {
    if content.is_empty() {
        return "(empty file)".to_string();
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let (start, end) = range.map_or((1, lines.len()), |range| {
        (
            range.start.min(lines.len()),
            range.end.unwrap_or(lines.len()).min(lines.len()),
        )
    });

    lines
        .iter()
        .enumerate()
        .skip(start.saturating_sub(1))
        .take(end.saturating_sub(start.saturating_sub(1)))
        .map(|(index, line)| format!("{}\t{line}", index + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fs_with(path: &str, content: &str) -> VirtualFileSystem {
        let mut fs = VirtualFileSystem::new();
        fs.create_file(path, content).unwrap();
        fs
    }

    #[test]
    fn test_number_lines_full() {
        assert_eq!(number_lines("a\nb", None), "1\ta\n2\tb");
        assert_eq!(number_lines("", None), "(empty file)");
    }

    #[test]
    fn test_number_lines_range_clamps() {
        let content = "l1\nl2\nl3\nl4\nl5";
        let range = |start, end| Some(ViewRange::from_pair(start, end));
        assert_eq!(number_lines(content, range(2, 4)), "2\tl2\n3\tl3\n4\tl4");
        assert_eq!(number_lines(content, range(4, -1)), "4\tl4\n5\tl5");
        assert_eq!(number_lines(content, range(-3, 1)), "1\tl1");
        assert_eq!(number_lines(content, range(4, 100)), "4\tl4\n5\tl5");
        assert_eq!(number_lines(content, range(9, 12)), "5\tl5");
        assert_eq!(number_lines(content, range(9, -1)), "5\tl5");
        assert_eq!(number_lines(content, range(3, 2)), "");
    }

    #[test]
    fn test_view_directory() {
        let mut fs = fs_with("/components/Button.jsx", "");
        fs.create_directory("/components/ui").unwrap();
        let mut editor = StrReplaceEditor::new(&mut fs);
        let listing = editor.run(EditorCommand::View {
            path: "/components".to_string(),
            range: None,
        });
        assert_eq!(listing, "[FILE] Button.jsx\n[DIR] ui");

        let empty = editor.run(EditorCommand::View {
            path: "/components/ui".to_string(),
            range: None,
        });
        assert_eq!(empty, "(empty directory)");
    }

    #[test]
    fn test_view_missing() {
        let mut fs = VirtualFileSystem::new();
        let reply = StrReplaceEditor::new(&mut fs).run(EditorCommand::View {
            path: "/missing.txt".to_string(),
            range: None,
        });
        assert_eq!(reply, "File not found: /missing.txt");
    }

    #[test]
    fn test_str_replace_zero_and_many() {
        let mut fs = fs_with("/a.txt", "x x");
        let mut editor = StrReplaceEditor::new(&mut fs);

        let reply = editor.run(EditorCommand::StrReplace {
            path: "/a.txt".to_string(),
            old_str: "x".to_string(),
            new_str: "y".to_string(),
        });
        assert!(reply.starts_with(ERROR_PREFIX));
        assert!(reply.contains("found 2"));

        let reply = editor.run(EditorCommand::StrReplace {
            path: "/a.txt".to_string(),
            old_str: "z".to_string(),
            new_str: "y".to_string(),
        });
        assert!(reply.contains("found 0"));

        let reply = editor.run(EditorCommand::StrReplace {
            path: "/a.txt".to_string(),
            old_str: String::new(),
            new_str: String::new(),
        });
        assert!(reply.contains("found 0"));
        assert_eq!(fs.read_file("/a.txt").unwrap(), "x x");
    }

    #[test]
    fn test_str_replace_only_touches_match() {
        let mut fs = fs_with("/a.txt", "keep TARGET keep");
        let reply = StrReplaceEditor::new(&mut fs).run(EditorCommand::StrReplace {
            path: "/a.txt".to_string(),
            old_str: "TARGET".to_string(),
            new_str: "done".to_string(),
        });
        assert_eq!(reply, "Replaced 1 occurrence(s) of the string in /a.txt");
        assert_eq!(fs.read_file("/a.txt").unwrap(), "keep done keep");
    }

    #[test]
    fn test_insert_positions() {
        let mut fs = fs_with("/a.txt", "line1\nline2\nline3");
        let mut editor = StrReplaceEditor::new(&mut fs);
        let reply = editor.run(EditorCommand::Insert {
            path: "/a.txt".to_string(),
            insert_line: 2,
            new_str: "inserted".to_string(),
        });
        assert_eq!(reply, "Text inserted at line 2 in /a.txt");

        editor.run(EditorCommand::Insert {
            path: "/a.txt".to_string(),
            insert_line: 0,
            new_str: "first".to_string(),
        });
        assert_eq!(
            fs.read_file("/a.txt").unwrap(),
            "first\nline1\nline2\ninserted\nline3"
        );
    }

    #[test]
    fn test_insert_into_empty_and_past_end() {
        let mut fs = fs_with("/a.txt", "");
        let mut editor = StrReplaceEditor::new(&mut fs);
        editor.run(EditorCommand::Insert {
            path: "/a.txt".to_string(),
            insert_line: 0,
            new_str: "only".to_string(),
        });

        let reply = editor.run(EditorCommand::Insert {
            path: "/a.txt".to_string(),
            insert_line: 5,
            new_str: "late".to_string(),
        });
        assert_eq!(reply, "Error: Invalid line number: 5. File has 2 lines.");
        assert_eq!(fs.read_file("/a.txt").unwrap(), "only\n");
    }

    #[test]
    fn test_create_over_directory_reports_error() {
        let mut fs = VirtualFileSystem::new();
        fs.create_directory("/lib").unwrap();
        let reply = StrReplaceEditor::new(&mut fs).run(EditorCommand::Create {
            path: "/lib".to_string(),
            file_text: "x".to_string(),
        });
        assert!(reply.starts_with(ERROR_PREFIX));
        assert!(fs.get_node("/lib").unwrap().is_directory());
    }

    #[test]
    fn test_undo_edit_leaves_file() {
        let mut fs = fs_with("/a.txt", "content");
        let reply = StrReplaceEditor::new(&mut fs).run(EditorCommand::UndoEdit {
            path: "/a.txt".to_string(),
        });
        assert!(reply.starts_with("Error: undo_edit command is not supported"));
        assert_eq!(fs.version(), 1);
    }
}
