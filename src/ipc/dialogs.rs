//! Dialog providers for the privileged process.
//!
//! The privileged side owns the user's attention: [`ShellCommands`](super::ShellCommands)
//! forwards dialog requests to a [`Dialogs`] implementation and replies with
//! the selection, or `null` when the user cancelled.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::host::dialog::{FileFilters, OpenDialogOptions, SaveDialogOptions};
use crate::log;

/// Source of user file selections.
pub trait Dialogs: Send + 'static {
    /// `None` when cancelled.
    fn show_open(&self, options: &OpenDialogOptions) -> Option<Vec<String>>;

    /// `None` when cancelled.
    fn show_save(&self, options: &SaveDialogOptions) -> Option<String>;
}

/// Prompts on stderr and reads the answer from stdin.
///
/// An empty answer cancels. With `multiple`, paths are separated the way the
/// platform separates `PATH` entries.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalDialogs;

impl TerminalDialogs {
    fn prompt(&self, question: &str) -> Option<String> {
        let mut stderr = io::stderr().lock();
        write!(stderr, "{question} ").ok()?;
        stderr.flush().ok()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).ok()?;
        let answer = line.trim();
        (!answer.is_empty()).then(|| answer.to_string())
    }
}

impl Dialogs for TerminalDialogs {
    fn show_open(&self, options: &OpenDialogOptions) -> Option<Vec<String>> {
        let what = if options.multiple { "files" } else { "file" };
        let answer = self.prompt(&format!("open {what}{}:", describe(&options.filters)))?;
        parse_open_answer(&answer, &options.filters, options.multiple)
    }

    fn show_save(&self, options: &SaveDialogOptions) -> Option<String> {
        let suggestion = if options.default_path.is_empty() {
            String::new()
        } else {
            format!(" (suggested: {})", options.default_path)
        };
        self.prompt(&format!("save as{}{suggestion}:", describe(&options.filters)))
    }
}

/// ` [label: ext, ext; ...]`, or nothing without filters.
fn describe(filters: &FileFilters) -> String {
    if filters.is_empty() {
        return String::new();
    }
    let labels: Vec<String> = filters
        .iter()
        .map(|f| format!("{}: {}", f.name, f.extensions.join(", ")))
        .collect();
    format!(" [{}]", labels.join("; "))
}

/// Split and filter an open-dialog answer. `None` when nothing acceptable remains.
pub(crate) fn parse_open_answer(answer: &str, filters: &FileFilters, multiple: bool) -> Option<Vec<String>> {
    let mut paths: Vec<String> = if multiple {
        std::env::split_paths(answer)
            .map(|p| p.to_string_lossy().into_owned())
            .filter(|p| !p.is_empty())
            .collect()
    } else {
        vec![answer.to_string()]
    };

    paths.retain(|path| {
        let accepted = matches_filters(path, filters);
        if !accepted {
            log!("dialog"; "`{}` does not match the file filters", path);
        }
        accepted
    });

    (!paths.is_empty()).then_some(paths)
}

/// A path matches when there are no filters, a filter allows `*`, or one of
/// the extensions equals the file's extension or whole name.
fn matches_filters(path: &str, filters: &FileFilters) -> bool {
    if filters.is_empty() {
        return true;
    }
    let path = Path::new(path);
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();

    filters
        .iter()
        .flat_map(|f| f.extensions.iter())
        .any(|allowed| allowed == "*" || allowed.eq_ignore_ascii_case(ext) || allowed == name)
}
