//! Prompt port over a line-oriented reader/writer pair.
//!
//! End of input answers every question with its most conservative choice.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::kernel::services::adapters::absolutize;
use crate::kernel::services::ports::{
    DiskChangeChoice, OverwriteChoice, Prompt, SaveChoice, SaveReason,
};

pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Next input line without its terminator, or `None` at end of input.
    pub fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\r', '\n']).len();
                line.truncate(trimmed);
                Some(line)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to read console input");
                None
            }
        }
    }

    pub fn say(&mut self, text: &str) {
        if let Err(err) = writeln!(self.output, "{}", text) {
            tracing::warn!(error = %err, "failed to write console output");
        }
    }

    /// Prints `question` without a newline and reads the answer.
    pub fn ask(&mut self, question: &str) -> Option<String> {
        let written = write!(self.output, "{}", question).and_then(|_| self.output.flush());
        if let Err(err) = written {
            tracing::warn!(error = %err, "failed to write console output");
        }
        self.read_line()
    }

    /// Repeats `question` until `parse` accepts the answer.
    fn ask_until<T>(&mut self, question: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        loop {
            let answer = self.ask(question)?;
            if let Some(value) = parse(answer.trim()) {
                return Some(value);
            }
            self.say("Please answer with one of the bracketed letters.");
        }
    }
}

impl<R: BufRead, W: Write> Prompt for ConsolePrompt<R, W> {
    fn ask_save_choice(&mut self, name: &str, reason: SaveReason) -> SaveChoice {
        let question = match reason {
            SaveReason::TabClosing => format!(
                "\u{ab}{}\u{bb} has unsaved changes. Save before closing? [s]ave/[d]iscard/[c]ancel: ",
                name
            ),
            SaveReason::Generic => format!(
                "Save changes to \u{ab}{}\u{bb}? [s]ave/[d]iscard/[c]ancel: ",
                name
            ),
        };
        self.ask_until(&question, |answer| match answer {
            "s" | "save" => Some(SaveChoice::Save),
            "d" | "discard" => Some(SaveChoice::Discard),
            "c" | "cancel" => Some(SaveChoice::Cancel),
            _ => None,
        })
        .unwrap_or(SaveChoice::Cancel)
    }

    fn ask_overwrite_confirmation(&mut self, name: &str) -> OverwriteChoice {
        let question = format!(
            "\u{ab}{}\u{bb} was changed by another program. Overwrite it? [s]ave/[c]ancel: ",
            name
        );
        self.ask_until(&question, |answer| match answer {
            "s" | "save" => Some(OverwriteChoice::Save),
            "c" | "cancel" => Some(OverwriteChoice::Cancel),
            _ => None,
        })
        .unwrap_or(OverwriteChoice::Cancel)
    }

    fn ask_disk_change_choice(&mut self, path: &Path, removed: bool) -> DiskChangeChoice {
        let question = if removed {
            format!(
                "{} was removed from disk. Save it again? [y]es/[n]o/[c]lose: ",
                path.display()
            )
        } else {
            format!(
                "{} was modified on disk. Reload it? [y]es/[n]o/[c]lose: ",
                path.display()
            )
        };
        self.ask_until(&question, |answer| match answer {
            "y" | "yes" => Some(DiskChangeChoice::Yes),
            "n" | "no" => Some(DiskChangeChoice::No),
            "c" | "close" => Some(DiskChangeChoice::Close),
            _ => None,
        })
        .unwrap_or(DiskChangeChoice::No)
    }

    fn ask_save_path(&mut self, default: &Path) -> Option<PathBuf> {
        let question = format!(
            "Save as (= for {}, empty line cancels): ",
            default.display()
        );
        let answer = self.ask(&question)?;
        match answer.trim() {
            "" => None,
            "=" => Some(default.to_path_buf()),
            path => {
                let cwd = default.parent().unwrap_or(Path::new(""));
                Some(absolutize(Path::new(path), cwd))
            }
        }
    }

    fn ask_open_paths(&mut self, start_dir: &Path) -> Vec<PathBuf> {
        let question = format!("Open from {}: ", start_dir.display());
        let Some(answer) = self.ask(&question) else {
            return Vec::new();
        };
        answer
            .split_whitespace()
            .map(|path| absolutize(Path::new(path), start_dir))
            .collect()
    }

    fn report_error(&mut self, message: &str) {
        self.say(&format!("error: {}", message));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/console/prompt.rs"]
mod tests;
