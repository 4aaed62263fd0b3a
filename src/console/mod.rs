//! Line-based front end: reads commands, drives the shell, answers prompts
//! on the same terminal.

mod command;
mod prompt;

pub use command::{Command, CommandError, HELP};
pub use prompt::ConsolePrompt;

use std::io::{BufRead, Write};

use crate::kernel::services::adapters::absolutize;
use crate::kernel::services::ports::DocumentStore;
use crate::kernel::{BatchResult, CloseResult, ExitDecision, Result, SaveResult, Shell};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub type ConsoleShell<R, W, D> = Shell<ConsolePrompt<R, W>, D>;

pub fn execute<R: BufRead, W: Write, D: DocumentStore>(
    shell: &mut ConsoleShell<R, W, D>,
    command: Command,
) -> Result<Flow> {
    tracing::debug!(?command, "console command");
    match command {
        Command::New => {
            shell.new_document();
        }
        Command::Open(paths) if paths.is_empty() => {
            shell.open_with_dialog()?;
        }
        Command::Open(paths) => {
            let cwd = std::env::current_dir().unwrap_or_default();
            let group = match shell.current() {
                Some((group, _)) => group,
                None => shell.new_document().0,
            };
            let paths: Vec<_> = paths.iter().map(|p| absolutize(p, &cwd)).collect();
            shell.open_documents(&paths, group, false)?;
        }
        Command::Close => {
            if shell.close_current()? == CloseResult::Canceled {
                shell.prompt_mut().say("close canceled");
            }
        }
        Command::CloseAll => {
            if shell.close_all()? == BatchResult::Canceled {
                shell.prompt_mut().say("close all canceled");
            }
        }
        Command::Save => {
            let result = shell.save_current()?;
            report_save(shell, result);
        }
        Command::SaveAs => {
            let result = shell.save_as_current(false)?;
            report_save(shell, result);
        }
        Command::SaveCopy => {
            let result = shell.save_as_current(true)?;
            report_save(shell, result);
        }
        Command::Type(text) => {
            if let Some((group, index)) = shell.current() {
                shell.insert_text(group, index, &text)?;
            }
        }
        Command::List => list(shell),
        Command::Focus { group, index } => {
            let Some(id) = shell.views().group_at(group).map(|g| g.id) else {
                shell.prompt_mut().say(&format!("no group {}", group));
                return Ok(Flow::Continue);
            };
            shell.focus(id, index)?;
        }
        Command::Move => {
            shell.move_to_other_view()?;
        }
        Command::Lang(language) => {
            shell.set_current_language(language);
        }
        Command::Help => shell.prompt_mut().say(HELP),
        Command::Quit => {
            if shell.request_exit()? == ExitDecision::Proceed {
                return Ok(Flow::Quit);
            }
            shell.prompt_mut().say("exit canceled");
        }
    }
    Ok(Flow::Continue)
}

fn report_save<R: BufRead, W: Write, D: DocumentStore>(
    shell: &mut ConsoleShell<R, W, D>,
    result: Option<SaveResult>,
) {
    let message = match result {
        Some(SaveResult::Saved) => "saved",
        Some(SaveResult::Canceled) => "save canceled",
        // Already reported through the prompt.
        Some(SaveResult::Failed(_)) => return,
        None => "nothing to save",
    };
    shell.prompt_mut().say(message);
}

/// One line per tab: `g:i`, `*` on the current tab, title with state marker,
/// language and path.
fn list<R: BufRead, W: Write, D: DocumentStore>(shell: &mut ConsoleShell<R, W, D>) {
    let current = shell.current();
    let mut lines = Vec::new();
    for (position, group) in shell.views().groups().iter().enumerate() {
        for (index, doc) in group.documents().iter().enumerate() {
            let marker = if current == Some((group.id, index)) { '*' } else { ' ' };
            let path = doc
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            lines.push(format!(
                "{}{}:{} {} [{}] {}",
                marker,
                position,
                index,
                doc.display_title(),
                doc.language().id(),
                path
            ));
        }
    }
    lines.push(format!(
        "{} tab(s) in {} group(s)",
        shell.views().total_tabs(),
        shell.views().len()
    ));
    for line in lines {
        shell.prompt_mut().say(line.trim_end());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/console/mod.rs"]
mod tests;
