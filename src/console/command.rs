use std::path::PathBuf;

use crate::kernel::LanguageId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    /// No paths means "ask for them".
    Open(Vec<PathBuf>),
    Close,
    CloseAll,
    Save,
    SaveAs,
    SaveCopy,
    Type(String),
    List,
    Focus { group: usize, index: usize },
    Move,
    Lang(LanguageId),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
    InvalidNumber(String),
    UnknownLanguage(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Empty => write!(f, "Empty command"),
            CommandError::Unknown(name) => write!(f, "Unknown command: {} (try `help`)", name),
            CommandError::MissingArgument(what) => write!(f, "Missing argument: {}", what),
            CommandError::InvalidNumber(raw) => write!(f, "Not a number: {}", raw),
            CommandError::UnknownLanguage(id) => write!(f, "Unknown language: {}", id),
        }
    }
}

impl std::error::Error for CommandError {}

pub const HELP: &str = "\
commands:
  new                 open a blank document
  open [paths...]     open files (asks when no path is given)
  close               close the current tab
  close-all           close every tab
  save                save the current tab
  save-as             save the current tab under a new name
  save-copy           write a copy without switching to it
  type <text>         append text to the current tab
  list                show groups and tabs
  focus <g> <i>       activate tab i of group g
  move                move the current tab to the other view
  lang <id>           set the current tab's language
  quit                exit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            "" => Err(CommandError::Empty),
            "new" => Ok(Command::New),
            "open" => Ok(Command::Open(
                rest.split_whitespace().map(PathBuf::from).collect(),
            )),
            "close" => Ok(Command::Close),
            "close-all" => Ok(Command::CloseAll),
            "save" => Ok(Command::Save),
            "save-as" => Ok(Command::SaveAs),
            "save-copy" => Ok(Command::SaveCopy),
            "type" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("text"));
                }
                Ok(Command::Type(unescape(rest)))
            }
            "list" | "ls" => Ok(Command::List),
            "focus" => {
                let mut args = rest.split_whitespace();
                let group = parse_number(args.next(), "group")?;
                let index = parse_number(args.next(), "tab index")?;
                Ok(Command::Focus { group, index })
            }
            "move" => Ok(Command::Move),
            "lang" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("language id"));
                }
                LanguageId::from_id(rest)
                    .map(Command::Lang)
                    .ok_or_else(|| CommandError::UnknownLanguage(rest.to_string()))
            }
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_number(arg: Option<&str>, what: &'static str) -> Result<usize, CommandError> {
    let raw = arg.ok_or(CommandError::MissingArgument(what))?;
    raw.parse()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

/// `\n` and `\t` escapes so multi-line text can be typed on one line.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/console/command.rs"]
mod tests;
