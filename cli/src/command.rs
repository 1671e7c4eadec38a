//! Line commands typed at the prompt.

use thiserror::Error;
use todo_sync_core::{Intent, TodoId};

pub const HELP: &str = "\
commands:
  list                 redraw the list
  title <text>         set the new todo's title
  desc <text>          set the new todo's description
  add                  create a todo from the title and description
  toggle <id>          flip completion
  delete <id>          delete a todo
  edit <id>            start editing a todo
  set-title <text>     change the title being edited
  set-desc <text>      change the description being edited
  save                 commit the edit
  cancel               discard the edit
  help                 show this text
  quit                 exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Help,
    Quit,
    Intent(Intent),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs a todo id")]
    MissingId(&'static str),
    #[error("invalid todo id {0:?}")]
    InvalidId(String),
}

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let command = match name {
        "" | "list" | "ls" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "title" => Command::Intent(Intent::DraftTitle(rest.to_string())),
        "desc" => Command::Intent(Intent::DraftDescription(rest.to_string())),
        "add" => Command::Intent(Intent::Add),
        "toggle" => Command::Intent(Intent::Toggle(parse_id("toggle", rest)?)),
        "delete" | "rm" => Command::Intent(Intent::Delete(parse_id("delete", rest)?)),
        "edit" => Command::Intent(Intent::StartEdit(parse_id("edit", rest)?)),
        "set-title" => Command::Intent(Intent::EditTitle(rest.to_string())),
        "set-desc" => Command::Intent(Intent::EditDescription(rest.to_string())),
        "save" => Command::Intent(Intent::Save),
        "cancel" => Command::Intent(Intent::Cancel),
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn parse_id(command: &'static str, raw: &str) -> Result<TodoId, ParseError> {
    let raw = raw.trim_start_matches('#');
    if raw.is_empty() {
        return Err(ParseError::MissingId(command));
    }
    if raw.contains(char::is_whitespace) {
        return Err(ParseError::InvalidId(raw.to_string()));
    }
    Ok(match raw.parse::<u64>() {
        Ok(n) => TodoId::Num(n),
        Err(_) => TodoId::Str(raw.to_string()),
    })
}
