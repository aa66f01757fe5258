//! Raw UI events, read one command per input line.

use client_core::PageTarget;
use shared::domain::ColumnId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SearchSubmitted(String),
    ColumnHeaderClicked(ColumnId),
    PageControlClicked(PageTarget),
    ViewportResized(u32),
    /// 1-based row number as shown in the table.
    DescriptionToggled(usize),
    RetryRequested,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("empty input")]
    Empty,
    #[error("nothing to search for")]
    EmptySearch,
    #[error("unknown column '{0}'; try one of: Title, Description, Gallery, Featured, Type of Exhibition")]
    UnknownColumn(String),
    #[error("'{value}' is not a valid {what}")]
    InvalidNumber { what: &'static str, value: String },
    #[error("unknown command '{0}'; type 'help' for the list of commands")]
    Unknown(String),
}

impl CommandParseError {
    /// Input the search bar would not have submitted at all.
    pub fn is_silent(&self) -> bool {
        matches!(self, CommandParseError::Empty | CommandParseError::EmptySearch)
    }
}

pub const HELP_TEXT: &str = "\
commands:
  search <text>   (or /<text>)  full-text search, back to page 1
  sort <column>                 toggle sort on Title, Description, Gallery, Featured, Type of Exhibition
  page <n>                      jump to page n
  next | >                      forward arrow
  prev | <                      back arrow
  resize <px>                   report a new viewport width
  expand <row>                  show or hide a row's full description
  retry                         fetch the current page again
  quit";

fn parse_number<T: std::str::FromStr>(
    what: &'static str,
    value: &str,
) -> Result<T, CommandParseError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| CommandParseError::InvalidNumber {
            what,
            value: value.trim().to_string(),
        })
}

fn search(text: &str) -> Result<UiEvent, CommandParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CommandParseError::EmptySearch);
    }
    Ok(UiEvent::SearchSubmitted(text.to_string()))
}

pub fn parse_command(line: &str) -> Result<UiEvent, CommandParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(CommandParseError::Empty);
    }
    if let Some(text) = line.strip_prefix('/') {
        return search(text);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "search" | "s" => search(rest),
        "sort" => ColumnId::from_heading(rest)
            .map(UiEvent::ColumnHeaderClicked)
            .ok_or_else(|| CommandParseError::UnknownColumn(rest.to_string())),
        "page" | "p" => parse_number("page number", rest)
            .map(|page| UiEvent::PageControlClicked(PageTarget::Number(page))),
        "next" | ">" => Ok(UiEvent::PageControlClicked(PageTarget::Forward)),
        "prev" | "<" => Ok(UiEvent::PageControlClicked(PageTarget::Back)),
        "resize" => parse_number("viewport width", rest).map(UiEvent::ViewportResized),
        "expand" => parse_number("row number", rest).map(UiEvent::DescriptionToggled),
        "retry" => Ok(UiEvent::RetryRequested),
        "help" | "?" => Ok(UiEvent::Help),
        "quit" | "exit" | "q" => Ok(UiEvent::Quit),
        _ => Err(CommandParseError::Unknown(command.to_string())),
    }
}
