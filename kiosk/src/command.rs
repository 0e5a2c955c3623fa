//! Parsing of terminal input into kiosk commands.
//!
//! Items, options and choices can be named by their 1-based number or by
//! name (case-insensitive). Names with spaces go in double quotes. Everything
//! is resolved against the catalog, so a `set` only ever carries a choice the
//! item really offers.

use crate::catalog::Catalog;
use crate::types::{MenuItem, OptionGroup, SessionAction};
use thiserror::Error;

/// Input that cannot be turned into a command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Blank line
    #[error("type a command, or 'help' for the list")]
    Empty,

    /// First word is not a command
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Wrong number of arguments
    #[error("usage: {0}")]
    Usage(&'static str),

    /// A double quote was opened but never closed
    #[error("unterminated quote")]
    UnterminatedQuote,

    /// No catalog item matches
    #[error("no menu item '{0}'")]
    UnknownItem(String),

    /// The item has no such option
    #[error("{item} has no option '{option}'")]
    UnknownOption {
        /// Item name
        item: String,
        /// Requested option
        option: String,
    },

    /// The option has no such choice
    #[error("'{choice}' is not a choice for {option}")]
    UnknownChoice {
        /// Option name
        option: String,
        /// Requested choice
        choice: String,
    },

    /// Cart positions start at 1
    #[error("'{0}' is not a cart position")]
    InvalidPosition(String),
}

/// A parsed line of terminal input
#[derive(Debug, Clone, PartialEq)]
pub enum KioskCommand {
    /// Show the menu
    Menu,
    /// Show the cart
    Cart,
    /// Show the command list
    Help,
    /// Leave the kiosk
    Quit,
    /// Send an action to the session store
    Dispatch(SessionAction),
}

/// Parses one line of input against `catalog`
///
/// # Errors
///
/// Returns a [`CommandError`] describing the first problem found.
pub fn parse_command(line: &str, catalog: &Catalog) -> Result<KioskCommand, CommandError> {
    let words = tokenize(line)?;
    let Some((head, args)) = words.split_first() else {
        return Err(CommandError::Empty);
    };

    match head.to_lowercase().as_str() {
        "menu" => no_args(args, "menu").map(|()| KioskCommand::Menu),
        "cart" => no_args(args, "cart").map(|()| KioskCommand::Cart),
        "help" | "?" => Ok(KioskCommand::Help),
        "quit" | "exit" => Ok(KioskCommand::Quit),
        "checkout" => {
            no_args(args, "checkout").map(|()| KioskCommand::Dispatch(SessionAction::Checkout))
        },
        "set" => {
            let [item, option, choice] = args else {
                return Err(CommandError::Usage("set <item> <option> <choice>"));
            };
            let item = find_item(catalog, item)?;
            let group = find_option(item, option)?;
            let choice = find_choice(group, choice)?;
            Ok(KioskCommand::Dispatch(SessionAction::SetCustomization {
                item_id: item.id,
                option: group.name.clone(),
                choice: choice.to_string(),
            }))
        },
        "add" => {
            let [item] = args else {
                return Err(CommandError::Usage("add <item>"));
            };
            let item = find_item(catalog, item)?;
            Ok(KioskCommand::Dispatch(SessionAction::AddToCart { item_id: item.id }))
        },
        "remove" => {
            let [position] = args else {
                return Err(CommandError::Usage("remove <position>"));
            };
            let index = position
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .ok_or_else(|| CommandError::InvalidPosition(position.clone()))?;
            Ok(KioskCommand::Dispatch(SessionAction::RemoveFromCart { index }))
        },
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

fn no_args(args: &[String], usage: &'static str) -> Result<(), CommandError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(CommandError::Usage(usage))
    }
}

/// Splits on whitespace, keeping double-quoted runs together
fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            },
            c if c.is_whitespace() && !in_quotes => {
                if quoted || !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                quoted = false;
            },
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err(CommandError::UnterminatedQuote);
    }
    if quoted || !current.is_empty() {
        words.push(current);
    }

    Ok(words)
}

/// Matches a 1-based position or a case-insensitive name
fn pick<'a, T>(candidates: &'a [T], query: &str, name: impl Fn(&T) -> &str) -> Option<&'a T> {
    if let Ok(n) = query.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| candidates.get(i));
    }
    candidates
        .iter()
        .find(|candidate| name(candidate).eq_ignore_ascii_case(query))
}

fn find_item<'a>(catalog: &'a Catalog, query: &str) -> Result<&'a MenuItem, CommandError> {
    pick(catalog.items(), query, |item| item.name.as_str())
        .ok_or_else(|| CommandError::UnknownItem(query.to_string()))
}

fn find_option<'a>(item: &'a MenuItem, query: &str) -> Result<&'a OptionGroup, CommandError> {
    pick(&item.options, query, |group| group.name.as_str()).ok_or_else(|| {
        CommandError::UnknownOption {
            item: item.name.clone(),
            option: query.to_string(),
        }
    })
}

fn find_choice<'a>(group: &'a OptionGroup, query: &str) -> Result<&'a str, CommandError> {
    pick(&group.choices, query, String::as_str)
        .map(String::as_str)
        .ok_or_else(|| CommandError::UnknownChoice {
            option: group.name.clone(),
            choice: query.to_string(),
        })
}
