//! Completion parser: turn free-form model text into an `Action`.
//!
//! Model output is untrusted. Every way it can be wrong is a `ParseError`
//! variant carrying the offending raw string; nothing here panics.

use serde::Serialize;
use thiserror::Error;

use crate::action::Action;
use crate::grammar::{self, CommandKind};

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseError {
    /// Not of the form `name(arg, ...)`
    #[error("malformed command ({reason}): {raw:?}")]
    Malformed { raw: String, reason: String },

    #[error("unknown command '{command}': {raw:?}")]
    UnknownCommand { raw: String, command: String },

    #[error("{command} expects {expected} arguments, got {actual}: {raw:?}")]
    ArityMismatch {
        raw: String,
        command: &'static str,
        expected: usize,
        actual: usize,
    },

    /// `position` is 0-based
    #[error("{command} argument {position} is empty: {raw:?}")]
    EmptyArgument {
        raw: String,
        command: &'static str,
        position: usize,
    },
}

impl ParseError {
    pub fn raw(&self) -> &str {
        match self {
            ParseError::Malformed { raw, .. }
            | ParseError::UnknownCommand { raw, .. }
            | ParseError::ArityMismatch { raw, .. }
            | ParseError::EmptyArgument { raw, .. } => raw,
        }
    }

    /// Same error, reported against `raw` instead of the text it was built from.
    fn with_raw(mut self, raw: &str) -> Self {
        match &mut self {
            ParseError::Malformed { raw: r, .. }
            | ParseError::UnknownCommand { raw: r, .. }
            | ParseError::ArityMismatch { raw: r, .. }
            | ParseError::EmptyArgument { raw: r, .. } => *r = raw.to_string(),
        }
        self
    }

    fn malformed(raw: &str, reason: impl Into<String>) -> Self {
        ParseError::Malformed {
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }
}

/// Parse a single completion against the command grammar.
pub fn parse_action(raw: &str) -> Result<Action, ParseError> {
    let trimmed = raw.trim();

    let open = trimmed
        .find('(')
        .ok_or_else(|| ParseError::malformed(raw, "missing '('"))?;
    let inner = trimmed
        .strip_suffix(')')
        .and_then(|s| s.get(open + 1..))
        .ok_or_else(|| ParseError::malformed(raw, "missing closing ')'"))?;

    let name = trimmed[..open].trim_end();
    if !grammar::is_identifier(name) {
        return Err(ParseError::malformed(raw, "command name is not an identifier"));
    }

    let args = split_args(inner).map_err(|reason| ParseError::malformed(raw, reason))?;

    let spec = grammar::lookup(name).ok_or_else(|| ParseError::UnknownCommand {
        raw: raw.to_string(),
        command: name.to_string(),
    })?;

    if args.len() != spec.arity() {
        return Err(ParseError::ArityMismatch {
            raw: raw.to_string(),
            command: spec.name,
            expected: spec.arity(),
            actual: args.len(),
        });
    }

    // Arity was checked above, so every index is in bounds.
    let action = match spec.kind {
        CommandKind::LocalAttack => Action::local_attack(&args[0], &args[1]),
        CommandKind::RemoteAttack => Action::remote_attack(&args[0], &args[1], &args[2]),
        CommandKind::ConnectAndInfect => {
            Action::connect_and_infect(&args[0], &args[1], &args[2], &args[3])
        }
    };

    action.map_err(|e| e.with_raw(raw))
}

/// Split an argument list on top-level commas.
///
/// Bare tokens are trimmed and may not contain parentheses. Tokens starting
/// with `"` or `'` run to the matching quote, honour `\` escapes and keep
/// their inner whitespace.
fn split_args(inner: &str) -> Result<Vec<String>, &'static str> {
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut args = Vec::new();
    let mut chars = inner.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let token = match chars.peek().copied() {
            Some(quote) if quote == '"' || quote == '\'' => {
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some('\\') => match chars.next() {
                            Some(c) => value.push(c),
                            None => return Err("dangling escape"),
                        },
                        Some(c) if c == quote => break,
                        Some(c) => value.push(c),
                        None => return Err("unterminated quoted argument"),
                    }
                }
                while chars.next_if(|c| c.is_whitespace()).is_some() {}
                if !matches!(chars.peek(), None | Some(',')) {
                    return Err("unexpected text after quoted argument");
                }
                value
            }
            _ => {
                let mut value = String::new();
                while let Some(c) = chars.next_if(|c| *c != ',') {
                    if c == '(' || c == ')' {
                        return Err("unexpected parenthesis in argument");
                    }
                    value.push(c);
                }
                value.trim().to_string()
            }
        };
        args.push(token);

        match chars.next() {
            Some(',') => continue,
            None => break,
            Some(_) => return Err("unexpected character in argument list"),
        }
    }

    Ok(args)
}

/// A candidate that failed to parse, with its position in the reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub index: usize,
    pub error: ParseError,
}

/// Result of scanning candidates in order for the first parseable one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateSelection {
    pub action: Option<Action>,
    pub index: Option<usize>,
    pub rejections: Vec<Rejection>,
}

/// Try candidates in the order returned; stop at the first that parses.
pub fn parse_candidates<S: AsRef<str>>(candidates: &[S]) -> CandidateSelection {
    let mut selection = CandidateSelection::default();
    for (index, candidate) in candidates.iter().enumerate() {
        match parse_action(candidate.as_ref()) {
            Ok(action) => {
                selection.action = Some(action);
                selection.index = Some(index);
                break;
            }
            Err(error) => selection.rejections.push(Rejection { index, error }),
        }
    }
    selection
}

/// Parse every candidate, splitting them into valid actions and rejections.
pub fn partition<S: AsRef<str>>(candidates: &[S]) -> (Vec<(usize, Action)>, Vec<Rejection>) {
    let mut valid = Vec::new();
    let mut rejections = Vec::new();
    for (index, candidate) in candidates.iter().enumerate() {
        match parse_action(candidate.as_ref()) {
            Ok(action) => valid.push((index, action)),
            Err(error) => rejections.push(Rejection { index, error }),
        }
    }
    (valid, rejections)
}
