//! The closed action vocabulary the environment accepts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grammar::{self, CommandKind, CommandSpec};
use crate::parse::ParseError;

/// One structured command. Identifiers are opaque to the policy: node ids,
/// vulnerability ids, port names and credentials are whatever the
/// environment uses, but none of them may be empty or blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", try_from = "UncheckedAction")]
pub enum Action {
    LocalAttack {
        node_id: String,
        vulnerability_id: String,
    },
    RemoteAttack {
        source_node_id: String,
        target_node_id: String,
        vulnerability_id: String,
    },
    ConnectAndInfect {
        source_node_id: String,
        target_node_id: String,
        port_name: String,
        credential: String,
    },
}

/// Wire shape of [`Action`] before the non-blank check.
#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum UncheckedAction {
    LocalAttack {
        node_id: String,
        vulnerability_id: String,
    },
    RemoteAttack {
        source_node_id: String,
        target_node_id: String,
        vulnerability_id: String,
    },
    ConnectAndInfect {
        source_node_id: String,
        target_node_id: String,
        port_name: String,
        credential: String,
    },
}

impl TryFrom<UncheckedAction> for Action {
    type Error = ParseError;

    fn try_from(unchecked: UncheckedAction) -> Result<Self, ParseError> {
        match unchecked {
            UncheckedAction::LocalAttack {
                node_id,
                vulnerability_id,
            } => Action::local_attack(node_id, vulnerability_id),
            UncheckedAction::RemoteAttack {
                source_node_id,
                target_node_id,
                vulnerability_id,
            } => Action::remote_attack(source_node_id, target_node_id, vulnerability_id),
            UncheckedAction::ConnectAndInfect {
                source_node_id,
                target_node_id,
                port_name,
                credential,
            } => Action::connect_and_infect(source_node_id, target_node_id, port_name, credential),
        }
    }
}

impl Action {
    /// Fails with [`ParseError::EmptyArgument`] if either field is blank.
    pub fn local_attack(
        node_id: impl Into<String>,
        vulnerability_id: impl Into<String>,
    ) -> Result<Self, ParseError> {
        Action::LocalAttack {
            node_id: node_id.into(),
            vulnerability_id: vulnerability_id.into(),
        }
        .checked()
    }

    pub fn remote_attack(
        source_node_id: impl Into<String>,
        target_node_id: impl Into<String>,
        vulnerability_id: impl Into<String>,
    ) -> Result<Self, ParseError> {
        Action::RemoteAttack {
            source_node_id: source_node_id.into(),
            target_node_id: target_node_id.into(),
            vulnerability_id: vulnerability_id.into(),
        }
        .checked()
    }

    pub fn connect_and_infect(
        source_node_id: impl Into<String>,
        target_node_id: impl Into<String>,
        port_name: impl Into<String>,
        credential: impl Into<String>,
    ) -> Result<Self, ParseError> {
        Action::ConnectAndInfect {
            source_node_id: source_node_id.into(),
            target_node_id: target_node_id.into(),
            port_name: port_name.into(),
            credential: credential.into(),
        }
        .checked()
    }

    fn checked(self) -> Result<Self, ParseError> {
        match self.args().iter().position(|a| a.trim().is_empty()) {
            Some(position) => Err(ParseError::EmptyArgument {
                raw: self.to_string(),
                command: self.command_name(),
                position,
            }),
            None => Ok(self),
        }
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Action::LocalAttack { .. } => CommandKind::LocalAttack,
            Action::RemoteAttack { .. } => CommandKind::RemoteAttack,
            Action::ConnectAndInfect { .. } => CommandKind::ConnectAndInfect,
        }
    }

    pub fn command(&self) -> &'static CommandSpec {
        grammar::spec_for(self.kind())
    }

    pub fn command_name(&self) -> &'static str {
        self.command().name
    }

    /// Arguments in grammar order.
    pub fn args(&self) -> Vec<&str> {
        match self {
            Action::LocalAttack {
                node_id,
                vulnerability_id,
            } => vec![node_id.as_str(), vulnerability_id.as_str()],
            Action::RemoteAttack {
                source_node_id,
                target_node_id,
                vulnerability_id,
            } => vec![
                source_node_id.as_str(),
                target_node_id.as_str(),
                vulnerability_id.as_str(),
            ],
            Action::ConnectAndInfect {
                source_node_id,
                target_node_id,
                port_name,
                credential,
            } => vec![
                source_node_id.as_str(),
                target_node_id.as_str(),
                port_name.as_str(),
                credential.as_str(),
            ],
        }
    }
}

/// Renders the canonical grammar form, e.g. `run_attack(1, 2)`.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.command_name())?;
        for (i, arg) in self.args().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_arg(f, arg)?;
        }
        f.write_str(")")
    }
}

fn needs_quotes(arg: &str) -> bool {
    arg.is_empty()
        || arg.trim() != arg
        || arg
            .chars()
            .any(|c| matches!(c, ',' | '(' | ')' | '"' | '\'' | '\\'))
}

fn write_arg(f: &mut fmt::Formatter<'_>, arg: &str) -> fmt::Result {
    if !needs_quotes(arg) {
        return f.write_str(arg);
    }
    f.write_str("\"")?;
    for c in arg.chars() {
        if c == '"' || c == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("\"")
}
