//! The command grammar shared by the prompt and the parser.
//!
//! `COMMANDS` is the only place command names and arities are written down.
//! The system prompt is rendered from it and the parser dispatches on it, so
//! the two cannot drift apart.

/// Which action variant a command produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    LocalAttack,
    RemoteAttack,
    ConnectAndInfect,
}

/// Name and parameter list of one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub kind: CommandKind,
    pub name: &'static str,
    pub params: &'static [&'static str],
}

impl CommandSpec {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// `name(param, param, ...)` as shown to the model.
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.params.join(", "))
    }
}

pub const COMMANDS: [CommandSpec; 3] = [
    CommandSpec {
        kind: CommandKind::LocalAttack,
        name: "run_attack",
        params: &["node_id", "vulnerability_id"],
    },
    CommandSpec {
        kind: CommandKind::RemoteAttack,
        name: "run_remote_attack",
        params: &["node_id", "target_node_id", "vulnerability_id"],
    },
    CommandSpec {
        kind: CommandKind::ConnectAndInfect,
        name: "connect_and_infect",
        params: &["node_id", "target_node_id", "port_name", "credentials"],
    },
];

const HEADER: &str = "Three commands, each with fixed arity and literal name:";
const FOOTER: &str = "Response must be exactly one call in \"name(arg1, arg2, ...)\" form.";

/// Look up a command by its literal (case-sensitive) name.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|c| c.name == name)
}

pub fn spec_for(kind: CommandKind) -> &'static CommandSpec {
    match kind {
        CommandKind::LocalAttack => &COMMANDS[0],
        CommandKind::RemoteAttack => &COMMANDS[1],
        CommandKind::ConnectAndInfect => &COMMANDS[2],
    }
}

/// Render the system instruction text from the command table.
pub fn render_instructions() -> String {
    let mut lines = Vec::with_capacity(COMMANDS.len() + 2);
    lines.push(HEADER.to_string());
    for command in &COMMANDS {
        lines.push(format!("  {}", command.signature()));
    }
    lines.push(FOOTER.to_string());
    lines.join("\n")
}

/// Whether `s` is a bare identifier: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
