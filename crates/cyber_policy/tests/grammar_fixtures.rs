//! Prompt and parser checked against the same fixture table.

use cyber_policy::{parse_action, Action, CommandKind, ParseError, COMMANDS, SYSTEM_PROMPT};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// (signature line shown to the model, a call in that form, the action it yields)
fn fixtures() -> Vec<(&'static str, &'static str, Action)> {
    vec![
        (
            "run_attack(node_id, vulnerability_id)",
            "run_attack(client, SearchEdgeHistory)",
            Action::local_attack("client", "SearchEdgeHistory").unwrap(),
        ),
        (
            "run_remote_attack(node_id, target_node_id, vulnerability_id)",
            "run_remote_attack(client, Website, ScanPageContent)",
            Action::remote_attack("client", "Website", "ScanPageContent").unwrap(),
        ),
        (
            "connect_and_infect(node_id, target_node_id, port_name, credentials)",
            "connect_and_infect(client, AzureVM, SSH, ReusedMySqlCred-web)",
            Action::connect_and_infect("client", "AzureVM", "SSH", "ReusedMySqlCred-web").unwrap(),
        ),
    ]
}

#[test]
fn every_fixture_signature_appears_in_the_system_prompt() {
    for (signature, _, _) in fixtures() {
        assert!(
            SYSTEM_PROMPT.lines().any(|line| line.trim() == signature),
            "prompt is missing {signature}"
        );
    }
}

#[test]
fn every_fixture_call_parses_to_its_action() {
    for (_, call, expected) in fixtures() {
        assert_eq!(parse_action(call).unwrap(), expected);
    }
}

#[test]
fn fixtures_cover_the_whole_command_table() {
    let fixtures = fixtures();
    assert_eq!(fixtures.len(), COMMANDS.len());
    for command in &COMMANDS {
        assert!(fixtures.iter().any(|(sig, _, _)| *sig == command.signature()));
    }
}

#[test]
fn prompt_lists_exactly_the_parser_commands() {
    let listed: Vec<&str> = SYSTEM_PROMPT
        .lines()
        .filter_map(|line| line.trim().split_once('(').map(|(name, _)| name))
        .filter(|name| !name.contains(' '))
        .collect();
    let names: Vec<&str> = COMMANDS.iter().map(|c| c.name).collect();
    assert_eq!(listed, names);
}

#[test]
fn display_output_parses_back() {
    let actions = [
        Action::local_attack("1", "CVE-2021-44228").unwrap(),
        Action::remote_attack("node a", "node(b)", "vuln,1").unwrap(),
        Action::connect_and_infect("1", "2", "HTTPS", "say \"hi\"").unwrap(),
        Action::local_attack(" padded ", "back\\slash").unwrap(),
    ];
    for action in actions {
        let rendered = action.to_string();
        assert_eq!(parse_action(&rendered).unwrap(), action, "{rendered}");
    }
}

#[test]
fn signatures_with_wrong_arity_are_rejected() {
    for command in &COMMANDS {
        let mut params: Vec<&str> = command.params.to_vec();
        params.pop();
        let short = format!("{}({})", command.name, params.join(", "));
        match parse_action(&short) {
            Err(ParseError::ArityMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, command.arity());
                assert_eq!(actual, command.arity() - 1);
            }
            other => panic!("expected arity mismatch for {short}, got {other:?}"),
        }
    }
}

/// Characters the grammar treats specially, plus ordinary token material.
const PIECES: [&str; 13] = [
    "a", "7", "-", ",", "\"", "'", "(", ")", "\\", " ", "\t", "x y", "é",
];

/// Every non-blank token of one or two pieces, with and without edge padding.
fn tokens() -> Vec<String> {
    let mut out = Vec::new();
    for a in PIECES {
        out.push(a.to_string());
        for b in PIECES {
            out.push(format!("{a}{b}"));
        }
    }
    let padded: Vec<String> = out.iter().map(|t| format!(" {t}\t")).collect();
    out.extend(padded);
    out.retain(|t| !t.trim().is_empty());
    out
}

fn build(kind: CommandKind, args: &[&str]) -> Action {
    match kind {
        CommandKind::LocalAttack => Action::local_attack(args[0], args[1]),
        CommandKind::RemoteAttack => Action::remote_attack(args[0], args[1], args[2]),
        CommandKind::ConnectAndInfect => {
            Action::connect_and_infect(args[0], args[1], args[2], args[3])
        }
    }
    .unwrap()
}

fn assert_round_trip(action: &Action) {
    let rendered = action.to_string();
    assert_eq!(&parse_action(&rendered).unwrap(), action, "{rendered}");
}

#[test]
fn every_token_round_trips_in_every_position() {
    let tokens = tokens();
    for command in &COMMANDS {
        for position in 0..command.arity() {
            for token in &tokens {
                let mut args = vec!["n"; command.arity()];
                args[position] = token.as_str();
                assert_round_trip(&build(command.kind, &args));
            }
        }
    }
}

#[test]
fn random_token_mixes_round_trip() {
    let tokens = tokens();
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..2000 {
        let command = COMMANDS.choose(&mut rng).unwrap();
        let args: Vec<&str> = (0..command.arity())
            .map(|_| tokens.choose(&mut rng).unwrap().as_str())
            .collect();
        assert_round_trip(&build(command.kind, &args));
    }
}
