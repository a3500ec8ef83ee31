//! Integration tests for the slide-relay-core public API.
//!
//! These tests walk a raw payload through the same steps the server performs
//! (decode → table lookup → reply wording) without any I/O, exercising the
//! protocol, domain, and keymap modules together.

use slide_relay_core::{
    keymap::KeyName, CommandRequest, CommandResult, CommandTable, ResultKind,
    INVALID_COMMAND_FORMAT,
};

/// Mirrors the dispatcher's decision without a key injector: resolved
/// commands are assumed to succeed.
fn resolve(table: &CommandTable, payload: &str) -> (CommandResult, Option<KeyName>) {
    let request = CommandRequest::decode(payload).unwrap_or_else(|_| CommandRequest::empty());
    match request.command().filter(|c| !c.is_empty()) {
        None => (CommandResult::invalid_format(), None),
        Some(name) => match table.lookup(name) {
            None => (CommandResult::unknown(name), None),
            Some(entry) => (CommandResult::performed(entry.description), Some(entry.key)),
        },
    }
}

#[test]
fn test_next_slide_scenario() {
    let table = CommandTable::builtin();

    let (result, key) = resolve(&table, r#"{"command":"next_slide"}"#);

    assert_eq!(result.text(), "Action performed: Next Slide");
    assert_eq!(key, Some(KeyName::Right));
}

#[test]
fn test_unknown_command_scenario() {
    let table = CommandTable::builtin();

    let (result, key) = resolve(&table, r#"{"command":"unknown_cmd"}"#);

    assert_eq!(result.text(), "Unknown command: unknown_cmd");
    assert_eq!(result.kind(), ResultKind::Unknown);
    assert_eq!(key, None);
}

#[test]
fn test_not_json_scenario() {
    let table = CommandTable::builtin();

    let (result, key) = resolve(&table, "not valid json");

    assert_eq!(result.text(), INVALID_COMMAND_FORMAT);
    assert_eq!(key, None);
}

#[test]
fn test_missing_command_field_scenario() {
    let table = CommandTable::builtin();

    let (result, _) = resolve(&table, "{}");

    assert_eq!(result.text(), "Invalid command format");
}

#[test]
fn test_every_table_entry_round_trips_through_a_request() {
    let table = CommandTable::builtin();

    for (name, entry) in table.iter() {
        let payload = serde_json::json!({ "command": name }).to_string();

        let (result, key) = resolve(&table, &payload);

        assert_eq!(
            result.text(),
            format!("Action performed: {}", entry.description)
        );
        assert_eq!(key, Some(entry.key));
    }
}

#[test]
fn test_table_keys_parse_back_from_their_names() {
    let table = CommandTable::builtin();
    for (_, entry) in table.iter() {
        let parsed: KeyName = entry.key.as_str().parse().expect("key name must parse");
        assert_eq!(parsed, entry.key);
    }
}
