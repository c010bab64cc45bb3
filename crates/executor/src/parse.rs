//! Line → [`Command`] conversion.
//!
//! Two accepted shapes:
//! - canonical: `<verb> <type> [<id> [<attribute> <value>]]`, tokenized on
//!   whitespace — except the `update` tail, which is split with shell-like
//!   quoting so a quoted value keeps its internal spaces;
//! - method call: `<Type>.<verb>(<args>)`, recognized by the `.`/`(`/`)`
//!   triple and lowered onto the same command builder. `update` grows a
//!   batch form there: `(<id>, {<field>: <value>, ...})`.

use lodge_core::{FieldValue, SchemaRegistry};

use crate::command::{Command, UpdateArgs};
use crate::error::UsageError;

/// REPL meta-commands, checked before command parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    /// Leave the loop
    Quit,
}

/// Check for a meta-command before delegating to the command parser.
pub fn check_meta_command(line: &str) -> Option<MetaCommand> {
    match line.trim() {
        "quit" => Some(MetaCommand::Quit),
        _ => None,
    }
}

/// Parse one input line against the registry.
///
/// `Ok(None)` means a blank line: nothing to execute, nothing to print.
pub fn parse_line(line: &str, registry: &SchemaRegistry) -> Result<Option<Command>, UsageError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Some(call) = MethodCall::detect(trimmed) {
        return call.into_command(registry).map(Some);
    }

    let (verb, rest) = split_verb(trimmed);
    let args = if verb == "update" {
        shlex::split(rest).ok_or(UsageError::UnknownCommand)?
    } else {
        rest.split_whitespace().map(str::to_string).collect()
    };
    command_from_parts(verb, &args, registry).map(Some)
}

// =========================================================================
// Canonical form
// =========================================================================

fn split_verb(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (line, ""),
    }
}

/// Shared builder for both syntaxes. `args[0]` is the type name.
fn command_from_parts(
    verb: &str,
    args: &[String],
    registry: &SchemaRegistry,
) -> Result<Command, UsageError> {
    match verb {
        "create" => Ok(Command::Create {
            class: required_class(args, registry)?,
        }),
        "show" => Ok(Command::Show {
            class: required_class(args, registry)?,
            id: args.get(1).cloned(),
        }),
        "destroy" => Ok(Command::Destroy {
            class: required_class(args, registry)?,
            id: args.get(1).cloned(),
        }),
        "all" => {
            let class = args.first().cloned();
            if let Some(class) = &class {
                if !registry.contains(class) {
                    return Err(UsageError::UnknownClass);
                }
            }
            Ok(Command::All { class })
        }
        "count" => Ok(Command::Count {
            class: required_class(args, registry)?,
        }),
        "update" => Ok(Command::Update {
            class: required_class(args, registry)?,
            id: args.get(1).cloned(),
            args: UpdateArgs::Single {
                attribute: args.get(2).cloned(),
                value: args.get(3).cloned(),
            },
        }),
        _ => Err(UsageError::UnknownCommand),
    }
}

fn required_class(args: &[String], registry: &SchemaRegistry) -> Result<String, UsageError> {
    let class = args.first().ok_or(UsageError::MissingClass)?;
    if !registry.contains(class) {
        return Err(UsageError::UnknownClass);
    }
    Ok(class.clone())
}

// =========================================================================
// Method-call form
// =========================================================================

/// A `<Type>.<verb>(<args>)` line, split but not yet validated.
struct MethodCall<'a> {
    class: &'a str,
    verb: &'a str,
    args: &'a str,
}

impl<'a> MethodCall<'a> {
    fn detect(line: &'a str) -> Option<Self> {
        let open = line.find('(')?;
        let close = line.rfind(')')?;
        if close < open || !line[close + 1..].trim().is_empty() {
            return None;
        }
        let (class, verb) = line[..open].split_once('.')?;
        let (class, verb) = (class.trim(), verb.trim());
        if class.is_empty()
            || verb.is_empty()
            || class.chars().any(char::is_whitespace)
            || verb.chars().any(char::is_whitespace)
        {
            return None;
        }
        Some(MethodCall {
            class,
            verb,
            args: line[open + 1..close].trim(),
        })
    }

    fn into_command(self, registry: &SchemaRegistry) -> Result<Command, UsageError> {
        if self.verb == "update" {
            if let Some(brace) = self.args.find('{') {
                if !registry.contains(self.class) {
                    return Err(UsageError::UnknownClass);
                }
                let id = strip_quotes(self.args[..brace].trim().trim_end_matches(',').trim());
                let pairs = parse_assignment_map(self.args[brace..].trim())?;
                return Ok(Command::Update {
                    class: self.class.to_string(),
                    id: (!id.is_empty()).then(|| id.to_string()),
                    args: UpdateArgs::Batch(pairs),
                });
            }
        }

        let mut args = vec![self.class.to_string()];
        if !self.args.is_empty() {
            args.extend(
                self.args
                    .split(',')
                    .map(|arg| strip_quotes(arg.trim()).to_string()),
            );
        }
        command_from_parts(self.verb, &args, registry)
    }
}

/// Parse the `{<field>: <value>, ...}` literal of a batch update. Keys and
/// strings may be single- or double-quoted; values land as given, with no
/// coercion against the record's current field types.
fn parse_assignment_map(raw: &str) -> Result<Vec<(String, FieldValue)>, UsageError> {
    let normalized = raw.replace('\'', "\"");
    let map: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&normalized).map_err(|_| UsageError::UnknownCommand)?;
    let mut pairs = Vec::with_capacity(map.len());
    for (name, value) in map {
        let value = FieldValue::from_json(&value).ok_or(UsageError::UnknownCommand)?;
        pairs.push((name, value));
    }
    Ok(pairs)
}

fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    let bytes = s.as_bytes();
    if s.len() >= 2
        && ((bytes[0] == b'"' && bytes[s.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[s.len() - 1] == b'\''))
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodge_core::Schema;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
            .with(Schema::new("User"))
            .with(Schema::new("Place"))
    }

    fn parse(line: &str) -> Result<Option<Command>, UsageError> {
        parse_line(line, &registry())
    }

    #[test]
    fn blank_lines_parse_to_nothing() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn quit_is_a_meta_command_not_a_verb() {
        assert_eq!(check_meta_command(" quit "), Some(MetaCommand::Quit));
        assert_eq!(check_meta_command("quite"), None);
        assert_eq!(parse("quit"), Err(UsageError::UnknownCommand));
    }

    #[test]
    fn create_requires_a_known_class() {
        assert_eq!(parse("create"), Err(UsageError::MissingClass));
        assert_eq!(parse("create Ghost"), Err(UsageError::UnknownClass));
        assert_eq!(
            parse("create User"),
            Ok(Some(Command::Create {
                class: "User".into()
            }))
        );
    }

    #[test]
    fn show_keeps_a_missing_id_for_the_executor() {
        assert_eq!(
            parse("show User"),
            Ok(Some(Command::Show {
                class: "User".into(),
                id: None
            }))
        );
        assert_eq!(
            parse("show User abc"),
            Ok(Some(Command::Show {
                class: "User".into(),
                id: Some("abc".into())
            }))
        );
    }

    #[test]
    fn all_takes_an_optional_class() {
        assert_eq!(parse("all"), Ok(Some(Command::All { class: None })));
        assert_eq!(
            parse("all Place"),
            Ok(Some(Command::All {
                class: Some("Place".into())
            }))
        );
        assert_eq!(parse("all Ghost"), Err(UsageError::UnknownClass));
    }

    #[test]
    fn update_value_keeps_quoted_spaces() {
        assert_eq!(
            parse(r#"update User abc first_name "John Doe""#),
            Ok(Some(Command::Update {
                class: "User".into(),
                id: Some("abc".into()),
                args: UpdateArgs::Single {
                    attribute: Some("first_name".into()),
                    value: Some("John Doe".into()),
                },
            }))
        );
    }

    #[test]
    fn update_with_partial_arguments_still_parses() {
        assert_eq!(
            parse("update User abc"),
            Ok(Some(Command::Update {
                class: "User".into(),
                id: Some("abc".into()),
                args: UpdateArgs::Single {
                    attribute: None,
                    value: None,
                },
            }))
        );
    }

    #[test]
    fn unknown_verbs_are_rejected() {
        assert_eq!(parse("frobnicate User"), Err(UsageError::UnknownCommand));
    }

    #[test]
    fn method_call_lowers_to_the_canonical_verb() {
        assert_eq!(
            parse("User.all()"),
            Ok(Some(Command::All {
                class: Some("User".into())
            }))
        );
        assert_eq!(
            parse("User.count()"),
            Ok(Some(Command::Count {
                class: "User".into()
            }))
        );
        assert_eq!(
            parse(r#"User.show("abc")"#),
            Ok(Some(Command::Show {
                class: "User".into(),
                id: Some("abc".into())
            }))
        );
        assert_eq!(
            parse(r#"User.destroy('abc')"#),
            Ok(Some(Command::Destroy {
                class: "User".into(),
                id: Some("abc".into())
            }))
        );
    }

    #[test]
    fn method_call_update_with_three_arguments() {
        assert_eq!(
            parse(r#"User.update("abc", "first_name", "John Doe")"#),
            Ok(Some(Command::Update {
                class: "User".into(),
                id: Some("abc".into()),
                args: UpdateArgs::Single {
                    attribute: Some("first_name".into()),
                    value: Some("John Doe".into()),
                },
            }))
        );
    }

    #[test]
    fn method_call_update_with_map_takes_values_as_given() {
        let parsed = parse(r#"User.update("abc", {'first_name': "John", 'age': 89})"#);
        assert_eq!(
            parsed,
            Ok(Some(Command::Update {
                class: "User".into(),
                id: Some("abc".into()),
                args: UpdateArgs::Batch(vec![
                    ("first_name".into(), FieldValue::Str("John".into())),
                    ("age".into(), FieldValue::Int(89)),
                ]),
            }))
        );
    }

    #[test]
    fn method_call_on_unknown_class_is_rejected() {
        assert_eq!(parse("Ghost.all()"), Err(UsageError::UnknownClass));
        assert_eq!(
            parse(r#"Ghost.update("abc", {'a': 1})"#),
            Err(UsageError::UnknownClass)
        );
    }

    #[test]
    fn malformed_method_calls_are_unknown_commands() {
        assert_eq!(parse("User.all("), Err(UsageError::UnknownCommand));
        assert_eq!(
            parse(r#"User.update("abc", {broken)"#),
            Err(UsageError::UnknownCommand)
        );
        assert_eq!(parse("User.frobnicate()"), Err(UsageError::UnknownCommand));
    }
}
