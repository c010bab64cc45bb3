//! End-to-end console sessions through the Lodge facade: one input line in,
//! one printed result out, exactly as the interactive loop would see it.

use lodgedb::{Error, FieldValue, Lodge, Output, SchemaRegistry, UsageError};
use tempfile::TempDir;

fn open(dir: &TempDir) -> Lodge {
    Lodge::builder()
        .path(dir.path().join("lodge.json"))
        .open()
        .unwrap()
}

fn created(lodge: &mut Lodge, line: &str) -> String {
    match lodge.dispatch_line(line) {
        Ok(Some(Output::Created(id))) => id,
        other => panic!("expected a created id from {:?}, got {:?}", line, other),
    }
}

fn diagnostic(lodge: &mut Lodge, line: &str) -> String {
    match lodge.dispatch_line(line) {
        Err(Error::Usage(e)) => e.to_string(),
        other => panic!("expected a diagnostic from {:?}, got {:?}", line, other),
    }
}

#[test]
fn create_without_class_name() {
    let dir = TempDir::new().unwrap();
    let mut lodge = open(&dir);

    assert_eq!(diagnostic(&mut lodge, "create"), "** class name missing **");
}

#[test]
fn create_with_unregistered_class() {
    let dir = TempDir::new().unwrap();
    let mut lodge = open(&dir);

    assert_eq!(
        diagnostic(&mut lodge, "create Hotel"),
        "** class doesn't exist **"
    );
}

#[test]
fn an_empty_registry_recognizes_no_classes() {
    let dir = TempDir::new().unwrap();
    let mut lodge = Lodge::builder()
        .path(dir.path().join("lodge.json"))
        .registry(SchemaRegistry::new())
        .open()
        .unwrap();

    assert_eq!(
        diagnostic(&mut lodge, "create User"),
        "** class doesn't exist **"
    );
}

#[test]
fn create_then_show_echoes_the_canonical_form() {
    let dir = TempDir::new().unwrap();
    let mut lodge = open(&dir);

    let id = created(&mut lodge, "create BaseModel");
    match lodge.dispatch_line(&format!("show BaseModel {}", id)).unwrap() {
        Some(Output::Record(text)) => {
            assert!(text.starts_with(&format!("[BaseModel] ({})", id)));
            assert!(text.contains("created_at:"));
            assert!(text.contains("updated_at:"));
        }
        other => panic!("expected a record, got {:?}", other),
    }
}

#[test]
fn destroy_with_unknown_id_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut lodge = open(&dir);

    created(&mut lodge, "create BaseModel");
    assert_eq!(
        diagnostic(&mut lodge, "destroy BaseModel no-such-id"),
        "** no instance found **"
    );
    assert_eq!(lodge.store().len(), 1);
}

#[test]
fn destroy_is_silent_on_success() {
    let dir = TempDir::new().unwrap();
    let mut lodge = open(&dir);

    let id = created(&mut lodge, "create Review");
    assert_eq!(
        lodge
            .dispatch_line(&format!("destroy Review {}", id))
            .unwrap(),
        Some(Output::Unit)
    );
    assert!(lodge.store().is_empty());
}

#[test]
fn update_of_a_previously_absent_field_stores_the_raw_string() {
    let dir = TempDir::new().unwrap();
    let mut lodge = open(&dir);

    let id = created(&mut lodge, "create BaseModel");
    lodge
        .dispatch_line(&format!("update BaseModel {} age 5", id))
        .unwrap();

    let key = format!("BaseModel.{}", id);
    assert_eq!(
        lodge.store().get(&key).unwrap().field("age"),
        Some(&FieldValue::Str("5".into()))
    );
}

#[test]
fn update_coerces_against_existing_numeric_fields() {
    let dir = TempDir::new().unwrap();
    let mut lodge = open(&dir);

    let id = created(&mut lodge, "create Place");
    let key = format!("Place.{}", id);

    lodge
        .dispatch_line(&format!("update Place {} max_guest 6", id))
        .unwrap();
    lodge
        .dispatch_line(&format!("update Place {} longitude 2.35", id))
        .unwrap();

    let record = lodge.store().get(&key).unwrap();
    assert_eq!(record.field("max_guest"), Some(&FieldValue::Int(6)));
    assert_eq!(record.field("longitude"), Some(&FieldValue::Float(2.35)));

    assert_eq!(
        diagnostic(&mut lodge, &format!("update Place {} max_guest many", id)),
        "** invalid value type **"
    );
}

#[test]
fn update_with_a_quoted_value_keeps_its_spaces() {
    let dir = TempDir::new().unwrap();
    let mut lodge = open(&dir);

    let id = created(&mut lodge, "create User");
    lodge
        .dispatch_line(&format!(r#"update User {} first_name "John Ronald""#, id))
        .unwrap();

    let key = format!("User.{}", id);
    assert_eq!(
        lodge.store().get(&key).unwrap().field("first_name"),
        Some(&FieldValue::Str("John Ronald".into()))
    );
}

#[test]
fn reserved_attributes_report_the_exact_diagnostic() {
    let dir = TempDir::new().unwrap();
    let mut lodge = open(&dir);

    let id = created(&mut lodge, "create User");
    assert_eq!(
        diagnostic(&mut lodge, &format!("update User {} id other", id)),
        "** attribute cannot be updated **"
    );
    let key = format!("User.{}", id);
    assert_eq!(lodge.store().get(&key).unwrap().id(), id);
}

#[test]
fn update_diagnostics_follow_the_check_order() {
    let dir = TempDir::new().unwrap();
    let mut lodge = open(&dir);
    let id = created(&mut lodge, "create User");

    assert_eq!(diagnostic(&mut lodge, "update"), "** class name missing **");
    assert_eq!(
        diagnostic(&mut lodge, "update Hotel"),
        "** class doesn't exist **"
    );
    assert_eq!(
        diagnostic(&mut lodge, "update User"),
        "** instance id missing **"
    );
    assert_eq!(
        diagnostic(&mut lodge, "update User no-such-id"),
        "** no instance found **"
    );
    assert_eq!(
        diagnostic(&mut lodge, &format!("update User {}", id)),
        "** attribute name missing **"
    );
    assert_eq!(
        diagnostic(&mut lodge, &format!("update User {} email", id)),
        "** value missing **"
    );
}

#[test]
fn method_call_syntax_reaches_the_same_verbs() {
    let dir = TempDir::new().unwrap();
    let mut lodge = open(&dir);

    let id = created(&mut lodge, "create City");
    created(&mut lodge, "create City");

    assert_eq!(
        lodge.dispatch_line("City.count()").unwrap(),
        Some(Output::Count(2))
    );
    match lodge.dispatch_line("City.all()").unwrap() {
        Some(Output::Records(lines)) => assert_eq!(lines.len(), 2),
        other => panic!("expected records, got {:?}", other),
    }
    match lodge
        .dispatch_line(&format!(r#"City.show("{}")"#, id))
        .unwrap()
    {
        Some(Output::Record(text)) => assert!(text.starts_with("[City]")),
        other => panic!("expected a record, got {:?}", other),
    }
}

#[test]
fn method_call_batch_update_takes_values_as_given() {
    let dir = TempDir::new().unwrap();
    let mut lodge = open(&dir);

    let id = created(&mut lodge, "create Place");
    lodge
        .dispatch_line(&format!(
            r#"Place.update("{}", {{'name': "Chalet", 'stars': 4}})"#,
            id
        ))
        .unwrap();

    let key = format!("Place.{}", id);
    let record = lodge.store().get(&key).unwrap();
    assert_eq!(record.field("name"), Some(&FieldValue::Str("Chalet".into())));
    // no coercion on the batch path: the integer arrives as an integer
    assert_eq!(record.field("stars"), Some(&FieldValue::Int(4)));
}

#[test]
fn unrecognized_lines_are_reported_once() {
    let dir = TempDir::new().unwrap();
    let mut lodge = open(&dir);

    assert_eq!(
        diagnostic(&mut lodge, "teleport User"),
        "** unknown command **"
    );
    assert_eq!(
        diagnostic(&mut lodge, "User.teleport()"),
        "** unknown command **"
    );
}

#[test]
fn blank_lines_do_nothing() {
    let dir = TempDir::new().unwrap();
    let mut lodge = open(&dir);

    assert_eq!(lodge.dispatch_line("   ").unwrap(), None);
}

#[test]
fn usage_errors_render_through_the_unified_error_too() {
    let dir = TempDir::new().unwrap();
    let mut lodge = open(&dir);

    let err = lodge.dispatch_line("show User").unwrap_err();
    assert!(matches!(err, Error::Usage(UsageError::MissingInstanceId)));
    assert_eq!(err.to_string(), "** instance id missing **");
}
