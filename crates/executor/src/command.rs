//! The command and output model.
//!
//! `id`, `attribute`, and `value` stay `Option`s through parsing: the
//! console's diagnostic order interleaves parse-time checks (argument
//! present?) with store-time checks (instance exists?), so missing
//! arguments are reported by the executor, not the parser.

use lodge_core::FieldValue;

/// One fully parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `create <type>` — construct, persist, report the new id
    Create {
        /// Schema name
        class: String,
    },
    /// `show <type> <id>` — canonical text form of one record
    Show {
        /// Schema name
        class: String,
        /// Instance id, if one was given
        id: Option<String>,
    },
    /// `destroy <type> <id>` — remove and persist; silent on success
    Destroy {
        /// Schema name
        class: String,
        /// Instance id, if one was given
        id: Option<String>,
    },
    /// `all [<type>]` — canonical text forms, insertion order
    All {
        /// Schema name filter; `None` lists every record
        class: Option<String>,
    },
    /// `count <type>` — number of records of one type
    Count {
        /// Schema name
        class: String,
    },
    /// `update <type> <id> …` — set one field (coerced) or many (as given)
    Update {
        /// Schema name
        class: String,
        /// Instance id, if one was given
        id: Option<String>,
        /// Single assignment or batch of assignments
        args: UpdateArgs,
    },
}

/// Arguments of an update command.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateArgs {
    /// Canonical four-argument form. The textual value is coerced against
    /// the field's current variant at execution time.
    Single {
        /// Field name, if one was given
        attribute: Option<String>,
        /// Textual value, if one was given
        value: Option<String>,
    },
    /// Method-call map form: every pair applied in one call, values taken
    /// as given (no coercion against the current field type).
    Batch(Vec<(String, FieldValue)>),
}

/// What a successfully executed command produces. Rendering to stdout is
/// the caller's job.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Id of a freshly created record
    Created(String),
    /// Canonical text form of one record
    Record(String),
    /// Canonical text forms, one per matching record
    Records(Vec<String>),
    /// Number of matching records
    Count(usize),
    /// Nothing to print (destroy, update)
    Unit,
}
