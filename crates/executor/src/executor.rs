//! Command execution against a [`FileStore`].

use tracing::debug;

use lodge_core::{FieldValue, Record};
use lodge_storage::FileStore;

use crate::command::{Command, Output, UpdateArgs};
use crate::error::{Result, UsageError};
use crate::parse;

/// Applies parsed commands to the store it owns. Stateless across calls;
/// every mutating command persists a full snapshot before returning.
#[derive(Debug)]
pub struct Executor {
    store: FileStore,
}

impl Executor {
    /// Wrap a (normally already loaded) store.
    pub fn new(store: FileStore) -> Self {
        Executor { store }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Mutable access to the underlying store.
    pub fn store_mut(&mut self) -> &mut FileStore {
        &mut self.store
    }

    /// Give the store back.
    pub fn into_store(self) -> FileStore {
        self.store
    }

    /// Parse and execute one line. `Ok(None)` means a blank line.
    pub fn dispatch_line(&mut self, line: &str) -> Result<Option<Output>> {
        match parse::parse_line(line, self.store.registry())? {
            Some(command) => self.execute(command).map(Some),
            None => Ok(None),
        }
    }

    /// Execute one command.
    pub fn execute(&mut self, command: Command) -> Result<Output> {
        debug!(?command, "executing");
        match command {
            Command::Create { class } => self.create(&class),
            Command::Show { class, id } => self.show(&class, id),
            Command::Destroy { class, id } => self.destroy(&class, id),
            Command::All { class } => self.all(class.as_deref()),
            Command::Count { class } => self.count(&class),
            Command::Update { class, id, args } => self.update(&class, id, args),
        }
    }

    fn create(&mut self, class: &str) -> Result<Output> {
        let id = self.store.create(class)?;
        self.store.persist()?;
        Ok(Output::Created(id))
    }

    fn show(&self, class: &str, id: Option<String>) -> Result<Output> {
        let key = object_key(class, id)?;
        let record = self.store.get(&key).ok_or(UsageError::InstanceNotFound)?;
        Ok(Output::Record(record.to_string()))
    }

    fn destroy(&mut self, class: &str, id: Option<String>) -> Result<Output> {
        let key = object_key(class, id)?;
        if self.store.remove(&key).is_none() {
            return Err(UsageError::InstanceNotFound.into());
        }
        self.store.persist()?;
        Ok(Output::Unit)
    }

    fn all(&self, class: Option<&str>) -> Result<Output> {
        let lines = self
            .store
            .all()
            .values()
            .filter(|record| class.map_or(true, |class| record.type_name() == class))
            .map(Record::to_string)
            .collect();
        Ok(Output::Records(lines))
    }

    fn count(&self, class: &str) -> Result<Output> {
        let count = self
            .store
            .all()
            .values()
            .filter(|record| record.type_name() == class)
            .count();
        Ok(Output::Count(count))
    }

    fn update(&mut self, class: &str, id: Option<String>, args: UpdateArgs) -> Result<Output> {
        let key = object_key(class, id)?;
        let record = self
            .store
            .get_mut(&key)
            .ok_or(UsageError::InstanceNotFound)?;

        match args {
            UpdateArgs::Single { attribute, value } => {
                let attribute = attribute.ok_or(UsageError::MissingAttribute)?;
                let value = value.ok_or(UsageError::MissingValue)?;
                if Record::is_reserved(&attribute) {
                    return Err(UsageError::ReservedAttribute.into());
                }
                let coerced = coerce(record.field(&attribute), value)?;
                record.set_field(attribute, coerced);
            }
            UpdateArgs::Batch(pairs) => {
                // validate the whole batch before applying anything
                if pairs.iter().any(|(name, _)| Record::is_reserved(name)) {
                    return Err(UsageError::ReservedAttribute.into());
                }
                for (name, value) in pairs {
                    record.set_field(name, value);
                }
            }
        }
        record.touch();
        self.store.persist()?;
        Ok(Output::Unit)
    }
}

fn object_key(class: &str, id: Option<String>) -> Result<String> {
    let id = id.ok_or(UsageError::MissingInstanceId)?;
    Ok(format!("{}.{}", class, id))
}

/// Pick the parse strategy from the field's current variant: an existing
/// numeric value demands a numeric parse, anything else (including an
/// absent or null field) stores the raw string.
fn coerce(current: Option<&FieldValue>, raw: String) -> Result<FieldValue> {
    match current {
        Some(FieldValue::Int(_)) => raw
            .parse::<i64>()
            .map(FieldValue::Int)
            .map_err(|_| UsageError::InvalidValueType.into()),
        Some(FieldValue::Float(_)) => raw
            .parse::<f64>()
            .map(FieldValue::Float)
            .map_err(|_| UsageError::InvalidValueType.into()),
        _ => Ok(FieldValue::Str(raw)),
    }
}
