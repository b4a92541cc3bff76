use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bson::doc;
use log::warn;
use mongodb::options::ReplaceOptions;
use mongodb::sync::{Client, Collection};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;
use crate::schemas::Expense;

/// Key-value persistence for the expense list.
///
/// `load` returns `Ok(None)` when nothing was ever saved under `key`.
pub trait ExpenseStore {
    fn load(&self, key: &str) -> Result<Option<Vec<Expense>>, StoreError>;
    fn save(&self, key: &str, expenses: &[Expense]) -> Result<(), StoreError>;
}

/// Loads the list under `key`, treating missing or unreadable data as empty.
pub fn load_or_empty<S: ExpenseStore + ?Sized>(store: &S, key: &str) -> Vec<Expense> {
    match store.load(key) {
        Ok(Some(expenses)) => expenses,
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!("discarding stored expenses under '{key}': {err}");
            Vec::new()
        }
    }
}

/// Keeps serialized lists in memory, the way a browser keeps them in local
/// storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&self, key: &str, raw: impl Into<String>) {
        self.entries.borrow_mut().insert(key.to_string(), raw.into());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl ExpenseStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<Expense>>, StoreError> {
        match self.entries.borrow().get(key) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, expenses: &[Expense]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(expenses)?;
        self.set_raw(key, raw);
        Ok(())
    }
}

/// A JSON object on disk mapping each storage key to its expense array.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Option<BTreeMap<String, Value>>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl ExpenseStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Vec<Expense>>, StoreError> {
        let Some(mut entries) = self.read_entries()? else {
            return Ok(None);
        };
        match entries.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, expenses: &[Expense]) -> Result<(), StoreError> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries.unwrap_or_default(),
            // Other keys in a damaged file cannot be kept anyway
            Err(StoreError::Malformed(err)) => {
                warn!("overwriting malformed {}: {err}", self.path.display());
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        entries.insert(key.to_string(), serde_json::to_value(expenses)?);
        let content = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
struct StoredExpenses {
    key: String,
    expenses: Vec<Expense>,
}

/// One document per storage key in a MongoDB collection.
#[derive(Clone, Debug)]
pub struct MongoStore {
    collection: Collection<StoredExpenses>,
}

impl MongoStore {
    pub const DATABASE: &'static str = "RoomSplit";
    pub const COLLECTION: &'static str = "Expenses";

    pub fn connect(uri: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri)?;
        Ok(Self::with_client(&client))
    }

    pub fn with_client(client: &Client) -> Self {
        MongoStore {
            collection: client
                .database(Self::DATABASE)
                .collection::<StoredExpenses>(Self::COLLECTION),
        }
    }
}

impl ExpenseStore for MongoStore {
    fn load(&self, key: &str) -> Result<Option<Vec<Expense>>, StoreError> {
        let stored = self.collection.find_one(doc! { "key": key }, None)?;
        Ok(stored.map(|stored| stored.expenses))
    }

    fn save(&self, key: &str, expenses: &[Expense]) -> Result<(), StoreError> {
        let stored = StoredExpenses {
            key: key.to_string(),
            expenses: expenses.to_vec(),
        };
        let options = ReplaceOptions::builder().upsert(true).build();
        self.collection
            .replace_one(doc! { "key": key }, stored, options)?;
        Ok(())
    }
}
