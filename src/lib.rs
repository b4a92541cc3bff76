//! Equal-split household ledger: records who paid for what and works out
//! who has to pay whom to settle up.

pub mod balance;
pub mod book;
pub mod config;
pub mod csv_export;
pub mod error;
pub mod exchange;
pub mod form;
pub mod notification;
pub mod report;
pub mod schemas;
pub mod store;

pub use balance::{compute_balances, summarize, BalanceSummary};
pub use book::ExpenseBook;
pub use config::Config;
pub use csv_export::{export_csv, EXPORT_FILE_NAME};
pub use error::{BookError, ConfigError, ExportError, StoreError, ValidationError};
pub use exchange::{compute_settlement, plan_exchanges, Exchange, Settlement, SETTLE_TOLERANCE};
pub use form::ExpenseForm;
pub use schemas::{Balance, Expense, NewExpense, Participant};
pub use store::{ExpenseStore, JsonFileStore, MemoryStore, MongoStore};
