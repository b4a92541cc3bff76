use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{info, warn};

use crate::config::Config;
use crate::csv_export::{export_csv, sorted_by_date_desc, write_csv};
use crate::error::{BookError, ExportError};
use crate::exchange::{compute_settlement, Settlement};
use crate::form::ExpenseForm;
use crate::notification::Notification;
use crate::report;
use crate::schemas::Expense;
use crate::store::{load_or_empty, ExpenseStore};

/// The household's expense list together with where it is persisted.
///
/// Every mutation is saved straight away; balances and payments are derived
/// from the list on each call and never cached.
pub struct ExpenseBook<S: ExpenseStore> {
    config: Config,
    store: S,
    expenses: Vec<Expense>,
    notification: Option<Notification>,
}

impl<S: ExpenseStore> ExpenseBook<S> {
    pub fn open(config: Config, store: S) -> Self {
        let expenses = load_or_empty(&store, &config.storage_key);
        info!(
            "opened '{}' with {} expenses",
            config.storage_key,
            expenses.len()
        );
        ExpenseBook {
            config,
            store,
            expenses,
            notification: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn history(&self) -> Vec<&Expense> {
        sorted_by_date_desc(&self.expenses)
    }

    pub fn total_spent(&self) -> f64 {
        self.expenses.iter().map(|expense| expense.amount).sum()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// The notification still on screen, dropping it once it has expired.
    pub fn visible_notification(&mut self) -> Option<&Notification> {
        let now = Utc::now();
        if self
            .notification
            .as_ref()
            .is_some_and(|toast| !toast.is_visible(now))
        {
            self.notification = None;
        }
        self.notification.as_ref()
    }

    fn notify_success(&mut self, message: &str) {
        self.notification = Some(Notification::success(message, Utc::now()));
    }

    fn notify_error(&mut self, message: String) {
        self.notification = Some(Notification::error(message, Utc::now()));
    }

    fn persist(&mut self) -> Result<(), BookError> {
        if let Err(err) = self.store.save(&self.config.storage_key, &self.expenses) {
            warn!("failed to save '{}': {err}", self.config.storage_key);
            self.notify_error(format!("Could not save expenses: {err}"));
            return Err(err.into());
        }
        Ok(())
    }

    pub fn add_expense(&mut self, form: &ExpenseForm) -> Result<&Expense, BookError> {
        let new_expense = match form.submit(&self.config.participants) {
            Ok(new_expense) => new_expense,
            Err(err) => {
                self.notify_error(err.to_string());
                return Err(err.into());
            }
        };
        let expense = new_expense.into_expense();
        info!(
            "adding expense {} paid by {}: {}",
            expense.id, expense.paid_by, expense.amount
        );
        let position = self.expenses.len();
        self.expenses.push(expense);
        self.persist()?;
        self.notify_success("Expense added successfully!");
        Ok(&self.expenses[position])
    }

    /// Removes the expense with `id`; returns `false` if there was none.
    pub fn delete_expense(&mut self, id: &str) -> Result<bool, BookError> {
        let before = self.expenses.len();
        self.expenses.retain(|expense| expense.id != id);
        if self.expenses.len() == before {
            return Ok(false);
        }
        info!("deleted expense {id}");
        self.persist()?;
        self.notify_success("Expense deleted successfully!");
        Ok(true)
    }

    /// Empties the list; returns `false` if it was already empty.
    pub fn clear_all(&mut self) -> Result<bool, BookError> {
        if self.expenses.is_empty() {
            return Ok(false);
        }
        info!("clearing {} expenses", self.expenses.len());
        self.expenses.clear();
        self.persist()?;
        self.notify_success("All expenses cleared!");
        Ok(true)
    }

    /// Re-reads the list from the store, discarding unsaved state.
    pub fn reload(&mut self) {
        self.expenses = load_or_empty(&self.store, &self.config.storage_key);
    }

    pub fn settlement(&self) -> Settlement {
        compute_settlement(&self.expenses, &self.config.participants)
    }

    pub fn instructions(&self) -> Vec<String> {
        report::instructions(&self.config.currency_symbol, &self.settlement())
    }

    pub fn render_balances(&self) -> String {
        report::render(&self.config.currency_symbol, &self.settlement())
    }

    fn export_failed(&mut self, err: ExportError) -> BookError {
        self.notify_error(err.to_string());
        err.into()
    }

    pub fn export_csv(&mut self) -> Result<String, BookError> {
        export_csv(&self.expenses).map_err(|err| self.export_failed(err))
    }

    pub fn export_to_dir(&mut self, dir: impl AsRef<Path>) -> Result<PathBuf, BookError> {
        let path = write_csv(&self.expenses, dir).map_err(|err| self.export_failed(err))?;
        info!("exported {} expenses to {}", self.expenses.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::notification::NotificationKind;
    use crate::store::MemoryStore;

    fn form(paid_by: &str, amount: &str, description: &str, date: &str) -> ExpenseForm {
        ExpenseForm {
            paid_by: paid_by.to_string(),
            amount: amount.to_string(),
            description: description.to_string(),
            date: date.to_string(),
        }
    }

    fn book() -> ExpenseBook<MemoryStore> {
        ExpenseBook::open(Config::default(), MemoryStore::new())
    }

    #[test]
    fn add_persists_and_notifies() {
        let mut book = book();
        let id = book
            .add_expense(&form("Althaf", "90", "Rent", "2024-06-01"))
            .unwrap()
            .id
            .clone();

        let saved = book.store().load("roommate-expenses").unwrap().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, id);

        let toast = book.visible_notification().unwrap();
        assert_eq!(toast.message, "Expense added successfully!");
        assert_eq!(toast.kind, NotificationKind::Success);
    }

    #[test]
    fn add_returns_the_expense_it_stored() {
        let mut book = book();
        book.add_expense(&form("Althaf", "90", "Rent", "2024-06-01"))
            .unwrap();
        let added = book
            .add_expense(&form("Rasheed", "15", "Milk", "2024-06-02"))
            .unwrap()
            .clone();
        assert_eq!(added.description, "Milk");
        assert_eq!(book.expenses().last(), Some(&added));
    }

    #[test]
    fn invalid_form_creates_nothing() {
        let mut book = book();
        let err = book.add_expense(&form("Althaf", "", "Rent", "2024-06-01"));
        assert!(matches!(
            err,
            Err(BookError::Validation(ValidationError::MissingFields))
        ));
        assert!(book.expenses().is_empty());
        assert_eq!(book.store().raw("roommate-expenses"), None);
        let toast = book.notification().unwrap();
        assert_eq!(toast.kind, NotificationKind::Error);
        assert_eq!(toast.message, "Please fill out all fields.");
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let mut book = book();
        book.add_expense(&form("Althaf", "90", "Rent", "2024-06-01"))
            .unwrap();
        assert!(!book.delete_expense("missing").unwrap());
        assert_eq!(book.expenses().len(), 1);
    }

    #[test]
    fn clear_all_on_empty_list_does_nothing() {
        let mut book = book();
        assert!(!book.clear_all().unwrap());
        assert!(book.notification().is_none());
    }

    #[test]
    fn export_with_nothing_to_export_notifies() {
        let mut book = book();
        assert!(matches!(
            book.export_csv(),
            Err(BookError::Export(ExportError::NothingToExport))
        ));
        assert_eq!(book.notification().unwrap().message, "No expenses to export.");
    }

    #[test]
    fn history_is_newest_first() {
        let mut book = book();
        book.add_expense(&form("Althaf", "1", "old", "2024-01-01"))
            .unwrap();
        book.add_expense(&form("Jamzith", "2", "new", "2024-02-01"))
            .unwrap();
        let history: Vec<&str> = book
            .history()
            .iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(history, vec!["new", "old"]);
        assert_eq!(book.total_spent(), 3.0);
    }
}
