use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::schemas::Expense;

pub const EXPORT_FILE_NAME: &str = "expenses.csv";
pub const CSV_HEADER: &str = "Date,Paid By,Description,Amount";

/// Newest first; expenses on the same day keep their insertion order.
pub fn sorted_by_date_desc(expenses: &[Expense]) -> Vec<&Expense> {
    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

pub fn export_csv(expenses: &[Expense]) -> Result<String, ExportError> {
    if expenses.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let mut lines = Vec::with_capacity(expenses.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for expense in sorted_by_date_desc(expenses) {
        lines.push(format!(
            "{},{},{},{}",
            expense.date,
            expense.paid_by,
            quote(&expense.description),
            expense.amount
        ));
    }
    Ok(lines.join("\n"))
}

/// Writes `expenses.csv` into `dir` and returns the full path.
pub fn write_csv(expenses: &[Expense], dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
    let content = export_csv(expenses)?;
    let path = dir.as_ref().join(EXPORT_FILE_NAME);
    fs::write(&path, content).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
