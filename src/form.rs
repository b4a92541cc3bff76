use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::schemas::{NewExpense, Participant};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw text of the add-expense form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseForm {
    pub paid_by: String,
    pub amount: String,
    pub description: String,
    pub date: String,
}

impl ExpenseForm {
    /// A blank form with the date pre-filled.
    pub fn new(today: NaiveDate) -> Self {
        ExpenseForm {
            date: today.format(DATE_FORMAT).to_string(),
            ..Default::default()
        }
    }

    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    pub fn submit(&self, participants: &[Participant]) -> Result<NewExpense, ValidationError> {
        let paid_by = self.paid_by.trim();
        let amount = self.amount.trim();
        let description = self.description.trim();
        let date = self.date.trim();
        if [paid_by, amount, description, date]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err(ValidationError::MissingFields);
        }

        if !participants.iter().any(|name| name == paid_by) {
            return Err(ValidationError::UnknownParticipant(paid_by.to_string()));
        }

        let amount = match amount.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => value,
            _ => return Err(ValidationError::InvalidAmount(amount.to_string())),
        };

        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate(date.to_string()))?;

        Ok(NewExpense {
            paid_by: paid_by.to_string(),
            amount,
            description: self.description.clone(),
            date,
        })
    }
}
