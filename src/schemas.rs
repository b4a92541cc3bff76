use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type Participant = String;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub paid_by: Participant,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
}

/// An expense as submitted by the entry form, before it has an id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewExpense {
    pub paid_by: Participant,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
}

impl NewExpense {
    pub fn into_expense(self) -> Expense {
        Expense {
            id: Uuid::new_v4().to_string(),
            paid_by: self.paid_by,
            amount: self.amount,
            description: self.description,
            date: self.date,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Balance {
    pub name: Participant,
    pub balance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_uses_stored_field_names() {
        let json = r#"{"id":"1700000000000","paidBy":"Althaf","amount":12.5,"description":"Milk","date":"2024-03-01"}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.paid_by, "Althaf");
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        let back = serde_json::to_value(&expense).unwrap();
        assert_eq!(back["paidBy"], "Althaf");
        assert_eq!(back["date"], "2024-03-01");
    }

    #[test]
    fn new_expenses_get_distinct_ids() {
        let new = NewExpense {
            paid_by: "Jamzith".to_string(),
            amount: 10.0,
            description: "Bread".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        };
        let a = new.clone().into_expense();
        let b = new.into_expense();
        assert_ne!(a.id, b.id);
        assert!(!a.id.is_empty());
    }
}
