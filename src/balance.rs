use std::collections::{HashMap, HashSet};

use log::warn;
use serde::Serialize;

use crate::schemas::{Balance, Expense, Participant};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BalanceSummary {
    pub total_spent: f64,
    pub equal_share: f64,
    pub balances: Vec<Balance>,
}

impl BalanceSummary {
    fn empty(participants: &[&Participant]) -> Self {
        BalanceSummary {
            total_spent: 0.0,
            equal_share: 0.0,
            balances: participants
                .iter()
                .map(|&name| Balance {
                    name: name.clone(),
                    balance: 0.0,
                })
                .collect(),
        }
    }
}

/// Splits the grand total equally between `participants` and reports how far
/// each one is above (owed) or below (owes) that share.
///
/// Balances come back in participant order. Nothing is rounded here.
///
/// Names are expected to be unique; a repeated name only counts once and
/// keeps its first position.
pub fn summarize(expenses: &[Expense], participants: &[Participant]) -> BalanceSummary {
    let mut seen = HashSet::new();
    let mut unique: Vec<&Participant> = Vec::with_capacity(participants.len());
    for name in participants {
        if seen.insert(name.as_str()) {
            unique.push(name);
        }
    }
    let participants = unique;
    if expenses.is_empty() || participants.is_empty() {
        return BalanceSummary::empty(&participants);
    }

    let mut totals_paid: HashMap<&str, f64> = participants
        .iter()
        .map(|&name| (name.as_str(), 0.0))
        .collect();

    let mut total_spent = 0.0;
    for expense in expenses {
        total_spent += expense.amount;
        match totals_paid.get_mut(expense.paid_by.as_str()) {
            Some(paid) => *paid += expense.amount,
            None => warn!(
                "expense {} was paid by unknown participant '{}'",
                expense.id, expense.paid_by
            ),
        }
    }

    let equal_share = total_spent / participants.len() as f64;
    let balances = participants
        .iter()
        .map(|&name| Balance {
            name: name.clone(),
            balance: totals_paid[name.as_str()] - equal_share,
        })
        .collect();

    BalanceSummary {
        total_spent,
        equal_share,
        balances,
    }
}

pub fn compute_balances(expenses: &[Expense], participants: &[Participant]) -> Vec<Balance> {
    summarize(expenses, participants).balances
}
