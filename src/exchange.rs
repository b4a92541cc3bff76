use crate::balance::{summarize, BalanceSummary};
use crate::schemas::{Balance, Expense, Participant};
use log::debug;
use serde::Serialize;
use std::collections::VecDeque;

/// Balances closer to zero than this are treated as settled.
pub const SETTLE_TOLERANCE: f64 = 0.01;

#[derive(Clone, Debug)]
struct PersonalBalance {
    id: Participant,
    // Always the magnitude; the side is given by the list it is in
    balance: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Exchange {
    pub from: Participant,
    pub to: Participant,
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Settlement {
    pub summary: BalanceSummary,
    pub exchanges: Vec<Exchange>,
}

impl Settlement {
    pub fn is_settled(&self) -> bool {
        self.exchanges.is_empty()
    }
}

pub fn is_settled_balance(balance: f64) -> bool {
    balance.abs() < SETTLE_TOLERANCE
}

/// Pairs the first outstanding debtor with the first outstanding creditor
/// until one side runs out.
///
/// Both queues keep the order the participants had in `balances`; they are
/// never sorted by amount, so the result is deterministic but not always the
/// smallest possible number of payments.
///
/// Participants within `SETTLE_TOLERANCE` of zero start out of the queues.
/// They are only called in, in participant order, when the other side still
/// has someone outstanding and nobody else is left to pair with.
pub fn plan_exchanges(balances: &[Balance]) -> Vec<Exchange> {
    let mut debtors = VecDeque::new();
    let mut creditors = VecDeque::new();
    let mut spare_debtors = VecDeque::new();
    let mut spare_creditors = VecDeque::new();

    for Balance { name, balance } in balances {
        if *balance == 0.0 {
            continue;
        }
        let person = PersonalBalance {
            id: name.clone(),
            balance: balance.abs(),
        };
        match (*balance < 0.0, is_settled_balance(*balance)) {
            (true, false) => debtors.push_back(person),
            (false, false) => creditors.push_back(person),
            (true, true) => spare_debtors.push_back(person),
            (false, true) => spare_creditors.push_back(person),
        }
    }

    let mut exchanges = Vec::new();

    loop {
        // Whoever is still queued is at or above the tolerance
        if debtors.is_empty() && !creditors.is_empty() {
            debtors.extend(spare_debtors.pop_front());
        }
        if creditors.is_empty() && !debtors.is_empty() {
            creditors.extend(spare_creditors.pop_front());
        }
        if debtors.is_empty() || creditors.is_empty() {
            break;
        }

        let debtor = &mut debtors[0];
        let creditor = &mut creditors[0];

        // One side always drops to exactly zero, so every round retires
        // at least one participant
        let amount = debtor.balance.min(creditor.balance);
        exchanges.push(Exchange {
            from: debtor.id.clone(),
            to: creditor.id.clone(),
            amount,
        });
        debtor.balance -= amount;
        creditor.balance -= amount;

        let debtor_done = is_settled_balance(debtor.balance);
        let creditor_done = is_settled_balance(creditor.balance);
        if debtor_done {
            debtors.pop_front();
        }
        if creditor_done {
            creditors.pop_front();
        }
    }

    exchanges
}

pub fn compute_settlement(expenses: &[Expense], participants: &[Participant]) -> Settlement {
    let summary = summarize(expenses, participants);
    let exchanges = plan_exchanges(&summary.balances);
    debug!(
        "settled {} expenses between {} participants with {} payments",
        expenses.len(),
        participants.len(),
        exchanges.len()
    );
    Settlement { summary, exchanges }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balances(values: &[(&str, f64)]) -> Vec<Balance> {
        values
            .iter()
            .map(|(name, balance)| Balance {
                name: name.to_string(),
                balance: *balance,
            })
            .collect()
    }

    fn pairs(exchanges: &[Exchange]) -> Vec<(&str, &str, f64)> {
        exchanges
            .iter()
            .map(|e| (e.from.as_str(), e.to.as_str(), e.amount))
            .collect()
    }

    #[test]
    fn one_creditor_two_debtors() {
        let exchanges = plan_exchanges(&balances(&[("A", 60.0), ("B", -30.0), ("C", -30.0)]));
        assert_eq!(pairs(&exchanges), vec![("B", "A", 30.0), ("C", "A", 30.0)]);
    }

    #[test]
    fn one_debtor_two_creditors() {
        let exchanges = plan_exchanges(&balances(&[("A", 10.0), ("B", 20.0), ("C", -30.0)]));
        assert_eq!(pairs(&exchanges), vec![("C", "A", 10.0), ("C", "B", 20.0)]);
    }

    #[test]
    fn keeps_participant_order_instead_of_sorting_by_amount() {
        let exchanges = plan_exchanges(&balances(&[
            ("A", -5.0),
            ("B", -25.0),
            ("C", 5.0),
            ("D", 25.0),
        ]));
        // A magnitude-sorted matcher would pair B with D first
        assert_eq!(
            pairs(&exchanges),
            vec![("A", "C", 5.0), ("B", "D", 25.0)]
        );
    }

    #[test]
    fn near_zero_balances_are_left_out() {
        let exchanges = plan_exchanges(&balances(&[("A", 0.004), ("B", -0.004), ("C", 0.0)]));
        assert!(exchanges.is_empty());
    }

    #[test]
    fn near_zero_debtors_pay_an_outstanding_creditor() {
        // 100.02 / 100 / 100 split three ways
        let share = 300.02 / 3.0;
        let exchanges = plan_exchanges(&balances(&[
            ("A", 100.02 - share),
            ("B", 100.0 - share),
            ("C", 100.0 - share),
        ]));
        assert_eq!(exchanges.len(), 1);
        assert_eq!((exchanges[0].from.as_str(), exchanges[0].to.as_str()), ("B", "A"));
        assert!((exchanges[0].amount - 0.02 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn near_zero_creditor_is_called_in_for_an_outstanding_debtor() {
        let exchanges = plan_exchanges(&balances(&[
            ("A", 0.006),
            ("B", 0.006),
            ("C", -0.012),
        ]));
        assert_eq!(pairs(&exchanges), vec![("C", "A", 0.006)]);
    }

    #[test]
    fn drift_does_not_leave_a_trailing_payment() {
        let third = 100.0 / 3.0;
        let exchanges = plan_exchanges(&balances(&[
            ("A", 100.0 - third),
            ("B", -third),
            ("C", -third),
        ]));
        assert_eq!(exchanges.len(), 2);
        assert!(exchanges.iter().all(|e| e.to == "A"));
    }

    #[test]
    fn empty_input_is_settled() {
        let settlement = compute_settlement(&[], &["A".to_string(), "B".to_string()]);
        assert!(settlement.is_settled());
        assert_eq!(settlement.summary.balances.len(), 2);
    }
}
