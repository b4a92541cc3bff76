use crate::exchange::{is_settled_balance, Exchange, Settlement};
use crate::schemas::Balance;

pub const ALL_SETTLED: &str = "All balances are settled. No payments needed.";

/// `₹30.00` style; the only place amounts are rounded.
pub fn format_amount(symbol: &str, value: f64) -> String {
    format!("{symbol}{value:.2}")
}

pub fn instruction(symbol: &str, exchange: &Exchange) -> String {
    format!(
        "{} should pay {} {}",
        exchange.from,
        exchange.to,
        format_amount(symbol, exchange.amount)
    )
}

pub fn instructions(symbol: &str, settlement: &Settlement) -> Vec<String> {
    settlement
        .exchanges
        .iter()
        .map(|exchange| instruction(symbol, exchange))
        .collect()
}

/// Signed figure shown next to each participant.
///
/// Only the sign of the raw value is consulted, so a drift of +0.001 still
/// reads `+₹0.00` even though the settlement treats it as settled.
pub fn signed_balance(symbol: &str, balance: &Balance) -> String {
    if balance.balance >= 0.0 {
        format!("+{}", format_amount(symbol, balance.balance))
    } else {
        format!("-{}", format_amount(symbol, balance.balance.abs()))
    }
}

pub fn balance_status(symbol: &str, balance: &Balance) -> String {
    if is_settled_balance(balance.balance) {
        "Settled up".to_string()
    } else if balance.balance > 0.0 {
        format!("Is owed {}", format_amount(symbol, balance.balance))
    } else {
        format!("Owes {}", format_amount(symbol, balance.balance.abs()))
    }
}

/// Plain-text rendering of the whole balances page.
pub fn render(symbol: &str, settlement: &Settlement) -> String {
    let summary = &settlement.summary;
    let mut lines = vec![
        format!("Total Spent: {}", format_amount(symbol, summary.total_spent)),
        format!("Equal Share: {}", format_amount(symbol, summary.equal_share)),
    ];
    for balance in &summary.balances {
        lines.push(format!(
            "{}: {} ({})",
            balance.name,
            signed_balance(symbol, balance),
            balance_status(symbol, balance)
        ));
    }
    if settlement.is_settled() {
        lines.push(ALL_SETTLED.to_string());
    } else {
        lines.extend(instructions(symbol, settlement));
    }
    lines.join("\n")
}
