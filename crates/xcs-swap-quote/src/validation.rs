// ----- standard library imports
use std::sync::LazyLock;
// ----- extra library imports
use regex::Regex;
// ----- local imports

// ----- end imports

pub const INSUFFICIENT_FUNDS: &str = "Insufficient funds";

/// empty, or ASCII digits with at most one decimal point anywhere
static AMOUNT_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*\.?[0-9]*$").expect("Invalid regex"));

/// Keystroke filter for the amount field: a malformed candidate reverts
/// to the last accepted text.
pub fn validate_amount_text(candidate: &str, previous_valid: &str) -> String {
    if AMOUNT_TEXT.is_match(candidate) {
        candidate.to_owned()
    } else {
        previous_valid.to_owned()
    }
}

/// Advisory balance check; never blocks typing.
pub fn check_insufficient_funds(amount: &str, wallet_balance: Option<f64>) -> Option<String> {
    let balance = wallet_balance?;
    let amount = amount.parse::<f64>().ok().filter(|value| *value > 0.0)?;
    if amount > balance {
        Some(String::from(INSUFFICIENT_FUNDS))
    } else {
        None
    }
}
