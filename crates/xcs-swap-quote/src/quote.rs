// ----- standard library imports
// ----- extra library imports
// ----- local imports

// ----- end imports

const ZERO_AMOUNT: &str = "0.00";

pub(crate) fn positive_amount(amount: &str) -> Option<f64> {
    amount
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

fn nonzero_price(price: Option<f64>) -> Option<f64> {
    price.filter(|price| price.is_finite() && *price != 0.0)
}

/// Converts `input_amount` of one token into the other through their USD
/// unit prices, with 6 fractional digits.
///
/// Yields `"0.00"` whenever the amount is empty, unparsable or not positive,
/// or either price is missing or zero. Token decimals are not taken into
/// account.
pub fn derive_output_amount(
    input_amount: &str,
    input_price: Option<f64>,
    output_price: Option<f64>,
) -> String {
    let (Some(amount), Some(input_price), Some(output_price)) = (
        positive_amount(input_amount),
        nonzero_price(input_price),
        nonzero_price(output_price),
    ) else {
        return String::from(ZERO_AMOUNT);
    };
    let output = (amount * input_price) / output_price;
    if !output.is_finite() {
        return String::from(ZERO_AMOUNT);
    }
    format!("{output:.6}")
}

/// USD value of `amount` at `unit_price`, 2 fractional digits.
pub fn usd_value(amount: &str, unit_price: Option<f64>) -> String {
    match (positive_amount(amount), nonzero_price(unit_price)) {
        (Some(amount), Some(price)) if (amount * price).is_finite() => {
            format!("{:.2}", amount * price)
        }
        _ => String::from(ZERO_AMOUNT),
    }
}
