use serde::Serialize;

use crate::{Error, Result};

/// Cells of one rendered table row: account, transaction label, amount with currency.
pub type RawRow = Vec<String>;

/// One transaction as rendered in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Transaction")]
    pub description: String,
    #[serde(rename = "Amount")]
    pub amount: i64,
    #[serde(rename = "Currency")]
    pub currency: String,
}

/// Converts a `[account, description, amount]` row into a `TransactionRecord`.
/// The last character of the amount cell is the currency, the rest is parsed as a leading integer.
pub fn parse_row(row: &[String]) -> Result<TransactionRecord> {
    let [account, description, amount_cell] = row else {
        return Err(Error::MalformedRow { cells: row.len() });
    };

    let (amount, currency) = split_amount(amount_cell)?;

    Ok(TransactionRecord {
        account: account.clone(),
        description: description.clone(),
        amount,
        currency,
    })
}

/// Splits `"250€"` into `(250, "€")`.
fn split_amount(cell: &str) -> Result<(i64, String)> {
    let mut chars = cell.chars();
    let currency = chars
        .next_back()
        .ok_or_else(|| Error::AmountParse(cell.into()))?;

    let amount = parse_leading_int(chars.as_str()).ok_or_else(|| Error::AmountParse(cell.into()))?;

    Ok((amount, currency.to_string()))
}

/// Parses the integer at the start of `s`, ignoring whatever follows it.
/// Leading whitespace and a single sign are accepted. `None` if there are no digits.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn splits_currency_from_amount() {
        for (cell, amount, currency) in [("250€", 250, "€"), ("800€", 800, "€"), ("1234$", 1234, "$")] {
            let rec = parse_row(&row(&["Checking", "Transaction 1", cell])).unwrap();
            assert_eq!(rec.amount, amount, "cell {cell}");
            assert_eq!(rec.currency, currency, "cell {cell}");
        }
    }

    #[test]
    fn keeps_labels_verbatim() {
        let rec = parse_row(&row(&["Savings", "Transaction 2", "250€"])).unwrap();
        assert_eq!(
            rec,
            TransactionRecord {
                account: "Savings".into(),
                description: "Transaction 2".into(),
                amount: 250,
                currency: "€".into(),
            }
        );
    }

    #[test]
    fn parsing_twice_gives_equal_records() {
        let raw = row(&["Savings", "Transaction 7", "42€"]);
        assert_eq!(parse_row(&raw).unwrap(), parse_row(&raw).unwrap());
    }

    #[test]
    fn wrong_cell_count_is_malformed() {
        assert!(matches!(
            parse_row(&row(&["only", "two"])),
            Err(Error::MalformedRow { cells: 2 })
        ));
        assert!(matches!(
            parse_row(&row(&["a", "b", "1€", "extra"])),
            Err(Error::MalformedRow { cells: 4 })
        ));
        assert!(matches!(parse_row(&[]), Err(Error::MalformedRow { cells: 0 })));
    }

    #[test]
    fn amount_without_digits_fails() {
        for cell in ["€", "", "abc€", " -€"] {
            assert!(
                matches!(parse_row(&row(&["a", "b", cell])), Err(Error::AmountParse(_))),
                "cell {cell:?}"
            );
        }
    }

    #[test]
    fn leading_integer_semantics() {
        assert_eq!(parse_leading_int("12"), Some(12));
        assert_eq!(parse_leading_int("  12"), Some(12));
        assert_eq!(parse_leading_int("-7"), Some(-7));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("1,234"), Some(1));
        assert_eq!(parse_leading_int("99.50"), Some(99));
        assert_eq!(parse_leading_int("x1"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn serializes_with_table_headers() {
        let rec = parse_row(&row(&["Checking", "Transaction 3", "800€"])).unwrap();
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Account": "Checking",
                "Transaction": "Transaction 3",
                "Amount": 800,
                "Currency": "€",
            })
        );
    }
}
