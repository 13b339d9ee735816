use std::collections::BTreeMap;
use std::fmt;

use crate::parse::TransactionRecord;

/// Totals over a finished extraction.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    /// Sum of amounts, per currency symbol. Wider than a single amount so it can't overflow.
    pub totals: BTreeMap<String, i128>,
    /// Number of transactions, per account.
    pub per_account: BTreeMap<String, usize>,
}

impl Summary {
    pub fn from_records(records: &[TransactionRecord]) -> Self {
        let mut summary = Summary {
            count: records.len(),
            ..Default::default()
        };
        for rec in records {
            *summary.totals.entry(rec.currency.clone()).or_default() += i128::from(rec.amount);
            *summary.per_account.entry(rec.account.clone()).or_default() += 1;
        }
        summary
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} transactions", self.count)?;
        for (currency, total) in &self.totals {
            writeln!(f, "{:<20} | {total}{currency}", "total")?;
        }
        for (account, n) in &self.per_account {
            writeln!(f, "{account:<20} | {n}")?;
        }
        Ok(())
    }
}
