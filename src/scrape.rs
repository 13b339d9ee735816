use chrono::Local;
use serde_json::{json, Value};

use crate::driver::Driver;
use crate::parse::{parse_row, RawRow, TransactionRecord};
use crate::{info_time, Error, Result};

/// Sets the offset of the window the page renders next.
pub const SET_OFFSET_JS: &str = "window.start = arguments[0];";
/// Replaces the page's own regeneration hook so nothing re-renders behind our back.
pub const DISABLE_AUTO_GENERATE_JS: &str = "window.doGenerate = function () {};";
pub const DISABLE_MODES_JS: &str =
    "window.slowmode = false; window.failmode = false; window.hasiframe = false;";
pub const GENERATE_JS: &str = "return generate();";
/// Text of every cell of every row of the first table, header row excluded.
pub const EXTRACT_ROWS_JS: &str = r#"
const table = document.querySelector("table");
if (!table) {
    return [];
}
return Array.from(table.rows)
    .slice(1)
    .map((row) => Array.from(row.children).map((cell) => cell.innerText));
"#;

/// Dismisses the startup alert, then renders the table window by window until one comes back empty.
/// Returns every transaction in the order the page rendered them.
pub async fn extract_all<D: Driver + ?Sized>(driver: &mut D) -> Result<Vec<TransactionRecord>> {
    let start_time = Local::now();
    info_time!("Started extracting transactions");

    driver.dismiss_alert_if_present().await;

    let mut cursor = 0usize;
    let mut transactions = Vec::new();
    loop {
        let rows = render_rows(driver, cursor).await?;
        info_time!("Offset {cursor}: {} rows", rows.len());
        if rows.is_empty() {
            break;
        }

        let parsed = rows
            .iter()
            .map(|row| parse_row(row))
            .collect::<Result<Vec<_>>>()?;
        cursor += parsed.len();
        transactions.extend(parsed);
    }

    info_time!(start_time, "DONE: {} transactions", transactions.len());
    Ok(transactions)
}

/// One render cycle: prepares the page for `offset`, regenerates the table and reads its rows.
/// The steps depend on each other's page state, so they run strictly in this order.
async fn render_rows<D: Driver + ?Sized>(driver: &mut D, offset: usize) -> Result<Vec<RawRow>> {
    driver.run_script(SET_OFFSET_JS, &[json!(offset)]).await?;
    driver.run_script(DISABLE_AUTO_GENERATE_JS, &[]).await?;
    driver.run_script(DISABLE_MODES_JS, &[]).await?;
    driver.run_script(GENERATE_JS, &[]).await?;

    let rows = driver.run_script(EXTRACT_ROWS_JS, &[]).await?;
    decode_rows(rows)
}

fn decode_rows(rows: Value) -> Result<Vec<RawRow>> {
    serde_json::from_value(rows).map_err(Error::UnexpectedScriptResult)
}
