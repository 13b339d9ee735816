//! Scrapes a paginated transaction table that a page renders on demand.
//!
//! The page only renders a window of the whole result set. [`extract_all`] moves the
//! page's offset forward by however many rows came back, until a window is empty.

mod macros;

pub mod driver;
mod error;
pub mod parse;
pub mod process;
pub mod scrape;
pub mod summary;

pub use driver::{ChromeDriver, Driver};
pub use error::{Error, Result};
pub use parse::{parse_row, RawRow, TransactionRecord};
pub use scrape::extract_all;

pub const TARGET_URL: &str = "https://web.bankin.com/challenge/index.html";
pub const FILE_PATH: &str = "transactions.json";
