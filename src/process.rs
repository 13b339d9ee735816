use std::path::Path;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chrono::Local;
use futures::StreamExt;
use tokio::{fs::File, io::AsyncWriteExt};

use crate::driver::ChromeDriver;
use crate::parse::TransactionRecord;
use crate::scrape::extract_all;
use crate::summary::Summary;
use crate::{info_time, Error, Result};

/// Opens `url` in a headless browser, extracts every transaction and writes them to `path` as JSON.
pub async fn process_site(url: &str, path: impl AsRef<Path>) -> Result<Vec<TransactionRecord>> {
    let start_time = Local::now();
    info_time!("Started scraping {url}");

    let config = BrowserConfig::builder().build().map_err(Error::BrowserConfig)?;
    let (mut browser, mut handler) = Browser::launch(config).await?;
    // The browser only makes progress while its handler is polled.
    let handler_handle = tokio::spawn(async move { while handler.next().await.is_some() {} });

    let scraped = scrape_page(&browser, url).await;

    browser.close().await?;
    browser.wait().await?;
    handler_handle.await?;
    let transactions = scraped?;
    info_time!(start_time, "Finished scraping.");

    let local_now = Local::now();
    let path = path.as_ref();
    let json = serde_json::to_vec_pretty(&transactions)?;
    let mut file = File::create(path).await?;
    file.write_all(&json).await?;
    file.flush().await?;
    info_time!(local_now, "Wrote the results to file: {}", path.display());

    info_time!("Summary:\n{}", Summary::from_records(&transactions));
    Ok(transactions)
}

async fn scrape_page(browser: &Browser, url: &str) -> Result<Vec<TransactionRecord>> {
    let page = browser.new_page("about:blank").await?;
    let dialog_handle = ChromeDriver::accept_first_dialog(&page).await?;

    let loaded = page.goto(url).await;
    let scraped = match loaded {
        Ok(_) => extract_all(&mut ChromeDriver::new(page)).await,
        Err(e) => Err(e.into()),
    };
    dialog_handle.abort();
    scraped
}
