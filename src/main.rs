use chrono::Local;
use txscrap::{info_time, process::process_site, Result, FILE_PATH, TARGET_URL};

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    process_site(TARGET_URL, FILE_PATH).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}
