use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::{
    EventJavascriptDialogOpening, HandleJavaScriptDialogParams,
};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use serde_json::Value;
use tokio::task::JoinHandle;

use crate::{info_time, Error, Result};

/// What the scraper needs from a remote browser session.
///
/// A driver is owned by one scraping session at a time; the page it controls is
/// left in an altered state afterwards.
#[async_trait]
pub trait Driver: Send {
    /// Accepts a blocking alert if one is open. Best effort: having no alert to accept,
    /// or failing to accept one, is never reported and never ends the session.
    async fn dismiss_alert_if_present(&mut self);

    /// Runs `script` as a function body in the page, `args` reachable as `arguments[i]`.
    /// Promises returned by the script are awaited.
    async fn run_script(&mut self, script: &str, args: &[Value]) -> Result<Value>;
}

/// `Driver` over a chromiumoxide tab.
pub struct ChromeDriver {
    page: Page,
}

impl ChromeDriver {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// Accepts the first dialog the page opens, in the background.
    /// A startup `alert()` blocks the load event, so this has to be in place before navigating.
    pub async fn accept_first_dialog(page: &Page) -> Result<JoinHandle<()>> {
        let mut dialogs = page.event_listener::<EventJavascriptDialogOpening>().await?;
        let page = page.clone();
        Ok(tokio::spawn(async move {
            if let Some(dialog) = dialogs.next().await {
                info_time!("Alert opened: {:?}", dialog.message);
                accept_dialog(&page).await;
            }
        }))
    }
}

async fn accept_dialog(page: &Page) {
    match page.execute(HandleJavaScriptDialogParams::new(true)).await {
        Ok(_) => info_time!("Dismissed alert"),
        Err(e) => info_time!("No alert to dismiss ({e})"),
    }
}

#[async_trait]
impl Driver for ChromeDriver {
    async fn dismiss_alert_if_present(&mut self) {
        accept_dialog(&self.page).await;
    }

    async fn run_script(&mut self, script: &str, args: &[Value]) -> Result<Value> {
        let expression = wrap_script(script, args)?;
        let res = self.page.evaluate(expression).await.map_err(script_error)?;
        Ok(res.value().cloned().unwrap_or(Value::Null))
    }
}

/// Exceptions thrown by the page script become `Error::Execution`, the rest stays a CDP error.
fn script_error(e: CdpError) -> Error {
    match e {
        CdpError::JavascriptException(details) => Error::Execution(details.text),
        e => Error::Cdp(e),
    }
}

/// Turns a function body into an expression applied to `args`.
fn wrap_script(script: &str, args: &[Value]) -> Result<String> {
    let args = serde_json::to_string(args)?;
    Ok(format!("(function () {{\n{script}\n}}).apply(null, {args})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromiumoxide::cdp::js_protocol::runtime::ExceptionDetails;
    use serde_json::json;

    #[test]
    fn script_exception_is_execution_error() {
        let details = ExceptionDetails::new(1, "Uncaught ReferenceError: generate is not defined", 0, 0);
        let err = script_error(CdpError::JavascriptException(Box::new(details)));
        assert!(
            matches!(&err, Error::Execution(msg) if msg == "Uncaught ReferenceError: generate is not defined")
        );
        assert!(err.is_execution());
    }

    #[test]
    fn transport_error_stays_cdp() {
        let err = script_error(CdpError::Timeout);
        assert!(matches!(err, Error::Cdp(CdpError::Timeout)));
        assert!(err.is_execution());
    }

    #[test]
    fn wraps_body_with_positional_args() {
        let expr = wrap_script("window.start = arguments[0];", &[json!(53)]).unwrap();
        assert_eq!(
            expr,
            "(function () {\nwindow.start = arguments[0];\n}).apply(null, [53])"
        );
    }

    #[test]
    fn wraps_body_without_args() {
        let expr = wrap_script("return generate();", &[]).unwrap();
        assert!(expr.ends_with(".apply(null, [])"));
    }
}
