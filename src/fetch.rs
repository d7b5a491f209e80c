use anyhow::{Context, Result};

/// Fetch a page over HTTP and return the raw body text.
///
/// One blocking GET, no retries. A non-2xx status is an error.
pub fn fetch_page(url: &str) -> Result<String> {
    let body = reqwest::blocking::get(url)
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("GET {} returned error status", url))?
        .text()
        .context("failed to read response body")?;
    Ok(body)
}
