use std::time::Duration;

use thiserror::Error;

/// Failure modes at the automation boundary.
#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("element not found: {0}")]
    ElementNotFound(String),
    #[error("timed out after {timeout:?} waiting on {what}")]
    Timeout { what: String, timeout: Duration },
    #[error("browser session failure: {0}")]
    Session(String),
}

impl AutomationError {
    /// True when the session itself is unusable and no further page
    /// interaction can succeed.
    pub fn is_session_failure(&self) -> bool {
        matches!(self, AutomationError::Session(_))
    }
}

/// Narrow capability interface over the externally-controlled web session.
///
/// The pipeline only navigates, waits, clicks and reads through this trait.
/// Selector knowledge lives in the site profile, and the concrete adapter
/// lives at the application edge, which keeps the pipeline testable against
/// an in-memory fake.
#[async_trait::async_trait]
pub trait Automation: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<(), AutomationError>;

    /// Waits until the element addressed by `selector` is present and
    /// visible, bounded by `timeout`.
    async fn wait_visible(&self, selector: &str, timeout: Duration)
        -> Result<(), AutomationError>;

    async fn click(&self, selector: &str) -> Result<(), AutomationError>;

    async fn read_text(&self, selector: &str) -> Result<String, AutomationError>;

    async fn read_attribute(
        &self,
        selector: &str,
        name: &str,
    ) -> Result<Option<String>, AutomationError>;

    /// Rendered-page capture for debug records.
    async fn capture_screenshot(&self) -> Result<Vec<u8>, AutomationError>;

    /// Raw page source for debug records.
    async fn capture_page_source(&self) -> Result<String, AutomationError>;
}
