//! Chromium-backed implementation of the automation capability trait.
//!
//! Downloads are routed into the staging directory via CDP so the engine's
//! watcher can certify them; the pipeline itself never talks to the browser
//! except through the `Automation` trait.

use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::{
    SetDownloadBehaviorBehavior, SetDownloadBehaviorParams,
};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use rand::Rng;

use reel_engine::{poll_until, Automation, AutomationError, PollError};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/123.0.0.0 Safari/537.36";

const ELEMENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Randomized delay between browser actions so the session paces like an
/// operator rather than a tight loop.
#[derive(Debug, Clone)]
pub struct Pacing {
    millis: RangeInclusive<u64>,
}

impl Default for Pacing {
    fn default() -> Self {
        Self { millis: 400..=1400 }
    }
}

impl Pacing {
    async fn pause(&self) {
        let wait = rand::thread_rng().gen_range(self.millis.clone());
        tokio::time::sleep(Duration::from_millis(wait)).await;
    }
}

/// Options for launching the Chrome session.
pub struct LaunchOptions {
    pub headless: bool,
    /// Where the browser drops in-progress downloads.
    pub staging_dir: PathBuf,
}

pub struct ChromeAutomation {
    browser: Browser,
    page: Page,
    pacing: Pacing,
    handler_task: tokio::task::JoinHandle<()>,
}

impl ChromeAutomation {
    /// Launches a Chrome session with downloads routed into staging.
    pub async fn launch(options: &LaunchOptions) -> anyhow::Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-blink-features=AutomationControlled")
            .arg(format!("--user-agent={USER_AGENT}"));
        if !options.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(anyhow::Error::msg)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("could not launch chromium")?;
        // The CDP connection dies if its event stream is not drained.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .context("could not open initial page")?;

        let download_path = options.staging_dir.to_string_lossy().into_owned();
        browser
            .execute(
                SetDownloadBehaviorParams::builder()
                    .behavior(SetDownloadBehaviorBehavior::Allow)
                    .download_path(download_path)
                    .build()
                    .map_err(anyhow::Error::msg)?,
            )
            .await
            .context("could not route downloads into staging")?;

        Ok(Self {
            browser,
            page,
            pacing: Pacing::default(),
            handler_task,
        })
    }

    /// Closes the session; teardown errors are not worth failing a run over.
    pub async fn close(mut self) {
        let _ = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
    }

    async fn find(&self, selector: &str) -> Result<Element, AutomationError> {
        self.page
            .find_element(selector)
            .await
            .map_err(|_| AutomationError::ElementNotFound(selector.to_string()))
    }

    fn session_error(err: CdpError) -> AutomationError {
        AutomationError::Session(err.to_string())
    }
}

#[async_trait::async_trait]
impl Automation for ChromeAutomation {
    async fn navigate(&self, url: &str) -> Result<(), AutomationError> {
        self.page.goto(url).await.map_err(Self::session_error)?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(Self::session_error)?;
        self.pacing.pause().await;
        Ok(())
    }

    async fn wait_visible(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), AutomationError> {
        let page = &self.page;
        poll_until(ELEMENT_POLL_INTERVAL, timeout, move || async move {
            match page.find_element(selector).await {
                Ok(_) => Ok::<_, AutomationError>(Some(())),
                Err(_) => Ok(None),
            }
        })
        .await
        .map_err(|err| match err {
            PollError::TimedOut(timeout) => AutomationError::Timeout {
                what: selector.to_string(),
                timeout,
            },
            PollError::Failed(err) => err,
        })
    }

    async fn click(&self, selector: &str) -> Result<(), AutomationError> {
        let element = self.find(selector).await?;
        element
            .scroll_into_view()
            .await
            .map_err(Self::session_error)?;
        element.click().await.map_err(Self::session_error)?;
        self.pacing.pause().await;
        Ok(())
    }

    async fn read_text(&self, selector: &str) -> Result<String, AutomationError> {
        let element = self.find(selector).await?;
        let text = element.inner_text().await.map_err(Self::session_error)?;
        Ok(text.unwrap_or_default())
    }

    async fn read_attribute(
        &self,
        selector: &str,
        name: &str,
    ) -> Result<Option<String>, AutomationError> {
        let element = self.find(selector).await?;
        element.attribute(name).await.map_err(Self::session_error)
    }

    async fn capture_screenshot(&self) -> Result<Vec<u8>, AutomationError> {
        self.page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .build(),
            )
            .await
            .map_err(Self::session_error)
    }

    async fn capture_page_source(&self) -> Result<String, AutomationError> {
        self.page.content().await.map_err(Self::session_error)
    }
}
