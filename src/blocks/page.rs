//! Page-level blocks: navigation, text download, HTML rendering, dialogs
//!
//! Each one is a thin relay to a platform call. Failures are logged and
//! swallowed; the blocks have no way to report them.

use tracing::{debug, warn};

use crate::bridge::download::DownloadFile;
use crate::platform::{Dialogs, DownloadTrigger, HtmlRenderTarget, PageLocation};

pub fn current_url(location: &dyn PageLocation) -> String {
    location.href().unwrap_or_else(|e| {
        warn!(error = %e, "reading the current URL failed");
        String::new()
    })
}

pub fn open_url(location: &dyn PageLocation, url: &str) {
    if let Err(e) = location.open_in_new_context(url) {
        warn!(url, error = %e, "opening URL failed");
    }
}

/// Offer `text` for download as a UTF-8 file named `file_name`
pub fn save_as_file(downloads: &dyn DownloadTrigger, text: &str, file_name: &str) {
    if let Err(e) = downloads.trigger(&DownloadFile::text(text), file_name) {
        warn!(file_name, error = %e, "error in saveAsFile block");
    }
}

pub fn set_html(target: &dyn HtmlRenderTarget, markup: &str) {
    if let Err(e) = target.render_sanitized(markup) {
        debug!(error = %e, "setHtml ignored");
    }
}

/// Prompt reporter value; a cancelled prompt reports `""`
pub fn prompt(dialogs: &dyn Dialogs, question: &str, default: &str) -> String {
    dialogs.prompt(question, default).unwrap_or_default()
}
