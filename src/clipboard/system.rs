//! OS clipboard backend
//!
//! Commits transactions through `clipboard-rs`, which can publish custom
//! format identifiers next to plain text in a single `set` call.
//!
//! The commit runs on a dedicated owner thread. On X11 the process that set
//! the selection has to stay alive to answer paste requests, so after
//! reporting the result the thread keeps its clipboard context according to
//! the configured [`Ownership`]. By default that is until another
//! application replaces the clipboard content.

use clipboard_rs::{
    Clipboard, ClipboardContent, ClipboardContext, ClipboardHandler, ClipboardWatcher, ClipboardWatcherContext,
    WatcherShutdown,
};
use parking_lot::Mutex;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, trace, warn};

use lamco_clipboard_mime::formats::{MIME_TEXT_HTML, MIME_TEXT_PLAIN};
use lamco_clipboard_mime::{
    ClipboardEntry, ClipboardError, ClipboardResult, ClipboardTransaction, CopyDelivery, CopyEvent, CopyIntercept,
    CopyPlatform,
};

/// Default clipboard ownership period in [`Ownership::Linger`] mode
pub const DEFAULT_LINGER_MS: u64 = 1000;

/// How long the owner thread keeps the clipboard after a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ownership {
    /// Until another application puts something else on the clipboard
    #[default]
    UntilReplaced,
    /// For a fixed period, then release
    Linger(Duration),
}

/// The desktop clipboard
#[derive(Debug, Default)]
pub struct SystemClipboard {
    ownership: Ownership,
    released: Mutex<Option<oneshot::Receiver<()>>>,
}

impl SystemClipboard {
    /// Create a backend with the given ownership policy
    pub fn new(ownership: Ownership) -> Self {
        Self {
            ownership,
            released: Mutex::new(None),
        }
    }

    /// Ownership policy applied after each commit
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// Resolve once the owner thread of the latest commit has let go of the
    /// clipboard. Returns immediately if nothing was committed.
    pub async fn wait_released(&self) {
        let pending = self.released.lock().take();
        if let Some(rx) = pending {
            // A dropped sender also means the thread is gone
            let _ = rx.await;
        }
    }
}

impl CopyPlatform for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    async fn synthesize_copy(&self, intercept: &CopyIntercept) -> ClipboardResult<CopyDelivery> {
        let mut event = CopyEvent::new();
        if !intercept.dispatch(&mut event) || !event.is_default_prevented() {
            return Ok(CopyDelivery::NotHandled);
        }

        let tx = event.into_transaction();
        let ownership = self.ownership;
        let (done_tx, done_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();

        std::thread::Builder::new()
            .name("clipboard-owner".to_string())
            .spawn(move || {
                commit_and_hold(tx, ownership, done_tx);
                let _ = release_tx.send(());
            })?;
        *self.released.lock() = Some(release_rx);

        match done_rx.await {
            Ok(Ok(())) => Ok(CopyDelivery::Committed),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ClipboardError::Backend(
                "clipboard owner thread exited without reporting".to_string(),
            )),
        }
    }
}

fn commit_and_hold(tx: ClipboardTransaction, ownership: Ownership, done: oneshot::Sender<ClipboardResult<()>>) {
    let ctx = match ClipboardContext::new() {
        Ok(ctx) => ctx,
        Err(e) => {
            let _ = done.send(Err(ClipboardError::Backend(format!(
                "failed to open clipboard: {}",
                e
            ))));
            return;
        }
    };

    let marker = tx.entries().first().cloned();
    let mime_types: Vec<String> = tx.mime_types().into_iter().map(str::to_owned).collect();
    let contents: Vec<ClipboardContent> = tx.into_entries().into_iter().map(to_content).collect();

    if let Err(e) = ctx.set(contents) {
        warn!("Clipboard set failed: {}", e);
        let _ = done.send(Err(ClipboardError::WriteFailed(e.to_string())));
        return;
    }

    debug!(?mime_types, "Clipboard set");
    let _ = done.send(Ok(()));

    match (ownership, marker) {
        (Ownership::Linger(linger), _) => {
            if !linger.is_zero() {
                std::thread::sleep(linger);
            }
        }
        (Ownership::UntilReplaced, Some(marker)) => hold_until_replaced(marker),
        (Ownership::UntilReplaced, None) => {}
    }

    debug!("Releasing clipboard ownership");
    drop(ctx);
}

/// Block until the clipboard no longer carries `marker`
fn hold_until_replaced(marker: ClipboardEntry) {
    let mut watcher = match ClipboardWatcherContext::<ReplacementWatch>::new() {
        Ok(watcher) => watcher,
        Err(e) => {
            warn!(
                "Cannot watch the clipboard ({}), holding for {}ms instead",
                e, DEFAULT_LINGER_MS
            );
            std::thread::sleep(Duration::from_millis(DEFAULT_LINGER_MS));
            return;
        }
    };

    let shutdown = watcher.get_shutdown_channel();
    watcher.add_handler(ReplacementWatch {
        marker,
        shutdown: Some(shutdown),
    });

    debug!("Holding clipboard until replaced");
    watcher.start_watch();
}

struct ReplacementWatch {
    marker: ClipboardEntry,
    shutdown: Option<WatcherShutdown>,
}

impl ClipboardHandler for ReplacementWatch {
    fn on_clipboard_change(&mut self) {
        if still_ours(&self.marker) {
            trace!("Clipboard change is our own content");
            return;
        }

        debug!("Clipboard replaced by another owner");
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.stop();
        }
    }
}

/// Read the clipboard through a separate context and compare with `marker`
fn still_ours(marker: &ClipboardEntry) -> bool {
    let reader = match ClipboardContext::new() {
        Ok(reader) => reader,
        Err(_) => return false,
    };

    match marker.mime_type.as_str() {
        MIME_TEXT_PLAIN => reader
            .get_text()
            .is_ok_and(|text| text.as_bytes() == marker.data.as_slice()),
        mime_type => reader
            .get_buffer(mime_type)
            .is_ok_and(|data| data == marker.data),
    }
}

fn to_content(entry: ClipboardEntry) -> ClipboardContent {
    match entry.mime_type.as_str() {
        MIME_TEXT_PLAIN => ClipboardContent::Text(String::from_utf8_lossy(&entry.data).into_owned()),
        MIME_TEXT_HTML => ClipboardContent::Html(String::from_utf8_lossy(&entry.data).into_owned()),
        _ => ClipboardContent::Other(entry.mime_type, entry.data),
    }
}
