//! Converter session
//!
//! State a front end keeps between user actions: the raw text the user
//! pasted or typed, the payload text shown to (and editable by) the user, and
//! the short-lived "copied" indicator.
//!
//! - A paste always rebuilds the payload, even for blank text.
//! - Typing rebuilds it only while the input has non-whitespace content;
//!   clearing the input clears the payload.
//! - Edits to the payload text replace it verbatim. They are not parsed.

use std::time::{Duration, Instant};
use tracing::debug;

use crate::clipboard::{ClipboardResult, ClipboardWriter, CopyOutcome, CopyPlatform};
use crate::config::Config;
use crate::xscp::{build_payload_with, IdGenerator, UuidGenerator};

/// Default lifetime of the "copied" indicator
pub const DEFAULT_FEEDBACK_WINDOW: Duration = Duration::from_millis(2000);

/// Input/output state of one converter view
#[derive(Debug)]
pub struct ConverterSession<G = UuidGenerator> {
    input: String,
    output: String,
    ids: G,
    feedback_window: Duration,
    optimistic_feedback: bool,
    copied_until: Option<Instant>,
}

impl Default for ConverterSession<UuidGenerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterSession<UuidGenerator> {
    /// Session with random ids and default feedback settings
    pub fn new() -> Self {
        Self::with_ids(UuidGenerator)
    }

    /// Session configured from the `[session]` table
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_feedback_window(config.feedback_window())
            .with_optimistic_feedback(config.session.optimistic_feedback)
    }
}

impl<G: IdGenerator> ConverterSession<G> {
    /// Session drawing ids from `ids`
    pub fn with_ids(ids: G) -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            ids,
            feedback_window: DEFAULT_FEEDBACK_WINDOW,
            optimistic_feedback: true,
            copied_until: None,
        }
    }

    /// Set how long [`is_copied`](Self::is_copied) stays true after a copy
    pub fn with_feedback_window(mut self, window: Duration) -> Self {
        self.feedback_window = window;
        self
    }

    /// Whether an unconfirmed copy still turns the indicator on
    pub fn with_optimistic_feedback(mut self, optimistic: bool) -> Self {
        self.optimistic_feedback = optimistic;
        self
    }

    /// Pasted text: store and always rebuild
    pub fn paste(&mut self, content: &str) {
        self.input = content.to_owned();
        self.rebuild();
    }

    /// Typed text: store, rebuild while non-blank, otherwise clear the output
    pub fn edit_input(&mut self, content: &str) {
        self.input = content.to_owned();
        if content.trim().is_empty() {
            debug!("Input is blank, clearing payload");
            self.output.clear();
        } else {
            self.rebuild();
        }
    }

    /// Replace the payload text with a user edit
    pub fn edit_output(&mut self, text: &str) {
        self.output = text.to_owned();
    }

    /// Current raw input
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current payload text
    pub fn output(&self) -> &str {
        &self.output
    }

    /// True when there is payload text to copy
    pub fn has_output(&self) -> bool {
        !self.output.is_empty()
    }

    /// Payload length in characters
    pub fn output_chars(&self) -> usize {
        self.output.chars().count()
    }

    /// Copy the current payload and input through `writer`.
    ///
    /// Starts the feedback window on `Confirmed`, and on `Issued` when
    /// optimistic feedback is enabled.
    pub async fn copy<P: CopyPlatform>(&mut self, writer: &ClipboardWriter<P>) -> ClipboardResult<CopyOutcome> {
        let outcome = writer.copy(&self.output, &self.input).await?;

        let show = match outcome {
            CopyOutcome::Confirmed => true,
            CopyOutcome::Issued => self.optimistic_feedback,
            CopyOutcome::Skipped => false,
        };
        if show {
            self.copied_until = Some(Instant::now() + self.feedback_window);
        }

        Ok(outcome)
    }

    /// True while the "copied" indicator should be shown
    pub fn is_copied(&self) -> bool {
        self.copied_until.is_some_and(|until| Instant::now() < until)
    }

    fn rebuild(&mut self) {
        self.output = build_payload_with(&self.input, &mut self.ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{MemoryBehavior, MemoryClipboard};
    use crate::xscp::Envelope;

    #[test]
    fn test_paste_builds_even_when_blank() {
        let mut session = ConverterSession::new();
        session.paste("   ");

        assert!(session.has_output());
        let envelope = Envelope::from_json(session.output()).unwrap();
        assert_eq!(envelope.embed_node().unwrap().v, "   ");
    }

    #[test]
    fn test_blank_edit_clears_output() {
        let mut session = ConverterSession::new();
        session.edit_input("<p>x</p>");
        assert!(session.has_output());

        session.edit_input(" \n\t");
        assert!(!session.has_output());
        assert_eq!(session.input(), " \n\t");
    }

    #[test]
    fn test_each_edit_regenerates_ids() {
        let mut session = ConverterSession::new();
        session.edit_input("a");
        let first = Envelope::from_json(session.output()).unwrap();
        session.edit_input("a");
        let second = Envelope::from_json(session.output()).unwrap();

        assert_ne!(first.embed_node().unwrap().id, second.embed_node().unwrap().id);
    }

    #[test]
    fn test_output_edit_is_verbatim() {
        let mut session = ConverterSession::new();
        session.paste("<p>x</p>");
        session.edit_output("not json at all");

        assert_eq!(session.output(), "not json at all");
        assert_eq!(session.output_chars(), 15);
    }

    #[tokio::test]
    async fn test_copy_uses_raw_input() {
        let writer = ClipboardWriter::new(MemoryClipboard::new());
        let mut session = ConverterSession::new();
        session.paste("<i>\tx</i>\n");

        let outcome = session.copy(&writer).await.unwrap();
        assert_eq!(outcome, CopyOutcome::Confirmed);
        assert!(session.is_copied());

        let tx = writer.platform().last_transaction().unwrap();
        assert_eq!(tx.get_text("text/plain"), Some("<i>\tx</i>\n"));
        assert_eq!(tx.get_text("application/json"), Some(session.output()));
    }

    #[tokio::test]
    async fn test_copy_without_output_skips() {
        let writer = ClipboardWriter::new(MemoryClipboard::new());
        let mut session = ConverterSession::new();

        assert_eq!(session.copy(&writer).await.unwrap(), CopyOutcome::Skipped);
        assert!(!session.is_copied());
        assert!(writer.platform().transactions().is_empty());
    }

    #[tokio::test]
    async fn test_unconfirmed_copy_respects_optimistic_flag() {
        let writer = ClipboardWriter::new(MemoryClipboard::with_behavior(MemoryBehavior::Unconfirmed));

        let mut cautious = ConverterSession::new().with_optimistic_feedback(false);
        cautious.paste("x");
        assert_eq!(cautious.copy(&writer).await.unwrap(), CopyOutcome::Issued);
        assert!(!cautious.is_copied());

        let mut optimistic = ConverterSession::new();
        optimistic.paste("x");
        optimistic.copy(&writer).await.unwrap();
        assert!(optimistic.is_copied());
    }

    #[tokio::test]
    async fn test_from_config_applies_session_table() {
        let mut config = Config::default_config();
        config.session.feedback_ms = 15;
        config.session.optimistic_feedback = false;
        let writer = ClipboardWriter::new(MemoryClipboard::with_behavior(MemoryBehavior::Unconfirmed));

        let mut session = ConverterSession::from_config(&config);
        session.paste("x");
        session.copy(&writer).await.unwrap();
        assert!(!session.is_copied());

        config.session.optimistic_feedback = true;
        let mut session = ConverterSession::from_config(&config);
        session.paste("x");
        session.copy(&writer).await.unwrap();
        assert!(session.is_copied());

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(!session.is_copied());
    }

    #[tokio::test]
    async fn test_feedback_window_expires() {
        let writer = ClipboardWriter::new(MemoryClipboard::new());
        let mut session = ConverterSession::new().with_feedback_window(Duration::from_millis(20));
        session.paste("x");
        session.copy(&writer).await.unwrap();
        assert!(session.is_copied());

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(!session.is_copied());
    }
}
