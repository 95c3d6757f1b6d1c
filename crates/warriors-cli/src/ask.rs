//! Non-interactive `ask` command.

use std::io::{self, Write};

use thiserror::Error;
use tracing::info;
use warriors_engine::{ChatSession, Config, HistoryObserver, MessageStore, Sender, SubmitOutcome};

/// Errors from a one-shot question.
#[derive(Error, Debug)]
pub enum AskError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("failed to write transcript: {0}")]
    Io(#[from] io::Error),
}

/// Prints each new message as it is appended to the history.
pub struct TranscriptPrinter<W: Write> {
    out: W,
    assistant_name: String,
    printed: usize,
    error: Option<io::Error>,
}

impl<W: Write> TranscriptPrinter<W> {
    pub fn new(out: W, assistant_name: impl Into<String>) -> Self {
        Self {
            out,
            assistant_name: assistant_name.into(),
            printed: 0,
            error: None,
        }
    }

    /// Flush and return the writer, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn print_new(&mut self, history: &MessageStore) -> io::Result<()> {
        for message in history.iter().skip(self.printed) {
            let who = match message.sender() {
                Sender::User => "You",
                Sender::Assistant => self.assistant_name.as_str(),
            };
            writeln!(self.out, "{who}: {}", message.text())?;
        }
        self.printed = history.len();
        Ok(())
    }
}

impl<W: Write> HistoryObserver for TranscriptPrinter<W> {
    fn history_changed(&mut self, history: &MessageStore) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.print_new(history) {
            self.error = Some(e);
        }
    }
}

/// Submit `query` once, wait for the simulated reply and print both
/// messages to `out`.
pub async fn run_ask<W: Write>(config: &Config, query: &str, out: W) -> Result<W, AskError> {
    let mut session = ChatSession::new(config);
    let mut printer = TranscriptPrinter::new(out, config.assistant_name.clone());

    session.set_draft(query);
    if let SubmitOutcome::Ignored(_) = session.submit(&mut printer) {
        return Err(AskError::EmptyQuery);
    }
    session.wait_for_reply(&mut printer).await;
    info!(
        messages = session.conversation().history().len(),
        "ask finished"
    );

    Ok(printer.finish()?)
}
