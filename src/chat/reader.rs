//! Streaming reader for chat-completions SSE replies.
//!
//! Turns an ordered body of SSE chunks into a sequence of full-text
//! snapshots of one assistant reply. Each snapshot extends the previous one.
//!
//! Lines are only interpreted once their `\n` has arrived, so chunk
//! boundaries inside a payload, inside the `data: ` prefix or between `\r`
//! and `\n` are invisible to the parser. A payload whose JSON ends early is
//! held and completed with the following line; anything that can never be
//! completed is dropped with a warning and the stream carries on.

use std::time::Duration;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use futures_util::stream;

use crate::error::StreamError;
use crate::models::Conversation;
use crate::sse::{
    parse_delta, parse_sse_line, DeltaEvent, LineBuffer, SseLine, Utf8StreamDecoder,
    DONE_SENTINEL,
};
use crate::traits::HttpError;

/// Why a reply stream stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// `data: [DONE]` was seen; nothing after it was read.
    Sentinel,
    /// The body ended without a sentinel.
    EndOfStream,
}

/// Lifecycle of a reader. `Closed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// Nothing read yet
    Idle,
    /// Reading and decoding chunks
    Streaming,
    /// Finished normally
    Closed(Termination),
    /// A read failed or timed out
    Failed,
}

impl ReaderState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReaderState::Closed(_) | ReaderState::Failed)
    }
}

/// Summary of a reply that closed normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyOutcome {
    /// Final assembled text
    pub text: String,
    /// Number of content fragments appended
    pub fragments: usize,
    pub termination: Termination,
}

impl ReplyOutcome {
    pub fn is_empty(&self) -> bool {
        self.fragments == 0
    }
}

/// What processing one complete line led to.
enum LineStep {
    Continue,
    Snapshot,
    Done,
}

/// A short limit is reported as 1 second, never 0.
fn whole_secs_rounded_up(limit: Duration) -> u64 {
    limit.as_secs() + u64::from(limit.subsec_nanos() > 0)
}

/// Reads one SSE reply. Owns its buffers for the lifetime of the stream.
pub struct StreamingChatReader<S> {
    body: S,
    decoder: Utf8StreamDecoder,
    lines: LineBuffer,
    /// Payload whose JSON ended early, waiting for its continuation line
    held: Option<String>,
    text: String,
    fragments: usize,
    state: ReaderState,
    read_timeout: Option<Duration>,
}

impl<S> StreamingChatReader<S>
where
    S: Stream<Item = Result<Bytes, HttpError>> + Unpin,
{
    /// Wrap a response body that is already known to be a 2xx SSE stream.
    pub fn new(body: S) -> Self {
        Self {
            body,
            decoder: Utf8StreamDecoder::new(),
            lines: LineBuffer::new(),
            held: None,
            text: String::new(),
            fragments: 0,
            state: ReaderState::Idle,
            read_timeout: None,
        }
    }

    /// Fail with [`StreamError::Timeout`] when a single read takes longer than this.
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Text assembled so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Advance until the reply text grows, the stream closes, or a read fails.
    ///
    /// Returns `Some(Ok(text))` with the full text so far after each accepted
    /// fragment, `Some(Err(_))` once on failure, and `None` when closed.
    pub async fn next_snapshot(&mut self) -> Option<Result<String, StreamError>> {
        loop {
            match self.state {
                ReaderState::Closed(_) | ReaderState::Failed => return None,
                ReaderState::Idle => {
                    tracing::debug!("Reading reply stream");
                    self.state = ReaderState::Streaming;
                }
                ReaderState::Streaming => {}
            }

            // First, drain complete lines already buffered
            while let Some(line) = self.lines.next_line() {
                match self.handle_line(&line) {
                    LineStep::Continue => {}
                    LineStep::Snapshot => return Some(Ok(self.text.clone())),
                    LineStep::Done => {
                        self.close(Termination::Sentinel);
                        return None;
                    }
                }
            }

            // Need more data from the body
            match self.read_chunk().await {
                Ok(Some(chunk)) => {
                    let text = self.decoder.decode(&chunk);
                    self.lines.push_str(&text);
                }
                Ok(None) => {
                    self.close(Termination::EndOfStream);
                    return None;
                }
                Err(err) => {
                    tracing::error!(
                        error = %err,
                        fragments = self.fragments,
                        "Reply stream failed"
                    );
                    self.state = ReaderState::Failed;
                    return Some(Err(err));
                }
            }
        }
    }

    /// Consume the reader as a lazy, finite stream of snapshots.
    pub fn into_snapshots(self) -> impl Stream<Item = Result<String, StreamError>> {
        stream::unfold(self, |mut reader| async move {
            reader
                .next_snapshot()
                .await
                .map(|snapshot| (snapshot, reader))
        })
    }

    /// Append one assistant placeholder to `conversation` and keep it in sync
    /// with every snapshot, calling `on_update` after each one.
    ///
    /// The placeholder is left as-is on return; removing an empty one is the
    /// caller's decision.
    pub async fn stream_into<F>(
        mut self,
        conversation: &mut Conversation,
        mut on_update: F,
    ) -> Result<ReplyOutcome, StreamError>
    where
        F: FnMut(&str),
    {
        let index = conversation.begin_assistant_reply();

        while let Some(snapshot) = self.next_snapshot().await {
            let text = snapshot?;
            conversation.update_reply(index, &text);
            on_update(&text);
        }

        let termination = match self.state {
            ReaderState::Closed(termination) => termination,
            _ => Termination::EndOfStream,
        };
        Ok(ReplyOutcome {
            text: self.text,
            fragments: self.fragments,
            termination,
        })
    }

    async fn read_chunk(&mut self) -> Result<Option<Bytes>, StreamError> {
        let next = match self.read_timeout {
            Some(limit) => tokio::time::timeout(limit, self.body.next())
                .await
                .map_err(|_| StreamError::Timeout {
                    duration_secs: whole_secs_rounded_up(limit),
                })?,
            None => self.body.next().await,
        };

        match next {
            Some(Ok(chunk)) => Ok(Some(chunk)),
            Some(Err(err)) => Err(err.into()),
            None => Ok(None),
        }
    }

    fn handle_line(&mut self, line: &str) -> LineStep {
        let parsed = parse_sse_line(line);
        match self.held.take() {
            Some(held) => self.resume_held(held, line, parsed),
            None => self.handle_parsed(parsed),
        }
    }

    fn handle_parsed(&mut self, parsed: SseLine) -> LineStep {
        match parsed {
            SseLine::Data(payload) => self.handle_payload(payload),
            // Keep-alives, blank lines and other fields carry no content
            SseLine::Empty | SseLine::Comment(_) | SseLine::Other(_) => LineStep::Continue,
        }
    }

    fn handle_payload(&mut self, payload: String) -> LineStep {
        if payload == DONE_SENTINEL {
            return LineStep::Done;
        }

        match parse_delta(&payload) {
            Ok(delta) => self.apply(delta),
            Err(err) if err.is_incomplete() => {
                tracing::debug!("Holding incomplete payload until its continuation arrives");
                self.held = Some(payload);
                LineStep::Continue
            }
            Err(err) => {
                tracing::warn!(error = %err, "Dropping malformed SSE payload");
                LineStep::Continue
            }
        }
    }

    /// Try `line` as the continuation of a payload that ended early.
    fn resume_held(&mut self, held: String, line: &str, parsed: SseLine) -> LineStep {
        match parsed {
            SseLine::Empty => {
                tracing::warn!("Event ended with an incomplete payload, dropping it");
                LineStep::Continue
            }
            SseLine::Data(more) => {
                if more == DONE_SENTINEL {
                    tracing::warn!("Stream finished with an incomplete payload, dropping it");
                    return LineStep::Done;
                }
                // A payload that stands on its own starts a new event
                if let Ok(delta) = parse_delta(&more) {
                    tracing::warn!("Dropping incomplete payload superseded by a new event");
                    return self.apply(delta);
                }
                // Multi-line data fields join with '\n'
                let joined = format!("{}\n{}", held, more);
                match parse_delta(&joined) {
                    Ok(delta) => self.apply(delta),
                    Err(err) if err.is_incomplete() => {
                        self.held = Some(joined);
                        LineStep::Continue
                    }
                    Err(_) => {
                        tracing::warn!("Dropping payload that could not be completed");
                        self.handle_payload(more)
                    }
                }
            }
            SseLine::Comment(_) | SseLine::Other(_) => {
                // The rest of a JSON body split by a stray newline is taken
                // only when it completes the payload
                let joined = format!("{}{}", held, line);
                if let Ok(delta) = parse_delta(&joined) {
                    return self.apply(delta);
                }
                tracing::debug!(
                    comment = matches!(parsed, SseLine::Comment(_)),
                    "Skipping non-data line while a payload is held"
                );
                self.held = Some(held);
                LineStep::Continue
            }
        }
    }

    fn apply(&mut self, delta: DeltaEvent) -> LineStep {
        match delta.fragment() {
            Some(fragment) => {
                self.text.push_str(fragment);
                self.fragments += 1;
                LineStep::Snapshot
            }
            None => LineStep::Continue,
        }
    }

    fn close(&mut self, termination: Termination) {
        if self.held.take().is_some() {
            tracing::debug!("Discarding incomplete payload at end of stream");
        }
        let tail = self.decoder.finish();
        self.lines.push_str(&tail);
        if !self.lines.is_empty() {
            tracing::debug!(
                bytes = self.lines.remaining().len(),
                "Discarding unprocessed stream tail"
            );
            self.lines.clear();
        }

        self.state = ReaderState::Closed(termination);
        tracing::info!(
            fragments = self.fragments,
            chars = self.text.chars().count(),
            ?termination,
            "Reply stream closed"
        );
    }
}
