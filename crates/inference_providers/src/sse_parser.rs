use crate::{ChatCompletionChunk, CompletionError};
use bytes::Bytes;
use futures_util::Stream;
use std::collections::VecDeque;
use std::fmt::Display;
use std::pin::Pin;
use std::task::{Context, Poll};

const DATA_PREFIX: &str = "data: ";
const DONE_MARKER: &str = "[DONE]";

/// What a single SSE line contributes to the delta stream
#[derive(Debug, PartialEq, Eq)]
enum SSELine {
    Delta(String),
    Done,
    Skip,
}

/// SSE (Server-Sent Events) stream parser that turns a chat-completion body
/// into a stream of text deltas.
///
/// Lines are buffered as raw bytes, so an event split across HTTP chunks
/// (even in the middle of a UTF-8 sequence) is decoded only once complete.
/// Payloads that are not JSON, or carry no `choices[0].delta.content`, are
/// skipped. The stream ends at `data: [DONE]` or when the body ends.
pub struct SSEParser<S> {
    inner: S,
    buffer: Vec<u8>,
    pending: VecDeque<String>,
    done: bool,
}

pub fn new_sse_parser<S, E>(stream: S) -> SSEParser<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Display,
{
    SSEParser::new(stream)
}

impl<S, E> SSEParser<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Display,
{
    pub fn new(stream: S) -> Self {
        Self {
            inner: stream,
            buffer: Vec::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    fn parse_sse_line(line: &str) -> SSELine {
        let line = line.trim_end_matches(['\r', '\n']);

        // Blank separators, comments and non-data fields carry no content
        let Some(data) = line.strip_prefix(DATA_PREFIX) else {
            return SSELine::Skip;
        };

        if data.trim() == DONE_MARKER {
            return SSELine::Done;
        }

        match serde_json::from_str::<ChatCompletionChunk>(data) {
            Ok(chunk) => match chunk.delta_content() {
                Some(content) => SSELine::Delta(content.to_string()),
                None => SSELine::Skip,
            },
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unparseable SSE payload");
                SSELine::Skip
            }
        }
    }

    fn handle_line(&mut self, raw: &[u8]) {
        let line = String::from_utf8_lossy(raw);
        match Self::parse_sse_line(&line) {
            SSELine::Delta(content) => self.pending.push_back(content),
            SSELine::Done => {
                self.done = true;
                self.buffer.clear();
            }
            SSELine::Skip => {}
        }
    }

    fn process_buffer(&mut self) {
        while !self.done {
            let Some(newline_pos) = self.buffer.iter().position(|b| *b == b'\n') else {
                break;
            };
            let line: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
            self.handle_line(&line);
        }
    }
}

impl<S, E> Stream for SSEParser<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Display,
{
    type Item = Result<String, CompletionError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            // Deltas parsed before a [DONE] marker are still delivered
            if let Some(delta) = self.pending.pop_front() {
                return Poll::Ready(Some(Ok(delta)));
            }
            if self.done {
                return Poll::Ready(None);
            }

            match Pin::new(&mut self.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    self.buffer.extend_from_slice(&bytes);
                    self.process_buffer();
                }
                Poll::Ready(Some(Err(e))) => {
                    self.done = true;
                    return Poll::Ready(Some(Err(CompletionError::RequestFailed(e.to_string()))));
                }
                Poll::Ready(None) => {
                    // Body ended without a trailing newline
                    if !self.buffer.is_empty() {
                        let rest = std::mem::take(&mut self.buffer);
                        self.handle_line(&rest);
                    }
                    self.done = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
