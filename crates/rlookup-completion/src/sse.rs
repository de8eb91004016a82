use serde::Deserialize;

use crate::CompletionError;

/// One decoded piece of a streamed chat completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamDelta {
    Text(String),
    /// `data: [DONE]`
    Done,
}

/// Incremental decoder for the chat-completion event stream.
///
/// Network chunks can end anywhere, including inside a line or a multi-byte
/// character, so bytes are buffered until a full line is available.
#[derive(Default)]
pub struct EventDecoder {
    buffer: Vec<u8>,
}

impl EventDecoder {
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Result<StreamDelta, CompletionError>> {
        self.buffer.extend_from_slice(chunk);

        let mut decoded = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            if let Some(delta) = parse_line(line.trim_end_matches(['\r', '\n'])) {
                decoded.push(delta);
            }
        }
        decoded
    }
}

#[derive(Deserialize)]
struct ChunkFrame {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    error: Option<UpstreamError>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Deserialize, Default)]
struct Delta {
    content: Option<String>,
}

#[derive(Deserialize)]
struct UpstreamError {
    message: String,
}

fn parse_line(line: &str) -> Option<Result<StreamDelta, CompletionError>> {
    // Comments, event names and blank separators carry no text
    let data = line.strip_prefix("data:")?.trim_start();

    if data == "[DONE]" {
        return Some(Ok(StreamDelta::Done));
    }

    let frame: ChunkFrame = match serde_json::from_str(data) {
        Ok(frame) => frame,
        Err(e) => return Some(Err(CompletionError::MalformedFrame(e.to_string()))),
    };

    if let Some(error) = frame.error {
        return Some(Err(CompletionError::ApiError(error.message)));
    }

    let text = frame.choices.into_iter().next()?.delta.content?;
    if text.is_empty() {
        return None;
    }
    Some(Ok(StreamDelta::Text(text)))
}
