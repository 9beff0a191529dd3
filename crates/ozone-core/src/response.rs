//! Response payload in the voice platform's convention.

use crate::advisory::Advisory;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    pub response: SpeechResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechResponse {
    pub output_speech: OutputSpeech,
    pub card: Card,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub content: String,
}

impl ResponseEnvelope {
    /// Speech and card carry the same text; the session always ends.
    pub fn from_advisory(advisory: &Advisory) -> Self {
        Self {
            response: SpeechResponse {
                output_speech: OutputSpeech {
                    kind: "PlainText".to_string(),
                    text: advisory.text.clone(),
                },
                card: Card {
                    kind: "Simple".to_string(),
                    title: advisory.title.to_string(),
                    content: advisory.text.clone(),
                },
                should_end_session: true,
            },
        }
    }

    pub fn text(&self) -> &str {
        &self.response.output_speech.text
    }
}

/// Where a finished response goes. Called once per invocation.
pub trait ResponseSink {
    fn respond(&mut self, payload: ResponseEnvelope);
}

impl ResponseSink for Vec<ResponseEnvelope> {
    fn respond(&mut self, payload: ResponseEnvelope) {
        self.push(payload);
    }
}
