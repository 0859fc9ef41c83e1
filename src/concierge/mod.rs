//! The AI food concierge: a chat session over a [`GenerativeModel`] that knows the
//! live menu, plus one-shot image suggestions for the admin editor.
//!
//! Failures never reach the shopper. Every error is logged and swapped for a canned
//! reply in the active [`Language`].

pub mod error;
pub mod gemini;
pub mod prompt;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::domain::MenuItem;

pub use error::ConciergeError;
pub use gemini::{GeminiModel, GenerativeModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Filipino,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Filipino => "fil",
        }
    }

    fn welcome(self) -> &'static str {
        match self {
            Language::English => "Hi! I'm StreetBot. Craving something spicy, saucy or veggie? Ask me anything about the menu.",
            Language::Filipino => "Uy! Ako si StreetBot. Gutom ka na ba? Tanong ka lang tungkol sa menu, tara kain!",
        }
    }

    fn unavailable(self) -> &'static str {
        match self {
            Language::English => "Sorry, busy in the kitchen. Can you repeat that?",
            Language::Filipino => "Pasensya na, busy sa kusina. Paki-ulit?",
        }
    }

    fn empty_reply(self) -> &'static str {
        match self {
            Language::English => "Delicious! What else would you like?",
            Language::Filipino => "Sarap! Ano pa gusto mo?",
        }
    }

    fn failure(self) -> &'static str {
        match self {
            Language::English => "Oops, dropped the fishball. Please try again.",
            Language::Filipino => "Ay, nalaglag ang fishball. Paki-ulit po?",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "fil" | "tl" | "filipino" | "tagalog" => Ok(Language::Filipino),
            other => Err(format!("unsupported language '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// One shopper's chat session.
///
/// `transcript` is what the shopper sees, greeting and fallbacks included.
/// `history` is what the model sees: only completed user/model exchanges.
pub struct Concierge<M: GenerativeModel> {
    model: Option<M>,
    language: Language,
    system_instruction: Option<String>,
    transcript: Vec<ChatMessage>,
    history: Vec<ChatMessage>,
}

impl<M: GenerativeModel> Concierge<M> {
    /// `None` means no API key was configured; the concierge still greets but every
    /// message gets the "unavailable" reply.
    pub fn new(model: Option<M>, language: Language) -> Self {
        if model.is_none() {
            warn!("No generative model configured, concierge will answer with fallbacks");
        }
        Self {
            model,
            language,
            system_instruction: None,
            transcript: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn has_session(&self) -> bool {
        self.system_instruction.is_some()
    }

    /// Starts a fresh conversation against the given menu.
    #[instrument(skip(self, menu), fields(language = %self.language, menu_size = menu.len()))]
    pub fn start_session(&mut self, menu: &[MenuItem]) {
        self.system_instruction = Some(prompt::system_instruction(menu, self.language));
        self.history.clear();
        self.transcript.clear();
        self.transcript
            .push(ChatMessage::new(ChatRole::Model, self.language.welcome()));
        info!("Chat session started");
    }

    /// Switching language restarts the conversation.
    pub fn set_language(&mut self, language: Language, menu: &[MenuItem]) {
        if self.language == language && self.has_session() {
            return;
        }
        self.language = language;
        self.start_session(menu);
    }

    /// Sends one shopper message and returns the reply that was appended to the
    /// transcript.
    #[instrument(skip(self, text), fields(language = %self.language, turns = self.history.len()))]
    pub async fn send_message(&mut self, text: &str) -> String {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring blank message");
            return String::new();
        }
        self.transcript.push(ChatMessage::new(ChatRole::User, text));

        let reply = match (&self.model, &self.system_instruction) {
            (Some(model), Some(instruction)) => {
                self.history.push(ChatMessage::new(ChatRole::User, text));
                match model.generate_text(instruction, &self.history).await {
                    Ok(reply) if reply.trim().is_empty() => {
                        debug!("Model returned no text");
                        self.history.pop();
                        self.language.empty_reply().to_string()
                    }
                    Ok(reply) => {
                        self.history.push(ChatMessage::new(ChatRole::Model, reply.clone()));
                        reply
                    }
                    Err(e) => {
                        error!(error = %e, "Chat request failed");
                        self.history.pop();
                        self.language.failure().to_string()
                    }
                }
            }
            _ => {
                warn!("Chat unavailable, no model or session");
                self.language.unavailable().to_string()
            }
        };

        self.transcript.push(ChatMessage::new(ChatRole::Model, reply.clone()));
        reply
    }

    /// A `data:` URL for a photo of the item, or `None` if generation failed.
    #[instrument(skip(self, description))]
    pub async fn suggest_image(&self, name: &str, description: &str) -> Option<String> {
        let Some(model) = &self.model else {
            warn!("Image generation unavailable, no model configured");
            return None;
        };
        match model.generate_image(&prompt::image_prompt(name, description)).await {
            Ok(url) => {
                info!("Image generated");
                Some(url)
            }
            Err(e) => {
                error!(error = %e, "Image generation failed");
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Scripted model: pops one reply per call and records the history it was given.
    #[derive(Clone, Default)]
    pub struct FakeModel {
        pub replies: Arc<Mutex<Vec<Result<String, ConciergeError>>>>,
        pub seen: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    }

    impl FakeModel {
        pub fn with_replies(replies: Vec<Result<String, ConciergeError>>) -> Self {
            let model = Self::default();
            *model.replies.lock().unwrap() = replies.into_iter().rev().collect();
            model
        }
    }

    impl GenerativeModel for FakeModel {
        async fn generate_text(&self, _system: &str, history: &[ChatMessage]) -> Result<String, ConciergeError> {
            self.seen.lock().unwrap().push(history.to_vec());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(ConciergeError::EmptyResponse))
        }

        async fn generate_image(&self, prompt: &str) -> Result<String, ConciergeError> {
            if prompt.contains("Mystery") {
                return Err(ConciergeError::EmptyResponse);
            }
            Ok("data:image/png;base64,AAAA".to_string())
        }
    }
}
