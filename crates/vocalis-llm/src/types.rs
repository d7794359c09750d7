/// Role of a message participant
///
/// Each job is a single turn, so no assistant messages are ever sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// System instruction
    System,
    /// User message
    User,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// Message in a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Parameters controlling text generation
#[derive(Debug, Clone, Default)]
pub struct CompletionParams {
    /// Sampling temperature (0.0 to 2.0)
    pub temperature: Option<f64>,
    /// Nucleus sampling threshold
    pub top_p: Option<f64>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

/// Internal canonical completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<Message>,
    /// Generation parameters
    pub params: CompletionParams,
}

/// Reply extracted from a completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Assistant text
    pub text: String,
    /// Model that produced it, as reported by the provider
    pub model: String,
    /// Total tokens consumed, when reported
    pub total_tokens: Option<u32>,
}
