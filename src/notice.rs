use std::fmt;

pub const EMPTY_PROMPT_TEXT: &str = "Enter a prompt";
pub const INVALID_CREDENTIALS_TEXT: &str = "Invalid Credentials";
/// Shown in place of any reply when the service could not be reached.
pub const SERVER_ERROR_TEXT: &str = "Server error.";

/// Blocking notices raised to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EmptyPrompt,
    InvalidCredentials,
    /// Message returned by the key update call, shown as-is.
    KeyUpdate(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Self::EmptyPrompt => EMPTY_PROMPT_TEXT,
            Self::InvalidCredentials => INVALID_CREDENTIALS_TEXT,
            Self::KeyUpdate(message) => message.as_str(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
