use thiserror::Error;

/// Message shown instead of the raw error text when GitHub refuses an
/// anonymous request.
pub const RATE_LIMIT_MESSAGE: &str =
  "GitHub API rate limit exceeded. \
   Please try again later.";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
  #[error("HTTP {status}: {body}")]
  Status { status: u16, body: String },

  #[error("request failed: {0}")]
  Transport(String),

  #[error("failed to decode response: {0}")]
  Decode(String)
}

impl FetchError {
  pub fn status(
    status: u16,
    body: impl Into<String>
  ) -> Self {
    Self::Status {
      status,
      body: body.into()
    }
  }

  pub fn is_rate_limited(&self) -> bool {
    matches!(
      self,
      Self::Status { status: 403, .. }
    )
  }
}

impl From<serde_json::Error> for FetchError {
  fn from(error: serde_json::Error) -> Self {
    Self::Decode(error.to_string())
  }
}

/// Maps a stored fetch error text to what the timeline shows the reader.
///
/// The check is textual because the timeline keeps only the message once a
/// request has failed.
pub fn user_facing_error(
  error_text: &str
) -> String {
  if error_text.contains("403") {
    return RATE_LIMIT_MESSAGE.to_string();
  }
  format!(
    "Unable to load activity: \
     {error_text}"
  )
}
