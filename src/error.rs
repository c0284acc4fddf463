#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bridge returned HTTP {status}")]
    Api { status: u16 },

    #[error("Unsupported response: {0}")]
    UnsupportedResponse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 2,
            _ => 1,
        }
    }
}
