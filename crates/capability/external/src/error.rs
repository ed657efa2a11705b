/// 外部服务调用错误。
#[derive(Debug, thiserror::Error)]
pub enum ExternalError {
    #[error("external request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("external service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected external response: {0}")]
    InvalidResponse(String),
}
