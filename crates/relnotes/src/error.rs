#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("No issue-tracker base URL configured. Set RELNOTES_BASE_URL or pass --base-url")]
    MissingBaseUrl,

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },
}
