// Top-level error for the window host.
// Every variant states *where* things went wrong.
use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("window update error: {0}")]
    WindowUpdate(String), // Pushing the frame buffer failed
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("snapshot error: {0}")]
    Snapshot(String), // Encoding/saving a PNG failed
}
