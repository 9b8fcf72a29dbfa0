use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Transport(#[from] mini_redis::Error),

    #[error("connection reset by server")]
    ConnectionReset,

    /// The server answered with an error reply.
    #[error("server error: {0}")]
    Server(String),

    #[error("unexpected reply to {command}: {frame}")]
    UnexpectedReply { command: String, frame: String },
}
