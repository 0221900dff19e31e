use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no space left on device")]
    NoSpace,
    #[error("IO error: `{0}`")]
    IO(io::Error),
    #[error("`{0}`")]
    Config(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("worker panicked or was cancelled: `{0}`")]
    Join(#[from] tokio::task::JoinError),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        if is_no_space(&err) {
            Error::NoSpace
        } else {
            Error::IO(err)
        }
    }
}

/// Whether the error means the device (or the user's quota) ran out of room
pub fn is_no_space(err: &io::Error) -> bool {
    matches!(err.raw_os_error(), Some(libc::ENOSPC) | Some(libc::EDQUOT))
}
