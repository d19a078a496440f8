use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("reading xen features from {path} failed (not a xen guest?): {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("xen features content {0:?} is not a valid hexadecimal bitmask")]
    MalformedContent(String),
    #[error("io issue encountered: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
