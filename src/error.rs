use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlappyError {
    #[error("unknown speed level `{0}` (expected soft, normal, medium or hard)")]
    UnknownLevel(String),
    #[error("option `{0}` needs a value")]
    MissingValue(&'static str),
    #[error("option `{flag}` expects a number, got `{value}`")]
    InvalidNumber { flag: &'static str, value: String },
    #[error("unknown argument `{0}`, try --help")]
    UnknownArgument(String),
    #[error("could not open an audio output device")]
    Audio(#[from] rodio::StreamError),
}

pub type Result<T, E = FlappyError> = std::result::Result<T, E>;
