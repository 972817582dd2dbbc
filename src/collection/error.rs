use tokio::sync::{broadcast, mpsc};

#[derive(Debug)]
pub enum SignalError {
    NotWired(&'static str),
    FailedSend(mpsc::error::SendError<()>),
    Closed,
}

impl From<mpsc::error::SendError<()>> for SignalError {
    fn from(value: mpsc::error::SendError<()>) -> Self {
        SignalError::FailedSend(value)
    }
}

impl std::fmt::Display for SignalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotWired(name) => write!(
                f,
                "The {name} signal was used before being wired to the acquisition link!"
            ),
            Self::FailedSend(e) => write!(f, "A collection signal could not be delivered: {e}"),
            Self::Closed => write!(f, "The collection signal channel was closed!"),
        }
    }
}

impl std::error::Error for SignalError {}

#[derive(Debug)]
pub enum LinkError {
    FailedCancelSend(broadcast::error::SendError<()>),
    FailedJoin(tokio::task::JoinError),
}

impl From<broadcast::error::SendError<()>> for LinkError {
    fn from(value: broadcast::error::SendError<()>) -> Self {
        Self::FailedCancelSend(value)
    }
}

impl From<tokio::task::JoinError> for LinkError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::FailedJoin(value)
    }
}

impl std::fmt::Display for LinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FailedCancelSend(e) => {
                write!(f, "The link could not cancel the collection monitor: {e}")
            }
            Self::FailedJoin(e) => write!(f, "The link failed to join the monitor task: {e}"),
        }
    }
}

impl std::error::Error for LinkError {}
