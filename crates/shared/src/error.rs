#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    InvalidParameters(#[from] validator::ValidationErrors),

    #[error("plan {plan_id} has no calorie target to rescale from")]
    DegenerateSource { plan_id: String },

    #[error("meal plan {0} not found")]
    NotFound(String),

    #[error("forbidden")]
    Forbidden,

    #[error("plan store: {0}")]
    Store(String),

    #[error("cannot {action} while {from}")]
    InvalidTransition { from: String, action: &'static str },

    #[error("rate limit exceeded, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("generation failed: {0}")]
    Generation(String),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

impl Error {
    /// Whether the user can fix the input or simply resubmit.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::InvalidParameters(_)
                | Error::NotFound(_)
                | Error::Store(_)
                | Error::RateLimited { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Unknown(value.into())
    }
}

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Server(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::Server(format!($err)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Server(format!($fmt, $($arg)*)))
    };
}
