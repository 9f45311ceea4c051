use thiserror::Error;

/// Card field named in input validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Fmv,
    Probability,
}

impl std::fmt::Display for CardField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fmv => write!(f, "fmv"),
            Self::Probability => write!(f, "probability"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("distribution has no cards")]
    EmptyDistribution,

    #[error("degenerate distribution: probabilities sum to zero")]
    DegenerateDistribution,

    #[error("probability sum {0} has no finite normalizing scale")]
    NonFiniteScale(f64),

    #[error("invalid pack price: {0} (must be finite and > 0)")]
    InvalidPrice(f64),

    #[error("card #{index}: {field} is not a finite number")]
    NonFiniteInput { index: usize, field: CardField },

    #[error("card #{index}: {field} is negative ({value})")]
    NegativeInput {
        index: usize,
        field: CardField,
        value: f64,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("source unavailable: {endpoint} returned HTTP {status}")]
    SourceUnavailable { endpoint: String, status: u16 },

    #[error("unknown tier '{0}'")]
    UnknownTier(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}
