use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaproomError {
    #[error("empty input: no {0} values to aggregate")]
    EmptyInput(&'static str),

    #[error("division by zero computing {0}")]
    DivisionByZero(&'static str),

    #[error("not applicable: {0}")]
    NotApplicable(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("unknown timeframe tag: {0}")]
    UnknownTimeframe(String),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}
