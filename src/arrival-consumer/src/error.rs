use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to load settings"))]
    Config {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: config::ConfigError,
    },
    #[snafu(display("Time threshold '{threshold:?}' is out of range"))]
    TimeThreshold {
        #[snafu(implicit)]
        location: Location,
        threshold: std::time::Duration,
        #[snafu(source)]
        error: chrono::OutOfRangeError,
    },
    #[snafu(display("Failed to open input '{path}'"))]
    Open {
        #[snafu(implicit)]
        location: Location,
        path: String,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to read from input"))]
    Read {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to write verdict"))]
    Write {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to serialize verdict"))]
    Serialize {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: serde_json::Error,
    },
    #[snafu(display("Failed to deserialize vessel position line '{line}'"))]
    Deserialize {
        #[snafu(implicit)]
        location: Location,
        line: String,
        #[snafu(source)]
        error: serde_json::Error,
    },
}
