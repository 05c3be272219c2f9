use std::error::Error;
use std::fmt;
use std::fmt::Display;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogError {
    E(String),
}

impl From<&str> for LogError {
    fn from(arg: &str) -> Self {
        LogError::E(arg.to_string())
    }
}

impl From<String> for LogError {
    fn from(arg: String) -> Self {
        LogError::E(arg)
    }
}

impl From<std::io::Error> for LogError {
    fn from(arg: std::io::Error) -> Self {
        LogError::E(arg.to_string())
    }
}

impl Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogError::E(err) => write!(f, "{}", err),
        }
    }
}

impl Error for LogError {}

impl From<LogError> for std::io::Error {
    fn from(arg: LogError) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, arg.to_string())
    }
}
