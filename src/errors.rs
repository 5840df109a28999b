use std::{error, fmt, io};

/// An error from suitewatch. Every fatal condition of a run (bad
/// configuration, malformed worker output, failed screenshot writes) ends up
/// as one of these.
pub struct WatchError(pub String);

impl WatchError {
    /// Prefix the message with some context, usually a path.
    pub fn context<S: fmt::Display>(self, ctx: S) -> Self {
        WatchError(format!("{}: {}", ctx, self.0))
    }
}

impl fmt::Debug for WatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for WatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl error::Error for WatchError {}

impl From<io::Error> for WatchError {
    fn from(err: io::Error) -> Self {
        WatchError(err.to_string())
    }
}

impl From<serde_json::Error> for WatchError {
    fn from(err: serde_json::Error) -> Self {
        WatchError(format!("malformed worker event: {}", err))
    }
}

impl From<base64::DecodeError> for WatchError {
    fn from(err: base64::DecodeError) -> Self {
        WatchError(format!("invalid screenshot payload: {}", err))
    }
}

impl From<toml::de::Error> for WatchError {
    fn from(err: toml::de::Error) -> Self {
        WatchError(err.to_string())
    }
}

impl From<indicatif::style::TemplateError> for WatchError {
    fn from(err: indicatif::style::TemplateError) -> Self {
        WatchError(format!("invalid progress template: {}", err))
    }
}
