use crate::AnyResult;
use anyhow::anyhow;
use std::{error::Error, fmt::Display};

/// Converts a failure into an [`anyhow::Error`], with a message describing what was being done.
///
/// ```
/// use rbxmap_utils::Otherwise;
///
/// let error = "1.5".parse::<i32>().otherwise("reading a BrickColor").unwrap_err();
/// assert_eq!(error.to_string(), "reading a BrickColor");
/// ```
pub trait Otherwise<T> {
    fn otherwise(self, message: impl Display) -> AnyResult<T>;
}

impl<T, E> Otherwise<T> for Result<T, E>
where
    E: Error + Send + Sync + 'static,
{
    fn otherwise(self, message: impl Display) -> AnyResult<T> {
        self.map_err(|error| anyhow::Error::new(error).context(message.to_string()))
    }
}

/// A missing value becomes an error made of the message alone.
impl<T> Otherwise<T> for Option<T> {
    fn otherwise(self, message: impl Display) -> AnyResult<T> {
        self.ok_or_else(|| anyhow!("{message}"))
    }
}
