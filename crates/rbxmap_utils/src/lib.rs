//! Helpers shared by every rbxmap crate

pub mod color;
mod context;

pub use context::Otherwise;

/// Result type of everything that reports errors to a user, rather than matching on them.
pub type AnyResult<T = (), E = anyhow::Error> = anyhow::Result<T, E>;

/// `Ok(())`, for functions returning an [`AnyResult`].
pub const fn ok<E>() -> Result<(), E> {
    Ok(())
}
