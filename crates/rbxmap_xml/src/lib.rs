//! Reader for XML place files
//!
//! This crate covers everything between the raw markup and a typed description of a part:
//!  * [`document`] - the owned element tree, and `Item` selection
//!  * [`property`] - typed property readers
//!  * [`cframe`] - coordinate frame decoding
//!  * [`palette`] - the BrickColor palette
//!  * [`part`] - reading `Part` instances out of their property blocks

pub mod cframe;
pub mod document;
pub mod palette;
pub mod part;
pub mod property;

pub use cframe::{CFrame, CFrameError};
pub use document::{LoadError, SceneDocument, XmlElement};
pub use part::{PartProperties, PrimitiveKind, PART_CLASS};
pub use property::{PropertyBlock, PropertyError};
