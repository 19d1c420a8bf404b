//! Place file importer
//!
//! Loading a map goes through three stages:
//!  1. [`SceneDocument::open`] reads the XML into an element tree,
//!  2. [`ingest`] walks its `Part` items, producing an [`ObjectDescriptor`] for each usable one,
//!  3. a [`SceneBuilder`] turns the descriptors into whatever the caller needs.
//!
//! ```
//! use rbxmap::{ingest, BuiltScene, SceneDocument, SceneNaming};
//!
//! let document = SceneDocument::parse(
//!     r#"<roblox><Item class="Part"><Properties>
//!         <int name="BrickColor">21</int>
//!     </Properties></Item></roblox>"#,
//! )?;
//!
//! let mut scene = BuiltScene::new("Map PARENT", &SceneNaming::default());
//! let report = ingest(&document).build_into(&mut scene)?;
//! assert_eq!(report.emitted, 1);
//! assert_eq!(scene.parts[0].name, "Part_1");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod descriptor;
pub mod ingest;
pub mod material;
pub mod scene;

pub use descriptor::ObjectDescriptor;
pub use ingest::{ingest, ingest_class, CancelToken, Diagnostic, ImportReport, Ingestion};
pub use material::{PartMaterial, SurfaceKind};
pub use rbxmap_xml::SceneDocument;
pub use scene::{BuiltScene, SceneBuilder, SceneNaming};
