//! The ingestion driver
//!
//! [`ingest`] turns a loaded [`SceneDocument`] into a lazy sequence of [`ObjectDescriptor`]s, one
//! per usable `Part` in the document. The sequence is pulled one descriptor at a time, so the
//! consumer decides the pace, and can stop early.
//!
//! Problems with individual parts never end an import. They're logged, recorded as
//! [`Diagnostic`]s, and the driver moves on to the next part:
//!  * a part without a `Properties` block is skipped silently,
//!  * a part with a broken `CFrame` is skipped and reported,
//!  * a malformed property is dropped (keeping its default) and reported,
//!  * an unknown `BrickColor` falls back to gray and gets reported.
//!
//! Two side channels are available: a progress callback receiving `(completed, total)` after
//! every matched part, and a [`CancelToken`] checked before every part.

use crate::{descriptor::ObjectDescriptor, scene::SceneBuilder};
use log::*;
use rbxmap_utils::AnyResult;
use rbxmap_xml::{
    palette, part::ParsedPart, CFrameError, PartProperties, PropertyBlock, PropertyError,
    SceneDocument, XmlElement, PART_CLASS,
};
use std::{
    fmt::{self, Display},
    iter::FusedIterator,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

/// Cooperative cancellation flag, shareable between threads.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks every import using this token to stop before its next part.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// A non-fatal condition encountered during an import.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The document doesn't contain a single matching part.
    EmptyImport,
    /// A property value couldn't be read, so it was left at its default.
    MalformedProperty {
        item: usize,
        referent: Option<String>,
        property: String,
        error: PropertyError,
    },
    /// A part's coordinate frame couldn't be decoded, so the part was skipped.
    InvalidCFrame {
        item: usize,
        referent: Option<String>,
        error: CFrameError,
    },
    /// A part uses a color index missing from the palette.
    UnknownPaletteIndex { ordinal: usize, index: i32 },
    /// The import was cancelled before processing every part.
    Cancelled { completed: usize, total: usize },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyImport => write!(f, "no parts found in the document"),
            Self::MalformedProperty {
                item,
                referent,
                property,
                error,
            } => write!(
                f,
                "part #{item}{}: property `{property}` ignored ({error})",
                ReferentDisplay(referent)
            ),
            Self::InvalidCFrame {
                item,
                referent,
                error,
            } => write!(
                f,
                "part #{item}{}: skipped, invalid CFrame ({error})",
                ReferentDisplay(referent)
            ),
            Self::UnknownPaletteIndex { ordinal, index } => write!(
                f,
                "Part_{ordinal}: BrickColor index {index} not found, using default gray"
            ),
            Self::Cancelled { completed, total } => {
                write!(f, "import cancelled after {completed} of {total} parts")
            }
        }
    }
}

struct ReferentDisplay<'a>(&'a Option<String>);

impl Display for ReferentDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(referent) => write!(f, " ({referent})"),
            None => Ok(()),
        }
    }
}

/// Summary of a finished (or abandoned) import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Number of matched part items.
    pub matched: usize,
    /// Number of matched items that were processed.
    pub processed: usize,
    /// Number of descriptors handed out.
    pub emitted: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl ImportReport {
    pub fn was_cancelled(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| matches!(diagnostic, Diagnostic::Cancelled { .. }))
    }
}

type ProgressFn<'a> = Box<dyn FnMut(usize, usize) + 'a>;

/// Lazy descriptor sequence over a document. Created by [`ingest`].
///
/// It can be consumed only once. After returning [`None`] it keeps returning [`None`].
pub struct Ingestion<'a> {
    items: Vec<&'a XmlElement>,
    cursor: usize,
    emitted: usize,
    finished: bool,
    progress: Option<ProgressFn<'a>>,
    cancel: Option<CancelToken>,
    diagnostics: Vec<Diagnostic>,
}

/// Starts ingesting every `Part` of the document.
pub fn ingest(document: &SceneDocument) -> Ingestion<'_> {
    ingest_class(document, PART_CLASS)
}

/// Starts ingesting every `Item` of the given class. Each one is read as a part.
pub fn ingest_class<'a>(document: &'a SceneDocument, class: &str) -> Ingestion<'a> {
    let items = document.items_of_class(class);

    let mut diagnostics = vec![];
    if items.is_empty() {
        error!("No parts found in the document!");
        diagnostics.push(Diagnostic::EmptyImport);
    } else {
        debug!("Found {} `{class}` items", items.len());
    }

    Ingestion {
        items,
        cursor: 0,
        emitted: 0,
        finished: false,
        progress: None,
        cancel: None,
        diagnostics,
    }
}

impl<'a> Ingestion<'a> {
    /// Sets a callback receiving `(completed, total)` after each matched item, whether it
    /// produced a descriptor or not. The last call is always `(total, total)`, unless cancelled.
    pub fn with_progress(mut self, progress: impl FnMut(usize, usize) + 'a) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Total number of matched items.
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_report(self) -> ImportReport {
        ImportReport {
            matched: self.items.len(),
            processed: self.cursor,
            emitted: self.emitted,
            diagnostics: self.diagnostics,
        }
    }

    /// Feeds every remaining descriptor to a scene builder.
    ///
    /// Stops at the first error returned by the builder.
    pub fn build_into(mut self, builder: &mut dyn SceneBuilder) -> AnyResult<ImportReport> {
        for descriptor in self.by_ref() {
            builder.add_part(&descriptor)?;
        }
        Ok(self.into_report())
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(CancelToken::is_cancelled)
            .unwrap_or(false)
    }

    /// Turns a matched item into a descriptor, if possible. `item_number` is 1-based.
    fn process(&mut self, item: &XmlElement, item_number: usize) -> Option<ObjectDescriptor> {
        let referent = item.attribute("referent").map(str::to_string);

        let Some(block) = PropertyBlock::of_item(item) else {
            trace!("Part #{item_number} has no properties, skipping");
            return None;
        };

        let ParsedPart {
            properties,
            skipped,
        } = match PartProperties::parse(&block) {
            Ok(parsed) => parsed,
            Err(error) => {
                self.report(Diagnostic::InvalidCFrame {
                    item: item_number,
                    referent,
                    error,
                });
                return None;
            }
        };

        for skipped in skipped {
            self.report(Diagnostic::MalformedProperty {
                item: item_number,
                referent: referent.clone(),
                property: skipped.name,
                error: skipped.error,
            });
        }

        self.emitted += 1;
        let ordinal = self.emitted;

        let (color, found) = palette::lookup(properties.palette_index);
        if !found {
            self.report(Diagnostic::UnknownPaletteIndex {
                ordinal,
                index: properties.palette_index,
            });
        }

        Some(ObjectDescriptor::new(ordinal, properties, color))
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

impl<'a> Iterator for Ingestion<'a> {
    type Item = ObjectDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let Some(&item) = self.items.get(self.cursor) else {
                self.finished = true;
                break;
            };

            if self.is_cancelled() {
                self.report(Diagnostic::Cancelled {
                    completed: self.cursor,
                    total: self.items.len(),
                });
                self.finished = true;
                break;
            }

            self.cursor += 1;
            let descriptor = self.process(item, self.cursor);

            let (completed, total) = (self.cursor, self.items.len());
            if let Some(progress) = &mut self.progress {
                progress(completed, total);
            }

            if descriptor.is_some() {
                return descriptor;
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            (0, Some(self.items.len() - self.cursor))
        }
    }
}

impl FusedIterator for Ingestion<'_> {}
