//! Point-based opaque-element resolution for rendered pages.
//!
//! A plain hit test answers "which element is on top at this point?". That
//! answer is often useless for interaction logic: the topmost element may be
//! fully transparent through CSS `opacity`, may have a see-through background,
//! or may be an image whose pixel at that exact coordinate has zero alpha.
//! This crate answers the question users actually care about: *which element
//! is visually there?*
//!
//! [`OpaqueElementFinder`] repeatedly hit-tests a point, classifies the hit
//! element as opaque or transparent against a configurable alpha tolerance,
//! and temporarily hides transparent elements (via a `visibility: hidden
//! !important` override that never disturbs layout) so the next hit test sees
//! the element underneath. Every override is restored before the call
//! returns, on success and on error alike.
//!
//! The crate is backend-agnostic: the host page is described by the
//! [`RenderedPage`] trait, which exposes the four capabilities the algorithm
//! needs (hit testing, resolved styles, pixel sampling, visibility
//! overrides). A self-contained in-memory backend, [`Document`], is included
//! for tests and headless use.
//!
//! # Examples
//!
//! ```
//! use opaquepoint::{Document, Element, OpaqueElementFinder, Point, Rect, Size};
//!
//! let mut page = Document::new(Size::new(800.0, 600.0));
//! let below = page.push(
//!   Element::new(Rect::from_xywh(0.0, 0.0, 100.0, 100.0)).background_color("rgb(200, 0, 0)"),
//! );
//! // A glass pane on top: transparent background, so hit tests should
//! // fall through to the red box.
//! page.push(Element::new(Rect::from_xywh(0.0, 0.0, 100.0, 100.0)));
//!
//! let mut finder = OpaqueElementFinder::new();
//! let hit = finder
//!   .find_opaque_element_at(&mut page, Point::new(10.0, 10.0), None)
//!   .unwrap();
//! assert_eq!(hit, Some(below));
//! ```

pub mod alpha;
pub mod color;
pub mod document;
pub mod error;
pub mod finder;
pub mod geometry;
pub mod page;
pub mod raster;

pub use alpha::{AlphaLevel, AlphaTolerance};
pub use color::Rgba;
pub use document::{Document, Element, NodeId};
pub use error::{Error, Result};
pub use finder::OpaqueElementFinder;
pub use geometry::{Point, Rect, Size};
pub use page::{RenderedPage, ResolvedStyle, VisibilityDeclaration};
