//! Rendering: fonts, measurement, wrapping, painting and layout

pub mod builtin;
pub mod canvas;
pub mod font;
pub mod layout;
pub mod measure;
pub mod paint;
pub mod raster;
pub mod wrap;

pub use canvas::Canvas;
pub use font::{FontHandle, FontProvider};
pub use layout::{FontPair, LayoutEngine, RenderOutcome};
pub use measure::{TextExtent, TextMeasure};
pub use paint::{split_segments, PaintCommand, Painter, Segment};
pub use wrap::{wrap_paren_aware, WrappedLine};
