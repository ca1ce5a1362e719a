//! Stat-sheet reconstruction from PDF drawing commands using lopdf
//!
//! A stat sheet renders its data as vector graphics: attribute bars drawn as
//! rectangles and rank icons placed as images, with no machine-readable
//! table anywhere in the document. This crate rebuilds the structured data
//! from the page's content stream:
//! - A state-machine walk over the drawing operators collects placed
//!   rectangles and image-placement origins ([`walker`])
//! - Delimited rectangle groups become per-attribute minimum/median/maximum
//!   candles ([`candles`])
//! - Rank icon origins become a full partition of the value axis into 21
//!   named rank intervals, with interval lookup for arbitrary values
//!   ([`ranks`])

pub mod candles;
pub mod geometry;
pub mod metadata;
pub mod ranks;
pub mod walker;

pub use candles::{group_candles, group_candles_with_layout, Attribute, AttributeName, Candle};
pub use geometry::{Origin, PlacedRect, Rect};
pub use ranks::{classify, Rank, RankAnchors, RankName};
pub use walker::{walk, PageShapes};

use chrono::NaiveDateTime;
use lopdf::content::Content;
use lopdf::Document;
use std::path::Path;

/// Fiducial constants of the sheet layout.
///
/// These encode the one document geometry the pipeline understands: which
/// rectangle widths are structural markers rather than data, how wide a rank
/// icon is, and how many decorative icons precede the rank scale. A
/// structurally similar sheet with different numbers is handled by
/// substituting constants here, not by touching the pipeline.
#[derive(Debug, Clone)]
pub struct SheetLayout {
    /// Visual width consumed by one rank icon.
    pub icon_width: f32,
    /// Width of the full-width background bar behind each attribute.
    pub background_width: f32,
    /// Width of the thin marker rectangle bracketing each bar group.
    pub delimiter_width: f32,
    /// Height of the marker rectangle.
    pub delimiter_height: f32,
    /// Decorative icons (the crown) placed before the seven rank icons.
    pub leading_icons: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            icon_width: 52.0,
            background_width: 500.0,
            delimiter_width: 2.0,
            delimiter_height: 30.0,
            leading_icons: 1,
        }
    }
}

/// The reconstructed sheet: attributes with their candles, the rank
/// partition of the value axis, and optional sheet metadata.
#[derive(Debug, Clone)]
pub struct StatSheet {
    /// Attributes in drawing order; attributes missing from the sheet are
    /// absent.
    pub attributes: Vec<Attribute>,
    /// The 21 rank intervals in ascending order.
    pub ranks: Vec<Rank>,
    /// Title from document metadata (if available)
    pub title: Option<String>,
    /// "Date Prepared" timestamp from the page text (if present)
    pub prepared: Option<NaiveDateTime>,
}

/// Reconstruct a stat sheet from a PDF file.
pub fn extract_sheet<P: AsRef<Path>>(path: P) -> Result<StatSheet, SheetError> {
    extract_sheet_with_layout(path, &SheetLayout::default())
}

/// Reconstruct a stat sheet from a PDF file with a custom layout.
pub fn extract_sheet_with_layout<P: AsRef<Path>>(
    path: P,
    layout: &SheetLayout,
) -> Result<StatSheet, SheetError> {
    let doc = Document::load(path)?;
    sheet_from_document(&doc, layout)
}

/// Reconstruct a stat sheet from a PDF memory buffer.
pub fn extract_sheet_mem(buffer: &[u8]) -> Result<StatSheet, SheetError> {
    extract_sheet_mem_with_layout(buffer, &SheetLayout::default())
}

/// Reconstruct a stat sheet from a PDF memory buffer with a custom layout.
pub fn extract_sheet_mem_with_layout(
    buffer: &[u8],
    layout: &SheetLayout,
) -> Result<StatSheet, SheetError> {
    let doc = Document::load_mem(buffer)?;
    sheet_from_document(&doc, layout)
}

/// Run the pipeline on a loaded document's first page.
fn sheet_from_document(doc: &Document, layout: &SheetLayout) -> Result<StatSheet, SheetError> {
    let pages = doc.get_pages();
    let (_, &page_id) = pages.iter().next().ok_or(SheetError::NoPages)?;

    let content_data = doc
        .get_page_content(page_id)
        .map_err(|e| SheetError::Parse(e.to_string()))?;
    let content = Content::decode(&content_data).map_err(|e| SheetError::Parse(e.to_string()))?;

    let shapes = walker::walk(&content.operations);
    log::debug!(
        "walked {} operators: {} rectangles, {} icon placements",
        content.operations.len(),
        shapes.rects.len(),
        shapes.icon_origins.len()
    );

    let attributes = candles::group_candles_with_layout(&shapes.rects, layout);
    let anchors = RankAnchors::from_icon_origins(&shapes.icon_origins, layout)?;

    Ok(StatSheet {
        attributes,
        ranks: anchors.ranks(),
        title: metadata::document_title(doc),
        prepared: metadata::prepared_date(doc),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("document has no pages")]
    NoPages,
    #[error("expected {expected} rank anchors after the decorative icons, found {found}")]
    AnchorCount { expected: usize, found: usize },
    #[error("rank anchors are not strictly increasing: {0:?}")]
    AnchorOrder(Vec<f32>),
    #[error("value {0} is outside every rank interval")]
    RankMiss(f32),
}

impl From<lopdf::Error> for SheetError {
    fn from(e: lopdf::Error) -> Self {
        SheetError::Parse(e.to_string())
    }
}
