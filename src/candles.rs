//! Attribute candles: grouping placed rectangles into per-attribute
//! minimum/median/maximum bars.
//!
//! The sheet draws each attribute as three abutting bars bracketed by a pair
//! of thin delimiter rectangles, on top of a full-width background bar. The
//! grouper replays the drawing order once and packs every delimited group of
//! three bars into a [`Candle`].

use crate::geometry::PlacedRect;
use crate::SheetLayout;
use std::fmt;

/// Scalars accumulated per group: (value, origin-x) for each of three bars.
const VALUES_PER_CANDLE: usize = 6;

/// The six attributes of a sheet, in the order their bar groups are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeName {
    Start,
    Speed,
    Stamina,
    Finish,
    Heart,
    Temper,
}

impl AttributeName {
    /// All attributes in drawing (= enumeration) order.
    pub const ALL: [AttributeName; 6] = [
        AttributeName::Start,
        AttributeName::Speed,
        AttributeName::Stamina,
        AttributeName::Finish,
        AttributeName::Heart,
        AttributeName::Temper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeName::Start => "START",
            AttributeName::Speed => "SPEED",
            AttributeName::Stamina => "STAMINA",
            AttributeName::Finish => "FINISH",
            AttributeName::Heart => "HEART",
            AttributeName::Temper => "TEMPER",
        }
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One attribute's three measurement bars. Each value is a bar's pixel
/// length; each origin is the x-coordinate where that bar starts. The bars
/// abut, so `min_origin + minimum == median_origin` on a well-formed sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub minimum: f32,
    pub min_origin: f32,
    pub median: f32,
    pub median_origin: f32,
    pub maximum: f32,
    pub max_origin: f32,
}

impl Candle {
    pub fn new(
        minimum: f32,
        min_origin: f32,
        median: f32,
        median_origin: f32,
        maximum: f32,
        max_origin: f32,
    ) -> Self {
        Self {
            minimum,
            min_origin,
            median,
            median_origin,
            maximum,
            max_origin,
        }
    }

    /// Lower padding bound, a slight visual margin below the minimum bar.
    pub fn bottom(&self) -> f32 {
        self.minimum - 2.0
    }

    /// Upper padding bound above the maximum bar.
    pub fn top(&self) -> f32 {
        self.maximum + 2.0
    }

    /// Axis position where the minimum bar ends: the attribute's lowest
    /// reading on the rank axis.
    pub fn minimum_at(&self) -> f32 {
        self.min_origin + self.minimum
    }

    /// Axis position where the median bar ends.
    pub fn median_at(&self) -> f32 {
        self.median_origin + self.median
    }

    /// Axis position where the maximum bar ends: the attribute's highest
    /// reading on the rank axis.
    pub fn maximum_at(&self) -> f32 {
        self.max_origin + self.maximum
    }
}

impl fmt::Display for Candle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MIN {}: {}, MED {}: {}, MAX {}: {}",
            self.min_origin,
            self.minimum,
            self.median_origin,
            self.median,
            self.max_origin,
            self.maximum
        )
    }
}

/// An attribute name with its reconstructed candle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attribute {
    pub name: AttributeName,
    pub candle: Candle,
}

/// Group placed rectangles into attribute candles using the default layout.
pub fn group_candles(rects: &[PlacedRect]) -> Vec<Attribute> {
    group_candles_with_layout(rects, &SheetLayout::default())
}

/// Group placed rectangles into attribute candles.
///
/// Scans the drawing-ordered rectangle list once. Background bars (width
/// equal to the layout's background width) carry no signal and are skipped.
/// A delimiter-sized rectangle toggles capture: the first opens a group, the
/// second closes it and the accumulated three (value, origin-x) pairs become
/// the candle for the next attribute in [`AttributeName::ALL`] order.
///
/// Structural deviations stop the scan rather than abort it: a group that
/// closes with the wrong number of scalars, or any rectangle after all six
/// attributes are assigned, terminates grouping and the completed attributes
/// are returned as-is. Attributes never encountered are simply absent.
pub fn group_candles_with_layout(rects: &[PlacedRect], layout: &SheetLayout) -> Vec<Attribute> {
    let mut attributes = Vec::with_capacity(AttributeName::ALL.len());
    let mut values: Vec<f32> = Vec::with_capacity(VALUES_PER_CANDLE);
    let mut capturing = false;

    for placed in rects {
        let rect = &placed.rect;

        if rect.width() == layout.background_width {
            continue;
        }

        if attributes.len() >= AttributeName::ALL.len() {
            log::warn!(
                "rectangle {} found after all {} attribute groups; stopping scan",
                placed.seq,
                attributes.len()
            );
            break;
        }

        if rect.width() == layout.delimiter_width && rect.height() == layout.delimiter_height {
            if !capturing {
                capturing = true;
                continue;
            }
            if values.len() != VALUES_PER_CANDLE {
                log::warn!(
                    "group closed with {} scalars (expected {}); stopping scan",
                    values.len(),
                    VALUES_PER_CANDLE
                );
                break;
            }
            let name = AttributeName::ALL[attributes.len()];
            attributes.push(Attribute {
                name,
                candle: Candle::new(
                    values[0], values[1], values[2], values[3], values[4], values[5],
                ),
            });
            values.clear();
            capturing = false;
            continue;
        }

        if !capturing {
            continue;
        }

        values.push(rect.width());
        values.push(placed.origin.x);
    }

    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Origin, PlacedRect, Rect};

    fn bar(seq: usize, origin_x: f32, width: f32) -> PlacedRect {
        PlacedRect::new(
            seq,
            Origin::new(origin_x, 100.0),
            Rect::new(0.0, 0.0, width, 8.0),
        )
    }

    fn delimiter(seq: usize, origin_x: f32) -> PlacedRect {
        PlacedRect::new(
            seq,
            Origin::new(origin_x, 100.0),
            Rect::new(0.0, 0.0, 2.0, 30.0),
        )
    }

    fn background(seq: usize) -> PlacedRect {
        PlacedRect::new(
            seq,
            Origin::new(0.0, 100.0),
            Rect::new(10.0, 0.0, 510.0, 40.0),
        )
    }

    #[test]
    fn test_single_group() {
        let rects = vec![
            background(0),
            delimiter(1, 360.0),
            bar(2, 365.4, 42.05),
            bar(3, 407.4, 27.09),
            bar(4, 434.5, 45.37),
            delimiter(5, 482.0),
        ];
        let attributes = group_candles(&rects);
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes[0].name, AttributeName::Start);
        let candle = attributes[0].candle;
        assert_eq!(candle.minimum, 42.05);
        assert_eq!(candle.min_origin, 365.4);
        assert_eq!(candle.median, 27.09);
        assert_eq!(candle.median_origin, 407.4);
        assert_eq!(candle.maximum, 45.37);
        assert_eq!(candle.max_origin, 434.5);
    }

    #[test]
    fn test_group_size_mismatch_stops_scan() {
        // Only two bars in the group: four scalars at group-end.
        let rects = vec![
            delimiter(0, 100.0),
            bar(1, 110.0, 20.0),
            bar(2, 130.0, 15.0),
            delimiter(3, 150.0),
            // A well-formed group after the malformed one must not be seen.
            delimiter(4, 200.0),
            bar(5, 210.0, 20.0),
            bar(6, 230.0, 15.0),
            bar(7, 245.0, 10.0),
            delimiter(8, 260.0),
        ];
        let attributes = group_candles(&rects);
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_background_width_carries_no_signal() {
        // A background bar inside an open group must not leak into the
        // accumulator.
        let rects = vec![
            delimiter(0, 100.0),
            background(1),
            bar(2, 110.0, 20.0),
            bar(3, 130.0, 15.0),
            bar(4, 145.0, 10.0),
            delimiter(5, 160.0),
        ];
        let attributes = group_candles(&rects);
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes[0].candle.minimum, 20.0);
    }

    #[test]
    fn test_names_assigned_in_enumeration_order() {
        let mut rects = Vec::new();
        let mut seq = 0;
        for group in 0..6 {
            let base = 100.0 + group as f32 * 60.0;
            rects.push(delimiter(seq, base));
            seq += 1;
            for barn in 0..3 {
                rects.push(bar(seq, base + 5.0 + barn as f32 * 12.0, 10.0 + barn as f32));
                seq += 1;
            }
            rects.push(delimiter(seq, base + 50.0));
            seq += 1;
        }
        let attributes = group_candles(&rects);
        assert_eq!(attributes.len(), 6);
        let names: Vec<_> = attributes.iter().map(|a| a.name).collect();
        assert_eq!(names, AttributeName::ALL);
    }

    #[test]
    fn test_overflow_stops_scan() {
        let mut rects = Vec::new();
        let mut seq = 0;
        for group in 0..7 {
            let base = 100.0 + group as f32 * 60.0;
            rects.push(delimiter(seq, base));
            seq += 1;
            for barn in 0..3 {
                rects.push(bar(seq, base + 5.0 + barn as f32 * 12.0, 10.0));
                seq += 1;
            }
            rects.push(delimiter(seq, base + 50.0));
            seq += 1;
        }
        let attributes = group_candles(&rects);
        assert_eq!(attributes.len(), 6);
    }

    #[test]
    fn test_candle_padding_bounds() {
        let candle = Candle::new(42.0, 365.0, 27.0, 407.0, 45.0, 434.0);
        assert_eq!(candle.bottom(), 40.0);
        assert_eq!(candle.top(), 47.0);
    }

    #[test]
    fn test_real_sheet_readings_are_ordered() {
        // Numbers taken from a real sheet: bar lengths alone are not
        // monotonic (the minimum bar is longer than the median bar), but the
        // axis positions where the bars end are.
        let candle = Candle::new(
            42.050568, 365.39392, 27.093872, 407.44449, 45.368195, 434.53836,
        );
        assert!(candle.minimum_at() <= candle.median_at());
        assert!(candle.median_at() <= candle.maximum_at());
    }
}
