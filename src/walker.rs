//! Content-stream walker: turns a page's drawing operators into shapes.
//!
//! The sheet paints every bar inside a `q .. Q` graphics-state bracket: the
//! bracket sets a translation with `cm`, defines the bar with `re`, and fills
//! it. Rank icons are placed with `Do` inside the same kind of bracket. The
//! walker replays that structure with a two-state machine and records, in
//! drawing order, every rectangle together with the origin it was drawn at,
//! plus the x-origin of every image placement.

use crate::geometry::{Origin, PlacedRect, Rect};
use lopdf::content::Operation;
use lopdf::Object;

/// Shapes recovered from one page's operator stream.
#[derive(Debug, Clone, Default)]
pub struct PageShapes {
    /// Rectangles in drawing order, each tagged with its active origin.
    pub rects: Vec<PlacedRect>,
    /// X-origins of image (`Do`) placements, in drawing order. Still
    /// includes any leading decorative icons; see
    /// [`RankAnchors::from_icon_origins`](crate::ranks::RankAnchors::from_icon_origins).
    pub icon_origins: Vec<f32>,
}

/// Walker state. Only operators seen between `q` and `Q` are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    Idle,
    Capturing,
}

/// Walk a page's operator stream and collect placed rectangles and image
/// placement origins.
///
/// The origin deliberately persists across brackets: the sheet sets it once
/// per bar and several brackets may reuse it. Malformed operand lists are
/// logged and skipped without aborting the scan.
pub fn walk(operations: &[Operation]) -> PageShapes {
    let mut state = WalkState::Idle;
    let mut origin = Origin::new(0.0, 0.0);
    let mut pending: Option<Rect> = None;
    let mut seq = 0usize;
    let mut shapes = PageShapes::default();

    for op in operations {
        match (op.operator.as_str(), state) {
            ("q", _) => {
                state = WalkState::Capturing;
                pending = None;
            }
            ("Q", WalkState::Capturing) => {
                if let Some(rect) = pending.take() {
                    shapes.rects.push(PlacedRect::new(seq, origin, rect));
                    seq += 1;
                }
                state = WalkState::Idle;
            }
            (_, WalkState::Idle) => {}
            ("cm", WalkState::Capturing) => match numeric_operands(&op.operands).as_deref() {
                Some([_, _, _, _, e, f]) => origin = Origin::new(*e, *f),
                _ => log::warn!(
                    "skipping cm with {} operands (expected 6 numbers)",
                    op.operands.len()
                ),
            },
            ("re", WalkState::Capturing) => match numeric_operands(&op.operands).as_deref() {
                Some([x_min, y_min, x_max, y_max]) => {
                    pending = Some(Rect::new(*x_min, *y_min, *x_max, *y_max));
                }
                _ => log::warn!(
                    "skipping re with {} operands (expected 4 numbers)",
                    op.operands.len()
                ),
            },
            ("Do", WalkState::Capturing) => shapes.icon_origins.push(origin.x),
            _ => {}
        }
    }

    shapes
}

/// All operands as f32, or None if any operand is non-numeric.
fn numeric_operands(operands: &[Object]) -> Option<Vec<f32>> {
    operands.iter().map(get_number).collect()
}

/// Helper to get f32 from Object
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(operator: &str, operands: Vec<Object>) -> Operation {
        Operation::new(operator, operands)
    }

    fn reals(values: &[f32]) -> Vec<Object> {
        values.iter().map(|&v| Object::Real(v)).collect()
    }

    fn cm(x: f32, y: f32) -> Operation {
        op("cm", reals(&[1.0, 0.0, 0.0, 1.0, x, y]))
    }

    fn re(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Operation {
        op("re", reals(&[x_min, y_min, x_max, y_max]))
    }

    #[test]
    fn test_bracket_emits_placed_rect() {
        let ops = vec![
            op("q", vec![]),
            cm(100.0, 50.0),
            re(0.0, 0.0, 40.0, 8.0),
            op("f", vec![]),
            op("Q", vec![]),
        ];
        let shapes = walk(&ops);
        assert_eq!(shapes.rects.len(), 1);
        let placed = &shapes.rects[0];
        assert_eq!(placed.seq, 0);
        assert_eq!(placed.origin, Origin::new(100.0, 50.0));
        assert_eq!(placed.rect.width(), 40.0);
        assert_eq!(placed.rect.height(), 8.0);
    }

    #[test]
    fn test_bracket_without_rect_emits_nothing() {
        let ops = vec![op("q", vec![]), cm(10.0, 10.0), op("Q", vec![])];
        let shapes = walk(&ops);
        assert!(shapes.rects.is_empty());
    }

    #[test]
    fn test_origin_persists_across_brackets() {
        let ops = vec![
            op("q", vec![]),
            cm(200.0, 75.0),
            op("Q", vec![]),
            op("q", vec![]),
            re(0.0, 0.0, 2.0, 30.0),
            op("Q", vec![]),
        ];
        let shapes = walk(&ops);
        assert_eq!(shapes.rects.len(), 1);
        assert_eq!(shapes.rects[0].origin, Origin::new(200.0, 75.0));
    }

    #[test]
    fn test_malformed_cm_keeps_previous_origin() {
        // 5-operand cm must be skipped; the following rectangle still
        // carries the origin set before it.
        let ops = vec![
            op("q", vec![]),
            cm(300.0, 60.0),
            op("cm", reals(&[1.0, 0.0, 0.0, 1.0, 999.0])),
            re(0.0, 0.0, 25.0, 8.0),
            op("Q", vec![]),
        ];
        let shapes = walk(&ops);
        assert_eq!(shapes.rects.len(), 1);
        assert_eq!(shapes.rects[0].origin, Origin::new(300.0, 60.0));
    }

    #[test]
    fn test_malformed_re_is_skipped() {
        let ops = vec![
            op("q", vec![]),
            cm(10.0, 10.0),
            op("re", reals(&[0.0, 0.0, 40.0])),
            op("Q", vec![]),
        ];
        let shapes = walk(&ops);
        assert!(shapes.rects.is_empty());
    }

    #[test]
    fn test_non_numeric_operand_is_malformed() {
        let ops = vec![
            op("q", vec![]),
            cm(10.0, 10.0),
            op(
                "re",
                vec![
                    Object::Real(0.0),
                    Object::Real(0.0),
                    Object::Name(b"X9".to_vec()),
                    Object::Real(8.0),
                ],
            ),
            op("Q", vec![]),
        ];
        let shapes = walk(&ops);
        assert!(shapes.rects.is_empty());
    }

    #[test]
    fn test_do_records_icon_origin() {
        let ops = vec![
            op("q", vec![]),
            cm(130.0, 500.0),
            op("Do", vec![Object::Name(b"X9".to_vec())]),
            op("Q", vec![]),
        ];
        let shapes = walk(&ops);
        assert_eq!(shapes.icon_origins, vec![130.0]);
        assert!(shapes.rects.is_empty());
    }

    #[test]
    fn test_do_leaves_pending_rect_alone() {
        let ops = vec![
            op("q", vec![]),
            cm(40.0, 40.0),
            re(0.0, 0.0, 20.0, 8.0),
            op("Do", vec![Object::Name(b"X9".to_vec())]),
            op("Q", vec![]),
        ];
        let shapes = walk(&ops);
        assert_eq!(shapes.rects.len(), 1);
        assert_eq!(shapes.icon_origins, vec![40.0]);
    }

    #[test]
    fn test_idle_ignores_everything_but_push() {
        let ops = vec![
            cm(500.0, 500.0),
            re(0.0, 0.0, 10.0, 10.0),
            op("Do", vec![Object::Name(b"X9".to_vec())]),
            op("Q", vec![]),
        ];
        let shapes = walk(&ops);
        assert!(shapes.rects.is_empty());
        assert!(shapes.icon_origins.is_empty());
    }
}
