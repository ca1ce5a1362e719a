//! Rank-boundary reconstruction and value classification.
//!
//! The sheet places one icon per major rank (D through SSS) along the value
//! axis. The icon x-origins are the only machine-readable trace of the rank
//! scale, so the boundaries are rebuilt arithmetically: the mean gap between
//! consecutive icons gives the width of one major rank, a third of that is
//! one sub-grade, and an offset of `(mean_gap - icon_width) / 2` centers the
//! boundaries on each icon rather than its anchor point.

use crate::{SheetError, SheetLayout};
use std::fmt;

/// Number of major rank anchors on the axis.
const ANCHOR_COUNT: usize = 7;

/// Sub-grades per major rank.
const SUBDIVISIONS: usize = 3;

/// The 21 rank labels in ascending axis order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankName {
    DMinus,
    D,
    DPlus,
    CMinus,
    C,
    CPlus,
    BMinus,
    B,
    BPlus,
    AMinus,
    A,
    APlus,
    SMinus,
    S,
    SPlus,
    SsMinus,
    Ss,
    SsPlus,
    SssMinus,
    Sss,
    SssPlus,
}

impl RankName {
    /// All ranks in ascending order.
    pub const ALL: [RankName; 21] = [
        RankName::DMinus,
        RankName::D,
        RankName::DPlus,
        RankName::CMinus,
        RankName::C,
        RankName::CPlus,
        RankName::BMinus,
        RankName::B,
        RankName::BPlus,
        RankName::AMinus,
        RankName::A,
        RankName::APlus,
        RankName::SMinus,
        RankName::S,
        RankName::SPlus,
        RankName::SsMinus,
        RankName::Ss,
        RankName::SsPlus,
        RankName::SssMinus,
        RankName::Sss,
        RankName::SssPlus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RankName::DMinus => "D-",
            RankName::D => "D",
            RankName::DPlus => "D+",
            RankName::CMinus => "C-",
            RankName::C => "C",
            RankName::CPlus => "C+",
            RankName::BMinus => "B-",
            RankName::B => "B",
            RankName::BPlus => "B+",
            RankName::AMinus => "A-",
            RankName::A => "A",
            RankName::APlus => "A+",
            RankName::SMinus => "S-",
            RankName::S => "S",
            RankName::SPlus => "S+",
            RankName::SsMinus => "SS-",
            RankName::Ss => "SS",
            RankName::SsPlus => "SS+",
            RankName::SssMinus => "SSS-",
            RankName::Sss => "SSS",
            RankName::SssPlus => "SSS+",
        }
    }
}

impl fmt::Display for RankName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named rank interval on the value axis.
///
/// Intervals include their lower bound and exclude their upper bound, except
/// the topmost interval which is closed on both ends so the maximum
/// attainable value still classifies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rank {
    pub name: RankName,
    pub x_min: f32,
    pub x_max: f32,
    closed: bool,
}

impl Rank {
    pub fn contains(&self, value: f32) -> bool {
        value >= self.x_min && (value < self.x_max || (self.closed && value <= self.x_max))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.name, self.x_min, self.x_max)
    }
}

/// The seven major-rank anchor positions with their derived spacing.
#[derive(Debug, Clone)]
pub struct RankAnchors {
    anchors: [f32; ANCHOR_COUNT],
    mean_gap: f32,
    section: f32,
    offset: f32,
}

impl RankAnchors {
    /// Build anchors from seven strictly increasing positions
    /// (d, c, b, a, s, ss, sss).
    pub fn new(anchors: [f32; ANCHOR_COUNT], layout: &SheetLayout) -> Result<Self, SheetError> {
        if !anchors.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(SheetError::AnchorOrder(anchors.to_vec()));
        }

        let mean_gap = anchors
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .sum::<f32>()
            / (ANCHOR_COUNT - 1) as f32;
        let section = mean_gap / SUBDIVISIONS as f32;
        let offset = (mean_gap - layout.icon_width) / 2.0;

        Ok(Self {
            anchors,
            mean_gap,
            section,
            offset,
        })
    }

    /// Build anchors from the walker's raw image-placement origins.
    ///
    /// The sheet places decorative icons (the crown) before the rank scale;
    /// the layout says how many to discard. Exactly seven origins must
    /// remain.
    pub fn from_icon_origins(origins: &[f32], layout: &SheetLayout) -> Result<Self, SheetError> {
        let trailing = origins.get(layout.leading_icons..).unwrap_or(&[]);
        let anchors: [f32; ANCHOR_COUNT] =
            trailing
                .try_into()
                .map_err(|_| SheetError::AnchorCount {
                    expected: ANCHOR_COUNT,
                    found: trailing.len(),
                })?;
        Self::new(anchors, layout)
    }

    pub fn anchors(&self) -> &[f32; ANCHOR_COUNT] {
        &self.anchors
    }

    /// Arithmetic mean of the six gaps between consecutive anchors.
    pub fn mean_gap(&self) -> f32 {
        self.mean_gap
    }

    /// Width of one sub-grade: a third of the mean gap.
    pub fn section(&self) -> f32 {
        self.section
    }

    /// Centering offset subtracted from each anchor so boundaries align with
    /// the icon rather than its anchor point.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Emit the 21 rank intervals tiling the axis from `d - offset` to
    /// `sss - offset + 3 * section`.
    ///
    /// Each anchor contributes three consecutive sub-ranks; the third one
    /// runs to the next anchor's base so the tiling stays gapless even when
    /// icon gaps deviate from the mean. The last anchor has no successor and
    /// its third sub-rank runs a full section past the second.
    pub fn ranks(&self) -> Vec<Rank> {
        let mut ranks = Vec::with_capacity(RankName::ALL.len());

        for (i, &anchor) in self.anchors.iter().enumerate() {
            let base = anchor - self.offset;
            let end = match self.anchors.get(i + 1) {
                Some(next) => next - self.offset,
                None => base + SUBDIVISIONS as f32 * self.section,
            };
            let last = i == ANCHOR_COUNT - 1;

            ranks.push(Rank {
                name: RankName::ALL[SUBDIVISIONS * i],
                x_min: base,
                x_max: base + self.section,
                closed: false,
            });
            ranks.push(Rank {
                name: RankName::ALL[SUBDIVISIONS * i + 1],
                x_min: base + self.section,
                x_max: base + 2.0 * self.section,
                closed: false,
            });
            ranks.push(Rank {
                name: RankName::ALL[SUBDIVISIONS * i + 2],
                x_min: base + 2.0 * self.section,
                x_max: end,
                closed: last,
            });
        }

        ranks
    }
}

/// Find the rank whose interval contains `value`.
///
/// Linear scan in ascending order; the intervals do not overlap, so the
/// first match is the only one.
pub fn classify(value: f32, ranks: &[Rank]) -> Result<RankName, SheetError> {
    ranks
        .iter()
        .find(|rank| rank.contains(value))
        .map(|rank| rank.name)
        .ok_or(SheetError::RankMiss(value))
}
