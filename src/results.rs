// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use plotters::style::RGBColor;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, IntoStaticStr};

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            ($colour & 0x0000FF) as u8,
        )
    };
}

const COLOURS: &[RGBColor] = &[hexcolour!(0xAA0000), hexcolour!(0x0000FF), hexcolour!(0x117733)];

const GLYPHS: &[char] = &['*', '+', 'o'];

/// The number of smallest input sizes left off the chart.
pub const SKIPPED_SIZES: usize = 3;

/// One of the benchmarked dot product implementations. The declaration
/// order matches the column order of `Record::elapsed`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, IntoStaticStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
    Xnordot,
    Blasdot,
    Booldot,
}

impl Variant {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn colour(self) -> RGBColor {
        COLOURS[self.index()]
    }

    /// glyph used to draw this variant on the terminal
    pub fn glyph(self) -> char {
        GLYPHS[self.index()]
    }
}

/// Elapsed time in seconds for each variant at a single input size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Record {
    pub size: u64,
    pub elapsed: [f64; 3],
}

impl Record {
    pub fn elapsed(&self, variant: Variant) -> f64 {
        self.elapsed[variant.index()]
    }
}

pub const RESULTS: &[Record] = &[
    Record { size: 1, elapsed: [0.131, 0.091, 0.247] },
    Record { size: 10, elapsed: [0.137, 0.099, 0.259] },
    Record { size: 100, elapsed: [0.188, 0.284, 0.647] },
    Record { size: 1_000, elapsed: [0.402, 1.932, 2.962] },
    Record { size: 10_000, elapsed: [1.964, 18.656, 26.506] },
    Record { size: 100_000, elapsed: [28.782, 185.939, 474.313] },
    Record { size: 1_000_000, elapsed: [293.686, 1861.201, 5106.972] },
    Record { size: 10_000_000, elapsed: [7486.378, 19141.029, 68144.381] },
];

/// The plotted points for one variant: `(input size, elapsed)` in record
/// order, without the `SKIPPED_SIZES` smallest sizes.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    variant: Variant,
    points: Vec<(u64, f64)>,
}

impl Series {
    pub fn new(records: &[Record], variant: Variant) -> Self {
        let points = records
            .iter()
            .map(|record| (record.size, record.elapsed(variant)))
            .skip(SKIPPED_SIZES)
            .collect();
        Self { variant, points }
    }

    /// one series per variant, in variant order
    pub fn all(records: &[Record]) -> Vec<Series> {
        Variant::iter().map(|v| Series::new(records, v)).collect()
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn label(&self) -> &'static str {
        self.variant.into()
    }

    pub fn points(&self) -> &[(u64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
