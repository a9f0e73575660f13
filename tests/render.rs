// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use dotbench_graph::chart;
use dotbench_graph::{Series, TerminalBackend, Variant, RESULTS};

use plotters::prelude::*;
use strum::IntoEnumIterator;

const SIZES: &[(u32, u32)] = &[(100, 32), (80, 24)];

fn render(size: (u32, u32)) -> String {
    let mut out = Vec::new();
    {
        let root = TerminalBackend::new(&mut out, size)
            .glyphs(Variant::iter().map(|v| (v.colour(), v.glyph())))
            .into_drawing_area();
        chart::draw(&root, RESULTS).expect("failed to draw chart");
    }
    String::from_utf8(out).expect("chart is not utf8")
}

/// whitespace separated words of `line` with the column they are centered on
fn words(line: &str) -> Vec<(String, usize)> {
    let chars: Vec<char> = line.chars().collect();
    let mut words = Vec::new();
    let mut start = None;
    for idx in 0..=chars.len() {
        let blank = idx == chars.len() || chars[idx] == ' ';
        match (start, blank) {
            (None, false) => start = Some(idx),
            (Some(s), true) => {
                let word: String = chars[s..idx].iter().collect();
                words.push((word, s + (idx - s) / 2));
                start = None;
            }
            _ => {}
        }
    }
    words
}

fn tick_row(text: &str) -> Vec<(String, usize)> {
    let line = text
        .lines()
        .find(|line| line.contains("10000000"))
        .unwrap_or_else(|| panic!("no x tick row in\n{}", text));
    words(line)
}

#[test]
fn chart_fits_surface() {
    for &(width, height) in SIZES {
        let text = render((width, height));
        assert_eq!(text.lines().count(), height as usize);
        for line in text.lines() {
            assert!(line.chars().count() <= width as usize, "line too long: {:?}", line);
        }
    }
}

#[test]
fn legend_lists_every_variant() {
    for &size in SIZES {
        let text = render(size);
        for variant in Variant::iter() {
            let entry = format!("{} {}", variant.glyph().to_string().repeat(3), variant);
            assert!(text.contains(&entry), "missing {:?} at {:?} in\n{}", entry, size, text);
        }
    }
}

#[test]
fn axis_descriptions() {
    for &size in SIZES {
        let text = render(size);
        assert!(
            text.lines().any(|line| line.trim() == "Input size"),
            "no x description row at {:?} in\n{}",
            size,
            text
        );
        let first_column: String = text
            .lines()
            .map(|line| line.chars().next().unwrap_or(' '))
            .collect();
        assert!(
            first_column.contains("Time elapsed"),
            "no y description column at {:?}: {:?}",
            size,
            first_column
        );
    }
}

#[test]
fn x_ticks_are_decades() {
    for &size in SIZES {
        let labels: Vec<String> = tick_row(&render(size)).into_iter().map(|w| w.0).collect();
        assert_eq!(
            labels,
            vec!["1000", "10000", "100000", "1000000", "10000000"],
            "at {:?}",
            size
        );
    }
}

#[test]
fn x_axis_is_logarithmic() {
    for &size in SIZES {
        let columns: Vec<usize> = tick_row(&render(size)).into_iter().map(|w| w.1).collect();
        let gaps: Vec<usize> = columns.windows(2).map(|w| w[1] - w[0]).collect();
        let min = gaps.iter().min().copied().unwrap_or(0);
        let max = gaps.iter().max().copied().unwrap_or(0);
        assert!(min > 0, "ticks overlap at {:?}: {:?}", size, columns);
        assert!(max - min <= 1, "uneven decades at {:?}: {:?}", size, columns);
    }
}

#[test]
fn blasdot_ends_at_largest_size() {
    let series = Series::all(RESULTS);
    for s in &series {
        assert_eq!(s.len(), 5);
    }
    let blasdot = series
        .iter()
        .find(|s| s.variant() == Variant::Blasdot)
        .expect("no blasdot series");
    assert_eq!(blasdot.points().last(), Some(&(10_000_000, 19141.029)));
}

#[test]
fn rendering_is_repeatable() {
    assert_eq!(render((100, 32)), render((100, 32)));
}
