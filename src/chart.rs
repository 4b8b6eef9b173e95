//! Plain-text charts for terminal output.
//!
//! Bar charts draw one horizontal bar per label scaled to the largest
//! magnitude. Line charts draw one column per point on a fixed number of
//! rows, with vertical connectors between neighbouring points.

use std::fmt::Write as _;

const BAR: char = '█';
const NEGATIVE_BAR: char = '░';
const MARKER: char = '●';
const CONNECTOR: char = '│';

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Text printed after the bar
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub label: String,
    pub value: f64,
}

pub fn render_bar_chart(bars: &[Bar], width: usize) -> String {
    let label_width = bars
        .iter()
        .map(|bar| bar.label.chars().count())
        .max()
        .unwrap_or(0);
    let largest = bars
        .iter()
        .map(|bar| bar.value.abs())
        .fold(0.0_f64, f64::max);

    let mut output = String::new();
    for bar in bars {
        let length = if largest > 0.0 {
            ((bar.value.abs() / largest) * width as f64).round() as usize
        } else {
            0
        };
        let glyph = if bar.value < 0.0 { NEGATIVE_BAR } else { BAR };
        let drawn = glyph.to_string().repeat(length);
        let _ = writeln!(
            output,
            "{:<label_width$} │{drawn} {}",
            bar.label, bar.caption
        );
    }
    output
}

pub fn render_line_chart(points: &[Point], height: usize) -> String {
    if points.is_empty() {
        return String::new();
    }
    let height = height.max(2);
    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), point| {
            (lo.min(point.value), hi.max(point.value))
        });
    let span = max - min;
    let levels = points
        .iter()
        .map(|point| {
            if span > 0.0 {
                (((point.value - min) / span) * (height - 1) as f64).round() as usize
            } else {
                (height - 1) / 2
            }
        })
        .collect::<Vec<_>>();

    // grid[0] is the bottom row
    let mut grid = vec![vec![' '; points.len()]; height];
    for (col, &level) in levels.iter().enumerate() {
        if col > 0 {
            let previous = levels[col - 1];
            let (low, high) = if previous < level {
                (previous, level)
            } else {
                (level, previous)
            };
            for row in grid.iter_mut().take(high).skip(low + 1) {
                row[col] = CONNECTOR;
            }
        }
        grid[level][col] = MARKER;
    }

    let top = format!("{max:.2}");
    let bottom = format!("{min:.2}");
    let gutter = top.chars().count().max(bottom.chars().count());

    let mut output = String::new();
    for level in (0..height).rev() {
        let label = if level == height - 1 {
            top.as_str()
        } else if level == 0 {
            bottom.as_str()
        } else {
            ""
        };
        let tick = if label.is_empty() { '│' } else { '┤' };
        let body = grid[level].iter().collect::<String>();
        let line = format!("{label:>gutter$} {tick}{body}");
        let _ = writeln!(output, "{}", line.trim_end());
    }
    let _ = writeln!(
        output,
        "{} └{}",
        " ".repeat(gutter),
        "─".repeat(points.len())
    );

    let indent = gutter + 2;
    let mut axis = format!("{}{}", " ".repeat(indent), points[0].label);
    if let Some(last) = points.last().filter(|_| points.len() > 1) {
        let used = axis.chars().count();
        let end = indent + points.len();
        let start = end.saturating_sub(last.label.chars().count());
        let padding = if start > used { start - used } else { 2 };
        axis.push_str(&" ".repeat(padding));
        axis.push_str(&last.label);
    }
    let _ = writeln!(output, "{axis}");
    output
}
