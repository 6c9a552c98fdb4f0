//! Radar (spider) chart of the dimension means.
//!
//! The polygon is closed: the first dimension is repeated at the end so any
//! renderer can draw it as a single line strip. Axes start at the top and run
//! clockwise in canonical dimension order.
//!
//! ASCII plot elements:
//! - score polygon: `*`
//! - axis spokes: `.`
//! - centre: `+`
//! - axis labels: first letter of the dimension

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::domain::{Dimension, DimensionSummary, SCORE_MAX};

/// Half-extent of the plotted square in unit-radius coordinates.
const EXTENT: f64 = 1.15;
/// Radius at which axis labels are placed.
const LABEL_RADIUS: f64 = 1.1;

/// Closed `(dimension, mean)` sequence: first entry repeated at the end.
pub fn radar_polygon(dimensions: &[DimensionSummary]) -> Vec<(Dimension, f64)> {
    let mut out: Vec<(Dimension, f64)> = dimensions.iter().map(|d| (d.dimension, d.mean_score)).collect();
    if let Some(&first) = out.first() {
        out.push(first);
    }
    out
}

/// Angle of axis `i` out of `n`: top first, clockwise.
pub fn axis_angle(i: usize, n: usize) -> f64 {
    FRAC_PI_2 - TAU * i as f64 / n.max(1) as f64
}

/// Cartesian vertices of the closed polygon, radius = score / 100.
pub fn radar_vertices(dimensions: &[DimensionSummary]) -> Vec<(f64, f64)> {
    let n = dimensions.len();
    let mut out: Vec<(f64, f64)> = dimensions
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let r = (d.mean_score / SCORE_MAX).clamp(0.0, 1.0);
            let a = axis_angle(i, n);
            (r * a.cos(), r * a.sin())
        })
        .collect();
    if let Some(&first) = out.first() {
        out.push(first);
    }
    out
}

/// Render the radar chart as text with a one-line legend header.
pub fn render_ascii_radar(dimensions: &[DimensionSummary], width: usize, height: usize) -> String {
    let width = width.max(11);
    let height = height.max(7);
    let mut grid = vec![vec![' '; width]; height];

    let n = dimensions.len();
    let center = (map_x(0.0, width), map_y(0.0, height));

    // Polygon first, so spokes only fill blanks.
    let vertices = radar_vertices(dimensions);
    let mut prev = None;
    for &(x, y) in &vertices {
        let p = (map_x(x, width), map_y(y, height));
        match prev {
            Some((x0, y0)) => draw_line(&mut grid, x0, y0, p.0, p.1, '*'),
            None => grid[p.1][p.0] = '*',
        }
        prev = Some(p);
    }

    for i in 0..n {
        let a = axis_angle(i, n);
        let end = (map_x(a.cos(), width), map_y(a.sin(), height));
        draw_line(&mut grid, center.0, center.1, end.0, end.1, '.');
    }

    if grid[center.1][center.0] == ' ' || grid[center.1][center.0] == '.' {
        grid[center.1][center.0] = '+';
    }

    for (i, d) in dimensions.iter().enumerate() {
        let a = axis_angle(i, n);
        let x = map_x(LABEL_RADIUS * a.cos(), width);
        let y = map_y(LABEL_RADIUS * a.sin(), height);
        grid[y][x] = d.dimension.display_name().chars().next().unwrap_or('?');
    }

    let legend: Vec<String> = dimensions
        .iter()
        .map(|d| format!("{} {:.1}", d.dimension.display_name(), d.mean_score))
        .collect();

    let mut out = String::new();
    out.push_str(&format!("Radar: {}\n", legend.join(" | ")));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out
}

fn map_x(x: f64, width: usize) -> usize {
    let u = ((x + EXTENT) / (2.0 * EXTENT)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, height: usize) -> usize {
    let u = ((EXTENT - y) / (2.0 * EXTENT)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (u * (height as f64 - 1.0)).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only writes into blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries(scores: [f64; 5]) -> Vec<DimensionSummary> {
        Dimension::ALL
            .iter()
            .zip(scores)
            .map(|(&dimension, mean_score)| DimensionSummary {
                dimension,
                mean_score,
                count: 1,
            })
            .collect()
    }

    #[test]
    fn polygon_is_closed_in_canonical_order() {
        let poly = radar_polygon(&summaries([80.0, 60.0, 40.0, 90.0, 30.0]));
        assert_eq!(poly.len(), 6);
        assert_eq!(poly[0], (Dimension::Macro, 80.0));
        assert_eq!(poly[4], (Dimension::Risk, 30.0));
        assert_eq!(poly[5], poly[0]);
        assert!(radar_polygon(&[]).is_empty());
    }

    #[test]
    fn first_axis_points_up_and_runs_clockwise() {
        let v = radar_vertices(&summaries([100.0, 100.0, 100.0, 100.0, 100.0]));
        assert!((v[0].0).abs() < 1e-12 && (v[0].1 - 1.0).abs() < 1e-12);
        // Second axis is to the right of the first (clockwise).
        assert!(v[1].0 > 0.0);
        assert_eq!(v[5], v[0]);
    }

    #[test]
    fn ascii_radar_places_labels_and_polygon() {
        let txt = render_ascii_radar(&summaries([100.0, 100.0, 100.0, 100.0, 100.0]), 41, 21);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 22);
        assert_eq!(
            lines[0],
            "Radar: Macro 100.0 | Liquidity 100.0 | Trend 100.0 | Sentiment 100.0 | Risk 100.0"
        );
        // Macro label above the top vertex, both on the centre column.
        assert_eq!(lines[1].chars().nth(20), Some('M'));
        assert_eq!(lines[2].chars().nth(20), Some('*'));
        assert_eq!(lines[11].chars().nth(20), Some('+'));
        for label in ['L', 'T', 'S', 'R'] {
            assert!(txt[lines[0].len()..].contains(label), "missing label {label}");
        }
    }

    #[test]
    fn all_zero_polygon_collapses_to_centre() {
        let txt = render_ascii_radar(&summaries([0.0; 5]), 41, 21);
        let body: String = txt.lines().skip(1).collect::<Vec<_>>().join("\n");
        assert_eq!(body.matches('*').count(), 1);
        assert_eq!(txt.lines().nth(11).and_then(|l| l.chars().nth(20)), Some('*'));
    }
}
