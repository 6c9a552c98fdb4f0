//! Plotters-powered radar chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Half-extent of the chart square; leaves room for labels past radius 1.
const EXTENT: f64 = 1.3;

/// A render-only radar description. All geometry is computed by the caller.
pub struct RadarPlottersChart<'a> {
    /// Closed score polygon (first vertex repeated last), unit radius = 100.
    pub polygon: &'a [(f64, f64)],
    /// Axis end points at unit radius, in axis order.
    pub axes: &'a [(f64, f64)],
    /// Axis labels and their positions.
    pub labels: &'a [(String, (f64, f64))],
}

impl<'a> Widget for RadarPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        if self.axes.len() < 3 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .build_cartesian_2d(-EXTENT..EXTENT, -EXTENT..EXTENT)?;

            let grid_color = RGBColor(110, 110, 110);
            let polygon_color = RGBColor(0, 255, 255); // cyan

            // Reference rings at 50 and 100.
            for ring in [0.5, 1.0] {
                let mut pts: Vec<(f64, f64)> = self.axes.iter().map(|&(x, y)| (x * ring, y * ring)).collect();
                if let Some(&first) = pts.first() {
                    pts.push(first);
                }
                chart.draw_series(LineSeries::new(pts, &grid_color))?;
            }

            for &end in self.axes {
                chart.draw_series(LineSeries::new([(0.0, 0.0), end], &grid_color))?;
            }

            chart.draw_series(LineSeries::new(self.polygon.iter().copied(), &polygon_color))?;

            chart.draw_series(self.labels.iter().map(|(label, pos)| {
                Text::new(label.clone(), *pos, ("sans-serif", 10).into_font().color(&WHITE))
            }))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
