//! Plotters-powered SVG chart for the web page.
//!
//! The chart is rendered into an in-memory SVG string with Plotters' SVG
//! backend and embedded inline in the HTML, so no image files or encoders are
//! involved.

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::AppError;
use crate::plot::ChartData;

const DATA_COLOR: RGBColor = RGBColor(31, 119, 180);
const CURVE_COLOR: RGBColor = RGBColor(214, 39, 40);
const QUERY_COLOR: RGBColor = RGBColor(44, 160, 44);
const PREDICTED_COLOR: RGBColor = RGBColor(255, 127, 14);
const GRID_COLOR: RGBColor = RGBColor(225, 225, 225);

/// Number of dashes per reference line.
const DASHES: usize = 40;

/// Render the chart as a standalone `<svg>` document.
pub fn render_svg_chart(chart: &ChartData, width: u32, height: u32) -> Result<String, AppError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        draw_chart(chart, &root)
            .map_err(|e| AppError::new(4, format!("Failed to render chart: {e}")))?;
        root.present()
            .map_err(|e| AppError::new(4, format!("Failed to render chart: {e}")))?;
    }
    Ok(svg)
}

fn draw_chart<DB: DrawingBackend>(
    chart: &ChartData,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let [x0, x1] = chart.x_bounds;
    let [y0, y1] = chart.y_bounds;

    root.fill(&WHITE)?;

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 20))
        .margin(12)
        .set_label_area_size(LabelAreaPosition::Left, 56)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    ctx.configure_mesh()
        .x_desc("Marks")
        .y_desc("Percentile")
        .x_labels(8)
        .y_labels(8)
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format!("{v:.1}"))
        .light_line_style(&GRID_COLOR)
        .draw()?;

    ctx.draw_series(
        chart
            .points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 4, DATA_COLOR.filled())),
    )?
    .label("Original Data")
    .legend(|(x, y)| Circle::new((x + 10, y), 4, DATA_COLOR.filled()));

    ctx.draw_series(LineSeries::new(
        chart.curve.iter().copied(),
        CURVE_COLOR.stroke_width(2),
    ))?
    .label("Polynomial Regression")
    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CURVE_COLOR.stroke_width(2)));

    let q = chart.query_score;
    ctx.draw_series(
        dashed_segments((q, y0), (q, y1), DASHES)
            .into_iter()
            .map(|seg| PathElement::new(seg, QUERY_COLOR.stroke_width(2))),
    )?
    .label(format!("Your Marks ({})", format_marks(q)))
    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], QUERY_COLOR.stroke_width(2)));

    let p = chart.predicted;
    ctx.draw_series(
        dashed_segments((x0, p), (x1, p), DASHES)
            .into_iter()
            .map(|seg| PathElement::new(seg, PREDICTED_COLOR.stroke_width(2))),
    )?
    .label(format!("Predicted: {p:.2}"))
    .legend(|(x, y)| {
        PathElement::new(vec![(x, y), (x + 20, y)], PREDICTED_COLOR.stroke_width(2))
    });

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

/// Split the segment `from -> to` into `n` dashes separated by equal gaps.
fn dashed_segments(from: (f64, f64), to: (f64, f64), n: usize) -> Vec<Vec<(f64, f64)>> {
    let n = n.max(1);
    let pieces = (2 * n - 1) as f64;
    let lerp = |t: f64| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
    (0..n)
        .map(|i| {
            let start = (2 * i) as f64 / pieces;
            let end = (2 * i + 1) as f64 / pieces;
            vec![lerp(start), lerp(end)]
        })
        .collect()
}

/// Whole marks print without a fractional part (`150`, `162.5`).
pub fn format_marks(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reference_dataset;
    use crate::fit::predict;

    #[test]
    fn svg_contains_chart_and_legend() {
        let ds = reference_dataset().unwrap();
        let table = ds.default_category();
        let result = predict(table, 150.0, 100).unwrap();
        let chart = ChartData::new(table, &result);

        let svg = render_svg_chart(&chart, 640, 480).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Shift: Jan 27 Shift 1"));
        assert!(svg.contains("Original Data"));
        assert!(svg.contains("Polynomial Regression"));
        assert!(svg.contains("Your Marks (150)"));
        assert!(svg.contains(&format!("Predicted: {:.2}", result.percentile)));
    }

    #[test]
    fn dashes_cover_the_segment_ends() {
        let d = dashed_segments((0.0, 0.0), (0.0, 9.0), 5);
        assert_eq!(d.len(), 5);
        assert_eq!(d[0][0], (0.0, 0.0));
        assert!((d[4][1].1 - 9.0).abs() < 1e-12);
        assert!((d[0][1].1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn marks_formatting() {
        assert_eq!(format_marks(150.0), "150");
        assert_eq!(format_marks(162.5), "162.5");
    }
}
