use crate::numerical::sampling::PlotPoint;
use plotters::prelude::*;
use std::error::Error;

/// [min, max] of the values widened by 5% of the span (or by 1 for a flat series)
fn padded_range(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);
    let pad = if max > min { 0.05 * (max - min) } else { 1.0 };
    (min - pad, max + pad)
}

/// Renders sampled points of a solved quadratic into a PNG line chart.
/// `roots` are marked on the x-axis.
pub fn plot_samples(
    points: &[PlotPoint],
    roots: &[f64],
    caption: &str,
    filename: &str,
) -> Result<(), Box<dyn Error>> {
    if points.is_empty() {
        return Err("nothing to plot".into());
    }
    let (x_min, x_max) = padded_range(points.iter().map(|p| p.x));
    let (y_min, y_max) = padded_range(points.iter().map(|p| p.y).chain([0.0]));

    let root_area = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root_area)
        .caption(caption, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart.configure_mesh().x_desc("x").y_desc("y").draw()?;

    // x-axis
    chart.draw_series(LineSeries::new(vec![(x_min, 0.0), (x_max, 0.0)], &BLACK))?;

    let series: Vec<(f64, f64)> = points.iter().map(|&p| p.into()).collect();
    chart
        .draw_series(LineSeries::new(series, &Palette99::pick(0)))?
        .label(caption)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &Palette99::pick(0)));

    chart.draw_series(
        roots
            .iter()
            .map(|&r| Circle::new((r, 0.0), 5, RED.filled())),
    )?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root_area.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::sampling::sample_points;

    #[test]
    fn test_padded_range() {
        let (lo, hi) = padded_range([0.0, 10.0].into_iter());
        assert_eq!((lo, hi), (-0.5, 10.5));
        let (lo, hi) = padded_range([2.0, 2.0].into_iter());
        assert_eq!((lo, hi), (1.0, 3.0));
    }

    #[test]
    fn test_empty_series_is_an_error() {
        assert!(plot_samples(&[], &[], "empty", "never_written.png").is_err());
    }

    // needs a system font for the caption and axis labels
    #[test]
    #[ignore]
    fn test_plot_samples_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parabola.png");
        let points = sample_points(1.0, -4.0, 3.0);
        plot_samples(&points, &[3.0, 1.0], "x^2-4x+3=0", path.to_str().unwrap()).unwrap();
        assert!(path.exists());
    }
}
