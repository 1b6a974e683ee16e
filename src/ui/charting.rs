use crate::stats::HistogramBin;
use crate::time_series::AttemptPoint;

/// X (last attempt index) and Y (slowest reaction) bounds for the trend chart
pub fn compute_chart_params(points: &[AttemptPoint]) -> (f64, f64) {
    let highest = points
        .iter()
        .map(|p| p.reaction)
        .fold(0.0_f64, f64::max);

    let last_attempt = points.last().map_or(1.0, |p| p.attempt as f64).max(1.0);

    // leave headroom so the slowest point is not drawn on the frame
    let ceiling = if highest > 0.0 { highest * 1.1 } else { 1.0 };

    (last_attempt, ceiling)
}

/// Label and height for every bar of the distribution chart
pub fn histogram_bars(bins: &[HistogramBin]) -> Vec<(String, u64)> {
    bins.iter()
        .map(|bin| (format_label(bin.start), bin.count as u64))
        .collect()
}

/// Index of the bar holding the mean, for the mean marker
pub fn mean_bin_index(bins: &[HistogramBin], mean: f64) -> Option<usize> {
    let last = bins.len().checked_sub(1)?;
    bins.iter()
        .position(|bin| mean >= bin.start && mean < bin.end)
        .or(Some(last))
}

/// Format a numeric axis label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(start: f64, end: f64, count: usize) -> HistogramBin {
        HistogramBin { start, end, count }
    }

    #[test]
    fn chart_params_empty() {
        assert_eq!(compute_chart_params(&[]), (1.0, 1.0));
    }

    #[test]
    fn chart_params_track_slowest_and_last() {
        let points = [
            AttemptPoint::new(0, 0.2),
            AttemptPoint::new(1, 0.5),
            AttemptPoint::new(2, 0.1),
        ];
        let (x, y) = compute_chart_params(&points);
        assert_eq!(x, 2.0);
        assert!((y - 0.55).abs() < 1e-9);
    }

    #[test]
    fn bars_are_labelled_by_bin_start() {
        let bars = histogram_bars(&[bin(0.0, 0.25, 3), bin(0.25, 0.5, 1)]);
        assert_eq!(bars, vec![("0".to_string(), 3), ("0.25".to_string(), 1)]);
    }

    #[test]
    fn mean_lands_in_its_bin() {
        let bins = [bin(0.0, 0.25, 3), bin(0.25, 0.5, 1)];
        assert_eq!(mean_bin_index(&bins, 0.1), Some(0));
        assert_eq!(mean_bin_index(&bins, 0.3), Some(1));
        // the top edge belongs to the last bin
        assert_eq!(mean_bin_index(&bins, 0.5), Some(1));
        assert_eq!(mean_bin_index(&[], 0.5), None);
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(1.0), "1");
        assert_eq!(format_label(0.1234), "0.12");
    }
}
