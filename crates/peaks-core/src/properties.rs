use serde::Serialize;

use crate::extrema::LocalMax;

/// Height (as a fraction of prominence) at which peak widths are measured.
pub const WIDTH_REL_HEIGHT: f64 = 0.5;

/// Derived measurements of one extremum.
///
/// All values are taken on the series the extremum was found in: the original
/// series for peaks, the inverted series for valleys. Prominence and width are
/// therefore always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Properties {
    pub prominence: f64,
    pub left_base: usize,
    pub right_base: usize,
    /// Evaluation height of the width, `value - prominence * WIDTH_REL_HEIGHT`.
    pub width_height: f64,
    pub left_ip: f64,
    pub right_ip: f64,
    pub width: f64,
    pub plateau_size: usize,
    pub left_edge: usize,
    pub right_edge: usize,
}

/// Prominence of the maximum at `peak`, with the indices of its two bases.
///
/// Walks outwards on each side while samples stay `<=` the peak, tracking the
/// lowest one seen; a strictly higher sample or the series boundary ends the
/// walk. The prominence is the drop from the peak to the higher of the two
/// minima.
pub fn prominence(data: &[f64], peak: usize) -> (f64, usize, usize) {
    let value = data[peak];

    let mut left_min = value;
    let mut left_base = peak;
    for i in (0..=peak).rev() {
        if data[i] > value {
            break;
        }
        if data[i] < left_min {
            left_min = data[i];
            left_base = i;
        }
    }

    let mut right_min = value;
    let mut right_base = peak;
    for (i, &x) in data.iter().enumerate().skip(peak) {
        if x > value {
            break;
        }
        if x < right_min {
            right_min = x;
            right_base = i;
        }
    }

    (value - left_min.max(right_min), left_base, right_base)
}

/// Width of the maximum at `peak`, measured `rel_height * prominence` below it.
///
/// Returns `(width_height, left_ip, right_ip)`; the interpolated positions are
/// fractional sample indices bounded by the bases.
pub fn width(
    data: &[f64],
    peak: usize,
    prominence: f64,
    left_base: usize,
    right_base: usize,
    rel_height: f64,
) -> (f64, f64, f64) {
    let height = data[peak] - prominence * rel_height;

    let mut i = peak;
    while left_base < i && height < data[i] {
        i -= 1;
    }
    let mut left_ip = i as f64;
    if data[i] < height {
        left_ip += (height - data[i]) / (data[i + 1] - data[i]);
    }

    let mut i = peak;
    while i < right_base && height < data[i] {
        i += 1;
    }
    let mut right_ip = i as f64;
    if data[i] < height {
        right_ip -= (height - data[i]) / (data[i - 1] - data[i]);
    }

    (height, left_ip, right_ip)
}

/// Compute the full [`Properties`] of a located maximum.
pub fn measure(data: &[f64], max: &LocalMax) -> Properties {
    let (prominence, left_base, right_base) = prominence(data, max.index);
    let (width_height, left_ip, right_ip) = width(
        data,
        max.index,
        prominence,
        left_base,
        right_base,
        WIDTH_REL_HEIGHT,
    );
    Properties {
        prominence,
        left_base,
        right_base,
        width_height,
        left_ip,
        right_ip,
        width: right_ip - left_ip,
        plateau_size: max.plateau_size(),
        left_edge: max.left_edge,
        right_edge: max.right_edge,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extrema::local_maxima;

    #[test]
    fn prominence_is_drop_to_higher_base() {
        // Left base 1.0, right base 0.0: the higher base (1.0) decides.
        let data = [1.0, 5.0, 0.0];
        let (p, lb, rb) = prominence(&data, 1);
        assert_eq!(p, 4.0);
        assert_eq!(lb, 0);
        assert_eq!(rb, 2);
    }

    #[test]
    fn walk_stops_at_strictly_higher_sample() {
        // The small peak at 3 is bounded on the left by the taller peak at 1.
        let data = [0.0, 10.0, 2.0, 4.0, 1.0];
        let (p, lb, rb) = prominence(&data, 3);
        assert_eq!(p, 2.0);
        assert_eq!(lb, 2);
        assert_eq!(rb, 4);

        // Right side never meets a higher sample and bottoms out at 1.0.
        let (p, lb, rb) = prominence(&data, 1);
        assert_eq!(p, 9.0);
        assert_eq!(lb, 0);
        assert_eq!(rb, 4);
    }

    #[test]
    fn equal_height_neighbour_does_not_stop_the_walk() {
        let data = [1.0, 3.0, 1.0, 3.0, 1.0];
        assert_eq!(prominence(&data, 1).0, 2.0);
        assert_eq!(prominence(&data, 3).0, 2.0);
    }

    #[test]
    fn triangle_width_at_half_prominence() {
        let data = [0.0, 1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0, 0.0];
        let max = local_maxima(&data)[0];
        let props = measure(&data, &max);
        assert_eq!(props.prominence, 4.0);
        assert_eq!(props.width_height, 2.0);
        assert!((props.left_ip - 2.0).abs() < 1e-12);
        assert!((props.right_ip - 6.0).abs() < 1e-12);
        assert!((props.width - 4.0).abs() < 1e-12);
        assert_eq!(props.plateau_size, 1);
    }

    #[test]
    fn width_interpolates_between_samples() {
        // Half-prominence height 2.5 lies between samples.
        let data = [0.0, 5.0, 0.0];
        let props = measure(&data, &local_maxima(&data)[0]);
        assert_eq!(props.width_height, 2.5);
        assert!((props.left_ip - 0.5).abs() < 1e-12);
        assert!((props.right_ip - 1.5).abs() < 1e-12);
        assert!((props.width - 1.0).abs() < 1e-12);
    }

    #[test]
    fn plateau_properties_span_the_crest() {
        let data = [0.0, 2.0, 2.0, 2.0, 0.0];
        let props = measure(&data, &local_maxima(&data)[0]);
        assert_eq!(props.prominence, 2.0);
        assert_eq!(props.plateau_size, 3);
        assert_eq!((props.left_edge, props.right_edge), (1, 3));
        assert!((props.width - 3.0).abs() < 1e-12);
    }
}
