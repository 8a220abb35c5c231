/// A local maximum located by [`local_maxima`].
///
/// `left_edge..=right_edge` spans the flat crest; for a sharp peak both edges
/// equal `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalMax {
    pub index: usize,
    pub left_edge: usize,
    pub right_edge: usize,
}

impl LocalMax {
    pub fn plateau_size(&self) -> usize {
        self.right_edge - self.left_edge + 1
    }
}

/// Find every interior local maximum of `data`.
///
/// A sample (or a run of equal samples) qualifies when the sample directly
/// before it and the sample directly after it are both strictly lower. Flat
/// runs are reported once, at the midpoint `(left + right) / 2`, so even-length
/// plateaus resolve to the left-of-centre sample. Runs that reach either end of
/// the series are never maxima, which also means series shorter than 3 samples
/// produce nothing.
///
/// Results are in ascending index order.
pub fn local_maxima(data: &[f64]) -> Vec<LocalMax> {
    let n = data.len();
    let mut out = Vec::new();
    if n < 3 {
        return out;
    }

    let last = n - 1;
    let mut i = 1;
    while i < last {
        if data[i - 1] < data[i] {
            // Skip over a possible plateau.
            let mut ahead = i + 1;
            while ahead < last && data[ahead] == data[i] {
                ahead += 1;
            }
            if data[ahead] < data[i] {
                let left_edge = i;
                let right_edge = ahead - 1;
                out.push(LocalMax {
                    index: (left_edge + right_edge) / 2,
                    left_edge,
                    right_edge,
                });
                i = ahead;
            }
        }
        i += 1;
    }
    out
}
