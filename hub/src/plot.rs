//! PNG rendering of a detection run.
//!
//! The chart shows the series polyline, a prominence bar for every retained
//! extremum (hanging below peaks, standing above valleys) and a cross marker
//! on each peak and valley.

use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};
use peaks_core::{Detection, Extremum};

const MARGIN: f64 = 20.0;
const MARKER_RADIUS: i64 = 4;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([200, 200, 200]);
const SERIES: Rgb<u8> = Rgb([31, 119, 180]);
const PROMINENCE: Rgb<u8> = Rgb([255, 127, 14]);
const PEAK: Rgb<u8> = Rgb([214, 39, 40]);
const VALLEY: Rgb<u8> = Rgb([44, 160, 44]);

#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub dir: PathBuf,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug)]
pub enum PlotError {
    Io(std::io::Error),
    Image(image::ImageError),
}

impl std::fmt::Display for PlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "plot_io_error: {e}"),
            Self::Image(e) => write!(f, "plot_encode_error: {e}"),
        }
    }
}

impl std::error::Error for PlotError {}

impl From<std::io::Error> for PlotError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<image::ImageError> for PlotError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

/// Maps sample space onto pixel space.
struct Canvas {
    img: RgbImage,
    n: usize,
    y_min: f64,
    y_max: f64,
}

impl Canvas {
    fn new(width: u32, height: u32, series: &[f64]) -> Self {
        let (mut y_min, mut y_max) = series
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if y_max <= y_min {
            // Flat (or single-sample) series: centre it.
            let mid = if y_min.is_finite() { y_min } else { 0.0 };
            y_min = mid - 1.0;
            y_max = mid + 1.0;
        }
        Self {
            img: RgbImage::from_pixel(width, height, BACKGROUND),
            n: series.len(),
            y_min,
            y_max,
        }
    }

    fn x(&self, i: f64) -> f64 {
        let span = self.img.width() as f64 - 2.0 * MARGIN;
        if self.n < 2 {
            return MARGIN + span / 2.0;
        }
        MARGIN + i * span / (self.n - 1) as f64
    }

    fn y(&self, v: f64) -> f64 {
        let span = self.img.height() as f64 - 2.0 * MARGIN;
        MARGIN + (self.y_max - v) / (self.y_max - self.y_min) * span
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.img.width() && (y as u32) < self.img.height() {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    fn line(&mut self, (x0, y0): (f64, f64), (x1, y1): (f64, f64), color: Rgb<u8>) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.put(x.round() as i64, y.round() as i64, color);
        }
    }

    fn cross(&mut self, (cx, cy): (f64, f64), color: Rgb<u8>) {
        let (cx, cy) = (cx.round() as i64, cy.round() as i64);
        for d in -MARKER_RADIUS..=MARKER_RADIUS {
            self.put(cx + d, cy + d, color);
            self.put(cx + d, cy - d, color);
        }
    }
}

/// Draw `detection` onto a fresh `width` x `height` image.
pub fn render(detection: &Detection, width: u32, height: u32) -> RgbImage {
    let series = &detection.series;
    let mut canvas = Canvas::new(width, height, series);

    if canvas.y_min <= 0.0 && 0.0 <= canvas.y_max {
        let y0 = canvas.y(0.0);
        canvas.line((MARGIN, y0), (width as f64 - MARGIN, y0), AXIS);
    }

    if series.len() == 1 {
        let p = (canvas.x(0.0), canvas.y(series[0]));
        canvas.put(p.0.round() as i64, p.1.round() as i64, SERIES);
    }
    for (i, pair) in series.windows(2).enumerate() {
        let a = (canvas.x(i as f64), canvas.y(pair[0]));
        let b = (canvas.x(i as f64 + 1.0), canvas.y(pair[1]));
        canvas.line(a, b, SERIES);
    }

    let bar = |e: &Extremum, sign: f64| {
        let v = series[e.index];
        (v, v - sign * e.properties.prominence)
    };
    for (extrema, sign) in [(&detection.peaks, 1.0), (&detection.valleys, -1.0)] {
        for e in extrema {
            let (top, base) = bar(e, sign);
            let x = canvas.x(e.index as f64);
            canvas.line((x, canvas.y(top)), (x, canvas.y(base)), PROMINENCE);
        }
    }

    for (extrema, color) in [(&detection.peaks, PEAK), (&detection.valleys, VALLEY)] {
        for e in extrema {
            let p = (canvas.x(e.index as f64), canvas.y(series[e.index]));
            canvas.cross(p, color);
        }
    }

    canvas.img
}

/// Render `detection` and write it as a PNG into `opts.dir`, returning the file path.
pub fn write_plot(detection: &Detection, opts: &PlotOptions) -> Result<PathBuf, PlotError> {
    std::fs::create_dir_all(&opts.dir)?;
    let path = plot_path(&opts.dir);
    let img = render(detection, opts.width, opts.height);
    img.save_with_format(&path, ImageFormat::Png)?;
    Ok(path)
}

fn plot_path(dir: &Path) -> PathBuf {
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
    dir.join(format!("peaks_{stamp}_{}.png", uuid::Uuid::new_v4()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use peaks_core::detect;

    #[test]
    fn markers_land_on_extrema() {
        // x(i) = 20 + i * 80, y(v) = 20 + (2 - v) / 4 * 60
        let d = detect(&[0.0, 2.0, -2.0, 0.0], 0.0).unwrap();
        let img = render(&d, 280, 100);
        assert_eq!(img.dimensions(), (280, 100));
        assert_eq!(*img.get_pixel(100, 20), PEAK);
        assert_eq!(*img.get_pixel(180, 80), VALLEY);
        assert_eq!(*img.get_pixel(0, 0), BACKGROUND);
    }

    #[test]
    fn flat_and_single_sample_series_render() {
        let d = detect(&[3.0, 3.0, 3.0], 0.0).unwrap();
        let img = render(&d, 120, 80);
        assert_eq!(*img.get_pixel(60, 40), SERIES);

        let d = detect(&[1.0], 0.0).unwrap();
        let img = render(&d, 120, 80);
        assert_eq!(*img.get_pixel(60, 40), SERIES);
    }

    #[test]
    fn write_plot_creates_png_in_fresh_directory() {
        let dir = tempfile::tempdir().unwrap();
        let opts = PlotOptions {
            dir: dir.path().join("nested/plots"),
            width: 200,
            height: 100,
        };
        let d = detect(&[1.0, 3.0, 1.0, 3.0, 1.0], 1.0).unwrap();
        let path = write_plot(&d, &opts).unwrap();
        assert!(path.starts_with(&opts.dir));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 100));
    }

    #[test]
    fn write_plot_reports_unusable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();
        let opts = PlotOptions { dir: blocker, width: 50, height: 50 };
        let d = detect(&[0.0, 1.0, 0.0], 0.0).unwrap();
        assert!(matches!(write_plot(&d, &opts), Err(PlotError::Io(_))));
    }
}
