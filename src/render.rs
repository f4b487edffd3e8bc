use std::path::PathBuf;

use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use rayon::prelude::*;

use crate::canvas::Canvas;
use crate::colormap::Rgb;
use crate::config::RenderOptions;
use crate::error::Result;
use crate::walk::Walk;

const BACKGROUND: Rgb = Rgb::WHITE;
const START_COLOR: Rgb = Rgb::GREEN;
const FINISH_COLOR: Rgb = Rgb::RED;
const COLOR_BAR_OUTLINE: Rgb = Rgb::hex(0x333333);

/// Relative padding around the data on each axis.
const DATA_PAD: f64 = 0.05;
/// Start/finish markers never shrink below this radius in pixels.
const MIN_MARKER_RADIUS: f64 = 3.0;
const PATH_WIDTH: f64 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: Rgb,
}

/// A rendered walk: the raster plus the annotations a display shows around it.
#[derive(Clone, Debug)]
pub struct Figure {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
    pub legend: Vec<LegendEntry>,
    /// Point-index range covered by the colour bar, when drawn.
    pub color_range: Option<(usize, usize)>,
    pub distance: f64,
}

impl Figure {
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }
}

/// Display collaborator that receives finished figures.
pub trait Surface {
    fn present(&mut self, figure: &Figure) -> Result<()>;
}

/// Writes each presented figure to `path` as PNG.
#[derive(Clone, Debug)]
pub struct PngFile {
    pub path: PathBuf,
}

impl PngFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Surface for PngFile {
    fn present(&mut self, figure: &Figure) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        image::save_buffer(
            &self.path,
            &figure.rgba,
            figure.width,
            figure.height,
            image::ColorType::Rgba8,
        )?;
        Ok(())
    }
}

pub fn encode_png(figure: &Figure) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(
        &figure.rgba,
        figure.width,
        figure.height,
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}

pub fn title(point_count: usize, distance: Option<f64>) -> String {
    match distance {
        Some(d) => format!("Random walk for {} points; distance = {:.2}", point_count, d),
        None => format!("Random walk for {} points", point_count),
    }
}

/// Pixel rectangle the data is mapped into.
#[derive(Clone, Copy, Debug)]
struct PlotArea {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

/// Data-space extent after padding.
#[derive(Clone, Copy, Debug)]
struct Bounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Bounds {
    fn of(walk: &Walk) -> Self {
        let (x_min, x_max) = padded_range(&walk.xs);
        let (y_min, y_max) = padded_range(&walk.ys);
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    #[inline]
    fn project(&self, area: &PlotArea, x: f64, y: f64) -> (f64, f64) {
        let tx = (x - self.x_min) / (self.x_max - self.x_min);
        let ty = (y - self.y_min) / (self.y_max - self.y_min);
        (
            area.left + tx * (area.right - area.left),
            area.bottom - ty * (area.bottom - area.top),
        )
    }
}

fn padded_range(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = hi - lo;
    if span.is_nan() || span <= 0.0 {
        return (lo - 1.0, lo + 1.0);
    }
    (lo - span * DATA_PAD, hi + span * DATA_PAD)
}

/// Plot area and, when requested, the colour bar rectangle `(x0, y0, x1, y1)`.
fn layout(w: usize, h: usize, color_bar: bool) -> (PlotArea, Option<(usize, usize, usize, usize)>) {
    let margin = ((w.min(h) as f64) * 0.05).round() as usize;
    let bar_w = ((w as f64) * 0.025).round().max(4.0) as usize;
    let gap = margin.max(2);

    let bar_total = if color_bar { bar_w + gap } else { 0 };
    if w <= 2 * margin + bar_total + 1 || h <= 2 * margin + 1 {
        // too small for decorations, use everything for data
        let area = PlotArea {
            left: 0.0,
            right: w as f64,
            top: 0.0,
            bottom: h as f64,
        };
        return (area, None);
    }

    let area = PlotArea {
        left: margin as f64,
        right: (w - margin - bar_total) as f64,
        top: margin as f64,
        bottom: (h - margin) as f64,
    };
    let bar = color_bar.then(|| (w - margin - bar_w, margin, w - margin, h - margin));
    (area, bar)
}

/// Rasterise a walk. Pure: no I/O, the same input always gives the same pixels.
pub fn draw(walk: &Walk, options: &RenderOptions) -> Result<Figure> {
    options.validate()?;
    // rejects empty and ragged walks
    let distance = walk.distance()?;
    let n = walk.len();

    let (width, height) = options.pixel_size();
    let (w, h) = (width as usize, height as usize);
    let mut canvas = Canvas::new(w, h, BACKGROUND);
    let (area, bar) = layout(w, h, options.show_color_bar);
    let bounds = Bounds::of(walk);
    let cmap = options.color_map;

    // Projection and colour lookup are independent per point; blending is not.
    let styled: Vec<((f64, f64), Rgb)> = walk
        .xs
        .par_iter()
        .zip(walk.ys.par_iter())
        .enumerate()
        .map(|(i, (&x, &y))| (bounds.project(&area, x, y), cmap.for_index(i, n)))
        .collect();

    let radius = options.marker_radius(options.point_size);
    for &((px, py), color) in &styled {
        canvas.fill_disc(px, py, radius, color, options.alpha);
    }

    let mut color_range = None;
    if let Some((x0, y0, x1, y1)) = bar {
        let span = (y1 - y0 - 1).max(1) as f64;
        canvas.fill_rect_with(x0, y0, x1, y1, |_, y| {
            cmap.sample((y1 - 1 - y) as f64 / span)
        });
        canvas.stroke_rect(x0, y0, x1, y1, COLOR_BAR_OUTLINE);
        color_range = Some((0, n - 1));
    }

    let marker = options
        .marker_radius(1.5 * options.point_size)
        .max(MIN_MARKER_RADIUS);
    let start = styled[0].0;
    let finish = styled[n - 1].0;
    canvas.fill_disc(start.0, start.1, marker, START_COLOR, 1.0);
    canvas.fill_disc(finish.0, finish.1, marker, FINISH_COLOR, 1.0);

    if options.show_direct_path {
        canvas.draw_line(start, finish, PATH_WIDTH, options.path_color);
    }

    Ok(Figure {
        title: title(n, options.show_direct_path.then_some(distance)),
        width,
        height,
        rgba: canvas.data,
        legend: vec![
            LegendEntry {
                label: "start",
                color: START_COLOR,
            },
            LegendEntry {
                label: "finish",
                color: FINISH_COLOR,
            },
        ],
        color_range,
        distance,
    })
}

/// Draw the walk and hand the figure to `surface`.
pub fn render<S: Surface + ?Sized>(walk: &Walk, options: &RenderOptions, surface: &mut S) -> Result<()> {
    let figure = draw(walk, options)?;
    surface.present(&figure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_formats() {
        assert_eq!(title(7999, None), "Random walk for 7999 points");
        assert_eq!(
            title(3, Some(1.41421)),
            "Random walk for 3 points; distance = 1.41"
        );
    }

    #[test]
    fn degenerate_range_is_widened() {
        assert_eq!(padded_range(&[2.0, 2.0]), (1.0, 3.0));
        let (lo, hi) = padded_range(&[0.0, 10.0]);
        assert!((lo + 0.5).abs() < 1e-12 && (hi - 10.5).abs() < 1e-12);
    }

    #[test]
    fn layout_reserves_color_bar() {
        let (area, bar) = layout(1000, 600, true);
        let (x0, y0, x1, y1) = bar.unwrap();
        assert!(area.right <= x0 as f64);
        assert_eq!(x1, 1000 - 30);
        assert_eq!((y0, y1), (30, 570));

        let (area, bar) = layout(1000, 600, false);
        assert!(bar.is_none());
        assert_eq!(area.right, 970.0);
    }

    #[test]
    fn tiny_figure_uses_whole_canvas() {
        let (area, bar) = layout(3, 3, true);
        assert!(bar.is_none());
        assert_eq!((area.left, area.right), (0.0, 3.0));
    }
}
