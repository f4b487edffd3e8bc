use rayon::prelude::*;

use crate::colormap::{Rgb, blend};

/// Row-major RGBA8 raster. Coordinates are pixels, origin top-left,
/// pixel (x, y) covering `[x, x+1) x [y, y+1)`.
#[derive(Clone, Debug)]
pub struct Canvas {
    pub data: Vec<u8>,
    pub w: usize,
    pub h: usize,
}

impl Canvas {
    pub fn new(w: usize, h: usize, background: Rgb) -> Self {
        let mut data = vec![0u8; w * h * 4];
        let px = background.rgba();
        data.par_chunks_mut(4).for_each(|out| out.copy_from_slice(&px));
        Self { data, w, h }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        (y * self.w + x) * 4
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.idx(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: [u8; 4]) {
        let i = self.idx(x, y);
        self.data[i..i + 4].copy_from_slice(&v);
    }

    /// Blend onto pixel (x, y). Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn blend(&mut self, x: i64, y: i64, color: Rgb, alpha: f64) {
        if x < 0 || y < 0 || x >= self.w as i64 || y >= self.h as i64 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let out = blend(self.get(x, y), color, alpha);
        self.set(x, y, out);
    }

    /// Disc of radius `r` centred at (cx, cy). The pixel containing the
    /// centre is always painted, so sub-pixel markers stay visible.
    pub fn fill_disc(&mut self, cx: f64, cy: f64, r: f64, color: Rgb, alpha: f64) {
        // clipped to the raster
        let x0 = ((cx - r).floor() as i64).max(0);
        let x1 = ((cx + r).ceil() as i64).min(self.w as i64 - 1);
        let y0 = ((cy - r).floor() as i64).max(0);
        let y1 = ((cy + r).ceil() as i64).min(self.h as i64 - 1);
        let (hx, hy) = (cx.floor() as i64, cy.floor() as i64);
        let r2 = r * r;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 || (x == hx && y == hy) {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    /// Opaque segment of the given width, stamped along a DDA walk.
    pub fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgb) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        let r = (width / 2.0).max(0.5);
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.fill_disc(from.0 + dx * t, from.1 + dy * t, r, color, 1.0);
        }
    }

    /// Fill rows `y0..y1` of columns `x0..x1` with `f(x, y)`.
    pub fn fill_rect_with<F>(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, f: F)
    where
        F: Fn(usize, usize) -> Rgb + Sync,
    {
        let (x1, y1) = (x1.min(self.w), y1.min(self.h));
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let w = self.w;
        self.data
            .par_chunks_mut(w * 4)
            .enumerate()
            .skip(y0)
            .take(y1 - y0)
            .for_each(|(y, row)| {
                for x in x0..x1 {
                    row[x * 4..x * 4 + 4].copy_from_slice(&f(x, y).rgba());
                }
            });
    }

    /// One-pixel outline just inside the rectangle.
    pub fn stroke_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, color: Rgb) {
        let (x1, y1) = (x1.min(self.w), y1.min(self.h));
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let px = color.rgba();
        for x in x0..x1 {
            self.set(x, y0, px);
            self.set(x, y1 - 1, px);
        }
        for y in y0..y1 {
            self.set(x0, y, px);
            self.set(x1 - 1, y, px);
        }
    }
}
