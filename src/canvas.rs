use std::io::{ BufWriter, Write };
use std::fs::File;
use std::path::Path;

use crate::color::Color;
use crate::error::Result;

/// Longest line a PPM writer may emit.
const PPM_LINE_WIDTH: usize = 70;

/// A width-by-height grid of linear, unclamped colors.
///
/// Pixels are stored row-major, so a run of whole rows is one contiguous
/// slice; the render loop relies on that to hand disjoint rows to workers.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a black canvas.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height]
        }
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. `y` is the row, `x` the column; both
    /// are zero-indexed.
    ///
    /// ```
    /// # use brute_tracer::color::Color;
    /// # use brute_tracer::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, &purple);
    /// assert_eq!(canvas.read_pixel(4, 2).unwrap(), purple);
    /// assert_eq!(canvas.read_pixel(8, 2), None);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &Color) {
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = *pixel;
    }

    /// Reads a color, or `None` if `(x, y)` is out of bounds.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// Encodes the canvas as a plain-text (`P3`) PPM image.
    ///
    /// Components are scaled to `0..=255`, rounded and clamped. Every row
    /// starts on a fresh line, and no line is longer than 70 characters.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?;

        if self.width == 0 {
            return Ok(());
        }

        let mut line = String::with_capacity(PPM_LINE_WIDTH);
        for row in self.pixels.chunks(self.width) {
            for channel in row.iter().flat_map(|p| p.to_channels(255).to_vec()) {
                let token = channel.to_string();

                if !line.is_empty()
                    && line.len() + 1 + token.len() > PPM_LINE_WIDTH {
                    writeln!(out, "{}", line)?;
                    line.clear();
                }

                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(&token);
            }

            writeln!(out, "{}", line)?;
            line.clear();
        }

        Ok(())
    }

    /// Saves the canvas to a PPM file at `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_ppm(&mut out)?;
        out.flush()?;

        Ok(())
    }
}

#[cfg(test)]
fn ppm_string(c: &Canvas) -> String {
    let mut buf = Vec::new();
    c.write_ppm(&mut buf).unwrap();

    String::from_utf8(buf).unwrap()
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.pixels().len(), 200);
    assert!(c.pixels().iter().all(|p| *p == Color::black()));
}

#[test]
fn ppm_header() {
    let ppm = ppm_string(&Canvas::new(5, 3));
    let lines: Vec<&str> = ppm.lines().take(3).collect();

    assert_eq!(lines, vec!["P3", "5 3", "255"]);
}

#[test]
fn ppm_pixel_data() {
    let mut c = Canvas::new(5, 3);
    c.write_pixel(0, 0, &Color::rgb(1.5, 0.0, 0.0));
    c.write_pixel(2, 1, &Color::rgb(0.0, 0.5, 0.0));
    c.write_pixel(4, 2, &Color::rgb(-0.5, 0.0, 1.0));

    let ppm = ppm_string(&c);
    let lines: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(lines, vec![
        "255 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 128 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 0 0 0 0 0 0 0 255",
    ]);
}

#[test]
fn ppm_splits_long_lines() {
    let mut c = Canvas::new(10, 2);
    c.pixels_mut().iter_mut().for_each(|p| *p = Color::rgb(1.0, 0.8, 0.6));

    let ppm = ppm_string(&c);
    let lines: Vec<&str> = ppm.lines().skip(3).collect();

    let long = "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204";
    let short = "153 255 204 153 255 204 153 255 204 153 255 204 153";

    assert_eq!(lines, vec![long, short, long, short]);
    assert!(lines.iter().all(|l| l.len() <= PPM_LINE_WIDTH));
}

#[test]
fn ppm_ends_with_newline() {
    assert!(ppm_string(&Canvas::new(5, 3)).ends_with('\n'));
}
