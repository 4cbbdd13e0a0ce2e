//! Framebuffer for storing render output.
//!
//! Pixel `(0, 0)` is the bottom-left corner. Writers flip rows so files are
//! stored top row first.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::bucket::BucketResult;
use crate::RenderResult;
use orb_math::Color;

/// A grid of RGBA colors with bounds-checked access.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row-major, bottom row first.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Get the pixel at (x, y), or `None` outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at (x, y). Returns false and leaves the image untouched
    /// when the coordinate is out of bounds.
    pub fn set(&mut self, x: u32, y: u32, color: Color) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = color;
                true
            }
            None => false,
        }
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        let mut colors = result.pixels.iter();

        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let Some(&color) = colors.next() else {
                    log::warn!("Bucket {} is missing pixels", bucket.index);
                    return;
                };
                self.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }
    }

    /// Convert to 8-bit RGBA bytes, top row first.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                if let Some(color) = self.get(x, y) {
                    bytes.extend_from_slice(&color.to_rgba8());
                }
            }
        }
        bytes
    }

    /// Write the image as a plain-text PPM (`P3`).
    pub fn write_ppm<W: Write>(&self, mut writer: W) -> RenderResult<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let [r, g, b, _] = self.get(x, y).unwrap_or_default().to_rgba8();
                writeln!(writer, "{} {} {}", r, g, b)?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    /// Save the image, picking the format from the file extension.
    ///
    /// `.ppm` is written as plain-text PPM; anything else goes through the
    /// `image` crate (PNG, BMP, ...).
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        let is_ppm = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

        if is_ppm {
            let file = File::create(path)?;
            self.write_ppm(BufWriter::new(file))?;
        } else {
            image::save_buffer(
                path,
                &self.to_rgba8(),
                self.width,
                self.height,
                image::ColorType::Rgba8,
            )?;
        }

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}
