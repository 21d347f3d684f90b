// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A fixed-size RGB pixel buffer that charts are drawn onto and which can be
//! encoded to a PNG file. The buffer layout is row-major with three bytes per
//! pixel, which is what bitmap drawing backends expect.

use log::*;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub use png::EncodingError;

const BYTES_PER_PIXEL: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorRgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorRgb {
    pub const WHITE: ColorRgb = ColorRgb {
        r: 255,
        g: 255,
        b: 255,
    };
}

/// An in-memory drawing surface. A new canvas starts filled with the
/// background colour, and `clear` restores it to exactly that state.
pub struct Canvas {
    buffer: Vec<u8>,
    width: usize,
    height: usize,
    background: ColorRgb,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, ColorRgb::WHITE)
    }

    pub fn with_background(width: u32, height: u32, background: ColorRgb) -> Self {
        let width = width as usize;
        let height = height as usize;
        let mut canvas = Canvas {
            buffer: vec![0; width * height * BYTES_PER_PIXEL],
            width,
            height,
            background,
        };
        canvas.clear();
        canvas
    }

    /// Reset every pixel to the background colour.
    pub fn clear(&mut self) {
        for pixel in self.buffer.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel[0] = self.background.r;
            pixel[1] = self.background.g;
            pixel[2] = self.background.b;
        }
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn background(&self) -> ColorRgb {
        self.background
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<ColorRgb> {
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * BYTES_PER_PIXEL;
        Some(ColorRgb {
            r: self.buffer[offset],
            g: self.buffer[offset + 1],
            b: self.buffer[offset + 2],
        })
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, value: ColorRgb) {
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            let offset = (y * self.width + x) * BYTES_PER_PIXEL;
            self.buffer[offset] = value.r;
            self.buffer[offset + 1] = value.g;
            self.buffer[offset + 2] = value.b;
        }
    }

    /// true if no pixel differs from the background colour
    pub fn is_blank(&self) -> bool {
        let bg = self.background;
        self.buffer
            .chunks_exact(BYTES_PER_PIXEL)
            .all(|p| p[0] == bg.r && p[1] == bg.g && p[2] == bg.b)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Encode the canvas as an 8-bit RGB PNG. An existing file at `path` is
    /// truncated and replaced.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> Result<(), EncodingError> {
        let path = path.as_ref();
        debug!("writing png: {}", path.display());
        let file = File::create(path)?;
        let w = BufWriter::new(file);
        let mut encoder = png::Encoder::new(w, self.width as u32, self.height as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.buffer)?;
        writer.finish()
    }
}
