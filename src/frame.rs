// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Owned pixel storage for one frame.

use std::slice::ChunksMut;

use palette::PixelColor;

const CHANNELS: usize = 4;

/// A `width × height` grid of RGBA pixels, stored row-major with the
/// top row first.  The dimensions never change once allocated; a
/// renderer overwrites every pixel and then hands the buffer to the
/// encoder.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Allocates a fully transparent black buffer.
    pub fn new(width: usize, height: usize) -> FrameBuffer {
        FrameBuffer {
            width,
            height,
            pixels: vec![0 as u8; width * height * CHANNELS],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of bytes in one row.
    pub fn stride(&self) -> usize {
        self.width * CHANNELS
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} frame",
            x,
            y,
            self.width,
            self.height
        );
        (y * self.width + x) * CHANNELS
    }

    /// Stores `color` at column `x`, row `y`.  Panics if the pixel is
    /// outside the frame.
    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, color: PixelColor) {
        let offset = self.offset(x, y);
        self.pixels[offset..offset + CHANNELS].copy_from_slice(&color.to_rgba());
    }

    /// Reads back the pixel at column `x`, row `y`.
    pub fn get_pixel(&self, x: usize, y: usize) -> PixelColor {
        let offset = self.offset(x, y);
        let p = &self.pixels[offset..offset + CHANNELS];
        PixelColor {
            red: p[0],
            green: p[1],
            blue: p[2],
            alpha: p[3],
        }
    }

    /// The raw RGBA bytes, in the layout image encoders expect.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Splits the buffer into disjoint bands of `rows` whole rows
    /// each (the last band may be shorter), so that each band can be
    /// filled by a different thread.
    pub fn bands_mut(&mut self, rows: usize) -> ChunksMut<u8> {
        let stride = self.stride();
        self.pixels.chunks_mut(rows.max(1) * stride)
    }
}

/// Writes `color` into pixel `x` of a single row slice.
#[inline]
pub fn put_in_row(row: &mut [u8], x: usize, color: PixelColor) {
    let offset = x * CHANNELS;
    row[offset..offset + CHANNELS].copy_from_slice(&color.to_rgba());
}
