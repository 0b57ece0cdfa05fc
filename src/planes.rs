// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0 in
//! the upper-left corner, and a window on the complex plane defined
//! by its center and its vertical span.
use num::Complex;

use errors::ZoomError;

/// Describes the width and height of an integral plane that is assumed
/// to start at 0,0.  `y` grows downward, the way images are stored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the x, y of a point in an integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of an image onto a window of the complex plane.  The
/// center of the window lands on the center of the image, and the
/// horizontal span is derived from the vertical one so that pixels
/// stay square.  The first and last pixel of each row and column lie
/// exactly on the window's edges.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// Width and height of the image, in pixels.
    pub integral_plane: IntegralPlane,
    /// The point that lands on the middle of the image.
    pub center: Complex<f64>,
    // Horizontal and vertical extent of the window, in plane units.
    spans: (f64, f64),
    // The real part of the left column and the imaginary part of the
    // top row.
    origin: Complex<f64>,
    // Plane units per pixel, horizontally and vertically.
    deltas: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  The image must be at least two pixels in each
    /// direction, since the edges of the window are pinned to the
    /// first and last pixel.
    pub fn new(
        width: usize,
        height: usize,
        center: Complex<f64>,
        ver_span: f64,
    ) -> Result<PlaneMapper, ZoomError> {
        if width < 2 || height < 2 {
            return Err(ZoomError::InvalidConfig(format!(
                "image must be at least 2x2 pixels, got {}x{}",
                width, height
            )));
        }

        let hor_span = ver_span * ((width - 1) as f64) / ((height - 1) as f64);
        let origin = Complex::new(center.re - hor_span / 2.0, center.im + ver_span / 2.0);
        let deltas = (
            hor_span / ((width - 1) as f64),
            ver_span / ((height - 1) as f64),
        );

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            center,
            spans: (hor_span, ver_span),
            origin,
            deltas,
        })
    }

    /// Width of the image in pixels.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// Height of the image in pixels.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Height of the visible window in plane units.
    pub fn ver_span(&self) -> f64 {
        self.spans.1
    }

    /// Width of the visible window in plane units.
    pub fn hor_span(&self) -> f64 {
        self.spans.0
    }

    /// Real part of the points in column `x`.
    #[inline]
    pub fn column_re(&self, x: usize) -> f64 {
        self.origin.re + (x as f64) * self.deltas.0
    }

    /// Imaginary part of the points in row `y`.  Row 0 is the top of
    /// the image and has the largest imaginary part.
    #[inline]
    pub fn row_im(&self, y: usize) -> f64 {
        self.origin.im - (y as f64) * self.deltas.1
    }

    /// Given a pixel on the integral plane, return the point of the
    /// complex plane it samples.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(self.column_re(pixel.0), self.row_im(pixel.1))
    }
}
