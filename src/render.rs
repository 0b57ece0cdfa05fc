// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fills a frame buffer with the escape-time picture of one window of
//! the complex plane.  Every pixel is independent of every other, so
//! the frame can be carved into bands of rows and each band handed to
//! its own thread without any locking: each thread owns its band of
//! the buffer outright for the life of the scope.

use crossbeam;
use itertools::iproduct;

use errors::ZoomError;
use escape::escape_time;
use frame::{put_in_row, FrameBuffer};
use palette::colorize;
use planes::{Pixel, PlaneMapper};

/// Renders one row of the window into a slice holding exactly that
/// row's RGBA bytes.
pub fn render_row(plane: &PlaneMapper, y: usize, limit: u32, row: &mut [u8]) {
    let ci = plane.row_im(y);
    for x in 0..plane.width() {
        let count = escape_time(plane.column_re(x), ci, limit);
        put_in_row(row, x, colorize(count, limit));
    }
}

/// The single-threaded renderer.  Visits every pixel once, top to
/// bottom and left to right.
pub fn render_single(plane: &PlaneMapper, limit: u32, frame: &mut FrameBuffer) {
    assert!(frame.width() == plane.width() && frame.height() == plane.height());
    for (y, x) in iproduct!(0..plane.height(), 0..plane.width()) {
        let c = plane.pixel_to_point(&Pixel(x, y));
        frame.put_pixel(x, y, colorize(escape_time(c.re, c.im, limit), limit));
    }
}

/// A multi-threaded version of the render function that takes a
/// thread count.  Produces exactly the same bytes as `render_single`.
pub fn render_threaded(
    plane: &PlaneMapper,
    limit: u32,
    frame: &mut FrameBuffer,
    threads: usize,
) -> Result<(), ZoomError> {
    assert!(frame.width() == plane.width() && frame.height() == plane.height());
    let zonesize = (plane.height() / threads.max(1)) + 1;
    let stride = frame.stride();
    let regions: Vec<&mut [u8]> = frame.bands_mut(zonesize).collect();
    crossbeam::scope(|spawner| {
        for (band, region) in regions.into_iter().enumerate() {
            let top = band * zonesize;
            spawner.spawn(move |_| {
                for (offset, row) in region.chunks_mut(stride).enumerate() {
                    render_row(plane, top + offset, limit, row);
                }
            });
        }
    })
    .map_err(|_| ZoomError::Thread)
}

/// Renders `plane` into `frame`, on `threads` threads if more than one
/// is asked for.
pub fn render(
    plane: &PlaneMapper,
    limit: u32,
    frame: &mut FrameBuffer,
    threads: usize,
) -> Result<(), ZoomError> {
    if threads > 1 {
        render_threaded(plane, limit, frame, threads)
    } else {
        render_single(plane, limit, frame);
        Ok(())
    }
}
