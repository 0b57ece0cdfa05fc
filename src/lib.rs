#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot zoom renderer
//!
//! Renders the frames of a video that dives into the Mandelbrot set.
//! Each frame is an escape-time picture: for every pixel, the point of
//! the complex plane under it is iterated through `z = z² + c` until
//! it either escapes or runs out of iterations, and the iteration
//! count picks the pixel's colour.  Frames share a center point and
//! shrink geometrically, so that played back at a fixed rate the
//! magnification grows exponentially, from a window four units tall
//! on the first frame to one `zoom` times smaller on the last.
//!
//! ```no_run
//! extern crate mandelzoom;
//! extern crate num;
//!
//! use mandelzoom::{render_sequence, PngDirectory, ZoomConfig};
//! use num::Complex;
//!
//! let config = ZoomConfig::new(300, Complex::new(-0.743643887, 0.131825904), 1.0e6);
//! let mut sink = PngDirectory::new("frames").unwrap();
//! render_sequence(&config, &mut sink).unwrap();
//! ```

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

pub mod errors;
pub mod escape;
pub mod frame;
pub mod output;
pub mod palette;
pub mod planes;
pub mod render;
pub mod zoom;

pub use errors::ZoomError;
pub use escape::escape_time;
pub use frame::FrameBuffer;
pub use output::{frame_file_name, frame_name, FrameSink, PngDirectory};
pub use palette::{colorize, PixelColor};
pub use planes::PlaneMapper;
pub use zoom::{render_sequence, Frame, ZoomConfig, ZoomPlan, ZoomSequence};
