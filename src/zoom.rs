// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The zoom driver.  A zoom is a geometric progression of windows, all
//! centered on the same point, starting from a window four units tall
//! and ending at one `zoom` times smaller.  Each frame's window is a
//! function of nothing but the frame's place in that progression, so
//! the only state carried from frame to frame is the running
//! magnification.

use num::Complex;

use errors::ZoomError;
use frame::FrameBuffer;
use output::FrameSink;
use planes::PlaneMapper;
use render::render;

/// Height of the unzoomed window, in plane units.
pub const BASE_SPAN: f64 = 4.0;

/// Image width used when none is given.
pub const DEFAULT_WIDTH: usize = 1280;
/// Image height used when none is given.
pub const DEFAULT_HEIGHT: usize = 720;
/// Iteration limit used when none is given.
pub const DEFAULT_ITERATIONS: u32 = 16000;

/// Everything needed to render a zoom.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZoomConfig {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Number of frames in the zoom, including the first and last.
    pub frames: usize,
    /// The point that stays at the center of every frame.
    pub center: Complex<f64>,
    /// Magnification of the last frame relative to the first.
    pub zoom: f64,
    /// Iteration limit for the escape-time test.
    pub iterations: u32,
    /// Threads used to render each frame.
    pub threads: usize,
}

impl ZoomConfig {
    /// A zoom at the default size and iteration limit, rendered on one
    /// thread.
    pub fn new(frames: usize, center: Complex<f64>, zoom: f64) -> ZoomConfig {
        ZoomConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            frames,
            center,
            zoom,
            iterations: DEFAULT_ITERATIONS,
            threads: 1,
        }
    }

    /// Checks every precondition the geometry and the palette rely on:
    /// each of `width - 1`, `height - 1`, `frames - 1` and
    /// `iterations - 1` is used as a divisor.
    pub fn validate(&self) -> Result<(), ZoomError> {
        let invalid = |msg: String| Err(ZoomError::InvalidConfig(msg));
        if self.width < 2 || self.height < 2 {
            return invalid(format!(
                "image must be at least 2x2 pixels, got {}x{}",
                self.width, self.height
            ));
        }
        if self.frames < 2 {
            return invalid(format!("frame count must be at least 2, got {}", self.frames));
        }
        if !(self.zoom.is_finite() && self.zoom >= 1.0) {
            return invalid(format!("zoom must be a finite value >= 1.0, got {}", self.zoom));
        }
        if !(self.center.re.is_finite() && self.center.im.is_finite()) {
            return invalid(format!("center must be finite, got {}", self.center));
        }
        if self.iterations < 2 {
            return invalid(format!(
                "iteration limit must be at least 2, got {}",
                self.iterations
            ));
        }
        if self.threads == 0 {
            return invalid("thread count must be at least 1".to_string());
        }
        Ok(())
    }

    /// Per-frame growth in magnification.
    pub fn multiplier(&self) -> f64 {
        self.zoom.powf(1.0 / ((self.frames - 1) as f64))
    }
}

/// The geometry of a zoom, one window per frame, without rendering
/// anything.
#[derive(Debug)]
pub struct ZoomPlan {
    width: usize,
    height: usize,
    center: Complex<f64>,
    frames: usize,
    multiplier: f64,
    denom: f64,
    index: usize,
}

impl ZoomPlan {
    /// Validates `config` and starts the plan at the unzoomed frame.
    pub fn new(config: &ZoomConfig) -> Result<ZoomPlan, ZoomError> {
        config.validate()?;
        Ok(ZoomPlan {
            width: config.width,
            height: config.height,
            center: config.center,
            frames: config.frames,
            multiplier: config.multiplier(),
            denom: 1.0,
            index: 0,
        })
    }
}

impl Iterator for ZoomPlan {
    type Item = (usize, PlaneMapper);

    fn next(&mut self) -> Option<(usize, PlaneMapper)> {
        if self.index >= self.frames {
            return None;
        }
        let index = self.index;
        // Dimensions were validated in new(), so this cannot fail.
        let plane = PlaneMapper::new(self.width, self.height, self.center, BASE_SPAN / self.denom)
            .ok()?;
        debug!(
            "frame {}: denom={} ver_span={} hor_span={}",
            index,
            self.denom,
            plane.ver_span(),
            plane.hor_span()
        );
        self.denom *= self.multiplier;
        self.index += 1;
        Some((index, plane))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.frames - self.index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for ZoomPlan {}

/// One rendered frame of a zoom.
#[derive(Debug)]
pub struct Frame {
    /// Position of the frame in the zoom, starting at zero.
    pub index: usize,
    /// The window of the plane the frame shows.
    pub plane: PlaneMapper,
    /// The rendered pixels.
    pub buffer: FrameBuffer,
}

/// Renders the frames of a zoom one at a time, in order.
#[derive(Debug)]
pub struct ZoomSequence {
    plan: ZoomPlan,
    iterations: u32,
    threads: usize,
}

impl ZoomSequence {
    /// Validates `config`; nothing is rendered until the sequence is
    /// iterated.
    pub fn new(config: &ZoomConfig) -> Result<ZoomSequence, ZoomError> {
        Ok(ZoomSequence {
            plan: ZoomPlan::new(config)?,
            iterations: config.iterations,
            threads: config.threads,
        })
    }
}

impl Iterator for ZoomSequence {
    type Item = Result<Frame, ZoomError>;

    fn next(&mut self) -> Option<Result<Frame, ZoomError>> {
        let (index, plane) = self.plan.next()?;
        let mut buffer = FrameBuffer::new(plane.width(), plane.height());
        Some(
            render(&plane, self.iterations, &mut buffer, self.threads).map(|_| Frame {
                index,
                plane,
                buffer,
            }),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.plan.size_hint()
    }
}

/// Renders every frame of the zoom and hands each to `sink`, stopping
/// at the first frame the sink cannot write.  Returns the number of
/// frames written.
pub fn render_sequence<S: FrameSink>(config: &ZoomConfig, sink: &mut S) -> Result<usize, ZoomError> {
    let sequence = ZoomSequence::new(config)?;
    info!(
        "rendering {} frames of {}x{} toward {} at {}x, {} iterations, {} thread(s)",
        config.frames,
        config.width,
        config.height,
        config.center,
        config.zoom,
        config.iterations,
        config.threads
    );
    let mut written = 0;
    for frame in sequence {
        let frame = frame?;
        if let Err(e) = sink.write_frame(frame.index, &frame.buffer) {
            error!("frame {} failed: {}", frame.index, e);
            return Err(e);
        }
        info!("frame {} of {} done", frame.index + 1, config.frames);
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use output::MemorySink;
    use std::io;

    fn relative_error(a: f64, b: f64) -> f64 {
        ((a - b) / b).abs()
    }

    fn small(frames: usize, zoom: f64) -> ZoomConfig {
        ZoomConfig {
            width: 16,
            height: 9,
            iterations: 64,
            ..ZoomConfig::new(frames, Complex::new(-0.75, 0.1), zoom)
        }
    }

    #[test]
    fn defaults_match_the_reference_renders() {
        let cfg = ZoomConfig::new(10, Complex::new(0.0, 0.0), 2.0);
        assert_eq!((cfg.width, cfg.height, cfg.iterations), (1280, 720, 16000));
        assert_eq!(cfg.threads, 1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn preconditions_are_rejected() {
        let good = small(3, 10.0);
        let bad = vec![
            ZoomConfig { frames: 1, ..good },
            ZoomConfig { frames: 0, ..good },
            ZoomConfig { zoom: 0.5, ..good },
            ZoomConfig {
                zoom: ::std::f64::NAN,
                ..good
            },
            ZoomConfig { width: 1, ..good },
            ZoomConfig { height: 0, ..good },
            ZoomConfig {
                iterations: 1,
                ..good
            },
            ZoomConfig { threads: 0, ..good },
            ZoomConfig {
                center: Complex::new(::std::f64::INFINITY, 0.0),
                ..good
            },
        ];
        for cfg in bad {
            match ZoomSequence::new(&cfg) {
                Err(ZoomError::InvalidConfig(_)) => (),
                other => panic!("{:?} accepted: {:?}", cfg, other.map(|_| ())),
            }
        }
    }

    #[test]
    fn reference_two_frame_zoom_spans() {
        let cfg = ZoomConfig::new(2, Complex::new(-0.5, 0.0), 4.0);
        let spans: Vec<f64> = ZoomPlan::new(&cfg)
            .unwrap()
            .map(|(_, plane)| plane.ver_span())
            .collect();
        assert_eq!(spans, vec![4.0, 1.0]);
    }

    #[test]
    fn first_and_last_frames_hit_the_ends_of_the_zoom() {
        for &(frames, zoom) in &[(2, 1.0), (30, 1000.0), (301, 1.0e12), (7, 3.0)] {
            let cfg = small(frames, zoom);
            let planes: Vec<(usize, PlaneMapper)> = ZoomPlan::new(&cfg).unwrap().collect();
            assert_eq!(planes.len(), frames);
            assert_eq!(planes[0].1.ver_span(), BASE_SPAN);
            let last = planes[frames - 1].1.ver_span();
            assert!(relative_error(last, BASE_SPAN / zoom) < 1e-9);
        }
    }

    #[test]
    fn spans_shrink_geometrically() {
        let cfg = small(5, 16.0);
        let spans: Vec<f64> = ZoomPlan::new(&cfg)
            .unwrap()
            .map(|(_, plane)| plane.ver_span())
            .collect();
        for pair in spans.windows(2) {
            assert!(relative_error(pair[0] / pair[1], 2.0) < 1e-12);
        }
    }

    #[test]
    fn every_frame_keeps_the_center() {
        let cfg = small(4, 100.0);
        for (_, plane) in ZoomPlan::new(&cfg).unwrap() {
            assert_eq!(plane.center, cfg.center);
        }
    }

    #[test]
    fn sequence_yields_every_frame_in_order() {
        let cfg = small(4, 8.0);
        let sequence = ZoomSequence::new(&cfg).unwrap();
        assert_eq!(sequence.size_hint(), (4, Some(4)));
        let indexes: Vec<usize> = sequence.map(|f| f.unwrap().index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn threaded_sequence_matches_single() {
        let single: Vec<FrameBuffer> = ZoomSequence::new(&small(3, 50.0))
            .unwrap()
            .map(|f| f.unwrap().buffer)
            .collect();
        let threaded: Vec<FrameBuffer> = ZoomSequence::new(&ZoomConfig {
            threads: 3,
            ..small(3, 50.0)
        })
        .unwrap()
        .map(|f| f.unwrap().buffer)
        .collect();
        assert_eq!(single, threaded);
    }

    #[test]
    fn render_sequence_writes_every_frame() {
        let mut sink = MemorySink::default();
        let written = render_sequence(&small(3, 4.0), &mut sink).unwrap();
        assert_eq!(written, 3);
        assert_eq!(sink.frames.len(), 3);
        assert_eq!(sink.frames[2].0, 2);
    }

    #[test]
    fn render_sequence_stops_at_the_first_failure() {
        let mut sink = MemorySink {
            fail_at: Some(1),
            ..MemorySink::default()
        };
        match render_sequence(&small(5, 4.0), &mut sink) {
            Err(ZoomError::Encoding { index, cause }) => {
                assert_eq!(index, 1);
                assert_eq!(cause.kind(), io::ErrorKind::Other);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(sink.frames.len(), 1);
    }

    #[test]
    fn invalid_config_renders_nothing() {
        let mut sink = MemorySink::default();
        assert!(render_sequence(&small(1, 4.0), &mut sink).is_err());
        assert!(sink.frames.is_empty());
    }
}
