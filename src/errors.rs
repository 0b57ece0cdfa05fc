// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The error type shared by every stage of the zoom pipeline.

use std::io;

/// Everything that can stop a zoom from being rendered.  The numeric
/// core itself cannot fail; errors come either from a configuration
/// that breaks one of the geometry's preconditions, or from the
/// collaborator that writes frames out.
#[derive(Debug, Fail)]
pub enum ZoomError {
    /// The configuration would divide by zero or otherwise produce
    /// nonsense.  Raised before the first frame is rendered.
    #[fail(display = "Invalid configuration: {}", _0)]
    InvalidConfig(String),

    /// The frame sink could not write a frame.  The sequence stops
    /// here; frames after `index` are never rendered.
    #[fail(display = "Could not encode frame {}: {}", index, cause)]
    Encoding {
        /// Index of the frame that failed.
        index: usize,
        /// What the encoder reported.
        #[cause]
        cause: io::Error,
    },

    /// Preparing the output location failed.
    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] io::Error),

    /// One of the band-rendering threads panicked.
    #[fail(display = "A render thread panicked")]
    Thread,
}

impl From<io::Error> for ZoomError {
    fn from(err: io::Error) -> ZoomError {
        ZoomError::Io(err)
    }
}
