// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Maps escape counts to colours.
//!
//! Each channel rides its own triangle wave through the normalized
//! escape count.  The three waves run at different frequencies and
//! phases, so the bands never line up and the palette cycles through
//! a wide, non-monotonic range of hues as a zoom deepens.  Existing
//! video was rendered against these exact constants and this exact
//! truncation, so neither may change.

/// One RGBA pixel.  Everything this crate produces is opaque.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelColor {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha channel; always 255.
    pub alpha: u8,
}

impl PixelColor {
    /// The colour of points assumed to be inside the set.
    pub const IN_SET: PixelColor = PixelColor {
        red: 0,
        green: 0,
        blue: 0,
        alpha: 255,
    };

    /// The channels in the order the image encoder wants them.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

/// Triangle wave with period 2, ranging over [0, 1], with zigzag(0) = 0.
#[inline]
pub fn zigzag(v: f64) -> f64 {
    let y = v.abs() % 2.0;
    if y > 1.0 {
        2.0 - y
    } else {
        y
    }
}

// Scale to a channel; the cast truncates, it does not round.
#[inline]
fn channel(v: f64) -> u8 {
    (255.0 * zigzag(v)) as u8
}

/// Colour for a point that survived `count` of `limit` iterations.
#[inline]
pub fn colorize(count: u32, limit: u32) -> PixelColor {
    if count >= limit {
        return PixelColor::IN_SET;
    }
    let x = f64::from(count) / f64::from(limit - 1);
    PixelColor {
        red: channel(0.5 + 7.0 * x),
        green: channel(0.2 + 9.0 * x),
        blue: channel(0.7 + 11.0 * x),
        alpha: 255,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zigzag_is_a_triangle_wave() {
        assert_eq!(zigzag(0.0), 0.0);
        assert_eq!(zigzag(0.5), 0.5);
        assert_eq!(zigzag(1.0), 1.0);
        assert_eq!(zigzag(1.5), 0.5);
        assert_eq!(zigzag(2.0), 0.0);
        assert_eq!(zigzag(-0.5), 0.5);
        assert_eq!(zigzag(7.5), 0.5);
    }

    #[test]
    fn in_set_is_opaque_black() {
        for limit in &[2, 100, 16000] {
            assert_eq!(colorize(*limit, *limit), PixelColor::IN_SET);
            assert_eq!(colorize(*limit + 1, *limit), PixelColor::IN_SET);
        }
        assert_eq!(PixelColor::IN_SET.to_rgba(), [0, 0, 0, 255]);
    }

    #[test]
    fn channels_truncate_rather_than_round() {
        // 255 * 0.5 = 127.5 for red and 255 * 0.7 = 178.5 for blue.
        let c = colorize(0, 16000);
        assert_eq!(c.to_rgba(), [127, 51, 178, 255]);
    }

    #[test]
    fn first_and_last_escape_counts_differ() {
        let first = colorize(0, 16000);
        let last = colorize(15999, 16000);
        assert_ne!(first, last);
        assert_eq!(first.alpha, 255);
        assert_eq!(last.alpha, 255);
        // x = 1: red sits at zigzag(7.5) = 0.5 and blue at zigzag(11.7) ~ 0.3.
        assert_eq!(last.red, 127);
        assert_eq!(last.blue, 76);
    }

    #[test]
    fn every_escaped_count_is_opaque_and_deterministic() {
        let limit = 500;
        for count in 0..limit {
            let c = colorize(count, limit);
            assert_eq!(c.alpha, 255);
            assert_eq!(c, colorize(count, limit));
        }
    }
}
