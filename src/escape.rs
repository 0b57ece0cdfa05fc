// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time evaluator.  Everything else in the crate exists to
//! call this function a great many times.

/// The squared radius beyond which an orbit counts as escaped.  Not
/// 4.0: existing renders were made against this value and changing it
/// changes pixels along the boundary.
pub const ESCAPE_RADIUS_SQUARED: f64 = 4.001;

/// Iterates `z = z² + c` from `z = 0` for the point `c = cr + ci·i`
/// and returns the number of iterations completed before `|z|²`
/// reached the escape radius, or `limit` if it never did.
///
/// The squares of both components are carried between iterations so
/// each step costs three multiplications instead of five.
#[inline]
pub fn escape_time(cr: f64, ci: f64, limit: u32) -> u32 {
    let (mut zr, mut zi) = (0.0_f64, 0.0_f64);
    let (mut zr2, mut zi2) = (0.0_f64, 0.0_f64);
    let mut count = 0;
    while count < limit && zr2 + zi2 < ESCAPE_RADIUS_SQUARED {
        zi = 2.0 * zr * zi + ci;
        zr = zr2 - zi2 + cr;
        zr2 = zr * zr;
        zi2 = zi * zi;
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        for limit in &[1, 2, 17, 1000, 16000] {
            assert_eq!(escape_time(0.0, 0.0, *limit), *limit);
        }
    }

    #[test]
    fn main_cardioid_point_reaches_the_limit() {
        assert_eq!(escape_time(-0.5, 0.0, 16000), 16000);
    }

    #[test]
    fn boundary_uses_the_widened_radius() {
        // z1 = 2 gives |z|² = 4.0, which is still inside 4.001.
        assert_eq!(escape_time(2.0, 0.0, 16000), 2);
        assert_eq!(escape_time(2.1, 0.0, 16000), 1);
        assert_eq!(escape_time(0.0, 2.001, 16000), 1);
    }

    #[test]
    fn far_points_escape_after_one_iteration() {
        assert_eq!(escape_time(10.0, -10.0, 16000), 1);
        assert_eq!(escape_time(-3.0, 0.0, 5), 1);
    }

    #[test]
    fn count_never_exceeds_limit() {
        let limit = 64;
        let mut re = -2.5;
        while re < 1.5 {
            let mut im = -1.5;
            while im < 1.5 {
                let count = escape_time(re, im, limit);
                assert!(count <= limit);
                im += 0.0625;
            }
            re += 0.0625;
        }
    }

    #[test]
    fn period_two_bulb_stays_bounded() {
        assert_eq!(escape_time(-1.0, 0.0, 5000), 5000);
    }

    #[test]
    fn escape_matches_a_direct_orbit() {
        // c = 0.5 escapes on its fifth iterate: 0.5, 0.75, 1.0625, 1.6289, 3.153
        assert_eq!(escape_time(0.5, 0.0, 100), 5);
    }
}
