// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate mandelzoom;
extern crate num;
extern crate num_cpus;

use clap::{App, AppSettings, Arg, ArgMatches};
use mandelzoom::zoom::{DEFAULT_HEIGHT, DEFAULT_ITERATIONS, DEFAULT_WIDTH};
use mandelzoom::{render_sequence, PngDirectory, ZoomConfig, ZoomError};
use num::Complex;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_finite(s: &str, err: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(v) if v.is_finite() => Ok(()),
        _ => Err(err.to_string()),
    }
}

const OUTDIR: &str = "outdir";
const FRAMES: &str = "frames";
const XCENTER: &str = "xcenter";
const YCENTER: &str = "ycenter";
const ZOOM: &str = "zoom";
const SIZE: &str = "size";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";

fn args<'a>(default_size: &'a str, default_iterations: &'a str) -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelzoom")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Renders the frames of a zoom into the Mandelbrot set as PNG files")
        .setting(AppSettings::AllowNegativeNumbers)
        .arg(
            Arg::with_name(OUTDIR)
                .required(true)
                .index(1)
                .help("Directory to receive the output PNG files"),
        )
        .arg(
            Arg::with_name(FRAMES)
                .required(true)
                .index(2)
                .validator(|s| {
                    validate_range(
                        &s,
                        2,
                        1_000_000,
                        "Could not parse frame count",
                        "Frame count must be between 2 and 1000000",
                    )
                })
                .help("Number of frames in the video"),
        )
        .arg(
            Arg::with_name(XCENTER)
                .required(true)
                .index(3)
                .validator(|s| validate_finite(&s, "Could not parse real part of the center"))
                .help("Real component of the zoom center point"),
        )
        .arg(
            Arg::with_name(YCENTER)
                .required(true)
                .index(4)
                .validator(|s| validate_finite(&s, "Could not parse imaginary part of the center"))
                .help("Imaginary component of the zoom center point"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(true)
                .index(5)
                .validator(|s| {
                    validate_range(
                        &s,
                        1.0,
                        ::std::f64::MAX,
                        "Could not parse zoom factor",
                        "Zoom factor must be at least 1.0",
                    )
                })
                .help("Magnification of the final frame"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value(default_size)
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of each frame, WIDTHxHEIGHT"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value(default_iterations)
                .validator(move |s| {
                    validate_range(
                        &s,
                        2,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 2 and 1000000",
                    )
                })
                .help("Iteration limit for each point"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to render each frame with"),
        )
        .get_matches()
}

// Every value has already passed its validator, so parse failures here
// are reported rather than expected.
fn config(matches: &ArgMatches) -> Result<ZoomConfig, ZoomError> {
    fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, ZoomError> {
        matches
            .value_of(name)
            .and_then(|s| T::from_str(s).ok())
            .ok_or_else(|| ZoomError::InvalidConfig(format!("could not parse {}", name)))
    }

    let (width, height): (usize, usize) = matches
        .value_of(SIZE)
        .and_then(|s| parse_pair(s, 'x'))
        .ok_or_else(|| ZoomError::InvalidConfig("could not parse size".to_string()))?;

    Ok(ZoomConfig {
        width,
        height,
        frames: value(matches, FRAMES)?,
        center: Complex::new(value(matches, XCENTER)?, value(matches, YCENTER)?),
        zoom: value(matches, ZOOM)?,
        iterations: value(matches, ITERATIONS)?,
        threads: value(matches, THREADS)?,
    })
}

fn run(matches: &ArgMatches) -> Result<usize, ZoomError> {
    let config = config(matches)?;
    let outdir = matches.value_of(OUTDIR).unwrap_or(".");
    let mut sink = PngDirectory::new(outdir)?;
    render_sequence(&config, &mut sink)
}

fn main() {
    env_logger::init();
    let default_size = format!("{}x{}", DEFAULT_WIDTH, DEFAULT_HEIGHT);
    let default_iterations = DEFAULT_ITERATIONS.to_string();
    let matches = args(&default_size, &default_iterations);

    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
