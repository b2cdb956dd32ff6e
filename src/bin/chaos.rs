// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate chaosbrot;
extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate image;
#[macro_use]
extern crate log;
extern crate num;

use chaosbrot::{serial, EscapeFormula, Mode, Point, RenderSettings, Renderer, MAX_INTENSITY};
use clap::{App, Arg, ArgMatches};
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use num::clamp;
use std::fs::File;
use std::path::Path;
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

fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, failure::Error> {
    let raw = matches
        .value_of(name)
        .ok_or_else(|| failure::err_msg(format!("missing {}", name)))?;
    T::from_str(raw).map_err(|_| failure::err_msg(format!("could not parse {} '{}'", name, raw)))
}

const INPUT: &str = "input";
const OUTPUT: &str = "output";
const SIZE: &str = "size";
const STEPS: &str = "steps";
const MODE: &str = "mode";
const FORMULA: &str = "formula";
const ITERATIONS: &str = "iterations";
const RADIUS: &str = "radius";
const ZOOM: &str = "zoom";
const PAN: &str = "pan";
const SEED: &str = "seed";

fn args<'a>() -> ArgMatches<'a> {
    App::new("chaos")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Chaos game and escape-time fractal renderer")
        .arg(
            Arg::with_name(INPUT)
                .required(true)
                .index(1)
                .help("Fractal description file"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (binary PGM)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(STEPS)
                .required(false)
                .long(STEPS)
                .short("n")
                .takes_value(true)
                .default_value("100000")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        100_000_000,
                        "Could not parse step count",
                        "Step count must be between 0 and 100000000",
                    )
                })
                .help("Number of chaos game steps"),
        )
        .arg(
            Arg::with_name(MODE)
                .required(false)
                .long(MODE)
                .short("m")
                .takes_value(true)
                .default_value("auto")
                .possible_values(&["auto", "walk", "escape"])
                .help("Walk the attractor, or render escape times per pixel"),
        )
        .arg(
            Arg::with_name(FORMULA)
                .required(false)
                .long(FORMULA)
                .short("f")
                .takes_value(true)
                .default_value("julia")
                .possible_values(&["julia", "mandelbrot"])
                .help("Escape-time iteration"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("300")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        200_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 200000",
                    )
                })
                .help("Escape-time iteration limit"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .required(false)
                .long(RADIUS)
                .short("r")
                .takes_value(true)
                .default_value("2")
                .validator(|s| {
                    validate_range(
                        &s,
                        ::std::f64::MIN_POSITIVE,
                        1.0e150,
                        "Could not parse escape radius",
                        "Escape radius must be positive",
                    )
                })
                .help("Escape-time escape radius"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        -0.999_999,
                        1.0e6,
                        "Could not parse zoom",
                        "Zoom must be greater than -1",
                    )
                })
                .help("Zoom before rendering; positive widens, negative narrows"),
        )
        .arg(
            Arg::with_name(PAN)
                .required(false)
                .long(PAN)
                .short("p")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse pan vector"))
                .help("Pan before rendering, as x,y percent of the view"),
        )
        .arg(
            Arg::with_name(SEED)
                .required(false)
                .long(SEED)
                .takes_value(true)
                .validator(|s| match u64::from_str(&s) {
                    Ok(_) => Ok(()),
                    Err(_) => Err("Could not parse seed".to_string()),
                })
                .help("Seed for the chaos game"),
        )
        .get_matches()
}

fn settings(matches: &ArgMatches) -> Result<RenderSettings, failure::Error> {
    let size = matches.value_of(SIZE).unwrap_or("800x600");
    let (width, height) = parse_pair::<usize>(size, 'x')
        .ok_or_else(|| failure::err_msg(format!("could not parse image size '{}'", size)))?;
    let radius: f64 = value(matches, RADIUS)?;
    let seed = match matches.value_of(SEED) {
        Some(_) => Some(value::<u64>(matches, SEED)?),
        None => None,
    };

    Ok(RenderSettings {
        width,
        height,
        mode: value::<Mode>(matches, MODE)?,
        formula: value::<EscapeFormula>(matches, FORMULA)?,
        max_iterations: value(matches, ITERATIONS)?,
        escape_radius_squared: radius * radius,
        seed,
    })
}

fn write_image(outfile: &str, pixels: &[u8], bounds: (usize, usize)) -> Result<(), std::io::Error> {
    let path = Path::new(outfile);
    let output = File::create(&path)?;
    let mut encoder =
        PNMEncoder::new(output).with_subtype(PNMSubtype::Graymap(SampleEncoding::Binary));
    encoder.encode(pixels, bounds.0 as u32, bounds.1 as u32, ColorType::Gray(8))?;
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let settings = settings(matches)?;
    let input = matches
        .value_of(INPUT)
        .ok_or_else(|| failure::err_msg("missing input file"))?;
    let description = serial::load(input)?;
    info!(
        "loaded {} description with {} transforms from {}",
        description.kind(),
        description.transforms().len(),
        input
    );

    let mut renderer = Renderer::new(description, &settings)?;
    if matches.is_present(ZOOM) {
        renderer.zoom(value(matches, ZOOM)?)?;
    }
    if let Some(pan) = matches.value_of(PAN) {
        let (x, y) = parse_pair::<f64>(pan, ',')
            .ok_or_else(|| failure::err_msg(format!("could not parse pan vector '{}'", pan)))?;
        renderer.pan(Point::new(x, y))?;
    }
    renderer.render(value(matches, STEPS)?)?;

    let grid = renderer.grid();
    let pixels: Vec<u8> = grid
        .buffer()
        .iter()
        .map(|&s| clamp((s * 255) / MAX_INTENSITY, 0, 255) as u8)
        .collect();
    let output = matches
        .value_of(OUTPUT)
        .ok_or_else(|| failure::err_msg("missing output file"))?;
    write_image(output, &pixels, (grid.width(), grid.height()))?;
    info!("wrote {}x{} image to {}", grid.width(), grid.height(), output);
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
