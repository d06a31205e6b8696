// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate image;
#[macro_use]
extern crate log;
extern crate num;
extern crate xfracts;

use clap::{App, Arg, ArgMatches};
use image::png::PNGEncoder;
use image::ColorType;
use num::Complex;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use xfracts::{shader, FractalKernel, PaletteId, RenderState, PRESETS};

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

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
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

fn validate_scale(s: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(scale) if scale > 0.0 && scale.is_finite() => Ok(()),
        _ => Err("Scale must be a positive number".to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const FRACTAL: &str = "fractal";
const PALETTE: &str = "palette";
const CENTER: &str = "center";
const SCALE: &str = "scale";
const SHADER: &str = "shader";

fn args<'a>() -> ArgMatches<'a> {
    let last_preset = PRESETS.len() - 1;
    let catalog: Vec<String> = PRESETS
        .iter()
        .enumerate()
        .map(|(i, kernel)| format!("{}={}", i, kernel))
        .collect();

    App::new("xfracts")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot and Julia set renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required_unless(SHADER)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output PNG file"),
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
            Arg::with_name(FRACTAL)
                .required(false)
                .long(FRACTAL)
                .short("f")
                .takes_value(true)
                .default_value("0")
                .validator(move |s| {
                    validate_range(
                        &s,
                        0,
                        last_preset,
                        "Could not parse fractal preset",
                        &format!("Fractal preset must be between 0 and {}", last_preset),
                    )
                })
                .help(&format!("Fractal preset: {}", catalog.join(", "))),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .default_value("0")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        PaletteId::ALL.len() - 1,
                        "Could not parse palette id",
                        "Palette id must be between 0 and 3",
                    )
                })
                .help("Color palette"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center"))
                .help("Center offset of the view (defaults to the fractal's own)"),
        )
        .arg(
            Arg::with_name(SCALE)
                .required(false)
                .long(SCALE)
                .short("z")
                .takes_value(true)
                .validator(|s| validate_scale(&s))
                .help("Height of the view on the complex plane (defaults to the fractal's own)"),
        )
        .arg(
            Arg::with_name(SHADER)
                .long(SHADER)
                .help("Print the GPU fragment program for the fractal instead of rendering"),
        )
        .get_matches()
}

fn write_image(outfile: &str, pixels: &[u8], bounds: (u32, u32)) -> Result<(), std::io::Error> {
    let path = Path::new(outfile);
    let output = File::create(&path)?;
    let encoder = PNGEncoder::new(output);
    encoder.encode(pixels, bounds.0, bounds.1, ColorType::RGBA(8))?;
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let index = usize::from_str(matches.value_of(FRACTAL).unwrap_or("0"))?;
    let kernel = FractalKernel::preset(index)?;

    if matches.is_present(SHADER) {
        print!("{}", shader::fragment_shader(&kernel));
        return Ok(());
    }

    let (width, height) = parse_pair::<u16>(matches.value_of(SIZE).unwrap_or("800x600"), 'x')
        .map(|(w, h)| (u32::from(w), u32::from(h)))
        .ok_or_else(|| failure::err_msg("Error parsing image dimensions"))?;
    let palette = PaletteId::from_index(usize::from_str(
        matches.value_of(PALETTE).unwrap_or("0"),
    )?)?;

    let mut state = RenderState::new(kernel, palette, width, height)?;
    let center = match matches.value_of(CENTER) {
        Some(c) => parse_complex(c).ok_or_else(|| failure::err_msg("Error parsing center"))?,
        None => kernel.initial_center(),
    };
    let scale = match matches.value_of(SCALE) {
        Some(s) => f64::from_str(s)?,
        None => kernel.initial_scale(),
    };
    state.look_at(center, scale)?;

    info!(
        "rendering {} with palette {} at {}x{}, center {}, scale {}",
        kernel, palette, width, height, center, scale
    );
    let pixels = state.render()?;
    let bytes: Vec<u8> = pixels.iter().flat_map(|p| p.to_le_bytes().to_vec()).collect();

    let outfile = matches
        .value_of(OUTPUT)
        .ok_or_else(|| failure::err_msg("No output file given"))?;
    write_image(outfile, &bytes, (width, height))?;
    info!("wrote {}", outfile);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
