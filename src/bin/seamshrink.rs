// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use seamshrink::config::DEFAULT_MAX_FRAMES;
use seamshrink::{seamcarve, Backend, CarveConfig, PreviewConfig};
use std::fs;
use std::path::Path;
use std::process;

extern crate clap;
extern crate image;

use clap::{App, Arg, ArgMatches};
use failure::{bail, format_err, Error};
use image::{Rgb, RgbImage};
use log::{info, warn};

fn parse_u32(matches: &ArgMatches, name: &str) -> Result<Option<u32>, Error> {
    matches
        .value_of(name)
        .map(|v| {
            v.parse::<u32>()
                .map_err(|_| format_err!("--{} expects a whole number, got '{}'", name, v))
        })
        .transpose()
}

fn parse_highlight(value: &str) -> Result<Rgb<u8>, Error> {
    let channels = value
        .split(',')
        .map(|c| c.trim().parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| format_err!("--highlight expects R,G,B in 0-255, got '{}'", value))?;
    match channels.as_slice() {
        [r, g, b] => Ok(Rgb([*r, *g, *b])),
        _ => bail!("--highlight expects three channels, got '{}'", value),
    }
}

fn write_frames(dir: &Path, frames: &[seamshrink::PreviewFrame]) -> Result<(), Error> {
    fs::create_dir_all(dir)?;
    for frame in frames {
        frame
            .image
            .save(dir.join(format!("frame-{:05}.png", frame.step)))?;
    }
    info!("wrote {} preview frames to {}", frames.len(), dir.display());
    Ok(())
}

fn run() -> Result<(), Error> {
    let matches = App::new("seamshrink")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware narrowing of images by seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the carved image")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("width")
                .help("Target width in pixels")
                .short("w")
                .long("width")
                .value_name("W")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("height")
                .help("Target height; must match the source, only width is carved")
                .long("height")
                .value_name("H")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("preview")
                .help("Directory to write seam preview frames into")
                .short("p")
                .long("preview")
                .value_name("DIR")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("max-frames")
                .help("Most preview frames to capture")
                .long("max-frames")
                .value_name("K")
                .takes_value(true)
                .requires("preview"),
        )
        .arg(
            Arg::with_name("highlight")
                .help("Seam color in preview frames, as R,G,B")
                .long("highlight")
                .value_name("R,G,B")
                .takes_value(true)
                .requires("preview"),
        )
        .arg(
            Arg::with_name("verbose")
                .help("More logging; repeat for more")
                .short("v")
                .multiple(true),
        )
        .get_matches();

    let level = match matches.occurrences_of("verbose") {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let width = parse_u32(&matches, "width")?
        .ok_or_else(|| format_err!("--width is required"))?;
    let mut config = CarveConfig::new(Backend::BackwardEnergy);
    if matches.is_present("preview") {
        let mut preview = PreviewConfig::default();
        preview.max_frames = parse_u32(&matches, "max-frames")?.unwrap_or(DEFAULT_MAX_FRAMES);
        if let Some(color) = matches.value_of("highlight") {
            preview.highlight = parse_highlight(color)?;
        }
        config = config.with_preview(preview);
    }

    let input = matches.value_of("input").unwrap_or_default();
    let image: RgbImage = image::open(input)?.to_rgb();
    let height = parse_u32(&matches, "height")?.unwrap_or_else(|| image.height());
    if width >= image.width() {
        warn!(
            "{} is already {} wide; seam carving does not enlarge, writing it unchanged",
            input,
            image.width()
        );
    }

    let carved = seamcarve(&image, width, height, config)?;
    if let Some(dir) = matches.value_of("preview") {
        write_frames(Path::new(dir), &carved.frames)?;
    }
    carved.image.save(matches.value_of("output").unwrap_or_default())?;
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("seamshrink: {}", err);
        process::exit(1);
    }
}
