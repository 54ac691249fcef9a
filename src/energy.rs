// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! Given an image, calculate the backward energy of every pixel: the
//! image is reduced to luma (the `image` crate's Rec. 709 weighting),
//! and each pixel's energy is the magnitude of the Sobel gradient at
//! that point.  Pixels on the border borrow their missing neighbors by
//! clamping to the nearest row or column.  Values are never
//! normalized; the seam search only compares energies within a single
//! map.

use crate::cq;
use crate::errors::{CarveError, Result};
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, Pixel, Primitive};
use itertools::iproduct;
use num_traits::NumCast;

/// Per-pixel importance, same dimensions as the image it came from.
pub type EnergyGrid = TwoDimensionalMap<f64>;

// Image -> Luma map
fn luma_map<I, P, S>(image: &I) -> TwoDimensionalMap<f64>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    let mut luma = TwoDimensionalMap::new(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        let channel = image.get_pixel(x, y).to_luma().channels()[0];
        luma[(x, y)] = <f64 as NumCast>::from(channel).unwrap_or_default();
    }
    luma
}

// The 3x3 Sobel pair at a single point.  The clamped coordinates make
// the border rows and columns repeat themselves outward.
//
//      -1 0 +1        -1 -2 -1
//  Gx: -2 0 +2    Gy:  0  0  0
//      -1 0 +1        +1 +2 +1
fn sobel_magnitude(luma: &TwoDimensionalMap<f64>, x: u32, y: u32) -> f64 {
    let (mw, mh) = (luma.width - 1, luma.height - 1);
    let (left, right) = (cq!(x == 0, 0, x - 1), cq!(x >= mw, mw, x + 1));
    let (up, down) = (cq!(y == 0, 0, y - 1), cq!(y >= mh, mh, y + 1));
    let l = |x: u32, y: u32| luma[(x, y)];

    let gx = (l(right, up) + 2.0 * l(right, y) + l(right, down))
        - (l(left, up) + 2.0 * l(left, y) + l(left, down));
    let gy = (l(left, down) + 2.0 * l(x, down) + l(right, down))
        - (l(left, up) + 2.0 * l(x, up) + l(right, up));
    (gx * gx + gy * gy).sqrt()
}

#[cfg(not(feature = "threaded"))]
fn fill_energy(luma: &TwoDimensionalMap<f64>, emap: &mut EnergyGrid) {
    let (width, height) = emap.dimensions();
    for (y, x) in iproduct!(0..height, 0..width) {
        emap[(x, y)] = sobel_magnitude(luma, x, y);
    }
}

// Every pixel reads only the luma map, so the output can be broken
// into bands of whole rows and each band filled on its own thread.
#[cfg(feature = "threaded")]
fn fill_energy(luma: &TwoDimensionalMap<f64>, emap: &mut EnergyGrid) {
    let (width, height) = emap.dimensions();
    let workers = num_cpus::get().max(1);
    let rows = ((height as usize + workers - 1) / workers).max(1);

    let outcome = crossbeam::scope(|s| {
        for (band, chunk) in emap.bands_mut(rows).enumerate() {
            s.spawn(move |_| {
                let first_row = band * rows;
                for (i, cell) in chunk.iter_mut().enumerate() {
                    let x = (i % width as usize) as u32;
                    let y = (first_row + i / width as usize) as u32;
                    *cell = sobel_magnitude(luma, x, y);
                }
            });
        }
    });
    if let Err(panic) = outcome {
        std::panic::resume_unwind(panic);
    }
}

/// Compute the energy of every pixel in an image.  This is generic on
/// the image type; every pixel is reduced to its luma channel before
/// the gradient is taken.
pub fn calculate_energy<I, P, S>(image: &I) -> Result<EnergyGrid>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(CarveError::InvalidImage(format!(
            "cannot compute energy of a {}x{} image",
            width, height
        )));
    }

    let luma = luma_map(image);
    let mut emap = EnergyGrid::new(width, height);
    fill_energy(&luma, &mut emap);
    Ok(emap)
}
