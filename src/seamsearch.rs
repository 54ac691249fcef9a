// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest vertical seam through an energy map
//!
//! The cost grid is built top to bottom: every cell holds its own
//! energy plus the cheapest of the (up to) three cells above it, and
//! the offset of the parent it came through.  The seam is then read
//! back from the cheapest cell of the bottom row by following offsets.
//!
//! Ties are always broken the same way.  Among the parents, straight
//! up wins, then up-left, then up-right.  Along the bottom row, the
//! leftmost cheapest column wins.

use crate::cq;
use crate::energy::EnergyGrid;
use crate::errors::{CarveError, Result};
use crate::twodmap::{EnergyAndOffset, TwoDimensionalMap};

type CostGrid = TwoDimensionalMap<EnergyAndOffset<f64>>;

// Preference order for the parent of every cell.
const PARENT_OFFSETS: [i8; 3] = [0, -1, 1];

// Given a cell not in the first row, pick the cheapest parent that
// actually exists.  Missing neighbors at the edges are skipped, not
// padded.
fn cheapest_parent(cost: &CostGrid, x: u32, y: u32) -> EnergyAndOffset<f64> {
    let max_width = cost.width - 1;
    let above = cost.row(y - 1);

    let mut best = EnergyAndOffset {
        energy: above[x as usize].energy,
        offset: 0,
    };
    for &offset in PARENT_OFFSETS[1..].iter() {
        let outside = cq!(offset < 0, x == 0, x == max_width);
        if outside {
            continue;
        }
        let candidate = above[(x as i64 + offset as i64) as usize].energy;
        if candidate < best.energy {
            best = EnergyAndOffset {
                energy: candidate,
                offset,
            };
        }
    }
    best
}

fn cumulative_cost(energy: &EnergyGrid) -> CostGrid {
    let (width, height) = energy.dimensions();
    let mut cost = CostGrid::new(width, height);

    // Populate the first row with their native energies.
    for x in 0..width {
        cost[(x, 0)].energy = energy[(x, 0)];
    }

    // Each row depends only on the one above it.
    for y in 1..height {
        for x in 0..width {
            let parent = cheapest_parent(&cost, x, y);
            cost[(x, y)] = EnergyAndOffset {
                energy: energy[(x, y)] + parent.energy,
                offset: parent.offset,
            };
        }
    }
    cost
}

/// Given an energy map, return the list of x-coordinates that, when
/// mapped with the range (0..height), give the XY coordinates for each
/// pixel in the seam to be removed.
pub fn energy_to_vertical_seam(energy: &EnergyGrid) -> Result<Vec<u32>> {
    if energy.is_empty() {
        return Err(CarveError::InvalidImage(format!(
            "cannot search a {}x{} energy map",
            energy.width, energy.height
        )));
    }
    let (width, height) = energy.dimensions();
    let cost = cumulative_cost(energy);

    // Find the x coordinate of the bottommost cell with the least
    // energy; a strict comparison keeps the leftmost one on a tie.
    let bottom = cost.row(height - 1);
    let mut seam_col = (1..width).fold(0, |best, x| {
        cq!(bottom[x as usize].energy < bottom[best as usize].energy, x, best)
    });

    // Working backwards, generate a vec of x coordinates that map to
    // the seam, reverse and return.
    let mut seam: Vec<u32> = (0..height)
        .rev()
        .fold(Vec::with_capacity(height as usize), |mut acc, y| {
            acc.push(seam_col);
            seam_col = (seam_col as i64 + cost[(seam_col, y)].offset as i64) as u32;
            acc
        });
    seam.reverse();
    Ok(seam)
}
