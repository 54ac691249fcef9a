// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware narrowing of images.
//!
//! The width of an image is reduced one seam at a time: a connected
//! top-to-bottom path of pixels whose total energy is the lowest in
//! the image.  Energy is recomputed after every removal.

mod ternary;

pub mod config;
pub mod energy;
pub mod errors;
pub mod preview;
pub mod seamcarver;
pub mod seamfinder;
pub mod seamremover;
pub mod seamsearch;
pub mod twodmap;

pub use config::{Backend, CarveConfig, PreviewConfig};
pub use energy::{calculate_energy, EnergyGrid};
pub use errors::{CarveError, Result};
pub use preview::{overlay_seam, sample_steps};
pub use seamcarver::{seamcarve, CancelFlag, Carved, PreviewFrame, SeamCarver};
pub use seamfinder::{BackwardEnergy, SeamFinder};
pub use seamremover::remove_vertical_seam;
pub use seamsearch::energy_to_vertical_seam;
