// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::config::Backend;
use crate::energy::calculate_energy;
use crate::errors::Result;
use crate::seamsearch::energy_to_vertical_seam;
use image::{GenericImageView, Pixel, Primitive};

/// This trait defines how we will return seams from an image.  It's a
/// primitive interface, just enough to make room for multiple seam
/// carvers as well as caching.
pub trait SeamFinder {
    /// Once a SeamFinder has an image (or whatever it needs to make a
    /// rational decision), request a top-to-bottom seam.
    fn find_vertical_seam(&self) -> Result<Vec<u32>>;
}

/// The basic seam engine: backward energy (Sobel magnitude) and the
/// dynamic-programming search over it.
pub struct BackwardEnergy<'a, I> {
    image: &'a I,
}

impl<'a, I> BackwardEnergy<'a, I> {
    /// Takes a reference to an image, and holds onto it.
    pub fn new(image: &'a I) -> Self {
        BackwardEnergy { image }
    }
}

impl<'a, I, P, S> SeamFinder for BackwardEnergy<'a, I>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    fn find_vertical_seam(&self) -> Result<Vec<u32>> {
        energy_to_vertical_seam(&calculate_energy(self.image)?)
    }
}

impl Backend {
    /// Build the seam finder this backend names for one image.
    pub fn finder<'a, I, P, S>(self, image: &'a I) -> Box<dyn SeamFinder + 'a>
    where
        I: GenericImageView<Pixel = P>,
        P: Pixel<Subpixel = S> + 'static,
        S: Primitive + 'static,
    {
        match self {
            Backend::BackwardEnergy => Box::new(BackwardEnergy::new(image)),
        }
    }
}
