// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Preview frames
//!
//! A long carve removes hundreds of seams; an animation of it only
//! needs a few dozen.  `sample_steps` picks which removal steps get a
//! frame, and `overlay_seam` draws the seam about to be removed onto a
//! copy of the image it will be removed from.

use crate::errors::Result;
use crate::seamremover::check_vertical_seam;
use image::{GenericImageView, ImageBuffer, Pixel, Primitive};

/// Choose up to `max_frames` of the steps `1..=seams`, evenly spaced,
/// always including the first step and (with two or more frames) the
/// last.  Steps are strictly increasing.
pub fn sample_steps(seams: u32, max_frames: u32) -> Vec<u32> {
    let samples = seams.min(max_frames);
    match samples {
        0 => vec![],
        1 => vec![1],
        _ => {
            // 1 + round(i * (seams - 1) / (samples - 1)), rounding half up,
            // kept in integers so every platform agrees.
            let (span, gaps) = (u64::from(seams - 1), u64::from(samples - 1));
            let mut steps: Vec<u32> = (0..u64::from(samples))
                .map(|i| 1 + ((2 * i * span + gaps) / (2 * gaps)) as u32)
                .collect();
            steps.dedup();
            steps
        }
    }
}

/// Return a copy of `image` with every pixel of `seam` painted in
/// `color`.
pub fn overlay_seam<I, P, S>(image: &I, seam: &[u32], color: P) -> Result<ImageBuffer<P, Vec<S>>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    check_vertical_seam(seam, (width, height))?;

    let mut frame = ImageBuffer::from_fn(width, height, |x, y| image.get_pixel(x, y));
    for (y, &x) in seam.iter().enumerate() {
        frame.put_pixel(x, y as u32, color);
    }
    Ok(frame)
}
