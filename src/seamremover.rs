// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Remove a vertical seam from an image
//!
//! The source image is only read; the narrower result is always a
//! freshly allocated buffer, so the caller can keep using the original
//! (for instance, to draw the seam on it).

use crate::errors::{CarveError, Result};
use image::{GenericImageView, ImageBuffer, Pixel, Primitive};

/// Confirm that a seam can be cut out of an image of the given
/// dimensions: one column per row, every column inside the image.
pub fn check_vertical_seam(seam: &[u32], (width, height): (u32, u32)) -> Result<()> {
    if seam.len() != height as usize {
        return Err(CarveError::SeamMismatch(format!(
            "seam has {} rows, image has {}",
            seam.len(),
            height
        )));
    }
    match seam.iter().enumerate().find(|(_, x)| **x >= width) {
        Some((y, x)) => Err(CarveError::SeamMismatch(format!(
            "seam column {} on row {} is outside an image {} wide",
            x, y, width
        ))),
        None => Ok(()),
    }
}

/// Given an image and a seam, return a copy of the image one pixel
/// narrower.  On every row the pixel under the seam is dropped and
/// everything to its right moves one column left.
pub fn remove_vertical_seam<I, P, S>(image: &I, seam: &[u32]) -> Result<ImageBuffer<P, Vec<S>>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(CarveError::InvalidImage(format!(
            "cannot remove a seam from a {}x{} image",
            width, height
        )));
    }
    check_vertical_seam(seam, (width, height))?;

    let mut imgbuf = ImageBuffer::new(width - 1, height);
    for (y, &cut) in (0..height).zip(seam.iter()) {
        for x in (0..width).filter(|x| *x != cut) {
            let target = if x < cut { x } else { x - 1 };
            imgbuf.put_pixel(target, y, image.get_pixel(x, y));
        }
    }
    Ok(imgbuf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn numbered(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 0]))
    }

    fn columns(image: &RgbImage, y: u32) -> Vec<u8> {
        (0..image.width())
            .map(|x| image.get_pixel(x, y).channels()[0])
            .collect()
    }

    #[test]
    fn cuts_one_pixel_per_row() {
        let image = numbered(5, 3);
        let carved = remove_vertical_seam(&image, &[1, 2, 3]).unwrap();
        assert_eq!(carved.dimensions(), (4, 3));
        assert_eq!(columns(&carved, 0), vec![0, 2, 3, 4]);
        assert_eq!(columns(&carved, 1), vec![0, 1, 3, 4]);
        assert_eq!(columns(&carved, 2), vec![0, 1, 2, 4]);
        assert_eq!(carved.get_pixel(3, 2).channels()[1], 2);
    }

    #[test]
    fn cuts_at_both_edges() {
        let image = numbered(3, 2);
        let carved = remove_vertical_seam(&image, &[0, 2]).unwrap();
        assert_eq!(columns(&carved, 0), vec![1, 2]);
        assert_eq!(columns(&carved, 1), vec![0, 1]);
    }

    #[test]
    fn source_is_untouched() {
        let image = numbered(4, 2);
        let before = image.clone();
        let _ = remove_vertical_seam(&image, &[3, 3]).unwrap();
        assert_eq!(image.into_raw(), before.into_raw());
    }

    #[test]
    fn short_seam_is_a_mismatch() {
        let image = numbered(4, 3);
        match remove_vertical_seam(&image, &[0, 0]) {
            Err(CarveError::SeamMismatch(_)) => (),
            other => panic!("expected SeamMismatch, got {:?}", other.map(|i| i.dimensions())),
        }
    }

    #[test]
    fn zero_dimension_is_invalid() {
        for (image, seam) in &[
            (RgbImage::new(0, 0), Vec::<u32>::new()),
            (RgbImage::new(3, 0), Vec::<u32>::new()),
        ] {
            match remove_vertical_seam(image, seam) {
                Err(CarveError::InvalidImage(_)) => (),
                other => panic!("expected InvalidImage, got {:?}", other.map(|i| i.dimensions())),
            }
        }
    }

    #[test]
    fn out_of_bounds_seam_is_a_mismatch() {
        let image = numbered(4, 2);
        match remove_vertical_seam(&image, &[1, 4]) {
            Err(CarveError::SeamMismatch(_)) => (),
            other => panic!("expected SeamMismatch, got {:?}", other.map(|i| i.dimensions())),
        }
    }

    #[test]
    fn check_accepts_a_fitting_seam() {
        assert_eq!(check_vertical_seam(&[0, 1, 1], (2, 3)), Ok(()));
    }
}
