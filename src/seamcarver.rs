// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main function
//!
//! The main seamcarver routine.  A carve is a strictly sequential loop:
//! every seam is found on the image left behind by the previous
//! removal, so no two iterations can overlap.  With a preview
//! configured, the loop also records a copy of the image at sampled
//! steps with the seam about to be removed painted on it.

use crate::config::CarveConfig;
use crate::errors::{CarveError, Result};
use crate::preview::{overlay_seam, sample_steps};
use crate::seamfinder::SeamFinder;
use crate::seamremover::remove_vertical_seam;
use image::RgbImage;
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shareable stop button for a running carve.  It is looked at
/// before each seam search; once raised, the carve fails with
/// `CarveError::Cancelled` and the half-carved image is dropped.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        CancelFlag::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The image as it stood before seam number `step` (counting from 1)
/// was removed, with that seam painted in the highlight color.
#[derive(Debug, Clone)]
pub struct PreviewFrame {
    pub step: u32,
    pub image: RgbImage,
}

/// The outcome of a carve: the narrowed image, and the preview frames
/// in step order (empty unless a preview was configured).
#[derive(Debug, Clone)]
pub struct Carved {
    pub image: RgbImage,
    pub frames: Vec<PreviewFrame>,
}

// The mutable state of one carve.  It owns the only copy of the
// working image; each removal replaces it outright.
struct CarveSession<'a> {
    current: RgbImage,
    total: u32,
    removed: u32,
    schedule: std::vec::IntoIter<u32>,
    next_frame: Option<u32>,
    frames: Vec<PreviewFrame>,
    config: &'a CarveConfig,
    cancel: Option<&'a CancelFlag>,
}

impl<'a> CarveSession<'a> {
    fn new(
        image: &RgbImage,
        total: u32,
        config: &'a CarveConfig,
        cancel: Option<&'a CancelFlag>,
    ) -> Self {
        let steps = config
            .preview
            .map(|preview| sample_steps(total, preview.max_frames))
            .unwrap_or_default();
        let mut schedule = steps.into_iter();
        let next_frame = schedule.next();
        CarveSession {
            current: image.clone(),
            total,
            removed: 0,
            schedule,
            next_frame,
            frames: Vec::new(),
            config,
            cancel,
        }
    }

    fn cancelled(&self) -> bool {
        self.cancel.map_or(false, CancelFlag::is_cancelled)
    }

    fn capture(&mut self, step: u32, seam: &[u32]) -> Result<()> {
        if let (Some(wanted), Some(preview)) = (self.next_frame, self.config.preview) {
            if wanted == step {
                let image = overlay_seam(&self.current, seam, preview.highlight)?;
                debug!("captured preview frame at step {}", step);
                self.frames.push(PreviewFrame { step, image });
                self.next_frame = self.schedule.next();
            }
        }
        Ok(())
    }

    fn run(mut self) -> Result<Carved> {
        info!(
            "carving {} seams from a {}x{} image",
            self.total,
            self.current.width(),
            self.current.height()
        );
        while self.removed < self.total {
            if self.cancelled() {
                info!("carve cancelled after {} seams", self.removed);
                return Err(CarveError::Cancelled {
                    removed: self.removed,
                    total: self.total,
                });
            }
            let step = self.removed + 1;
            let seam = self
                .config
                .backend
                .finder(&self.current)
                .find_vertical_seam()?;
            let bottom = seam.last().copied().unwrap_or_default();
            self.capture(step, &seam)?;
            self.current = remove_vertical_seam(&self.current, &seam)?;
            self.removed = step;
            debug!(
                "removed seam {} of {} (bottom column {})",
                step, self.total, bottom
            );
        }
        info!(
            "carved to {}x{}, {} preview frames",
            self.current.width(),
            self.current.height(),
            self.frames.len()
        );
        Ok(Carved {
            image: self.current,
            frames: self.frames,
        })
    }
}

fn check_dimensions(image: &RgbImage) -> Result<()> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(CarveError::InvalidImage(format!(
            "cannot carve a {}x{} image",
            width, height
        )));
    }
    Ok(())
}

/// A struct for holding the image to be carved, and how to carve it.
pub struct SeamCarver<'a> {
    image: &'a RgbImage,
    config: CarveConfig,
    cancel: Option<CancelFlag>,
}

impl<'a> SeamCarver<'a> {
    /// Creates a new SeamCarver with an image to be carved.
    pub fn new(image: &'a RgbImage, config: CarveConfig) -> Self {
        SeamCarver {
            image,
            config,
            cancel: None,
        }
    }

    /// Watch `flag` between seams.
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn session(&self, total: u32) -> Result<Carved> {
        CarveSession::new(self.image, total, &self.config, self.cancel.as_ref()).run()
    }

    /// Carve the image down to `target_width` columns.  A target at or
    /// beyond the current width is not an enlargement: the image comes
    /// back unchanged, with no frames.  A target width of 0 is rejected
    /// with `CarveError::InvalidImage`.
    pub fn carve(&self, target_width: u32) -> Result<Carved> {
        check_dimensions(self.image)?;
        if target_width == 0 {
            return Err(CarveError::InvalidImage(
                "cannot carve to a width of 0".to_string(),
            ));
        }
        let width = self.image.width();
        if target_width >= width {
            info!(
                "target width {} is not below {}; nothing to carve",
                target_width, width
            );
            return Ok(Carved {
                image: self.image.clone(),
                frames: Vec::new(),
            });
        }
        self.session(width - target_width)
    }

    /// Remove exactly `count` seams.  Unlike `carve`, asking for no
    /// seams, or for every column, is an error.
    pub fn remove_seams(&self, count: u32) -> Result<Carved> {
        check_dimensions(self.image)?;
        let width = self.image.width();
        if count == 0 || count >= width {
            return Err(CarveError::InvalidImage(format!(
                "cannot remove {} seams from an image {} wide",
                count, width
            )));
        }
        self.session(count)
    }
}

/// Carve `image` to `target_width` x `target_height`.  Only the width
/// can change; a target height other than the image's own is rejected
/// before any work is done, as is a target width of 0.
pub fn seamcarve(
    image: &RgbImage,
    target_width: u32,
    target_height: u32,
    config: CarveConfig,
) -> Result<Carved> {
    if target_height != image.height() {
        return Err(CarveError::InvalidImage(format!(
            "target height {} differs from image height {}; only width is carved",
            target_height,
            image.height()
        )));
    }
    SeamCarver::new(image, config).carve(target_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Backend, PreviewConfig};
    use image::Rgb;

    fn highlight() -> Rgb<u8> {
        Rgb([255, 0, 255])
    }

    fn textured(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let v = ((x * 41 + y * 17 + (x ^ y) * 29) % 256) as u8;
            Rgb([v, v / 2, 255 - v])
        })
    }

    fn preview(max_frames: u32) -> CarveConfig {
        CarveConfig::new(Backend::BackwardEnergy).with_preview(PreviewConfig {
            max_frames,
            highlight: highlight(),
        })
    }

    fn expect_invalid(result: Result<Carved>) {
        match result {
            Err(CarveError::InvalidImage(_)) => (),
            Err(other) => panic!("expected InvalidImage, got {:?}", other),
            Ok(_) => panic!("expected InvalidImage, got an image"),
        }
    }

    #[test]
    fn width_shrinks_by_the_seam_count() {
        let image = textured(9, 5);
        for target in 1..=9 {
            let carved = SeamCarver::new(&image, CarveConfig::default())
                .carve(target)
                .unwrap();
            assert_eq!(carved.image.dimensions(), (target, 5));
            assert!(carved.frames.is_empty());
        }
    }

    #[test]
    fn flat_image_loses_its_leftmost_columns() {
        let image = RgbImage::from_pixel(5, 3, Rgb([12, 34, 56]));
        let carved = SeamCarver::new(&image, CarveConfig::default())
            .carve(3)
            .unwrap();
        assert_eq!(carved.image.dimensions(), (3, 3));
        let expected = RgbImage::from_fn(3, 3, |x, y| *image.get_pixel(x + 2, y));
        assert_eq!(carved.image.into_raw(), expected.into_raw());
    }

    #[test]
    fn flat_image_seams_hug_the_left_edge() {
        let image = RgbImage::from_pixel(5, 3, Rgb([12, 34, 56]));
        let carved = SeamCarver::new(&image, preview(10)).carve(3).unwrap();
        assert_eq!(carved.frames.len(), 2);
        for frame in &carved.frames {
            for y in 0..3 {
                assert_eq!(*frame.image.get_pixel(0, y), highlight());
                assert_ne!(*frame.image.get_pixel(1, y), highlight());
            }
        }
    }

    #[test]
    fn bright_column_survives() {
        let bright = Rgb([240, 240, 240]);
        let image = RgbImage::from_fn(4, 2, |x, _| {
            if x == 2 {
                bright
            } else {
                Rgb([20, 20, 20])
            }
        });
        let carved = SeamCarver::new(&image, preview(1)).carve(3).unwrap();
        assert_eq!(carved.image.dimensions(), (3, 2));
        assert!((0..2).all(|y| *carved.image.get_pixel(1, y) == bright));

        let frame = &carved.frames[0];
        assert!((0..2).all(|y| *frame.image.get_pixel(2, y) == bright));
    }

    #[test]
    fn carving_is_deterministic() {
        let image = textured(16, 9);
        let first = SeamCarver::new(&image, CarveConfig::default())
            .carve(7)
            .unwrap();
        let second = SeamCarver::new(&image, CarveConfig::default())
            .carve(7)
            .unwrap();
        assert_eq!(first.image.into_raw(), second.image.into_raw());
    }

    #[test]
    fn no_op_targets_return_the_input() {
        let image = textured(6, 4);
        for target in &[6, 7, 100] {
            let carved = SeamCarver::new(&image, preview(5)).carve(*target).unwrap();
            assert_eq!(carved.image.dimensions(), (6, 4));
            assert_eq!(carved.image.into_raw(), image.clone().into_raw());
            assert!(carved.frames.is_empty());
        }
    }

    #[test]
    fn preview_does_not_leak_into_the_result() {
        let image = textured(12, 6);
        let plain = SeamCarver::new(&image, CarveConfig::default())
            .carve(4)
            .unwrap();
        let previewed = SeamCarver::new(&image, preview(60)).carve(4).unwrap();
        assert_eq!(plain.image.into_raw(), previewed.image.into_raw());
        assert_eq!(previewed.frames.len(), 8);
    }

    #[test]
    fn frames_follow_the_schedule() {
        let image = textured(14, 4);
        let carved = SeamCarver::new(&image, preview(3)).carve(4).unwrap();
        let steps: Vec<u32> = carved.frames.iter().map(|f| f.step).collect();
        assert_eq!(steps, sample_steps(10, 3));
        for frame in &carved.frames {
            assert_eq!(frame.image.dimensions(), (14 - (frame.step - 1), 4));
            let painted = (0..4).all(|y| {
                (0..frame.image.width()).any(|x| *frame.image.get_pixel(x, y) == highlight())
            });
            assert!(painted);
        }
    }

    #[test]
    fn cancelled_carve_returns_nothing() {
        let image = textured(8, 3);
        let flag = CancelFlag::new();
        flag.cancel();
        let result = SeamCarver::new(&image, CarveConfig::default())
            .with_cancel_flag(flag.clone())
            .carve(4);
        match result {
            Err(CarveError::Cancelled { removed, total }) => {
                assert_eq!((removed, total), (0, 4));
            }
            other => panic!("expected Cancelled, got {:?}", other.map(|c| c.image.dimensions())),
        }
        assert!(flag.is_cancelled());
    }

    #[test]
    fn untouched_flag_lets_the_carve_finish() {
        let image = textured(8, 3);
        let carved = SeamCarver::new(&image, CarveConfig::default())
            .with_cancel_flag(CancelFlag::new())
            .carve(5)
            .unwrap();
        assert_eq!(carved.image.dimensions(), (5, 3));
    }

    #[test]
    fn explicit_removal_must_leave_a_narrower_image() {
        let image = textured(5, 2);
        let carver = SeamCarver::new(&image, CarveConfig::default());
        expect_invalid(carver.remove_seams(0));
        expect_invalid(carver.remove_seams(5));
        expect_invalid(carver.remove_seams(9));
        assert_eq!(carver.remove_seams(4).unwrap().image.dimensions(), (1, 2));
    }

    #[test]
    fn degenerate_inputs_are_invalid() {
        let empty = RgbImage::new(0, 3);
        expect_invalid(SeamCarver::new(&empty, CarveConfig::default()).carve(1));
        let image = textured(4, 4);
        expect_invalid(SeamCarver::new(&image, CarveConfig::default()).carve(0));
    }

    #[test]
    fn seamcarve_rejects_a_new_height() {
        let image = textured(6, 4);
        expect_invalid(seamcarve(&image, 3, 5, CarveConfig::default()));
        expect_invalid(seamcarve(&image, 0, 4, CarveConfig::default()));
        let carved = seamcarve(&image, 3, 4, CarveConfig::default()).unwrap();
        assert_eq!(carved.image.dimensions(), (3, 4));
    }
}
