// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Carving configuration
//!
//! Callers say explicitly which backend carves and whether intermediate
//! frames are wanted.  Nothing here is read from the environment.

use image::Rgb;

/// Frame budget for a preview when the caller doesn't name one.
pub const DEFAULT_MAX_FRAMES: u32 = 60;

/// Seam highlight for preview frames when the caller doesn't name one.
pub const DEFAULT_HIGHLIGHT: [u8; 3] = [176, 11, 105];

/// The algorithm that produces each seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Sobel-magnitude energy, dynamic-programming search.
    BackwardEnergy,
}

impl Default for Backend {
    fn default() -> Self {
        Backend::BackwardEnergy
    }
}

/// How to render the removal sequence as a short animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewConfig {
    /// Upper bound on the number of captured frames.
    pub max_frames: u32,
    /// Color painted over the seam in each frame.
    pub highlight: Rgb<u8>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        PreviewConfig {
            max_frames: DEFAULT_MAX_FRAMES,
            highlight: Rgb(DEFAULT_HIGHLIGHT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CarveConfig {
    pub backend: Backend,
    /// `None` carves without capturing frames.
    pub preview: Option<PreviewConfig>,
}

impl CarveConfig {
    pub fn new(backend: Backend) -> Self {
        CarveConfig {
            backend,
            preview: None,
        }
    }

    pub fn with_preview(mut self, preview: PreviewConfig) -> Self {
        self.preview = Some(preview);
        self
    }
}
