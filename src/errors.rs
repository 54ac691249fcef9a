// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Carving errors
//!
//! Every failure aborts the carve in progress.  There is no partial
//! result: an image of the wrong width is never handed back.

use failure::Fail;

#[derive(Debug, Fail, Clone, PartialEq)]
pub enum CarveError {
    /// A zero-dimension image, or a target the engine cannot carve to.
    #[fail(display = "invalid image: {}", _0)]
    InvalidImage(String),

    /// A seam that does not fit the image it was applied to.  Seams
    /// from the seam search always fit, so this is a defect.
    #[fail(display = "seam does not fit image: {}", _0)]
    SeamMismatch(String),

    /// The cancel flag was raised between two seam removals.
    #[fail(display = "carve cancelled after {} of {} seams", removed, total)]
    Cancelled { removed: u32, total: u32 },
}

pub type Result<T> = std::result::Result<T, CarveError>;
