// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::glyph::GlyphKind;

/// Result type for symbol synthesis
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a glyph
#[derive(Error, Debug)]
pub enum Error {
    #[error("Row has no position to place a {0} symbol")]
    MissingPosition(GlyphKind),

    #[error("Line geometry has no vertices")]
    EmptyLine,

    #[error("No symbol builder registered for {0}")]
    NoBuilder(GlyphKind),

    #[error("Core dataset error: {0}")]
    CoreError(#[from] geosym_core::Error),
}
