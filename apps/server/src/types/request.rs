// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types.

use geosym_core::TagColor;
use serde::Deserialize;

/// PUT /api/v1/colors body.
#[derive(Debug, Clone, Deserialize)]
pub struct ColorUpdateRequest {
    /// Tag colors to merge into the store, `#rrggbb`.
    pub colors: Vec<TagColor>,
}
