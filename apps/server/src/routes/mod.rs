// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! API route handlers.

pub mod colors;
pub mod export;
pub mod health;
pub mod validate;

use axum::extract::Multipart;

use crate::error::ApiError;

/// Parts of a CSV upload form.
pub struct Upload {
    pub content: String,
    /// Raw `options` field, when sent.
    pub options: Option<String>,
}

/// Read the `file` field and the optional `options` field of a multipart form.
pub async fn extract_upload(multipart: &mut Multipart) -> Result<Upload, ApiError> {
    let mut content = None;
    let mut options = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let data = field.bytes().await?;
                content = Some(String::from_utf8(data.to_vec())?);
            }
            Some("options") => {
                options = Some(field.text().await?);
            }
            _ => {}
        }
    }

    let content = content.ok_or(ApiError::MissingFile)?;
    Ok(Upload { content, options })
}
