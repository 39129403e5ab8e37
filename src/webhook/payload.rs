//! Outbound webhook bodies: a JSON document or a multipart form.

use serde_json::Value;

use super::WebhookError;

#[derive(Debug, Clone, PartialEq)]
pub enum WebhookPayload {
    /// Sent with `Content-Type: application/json`.
    Json(Value),
    /// Sent as `multipart/form-data`; the transport sets the boundary header.
    Multipart(MultipartForm),
}

impl From<Value> for WebhookPayload {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<MultipartForm> for WebhookPayload {
    fn from(form: MultipartForm) -> Self {
        Self::Multipart(form)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    pub parts: Vec<FormPart>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text { name: String, value: String },
    File(FilePart),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub name: String,
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MultipartForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text { name: name.into(), value: value.into() });
        self
    }

    #[must_use]
    pub fn file(mut self, file: FilePart) -> Self {
        self.parts.push(FormPart::File(file));
        self
    }

    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidPayload`] for an unparseable MIME type.
    #[cfg(not(feature = "hydrate"))]
    pub(crate) fn to_reqwest(&self) -> Result<reqwest::multipart::Form, WebhookError> {
        let mut form = reqwest::multipart::Form::new();
        for part in &self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
                FormPart::File(file) => {
                    let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                        .file_name(file.filename.clone())
                        .mime_str(&file.content_type)
                        .map_err(|e| WebhookError::InvalidPayload(e.to_string()))?;
                    form.part(file.name.clone(), part)
                }
            };
        }
        Ok(form)
    }

    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidPayload`] when the browser rejects a part.
    #[cfg(feature = "hydrate")]
    pub(crate) fn to_form_data(&self) -> Result<web_sys::FormData, WebhookError> {
        let invalid = |e: wasm_bindgen::JsValue| WebhookError::InvalidPayload(format!("{e:?}"));
        let form = web_sys::FormData::new().map_err(invalid)?;
        for part in &self.parts {
            match part {
                FormPart::Text { name, value } => form.append_with_str(name, value).map_err(invalid)?,
                FormPart::File(file) => {
                    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
                    let sequence = js_sys::Array::of1(&bytes);
                    let options = web_sys::BlobPropertyBag::new();
                    options.set_type(&file.content_type);
                    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&sequence, &options)
                        .map_err(invalid)?;
                    form.append_with_blob_and_filename(&file.name, &blob, &file.filename)
                        .map_err(invalid)?;
                }
            }
        }
        Ok(form)
    }
}
