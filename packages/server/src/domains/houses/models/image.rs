use crate::domains::houses::error::HouseError;

/// Largest accepted house image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 1024 * 1024;

const ACCEPTED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Raw house image as received from a front end.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }

    /// Only non-empty JPEG or PNG files up to 1 MiB are accepted.
    pub fn validate(&self) -> Result<(), HouseError> {
        if !ACCEPTED_CONTENT_TYPES.contains(&self.content_type.as_str()) {
            return Err(HouseError::validation(format!(
                "image must be jpeg or png, got {}",
                self.content_type
            )));
        }
        if self.bytes.is_empty() {
            return Err(HouseError::validation("image is empty"));
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(HouseError::validation("image may not exceed 1024 KB"));
        }
        Ok(())
    }

    /// File extension matching the content type.
    pub fn extension(&self) -> &'static str {
        match self.content_type.as_str() {
            "image/png" => "png",
            _ => "jpg",
        }
    }
}
