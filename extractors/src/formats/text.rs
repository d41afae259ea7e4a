use shared_types::{DecodedContent, ExtractionError};

/// Decodes a plain-text leaf as UTF-8.
#[derive(Debug, Clone, Copy)]
pub struct TextDecoder {
    lossy: bool,
}

impl TextDecoder {
    pub fn new(lossy: bool) -> Self {
        Self { lossy }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedContent, ExtractionError> {
        let text = if self.lossy {
            String::from_utf8_lossy(bytes).into_owned()
        } else {
            std::str::from_utf8(bytes)
                .map_err(|e| ExtractionError::decode_failed("text", e))?
                .to_string()
        };

        Ok(DecodedContent::Text(text))
    }
}

impl Default for TextDecoder {
    fn default() -> Self {
        Self::new(true)
    }
}
