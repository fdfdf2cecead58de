//! Canned image descriptions
//!
//! Built from file metadata only: filename keywords pick the opening, the
//! byte size picks a resolution remark. No image decoding happens here.

const MIB: u64 = 1024 * 1024;

/// Produce a canned description for an uploaded image
pub fn description_for(filename: &str, size_bytes: u64) -> String {
    let lower = filename.to_lowercase();

    let kind = if lower.contains("photo") || lower.contains("img") || lower.contains("picture") {
        "a photograph. "
    } else if lower.contains("screenshot") || lower.contains("screen") {
        "a screenshot. "
    } else if lower.contains("document") || lower.contains("doc") {
        "a document or text image. "
    } else {
        "a digital image. "
    };

    let size_remark = if size_bytes > 5 * MIB {
        "This appears to be a high-resolution image with lots of detail. "
    } else if size_bytes > MIB {
        "This is a medium-sized image with good quality. "
    } else {
        "This is a smaller image file. "
    };

    format!(
        "I can see an image that appears to be {kind}{size_remark}While I cannot analyze the \
         specific contents without proper AI vision capabilities, I can confirm the image has \
         been successfully uploaded and is ready for viewing. For detailed image analysis, \
         please ensure the OpenAI API key is properly configured."
    )
}
