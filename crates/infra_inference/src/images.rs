//! Product image encoding
//!
//! Turns [`ImageRef`]s into `data:` URIs for the vision backend.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use domain_claims::ImageRef;

/// An image that could not be encoded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot encode image {image}: {reason}")]
pub struct EncodingError {
    pub image: String,
    pub reason: String,
}

/// Media type for a file, inferred from its extension
///
/// Unknown or missing extensions are sent as JPEG.
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// Encodes one image as a base64 data URI
pub async fn encode_image(image: &ImageRef) -> Result<String, EncodingError> {
    match image {
        ImageRef::Path(path) => {
            let bytes = tokio::fs::read(path).await.map_err(|e| EncodingError {
                image: image.label(),
                reason: e.to_string(),
            })?;
            if bytes.is_empty() {
                return Err(EncodingError {
                    image: image.label(),
                    reason: "file is empty".to_string(),
                });
            }
            Ok(data_uri(media_type_for(path), &STANDARD.encode(bytes)))
        }
        ImageRef::Inline {
            media_type,
            data_base64,
        } => {
            if !media_type.starts_with("image/") {
                return Err(EncodingError {
                    image: image.label(),
                    reason: "media type is not an image".to_string(),
                });
            }
            let decoded = STANDARD.decode(data_base64.trim()).map_err(|e| EncodingError {
                image: image.label(),
                reason: format!("invalid base64: {}", e),
            })?;
            if decoded.is_empty() {
                return Err(EncodingError {
                    image: image.label(),
                    reason: "image data is empty".to_string(),
                });
            }
            Ok(data_uri(media_type, data_base64.trim()))
        }
    }
}

/// Encodes all images, stopping at the first failure
pub async fn encode_all(images: &[ImageRef]) -> Result<Vec<String>, EncodingError> {
    let mut encoded = Vec::with_capacity(images.len());
    for image in images {
        encoded.push(encode_image(image).await?);
    }
    Ok(encoded)
}

fn data_uri(media_type: &str, base64: &str) -> String {
    format!("data:{};base64,{}", media_type, base64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_media_type_for() {
        assert_eq!(media_type_for(Path::new("a/b.PNG")), "image/png");
        assert_eq!(media_type_for(Path::new("photo.webp")), "image/webp");
        assert_eq!(media_type_for(Path::new("photo.jpg")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("photo")), "image/jpeg");
    }

    #[tokio::test]
    async fn test_encode_file() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"\x89PNG").unwrap();

        let uri = encode_image(&ImageRef::Path(file.path().to_path_buf())).await.unwrap();
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
    }

    #[tokio::test]
    async fn test_missing_file_names_the_image() {
        let err = encode_image(&ImageRef::Path("/nonexistent/panda.jpg".into()))
            .await
            .unwrap_err();
        assert_eq!(err.image, "/nonexistent/panda.jpg");
    }

    #[tokio::test]
    async fn test_empty_file_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = encode_image(&ImageRef::Path(file.path().to_path_buf()))
            .await
            .unwrap_err();
        assert_eq!(err.reason, "file is empty");
    }

    #[tokio::test]
    async fn test_inline_blob() {
        let image = ImageRef::Inline {
            media_type: "image/gif".into(),
            data_base64: "R0lGODlh".into(),
        };
        assert_eq!(encode_image(&image).await.unwrap(), "data:image/gif;base64,R0lGODlh");

        let bad = ImageRef::Inline {
            media_type: "image/gif".into(),
            data_base64: "not base64!".into(),
        };
        assert!(encode_image(&bad).await.unwrap_err().reason.starts_with("invalid base64"));
    }

    #[tokio::test]
    async fn test_encode_all_stops_at_first_failure() {
        let images = vec![
            ImageRef::Inline {
                media_type: "image/gif".into(),
                data_base64: "R0lGODlh".into(),
            },
            ImageRef::Path("/nonexistent/b.jpg".into()),
        ];
        let err = encode_all(&images).await.unwrap_err();
        assert_eq!(err.image, "/nonexistent/b.jpg");
    }
}
