use crate::error::ImageDecodeError;
use crate::letter::SignatureImage;
use std::time::Duration;

/// Obtain the signature image a letter refers to, before layout starts.
///
/// `data:` URLs are decoded in place; anything else is downloaded with `client`, giving up
/// after `timeout`. The image header is read so the returned [SignatureImage] carries its
/// intrinsic size. Dropping the returned future abandons the request.
pub async fn fetch_signature(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<SignatureImage, ImageDecodeError> {
    let image = if url.starts_with("data:") {
        SignatureImage::from_data_url(url)?
    } else {
        log::debug!("fetching signature from {url}");
        let response = client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| ImageDecodeError::Fetch(e.to_string()))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageDecodeError::Fetch(e.to_string()))?;
        SignatureImage::new(bytes.to_vec())
    };

    let (width, height) = image.intrinsic_size()?;
    Ok(SignatureImage::with_dimensions(image.bytes, width, height))
}

/// Like [fetch_signature], but a signature that cannot be obtained becomes
/// [SignatureImage::unavailable], so the letter carries the signature placeholder instead
/// of silently going out unsigned.
pub async fn resolve_signature(client: &reqwest::Client, url: &str, timeout: Duration) -> SignatureImage {
    match fetch_signature(client, url, timeout).await {
        Ok(image) => image,
        Err(e) => {
            log::warn!("signature at {url} is unavailable: {e}");
            SignatureImage::unavailable()
        }
    }
}
