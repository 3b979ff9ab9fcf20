use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use base64::{Engine, engine::general_purpose::STANDARD};
use shared::models::ScanRequest;
use tracing::debug;

use super::print_json;
use crate::context::AppContext;

/// Sends an image to the disease detector and prints its verdict.
pub async fn scan(ctx: &AppContext, image: &Path) -> Result<()> {
    let mime = mime_for(image)?;
    let bytes =
        fs::read(image).with_context(|| format!("failed to read image {}", image.display()))?;
    debug!(bytes = bytes.len(), mime, "encoding image");

    let request = ScanRequest::from_base64(mime, &STANDARD.encode(bytes));
    let verdict = ctx.client.predict(&request).await.context("prediction failed")?;
    print_json(&verdict)
}

fn mime_for(image: &Path) -> Result<&'static str> {
    let extension = image
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    Ok(match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => bail!("unsupported image type: {}", image.display()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_for(Path::new("leaf.PNG")).unwrap(), "image/png");
        assert_eq!(mime_for(Path::new("leaf.jpeg")).unwrap(), "image/jpeg");
        assert!(mime_for(Path::new("leaf.bmp")).is_err());
        assert!(mime_for(Path::new("leaf")).is_err());
    }
}
