// Bytes in, bytes out: decoding the uploaded pattern, loading the base
// photograph, and encoding the result for download.

use crate::error::{Error, Result};
use image::{ImageFormat, RgbImage, codecs::jpeg::JpegEncoder};
use log::{debug, info};
use std::{fs, path::Path};

/// Decode an uploaded PNG or JPEG into RGB (alpha is dropped).
pub fn decode_pattern(bytes: &[u8]) -> Result<RgbImage> {
    let format = image::guess_format(bytes)
        .map_err(|e| Error::InputDecode(format!("unrecognised image data: {e}")))?;
    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
        return Err(Error::InputDecode(format!(
            "unsupported format {format:?}; upload a PNG or JPEG"
        )));
    }
    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| Error::InputDecode(format!("decoding {format:?}: {e}")))?;
    debug!("decoded {format:?} pattern {}x{}", img.width(), img.height());
    Ok(img.to_rgb8())
}

/// Read the base photograph from disk as RGB.
pub fn load_base_image<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();
    let img = image::open(path)
        .map_err(|e| Error::BaseImage(format!("{}: {e}", path.display())))?;
    info!("loaded base image {} ({}x{})", path.display(), img.width(), img.height());
    Ok(img.to_rgb8())
}

/// Encode the result as JPEG bytes. `quality` is clamped to 1..=100.
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    img.write_with_encoder(encoder)
        .map_err(|e| Error::Encode(format!("JPEG: {e}")))?;
    Ok(buf)
}

/// Write the result to `path`; `.jpg`/`.jpeg` honour `quality`, other
/// extensions use the encoder `image` picks for them.
pub fn save_result<P: AsRef<Path>>(img: &RgbImage, path: P, quality: u8) -> Result<()> {
    let path = path.as_ref();
    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false);

    if is_jpeg {
        let bytes = encode_jpeg(img, quality)?;
        fs::write(path, bytes).map_err(|e| Error::Encode(format!("{}: {e}", path.display())))?;
    } else {
        img.save(path)
            .map_err(|e| Error::Encode(format!("{}: {e}", path.display())))?;
    }
    info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use std::io::Cursor;

    fn png_bytes(img: &RgbImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).expect("encode png");
        out.into_inner()
    }

    #[test]
    fn decodes_png() {
        let src = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        let decoded = decode_pattern(&png_bytes(&src)).unwrap();
        assert_eq!(decoded, src);
    }

    #[test]
    fn decodes_jpeg_dimensions() {
        let src = RgbImage::from_pixel(16, 8, Rgb([200, 100, 50]));
        let bytes = encode_jpeg(&src, 95).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = decode_pattern(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (16, 8));
    }

    #[test]
    fn garbage_is_input_decode_error() {
        assert!(matches!(decode_pattern(b"not an image"), Err(Error::InputDecode(_))));
        assert!(matches!(decode_pattern(&[]), Err(Error::InputDecode(_))));
    }

    #[test]
    fn truncated_png_is_input_decode_error() {
        let bytes = png_bytes(&RgbImage::from_pixel(8, 8, Rgb([1, 2, 3])));
        assert!(matches!(decode_pattern(&bytes[..20]), Err(Error::InputDecode(_))));
    }

    #[test]
    fn other_formats_are_rejected() {
        let mut out = Cursor::new(Vec::new());
        RgbImage::new(2, 2).write_to(&mut out, ImageFormat::Bmp).expect("encode bmp");
        assert!(matches!(decode_pattern(out.get_ref()), Err(Error::InputDecode(_))));
    }

    #[test]
    fn missing_base_is_base_image_error() {
        assert!(matches!(
            load_base_image("definitely/not/here.jpg"),
            Err(Error::BaseImage(_))
        ));
    }
}
