use crate::refs::{ObjectReferences, RefType};
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf, Ref};

/// Image data ready to be written as a PDF image XObject
pub(crate) struct EncodedImage {
    pub width: u32,
    pub height: u32,
    filter: Filter,
    bytes: Vec<u8>,
    /// Flate-compressed 8-bit alpha channel, if the image has one
    mask: Option<Vec<u8>>,
}

impl EncodedImage {
    /// Decode an image and re-encode it for embedding. RGB JPEGs can be embedded as they
    /// are; anything else becomes compressed RGB, plus a soft mask when it has alpha (as
    /// signatures drawn on a transparent canvas do).
    pub fn from_bytes(bytes: &[u8]) -> Result<EncodedImage, image::ImageError> {
        let format = image::guess_format(bytes)?;
        let decoded = image::load_from_memory_with_format(bytes, format)?;

        match (format, decoded.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => Ok(EncodedImage {
                width: decoded.width(),
                height: decoded.height(),
                filter: Filter::DctDecode,
                bytes: bytes.to_vec(),
                mask: None,
            }),
            _ => Ok(Self::flate(&decoded)),
        }
    }

    fn flate(decoded: &DynamicImage) -> EncodedImage {
        let level = CompressionLevel::DefaultLevel as u8;

        let mask = decoded.color().has_alpha().then(|| {
            let alphas: Vec<u8> = decoded.pixels().map(|(_, _, pixel)| pixel.0[3]).collect();
            compress_to_vec_zlib(&alphas, level)
        });

        EncodedImage {
            width: decoded.width(),
            height: decoded.height(),
            filter: Filter::FlateDecode,
            bytes: compress_to_vec_zlib(decoded.to_rgb8().as_raw(), level),
            mask,
        }
    }

    pub fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) -> Ref {
        let id = refs.get(RefType::Image(image_index));
        let mask_id = self
            .mask
            .as_ref()
            .map(|_| refs.get(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, self.bytes.as_slice());
        image.filter(self.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, &self.mask) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }

        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 128]));
        let mut bytes: Vec<u8> = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .expect("can encode png");
        bytes
    }

    #[test]
    fn transparent_pngs_get_a_soft_mask() {
        let encoded = EncodedImage::from_bytes(&png(8, 4)).expect("valid png");
        assert_eq!((encoded.width, encoded.height), (8, 4));
        assert!(encoded.mask.is_some());
        assert!(matches!(encoded.filter, Filter::FlateDecode));
    }

    #[test]
    fn corrupt_images_are_errors() {
        assert!(EncodedImage::from_bytes(b"definitely not an image").is_err());
    }
}
