//! Raster images as PDF Image XObjects (ISO 32000-1:2008 Section 8.9).
//!
//! - **JPEG**: embedded unchanged with the DCTDecode filter
//! - **PNG**: decoded, split into colour and alpha, each Flate-compressed;
//!   the alpha channel becomes an `/SMask`

use std::io::Write;

use bytes::Bytes;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::Error;
use crate::geometry::Size;
use crate::object::{Dictionary, Object, ObjectRef};

use super::object_serializer::ObjectSerializer;

const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";
const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// Colour space of the pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// One component per pixel
    DeviceGray,
    /// Three components per pixel
    DeviceRGB,
    /// Four components per pixel
    DeviceCMYK,
}

impl ColorSpace {
    /// PDF name of the colour space.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceCMYK => "DeviceCMYK",
        }
    }

    fn from_components(components: u8) -> Self {
        match components {
            1 => ColorSpace::DeviceGray,
            4 => ColorSpace::DeviceCMYK,
            _ => ColorSpace::DeviceRGB,
        }
    }
}

/// Filter applied to the stored stream data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    /// JPEG bytes as-is
    Dct,
    /// Zlib-compressed raw samples
    Flate,
}

impl ImageEncoding {
    fn filter_name(&self) -> &'static str {
        match self {
            ImageEncoding::Dct => "DCTDecode",
            ImageEncoding::Flate => "FlateDecode",
        }
    }
}

/// Image embedding error.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// Neither a PNG nor a JPEG signature
    #[error("unsupported image format (expected PNG or JPEG)")]
    UnsupportedFormat,

    /// The decoder rejected the data
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// Header could not be parsed
    #[error("invalid image data: {0}")]
    InvalidData(&'static str),

    /// Zlib failure
    #[error("compression error: {0}")]
    Compression(#[from] std::io::Error),
}

impl From<ImageError> for Error {
    fn from(err: ImageError) -> Self {
        Error::capability("embed_image", err)
    }
}

/// An image ready to be written as an XObject.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Colour space of `data`
    pub color_space: ColorSpace,
    /// How `data` is encoded
    pub encoding: ImageEncoding,
    /// Encoded samples
    pub data: Bytes,
    /// Flate-compressed 8-bit alpha samples
    pub soft_mask: Option<Bytes>,
}

impl ImageData {
    /// Decode PNG or JPEG bytes, detected by signature.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ImageError> {
        if data.starts_with(&JPEG_SOI) {
            Self::from_jpeg(Bytes::copy_from_slice(data))
        } else if data.starts_with(PNG_SIGNATURE) {
            Self::from_png(data)
        } else {
            Err(ImageError::UnsupportedFormat)
        }
    }

    /// Wrap JPEG data without transcoding.
    pub fn from_jpeg(data: Bytes) -> Result<Self, ImageError> {
        let frame = scan_jpeg_frame(&data)?;
        log::debug!(
            "JPEG image {}x{} with {} components",
            frame.width,
            frame.height,
            frame.components
        );

        Ok(Self {
            width: frame.width,
            height: frame.height,
            color_space: ColorSpace::from_components(frame.components),
            encoding: ImageEncoding::Dct,
            data,
            soft_mask: None,
        })
    }

    /// Decode a PNG into Flate-compressed samples.
    pub fn from_png(data: &[u8]) -> Result<Self, ImageError> {
        let img = image::load_from_memory_with_format(data, image::ImageFormat::Png)
            .map_err(|e| ImageError::Decode(e.to_string()))?;
        let (width, height) = (img.width(), img.height());
        let color = img.color();

        let (color_space, samples, alpha) = if color.has_color() {
            if color.has_alpha() {
                let rgba = img.to_rgba8();
                let (rgb, alpha) = split_alpha(rgba.as_raw(), 4);
                (ColorSpace::DeviceRGB, rgb, Some(alpha))
            } else {
                (ColorSpace::DeviceRGB, img.to_rgb8().into_raw(), None)
            }
        } else if color.has_alpha() {
            let la = img.to_luma_alpha8();
            let (gray, alpha) = split_alpha(la.as_raw(), 2);
            (ColorSpace::DeviceGray, gray, Some(alpha))
        } else {
            (ColorSpace::DeviceGray, img.to_luma8().into_raw(), None)
        };

        // A fully opaque alpha channel adds nothing.
        let alpha = alpha.filter(|a| a.iter().any(|&v| v != u8::MAX));

        Ok(Self {
            width,
            height,
            color_space,
            encoding: ImageEncoding::Flate,
            data: deflate(&samples)?,
            soft_mask: alpha.map(|a| deflate(&a)).transpose()?,
        })
    }

    /// Pixel dimensions as a size in points.
    pub fn natural_size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    /// Image XObject stream; `smask` references the alpha stream.
    pub fn xobject(&self, smask: Option<ObjectRef>) -> Object {
        let mut dict = self.image_dict(self.color_space, self.encoding);
        if let Some(r) = smask {
            dict.insert("SMask".to_string(), Object::Reference(r));
        }
        Object::Stream {
            dict,
            data: self.data.clone(),
        }
    }

    /// Soft mask stream, when the image has transparency.
    pub fn soft_mask_xobject(&self) -> Option<Object> {
        self.soft_mask.as_ref().map(|mask| Object::Stream {
            dict: self.image_dict(ColorSpace::DeviceGray, ImageEncoding::Flate),
            data: mask.clone(),
        })
    }

    fn image_dict(&self, color_space: ColorSpace, encoding: ImageEncoding) -> Dictionary {
        ObjectSerializer::dict_map(vec![
            ("Type", ObjectSerializer::name("XObject")),
            ("Subtype", ObjectSerializer::name("Image")),
            ("Width", Object::Integer(self.width as i64)),
            ("Height", Object::Integer(self.height as i64)),
            ("ColorSpace", ObjectSerializer::name(color_space.pdf_name())),
            ("BitsPerComponent", Object::Integer(8)),
            ("Filter", ObjectSerializer::name(encoding.filter_name())),
        ])
    }
}

/// Split interleaved samples whose last channel is alpha.
fn split_alpha(raw: &[u8], channels: usize) -> (Vec<u8>, Vec<u8>) {
    let pixels = raw.len() / channels;
    let mut color = Vec::with_capacity(pixels * (channels - 1));
    let mut alpha = Vec::with_capacity(pixels);
    for px in raw.chunks_exact(channels) {
        color.extend_from_slice(&px[..channels - 1]);
        alpha.push(px[channels - 1]);
    }
    (color, alpha)
}

fn deflate(data: &[u8]) -> Result<Bytes, ImageError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(Bytes::from(encoder.finish()?))
}

struct JpegFrame {
    width: u32,
    height: u32,
    components: u8,
}

/// Walk the marker segments up to the first start-of-frame.
fn scan_jpeg_frame(data: &[u8]) -> Result<JpegFrame, ImageError> {
    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            return Err(ImageError::InvalidData("corrupt JPEG marker"));
        }
        let marker = data[pos + 1];
        if marker == 0xFF {
            pos += 1;
            continue;
        }
        let length = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        let segment = pos + 4;

        // SOF0..SOF15 except DHT (C4), JPG (C8) and DAC (CC)
        if (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            if segment + 6 > data.len() {
                return Err(ImageError::InvalidData("truncated JPEG frame header"));
            }
            let height = u16::from_be_bytes([data[segment + 1], data[segment + 2]]) as u32;
            let width = u16::from_be_bytes([data[segment + 3], data[segment + 4]]) as u32;
            return Ok(JpegFrame {
                width,
                height,
                components: data[segment + 5],
            });
        }
        if length < 2 {
            return Err(ImageError::InvalidData("corrupt JPEG segment length"));
        }
        pos += 2 + length;
    }
    Err(ImageError::InvalidData("JPEG frame header not found"))
}
