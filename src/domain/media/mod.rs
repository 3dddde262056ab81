//! Media domain module: decoding and classifying uploaded images.

mod image;

pub use image::{
    decode_image, decode_images, DecodedImage, ImageError, ImageFormat, MAX_IMAGES_PER_REQUEST,
};
