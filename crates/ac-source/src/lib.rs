/// Image loading for asciify (PNG, JPEG, BMP, GIF).

pub mod image;

pub use crate::image::{decode_image, load_image};
