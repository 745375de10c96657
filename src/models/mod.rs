pub mod ad;
pub mod common;
pub mod company;
pub mod image;

pub use ad::*;
pub use common::*;
pub use company::*;
pub use image::*;
