pub mod color;
pub mod frame;
pub mod id;
pub mod point;
pub mod vector;

pub use color::*;
pub use frame::*;
pub use id::*;
pub use point::*;
pub use vector::*;
