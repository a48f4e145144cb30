pub mod enums;
pub mod vital_sign;

pub use enums::*;
pub use vital_sign::*;
