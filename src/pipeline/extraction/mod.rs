pub mod sanitize;
pub mod normalize;
pub mod cascade;
pub mod vitals;
pub mod derived;

pub use sanitize::*;
pub use normalize::*;
pub use cascade::*;
pub use vitals::*;
pub use derived::*;
