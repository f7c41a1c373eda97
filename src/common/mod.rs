mod frame;
mod math;
mod value;

pub(crate) use frame::*;
pub use math::safe_divide;
pub use value::Value;
