pub mod constants;
pub mod frame;
