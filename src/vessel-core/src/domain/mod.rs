mod arrival;
mod navigation_status;
mod vessel;

pub use arrival::*;
pub use navigation_status::*;
pub use vessel::*;
