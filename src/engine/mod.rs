//! Engine control: search thread management and time allocation.

mod controller;
mod time;

pub use controller::EngineController;
pub use time::allocate_time;
