//! Fillers write temporary files with one [`Method`] each until the target
//! runs out of space.
mod method;
mod pool;
mod storage;
mod worker;

pub use method::{Method, Sizing};
pub use pool::Pool;
pub use storage::{Directory, Storage};
pub use worker::{temp_name, State, StopReason, Worker};
