pub mod duration;
pub mod rollover;
pub mod scheduler;
pub mod session;
pub mod sync;
