pub mod device;
pub mod error;
pub mod frame;
pub mod live_loop;
pub mod session;
