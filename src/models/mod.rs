pub mod request;
pub mod response;
pub mod sovren;

pub use request::*;
pub use response::*;
