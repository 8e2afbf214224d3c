mod app;
mod decode;
mod dispatch;

pub use app::{AgifyError, AgifyResult};
pub use decode::DecodeError;
pub use dispatch::DispatchError;
