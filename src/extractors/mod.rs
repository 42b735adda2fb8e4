//! Request extractors whose rejections use the response envelope.

mod body;
mod path;
pub use body::JsonBody;
pub use path::PathParams;
