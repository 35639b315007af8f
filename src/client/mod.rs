pub(crate) mod core;
mod http;
