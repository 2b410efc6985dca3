pub mod rest;

pub use rest::{configure, RestApi, SharedSession};
