pub mod observed;
pub mod request;
pub mod response;
pub mod shapes;
pub mod spec;
