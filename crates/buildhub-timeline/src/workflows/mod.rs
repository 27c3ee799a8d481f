pub mod batch;
pub mod timeline;
