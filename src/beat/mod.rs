pub mod envelope;
pub mod timeline;
