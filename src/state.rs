pub mod pagination;
pub mod timeline;
pub mod window;
