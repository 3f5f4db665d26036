// Platform backends for the bundler seams

pub mod http;
pub mod fs;

pub use http::HttpFetcher;
pub use fs::FileSink;
