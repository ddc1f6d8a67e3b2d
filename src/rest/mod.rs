// REST 客户端模块

pub mod fetcher;
pub mod locator;

pub use fetcher::{normalize_base_url, FetchError, JsonFetcher};
pub use locator::{
    locate_endpoint, locate_path_field, HostLocatorClient, LocateApplicationResponse,
    DEFAULT_APPLICATION,
};
