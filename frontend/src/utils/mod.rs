pub mod debounce;
pub mod navigation;
pub mod return_url;
pub mod storage;
pub mod timer;
