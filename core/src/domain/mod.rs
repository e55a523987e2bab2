pub mod analysis;
pub mod capture;
pub mod common;
pub mod history;
pub mod storage;
