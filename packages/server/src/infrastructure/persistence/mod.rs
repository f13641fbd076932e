//! 永続化アダプタの実装
//!
//! - `json_file`: JSON ファイルによる実装

pub mod json_file;

pub use json_file::JsonFileStatePersistence;
