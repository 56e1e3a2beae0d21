//! `rp-fmi` — reader for FMI plain-text graph files.
//!
//! # Crate layout
//!
//! | Module     | Contents                                  |
//! |------------|-------------------------------------------|
//! | [`reader`] | `read_graph`, `read_graph_from`           |
//! | [`error`]  | `FmiError`, `FmiResult<T>`                |

pub mod error;
pub mod reader;


pub use error::{FmiError, FmiResult};
pub use reader::{read_graph, read_graph_from};
