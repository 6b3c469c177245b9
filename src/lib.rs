pub mod vocabulary;
pub mod extract;
pub mod scanner;
pub mod window;
pub mod descriptor;
pub mod dispatcher;
pub mod diagnostics;
pub mod config;
pub mod pipeline;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::CompileOptions;
pub use descriptor::{EntityDescriptor, MediaContent, Vec3};
pub use pipeline::{compile, compile_line, compile_with, compile_with_report, filter_lines, CompileReport};
