// Library exports for testing and potential library use

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod catalog;
pub mod cli;
pub mod config {
    //! Configuration re-exports from `diagram-export-config`.
    pub use diagram_export_config::*;
}
pub mod progress;
pub mod render {
    //! Rendering re-exports from `diagram-export-render`.
    pub use diagram_export_render::*;
}
