//! Shelf application library
//!
//! Wires the book tracking module into the kernel registry and runs the
//! HTTP server around it.

pub mod modules;

use shelf_kernel::{InitCtx, ModuleRegistry, Settings};

/// Re-export commonly used types
pub use modules::*;

/// Registry holding every application module
pub fn registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Initialize and start all modules, serve HTTP until shutdown, then stop them.
pub async fn run(settings: &Settings) -> anyhow::Result<()> {
    let registry = registry();
    let ctx = InitCtx { settings };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = shelf_http::start_server(&registry, settings).await;
    let stopped = registry.stop_all().await;

    served.and(stopped)
}
