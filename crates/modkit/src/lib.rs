//! Facade crate for modkit.
//! Re-exports the domain and kernel primitives and registers the built-in features.
//! Keep this crate thin: it composes other crates, it does not implement lifecycle logic.
//!
//! ## Usage
//! ```rust
//! use modkit::kernel::prelude::*;
//!
//! let mut host = Mod::builder().id("charmony").build().unwrap();
//! modkit::register_builtin(&mut host).unwrap();
//! host.run_sides(Sides::CLIENT_RUNTIME).unwrap();
//! ```

use modkit_kernel::{Mod, ModError};

pub use modkit_domain as domain;
pub use modkit_kernel as kernel;

/// Built-in features compiled into this build.
pub mod features {
    #[cfg(feature = "diagnostics")]
    pub use modkit_diagnostics as diagnostics;

    /// Names of the built-in features enabled by Cargo feature.
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "diagnostics")]
        "diagnostics",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Registers every built-in feature compiled into this build.
///
/// # Errors
/// Returns [`ModError::DuplicateFeature`] if a built-in feature is already registered, or
/// [`ModError::SideAlreadyRun`] if its side has already been run.
#[cfg_attr(not(feature = "diagnostics"), allow(unused_variables))]
pub fn register_builtin(host: &mut Mod) -> Result<(), ModError> {
    #[cfg(feature = "diagnostics")]
    host.add_feature::<features::diagnostics::Diagnostics>()?;

    Ok(())
}
