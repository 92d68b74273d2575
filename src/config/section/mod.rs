//! Configuration section definitions.
//!
//! Each module corresponds to a section in `tola-vite.toml`:
//!
//! | Module  | TOML Section | Purpose                                  |
//! |---------|--------------|------------------------------------------|
//! | `build` | `[build]`    | Public dir, manifest, href base          |
//! | `mode`  | `[mode]`     | Development/production decision          |
//! | `hot`   | `[hot]`      | Hot file and dev server module paths     |
//! | `serve` | `[serve]`    | Development server                       |

mod build;
mod hot;
mod mode;
mod serve;

pub use build::BuildConfig;
pub use hot::HotConfig;
pub use mode::ModeConfig;
pub use serve::{HmrConfig, ServeConfig};
