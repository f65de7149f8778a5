//! Terminal output helpers
//!
//! Uses `cliclack` log styling in interactive terminals and falls back to
//! plain `[OK]`/`[WARN]`/`[FAIL]` prefixes in CI or when piped.
//!
//! # Example
//!
//! ```rust,ignore
//! use matcache::ui::{self, UiContext};
//!
//! let ctx = UiContext::detect();
//! ui::step_ok_detail(&ctx, "Inverted 2x2 matrix", "lu, 1 computed, 0 from cache");
//! ui::step_warn_hint(&ctx, "Config already exists", "Use --force to overwrite");
//! ```

mod context;
mod output;

pub use context::UiContext;
pub use output::{
    key_value, remark, section, step_error_detail, step_ok, step_ok_detail, step_warn_hint,
};
