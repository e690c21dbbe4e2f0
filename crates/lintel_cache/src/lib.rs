//! Process-wide resettable memoization.
//!
//! Rule implementations and their support modules memoize expensive work
//! (config lookups, file metadata, parsed headers) in [`Memo`] statics. Every
//! memo registers itself in a process-wide registry under a *scope* string,
//! and the registry can reset everything registered under a scope in one
//! call. Rule tests rely on this to start each case from a clean memoization
//! state instead of writing bespoke teardown per rule.
//!
//! ```text
//! static PARSED_HEADERS: Memo<PathBuf, Header> = Memo::new("my_rules", "parsed_headers");
//!
//! // ... later, between test cases:
//! lintel_cache::clear_scope("my_rules");
//! ```

mod memo;
mod registry;

pub use memo::Memo;
pub use registry::{clear_all, clear_scope, handles, register, scope_handles};
pub use registry::{ClearHandle, ResettableCache};
