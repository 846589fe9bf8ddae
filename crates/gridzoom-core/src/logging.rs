#![forbid(unsafe_code)]

//! Structured logging re-exports.
//!
//! gridzoom logs through `tracing`. Nothing is printed unless the embedding
//! host installs a subscriber, so the controller stays silent by default.
//!
//! Targets used across the workspace:
//!
//! | Target               | Emitted by                  |
//! |----------------------|-----------------------------|
//! | `gridzoom.geometry`  | geometry refresh            |
//! | `gridzoom.sequencer` | activation / collapse       |
//! | `gridzoom.keyboard`  | keyboard navigation         |
//! | `gridzoom.resize`    | resize reactor              |
//! | `gridzoom.web`       | browser binding             |

pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
