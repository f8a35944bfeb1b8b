//! Argument handling pipeline for the libtool wrapper.
//!
//! ```text
//! Raw argv → Classify (expanding @params / -filelist, rewriting tokens)
//!          → Resolve duplicate basenames → Assemble → response file
//! ```
//!
//! Classification and rewriting are pure apart from reading params files,
//! so each stage can be unit-tested on its own.

mod classifier;
mod pipeline;
mod registry;
mod rewrite;

pub use classifier::{classify, ClassifiedArg, ClassifyResult};
pub use pipeline::{assemble, AssembledArgs};
pub use registry::{flag_registry, FlagArity, FlagBehavior, FlagDef};
pub use rewrite::{rewrite, TokenRewriter, DEVELOPER_DIR_PLACEHOLDER, SDKROOT_PLACEHOLDER};
