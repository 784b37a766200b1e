//! The prelude brings the extension traits into scope: `use partition_router::prelude::*;`.

pub use crate::ext::RequestExt;
