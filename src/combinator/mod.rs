//! Transport combinators.

mod trace;
pub use trace::*;
