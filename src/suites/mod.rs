//! Built-in suites.
//!
//! Each suite file registers its tests and its compile-time flag
//! constants at the foot of the file. A suite listed in the source-unit
//! manifest must register at least one flag, or the session report calls
//! it out.

pub mod selfcheck;
pub mod smoke;
