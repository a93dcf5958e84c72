pub mod bn;
pub mod error;
pub mod hpf;
pub mod htl;
pub mod stl;

pub use bn::{factorial, Bn};
