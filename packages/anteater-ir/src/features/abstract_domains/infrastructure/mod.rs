//! Infrastructure: the per-operation transfer function over the product
//! lattice.

mod transfer;

pub use transfer::transfer;
