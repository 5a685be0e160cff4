mod compute_mi;

pub use compute_mi::compute_mi;
