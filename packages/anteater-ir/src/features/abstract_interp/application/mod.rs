mod run_abstract_interp;

pub use run_abstract_interp::run_abstract_interp;
