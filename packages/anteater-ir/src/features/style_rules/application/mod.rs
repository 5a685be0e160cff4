mod run_style_rules;

pub use run_style_rules::run_style_rules;
