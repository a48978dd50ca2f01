//! CLI command handlers. Each step prints the same progress lines whether run alone or via `all`.

mod all;
mod fetch;
mod generate;
mod normalize;

pub use all::run_all;
pub use fetch::run_fetch;
pub use generate::run_generate;
pub use normalize::run_normalize;
