//! Sheet state and logic (UI-agnostic).

mod eval;
mod ops;
mod propagate;
mod state;

pub use state::Sheet;
