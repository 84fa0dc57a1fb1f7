pub mod cache;
pub mod export;
pub mod presenter;
pub mod reconcile;
pub mod teams;
