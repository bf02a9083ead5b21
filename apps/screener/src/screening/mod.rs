pub mod evaluate;
pub mod reconcile;
pub mod requirement;
pub mod scoring;
