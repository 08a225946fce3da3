pub mod detail;
pub mod entity;
pub mod horizon;
pub mod news;
pub mod quote;
pub mod trend;
