// Domain layer - Pure models and transformations
pub mod kpi;
pub mod marquee;
pub mod sheet_layout;
pub mod snapshot;
pub mod value;
pub mod weather;
