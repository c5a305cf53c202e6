pub mod import;
pub mod prioritization;
