pub mod cli;
pub mod constants;
pub mod conversion;
pub mod geometry;
pub mod integrity;
pub mod labels;
pub mod logging;
pub mod mpc_export;
pub mod neo_ml_errors;
pub mod observers;
pub mod records;
pub mod sample_data;
pub mod schema;
pub mod time;

pub use neo_ml_errors::NeoMlError;
pub use records::SampleRecord;
pub use sample_data::SampleData;
