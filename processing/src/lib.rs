pub mod error;
pub mod executable_utils;
pub mod export;
pub mod importer;
pub mod model;
pub mod processor;
pub mod scorers;
pub mod summary;
