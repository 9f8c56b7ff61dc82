pub mod environment;
pub mod initialization;

pub use environment::{get_database_filename, get_environment, Environment};
pub use initialization::{
    initialize_application, initialize_logging_system, load_environment_variables,
    log_initialization_complete, InitializationResult,
};
