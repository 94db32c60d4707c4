pub mod console;
pub mod effects;
pub mod interactive;
pub mod logging;
pub mod settings;
