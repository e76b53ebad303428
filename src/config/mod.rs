mod loader;
pub use loader::{Config, ENV_PRIVATE_TOKEN, init_configuration, show_configuration};
