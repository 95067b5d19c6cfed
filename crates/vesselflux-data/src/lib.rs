pub mod loader;
pub mod settings;

pub use loader::{DataLoadError, Format};
pub use settings::{Settings, ThermalSettings, find_settings_file, load_settings, load_settings_from_dir};
