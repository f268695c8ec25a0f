use sculptor::{AppAuthor, FileIO, ProjectInfo, impl_serde_str_toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Conf {
    /// load the standard prelude into new sessions
    pub prelude: bool,
    /// have the kernel recheck every result
    pub verify: bool,
    /// log every machine step at trace level
    pub trace_steps: bool,
}

impl Default for Conf {
    fn default() -> Self {
        Conf { prelude: true, verify: true, trace_steps: false }
    }
}

impl_serde_str_toml!(Conf);

impl AppAuthor for Conf {
    fn app_name() -> &'static str {
        "Mtac"
    }

    fn author() -> &'static str {
        "The Mtac Project Developers"
    }
}

impl Conf {
    /// Where the configuration lives by default.
    pub fn path() -> PathBuf {
        Conf::config_dir().join("mtac.toml")
    }
    /// Load the configuration at the default location.
    pub fn load() -> Self {
        Self::load_from(Self::path())
    }
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
    /// Load the configuration at `path`, writing the defaults there if it is
    /// missing or unreadable.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file_conf = FileIO::new(path.to_path_buf());
        file_conf.load().unwrap_or_else(|_| {
            log::warn!("Using default configuration; expected one at `{}`.", path.display());
            let conf = Conf::default();
            if let Err(err) = file_conf.save(&conf) {
                log::warn!("Failed to write the default configuration: {}", err);
            }
            conf
        })
    }
}
