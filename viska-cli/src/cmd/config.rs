//! `viska.conf` persistence.
//!
//! The file holds `key=value` lines. Unknown keys and blank or `#` lines are
//! ignored on load.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{Error, Result};

const FILE_NAME: &str = "viska.conf";

/// Base config directory for the CLI.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("viska-cli")
}

/// Where `viska.conf` lives unless `--config` says otherwise.
pub fn default_path() -> PathBuf {
    config_dir().join(FILE_NAME)
}

/// Default directory relative profile names resolve against.
pub fn default_profiles_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("viska-cli")
        .join("profiles")
}

/// Persistent CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Log filter directive.
    pub log_level: Option<String>,
    /// Directory relative profile names resolve against.
    pub profiles_dir: Option<PathBuf>,
}

impl Config {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::io(format!("load {}", path.display()))(e)),
        }
    }

    /// Save to `path`, creating its directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(Error::io("mkdir"))?;
        }
        fs::write(path, self.render()).map_err(Error::io(format!("write {}", path.display())))
    }

    pub fn parse(text: &str) -> Self {
        let mut cfg = Self::default();
        for line in text.lines().map(str::trim) {
            if line.starts_with('#') {
                continue;
            }
            if let Some((k, v)) = line.split_once('=') {
                // Unknown keys are skipped so older binaries accept newer files.
                let _ = cfg.set(k.trim(), v.trim());
            }
        }
        cfg
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(level) = &self.log_level {
            out.push_str(&format!("log_level={level}\n"));
        }
        if let Some(dir) = &self.profiles_dir {
            out.push_str(&format!("profiles_dir={}\n", dir.display()));
        }
        out
    }

    /// Set one key. An empty value clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = (!value.is_empty()).then(|| value.to_owned());
        match key {
            "log_level" => self.log_level = value,
            "profiles_dir" => self.profiles_dir = value.map(PathBuf::from),
            _ => return Err(Error::InvalidArgument(format!("unknown config key: {key}"))),
        }
        Ok(())
    }

    /// Effective profiles directory.
    pub fn profiles_dir(&self) -> PathBuf {
        self.profiles_dir
            .clone()
            .unwrap_or_else(default_profiles_dir)
    }
}

/// `viska config [--set key=value]`.
pub fn run(path: &Path, mut cfg: Config, set: Option<&str>) -> Result<()> {
    if let Some(assignment) = set {
        let (k, v) = assignment.split_once('=').ok_or_else(|| {
            Error::InvalidArgument(format!("expected key=value, got {assignment}"))
        })?;
        cfg.set(k.trim(), v.trim())?;
        cfg.save(path)?;
        eprintln!("Saved {}", path.display());
    }

    println!("Config file:   {}", path.display());
    println!(
        "log_level:     {}",
        cfg.log_level
            .as_deref()
            .unwrap_or(riko_runtime::logger::DEFAULT_LEVEL)
    );
    println!("profiles_dir:  {}", cfg.profiles_dir().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_known_keys_and_skips_the_rest() {
        let cfg = Config::parse(
            "# viska\nlog_level = debug\ncolour=blue\n\nprofiles_dir=/tmp/viska\nnot a pair\n",
        );
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        assert_eq!(cfg.profiles_dir, Some(PathBuf::from("/tmp/viska")));
    }

    #[test]
    fn render_then_parse_keeps_values() {
        let cfg = Config {
            log_level: Some("viska_core=trace".into()),
            profiles_dir: Some(PathBuf::from("/srv/profiles")),
        };
        assert_eq!(Config::parse(&cfg.render()), cfg);
        assert_eq!(Config::default().render(), "");
    }

    #[test]
    fn set_rejects_unknown_keys_and_clears_on_empty() {
        let mut cfg = Config::parse("log_level=warn");
        assert!(matches!(
            cfg.set("colour", "blue"),
            Err(Error::InvalidArgument(_))
        ));
        cfg.set("log_level", "").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("viska-cli-test-missing").join(FILE_NAME);
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("viska-cli-test-{}", std::process::id()));
        let path = dir.join(FILE_NAME);
        let cfg = Config {
            log_level: Some("error".into()),
            profiles_dir: None,
        };
        cfg.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), cfg);
        let _ = fs::remove_dir_all(dir);
    }
}
