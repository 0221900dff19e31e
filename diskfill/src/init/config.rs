use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tokio::{fs, io::AsyncReadExt, sync::OnceCell};

use crate::{
    error::Error,
    filler::{Method, Sizing},
};

pub static CONFIG: OnceCell<GlobalConfig> = OnceCell::const_new();

static CONFIG_PATH: &str = "config/config.toml";
static CONFIG_ENV: &str = "DISKFILL_CONFIG";

// config
#[derive(Serialize, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    #[serde(default)]
    pub filler: Filler,
    #[serde(default)]
    pub reporter: Reporter,
    #[serde(default)]
    pub runtime: Runtime,
    #[serde(default = "default_log_level")]
    pub log_level: usize,
}

fn default_log_level() -> usize {
    2
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            filler: Default::default(),
            reporter: Default::default(),
            runtime: Default::default(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(deny_unknown_fields, default)]
pub struct Filler {
    /// directory the temporary files are created in
    pub directory: PathBuf,
    pub max_workers: usize,
    pub methods: Vec<Method>,
    pub block_size: usize,
    pub blocks_per_file: usize,
    pub sparse_size: u64,
    pub small_block: usize,
    pub small_writes: usize,
}

impl Filler {
    pub fn sizing(&self) -> Sizing {
        Sizing {
            block_size: self.block_size,
            blocks_per_file: self.blocks_per_file,
            sparse_size: self.sparse_size,
            small_block: self.small_block,
            small_writes: self.small_writes,
        }
    }
}

impl Default for Filler {
    fn default() -> Self {
        let sizing = Sizing::default();
        Self {
            directory: PathBuf::from("."),
            max_workers: 10,
            methods: Method::ALL.to_vec(),
            block_size: sizing.block_size,
            blocks_per_file: sizing.blocks_per_file,
            sparse_size: sizing.sparse_size,
            small_block: sizing.small_block,
            small_writes: sizing.small_writes,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(deny_unknown_fields, default)]
pub struct Reporter {
    pub interval_ms: u64,
    /// reset the file rate every n-th display
    pub reset_every: u64,
}

impl Reporter {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self {
            interval_ms: 500,
            reset_every: 2,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(deny_unknown_fields, default)]
pub struct Runtime {
    pub ignore_interrupt: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self {
            ignore_interrupt: true,
        }
    }
}

impl GlobalConfig {
    pub fn parse(text: &str) -> Result<Self, Error> {
        let config: GlobalConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
    fn validate(&self) -> Result<(), Error> {
        let checks = [
            (self.filler.max_workers == 0, "filler.max_workers must be non-zero"),
            (self.filler.block_size == 0, "filler.block_size must be non-zero"),
            (self.filler.sparse_size == 0, "filler.sparse_size must be non-zero"),
            (self.filler.small_block == 0, "filler.small_block must be non-zero"),
            (self.reporter.interval_ms == 0, "reporter.interval_ms must be non-zero"),
            (self.reporter.reset_every == 0, "reporter.reset_every must be non-zero"),
        ];
        match checks.into_iter().find(|(failed, _)| *failed) {
            Some((_, reason)) => Err(Error::InvalidConfig(reason)),
            None => Ok(()),
        }
    }
}

fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_PATH))
}

// only a missing file falls back to defaults, an unreadable one is an error
async fn load(path: &Path) -> Result<GlobalConfig, Error> {
    let mut file = match fs::File::open(path).await {
        Ok(x) => x,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            println!("Unable to find {}, using default config", path.display());
            return Ok(GlobalConfig::default());
        }
        Err(err) => return Err(Error::IO(err)),
    };
    if !file.metadata().await?.is_file() {
        return Err(Error::InvalidConfig(
            "config path should not be symlink or folder",
        ));
    }
    let mut buf = String::new();
    file.read_to_string(&mut buf).await?;
    GlobalConfig::parse(&buf)
}

pub async fn init() {
    if CONFIG.get().is_some() {
        #[cfg(not(test))]
        panic!("config have been set twice, which indicated a bug in the program");
        #[cfg(test)]
        return;
    }
    match load(&config_path()).await {
        Ok(config) => {
            CONFIG.set(config).ok();
        }
        Err(err) => {
            println!("Unable to load config: {}", err);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_is_default() {
        let config = GlobalConfig::parse("").unwrap();
        assert_eq!(config.filler.max_workers, 10);
        assert_eq!(config.filler.methods, Method::ALL.to_vec());
        assert_eq!(config.filler.directory, PathBuf::from("."));
        assert_eq!(config.reporter.interval(), Duration::from_millis(500));
        assert_eq!(config.reporter.reset_every, 2);
        assert!(config.runtime.ignore_interrupt);
        assert_eq!(config.log_level, 2);
    }
    #[test]
    fn default_sizing_matches_reference() {
        let sizing = GlobalConfig::default().filler.sizing();
        assert_eq!(sizing.block_size, 10 * 1024 * 1024);
        assert_eq!(sizing.blocks_per_file, 100);
        assert_eq!(sizing.sparse_size, 1024 * 1024 * 1024);
        assert_eq!(sizing.small_block, 1024);
        assert_eq!(sizing.small_writes, 1024);
    }
    #[test]
    fn partial_override() {
        let config = GlobalConfig::parse(
            r#"
            log_level = 4
            [filler]
            methods = ["sparse_files", "small_files"]
            directory = "/mnt/target"
            [runtime]
            ignore_interrupt = false
            "#,
        )
        .unwrap();
        assert_eq!(
            config.filler.methods,
            vec![Method::SparseFiles, Method::SmallFiles]
        );
        assert_eq!(config.filler.directory, PathBuf::from("/mnt/target"));
        assert_eq!(config.filler.block_size, 10 * 1024 * 1024);
        assert!(!config.runtime.ignore_interrupt);
        assert_eq!(config.log_level, 4);
    }
    #[test]
    fn unknown_field() {
        assert!(matches!(
            GlobalConfig::parse("[filler]\nblock = 1\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            GlobalConfig::parse("[filler]\nmethods = [\"fallocate\"]\n"),
            Err(Error::Config(_))
        ));
    }
    #[test]
    fn zero_interval() {
        assert!(matches!(
            GlobalConfig::parse("[reporter]\ninterval_ms = 0\n"),
            Err(Error::InvalidConfig(_))
        ));
    }
    #[tokio::test]
    async fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir.path().join("config.toml")).await.unwrap();
        assert_eq!(config.filler.directory, PathBuf::from("."));
    }
    #[tokio::test]
    async fn unreadable_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.toml");
        let b = dir.path().join("b.toml");
        std::os::unix::fs::symlink(&b, &a).unwrap();
        std::os::unix::fs::symlink(&a, &b).unwrap();
        assert!(matches!(load(&a).await, Err(Error::IO(_))));
    }
    #[tokio::test]
    async fn folder_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(dir.path()).await,
            Err(Error::InvalidConfig(_))
        ));
    }
    #[tokio::test]
    async fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[filler]\ndirectory = \"/mnt/target\"\n").unwrap();
        let config = load(&path).await.unwrap();
        assert_eq!(config.filler.directory, PathBuf::from("/mnt/target"));
    }
    #[tokio::test]
    async fn default() {
        init().await;
        assert!(CONFIG.get().is_some());
    }
}
