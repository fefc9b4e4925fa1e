use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// gRPC server for a single manga volume.
#[derive(Parser, Debug, Clone)]
#[command(name = "manga-rs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file.
    #[arg(short, long, env = "MANGA_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the server (default if no command given).
    Serve {
        /// Address to bind the server to.
        #[arg(short, long)]
        bind: Option<SocketAddr>,

        /// Path to the volume (directory or .cbz archive).
        #[arg(short, long)]
        volume: Option<PathBuf>,
    },

    /// Print a volume's metadata without serving it.
    Info {
        /// Path to the volume (directory or .cbz archive).
        path: PathBuf,
    },

    /// Create a default config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Main configuration from TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Volume configuration.
    #[serde(default)]
    pub volume: VolumeConfig,

    /// Page cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::new(std::net::IpAddr::V6(std::net::Ipv6Addr::LOCALHOST), 8080)
}

/// Volume configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeConfig {
    /// Path to the volume (directory or .cbz archive).
    #[serde(default = "default_volume_path")]
    pub path: PathBuf,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            path: default_volume_path(),
        }
    }
}

fn default_volume_path() -> PathBuf {
    PathBuf::from("assets")
}

/// Page cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of pages held in memory (0 is treated as 1).
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_capacity() -> usize {
    32
}

impl Config {
    /// Load configuration from file.
    pub fn load(path: &PathBuf) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to read config file: {}", e))
        })?;

        toml::from_str(&content).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to parse config file: {}", e))
        })
    }

    /// Find config file in default locations.
    pub fn find_config_file() -> Option<PathBuf> {
        let candidates = [
            PathBuf::from("config.toml"),
            PathBuf::from("manga-rs.toml"),
            dirs::config_dir()
                .map(|p| p.join("manga-rs").join("config.toml"))
                .unwrap_or_default(),
            PathBuf::from("/etc/manga-rs/config.toml"),
        ];

        candidates.into_iter().find(|p| p.exists())
    }

    /// Generate default config file content.
    pub fn generate_default() -> String {
        r#"# manga-rs configuration

[server]
bind = "[::1]:8080"

[volume]
# Directory layout: manga.json + cover.jpg + images/{n}.jpg
# or a .cbz archive with an embedded manga.json
path = "assets"

[cache]
# Maximum number of pages kept in memory
capacity = 32
"#
        .to_string()
    }
}

/// Supported volume backings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeFormat {
    /// Flat directory with a metadata record and an `images/` folder.
    Dir,
    /// CBZ/ZIP comic book archive.
    Cbz,
}

impl VolumeFormat {
    /// Detect the backing format from a volume path.
    pub fn detect(path: &Path) -> Option<Self> {
        if path.is_dir() {
            return Some(VolumeFormat::Dir);
        }

        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "cbz" | "zip" => Some(VolumeFormat::Cbz),
            _ => None,
        }
    }
}
