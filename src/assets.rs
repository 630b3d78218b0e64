//! Folio's bundled assets: the post index, the tag counts and the default
//! config.
//!
//! All three are embedded in the binary. `CONTENT_DIR` and `CONFIG_FILE`
//! point at filesystem copies that take precedence file by file; any
//! asset missing on disk is read from the embedded copy.

use rust_embed::RustEmbed;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
#[include = "content/posts.yaml"]
#[include = "content/tag-data.json"]
struct Embedded;

/// One of the files Folio reads at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Posts,
    TagData,
    Config,
}

impl Asset {
    pub const CONTENT: [Asset; 2] = [Asset::Posts, Asset::TagData];
    pub const ALL: [Asset; 3] = [Asset::Posts, Asset::TagData, Asset::Config];

    pub fn file_name(self) -> &'static str {
        match self {
            Asset::Posts => "posts.yaml",
            Asset::TagData => "tag-data.json",
            Asset::Config => "config.yaml",
        }
    }

    /// Path inside the embedded set, also the default extraction path.
    pub fn default_path(self) -> &'static str {
        match self {
            Asset::Posts => "content/posts.yaml",
            Asset::TagData => "content/tag-data.json",
            Asset::Config => "config.yaml",
        }
    }

    fn embedded(self) -> io::Result<Vec<u8>> {
        Embedded::get(self.default_path())
            .map(|f| f.data.into_owned())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Embedded {} not found", self.default_path()),
                )
            })
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Where an asset is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Filesystem(PathBuf),
    Embedded,
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Reads assets from configured paths with embedded fallback
pub struct AssetLoader {
    /// External content directory (from CONTENT_DIR env var)
    content_dir: Option<PathBuf>,
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Paths should be `Some` only if the corresponding env var was set.
    /// If `None`, embedded assets are used exclusively.
    pub fn new(content_dir: Option<PathBuf>, config_file: Option<PathBuf>) -> Self {
        Self {
            content_dir,
            config_file,
        }
    }

    /// Create a loader from `CONTENT_DIR` and `CONFIG_FILE`
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("CONTENT_DIR").ok().map(PathBuf::from),
            std::env::var("CONFIG_FILE").ok().map(PathBuf::from),
        )
    }

    /// The configured filesystem location of `asset`, if any.
    pub fn external_path(&self, asset: Asset) -> Option<PathBuf> {
        match asset {
            Asset::Config => self.config_file.clone(),
            Asset::Posts | Asset::TagData => {
                self.content_dir.as_ref().map(|dir| dir.join(asset.file_name()))
            }
        }
    }

    pub fn source(&self, asset: Asset) -> AssetSource {
        match self.external_path(asset) {
            Some(path) if path.exists() => AssetSource::Filesystem(path),
            _ => AssetSource::Embedded,
        }
    }

    /// Read `asset` as UTF-8, preferring the filesystem copy.
    pub fn read(&self, asset: Asset) -> io::Result<String> {
        let bytes = match self.source(asset) {
            AssetSource::Filesystem(path) => {
                tracing::trace!(path = %path.display(), "Loading asset from filesystem");
                fs::read(&path)?
            }
            AssetSource::Embedded => {
                tracing::trace!(asset = %asset, "Loading asset from embedded copy");
                asset.embedded()?
            }
        };
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Write the embedded copy to every configured path that is missing.
    ///
    /// Returns the assets that were written.
    pub fn seed_if_configured(&self) -> io::Result<Vec<Asset>> {
        let mut seeded = Vec::new();
        for asset in Asset::ALL {
            let Some(path) = self.external_path(asset) else {
                continue;
            };
            if path.exists() {
                continue;
            }
            write_asset(asset, &path)?;
            tracing::info!(path = %path.display(), "Seeded asset with embedded default");
            seeded.push(asset);
        }
        Ok(seeded)
    }

    /// Extract embedded copies of `assets` (init command).
    ///
    /// Uses the configured paths, else `./content/` and `./config.yaml`.
    pub fn init(&self, assets: &[Asset], force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for &asset in assets {
            let path = self
                .external_path(asset)
                .unwrap_or_else(|| PathBuf::from(asset.default_path()));
            if !force && path.exists() {
                report.skipped.push(path);
                continue;
            }
            write_asset(asset, &path)?;
            report.written.push(path);
        }

        Ok(report)
    }
}

fn write_asset(asset: Asset, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, asset.embedded()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_asset_is_embedded() {
        for asset in Asset::ALL {
            assert!(asset.embedded().is_ok(), "{asset} missing");
        }
    }

    #[test]
    fn test_read_embedded_without_overrides() {
        let loader = AssetLoader::new(None, None);
        assert_eq!(loader.source(Asset::Posts), AssetSource::Embedded);
        assert!(loader.read(Asset::Posts).unwrap().contains("canvas-grayscale"));
        assert!(loader.read(Asset::Config).unwrap().contains("posts_per_page"));
    }

    #[test]
    fn test_external_content_overrides_embedded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tag-data.json"), r#"{"only": 1}"#).unwrap();

        let loader = AssetLoader::new(Some(dir.path().to_path_buf()), None);
        assert_eq!(loader.read(Asset::TagData).unwrap(), r#"{"only": 1}"#);
        assert_eq!(
            loader.source(Asset::TagData),
            AssetSource::Filesystem(dir.path().join("tag-data.json"))
        );

        // Files not present externally still come from the embedded set
        assert_eq!(loader.source(Asset::Posts), AssetSource::Embedded);
        assert!(loader.read(Asset::Posts).unwrap().contains("canvas-grayscale"));
    }

    #[test]
    fn test_seed_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("content");
        let config = dir.path().join("conf/config.yaml");

        let loader = AssetLoader::new(Some(content.clone()), Some(config.clone()));
        let seeded = loader.seed_if_configured().unwrap();

        assert_eq!(seeded, Asset::ALL.to_vec());
        assert!(content.join("posts.yaml").exists());
        assert!(content.join("tag-data.json").exists());
        assert!(config.exists());

        // Second run has nothing to do
        assert!(loader.seed_if_configured().unwrap().is_empty());
    }

    #[test]
    fn test_seed_keeps_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("posts.yaml"), "[]\n").unwrap();

        let loader = AssetLoader::new(Some(dir.path().to_path_buf()), None);
        assert_eq!(loader.seed_if_configured().unwrap(), vec![Asset::TagData]);
        assert_eq!(loader.read(Asset::Posts).unwrap(), "[]\n");
    }

    #[test]
    fn test_init_skips_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.yaml");
        fs::write(&config, "site: {}\n").unwrap();

        let loader = AssetLoader::new(None, Some(config.clone()));
        let report = loader.init(&[Asset::Config], false).unwrap();
        assert_eq!(report.skipped, vec![config.clone()]);
        assert!(report.written.is_empty());

        let report = loader.init(&[Asset::Config], true).unwrap();
        assert_eq!(report.written, vec![config.clone()]);
        assert!(fs::read_to_string(&config).unwrap().contains("posts_per_page"));
    }
}
