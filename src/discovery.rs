use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extensions treated as string catalogs by default
pub const DEFAULT_EXTENSIONS: &[&str] = &["txt", "json"];

/// Configuration for catalog discovery behavior
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Whether to fail fast on the first unreadable directory entry
    pub fail_fast: bool,
    /// Honour .gitignore / .ignore files under the root
    pub respect_ignore: bool,
    /// File extensions to collect, without the leading dot
    pub extensions: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            respect_ignore: true,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

impl DiscoveryConfig {
    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
    }
}

/// Collect every catalog file under `root_dir`, sorted by path
///
/// # Arguments
/// * `root_dir` - Root directory to search recursively
/// * `config` - Discovery configuration (fail_fast, ignore files, extensions)
pub async fn discover_catalogs(
    root_dir: impl AsRef<Path>,
    config: &DiscoveryConfig,
) -> Result<Vec<PathBuf>> {
    let root_path = root_dir.as_ref().to_path_buf();

    if !root_path.exists() {
        anyhow::bail!("Root directory does not exist: {}", root_path.display());
    }
    if !root_path.is_dir() {
        anyhow::bail!("Root path is not a directory: {}", root_path.display());
    }

    let config = config.clone();
    // WHY: the ignore walker is blocking; keep it off the async worker threads
    tokio::task::spawn_blocking(move || walk_catalogs(&root_path, &config)).await?
}

fn walk_catalogs(root_path: &Path, config: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    info!("Starting catalog discovery in: {}", root_path.display());
    let traversal_start = std::time::Instant::now();

    let walker = WalkBuilder::new(root_path)
        .follow_links(false)
        .hidden(false)
        .ignore(config.respect_ignore)
        .git_ignore(config.respect_ignore)
        .git_exclude(config.respect_ignore)
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();

    let mut catalogs = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                if config.fail_fast {
                    return Err(e.into());
                }
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if config.matches(entry.path()) {
            debug!("Found catalog: {}", entry.path().display());
            catalogs.push(entry.into_path());
        }
    }

    catalogs.sort();
    info!(
        "Catalog discovery completed: {} files in {:.2}ms",
        catalogs.len(),
        traversal_start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(catalogs)
}
