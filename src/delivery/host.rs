use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::script::AssembledScript;

/// An addressable transient resource bound to the download affordance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceLink {
    pub url: String,
    pub path: PathBuf,
    pub suggested_filename: String,
    pub issued_at: String,
}

/// The environment the assembled script is handed to.
pub trait Host {
    /// Whether the host can expose bytes behind an addressable link.
    fn supports_links(&self) -> bool;

    fn create_link(&mut self, script: &AssembledScript) -> Result<ResourceLink>;

    /// Release a previously issued link so it no longer resolves.
    fn revoke_link(&mut self, link: &ResourceLink) -> Result<()>;

    /// Offer the bytes directly under the suggested filename.
    fn save_as(&mut self, script: &AssembledScript) -> Result<PathBuf>;
}

fn save_into(dir: &Path, script: &AssembledScript) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    let path = dir.join(script.suggested_filename);
    fs::write(&path, &script.bytes)
        .with_context(|| format!("Failed to write script: {}", path.display()))?;
    Ok(path)
}

/// Stages each script generation as its own file under a staging directory
/// and hands out `file://` links to it.
pub struct StagingHost {
    staging_dir: PathBuf,
    save_dir: PathBuf,
    generation: u64,
}

impl StagingHost {
    pub fn new(staging_dir: impl Into<PathBuf>, save_dir: impl Into<PathBuf>) -> Self {
        StagingHost {
            staging_dir: staging_dir.into(),
            save_dir: save_dir.into(),
            generation: 0,
        }
    }
}

impl Host for StagingHost {
    fn supports_links(&self) -> bool {
        true
    }

    fn create_link(&mut self, script: &AssembledScript) -> Result<ResourceLink> {
        fs::create_dir_all(&self.staging_dir).with_context(|| {
            format!(
                "Failed to create staging directory: {}",
                self.staging_dir.display()
            )
        })?;
        self.generation += 1;

        let digest = script.digest();
        let name = format!(
            "{}-{}-{}",
            self.generation,
            &digest[..12],
            script.suggested_filename
        );
        let path = self.staging_dir.join(name);
        fs::write(&path, &script.bytes)
            .with_context(|| format!("Failed to stage script: {}", path.display()))?;
        let absolute = fs::canonicalize(&path)?;

        Ok(ResourceLink {
            url: format!("file://{}", absolute.display()),
            path: absolute,
            suggested_filename: script.suggested_filename.to_string(),
            issued_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    fn revoke_link(&mut self, link: &ResourceLink) -> Result<()> {
        match fs::remove_file(&link.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to release staged script: {}", link.path.display())),
        }
    }

    fn save_as(&mut self, script: &AssembledScript) -> Result<PathBuf> {
        save_into(&self.save_dir, script)
    }
}

/// A host without link support: scripts are always written straight to disk.
pub struct SaveHost {
    save_dir: PathBuf,
}

impl SaveHost {
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        SaveHost {
            save_dir: save_dir.into(),
        }
    }
}

impl Host for SaveHost {
    fn supports_links(&self) -> bool {
        false
    }

    fn create_link(&mut self, _script: &AssembledScript) -> Result<ResourceLink> {
        bail!("Addressable links are not supported by this host")
    }

    fn revoke_link(&mut self, _link: &ResourceLink) -> Result<()> {
        Ok(())
    }

    fn save_as(&mut self, script: &AssembledScript) -> Result<PathBuf> {
        save_into(&self.save_dir, script)
    }
}
