use super::{ConfigError, ConfigErrorExt, ConfigStore, OptionTable, apply_document, collect_document};
use crate::registry::FeatureEntry;
use ::config::{Config, Environment, File, Map};
use modkit_domain::constants::OPTIONS_EXTENSION;
use modkit_domain::side::Side;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Stores options in one TOML file per mod and side: `<dir>/<mod_id>-<side>.toml`.
///
/// Reading layers the file (optional) with environment overrides of the form
/// `<PREFIX>__<SECTION>__<KEY>` when a prefix is configured. Override values are kept as
/// strings and coerced by [`super::decode_options`]. Writing replaces the
/// file atomically, so a crash never leaves a truncated options file behind.
///
/// ```toml
/// [container_tooltips]
/// enabled = true
/// max_rows = 3
/// ```
#[derive(Debug)]
pub struct FileConfigStore {
    dir: PathBuf,
    mod_id: String,
    env_prefix: Option<String>,
    env_vars: Option<Map<String, String>>,
    tmp_counter: AtomicU64,
}

impl FileConfigStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, mod_id: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            mod_id: mod_id.into(),
            env_prefix: None,
            env_vars: None,
            tmp_counter: AtomicU64::new(0),
        }
    }

    /// Enables environment overrides, e.g. `CHARMONY__DIAGNOSTICS__DEBUG_MODE=true`.
    #[must_use]
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Reads overrides from `vars` instead of the process environment.
    #[must_use]
    pub fn env_vars(mut self, vars: Map<String, String>) -> Self {
        self.env_vars = Some(vars);
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the options of `side`.
    #[must_use]
    pub fn path(&self, side: Side) -> PathBuf {
        self.dir.join(format!("{}-{side}.{OPTIONS_EXTENSION}", self.mod_id))
    }

    fn read(&self, side: Side) -> Result<OptionTable, ConfigError> {
        let path = self.path(side);
        let mut builder = Config::builder().add_source(File::from(path.as_path()).required(false));

        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix).separator("__").source(self.env_vars.clone()),
            );
        }

        builder
            .build()
            .context(format!("Failed to read {}", path.display()))?
            .try_deserialize::<OptionTable>()
            .context(format!("Failed to parse {}", path.display()))
    }

    fn write(&self, side: Side, document: &OptionTable) -> Result<(), ConfigError> {
        let path = self.path(side);
        let body = toml::to_string_pretty(document)?;
        let content = format!("# {} {side} options\n\n{body}", self.mod_id);

        fs::create_dir_all(&self.dir)
            .context(format!("Failed to create {}", self.dir.display()))?;

        let temp = unique_tmp_path(&path, &self.tmp_counter);
        write_temp(&temp, |file| {
            file.write_all(content.as_bytes())?;
            file.sync_all()
        })?;

        if let Err(err) = fs::rename(&temp, &path) {
            if err.kind() == io::ErrorKind::AlreadyExists {
                fs::remove_file(&path)
                    .context(format!("Failed to replace existing file: {}", path.display()))?;
                fs::rename(&temp, &path).context(format!(
                    "Atomic swap failed: {} -> {}",
                    temp.display(),
                    path.display()
                ))?;
            } else {
                let _ = fs::remove_file(&temp);
                return Err(ConfigError::Io {
                    source: err,
                    context: Some(
                        format!("Atomic swap failed: {} -> {}", temp.display(), path.display())
                            .into(),
                    ),
                });
            }
        }

        debug!(path = %path.display(), "Options saved atomically");
        Ok(())
    }
}

impl ConfigStore for FileConfigStore {
    fn populate_from_disk(&self, side: Side, features: &mut [FeatureEntry]) -> Result<(), ConfigError> {
        let document = self.read(side)?;
        debug!(%side, sections = document.len(), "Options loaded");
        apply_document(document, features)
    }

    fn write_to_disk(&self, side: Side, features: &[FeatureEntry]) -> Result<(), ConfigError> {
        self.write(side, &collect_document(features)?)
    }
}

/// Creates `temp` and fills it with `write`. A failed write removes the partial file.
fn write_temp<W>(temp: &Path, write: W) -> Result<(), ConfigError>
where
    W: FnOnce(&mut fs::File) -> io::Result<()>,
{
    let mut file = fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(temp)
        .context(format!("Temp creation failed: {}", temp.display()))?;

    if let Err(err) = write(&mut file) {
        drop(file);
        let _ = fs::remove_file(temp);
        return Err(ConfigError::Io {
            source: err,
            context: Some(format!("Write failed: {}", temp.display()).into()),
        });
    }
    Ok(())
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let counter = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("options");
    target.with_file_name(format!("{file_name}.tmp.{counter}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_failed_write_removes_the_temp_file() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("charmony-client.toml.tmp.0");

        let err = write_temp(&temp, |file| {
            file.write_all(b"[container_tooltips]\n")?;
            Err(io::Error::other("disk full"))
        })
        .unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(!temp.exists());
    }

    #[test]
    fn test_successful_write_keeps_the_temp_file() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("charmony-common.toml.tmp.0");

        write_temp(&temp, |file| file.write_all(b"[diagnostics]\n")).unwrap();

        assert_eq!(fs::read_to_string(&temp).unwrap(), "[diagnostics]\n");
    }
}
