#![allow(dead_code)]

use modkit_kernel::config::{
    ConfigError, ConfigStore, MemoryConfigStore, OptionTable, decode_options, encode_options,
};
use modkit_kernel::prelude::*;
use modkit_kernel::registry::FeatureEntry;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

/// Ordered record of lifecycle events, shared between a test and its features.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn contains(&self, event: &str) -> bool {
        self.0.lock().iter().any(|e| e == event)
    }
}

pub trait Probe: Feature + Sized {
    fn with_journal(journal: Journal) -> Self;
}

macro_rules! probes {
    ($($name:ident),* $(,)?) => {$(
        #[derive(Debug)]
        pub struct $name {
            journal: Journal,
        }

        impl Probe for $name {
            fn with_journal(journal: Journal) -> Self {
                Self { journal }
            }
        }

        impl Feature for $name {
            fn construct(_setup: &mut FeatureSetup<'_>) -> Result<Self, FeatureError> {
                Err(FeatureError::from("probes are registered through add_probe"))
            }

            fn run(&self, _host: &Mod) -> Result<(), FeatureError> {
                self.journal.push(format!("run:{}", stringify!($name)));
                Ok(())
            }
        }
    )*};
}

probes!(Alpha, Beta, Gamma, Delta, Broken);

/// Registers a probe that journals its construction, one boot step and its run.
pub fn add_probe<F: Probe>(host: &mut Mod, journal: &Journal, meta: FeatureMeta) -> Result<(), ModError> {
    let journal = journal.clone();
    host.add_feature_with::<F, _>(meta, move |setup| {
        let name = setup.type_name();
        journal.push(format!("construct:{name}"));

        let boot_journal = journal.clone();
        setup.add_boot_step(move || {
            boot_journal.push(format!("boot:{name}"));
            Ok(())
        });

        Ok(F::with_journal(journal.clone()))
    })
}

/// A feature that cannot be switched off, even though it defaults to off.
#[feature_definition(side = Common, can_be_disabled = false, enabled_by_default = false)]
#[derive(Debug)]
pub struct Mandatory;

impl Feature for Mandatory {
    fn construct(_setup: &mut FeatureSetup<'_>) -> Result<Self, FeatureError> {
        Ok(Self)
    }
}

/// A feature that is off unless configuration turns it on.
#[feature_definition(side = Common, enabled_by_default = false)]
#[derive(Debug)]
pub struct Dormant;

impl Feature for Dormant {
    fn construct(_setup: &mut FeatureSetup<'_>) -> Result<Self, FeatureError> {
        Ok(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipOptions {
    pub max_rows: u32,
    pub show_empty: bool,
    pub title: String,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self { max_rows: 3, show_empty: false, title: "Contents".to_owned() }
    }
}

/// A client feature with its own persisted options.
#[feature_definition(side = Client, priority = 5, description = "Shows container contents.")]
#[derive(Debug, Default)]
pub struct ContainerTooltips {
    pub options: TooltipOptions,
}

impl Feature for ContainerTooltips {
    fn construct(_setup: &mut FeatureSetup<'_>) -> Result<Self, FeatureError> {
        Ok(Self::default())
    }

    fn save_options(&self) -> Result<OptionTable, ConfigError> {
        encode_options(&self.options)
    }

    fn load_options(&mut self, options: OptionTable) -> Result<(), ConfigError> {
        self.options = decode_options(options)?;
        Ok(())
    }
}

/// Counts configuration calls and keeps documents in memory.
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryConfigStore,
    calls: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub fn seeded(side: Side, document: &str) -> Self {
        let store = Self::default();
        store.inner.set(side, toml::from_str(document).expect("valid seed document"));
        store
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn document(&self, side: Side) -> Option<OptionTable> {
        self.inner.get(side)
    }
}

impl ConfigStore for RecordingStore {
    fn populate_from_disk(&self, side: Side, features: &mut [FeatureEntry]) -> Result<(), ConfigError> {
        self.calls.lock().push(format!("populate:{side}"));
        self.inner.populate_from_disk(side, features)
    }

    fn write_to_disk(&self, side: Side, features: &[FeatureEntry]) -> Result<(), ConfigError> {
        self.calls.lock().push(format!("write:{side}"));
        self.inner.write_to_disk(side, features)
    }
}

/// Collects formatted log output for assertions.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` with a debug-level subscriber writing into the returned buffer.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, CapturedLogs) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs)
}

pub fn host(id: &str) -> Mod {
    Mod::builder().id(id).build().expect("valid mod id")
}

pub fn host_with_store(id: &str, store: &Arc<RecordingStore>) -> Mod {
    Mod::builder().id(id).config(Arc::clone(store)).build().expect("valid mod id")
}
