use modkit_diagnostics::{Diagnostics, DiagnosticsOptions};
use modkit_kernel::config::{FileConfigStore, MemoryConfigStore};
use modkit_kernel::prelude::*;
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn run_logged(host: &mut Mod) -> String {
    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, || host.run(Side::Common))
        .expect("common side should run");
    let bytes = buffer.0.lock().expect("buffer lock").clone();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn seeded(document: &str) -> MemoryConfigStore {
    let store = MemoryConfigStore::new();
    store.set(Side::Common, toml::from_str(document).expect("valid document"));
    store
}

#[test]
fn defaults_are_quiet() {
    let mut host = Mod::builder().id("charmony").name("Charmony").build().unwrap();
    host.add_feature::<Diagnostics>().unwrap();

    let logs = run_logged(&mut host);

    let diagnostics = host.feature::<Diagnostics>().unwrap();
    assert_eq!(diagnostics.options(), DiagnosticsOptions::default());
    assert!(!logs.contains("MIXIN DISABLE MODE"));
    assert!(logs.contains("✔ Running feature Diagnostics"));
}

#[test]
fn mixin_disable_mode_logs_a_banner() {
    let store = seeded("[diagnostics]\nmixins_disable_mode = true\n");
    let mut host = Mod::builder().id("charmony").name("Charmony").config(store).build().unwrap();
    host.add_feature::<Diagnostics>().unwrap();

    let logs = run_logged(&mut host);

    let diagnostics = host.feature::<Diagnostics>().unwrap();
    assert!(diagnostics.mixins_disabled());
    assert!(!diagnostics.debug_mode());
    assert!(logs.contains("CHARMONY IS RUNNING IN MIXIN DISABLE MODE"));
}

#[test]
fn diagnostics_cannot_be_disabled() {
    let store = seeded("[diagnostics]\nenabled = false\ndebug_mode = true\n");
    let mut host = Mod::builder().id("charmony").config(store).build().unwrap();
    host.add_feature::<Diagnostics>().unwrap();

    let logs = run_logged(&mut host);

    assert_eq!(host.is_enabled::<Diagnostics>(), Some(true));
    assert!(host.feature::<Diagnostics>().unwrap().debug_mode());
    assert!(logs.contains("Debug mode is enabled for charmony"));
}

#[test]
fn options_file_has_no_enabled_key() {
    let dir = tempdir().unwrap();
    let store = FileConfigStore::new(dir.path(), "charmony");
    let path = store.path(Side::Common);
    let mut host = Mod::builder().id("charmony").config(store).build().unwrap();
    host.add_feature::<Diagnostics>().unwrap();

    host.run(Side::Common).unwrap();

    let written: OptionTable = toml::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    let section = written["diagnostics"].as_table().unwrap();
    assert!(!section.contains_key("enabled"));
    assert_eq!(section["debug_mode"].as_bool(), Some(false));
    assert_eq!(section["mixins_disable_mode"].as_bool(), Some(false));
}

#[feature_definition(side = Common, priority = 10)]
#[derive(Debug)]
struct Sorting;

impl Feature for Sorting {
    fn construct(_setup: &mut FeatureSetup<'_>) -> Result<Self, FeatureError> {
        Ok(Self)
    }

    fn run(&self, host: &Mod) -> Result<(), FeatureError> {
        if let Some(diagnostics) = host.try_feature::<Diagnostics>() {
            diagnostics.debug("Sorting 4 stacks");
        }
        Ok(())
    }
}

#[test]
fn debug_messages_follow_debug_mode() {
    let store = seeded("[diagnostics]\ndebug_mode = true\n");
    let mut host = Mod::builder().id("charmony").config(store).build().unwrap();
    host.add_feature::<Diagnostics>().unwrap();
    host.add_feature::<Sorting>().unwrap();

    let logs = run_logged(&mut host);
    assert!(logs.contains("[debug] Sorting 4 stacks"));
    assert!(logs.contains("[debug] DiagnosticsOptions"));

    let mut quiet = Mod::builder().id("charmony").build().unwrap();
    quiet.add_feature::<Diagnostics>().unwrap();
    quiet.add_feature::<Sorting>().unwrap();

    let logs = run_logged(&mut quiet);
    assert!(logs.contains("✔ Running feature Sorting"));
    assert!(!logs.contains("[debug]"));
}
