use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};
use tracing::{level_filters::LevelFilter, Level, Metadata};
use tracing_subscriber::{filter::FilterFn, fmt, layer::SubscriberExt, Layer, Registry};

use crate::config::{LoggingConfig, Section};

const DEFAULT_MAX_SIZE_MB: u64 = 100;
const DEFAULT_MAX_BACKUPS: usize = 5;

fn parse_tracing_level(s: &str) -> Option<Level> {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" | "" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

/// True if `target` is `prefix` itself or one of its `::` children.
fn matches_target_prefix(target: &str, prefix: &str) -> bool {
    target == prefix
        || (target.starts_with(prefix) && target[prefix.len()..].starts_with("::"))
}

// -------- rotating file writer --------

#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log writer mutex poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log writer mutex poisoned"))?
            .flush()
    }
}

/// Writer handed to the file layer; `None` swallows the record.
struct MaybeWriter(Option<RotWriter>);

impl Write for MaybeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.0 {
            Some(w) => w.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.0 {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

/// Resolve a log file path against the service home directory.
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

fn create_rotating_writer_at_path(
    log_path: &Path,
    max_bytes: usize,
    max_backups: usize,
) -> io::Result<RotWriter> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(FileLimit::MaxFiles(max_backups)),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

// -------- routing table --------

/// Effective sinks for one logging section.
#[derive(Clone, Default)]
struct Route {
    console: Option<Level>,
    file: Option<(Level, RotWriter)>,
}

impl Route {
    fn from_section(name: &str, section: &Section, base_dir: &Path) -> Self {
        let console = parse_tracing_level(&section.console_level);

        let file = if section.file.trim().is_empty() {
            None
        } else {
            parse_tracing_level(&section.file_level).and_then(|level| {
                let path = resolve_log_path(section.file.trim(), base_dir);
                let max_bytes = section.max_size_mb.unwrap_or(DEFAULT_MAX_SIZE_MB) * 1024 * 1024;
                let backups = section.max_backups.unwrap_or(DEFAULT_MAX_BACKUPS);
                match create_rotating_writer_at_path(&path, max_bytes as usize, backups) {
                    Ok(w) => Some((level, w)),
                    Err(e) => {
                        eprintln!(
                            "Failed to init log file for '{}': {} ({})",
                            name,
                            path.display(),
                            e
                        );
                        None
                    }
                }
            })
        };

        Self { console, file }
    }
}

/// Target prefix → sinks. The "default" section catches everything that no
/// explicit prefix claims.
#[derive(Clone, Default)]
struct Routing {
    default: Route,
    // Longest prefix first so nested targets win over their parents.
    by_prefix: Vec<(String, Route)>,
}

impl Routing {
    fn build(cfg: &LoggingConfig, base_dir: &Path) -> Self {
        let default = cfg
            .get("default")
            .map(|s| Route::from_section("default", s, base_dir))
            .unwrap_or_default();

        let mut by_prefix: Vec<(String, Route)> = cfg
            .iter()
            .filter(|(k, _)| k.as_str() != "default")
            .map(|(k, s)| (k.clone(), Route::from_section(k, s, base_dir)))
            .collect();
        by_prefix.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        Self { default, by_prefix }
    }

    fn route_for(&self, target: &str) -> &Route {
        self.by_prefix
            .iter()
            .find(|(prefix, _)| matches_target_prefix(target, prefix))
            .map(|(_, r)| r)
            .unwrap_or(&self.default)
    }

    fn console_enabled(&self, meta: &Metadata<'_>) -> bool {
        self.route_for(meta.target())
            .console
            .is_some_and(|max| *meta.level() <= max)
    }

    fn file_enabled(&self, meta: &Metadata<'_>) -> bool {
        self.route_for(meta.target())
            .file
            .as_ref()
            .is_some_and(|(max, _)| *meta.level() <= *max)
    }

    fn has_files(&self) -> bool {
        self.default.file.is_some() || self.by_prefix.iter().any(|(_, r)| r.file.is_some())
    }

    fn max_level(&self) -> LevelFilter {
        std::iter::once(&self.default)
            .chain(self.by_prefix.iter().map(|(_, r)| r))
            .flat_map(|r| [r.console, r.file.as_ref().map(|(l, _)| *l)])
            .flatten()
            .map(LevelFilter::from_level)
            .max()
            .unwrap_or(LevelFilter::OFF)
    }
}

/// `MakeWriter` picking the file of the section that owns the record's target.
#[derive(Clone)]
struct FileRouter(Arc<Routing>);

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = MaybeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        MaybeWriter(self.0.default.file.as_ref().map(|(_, w)| w.clone()))
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        MaybeWriter(
            self.0
                .route_for(meta.target())
                .file
                .as_ref()
                .map(|(_, w)| w.clone()),
        )
    }
}

// -------- public init --------

/// Install the global subscriber.
///
/// Console output is human readable (ANSI when stdout is a terminal); file
/// output is one JSON object per line. Relative file paths are resolved
/// against `base_dir`, normally `server.home_dir`. Calling this twice is a
/// no-op.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    // Bridge `log` records (mongodb driver internals) into tracing
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        let _ = tracing_subscriber::fmt()
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .try_init();
        return;
    }

    let routing = Arc::new(Routing::build(cfg, base_dir));
    let ansi = atty::is(atty::Stream::Stdout);

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let console_routing = routing.clone();
    layers.push(
        fmt::layer()
            .with_ansi(ansi)
            .with_target(true)
            .with_level(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_filter(FilterFn::new(move |meta| console_routing.console_enabled(meta)))
            .boxed(),
    );

    if routing.has_files() {
        let file_routing = routing.clone();
        layers.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_writer(FileRouter(routing.clone()))
                .with_filter(FilterFn::new(move |meta| file_routing.file_enabled(meta)))
                .boxed(),
        );
    }

    let max_level = routing.max_level();
    let subscriber = Registry::default().with(layers).with(max_level);
    let _ = tracing::subscriber::set_global_default(subscriber);
}
