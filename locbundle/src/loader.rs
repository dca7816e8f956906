//! Layered loading of localized data from a package.
//!
//! Every load runs as its own tokio task:
//!
//! ```text
//! Idle -> Acquiring -> Selecting -> Merging -> Releasing -> Completed
//!             |                                                ^
//!             +------------------ (acquisition failed) --------+
//! ```
//!
//! Only acquisition suspends. Entries are read and parsed synchronously once
//! the package is available, layer by layer (default, language family, full
//! culture), so a later layer always overwrites an earlier one regardless of
//! how entries are stored. A failing entry is reported and skipped; it never
//! discards what was already merged. Panics raised by the source, the package
//! or the parser are contained the same way as errors.

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use futures_util::FutureExt;
use tokio::runtime::Handle;

use crate::{
    builder::LoaderBuilder,
    culture::Culture,
    error::Error,
    options::LoadOptions,
    selector::{Layer, select_with_segment},
    traits::{Diagnostics, DocumentParser, Package, PackageSource},
    types::{LocalizedData, merge_into},
};

/// Phases of a single load operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Acquiring,
    Selecting,
    Merging,
    Releasing,
    Completed,
}

/// An entry that was selected but could not be merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub layer: Layer,
    pub name: String,
    pub reason: String,
}

/// Result of one load, with a record of what was merged and what was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// The merged data.
    pub data: LocalizedData,
    /// Whether the package source produced a package.
    pub acquired: bool,
    /// Merged entries, in merge order.
    pub merged: Vec<(Layer, String)>,
    /// Entries skipped because they could not be read or parsed.
    pub skipped: Vec<SkippedEntry>,
}

/// Loads the localized data of a culture from a package, merging the
/// default, language-family and full-culture layers.
///
/// # Example
///
/// ```rust
/// use locbundle::{FormatType, LocalizedDataLoader, MemoryPackage, Package, PackageSource};
///
/// struct Embedded;
///
/// #[async_trait::async_trait]
/// impl PackageSource for Embedded {
///     async fn fetch(&self, _: &str) -> Result<Box<dyn Package>, locbundle::Error> {
///         Ok(Box::new(
///             MemoryPackage::new()
///                 .with_entry("l10n/default/app.json", r#"{"title":"App","ok":"OK"}"#)
///                 .with_entry("l10n/fr/app.json", r#"{"title":"Appli"}"#),
///         ))
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), locbundle::Error> {
/// let loader = LocalizedDataLoader::new("embedded", Embedded, FormatType::Json)?;
/// let data = loader.load_async(&"fr-CA".parse()?).await;
/// assert_eq!(data["title"], "Appli");
/// assert_eq!(data["ok"], "OK");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LocalizedDataLoader {
    inner: Arc<LoaderInner>,
    runtime: Handle,
}

pub(crate) struct LoaderInner {
    pub(crate) locator: String,
    pub(crate) source: Arc<dyn PackageSource>,
    pub(crate) parser: Arc<dyn DocumentParser>,
    pub(crate) diagnostics: Arc<dyn Diagnostics>,
    pub(crate) options: LoadOptions,
}

impl LocalizedDataLoader {
    /// Creates a loader on the current tokio runtime with default options.
    ///
    /// Fails with [`Error::Configuration`] when `locator` is blank or when
    /// called outside a runtime.
    pub fn new(
        locator: impl Into<String>,
        source: impl PackageSource + 'static,
        parser: impl DocumentParser + 'static,
    ) -> Result<Self, Error> {
        Self::builder()
            .locator(locator)
            .source(source)
            .parser(parser)
            .build()
    }

    pub fn builder() -> LoaderBuilder {
        LoaderBuilder::new()
    }

    pub(crate) fn from_parts(inner: LoaderInner, runtime: Handle) -> Self {
        Self {
            inner: Arc::new(inner),
            runtime,
        }
    }

    pub fn locator(&self) -> &str {
        &self.inner.locator
    }

    pub fn options(&self) -> &LoadOptions {
        &self.inner.options
    }

    /// Starts loading `culture` in the background and returns immediately.
    ///
    /// `on_completed` runs exactly once, on the runtime, after the package
    /// has been released. It always receives a map, empty when nothing could
    /// be loaded.
    pub fn load<F>(&self, culture: Culture, on_completed: F)
    where
        F: FnOnce(LocalizedData) + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        self.runtime.spawn(async move {
            let data = match AssertUnwindSafe(inner.run(&culture)).catch_unwind().await {
                Ok(report) => report.data,
                Err(payload) => {
                    tracing::error!(
                        culture = %culture,
                        "load aborted by a panic: {}",
                        panic_message(payload.as_ref())
                    );
                    LocalizedData::new()
                }
            };
            on_completed(data);
        });
    }

    /// Loads `culture` and returns the merged data.
    pub async fn load_async(&self, culture: &Culture) -> LocalizedData {
        self.inner.run(culture).await.data
    }

    /// Loads `culture` and returns the merged data together with a record of
    /// merged and skipped entries.
    pub async fn load_with_report(&self, culture: &Culture) -> LoadReport {
        self.inner.run(culture).await
    }
}

impl LoaderInner {
    async fn run(&self, culture: &Culture) -> LoadReport {
        let mut report = LoadReport::default();
        trace_phase(culture, LoadPhase::Idle);

        trace_phase(culture, LoadPhase::Acquiring);
        let mut package = match self.acquire().await {
            Ok(package) => package,
            Err(e) => {
                self.diagnostics.warn(&format!(
                    "failed to load localized data for {}: {}",
                    culture, e
                ));
                trace_phase(culture, LoadPhase::Completed);
                return report;
            }
        };
        report.acquired = true;

        trace_phase(culture, LoadPhase::Selecting);
        let names = panic::catch_unwind(AssertUnwindSafe(|| package.list_entry_names()))
            .unwrap_or_else(|payload| {
                self.diagnostics.warn(&format!(
                    "failed to list entries of package `{}`: {}",
                    self.locator,
                    panic_message(payload.as_ref())
                ));
                Vec::new()
            });
        let groups = select_with_segment(names, culture, &self.options.default_segment);
        tracing::debug!(
            culture = %culture,
            default = groups.default.len(),
            family = groups.family.len(),
            full = groups.full.len(),
            "selected localization entries"
        );

        trace_phase(culture, LoadPhase::Merging);
        for (layer, names) in groups.layers() {
            for name in names {
                match self.load_entry(&mut *package, name) {
                    Ok(fragment) => {
                        merge_into(&mut report.data, fragment);
                        report.merged.push((layer, name.clone()));
                    }
                    Err(e) => {
                        self.diagnostics.warn(&format!(
                            "failed to load localized data from \"{}\" ({} layer): {}",
                            name, layer, e
                        ));
                        report.skipped.push(SkippedEntry {
                            layer,
                            name: name.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        trace_phase(culture, LoadPhase::Releasing);
        let released = panic::catch_unwind(AssertUnwindSafe(move || package.release()))
            .unwrap_or_else(|payload| Err(Error::Release(panic_message(payload.as_ref()))));
        if let Err(e) = released {
            self.diagnostics
                .warn(&format!("failed to release package `{}`: {}", self.locator, e));
        }

        tracing::debug!(
            culture = %culture,
            keys = report.data.len(),
            merged = report.merged.len(),
            skipped = report.skipped.len(),
            "localized data loaded"
        );
        trace_phase(culture, LoadPhase::Completed);
        report
    }

    /// Fetches the package. A panic in the source, or in setting up the
    /// timeout on a runtime without timers, becomes [`Error::Acquisition`].
    async fn acquire(&self) -> Result<Box<dyn Package>, Error> {
        let fetch = async {
            let fetch = self.source.fetch(&self.locator);
            match self.options.acquire_timeout {
                Some(limit) => match tokio::time::timeout(limit, fetch).await {
                    Ok(result) => result,
                    Err(_) => Err(Error::acquisition_error(
                        &self.locator,
                        format!("timed out after {:?}", limit),
                        None,
                    )),
                },
                None => fetch.await,
            }
        };
        AssertUnwindSafe(fetch).catch_unwind().await.unwrap_or_else(|payload| {
            Err(Error::acquisition_error(
                &self.locator,
                format!("package source panicked: {}", panic_message(payload.as_ref())),
                None,
            ))
        })
    }

    /// Reads and parses one entry. Panics in the package or the parser are
    /// turned into [`Error::ParserPanic`].
    fn load_entry(&self, package: &mut dyn Package, name: &str) -> Result<LocalizedData, Error> {
        let parser = &self.parser;
        panic::catch_unwind(AssertUnwindSafe(|| {
            let bytes = package.read_entry(name)?;
            parser.parse(&bytes)
        }))
        .unwrap_or_else(|payload| Err(Error::ParserPanic(panic_message(payload.as_ref()))))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn trace_phase(culture: &Culture, phase: LoadPhase) {
    tracing::trace!(culture = %culture, phase = ?phase, "load phase");
}
