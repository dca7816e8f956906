/// Builder for creating a [`LocalizedDataLoader`] with a fluent interface.
///
/// Every check on the configuration happens in [`LoaderBuilder::build`]; once
/// a loader exists, loading never fails loudly.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use locbundle::{FileSource, FormatType, LoadOptions, LocalizedDataLoader};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), locbundle::Error> {
/// let loader = LocalizedDataLoader::builder()
///     .locator("bundles/localization.zip")
///     .source(FileSource::new())
///     .parser(FormatType::Xml)
///     .options(LoadOptions::new().with_acquire_timeout(Some(Duration::from_secs(5))))
///     .build()?;
///
/// loader.load("zh-CN".parse()?, |data| {
///     println!("{} keys loaded", data.len());
/// });
/// # Ok(())
/// # }
/// ```
use std::sync::Arc;

use tokio::runtime::Handle;

use crate::{
    error::Error,
    loader::{LoaderInner, LocalizedDataLoader},
    options::LoadOptions,
    traits::{Diagnostics, DocumentParser, PackageSource, TracingDiagnostics},
};

#[derive(Default)]
pub struct LoaderBuilder {
    locator: Option<String>,
    source: Option<Arc<dyn PackageSource>>,
    parser: Option<Arc<dyn DocumentParser>>,
    diagnostics: Option<Arc<dyn Diagnostics>>,
    options: LoadOptions,
    runtime: Option<Handle>,
}

impl LoaderBuilder {
    /// Creates a new `LoaderBuilder` with nothing configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the locator handed to the package source on every load.
    pub fn locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = Some(locator.into());
        self
    }

    pub fn source(self, source: impl PackageSource + 'static) -> Self {
        self.shared_source(Arc::new(source))
    }

    /// Uses a source shared with other loaders.
    pub fn shared_source(mut self, source: Arc<dyn PackageSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn parser(self, parser: impl DocumentParser + 'static) -> Self {
        self.shared_parser(Arc::new(parser))
    }

    pub fn shared_parser(mut self, parser: Arc<dyn DocumentParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Replaces the default [`TracingDiagnostics`] sink.
    pub fn diagnostics(mut self, diagnostics: impl Diagnostics + 'static) -> Self {
        self.diagnostics = Some(Arc::new(diagnostics));
        self
    }

    pub fn options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Runtime that load tasks are spawned on. Defaults to the runtime current
    /// when [`LoaderBuilder::build`] is called.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Validates the configuration and creates the loader.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] when the locator is missing or blank, the
    /// source or parser is missing, the default segment is empty or contains
    /// `/`, or no runtime was given and none is current.
    pub fn build(self) -> Result<LocalizedDataLoader, Error> {
        let locator = self
            .locator
            .filter(|locator| !locator.trim().is_empty())
            .ok_or_else(|| Error::configuration_error("package locator must not be empty"))?;
        let source = self
            .source
            .ok_or_else(|| Error::configuration_error("package source is required"))?;
        let parser = self
            .parser
            .ok_or_else(|| Error::configuration_error("document parser is required"))?;

        let segment = &self.options.default_segment;
        if segment.trim().is_empty() || segment.contains('/') {
            return Err(Error::configuration_error(format!(
                "invalid default segment `{}`",
                segment
            )));
        }

        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|_| {
                Error::configuration_error("no tokio runtime is running; pass one with `runtime`")
            })?,
        };

        let inner = LoaderInner {
            locator,
            source,
            parser,
            diagnostics: self
                .diagnostics
                .unwrap_or_else(|| Arc::new(TracingDiagnostics)),
            options: self.options,
        };
        Ok(LocalizedDataLoader::from_parts(inner, runtime))
    }
}
