use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use locbundle::{FileSource, FormatType, LoadOptions, LocalizedDataLoader, Value};
use tokio::sync::oneshot;

use crate::config::CliConfig;
use crate::validation::{
    parse_format, resolve_culture, validate_bundle_path, validate_output_path,
};

#[derive(Debug, Clone, Default)]
pub struct LoadCommandOptions {
    pub bundle: Option<String>,
    pub culture: Option<String>,
    pub format: Option<String>,
    pub timeout_ms: Option<u64>,
    pub default_segment: Option<String>,
    pub config: Option<PathBuf>,
    pub output: Option<String>,
}

/// Everything a load needs once flags and config have been combined.
#[derive(Debug, Clone)]
pub struct ResolvedLoad {
    pub bundle: String,
    pub culture: locbundle::Culture,
    pub format: FormatType,
    pub options: LoadOptions,
}

/// Merges command-line values over the config file.
pub fn resolve(
    bundle: Option<String>,
    culture: Option<String>,
    format: Option<String>,
    timeout_ms: Option<u64>,
    default_segment: Option<String>,
    config: &CliConfig,
) -> Result<ResolvedLoad, String> {
    let bundle = bundle
        .or_else(|| config.bundle.clone())
        .ok_or_else(|| "No bundle given; pass --bundle or set `bundle` in the config".to_string())?;
    validate_bundle_path(&bundle)?;

    let system_locale = sys_locale::get_locale();
    let culture = resolve_culture(
        culture.as_deref(),
        config.culture.as_deref(),
        system_locale.as_deref(),
    )?;

    let format = match format.or_else(|| config.format.clone()) {
        Some(format) => parse_format(&format)?,
        None => FormatType::default(),
    };

    let mut options = config.load.clone();
    if let Some(ms) = timeout_ms {
        options = options.with_acquire_timeout(Some(Duration::from_millis(ms)));
    }
    if let Some(segment) = default_segment {
        options = options.with_default_segment(segment);
    }

    Ok(ResolvedLoad {
        bundle,
        culture,
        format,
        options,
    })
}

/// Loads one culture and writes the merged data as pretty JSON with sorted keys.
pub async fn run_load_command(opts: LoadCommandOptions) -> Result<(), String> {
    let config = CliConfig::load_optional(opts.config.as_deref())?;
    let resolved = resolve(
        opts.bundle,
        opts.culture,
        opts.format,
        opts.timeout_ms,
        opts.default_segment,
        &config,
    )?;
    if let Some(output) = &opts.output {
        validate_output_path(output)?;
    }

    tracing::debug!(
        bundle = %resolved.bundle,
        culture = %resolved.culture,
        format = %resolved.format,
        "loading bundle"
    );

    let loader = LocalizedDataLoader::builder()
        .locator(resolved.bundle)
        .source(FileSource::new())
        .parser(resolved.format)
        .options(resolved.options)
        .build()
        .map_err(|e| e.to_string())?;

    let (tx, rx) = oneshot::channel();
    loader.load(resolved.culture, move |data| {
        let _ = tx.send(data);
    });
    let data = rx
        .await
        .map_err(|_| "Load task ended without a result".to_string())?;

    let sorted: BTreeMap<String, Value> = data.into_iter().collect();
    let json = serde_json::to_string_pretty(&sorted)
        .map_err(|e| format!("Cannot serialize result: {}", e))?;

    match opts.output {
        Some(output) => fs::write(&output, json + "\n")
            .map_err(|e| format!("Cannot write {}: {}", output, e)),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_config() {
        let temp_dir = TempDir::new().unwrap();
        let bundle = temp_dir.path().to_str().unwrap().to_string();
        let config = CliConfig::from_toml_str(&format!(
            "bundle = {:?}\nculture = \"fr-FR\"\nformat = \"xml\"\n[load]\nacquire_timeout_ms = 100\n",
            bundle
        ))
        .unwrap();

        let resolved = resolve(
            None,
            Some("de-DE".to_string()),
            Some("csv".to_string()),
            Some(2500),
            None,
            &config,
        )
        .unwrap();

        assert_eq!(resolved.bundle, bundle);
        assert_eq!(resolved.culture.full_name(), "de-DE");
        assert_eq!(resolved.format, FormatType::Csv);
        assert_eq!(
            resolved.options.acquire_timeout,
            Some(Duration::from_millis(2500))
        );
        assert_eq!(resolved.options.default_segment, "default");
    }

    #[test]
    fn test_config_values_are_used() {
        let temp_dir = TempDir::new().unwrap();
        let bundle = temp_dir.path().to_str().unwrap().to_string();
        let config = CliConfig::from_toml_str(&format!(
            "bundle = {:?}\nculture = \"fr-FR\"\nformat = \"xml\"\n[load]\ndefault_segment = \"base\"\n",
            bundle
        ))
        .unwrap();

        let resolved = resolve(None, None, None, None, None, &config).unwrap();

        assert_eq!(resolved.culture.full_name(), "fr-FR");
        assert_eq!(resolved.format, FormatType::Xml);
        assert_eq!(resolved.options.acquire_timeout, None);
        assert_eq!(resolved.options.default_segment, "base");
    }

    #[test]
    fn test_missing_bundle() {
        let err = resolve(None, None, None, None, None, &CliConfig::default()).unwrap_err();
        assert!(err.contains("No bundle given"));
    }
}
