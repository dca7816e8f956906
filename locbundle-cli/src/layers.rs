use std::path::PathBuf;

use locbundle::{Culture, EntryGroups, FileSource, Layer, PackageSource, select_with_segment};

use crate::config::CliConfig;
use crate::load::resolve;

#[derive(Debug, Clone, Default)]
pub struct LayersCommandOptions {
    pub bundle: Option<String>,
    pub culture: Option<String>,
    pub default_segment: Option<String>,
    pub config: Option<PathBuf>,
}

/// Prints which entries of a bundle each layer would merge for a culture.
pub async fn run_layers_command(opts: LayersCommandOptions) -> Result<(), String> {
    let config = CliConfig::load_optional(opts.config.as_deref())?;
    let resolved = resolve(
        opts.bundle,
        opts.culture,
        None,
        None,
        opts.default_segment,
        &config,
    )?;

    let package = FileSource::new()
        .fetch(&resolved.bundle)
        .await
        .map_err(|e| e.to_string())?;
    let groups = select_with_segment(
        package.list_entry_names(),
        &resolved.culture,
        &resolved.options.default_segment,
    );
    if let Err(e) = package.release() {
        tracing::warn!("failed to release package `{}`: {}", resolved.bundle, e);
    }

    print!(
        "{}",
        render_groups(&groups, &resolved.culture, &resolved.options.default_segment)
    );
    Ok(())
}

/// Renders the groups in merge order, one indented entry per line.
pub fn render_groups(groups: &EntryGroups, culture: &Culture, default_segment: &str) -> String {
    let mut out = String::new();
    for (layer, names) in groups.layers() {
        out.push_str(&format!(
            "{} ({}):\n",
            layer_heading(layer, culture, default_segment),
            names.len()
        ));
        if names.is_empty() {
            out.push_str("  (none)\n");
        }
        for name in names {
            out.push_str(&format!("  {}\n", name));
        }
    }
    out
}

fn layer_heading(layer: Layer, culture: &Culture, default_segment: &str) -> String {
    format!("{} {}", layer, layer.segment(culture, default_segment))
}
