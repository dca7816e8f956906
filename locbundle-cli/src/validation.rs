use std::path::Path;

use locbundle::{Culture, FormatType};

/// Culture used when neither the command line, the config nor the system
/// provides one.
pub const FALLBACK_CULTURE: &str = "en-US";

/// Validate that a bundle path exists and is a file or a directory
pub fn validate_bundle_path(path: &str) -> Result<(), String> {
    if path.trim().is_empty() {
        return Err("Bundle path cannot be empty".to_string());
    }

    let path_obj = Path::new(path);
    if !path_obj.exists() {
        return Err(format!("Bundle does not exist: {}", path));
    }
    if !path_obj.is_file() && !path_obj.is_dir() {
        return Err(format!("Bundle is neither a file nor a directory: {}", path));
    }

    Ok(())
}

/// Validate output directory exists or can be created
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if let Some(parent) = path_obj.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return Err(format!("Cannot create output directory: {}", e));
            }
        }
    }

    Ok(())
}

/// Parse a culture name, accepting BCP 47 tags and POSIX locale names
pub fn parse_culture(culture: &str) -> Result<Culture, String> {
    if culture.trim().is_empty() {
        return Err("Culture cannot be empty".to_string());
    }
    culture.parse::<Culture>().map_err(|_| {
        format!(
            "Invalid culture: {}. Expected a BCP 47 tag such as en-US",
            culture
        )
    })
}

/// Parse an entry format name
pub fn parse_format(format: &str) -> Result<FormatType, String> {
    format.parse::<FormatType>().map_err(|_| {
        let supported = FormatType::ALL
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Unsupported format: {}. Supported formats: {}",
            format, supported
        )
    })
}

/// Pick the culture: explicit flag, then config, then the system locale,
/// then [`FALLBACK_CULTURE`].
///
/// An unusable system locale falls through to the fallback; an unusable
/// explicit or configured culture is an error.
pub fn resolve_culture(
    flag: Option<&str>,
    configured: Option<&str>,
    system: Option<&str>,
) -> Result<Culture, String> {
    if let Some(culture) = flag.or(configured) {
        return parse_culture(culture);
    }
    if let Some(culture) = system.and_then(|s| s.parse::<Culture>().ok()) {
        return Ok(culture);
    }
    parse_culture(FALLBACK_CULTURE)
}
