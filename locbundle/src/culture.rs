//! Culture identifiers used to pick the localization layers of a bundle.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// A locale tag with a short language code and a full, region-qualified name.
///
/// ```rust
/// use locbundle::Culture;
///
/// let culture: Culture = "zh_CN.UTF-8".parse()?;
/// assert_eq!(culture.language_code(), "zh");
/// assert_eq!(culture.full_name(), "zh-CN");
/// # Ok::<(), locbundle::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Culture {
    id: LanguageIdentifier,
}

impl Culture {
    pub fn new(id: LanguageIdentifier) -> Self {
        Self { id }
    }

    /// The primary language subtag, e.g. `zh` for `zh-CN`.
    pub fn language_code(&self) -> &str {
        self.id.language.as_str()
    }

    /// The canonical full tag, e.g. `zh-CN`.
    pub fn full_name(&self) -> String {
        self.id.to_string()
    }

    pub fn language_identifier(&self) -> &LanguageIdentifier {
        &self.id
    }
}

impl From<LanguageIdentifier> for Culture {
    fn from(value: LanguageIdentifier) -> Self {
        Self::new(value)
    }
}

impl Display for Culture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Accepts BCP 47 tags as well as POSIX-style locale names
/// (`en_US`, `en_US.UTF-8`, `sr_RS@latin`).
impl FromStr for Culture {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.trim().split(['.', '@']).next().unwrap_or_default().trim();
        if stripped.is_empty() {
            return Err(Error::InvalidCulture(s.to_string()));
        }
        stripped
            .replace('_', "-")
            .parse::<LanguageIdentifier>()
            .map(Self::new)
            .map_err(|_| Error::InvalidCulture(s.to_string()))
    }
}
