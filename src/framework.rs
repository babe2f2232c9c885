//! Front-end framework detection from the project's dependency
//! manifest. Governs the build step and output directory.

use std::fmt;
use std::path::Path;

use crate::error::DeployResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framework {
    Static,
    React,
    Vite,
    Nextjs,
}

impl Framework {
    /// Inspect `package.json` in the project directory. No
    /// manifest means a plain static site. Next takes precedence
    /// over react, vite over react.
    pub fn detect(project_dir: &Path) -> DeployResult<Self> {
        let manifest = project_dir.join("package.json");
        if !manifest.exists() {
            return Ok(Self::Static);
        }
        let content = std::fs::read_to_string(&manifest)?;
        let package: serde_json::Value = serde_json::from_str(&content)?;
        Ok(Self::from_manifest(&package))
    }

    /// Classify a parsed manifest. `dependencies` and
    /// `devDependencies` are merged before matching.
    #[must_use]
    pub fn from_manifest(package: &serde_json::Value) -> Self {
        let has = |name: &str| {
            ["dependencies", "devDependencies"]
                .iter()
                .any(|&section| package.get(section).and_then(|deps| deps.get(name)).is_some())
        };

        if has("next") {
            Self::Nextjs
        } else if has("vite") {
            Self::Vite
        } else if has("react-scripts") || has("react") {
            Self::React
        } else {
            Self::Static
        }
    }

    /// Build output directory relative to the project root.
    /// `None` means the project root itself is deployed.
    #[must_use]
    pub const fn output_dir(self) -> Option<&'static str> {
        match self {
            Self::Static => None,
            Self::React => Some("build"),
            Self::Vite => Some("dist"),
            Self::Nextjs => Some("out"),
        }
    }

    #[must_use]
    pub const fn needs_build(self) -> bool {
        !matches!(self, Self::Static)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Static => "static",
            Self::React => "react",
            Self::Vite => "vite",
            Self::Nextjs => "nextjs",
        };
        f.write_str(name)
    }
}
