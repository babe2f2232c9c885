//! Container build descriptor generation. Every framework is
//! built to static output locally, so the instance only ever
//! needs to serve files: one nginx descriptor fits all.

use std::path::Path;

use crate::error::DeployResult;

pub const STATIC_SERVE: &str = "FROM nginx:alpine\n\
    COPY . /usr/share/nginx/html\n\
    EXPOSE 80\n\
    CMD [\"nginx\", \"-g\", \"daemon off;\"]\n";

/// Write the static-serve Dockerfile at the project root,
/// replacing any existing one.
pub fn write(project_dir: &Path) -> DeployResult<()> {
    std::fs::write(project_dir.join("Dockerfile"), STATIC_SERVE)?;
    Ok(())
}
