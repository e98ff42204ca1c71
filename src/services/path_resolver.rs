//! Normalization of user-supplied paths into stable resource identities.
//!
//! A path is home-expanded, made absolute against the configured working
//! directory, and expressed relative to the resource root. The result is the
//! resource identity; the file lives at `root/identity`.

use std::path::{Component, Path, PathBuf};

use crate::domain::{AppError, PathContext, ResourceId};

/// Resolves paths against an explicit working and home directory.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    ctx: &'a PathContext,
}

impl<'a> PathResolver<'a> {
    pub fn new(ctx: &'a PathContext) -> Self {
        Self { ctx }
    }

    /// Normalize `path` into an identity relative to `root`.
    ///
    /// An empty `root` means the working directory.
    pub fn resolve(&self, path: &str, root: &str) -> Result<ResourceId, AppError> {
        let absolute = self.absolute(path)?;
        let root = self.root(root)?;
        let relative = relative_to(&absolute, &root).ok_or_else(|| {
            AppError::PathRelativization { path: absolute.clone(), root: root.clone() }
        })?;
        let relative = relative.to_str().ok_or_else(|| AppError::PathExpansion {
            path: path.to_string(),
            reason: "path is not valid UTF-8".to_string(),
        })?;
        Ok(ResourceId::new(relative))
    }

    /// Absolute filesystem location of an identity under `root`.
    pub fn reconstruct(&self, id: &ResourceId, root: &str) -> Result<PathBuf, AppError> {
        Ok(clean(&self.root(root)?.join(id.as_str())))
    }

    /// True when `candidate` resolves to the already-resolved `stored` identity.
    pub fn equivalent(&self, candidate: &str, stored: &str, root: &str) -> bool {
        self.resolve(candidate, root).is_ok_and(|id| id.as_str() == stored)
    }

    /// Home-expanded, absolute, lexically clean form of `path`.
    pub fn absolute(&self, path: &str) -> Result<PathBuf, AppError> {
        let expanded = self.expand_home(path)?;
        if expanded.is_absolute() {
            return Ok(clean(&expanded));
        }
        let working_dir = self.ctx.working_dir();
        if !working_dir.is_absolute() {
            return Err(AppError::PathExpansion {
                path: path.to_string(),
                reason: format!("working directory {} is not absolute", working_dir.display()),
            });
        }
        Ok(clean(&working_dir.join(expanded)))
    }

    fn root(&self, root: &str) -> Result<PathBuf, AppError> {
        if root.is_empty() {
            return Ok(clean(self.ctx.working_dir()));
        }
        self.absolute(root)
    }

    fn expand_home(&self, path: &str) -> Result<PathBuf, AppError> {
        let Some(rest) = path.strip_prefix('~') else {
            return Ok(PathBuf::from(path));
        };

        let rest = if rest.is_empty() {
            ""
        } else if let Some(stripped) = rest.strip_prefix(std::path::MAIN_SEPARATOR) {
            stripped
        } else if let Some(stripped) = rest.strip_prefix('/') {
            stripped
        } else {
            return Err(AppError::HomeDirExpansion {
                path: path.to_string(),
                reason: "cannot expand user-specific home dir".to_string(),
            });
        };

        let home = self.ctx.home_dir().ok_or_else(|| AppError::HomeDirExpansion {
            path: path.to_string(),
            reason: "home directory is unknown".to_string(),
        })?;
        Ok(if rest.is_empty() { home.to_path_buf() } else { home.join(rest) })
    }
}

/// Remove `.` segments and fold `..` segments of an absolute path.
///
/// `..` at the root stays at the root.
fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
        }
    }
    out
}

/// Lexical path from `base` to `target`; both must be clean and absolute.
///
/// `None` when the two share no root (e.g. different drive prefixes).
fn relative_to(target: &Path, base: &Path) -> Option<PathBuf> {
    let target: Vec<Component<'_>> = target.components().collect();
    let base: Vec<Component<'_>> = base.components().collect();

    let common = target.iter().zip(base.iter()).take_while(|(t, b)| t == b).count();
    if common == 0 {
        return None;
    }

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Some(relative)
}
