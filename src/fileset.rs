use std::io;

use crate::error::{Error, Result};
use crate::os::Os;
use crate::path::Path;

/// An ordered, deduplicated list of source paths, resolved once at
/// graph-construction time.
///
/// Patterns without wildcards are kept verbatim, whether or not the file
/// exists yet; wildcard patterns expand to the lexically sorted set of
/// matches, so archiver and linker argument order is stable across runs.
pub struct FileSet {
    paths: Vec<Path>,
}

impl FileSet {
    pub fn glob(os: &dyn Os, patterns: &[String]) -> Result<Self> {
        let mut paths: Vec<Path> = Vec::new();
        for pattern in patterns {
            for path in expand(os, pattern)? {
                if !paths.contains(&path) {
                    paths.push(path);
                }
            }
        }
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Positional extension substitution: `out[i]` derives from `paths[i]`.
    pub fn with_extension(&self, ext: &str) -> Vec<Path> {
        self.paths.iter().map(|p| p.set_extension(ext)).collect()
    }
}

fn has_wildcard(component: &str) -> bool {
    component.contains(['*', '?'])
}

fn expand(os: &dyn Os, pattern: &str) -> Result<Vec<Path>> {
    if !has_wildcard(pattern) {
        return Ok(vec![Path::from(pattern)]);
    }

    let mut candidates = vec![if pattern.starts_with('/') {
        Path::from("/")
    } else {
        Path::new()
    }];

    for component in pattern.split('/').filter(|c| !c.is_empty()) {
        let mut next = Vec::new();
        if !has_wildcard(component) {
            for dir in &candidates {
                next.push(dir.join(component));
            }
        } else {
            for dir in &candidates {
                let mut entries = match os.read_dir(dir) {
                    Ok(entries) => entries,
                    Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                    Err(e) => return Err(Error::fs(dir, e)),
                };
                entries.sort();
                for name in entries {
                    // as in shell globbing, a bare wildcard skips dotfiles
                    if name.starts_with('.') && !component.starts_with('.') {
                        continue;
                    }
                    if wildcard_match(component, &name) {
                        next.push(dir.join(&name));
                    }
                }
            }
        }
        candidates = next;
    }

    let mut matches = Vec::new();
    for path in candidates {
        if os.exists(&path).map_err(|e| Error::fs(&path, e))? {
            matches.push(path);
        }
    }
    matches.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));
    Ok(matches)
}

/// Shell-style matching of a single path component: `*` matches any run of
/// characters, `?` exactly one.
fn wildcard_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((sp, st)) = star {
            pi = sp + 1;
            ti = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }
    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}
