use core::fmt;

/// A forward-slash path kept as a plain string. The build core never
/// canonicalizes; paths are compared and displayed exactly as configured.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(String);

const SEP: &str = "/";

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({})", self.0)
    }
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(path: impl AsRef<str>) -> Self {
        Self(path.as_ref().replace("\\", "/"))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last path component, or the whole string when there is no separator.
    pub fn file_name(&self) -> &str {
        self.0.rsplit(SEP).next().unwrap_or(&self.0)
    }

    /// Replaces the suffix after the last dot of the final component, or
    /// appends one when the component has no extension. The directory part
    /// is never touched.
    pub fn set_extension(&self, suffix: &str) -> Self {
        let path = &self.0;
        let last_separator = path.rfind(SEP);

        let search_start = last_separator.map(|i| i + 1).unwrap_or(0);
        let last_dot = path[search_start..].rfind('.').map(|i| search_start + i);

        let stem = match last_dot {
            Some(dot_pos) => &path[..dot_pos],
            None => path.as_str(),
        };

        let mut new_path = String::from(stem);
        if !suffix.starts_with('.') {
            new_path.push('.');
        }
        new_path.push_str(suffix);
        Self(new_path)
    }

    pub fn join(&self, path: impl AsRef<str>) -> Self {
        if path.as_ref().starts_with(SEP) || self.0.is_empty() {
            return Self(path.as_ref().into());
        }

        let mut new_path = String::from(self.0.trim_end_matches(SEP));
        new_path.push_str(SEP);
        new_path.push_str(path.as_ref());
        Self(new_path)
    }
}
