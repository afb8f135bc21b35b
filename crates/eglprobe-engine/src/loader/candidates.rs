use std::borrow::Cow;

/// Ordered list of shared-library names to try.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryCandidates {
    names: Vec<Cow<'static, str>>,
}

impl LibraryCandidates {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// EGL library names: the unversioned development name first (what GLVND
    /// and most driver stacks install), then the standard runtime soname.
    pub fn egl() -> Self {
        if cfg!(target_os = "windows") {
            Self::new(["libEGL.dll", "EGL.dll"])
        } else if cfg!(target_os = "macos") {
            Self::new(["libEGL.dylib"])
        } else {
            Self::new(["libEGL.so", "libEGL.so.1"])
        }
    }

    /// Desktop OpenGL library names. `libOpenGL` is the GLVND entry point that
    /// works without GLX; legacy `libGL` follows.
    pub fn gl() -> Self {
        if cfg!(target_os = "windows") {
            Self::new(["opengl32.dll"])
        } else if cfg!(target_os = "macos") {
            Self::new(["/System/Library/Frameworks/OpenGL.framework/OpenGL"])
        } else {
            Self::new(["libOpenGL.so", "libOpenGL.so.0", "libGL.so.1", "libGL.so"])
        }
    }

    /// Returns a copy with `name` tried before every existing candidate.
    pub fn preferring(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        self.names.retain(|n| *n != name);
        self.names.insert(0, name);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_os = "linux")]
    fn egl_prefers_unversioned_name() {
        let names: Vec<_> = LibraryCandidates::egl().names().map(str::to_owned).collect();
        assert_eq!(names, ["libEGL.so", "libEGL.so.1"]);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn gl_prefers_glvnd_opengl() {
        let gl = LibraryCandidates::gl();
        assert_eq!(gl.names().next(), Some("libOpenGL.so"));
        assert!(gl.names().any(|n| n == "libGL.so.1"));
    }

    #[test]
    fn preferring_moves_name_to_front_without_duplicates() {
        let c = LibraryCandidates::new(["a.so", "b.so", "c.so"]).preferring("c.so");
        let names: Vec<_> = c.names().collect();
        assert_eq!(names, ["c.so", "a.so", "b.so"]);
    }

    #[test]
    fn preferring_adds_unknown_name() {
        let c = LibraryCandidates::new(["a.so"]).preferring(String::from("/opt/egl/libEGL.so"));
        let names: Vec<_> = c.names().collect();
        assert_eq!(names, ["/opt/egl/libEGL.so", "a.so"]);
    }

    #[test]
    fn empty_list() {
        assert!(LibraryCandidates::new(Vec::<&'static str>::new()).is_empty());
        assert!(!LibraryCandidates::egl().is_empty());
    }
}
