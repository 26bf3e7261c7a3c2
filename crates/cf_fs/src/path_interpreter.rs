use std::path::{Path, PathBuf};

use common::MyResult;
use enum_dispatch::enum_dispatch;
use once_cell::sync::Lazy;
use regex::Regex;
use simple_error::simple_error;

static NON_FILE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]").unwrap());

#[enum_dispatch]
trait PathPluggableImpl {
    fn _validate<'a>(&self, path: &'a str) -> MyResult<&'a str>;
    fn _output(&self, validated_input: &str) -> MyResult<String>;
}

pub trait PathPluggable {
    fn output<S: AsRef<str>>(&self, input: S) -> MyResult<String>;
}

impl<T: PathPluggableImpl> PathPluggable for T {
    fn output<S: AsRef<str>>(&self, input: S) -> MyResult<String> {
        self._validate(input.as_ref()).and_then(|s| self._output(s))
    }
}

#[enum_dispatch(PathPluggableImpl)]
#[derive(Debug)]
pub enum PathPlugin {
    ForwardPath,
    RootedPath,
    SanitizeFileName,
}

impl Default for PathPlugin {
    fn default() -> Self {
        Self::ForwardPath(Default::default())
    }
}

/// Runs a path through a sequence of plugins.
#[derive(Debug)]
pub struct PathInterpreter {
    sequenced_plugin: Vec<PathPlugin>,
}

impl PathInterpreter {
    pub fn new<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = PathPlugin>,
    {
        Self {
            sequenced_plugin: iter.into_iter().collect(),
        }
    }
    pub fn then<P: Into<PathPlugin>>(mut self, p: P) -> Self {
        self.sequenced_plugin.push(p.into());
        self
    }
    pub fn output_path<S: AsRef<str>>(&self, input: S) -> MyResult<PathBuf> {
        self.output(input).map(PathBuf::from)
    }
}

impl PathPluggable for PathInterpreter {
    fn output<S: AsRef<str>>(&self, input: S) -> MyResult<String> {
        self.sequenced_plugin
            .iter()
            .fold(Ok(input.as_ref().to_string()), |inp, plugin| plugin.output(inp?))
    }
}

impl Default for PathInterpreter {
    fn default() -> Self {
        Self {
            sequenced_plugin: vec![Default::default()],
        }
    }
}

#[derive(Debug, Default)]
pub struct ForwardPath;

impl PathPluggableImpl for ForwardPath {
    fn _validate<'a>(&self, path: &'a str) -> MyResult<&'a str> {
        Ok(path)
    }
    fn _output(&self, validated_input: &str) -> MyResult<String> {
        Ok(validated_input.to_string())
    }
}

/// Places relative paths under `root`; absolute paths pass through.
#[derive(Debug, Default)]
pub struct RootedPath {
    root: PathBuf,
}

impl RootedPath {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl PathPluggableImpl for RootedPath {
    fn _validate<'a>(&self, path: &'a str) -> MyResult<&'a str> {
        if path.is_empty() {
            Err(simple_error!("Cannot root an empty path under {:?}", self.root).into())
        } else {
            Ok(path)
        }
    }

    fn _output(&self, validated_input: &str) -> MyResult<String> {
        let input_path = Path::new(validated_input);
        if input_path.is_absolute() {
            return Ok(validated_input.to_string());
        }
        Ok(self.root.join(input_path).to_string_lossy().into_owned())
    }
}

/// Replaces everything outside `[A-Za-z0-9_.-]` with `_`.
#[derive(Debug, Default)]
pub struct SanitizeFileName;

impl PathPluggableImpl for SanitizeFileName {
    fn _validate<'a>(&self, path: &'a str) -> MyResult<&'a str> {
        if path.trim().is_empty() {
            Err(simple_error!("File name is empty").into())
        } else {
            Ok(path)
        }
    }

    fn _output(&self, validated_input: &str) -> MyResult<String> {
        Ok(NON_FILE_CHARS.replace_all(validated_input, "_").into_owned())
    }
}
