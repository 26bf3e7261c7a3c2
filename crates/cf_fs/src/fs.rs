use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use common::{BytesToStringExt, MyResult, MyResultTrait};
use enum_dispatch::enum_dispatch;
use simple_error::simple_error;

use crate::memfs_tracer::{Trace, Tracer};

/// Whole-file access over either the OS or an in-memory bucket.
pub struct FileSystem {
    fs_impl: FileSystemImpl,
    tracer: Tracer,
}

#[enum_dispatch]
trait ProvideFileSystem {
    fn exists(&self, path: &Path) -> bool;
    fn read_all(&self, path: &Path) -> MyResult<Vec<u8>>;
    fn write_all(&mut self, path: &Path, content: &[u8]) -> MyResult<()>;
    fn create_dir_all(&mut self, path: &Path) -> MyResult<()>;
}

#[enum_dispatch(ProvideFileSystem)]
enum FileSystemImpl {
    OSFileSystem,
    MemFileSystem,
}

impl FileSystem {
    pub fn os() -> Self {
        Self {
            fs_impl: OSFileSystem.into(),
            tracer: Tracer::default(),
        }
    }
    pub fn mem() -> Self {
        Self {
            fs_impl: MemFileSystem::default().into(),
            tracer: Tracer::default(),
        }
    }
    /// An in-memory file system that refuses every write.
    pub fn mem_read_only() -> Self {
        Self {
            fs_impl: MemFileSystem {
                read_only: true,
                ..Default::default()
            }
            .into(),
            tracer: Tracer::default(),
        }
    }
    pub fn with_tracer<T: Into<Tracer>>(mut self, tracer: T) -> Self {
        self.tracer = tracer.into();
        self
    }
    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    pub fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
        self.fs_impl.exists(path.as_ref())
    }

    pub fn read_all<P: AsRef<Path>>(&mut self, path: P) -> MyResult<Vec<u8>> {
        let path = path.as_ref();
        let read = self.fs_impl.read_all(path);
        match &read {
            Ok(_) => self.tracer.on_read(path),
            Err(_) => self.tracer.on_read_nonexist(path),
        }
        read
    }

    pub fn read_to_string<P: AsRef<Path>>(&mut self, path: P) -> MyResult<String> {
        self.read_all(path).and_then(|bytes| bytes.to_str())
    }

    /// Creates or truncates `path` and writes `content` to it.
    pub fn write_all<P: AsRef<Path>, C: AsRef<[u8]>>(&mut self, path: P, content: C) -> MyResult<()> {
        let path = path.as_ref();
        let existed = self.fs_impl.exists(path);
        match self.fs_impl.write_all(path, content.as_ref()) {
            Ok(()) if existed => {
                self.tracer.on_create_overwrite(path);
                Ok(())
            }
            Ok(()) => {
                self.tracer.on_create(path);
                Ok(())
            }
            Err(e) => {
                self.tracer.on_write_rejected(path);
                Err(e)
            }
        }
    }

    pub fn create_dir_all<P: AsRef<Path>>(&mut self, path: P) -> MyResult<()> {
        let path = path.as_ref();
        self.fs_impl.create_dir_all(path)?;
        self.tracer.on_create_dir(path);
        Ok(())
    }

    /// Files held by an in-memory file system, sorted. Empty for the OS.
    pub fn mem_files(&self) -> Vec<PathBuf> {
        match &self.fs_impl {
            FileSystemImpl::MemFileSystem(m) => m.bucket.keys().cloned().collect(),
            FileSystemImpl::OSFileSystem(_) => Vec::new(),
        }
    }
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::os()
    }
}

#[derive(Debug, Default)]
struct MemFileSystem {
    bucket: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    read_only: bool,
}

impl ProvideFileSystem for MemFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.bucket.contains_key(path) || self.dirs.contains(path)
    }

    fn read_all(&self, path: &Path) -> MyResult<Vec<u8>> {
        self.bucket
            .get(path)
            .cloned()
            .ok_or_else(|| simple_error!("Path {:?} not found in provided MemFileSystem", path).into())
    }

    fn write_all(&mut self, path: &Path, content: &[u8]) -> MyResult<()> {
        if self.read_only {
            return Err(simple_error!("MemFileSystem is read-only, cannot write {:?}", path).into());
        }
        self.bucket.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn create_dir_all(&mut self, path: &Path) -> MyResult<()> {
        if self.read_only {
            return Err(simple_error!("MemFileSystem is read-only, cannot create {:?}", path).into());
        }
        self.dirs.extend(path.ancestors().filter(|p| !p.as_os_str().is_empty()).map(Path::to_path_buf));
        Ok(())
    }
}

#[derive(Debug, Default)]
struct OSFileSystem;

impl ProvideFileSystem for OSFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_all(&self, path: &Path) -> MyResult<Vec<u8>> {
        std::fs::read(path).my_result()
    }

    fn write_all(&mut self, path: &Path, content: &[u8]) -> MyResult<()> {
        std::fs::write(path, content).my_result()
    }

    fn create_dir_all(&mut self, path: &Path) -> MyResult<()> {
        std::fs::create_dir_all(path).my_result()
    }
}
