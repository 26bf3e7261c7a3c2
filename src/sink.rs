//! Writes generated text under `{project}/{output_dir}/{assembly}/`.

use std::path::{Path, PathBuf};

use cf_fs::{FileSystem, PathInterpreter, PathPluggable, PathPlugin, RootedPath, SanitizeFileName};
use common::{forward_slashes, MyResult};
use log::info;

use crate::config::GeneratorConfig;

pub struct Sink<'fs> {
    fs: &'fs mut FileSystem,
    interp: PathInterpreter,
    dir: PathBuf,
}

/// Project paths may arrive with Windows separators.
fn normalize(path: &Path) -> PathBuf {
    PathBuf::from(forward_slashes(path.to_string_lossy()))
}

impl<'fs> Sink<'fs> {
    /// Returns `None` when the configuration does not allow writing.
    pub fn new(fs: &'fs mut FileSystem, config: &GeneratorConfig, assembly_name: &str) -> MyResult<Option<Self>> {
        let project = match &config.project_path {
            Some(p) if config.can_write() => normalize(p),
            _ => return Ok(None),
        };
        let assembly = SanitizeFileName.output(assembly_name)?;
        let dir = project.join(&config.output_dir).join(assembly);
        let interp = PathInterpreter::new(vec![PathPlugin::from(SanitizeFileName)]).then(RootedPath::new(&dir));
        Ok(Some(Self { fs, interp, dir }))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, file_name: &str) -> MyResult<PathBuf> {
        self.interp.output_path(file_name)
    }

    pub fn persist(&mut self, path: &Path, text: &str) -> MyResult<()> {
        if let Some(parent) = path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        self.fs.write_all(path, text)?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn writable(project: &str) -> GeneratorConfig {
        GeneratorConfig {
            output_source_files: true,
            project_path: Some(project.into()),
            ..Default::default()
        }
    }

    #[test]
    fn no_sink_without_project_path() {
        let mut fs = FileSystem::mem();
        let config = GeneratorConfig {
            output_source_files: true,
            ..Default::default()
        };
        assert!(Sink::new(&mut fs, &config, "Game").unwrap().is_none());
    }

    #[test]
    fn files_land_under_assembly_dir() {
        let mut fs = FileSystem::mem();
        let mut sink = Sink::new(&mut fs, &writable("C:\\proj"), "Game.Core").unwrap().unwrap();
        let path = sink.path_for("Ids__Id__Gen_1.g.cs").unwrap();
        assert_eq!(path, Path::new("C:/proj/Temp/GeneratedCode/Game.Core/Ids__Id__Gen_1.g.cs"));
        sink.persist(&path, "text").unwrap();
        assert_eq!(fs.read_to_string(&path).unwrap(), "text");
    }

    #[test]
    fn read_only_fs_fails_to_persist() {
        let mut fs = FileSystem::mem_read_only();
        let mut sink = Sink::new(&mut fs, &writable("/proj"), "Game").unwrap().unwrap();
        let path = sink.path_for("a.g.cs").unwrap();
        assert!(sink.persist(&path, "text").is_err());
    }
}
