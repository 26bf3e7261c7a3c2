use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use common::MyResult;
use serde::{Deserialize, Serialize};
use typewrap_base::EmitOptions;

pub const DISABLE_PROJECT_PATH_ENV: &str = "SOURCEGEN_DISABLE_PROJECT_PATH_OUTPUT";
pub const DEFAULT_FILE_NAME_TEMPLATE: &str = "{file_stem}__{type_name}__{generator}_{hash}{line}.g.cs";

/// Host configuration, loaded from JSON. Every field has a default.
#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Name written into `[GeneratedCode]`.
    pub generator_name: String,
    pub generator_version: String,
    /// Name used in generated file names.
    pub short_name: String,
    pub output_source_files: bool,
    pub project_path: Option<PathBuf>,
    /// Relative to the project path.
    pub output_dir: PathBuf,
    pub hash_seed: i32,
    pub file_name_template: String,
    /// Assembly attribute that turns the generator off.
    pub skip_attribute: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generator_name: "TypeWrap.SourceGen.TypeWrapGenerator".to_string(),
            generator_version: "1.0.0".to_string(),
            short_name: "TypeWrapGenerator".to_string(),
            output_source_files: false,
            project_path: None,
            output_dir: Path::new("Temp").join("GeneratedCode"),
            hash_seed: 5381,
            file_name_template: DEFAULT_FILE_NAME_TEMPLATE.to_string(),
            skip_attribute: "SkipGeneratorForAssemblyAttribute".to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> MyResult<Self> {
        let f = File::open(path.as_ref())?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| e.into())
    }

    /// Drops the project path when the environment disables file output.
    pub fn apply_env(&mut self) {
        if std::env::var(DISABLE_PROJECT_PATH_ENV).map_or(false, |v| v == "1") {
            log::debug!("{} set, not writing generated files", DISABLE_PROJECT_PATH_ENV);
            self.project_path = None;
        }
    }

    /// Generated files are only written under a known project path.
    pub fn can_write(&self) -> bool {
        self.output_source_files
            && self
                .project_path
                .as_ref()
                .map_or(false, |p| !p.as_os_str().is_empty())
    }

    pub fn emit_options(&self, line_directive: Option<String>) -> EmitOptions {
        EmitOptions {
            generator_name: self.generator_name.clone(),
            generator_version: self.generator_version.clone(),
            line_directive,
        }
    }
}
