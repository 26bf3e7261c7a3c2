use std::{
    fs::File,
    io::BufReader,
    path::Path,
    sync::atomic::{AtomicBool, Ordering},
};

use cf_fs::FileSystem;
use common::Warning;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use typewrap_base::WrapDeclaration;

pub mod config;
pub mod diagnostics;
pub mod naming;
pub mod sink;

pub use common::{AnyErr, MyResult, MyResultTrait};
pub use config::GeneratorConfig;
pub use diagnostics::{Diagnostic, Severity};
pub use naming::{stable_hash, FileNamer};
pub use sink::Sink;

/// Everything the symbol oracle reports for one compilation.
#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
pub struct Batch {
    pub assembly_name: String,
    #[serde(default)]
    pub assembly_attributes: Vec<String>,
    #[serde(default)]
    pub declarations: Vec<WrapDeclaration>,
}

impl Batch {
    pub fn from_file<P: AsRef<Path>>(path: P) -> MyResult<Self> {
        let f = File::open(path.as_ref())?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| e.into())
    }

    /// True when an assembly attribute names `skip_attribute`, with or
    /// without namespace and `Attribute` suffix.
    pub fn is_skipped(&self, skip_attribute: &str) -> bool {
        let short = skip_attribute.strip_suffix("Attribute").unwrap_or(skip_attribute);
        self.assembly_attributes.iter().any(|attr| {
            let simple = attr.rsplit(|c: char| c == '.' || c == ':').next().unwrap_or(attr);
            simple == skip_attribute || simple == short
        })
    }
}

#[derive(Serialize, PartialEq, Eq, Debug, Clone)]
pub struct GeneratedUnit {
    pub hint_name: String,
    pub type_name: String,
    pub text: String,
}

#[derive(Serialize, Debug, Default)]
pub struct BatchOutput {
    pub units: Vec<GeneratedUnit>,
    pub diagnostics: Vec<Diagnostic>,
    /// Set when generation stopped early; `units` holds what finished.
    pub cancelled: bool,
}

impl BatchOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }
}

fn generate_unit(
    decl: &WrapDeclaration,
    config: &GeneratorConfig,
    namer: &FileNamer,
    sink: Option<&mut Sink>,
) -> MyResult<Warning<GeneratedUnit>> {
    let hint_name = namer.file_name(&decl.location, &decl.wrapper.name)?;
    let target = match &sink {
        Some(sink) => Some(sink.path_for(&hint_name)?),
        None => None,
    };
    let line_directive = target.as_ref().map(|p| p.to_string_lossy().into_owned());
    let text = decl.generate(&config.emit_options(line_directive))?;
    let persisted = match (sink, &target) {
        (Some(sink), Some(path)) => sink.persist(path, &text).err(),
        _ => None,
    };
    Ok(Warning::from(
        GeneratedUnit {
            hint_name,
            type_name: decl.wrapper.full_name.clone(),
            text,
        },
        persisted,
    ))
}

/// Generates one unit per declaration.
///
/// A declaration that cannot be generated is reported and skipped. A unit
/// whose file could not be written is still returned, next to an error
/// diagnostic. Only configuration problems fail the whole batch.
pub fn generate_batch(
    batch: &Batch,
    config: &GeneratorConfig,
    fs: &mut FileSystem,
    cancel: Option<&AtomicBool>,
) -> MyResult<BatchOutput> {
    let mut output = BatchOutput::default();
    if batch.is_skipped(&config.skip_attribute) {
        info!("{} carries {}, nothing generated", batch.assembly_name, config.skip_attribute);
        return Ok(output);
    }
    let namer = FileNamer::new(config)?;
    let mut sink = Sink::new(fs, config, &batch.assembly_name)?;
    if let Some(sink) = &sink {
        debug!("Writing generated files to {}", sink.dir().display());
    }

    for decl in &batch.declarations {
        if cancel.map_or(false, |c| c.load(Ordering::Relaxed)) {
            info!("Generation cancelled after {} units", output.units.len());
            output.cancelled = true;
            break;
        }
        match generate_unit(decl, config, &namer, sink.as_mut()) {
            Ok(unit) => {
                let (unit, err) = unit.into_parts();
                if let Some(err) = err {
                    warn!("Failed to write {}: {}", unit.hint_name, err);
                    output
                        .diagnostics
                        .push(Diagnostic::persistence_failure(&decl.location, err));
                }
                output.units.push(unit);
            }
            Err(err) => {
                warn!("Skipping {}: {}", decl.wrapper.full_name, err);
                output.diagnostics.push(Diagnostic::declaration_skipped(
                    &decl.location,
                    &decl.wrapper.full_name,
                    err,
                ));
            }
        }
    }
    Ok(output)
}

#[cfg(test)]
mod test {
    use super::*;

    fn batch(attrs: &[&str]) -> Batch {
        Batch {
            assembly_name: "Game".into(),
            assembly_attributes: attrs.iter().map(|s| s.to_string()).collect(),
            declarations: vec![],
        }
    }

    #[test]
    fn skip_attribute_matches_simple_names() {
        let skip = "SkipGeneratorForAssemblyAttribute";
        assert!(batch(&["global::TypeWrap.SkipGeneratorForAssemblyAttribute"]).is_skipped(skip));
        assert!(batch(&["SkipGeneratorForAssembly"]).is_skipped(skip));
        assert!(!batch(&["global::System.Runtime.CompilerServices.InternalsVisibleTo"]).is_skipped(skip));
        assert!(!batch(&[]).is_skipped(skip));
    }

    #[test]
    fn empty_batch_is_empty_output() {
        let mut fs = FileSystem::mem();
        let output = generate_batch(&batch(&[]), &GeneratorConfig::default(), &mut fs, None).unwrap();
        assert!(output.units.is_empty());
        assert!(!output.has_errors());
        assert!(!output.cancelled);
    }
}
