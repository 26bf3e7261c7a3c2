//! Stable names for generated files.

use std::{collections::HashMap, path::Path};

use cf_fs::{PathPluggable, SanitizeFileName};
use common::MyResult;
use lazy_static::lazy_static;
use regex::Regex;
use simple_error::simple_error;
use typewrap_base::marker::SourceLocation;

use crate::config::GeneratorConfig;

const PLACEHOLDERS: [&str; 5] = ["file_stem", "type_name", "generator", "hash", "line"];

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{(\w*)\}").unwrap();
}

/// Seeded two-lane djb2 over UTF-16 code units, masked to 31 bits.
///
/// Lanes alternate between even and odd code units and stop at the first
/// NUL, so the value only depends on the path text.
pub fn stable_hash(s: &str, seed: i32) -> i32 {
    let units: Vec<u16> = s.encode_utf16().take_while(|&u| u != 0).collect();
    let mut hash1 = seed;
    let mut hash2 = seed;
    for pair in units.chunks(2) {
        hash1 = (hash1 << 5).wrapping_add(hash1) ^ i32::from(pair[0]);
        if let Some(&odd) = pair.get(1) {
            hash2 = (hash2 << 5).wrapping_add(hash2) ^ i32::from(odd);
        }
    }
    hash1.wrapping_add(hash2.wrapping_mul(1566083941)) & 0x7fff_ffff
}

/// Renders the configured file-name template for each declaration.
#[derive(Debug, Clone)]
pub struct FileNamer {
    template: String,
    generator: String,
    seed: i32,
}

impl FileNamer {
    pub fn new(config: &GeneratorConfig) -> MyResult<Self> {
        for caps in PLACEHOLDER.captures_iter(&config.file_name_template) {
            let name = &caps[1];
            if !PLACEHOLDERS.contains(&name) {
                return Err(simple_error!(
                    "unknown placeholder {{{}}} in file name template {:?}",
                    name,
                    config.file_name_template
                )
                .into());
            }
        }
        Ok(Self {
            template: config.file_name_template.clone(),
            generator: config.short_name.clone(),
            seed: config.hash_seed,
        })
    }

    pub fn file_name(&self, location: &SourceLocation, type_name: &str) -> MyResult<String> {
        let stem = Path::new(&location.path)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "Generated".to_string());
        let vars = HashMap::from([
            ("file_stem".to_string(), SanitizeFileName.output(stem)?),
            ("type_name".to_string(), SanitizeFileName.output(type_name)?),
            ("generator".to_string(), self.generator.clone()),
            ("hash".to_string(), stable_hash(&location.path, self.seed).to_string()),
            ("line".to_string(), location.line.to_string()),
        ]);
        strfmt::strfmt(&self.template, &vars).map_err(|e| e.into())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hash_is_stable_and_positive() {
        let a = stable_hash("Assets/Scripts/Ids.cs", 5381);
        assert_eq!(a, stable_hash("Assets/Scripts/Ids.cs", 5381));
        assert!(a >= 0);
        assert_ne!(a, stable_hash("Assets/Scripts/Ids2.cs", 5381));
        assert_ne!(a, stable_hash("Assets/Scripts/Ids.cs", 17));
    }

    #[test]
    fn hash_of_short_inputs() {
        // empty: seed + seed * k
        let seed: i32 = 5381;
        let expected = seed.wrapping_add(seed.wrapping_mul(1566083941)) & 0x7fff_ffff;
        assert_eq!(stable_hash("", seed), expected);
        // single unit only touches the first lane
        let h1 = (seed << 5).wrapping_add(seed) ^ ('a' as i32);
        let expected = h1.wrapping_add(seed.wrapping_mul(1566083941)) & 0x7fff_ffff;
        assert_eq!(stable_hash("a", seed), expected);
        // anything after NUL is ignored
        assert_eq!(stable_hash("a\0bc", seed), stable_hash("a", seed));
    }

    #[test]
    fn file_name_from_template() {
        let namer = FileNamer::new(&GeneratorConfig::default()).unwrap();
        let location = SourceLocation {
            path: "Assets/Ids.cs".into(),
            line: 12,
        };
        let name = namer.file_name(&location, "Map<T>").unwrap();
        let hash = stable_hash("Assets/Ids.cs", 5381);
        assert_eq!(name, format!("Ids__Map_T___TypeWrapGenerator_{hash}12.g.cs"));
    }

    #[test]
    fn unknown_placeholder_is_rejected() {
        let config = GeneratorConfig {
            file_name_template: "{file_stem}_{nope}.g.cs".into(),
            ..Default::default()
        };
        assert!(FileNamer::new(&config).is_err());
    }
}
