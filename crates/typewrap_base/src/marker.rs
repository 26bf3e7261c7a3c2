//! Wrapper declarations and their markers, resolved into a [`WrapSpec`].

use common::MyResult;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use simple_error::simple_error;

use crate::analyzer::analyze;
use crate::emit::{emit, EmitOptions, Scope};
use crate::model::{MemberDescriptor, UnderlyingSurface, WrapSpec, WrapperKind};

pub const DEFAULT_MEMBER_NAME: &str = "value";

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^@?[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

fn default_member_name() -> String {
    DEFAULT_MEMBER_NAME.to_string()
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
pub struct WrapperInfo {
    pub name: String,
    /// `global::`-qualified, without type arguments.
    pub full_name: String,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    pub kind: WrapperKind,
    #[serde(default)]
    pub is_readonly: bool,
    #[serde(default)]
    pub is_sealed: bool,
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
#[serde(tag = "marker", rename_all = "snake_case")]
pub enum Marker {
    WrapType {
        #[serde(rename = "type")]
        ty: String,
        #[serde(default = "default_member_name")]
        member_name: String,
        #[serde(default)]
        exclude_converter: bool,
    },
    WrapRecord {
        #[serde(default)]
        exclude_converter: bool,
    },
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
pub struct RecordParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct SourceLocation {
    pub path: String,
    #[serde(default)]
    pub line: usize,
}

/// One marked wrapper as reported by the symbol oracle.
#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
pub struct WrapDeclaration {
    pub wrapper: WrapperInfo,
    pub marker: Marker,
    #[serde(default)]
    pub record_parameters: Vec<RecordParameter>,
    /// Absent when the oracle could not bind the underlying type.
    #[serde(default)]
    pub underlying: Option<UnderlyingSurface>,
    #[serde(default)]
    pub members: Vec<MemberDescriptor>,
    #[serde(default)]
    pub scopes: Vec<Scope>,
    #[serde(default)]
    pub location: SourceLocation,
}

impl WrapDeclaration {
    fn surface(&self) -> MyResult<&UnderlyingSurface> {
        self.underlying
            .as_ref()
            .ok_or_else(|| simple_error!("underlying type of {} could not be resolved", self.wrapper.name).into())
    }

    pub fn resolve(&self) -> MyResult<WrapSpec> {
        let wrapper = &self.wrapper;
        if !is_identifier(&wrapper.name) {
            return Err(simple_error!("{:?} is not a valid type name", wrapper.name).into());
        }
        let surface = self.surface()?;
        let (field_name, marked_type, exclude_converter) = match &self.marker {
            Marker::WrapType {
                ty,
                member_name,
                exclude_converter,
            } => {
                if wrapper.kind.is_record() {
                    return Err(simple_error!("{} is a record; mark it with wrap_record", wrapper.name).into());
                }
                if !is_identifier(member_name) {
                    return Err(simple_error!("{:?} is not a valid member name for {}", member_name, wrapper.name).into());
                }
                (member_name.clone(), ty.clone(), *exclude_converter)
            }
            Marker::WrapRecord { exclude_converter } => {
                if !wrapper.kind.is_record() {
                    return Err(simple_error!("wrap_record on {} which is not a record", wrapper.name).into());
                }
                let param = match self.record_parameters.as_slice() {
                    [only] => only,
                    params => {
                        return Err(simple_error!(
                            "record {} must have exactly one parameter, found {}",
                            wrapper.name,
                            params.len()
                        )
                        .into())
                    }
                };
                (param.name.clone(), param.ty.clone(), *exclude_converter)
            }
        };
        if marked_type != surface.ty.name {
            return Err(simple_error!(
                "{} wraps {} but the resolved surface is {}",
                wrapper.name,
                marked_type,
                surface.ty.name
            )
            .into());
        }
        Ok(WrapSpec {
            type_name: wrapper.name.clone(),
            full_type_name: wrapper.full_name.clone(),
            type_parameters: wrapper.type_parameters.clone(),
            kind: wrapper.kind,
            field_name,
            is_readonly: wrapper.is_readonly,
            is_sealed: wrapper.is_sealed,
            exclude_converter,
            underlying: surface.ty.clone(),
        })
    }

    /// Resolves, analyzes and renders this declaration.
    pub fn generate(&self, options: &EmitOptions) -> MyResult<String> {
        let spec = self.resolve()?;
        let plan = analyze(&spec, self.surface()?, &self.members)?;
        emit(&plan, &self.scopes, options)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{TypeCategory, TypeKind, TypeRef};

    fn declaration(kind: WrapperKind, marker: Marker) -> WrapDeclaration {
        WrapDeclaration {
            wrapper: WrapperInfo {
                name: "Id".into(),
                full_name: "global::App.Id".into(),
                type_parameters: Vec::new(),
                kind,
                is_readonly: false,
                is_sealed: false,
            },
            marker,
            record_parameters: Vec::new(),
            underlying: Some(UnderlyingSurface {
                ty: TypeRef::new("int", TypeCategory::Int32, TypeKind::Struct),
                members: Vec::new(),
            }),
            members: Vec::new(),
            scopes: Vec::new(),
            location: SourceLocation::default(),
        }
    }

    #[test]
    fn wrap_type_defaults_member_name() {
        let marker: Marker = serde_json::from_str(r#"{"marker": "wrap_type", "type": "int"}"#).unwrap();
        let spec = declaration(WrapperKind::Struct, marker).resolve().unwrap();
        assert_eq!(spec.field_name, "value");
        assert!(!spec.exclude_converter);
        assert_eq!(spec.underlying.category, TypeCategory::Int32);
    }

    #[test]
    fn wrap_type_rejects_bad_member_names() {
        for name in ["", "1st", "my value"] {
            let marker = Marker::WrapType {
                ty: "int".into(),
                member_name: name.into(),
                exclude_converter: false,
            };
            assert!(declaration(WrapperKind::Struct, marker).resolve().is_err(), "{name:?}");
        }
    }

    #[test]
    fn wrap_type_checks_underlying_type() {
        let marker = Marker::WrapType {
            ty: "long".into(),
            member_name: "value".into(),
            exclude_converter: false,
        };
        assert!(declaration(WrapperKind::Struct, marker).resolve().is_err());
        let mut unbound = declaration(
            WrapperKind::Struct,
            Marker::WrapType {
                ty: "int".into(),
                member_name: "value".into(),
                exclude_converter: false,
            },
        );
        unbound.underlying = None;
        assert!(unbound.resolve().is_err());
    }

    #[test]
    fn wrap_record_takes_the_single_parameter() {
        let mut decl = declaration(WrapperKind::RecordStruct, Marker::WrapRecord { exclude_converter: true });
        assert!(decl.resolve().is_err());
        decl.record_parameters.push(RecordParameter {
            name: "Raw".into(),
            ty: "int".into(),
        });
        let spec = decl.resolve().unwrap();
        assert_eq!(spec.field_name, "Raw");
        assert!(spec.exclude_converter);
        decl.record_parameters.push(RecordParameter {
            name: "Other".into(),
            ty: "int".into(),
        });
        assert!(decl.resolve().is_err());
    }

    #[test]
    fn wrap_record_requires_a_record() {
        let mut decl = declaration(WrapperKind::Class, Marker::WrapRecord { exclude_converter: false });
        decl.record_parameters.push(RecordParameter {
            name: "Raw".into(),
            ty: "int".into(),
        });
        assert!(decl.resolve().is_err());
    }
}
