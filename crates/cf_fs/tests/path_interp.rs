use cf_fs::*;
use itertools::Itertools;
use std::path::Path;

#[test]
fn single_forward() {
    let relative = cf_fs::ForwardPath::default()
        .output("proper/relative/path")
        .expect("proper relative should not be err");
    assert_eq!(relative, "proper/relative/path");
    let absolute = cf_fs::ForwardPath::default()
        .output("/this/is/absolute")
        .expect("absolute should not be err");
    assert_eq!(absolute, "/this/is/absolute");
}

#[test]
fn rooted_bypasses_absolute() {
    let abs_str = if cfg!(windows) { "C:\\gen\\a.g.cs" } else { "/gen/a.g.cs" };
    let rooted: PathPlugin = RootedPath::new("project").into();
    assert_eq!(rooted.output(abs_str).expect("Should not err"), abs_str);
    let relative = rooted.output("Temp/a.g.cs").expect("Should not err");
    assert_eq!(Path::new(&relative), Path::new("project").join("Temp/a.g.cs"));
    assert!(rooted.output("").is_err());
}

#[test]
fn sanitize_keeps_identifier_chars() {
    let names = ["Wrapper<T>", "Outer.Inner", "A B", "ok_name-1"]
        .iter()
        .map(|n| SanitizeFileName.output(n).expect("non-empty name"))
        .collect_vec();
    assert_eq!(names, vec!["Wrapper_T_", "Outer.Inner", "A_B", "ok_name-1"]);
    assert!(SanitizeFileName.output("  ").is_err());
}

#[test]
fn sanitize_replaces_non_ascii_letters() {
    assert_eq!(SanitizeFileName.output("Größe").unwrap(), "Gr__e");
    assert_eq!(SanitizeFileName.output("Игрок.g.cs").unwrap(), "_____.g.cs");
}

#[test]
fn composition_runs_in_order() {
    let interp = PathInterpreter::new(vec![PathPlugin::from(SanitizeFileName)]).then(RootedPath::new("out"));
    let out = interp.output_path("My File.g.cs").expect("Should not err");
    assert_eq!(out, Path::new("out").join("My_File.g.cs"));

    let default_interp = PathInterpreter::default();
    assert_eq!(default_interp.output("a/b").unwrap(), "a/b");
}
