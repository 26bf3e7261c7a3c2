use std::{
    io::Write,
    path::PathBuf,
    process::ExitCode,
};

use cf_fs::FileSystem;
use clap::Parser;
use typewrap::{generate_batch, AnyErr, Batch, GeneratorConfig};

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about=None)]
struct Args {
    /// The batch document describing the wrapper declarations of one
    /// assembly, as JSON.
    #[clap(short, long, value_parser)]
    input: PathBuf,
    /// A JSON generator config. Missing keys take their defaults.
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,
    /// Root of the project that receives `Temp/GeneratedCode/`.
    #[clap(short, long, value_parser)]
    project_path: Option<PathBuf>,
    /// Also write each generated unit to disk.
    #[clap(short, long, action)]
    output_source_files: bool,
}

fn main_result() -> Result<bool, AnyErr> {
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };
    if args.project_path.is_some() {
        config.project_path = args.project_path;
    }
    config.output_source_files |= args.output_source_files;
    config.apply_env();

    let batch = Batch::from_file(&args.input)?;
    let mut fs = FileSystem::os();
    let output = generate_batch(&batch, &config, &mut fs, None)?;

    for diag in &output.diagnostics {
        eprintln!("{}", diag);
    }
    let mut stdout = std::io::stdout().lock();
    for unit in &output.units {
        writeln!(stdout, "// {}", unit.hint_name)?;
        stdout.write_all(unit.text.as_bytes())?;
    }
    Ok(!output.has_errors())
}

fn main() -> ExitCode {
    env_logger::init();
    match main_result() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("typewrap: {}", err);
            ExitCode::from(2)
        }
    }
}
