use helmholtz_core::ReciprocalPair;
use helmholtz_dataset::{build, convert, find_pairs, DatasetError, HelmholtzSettings};
use log::*;
use std::error::Error;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(
    name = "helmholtz",
    about = "A tool for preparing multi-view photometric stereo captures for Helmholtz stereo",
    rename_all = "kebab-case"
)]
struct Opt {
    /// The file where settings are specified.
    ///
    /// This is in the format of `helmholtz_dataset::HelmholtzSettings`.
    #[structopt(short, long, default_value = "helmholtz-settings.json")]
    settings: PathBuf,
    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt)]
#[structopt(rename_all = "kebab-case")]
enum Command {
    /// Convert a capture (with `calib` and `images` directories) into an object directory
    Convert {
        /// Path to the capture directory
        #[structopt(parse(from_os_str))]
        src: PathBuf,
        /// Destination object directory
        #[structopt(parse(from_os_str))]
        dst: PathBuf,
        /// Object name, defaults to the name of the destination directory
        #[structopt(long)]
        name: Option<String>,
    },
    /// Find Helmholtz pairs of an object directory containing a parameter record
    Pairs {
        /// Path to the object directory
        #[structopt(parse(from_os_str))]
        obj_dir: PathBuf,
        /// Angle threshold in degrees, overrides the settings file
        #[structopt(long)]
        thresh: Option<f64>,
    },
    /// Convert a capture and compute its Helmholtz pairs
    Build {
        /// Path to the capture directory
        #[structopt(parse(from_os_str))]
        src: PathBuf,
        /// Destination object directory
        #[structopt(parse(from_os_str))]
        dst: PathBuf,
        /// Object name, defaults to the name of the destination directory
        #[structopt(long)]
        name: Option<String>,
        /// Angle threshold in degrees, overrides the settings file
        #[structopt(long)]
        thresh: Option<f64>,
    },
}

fn main() {
    pretty_env_logger::init_timed();
    let opt = Opt::from_args();

    let settings: Option<HelmholtzSettings> = std::fs::File::open(&opt.settings)
        .ok()
        .and_then(|file| serde_json::from_reader(file).ok());
    if settings.is_some() {
        info!("loaded existing settings");
    } else {
        info!("used default settings");
    }
    let settings = settings.unwrap_or_default();

    if let Err(e) = run(opt.command, settings) {
        error!("{}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            error!("caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run(command: Command, mut settings: HelmholtzSettings) -> Result<(), DatasetError> {
    match command {
        Command::Convert { src, dst, name } => {
            convert(&src, &dst, name.as_deref(), &settings)?;
            println!("Converted object saved to {}", dst.display());
        }
        Command::Pairs { obj_dir, thresh } => {
            if let Some(thresh) = thresh {
                settings.threshold_degrees = thresh;
            }
            let pairs = find_pairs(&obj_dir, &settings)?;
            println!("# Found {} Helmholtz pairs", pairs.len());
            for pair in &pairs {
                println!("{}", describe(pair));
            }
        }
        Command::Build {
            src,
            dst,
            name,
            thresh,
        } => {
            if let Some(thresh) = thresh {
                settings.threshold_degrees = thresh;
            }
            let (_, pairs) = build(&src, &dst, name.as_deref(), &settings)?;
            println!("Converted object saved to {}", dst.display());
            println!("Found {} Helmholtz pairs", pairs.len());
            println!("Pairs written to {}", settings.pairs_file);
        }
    }
    Ok(())
}

/// Describes a pair for people, with views and lights numbered from 1.
fn describe(&ReciprocalPair(a, b): &ReciprocalPair) -> String {
    format!(
        "View {:02} - Light {:03} <-> View {:02} - Light {:03}",
        a.view + 1,
        a.light + 1,
        b.view + 1,
        b.light + 1
    )
}
