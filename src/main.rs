use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use handspell::command::CommandAction;
use handspell::config::Config;
use handspell::{FrameOutcome, HandPose, Session};

/// Sign-spelling recognition demo: capture labeled samples from pose
/// dumps, classify them and interpret the spelled text.
#[derive(Parser)]
#[command(name = "handspell", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Capture a labeled training sample from a pose file
    Capture {
        /// Gesture label (a letter, "Space" or "Delete")
        #[arg(long)]
        label: String,
        /// JSON file holding 21 [x, y, z] landmark triples
        pose_file: PathBuf,
    },
    /// Classify a pose file against the trained samples
    Classify {
        pose_file: PathBuf,
    },
    /// Feed a sequence of pose files through the stability gate and print
    /// the spelled text
    Spell {
        pose_files: Vec<PathBuf>,
    },
    /// Interpret free text as an open-website or search command
    Interpret {
        query: String,
    },
    /// List trained classes and their sample counts
    List,
    /// Clear all local training data (remote store untouched)
    Reset,
}

fn read_pose(path: &PathBuf) -> Result<HandPose> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {:?}", path))?;
    let points: Vec<[f32; 3]> =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {:?}", path))?;
    HandPose::from_points(&points)
        .with_context(|| format!("{:?} must contain exactly 21 landmarks", path))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut session = Session::new(Config::from_env())?;
    let merged = session.load_all().await;
    info!("session ready ({} samples merged)", merged);

    match cli.command {
        Command::Capture { label, pose_file } => {
            let pose = read_pose(&pose_file)?;
            let count = session.capture_sample(&label, Some(&pose))?;
            println!("Saved {} sample ({})", label, count);
        }
        Command::Classify { pose_file } => {
            let pose = read_pose(&pose_file)?;
            let vector = pose.encode(session.descriptor());
            let prediction = session.classifier().classify(session.store(), &vector)?;
            match prediction.label {
                Some(label) => println!(
                    "Detected: {} (distance {:.4})",
                    label,
                    prediction.distance.unwrap_or_default()
                ),
                None => println!("No match"),
            }
        }
        Command::Spell { pose_files } => {
            if pose_files.is_empty() {
                bail!("no pose files given");
            }
            for path in &pose_files {
                let pose = read_pose(path)?;
                match session.on_frame(Some(&pose)) {
                    FrameOutcome::Committed { symbol, text } => {
                        println!("Detected: {} -> {:?}", symbol, text)
                    }
                    FrameOutcome::Tracking { label, count, required } => {
                        println!("Analyzing: {} ({}/{})", label, count, required)
                    }
                    FrameOutcome::Analyzing => println!("Analyzing gesture..."),
                    FrameOutcome::Untrained => {
                        bail!("no gestures trained; capture samples first")
                    }
                    FrameOutcome::NoHand | FrameOutcome::Skipped => {}
                }
            }
            println!("Spelled: {:?}", session.text());
        }
        Command::Interpret { query } => match session.interpret(&query)? {
            CommandAction::Redirect { url } => println!("redirect -> {}", url),
            CommandAction::Search { url } => println!("search -> {}", url),
        },
        Command::List => {
            if !session.store().is_trained() {
                println!("No gestures trained. Capture samples first.");
            }
            for class in session.store().classes() {
                println!("{}: {} samples", class.label(), class.len());
            }
        }
        Command::Reset => {
            session.reset()?;
            println!("Training data reset.");
        }
    }

    Ok(())
}
