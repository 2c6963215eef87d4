#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use kfview_core::event::parse_key_script;
use kfview_widgets::{ConePolicy, KeyboardFriendlyView, Scene, ViewConfig};

use crate::error::{DemoError, Result};
use crate::logging;
use crate::report::Report;
use crate::scene_file::{SceneFile, grid};
use crate::session::{bastard_rng, replay, virtual_bastard};

#[derive(Debug, Parser)]
#[command(
    name = "kfview-demo",
    about = "Drive a keyboard-friendly scene view from key scripts or random key presses",
    version
)]
pub struct Cli {
    /// Log filter directives, e.g. `debug` or `kfview_widgets=debug`.
    #[arg(long, global = true, env = "KFVIEW_LOG", default_value = "warn")]
    pub log: String,

    /// Emit log lines as JSON.
    #[arg(long = "log-json", global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a key script against a scene and report the result.
    Run(RunArgs),

    /// Press random keys at a scene, like an impatient user.
    Bastard(BastardArgs),

    /// Print the version history.
    About,
}

#[derive(Debug, Clone, Args)]
pub struct SceneArgs {
    /// JSON scene file; a generated grid is used when absent.
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Items in the generated grid.
    #[arg(long, env = "KFVIEW_DEMO_ITEMS", default_value_t = 9)]
    pub items: usize,

    /// Columns in the generated grid.
    #[arg(long, default_value_t = 3)]
    pub columns: usize,

    /// Distance between neighbouring grid items.
    #[arg(long, default_value_t = 40.0)]
    pub spacing: f64,

    /// Seed for every random choice in the session.
    #[arg(long, env = "KFVIEW_DEMO_SEED", default_value_t = 0)]
    pub seed: u64,

    /// Distance moved by Ctrl+Arrow.
    #[arg(long, env = "KFVIEW_DEMO_STEP", default_value_t = kfview_widgets::DEFAULT_MOVE_STEP)]
    pub step: f64,

    /// Use the symmetric Down cone instead of the legacy one.
    #[arg(long = "symmetric-cone")]
    pub symmetric_cone: bool,
}

impl SceneArgs {
    fn config(&self) -> Result<ViewConfig> {
        if !self.step.is_finite() {
            return Err(DemoError::invalid(format!(
                "step must be finite, got {}",
                self.step
            )));
        }
        Ok(ViewConfig {
            move_step: self.step,
            cone: if self.symmetric_cone {
                ConePolicy::Symmetric
            } else {
                ConePolicy::Legacy
            },
            seed: self.seed,
        })
    }

    fn scene(&self) -> Result<Scene> {
        match &self.scene {
            Some(path) => SceneFile::load(path)?.into_scene(path),
            None => grid(self.items, self.columns, self.spacing),
        }
    }

    fn view(&self) -> Result<KeyboardFriendlyView> {
        Ok(KeyboardFriendlyView::with_config(
            self.scene()?,
            self.config()?,
        ))
    }
}

#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Write the report to a file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub scene: SceneArgs,

    /// Keys to press, separated by spaces or commas, e.g. `Right Shift+Down Ctrl+Up`.
    #[arg(long, default_value = "")]
    pub keys: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
pub struct BastardArgs {
    #[command(flatten)]
    pub scene: SceneArgs,

    /// Number of random key presses.
    #[arg(long, default_value_t = 100)]
    pub presses: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    logging::init(&cli.log, cli.log_json)?;
    match &cli.command {
        Commands::Run(args) => emit(&run_keys(args)?, &args.output),
        Commands::Bastard(args) => emit(&run_bastard(args)?, &args.output),
        Commands::About => {
            print_about();
            Ok(())
        }
    }
}

pub fn run_keys(args: &RunArgs) -> Result<Report> {
    let keys = parse_key_script(&args.keys)?;
    let mut view = args.scene.view()?;
    let steps = replay(&mut view, &keys);
    tracing::info!(
        message = "kfview.run",
        keys = keys.len(),
        items = view.scene().len()
    );
    Ok(Report::new(view.scene(), args.scene.seed, steps))
}

pub fn run_bastard(args: &BastardArgs) -> Result<Report> {
    let mut view = args.scene.view()?;
    let mut keys = bastard_rng(args.scene.seed);
    let steps = virtual_bastard(&mut view, args.presses, &mut keys);
    tracing::info!(
        message = "kfview.bastard",
        presses = args.presses,
        items = view.scene().len()
    );
    Ok(Report::new(view.scene(), args.scene.seed, steps))
}

fn emit(report: &Report, output: &OutputArgs) -> Result<()> {
    let text = if output.json {
        report.to_json()? + "\n"
    } else {
        report.to_text()
    };
    match &output.output {
        Some(path) => fs::write(path, text)?,
        None => print!("{text}"),
    }
    Ok(())
}

fn print_about() {
    println!("kfview {}", kfview_widgets::version());
    for line in kfview_widgets::version_history() {
        println!("  {line}");
    }
}
