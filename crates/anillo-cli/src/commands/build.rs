//! Sequencer build command.

use std::path::PathBuf;

use anillo_core::{SequencerSpec, WidgetStyle, build_sequencer};
use anillo_patch::write_patch;
use clap::{Args, ValueEnum};

use crate::spec_file::SpecFile;

/// Widget styles exposed on the command line.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliStyle {
    /// Binary on/off toggles.
    #[default]
    Toggle,
    /// M-state cycling buttons.
    Cyclic,
}

impl From<CliStyle> for WidgetStyle {
    fn from(style: CliStyle) -> Self {
        match style {
            CliStyle::Toggle => WidgetStyle::Toggle,
            CliStyle::Cyclic => WidgetStyle::CyclicButton,
        }
    }
}

#[derive(Args)]
pub struct BuildArgs {
    /// Output patch file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Load the sequencer layout from a TOML spec file; flags below
    /// override its values
    #[arg(long)]
    spec: Option<PathBuf>,

    /// Number of steps on the ring
    #[arg(long)]
    steps: Option<usize>,

    /// Per-step state cardinality (toggle style requires 2)
    #[arg(long)]
    cardinality: Option<u32>,

    /// Widget style
    #[arg(long, value_enum)]
    style: Option<CliStyle>,

    /// Build the forward/backward rotation subsystem
    #[arg(long)]
    rotation: bool,

    /// Namespace step addresses for multi-instance safety
    #[arg(long)]
    namespaced: bool,

    /// Build the bulk-state inlet path
    #[arg(long)]
    settable: bool,

    /// Latch the outlet so it always holds the last passed value
    #[arg(long)]
    latched: bool,
}

impl BuildArgs {
    /// Resolves the final spec: file values first, then flag overrides.
    /// Boolean flags only switch subsystems on; a spec file is the way to
    /// pin them off.
    fn resolve(&self) -> anyhow::Result<SequencerSpec> {
        let mut spec = match &self.spec {
            Some(path) => SpecFile::load(path)?.into_spec(),
            None => SequencerSpec::default(),
        };
        if let Some(steps) = self.steps {
            spec.steps = steps;
        }
        if let Some(cardinality) = self.cardinality {
            spec.cardinality = cardinality;
        }
        if let Some(style) = self.style {
            spec.style = style.into();
        }
        spec.rotation |= self.rotation;
        spec.namespaced |= self.namespaced;
        spec.settable |= self.settable;
        spec.latched |= self.latched;
        Ok(spec)
    }
}

pub fn run(args: BuildArgs) -> anyhow::Result<()> {
    let spec = args.resolve()?;
    tracing::info!(?spec, "building sequencer patch");

    let graph = build_sequencer(&spec)?;
    write_patch(&args.output, &graph)?;

    println!(
        "Wrote {} nodes and {} connections to {}",
        graph.node_count(),
        graph.connection_count(),
        args.output.display()
    );
    Ok(())
}
