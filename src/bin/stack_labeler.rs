use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use stack_labeler::render::{self, LabelColors};
use stack_labeler::{
    FormatKind, FrameLabel, ImageSize, LabelSettings, LocationPreset, SequenceController, config,
    storage,
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "stack-labeler",
    version,
    about = "Compute time/position labels and their placement for image stacks"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List label formats with their units and options.
    Units,
    /// Label every frame of the stack (print, save, or write overlays).
    Labels(LabelsArgs),
    /// Show the preview label (last visible frame).
    Preview(PreviewArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Decimal,
    Digital,
    Custom,
}

impl From<KindArg> for FormatKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Decimal => FormatKind::Decimal,
            KindArg::Digital => FormatKind::Digital,
            KindArg::Custom => FormatKind::CustomSuffix,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PresetArg {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl From<PresetArg> for LocationPreset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::UpperLeft => LocationPreset::UpperLeft,
            PresetArg::UpperRight => LocationPreset::UpperRight,
            PresetArg::LowerLeft => LocationPreset::LowerLeft,
            PresetArg::LowerRight => LocationPreset::LowerRight,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct StackArgs {
    /// Settings file (JSON); flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of images in the stack.
    #[arg(short = 'n', long, default_value_t = 10)]
    frames: i64,
    /// Image width in pixels.
    #[arg(long, default_value_t = 512)]
    width: i32,
    /// Image height in pixels.
    #[arg(long, default_value_t = 512)]
    height: i32,
    /// Value of the first frame.
    #[arg(long, allow_negative_numbers = true)]
    start: Option<f64>,
    /// Step between frames (0 gives a static label).
    #[arg(long, allow_negative_numbers = true)]
    interval: Option<f64>,
    /// First labeled frame (1-based).
    #[arg(long)]
    first: Option<i64>,
    /// Last labeled frame (defaults to the stack size).
    #[arg(long)]
    last: Option<i64>,
    /// Label every n-th frame.
    #[arg(long)]
    every: Option<i64>,
    /// Label format.
    #[arg(long, value_enum)]
    kind: Option<KindArg>,
    /// Unit suffix (digital accepts min, s, ms).
    #[arg(long)]
    unit: Option<String>,
    /// Suffix for the custom format.
    #[arg(long)]
    suffix: Option<String>,
    /// Decimal places for decimal and custom formats.
    #[arg(long)]
    decimals: Option<u32>,
    /// Digital pattern, e.g. "mm:ss".
    #[arg(long)]
    pattern: Option<String>,
    /// Corner preset for the label.
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,
    /// Label x position (overrides the preset).
    #[arg(long, allow_negative_numbers = true)]
    x: Option<i32>,
    /// Label y position (overrides the preset).
    #[arg(long, allow_negative_numbers = true)]
    y: Option<i32>,
    /// Font size in pixels.
    #[arg(long)]
    font_size: Option<u32>,
    /// Fill a background box behind the label.
    #[arg(long, default_value_t = false)]
    background: bool,
}

#[derive(Args, Debug)]
struct LabelsArgs {
    #[command(flatten)]
    stack: StackArgs,
    /// Save the label plan to a file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Write one SVG overlay per labeled frame into this directory.
    #[arg(long)]
    svg_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    stack: StackArgs,
    /// Write the preview overlay as SVG.
    #[arg(long)]
    svg: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Units => cmd_units(),
        Command::Labels(args) => cmd_labels(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn build_settings(args: &StackArgs, image: ImageSize) -> Result<LabelSettings> {
    let mut s = match &args.config {
        Some(path) => config::load_settings(path)?,
        None => LabelSettings::for_stack(args.frames, image, None),
    };
    let seq = &mut s.sequence;
    if let Some(v) = args.start {
        seq.start = v;
    }
    if let Some(v) = args.interval {
        seq.interval = v;
    }
    if let Some(v) = args.first {
        seq.first_frame = v;
    }
    if let Some(v) = args.last {
        seq.last_frame = v;
    }
    if let Some(v) = args.every {
        seq.frame_step = v;
    }

    if let Some(k) = args.kind {
        s.kind = k.into();
        s.format.unit = s.kind.reselect_unit(&s.format.unit).to_string();
    }
    if let Some(u) = &args.unit {
        s.format.unit = u.clone();
    }
    if let Some(v) = &args.suffix {
        s.format.custom_suffix = v.clone();
    }
    if let Some(v) = args.decimals {
        s.format.decimal_places = v;
    }
    if let Some(v) = &args.pattern {
        s.format.custom_pattern = v.clone();
    }

    let placement = &mut s.placement;
    if let Some(p) = args.preset {
        placement.preset = p.into();
    }
    if let Some(x) = args.x {
        placement.set_x(x);
    }
    if let Some(y) = args.y {
        placement.set_y(y);
    }
    if let Some(size) = args.font_size {
        placement.font.size_px = size;
    }
    placement.background |= args.background;
    Ok(s)
}

fn controller_for(args: &StackArgs) -> Result<(SequenceController, LabelSettings)> {
    let image = ImageSize::new(args.width, args.height);
    let settings = build_settings(args, image)?;
    let mut ctl = SequenceController::with_heuristic(image, args.frames, None);
    ctl.configure_settings(settings)?;
    let settings = ctl.settings().clone();
    Ok((ctl, settings))
}

fn cmd_units() -> Result<()> {
    for kind in FormatKind::ALL {
        let caps = kind.capabilities();
        println!(
            "{}: units=[{}] custom_suffix={} custom_pattern={} decimal_places={}",
            kind.name(),
            kind.allowed_units().join(", "),
            caps.custom_suffix,
            caps.custom_pattern,
            caps.decimal_places
        );
    }
    Ok(())
}

fn describe(label: &FrameLabel) -> String {
    let b = label.bounds;
    let bg = if label.background.is_some() {
        " +background"
    } else {
        ""
    };
    format!(
        "frame {}: {:?} at ({}, {}) {}x{}{}",
        label.frame, label.text, b.x, b.y, b.width, b.height, bg
    )
}

fn cmd_labels(args: LabelsArgs) -> Result<()> {
    let (mut ctl, settings) = controller_for(&args.stack)?;
    let image = ImageSize::new(args.stack.width, args.stack.height);
    let outcomes = ctl.run_all()?;
    let labels: Vec<FrameLabel> = outcomes.iter().filter_map(|o| o.label.clone()).collect();
    info!("{} of {} frames labeled", labels.len(), outcomes.len());

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&labels, path)?,
            "json" => storage::save_json(&labels, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} labels to {}", labels.len(), path.display());
    } else {
        for o in &outcomes {
            match &o.label {
                Some(l) => println!("{}", describe(l)),
                None => println!("frame {}: skipped", o.frame),
            }
        }
    }

    if let Some(dir) = args.svg_dir.as_ref() {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        for l in &labels {
            let path = dir.join(format!("frame_{:04}.svg", l.frame));
            write_svg(l, image, &settings, &path)?;
        }
        eprintln!("Wrote {} overlays to {}", labels.len(), dir.display());
    }
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> Result<()> {
    let (mut ctl, settings) = controller_for(&args.stack)?;
    let image = ImageSize::new(args.stack.width, args.stack.height);
    let label = ctl.begin_preview()?;
    let p = &settings.placement;
    println!("{}", describe(&label));
    println!("preset: {} ({}, {})", p.preset.name(), p.x, p.y);
    if let Some(path) = args.svg.as_ref() {
        write_svg(&label, image, &settings, path)?;
        eprintln!("Wrote preview to {}", path.display());
    }
    Ok(())
}

fn write_svg(label: &FrameLabel, image: ImageSize, s: &LabelSettings, path: &Path) -> Result<()> {
    render::write_overlay_svg(
        label,
        image,
        &s.placement.font,
        LabelColors::default(),
        path,
    )
}
