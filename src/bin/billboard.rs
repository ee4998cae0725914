use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};

#[derive(Parser, Debug)]
#[command(name = "billboard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a creative into a billboard photo.
    Composite(CompositeArgs),
    /// Print the validated effect configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
struct OptionArgs {
    /// JSON object of effect options.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Override one option, e.g. `--set edgeBlur=9`. Repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
}

#[derive(Parser, Debug)]
struct CompositeArgs {
    /// Billboard photo.
    #[arg(long)]
    billboard: PathBuf,

    /// Creative image to place into the frame.
    #[arg(long)]
    creative: PathBuf,

    /// Four frame corners in any order: "x,y x,y x,y x,y".
    #[arg(long)]
    corners: String,

    #[command(flatten)]
    opts: OptionArgs,

    #[arg(long, value_enum, default_value_t = TimeChoice::Day)]
    time: TimeChoice,

    /// Output image path; format follows the extension.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    #[command(flatten)]
    opts: OptionArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TimeChoice {
    Day,
    Night,
}

impl From<TimeChoice> for billboard::TimeOfDay {
    fn from(t: TimeChoice) -> Self {
        match t {
            TimeChoice::Day => Self::Day,
            TimeChoice::Night => Self::Night,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Composite(args) => cmd_composite(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn cmd_composite(args: CompositeArgs) -> anyhow::Result<()> {
    let config = load_config(&args.opts)?;
    let corners = parse_corners(&args.corners)?;
    let photo = read_rgb(&args.billboard)?;
    let creative = read_rgb(&args.creative)?;

    let out = billboard::composite(&photo, &creative, &corners, &config, args.time.into())?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    out.save(&args.out)
        .with_context(|| format!("write image '{}'", args.out.display()))?;

    tracing::info!(path = %args.out.display(), "wrote composite");
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = load_config(&args.opts)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn read_rgb(path: &Path) -> anyhow::Result<image::RgbImage> {
    let img = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
    Ok(img.to_rgb8())
}

fn load_config(args: &OptionArgs) -> anyhow::Result<billboard::EffectConfig> {
    let mut options = match &args.options {
        Some(path) => read_options(path)?,
        None => Map::new(),
    };
    for item in &args.set {
        let (key, raw) = item
            .split_once('=')
            .with_context(|| format!("--set expects KEY=VALUE, got '{item}'"))?;
        // Bare words such as `false` or `12` parse as JSON; anything else is a string.
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        options.insert(key.trim().to_string(), value);
    }
    Ok(billboard::EffectConfig::from_options(&options)?)
}

fn read_options(path: &Path) -> anyhow::Result<Map<String, Value>> {
    let f = File::open(path).with_context(|| format!("open options '{}'", path.display()))?;
    let value: Value =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse options JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("options file must hold a JSON object, got {other}"),
    }
}

fn parse_corners(s: &str) -> anyhow::Result<Vec<billboard::Point>> {
    s.split_whitespace()
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .with_context(|| format!("corner '{pair}' is not 'x,y'"))?;
            let x: f64 = x.trim().parse().with_context(|| format!("bad x in '{pair}'"))?;
            let y: f64 = y.trim().parse().with_context(|| format!("bad y in '{pair}'"))?;
            Ok(billboard::Point::new(x, y))
        })
        .collect()
}
