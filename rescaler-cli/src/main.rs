use clap::Parser;
use rescaler::parallel::resize_parallel;
use rescaler::{
    cpu, AreaMode, Capability, ResizeMethod, ResizeParameters, ResizerFactory, SampleKind,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Rescaler CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SampleConfig {
    U8,
    U16,
    F32,
}

impl From<SampleConfig> for SampleKind {
    fn from(value: SampleConfig) -> Self {
        match value {
            SampleConfig::U8 => SampleKind::U8,
            SampleConfig::U16 => SampleKind::U16,
            SampleConfig::F32 => SampleKind::F32,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MethodConfig {
    Nearest,
    NearestPytorch,
    Area,
    Bilinear,
    BilinearCaffe,
    BilinearPytorch,
    Bicubic,
}

impl From<MethodConfig> for ResizeMethod {
    fn from(value: MethodConfig) -> Self {
        match value {
            MethodConfig::Nearest => ResizeMethod::Nearest,
            MethodConfig::NearestPytorch => ResizeMethod::NearestPytorch,
            MethodConfig::Area => ResizeMethod::Area,
            MethodConfig::Bilinear => ResizeMethod::Bilinear,
            MethodConfig::BilinearCaffe => ResizeMethod::BilinearCaffe,
            MethodConfig::BilinearPytorch => ResizeMethod::BilinearPytorch,
            MethodConfig::Bicubic => ResizeMethod::Bicubic,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum CapabilityConfig {
    Auto,
    Baseline,
    Vector128,
    Vector256,
    Vector512,
}

impl CapabilityConfig {
    fn factory(self) -> ResizerFactory {
        let capability = match self {
            CapabilityConfig::Auto => return ResizerFactory::new(),
            CapabilityConfig::Baseline => Capability::Baseline,
            CapabilityConfig::Vector128 => Capability::Vector128,
            CapabilityConfig::Vector256 => Capability::Vector256,
            CapabilityConfig::Vector512 => Capability::Vector512,
        };
        ResizerFactory::with_capability(capability)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    input_path: String,
    output_path: String,
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    dst_height: usize,
    channels: usize,
    sample: SampleConfig,
    method: MethodConfig,
    area_2x2: bool,
    threads: Option<usize>,
    capability: CapabilityConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: String::new(),
            output_path: String::new(),
            src_width: 0,
            src_height: 0,
            dst_width: 0,
            dst_height: 0,
            channels: 1,
            sample: SampleConfig::U8,
            method: MethodConfig::Bilinear,
            area_2x2: false,
            threads: None,
            capability: CapabilityConfig::Auto,
        }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    capability: &'static str,
    family: &'static str,
    kernel: &'static str,
    threads: usize,
    output_bytes: usize,
    elapsed_ms: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("rescaler=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.input_path.is_empty() || config.output_path.is_empty() {
        return Err("input_path and output_path must be set in the config".into());
    }
    if config.threads == Some(0) {
        return Err("threads must be at least 1".into());
    }

    let area_mode = if config.area_2x2 {
        AreaMode::TwoByTwo
    } else {
        AreaMode::OneByOne
    };
    let params = ResizeParameters::new(
        config.src_width,
        config.src_height,
        config.dst_width,
        config.dst_height,
        config.channels,
        config.sample.into(),
        config.method.into(),
    )?
    .with_area_mode(area_mode);
    let factory = config.capability.factory();
    let threads = match config.threads {
        Some(n) => cpu::set_thread_number(n),
        None => cpu::thread_number(),
    };

    let src = fs::read(&config.input_path)?;
    let stride = params.dst_row_bytes();
    let mut dst = vec![0u8; stride * params.dst_height()];

    let start = Instant::now();
    let variant = if threads > 1 {
        resize_parallel(&params, &factory, &src, params.src_row_bytes(), &mut dst, stride)?;
        factory.create(&params)?.variant()
    } else {
        let mut resampler = factory.create(&params)?;
        resampler.resize(&src, params.src_row_bytes(), &mut dst, stride)?;
        resampler.variant()
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;

    fs::write(&config.output_path, &dst)?;

    let report = Report {
        capability: factory.capability().name(),
        family: variant.family.name(),
        kernel: variant.kernel.name(),
        threads,
        output_bytes: dst.len(),
        elapsed_ms,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
