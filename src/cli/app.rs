use clap::{ArgGroup, Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "polar")]
#[command(about = "Decode Polar activity tracker dumps")]
#[command(version)]
#[command(group(ArgGroup::new("target").required(true).args(["dump", "file"])))]
pub struct Cli {
    /// Path to a device dump directory (contains SYS/ and U/)
    #[arg(long, value_name = "PATH")]
    pub dump: Option<String>,

    /// Decode a single file
    #[arg(long, value_name = "PATH")]
    pub file: Option<String>,

    /// Turn off debug logging (warnings and errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Walk user directories on N threads (0 = sequential)
    #[arg(long, default_value = "0")]
    pub threads: usize,

    /// Control colored output
    #[arg(long, default_value = "auto")]
    pub color: ColorMode,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}
