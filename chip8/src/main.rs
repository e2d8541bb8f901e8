use std::path::PathBuf;

use clap::Parser;

use chipvm_core::DEFAULT_CLOCK_HZ;

mod audio;
mod keymap;
mod run;

#[derive(Parser, Debug)]
#[clap(name = "chipvm", version, about = "A Chip-8 interpreter")]
struct Args {
    /// ROM file to load at 0x200
    rom: PathBuf,

    /// Instructions executed per second
    #[clap(long, default_value_t = DEFAULT_CLOCK_HZ)]
    clock_hz: u32,

    /// Size multiplier for each display pixel
    #[clap(long, default_value_t = 10)]
    scale: u32,

    /// Seed for the random number generator behind RND
    #[clap(long)]
    seed: Option<u64>,

    /// Do not open an audio device
    #[clap(long)]
    mute: bool,

    /// Verbose output
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = run::Config {
        rom: args.rom,
        clock_hz: args.clock_hz,
        scale: args.scale,
        seed: args.seed,
        mute: args.mute,
    };
    if let Err(e) = run::run(config) {
        eprintln!("chipvm: {}", e);
        std::process::exit(1);
    }
}
