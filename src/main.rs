use anyhow::Result;
use clap::{Parser, ValueEnum};
use flappy_square::game::GameConfig;
use flappy_square::modes::{AutoPlayMode, HumanMode};

#[derive(Parser)]
#[command(name = "flappy-square")]
#[command(version, about = "Flappy-Square arcade game with a deterministic core")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Screen width in pixels
    #[arg(long, default_value = "480")]
    width: f32,

    /// Screen height in pixels
    #[arg(long, default_value = "640")]
    height: f32,

    /// Seed for deterministic episodes
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play with the keyboard (Space to flap)
    Human,
    /// Watch the built-in pilot fly through the step/observe interface
    Auto,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Create game configuration from CLI arguments
    let config = GameConfig::new(cli.width, cli.height);

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config, cli.seed)?;
            human_mode.run().await?;
        }
        Mode::Auto => {
            let mut auto_mode = AutoPlayMode::new(config, cli.seed)?;
            auto_mode.run().await?;
        }
    }

    Ok(())
}
