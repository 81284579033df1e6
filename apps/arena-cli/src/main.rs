use arena_input::InputScript;
use arena_kernel::{Arena, ArenaConfig, ArenaEvent};
use arena_render::{DebugTextRenderer, RenderView, Renderer};
use arena_tools::ArenaInspector;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arena-cli", about = "Headless driver for the cube arena")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON arena configuration (defaults apply to missing fields)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Step the arena through a scripted input sequence
    Run {
        /// Input script, e.g. "up:30,none:10,up+left:5"
        #[arg(short, long, default_value = "up:120")]
        script: InputScript,
        /// Print a summary every N steps (0 prints only the final state)
        #[arg(short, long, default_value = "0")]
        every: u64,
        /// Print each bounce as it happens
        #[arg(short, long)]
        bounces: bool,
    },
    /// Run a script twice and check both runs agree
    Replay {
        /// Input script, e.g. "up:30,none:10,up+left:5"
        #[arg(short, long, default_value = "up:60,left:60,down+right:120")]
        script: InputScript,
    },
    /// Print the effective configuration as JSON
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("arena-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", arena_render::crate_info());
            println!("tools: {}", arena_tools::crate_info());
            let arena = Arena::new(config)?;
            println!("walls: {}", arena.walls().len());
        }
        Commands::Run {
            script,
            every,
            bounces,
        } => {
            let mut arena = Arena::new(config)?;
            let mut view = RenderView::default();
            tracing::info!(frames = script.len(), "running script");

            for input in script.frames() {
                arena.step(input);
                view.follow(arena.actor().position());

                for event in arena.drain_events() {
                    if let ArenaEvent::Blocked {
                        tick,
                        wall,
                        bounces: hits,
                    } = event
                    {
                        if bounces {
                            for b in hits {
                                println!(
                                    "tick {tick}: wall {wall} bounced {} {:.3} -> {:.3}",
                                    b.axis, b.before, b.after
                                );
                            }
                        }
                    }
                }

                if every > 0 && arena.tick() % every == 0 {
                    println!("{}", ArenaInspector::summary(&arena));
                }
            }

            print!("{}", DebugTextRenderer::new().render(&arena, &view));
        }
        Commands::Replay { script } => {
            println!("Deterministic replay: frames={}", script.len());

            let run1 = Arena::replay(config, script.frames())?;
            let run2 = Arena::replay(config, script.frames())?;
            let (bx, bz) = ArenaInspector::bounce_counts(run1.events());

            println!("Run 1: {}", ArenaInspector::summary(&run1));
            println!("Run 2: {}", ArenaInspector::summary(&run2));
            println!("Bounces: x={bx} z={bz}");
            let matched = run1.state_hash() == run2.state_hash();
            println!(
                "Match: {} (hash={:#x})",
                if matched { "OK" } else { "MISMATCH" },
                run1.state_hash()
            );
            if !matched {
                anyhow::bail!("replay diverged");
            }
        }
        Commands::Config => {
            println!("{}", config.to_json_pretty()?);
        }
    }

    Ok(())
}
