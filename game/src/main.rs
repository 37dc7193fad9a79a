use clap::Parser;
use game::config::{
    Config, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_OBSTACLE_COUNT, DEFAULT_TICK_RATE,
};
use game::input::InputChannel;
use game::rendering::Renderer;
use game::session::Session;
use log::{error, info};
use macroquad::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on for joystick datagrams
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = shared::DEFAULT_PORT)]
    port: u16,

    /// Simulation ticks per second
    #[arg(short, long, default_value_t = DEFAULT_TICK_RATE)]
    tick_rate: u32,

    /// Place obstacle blocks on the board
    #[arg(long)]
    obstacles: bool,

    /// Number of 2x2 obstacle blocks per round
    #[arg(long, default_value_t = DEFAULT_OBSTACLE_COUNT)]
    obstacle_count: usize,

    /// Board width in cells
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: i32,

    /// Board height in cells
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: i32,

    /// Cell size in pixels
    #[arg(long, default_value_t = 20.0)]
    cell_size: f32,
}

fn window_conf() -> Conf {
    let args = Args::parse();
    Conf {
        window_title: "Hop 'n' Hiss".to_owned(),
        window_width: (args.width.max(2) as f32 * args.cell_size) as i32,
        window_height: (args.height.max(2) as f32 * args.cell_size) as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    // macroquad owns the frame loop, so tokio runs beside it on its own
    // worker threads; the receiver task and the ctrl_c watcher live there.
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start async runtime: {}", e);
            return;
        }
    };

    let config = Config {
        tick_rate: args.tick_rate.max(1),
        grid_width: args.width.max(2),
        grid_height: args.height.max(2),
        obstacles_enabled: args.obstacles,
        obstacle_count: args.obstacle_count,
        ..Config::default()
    };

    let address = format!("{}:{}", args.host, args.port);
    let mut input = match runtime.block_on(InputChannel::bind(&address)) {
        Ok(channel) => channel,
        Err(e) => {
            error!("Failed to bind {}: {}", address, e);
            return;
        }
    };

    let quit = Arc::new(AtomicBool::new(false));
    {
        let quit = Arc::clone(&quit);
        runtime.spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                quit.store(true, Ordering::Release);
            }
        });
    }

    let mut session = Session::new(config.clone());
    let renderer = Renderer::new(args.cell_size);

    info!(
        "Board {}x{} cells, {} ticks/s, obstacles {}",
        config.grid_width,
        config.grid_height,
        config.tick_rate,
        if config.obstacles_enabled { "on" } else { "off" }
    );
    info!("Waiting for start signal from joystick...");

    let tick = Duration::from_secs_f32(1.0 / config.tick_rate as f32);
    let mut next_tick = Instant::now() + tick;

    loop {
        if quit.load(Ordering::Acquire) {
            info!("Quit requested, shutting down");
            break;
        }

        if Instant::now() >= next_tick {
            session.tick(&mut input);
            // Late frames skip missed ticks instead of bursting to catch up.
            next_tick = Instant::now() + tick;
        }

        renderer.render(&session.snapshot());
        next_frame().await;
    }
}
