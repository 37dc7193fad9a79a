use clap::Parser;
use log::{error, info, warn};
use macroquad::prelude::*;
use relay::input::{read_keys, DirectionLatch};
use shared::encode_command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Display address to send commands to
    #[arg(short = 'd', long, default_value = "127.0.0.1:5005")]
    display: String,

    /// Key polling rate per second
    #[arg(short, long, default_value_t = 10)]
    poll_rate: u32,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Hop 'n' Hiss Controller".to_owned(),
        window_width: 400,
        window_height: 120,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let args = Args::parse();

    // macroquad owns the frame loop; tokio handles the socket and ctrl_c.
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

    // Any local port will do; the display never replies.
    let socket = match runtime.block_on(UdpSocket::bind("0.0.0.0:0")) {
        Ok(socket) => socket,
        Err(e) => {
            error!("Failed to bind sender socket: {}", e);
            return;
        }
    };
    info!("Relaying arrow keys to {}", args.display);

    let quit = Arc::new(AtomicBool::new(false));
    {
        let quit = Arc::clone(&quit);
        runtime.spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                quit.store(true, Ordering::Release);
            }
        });
    }

    let mut latch = DirectionLatch::new();
    let poll = Duration::from_secs_f32(1.0 / args.poll_rate.max(1) as f32);
    let mut next_poll = Instant::now();

    loop {
        if quit.load(Ordering::Acquire) {
            info!("Quit requested, shutting down");
            break;
        }

        if Instant::now() >= next_poll {
            next_poll = Instant::now() + poll;

            let current = read_keys();
            if let Some(direction) = latch.update(current) {
                match encode_command(direction) {
                    Ok(payload) => {
                        // Fire-and-forget: a send failure is a lost datagram,
                        // nothing more.
                        let sent =
                            runtime.block_on(socket.send_to(&payload, args.display.as_str()));
                        match sent {
                            Ok(_) => info!("Sent {}", direction.token()),
                            Err(e) => warn!("Failed to send {}: {}", direction.token(), e),
                        }
                    }
                    Err(e) => warn!("Failed to encode {}: {}", direction.token(), e),
                }
            }
        }

        draw_status(&args.display, latch.last_sent().map(|d| d.token()));
        next_frame().await;
    }
}

fn draw_status(target: &str, last_sent: Option<&str>) {
    clear_background(BLACK);
    draw_text("Hop 'n' Hiss Controller", 10.0, 30.0, 30.0, WHITE);
    draw_text(&format!("Target: {}", target), 10.0, 60.0, 24.0, GRAY);
    draw_text(
        &format!("Last sent: {}", last_sent.unwrap_or("-")),
        10.0,
        90.0,
        24.0,
        GREEN,
    );
}
