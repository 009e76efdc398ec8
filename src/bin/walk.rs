//! Headless walkthrough: build a session, run a scripted walk, print a summary

use std::path::PathBuf;

use clap::Parser;
use glam::Vec3;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use frostwood::core::error::Result;
use frostwood::core::SessionConfig;
use frostwood::interact::{Interact, InteractionEvent};
use frostwood::simulation::{FrameInput, Session, SessionSummary};

const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "frostwood-walk")]
#[command(about = "Generate a snowbound forest house and walk through it headlessly")]
struct Args {
    /// Generation seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Forest radius override
    #[arg(long)]
    radius: Option<f32>,

    /// Tree density override (trees per square unit)
    #[arg(long)]
    density: Option<f32>,

    /// Idle frames to simulate after the scripted walk
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// TOML file with configuration overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct WalkReport {
    summary: SessionSummary,
    events: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("frostwood=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SessionConfig::from_toml_file(path)?,
        None => SessionConfig::default(),
    };
    if let Some(radius) = args.radius {
        config.terrain.radius = radius;
    }
    if let Some(density) = args.density {
        config.terrain.tree_density = density;
    }

    let mut session = Session::new(config, args.seed)?;
    let mut events = Vec::new();

    // Bedroom: open the door, take what is on the desk and the bedside table
    let door = session
        .world()
        .find_door("bedroom_hallway")
        .and_then(|id| session.world().door(id))
        .map(|door| door.position());
    if let Some(position) = door {
        use_target(&mut session, position, &mut events);
    }
    idle(&mut session, 60);

    for item_id in ["flashlight_01", "battery_01"] {
        let position = session
            .world()
            .find_item(item_id)
            .and_then(|id| session.world().item(id))
            .map(|item| item.position());
        if let Some(position) = position {
            use_target(&mut session, position, &mut events);
        }
    }

    // Stroll toward the closet and open it
    walk_to(&mut session, Vec3::new(4.0, 0.0, 3.0), 240);
    use_target(&mut session, Vec3::new(3.5, 1.0, 4.0), &mut events);

    idle(&mut session, args.frames);

    let report = WalkReport {
        summary: session.summary(),
        events,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

/// Look at `target` and press interact for one frame
fn use_target(session: &mut Session, target: Vec3, events: &mut Vec<String>) {
    let look = (target - session.player().eye_position()).normalize_or_zero();
    let input = FrameInput {
        interact: true,
        ..FrameInput::idle(FRAME_DT, look)
    };
    if let Some(event) = session.tick(input).event {
        events.push(describe(&event));
    }
}

fn walk_to(session: &mut Session, target: Vec3, max_frames: u32) {
    for _ in 0..max_frames {
        let to_target = target - session.player().position;
        let flat = Vec3::new(to_target.x, 0.0, to_target.z);
        if flat.length() < 0.2 {
            break;
        }
        let input = FrameInput {
            movement: flat,
            ..FrameInput::idle(FRAME_DT, flat.normalize_or_zero())
        };
        session.tick(input);
    }
}

fn idle(session: &mut Session, frames: u32) {
    for _ in 0..frames {
        session.tick(FrameInput::idle(FRAME_DT, Vec3::ZERO));
    }
}

fn describe(event: &InteractionEvent) -> String {
    match event {
        InteractionEvent::DoorOpening { door } => format!("opened {}", door),
        InteractionEvent::DoorClosing { door } => format!("closed {}", door),
        InteractionEvent::ItemCollected { name, quantity, .. } => {
            format!("picked up {} x{}", name, quantity)
        }
        InteractionEvent::SwitchToggled { label, on } => {
            format!("turned {} {}", label, if *on { "on" } else { "off" })
        }
        InteractionEvent::ContainerOpened { label, contents } => {
            format!("opened {} ({} inside)", label, contents.len())
        }
        InteractionEvent::ContainerClosed { label } => format!("closed {}", label),
        InteractionEvent::Read { title, .. } => format!("read {}", title),
        InteractionEvent::Used { label } => format!("used {}", label),
    }
}

fn print_report(report: &WalkReport) {
    let summary = &report.summary;
    println!("Frostwood walk (seed {})", summary.seed);
    println!("======================");
    println!("Frames:        {}", summary.frames);
    println!("Trees:         {}", summary.trees);
    println!("Snowflakes:    {}", summary.snowflakes);
    println!("Colliders:     {}", summary.colliders);
    println!("Interactables: {}", summary.interactables);
    println!("Doors open:    {}", summary.doors_open);
    println!("Items taken:   {}", summary.items_collected);
    println!(
        "Player at:     ({:.2}, {:.2}, {:.2})",
        summary.player_position[0], summary.player_position[1], summary.player_position[2]
    );

    println!("\n--- Events ---");
    for event in &report.events {
        println!("{}", event);
    }

    println!("\n--- Inventory ---");
    for (id, quantity) in &summary.inventory {
        println!("{} x{}", id, quantity);
    }
}
