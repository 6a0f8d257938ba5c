mod gravity;
mod rig;
mod scene;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use climb::{BodyState, Hand, LocomotionController, PoseSource, RapierQueryWorld, Vec3};

use crate::{gravity::Gravity, rig::ScriptedRig, scene::Scene};

#[derive(Parser)]
#[command(name = "climb-sim")]
#[command(about = "Headless climbing locomotion simulation", long_about = None)]
struct Args {
    /// Scene file (TOML)
    #[arg(long, default_value = "climb-sim/scenes/ledge.toml")]
    scene: PathBuf,

    /// Number of ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Tick length in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Log body and grip state every N ticks
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    log_every: u32,

    /// Snap-turn by this many degrees every `turn_every` ticks
    #[arg(long, allow_negative_numbers = true)]
    snap_turn: Option<f32>,

    #[arg(long, default_value_t = 120, value_parser = clap::value_parser!(u32).range(1..))]
    turn_every: u32,
}

/// What happened over a run.
#[derive(Debug)]
struct RunSummary {
    final_position: Vec3,
    peak_height: f32,
    jumps: u32,
    /// Height gained by integrating jump impulses on the ticks they fired.
    jump_lift: f32,
    landings: u32,
}

fn run(scene: &Scene, args: &Args) -> anyhow::Result<RunSummary> {
    let world = RapierQueryWorld::build(scene.world_statics());
    let body = BodyState::at(scene.body.position);
    let mut rig = ScriptedRig::new(scene.rig.clone(), body);
    let followers = rig.sample().hands.map(|_, pose| pose.position);

    let mut controller = LocomotionController::new(scene.locomotion.clone(), body, followers)
        .context("invalid locomotion config")?;
    let gravity = Gravity {
        radius: scene.body.radius,
        layers: scene.body.layer_mask(),
    };

    let mut summary = RunSummary {
        final_position: body.position,
        peak_height: body.position.y,
        jumps: 0,
        jump_lift: 0.0,
        landings: 0,
    };

    for tick in 1..=args.ticks {
        rig.follow(controller.body());
        let poses = rig.sample();
        let effects = controller.tick(&poses, &world, args.dt);
        let before = controller.body().position.y;

        // Physics only takes over while no hand holds the body. A jump launches
        // the body from its grip, so the impulse is integrated on the same tick.
        let gripping = controller.state().hands.iter().any(|(_, h)| h.gripping);
        let held = !effects.jumped() && (effects.any_contact() || gripping);
        if !held && gravity.step(controller.body_mut(), &world, args.dt) {
            summary.landings += 1;
        }
        if effects.jumped() {
            summary.jumps += 1;
            summary.jump_lift += controller.body().position.y - before;
        }

        if let Some(degrees) = args.snap_turn
            && tick % args.turn_every == 0
        {
            rig.follow(controller.body());
            controller.turn(degrees, rig.head());
            log::debug!("snap turn {degrees} at tick {tick}");
        }

        rig.advance(args.dt);
        summary.peak_height = summary.peak_height.max(controller.body().position.y);

        if tick % args.log_every == 0 {
            let body = controller.body();
            log::info!(
                "tick {tick}: body {:.3?} velocity {:.3?} grip L={} R={} avg {:.3?}",
                body.position,
                body.velocity,
                controller.hand(Hand::Left).gripping,
                controller.hand(Hand::Right).gripping,
                controller.state().history().average()
            );
        }
    }

    summary.final_position = controller.body().position;
    Ok(summary)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let scene = Scene::load(&args.scene)?;

    log::info!(
        "running {} ticks at dt {:.4}s from {:?}",
        args.ticks,
        args.dt,
        scene.body.position
    );

    let summary = run(&scene, &args)?;
    log::info!(
        "done: body at {:?}, peak height {:.3}, {} jumps lifting {:.3}, {} landing ticks",
        summary.final_position,
        summary.peak_height,
        summary.jumps,
        summary.jump_lift,
        summary.landings
    );
    Ok(())
}
