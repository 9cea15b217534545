//! Headless driver for the sphere simulation.
//!
//! Measures wall-clock frame deltas, feeds them to the fixed-step clock and
//! reads back the render view of every body once per frame. Views are logged
//! at `debug` instead of drawn.
//!
//! ```text
//! RUST_LOG=debug rb-demo --scene bouncing_spheres --seconds 3 --push 40,0,0
//! ```

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use glam::DVec3;
use log::{debug, info};

use rb_core::{BodyId, FixedTimestep, SceneLoader};

#[derive(Parser, Debug)]
#[command(name = "rb-demo", about = "Run a sphere scene on a fixed timestep")]
struct Args {
    /// Directory holding `<name>.yaml` scene files
    #[arg(long, default_value = "scenes")]
    scenes: PathBuf,

    /// Scene to load
    #[arg(long, default_value = "bouncing_spheres")]
    scene: String,

    /// Wall-clock seconds to run for
    #[arg(long, default_value_t = 5.0)]
    seconds: f64,

    /// Render frames per second to emulate
    #[arg(long, default_value_t = 60.0)]
    frame_hz: f64,

    /// Force applied to body 0 on the first frame, as `x,y,z`
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    push: Option<DVec3>,

    /// Print the available scenes and exit
    #[arg(long)]
    list: bool,
}

fn parse_vec3(text: &str) -> std::result::Result<DVec3, String> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z, got '{}'", text));
    }
    let mut xyz = [0.0; 3];
    for (slot, part) in xyz.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|e| format!("bad component '{}': {}", part, e))?;
    }
    Ok(DVec3::from_array(xyz))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let loader = SceneLoader::new(&args.scenes);
    if args.list {
        let names = loader
            .list_scenes()
            .with_context(|| format!("listing scenes in {}", args.scenes.display()))?;
        for name in names {
            println!("{}", name);
        }
        return Ok(());
    }

    if !(args.frame_hz > 0.0 && args.frame_hz.is_finite()) {
        bail!("--frame-hz must be positive, got {}", args.frame_hz);
    }

    let scene = loader
        .load_scene(&args.scene)
        .with_context(|| format!("loading scene '{}'", args.scene))?;
    let mut world = scene.build_world();
    let mut clock = FixedTimestep::from_config(&scene.physics, &scene.clock);

    if let Some(force) = args.push {
        if !world.apply_force(BodyId(0), force) {
            bail!("scene '{}' has no body to push", args.scene);
        }
        info!("pushing body 0 with {:?}", force);
    }

    let frame_budget = Duration::from_secs_f64(1.0 / args.frame_hz);
    let run_for = Duration::from_secs_f64(args.seconds.max(0.0));
    let started = Instant::now();
    let mut last = started;
    let mut frames: u64 = 0;

    while started.elapsed() < run_for {
        let now = Instant::now();
        let frame_delta = now.duration_since(last).as_secs_f64();
        last = now;

        let ticks = clock.run(&mut world, &scene.physics, frame_delta);
        frames += 1;

        debug!(
            "frame {} ticks={} alpha={:.3} t={:.3}s",
            frames,
            ticks,
            clock.alpha(),
            world.time()
        );
        for (index, view) in world.views().enumerate() {
            debug!(
                "  body {} pos=({:.3}, {:.3}, {:.3}) rot=({:.3}, {:.3}, {:.3}, {:.3}) r={}",
                index,
                view.position.x,
                view.position.y,
                view.position.z,
                view.orientation.x,
                view.orientation.y,
                view.orientation.z,
                view.orientation.w,
                view.radius
            );
        }

        let spent = now.elapsed();
        if spent < frame_budget {
            thread::sleep(frame_budget - spent);
        }
    }

    info!(
        "ran {} frames, {} ticks, {:.3}s simulated, kinetic energy {:.4} J",
        frames,
        clock.total_ticks(),
        world.time(),
        world.kinetic_energy()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("1,-2.5, 3").unwrap(), DVec3::new(1.0, -2.5, 3.0));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,x,3").is_err());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["rb-demo"]);
        assert_eq!(args.scene, "bouncing_spheres");
        assert_eq!(args.scenes, PathBuf::from("scenes"));
        assert!(args.push.is_none());
        assert!(!args.list);
    }

    #[test]
    fn test_args_push() {
        let args = Args::parse_from(["rb-demo", "--push", "-4,0,2", "--frame-hz", "30"]);
        assert_eq!(args.push, Some(DVec3::new(-4.0, 0.0, 2.0)));
        assert_eq!(args.frame_hz, 30.0);
    }
}
