//! QA harness for the viewpoint spawner
//!
//! Runs one activation and one teardown against an in-memory world with a
//! standing avatar, then reports what is left in the world.
//!
//! Usage: `spawn_test [config.toml|config.ron]`

use viewpoint_spawner::foundation::logging;
use viewpoint_spawner::prelude::*;

/// Eye height of the sandbox avatar
const AVATAR_POSITION: Vec3 = Vec3::new(0.0, 1.8, 0.0);

/// Sandbox camera: turned 30 degrees left and looking slightly down
const CAMERA_EULER_DEGREES: Vec3 = Vec3::new(-15.0, 30.0, 0.0);

#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Script(#[from] ScriptError),
}

fn load_config() -> Result<SpawnerConfig, AppError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(SpawnerConfig::load_from_file(path)?),
        None => Ok(SpawnerConfig::default()),
    }
}

fn run() -> Result<(), AppError> {
    let config = load_config()?;
    logging::init(&config.log_level);

    log::info!("Starting spawn test (delete on teardown: {})", config.teardown.delete_on_teardown);

    let orientation = Quat::from_euler_degrees(CAMERA_EULER_DEGREES);
    let mut host = SandboxHost::new().with_viewpoint(AVATAR_POSITION, orientation);
    let mut spawner = PlacementSpawner::new(config.teardown);

    ScriptRunner::run(&mut host, &mut spawner)?;

    log::info!("{} entity(ies) remain after teardown", host.entity_count());
    for (handle, entity) in host.entities() {
        log::info!(
            "  {} '{}' {} rgb({}, {}, {}) at ({:.3}, {:.3}, {:.3})",
            handle,
            entity.name,
            entity.shape,
            entity.color.red,
            entity.color.green,
            entity.color.blue,
            entity.position.x,
            entity.position.y,
            entity.position.z,
        );
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        // Logging may not be up yet if the config failed to load
        logging::init("error");
        log::error!("{}", e);
        std::process::exit(1);
    }
}
