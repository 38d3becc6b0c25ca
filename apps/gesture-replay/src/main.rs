mod scenarios;

use anyhow::{bail, Result};
use multitouch_core::GestureConfig;
use scenarios::{find, SCENARIOS};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut config = GestureConfig::default();
    let mut selected = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--list" => {
                for scenario in SCENARIOS {
                    println!("{:<14} {}", scenario.name, scenario.about);
                }
                return Ok(());
            }
            "--touch-only" => config = config.with_touch_only(true),
            name => match find(name) {
                Some(scenario) => selected.push(scenario),
                None => bail!("unknown scenario '{name}' (try --list)"),
            },
        }
    }
    if selected.is_empty() {
        selected.extend(SCENARIOS);
    }

    for scenario in selected {
        log::info!("replaying {}: {}", scenario.name, scenario.about);
        let events = scenario.run(&config)?;
        if events.is_empty() {
            println!("{}: no gestures", scenario.name);
        }
        for event in &events {
            match event.delta {
                Some(delta) => println!(
                    "{}: {} {} on {} delta=({}, {})",
                    scenario.name,
                    event.pointer,
                    event.kind,
                    event.target.describe(),
                    delta.x,
                    delta.y
                ),
                None => println!(
                    "{}: {} {} on {}",
                    scenario.name,
                    event.pointer,
                    event.kind,
                    event.target.describe()
                ),
            }
        }
    }
    Ok(())
}
