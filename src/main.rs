use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use pickem::{predict_slate, Config, Matchup, MissingDataPolicy, ModelConfig};

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries one JSON pick per line.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let model_config = ModelConfig::load(&config.model_config)
        .with_context(|| format!("loading {}", config.model_config.display()))?;
    let predictor = model_config.build()?;
    info!(
        "Loaded {} model from {}",
        predictor.name(),
        config.model_config.display()
    );

    let matchups: Vec<Matchup> = match (&config.matchups, config.single_matchup()) {
        (Some(path), _) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        (None, Some(matchup)) => vec![matchup],
        (None, None) => Vec::new(),
    };

    let policy = if config.fail_on_missing {
        MissingDataPolicy::Fail
    } else {
        MissingDataPolicy::Skip
    };
    let report = predict_slate(predictor.as_ref(), &matchups, policy)?;

    for pick in &report.picks {
        println!("{}", serde_json::to_string(pick)?);
    }

    Ok(())
}
