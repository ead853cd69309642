use std::path::PathBuf;
use std::sync::{Arc, PoisonError};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use quad_fc::flight::FlightLoop;
use quad_fc::sink::NullMotors;
use quad_fc::LoopConfig;
use quad_link::{doctor as link_doctor, LinkConfig, ParamListener, UdpTelemetry};
use quad_params::{doctor as params_doctor, file, ParamStore, Params};
use quad_sim::SensorSim;

#[derive(Debug, Parser)]
#[command(name = "quadfc", version, about = "Simulated quad-rotor flight controller")]
struct Cli {
    /// TOML configuration; built-in defaults when omitted.
    #[arg(long)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the control loop until interrupted.
    Run,
    Doctor,
    Params { #[command(subcommand)] cmd: ParamsCmd },
}

#[derive(Debug, Subcommand)]
enum ParamsCmd {
    /// Print the persisted parameters.
    Show,
    /// Overwrite the parameter file with the default set.
    Reset,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct Config {
    params: ParamsCfg,
    link: LinkConfig,
    control: LoopConfig,
    sim: SimCfg,
}

#[derive(Debug, serde::Deserialize)]
#[serde(default)]
struct ParamsCfg {
    path: PathBuf,
}

impl Default for ParamsCfg {
    fn default() -> Self {
        Self { path: PathBuf::from(file::DEFAULT_PARAM_FILE) }
    }
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct SimCfg {
    /// Fixed noise seed for reproducible runs.
    seed: Option<u64>,
}

fn load_config(path: Option<&str>) -> Result<Config> {
    let Some(path) = path else { return Ok(Config::default()) };
    let s = std::fs::read_to_string(path).with_context(|| format!("read config {}", path))?;
    toml::from_str(&s).context("parse config toml")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;

    match cli.cmd {
        Command::Run => run(&cfg).await?,
        Command::Doctor => doctor(&cfg)?,
        Command::Params { cmd } => params_cmd(&cfg, cmd)?,
    }
    Ok(())
}

fn doctor(cfg: &Config) -> Result<()> {
    info!("doctor: starting");

    quad_fc::doctor::check_loop(&cfg.control)?;
    link_doctor::check_link(&cfg.link)?;

    let path = &cfg.params.path;
    if path.exists() {
        let params = file::read(path)?;
        params_doctor::check_params(&params)?;
        info!("doctor: {} parameters OK in {}", params.len(), path.display());
    } else {
        warn!("doctor: {} missing; defaults will be written on first run", path.display());
    }

    info!("doctor: OK");
    Ok(())
}

fn params_cmd(cfg: &Config, cmd: ParamsCmd) -> Result<()> {
    let path = &cfg.params.path;
    match cmd {
        ParamsCmd::Show => {
            let params = file::read(path)?;
            for (name, value) in params.iter() {
                println!("{} = {}", name, value);
            }
        }
        ParamsCmd::Reset => {
            file::persist(path, &Params::defaults())?;
            info!("params: defaults written to {}", path.display());
        }
    }
    Ok(())
}

async fn run(cfg: &Config) -> Result<()> {
    info!("run: starting");
    quad_fc::doctor::check_loop(&cfg.control)?;

    let params = file::load_from_disk(&cfg.params.path);
    if let Err(e) = params_doctor::check_params(&params) {
        warn!("params: {:#}", e);
    }
    let store = Arc::new(ParamStore::new(params));

    let listener = ParamListener::bind(cfg.link.listen, cfg.link.warn_interval()).await?;
    let listener_task = tokio::spawn(listener.run(store.clone()));

    let telemetry = UdpTelemetry::bind(cfg.link.telemetry, cfg.link.warn_interval()).await?;
    info!("run: telemetry to {}", cfg.link.telemetry);

    let sim = match cfg.sim.seed {
        Some(seed) => {
            info!("run: sensor noise seed {}", seed);
            SensorSim::seeded(seed)
        }
        None => SensorSim::from_entropy(),
    };

    let flight = FlightLoop::new(cfg.control.clone(), store, sim, Box::new(NullMotors), Box::new(telemetry));
    let status = flight.status();
    let flight_task = tokio::spawn(flight.run());

    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res.context("wait for ctrl-c")?;
            let st = status.lock().unwrap_or_else(PoisonError::into_inner).clone();
            info!(
                "run: stopping after {} ticks, {} refreshes (last {:?} ago), failure={} motors={:?}",
                st.ticks, st.refreshes, st.refresh_age(), st.failure, st.last_motors.0
            );
        }
        res = flight_task => {
            listener_task.abort();
            res.context("flight loop task")?;
            anyhow::bail!("flight loop exited");
        }
    }

    listener_task.abort();
    Ok(())
}
