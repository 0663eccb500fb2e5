use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rsisim::prelude::*;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "rsisim")]
#[command(about = "An RSI threshold trading simulator for a single asset", long_about = None)]
struct Cli {
    //enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //run a simulation
    Run {
        //path to csv price file
        #[arg(long)]
        data: Option<PathBuf>,

        //json run configuration, flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        //starting cash
        #[arg(long)]
        initial_cash: Option<f64>,

        //rsi lookback window
        #[arg(long)]
        window: Option<usize>,

        //buy below this rsi
        #[arg(long)]
        oversold: Option<f64>,

        //sell above this rsi
        #[arg(long)]
        overbought: Option<f64>,

        //visit bars first to last instead of last to first
        #[arg(long)]
        chronological: bool,

        //output path for trades csv
        #[arg(long)]
        output_trades_csv: Option<PathBuf>,

        //output path for net worth csv
        #[arg(long)]
        output_net_worth_csv: Option<PathBuf>,
    },

    //write a default run configuration
    InitConfig {
        #[arg(long, default_value = "rsisim.json")]
        path: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug,rsisim=debug")
    } else {
        EnvFilter::new("info,rsisim=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            data,
            config,
            initial_cash,
            window,
            oversold,
            overbought,
            chronological,
            output_trades_csv,
            output_net_worth_csv,
        } => {
            let mut run_config = match config {
                Some(path) => RunConfiguration::from_json_file(&path)?,
                None => RunConfiguration::default(),
            };

            if let Some(data) = data {
                run_config.data_path = data;
            }
            if let Some(cash) = initial_cash {
                run_config.simulator.initial_cash = cash;
            }
            if let Some(window) = window {
                run_config.indicator.window = window;
            }
            if let Some(oversold) = oversold {
                run_config.simulator.oversold = oversold;
            }
            if let Some(overbought) = overbought {
                run_config.simulator.overbought = overbought;
            }
            if chronological {
                run_config.simulator.traversal = TraversalOrder::FirstToLast;
            }
            if output_trades_csv.is_some() {
                run_config.output_trades_csv = output_trades_csv;
            }
            if output_net_worth_csv.is_some() {
                run_config.output_net_worth_csv = output_net_worth_csv;
            }

            run_simulation(&run_config)?;
        }
        Commands::InitConfig { path } => {
            RunConfiguration::default().to_json_file(&path)?;
            info!(path = ?path, "wrote default configuration");
        }
    }

    Ok(())
}

fn run_simulation(config: &RunConfiguration) -> Result<()> {
    config.validate()?;

    println!("RSI Threshold Simulator");
    println!("=======================\n");

    let bars = load_csv(&config.data_path)
        .context(format!("Failed to load data from {:?}", config.data_path))?;

    if let (Some(first), Some(last)) = (bars.first(), bars.last()) {
        info!(
            bars = bars.len(),
            first = %first.timestamp.date_naive(),
            last = %last.timestamp.date_naive(),
            "loaded price series"
        );
    }

    let rsi = compute_indicators(&bars, &config.indicator)?;

    let simulator = PortfolioSimulator::new(config.simulator.clone())?;
    let result = simulator.run(&bars, &rsi)?;

    println!(
        "Strategy: {} (window={}, buy < {}, sell > {})",
        simulator.strategy().name(),
        config.indicator.window,
        config.simulator.oversold,
        config.simulator.overbought
    );
    println!("Initial cash: ${:.2}\n", config.simulator.initial_cash);

    println!("Trades");
    println!("======\n");
    print_trade_table(&result.trades);

    let curve = net_worth_curve(&bars, &result.net_worth, config.simulator.initial_cash);
    let summary = SummaryMetrics::from_run(
        &curve,
        &result.trades,
        config.simulator.initial_cash,
        result.final_ledger.position,
    );

    println!("\nSummary");
    println!("=======\n");
    summary.pretty_print_table();

    if let Some(path) = &config.output_trades_csv {
        write_trades_csv(&result.trades, path)?;
        println!("\nTrades saved to {:?}", path);
    }

    if let Some(path) = &config.output_net_worth_csv {
        write_net_worth_csv(&curve, path)?;
        println!("Net worth saved to {:?}", path);
    }

    Ok(())
}
