//! ML Visualizer - headless training driver
//!
//! Runs the visualizer's model core from the command line: pick an algorithm
//! and a synthetic dataset, train for a number of epochs, and watch the
//! loss/accuracy curves in the log output.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use ml_visualizer::data::generator::{self, DATASETS};
use ml_visualizer::nn::ActivationKind;
use ml_visualizer::{Algorithm, LayerDefinition, SessionConfig, TrainingSession};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "ml_visualizer")]
#[command(about = "Train the visualizer's models on synthetic 2D datasets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model and report per-epoch metrics
    Train {
        /// Algorithm to run: nn, knn, or svm
        #[arg(short, long, default_value = "nn")]
        algorithm: String,

        /// Dataset key (unknown keys fall back to the spiral)
        #[arg(short, long, default_value = "spiral")]
        dataset: String,

        /// Number of training epochs
        #[arg(short, long, default_value = "200")]
        epochs: usize,

        /// Hidden layer sizes for the network, e.g. "4,2"
        #[arg(long, default_value = "4,2")]
        hidden: String,

        /// Learning rate for the network
        #[arg(long, default_value = "0.03")]
        learning_rate: f64,

        /// Number of neighbors for KNN
        #[arg(short, long, default_value = "3")]
        k: usize,

        /// Regularization strength for the SVM
        #[arg(long, default_value = "1.0")]
        c: f64,

        /// Learning rate for the SVM
        #[arg(long, default_value = "0.001")]
        svm_learning_rate: f64,
    },

    /// Generate a dataset and print it as JSON
    Generate {
        /// Dataset key (unknown keys fall back to the spiral)
        #[arg(short, long, default_value = "spiral")]
        dataset: String,
    },

    /// List the available datasets
    Datasets,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            algorithm,
            dataset,
            epochs,
            hidden,
            learning_rate,
            k,
            c,
            svm_learning_rate,
        } => {
            let algorithm = match algorithm.as_str() {
                "nn" | "neural-network" => Algorithm::NeuralNetwork,
                "knn" => Algorithm::Knn,
                "svm" => Algorithm::Svm,
                other => bail!("unknown algorithm '{other}', expected nn, knn, or svm"),
            };

            let hidden_layers = parse_hidden_layers(&hidden)?;
            let config = SessionConfig {
                algorithm,
                hidden_layers,
                learning_rate,
                k,
                svm_c: c,
                svm_learning_rate,
                dataset,
            };

            train(config, epochs)
        }
        Commands::Generate { dataset } => {
            let points = generator::generate(&dataset);
            println!("{}", serde_json::to_string_pretty(&points)?);
            Ok(())
        }
        Commands::Datasets => {
            for (key, display_name) in DATASETS {
                println!("{key:12} {display_name}");
            }
            Ok(())
        }
    }
}

fn parse_hidden_layers(value: &str) -> Result<Vec<LayerDefinition>> {
    value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            let neurons: usize = part.trim().parse()?;
            Ok(LayerDefinition::new(neurons, ActivationKind::Relu))
        })
        .collect()
}

fn train(config: SessionConfig, epochs: usize) -> Result<()> {
    let mut session = TrainingSession::new(config);

    if session.config().algorithm == Algorithm::Knn {
        // KNN has no training loop; its accuracy is fixed by the dataset.
        let context = session.analyst_context();
        info!(
            k = session.config().k,
            accuracy = context.current_accuracy,
            "knn fitted"
        );
        return Ok(());
    }

    for epoch in 1..=epochs {
        if let Some(stats) = session.step() {
            if epoch % 10 == 0 || epoch == epochs {
                info!(
                    epoch,
                    average_loss = format!("{:.6}", stats.average_loss).as_str(),
                    accuracy = format!("{:.4}", stats.accuracy).as_str(),
                    "trained"
                );
            }
        }
    }

    let history = session.history();
    if let (Some(first), Some(last)) = (history.loss.first(), history.loss.last()) {
        info!(
            initial_loss = format!("{:.6}", first.value).as_str(),
            final_loss = format!("{:.6}", last.value).as_str(),
            final_accuracy = history.latest_accuracy().unwrap_or(0.0),
            "training complete"
        );
    }

    Ok(())
}
