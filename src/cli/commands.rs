use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `bijochat` - persona chat gateway over the Gemini API.
#[derive(Parser, Debug)]
#[command(name = "bijochat")]
#[command(version)]
#[command(about = "Persona chat gateway over the Gemini API.", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of ~/.bijochat/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (chat, upload, personas, health)
    Serve {
        /// Port to listen on (use 0 for random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Send one message through the dispatcher and print the reply
    Ask {
        /// The message text
        message: String,

        /// Personality mode (normal, bijo, ajai)
        #[arg(short, long)]
        mode: Option<String>,

        /// Attach an image file
        #[arg(long, value_name = "PATH")]
        image: Option<PathBuf>,

        /// Attach any other file; it is normalized first
        #[arg(long, value_name = "PATH", conflicts_with = "image")]
        file: Option<PathBuf>,
    },

    /// Run the upload normalizer on a local file and print the JSON result
    Classify {
        path: PathBuf,

        /// Declared MIME type (default: sniffed from content)
        #[arg(long)]
        mime: Option<String>,
    },

    /// List personality modes
    Personas,
}
