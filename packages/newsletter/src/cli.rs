//! Command-line interface for the newsletter renderer.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::config::{RenderConfig, MAX_INPUT_SIZE};
use crate::error::{NewsletterError, Result};
use crate::filter::InlineMarkupFilter;
use crate::render::Renderer;
use crate::types::Newsletter;

/// TEN Newsletter - Render newsletters as accessible plain text.
#[derive(Parser)]
#[command(name = "ten-newsletter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by every subcommand.
#[derive(clap::Args, Debug, Default)]
pub struct RenderArgs {
    /// YAML file with render settings (labels, prefixes, width)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL for relative links (e.g., https://example.org)
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Wrap width in columns (default: 70)
    #[arg(short, long)]
    pub width: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a newsletter YAML file as a TEN document.
    Render {
        /// Newsletter YAML file
        input: PathBuf,

        #[command(flatten)]
        args: RenderArgs,

        /// Leave out the contents listing
        #[arg(long)]
        no_contents: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a markup fragment through the inline markup filter.
    Filter {
        /// File with the fragment (default: stdin)
        input: Option<PathBuf>,

        #[command(flatten)]
        args: RenderArgs,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            args,
            no_contents,
            output,
        } => render_command(&input, &args, no_contents, output.as_deref()),
        Commands::Filter { input, args } => filter_command(input.as_deref(), &args),
    }
}

/// Build the render configuration from a file and command-line overrides.
///
/// Overrides are applied before validation, so a valid file combined with an
/// invalid `--width` is still rejected.
pub fn load_config(args: &RenderArgs) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::from_yaml_file(path)?,
        None => RenderConfig::default(),
    };

    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(width) = args.width {
        config = config.with_wrap_width(width);
    }

    config.validate()?;
    Ok(config)
}

/// Execute the render command.
fn render_command(
    input: &Path,
    args: &RenderArgs,
    no_contents: bool,
    output: Option<&Path>,
) -> Result<()> {
    let config = load_config(args)?;
    let mut newsletter = Newsletter::from_yaml_file(input)?;
    if no_contents {
        newsletter.include_contents = false;
    }

    let rendered = Renderer::new(config).render(&newsletter);

    match output {
        Some(path) => {
            fs::write(path, &rendered)?;
            println!(
                "{} {} ({} articles)",
                style("Saved to:").green().bold(),
                path.display(),
                style(newsletter.present_article_count()).cyan()
            );
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Execute the filter command.
fn filter_command(input: Option<&Path>, args: &RenderArgs) -> Result<()> {
    let config = load_config(args)?;

    let markup = match input {
        Some(path) => fs::read_to_string(path)?,
        None => read_stdin()?,
    };
    if markup.len() > MAX_INPUT_SIZE {
        return Err(NewsletterError::InputTooLarge {
            size: markup.len(),
            max: MAX_INPUT_SIZE,
        });
    }

    let filter = InlineMarkupFilter::new(&config);
    print!("{}", filter.filter(markup.trim_end_matches(['\r', '\n'])));

    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut markup = String::new();
    io::stdin().read_to_string(&mut markup)?;
    Ok(markup)
}
