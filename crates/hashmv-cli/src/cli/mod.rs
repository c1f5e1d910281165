//! CLI for hashmv. Flat flags (no subcommands) so incrond can call it as
//! `hashmv -f $# -d $@ -w /srv/web`.

use anyhow::Result;
use clap::Parser;
use hashmv_core::{config, Invocation, Outcome};
use std::path::PathBuf;

/// Rename a new file to the SHA-1 of its content and move it into the web directory.
#[derive(Debug, Parser)]
#[command(name = "hashmv", version)]
#[command(about = "Move a file from the hold directory into the web directory under its content hash", long_about = None)]
pub struct Cli {
    /// The file which the watcher detected, relative to --hold.
    #[arg(short = 'f', long)]
    pub file: String,

    /// The directory which was watched.
    #[arg(short = 'd', long)]
    pub hold: PathBuf,

    /// The web directory.
    #[arg(short = 'w', long)]
    pub web: PathBuf,

    /// Max file size in MiB. Larger files are deleted. Without it there is no limit.
    #[arg(short = 'm', long, value_name = "MIB", allow_negative_numbers = true)]
    pub max: Option<i64>,

    /// Print the new file name after a successful move.
    #[arg(short = 'p', long)]
    pub print: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    pub fn invocation(&self) -> Invocation {
        Invocation {
            file: self.file.clone(),
            hold: self.hold.clone(),
            web: self.web.clone(),
            max_mib: self.max,
        }
    }

    pub fn run(self) -> Result<()> {
        let invocation = self.invocation();
        // Missing directories must exit 1 even when the config is unreadable.
        invocation.check_dirs()?;

        let cfg = config::load()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match invocation.run_checked(&cfg)? {
            Outcome::Moved { name, .. } => {
                if self.print {
                    println!("{name}");
                }
            }
            Outcome::Discarded { size, limit_bytes } => {
                tracing::debug!(file = %self.file, size, limit_bytes, "nothing moved");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
