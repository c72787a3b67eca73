use anyhow::Result;
use clap::Args;
use xshell::{Shell, cmd};

#[derive(Args)]
pub struct Demo {
    /// Write per-job files here instead of printing to stdout
    #[arg(long)]
    output: Option<String>,
}

impl Demo {
    pub fn run(&self, sh: &Shell) -> Result<()> {
        let mut files: Vec<_> = sh
            .read_dir("demos")?
            .into_iter()
            .filter(|path| {
                matches!(
                    path.extension().and_then(|ext| ext.to_str()),
                    Some("toml" | "json")
                )
            })
            .collect();
        files.sort();

        if files.is_empty() {
            anyhow::bail!("no job files found in demos/");
        }

        for file in files {
            eprintln!("Sampling {}...", file.display());
            let output = self
                .output
                .iter()
                .flat_map(|dir| ["--output".to_string(), dir.clone()]);
            cmd!(sh, "cargo run --quiet -p stride -- run {file} {output...}").run()?;
        }
        Ok(())
    }
}
