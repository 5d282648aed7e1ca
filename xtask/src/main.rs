//! Build automation tasks for IPRGO
//!
//! - Generating the CLI reference from the clap definitions

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for IPRGO", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the CLI reference in Markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    let markdown = clap_markdown::help_markdown::<iprgo::Cli>();

    let content = format!(
        r#"# IPRGO CLI Reference

`iprgo` turns InterProScan TSV tables into per-protein GO term reports that
can be uploaded to WEGO.

## Quick Start

```bash
# data/Bgt.tsv -> output/Bgt.go.wego.txt
iprgo Bgt

# Several strains, custom locations, stricter cut-off
iprgo --input-dir interpro --output-dir wego -t 1e-10 Bgh2 BghR1 Bgt
```

## Input

Headerless, tab-separated InterProScan output with all 15 columns
(`--iprlookup --goterms --pathways`). Rows are kept when the score is not
`-`, the e-value is below the threshold (default `1e-6`), and the GO column
is filled.

## Output

One line per protein, sorted: the accession, then its distinct GO terms,
all separated by tabs.

```text
P51587	GO:0003677	GO:0005515
```

## Commands

{}

## Environment Variables

- `IPRGO_CONFIG` - TOML configuration file
- `IPRGO_INPUT_DIR` / `IPRGO_OUTPUT_DIR` - table and report directories
- `IPRGO_SCORE_THRESHOLD` - e-value cut-off
- `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT`, `LOG_DIR`, `LOG_FILTER` - logging

## Configuration

```toml
input_dir = "data"
output_dir = "output"
score_threshold = 1e-6
score_sentinels = ["-"]
strains = ["Bgh2", "BghR1", "Bgt", "Ene", "UCSC1", "UMSG1", "UMSG2", "UMSG3"]
```

Command-line flags override environment variables, which override the file.

## Exit Status

`0` when every strain succeeded, `1` when any strain failed, `2` on invalid
arguments.

---

*This documentation is automatically generated from the CLI source code. To update, run `cargo xtask generate-cli-docs`.*
"#,
        markdown
    );

    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    let file_path = output_path.join("cli-reference.md");
    fs::write(&file_path, content)?;

    println!("✅ Generated CLI documentation at: {}", file_path.display());
    Ok(())
}
