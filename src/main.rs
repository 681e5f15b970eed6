use clap::Parser;
use inspection_report::{cli, error::Result, report, template};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input, template, output } => {
            println!("📋 inspection-report - report generation\n");

            let input = input.unwrap_or_else(|| cli::default_path(cli::DEFAULT_INPUT));
            let template = template.unwrap_or_else(|| cli::default_path(cli::DEFAULT_TEMPLATE));
            let output = output.unwrap_or_else(|| cli::default_path(cli::DEFAULT_OUTPUT));

            let summary = report::generate_report(&input, &template, &output)?;

            if cli.verbose {
                for page in &summary.pages {
                    println!(
                        "  {} - {} field(s), {} photo(s), {} skipped",
                        page.title, page.fields_written, page.photos_placed, page.photos_skipped
                    );
                }
            }

            if summary.output_path != output {
                println!("⚠ {} was locked, wrote a timestamped copy instead", output.display());
            }
            println!("\n✅ Report generated: {}", summary.output_path.display());
        }

        Commands::Template { output } => {
            println!("📋 inspection-report - template generation\n");

            let output = output.unwrap_or_else(|| cli::default_path(cli::DEFAULT_TEMPLATE));
            template::write_template(&output)?;
            println!("✅ Template written: {}", output.display());
        }
    }

    Ok(())
}
