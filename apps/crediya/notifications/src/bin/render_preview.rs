//! Render the loan decision email for one payload
//!
//! Run with:
//!   cargo run -p crediya_notifications --bin render_preview -- payload.json
//!   echo '{"email":"me@example.com"}' | cargo run -p crediya_notifications --bin render_preview
//!
//! Nothing is sent: the rendered HTML is printed or written to a file.

use clap::Parser;
use color_eyre::Result;
use email::{NotificationRequest, TemplateEngine};
use eyre::WrapErr;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render the loan decision email for a notification payload"
)]
struct Args {
    /// Payload file (JSON object); reads stdin when omitted
    input: Option<PathBuf>,

    /// Write the HTML to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let body = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("Failed to read payload from stdin")?;
            buffer
        }
    };

    let request = NotificationRequest::from_json(&body).wrap_err("Invalid notification payload")?;
    let templates = TemplateEngine::new()?;
    let rendered = templates.render_loan_decision(&request, request.status_color())?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered.body_html)
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", rendered.body_html),
    }

    Ok(())
}
