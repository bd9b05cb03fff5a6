use anyhow::Result;
use solstice::cli::App;

fn main() -> Result<()> {
    let mut app = App::from_args()?;
    let args = solstice::cli::Args::parse_args();

    app.run(args)?;

    Ok(())
}
