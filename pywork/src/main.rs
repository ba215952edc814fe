use anyhow::Result;

fn main() -> Result<()> {
    pywork::run_cli()
}
