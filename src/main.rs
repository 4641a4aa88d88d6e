use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();

    let app = petri::default()?;
    app.run()?;

    Ok(())
}
