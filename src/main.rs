use slipway::config::Workspace;
use slipway::pipeline::Orchestrator;

fn main() -> anyhow::Result<()> {
    let workspace = Workspace::current()?;
    Orchestrator::new(workspace).run()?;
    Ok(())
}
