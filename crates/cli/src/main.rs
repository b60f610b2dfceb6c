use anyhow::Context;

fn main() -> anyhow::Result<()> {
    scwinv_observability::init();

    // Ansible passes --list / --host; the full document answers both.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        tracing::debug!(?args, "ignoring command-line arguments");
    }

    let document = scwinv_cli::run_from_env().context("failed to build the dynamic inventory")?;
    println!("{document}");
    Ok(())
}
