use colored::Colorize;
use playship_build::{DockerCli, DryRunRunner, Pipeline, TargetName, resolve_docker_binary};
use playship_config::PipelineConfig;

/// Prints the execution order for `target` without running anything.
pub fn handle(config: PipelineConfig, target: TargetName) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(config, DockerCli::new(DryRunRunner, resolve_docker_binary()));
    let order = pipeline.plan(target)?;

    println!("{} {}", "Execution plan for".bold(), target.as_str().cyan());
    for (i, step) in order.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }

    let config = pipeline.config();
    let images = pipeline.images();
    println!();
    println!("Image:   {}", images.latest().to_string().cyan());
    if order.contains(&TargetName::Build) {
        println!(
            "Build:   {} (context {})",
            config.build_definition_path.display(),
            config.build_context_root.display()
        );
    }
    if order.contains(&TargetName::Push) {
        println!("Remote:  {}", images.remote_latest().to_string().cyan());
    }
    if order.contains(&TargetName::Up) || order.contains(&TargetName::Down) {
        println!("Compose: {}", config.compose_definition_path.display());
    }

    Ok(())
}
