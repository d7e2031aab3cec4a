use colored::Colorize;
use playship_build::{
    CommandRunner, DockerCli, DryRunRunner, Params, Pipeline, ProcessRunner, TargetName,
    resolve_docker_binary,
};
use playship_config::PipelineConfig;

/// Runs `target` (and its prerequisites) with the given `key=value` parameters.
pub async fn handle(
    config: PipelineConfig,
    target: TargetName,
    params: &[String],
    dry_run: bool,
) -> anyhow::Result<()> {
    let params = Params::from_assignments(params)?;

    let runner: Box<dyn CommandRunner> = if dry_run {
        println!("{}", "Dry run: commands are printed, not executed".yellow());
        Box::new(DryRunRunner)
    } else {
        Box::new(ProcessRunner)
    };

    let pipeline = Pipeline::new(config, DockerCli::new(runner, resolve_docker_binary()));
    let report = pipeline.run(target, &params).await?;

    tracing::debug!("Executed targets: {:?}", report.executed);
    println!();
    println!("{}", format!("✓ {} completed", target).green().bold());

    Ok(())
}
