use anyhow::Context;
use porter_config::PorterConfig;

/// Load `.env` (if present) and the layered configuration.
pub fn load_config() -> anyhow::Result<PorterConfig> {
    load_dotenv()?;
    PorterConfig::load().context("failed to load porter configuration")
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    // A project-local `.porter/.env` wins over a plain `.env`.
    let project_env = cwd.join(".porter").join(".env");
    if project_env.exists() {
        dotenvy::from_path(&project_env)
            .with_context(|| format!("failed to load dotenv file at {}", project_env.display()))?;
        return Ok(());
    }

    dotenvy::dotenv().ok();
    Ok(())
}
