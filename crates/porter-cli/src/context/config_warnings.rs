use porter_config::PorterConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &PorterConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &PorterConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let defaults = PorterConfig::default();

    let mut warnings = Vec::new();

    if config.api.base_url == defaults.api.base_url && has_single_underscore(&env_keys, "PORTER_API") {
        warnings.push(
            "API config appears default while PORTER_API* env vars exist. Use double underscores (example: PORTER_API__BASE_URL)."
                .to_string(),
        );
    }

    if !config.general.example_mode
        && config.general.default_building_id.is_none()
        && has_single_underscore(&env_keys, "PORTER_GENERAL")
    {
        warnings.push(
            "General config appears default while PORTER_GENERAL* env vars exist. Use double underscores (example: PORTER_GENERAL__EXAMPLE_MODE)."
                .to_string(),
        );
    }

    if config.auth.keyring_service == defaults.auth.keyring_service
        && !config.auth.file_only
        && has_single_underscore(&env_keys, "PORTER_AUTH")
    {
        warnings.push(
            "Auth config appears default while PORTER_AUTH* env vars exist. Use double underscores (example: PORTER_AUTH__FILE_ONLY)."
                .to_string(),
        );
    }

    warnings
}

/// `PORTER_API_BASE_URL` style keys: the section prefix followed by a single
/// underscore, which figment reads as a top-level key.
fn has_single_underscore(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}
