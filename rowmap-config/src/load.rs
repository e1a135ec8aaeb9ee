use std::path::Path;

use serde::de::DeserializeOwned;

use crate::environment::Environment;

/// Directory containing configuration files relative to application root.
const CONFIGURATION_DIR: &str = "configuration";

/// Base configuration file loaded for all environments.
const BASE_CONFIG_FILE: &str = "base.yaml";

/// Prefix for environment variable configuration overrides.
const ENV_PREFIX: &str = "APP";

/// Separator between environment variable prefix and key segments.
const ENV_PREFIX_SEPARATOR: &str = "_";

/// Separator for nested configuration keys in environment variables.
///
/// Example: `APP_LOADER__MAX_BUFFERED_ROWS` sets the `loader.max_buffered_rows` field.
const ENV_SEPARATOR: &str = "__";

/// Separator for list elements in environment variables.
const LIST_SEPARATOR: &str = ",";

/// Trait defining the list of keys that should be parsed as lists in a given [`Config`]
/// implementation.
pub trait Config {
    /// Slice containing all the keys that should be parsed as lists when loading the configuration.
    const LIST_PARSE_KEYS: &'static [&'static str];
}

/// Loads hierarchical configuration from the `configuration` directory under the
/// current working directory, for the environment named by `APP_ENVIRONMENT`.
///
/// See [`load_config_from`] for the order in which sources are applied.
pub fn load_config<T>() -> Result<T, config::ConfigError>
where
    T: Config + DeserializeOwned,
{
    let base_path = std::env::current_dir().map_err(|err| {
        config::ConfigError::Message(format!("failed to determine the current directory: {err}"))
    })?;

    // Detect the running environment, defaulting to `prod` if unspecified.
    let environment = Environment::load().map_err(|err| {
        config::ConfigError::Message(format!("failed to parse APP_ENVIRONMENT: {err}"))
    })?;

    load_config_from(base_path.join(CONFIGURATION_DIR), &environment)
}

/// Loads hierarchical configuration from YAML files and environment variables.
///
/// Loads configuration in this order:
/// 1. Base configuration from `{configuration_directory}/base.yaml`
/// 2. Environment-specific file from `{configuration_directory}/{environment}.yaml`, if present
/// 3. Environment variable overrides prefixed with `APP`
///
/// Nested keys use double underscores: `APP_LOADER__PARTIAL_ROWS` → `loader.partial_rows` and
/// lists are separated by `,`.
pub fn load_config_from<T>(
    configuration_directory: impl AsRef<Path>,
    environment: &Environment,
) -> Result<T, config::ConfigError>
where
    T: Config + DeserializeOwned,
{
    let configuration_directory = configuration_directory.as_ref();
    let environment_filename = format!("{environment}.yaml");

    let mut environment_source = config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_PREFIX_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true);

    if !<T as Config>::LIST_PARSE_KEYS.is_empty() {
        environment_source = environment_source.list_separator(LIST_SEPARATOR);

        for key in <T as Config>::LIST_PARSE_KEYS {
            environment_source = environment_source.with_list_parse_key(key);
        }
    }

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join(BASE_CONFIG_FILE),
        ))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename)).required(false),
        )
        .add_source(environment_source)
        .build()?;

    settings.try_deserialize::<T>()
}
