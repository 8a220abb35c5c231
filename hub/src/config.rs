use std::env;
use std::path::PathBuf;

/// Port the service has always listened on.
pub const DEFAULT_PORT: u16 = 5003;

/// Hub configuration.
///
/// Only the listen port is read from the environment (`PEAKS_PORT`); the rest
/// are fixed defaults that tests override by constructing the struct directly.
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub bind: String,
    pub port: u16,

    // ── Plot artifacts ─────────────────────────────────────────────
    pub plot_dir: PathBuf,
    pub plot_width: u32,
    pub plot_height: u32,
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            plot_dir: PathBuf::from("plots"),
            plot_width: 1000,
            plot_height: 500,
        }
    }
}

impl HubConfig {
    pub fn from_env() -> Self {
        Self {
            port: env_u16("PEAKS_PORT", DEFAULT_PORT),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_port_falls_back_to_default() {
        assert_eq!(env_u16("PEAKS_TEST_UNSET_PORT_VAR", 5003), 5003);

        env::set_var("PEAKS_TEST_BAD_PORT_VAR", "not-a-port");
        assert_eq!(env_u16("PEAKS_TEST_BAD_PORT_VAR", 5003), 5003);

        env::set_var("PEAKS_TEST_GOOD_PORT_VAR", " 8080 ");
        assert_eq!(env_u16("PEAKS_TEST_GOOD_PORT_VAR", 5003), 8080);
    }
}
