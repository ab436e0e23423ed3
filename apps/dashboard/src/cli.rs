use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "climate_dashboard", version, about = "Climate risk dashboard")]
pub struct CliArgs {
    /// Print a dashboard snapshot and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Override the backend API base URL
    #[arg(long = "api-base", value_name = "URL")]
    pub api_base: Option<String>,

    /// Route actions through the backend instead of simulating them
    #[arg(long)]
    pub live: bool,

    /// Initial chart range (7d, 30d, 90d, 1y)
    #[arg(long, value_name = "RANGE")]
    pub range: Option<String>,

    /// Store a session token in client storage and exit
    #[arg(long = "save-token", value_name = "TOKEN")]
    pub save_token: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(db) = &self.db {
            std::env::set_var("DATABASE_NAME", db);
        }
        if let Some(url) = &self.api_base {
            std::env::set_var("CLIMATE_API_BASE", url);
        }
        if let Some(range) = &self.range {
            std::env::set_var("CHART_RANGE", range);
        }
        if self.live {
            std::env::set_var("OPERATION_MODE", "live");
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn wants_headless(&self) -> bool {
        self.headless || self.json
    }

    #[cfg(test)]
    pub fn help_text() -> String {
        let mut command = <Self as clap::CommandFactory>::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_flag() {
        let args = CliArgs::parse_from([
            "climate_dashboard",
            "--json",
            "--live",
            "--range",
            "7d",
            "--api-base",
            "http://api",
            "--save-token",
            "tok",
        ]);
        assert!(args.wants_headless());
        assert!(args.live);
        assert_eq!(args.range.as_deref(), Some("7d"));
        assert_eq!(args.api_base.as_deref(), Some("http://api"));
        assert_eq!(args.save_token.as_deref(), Some("tok"));
    }

    #[test]
    fn help_mentions_headless() {
        assert!(CliArgs::help_text().contains("--headless"));
    }
}
