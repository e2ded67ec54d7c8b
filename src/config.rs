use crate::error::{config_error, env_error, Error, SyncResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default location of the schedule file
pub const DEFAULT_CONFIG_PATH: &str = "config/schedules.toml";

/// Default location of the stored OAuth token
pub const DEFAULT_TOKEN_PATH: &str = "token.json";

/// Timezone the source website publishes kickoff times in
pub const DEFAULT_TIMEZONE: &str = "Europe/Budapest";

/// Seconds to wait between two event inserts
pub const DEFAULT_CREATE_DELAY_SECS: u64 = 20;

/// One team entry of the schedule file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSchedule {
    /// Team name used on the command line and for lookups
    pub team_name: String,
    /// Division name, used when the page itself carries none
    pub division: String,
    /// Schedule page to scrape
    pub url: String,
    /// Invitees while testing
    #[serde(default)]
    pub attendees_test: Vec<String>,
    /// Invitees for the real run
    #[serde(default)]
    pub attendees_prod: Vec<String>,
}

impl TeamSchedule {
    /// Pick the attendee list for the run
    pub fn attendees(&self, prod: bool) -> &[String] {
        if prod {
            &self.attendees_prod
        } else {
            &self.attendees_test
        }
    }
}

/// Contents of the schedule file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleFile {
    /// Owner of the calendar, doubles as calendar id
    pub sender_mail: Option<String>,
    #[serde(default)]
    pub schedules: Vec<TeamSchedule>,
}

impl ScheduleFile {
    /// Parse and validate the TOML schedule file contents
    pub fn parse(content: &str) -> SyncResult<Self> {
        let file: ScheduleFile = toml::from_str(content)?;

        for schedule in &file.schedules {
            Url::parse(&schedule.url).map_err(|e| {
                config_error(&format!(
                    "Invalid url for team '{}': {}",
                    schedule.team_name, e
                ))
            })?;
        }

        Ok(file)
    }

    /// Read the schedule file from disk
    pub fn read(path: &Path) -> SyncResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            config_error(&format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }
}

/// Main configuration structure, loaded once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Google OAuth client ID
    pub google_client_id: String,
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// Calendar the fixtures are written to
    pub google_calendar_id: String,
    /// Where the OAuth token is stored
    pub token_path: PathBuf,
    /// Our own team as it appears on the schedule page
    pub home_team_name: String,
    /// Timezone kickoff times are interpreted in
    pub timezone: Tz,
    /// Pause between two event inserts
    pub create_delay: Duration,
    /// Team schedules from the config file
    pub schedules: Vec<TeamSchedule>,
}

impl Config {
    /// Load configuration from environment and the schedule file
    pub fn load(path: &Path) -> SyncResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let file = ScheduleFile::read(path)?;
        let mut config = Self::from_env_credentials()?;

        if config.home_team_name.is_empty() {
            return Err(env_error("TEAM_NAME"));
        }

        if env::var("GOOGLE_CALENDAR_ID").is_err() {
            if let Some(sender_mail) = &file.sender_mail {
                config.google_calendar_id = sender_mail.clone();
            }
        }
        config.schedules = file.schedules;

        Ok(config)
    }

    /// Load only the environment part; `TEAM_NAME` may be absent here
    pub fn from_env_credentials() -> SyncResult<Self> {
        dotenv().ok();

        let google_client_id =
            env::var("GOOGLE_CLIENT_ID").map_err(|_| env_error("GOOGLE_CLIENT_ID"))?;
        let google_client_secret =
            env::var("GOOGLE_CLIENT_SECRET").map_err(|_| env_error("GOOGLE_CLIENT_SECRET"))?;
        let home_team_name = env::var("TEAM_NAME").unwrap_or_default();

        let google_calendar_id =
            env::var("GOOGLE_CALENDAR_ID").unwrap_or_else(|_| String::from("primary"));
        let token_path = env::var("GOOGLE_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TOKEN_PATH));

        let timezone = parse_timezone(
            &env::var("TIMEZONE").unwrap_or_else(|_| String::from(DEFAULT_TIMEZONE)),
        )?;

        let create_delay = match env::var("CREATE_DELAY_SECS") {
            Ok(secs) => Duration::from_secs(
                secs.parse::<u64>()
                    .map_err(|_| env_error("Invalid CREATE_DELAY_SECS format"))?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_CREATE_DELAY_SECS),
        };

        Ok(Config {
            google_client_id,
            google_client_secret,
            google_calendar_id,
            token_path,
            home_team_name,
            timezone,
            create_delay,
            schedules: Vec::new(),
        })
    }

    /// Find the schedule entry of a team
    pub fn schedule_for(&self, team_name: &str) -> SyncResult<&TeamSchedule> {
        self.schedules
            .iter()
            .find(|schedule| schedule.team_name == team_name)
            .ok_or_else(|| Error::Config(format!("Team '{}' not found in config", team_name)))
    }
}

/// Parse an IANA timezone name
pub fn parse_timezone(name: &str) -> SyncResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| config_error(&format!("Unknown timezone: {}", name)))
}
