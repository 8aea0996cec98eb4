use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use log::debug;

use crate::config::API_URL_ENV;
use crate::error::AppError;

pub const DOCKER_PROGRAM: &str = "docker";
pub const SCANNER_IMAGE: &str = "svenj06/ai-act-check";

const CONTAINER_CODE_DIR: &str = "/code";
const CONTAINER_CONFIG_DIR: &str = "/root/.config/ai-act-check";

/// Exit code reported when the scanner produced no code of its own.
const SIGNALLED_EXIT_CODE: i32 = 1;

/// A container runtime able to report its presence and run the scanner image.
pub trait ContainerRuntime {
    /// Whether the runtime answers its version check.
    fn probe(&self) -> bool;

    /// Run with inherited stdio and return the child's exit code.
    fn run(&self, args: &[String]) -> Result<i32, AppError>;
}

/// The `docker` executable found on `PATH`.
#[derive(Debug, Clone)]
pub struct Docker {
    program: String,
}

impl Default for Docker {
    fn default() -> Self {
        Self { program: DOCKER_PROGRAM.to_string() }
    }
}

impl ContainerRuntime for Docker {
    fn probe(&self) -> bool {
        let available = Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false);
        debug!("{} --version available: {available}", self.program);
        available
    }

    fn run(&self, args: &[String]) -> Result<i32, AppError> {
        let status = Command::new(&self.program).args(args).status()?;
        Ok(status.code().unwrap_or(SIGNALLED_EXIT_CODE))
    }
}

/// Everything needed to build the `docker run` argument list for one scan.
#[derive(Debug, Clone)]
pub struct ScanInvocation {
    pub scan_path: PathBuf,
    pub config_dir: PathBuf,
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub project_name: String,
}

impl ScanInvocation {
    pub fn args(&self) -> Vec<String> {
        let mut args: Vec<String> = ["run", "--rm", "-i"].iter().map(|s| s.to_string()).collect();

        args.push("-v".to_string());
        args.push(format!("{}:{CONTAINER_CODE_DIR}", self.scan_path.display()));
        args.push("-v".to_string());
        args.push(format!("{}:{CONTAINER_CONFIG_DIR}:ro", self.config_dir.display()));

        if let Some(url) = self.api_url.as_deref().filter(|url| !url.is_empty()) {
            args.push("-e".to_string());
            args.push(format!("{API_URL_ENV}={url}"));
        }

        args.push(SCANNER_IMAGE.to_string());
        args.push("scan".to_string());
        args.push(CONTAINER_CODE_DIR.to_string());

        if let Some(token) = &self.token {
            args.push("--token".to_string());
            args.push(token.clone());
        }

        args.push("--project-name".to_string());
        args.push(self.project_name.clone());
        args
    }
}

/// Renders the command line with the token value masked.
impl fmt::Display for ScanInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DOCKER_PROGRAM}")?;
        let mut redact_next = false;
        for arg in self.args() {
            if redact_next {
                write!(f, " ****")?;
                redact_next = false;
            } else {
                write!(f, " {arg}")?;
                redact_next = arg == "--token";
            }
        }
        Ok(())
    }
}
