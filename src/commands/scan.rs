use std::path::PathBuf;

use log::debug;

use crate::commands::login::perform_login;
use crate::config::Settings;
use crate::error::AppError;
use crate::path::{default_project_name, resolve_scan_path};
use crate::prompt::Prompter;
use crate::runtime::{ContainerRuntime, ScanInvocation};

pub struct ScanOptions {
    pub path: Option<PathBuf>,
    pub token: Option<String>,
    pub project_name: Option<String>,
}

/// `annexfour scan`. Returns the scanner container's exit code.
pub fn execute_scan(
    options: ScanOptions,
    settings: &Settings,
    runtime: &dyn ContainerRuntime,
    prompter: &mut dyn Prompter,
) -> Result<i32, AppError> {
    let scan_path = resolve_scan_path(options.path.as_deref())?;
    // Empty flag values count as not given.
    let token = options.token.filter(|token| !token.is_empty());
    let project_name = options.project_name.filter(|name| !name.is_empty());

    if !runtime.probe() {
        return Err(AppError::RuntimeUnavailable);
    }

    // A token entered here is only written to disk; the container reads it
    // through the config mount.
    if token.is_none() && !settings.store.exists() {
        println!("[!] No API Token found. Please authenticate to continue.");
        perform_login(&settings.store, prompter)?;
    }

    let project_name = match project_name {
        Some(name) => name,
        None => {
            let default = default_project_name(&scan_path);
            prompter.text("Project Name", default.as_deref())?
        }
    };
    debug!("project name: {project_name}");

    let invocation = ScanInvocation {
        scan_path,
        config_dir: settings.store.dir().to_path_buf(),
        api_url: settings.api_url.clone(),
        token,
        project_name,
    };
    debug!("{invocation}");

    println!("[*] Launching Scanner via Docker...");
    let code = runtime.run(&invocation.args())?;
    if code != 0 {
        println!("\n[!] Scan container exited with error.");
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::Path;

    use super::*;
    use crate::config::ConfigStore;
    use crate::prompt::scripted::ScriptedPrompter;

    struct FakeRuntime {
        available: bool,
        exit_code: i32,
        runs: RefCell<Vec<Vec<String>>>,
    }

    impl FakeRuntime {
        fn new(available: bool, exit_code: i32) -> Self {
            Self { available, exit_code, runs: RefCell::new(Vec::new()) }
        }

        fn last_args(&self) -> Vec<String> {
            self.runs.borrow().last().cloned().unwrap()
        }
    }

    impl ContainerRuntime for FakeRuntime {
        fn probe(&self) -> bool {
            self.available
        }

        fn run(&self, args: &[String]) -> Result<i32, AppError> {
            self.runs.borrow_mut().push(args.to_vec());
            Ok(self.exit_code)
        }
    }

    fn settings(dir: &Path, logged_in: bool) -> Settings {
        let store = ConfigStore::at(dir.join("ai-act-check"));
        if logged_in {
            store.save("anx_stored").unwrap();
        }
        Settings { store, api_url: None }
    }

    fn options(path: &Path) -> ScanOptions {
        ScanOptions { path: Some(path.join("my-project")), token: None, project_name: None }
    }

    fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.iter().position(|a| a == flag).map(|i| args[i + 1].as_str())
    }

    #[test]
    fn explicit_project_name_skips_prompt() {
        let temp = tempfile::tempdir().unwrap();
        let settings = settings(temp.path(), true);
        let runtime = FakeRuntime::new(true, 0);
        let mut prompter = ScriptedPrompter::default();
        let mut opts = options(temp.path());
        opts.project_name = Some("foo".to_string());

        let code = execute_scan(opts, &settings, &runtime, &mut prompter).unwrap();

        assert_eq!(code, 0);
        assert!(prompter.text_prompts.is_empty());
        assert_eq!(flag_value(&runtime.last_args(), "--project-name"), Some("foo"));
    }

    #[test]
    fn default_project_name_is_scan_dir_base_name() {
        let temp = tempfile::tempdir().unwrap();
        let settings = settings(temp.path(), true);
        let runtime = FakeRuntime::new(true, 0);
        let mut prompter = ScriptedPrompter::default().answer_text(None);

        execute_scan(options(temp.path()), &settings, &runtime, &mut prompter).unwrap();

        assert_eq!(
            prompter.text_prompts,
            vec![("Project Name".to_string(), Some("my-project".to_string()))]
        );
        assert_eq!(flag_value(&runtime.last_args(), "--project-name"), Some("my-project"));
    }

    #[test]
    fn missing_runtime_never_launches_scan() {
        let temp = tempfile::tempdir().unwrap();
        let settings = settings(temp.path(), false);
        let runtime = FakeRuntime::new(false, 0);
        let mut prompter = ScriptedPrompter::with_secrets(&["anx_x"]);

        let result = execute_scan(options(temp.path()), &settings, &runtime, &mut prompter);

        assert!(matches!(result, Err(AppError::RuntimeUnavailable)));
        assert!(runtime.runs.borrow().is_empty());
        assert_eq!(prompter.secret_prompts, 0);
    }

    #[test]
    fn unauthenticated_scan_logs_in_without_forwarding_token() {
        let temp = tempfile::tempdir().unwrap();
        let settings = settings(temp.path(), false);
        let runtime = FakeRuntime::new(true, 0);
        let mut prompter =
            ScriptedPrompter::with_secrets(&["wrong", "anx_fresh"]).answer_text(Some("demo"));

        execute_scan(options(temp.path()), &settings, &runtime, &mut prompter).unwrap();

        assert_eq!(prompter.secret_prompts, 2);
        assert_eq!(settings.store.load().unwrap().unwrap().token, "anx_fresh");
        let args = runtime.last_args();
        assert!(!args.contains(&"--token".to_string()));
        assert_eq!(flag_value(&args, "--project-name"), Some("demo"));
    }

    #[test]
    fn explicit_token_skips_login_and_is_forwarded() {
        let temp = tempfile::tempdir().unwrap();
        let settings = settings(temp.path(), false);
        let runtime = FakeRuntime::new(true, 0);
        let mut prompter = ScriptedPrompter::default().answer_text(None);
        let mut opts = options(temp.path());
        opts.token = Some("anx_flag".to_string());

        execute_scan(opts, &settings, &runtime, &mut prompter).unwrap();

        assert_eq!(prompter.secret_prompts, 0);
        assert!(!settings.store.exists());
        assert_eq!(flag_value(&runtime.last_args(), "--token"), Some("anx_flag"));
    }

    #[test]
    fn empty_token_flag_falls_back_to_login() {
        let temp = tempfile::tempdir().unwrap();
        let settings = settings(temp.path(), false);
        let runtime = FakeRuntime::new(true, 0);
        let mut prompter = ScriptedPrompter::with_secrets(&["anx_fresh"]);
        let mut opts = options(temp.path());
        opts.token = Some(String::new());
        opts.project_name = Some("demo".to_string());

        execute_scan(opts, &settings, &runtime, &mut prompter).unwrap();

        assert_eq!(prompter.secret_prompts, 1);
        assert_eq!(settings.store.load().unwrap().unwrap().token, "anx_fresh");
        assert!(!runtime.last_args().contains(&"--token".to_string()));
    }

    #[test]
    fn empty_project_name_flag_prompts() {
        let temp = tempfile::tempdir().unwrap();
        let settings = settings(temp.path(), true);
        let runtime = FakeRuntime::new(true, 0);
        let mut prompter = ScriptedPrompter::default().answer_text(None);
        let mut opts = options(temp.path());
        opts.project_name = Some(String::new());

        execute_scan(opts, &settings, &runtime, &mut prompter).unwrap();

        assert_eq!(prompter.text_prompts.len(), 1);
        assert_eq!(flag_value(&runtime.last_args(), "--project-name"), Some("my-project"));
    }

    #[test]
    fn stored_config_skips_login() {
        let temp = tempfile::tempdir().unwrap();
        let settings = settings(temp.path(), true);
        let runtime = FakeRuntime::new(true, 0);
        let mut prompter = ScriptedPrompter::default().answer_text(None);

        execute_scan(options(temp.path()), &settings, &runtime, &mut prompter).unwrap();

        assert_eq!(prompter.secret_prompts, 0);
        assert!(!runtime.last_args().contains(&"--token".to_string()));
    }

    #[test]
    fn exit_code_and_mounts_come_from_settings() {
        let temp = tempfile::tempdir().unwrap();
        let mut settings = settings(temp.path(), true);
        settings.api_url = Some("https://api.example".to_string());
        let runtime = FakeRuntime::new(true, 42);
        let mut prompter = ScriptedPrompter::default().answer_text(None);

        let code = execute_scan(options(temp.path()), &settings, &runtime, &mut prompter).unwrap();

        assert_eq!(code, 42);
        let args = runtime.last_args();
        assert_eq!(flag_value(&args, "-e"), Some("ANNEXFOUR_API_URL=https://api.example"));
        let config_mount =
            format!("{}:/root/.config/ai-act-check:ro", settings.store.dir().display());
        assert!(args.contains(&config_mount));
        let code_mount = format!("{}:/code", temp.path().join("my-project").display());
        assert!(args.contains(&code_mount));
    }
}
