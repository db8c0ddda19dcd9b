//! Interactive bootstrap of a freshly created project.
//!
//! The assistant runs a fixed sequence: resolve the project name, render
//! the configuration files, optionally initialize git, bring up the
//! container stack, install git hooks, optionally install the site and
//! generate a sub-theme, then report the project URL.
//!
//! Steps run strictly in order. A missing template aborts the whole run;
//! declining a gated step skips it without side effects; stack and tooling
//! invocations are fire-and-forget: their exit statuses are surfaced by
//! the runner and deliberately discarded, except for the proxy-port query
//! feeding the final report.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::context::{self, ProjectContext};
use crate::error::Result;
use crate::paths;
use crate::prompt::Prompt;
use crate::runner::{CommandRunner, ComposeBin};
use crate::template;

/// Port assumed for the proxy when its mapping cannot be queried.
const FALLBACK_PROXY_PORT: u16 = 80;

pub struct Assistant<R, P> {
    root: PathBuf,
    config: Config,
    compose: ComposeBin,
    runner: R,
    prompt: P,
}

impl<R: CommandRunner, P: Prompt> Assistant<R, P> {
    pub fn new(root: &Path, config: Config, compose: ComposeBin, runner: R, prompt: P) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
            compose,
            runner,
            prompt,
        }
    }

    /// Run the full bootstrap sequence. `name` skips the interactive
    /// project-name prompt.
    pub fn run(&mut self, name: Option<&str>) -> Result<()> {
        let mut ctx = self.resolve_project(name)?;
        self.render_config_files(&ctx)?;
        self.init_git(&mut ctx)?;
        self.start_stack(&ctx);
        self.install_git_hooks();
        self.install_site(&ctx)?;
        self.create_subtheme(&ctx)?;
        self.report(&ctx);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Step 1: project name
    // -----------------------------------------------------------------------

    fn resolve_project(&mut self, name: Option<&str>) -> Result<ProjectContext> {
        let name = match name {
            Some(n) => n.to_string(),
            None => {
                let default = context::default_project_name(&self.root);
                self.prompt.ask_text("Project name", &default)?
            }
        };
        ProjectContext::new(&name)
    }

    // -----------------------------------------------------------------------
    // Step 2: configuration files
    // -----------------------------------------------------------------------

    fn render_config_files(&self, ctx: &ProjectContext) -> Result<()> {
        println!("Setting up configuration files");
        for tpl in template::config_templates(ctx) {
            template::render(&self.root, &tpl, ctx)?;
            println!("  rendered: {}", tpl.destination);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Step 3: git (confirm-gated)
    // -----------------------------------------------------------------------

    fn init_git(&mut self, ctx: &mut ProjectContext) -> Result<()> {
        ctx.git_initialized = self
            .prompt
            .confirm("Initialize a git repository?", true)?;
        if !ctx.git_initialized {
            return Ok(());
        }
        println!("Initializing git on branch dev");
        let _ = self.runner.run(&self.root, "git", &["init"]);
        let _ = self.runner.run(&self.root, "git", &["checkout", "-b", "dev"]);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Steps 4–5: container stack and git hooks (unconditional)
    // -----------------------------------------------------------------------

    fn start_stack(&mut self, ctx: &ProjectContext) {
        println!("Starting the container stack");
        let setup = format!("./{}/setup-traefik-port.sh", self.config.scaffold.scripts_dir);
        let _ = self.runner.run(&self.root, &setup, &[]);

        let php = self.config.bootstrap.php_service.clone();
        let theme_dir = paths::theme_dir(&ctx.theme_name);
        let _ = self.compose_run(&["up", "-d", &php]);
        let _ = self.compose_run(&["exec", &php, "mkdir", "-p", &theme_dir]);
        let _ = self.compose_run(&["up", "-d"]);
    }

    fn install_git_hooks(&mut self) {
        println!("Installing git hooks");
        let php = self.config.bootstrap.php_service.clone();
        let _ = self.compose_run(&["exec", &php, "vendor/bin/grumphp", "git:init"]);
    }

    // -----------------------------------------------------------------------
    // Step 6: site installation (confirm-gated)
    // -----------------------------------------------------------------------

    fn install_site(&mut self, ctx: &ProjectContext) -> Result<()> {
        if !self.prompt.confirm("Install the site now?", true)? {
            return Ok(());
        }
        // The database service needs a moment after its first boot; a fixed
        // wait avoids installing against a half-initialized server.
        let wait = Duration::from_secs(self.config.bootstrap.install_wait_secs);
        println!("Waiting {}s for the database service", wait.as_secs());
        self.runner.sleep(wait);

        template::render(&self.root, &template::local_settings_template(), ctx)?;
        println!("  rendered: {}", paths::SETTINGS_LOCAL);

        println!("Installing the site");
        let php = self.config.bootstrap.php_service.clone();
        let _ = self.compose_run(&["exec", &php, "drush", "site-install", "--existing-config", "-y"]);
        let _ = self.compose_run(&["exec", &php, "drush", "cr"]);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Step 7: sub-theme (confirm-gated)
    // -----------------------------------------------------------------------

    fn create_subtheme(&mut self, ctx: &ProjectContext) -> Result<()> {
        if !self.prompt.confirm("Create a sub-theme?", true)? {
            return Ok(());
        }
        println!("Generating sub-theme {}", ctx.theme_name);
        let php = self.config.bootstrap.php_service.clone();
        let base = self.config.bootstrap.base_theme.clone();
        let include = format!("--include=web/themes/contrib/{base}");
        let generator = format!("{base}:create");

        let _ = self.compose_run(&["exec", &php, "drush", "en", "components", "-y"]);
        let _ = self.compose_run(&["exec", &php, "drush", "theme:enable", &base, "-y"]);
        let _ = self.compose_run(&["exec", &php, "drush", &include, &generator, &ctx.theme_name]);
        let _ = self.compose_run(&["exec", &php, "drush", "theme:enable", &ctx.theme_name, "-y"]);
        let _ = self.compose_run(&[
            "exec",
            &php,
            "drush",
            "config:set",
            "system.theme",
            "default",
            &ctx.theme_name,
            "-y",
        ]);
        let _ = self.runner.run(&self.root, "make", &["frontend"]);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Step 8: completion report
    // -----------------------------------------------------------------------

    fn report(&mut self, ctx: &ProjectContext) {
        let proxy = self.config.bootstrap.proxy_service.clone();
        let port = self
            .compose_capture(&["port", &proxy, "80"])
            .as_deref()
            .and_then(parse_proxy_port)
            .unwrap_or(FALLBACK_PROXY_PORT);

        if ctx.git_initialized {
            let _ = self.runner.run(&self.root, "git", &["add", "."]);
            let _ = self.runner.run(
                &self.root,
                "git",
                &["commit", "-m", "Initial commit", "--allow-empty"],
            );
        }

        let url = format!(
            "http://{}.{}:{port}",
            ctx.project_name, self.config.bootstrap.domain_suffix
        );
        println!();
        println!("Bootstrap finished. The site is reachable at {url}");

        let php = self.config.bootstrap.php_service.clone();
        let uri = format!("--uri={url}");
        let _ = self.compose_run(&["exec", &php, "drush", "uli", &uri]);
    }

    // -----------------------------------------------------------------------
    // Compose helpers
    // -----------------------------------------------------------------------

    fn compose_run(&mut self, args: &[&str]) -> bool {
        let (program, lead) = self.compose.command();
        let mut full: Vec<&str> = lead.to_vec();
        full.extend_from_slice(args);
        self.runner.run(&self.root, program, &full)
    }

    fn compose_capture(&mut self, args: &[&str]) -> Option<String> {
        let (program, lead) = self.compose.command();
        let mut full: Vec<&str> = lead.to_vec();
        full.extend_from_slice(args);
        self.runner.capture(&self.root, program, &full)
    }
}

/// Extract the host port from `compose port` output (`0.0.0.0:49153`).
pub fn parse_proxy_port(output: &str) -> Option<u16> {
    output
        .trim()
        .lines()
        .next()?
        .rsplit(':')
        .next()?
        .trim()
        .parse()
        .ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SitekitError;
    use std::collections::VecDeque;
    use tempfile::TempDir;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    #[derive(Default)]
    struct RecordingRunner {
        commands: Vec<String>,
        captures: Vec<String>,
        port_output: Option<String>,
        slept: Vec<Duration>,
    }

    impl RecordingRunner {
        fn has(&self, needle: &str) -> bool {
            self.commands.iter().any(|c| c.contains(needle))
        }
    }

    impl CommandRunner for &mut RecordingRunner {
        fn run(&mut self, _dir: &Path, program: &str, args: &[&str]) -> bool {
            self.commands.push(format!("{program} {}", args.join(" ")));
            true
        }

        fn capture(&mut self, _dir: &Path, program: &str, args: &[&str]) -> Option<String> {
            self.captures.push(format!("{program} {}", args.join(" ")));
            self.port_output.clone()
        }

        fn sleep(&mut self, duration: Duration) {
            self.slept.push(duration);
        }
    }

    struct ScriptedPrompt {
        name: Option<String>,
        confirms: VecDeque<bool>,
        texts_asked: usize,
    }

    impl ScriptedPrompt {
        fn new(name: Option<&str>, confirms: &[bool]) -> Self {
            Self {
                name: name.map(String::from),
                confirms: confirms.iter().copied().collect(),
                texts_asked: 0,
            }
        }
    }

    impl Prompt for &mut ScriptedPrompt {
        fn ask_text(&mut self, _message: &str, default: &str) -> crate::Result<String> {
            self.texts_asked += 1;
            Ok(self
                .name
                .clone()
                .unwrap_or_else(|| default.to_string()))
        }

        fn confirm(&mut self, _message: &str, default: bool) -> crate::Result<bool> {
            Ok(self.confirms.pop_front().unwrap_or(default))
        }
    }

    // -----------------------------------------------------------------------
    // Fixtures
    // -----------------------------------------------------------------------

    fn seed_project(root: &Path) {
        let files: &[(&str, &str)] = &[
            (".env.example", "PROJECT_NAME=example\n"),
            ("Makefile", "THEME_NAME=example\n"),
            (
                "drush/sites/sitename.site.yml.example",
                "local:\n  uri: 'http://example.docker.localhost'\n",
            ),
            ("behat.yml", "base_url: http://example.docker.localhost\n"),
            (
                "tests/backstop/cookies.json",
                "[{\"domain\": \"example.docker.localhost\"}]\n",
            ),
            ("docker-compose.override.yml.dist", "services: {}\n"),
            ("phpunit.xml.dist", "<phpunit/>\n"),
            ("phpcs.xml.dist", "<ruleset/>\n"),
            ("phpmd.xml.dist", "<ruleset/>\n"),
            (
                "web/sites/example.settings.local.php",
                "<?php $settings['trusted'] = 'example';\n",
            ),
        ];
        for (path, content) in files {
            let p = root.join(path);
            if let Some(parent) = p.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(p, content).unwrap();
        }
    }

    fn run_assistant(
        root: &Path,
        runner: &mut RecordingRunner,
        prompt: &mut ScriptedPrompt,
        name: Option<&str>,
    ) -> crate::Result<()> {
        Assistant::new(
            root,
            Config::default(),
            ComposeBin::Standalone,
            runner,
            prompt,
        )
        .run(name)
    }

    /// Assert each needle appears in `commands`, in the given order.
    fn assert_command_order(commands: &[String], needles: &[&str]) {
        let mut from = 0;
        for needle in needles {
            match commands[from..].iter().position(|c| c.contains(needle)) {
                Some(i) => from += i + 1,
                None => panic!("missing or out of order: {needle}\ncommands: {commands:#?}"),
            }
        }
    }

    // -----------------------------------------------------------------------
    // Full run
    // -----------------------------------------------------------------------

    #[test]
    fn full_run_executes_every_step_in_order() {
        let dir = TempDir::new().unwrap();
        seed_project(dir.path());
        let mut runner = RecordingRunner {
            port_output: Some("0.0.0.0:49153\n".to_string()),
            ..Default::default()
        };
        let mut prompt = ScriptedPrompt::new(Some("acme-demo"), &[true, true, true]);

        run_assistant(dir.path(), &mut runner, &mut prompt, None).unwrap();

        // rendered files
        let env = std::fs::read_to_string(dir.path().join(".env")).unwrap();
        assert_eq!(env, "PROJECT_NAME=acme-demo\n");
        let makefile = std::fs::read_to_string(dir.path().join("Makefile")).unwrap();
        assert_eq!(makefile, "THEME_NAME=acme_demo\n");
        assert!(dir.path().join("drush/sites/acme-demo.site.yml").exists());
        assert!(dir.path().join("docker-compose.override.yml").exists());
        assert!(dir.path().join("phpunit.xml").exists());
        let settings = std::fs::read_to_string(
            dir.path().join("web/sites/default/settings.local.php"),
        )
        .unwrap();
        assert!(settings.contains("acme-demo"));

        // external command sequence
        assert_command_order(
            &runner.commands,
            &[
                "git init",
                "git checkout -b dev",
                "setup-traefik-port.sh",
                "docker-compose up -d php",
                "docker-compose exec php mkdir -p web/themes/custom/acme_demo",
                "docker-compose up -d",
                "docker-compose exec php vendor/bin/grumphp git:init",
                "docker-compose exec php drush site-install --existing-config -y",
                "docker-compose exec php drush cr",
                "docker-compose exec php drush en components -y",
                "docker-compose exec php drush theme:enable radix -y",
                "docker-compose exec php drush --include=web/themes/contrib/radix radix:create acme_demo",
                "docker-compose exec php drush theme:enable acme_demo -y",
                "docker-compose exec php drush config:set system.theme default acme_demo -y",
                "make frontend",
                "git add .",
                "git commit -m Initial commit --allow-empty",
                "docker-compose exec php drush uli --uri=http://acme-demo.docker.localhost:49153",
            ],
        );
        assert_eq!(runner.captures, ["docker-compose port traefik 80"]);
        assert_eq!(runner.slept, [Duration::from_secs(10)]);
    }

    #[test]
    fn plugin_compose_prefixes_docker() {
        let dir = TempDir::new().unwrap();
        seed_project(dir.path());
        let mut runner = RecordingRunner::default();
        let mut prompt = ScriptedPrompt::new(None, &[false, false, false]);

        Assistant::new(
            dir.path(),
            Config::default(),
            ComposeBin::Plugin,
            &mut runner,
            &mut prompt,
        )
        .run(Some("acme"))
        .unwrap();

        assert!(runner.has("docker compose up -d php"));
        assert!(!runner.has("docker-compose"));
    }

    // -----------------------------------------------------------------------
    // Gates
    // -----------------------------------------------------------------------

    #[test]
    fn declined_gates_leave_no_trace() {
        let dir = TempDir::new().unwrap();
        seed_project(dir.path());
        let mut runner = RecordingRunner::default();
        let mut prompt = ScriptedPrompt::new(Some("acme-demo"), &[false, false, false]);

        run_assistant(dir.path(), &mut runner, &mut prompt, None).unwrap();

        // gated steps skipped entirely
        assert!(!runner.has("git init"));
        assert!(!runner.has("git checkout"));
        assert!(!runner.has("git add"));
        assert!(!runner.has("git commit"));
        assert!(!runner.has("site-install"));
        assert!(!runner.has("drush en"));
        assert!(!runner.has("make frontend"));
        assert!(runner.slept.is_empty());
        assert!(!dir
            .path()
            .join("web/sites/default/settings.local.php")
            .exists());

        // unconditional steps still ran
        assert!(runner.has("setup-traefik-port.sh"));
        assert!(runner.has("docker-compose up -d php"));
        assert!(runner.has("grumphp git:init"));
        assert!(runner.has("drush uli"));
        assert!(dir.path().join(".env").exists());
    }

    #[test]
    fn git_commit_follows_earlier_git_decision() {
        let dir = TempDir::new().unwrap();
        seed_project(dir.path());
        let mut runner = RecordingRunner::default();
        // git yes, site install no, sub-theme no
        let mut prompt = ScriptedPrompt::new(Some("acme-demo"), &[true, false, false]);

        run_assistant(dir.path(), &mut runner, &mut prompt, None).unwrap();

        assert!(runner.has("git init"));
        assert!(runner.has("git commit -m Initial commit --allow-empty"));
        assert!(!runner.has("site-install"));
    }

    // -----------------------------------------------------------------------
    // Fatal paths
    // -----------------------------------------------------------------------

    #[test]
    fn missing_template_aborts_before_any_command() {
        let dir = TempDir::new().unwrap();
        let mut runner = RecordingRunner::default();
        let mut prompt = ScriptedPrompt::new(Some("acme-demo"), &[true, true, true]);

        let err = run_assistant(dir.path(), &mut runner, &mut prompt, None).unwrap_err();
        assert!(matches!(err, SitekitError::TemplateMissing(_)));
        assert!(runner.commands.is_empty());
        assert!(runner.slept.is_empty());
    }

    #[test]
    fn invalid_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut runner = RecordingRunner::default();
        let mut prompt = ScriptedPrompt::new(None, &[]);

        let err =
            run_assistant(dir.path(), &mut runner, &mut prompt, Some("Bad Name")).unwrap_err();
        assert!(matches!(err, SitekitError::InvalidProjectName(_)));
    }

    // -----------------------------------------------------------------------
    // Name resolution and report
    // -----------------------------------------------------------------------

    #[test]
    fn name_option_skips_the_prompt() {
        let dir = TempDir::new().unwrap();
        seed_project(dir.path());
        let mut runner = RecordingRunner::default();
        let mut prompt = ScriptedPrompt::new(Some("ignored"), &[false, false, false]);

        run_assistant(dir.path(), &mut runner, &mut prompt, Some("acme-demo")).unwrap();

        assert_eq!(prompt.texts_asked, 0);
        assert!(dir.path().join("drush/sites/acme-demo.site.yml").exists());
    }

    #[test]
    fn unparseable_port_falls_back_to_80() {
        let dir = TempDir::new().unwrap();
        seed_project(dir.path());
        let mut runner = RecordingRunner::default(); // capture returns None
        let mut prompt = ScriptedPrompt::new(Some("acme-demo"), &[false, false, false]);

        run_assistant(dir.path(), &mut runner, &mut prompt, None).unwrap();

        assert!(runner.has("drush uli --uri=http://acme-demo.docker.localhost:80"));
    }

    #[test]
    fn parse_proxy_port_variants() {
        assert_eq!(parse_proxy_port("0.0.0.0:49153\n"), Some(49153));
        assert_eq!(parse_proxy_port("[::]:8080"), Some(8080));
        assert_eq!(parse_proxy_port("0.0.0.0:49153\n0.0.0.0:49154\n"), Some(49153));
        assert_eq!(parse_proxy_port("no port here"), None);
        assert_eq!(parse_proxy_port(""), None);
    }
}
