//! Test doubles for the process and wait seams
//!
//! [`ScriptedRunner`] records every command and answers from a small rule
//! table; [`RecordingWaiter`] records waits instead of sleeping.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::benchmark::process::{CommandOutput, CommandRunner, CommandSpec};
use crate::benchmark::wait::ContainerWaiter;
use crate::error::{AppError, AppResult};

type Matcher = Box<dyn Fn(&CommandSpec) -> bool + Send + Sync>;

enum Response {
    Fail(i32),
    Stdout(Vec<u8>),
}

struct Rule {
    matcher: Matcher,
    response: Response,
}

/// Records commands; succeeds with empty output unless a rule matches
#[derive(Default)]
pub struct ScriptedRunner {
    rules: Vec<Rule>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every command whose argv starts with `prefix`
    pub fn fail_on(self, prefix: &[&str]) -> Self {
        self.rule(prefix, Response::Fail(1))
    }

    /// Answer every command whose argv starts with `prefix` with `stdout`
    pub fn stdout_on(self, prefix: &[&str], stdout: &[u8]) -> Self {
        self.rule(prefix, Response::Stdout(stdout.to_vec()))
    }

    fn rule(mut self, prefix: &[&str], response: Response) -> Self {
        let prefix: Vec<String> = prefix.iter().map(|s| s.to_string()).collect();
        self.rules.push(Rule {
            matcher: Box::new(move |spec: &CommandSpec| {
                let argv = spec.argv();
                argv.len() >= prefix.len() && argv.iter().zip(&prefix).all(|(a, p)| *a == p.as_str())
            }),
            response,
        });
        self
    }

    /// Every command run so far
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Every command run so far, rendered as a command line
    pub fn lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }

    /// Number of commands whose argv starts with `prefix`
    pub fn count(&self, prefix: &[&str]) -> usize {
        self.calls()
            .iter()
            .filter(|spec| {
                let argv = spec.argv();
                argv.len() >= prefix.len() && argv.iter().zip(prefix).all(|(a, p)| a == p)
            })
            .count()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, spec: &CommandSpec) -> AppResult<CommandOutput> {
        self.calls.lock().unwrap().push(spec.clone());

        match self.rules.iter().find(|rule| (rule.matcher)(spec)) {
            Some(Rule {
                response: Response::Fail(code),
                ..
            }) => Err(AppError::CommandFailed {
                program: spec.program.clone(),
                exit_code: Some(*code),
                stderr: format!("scripted failure of `{spec}`"),
            }),
            Some(Rule {
                response: Response::Stdout(stdout),
                ..
            }) => Ok(CommandOutput {
                exit_code: Some(0),
                stdout: stdout.clone(),
                stderr: Vec::new(),
            }),
            None => Ok(CommandOutput {
                exit_code: Some(0),
                ..Default::default()
            }),
        }
    }
}

/// Records waits without sleeping
#[derive(Debug, Default)]
pub struct RecordingWaiter {
    events: Mutex<Vec<String>>,
}

impl RecordingWaiter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContainerWaiter for RecordingWaiter {
    async fn wait_for_ready(&self, container: &str) {
        self.events.lock().unwrap().push(format!("ready {container}"));
    }

    async fn wait_for_release(&self, container: &str) {
        self.events.lock().unwrap().push(format!("release {container}"));
    }
}
