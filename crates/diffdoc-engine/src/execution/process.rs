use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use super::{ExecutionError, Executor};

/// Argument placeholder replaced by the path of a temporary source file.
pub const PATH_PLACEHOLDER: &str = "{path}";

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Command line used to run the snippets of one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    pub program: String,
    pub args: Vec<String>,
    /// Extension of the temporary source file, without the dot.
    pub extension: Option<String>,
}

impl Interpreter {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            extension: None,
        }
    }

    /// Builds an interpreter from `[program, args...]`; `None` if empty.
    pub fn from_command(command: &[String], extension: Option<String>) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            extension,
        })
    }

    fn uses_path(&self) -> bool {
        self.args.iter().any(|arg| arg.contains(PATH_PLACEHOLDER))
    }
}

/// Runs snippets as child processes, one interpreter per language.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    interpreters: BTreeMap<String, Interpreter>,
    timeout: Duration,
}

impl ProcessExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self {
            interpreters: BTreeMap::new(),
            timeout,
        }
    }

    pub fn with_interpreter(mut self, language: impl Into<String>, interpreter: Interpreter) -> Self {
        self.interpreters.insert(language.into(), interpreter);
        self
    }

    fn io_error(interpreter: &Interpreter) -> impl FnOnce(std::io::Error) -> ExecutionError + '_ {
        move |source| ExecutionError::Io {
            program: interpreter.program.clone(),
            source,
        }
    }

    fn timed_out(&self, interpreter: &Interpreter) -> ExecutionError {
        ExecutionError::Timeout {
            program: interpreter.program.clone(),
            timeout: self.timeout,
        }
    }

    fn wait(
        &self,
        interpreter: &Interpreter,
        child: &mut Child,
        deadline: Instant,
    ) -> Result<(), ExecutionError> {
        loop {
            if let Some(status) = child.try_wait().map_err(Self::io_error(interpreter))? {
                log::debug!("`{}` exited with {status}", interpreter.program);
                return Ok(());
            }
            if Instant::now() >= deadline {
                // Already-exited races are harmless here.
                let _ = child.kill();
                let _ = child.wait();
                return Err(self.timed_out(interpreter));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Output of one pipe, or a timeout if it is still open at `deadline`.
    ///
    /// Background processes started by the snippet inherit the pipe and keep
    /// it open after the interpreter itself has exited.
    fn collect(
        &self,
        interpreter: &Interpreter,
        pipe: Option<Receiver<Vec<u8>>>,
        deadline: Instant,
    ) -> Result<String, ExecutionError> {
        let Some(pipe) = pipe else {
            return Ok(String::new());
        };
        match pipe.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(RecvTimeoutError::Disconnected) => Ok(String::new()),
            Err(RecvTimeoutError::Timeout) => {
                log::warn!(
                    "`{}` left its output open after exiting",
                    interpreter.program
                );
                Err(self.timed_out(interpreter))
            }
        }
    }
}

impl Executor for ProcessExecutor {
    fn execute(&self, language: &str, source: &str) -> Result<String, ExecutionError> {
        let interpreter = self
            .interpreters
            .get(language)
            .ok_or_else(|| ExecutionError::UnknownLanguage(language.to_string()))?;
        log::info!("running {language} snippet with `{}`", interpreter.program);

        let mut command = Command::new(&interpreter.program);
        command.stdout(Stdio::piped()).stderr(Stdio::piped());

        // Kept alive until the child has finished.
        let mut source_file = None;
        if interpreter.uses_path() {
            let suffix = interpreter
                .extension
                .as_ref()
                .map(|extension| format!(".{extension}"))
                .unwrap_or_default();
            let mut file = tempfile::Builder::new()
                .prefix("diffdoc-")
                .suffix(&suffix)
                .tempfile()
                .map_err(Self::io_error(interpreter))?;
            file.write_all(source.as_bytes())
                .and_then(|()| file.flush())
                .map_err(Self::io_error(interpreter))?;
            let path = file.path().to_string_lossy().into_owned();
            command
                .args(
                    interpreter
                        .args
                        .iter()
                        .map(|arg| arg.replace(PATH_PLACEHOLDER, &path)),
                )
                .stdin(Stdio::null());
            source_file = Some(file);
        } else {
            command.args(&interpreter.args).stdin(Stdio::piped());
        }

        let mut child = command.spawn().map_err(Self::io_error(interpreter))?;
        let deadline = Instant::now() + self.timeout;

        if let Some(mut stdin) = child.stdin.take() {
            let source = source.to_string();
            // A child that exits without reading its input closes the pipe early.
            thread::spawn(move || {
                let _ = stdin.write_all(source.as_bytes());
            });
        }
        let stdout = child.stdout.take().map(read_to_end);
        let stderr = child.stderr.take().map(read_to_end);

        self.wait(interpreter, &mut child, deadline)?;
        drop(source_file);

        let mut output = self.collect(interpreter, stdout, deadline)?;
        output.push_str(&self.collect(interpreter, stderr, deadline)?);
        Ok(output)
    }
}

fn read_to_end<R: Read + Send + 'static>(mut pipe: R) -> Receiver<Vec<u8>> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut buffer = Vec::new();
        let _ = pipe.read_to_end(&mut buffer);
        // The receiver is gone once the run has timed out.
        let _ = sender.send(buffer);
    });
    receiver
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sh(timeout: Duration) -> ProcessExecutor {
        ProcessExecutor::new(timeout).with_interpreter("sh", Interpreter::new("sh", &["-s"]))
    }

    #[test]
    fn captures_stdout_then_stderr() {
        let output = sh(Duration::from_secs(10))
            .execute("sh", "echo out\necho err >&2\n")
            .unwrap();

        assert_eq!(output, "out\nerr\n");
    }

    #[test]
    fn source_can_be_passed_as_a_file() {
        let mut interpreter = Interpreter::new("sh", &["{path}"]);
        interpreter.extension = Some("sh".to_string());
        let executor =
            ProcessExecutor::new(Duration::from_secs(10)).with_interpreter("shell", interpreter);

        let output = executor.execute("shell", "echo \"$0\" | grep -c '\\.sh$'\n").unwrap();

        assert_eq!(output.trim(), "1");
    }

    #[test]
    fn failing_snippet_still_yields_its_output() {
        let output = sh(Duration::from_secs(10))
            .execute("sh", "echo before\nexit 3\n")
            .unwrap();

        assert_eq!(output, "before\n");
    }

    #[test]
    fn slow_snippet_times_out() {
        let err = sh(Duration::from_millis(100))
            .execute("sh", "sleep 5\n")
            .unwrap_err();

        assert!(matches!(err, ExecutionError::Timeout { .. }), "{err}");
    }

    #[test]
    fn background_process_holding_output_times_out() {
        let started = Instant::now();

        let err = sh(Duration::from_millis(500))
            .execute("sh", "echo hi\nsleep 4 &\n")
            .unwrap_err();

        assert!(matches!(err, ExecutionError::Timeout { .. }), "{err}");
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn unknown_language_is_an_error() {
        let err = sh(Duration::from_secs(1)).execute("cobol", "").unwrap_err();

        assert!(matches!(err, ExecutionError::UnknownLanguage(ref language) if language == "cobol"));
    }

    #[test]
    fn missing_program_is_an_io_error() {
        let executor = ProcessExecutor::new(Duration::from_secs(1)).with_interpreter(
            "ghost",
            Interpreter::new("diffdoc-no-such-program", &[]),
        );

        let err = executor.execute("ghost", "").unwrap_err();

        assert!(matches!(err, ExecutionError::Io { .. }));
    }

    #[test]
    fn interpreter_from_command() {
        let command = vec!["python3".to_string(), "-".to_string()];

        assert_eq!(
            Interpreter::from_command(&command, None),
            Some(Interpreter::new("python3", &["-"]))
        );
        assert_eq!(Interpreter::from_command(&[], None), None);
    }
}
